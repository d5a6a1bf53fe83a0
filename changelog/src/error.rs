use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reconciling a manifest against a changelog
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read or write file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid version format: {0}")]
    InvalidVersion(String),

    #[error("Could not find [Unreleased] section in changelog")]
    MissingUnreleasedSection,

    #[error("{0}: {1}")]
    WithContext(String, Box<ChangelogError>),
}

impl ChangelogError {
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ReadError(e) => format!("File operation failed: {e}"),
            Self::ConfigError(e) => format!("Invalid configuration file: {e}"),
            Self::ConfigNotFound { path } => {
                format!("Configuration file not found: {}", path.display())
            }
            Self::InvalidVersion(ver) => {
                format!("Invalid version format '{ver}'. Expected YYYY.MM.DD")
            }
            Self::MissingUnreleasedSection => {
                "Could not find [Unreleased] section in changelog".to_string()
            }
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_prepended_to_user_message() {
        let err = ChangelogError::MissingUnreleasedSection.with_context("Updating CHANGELOG.md");
        assert_eq!(
            err.user_message(),
            "Updating CHANGELOG.md: Could not find [Unreleased] section in changelog"
        );
    }

    #[test]
    fn test_invalid_version_mentions_expected_format() {
        let err = ChangelogError::InvalidVersion("2024-01-01".to_string());
        assert!(err.user_message().contains("YYYY.MM.DD"));
    }
}
