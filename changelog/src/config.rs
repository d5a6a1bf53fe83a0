use crate::error::ChangelogError;
use crate::types::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// File looked up in the working directory when no explicit config is given
pub const DEFAULT_CONFIG_FILE: &str = "bom-changelog.toml";

/// Maps an artifact id prefix to the GitHub organization hosting it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    pub prefix: String,
    pub name: String,
}

/// Configuration options for manifest parsing and changelog rendering
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Manifest category comment text -> rendered category label
    pub categories: HashMap<String, String>,
    /// Platform suffixes folded into their base artifact, checked in order
    pub variant_suffixes: Vec<String>,
    /// Call names wrapping a `group:artifact:version` coordinate
    pub declaration_calls: Vec<String>,
    pub organizations: Vec<Organization>,
    pub verbose: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        let categories = [
            ("Keypop", "**Keypop Dependencies**"),
            ("Keyple core", "**Keyple Core**"),
            ("Keyple distributed", "**Keyple Distributed**"),
            ("Keyple interop", "**Keyple Interop**"),
            ("Keyple card extensions", "**Keyple Card Extensions**"),
            ("Keyple reader plugins", "**Keyple Reader Plugins**"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            categories,
            variant_suffixes: vec![
                "-jvm".to_string(),
                "-android".to_string(),
                "-iosarm64".to_string(),
                "-iossimulatorarm64".to_string(),
                "-iosx64".to_string(),
            ],
            declaration_calls: vec!["api".to_string()],
            organizations: vec![
                Organization {
                    prefix: "keypop-".to_string(),
                    name: "eclipse-keypop".to_string(),
                },
                Organization {
                    prefix: "keyple-".to_string(),
                    name: "eclipse-keyple".to_string(),
                },
            ],
            verbose: false,
        }
    }
}

impl ChangelogConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file is missing or is not valid TOML
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChangelogError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            ChangelogError::from(e).with_context(format!("Failed to parse {}", path.display()))
        })?;
        Ok(config)
    }

    /// Uses the explicit path when given, then `bom-changelog.toml` in the
    /// working directory, then the built-in defaults.
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Rendered label for a manifest category comment
    #[must_use]
    pub fn category_label(&self, comment: &str) -> String {
        self.categories
            .get(comment)
            .cloned()
            .unwrap_or_else(|| comment.to_string())
    }

    /// Strips the first matching platform suffix, returning the base artifact id
    #[must_use]
    pub fn strip_variant_suffix<'a>(&self, artifact_id: &'a str) -> Option<&'a str> {
        self.variant_suffixes
            .iter()
            .find_map(|suffix| artifact_id.strip_suffix(suffix.as_str()))
    }

    /// Organization owning an artifact, by id prefix
    #[must_use]
    pub fn organization_for(&self, artifact_id: &str) -> Option<&str> {
        self.organizations
            .iter()
            .find(|org| artifact_id.starts_with(&org.prefix))
            .map(|org| org.name.as_str())
    }

    /// Whether a link key belongs to the per-artifact link block
    #[must_use]
    pub fn is_artifact_key(&self, key: &str) -> bool {
        self.organization_for(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unmapped_category_is_used_verbatim() {
        let config = ChangelogConfig::default();
        assert_eq!(config.category_label("Keyple core"), "**Keyple Core**");
        assert_eq!(config.category_label("Legacy"), "Legacy");
    }

    #[test]
    fn test_variant_suffix_stripping() {
        let config = ChangelogConfig::default();
        assert_eq!(
            config.strip_variant_suffix("keyple-interop-kmp-lib-iosx64"),
            Some("keyple-interop-kmp-lib")
        );
        assert_eq!(config.strip_variant_suffix("keyple-util-java-lib"), None);
    }

    #[test]
    fn test_organization_lookup() {
        let config = ChangelogConfig::default();
        assert_eq!(config.organization_for("keypop-reader-java-api"), Some("eclipse-keypop"));
        assert_eq!(config.organization_for("keyple-util-java-lib"), Some("eclipse-keyple"));
        assert_eq!(config.organization_for("slf4j-api"), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bom-changelog.toml");
        fs::write(
            &path,
            r#"
variant_suffixes = ["-jvm"]

[[organizations]]
prefix = "acme-"
name = "acme-corp"
"#,
        )
        .unwrap();

        let config = ChangelogConfig::load_from_file(&path).unwrap();
        assert_eq!(config.variant_suffixes, vec!["-jvm".to_string()]);
        assert_eq!(config.organization_for("acme-core"), Some("acme-corp"));
        assert_eq!(config.declaration_calls, vec!["api".to_string()]);
        assert_eq!(config.category_label("Keypop"), "**Keypop Dependencies**");
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ChangelogConfig::load_from_file(temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ChangelogError::ConfigNotFound { .. })));
    }
}
