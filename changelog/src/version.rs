use std::fmt;

/// Magnitude of a version change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Major,
    Minor,
    Patch,
}

impl ChangeKind {
    /// Status marker written in the changelog table
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Major => "🔴",
            Self::Minor => "🔵",
            Self::Patch => "🟢",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        };
        write!(f, "{name}")
    }
}

/// Parses a dotted version into its numeric components.
///
/// Any component that is not a non-negative integer degrades the whole
/// version to `[0]`.
#[must_use]
pub fn parse_components(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|part| part.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|_| vec![0])
}

/// Classifies the change from `old` to `new`.
///
/// Returns `None` when both versions are equal once right-padded with zeros.
/// A decrease is reported as a patch.
#[must_use]
pub fn compare(old: &str, new: &str) -> Option<ChangeKind> {
    let mut old = parse_components(old);
    let mut new = parse_components(new);

    let len = old.len().max(new.len());
    old.resize(len, 0);
    new.resize(len, 0);

    if old == new {
        return None;
    }

    if new[0] > old[0] {
        return Some(ChangeKind::Major);
    }

    if len > 1 && new[0] == old[0] && new[1] > old[1] {
        return Some(ChangeKind::Minor);
    }

    Some(ChangeKind::Patch)
}
