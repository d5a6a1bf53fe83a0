//! Shared fixtures for the changelog integration tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const TABLE_HEADER: &str =
    "| Component                                       | Version | Status | Prev.<br>Version |";
pub const TABLE_ALIGNMENT: &str =
    "|:------------------------------------------------|:-------:|:------:|:----------------:|";
pub const BLANK_ROW: &str =
    "|                                                 |         |        |                  |";

/// Manifest for a BOM with one Keypop API and two Keyple core libraries
pub const BOM_MANIFEST: &str = r#"plugins {
  `java-platform`
  `maven-publish`
}

javaPlatform { allowDependencies() }

dependencies {
  constraints {
    // Keypop
    api("org.eclipse.keypop:keypop-reader-java-api:2.0.1")
    // Keyple core
    api("org.eclipse.keyple:keyple-common-java-api:2.0.2")
    api("org.eclipse.keyple:keyple-core:3.0.0")
  }
}
"#;

/// Changelog whose latest section matches [`BOM_MANIFEST`]
pub const BOM_CHANGELOG: &str = "# Changelog
All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/),
and this project adheres to [Calendar Versioning](https://calver.org/).

## [Unreleased]

## [2024.01.01]

| Component                                       | Version | Status | Prev.<br>Version |
|:------------------------------------------------|:-------:|:------:|:----------------:|
| **Keypop Dependencies**                         |         |        |                  |
| [keypop-reader-java-api]                        | `2.0.1` |        |                  |
|                                                 |         |        |                  |
| **Keyple Core**                                 |         |        |                  |
| [keyple-common-java-api]                        | `2.0.2` |        |                  |
| [keyple-core]                                   | `3.0.0` |        |                  |

## [2023.12.01]

| Component                                       | Version | Status | Prev.<br>Version |
|:------------------------------------------------|:-------:|:------:|:----------------:|
| **Keyple Core**                                 |         |        |                  |
| [keyple-core]                                   | `3.0.0` |   🆕    |                  |

[Unreleased]: https://github.com/eclipse-keyple/keyple-java-bom/compare/2024.01.01...HEAD
[2024.01.01]: https://github.com/eclipse-keyple/keyple-java-bom/compare/2023.12.01...2024.01.01
[2023.12.01]: https://github.com/eclipse-keyple/keyple-java-bom/releases/tag/2023.12.01

[keypop-reader-java-api]: https://github.com/eclipse-keypop/keypop-reader-java-api/releases

[keyple-common-java-api]: https://github.com/eclipse-keyple/keyple-common-java-api/releases
[keyple-core]: https://github.com/eclipse-keyple/keyple-core/releases
";

/// Paths of a manifest and changelog written into a scratch directory
pub struct Project {
    pub manifest: PathBuf,
    pub changelog: PathBuf,
}

impl Project {
    pub fn write(dir: &Path, manifest: &str, changelog: &str) -> io::Result<Self> {
        let project = Self {
            manifest: dir.join("build.gradle.kts"),
            changelog: dir.join("CHANGELOG.md"),
        };
        fs::write(&project.manifest, manifest)?;
        fs::write(&project.changelog, changelog)?;
        Ok(project)
    }

    pub fn read_changelog(&self) -> io::Result<String> {
        fs::read_to_string(&self.changelog)
    }
}

/// Builds a `constraints` block from `(category comment, coordinate)` pairs,
/// writing the comment whenever the category changes
pub fn manifest_with(entries: &[(&str, &str)]) -> String {
    let mut manifest = String::from("dependencies {\n  constraints {\n");
    let mut current: Option<&str> = None;
    for (category, coordinate) in entries {
        if current != Some(*category) {
            manifest.push_str(&format!("    // {category}\n"));
            current = Some(*category);
        }
        manifest.push_str(&format!("    api(\"{coordinate}\")\n"));
    }
    manifest.push_str("  }\n}\n");
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use changelog::{ChangelogConfig, ManifestParser, SnapshotParser};

    #[test]
    fn test_fixtures_agree_with_each_other() {
        let config = ChangelogConfig::default();
        let deps = ManifestParser::new(&config).parse(BOM_MANIFEST);
        let snapshot = SnapshotParser::new().parse(BOM_CHANGELOG);

        assert_eq!(snapshot.version(), Some("2024.01.01"));
        assert_eq!(deps.len(), snapshot.len());
        for dep in &deps {
            let entry = snapshot.get(&dep.artifact_id).unwrap();
            assert_eq!(entry.version, dep.version);
            assert_eq!(entry.category, dep.category);
        }
    }

    #[test]
    fn test_manifest_with_builds_parseable_block() {
        let manifest = manifest_with(&[("Keyple core", "org.eclipse.keyple:keyple-core:3.0.0")]);
        let config = ChangelogConfig::default();
        let deps = ManifestParser::new(&config).parse(&manifest);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].category, "**Keyple Core**");
    }
}
