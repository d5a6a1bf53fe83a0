use crate::config::ChangelogConfig;
use crate::types::Dependency;
use std::collections::{HashMap, HashSet};

/// Extracts the ordered dependency list from a build manifest's
/// `constraints { ... }` block.
#[derive(Debug, Clone)]
pub struct ManifestParser<'a> {
    config: &'a ChangelogConfig,
}

/// A `group:artifact:version` coordinate found on one manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate<'a> {
    pub group_id: &'a str,
    pub artifact_id: &'a str,
    pub version: &'a str,
}

#[derive(Debug, Default)]
struct Fold {
    records: HashMap<String, Dependency>,
    order: Vec<String>,
    /// Records that so far only have a variant declaration
    variant_only: HashSet<String>,
}

impl Fold {
    fn record_base(&mut self, dependency: Dependency) {
        let id = &dependency.artifact_id;
        if self.variant_only.remove(id) {
            // The base line decides where the record sits
            self.order.retain(|seen| seen != id);
            self.order.push(id.clone());
        } else if !self.records.contains_key(id) {
            self.order.push(id.clone());
        }
        self.records
            .insert(dependency.artifact_id.clone(), dependency);
    }

    fn record_variant(&mut self, dependency: Dependency) {
        if self.records.contains_key(&dependency.artifact_id) {
            return;
        }
        self.order.push(dependency.artifact_id.clone());
        self.variant_only.insert(dependency.artifact_id.clone());
        self.records
            .insert(dependency.artifact_id.clone(), dependency);
    }

    fn finish(mut self) -> Vec<Dependency> {
        self.order
            .iter()
            .filter_map(|id| self.records.remove(id))
            .collect()
    }
}

impl<'a> ManifestParser<'a> {
    #[must_use]
    pub const fn new(config: &'a ChangelogConfig) -> Self {
        Self { config }
    }

    /// Parses the manifest into one record per base artifact, in first
    /// encounter order.
    ///
    /// Platform variants fold into their base id: the first variant seen
    /// provides the version and category, and a literal base declaration
    /// always replaces it and takes the position of the base line. Coordinates before any category comment are
    /// skipped. A manifest without a constraints block yields no records.
    #[must_use]
    pub fn parse(&self, content: &str) -> Vec<Dependency> {
        let Some(block) = find_constraints_block(content) else {
            return Vec::new();
        };

        let mut fold = Fold::default();
        let mut current_category: Option<String> = None;

        for line in block.lines() {
            let line = line.trim();

            if line.starts_with("//") {
                let comment = line.trim_start_matches('/').trim();
                current_category = Some(self.config.category_label(comment));
                continue;
            }

            let Some(coordinate) = self.parse_coordinate(line) else {
                continue;
            };
            let Some(category) = current_category.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };

            match self.config.strip_variant_suffix(coordinate.artifact_id) {
                Some(base_id) => fold.record_variant(Dependency {
                    group_id: coordinate.group_id.to_string(),
                    artifact_id: base_id.to_string(),
                    version: coordinate.version.to_string(),
                    category: category.to_string(),
                }),
                None => fold.record_base(Dependency {
                    group_id: coordinate.group_id.to_string(),
                    artifact_id: coordinate.artifact_id.to_string(),
                    version: coordinate.version.to_string(),
                    category: category.to_string(),
                }),
            }
        }

        fold.finish()
    }

    /// Recognizes `call("group:artifact:version")` for any configured call name
    #[must_use]
    pub fn parse_coordinate<'l>(&self, line: &'l str) -> Option<Coordinate<'l>> {
        self.config
            .declaration_calls
            .iter()
            .find_map(|call| parse_call(line, call))
    }
}

fn parse_call<'l>(line: &'l str, call: &str) -> Option<Coordinate<'l>> {
    let args = line.strip_prefix(call)?.strip_prefix("(\"")?;
    let close = args.find('"')?;
    if !args[close + 1..].starts_with(')') {
        return None;
    }

    let mut parts = args[..close].splitn(3, ':');
    let group_id = parts.next().filter(|s| !s.is_empty())?;
    let artifact_id = parts.next().filter(|s| !s.is_empty())?;
    let version = parts.next().filter(|s| !s.is_empty())?;

    Some(Coordinate {
        group_id,
        artifact_id,
        version,
    })
}

/// Body of the first `constraints { ... }` block, up to the first closing brace
fn find_constraints_block(content: &str) -> Option<&str> {
    content.match_indices("constraints").find_map(|(pos, keyword)| {
        let rest = content[pos + keyword.len()..].trim_start();
        let body = rest.strip_prefix('{')?;
        body.find('}').map(|end| &body[..end])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<Dependency> {
        let config = ChangelogConfig::default();
        ManifestParser::new(&config).parse(content)
    }

    fn ids(deps: &[Dependency]) -> Vec<&str> {
        deps.iter().map(|d| d.artifact_id.as_str()).collect()
    }

    #[test]
    fn test_parses_categories_in_declaration_order() {
        let deps = parse(
            r#"
dependencies {
  constraints {
    // Keypop
    api("org.eclipse.keypop:keypop-reader-java-api:2.0.1")
    // Keyple core
    api("org.eclipse.keyple:keyple-util-java-lib:2.4.0")
    api("org.eclipse.keyple:keyple-common-java-api:2.0.2")
  }
}
"#,
        );

        assert_eq!(
            ids(&deps),
            vec!["keypop-reader-java-api", "keyple-util-java-lib", "keyple-common-java-api"]
        );
        assert_eq!(deps[0].category, "**Keypop Dependencies**");
        assert_eq!(deps[0].group_id, "org.eclipse.keypop");
        assert_eq!(deps[1].category, "**Keyple Core**");
        assert_eq!(deps[2].version, "2.0.2");
    }

    #[test]
    fn test_variants_fold_first_seen_wins() {
        let deps = parse(
            r#"constraints {
    // Interop
    api("org.acme:foo-jvm:2.0")
    api("org.acme:foo-android:2.0")
}"#,
        );
        assert_eq!(ids(&deps), vec!["foo"]);
        assert_eq!(deps[0].version, "2.0");
        assert_eq!(deps[0].category, "Interop");
    }

    #[test]
    fn test_base_declaration_overrides_variant() {
        let deps = parse(
            r#"constraints {
    // Interop
    api("org.acme:foo-jvm:2.0")
    api("org.acme:foo-android:2.0")
    api("org.acme:foo:2.1")
    api("org.acme:foo-iosx64:1.9")
}"#,
        );
        assert_eq!(ids(&deps), vec!["foo"]);
        assert_eq!(deps[0].version, "2.1");
    }

    #[test]
    fn test_base_in_later_category_moves_record_to_base_line() {
        let deps = parse(
            r#"constraints {
    // Keyple interop
    api("org.eclipse.keyple:keyple-interop-kmp-lib-jvm:0.1.5")
    api("org.eclipse.keyple:keyple-interop-jsonapi-client-kmp-lib:0.1.0")
    // Keyple core
    api("org.eclipse.keyple:keyple-common-java-api:2.0.2")
    api("org.eclipse.keyple:keyple-interop-kmp-lib:0.1.6")
}"#,
        );
        assert_eq!(
            ids(&deps),
            vec![
                "keyple-interop-jsonapi-client-kmp-lib",
                "keyple-common-java-api",
                "keyple-interop-kmp-lib",
            ]
        );
        assert_eq!(deps[2].version, "0.1.6");
        assert_eq!(deps[2].category, "**Keyple Core**");
    }

    #[test]
    fn test_base_before_variants_keeps_base_version() {
        let deps = parse(
            r#"constraints {
    // Keyple interop
    api("org.eclipse.keyple:keyple-interop-kmp-lib:0.1.6")
    api("org.eclipse.keyple:keyple-interop-kmp-lib-jvm:0.1.5")
    api("org.eclipse.keyple:keyple-other-java-lib:1.0.0")
}"#,
        );
        assert_eq!(ids(&deps), vec!["keyple-interop-kmp-lib", "keyple-other-java-lib"]);
        assert_eq!(deps[0].version, "0.1.6");
        assert_eq!(deps[0].category, "**Keyple Interop**");
    }

    #[test]
    fn test_coordinates_before_any_category_are_skipped() {
        let deps = parse(
            r#"constraints {
    api("org.acme:orphan:1.0")
    // Core
    api("org.acme:core:1.0")
}"#,
        );
        assert_eq!(ids(&deps), vec!["core"]);
    }

    #[test]
    fn test_empty_category_comment_disables_collection() {
        let deps = parse(
            r#"constraints {
    // Core
    api("org.acme:core:1.0")
    //
    api("org.acme:skipped:1.0")
}"#,
        );
        assert_eq!(ids(&deps), vec!["core"]);
    }

    #[test]
    fn test_missing_constraints_block() {
        assert!(parse("dependencies { api(\"a:b:1.0\") }").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_coordinate_tokenization() {
        let config = ChangelogConfig::default();
        let parser = ManifestParser::new(&config);

        let coordinate = parser
            .parse_coordinate(r#"api("org.acme:core:1.0.0")"#)
            .unwrap();
        assert_eq!(coordinate.group_id, "org.acme");
        assert_eq!(coordinate.artifact_id, "core");
        assert_eq!(coordinate.version, "1.0.0");

        assert!(parser.parse_coordinate(r#"api("org.acme:core")"#).is_none());
        assert!(parser.parse_coordinate(r#"implementation("a:b:1")"#).is_none());
        assert!(parser.parse_coordinate(r#"api("a:b:1""#).is_none());
    }

    #[test]
    fn test_custom_declaration_calls() {
        let config = ChangelogConfig {
            declaration_calls: vec!["api".to_string(), "implementation".to_string()],
            ..ChangelogConfig::default()
        };
        let deps = ManifestParser::new(&config).parse(
            r#"constraints {
    // Core
    implementation("org.acme:core:1.0")
    api("org.acme:extra:2.0")
}"#,
        );
        assert_eq!(ids(&deps), vec!["core", "extra"]);
    }
}
