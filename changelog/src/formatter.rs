use crate::diff::{ChangeSet, Status};
use crate::types::ChangelogEntry;
use std::collections::{HashMap, HashSet};

pub const TABLE_HEADER: &str =
    "| Component                                       | Version | Status | Prev.<br>Version |";
pub const TABLE_ALIGNMENT: &str =
    "|:------------------------------------------------|:-------:|:------:|:----------------:|";
pub const BLANK_ROW: &str =
    "|                                                 |         |        |                  |";

pub trait SectionFormatter: Send + Sync {
    /// Renders the `## [version]` section for a change set, without a
    /// trailing newline
    fn format(&self, version: &str, changes: &ChangeSet) -> String;
}

/// Renders the dependency table grouped by category
#[derive(Debug, Clone, Default)]
pub struct MarkdownTableFormatter;

impl MarkdownTableFormatter {
    fn data_row(name: &str, version: &str, status: &str, prev_version: &str) -> String {
        let name = format!("[{name}]");
        let version = format!("`{version}`");
        format!("| {name:<47} | {version:^7} | {status:^6} | {prev_version:^16} |")
    }

    fn category_row(category: &str) -> String {
        format!("| {category:<47} |         |        |                  |")
    }

    fn removed_row(entry: &ChangelogEntry) -> String {
        Self::data_row(&entry.name, &entry.version, Status::Removed.marker(), "")
    }
}

impl SectionFormatter for MarkdownTableFormatter {
    fn format(&self, version: &str, changes: &ChangeSet) -> String {
        let mut lines = vec![
            format!("## [{version}]"),
            String::new(),
            TABLE_HEADER.to_string(),
            TABLE_ALIGNMENT.to_string(),
        ];

        let mut removed_by_category: HashMap<&str, Vec<&ChangelogEntry>> = HashMap::new();
        let mut removed_categories: Vec<&str> = Vec::new();
        for entry in &changes.removed {
            let category = entry.category.as_str();
            if !removed_by_category.contains_key(category) {
                removed_categories.push(category);
            }
            removed_by_category.entry(category).or_default().push(entry);
        }

        let live_categories: HashSet<&str> = changes
            .dependencies()
            .map(|dependency| dependency.category.as_str())
            .collect();

        // Each category's removed rows are emitted once, at the end of its
        // first block
        let mut flushed: HashSet<&str> = HashSet::new();
        let mut flush = |category: &str, lines: &mut Vec<String>| {
            if let Some((key, entries)) = removed_by_category.get_key_value(category) {
                if flushed.insert(*key) {
                    lines.extend(entries.iter().map(|entry| Self::removed_row(entry)));
                }
            }
        };

        let mut current_category: Option<&str> = None;
        for change in &changes.changes {
            let category = change.dependency.category.as_str();
            if current_category != Some(category) {
                if let Some(previous) = current_category {
                    flush(previous, &mut lines);
                    lines.push(BLANK_ROW.to_string());
                }
                current_category = Some(category);
                lines.push(Self::category_row(category));
            }

            let prev_version = change
                .previous_version
                .as_deref()
                .map(|v| format!("`{v}`"))
                .unwrap_or_default();
            lines.push(Self::data_row(
                &change.dependency.artifact_id,
                &change.dependency.version,
                change.status.marker(),
                &prev_version,
            ));
        }

        if let Some(last) = current_category {
            flush(last, &mut lines);
        }

        for category in removed_categories {
            if live_categories.contains(category) {
                continue;
            }
            lines.push(BLANK_ROW.to_string());
            lines.push(Self::category_row(category));
            lines.extend(
                removed_by_category[category]
                    .iter()
                    .map(|entry| Self::removed_row(entry)),
            );
        }

        lines.join("\n")
    }
}
