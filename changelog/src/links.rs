use crate::config::ChangelogConfig;
use crate::diff::ChangeSet;
use crate::utils::{LINK_DEFINITION_PATTERN, UNRELEASED_LINK_PATTERN};
use regex::NoExpand;
use std::collections::{HashMap, HashSet};

const GITHUB: &str = "https://github.com/";

/// A reference-style link definition keyed by artifact id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub artifact_id: String,
    pub url: String,
}

impl LinkEntry {
    /// Parses a `[key]: url` line
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        LINK_DEFINITION_PATTERN.captures(line).map(|caps| Self {
            artifact_id: caps[1].to_string(),
            url: caps[2].to_string(),
        })
    }

    #[must_use]
    pub fn line(&self) -> String {
        format!("[{}]: {}", self.artifact_id, self.url)
    }
}

/// The `[Unreleased]: .../compare/<base>...HEAD` link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreleasedLink {
    pub org: String,
    pub repo: String,
    pub base_version: String,
}

impl UnreleasedLink {
    #[must_use]
    pub fn find(content: &str) -> Option<Self> {
        UNRELEASED_LINK_PATTERN.captures(content).map(|caps| Self {
            org: caps[1].to_string(),
            repo: caps[2].to_string(),
            base_version: caps[3].to_string(),
        })
    }

    #[must_use]
    pub fn advanced_to(&self, version: &str) -> String {
        format!(
            "[Unreleased]: {GITHUB}{}/{}/compare/{version}...HEAD",
            self.org, self.repo
        )
    }

    #[must_use]
    pub fn release_link(&self, version: &str) -> String {
        format!(
            "[{version}]: {GITHUB}{}/{}/compare/{}...{version}",
            self.org, self.repo, self.base_version
        )
    }
}

/// Per-artifact links currently present in a document, in document order
#[must_use]
pub fn artifact_links(content: &str, config: &ChangelogConfig) -> Vec<LinkEntry> {
    let mut links: Vec<LinkEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for link in content.split('\n').filter_map(LinkEntry::parse) {
        if !config.is_artifact_key(&link.artifact_id) {
            continue;
        }
        match index.get(&link.artifact_id) {
            Some(&pos) => links[pos] = link,
            None => {
                index.insert(link.artifact_id.clone(), links.len());
                links.push(link);
            }
        }
    }
    links
}

pub trait LinkReconciler {
    /// Rewrites the reference links block for a new release
    fn reconcile(&self, content: &str, new_version: &str, changes: &ChangeSet) -> String;
}

/// Maintains GitHub compare links and the per-artifact release links
#[derive(Debug, Clone)]
pub struct GitHubLinkReconciler<'a> {
    config: &'a ChangelogConfig,
}

impl<'a> GitHubLinkReconciler<'a> {
    #[must_use]
    pub const fn new(config: &'a ChangelogConfig) -> Self {
        Self { config }
    }

    /// Builds the ordered artifact block: manifest order with a blank line
    /// between categories, then surviving links for artifacts that are
    /// neither in the manifest nor removed.
    fn build_block(&self, changes: &ChangeSet, existing: &[LinkEntry]) -> Vec<String> {
        let removed = changes.removed_names();
        let by_id: HashMap<&str, &LinkEntry> = existing
            .iter()
            .map(|link| (link.artifact_id.as_str(), link))
            .collect();

        let mut block = Vec::new();
        let mut processed: HashSet<&str> = HashSet::new();
        let mut previous_category: Option<&str> = None;

        for dependency in changes.dependencies() {
            let id = dependency.artifact_id.as_str();
            processed.insert(id);

            let line = match by_id.get(id) {
                Some(link) => link.line(),
                None => match self.config.organization_for(id) {
                    Some(org) => format!("[{id}]: {GITHUB}{org}/{id}/releases"),
                    None => continue,
                },
            };

            if previous_category.is_some_and(|previous| previous != dependency.category) {
                block.push(String::new());
            }
            block.push(line);
            previous_category = Some(dependency.category.as_str());
        }

        let orphans: Vec<String> = existing
            .iter()
            .filter(|link| {
                let id = link.artifact_id.as_str();
                !processed.contains(id) && !removed.contains(id)
            })
            .map(LinkEntry::line)
            .collect();
        if !orphans.is_empty() {
            block.push(String::new());
            block.extend(orphans);
        }

        block
    }
}

impl LinkReconciler for GitHubLinkReconciler<'_> {
    fn reconcile(&self, content: &str, new_version: &str, changes: &ChangeSet) -> String {
        let Some(unreleased) = UnreleasedLink::find(content) else {
            return content.to_string();
        };

        let content = UNRELEASED_LINK_PATTERN
            .replace_all(content, NoExpand(&unreleased.advanced_to(new_version)));
        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

        if let Some(idx) = lines
            .iter()
            .position(|line| line.starts_with("[Unreleased]: "))
        {
            lines.insert(idx + 1, unreleased.release_link(new_version));
        }

        let removed = changes.removed_names();
        lines.retain(|line| {
            LinkEntry::parse(line).is_none_or(|link| {
                !(removed.contains(link.artifact_id.as_str()) && link.url.starts_with(GITHUB))
            })
        });

        let is_artifact_line = |line: &str| {
            LinkEntry::parse(line).is_some_and(|link| self.config.is_artifact_key(&link.artifact_id))
        };
        let first = lines.iter().position(|line| is_artifact_line(line));
        let last = lines.iter().rposition(|line| is_artifact_line(line));

        // Without an existing artifact block there is nothing to rebuild
        if let (Some(first), Some(last)) = (first, last) {
            let existing = artifact_links(&lines.join("\n"), self.config);
            let block = self.build_block(changes, &existing);
            lines.splice(first..=last, block);
        }

        lines.join("\n")
    }
}
