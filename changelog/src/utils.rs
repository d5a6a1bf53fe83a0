use once_cell::sync::Lazy;
use regex::Regex;

pub static UNRELEASED_SECTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^## \[Unreleased\]").expect("Failed to compile unreleased section regex")
});

/// Dated release header, e.g. `## [2024.01.01]`
pub static RELEASE_HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^## \[(\d{4}\.\d{2}\.\d{2})\]").expect("Failed to compile release header regex")
});

pub static RELEASE_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}\.\d{2}\.\d{2}$").expect("Failed to compile release label regex")
});

pub static UNRELEASED_LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[Unreleased\]: https://github\.com/([^/]+)/([^/]+)/compare/([\d.]+)\.\.\.HEAD")
        .expect("Failed to compile unreleased link regex")
});

/// Reference-style link definition, e.g. `[keyple-util-java-lib]: https://...`
pub static LINK_DEFINITION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\]]+)\]: (\S.*)$").expect("Failed to compile link definition regex")
});

pub static MARKDOWN_LINK_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\]]+)\]").expect("Failed to compile link label regex")
});

/// Whether a line opens any changelog version section
pub fn is_section_header(line: &str) -> bool {
    line.starts_with("## [")
}

/// Whether a line starts the reference links block
pub fn is_reference_block_start(line: &str) -> bool {
    line.starts_with("[Unreleased]:")
}
