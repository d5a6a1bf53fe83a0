const UNRELEASED_HEADER: &str = "## [Unreleased]\n";

/// Byte offset just past the first `## [Unreleased]` header line
pub fn find_insertion_point(content: &str) -> Option<usize> {
    content
        .find(UNRELEASED_HEADER)
        .map(|pos| pos + UNRELEASED_HEADER.len())
}

/// Inserts a rendered section below the `## [Unreleased]` header, separated
/// by a blank line on each side
pub fn insert_section(content: &str, section: &str) -> Option<String> {
    let pos = find_insertion_point(content)?;
    let mut result = String::with_capacity(content.len() + section.len() + 2);
    result.push_str(&content[..pos]);
    result.push('\n');
    result.push_str(section);
    result.push('\n');
    result.push_str(&content[pos..]);
    Some(result)
}
