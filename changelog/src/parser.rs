use crate::types::{ChangelogEntry, Snapshot};
use crate::utils::{
    MARKDOWN_LINK_LABEL_PATTERN, RELEASE_HEADER_PATTERN, UNRELEASED_SECTION_PATTERN,
    is_reference_block_start, is_section_header,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    BeforeTable,
    InTableHeader,
    InTableBody,
}

#[derive(Debug, Clone)]
struct ParserState {
    table: TableState,
    current_category: String,
}

impl ParserState {
    fn new() -> Self {
        Self {
            table: TableState::BeforeTable,
            current_category: String::new(),
        }
    }
}

/// Reads the most recent released section of a changelog back into a
/// [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotParser;

impl SnapshotParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses the first dated section following `## [Unreleased]`.
    ///
    /// Returns an empty snapshot without a version when either header is
    /// missing.
    #[must_use]
    pub fn parse(&self, content: &str) -> Snapshot {
        let lines: Vec<&str> = content.split('\n').collect();

        let Some(unreleased_idx) = lines
            .iter()
            .position(|line| UNRELEASED_SECTION_PATTERN.is_match(line))
        else {
            return Snapshot::empty();
        };

        let Some((header_idx, version)) = lines
            .iter()
            .enumerate()
            .skip(unreleased_idx + 1)
            .find_map(|(idx, line)| {
                RELEASE_HEADER_PATTERN
                    .captures(line)
                    .map(|caps| (idx, caps[1].to_string()))
            })
        else {
            return Snapshot::empty();
        };

        let body_start = header_idx + 1;
        let body_end = section_end(&lines, body_start);

        let mut snapshot = Snapshot::with_version(version);
        let mut state = ParserState::new();
        for line in &lines[body_start..body_end] {
            self.parse_line(line, &mut state, &mut snapshot);
        }
        snapshot
    }

    fn parse_line(&self, line: &str, state: &mut ParserState, snapshot: &mut Snapshot) {
        let is_row = line.starts_with('|');
        let is_separator = is_row && line.contains("---");

        let next = match (state.table, is_row, is_separator) {
            (_, true, true) => TableState::InTableBody,
            (TableState::BeforeTable, true, false) => TableState::InTableHeader,
            (TableState::InTableBody, true, false) => {
                self.handle_row(line, state, snapshot);
                TableState::InTableBody
            }
            (table, _, _) => table,
        };
        state.table = next;
    }

    fn handle_row(&self, line: &str, state: &mut ParserState, snapshot: &mut Snapshot) {
        let cells = split_cells(line);
        if cells.len() < 2 {
            return;
        }

        let name = cells[0];
        if name.contains("**") {
            state.current_category = name.to_string();
            return;
        }

        if name.is_empty() || cells[1].is_empty() {
            return;
        }

        let version = strip_code(cells[1]);
        let status = cells.get(2).copied().unwrap_or_default();
        let prev_version = cells.get(3).map(|c| strip_code(c)).unwrap_or_default();

        let name = MARKDOWN_LINK_LABEL_PATTERN
            .captures(name)
            .map_or(name, |caps| caps.get(1).map_or(name, |m| m.as_str()));

        if name.is_empty() || version.is_empty() {
            return;
        }

        snapshot.insert(ChangelogEntry {
            name: name.to_string(),
            version: version.to_string(),
            status: status.to_string(),
            prev_version: prev_version.to_string(),
            category: state.current_category.clone(),
        });
    }
}

/// Index of the line ending a section body that starts at `start`
fn section_end(lines: &[&str], start: usize) -> usize {
    let rest = || lines.iter().enumerate().skip(start);

    rest()
        .find(|(_, line)| is_section_header(line))
        .or_else(|| rest().find(|(_, line)| is_reference_block_start(line)))
        .map_or(lines.len(), |(idx, _)| idx)
}

/// Cells between the outer pipes, trimmed. A row without a closing pipe
/// loses its last cell.
fn split_cells(line: &str) -> Vec<&str> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 2 {
        return Vec::new();
    }
    parts[1..parts.len() - 1]
        .iter()
        .map(|cell| cell.trim())
        .collect()
}

fn strip_code(cell: &str) -> &str {
    cell.trim_matches('`').trim()
}
