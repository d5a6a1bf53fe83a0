use crate::cli::Sources;
use crate::error::{Result, ResultExt};
use crate::ui;
use changelog::{ChangelogConfig, Status, inspect};

pub fn execute(sources: &Sources) -> Result<()> {
    let config = ChangelogConfig::load_or_default(sources.config.as_deref())
        .with_context(|| "Failed to load configuration")?;

    let reconciliation = inspect(&sources.manifest, &sources.changelog, &config)?;
    let changes = &reconciliation.changes;

    match reconciliation.snapshot.version() {
        Some(version) => ui::section_header(&format!("Changes since {version}")),
        None => ui::section_header("No released section found"),
    }

    let mut current_category: Option<&str> = None;
    for change in &changes.changes {
        if change.status == Status::Unchanged && !sources.verbose {
            continue;
        }
        let category = change.dependency.category.as_str();
        if current_category != Some(category) {
            println!("{category}");
            current_category = Some(category);
        }
        ui::change_line(change);
    }

    if !changes.removed.is_empty() {
        println!("Removed");
        for entry in &changes.removed {
            ui::removed_line(&entry.name, &entry.version);
        }
    }

    if changes.has_changes() {
        ui::info_message("Run `bom-changelog update` to record these changes");
    } else {
        ui::success_message("Changelog is up to date with the manifest");
    }
    Ok(())
}
