use crate::cli::Sources;
use crate::error::{Result, ResultExt};
use crate::progress::ProgressTracker;
use crate::ui;
use changelog::{
    ChangelogConfig, Status, UpdateOutcome, prepare_update, today_release_label,
    validate_release_label, write_update,
};

pub fn execute(version: Option<String>, sources: &Sources, dry_run: bool) -> Result<()> {
    let mut progress = ProgressTracker::new("Changelog Update")
        .with_steps(&[
            "Loading configuration",
            "Computing dependency changes",
            "Writing updated changelog",
        ])
        .quiet(!sources.verbose);

    progress.start_step();
    let mut config = ChangelogConfig::load_or_default(sources.config.as_deref())
        .with_context(|| "Failed to load configuration")?;
    config.verbose |= sources.verbose;

    let version = version.unwrap_or_else(today_release_label);
    validate_release_label(&version)?;
    progress.complete_step();

    progress.start_step();
    if !sources.manifest.exists() {
        ui::warning_message(&format!(
            "{} not found, treating it as empty",
            sources.manifest.display()
        ));
    }
    let outcome = prepare_update(&sources.manifest, &sources.changelog, &version, &config)?;
    progress.complete_step();

    if !dry_run {
        write_update(&sources.changelog, &outcome)?;
    }

    match outcome {
        UpdateOutcome::AlreadyCurrent { version } => {
            progress.skip_step("latest section is already current");
            ui::info_message(&format!("Version {version} already exists in the changelog"));
        }
        UpdateOutcome::NoChanges => {
            progress.skip_step("no dependency changes");
            ui::info_message("No dependency changes detected");
        }
        UpdateOutcome::Updated {
            section, changes, ..
        } => {
            if dry_run {
                progress.skip_step("dry run");
                println!("\n{section}\n");
            } else {
                progress.complete_step();
            }

            if sources.verbose {
                changes
                    .changes
                    .iter()
                    .filter(|change| change.status != Status::Unchanged)
                    .for_each(ui::change_line);
                for entry in &changes.removed {
                    ui::removed_line(&entry.name, &entry.version);
                }
            }

            let changed = changes
                .changes
                .iter()
                .filter(|change| change.status != Status::Unchanged)
                .count();
            ui::success_message(&format!(
                "Section {version}: {changed} updated, {} removed",
                changes.removed.len()
            ));
        }
    }

    progress.complete();
    Ok(())
}
