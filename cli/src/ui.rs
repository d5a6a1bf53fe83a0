use changelog::{DependencyChange, Status};
use colored::Colorize;
use std::io::{self, Write};

/// Print a status message with a spinner-like indicator
pub fn status_message(message: &str) {
    println!("{} {} ... ", "⏳".yellow(), message.bright_white());
    let _ = io::stdout().flush();
}

/// Print a success message
pub fn success_message(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print a warning message
pub fn warning_message(message: &str) {
    println!("{} {}", "⚠️ ".yellow(), message.yellow());
}

/// Print a section header to separate logical sections of output
pub fn section_header(title: &str) {
    println!("\n{}", format!("==== {title} ====").cyan().bold());
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}

/// Print one manifest dependency with its classification
pub fn change_line(change: &DependencyChange) {
    let dependency = &change.dependency;
    let marker = match change.status {
        Status::Unchanged => " ".normal(),
        Status::Relabeled => "~".normal(),
        Status::Changed(_) | Status::New | Status::Removed => change.status.marker().normal(),
    };
    let transition = match &change.previous_version {
        Some(previous) => format!("{previous} -> {}", dependency.version),
        None => dependency.version.clone(),
    };

    let name = if change.status == Status::Unchanged {
        dependency.artifact_id.dimmed()
    } else {
        dependency.artifact_id.bold()
    };
    println!("  {marker} {name} {}", transition.bright_white());
}

/// Print a snapshot entry that no longer appears in the manifest
pub fn removed_line(name: &str, version: &str) {
    println!(
        "  {} {} {}",
        Status::Removed.marker(),
        name.red().bold(),
        version.dimmed()
    );
}
