mod cli;
mod error;
mod progress;
mod status;
mod ui;
mod update;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Update {
            version,
            sources,
            dry_run,
        } => update::execute(version, &sources, dry_run),
        Commands::Status { sources } => status::execute(&sources),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
