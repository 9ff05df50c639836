use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lean_update::cli::orchestration::{self, UpdateWorkflowArgs};
use lean_update::ui;

#[derive(clap::Parser)]
#[command(
    name = "lean-update",
    version,
    about = "Walk upstream Mathlib releases and update a Lake project's dependency pin"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long,
        global = true,
        env = "LAKE_PACKAGE_DIRECTORY",
        default_value = ".",
        help = "Lake package directory containing the lakefile"
    )]
    directory: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Pin each newer upstream release in turn, run `lake update`, and stage changed metadata
    Run {
        #[arg(
            long,
            env = "INTERMEDIATE_RELEASES",
            default_value = "all",
            help = "Releases to walk: all, latest or master"
        )]
        intermediate_releases: String,

        #[arg(
            long,
            env = "LEGACY_UPDATE",
            value_parser = clap::builder::FalseyValueParser::new(),
            help = "Use `lake -R -Kenv=dev update`"
        )]
        legacy_update: bool,
    },

    /// Report which metadata files changed and whether to continue with the update
    CheckChanges {
        #[arg(
            long,
            env = "UPDATE_IF_MODIFIED",
            default_value = "lake-manifest.json",
            help = "lean-toolchain or lake-manifest.json"
        )]
        update_if_modified: String,
    },

    /// List open auto-update pull requests and issues
    Previous {
        #[arg(long, help = "Label marking auto-update pull requests and issues")]
        label: Option<String>,
    },
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Run {
            intermediate_releases,
            legacy_update,
        } => {
            orchestration::run_update_workflow(UpdateWorkflowArgs {
                config_path: args.config,
                directory: args.directory,
                intermediate_releases,
                legacy_update,
            })
            .context("Error updating Lean version")?;
        }
        Command::CheckChanges { update_if_modified } => {
            orchestration::run_check_changes_workflow(args.directory, &update_if_modified)
                .context("Error checking metadata changes")?;
        }
        Command::Previous { label } => {
            orchestration::run_previous_workflow(args.config.as_deref(), &args.directory, label)
                .context("Error listing previous auto-update pull requests")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
