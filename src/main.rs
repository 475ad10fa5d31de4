use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use version_bump::runner::{self, RunArgs};
use version_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "version-bump",
    version,
    about = "Bump the package.json version from trigger keywords and push the change"
)]
struct Args {
    #[arg(help = "Text to scan for bump keywords (e.g. a pull request title)")]
    search_target: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        help = "Workspace root containing package.json (defaults to $GITHUB_WORKSPACE)"
    )]
    workspace: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let outcome = match runner::run(RunArgs {
        search_target: args.search_target,
        config_path: args.config,
        workspace: args.workspace,
    }) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&format!("Action failed; with error: {}", e));
            process::exit(1);
        }
    };

    ui::display_success(&format!(
        "Bumped version {} -> {}",
        outcome.previous_version, outcome.bumped_version
    ));
    Ok(())
}
