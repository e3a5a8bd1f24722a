// ABOUTME: Command line entry point for inspecting colors.
// ABOUTME: Sets up logging, loads the theme palette, and dispatches subcommands.

mod list;
mod report;
mod show;
mod theme;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use syscolor_theme::{LivePalette, Theme};
use tracing_subscriber::EnvFilter;

/// Inspect known, named and ARGB colors
#[derive(Parser)]
#[command(name = "syscolor")]
#[command(about = "Inspect known, named and ARGB colors")]
#[command(version)]
struct Cli {
    /// Theme file overriding OS colors (defaults to the user theme when present)
    #[arg(long, global = true, conflicts_with = "no_theme")]
    theme: Option<PathBuf>,

    /// Ignore any theme and resolve from the static table
    #[arg(long, global = true)]
    no_theme: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe one or more colors
    Show(show::ShowArgs),

    /// List the known color table
    List(list::ListArgs),

    /// Manage theme files
    #[command(subcommand)]
    Theme(theme::ThemeCommand),
}

fn load_theme(cli: &Cli) -> Result<Theme> {
    if cli.no_theme {
        return Ok(Theme::classic());
    }
    match &cli.theme {
        Some(path) => {
            Theme::load(path).with_context(|| format!("Failed to load theme {}", path.display()))
        }
        None => Ok(Theme::load_or_default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let theme = load_theme(&cli)?;
    syscolor_core::install_resolver(Arc::new(LivePalette::from_theme(&theme)));
    tracing::debug!("Using theme '{}'", theme.name);

    match cli.command {
        Commands::Show(args) => show::execute(args),
        Commands::List(args) => list::execute(args),
        Commands::Theme(command) => theme::execute(command, &theme),
    }
}
