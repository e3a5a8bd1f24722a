// ABOUTME: `syscolor theme` - locate, create and print theme files.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use syscolor_theme::Theme;

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print the default theme file path
    Path,

    /// Write a preset theme file
    Init {
        /// Preset to start from (classic, dark)
        #[arg(long, default_value = "dark")]
        preset: String,

        /// Output path (defaults to the user theme path)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the active theme, or a preset, as TOML
    Show {
        #[arg(long)]
        preset: Option<String>,
    },
}

fn find_preset(name: &str) -> Result<Theme> {
    match Theme::preset(name) {
        Some(theme) => Ok(theme),
        None => {
            let names: Vec<String> = Theme::presets().into_iter().map(|t| t.name).collect();
            bail!("Unknown preset '{}' (available: {})", name, names.join(", "))
        }
    }
}

pub fn execute(command: ThemeCommand, active: &Theme) -> Result<()> {
    match command {
        ThemeCommand::Path => {
            let path = Theme::default_path().context("Could not determine config directory")?;
            println!("{}", path.display());
        }
        ThemeCommand::Init {
            preset,
            output,
            force,
        } => {
            let theme = find_preset(&preset)?;
            let path = match output {
                Some(path) => path,
                None => Theme::default_path().context("Could not determine config directory")?,
            };
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            theme.save(&path)?;
            tracing::info!("Wrote theme '{}' to {}", theme.name, path.display());
            println!("{}", path.display());
        }
        ThemeCommand::Show { preset } => {
            let theme = match preset {
                Some(name) => find_preset(&name)?,
                None => active.clone(),
            };
            print!("{}", theme.to_toml()?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_preset_lists_choices() {
        let err = find_preset("neon").unwrap_err();
        assert_eq!(err.to_string(), "Unknown preset 'neon' (available: Classic, Dark)");
    }

    #[test]
    fn init_refuses_to_clobber() {
        let path = std::env::temp_dir().join("syscolor_cli_init_test.toml");
        std::fs::write(&path, "name = \"Keep\"\n").unwrap();

        let result = execute(
            ThemeCommand::Init {
                preset: "dark".to_string(),
                output: Some(path.clone()),
                force: false,
            },
            &Theme::classic(),
        );
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "name = \"Keep\"\n");

        execute(
            ThemeCommand::Init {
                preset: "dark".to_string(),
                output: Some(path.clone()),
                force: true,
            },
            &Theme::classic(),
        )
        .unwrap();
        assert_eq!(Theme::load(&path).unwrap(), Theme::dark());

        let _ = std::fs::remove_file(&path);
    }
}
