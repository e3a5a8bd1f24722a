// ABOUTME: `syscolor list` - print the known color table with resolved values.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use syscolor_core::{Color, KnownColor};

#[derive(Args)]
pub struct ListArgs {
    /// Only OS theme colors
    #[arg(long, conflicts_with = "web")]
    system: bool,

    /// Only fixed web colors
    #[arg(long)]
    web: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ListEntry {
    id: u16,
    name: &'static str,
    argb: String,
    overridden: bool,
}

fn entries(args: &ListArgs) -> Vec<ListEntry> {
    KnownColor::ALL
        .iter()
        .copied()
        .filter(|c| (!args.system || c.is_system()) && (!args.web || !c.is_system()))
        .map(|c| {
            let argb = Color::from_known(c).to_argb();
            ListEntry {
                id: c.id(),
                name: c.name(),
                argb: format!("#{argb:08X}"),
                overridden: argb != c.default_argb(),
            }
        })
        .collect()
}

pub fn execute(args: ListArgs) -> Result<()> {
    let entries = entries(&args);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for entry in &entries {
        let mark = if entry.overridden { " *" } else { "" };
        println!("{:>3}  {:<24} {}{}", entry.id, entry.name, entry.argb, mark);
    }
    Ok(())
}
