// ABOUTME: `syscolor show` - describe colors given by name, hex, or known id.

use anyhow::{Context, Result};
use clap::Args;
use syscolor_core::Color;

use crate::report::ColorReport;

#[derive(Args)]
pub struct ShowArgs {
    /// Colors to describe: names, #RRGGBB or #AARRGGBB
    #[arg(required = true)]
    colors: Vec<String>,

    /// Treat inputs as known color ids
    #[arg(long)]
    id: bool,

    /// Replace alpha (0-255); the result is always a plain ARGB color
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<i32>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_input(input: &str, by_id: bool) -> Result<Color> {
    if by_id {
        let id: u16 = input
            .parse()
            .with_context(|| format!("Invalid known color id: {input}"))?;
        return Ok(Color::from_known_id(id));
    }
    Ok(input.parse::<Color>()?)
}

pub fn execute(args: ShowArgs) -> Result<()> {
    let mut reports = Vec::with_capacity(args.colors.len());
    for input in &args.colors {
        let mut color = parse_input(input, args.id)?;
        if let Some(alpha) = args.alpha {
            color = Color::from_alpha(alpha, &color)?;
        }
        reports.push(ColorReport::new(input, &color));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        let blocks: Vec<String> = reports.iter().map(ColorReport::to_text).collect();
        println!("{}", blocks.join("\n\n"));
    }
    Ok(())
}
