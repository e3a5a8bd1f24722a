// ABOUTME: Printable and JSON summaries of a resolved color.

use serde::Serialize;
use syscolor_core::Color;

#[derive(Debug, Serialize)]
pub struct ColorReport {
    pub input: String,
    pub name: String,
    pub display: String,
    pub argb: String,
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub known_id: Option<u16>,
    pub known: bool,
    pub system: bool,
    pub named: bool,
    pub empty: bool,
}

impl ColorReport {
    pub fn new(input: &str, color: &Color) -> Self {
        let argb = color.to_argb();
        Self {
            input: input.to_string(),
            name: color.name(),
            display: color.to_string(),
            argb: format!("#{argb:08X}"),
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
            hue: color.hue(),
            saturation: color.saturation(),
            brightness: color.brightness(),
            known_id: color.to_known_color().map(|c| c.id()),
            known: color.is_known(),
            system: color.is_system_color(),
            named: color.is_named(),
            empty: color.is_empty(),
        }
    }

    fn flags(&self) -> String {
        let flags: Vec<&str> = [
            (self.known, "known"),
            (self.system, "system"),
            (self.named, "named"),
            (self.empty, "empty"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, label)| *label)
        .collect();
        if flags.is_empty() {
            "argb".to_string()
        } else {
            flags.join(" ")
        }
    }

    pub fn to_text(&self) -> String {
        let id = self
            .known_id
            .map(|id| format!(" (id {id})"))
            .unwrap_or_default();
        format!(
            "{}{}\n  argb      {}\n  channels  a={} r={} g={} b={}\n  hsb       h={:.1} s={:.3} b={:.3}\n  flags     {}",
            self.display,
            id,
            self.argb,
            self.a,
            self.r,
            self.g,
            self.b,
            self.hue,
            self.saturation,
            self.brightness,
            self.flags(),
        )
    }
}

#[cfg(test)]
mod tests {
    use syscolor_core::{Color, KnownColor};

    use super::*;

    #[test]
    fn argb_report_has_no_flags() {
        let report = ColorReport::new("#80FF0000", &Color::from_argb_u32(0x80FF0000));
        assert_eq!(report.argb, "#80FF0000");
        assert_eq!((report.a, report.r, report.g, report.b), (0x80, 0xFF, 0, 0));
        assert_eq!(report.flags(), "argb");
        assert!(report.to_text().starts_with("Color [A=128, R=255, G=0, B=0]\n"));
    }

    #[test]
    fn known_report_lists_id() {
        let report = ColorReport::new("ButtonFace", &Color::from_known(KnownColor::ButtonFace));
        assert_eq!(report.known_id, Some(168));
        assert_eq!(report.flags(), "known system named");
        assert!(report.to_text().starts_with("Color [ButtonFace] (id 168)"));
    }

    #[test]
    fn json_fields() {
        let report = ColorReport::new("x", &Color::from_name("x"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["argb"], "#00000000");
        assert_eq!(json["named"], true);
        assert_eq!(json["known"], false);
        assert!(json["known_id"].is_null());
    }
}
