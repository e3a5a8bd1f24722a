// ABOUTME: Theme files mapping known colors to override values.
// ABOUTME: Loads and saves themes as TOML and ships a couple of presets.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use syscolor_core::{Color, KnownColor, PaletteResolver, Rgba};

/// A named set of known-color overrides.
///
/// On disk:
///
/// ```toml
/// name = "Graphite"
///
/// [colors]
/// Highlight = "#FF3399FF"
/// Window = "#202020"
/// ```
///
/// Keys are known color names (ASCII case ignored). Values are `#RRGGBB`,
/// `#AARRGGBB`, or another known color name, which takes that color's static
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThemeFile", into = "ThemeFile")]
pub struct Theme {
    pub name: String,
    pub colors: BTreeMap<KnownColor, Rgba>,
}

/// Serialized shape of a [`Theme`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ThemeFile {
    name: String,
    colors: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse theme: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize theme: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Unknown color in theme: {0}")]
    UnknownColor(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl TryFrom<ThemeFile> for Theme {
    type Error = ThemeError;

    fn try_from(file: ThemeFile) -> Result<Self, Self::Error> {
        let mut colors = BTreeMap::new();
        for (key, value) in &file.colors {
            let (color, rgba) = parse_entry(key, value)?;
            colors.insert(color, rgba);
        }
        let name = if file.name.is_empty() {
            "Custom".to_string()
        } else {
            file.name
        };
        Ok(Self { name, colors })
    }
}

impl From<Theme> for ThemeFile {
    fn from(theme: Theme) -> Self {
        Self {
            name: theme.name,
            colors: theme
                .colors
                .into_iter()
                .map(|(color, rgba)| (color.name().to_string(), format!("#{:08X}", rgba.to_argb())))
                .collect(),
        }
    }
}

fn parse_entry(key: &str, value: &str) -> Result<(KnownColor, Rgba), ThemeError> {
    let color =
        KnownColor::from_name(key).ok_or_else(|| ThemeError::UnknownColor(key.to_string()))?;
    let invalid = || ThemeError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };

    let parsed: Color = value.parse().map_err(|_| invalid())?;
    let argb = match (parsed.packed_value(), parsed.to_known_color()) {
        (Some(argb), _) => argb,
        (None, Some(known)) => known.default_argb(),
        (None, None) => return Err(invalid()),
    };

    if !color.is_system() {
        tracing::warn!("Theme overrides fixed web color {}", color);
    }
    Ok((color, Rgba::from_argb(argb)))
}

impl Theme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: BTreeMap::new(),
        }
    }

    pub fn with(mut self, color: KnownColor, argb: u32) -> Self {
        self.colors.insert(color, Rgba::from_argb(argb));
        self
    }

    /// No overrides: every known color keeps its static value.
    pub fn classic() -> Self {
        Self::new("Classic")
    }

    /// Dark desktop theme for the OS colors.
    pub fn dark() -> Self {
        Self::new("Dark")
            .with(KnownColor::Control, 0xFF2D2D2D)
            .with(KnownColor::ControlDark, 0xFF1E1E1E)
            .with(KnownColor::ControlDarkDark, 0xFF101010)
            .with(KnownColor::ControlLight, 0xFF3C3C3C)
            .with(KnownColor::ControlLightLight, 0xFF505050)
            .with(KnownColor::ControlText, 0xFFE0E0E0)
            .with(KnownColor::GrayText, 0xFF808080)
            .with(KnownColor::Highlight, 0xFF264F78)
            .with(KnownColor::HighlightText, 0xFFFFFFFF)
            .with(KnownColor::Info, 0xFF252526)
            .with(KnownColor::InfoText, 0xFFE0E0E0)
            .with(KnownColor::Menu, 0xFF252526)
            .with(KnownColor::MenuText, 0xFFE0E0E0)
            .with(KnownColor::ScrollBar, 0xFF3E3E42)
            .with(KnownColor::Window, 0xFF1E1E1E)
            .with(KnownColor::WindowFrame, 0xFF3C3C3C)
            .with(KnownColor::WindowText, 0xFFE0E0E0)
            .with(KnownColor::ButtonFace, 0xFF2D2D2D)
            .with(KnownColor::ButtonHighlight, 0xFF3C3C3C)
            .with(KnownColor::ButtonShadow, 0xFF1E1E1E)
            .with(KnownColor::MenuBar, 0xFF252526)
            .with(KnownColor::MenuHighlight, 0xFF094771)
    }

    pub fn presets() -> Vec<Theme> {
        vec![Self::classic(), Self::dark()]
    }

    /// Find a preset by name, ignoring ASCII case.
    pub fn preset(name: &str) -> Option<Theme> {
        Self::presets()
            .into_iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name))
    }

    /// Get the default theme file path (~/.config/syscolor/theme.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("syscolor").join("theme.toml"))
    }

    pub fn from_toml(content: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ThemeError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a theme from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        let theme = Self::from_toml(&content)?;
        tracing::debug!("Loaded theme '{}' from {}", theme.name, path.display());
        Ok(theme)
    }

    /// Load from the default path, or the classic theme if missing or invalid
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring theme at {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Save theme to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ThemeError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Save theme to default path
    pub fn save_to_default(&self) -> Result<PathBuf, ThemeError> {
        let path = Self::default_path().ok_or(ThemeError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

/// A theme is itself a fixed palette; handy when no live refresh is needed.
impl PaletteResolver for Theme {
    fn resolve(&self, color: KnownColor) -> Option<Rgba> {
        self.colors.get(&color).copied()
    }
}
