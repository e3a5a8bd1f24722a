// ABOUTME: The Color value type: empty, packed ARGB, known, or free-form named.
// ABOUTME: Construction, channel accessors, HSB derivation, equality and hashing.

use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Channel, ColorError};
use crate::palette::{current_resolver, resolve_argb, PaletteResolver, StaticPalette};
use crate::KnownColor;

/// Resolved value of a color with no channel data.
const NOT_DEFINED: u32 = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Repr {
    #[default]
    Empty,
    Argb(u32),
    Known(KnownColor),
    Named(Arc<str>),
}

/// An immutable color.
///
/// A color is exactly one of: empty, a packed ARGB value, a [`KnownColor`],
/// or a name that matched no known color. Equality and hashing look at that
/// stored identity only; two `Known` colors with the same id are equal even
/// when a host palette resolves them differently over time.
///
/// Cloning is cheap: names are reference counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Color {
    repr: Repr,
}

impl Color {
    /// Bit set when the color is a known color.
    pub const KNOWN_VALID: u16 = 0x0001;
    /// Bit set when the color carries a packed ARGB value.
    pub const ARGB_VALID: u16 = 0x0002;
    /// Bit set when the color carries a free-form name.
    pub const NAME_VALID: u16 = 0x0008;

    pub const EMPTY: Self = Self { repr: Repr::Empty };
    pub const TRANSPARENT: Self = Self::from_known(KnownColor::Transparent);
    pub const BLACK: Self = Self::from_known(KnownColor::Black);
    pub const WHITE: Self = Self::from_known(KnownColor::White);
    pub const RED: Self = Self::from_known(KnownColor::Red);
    pub const GREEN: Self = Self::from_known(KnownColor::Green);
    pub const BLUE: Self = Self::from_known(KnownColor::Blue);
    pub const LIGHT_GRAY: Self = Self::from_known(KnownColor::LightGray);

    /// Opaque color from red, green and blue in `0..=255`.
    pub fn from_rgb(r: i32, g: i32, b: i32) -> Result<Self, ColorError> {
        Self::from_argb(255, r, g, b)
    }

    /// Color from alpha, red, green and blue in `0..=255`.
    ///
    /// Channels are checked in the order red, green, blue, alpha and the
    /// first one out of range is reported.
    pub fn from_argb(a: i32, r: i32, g: i32, b: i32) -> Result<Self, ColorError> {
        let r = check_channel(Channel::Red, r)?;
        let g = check_channel(Channel::Green, g)?;
        let b = check_channel(Channel::Blue, b)?;
        let a = check_channel(Channel::Alpha, a)?;
        Ok(Self::from_argb_u32((a << 24) | (r << 16) | (g << 8) | b))
    }

    /// Replace the alpha of `base`, keeping its resolved red, green and blue.
    ///
    /// The result is always a plain ARGB color, even when `base` is known.
    pub fn from_alpha(alpha: i32, base: &Color) -> Result<Self, ColorError> {
        Self::from_argb(alpha, base.r().into(), base.g().into(), base.b().into())
    }

    pub fn from_alpha_with(
        alpha: i32,
        base: &Color,
        resolver: &dyn PaletteResolver,
    ) -> Result<Self, ColorError> {
        let argb = base.to_argb_with(resolver);
        Self::from_argb(
            alpha,
            i32::from((argb >> 16) as u8),
            i32::from((argb >> 8) as u8),
            i32::from(argb as u8),
        )
    }

    /// Reinterpret the bits of `argb` as a packed color. Never fails.
    pub const fn from_packed_argb(argb: i32) -> Self {
        Self::from_argb_u32(argb as u32)
    }

    pub const fn from_argb_u32(argb: u32) -> Self {
        Self {
            repr: Repr::Argb(argb),
        }
    }

    pub const fn from_known(color: KnownColor) -> Self {
        Self {
            repr: Repr::Known(color),
        }
    }

    /// Color for a known-color ordinal.
    ///
    /// Ids outside the known range degrade to a name-only color whose name is
    /// the decimal id.
    pub fn from_known_id(id: u16) -> Self {
        match KnownColor::from_id(id) {
            Some(color) => Self::from_known(color),
            None => Self::from_name(&id.to_string()),
        }
    }

    /// Color for a symbolic name.
    ///
    /// Known names (ASCII case ignored) give a known color. Anything else is
    /// kept verbatim as a name with no channel data.
    pub fn from_name(name: &str) -> Self {
        match KnownColor::from_name(name) {
            Some(color) => Self::from_known(color),
            None => Self {
                repr: Repr::Named(Arc::from(name)),
            },
        }
    }

    /// Packed ARGB, consulting the installed resolver for known colors.
    pub fn to_argb(&self) -> u32 {
        match self.repr {
            Repr::Known(color) => resolve_argb(&*current_resolver(), color),
            _ => self.to_argb_with(&StaticPalette),
        }
    }

    /// Packed ARGB, consulting `resolver` for known colors.
    pub fn to_argb_with(&self, resolver: &dyn PaletteResolver) -> u32 {
        match &self.repr {
            Repr::Argb(argb) => *argb,
            Repr::Known(color) => resolve_argb(resolver, *color),
            Repr::Empty | Repr::Named(_) => NOT_DEFINED,
        }
    }

    /// Signed view of [`to_argb`](Self::to_argb), bit for bit.
    pub fn to_argb_i32(&self) -> i32 {
        self.to_argb() as i32
    }

    pub fn a(&self) -> u8 {
        (self.to_argb() >> 24) as u8
    }

    pub fn r(&self) -> u8 {
        (self.to_argb() >> 16) as u8
    }

    pub fn g(&self) -> u8 {
        (self.to_argb() >> 8) as u8
    }

    pub fn b(&self) -> u8 {
        self.to_argb() as u8
    }

    pub fn a_with(&self, resolver: &dyn PaletteResolver) -> u8 {
        (self.to_argb_with(resolver) >> 24) as u8
    }

    pub fn r_with(&self, resolver: &dyn PaletteResolver) -> u8 {
        (self.to_argb_with(resolver) >> 16) as u8
    }

    pub fn g_with(&self, resolver: &dyn PaletteResolver) -> u8 {
        (self.to_argb_with(resolver) >> 8) as u8
    }

    pub fn b_with(&self, resolver: &dyn PaletteResolver) -> u8 {
        self.to_argb_with(resolver) as u8
    }

    /// Display name: the stored name, the known color's name, or the lower
    /// case hex of the resolved value.
    pub fn name(&self) -> String {
        match &self.repr {
            Repr::Named(name) => name.to_string(),
            Repr::Known(color) => color.name().to_string(),
            Repr::Argb(_) | Repr::Empty => format!("{:x}", self.to_argb()),
        }
    }

    /// Legacy validity bitmask built from [`KNOWN_VALID`](Self::KNOWN_VALID),
    /// [`ARGB_VALID`](Self::ARGB_VALID) and [`NAME_VALID`](Self::NAME_VALID).
    pub fn state(&self) -> u16 {
        match self.repr {
            Repr::Empty => 0,
            Repr::Argb(_) => Self::ARGB_VALID,
            Repr::Known(_) => Self::KNOWN_VALID,
            Repr::Named(_) => Self::NAME_VALID,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self.repr, Repr::Known(_))
    }

    /// True for known colors in the OS theme ranges.
    pub fn is_system_color(&self) -> bool {
        matches!(self.repr, Repr::Known(color) if color.is_system())
    }

    pub fn is_named(&self) -> bool {
        matches!(self.repr, Repr::Known(_) | Repr::Named(_))
    }

    pub fn is_empty(&self) -> bool {
        self.repr == Repr::Empty
    }

    pub fn to_known_color(&self) -> Option<KnownColor> {
        match self.repr {
            Repr::Known(color) => Some(color),
            _ => None,
        }
    }

    /// The stored ARGB bits, without resolving known colors.
    pub fn packed_value(&self) -> Option<u32> {
        match self.repr {
            Repr::Argb(argb) => Some(argb),
            _ => None,
        }
    }

    pub fn brightness(&self) -> f32 {
        hsb::brightness(self.to_argb())
    }

    pub fn saturation(&self) -> f32 {
        hsb::saturation(self.to_argb())
    }

    pub fn hue(&self) -> f32 {
        hsb::hue(self.to_argb())
    }

    pub fn brightness_with(&self, resolver: &dyn PaletteResolver) -> f32 {
        hsb::brightness(self.to_argb_with(resolver))
    }

    pub fn saturation_with(&self, resolver: &dyn PaletteResolver) -> f32 {
        hsb::saturation(self.to_argb_with(resolver))
    }

    pub fn hue_with(&self, resolver: &dyn PaletteResolver) -> f32 {
        hsb::hue(self.to_argb_with(resolver))
    }

    /// Stable hash over the stored identity.
    ///
    /// Free-form names hash by name alone. Everything else mixes the stored
    /// ARGB bits, the known id and the state bits.
    pub fn hash_code(&self) -> u32 {
        let (value, known) = match &self.repr {
            Repr::Named(name) => return fnv1a(name.as_bytes()),
            Repr::Argb(argb) => (*argb, 0),
            Repr::Known(color) => (0, u32::from(color.id())),
            Repr::Empty => (0, 0),
        };
        combine_hash(combine_hash(value, known), u32::from(self.state()))
    }
}

fn check_channel(channel: Channel, value: i32) -> Result<u32, ColorError> {
    u8::try_from(value)
        .map(u32::from)
        .map_err(|_| ColorError::InvalidChannel { channel, value })
}

fn combine_hash(h1: u32, h2: u32) -> u32 {
    h1.rotate_left(5).wrapping_add(h1) ^ h2
}

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}

/// Hue, saturation and brightness from the RGB bytes of a packed value.
mod hsb {
    fn channels(argb: u32) -> (i32, i32, i32) {
        (
            i32::from((argb >> 16) as u8),
            i32::from((argb >> 8) as u8),
            i32::from(argb as u8),
        )
    }

    pub(super) fn brightness(argb: u32) -> f32 {
        let (r, g, b) = channels(argb);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        (max + min) as f32 / 510.0
    }

    pub(super) fn saturation(argb: u32) -> f32 {
        let (r, g, b) = channels(argb);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if max == min {
            return 0.0;
        }
        let mut sum = max + min;
        if sum > 255 {
            sum = 510 - sum;
        }
        (max - min) as f32 / sum as f32
    }

    pub(super) fn hue(argb: u32) -> f32 {
        let (r, g, b) = channels(argb);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if max == min {
            return 0.0;
        }

        let diff = (max - min) as f32;
        let r_norm = (max - r) as f32 / diff;
        let g_norm = (max - g) as f32 / diff;
        let b_norm = (max - b) as f32 / diff;

        // Later channels win ties.
        let mut hue = 0.0;
        if r == max {
            hue = 60.0 * (6.0 + b_norm - g_norm);
        }
        if g == max {
            hue = 60.0 * (2.0 + r_norm - b_norm);
        }
        if b == max {
            hue = 60.0 * (4.0 + g_norm - r_norm);
        }
        if hue >= 360.0 {
            hue -= 360.0;
        }
        hue
    }
}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl From<KnownColor> for Color {
    fn from(color: KnownColor) -> Self {
        Self::from_known(color)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.repr {
            Repr::Known(_) | Repr::Named(_) => write!(f, "Color [{}]", self.name()),
            Repr::Argb(argb) => write!(
                f,
                "Color [A={}, R={}, G={}, B={}]",
                (argb >> 24) as u8,
                (argb >> 16) as u8,
                (argb >> 8) as u8,
                argb as u8
            ),
            Repr::Empty => f.write_str("Color [Empty]"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parse `#RRGGBB`, `#AARRGGBB` or a color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Parse(s.to_string()));
        }

        let Some(hex) = s.strip_prefix('#') else {
            return Ok(Self::from_name(s));
        };
        if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::Parse(s.to_string()));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ColorError::Parse(s.to_string()))?;
        match hex.len() {
            6 => Ok(Self::from_argb_u32(0xFF00_0000 | value)),
            8 => Ok(Self::from_argb_u32(value)),
            _ => Err(ColorError::Parse(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;
    use crate::Rgba;

    /// Fake host palette returning a fixed value for one color.
    struct FixedPalette(KnownColor, Rgba);

    impl PaletteResolver for FixedPalette {
        fn resolve(&self, color: KnownColor) -> Option<Rgba> {
            (color == self.0).then_some(self.1)
        }
    }

    fn std_hash(color: &Color) -> u64 {
        let mut hasher = DefaultHasher::new();
        color.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn argb_channels_come_back_exactly() {
        for &(a, r, g, b) in &[(0, 0, 0, 0), (255, 255, 255, 255), (12, 34, 56, 78), (128, 1, 254, 7)] {
            let color = Color::from_argb(a, r, g, b).unwrap();
            assert_eq!(
                (color.a(), color.r(), color.g(), color.b()),
                (a as u8, r as u8, g as u8, b as u8)
            );
            assert_eq!(color.state(), Color::ARGB_VALID);
        }
    }

    #[test]
    fn from_rgb_is_opaque() {
        let color = Color::from_rgb(1, 2, 3).unwrap();
        assert_eq!(color.to_argb(), 0xFF010203);
        assert!(!color.is_named());
    }

    #[test]
    fn out_of_range_channel_is_named() {
        let err = Color::from_argb(255, 256, 0, 0).unwrap_err();
        assert_eq!(err, ColorError::InvalidChannel { channel: Channel::Red, value: 256 });

        let err = Color::from_argb(255, 0, -1, 0).unwrap_err();
        assert_eq!(err, ColorError::InvalidChannel { channel: Channel::Green, value: -1 });

        let err = Color::from_rgb(0, 0, 300).unwrap_err();
        assert_eq!(err, ColorError::InvalidChannel { channel: Channel::Blue, value: 300 });

        let err = Color::from_argb(-5, 0, 0, 0).unwrap_err();
        assert_eq!(err, ColorError::InvalidChannel { channel: Channel::Alpha, value: -5 });
    }

    #[test]
    fn invalid_channel_message() {
        let err = Color::from_argb(0, 999, 0, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'999' is not a valid value for 'red'. 'red' should be greater or equal to 0 and less than or equal to 255."
        );
    }

    #[test]
    fn packed_round_trip() {
        let color = Color::from_argb(0x80, 0x10, 0x20, 0x30).unwrap();
        assert_eq!(Color::from_packed_argb(color.to_argb_i32()), color);
        assert_eq!(Color::from_packed_argb(-1).to_argb(), 0xFFFFFFFF);
    }

    #[test]
    fn alpha_override_drops_known_identity() {
        let color = Color::from_alpha(10, &Color::RED).unwrap();
        assert_eq!((color.a(), color.r(), color.g(), color.b()), (10, 255, 0, 0));
        assert!(!color.is_known());
        assert!(!color.is_named());

        assert!(Color::from_alpha(256, &Color::RED).is_err());
    }

    #[test]
    fn alpha_override_uses_injected_palette() {
        let palette = FixedPalette(KnownColor::Highlight, Rgba::opaque(9, 8, 7));
        let color = Color::from_alpha_with(100, &KnownColor::Highlight.into(), &palette).unwrap();
        assert_eq!(color.to_argb(), 0x64090807);
    }

    #[test]
    fn name_and_id_agree() {
        let by_name = Color::from_name("Red");
        let by_id = Color::from_known_id(KnownColor::Red.id());
        assert_eq!(by_name, by_id);
        assert!(by_name.is_known() && by_name.is_named());
        assert!(by_id.is_known() && by_id.is_named());
        assert_eq!(by_name.name(), "Red");
        assert_eq!(Color::from_name("rEd"), Color::RED);
    }

    #[test]
    fn unknown_name_has_no_channels() {
        let color = Color::from_name("NotAColor123");
        assert!(!color.is_empty());
        assert!(color.is_named());
        assert!(!color.is_known());
        assert_eq!((color.a(), color.r(), color.g(), color.b()), (0, 0, 0, 0));
        assert_eq!(color.name(), "NotAColor123");
        assert_eq!(color.state(), Color::NAME_VALID);
    }

    #[test]
    fn out_of_range_id_degrades_to_name() {
        let color = Color::from_known_id(0);
        assert!(!color.is_known());
        assert_eq!(color.name(), "0");

        let color = Color::from_known_id(500);
        assert_eq!(color, Color::from_name("500"));
        assert_eq!(color.to_argb(), 0);
    }

    #[test]
    fn name_falls_back_to_hex() {
        assert_eq!(Color::from_argb_u32(0xFF00FF00).name(), "ff00ff00");
        assert_eq!(Color::from_argb_u32(0x0000000A).name(), "a");
        assert_eq!(Color::EMPTY.name(), "0");
    }

    #[test]
    fn system_color_ranges() {
        assert!(Color::from_known(KnownColor::Control).is_system_color());
        assert!(Color::from_known(KnownColor::MenuHighlight).is_system_color());
        assert!(!Color::RED.is_system_color());
        assert!(!Color::TRANSPARENT.is_system_color());
        assert!(!Color::from_rgb(1, 2, 3).unwrap().is_system_color());
    }

    #[test]
    fn only_default_is_empty() {
        assert!(Color::default().is_empty());
        assert!(Color::EMPTY.is_empty());
        assert_eq!(Color::EMPTY.state(), 0);
        assert!(!Color::from_argb_u32(0).is_empty());
        assert!(!Color::from_packed_argb(0).is_empty());
        assert!(!Color::from_rgb(0, 0, 0).unwrap().is_empty());
        assert!(!Color::from_name("").is_empty());
        assert!(!Color::from_known_id(1).is_empty());
    }

    #[test]
    fn equality_is_structural() {
        let a = Color::from_rgb(255, 0, 0).unwrap();
        let b = Color::from_argb_u32(0xFFFF0000);
        let c = Color::from_packed_argb(0xFFFF0000_u32 as i32);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(b, c);
        assert_eq!(a, c);

        // Same resolved value, different identity.
        assert_ne!(a, Color::RED);
        assert_ne!(Color::EMPTY, Color::from_argb_u32(0));
    }

    #[test]
    fn live_override_does_not_affect_equality() {
        let palette = FixedPalette(KnownColor::Window, Rgba::opaque(0x20, 0x20, 0x20));
        let first = Color::from_known(KnownColor::Window);
        let second = Color::from_name("Window");

        assert_eq!(first.to_argb_with(&StaticPalette), 0xFFFFFFFF);
        assert_eq!(second.to_argb_with(&palette), 0xFF202020);
        assert_eq!(first, second);
        assert_eq!(first.hash_code(), second.hash_code());
    }

    #[test]
    fn equal_colors_hash_equal() {
        let pairs = [
            (Color::from_name("Red"), Color::RED),
            (Color::from_rgb(1, 2, 3).unwrap(), Color::from_argb_u32(0xFF010203)),
            (Color::from_name("custom"), Color::from_name("custom")),
            (Color::default(), Color::EMPTY),
        ];
        for (left, right) in &pairs {
            assert_eq!(left, right);
            assert_eq!(left.hash_code(), right.hash_code());
            assert_eq!(std_hash(left), std_hash(right));
        }
    }

    #[test]
    fn hash_code_is_stable() {
        assert_eq!(Color::EMPTY.hash_code(), 0);
        assert_eq!(Color::from_name("a").hash_code(), 0xe40c292c);
        assert_ne!(Color::RED.hash_code(), Color::BLUE.hash_code());
    }

    #[test]
    fn hsb_of_primaries() {
        let white = Color::from_rgb(255, 255, 255).unwrap();
        assert_eq!(white.brightness(), 1.0);
        assert_eq!(white.saturation(), 0.0);
        assert_eq!(white.hue(), 0.0);

        assert_eq!(Color::from_rgb(255, 0, 0).unwrap().hue(), 0.0);
        assert_eq!(Color::from_rgb(0, 255, 0).unwrap().hue(), 120.0);
        assert_eq!(Color::from_rgb(0, 0, 255).unwrap().hue(), 240.0);
    }

    #[test]
    fn hsb_of_mixed_colors() {
        let orange = Color::from_rgb(255, 128, 0).unwrap();
        assert!((orange.hue() - 30.117647).abs() < 1e-4);
        assert_eq!(orange.saturation(), 1.0);
        assert!((orange.brightness() - 0.5).abs() < 1e-6);

        let dark = Color::from_rgb(50, 100, 150).unwrap();
        assert!((dark.hue() - 210.0).abs() < 1e-4);
        assert!((dark.saturation() - 0.5).abs() < 1e-6);

        let magenta = Color::from_rgb(255, 0, 255).unwrap();
        assert_eq!(magenta.hue(), 300.0);
    }

    #[test]
    fn hsb_reads_injected_palette() {
        let palette = FixedPalette(KnownColor::Highlight, Rgba::opaque(0, 0, 255));
        let color = Color::from_known(KnownColor::Highlight);
        assert_eq!(color.hue_with(&palette), 240.0);
        assert_eq!(color.saturation_with(&palette), 1.0);
        assert_eq!(color.brightness_with(&palette), 0.5);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Color::RED.to_string(), "Color [Red]");
        assert_eq!(Color::from_name("thing").to_string(), "Color [thing]");
        assert_eq!(
            Color::from_argb(1, 2, 3, 4).unwrap().to_string(),
            "Color [A=1, R=2, G=3, B=4]"
        );
        assert_eq!(Color::EMPTY.to_string(), "Color [Empty]");
    }

    #[test]
    fn parse_hex_and_names() {
        assert_eq!("#FF8100".parse::<Color>().unwrap().to_argb(), 0xFFFF8100);
        assert_eq!("#80ff8100".parse::<Color>().unwrap().to_argb(), 0x80FF8100);
        assert_eq!(
            " CornflowerBlue ".parse::<Color>().unwrap(),
            Color::from_known(KnownColor::CornflowerBlue)
        );
        assert_eq!("mystery".parse::<Color>().unwrap(), Color::from_name("mystery"));

        assert!("".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
        assert!("#+1234567".parse::<Color>().is_err());
    }

    #[test]
    fn clones_share_name() {
        let color = Color::from_name("shared");
        let copy = color.clone();
        assert_eq!(color, copy);
        assert_eq!(copy.name(), "shared");
    }
}
