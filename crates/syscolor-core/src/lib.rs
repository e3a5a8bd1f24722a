// ABOUTME: Platform color value type with known-color resolution.
// ABOUTME: Defines Color, the KnownColor table, and the palette resolver contract.

pub mod color;
pub mod error;
pub mod known;
pub mod palette;

pub use color::Color;
pub use error::{Channel, ColorError};
pub use known::KnownColor;
pub use palette::{
    current_resolver, install_resolver, reset_resolver, resolve_argb, PaletteResolver, Rgba,
    StaticPalette,
};
