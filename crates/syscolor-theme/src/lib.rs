// ABOUTME: Host-side palette state for known colors.
// ABOUTME: Live per-color overrides plus TOML theme files that populate them.

pub mod live;
pub mod theme;

pub use live::LivePalette;
pub use theme::{Theme, ThemeError};
