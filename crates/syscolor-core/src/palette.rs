// ABOUTME: Contract for host palettes that override known colors at runtime.
// ABOUTME: Provides the static fallback resolver and the process-wide resolver slot.

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::KnownColor;

/// A native RGBA quadruple as reported by a host palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pack as `[alpha, red, green, blue]` from most to least significant byte.
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Convert native unit-range components. Each is scaled by 255 and
    /// truncated; values outside `0.0..=1.0` saturate.
    pub fn from_unit_floats(r: f32, g: f32, b: f32, a: f32) -> Self {
        let scale = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Self {
            r: scale(r),
            g: scale(g),
            b: scale(b),
            a: scale(a),
        }
    }
}

/// Source of live values for known colors.
///
/// Implementations are read concurrently and must not block. A quadruple is
/// handed back whole or not at all; there is no consistency requirement across
/// different colors. `None` means "no live override", and callers fall back to
/// [`KnownColor::default_argb`].
pub trait PaletteResolver: Send + Sync {
    fn resolve(&self, color: KnownColor) -> Option<Rgba>;
}

impl<T: PaletteResolver + ?Sized> PaletteResolver for Arc<T> {
    fn resolve(&self, color: KnownColor) -> Option<Rgba> {
        (**self).resolve(color)
    }
}

/// Resolver with no host overrides. Every lookup uses the static table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPalette;

impl PaletteResolver for StaticPalette {
    fn resolve(&self, _color: KnownColor) -> Option<Rgba> {
        None
    }
}

/// Resolve a known color through `resolver`, falling back to the static table.
pub fn resolve_argb(resolver: &dyn PaletteResolver, color: KnownColor) -> u32 {
    match resolver.resolve(color) {
        Some(rgba) => rgba.to_argb(),
        None => color.default_argb(),
    }
}

static INSTALLED: LazyLock<RwLock<Arc<dyn PaletteResolver>>> =
    LazyLock::new(|| RwLock::new(Arc::new(StaticPalette)));

/// Replace the resolver consulted by [`Color`](crate::Color)'s plain accessors.
pub fn install_resolver(resolver: Arc<dyn PaletteResolver>) {
    *INSTALLED.write() = resolver;
    tracing::debug!("Installed palette resolver");
}

/// Restore the static-table resolver.
pub fn reset_resolver() {
    install_resolver(Arc::new(StaticPalette));
}

/// The resolver currently installed for this process.
pub fn current_resolver() -> Arc<dyn PaletteResolver> {
    INSTALLED.read().clone()
}
