// ABOUTME: Live override table consulted when resolving known colors.
// ABOUTME: Per-color atomic slots so readers never block or see partial values.

use std::sync::atomic::{AtomicU64, Ordering};

use syscolor_core::{KnownColor, PaletteResolver, Rgba};

use crate::Theme;

/// Slot flag marking an override as present. The low 32 bits hold ARGB.
const PRESENT: u64 = 1 << 32;

/// A host palette that can be refreshed at any time, e.g. on theme change.
///
/// Each known color owns one atomic slot, so a reader sees either the old or
/// the new quadruple for a color. Updates to different colors are not ordered
/// with respect to each other.
#[derive(Debug)]
pub struct LivePalette {
    slots: Box<[AtomicU64]>,
    generation: AtomicU64,
}

impl LivePalette {
    pub fn new() -> Self {
        Self {
            slots: KnownColor::ALL.iter().map(|_| AtomicU64::new(0)).collect(),
            generation: AtomicU64::new(0),
        }
    }

    /// Build a palette holding the overrides of `theme`.
    pub fn from_theme(theme: &Theme) -> Self {
        let palette = Self::new();
        palette.apply_theme(theme);
        palette
    }

    fn slot(&self, color: KnownColor) -> &AtomicU64 {
        &self.slots[usize::from(color.id() - KnownColor::FIRST_ID)]
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }

    pub fn set(&self, color: KnownColor, rgba: Rgba) {
        self.slot(color)
            .store(PRESENT | u64::from(rgba.to_argb()), Ordering::Release);
        self.bump();
    }

    pub fn clear(&self, color: KnownColor) {
        self.slot(color).store(0, Ordering::Release);
        self.bump();
    }

    pub fn clear_all(&self) {
        for slot in self.slots.iter() {
            slot.store(0, Ordering::Release);
        }
        self.bump();
    }

    pub fn get(&self, color: KnownColor) -> Option<Rgba> {
        let raw = self.slot(color).load(Ordering::Acquire);
        ((raw & PRESENT) != 0).then(|| Rgba::from_argb(raw as u32))
    }

    /// Replace all overrides with those of `theme`.
    pub fn apply_theme(&self, theme: &Theme) {
        for color in KnownColor::ALL {
            match theme.colors.get(color) {
                Some(rgba) => self
                    .slot(*color)
                    .store(PRESENT | u64::from(rgba.to_argb()), Ordering::Release),
                None => self.slot(*color).store(0, Ordering::Release),
            }
        }
        self.bump();
        tracing::info!(
            "Applied theme '{}' with {} overrides",
            theme.name,
            theme.colors.len()
        );
    }

    /// Snapshot of the colors currently overridden, in ordinal order.
    pub fn overrides(&self) -> Vec<(KnownColor, Rgba)> {
        KnownColor::ALL
            .iter()
            .filter_map(|&color| self.get(color).map(|rgba| (color, rgba)))
            .collect()
    }

    /// Counter bumped on every change, for hosts that cache resolved values.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl Default for LivePalette {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteResolver for LivePalette {
    fn resolve(&self, color: KnownColor) -> Option<Rgba> {
        self.get(color)
    }
}
