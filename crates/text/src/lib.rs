//! Font service: descriptors, metrics and width measurement.
//!
//! Layout asks a [`FontCache`] for a [`FontHandle`] per `(size, weight, slant)` and
//! measures words against it. The actual numbers come from a [`FontBackend`]; the
//! built-in [`FixedAdvanceBackend`] needs no system fonts.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

mod backend;
mod cache;

use core::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};

pub use backend::{FixedAdvanceBackend, FontBackend};
pub use cache::FontCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontSlant {
    #[default]
    Roman,
    Italic,
}

/// Cache key for a font.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub size_px: f32,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl PartialEq for FontDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.size_px.to_bits() == other.size_px.to_bits()
            && self.weight == other.weight
            && self.slant == other.slant
    }
}

impl Eq for FontDescriptor {}

impl Hash for FontDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size_px.to_bits().hash(state);
        self.weight.hash(state);
        self.slant.hash(state);
    }
}

/// Vertical metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub linespace: f32,
}

/// A resolved font. Cheap to copy; equal descriptors always give equal handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontHandle {
    pub descriptor: FontDescriptor,
    pub metrics: FontMetrics,
}
