use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::trace;

use crate::{FixedAdvanceBackend, FontBackend, FontDescriptor, FontHandle, FontSlant, FontWeight};

/// Append-only font table in front of a [`FontBackend`].
///
/// Shared between threads behind an `Arc`; entries are never evicted.
pub struct FontCache {
    backend: Box<dyn FontBackend>,
    fonts: RwLock<HashMap<FontDescriptor, FontHandle>>,
}

impl FontCache {
    pub fn new(backend: impl FontBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            fonts: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_font(&self, size_px: f32, weight: FontWeight, slant: FontSlant) -> FontHandle {
        let descriptor = FontDescriptor {
            size_px,
            weight,
            slant,
        };
        if let Some(handle) = self
            .fonts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&descriptor)
        {
            return *handle;
        }
        let mut fonts = self.fonts.write().unwrap_or_else(PoisonError::into_inner);
        *fonts.entry(descriptor).or_insert_with(|| {
            trace!("loading font {descriptor:?}");
            FontHandle {
                descriptor,
                metrics: self.backend.metrics(&descriptor),
            }
        })
    }

    pub fn measure(&self, font: &FontHandle, text: &str) -> f32 {
        self.backend.measure(&font.descriptor, text)
    }

    pub fn space_width(&self, font: &FontHandle) -> f32 {
        self.measure(font, " ")
    }

    /// Number of distinct fonts loaded so far.
    pub fn len(&self) -> usize {
        self.fonts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new(FixedAdvanceBackend::default())
    }
}
