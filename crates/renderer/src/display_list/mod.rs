//! Paint commands retained between frames.

use serde::{Deserialize, Serialize};

use crate::PaintCommand;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    /// Commands in painting order.
    pub items: Vec<PaintCommand>,
    /// Bumped every time the list is rebuilt.
    pub generation: u64,
}

impl DisplayList {
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
        }
    }

    pub fn from_items<I: IntoIterator<Item = PaintCommand>>(items: I) -> Self {
        let mut list = Self::new();
        list.items.extend(items);
        list
    }

    /// Swap in a freshly painted command list.
    pub fn replace(&mut self, items: Vec<PaintCommand>) -> u64 {
        self.items = items;
        self.bump_generation()
    }

    pub const fn bump_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Commands that intersect the window `[scroll, scroll + height]`, in painting order.
    pub fn visible(&self, scroll: f32, height: f32) -> impl Iterator<Item = &PaintCommand> {
        self.items
            .iter()
            .filter(move |command| command.top() <= scroll + height && command.bottom() >= scroll)
    }

    /// Visible commands shifted into screen coordinates.
    pub fn to_screen(&self, scroll: f32, height: f32) -> Vec<PaintCommand> {
        self.visible(scroll, height)
            .map(|command| command.translated(0.0, -scroll))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
