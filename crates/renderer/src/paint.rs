use serde::{Deserialize, Serialize};
use text::FontHandle;

/// One drawing operation in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaintCommand {
    /// Text whose top-left corner is at `(x, y)`.
    DrawText {
        x: f32,
        y: f32,
        text: String,
        font: FontHandle,
        color: String,
    },
    /// Filled rectangle from `(x1, y1)` to `(x2, y2)`.
    DrawRect {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: String,
    },
}

impl PaintCommand {
    pub fn top(&self) -> f32 {
        match self {
            Self::DrawText { y, .. } => *y,
            Self::DrawRect { y1, .. } => *y1,
        }
    }

    pub fn bottom(&self) -> f32 {
        match self {
            Self::DrawText { y, font, .. } => y + font.metrics.linespace,
            Self::DrawRect { y2, .. } => *y2,
        }
    }

    /// The same command moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        match self.clone() {
            Self::DrawText {
                x,
                y,
                text,
                font,
                color,
            } => Self::DrawText {
                x: x + dx,
                y: y + dy,
                text,
                font,
                color,
            },
            Self::DrawRect {
                x1,
                y1,
                x2,
                y2,
                color,
            } => Self::DrawRect {
                x1: x1 + dx,
                y1: y1 + dy,
                x2: x2 + dx,
                y2: y2 + dy,
                color,
            },
        }
    }
}
