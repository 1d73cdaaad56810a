//! Page settings that do not come from the document.
//!
//! Configuration can be loaded from environment variables or constructed
//! programmatically.

use std::env;

use layouter::{LayoutConfig, Viewport};

/// Runtime configuration for a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Distance moved by one scroll step, in pixels.
    pub scroll_step: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub input_width: f32,
    /// Whether to log a JSON line of reflow counters after every reflow.
    pub telemetry_enabled: bool,
}

impl PageConfig {
    /// Construct a `PageConfig` with the default margins and input width.
    ///
    /// Non-positive sizes are clamped to 1px.
    #[must_use]
    pub fn new(
        viewport_width: f32,
        viewport_height: f32,
        scroll_step: f32,
        telemetry_enabled: bool,
    ) -> Self {
        let layout = LayoutConfig::default();
        Self {
            viewport_width: viewport_width.max(1.0),
            viewport_height: viewport_height.max(1.0),
            scroll_step: scroll_step.max(1.0),
            margin_x: layout.margin_x,
            margin_y: layout.margin_y,
            input_width: layout.input_width,
            telemetry_enabled,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `FOLIO_VIEWPORT_WIDTH`: viewport width in pixels (default: 800)
    /// - `FOLIO_VIEWPORT_HEIGHT`: viewport height in pixels (default: 600)
    /// - `FOLIO_SCROLL_STEP`: scroll distance in pixels (default: 100)
    /// - `FOLIO_TELEMETRY`: set to "1" to enable telemetry (default: disabled)
    #[must_use]
    pub fn from_env() -> Self {
        let number = |name: &str, default: f32| {
            env::var(name)
                .ok()
                .and_then(|val| val.trim().parse::<f32>().ok())
                .filter(|val| val.is_finite())
                .unwrap_or(default)
        };
        Self::new(
            number("FOLIO_VIEWPORT_WIDTH", 800.0),
            number("FOLIO_VIEWPORT_HEIGHT", 600.0),
            number("FOLIO_SCROLL_STEP", 100.0),
            env::var("FOLIO_TELEMETRY").ok().as_deref() == Some("1"),
        )
    }

    pub const fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    pub const fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            margin_x: self.margin_x,
            margin_y: self.margin_y,
            input_width: self.input_width,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new(800.0, 600.0, 100.0, false)
    }
}
