use css::values::parse_px;
use html::StyleMap;
use text::{FontSlant, FontWeight};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("node has no resolved `{property}`; styles must be resolved before layout")]
    Missing { property: &'static str },
    #[error("`{property}: {value}` cannot be used for layout")]
    Invalid {
        property: &'static str,
        value: String,
    },
}

/// Typed view of the properties layout and painting read from a resolved [`StyleMap`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub font_size_px: f32,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub color: String,
    /// `transparent` when no background is set.
    pub background_color: String,
}

fn required<'map>(style: &'map StyleMap, property: &'static str) -> Result<&'map str, StyleError> {
    style
        .get(property)
        .map(String::as_str)
        .ok_or(StyleError::Missing { property })
}

fn invalid(property: &'static str, value: &str) -> StyleError {
    StyleError::Invalid {
        property,
        value: value.to_owned(),
    }
}

fn parse_weight(value: &str) -> Result<FontWeight, StyleError> {
    match value {
        "normal" | "lighter" => Ok(FontWeight::Normal),
        "bold" | "bolder" => Ok(FontWeight::Bold),
        numeric => match numeric.parse::<u16>() {
            Ok(weight) if weight >= 600 => Ok(FontWeight::Bold),
            Ok(_) => Ok(FontWeight::Normal),
            Err(_) => Err(invalid("font-weight", value)),
        },
    }
}

fn parse_slant(value: &str) -> Result<FontSlant, StyleError> {
    match value {
        "normal" => Ok(FontSlant::Roman),
        "italic" | "oblique" => Ok(FontSlant::Italic),
        _ => Err(invalid("font-style", value)),
    }
}

impl ComputedStyle {
    pub fn from_style_map(style: &StyleMap) -> Result<Self, StyleError> {
        let size = required(style, "font-size")?;
        let font_size_px = parse_px(size)
            .filter(|px| *px >= 0.0)
            .ok_or_else(|| invalid("font-size", size))? as f32;
        Ok(Self {
            font_size_px,
            weight: parse_weight(required(style, "font-weight")?)?,
            slant: parse_slant(required(style, "font-style")?)?,
            color: required(style, "color")?.to_owned(),
            background_color: style
                .get("background-color")
                .cloned()
                .unwrap_or_else(|| "transparent".to_owned()),
        })
    }

    pub fn has_background(&self) -> bool {
        self.background_color != "transparent"
    }
}
