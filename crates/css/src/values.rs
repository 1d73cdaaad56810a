// Single-token length values, as used by `font-size`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    Em,
    Percent,
}

impl Unit {
    fn from_suffix(unit: &str) -> Option<Self> {
        match unit.to_ascii_lowercase().as_str() {
            "px" | "" => Some(Self::Px),
            "em" => Some(Self::Em),
            "%" => Some(Self::Percent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    /// Convert to pixels relative to the parent's pixel font size.
    pub fn to_px(self, parent_px: f64) -> f64 {
        match self.unit {
            Unit::Px => self.value,
            Unit::Em => self.value * parent_px,
            Unit::Percent => self.value / 100.0 * parent_px,
        }
    }
}

/// Parse `12px`, `1.5em`, `50%` or a bare number (taken as px).
pub fn parse_length(input: &str) -> Option<Length> {
    let text = input.trim();
    let (number, unit) = split_number_and_unit(text)?;
    let value = number.parse::<f64>().ok().filter(|value| value.is_finite())?;
    Some(Length {
        value,
        unit: Unit::from_suffix(unit)?,
    })
}

/// Parse a resolved pixel string such as `16px` or `14.4px`.
pub fn parse_px(input: &str) -> Option<f64> {
    match parse_length(input)? {
        Length {
            value,
            unit: Unit::Px,
        } => Some(value),
        Length { .. } => None,
    }
}

/// Print pixels the way resolved styles store them: `10.0px`, `14.4px`.
pub fn format_px(px: f64) -> String {
    format!("{px:?}px")
}

fn split_number_and_unit(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut index = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        index += 1;
    }
    let mut has_digits = false;
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
        has_digits = true;
    }
    if bytes.get(index) == Some(&b'.') {
        index += 1;
    }
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
        has_digits = true;
    }
    if !has_digits {
        return None;
    }
    Some(text.split_at(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_resolve_against_parent() {
        assert_eq!(parse_length("50%").map(|len| len.to_px(20.0)), Some(10.0));
        assert_eq!(parse_length("1.5em").map(|len| len.to_px(10.0)), Some(15.0));
        assert_eq!(parse_length("12").map(|len| len.to_px(99.0)), Some(12.0));
        assert_eq!(parse_length("large"), None);
        assert_eq!(parse_length("3vw"), None);
    }

    #[test]
    fn pixel_strings() {
        assert_eq!(format_px(10.0), "10.0px");
        assert_eq!(format_px(0.9 * 16.0), "14.4px");
        assert_eq!(parse_px("16px"), Some(16.0));
        assert_eq!(parse_px("50%"), None);
    }
}
