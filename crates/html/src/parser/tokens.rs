//! Splitting raw tag text into a name and attributes.

use crate::dom::Attributes;

/// Split on whitespace, keeping quoted runs (and the whitespace inside them) together.
fn split_tokens(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for ch in raw.chars() {
        match quote {
            Some(open) => {
                current.push(ch);
                if ch == open {
                    quote = None;
                }
            }
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(core::mem::take(&mut current));
                }
            }
            None => {
                if ch == '"' || ch == '\'' {
                    quote = Some(ch);
                }
                current.push(ch);
            }
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote) {
            return inner.strip_suffix(quote).unwrap_or(inner);
        }
    }
    value
}

/// Drop a self-closing `/`: a lone token, or glued to the tag name, a bare
/// attribute or a quoted value. Unquoted values keep their trailing slash.
fn strip_self_closing(tokens: &mut Vec<String>) {
    let only_name = tokens.len() == 1;
    let Some(last) = tokens.last_mut() else {
        return;
    };
    if last.as_str() == "/" {
        tokens.pop();
        return;
    }
    let Some(rest) = last.strip_suffix('/') else {
        return;
    };
    if only_name || !rest.contains('=') || rest.ends_with('"') || rest.ends_with('\'') {
        let kept = rest.len();
        last.truncate(kept);
    }
}

/// Parse the text between `<` and `>`.
///
/// Returns the lower-cased tag name (close tags keep their leading `/`) and the
/// attributes, or `None` when the tag text is empty.
pub fn parse_tag(raw: &str) -> Option<(String, Attributes)> {
    let mut tokens = split_tokens(raw.trim());
    strip_self_closing(&mut tokens);
    let mut tokens = tokens.into_iter();
    let tag = tokens.next()?.to_ascii_lowercase();
    let mut attrs = Attributes::new();
    for token in tokens {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key.to_ascii_lowercase(), strip_quotes(value).to_owned()),
            None => (token.to_ascii_lowercase(), String::new()),
        };
        if key.is_empty() {
            continue;
        }
        if let Some(slot) = attrs.iter_mut().find(|(name, _)| *name == key) {
            slot.1 = value;
        } else {
            attrs.push((key, value));
        }
    }
    Some((tag, attrs))
}
