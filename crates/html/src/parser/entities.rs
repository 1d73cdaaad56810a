//! Character reference decoding for text content.

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("shy", '\u{ad}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("hellip", '\u{2026}'),
    ("middot", '\u{b7}'),
    ("times", '\u{d7}'),
];

/// Longest reference body we try to match before giving up.
const MAX_REFERENCE_LEN: usize = 10;

fn decode_reference(body: &str) -> Option<char> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = if let Some(hex) = numeric.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            numeric.parse::<u32>().ok()?
        };
        return char::from_u32(code);
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, ch)| *ch)
}

/// Replace `&name;`, `&#NN;` and `&#xHH;` references. Unknown or unterminated
/// references are kept literally.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|end| *end > 0 && *end <= MAX_REFERENCE_LEN)
            .and_then(|end| decode_reference(&after[..end]).map(|ch| (ch, end)));
        if let Some((ch, end)) = decoded {
            out.push(ch);
            rest = &after[end + 1..];
        } else {
            out.push('&');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::decode_entities;

    #[test]
    fn decodes_named_and_numeric() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp; c"), "a <b> & c");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
    }

    #[test]
    fn keeps_unknown_references() {
        assert_eq!(decode_entities("fish &chips; & more"), "fish &chips; & more");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }
}
