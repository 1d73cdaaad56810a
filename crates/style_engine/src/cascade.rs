//! Cascade and inheritance over a parsed document.

use css::values::{format_px, parse_length, parse_px};
use css::{Rule, parse_declaration_block};
use html::{DOM, NodeId, StyleMap};
use log::{debug, trace, warn};

/// Properties copied from parent to child, with their values at the root.
pub const INHERITED_PROPERTIES: &[(&str, &str)] = &[
    ("font-size", "16px"),
    ("font-style", "normal"),
    ("font-weight", "normal"),
    ("color", "black"),
];

const ROOT_FONT_SIZE_PX: f64 = 16.0;

/// Stable sort by ascending specificity; equal specificities keep their input order.
pub fn cascade_order(mut rules: Vec<Rule>) -> Vec<Rule> {
    rules.sort_by_key(Rule::specificity);
    rules
}

/// Resolve the style map of every node, parents before children.
///
/// `rules` must already be in cascade order, see [`cascade_order`].
pub fn resolve_styles(dom: &mut DOM, rules: &[Rule]) {
    let order: Vec<NodeId> = dom.descendants(dom.root()).collect();
    for node in &order {
        let style = compute_style(dom, *node, rules);
        if let Some(entry) = dom.get_mut(*node) {
            entry.style = style;
        }
    }
    debug!(
        "resolved styles for {} nodes against {} rules",
        order.len(),
        rules.len()
    );
}

fn compute_style(dom: &DOM, node: NodeId, rules: &[Rule]) -> StyleMap {
    let parent_style = dom.parent(node).and_then(|parent| dom.style(parent));
    let mut style = StyleMap::new();
    for (property, default) in INHERITED_PROPERTIES {
        let inherited = parent_style
            .and_then(|parent| parent.get(*property))
            .map_or(*default, String::as_str);
        style.insert((*property).to_owned(), inherited.to_owned());
    }

    for rule in rules.iter().filter(|rule| rule.selector.matches(dom, node)) {
        trace!("{:?} matched `{}`", dom.tag(node), rule.selector);
        for (property, value) in rule.declarations.iter() {
            style.insert(property.to_owned(), value.to_owned());
        }
    }

    if let Some(inline) = dom.attribute(node, "style") {
        for (property, value) in parse_declaration_block(inline).iter() {
            style.insert(property.to_owned(), value.to_owned());
        }
    }

    let parent_px = parent_style
        .and_then(|parent| parent.get("font-size"))
        .and_then(|size| parse_px(size))
        .unwrap_or(ROOT_FONT_SIZE_PX);
    if let Some(size) = style.get_mut("font-size") {
        normalize_font_size(size, parent_px);
    }
    style
}

/// Rewrite a specified font size as absolute pixels. `px` strings are kept as written.
fn normalize_font_size(size: &mut String, parent_px: f64) {
    let Some(length) = parse_length(size) else {
        warn!("unsupported font-size `{size}`, using the parent's {parent_px}px");
        *size = format_px(parent_px);
        return;
    };
    if size.trim_end().ends_with("px") {
        return;
    }
    *size = format_px(length.to_px(parent_px));
}

#[cfg(test)]
mod tests {
    use super::normalize_font_size;

    fn normalized(size: &str, parent: f64) -> String {
        let mut size = size.to_owned();
        normalize_font_size(&mut size, parent);
        size
    }

    #[test]
    fn font_sizes_become_pixels() {
        assert_eq!(normalized("50%", 20.0), "10.0px");
        assert_eq!(normalized("90%", 16.0), "14.4px");
        assert_eq!(normalized("2em", 12.0), "24.0px");
        assert_eq!(normalized("18px", 12.0), "18px");
        assert_eq!(normalized("18", 12.0), "18.0px");
        assert_eq!(normalized("x-large", 12.0), "12.0px");
    }
}
