//! Tag and descendant selectors.

use core::fmt;

use html::{DOM, NodeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Matches elements with this (lower-case) tag name.
    Tag(String),
    /// Matches nodes matched by the second selector that have a strict ancestor
    /// matched by the first.
    Descendant(Box<Selector>, Box<Selector>),
}

impl Selector {
    pub fn descendant(ancestor: Self, descendant: Self) -> Self {
        Self::Descendant(Box::new(ancestor), Box::new(descendant))
    }

    /// Tag selectors count 1, descendant selectors the sum of their parts.
    pub fn specificity(&self) -> u32 {
        match self {
            Self::Tag(_) => 1,
            Self::Descendant(ancestor, descendant) => {
                ancestor.specificity().saturating_add(descendant.specificity())
            }
        }
    }

    pub fn matches(&self, dom: &DOM, node: NodeId) -> bool {
        match self {
            Self::Tag(tag) => dom.tag(node) == Some(tag.as_str()),
            Self::Descendant(ancestor, descendant) => {
                descendant.matches(dom, node)
                    && dom
                        .ancestors(node)
                        .any(|candidate| ancestor.matches(dom, candidate))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => formatter.write_str(tag),
            Self::Descendant(ancestor, descendant) => write!(formatter, "{ancestor} {descendant}"),
        }
    }
}
