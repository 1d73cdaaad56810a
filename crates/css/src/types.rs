use core::fmt;

use crate::selector::Selector;

/// Property/value pairs of one rule body, in first-insertion order.
///
/// Inserting a property that is already present overwrites its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| *name == property) {
            slot.1 = value;
        } else {
            self.entries.push((property, value));
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut declarations = Self::new();
        for (property, value) in iter {
            declarations.insert(property, value);
        }
        declarations
    }
}

/// One parsed rule. Never modified after parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selector: Selector,
    pub declarations: Declarations,
    /// Position among all rules fed to the cascade, for stable ordering.
    pub source_order: u32,
}

impl Rule {
    pub fn specificity(&self) -> u32 {
        self.selector.specificity()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {{", self.selector)?;
        for (property, value) in self.declarations.iter() {
            write!(formatter, " {property}: {value};")?;
        }
        write!(formatter, " }}")
    }
}
