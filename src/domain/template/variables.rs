// Sources of placeholder values

use std::collections::HashMap;

/// Where placeholder values come from
#[derive(Debug, Clone, Copy)]
pub enum Variables<'a> {
    /// Looked up by placeholder name. A missing name leaves the placeholder as-is.
    Named(&'a HashMap<String, String>),
    /// Consumed in the order placeholders appear. Running out fails the expansion.
    Positional(&'a [String]),
}

/// Outcome of looking up one placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a str),
    NotFound,
}

impl<'a> Variables<'a> {
    /// Value for the placeholder `name` found at position `index` of the scan.
    /// Named sources ignore `index`, positional sources ignore `name`.
    pub fn lookup(&self, name: &str, index: usize) -> Lookup<'a> {
        let value = match *self {
            Variables::Named(map) => map.get(name),
            Variables::Positional(values) => values.get(index),
        };
        value.map_or(Lookup::NotFound, |v| Lookup::Found(v.as_str()))
    }

    pub fn len(&self) -> usize {
        match self {
            Variables::Named(map) => map.len(),
            Variables::Positional(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Variables::Positional(_))
    }
}

impl<'a> From<&'a HashMap<String, String>> for Variables<'a> {
    fn from(map: &'a HashMap<String, String>) -> Self {
        Variables::Named(map)
    }
}

impl<'a> From<&'a [String]> for Variables<'a> {
    fn from(values: &'a [String]) -> Self {
        Variables::Positional(values)
    }
}

impl<'a> From<&'a Vec<String>> for Variables<'a> {
    fn from(values: &'a Vec<String>) -> Self {
        Variables::Positional(values.as_slice())
    }
}
