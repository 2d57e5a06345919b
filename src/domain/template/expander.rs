// Expansion of `{name}` placeholders in request paths

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::variables::{Lookup, Variables};
use crate::domain::replace::{replace_each, Replacement};
use crate::error::{ExpandError, ReplaceError};

/// A placeholder: an identifier of word characters between single braces
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Expands path templates such as `user/{user}/albumid/{albumId}`
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExpander {
    encode_values: bool,
}

impl TemplateExpander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percent-encode every substituted value. Off by default: values are
    /// inserted exactly as supplied.
    pub fn with_value_encoding(mut self) -> Self {
        self.encode_values = true;
        self
    }

    /// Expand `template` from either kind of variable source.
    ///
    /// Named sources never fail; a name without a value keeps its literal
    /// `{name}` in the output. Positional sources fail as a whole when they
    /// run out of values, so no half-expanded path is ever returned.
    pub fn expand(&self, template: &str, variables: Variables<'_>) -> Result<String, ExpandError> {
        let expanded = replace_each(template, &PLACEHOLDER, |m| {
            let name = m.group(1).unwrap_or_default();
            match variables.lookup(name, m.index()) {
                Lookup::Found(value) => ControlFlow::Continue(Replacement::Text(self.render(value))),
                Lookup::NotFound => match variables {
                    Variables::Named(_) => {
                        debug!(name, "no value for placeholder, leaving it unexpanded");
                        ControlFlow::Continue(Replacement::text(m.as_str()))
                    }
                    Variables::Positional(_) => ControlFlow::Break(Replacement::Abort),
                },
            }
        });

        expanded.map_err(|err| match err {
            ReplaceError::NoReplacement { .. } => {
                let placeholders = Self::placeholder_count(template);
                debug!(
                    placeholders,
                    supplied = variables.len(),
                    "ran out of positional values"
                );
                ExpandError::PositionalExhausted {
                    placeholders,
                    supplied: variables.len(),
                }
            }
            other => other.into(),
        })
    }

    /// Expand by placeholder name
    pub fn expand_named(&self, template: &str, variables: &HashMap<String, String>) -> String {
        match self.expand(template, Variables::Named(variables)) {
            Ok(expanded) => expanded,
            Err(err) => unreachable!("named expansion cannot fail: {err}"),
        }
    }

    /// Expand by position: the n-th placeholder takes the n-th value.
    /// Surplus values are ignored.
    pub fn expand_positional(&self, template: &str, values: &[String]) -> Result<String, ExpandError> {
        self.expand(template, Variables::Positional(values))
    }

    /// Placeholder names of `template`, in the order they appear
    pub fn variables(template: &str) -> Vec<&str> {
        PLACEHOLDER
            .captures_iter(template)
            .filter_map(|captures| captures.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    pub fn placeholder_count(template: &str) -> usize {
        PLACEHOLDER.find_iter(template).count()
    }

    /// Names of placeholders still present in an expanded path
    pub fn unresolved(expanded: &str) -> Vec<&str> {
        Self::variables(expanded)
    }

    fn render(&self, value: &str) -> String {
        if self.encode_values {
            urlencoding::encode(value).into_owned()
        } else {
            value.to_string()
        }
    }
}
