// Template module for `{name}` path templates
//
// Placeholders are plain identifiers in single braces. Values come from a
// name -> value map or from a list consumed in placeholder order.

mod expander;
mod variables;

pub use expander::TemplateExpander;
pub use variables::{Lookup, Variables};
