// Domain model: per-match replacement and the path templates built on it

pub mod replace;
pub mod template;

pub use replace::{replace_each, replace_matches, MatchOptions, Replacement, ScanMatch};
pub use template::{Lookup, TemplateExpander, Variables};
