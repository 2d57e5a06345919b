//! Expansion of `{name}` placeholders in HTTP request paths.
//!
//! Values come either from a name -> value map, where a missing name leaves
//! its placeholder untouched, or from an ordered list consumed left to right,
//! where running out of values fails the whole expansion.
//!
//! ```
//! use std::collections::HashMap;
//! use uri_templates::TemplateExpander;
//!
//! let vars = HashMap::from([("user".to_string(), "MyName".to_string())]);
//! let path = TemplateExpander::new().expand_named("user/{user}/albumid/{albumId}", &vars);
//! assert_eq!(path, "user/MyName/albumid/{albumId}");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;

pub use domain::replace::{replace_each, replace_matches, MatchOptions, Replacement, ScanMatch};
pub use domain::template::{Lookup, TemplateExpander, Variables};
pub use error::{ClientError, ExpandError, ReplaceError};
pub use services::{Body, TemplateClient};
