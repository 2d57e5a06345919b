// Error types for uri-templates

use thiserror::Error;

/// Failure of a match-by-match replacement. No partial output accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// The transformation declined to supply a value for the match at `index`
    #[error("no replacement provided for match {index}")]
    NoReplacement { index: usize },

    #[error("range {start}..{end} is not a valid range of a {len}-byte string")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// Failure of a template expansion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// Fewer positional values than placeholders
    #[error("template has {placeholders} placeholders but only {supplied} values were supplied")]
    PositionalExhausted { placeholders: usize, supplied: usize },

    #[error(transparent)]
    Replace(#[from] ReplaceError),
}

/// Failure while turning a template into an HTTP request
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("path expansion failed: {0}")]
    Expand(#[from] ExpandError),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid header '{name}'")]
    InvalidHeader { name: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
