// Regular-expression replacement driven by a per-match transformation
//
// Every match gets its own replacement, chosen by the caller. The whole
// operation either produces a new string or fails without partial output.

use std::ops::{ControlFlow, Range};

use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::error::ReplaceError;

/// Matching options passed through to the scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Only accept a match that starts exactly where the scan currently is:
    /// the range start for the first match, the previous match end afterwards
    pub anchored: bool,
    /// Let `^` and `\b` see the text before the scanned range. Matches still
    /// end inside the range, so the range end acts as the end of input.
    pub transparent_bounds: bool,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchored(mut self, anchored: bool) -> Self {
        self.anchored = anchored;
        self
    }

    pub fn with_transparent_bounds(mut self, transparent: bool) -> Self {
        self.transparent_bounds = transparent;
        self
    }
}

/// What a transformation wants done with a single match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    Text(String),
    /// No value for this match; fails the entire replacement
    Abort,
}

impl Replacement {
    pub fn text(value: impl Into<String>) -> Self {
        Replacement::Text(value.into())
    }
}

/// A single match handed to the transformation
#[derive(Debug)]
pub struct ScanMatch<'h> {
    text: &'h str,
    start: usize,
    index: usize,
    captures: Captures<'h>,
}

impl<'h> ScanMatch<'h> {
    /// The exact matched text
    pub fn as_str(&self) -> &'h str {
        self.text
    }

    /// Byte offset of the match in the source string
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Zero-based position of this match among the matches of the scan
    pub fn index(&self) -> usize {
        self.index
    }

    /// Text of capture group `i`, if it participated in the match
    pub fn group(&self, i: usize) -> Option<&'h str> {
        self.captures.get(i).map(|m| m.as_str())
    }

    /// Text of the named capture group, if it participated in the match
    pub fn named(&self, name: &str) -> Option<&'h str> {
        self.captures.name(name).map(|m| m.as_str())
    }
}

/// Replace every match of `pattern` inside `range` of `source` with the value
/// returned by `transform`.
///
/// `transform` returns `ControlFlow::Continue` to keep scanning or
/// `ControlFlow::Break` to apply its replacement and stop; text after the last
/// processed match is copied verbatim. Any `Replacement::Abort` fails the
/// whole call, discarding replacements already made.
///
/// Case sensitivity and other syntax flags belong to the compiled pattern
/// (see `regex::RegexBuilder`).
pub fn replace_matches<F>(
    source: &str,
    pattern: &Regex,
    options: MatchOptions,
    range: Range<usize>,
    mut transform: F,
) -> Result<String, ReplaceError>
where
    F: FnMut(&ScanMatch<'_>) -> ControlFlow<Replacement, Replacement>,
{
    if range.start > range.end
        || range.end > source.len()
        || !source.is_char_boundary(range.start)
        || !source.is_char_boundary(range.end)
    {
        return Err(ReplaceError::InvalidRange {
            start: range.start,
            end: range.end,
            len: source.len(),
        });
    }

    // Both haystacks end at the range end so no match can run past it. With
    // opaque bounds the range itself is the haystack, so offsets must be
    // shifted back into `source` coordinates.
    let (haystack, offset, mut pos, limit) = if options.transparent_bounds {
        (&source[..range.end], 0, range.start, range.end)
    } else {
        (&source[range.clone()], range.start, 0, range.len())
    };

    let mut output = String::with_capacity(source.len());
    let mut copied = 0;
    let mut index = 0;
    let mut last_end = None;

    while pos <= limit {
        let Some(captures) = pattern.captures_at(haystack, pos) else {
            break;
        };
        let Some(whole) = captures.get(0) else {
            break;
        };

        // An empty match right where the previous one ended is skipped.
        if whole.is_empty() && last_end == Some(whole.start()) {
            match haystack[whole.start()..].chars().next() {
                Some(ch) => {
                    pos = whole.start() + ch.len_utf8();
                    continue;
                }
                None => break,
            }
        }

        if options.anchored && whole.start() != last_end.unwrap_or(pos) {
            trace!(start = whole.start() + offset, "anchored scan hit a gap");
            break;
        }

        let found = ScanMatch {
            text: whole.as_str(),
            start: whole.start() + offset,
            index,
            captures,
        };
        trace!(index, start = found.start, text = found.text, "match");

        let (replacement, stop) = match transform(&found) {
            ControlFlow::Continue(replacement) => (replacement, false),
            ControlFlow::Break(replacement) => (replacement, true),
        };

        let text = match replacement {
            Replacement::Text(text) => text,
            Replacement::Abort => {
                debug!(index, "transformation aborted, discarding replacement");
                return Err(ReplaceError::NoReplacement { index });
            }
        };

        output.push_str(&source[copied..found.start]);
        output.push_str(&text);
        copied = found.end();
        index += 1;

        if stop {
            break;
        }

        last_end = Some(whole.end());
        pos = whole.end();
    }

    output.push_str(&source[copied..]);
    Ok(output)
}

/// `replace_matches` over the whole of `source` with default options
pub fn replace_each<F>(source: &str, pattern: &Regex, transform: F) -> Result<String, ReplaceError>
where
    F: FnMut(&ScanMatch<'_>) -> ControlFlow<Replacement, Replacement>,
{
    replace_matches(source, pattern, MatchOptions::default(), 0..source.len(), transform)
}
