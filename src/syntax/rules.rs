//! Pattern rules for syntax highlighting
//!
//! A rule pairs a compiled regex with the style painted over its matches.

use regex::Regex;

use super::style::{Span, Style};
use super::tokens::TokenType;

/// A single pattern rule
///
/// Rules are applied in table order; a later rule's spans overwrite
/// the styling of earlier rules where they overlap.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token type this rule recognizes
    pub token_type: TokenType,
    /// Style applied to matches
    pub style: Style,
    /// Style only this capture group of each match, if set
    pub capture_group: Option<usize>,
}

impl Rule {
    /// Create a new pattern rule
    pub fn new(
        name: &str,
        pattern: &str,
        token_type: TokenType,
        style: Style,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.to_string(),
            pattern: Regex::new(pattern)?,
            token_type,
            style,
            capture_group: None,
        })
    }

    /// Builder: style only a capture group of each match
    pub fn with_capture_group(mut self, group: usize) -> Self {
        self.capture_group = Some(group);
        self
    }

    /// All non-overlapping match ranges in `block`, left to right
    ///
    /// Empty matches are skipped, as is a match whose capture group
    /// did not participate.
    pub fn find_ranges(&self, block: &str) -> Vec<(usize, usize)> {
        match self.capture_group {
            Some(group) => self
                .pattern
                .captures_iter(block)
                .filter_map(|caps| caps.get(group))
                .map(|m| (m.start(), m.end()))
                .filter(|(start, end)| start < end)
                .collect(),
            None => self
                .pattern
                .find_iter(block)
                .map(|m| (m.start(), m.end()))
                .filter(|(start, end)| start < end)
                .collect(),
        }
    }

    /// Spans produced by this rule over `block`
    pub fn spans(&self, block: &str) -> impl Iterator<Item = Span> + '_ {
        let style = self.style;
        self.find_ranges(block)
            .into_iter()
            .map(move |(start, end)| Span::new(start, end, style))
    }
}
