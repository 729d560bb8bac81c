//! Style types for highlighted text
//!
//! A `Span` is the annotation the highlighter hands to its host: a byte
//! range inside one block plus the `Style` to paint over it.

use std::ops::Range;

use serde::Deserialize;

use crate::error::KingpadError;

/// Foreground colors (ANSI 16-color palette plus true color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a palette name (`"bright-black"`) or `#rrggbb`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let name = s.to_lowercase().replace(['_', ' '], "-");
        let color = match name.as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

impl TryFrom<String> for Color {
    type Error = KingpadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value).ok_or(KingpadError::InvalidColor(value))
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled span of text within a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Create a span from a start offset and a length
    pub fn from_len(start: usize, len: usize, style: Style) -> Self {
        Self::new(start, start + len, style)
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The covered text of `block`
    pub fn text<'a>(&self, block: &'a str) -> &'a str {
        block.get(self.start..self.end).unwrap_or("")
    }

    /// Convert the byte range into a character range over `block`
    ///
    /// For hosts whose text model indexes by characters rather than bytes.
    /// An offset inside a character rounds up to the next character, and an
    /// offset past the end clamps to the character count.
    pub fn char_range(&self, block: &str) -> Range<usize> {
        let to_chars = |byte: usize| block.char_indices().take_while(|&(i, _)| i < byte).count();
        to_chars(self.start)..to_chars(self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold);
        assert!(!style.italic);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold();
        assert_eq!(style.fg, Color::Red);
        assert!(style.bold);
        assert!(!style.is_default());
        assert_eq!(style.with_fg(Color::Blue).fg, Color::Blue);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("blue"), Some(Color::Blue));
        assert_eq!(Color::parse("Bright_Black"), Some(Color::BrightBlack));
        assert_eq!(Color::parse("gray"), Some(Color::BrightBlack));
        assert_eq!(Color::parse("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(Color::parse("#ff80"), None);
        assert_eq!(Color::parse("#gg0000"), None);
        assert_eq!(Color::parse("chartreuse"), None);
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(5, 10, Style::default());
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
        assert_eq!(Span::from_len(5, 5, Style::default()), span);
    }

    #[test]
    fn test_span_char_range() {
        let block = "é = \"ü\"";
        // "é" is 2 bytes, "ü" is 2 bytes; the string literal starts at byte 5
        let span = Span::new(5, 9, Style::default());
        assert_eq!(span.text(block), "\"ü\"");
        assert_eq!(span.char_range(block), 4..7);
    }

    #[test]
    fn test_span_char_range_off_boundary() {
        let block = "é = \"ü\"";
        // Byte 1 is inside "é" and byte 6 is inside "ü"
        let span = Span::new(1, 6, Style::default());
        assert_eq!(span.text(block), "");
        assert_eq!(span.char_range(block), 1..5);

        let past_end = Span::new(5, 40, Style::default());
        assert_eq!(past_end.char_range(block), 4..7);
    }
}
