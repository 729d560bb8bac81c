//! Terminal rendering of highlighted documents
//!
//! Each line is highlighted as one block, its overlaps resolved, and the
//! styled runs written with crossterm style commands.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, Highlighter, Style};

impl From<Color> for style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Default => style::Color::Reset,
            Color::Black => style::Color::Black,
            Color::Red => style::Color::DarkRed,
            Color::Green => style::Color::DarkGreen,
            Color::Yellow => style::Color::DarkYellow,
            Color::Blue => style::Color::DarkBlue,
            Color::Magenta => style::Color::DarkMagenta,
            Color::Cyan => style::Color::DarkCyan,
            Color::White => style::Color::Grey,
            Color::BrightBlack => style::Color::DarkGrey,
            Color::BrightRed => style::Color::Red,
            Color::BrightGreen => style::Color::Green,
            Color::BrightYellow => style::Color::Yellow,
            Color::BrightBlue => style::Color::Blue,
            Color::BrightMagenta => style::Color::Magenta,
            Color::BrightCyan => style::Color::Cyan,
            Color::BrightWhite => style::Color::White,
            Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
        }
    }
}

/// Display settings for rendering
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Emit color and weight (false = plain text)
    pub color: bool,
    /// Prefix each line with its number
    pub line_numbers: bool,
    pub tab_width: usize,
    /// Maximum display columns per line, gutter included
    pub max_width: Option<usize>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            color: true,
            line_numbers: false,
            tab_width: 4,
            max_width: None,
        }
    }
}

impl Renderer {
    /// Render a whole text, one line per block
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        text: &str,
        highlighter: Option<&Highlighter>,
    ) -> Result<()> {
        let line_count = text.lines().count();
        let gutter = if self.line_numbers {
            line_count.max(1).to_string().len() + 1
        } else {
            0
        };

        for (idx, line) in text.lines().enumerate() {
            let mut cols = 0;
            if self.line_numbers {
                let number = format!("{:>width$} ", idx + 1, width = gutter - 1);
                self.write_segment(out, &number, Some(Style::fg(Color::BrightBlack)))?;
                cols = gutter;
            }
            self.render_block(out, line, highlighter, cols)?;
            queue!(out, Print("\n"))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Render one block starting at display column `start_col`
    pub fn render_block<W: Write>(
        &self,
        out: &mut W,
        block: &str,
        highlighter: Option<&Highlighter>,
        start_col: usize,
    ) -> Result<()> {
        let runs = highlighter
            .map(|h| h.format_block(block).runs())
            .unwrap_or_default();

        // Split the block at run boundaries into (text, style) segments
        let mut segments: Vec<(&str, Option<Style>)> = Vec::new();
        let mut pos = 0;
        for run in &runs {
            if run.start > pos {
                segments.push((&block[pos..run.start], None));
            }
            segments.push((&block[run.start..run.end], Some(run.style)));
            pos = run.end;
        }
        if pos < block.len() {
            segments.push((&block[pos..], None));
        }

        let mut col = start_col;
        for (text, style) in segments {
            let (shown, new_col, truncated) = self.layout(text, col, start_col);
            self.write_segment(out, &shown, style)?;
            col = new_col;
            if truncated {
                break;
            }
        }
        Ok(())
    }

    /// Expand tabs and clip to the width limit. Tab stops count from `origin`.
    /// Returns the displayable text, the column after it, and whether it was clipped.
    fn layout(&self, text: &str, start_col: usize, origin: usize) -> (String, usize, bool) {
        let mut shown = String::new();
        let mut col = start_col;
        let tab_width = self.tab_width.max(1);

        for ch in text.chars() {
            let (piece, width) = if ch == '\t' {
                let width = tab_width - (col - origin) % tab_width;
                (" ".repeat(width), width)
            } else {
                (ch.to_string(), UnicodeWidthChar::width(ch).unwrap_or(1))
            };
            if let Some(max) = self.max_width {
                if col + width > max {
                    return (shown, col, true);
                }
            }
            shown.push_str(&piece);
            col += width;
        }
        (shown, col, false)
    }

    fn write_segment<W: Write>(&self, out: &mut W, text: &str, style: Option<Style>) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        match style.filter(|s| self.color && !s.is_default()) {
            Some(style) => {
                if style.fg != Color::Default {
                    queue!(out, SetForegroundColor(style.fg.into()))?;
                }
                if style.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if style.italic {
                    queue!(out, SetAttribute(Attribute::Italic))?;
                }
                queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
            }
            None => queue!(out, Print(text))?,
        }
        Ok(())
    }
}
