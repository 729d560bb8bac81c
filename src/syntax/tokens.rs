//! Token types for syntax highlighting
//!
//! Each rule in a rule table is tagged with the kind of token it
//! recognizes; the token type picks the rule's style from a `Theme`.

use super::style::{Color, Style};

/// Semantic token types recognized by the highlighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Reserved words (if, else, def, ...)
    Keyword,
    /// String literals ("..." or '...')
    String,
    /// Line comments
    Comment,
    /// Function or class definitions (`def name`, `class Name`)
    Definition,
}

impl TokenType {
    /// All token types, in rule-table order
    pub const ALL: [TokenType; 4] = [
        TokenType::Keyword,
        TokenType::String,
        TokenType::Comment,
        TokenType::Definition,
    ];

    /// Get the default style for this token type
    pub fn default_style(&self) -> Style {
        match self {
            TokenType::Keyword => Style::fg(Color::Blue).with_bold(),
            TokenType::String => Style::fg(Color::Green),
            TokenType::Comment => Style::fg(Color::BrightBlack).with_italic(),
            TokenType::Definition => Style::fg(Color::Magenta).with_bold(),
        }
    }

    /// Get a human-readable name for this token type
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Keyword => "keyword",
            TokenType::String => "string",
            TokenType::Comment => "comment",
            TokenType::Definition => "definition",
        }
    }

    /// Parse a token type from its name (for config loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "keyword" => Some(TokenType::Keyword),
            "string" => Some(TokenType::String),
            "comment" => Some(TokenType::Comment),
            "definition" => Some(TokenType::Definition),
            _ => None,
        }
    }
}

/// Styles for each token type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub keyword: Style,
    pub string: Style,
    pub comment: Style,
    pub definition: Style,
}

impl Theme {
    /// Style used for a token type
    pub fn style(&self, token_type: TokenType) -> Style {
        match token_type {
            TokenType::Keyword => self.keyword,
            TokenType::String => self.string,
            TokenType::Comment => self.comment,
            TokenType::Definition => self.definition,
        }
    }

    /// Replace the foreground color of one token type, keeping its weight
    pub fn set_color(&mut self, token_type: TokenType, color: Color) {
        let slot = match token_type {
            TokenType::Keyword => &mut self.keyword,
            TokenType::String => &mut self.string,
            TokenType::Comment => &mut self.comment,
            TokenType::Definition => &mut self.definition,
        };
        slot.fg = color;
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            keyword: TokenType::Keyword.default_style(),
            string: TokenType::String.default_style(),
            comment: TokenType::Comment.default_style(),
            definition: TokenType::Definition.default_style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_distinct() {
        let styles: Vec<Style> = TokenType::ALL.iter().map(|t| t.default_style()).collect();
        for (i, a) in styles.iter().enumerate() {
            assert!(!a.is_default());
            for b in &styles[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(TokenType::Keyword.default_style().bold);
        assert!(TokenType::Definition.default_style().bold);
        assert!(!TokenType::String.default_style().bold);
    }

    #[test]
    fn test_from_name() {
        for token_type in TokenType::ALL {
            assert_eq!(TokenType::from_name(token_type.name()), Some(token_type));
        }
        assert_eq!(TokenType::from_name("Comment"), Some(TokenType::Comment));
        assert_eq!(TokenType::from_name("number"), None);
        assert_eq!(TokenType::from_name(""), None);
    }

    #[test]
    fn test_theme_set_color_keeps_weight() {
        let mut theme = Theme::default();
        theme.set_color(TokenType::Keyword, Color::Rgb(0, 0, 128));
        assert_eq!(theme.keyword.fg, Color::Rgb(0, 0, 128));
        assert!(theme.keyword.bold);
        assert_eq!(theme.style(TokenType::String), TokenType::String.default_style());
    }
}
