//! Rule tables and the block highlighter
//!
//! A `RuleTable` is an ordered, immutable list of rules. A `Highlighter`
//! shares one table and scans one block at a time: every rule is run over
//! the whole block, in table order, and each match becomes a span. Spans
//! are applied destructively, so where two spans overlap the later one
//! wins. There is no state carried between blocks.

use std::sync::Arc;

use regex::escape;
use serde::{Deserialize, Serialize};

use super::rules::Rule;
use super::style::{Span, Style};
use super::tokens::{Theme, TokenType};
use crate::error::Result;

/// How much of a definition match is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefinitionStyle {
    /// Style the keyword and the name (`def foo`)
    #[default]
    WholeMatch,
    /// Style only the defined name (`foo`)
    NameOnly,
}

/// What happens to a string literal with no closing quote in the block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringTermination {
    /// An unterminated string is not highlighted
    #[default]
    Closed,
    /// An unterminated string is highlighted to the end of the block
    EndOfBlock,
}

/// An ordered, immutable set of highlighting rules
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create a table from rules in application order
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builds a rule table in the standard order:
/// keywords, strings, comments, then definitions.
#[derive(Debug, Clone, Default)]
pub struct RuleTableBuilder {
    keywords: Vec<String>,
    quotes: Vec<char>,
    line_comment: Option<String>,
    function_keyword: Option<String>,
    class_keyword: Option<String>,
    theme: Theme,
    definition_style: DefinitionStyle,
    string_termination: StringTermination,
}

impl RuleTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Quote characters that open and close a string literal
    pub fn quotes(mut self, quotes: &[char]) -> Self {
        self.quotes.extend_from_slice(quotes);
        self
    }

    pub fn line_comment(mut self, marker: &str) -> Self {
        self.line_comment = Some(marker.to_string());
        self
    }

    pub fn function_keyword(mut self, keyword: &str) -> Self {
        self.function_keyword = Some(keyword.to_string());
        self
    }

    pub fn class_keyword(mut self, keyword: &str) -> Self {
        self.class_keyword = Some(keyword.to_string());
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn definition_style(mut self, style: DefinitionStyle) -> Self {
        self.definition_style = style;
        self
    }

    pub fn string_termination(mut self, termination: StringTermination) -> Self {
        self.string_termination = termination;
        self
    }

    /// Compile the rules
    pub fn build(self) -> Result<RuleTable> {
        let mut rules = Vec::new();

        // One rule per keyword so each is matched as a whole word
        let keyword_style = self.theme.style(TokenType::Keyword);
        for keyword in self.keywords.iter().filter(|k| !k.is_empty()) {
            let pattern = keyword_pattern(keyword);
            rules.push(Rule::new(keyword, &pattern, TokenType::Keyword, keyword_style)?);
        }

        let string_style = self.theme.style(TokenType::String);
        for &quote in &self.quotes {
            let pattern = string_pattern(quote, self.string_termination);
            let name = format!("string {}", quote);
            rules.push(Rule::new(&name, &pattern, TokenType::String, string_style)?);
        }

        if let Some(marker) = self.line_comment.as_deref().filter(|m| !m.is_empty()) {
            let pattern = format!("{}.*", escape(marker));
            rules.push(Rule::new(
                "comment",
                &pattern,
                TokenType::Comment,
                self.theme.style(TokenType::Comment),
            )?);
        }

        let definition_style = self.theme.style(TokenType::Definition);
        let definitions = [
            ("function definition", &self.function_keyword),
            ("class definition", &self.class_keyword),
        ];
        for (name, keyword) in definitions {
            let Some(keyword) = keyword.as_deref().filter(|k| !k.is_empty()) else {
                continue;
            };
            let pattern = format!(r"\b{}\b\s*(\w+)", escape(keyword));
            let mut rule = Rule::new(name, &pattern, TokenType::Definition, definition_style)?;
            if self.definition_style == DefinitionStyle::NameOnly {
                rule = rule.with_capture_group(1);
            }
            rules.push(rule);
        }

        Ok(RuleTable::new(rules))
    }
}

/// Regex for a keyword as a whole word
///
/// `\b` only holds next to a word character, so an edge that is punctuation
/// (`#define`, `defined?`, `@end`) gets no boundary on that side.
fn keyword_pattern(keyword: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let boundary = |c: Option<char>| if c.is_some_and(is_word) { r"\b" } else { "" };
    format!(
        "{}{}{}",
        boundary(keyword.chars().next()),
        escape(keyword),
        boundary(keyword.chars().next_back())
    )
}

/// Regex for a string literal delimited by `quote`, allowing backslash escapes
fn string_pattern(quote: char, termination: StringTermination) -> String {
    let q = escape(&quote.to_string());
    let body = format!(r"(?:[^{q}\\]|\\.)*");
    match termination {
        StringTermination::Closed => format!("{q}{body}{q}"),
        // A trailing lone backslash still runs to the end of the block
        StringTermination::EndOfBlock => format!(r"{q}{body}(?:{q}|\\?$)"),
    }
}

/// Highlights blocks of text against a shared rule table
#[derive(Debug, Clone)]
pub struct Highlighter {
    table: Arc<RuleTable>,
}

impl Highlighter {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Annotate one block
    ///
    /// Spans come back in application order: rule by rule, and left to
    /// right within a rule. Applying them in this order reproduces the
    /// block's final styling.
    pub fn highlight(&self, block: &str) -> Vec<Span> {
        self.table
            .rules()
            .iter()
            .flat_map(|rule| rule.spans(block))
            .collect()
    }

    /// Annotate one block and resolve the overlaps
    pub fn format_block(&self, block: &str) -> BlockFormat {
        let mut format = BlockFormat::new(block.len());
        for span in self.highlight(block) {
            format.apply(&span);
        }
        format
    }
}

/// The display state of one block: a style per byte, last write wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFormat {
    styles: Vec<Option<Style>>,
}

impl BlockFormat {
    /// An unstyled block of `len` bytes
    pub fn new(len: usize) -> Self {
        Self {
            styles: vec![None; len],
        }
    }

    /// Paint `span` over the block, replacing whatever was there
    pub fn apply(&mut self, span: &Span) {
        let end = span.end.min(self.styles.len());
        if span.start >= end {
            return;
        }
        for slot in &mut self.styles[span.start..end] {
            *slot = Some(span.style);
        }
    }

    /// Style at a byte offset, if any
    pub fn style_at(&self, offset: usize) -> Option<Style> {
        self.styles.get(offset).copied().flatten()
    }

    /// Maximal runs of equal style in offset order; unstyled bytes are omitted
    pub fn runs(&self) -> Vec<Span> {
        let mut runs: Vec<Span> = Vec::new();
        for (offset, style) in self.styles.iter().enumerate() {
            let Some(style) = style else { continue };
            match runs.last_mut() {
                Some(last) if last.end == offset && last.style == *style => last.end += 1,
                _ => runs.push(Span::new(offset, offset + 1, *style)),
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Color;
    use pretty_assertions::assert_eq;

    fn table() -> Arc<RuleTable> {
        let table = RuleTableBuilder::new()
            .keywords(["if", "else", "True"])
            .quotes(&['"', '\''])
            .line_comment("#")
            .function_keyword("def")
            .class_keyword("class")
            .build()
            .unwrap();
        Arc::new(table)
    }

    fn spans_of(
        highlighter: &Highlighter,
        block: &str,
        token_type: TokenType,
    ) -> Vec<(usize, usize)> {
        let style = Theme::default().style(token_type);
        highlighter
            .highlight(block)
            .into_iter()
            .filter(|s| s.style == style)
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn test_rule_order() {
        let table = table();
        let names: Vec<&str> = table.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "if",
                "else",
                "True",
                "string \"",
                "string '",
                "comment",
                "function definition",
                "class definition",
            ]
        );
    }

    #[test]
    fn test_empty_block() {
        let highlighter = Highlighter::new(table());
        assert!(highlighter.highlight("").is_empty());
        assert!(highlighter.format_block("").runs().is_empty());
    }

    #[test]
    fn test_whole_word_keywords() {
        let table = table();
        let highlighter = Highlighter::new(table.clone());
        let block = "ifx = 1 if True else 0";
        let if_rule = &table.rules()[0];
        assert_eq!(if_rule.find_ranges(block), vec![(8, 10)]);
        assert_eq!(
            spans_of(&highlighter, block, TokenType::Keyword),
            vec![(8, 10), (16, 20), (11, 15)]
        );
    }

    #[test]
    fn test_punctuated_keywords() {
        let table = RuleTableBuilder::new()
            .keywords(["#define", "defined?", "@end"])
            .build()
            .unwrap();
        let highlighter = Highlighter::new(Arc::new(table));

        assert_eq!(spans_of(&highlighter, "#define X 1", TokenType::Keyword), vec![(0, 7)]);
        assert_eq!(spans_of(&highlighter, "defined? x", TokenType::Keyword), vec![(0, 8)]);
        assert_eq!(spans_of(&highlighter, "@end", TokenType::Keyword), vec![(0, 4)]);
        assert_eq!(spans_of(&highlighter, "  @end;", TokenType::Keyword), vec![(2, 6)]);

        // The word edge of each keyword is still a whole-word boundary
        assert!(spans_of(&highlighter, "#defines", TokenType::Keyword).is_empty());
        assert!(spans_of(&highlighter, "undefined? x", TokenType::Keyword).is_empty());
        assert!(spans_of(&highlighter, "@endx", TokenType::Keyword).is_empty());
    }

    #[test]
    fn test_escaped_quote() {
        let highlighter = Highlighter::new(table());
        let block = r#"s = "a\"b""#;
        assert_eq!(spans_of(&highlighter, block, TokenType::String), vec![(4, 10)]);
    }

    #[test]
    fn test_single_quoted_string() {
        let highlighter = Highlighter::new(table());
        let block = r"x = 'it\'s' + 'b'";
        assert_eq!(
            spans_of(&highlighter, block, TokenType::String),
            vec![(4, 11), (14, 17)]
        );
    }

    #[test]
    fn test_unterminated_string_closed() {
        let highlighter = Highlighter::new(table());
        assert!(spans_of(&highlighter, r#"x = "abc"#, TokenType::String).is_empty());
    }

    #[test]
    fn test_unterminated_string_end_of_block() {
        let table = RuleTableBuilder::new()
            .quotes(&['"'])
            .string_termination(StringTermination::EndOfBlock)
            .build()
            .unwrap();
        let highlighter = Highlighter::new(Arc::new(table));
        let spans = |block: &str| -> Vec<(usize, usize)> {
            highlighter.highlight(block).iter().map(|s| (s.start, s.end)).collect()
        };
        assert_eq!(spans(r#"x = "abc"#), vec![(4, 8)]);
        assert_eq!(spans(r#"x = "ab\"#), vec![(4, 8)]);
        assert_eq!(spans(r#"x = "a" + "b"#), vec![(4, 7), (10, 12)]);
    }

    #[test]
    fn test_comment_overrides_string() {
        let highlighter = Highlighter::new(table());
        let block = r#"x = 1 # comment "with quote""#;
        let theme = Theme::default();

        // The string rule still fires, but the comment rule comes later
        assert_eq!(spans_of(&highlighter, block, TokenType::String), vec![(16, 28)]);

        let runs = highlighter.format_block(block).runs();
        assert_eq!(runs, vec![Span::new(6, block.len(), theme.comment)]);
    }

    #[test]
    fn test_definitions() {
        let highlighter = Highlighter::new(table());
        assert_eq!(
            spans_of(&highlighter, "def foo(x):", TokenType::Definition),
            vec![(0, 7)]
        );
        assert_eq!(
            spans_of(&highlighter, "class Bar:", TokenType::Definition),
            vec![(0, 9)]
        );
    }

    #[test]
    fn test_definitions_name_only() {
        let table = RuleTableBuilder::new()
            .function_keyword("def")
            .class_keyword("class")
            .definition_style(DefinitionStyle::NameOnly)
            .build()
            .unwrap();
        let highlighter = Highlighter::new(Arc::new(table));
        let ranges: Vec<(usize, usize)> = highlighter
            .highlight("class Bar: def foo(x):")
            .iter()
            .map(|s| (s.start, s.end))
            .collect();
        assert_eq!(ranges, vec![(15, 18), (6, 9)]);
    }

    #[test]
    fn test_later_rule_wins_without_merging() {
        let bold_red = Style::fg(Color::Red).with_bold();
        let blue = Style::fg(Color::Blue);
        let table = RuleTable::new(vec![
            Rule::new("first", r"abcd", TokenType::Keyword, bold_red).unwrap(),
            Rule::new("second", r"cdef", TokenType::String, blue).unwrap(),
        ]);
        let highlighter = Highlighter::new(Arc::new(table));
        let format = highlighter.format_block("abcdef");

        assert_eq!(
            format.runs(),
            vec![Span::new(0, 2, bold_red), Span::new(2, 6, blue)]
        );
        assert_eq!(format.style_at(2), Some(blue));
        assert!(!format.style_at(3).unwrap().bold);
        assert_eq!(format.style_at(6), None);
    }

    #[test]
    fn test_idempotent() {
        let highlighter = Highlighter::new(table());
        let block = r#"def f(): return "x" if y else 'z'  # done"#;
        assert_eq!(highlighter.highlight(block), highlighter.highlight(block));
        assert_eq!(highlighter.format_block(block), highlighter.format_block(block));
    }

    #[test]
    fn test_malformed_input() {
        let highlighter = Highlighter::new(table());
        for block in ["\"", "'", "\\", "((((", "\"\\", "# ", "é\"ü", "def", "class  "] {
            let format = highlighter.format_block(block);
            for run in format.runs() {
                assert!(block.is_char_boundary(run.start));
                assert!(block.is_char_boundary(run.end));
            }
        }
    }

    #[test]
    fn test_block_format_apply_clamps() {
        let mut format = BlockFormat::new(3);
        format.apply(&Span::new(1, 10, Style::fg(Color::Red)));
        format.apply(&Span::new(5, 8, Style::fg(Color::Blue)));
        assert_eq!(format.runs(), vec![Span::new(1, 3, Style::fg(Color::Red))]);
    }
}
