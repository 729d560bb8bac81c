//! Syntax highlighting
//!
//! Highlighting is rule based: an ordered table of regex rules is run over
//! one block of text at a time and every match becomes a styled span.
//! Later rules overwrite earlier ones where their spans overlap.

mod style;
mod tokens;
mod rules;
mod highlighter;
mod language;
mod manager;
pub mod builtin;
pub mod language_file;

pub use style::{Color, Span, Style};
pub use tokens::{Theme, TokenType};
pub use rules::Rule;
pub use highlighter::{
    BlockFormat, DefinitionStyle, Highlighter, RuleTable, RuleTableBuilder, StringTermination,
};
pub use language::Language;
pub use manager::SyntaxManager;
pub use builtin::BuiltinOptions;
