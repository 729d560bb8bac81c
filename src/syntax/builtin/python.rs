//! Python language definition

use crate::error::Result;
use crate::syntax::builtin::BuiltinOptions;
use crate::syntax::highlighter::RuleTableBuilder;
use crate::syntax::language::Language;

/// Python's reserved words
pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Create Python language definition
pub fn python_language(options: &BuiltinOptions) -> Result<Language> {
    let table = RuleTableBuilder::new()
        .keywords(KEYWORDS.iter().copied())
        .quotes(&['"', '\''])
        .line_comment("#")
        .function_keyword("def")
        .class_keyword("class")
        .theme(options.theme)
        .definition_style(options.definition_style)
        .string_termination(options.string_termination)
        .build()?;

    Ok(Language::new("Python", &["py", "pyw", "pyi"], table))
}
