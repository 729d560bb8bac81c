//! Language definitions for syntax highlighting
//!
//! A `Language` names a rule table and the file extensions it applies to.
//! The table is shared: every document of the language gets its own
//! `Highlighter` over the same immutable rules.

use std::sync::Arc;

use super::highlighter::{Highlighter, RuleTable};

/// A complete language definition for syntax highlighting
#[derive(Debug, Clone)]
pub struct Language {
    /// Language name (e.g., "Python")
    pub name: String,
    /// File extensions without the dot (e.g., ["py", "pyw"])
    pub extensions: Vec<String>,
    table: Arc<RuleTable>,
}

impl Language {
    pub fn new(name: &str, extensions: &[&str], table: RuleTable) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            table: Arc::new(table),
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// A highlighter bound to this language's rule table
    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(Arc::clone(&self.table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::highlighter::RuleTableBuilder;

    #[test]
    fn test_highlighters_share_table() {
        let table = RuleTableBuilder::new().keywords(["let"]).build().unwrap();
        let mut lang = Language::new("Test", &["t"], table);
        lang.add_extension("tst");

        let a = lang.highlighter();
        let b = lang.highlighter();
        assert!(std::ptr::eq(a.table(), b.table()));
        assert_eq!(a.highlight("let x"), b.highlight("let x"));
        assert_eq!(lang.extensions, vec!["t", "tst"]);
    }
}
