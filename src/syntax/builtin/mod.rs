//! Built-in language definitions

pub mod python;

use super::highlighter::{DefinitionStyle, StringTermination};
use super::language::Language;
use super::tokens::Theme;
use crate::error::Result;

/// Options shared by every built-in rule table
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinOptions {
    pub theme: Theme,
    pub definition_style: DefinitionStyle,
    pub string_termination: StringTermination,
}

/// Get all built-in language definitions
pub fn all_languages(options: &BuiltinOptions) -> Result<Vec<Language>> {
    Ok(vec![python::python_language(options)?])
}
