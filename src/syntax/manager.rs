//! Syntax highlighting manager
//!
//! The manager owns the known languages and hands out a highlighter for
//! each document based on its file name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::builtin::{self, BuiltinOptions};
use super::highlighter::Highlighter;
use super::language::Language;
use super::language_file;
use crate::config::Config;
use crate::error::{KingpadError, Result};

/// Main syntax highlighting manager
pub struct SyntaxManager {
    /// Loaded language definitions
    languages: HashMap<String, Language>,
    /// Extension to language name mapping
    extension_map: HashMap<String, String>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a manager with no languages
    pub fn empty() -> Self {
        Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
            enabled: true,
        }
    }

    /// Create a manager with the built-in languages
    pub fn new(options: &BuiltinOptions) -> Result<Self> {
        let mut manager = Self::empty();
        for lang in builtin::all_languages(options)? {
            manager.add_language(lang);
        }
        Ok(manager)
    }

    /// Create a manager from configuration: built-ins, then user languages
    ///
    /// Returns the user language files that failed to load, for reporting.
    pub fn from_config(config: &Config) -> Result<(Self, Vec<(PathBuf, KingpadError)>)> {
        let options = config.builtin_options();
        let mut manager = Self::new(&options)?;
        manager.enabled = config.highlighting;

        let mut failures = Vec::new();
        if let Some(dir) = config.language_dir() {
            let (languages, errors) = language_file::load_language_dir(&dir, &options);
            for lang in languages {
                manager.add_language(lang);
            }
            failures = errors;
        }
        Ok((manager, failures))
    }

    /// Add a language definition, replacing any language of the same name
    pub fn add_language(&mut self, lang: Language) {
        let name = lang.name.clone();
        self.extension_map.retain(|_, owner| *owner != name);
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        self.languages.insert(name, lang);
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// Get a language definition by name
    pub fn language(&self, name: &str) -> Option<&Language> {
        self.languages.get(name)
    }

    /// A highlighter for a document at `filename`
    ///
    /// None when highlighting is off or the file type is unknown.
    pub fn highlighter_for(&self, filename: &Path) -> Option<Highlighter> {
        if !self.enabled {
            return None;
        }
        let name = self.detect_language(filename)?;
        self.languages.get(name).map(Language::highlighter)
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::empty()
    }
}
