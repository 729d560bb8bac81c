//! User language definitions loaded from TOML
//!
//! Each `*.toml` file in the language directory describes one language:
//!
//! ```toml
//! name = "Ruby"
//! extensions = ["rb"]
//! keywords = ["def", "class", "if", "else", "end"]
//! quotes = ["\"", "'"]
//! line-comment = "#"
//! function-keyword = "def"
//! class-keyword = "class"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::builtin::BuiltinOptions;
use super::highlighter::RuleTableBuilder;
use super::language::Language;
use crate::error::{KingpadError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LanguageFile {
    pub name: Option<String>,
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<String>,
    pub line_comment: Option<String>,
    pub function_keyword: Option<String>,
    pub class_keyword: Option<String>,
}

impl LanguageFile {
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Compile into a language; `fallback_name` is used when the file has no name
    pub fn into_language(self, fallback_name: &str, options: &BuiltinOptions) -> Result<Language> {
        let mut quotes = Vec::new();
        for quote in &self.quotes {
            let mut chars = quote.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => quotes.push(c),
                _ => {
                    return Err(KingpadError::Message(format!(
                        "quote must be a single character: {:?}",
                        quote
                    )))
                }
            }
        }

        let mut builder = RuleTableBuilder::new()
            .keywords(self.keywords)
            .quotes(&quotes)
            .theme(options.theme)
            .definition_style(options.definition_style)
            .string_termination(options.string_termination);
        if let Some(marker) = &self.line_comment {
            builder = builder.line_comment(marker);
        }
        if let Some(keyword) = &self.function_keyword {
            builder = builder.function_keyword(keyword);
        }
        if let Some(keyword) = &self.class_keyword {
            builder = builder.class_keyword(keyword);
        }

        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        let extensions = self
            .extensions
            .unwrap_or_else(|| vec![fallback_name.to_lowercase()]);
        let ext_refs: Vec<&str> = extensions.iter().map(String::as_str).collect();
        Ok(Language::new(&name, &ext_refs, builder.build()?))
    }
}

/// Load one language file
pub fn load_language_file(path: &Path, options: &BuiltinOptions) -> Result<Language> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => KingpadError::FileNotFound(path.display().to_string()),
        _ => KingpadError::Io(e),
    })?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    LanguageFile::parse(&contents)?.into_language(stem, options)
}

/// Load every `*.toml` language file in `dir`, sorted by file name
///
/// A missing directory yields no languages. Any other failure to read the
/// directory or one of its entries, and every file that fails to load, is
/// returned alongside its path so the caller can report it.
pub fn load_language_dir(
    dir: &Path,
    options: &BuiltinOptions,
) -> (Vec<Language>, Vec<(PathBuf, KingpadError)>) {
    let mut languages = Vec::new();
    let mut failures = Vec::new();

    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return (languages, failures),
        Err(e) => {
            failures.push((dir.to_path_buf(), e.into()));
            return (languages, failures);
        }
    };

    let mut paths = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => failures.push((dir.to_path_buf(), e.into())),
        }
    }
    paths.retain(|path| path.extension().and_then(|ext| ext.to_str()) == Some("toml"));
    paths.sort();

    for path in paths {
        match load_language_file(&path, options) {
            Ok(lang) => languages.push(lang),
            Err(e) => failures.push((path, e)),
        }
    }

    (languages, failures)
}

/// Default language directory: ~/.config/kingpad/languages
pub fn default_language_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join("kingpad").join("languages"))
    }

    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join("kingpad").join("languages"))
    }
}
