//! Configuration file support
//!
//! Loads settings from ~/.kingpad.toml (or %USERPROFILE%\.kingpad.toml on Windows)
//!
//! Example:
//! ```toml
//! highlighting = true
//! line-numbers = true
//! tab-width = 4
//! definition-style = "name-only"
//! unterminated-strings = "end-of-block"
//!
//! [colors]
//! keyword = "blue"
//! comment = "#808080"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KingpadError, Result};
use crate::syntax::{BuiltinOptions, Color, DefinitionStyle, StringTermination, Theme, TokenType};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Whether syntax highlighting is enabled
    pub highlighting: bool,
    /// Whether to show line numbers
    pub line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
    pub definition_style: DefinitionStyle,
    pub unterminated_strings: StringTermination,
    /// Directory of user language files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_dir: Option<PathBuf>,
    /// Color overrides, keyed by token type name
    #[serde(skip_serializing_if = "Vec::is_empty", with = "color_table")]
    pub colors: Vec<(TokenType, Color)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlighting: true,
            line_numbers: false,
            tab_width: 4,
            definition_style: DefinitionStyle::default(),
            unterminated_strings: StringTermination::default(),
            language_dir: None,
            colors: Vec::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".kingpad.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".kingpad.toml"))
        }
    }

    /// Load configuration from the default path; a missing file gives defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from `path`; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.tab_width = config.tab_width.clamp(1, 16);
        Ok(config)
    }

    /// Save current configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = format!(
            "# Kingpad configuration\n# Generated automatically\n\n{}",
            toml::to_string(self)?
        );
        fs::write(path, contents)?;
        Ok(())
    }

    /// Save current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(KingpadError::NoFileName)?;
        self.save_to(&path)
    }

    /// Token styles with the configured color overrides applied
    pub fn theme(&self) -> Theme {
        let mut theme = Theme::default();
        for &(token_type, color) in &self.colors {
            theme.set_color(token_type, color);
        }
        theme
    }

    /// Options for building rule tables
    pub fn builtin_options(&self) -> BuiltinOptions {
        BuiltinOptions {
            theme: self.theme(),
            definition_style: self.definition_style,
            string_termination: self.unterminated_strings,
        }
    }

    /// Directory of user language files: configured, or the default
    pub fn language_dir(&self) -> Option<PathBuf> {
        self.language_dir
            .clone()
            .or_else(crate::syntax::language_file::default_language_dir)
    }
}

/// `[colors]` table: token type name -> color name or `#rrggbb`
mod color_table {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::syntax::{Color, TokenType};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(TokenType, Color)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let table = BTreeMap::<String, Color>::deserialize(deserializer)?;
        table
            .into_iter()
            .map(|(name, color)| {
                TokenType::from_name(&name)
                    .map(|token_type| (token_type, color))
                    .ok_or_else(|| D::Error::custom(format!("unknown token type: {}", name)))
            })
            .collect()
    }

    pub fn serialize<S>(colors: &[(TokenType, Color)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let table: BTreeMap<&str, String> = colors
            .iter()
            .map(|(token_type, color)| (token_type.name(), color_name(*color)))
            .collect();
        serializer.collect_map(table)
    }

    fn color_name(color: Color) -> String {
        match color {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            other => {
                // Debug names are CamelCase: BrightBlack -> bright-black
                let mut name = String::new();
                for (i, ch) in format!("{:?}", other).chars().enumerate() {
                    if ch.is_ascii_uppercase() && i > 0 {
                        name.push('-');
                    }
                    name.push(ch.to_ascii_lowercase());
                }
                name
            }
        }
    }
}
