//! Configuration file support
//!
//! Loads settings from ~/.styledown-decor.toml (or
//! %USERPROFILE%\.styledown-decor.toml on Windows)
//!
//! Example:
//! ```toml
//! [theme]
//! foreground = "white"
//! background = "black"
//! cursor-border = "yellow"
//!
//! [languages]
//! styledown = "plain"
//! elvish-transcript = "transcript"
//!
//! [extensions]
//! elvts = "transcript"
//! ```
//!
//! Tables are merged over the defaults, so a file only needs the keys it
//! changes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::document::DocumentKind;
use crate::error::Result;
use crate::style::{Color, Theme};

const CONFIG_FILE: &str = ".styledown-decor.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Colors used for `inverse` defaults and the transcript cursor
    pub theme: Theme,
    /// Language id -> document kind
    pub languages: HashMap<String, DocumentKind>,
    /// File extension (without the dot, lowercase) -> document kind
    pub extensions: HashMap<String, DocumentKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            languages: kind_map(&[
                ("styledown", DocumentKind::Plain),
                ("elvish-transcript", DocumentKind::Transcript),
            ]),
            extensions: kind_map(&[
                ("styledown", DocumentKind::Plain),
                ("elvts", DocumentKind::Transcript),
            ]),
        }
    }
}

/// On-disk layout; every table is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    theme: ThemeFile,
    languages: HashMap<String, DocumentKind>,
    extensions: HashMap<String, DocumentKind>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct ThemeFile {
    foreground: Option<String>,
    background: Option<String>,
    cursor_border: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from the default path, falling back to the
    /// defaults when the file is missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents and merge them over the defaults
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        let mut config = Config::default();
        config.apply(file);
        Ok(config)
    }

    /// Apply settings from a parsed file
    fn apply(&mut self, file: ConfigFile) {
        if let Some(fg) = file.theme.foreground {
            self.theme.foreground = Color::new(fg);
        }
        if let Some(bg) = file.theme.background {
            self.theme.background = Color::new(bg);
        }
        if let Some(border) = file.theme.cursor_border {
            self.theme.cursor_border = Color::new(border);
        }
        self.languages.extend(file.languages);
        self.extensions.extend(
            file.extensions
                .into_iter()
                .map(|(ext, kind)| (normalize_extension(&ext), kind)),
        );
    }

    /// Document kind for an editor language id
    pub fn kind_for_language(&self, language_id: &str) -> Option<DocumentKind> {
        self.languages.get(language_id).copied()
    }

    /// Document kind for a file, by extension
    pub fn kind_for_path(&self, path: &Path) -> Option<DocumentKind> {
        let ext = path.extension()?.to_str()?;
        self.extensions.get(&normalize_extension(ext)).copied()
    }
}

fn kind_map(pairs: &[(&str, DocumentKind)]) -> HashMap<String, DocumentKind> {
    pairs
        .iter()
        .map(|&(name, kind)| (name.to_string(), kind))
        .collect()
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}
