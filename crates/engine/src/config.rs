use std::str::FromStr;

use comment_cleaner_core::StripOptions;
use comment_cleaner_core::language::Language;
use derive_builder::Builder;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// ソースごとのクリーニング設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(default)]
pub struct CleanConfig {
    #[builder(default)]
    pub strip: StripOptions,
    /// Regexes searched in each comment's text; a match keeps the comment.
    #[builder(default)]
    pub preserve_patterns: Vec<String>,
    /// Extension remapping, e.g. `"h" -> "cpp"`. The target may be another
    /// extension or a language name.
    #[builder(default)]
    pub map_ext: HashMap<String, String>,
    /// Forces one language for every source, ignoring extensions.
    #[builder(default)]
    pub language: Option<Language>,
    /// Pass sources with an unknown extension through unchanged instead of
    /// failing.
    #[builder(default)]
    pub force: bool,
    /// Fail on unterminated comments or strings.
    #[builder(default)]
    pub strict: bool,
}

impl CleanConfig {
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] when `json` is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns [`EngineError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every `map_ext` target names a known language or extension.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidExtMapping`] for the first bad target.
    pub fn validate(&self) -> Result<()> {
        for (ext, target) in &self.map_ext {
            if resolve_name(target).is_none() {
                return Err(EngineError::InvalidExtMapping(format!("{ext}={target}")));
            }
        }
        Ok(())
    }

    /// 拡張子から言語を解決 (`language` > `map_ext` > 組み込みテーブル)
    #[must_use]
    pub fn resolve_language(&self, extension: &str) -> Option<Language> {
        if let Some(language) = self.language {
            return Some(language);
        }
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match self.map_ext.get(&ext) {
            Some(target) => resolve_name(target),
            None => Language::from_extension(&ext),
        }
    }
}

fn resolve_name(target: &str) -> Option<Language> {
    Language::from_str(target)
        .ok()
        .or_else(|| Language::from_extension(target))
}
