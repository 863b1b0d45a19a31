// crates/engine/src/cleaner.rs
use std::path::Path;

use comment_cleaner_core::language::{Grammar, Language};
use comment_cleaner_core::scanner::{ScanInput, ScanOutput, ScanWarning, scan, scan_bytes};
use comment_cleaner_core::stats::ScanStats;
use comment_cleaner_core::strip::{CommentPolicy, strip_with};
use hashbrown::HashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::CleanConfig;
use crate::error::{EngineError, Result};
use crate::policy::PreservePatterns;

/// クリーニング対象のテキスト (ファイル読み込みは呼び出し側の責務)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    pub name: String,
    /// Extension without the leading dot; empty when there is none.
    pub extension: String,
    pub content: String,
}

impl SourceText {
    /// Takes the extension from `name` (`"src/main.c"` → `"c"`).
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let extension = Path::new(&name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            extension,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// 1ソース分のクリーニング結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanReport {
    pub name: String,
    /// `None` for a source passed through unchanged under `force`.
    pub language: Option<Language>,
    pub original_size: usize,
    pub cleaned_size: usize,
    pub comments_removed: usize,
    pub comments_kept: usize,
    pub stats: ScanStats,
    pub warnings: Vec<ScanWarning>,
    pub content: String,
}

impl CleanReport {
    fn passthrough(source: &SourceText) -> Self {
        Self {
            name: source.name.clone(),
            language: None,
            original_size: source.content.len(),
            cleaned_size: source.content.len(),
            comments_removed: 0,
            comments_kept: 0,
            stats: ScanStats::default(),
            warnings: Vec::new(),
            content: source.content.clone(),
        }
    }

    #[must_use]
    pub const fn bytes_removed(&self) -> usize {
        self.original_size.saturating_sub(self.cleaned_size)
    }

    /// Size reduction in percent, `0.0` for empty input.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.bytes_removed() as f64 * 100.0 / self.original_size as f64
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.bytes_removed() > 0 || self.comments_removed > 0
    }

    /// # Errors
    ///
    /// Returns [`EngineError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 設定・保持パターン・全言語の Grammar をまとめたクリーナー
///
/// Built once and shared read-only; [`Cleaner::clean_batch`] hands the same
/// instance to every rayon worker.
#[derive(Debug, Clone)]
pub struct Cleaner {
    config: CleanConfig,
    preserve: PreservePatterns,
    grammars: HashMap<Language, Grammar>,
}

impl Cleaner {
    /// # Errors
    ///
    /// Fails on a bad `map_ext` target, a preserve pattern that does not
    /// compile, or a preset grammar that does not validate.
    pub fn new(config: CleanConfig) -> Result<Self> {
        config.validate()?;
        let preserve = PreservePatterns::new(&config.preserve_patterns)?;
        let grammars = Language::ALL
            .into_iter()
            .map(|language| language.grammar().map(|grammar| (language, grammar)))
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;

        debug!(
            "cleaner ready: {} grammars, {} preserve patterns",
            grammars.len(),
            preserve.len()
        );
        Ok(Self {
            config,
            preserve,
            grammars,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &CleanConfig {
        &self.config
    }

    #[must_use]
    pub fn grammar(&self, language: Language) -> Option<&Grammar> {
        self.grammars.get(&language)
    }

    /// Resolves the language from the source's extension and cleans it.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownExtension`] unless `force` is set, and
    /// [`EngineError::Unterminated`] under `strict`.
    pub fn clean(&self, source: &SourceText) -> Result<CleanReport> {
        let Some(language) = self.config.resolve_language(&source.extension) else {
            if self.config.force {
                warn!(
                    "{}: unknown extension '{}', passing through unchanged",
                    source.name, source.extension
                );
                return Ok(CleanReport::passthrough(source));
            }
            return Err(EngineError::UnknownExtension {
                name: source.name.clone(),
                extension: source.extension.clone(),
            });
        };

        let grammar = self
            .grammar(language)
            .ok_or_else(|| EngineError::Config(format!("no grammar loaded for {language}")))?;
        let mut report = self.clean_with_grammar(&source.name, &source.content, grammar)?;
        report.language = Some(language);
        Ok(report)
    }

    /// Cleans `content` under a caller-built grammar.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unterminated`] under `strict`.
    pub fn clean_with_grammar(
        &self,
        name: &str,
        content: &str,
        grammar: &Grammar,
    ) -> Result<CleanReport> {
        let cleaned = self.clean_spans(name, scan(content, grammar), grammar)?;
        Ok(CleanReport {
            name: name.to_string(),
            language: None,
            original_size: content.len(),
            cleaned_size: cleaned.content.len(),
            comments_removed: cleaned.comments_removed,
            comments_kept: cleaned.comments_kept,
            stats: cleaned.stats,
            warnings: cleaned.warnings,
            content: cleaned.content,
        })
    }

    /// Cleans raw bytes that need not be valid UTF-8 (Latin-1 sources and
    /// the like). Invalid bytes are copied through untouched.
    ///
    /// Under `force`, an unknown extension returns `content` unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`Cleaner::clean`].
    pub fn clean_bytes(&self, name: &str, extension: &str, content: &[u8]) -> Result<Vec<u8>> {
        let Some(language) = self.config.resolve_language(extension) else {
            if self.config.force {
                warn!("{name}: unknown extension '{extension}', passing through unchanged");
                return Ok(content.to_vec());
            }
            return Err(EngineError::UnknownExtension {
                name: name.to_string(),
                extension: extension.to_string(),
            });
        };
        let grammar = self
            .grammar(language)
            .ok_or_else(|| EngineError::Config(format!("no grammar loaded for {language}")))?;
        Ok(self.clean_spans(name, scan_bytes(content, grammar), grammar)?.content)
    }

    fn clean_spans<T>(
        &self,
        name: &str,
        output: ScanOutput<'_, T>,
        grammar: &Grammar,
    ) -> Result<Cleaned<T::Buf>>
    where
        T: ?Sized + ScanInput,
        PreservePatterns: CommentPolicy<T>,
    {
        if let Some(warning) = output.warnings.first() {
            if self.config.strict {
                return Err(EngineError::Unterminated {
                    name: name.to_string(),
                    warning: *warning,
                });
            }
        }
        for warning in &output.warnings {
            warn!("{name}: {warning}");
        }

        let options = &self.config.strip;
        let content = strip_with(&output.spans, options, &self.preserve);
        let (comments_kept, comments_removed) = output
            .spans
            .iter()
            .filter(|span| span.kind.is_removable())
            .fold((0, 0), |(kept, removed), span| {
                if CommentPolicy::<T>::keep(options, span)
                    || CommentPolicy::<T>::keep(&self.preserve, span)
                {
                    (kept + 1, removed)
                } else {
                    (kept, removed + 1)
                }
            });

        debug!(
            "{name}: {} -> {} bytes, {comments_removed} comments removed ({})",
            output.spans.last().map_or(0, |span| span.end.offset),
            T::view(&content).as_raw().len(),
            grammar.name()
        );

        Ok(Cleaned {
            content,
            comments_kept,
            comments_removed,
            stats: ScanStats::from_spans(&output.spans),
            warnings: output.warnings,
        })
    }
}

/// 1ソース分の除去結果 (テキスト・バイト列共通)
struct Cleaned<B> {
    content: B,
    comments_kept: usize,
    comments_removed: usize,
    stats: ScanStats,
    warnings: Vec<ScanWarning>,
}
