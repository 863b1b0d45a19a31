// crates/engine/src/lib.rs
use rayon::iter::Either;
use rayon::prelude::*;

pub mod cleaner;
pub mod config;
pub mod error;
pub mod policy;

use comment_cleaner_core::stats::ScanStats;

use crate::cleaner::{CleanReport, Cleaner, SourceText};
use crate::config::CleanConfig;
use crate::error::{EngineError, Result};

/// Outcome of a batch run: reports for cleaned sources plus per-source errors.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub reports: Vec<CleanReport>,
    pub errors: Vec<(String, EngineError)>,
}

impl BatchResult {
    /// Statistics summed over every report.
    #[must_use]
    pub fn stats(&self) -> ScanStats {
        self.reports.iter().map(|report| &report.stats).collect()
    }

    #[must_use]
    pub fn original_size(&self) -> usize {
        self.reports.iter().map(|report| report.original_size).sum()
    }

    #[must_use]
    pub fn cleaned_size(&self) -> usize {
        self.reports.iter().map(|report| report.cleaned_size).sum()
    }

    #[must_use]
    pub fn comments_removed(&self) -> usize {
        self.reports.iter().map(|report| report.comments_removed).sum()
    }
}

impl Cleaner {
    /// Cleans every source in parallel. Reports keep the input order.
    ///
    /// # Errors
    ///
    /// In strict mode, the first source that fails aborts the batch. Otherwise
    /// per-source failures are collected in [`BatchResult::errors`] and this
    /// never fails.
    pub fn clean_batch(&self, sources: &[SourceText]) -> Result<BatchResult> {
        if self.config().strict {
            // Strict mode: fail on first error
            let reports = sources
                .par_iter()
                .map(|source| self.clean(source))
                .collect::<Result<Vec<_>>>()?;
            return Ok(BatchResult {
                reports,
                errors: Vec::new(),
            });
        }

        let (reports, errors): (Vec<_>, Vec<_>) =
            sources
                .par_iter()
                .partition_map(|source| match self.clean(source) {
                    Ok(report) => Either::Left(report),
                    Err(e) => Either::Right((source.name.clone(), e)),
                });

        if !errors.is_empty() {
            log::warn!("{} of {} sources failed", errors.len(), sources.len());
        }
        Ok(BatchResult { reports, errors })
    }
}

/// Run the cleaning engine over in-memory sources.
///
/// # Errors
///
/// Fails when `config` is invalid, or in strict mode on the first failing
/// source.
pub fn run(config: CleanConfig, sources: &[SourceText]) -> Result<BatchResult> {
    Cleaner::new(config)?.clean_batch(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CleanConfigBuilder;

    fn sources() -> Vec<SourceText> {
        vec![
            SourceText::new("a.c", "int a; // a\n"),
            SourceText::new("b.txt", "plain\n"),
            SourceText::new("c.py", "c = 1  # c\n"),
            SourceText::new("d.rs", "/* outer /* inner */ still */ fn d() {}\n"),
        ]
    }

    #[test]
    fn test_batch_collects_errors() {
        let result = run(CleanConfig::default(), &sources()).unwrap();
        assert_eq!(result.reports.len(), 3);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].0, "b.txt");

        let names: Vec<&str> = result.reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a.c", "c.py", "d.rs"]);
        assert_eq!(result.reports[2].content, " fn d() {}\n");
        assert_eq!(result.comments_removed(), 3);
        assert_eq!(result.stats().comments(), 3);
        assert!(result.cleaned_size() < result.original_size());
    }

    #[test]
    fn test_batch_strict_fails_fast() {
        let config = CleanConfigBuilder::default().strict(true).build().unwrap();
        assert!(matches!(
            run(config, &sources()),
            Err(EngineError::UnknownExtension { .. })
        ));
    }

    #[test]
    fn test_batch_force() {
        let config = CleanConfigBuilder::default().force(true).build().unwrap();
        let result = run(config, &sources()).unwrap();
        assert!(result.errors.is_empty());
        assert_eq!(result.reports[1].content, "plain\n");
    }

    #[test]
    fn test_empty_batch() {
        let result = run(CleanConfig::default(), &[]).unwrap();
        assert!(result.reports.is_empty());
        assert_eq!(result.stats(), ScanStats::default());
    }
}
