//! Slice rule engine.
//!
//! Runs the analyzer's rules over every import of a [`FileAnalysis`],
//! producing located [`Violation`]s.

use fsd_lint_core::{Analyzer, ImportEdge, Location, Violation};
use std::path::Path;
use tracing::debug;

use crate::extractor::{ExtractError, FileAnalysis, LanguageExtractor};
use crate::typescript::TypeScriptExtractor;

/// Evaluates import rules against extracted file analysis.
pub struct SliceRuleEngine {
    analyzer: Analyzer,
    extractors: Vec<Box<dyn LanguageExtractor>>,
}

impl SliceRuleEngine {
    /// Create a new engine with the TypeScript and TSX extractors.
    #[must_use]
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            extractors: TypeScriptExtractor::all(),
        }
    }

    /// The underlying analyzer.
    #[must_use]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Registered extractors.
    #[must_use]
    pub fn extractors(&self) -> &[Box<dyn LanguageExtractor>] {
        &self.extractors
    }

    /// Every extension handled by a registered extractor.
    #[must_use]
    pub fn extensions(&self) -> Vec<&'static str> {
        self.extractors
            .iter()
            .flat_map(|e| e.extensions().iter().copied())
            .collect()
    }

    /// Extractor responsible for `path`, if any.
    #[must_use]
    pub fn extractor_for(&self, path: &Path) -> Option<&dyn LanguageExtractor> {
        self.extractors
            .iter()
            .find(|e| e.handles(path))
            .map(|e| &**e)
    }

    /// Check a single file analysis for import violations.
    #[must_use]
    pub fn check(&self, analysis: &FileAnalysis) -> Vec<Violation> {
        let mut violations = Vec::new();

        for import in &analysis.imports {
            let edge = ImportEdge::new(analysis.file_path.clone(), import.specifier.clone());
            let report = self.analyzer.check_import(&edge);
            for finding in report.findings {
                let location =
                    Location::new(analysis.file_path.clone(), import.line, import.column + 1)
                        .with_span(import.offset, import.length);
                violations.push(finding.into_violation(location, &report.slices));
            }
        }

        violations
    }

    /// Reads, extracts and checks one file. Files no extractor handles
    /// yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn check_file(&self, path: &Path) -> Result<Option<Vec<Violation>>, ExtractError> {
        let Some(extractor) = self.extractor_for(path) else {
            debug!("no extractor for {}", path.display());
            return Ok(None);
        };
        let analysis = extractor.analyze_file(path)?;
        debug!(
            "{}: {} import(s) via {}",
            path.display(),
            analysis.imports.len(),
            extractor.language_id()
        );
        Ok(Some(self.check(&analysis)))
    }
}
