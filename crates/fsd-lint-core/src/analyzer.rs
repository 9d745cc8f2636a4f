//! Per-import analyzer: classifies an edge once and runs every rule on it.

use crate::aliases::{AliasCache, AliasOptions};
use crate::classify::{relative_specifier, tree_path, SliceContext};
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::edge::ImportEdge;
use crate::rule::{Rule, RuleBox};
use crate::types::{Location, Replacement, Severity, Suggestion, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// An `ignore_imports` pattern is not a valid glob.
    #[error("Invalid ignore pattern `{pattern}`: {source}")]
    Glob {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    alias_options: AliasOptions,
    ignore_imports: Vec<String>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source tree root. File paths are classified relative to it.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Adds an explicit alias prefix. Any explicit alias disables
    /// configuration-document resolution.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias_options.aliases.push(alias.into());
        self
    }

    /// Reads aliases from this document instead of searching upward.
    #[must_use]
    pub fn tsconfig(mut self, path: impl Into<PathBuf>) -> Self {
        self.alias_options.config_path = Some(path.into());
        self
    }

    /// Adds a glob of import targets to skip.
    #[must_use]
    pub fn ignore_import(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_imports.push(pattern.into());
        self
    }

    /// Applies the `[analyzer]` root and `[resolve]` settings of a config.
    /// Values already set on the builder are kept.
    #[must_use]
    pub fn config(mut self, config: &Config) -> Self {
        if self.root.is_none() {
            self.root = Some(config.analyzer.root.clone());
        }
        let options = config.resolve.alias_options();
        self.alias_options.aliases.extend(options.aliases);
        if self.alias_options.config_path.is_none() {
            self.alias_options.config_path = options.config_path;
        }
        self.ignore_imports
            .extend(config.resolve.ignore_imports.iter().cloned());
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if an ignore pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let ignore = self
            .ignore_imports
            .into_iter()
            .map(|pattern| {
                glob::Pattern::new(&pattern).map_err(|source| AnalyzerError::Glob { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root: self.root,
            rules: self.rules,
            aliases: AliasCache::new(self.alias_options),
            ignore,
        })
    }
}

/// One rule's diagnostic for an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Rule code.
    pub code: &'static str,
    /// Rule name.
    pub rule: &'static str,
    /// Rule severity.
    pub severity: Severity,
    /// The diagnostic.
    pub diagnostic: Diagnostic,
    /// Target resolved by the rule itself, overriding the shared one.
    pub target: Option<String>,
}

impl Finding {
    /// Converts to a located violation with a fix suggestion where one can
    /// be derived.
    #[must_use]
    pub fn into_violation(self, location: Location, slices: &SliceContext) -> Violation {
        let target = self.target.as_deref().unwrap_or(&slices.target);
        let suggestion = suggest(&self.diagnostic, &location, slices, target);
        let mut violation = Violation::new(
            self.code,
            self.rule,
            self.severity,
            location,
            self.diagnostic.message(),
        )
        .with_diagnostic(self.diagnostic);
        if let Some(suggestion) = suggestion {
            violation = violation.with_suggestion(suggestion);
        }
        violation
    }
}

fn suggest(
    diagnostic: &Diagnostic,
    location: &Location,
    slices: &SliceContext,
    target: &str,
) -> Option<Suggestion> {
    match diagnostic {
        Diagnostic::LayerViolation { to_layer, .. } => Some(Suggestion::new(format!(
            "move the shared code down to a layer below `{to_layer}`"
        ))),
        Diagnostic::CrossImportViolation { to_slice, .. } => {
            let from_name = slices.from.as_ref()?.name.as_str();
            Some(Suggestion::new(format!(
                "expose a cross-import API as `{to_slice}/@x/{from_name}`"
            )))
        }
        Diagnostic::InvalidCrossNotation { expected_path, .. } => Some(Suggestion::with_fix(
            format!("import from `{expected_path}`"),
            Replacement::new(location.clone(), expected_path.clone()),
        )),
        Diagnostic::PublicApiViolation { public_api, .. } => {
            let fixed = if slices.relative {
                relative_specifier(&slices.from_path, public_api)
            } else {
                format!("{}{public_api}", slices.alias.as_deref().unwrap_or(""))
            };
            Some(Suggestion::with_fix(
                format!("import from `{fixed}`"),
                Replacement::new(location.clone(), fixed),
            ))
        }
        Diagnostic::PathViolation => {
            let fixed = relative_specifier(&slices.from_path, target);
            Some(Suggestion::with_fix(
                format!("use the relative path `{fixed}`"),
                Replacement::new(location.clone(), fixed),
            ))
        }
    }
}

/// Everything the analyzer learned about one edge.
#[derive(Debug, Clone)]
pub struct EdgeReport {
    /// Classification shared by all rules.
    pub slices: SliceContext,
    /// Diagnostics, in rule registration order.
    pub findings: Vec<Finding>,
}

/// Runs registered rules over import edges.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    aliases: AliasCache,
    ignore: Vec<glob::Pattern>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the source tree root, if one was set.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Returns the registered rules.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Returns the alias memo table.
    #[must_use]
    pub fn alias_cache(&self) -> &AliasCache {
        &self.aliases
    }

    /// Classifies both ends of an edge.
    #[must_use]
    pub fn classify(&self, edge: &ImportEdge) -> SliceContext {
        let aliases = self.aliases.aliases_for(&edge.from_file);
        let from_path = tree_path(&edge.from_file, self.root.as_deref());
        SliceContext::classify_edge(&from_path, edge, &aliases)
    }

    /// Runs every rule on one edge. Rules do not short-circuit each other,
    /// so one edge may produce several findings.
    #[must_use]
    pub fn check_import(&self, edge: &ImportEdge) -> EdgeReport {
        let slices = self.classify(edge);

        if self.is_ignored(&slices.target) {
            debug!("ignoring import `{}`", edge.specifier);
            return EdgeReport {
                slices,
                findings: Vec::new(),
            };
        }

        let findings = self
            .rules
            .iter()
            .filter_map(|rule| {
                rule.evaluate(edge, &slices).map(|diagnostic| Finding {
                    code: rule.code(),
                    rule: rule.name(),
                    severity: rule.default_severity(),
                    diagnostic,
                    target: rule.resolved_target(edge, &slices),
                })
            })
            .collect();

        EdgeReport { slices, findings }
    }

    /// Diagnostics for `specifier` imported from `from_file`.
    #[must_use]
    pub fn diagnostics(&self, from_file: impl Into<PathBuf>, specifier: &str) -> Vec<Diagnostic> {
        let edge = ImportEdge::new(from_file, specifier);
        self.check_import(&edge)
            .findings
            .into_iter()
            .map(|f| f.diagnostic)
            .collect()
    }

    fn is_ignored(&self, target: &str) -> bool {
        self.ignore.iter().any(|p| p.matches(target))
    }
}
