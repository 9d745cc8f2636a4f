//! # fsd-lint-core
//!
//! Core engine for checking import statements against the
//! Feature-Sliced Design layer and slice rules.
//!
//! This crate provides:
//!
//! - [`Layer`] and [`Slice`] for the fixed layer hierarchy
//! - [`classify`] and [`normalize_path`] for mapping paths to slices
//! - [`TsConfig`] and [`AliasCache`] for alias prefix resolution
//! - [`Rule`] trait for per-import rules
//! - [`Analyzer`] for running rules over [`ImportEdge`]s
//! - [`Diagnostic`] and [`Violation`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use fsd_lint_core::{Analyzer, ImportEdge};
//!
//! let analyzer = Analyzer::builder()
//!     .root("src")
//!     .alias("@/")
//!     .rule(LayerImports::new())
//!     .build()?;
//!
//! let report = analyzer.check_import(&ImportEdge::new(
//!     "src/shared/ui/Button.tsx",
//!     "@/entities/user",
//! ));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aliases;
mod analyzer;
mod classify;
mod config;
mod diagnostic;
mod edge;
mod layer;
mod rule;
mod tsconfig;
mod types;

pub use aliases::{
    normalize_alias, prefixes_from, resolve_aliases, AliasCache, AliasOptions, AliasSet,
    DEFAULT_ALIAS,
};
pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, EdgeReport, Finding};
pub use classify::{
    classify, normalize_path, relative_specifier, resolve_relative, tree_path, SliceContext,
};
pub use config::{AnalyzerConfig, Config, ConfigError, ResolveConfig, RuleConfig};
pub use diagnostic::Diagnostic;
pub use edge::{is_relative_specifier, ImportEdge};
pub use layer::{Layer, Slice, UnknownLayer};
pub use rule::{Rule, RuleBox};
pub use tsconfig::{find_config, strip_jsonc, TsConfig, TsConfigError, CONFIG_FILE_NAMES};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
