//! # fsd-lint-ts
//!
//! Tree-sitter based import extraction for fsd-lint.
//!
//! This crate connects TypeScript and JavaScript sources to the
//! `fsd-lint-core` analyzer. It adds:
//!
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`TypeScriptExtractor`] for `.ts`/`.tsx`/`.js` import extraction
//! - [`SliceRuleEngine`] for turning per-import diagnostics into located
//!   [`Violation`](fsd_lint_core::Violation)s

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod extractor;
pub mod typescript;

pub use engine::SliceRuleEngine;
pub use extractor::{ExtractError, FileAnalysis, ImportInfo, LanguageExtractor};
pub use typescript::TypeScriptExtractor;
