//! # fsd-lint-rules
//!
//! Built-in Feature-Sliced Design import rules for fsd-lint.
//!
//! Each rule is available both as a pure function over classified slices
//! and as a [`Rule`] implementation for the [`Analyzer`](fsd_lint_core::Analyzer).
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | FSD001 | `layer-imports` | Forbids importing from a higher layer |
//! | FSD002 | `cross-import` | Forbids sibling-slice imports without `@x/<importer>` notation |
//! | FSD003 | `public-api-imports` | Requires cross-slice imports to use the slice's public API |
//! | FSD004 | `path-checker` | Requires imports within a slice to be relative |
//!
//! ## Usage
//!
//! ```ignore
//! use fsd_lint_core::Analyzer;
//! use fsd_lint_rules::{LayerImports, PathChecker};
//!
//! let analyzer = Analyzer::builder()
//!     .root("src")
//!     .rule(LayerImports::new())
//!     .rule(PathChecker::new().alias("@"))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cross_import;
pub mod layer_imports;
pub mod path_checker;
pub mod public_api;
mod presets;

pub use cross_import::{check_cross_slice_import, CrossImport};
pub use layer_imports::{check_layer_import, LayerImports};
pub use path_checker::{check_path_style, PathChecker};
pub use presets::{all_rules, configured_rules, RULE_NAMES};
pub use public_api::{check_public_api_import, PublicApiImports};

/// Re-export core types for convenience.
pub use fsd_lint_core::{Diagnostic, Rule, Severity, Violation};
