//! The unit of work handed to rules: one import statement of one file.

use std::path::{Path, PathBuf};

/// A single import statement, as seen by the host tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    /// Path of the importing file.
    pub from_file: PathBuf,
    /// Import specifier exactly as written in source.
    pub specifier: String,
}

impl ImportEdge {
    /// Creates a new import edge.
    #[must_use]
    pub fn new(from_file: impl Into<PathBuf>, specifier: impl Into<String>) -> Self {
        Self {
            from_file: from_file.into(),
            specifier: specifier.into(),
        }
    }

    /// Path of the importing file.
    #[must_use]
    pub fn from_file(&self) -> &Path {
        &self.from_file
    }

    /// Whether the specifier is relative to the importing file.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        is_relative_specifier(&self.specifier)
    }
}

/// `"."`, `".."`, `"./…"` and `"../…"` are relative; everything else is
/// absolute, aliased, or a package name.
#[must_use]
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}
