//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to teach fsd-lint how to find import specifiers in a new
//! language via Tree-sitter.

use std::path::{Path, PathBuf};

/// A single import specifier extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line) of the specifier text.
    pub column: usize,
    /// Byte offset of the specifier text, without quotes.
    pub offset: usize,
    /// Length of the specifier text in bytes.
    pub length: usize,
    /// The module specifier as written (e.g., `@/entities/user`).
    pub specifier: String,
}

/// Result of analyzing a single source file with Tree-sitter.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Path of the analyzed file.
    pub file_path: PathBuf,
    /// All import specifiers found, in source order.
    pub imports: Vec<ImportInfo>,
}

/// Extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {source}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying tree-sitter error.
        source: tree_sitter::LanguageError,
    },

    /// The parser produced no tree.
    #[error("failed to parse {language} source")]
    Parse {
        /// Language identifier.
        language: &'static str,
    },

    /// IO error reading a source file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Trait for language-specific Tree-sitter extraction.
///
/// The extractor receives raw source text and returns a [`FileAnalysis`]
/// listing every import specifier.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"typescript"`, `"tsx"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".ts", ".mts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract import specifiers from source code.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or parsing fails.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError>;

    /// Whether this extractor handles `path`, judged by extension.
    fn handles(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions()
            .iter()
            .any(|e| e.strip_prefix('.') == Some(ext))
    }

    /// Reads and analyzes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn analyze_file(&self, path: &Path) -> Result<FileAnalysis, ExtractError> {
        let source = std::fs::read_to_string(path).map_err(|e| ExtractError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut analysis = self.analyze(&source)?;
        analysis.file_path = path.to_path_buf();
        Ok(analysis)
    }
}
