//! Rule forbidding imports between sibling slices of one layer.
//!
//! # Rationale
//!
//! Slices on the same layer are meant to be independent. When one really
//! must use another, the import has to go through the `@x/<name>` escape
//! segment naming the *importing* slice, so the imported slice's owners can
//! find every consumer by searching for their own slice name.
//!
//! # Detected Patterns
//!
//! - `entities/profile` importing `entities/user` (no escape)
//! - `entities/profile` importing `entities/user/@x/order` (escape names a
//!   third slice)
//!
//! # Allowed Patterns
//!
//! - `entities/profile` importing `entities/user/@x/profile`

use fsd_lint_core::{Diagnostic, ImportEdge, Rule, Severity, Slice, SliceContext};

/// Rule code for cross-import.
pub const CODE: &str = "FSD002";

/// Rule name for cross-import.
pub const NAME: &str = "cross-import";

/// Path segment introducing a cross-import escape.
pub const ESCAPE_SEGMENT: &str = "@x";

/// Index of the `<name>` segment of the first `@x/<name>` escape.
fn find_escape(segments: &[&str]) -> Option<usize> {
    segments
        .windows(2)
        .position(|w| w[0] == ESCAPE_SEGMENT && !w[1].is_empty())
        .map(|i| i + 1)
}

/// Checks a same-layer sibling import against the escape notation.
///
/// `specifier` is the import as written, before alias stripping. The
/// suggested `expected_path` uses forward slashes.
#[must_use]
pub fn check_cross_slice_import(from: &Slice, specifier: &str, to: &Slice) -> Option<Diagnostic> {
    if from.layer != to.layer || from.name == to.name {
        return None;
    }

    let normalized = specifier.replace('\\', "/");
    let mut segments: Vec<&str> = normalized.split('/').collect();
    let Some(name_index) = find_escape(&segments) else {
        return Some(Diagnostic::CrossImportViolation {
            from_slice: from.full_path(),
            to_slice: to.full_path(),
        });
    };

    if segments[name_index] == from.name {
        return None;
    }

    segments[name_index] = &from.name;
    Some(Diagnostic::InvalidCrossNotation {
        from_slice: from.full_path(),
        import_path: specifier.to_string(),
        expected_path: segments.join("/"),
    })
}

/// Forbids same-layer sibling imports unless they use `@x/<importer>`.
#[derive(Debug, Clone)]
pub struct CrossImport {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for CrossImport {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossImport {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for CrossImport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids sibling-slice imports without @x/<importer> notation"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, edge: &ImportEdge, slices: &SliceContext) -> Option<Diagnostic> {
        check_cross_slice_import(slices.from.as_ref()?, &edge.specifier, slices.to.as_ref()?)
    }
}
