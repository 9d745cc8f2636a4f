//! Rule requiring cross-slice imports to use the slice's public API.
//!
//! Each slice exposes exactly one entry point: its root (`entities/user`),
//! optionally spelled `entities/user/index`. Reaching into
//! `entities/user/lib/helper` from another slice couples the importer to
//! internals. Escape paths (`entities/user/@x/profile`) are legal here;
//! whether the escape is well-formed is checked by `cross-import`.

use fsd_lint_core::{Diagnostic, ImportEdge, Rule, Severity, Slice, SliceContext};

/// Rule code for public-api-imports.
pub const CODE: &str = "FSD003";

/// Rule name for public-api-imports.
pub const NAME: &str = "public-api-imports";

/// Checks that `normalized` (alias stripped) addresses `to` through its
/// public entry point.
#[must_use]
pub fn check_public_api_import(from: &Slice, normalized: &str, to: &Slice) -> Option<Diagnostic> {
    let slice = to.full_path();
    if from.full_path() == slice {
        return None;
    }

    let remainder = normalized.strip_prefix(slice.as_str()).unwrap_or(normalized);
    if remainder.is_empty() || remainder == "/index" || remainder.starts_with("/@x/") {
        return None;
    }

    Some(Diagnostic::PublicApiViolation {
        public_api: slice.clone(),
        slice,
    })
}

/// Forbids importing another slice's internal modules.
#[derive(Debug, Clone)]
pub struct PublicApiImports {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for PublicApiImports {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicApiImports {
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

impl Rule for PublicApiImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires cross-slice imports to go through the slice's public API"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, _edge: &ImportEdge, slices: &SliceContext) -> Option<Diagnostic> {
        check_public_api_import(slices.from.as_ref()?, &slices.target, slices.to.as_ref()?)
    }
}
