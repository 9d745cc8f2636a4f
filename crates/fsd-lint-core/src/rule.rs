//! Rule trait for defining import rules.

use crate::classify::SliceContext;
use crate::diagnostic::Diagnostic;
use crate::edge::ImportEdge;
use crate::types::Severity;

/// A per-import architecture rule.
///
/// The [`Analyzer`](crate::Analyzer) classifies both ends of every import
/// edge once and hands the result to each registered rule. Rules are pure:
/// no state is carried between calls.
///
/// # Example
///
/// ```ignore
/// use fsd_lint_core::{Diagnostic, ImportEdge, Rule, SliceContext};
///
/// pub struct NoAppImports;
///
/// impl Rule for NoAppImports {
///     fn name(&self) -> &'static str { "no-app-imports" }
///     fn code(&self) -> &'static str { "FSD100" }
///
///     fn evaluate(&self, _edge: &ImportEdge, slices: &SliceContext) -> Option<Diagnostic> {
///         // ...
///         None
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "layer-imports").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "FSD001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Evaluates one import edge.
    ///
    /// # Arguments
    ///
    /// * `edge` - The import statement as written
    /// * `slices` - Classification of both ends of the edge
    ///
    /// # Returns
    ///
    /// At most one diagnostic.
    fn evaluate(&self, edge: &ImportEdge, slices: &SliceContext) -> Option<Diagnostic>;

    /// Tree-relative target this rule resolved on its own for `edge`.
    ///
    /// Rules that recognize extra aliases return the stripped path here so
    /// fix suggestions point at the right file. `None` means the shared
    /// classification in `slices` applies.
    fn resolved_target(&self, _edge: &ImportEdge, _slices: &SliceContext) -> Option<String> {
        None
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
