//! Rule forbidding imports from a higher layer.
//!
//! # Rationale
//!
//! Layers form a strict precedence order
//! (`shared < entities < features < widgets < pages < app`). A module may
//! only depend on layers at or below its own; anything else creates the
//! upward dependencies the layering exists to prevent.
//!
//! Same-layer imports are not this rule's concern (see `cross-import`).

use fsd_lint_core::{Diagnostic, ImportEdge, Rule, Severity, Slice, SliceContext};

/// Rule code for layer-imports.
pub const CODE: &str = "FSD001";

/// Rule name for layer-imports.
pub const NAME: &str = "layer-imports";

/// Flags `from -> to` when `to` sits on a higher layer than `from`.
#[must_use]
pub fn check_layer_import(from: &Slice, to: &Slice) -> Option<Diagnostic> {
    (from.layer.rank() < to.layer.rank()).then_some(Diagnostic::LayerViolation {
        from_layer: from.layer,
        to_layer: to.layer,
    })
}

/// Forbids lower layers importing from higher layers.
#[derive(Debug, Clone)]
pub struct LayerImports {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for LayerImports {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerImports {
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

impl Rule for LayerImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids importing from a higher layer"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, _edge: &ImportEdge, slices: &SliceContext) -> Option<Diagnostic> {
        check_layer_import(slices.from.as_ref()?, slices.to.as_ref()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsd_lint_core::{AliasSet, Layer};
    use rstest::rstest;

    fn slice(layer: Layer) -> Slice {
        Slice::new(layer, "thing")
    }

    #[rstest]
    #[case(Layer::Shared, Layer::Entities, true)]
    #[case(Layer::Shared, Layer::App, true)]
    #[case(Layer::Entities, Layer::Features, true)]
    #[case(Layer::Features, Layer::Widgets, true)]
    #[case(Layer::Widgets, Layer::Pages, true)]
    #[case(Layer::Pages, Layer::App, true)]
    #[case(Layer::Features, Layer::Entities, false)]
    #[case(Layer::App, Layer::Shared, false)]
    #[case(Layer::Pages, Layer::Widgets, false)]
    #[case(Layer::Entities, Layer::Entities, false)]
    #[case(Layer::Shared, Layer::Shared, false)]
    fn flags_only_upward_imports(#[case] from: Layer, #[case] to: Layer, #[case] flagged: bool) {
        assert_eq!(check_layer_import(&slice(from), &slice(to)).is_some(), flagged);
    }

    #[test]
    fn rank_matrix_is_monotonic() {
        for from in Layer::ALL {
            for to in Layer::ALL {
                let flagged = check_layer_import(&slice(from), &slice(to)).is_some();
                assert_eq!(flagged, from.rank() < to.rank(), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn reports_both_layers() {
        let d = check_layer_import(&slice(Layer::Shared), &slice(Layer::Entities));
        assert_eq!(
            d,
            Some(Diagnostic::LayerViolation {
                from_layer: Layer::Shared,
                to_layer: Layer::Entities,
            })
        );
    }

    #[test]
    fn ignores_unclassified_ends() {
        let rule = LayerImports::new();
        let aliases = AliasSet::fallback();
        for (from, spec) in [("shared/utils.ts", "react"), ("scripts/run.ts", "@/app/store")] {
            let edge = ImportEdge::new(from, spec);
            let ctx = SliceContext::classify_edge(from, &edge, &aliases);
            assert_eq!(rule.evaluate(&edge, &ctx), None);
        }
    }

    #[test]
    fn severity_is_configurable() {
        let rule = LayerImports::new().severity(Severity::Warning);
        assert_eq!(rule.default_severity(), Severity::Warning);
        assert_eq!(rule.code(), "FSD001");
    }
}
