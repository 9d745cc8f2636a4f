//! Rule requiring imports within one slice to be relative.
//!
//! A slice that refers to its own modules through `@/entities/user/...`
//! cannot be moved or renamed without rewriting those imports. Relative
//! specifiers are always accepted.
//!
//! # Configuration
//!
//! - `alias`: an extra alias recognized by this rule alone. A specifier that
//!   starts with it but did not classify through the project aliases is
//!   stripped of it and classified again.

use fsd_lint_core::{
    classify, normalize_alias, Diagnostic, ImportEdge, Rule, Severity, Slice, SliceContext,
};
use tracing::debug;

/// Rule code for path-checker.
pub const CODE: &str = "FSD004";

/// Rule name for path-checker.
pub const NAME: &str = "path-checker";

/// Flags an absolute or aliased import into the importer's own slice.
#[must_use]
pub fn check_path_style(
    is_relative: bool,
    from: Option<&Slice>,
    to: Option<&Slice>,
) -> Option<Diagnostic> {
    if is_relative {
        return None;
    }
    match (from, to) {
        (Some(from), Some(to)) if from.full_path() == to.full_path() => {
            Some(Diagnostic::PathViolation)
        }
        _ => None,
    }
}

/// Requires intra-slice imports to use relative paths.
#[derive(Debug, Clone)]
pub struct PathChecker {
    /// Extra alias prefix, normalized to end with `/`.
    pub alias: Option<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for PathChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl PathChecker {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alias: None,
            severity: Severity::Error,
        }
    }

    /// Recognizes an additional alias prefix (e.g. `"@"`).
    #[must_use]
    pub fn alias(mut self, alias: impl AsRef<str>) -> Self {
        let alias = alias.as_ref();
        self.alias = (!alias.is_empty()).then(|| normalize_alias(alias));
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Specifier with the rule alias stripped, when the alias matches.
    fn strip_rule_alias(&self, specifier: &str) -> Option<String> {
        let alias = self.alias.as_deref()?;
        let normalized = specifier.replace('\\', "/");
        normalized.strip_prefix(alias).map(str::to_string)
    }

    fn classify_with_alias(&self, specifier: &str) -> Option<Slice> {
        let stripped = self.strip_rule_alias(specifier)?;
        let slice = classify(&stripped);
        if let Some(slice) = &slice {
            debug!("`{specifier}` classified as {slice} via rule alias");
        }
        slice
    }
}

impl Rule for PathChecker {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires imports within a slice to be relative"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, edge: &ImportEdge, slices: &SliceContext) -> Option<Diagnostic> {
        let is_relative = edge.is_relative();
        if slices.to.is_some() || is_relative {
            return check_path_style(is_relative, slices.from.as_ref(), slices.to.as_ref());
        }
        let to = self.classify_with_alias(&edge.specifier);
        check_path_style(is_relative, slices.from.as_ref(), to.as_ref())
    }

    fn resolved_target(&self, edge: &ImportEdge, slices: &SliceContext) -> Option<String> {
        if slices.to.is_some() || edge.is_relative() {
            return None;
        }
        self.strip_rule_alias(&edge.specifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsd_lint_core::{AliasSet, Layer};

    fn user() -> Slice {
        Slice::new(Layer::Entities, "user")
    }

    fn evaluate(rule: &PathChecker, from: &str, specifier: &str, aliases: &AliasSet) -> Option<Diagnostic> {
        let edge = ImportEdge::new(from, specifier);
        let ctx = SliceContext::classify_edge(from, &edge, aliases);
        rule.evaluate(&edge, &ctx)
    }

    #[test]
    fn relative_is_always_accepted() {
        assert_eq!(check_path_style(true, Some(&user()), Some(&user())), None);
        assert_eq!(check_path_style(true, None, None), None);
    }

    #[test]
    fn absolute_self_import_is_flagged() {
        assert_eq!(
            check_path_style(false, Some(&user()), Some(&user())),
            Some(Diagnostic::PathViolation)
        );
    }

    #[test]
    fn other_slices_and_unclassified_pass() {
        let profile = Slice::new(Layer::Entities, "profile");
        assert_eq!(check_path_style(false, Some(&user()), Some(&profile)), None);
        assert_eq!(check_path_style(false, Some(&user()), None), None);
        assert_eq!(check_path_style(false, None, Some(&user())), None);
    }

    #[test]
    fn rule_checks_aliased_and_relative_edges() {
        let rule = PathChecker::new();
        let aliases = AliasSet::fallback();
        assert_eq!(
            evaluate(&rule, "entities/user/model.ts", "@/entities/user/lib/helper", &aliases),
            Some(Diagnostic::PathViolation)
        );
        assert_eq!(
            evaluate(&rule, "entities/user/model.ts", "entities/user/lib/helper", &aliases),
            Some(Diagnostic::PathViolation)
        );
        assert_eq!(evaluate(&rule, "entities/user/model.ts", "./lib/helper", &aliases), None);
    }

    #[test]
    fn rule_alias_is_recognized_when_project_aliases_miss() {
        let aliases = AliasSet::fallback();
        let plain = PathChecker::new();
        assert_eq!(
            evaluate(&plain, "entities/user/model.ts", "#app/entities/user/lib", &aliases),
            None
        );

        let rule = PathChecker::new().alias("#app");
        assert_eq!(rule.alias.as_deref(), Some("#app/"));
        assert_eq!(
            evaluate(&rule, "entities/user/model.ts", "#app/entities/user/lib", &aliases),
            Some(Diagnostic::PathViolation)
        );
        assert_eq!(
            evaluate(&rule, "entities/user/model.ts", "#app/entities/profile", &aliases),
            None
        );
    }

    #[test]
    fn rule_alias_target_is_stripped() {
        let aliases = AliasSet::fallback();
        let rule = PathChecker::new().alias("#app");
        let edge = ImportEdge::new("entities/user/model.ts", "#app\\entities\\user\\lib");
        let ctx = SliceContext::classify_edge("entities/user/model.ts", &edge, &aliases);
        assert_eq!(
            rule.resolved_target(&edge, &ctx).as_deref(),
            Some("entities/user/lib")
        );

        let aliased = ImportEdge::new("entities/user/model.ts", "@/entities/user/lib");
        let ctx = SliceContext::classify_edge("entities/user/model.ts", &aliased, &aliases);
        assert_eq!(rule.resolved_target(&aliased, &ctx), None);
    }
}
