//! Rule catalogue and configuration-driven rule construction.

use crate::{CrossImport, LayerImports, PathChecker, PublicApiImports};
use fsd_lint_core::{Config, RuleBox, Severity};
use tracing::debug;

/// Names of every built-in rule, in evaluation order.
pub const RULE_NAMES: &[&str] = &[
    crate::layer_imports::NAME,
    crate::cross_import::NAME,
    crate::public_api::NAME,
    crate::path_checker::NAME,
];

/// Returns all available rules with default settings.
///
/// Includes:
/// - `layer-imports` (FSD001) - Forbids importing from a higher layer
/// - `cross-import` (FSD002) - Forbids sibling-slice imports without `@x/`
/// - `public-api-imports` (FSD003) - Requires the slice's public API
/// - `path-checker` (FSD004) - Requires relative intra-slice imports
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LayerImports::new()),
        Box::new(CrossImport::new()),
        Box::new(PublicApiImports::new()),
        Box::new(PathChecker::new()),
    ]
}

/// Builds the enabled rules with severities and options from `config`.
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<RuleBox> {
    let severity = |name: &str| config.rule_severity(name).unwrap_or(Severity::Error);

    let mut rules: Vec<RuleBox> = Vec::new();
    for &name in RULE_NAMES {
        if !config.is_rule_enabled(name) {
            debug!("rule `{name}` disabled by config");
            continue;
        }
        let rule: RuleBox = match name {
            crate::layer_imports::NAME => Box::new(LayerImports::new().severity(severity(name))),
            crate::cross_import::NAME => Box::new(CrossImport::new().severity(severity(name))),
            crate::public_api::NAME => Box::new(PublicApiImports::new().severity(severity(name))),
            _ => {
                let mut rule = PathChecker::new().severity(severity(name));
                if let Some(alias) = config.rule_config(name).and_then(|c| c.get_str("alias")) {
                    rule = rule.alias(alias);
                }
                Box::new(rule)
            }
        };
        rules.push(rule);
    }
    rules
}
