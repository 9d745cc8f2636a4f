//! Integration test: the built-in rules end-to-end through the analyzer.

use std::path::PathBuf;

use fsd_lint_core::{Analyzer, Diagnostic, ImportEdge, Layer, Location};
use fsd_lint_rules::{all_rules, PathChecker};
use rstest::rstest;

fn analyzer() -> Analyzer {
    Analyzer::builder()
        .root("src")
        .alias("@/")
        .rules(all_rules())
        .build()
        .expect("analyzer should build")
}

fn ids(from: &str, specifier: &str) -> Vec<&'static str> {
    analyzer()
        .diagnostics(format!("src/{from}"), specifier)
        .iter()
        .map(Diagnostic::id)
        .collect()
}

#[rstest]
#[case("features/auth/model.ts", "entities/user")]
#[case("features/auth/model.ts", "@/entities/user")]
#[case("features/auth/model.ts", "@/entities/user/index")]
#[case("entities/profile/model.ts", "@/entities/user/@x/profile")]
#[case("entities/user/model.ts", "./lib/helper")]
#[case("entities/user/ui/Card.tsx", "../model/types")]
#[case("app/index.ts", "react")]
#[case("app/index.ts", "@/shared/ui")]
fn allowed_imports(#[case] from: &str, #[case] specifier: &str) {
    assert!(ids(from, specifier).is_empty(), "{from} -> {specifier}");
}

#[test]
fn lower_layer_importing_higher_layer() {
    let diagnostics = analyzer().diagnostics("src/shared/utils.ts", "entities/user");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::LayerViolation {
            from_layer: Layer::Shared,
            to_layer: Layer::Entities,
        }]
    );
}

#[test]
fn sibling_slice_import() {
    let diagnostics = analyzer().diagnostics("src/entities/profile/model.ts", "entities/user");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::CrossImportViolation {
            from_slice: "entities/profile".into(),
            to_slice: "entities/user".into(),
        }]
    );
}

#[test]
fn escape_naming_the_wrong_slice() {
    let diagnostics =
        analyzer().diagnostics("src/entities/profile/model.ts", "entities/user/@x/wrong");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::InvalidCrossNotation {
            from_slice: "entities/profile".into(),
            import_path: "entities/user/@x/wrong".into(),
            expected_path: "entities/user/@x/profile".into(),
        }]
    );
}

#[test]
fn reaching_into_slice_internals() {
    let diagnostics = analyzer().diagnostics("src/features/auth/model.ts", "entities/user/lib/helper");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::PublicApiViolation {
            slice: "entities/user".into(),
            public_api: "entities/user".into(),
        }]
    );
}

#[test]
fn absolute_import_into_own_slice() {
    let diagnostics = analyzer().diagnostics("src/entities/user/model.ts", "entities/user/lib/helper");
    assert_eq!(diagnostics, vec![Diagnostic::PathViolation]);
}

#[test]
fn one_edge_can_break_several_rules() {
    // Upward and into internals at once.
    assert_eq!(
        ids("shared/api/client.ts", "@/entities/user/model/session"),
        vec!["layerViolation", "publicApiViolation"]
    );
    // Sibling import into internals.
    assert_eq!(
        ids("entities/profile/model.ts", "@/entities/user/lib"),
        vec!["crossImportViolation", "publicApiViolation"]
    );
}

#[test]
fn relative_imports_are_classified_too() {
    assert_eq!(
        ids("features/auth/ui/Form.tsx", "../../../widgets/header"),
        vec!["layerViolation"]
    );
}

fn fix_for(analyzer: &Analyzer, from: &str, specifier: &str, code: &str) -> Option<String> {
    let edge = ImportEdge::new(format!("src/{from}"), specifier);
    let report = analyzer.check_import(&edge);
    let finding = report.findings.into_iter().find(|f| f.code == code)?;
    let location = Location::new(PathBuf::from(from), 1, 1);
    finding
        .into_violation(location, &report.slices)
        .suggestion
        .and_then(|s| s.replacement)
        .map(|r| r.new_text)
}

#[test]
fn path_fix_strips_rule_alias() {
    let analyzer = Analyzer::builder()
        .root("src")
        .alias("@/")
        .rule(PathChecker::new().alias("#app"))
        .build()
        .expect("analyzer should build");
    assert_eq!(
        fix_for(&analyzer, "entities/user/model.ts", "#app/entities/user/lib/helper", "FSD004").as_deref(),
        Some("./lib/helper")
    );
}

#[test]
fn public_api_fix_follows_import_style() {
    let analyzer = analyzer();
    assert_eq!(
        fix_for(&analyzer, "features/auth/ui/Form.tsx", "../../../entities/user/lib/helper", "FSD003")
            .as_deref(),
        Some("../../../entities/user")
    );
    assert_eq!(
        fix_for(&analyzer, "features/auth/ui/Form.tsx", "@/entities/user/lib/helper", "FSD003").as_deref(),
        Some("@/entities/user")
    );
}

#[test]
fn backslashed_escape_matches_public_api_rule() {
    assert!(ids("entities/profile/model.ts", "entities\\user\\@x\\profile").is_empty());
    assert_eq!(
        ids("entities/profile/model.ts", "entities\\user\\@x\\wrong"),
        vec!["invalidCrossNotation"]
    );
}
