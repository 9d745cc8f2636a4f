//! List rules command implementation.

use fsd_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<22} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nLayers, lowest first: shared, entities, features, widgets, pages, app");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  fsd-lint check --rules layer-imports,public-api-imports");
    println!("  fsd-lint check --rules FSD001,FSD004");
}
