//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# fsd-lint configuration

# Fail the run on violations at or above this severity (default: error)
# fail_on = "warning"

[analyzer]
# Source root; layer directories (shared, entities, features, widgets,
# pages, app) live directly below it.
root = "src"

# Glob patterns (relative to root) to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

[resolve]
# Aliases are read from the nearest tsconfig.json / jsconfig.json.
# tsconfig = "tsconfig.app.json"
# Explicit aliases skip tsconfig resolution entirely.
# aliases = ["@/"]
# Import targets every rule ignores
# ignore_imports = ["**/StoreProvider"]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.layer-imports]
enabled = true

[rules.cross-import]
enabled = true

[rules.public-api-imports]
enabled = true
# severity = "warning"

[rules.path-checker]
enabled = true
# Extra alias recognized for intra-slice imports
# alias = "@"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("fsd-lint.toml");
    write_config(config_path, force)?;

    println!("Created fsd-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit fsd-lint.toml to match your source root and aliases");
    println!("  2. Run: fsd-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
