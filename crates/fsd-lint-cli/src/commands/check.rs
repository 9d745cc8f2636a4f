//! Check command implementation.

use anyhow::{Context, Result};
use fsd_lint_core::{Analyzer, Config, LintResult, RuleBox};
use fsd_lint_rules::configured_rules;
use fsd_lint_ts::SliceRuleEngine;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `fsd-lint check`.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Explicit tsconfig/jsconfig document.
    pub tsconfig: Option<PathBuf>,
    /// Explicit alias prefixes.
    pub aliases: Vec<String>,
}

/// Runs the check command. Returns `true` when the run should fail.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = load_config(source)?;
    let result = lint(path, options, &config)?;

    super::output::print(&result, options.format)?;

    Ok(result.has_violations_at(config.fail_threshold()))
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(p) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", p.display());
    }
    Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
}

/// Lints every supported file below the configured source root.
pub fn lint(path: &Path, options: &CheckOptions, config: &Config) -> Result<LintResult> {
    let root = source_root(path, config);

    let mut config = config.clone();
    if let Some(tsconfig) = config.resolve.tsconfig.as_mut() {
        if tsconfig.is_relative() {
            *tsconfig = path.join(&*tsconfig);
        }
    }

    let mut builder = Analyzer::builder().root(&root);
    if let Some(tsconfig) = &options.tsconfig {
        builder = builder.tsconfig(tsconfig);
    }
    for alias in &options.aliases {
        builder = builder.alias(alias);
    }
    let analyzer = builder
        .config(&config)
        .rules(select_rules(&config, options.rules.as_deref()))
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        root.display(),
        analyzer.rules().len()
    );

    let engine = SliceRuleEngine::new(analyzer);

    let mut exclude = config.analyzer.exclude.clone();
    exclude.extend(options.exclude.iter().cloned());
    let files = discover_files(&root, &exclude, config.analyzer.respect_gitignore, &engine)?;

    let mut result = LintResult::new();
    for file in &files {
        let violations = engine
            .check_file(file)
            .with_context(|| format!("Failed to check {}", file.display()))?;
        if let Some(violations) = violations {
            result.violations.extend(violations);
            result.files_checked += 1;
        }
    }
    result.sort();

    let (errors, warnings, _) = result.count_by_severity();
    tracing::info!(
        "Checked {} file(s): {errors} error(s), {warnings} warning(s)",
        result.files_checked
    );

    Ok(result)
}

/// `[analyzer] root` relative to the project directory. Falls back to the
/// project directory itself when the root does not exist.
fn source_root(path: &Path, config: &Config) -> PathBuf {
    let root = if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        path.join(&config.analyzer.root)
    };
    if root.is_dir() {
        root
    } else {
        tracing::warn!(
            "Source root {} not found, analyzing {}",
            root.display(),
            path.display()
        );
        path.to_path_buf()
    }
}

/// Enabled rules, narrowed to `filter` (names or codes) when given.
fn select_rules(config: &Config, filter: Option<&str>) -> Vec<RuleBox> {
    let rules = configured_rules(config);
    let Some(filter) = filter else {
        return rules;
    };

    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    for name in &wanted {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown or disabled rule: {}", name);
        }
    }

    rules
        .into_iter()
        .filter(|r| wanted.iter().any(|w| r.name() == *w || r.code() == *w))
        .collect()
}

fn discover_files(
    root: &Path,
    exclude: &[String],
    respect_gitignore: bool,
    engine: &SliceRuleEngine,
) -> Result<Vec<PathBuf>> {
    let patterns = exclude
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(respect_gitignore)
        .git_exclude(respect_gitignore)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || engine.extractor_for(path).is_none() {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if patterns.iter().any(|p| p.matches_path(rel)) {
            tracing::debug!("Excluded {}", rel.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "~/*": ["./src/*"] } } }"#,
        );
        write(root, "src/shared/lib/date.ts", "import { User } from \"~/entities/user\";\n");
        write(root, "src/entities/user/index.ts", "export * from \"./model\";\n");
        write(
            root,
            "src/entities/user/model.stories.tsx",
            "import { Page } from \"~/pages/home\";\n",
        );
        write(root, "src/pages/home/index.ts", "import { User } from \"~/entities/user/model\";\n");
        dir
    }

    #[test]
    fn lints_project_with_default_config() {
        let dir = project();
        let result = lint(dir.path(), &CheckOptions::default(), &Config::default()).unwrap();

        assert_eq!(result.files_checked, 4);
        let codes: Vec<&str> = result.violations.iter().map(|v| v.code.as_str()).collect();
        // stories file: upward import; pages: internals; shared: upward import.
        assert_eq!(codes, vec!["FSD001", "FSD003", "FSD001"]);
    }

    #[test]
    fn excludes_and_rule_filter_apply() {
        let dir = project();
        let config = Config::parse("[analyzer]\nexclude = [\"**/*.stories.tsx\"]\n").unwrap();
        let options = CheckOptions {
            rules: Some("FSD001".into()),
            ..CheckOptions::default()
        };
        let result = lint(dir.path(), &options, &config).unwrap();

        assert_eq!(result.files_checked, 3);
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].location.file.ends_with("shared/lib/date.ts"));
    }

    #[test]
    fn explicit_alias_overrides_tsconfig() {
        let dir = project();
        let options = CheckOptions {
            aliases: vec!["@".into()],
            ..CheckOptions::default()
        };
        let result = lint(dir.path(), &options, &Config::default()).unwrap();
        assert!(result.violations.is_empty());
    }

    #[test]
    fn rule_filter_accepts_names_and_codes() {
        let config = Config::default();
        let rules = select_rules(&config, Some("layer-imports, FSD004"));
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["layer-imports", "path-checker"]);
    }
}
