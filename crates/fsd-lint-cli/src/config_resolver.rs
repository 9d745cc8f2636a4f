//! Configuration file resolution with global fallback.
//!
//! Priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/fsd-lint.toml`, then `{project}/.fsd-lint.toml`
//! 3. `$FSD_LINT_CONFIG_DIR/config.toml`, or `~/.fsd-lint/config.toml`
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["fsd-lint.toml", ".fsd-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "FSD_LINT_CONFIG_DIR";

/// Resolves the configuration file path.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with_global(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_with_global(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(p) = explicit {
        // Trusted as-is; a missing file is reported when loading.
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Returns the global config directory: `$FSD_LINT_CONFIG_DIR`, else
/// `~/.fsd-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home::home_dir().map(|h| h.join(".fsd-lint")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn explicit_wins_even_if_missing() {
        let project = TempDir::new().unwrap();
        touch(&project.path().join("fsd-lint.toml"));

        let explicit = Path::new("/nonexistent/custom.toml");
        assert_eq!(
            resolve_with_global(project.path(), Some(explicit), None),
            ConfigSource::Explicit(explicit.to_path_buf())
        );
    }

    #[test]
    fn project_names_in_priority_order() {
        let project = TempDir::new().unwrap();
        touch(&project.path().join(".fsd-lint.toml"));
        assert_eq!(
            resolve_with_global(project.path(), None, None),
            ConfigSource::Project(project.path().join(".fsd-lint.toml"))
        );

        touch(&project.path().join("fsd-lint.toml"));
        assert_eq!(
            resolve_with_global(project.path(), None, None),
            ConfigSource::Project(project.path().join("fsd-lint.toml"))
        );
    }

    #[test]
    fn global_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(
            resolve_with_global(project.path(), None, Some(global.path())),
            ConfigSource::Default
        );

        touch(&global.path().join("config.toml"));
        let source = resolve_with_global(project.path(), None, Some(global.path()));
        assert!(source.is_global());
        assert_eq!(source.path(), Some(global.path().join("config.toml").as_path()));

        touch(&project.path().join("fsd-lint.toml"));
        assert!(matches!(
            resolve_with_global(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn default_has_no_path() {
        assert!(ConfigSource::Default.path().is_none());
        assert!(!ConfigSource::Default.is_global());
    }
}
