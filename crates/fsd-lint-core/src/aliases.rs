//! Alias prefixes: resolution from configuration documents, the ordered
//! alias set used by the classifier, and a per-directory memo table.
//!
//! Resolution is fail-open. A missing or malformed document yields no
//! aliases; it never aborts a lint run.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::tsconfig::{find_config, TsConfig};

/// Alias assumed when nothing else is configured or resolved.
pub const DEFAULT_ALIAS: &str = "@/";

/// Distinct alias prefixes, ordered longest first so a more specific alias
/// never loses to a shorter one that is also its prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasSet {
    prefixes: Vec<String>,
}

impl AliasSet {
    /// Builds a set from prefixes in any order. Duplicates and empty
    /// strings are dropped.
    #[must_use]
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.into();
            if !prefix.is_empty() && !out.contains(&prefix) {
                out.push(prefix);
            }
        }
        // Stable: equal-length prefixes keep their encounter order.
        out.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { prefixes: out }
    }

    /// The conventional single-alias fallback, `["@/"]`.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new([DEFAULT_ALIAS])
    }

    /// Returns the longest prefix that `path` starts with.
    #[must_use]
    pub fn match_prefix(&self, path: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|p| path.starts_with(p.as_str()))
            .map(String::as_str)
    }

    /// Prefixes, longest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Number of prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns true if the set holds no prefixes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// Normalizes a user-supplied alias to prefix form: `"@"` and `"@/*"`
/// both become `"@/"`.
#[must_use]
pub fn normalize_alias(alias: &str) -> String {
    let alias = alias.strip_suffix('*').unwrap_or(alias);
    if alias.ends_with('/') {
        alias.to_string()
    } else {
        format!("{alias}/")
    }
}

/// Derives alias prefixes from a document's `paths` keys, in document order.
///
/// `"@/*"` yields `"@/"`. Keys without a `/*` wildcard suffix (exact
/// aliases, bare `*`) are skipped.
#[must_use]
pub fn prefixes_from(config: &TsConfig) -> Vec<String> {
    let mut prefixes: Vec<String> = Vec::new();
    for key in config.path_aliases.keys() {
        let Some(stem) = key.strip_suffix("/*") else {
            debug!("skipping non-wildcard path alias `{key}`");
            continue;
        };
        let prefix = format!("{stem}/");
        if !prefixes.contains(&prefix) {
            prefixes.push(prefix);
        }
    }
    prefixes
}

/// Resolves alias prefixes from the project's configuration document.
///
/// With `explicit_config`, that document is read directly; otherwise the
/// nearest document is searched for upward from `search_start` (or the
/// working directory). Inheritance is merged before prefixes are derived.
/// Every failure yields an empty list.
#[must_use]
pub fn resolve_aliases(explicit_config: Option<&Path>, search_start: Option<&Path>) -> Vec<String> {
    let document = match explicit_config {
        Some(path) => path.to_path_buf(),
        None => {
            let start = match search_start {
                Some(dir) => dir.to_path_buf(),
                None => match std::env::current_dir() {
                    Ok(cwd) => cwd,
                    Err(e) => {
                        warn!("cannot determine working directory: {e}");
                        return Vec::new();
                    }
                },
            };
            match find_config(&start) {
                Some(found) => found,
                None => {
                    debug!("no configuration document above {}", start.display());
                    return Vec::new();
                }
            }
        }
    };

    match TsConfig::load_merged(&document) {
        Some(config) => prefixes_from(&config),
        None => {
            warn!(
                "could not load {}, continuing without aliases",
                document.display()
            );
            Vec::new()
        }
    }
}

/// Caller-side alias options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasOptions {
    /// Explicit alias prefixes. When non-empty, resolution is skipped.
    pub aliases: Vec<String>,
    /// Explicit configuration document, used instead of the upward search.
    pub config_path: Option<PathBuf>,
}

impl AliasOptions {
    /// Resolves the alias set for files in `search_start`.
    ///
    /// Explicit aliases win outright. Otherwise the configuration document
    /// is consulted; an empty result falls back to [`DEFAULT_ALIAS`].
    #[must_use]
    pub fn resolve(&self, search_start: Option<&Path>) -> AliasSet {
        if !self.aliases.is_empty() {
            return AliasSet::new(self.aliases.iter().map(|a| normalize_alias(a)));
        }
        let resolved = resolve_aliases(self.config_path.as_deref(), search_start);
        if resolved.is_empty() {
            AliasSet::fallback()
        } else {
            AliasSet::new(resolved)
        }
    }
}

/// Memoizes resolved alias sets per starting directory.
///
/// Re-reading the configuration document for every import is correct but
/// wasteful; the cache changes no observable behaviour. Call
/// [`AliasCache::clear`] between runs if documents may have changed.
#[derive(Debug, Default)]
pub struct AliasCache {
    options: AliasOptions,
    entries: Mutex<HashMap<PathBuf, Arc<AliasSet>>>,
}

impl AliasCache {
    /// Creates an empty cache resolving with `options`.
    #[must_use]
    pub fn new(options: AliasOptions) -> Self {
        Self {
            options,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Options this cache resolves with.
    #[must_use]
    pub fn options(&self) -> &AliasOptions {
        &self.options
    }

    /// Alias set applying to `file`.
    #[must_use]
    pub fn aliases_for(&self, file: &Path) -> Arc<AliasSet> {
        let key = if !self.options.aliases.is_empty() {
            PathBuf::new()
        } else if let Some(config) = &self.options.config_path {
            config.clone()
        } else {
            file.parent().map(Path::to_path_buf).unwrap_or_default()
        };

        if let Some(hit) = self.entries.lock().get(&key) {
            return Arc::clone(hit);
        }

        let start = if key.as_os_str().is_empty() {
            None
        } else {
            Some(key.as_path())
        };
        let resolved = Arc::new(self.options.resolve(start));
        debug!(
            "resolved {} alias(es) for {}",
            resolved.len(),
            key.display()
        );
        self.entries
            .lock()
            .insert(key, Arc::clone(&resolved));
        resolved
    }

    /// Number of memoized entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing has been memoized yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops every memoized entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
