//! `tsconfig.json` / `jsconfig.json` documents: discovery, parsing and
//! `extends` inheritance.
//!
//! Only the parts relevant to alias resolution are modelled:
//! `compilerOptions.paths`, `compilerOptions.baseUrl` and `extends`.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Document names searched for in every directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["tsconfig.json", "jsconfig.json"];

/// A parsed configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsConfig {
    /// `compilerOptions.paths`: alias pattern -> resolution targets.
    pub path_aliases: IndexMap<String, Vec<String>>,
    /// `compilerOptions.baseUrl`.
    pub base_url: Option<String>,
    /// `extends` references, relative to the document's directory.
    pub extends: Vec<String>,
}

/// Errors reading a single document. Callers in this crate never surface
/// these to users; they degrade to "no aliases".
#[derive(Debug, thiserror::Error)]
pub enum TsConfigError {
    /// Failed to read the document.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Document is not valid JSON (after comment stripping).
    #[error("invalid document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExtends {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    paths: IndexMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    extends: Option<RawExtends>,
    #[serde(default)]
    compiler_options: Option<RawCompilerOptions>,
}

impl TsConfig {
    /// Reads and parses a document.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, TsConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| TsConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses a document. Comments and trailing commas are accepted.
    ///
    /// # Errors
    ///
    /// Returns error if the content is not a JSON object of the expected shape.
    pub fn parse(content: &str) -> Result<Self, TsConfigError> {
        let raw: RawDocument = serde_json::from_str(&strip_jsonc(content))?;

        let extends = match raw.extends {
            Some(RawExtends::One(s)) => vec![s],
            Some(RawExtends::Many(v)) => v,
            None => Vec::new(),
        };
        let options = raw.compiler_options.unwrap_or_default();
        let path_aliases = options
            .paths
            .into_iter()
            .map(|(key, targets)| {
                let targets = targets
                    .as_array()
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|t| t.as_str().map(String::from))
                            .collect()
                    })
                    .unwrap_or_default();
                (key, targets)
            })
            .collect();

        Ok(Self {
            path_aliases,
            base_url: options.base_url,
            extends,
        })
    }

    /// Loads a document and merges its whole `extends` chain.
    ///
    /// Child entries override parent entries with the same key. A parent
    /// that is missing, unreadable, or already on the current chain (a
    /// cycle) ends that branch of the chain. Returns `None` only when the
    /// document at `path` itself cannot be loaded.
    #[must_use]
    pub fn load_merged(path: &Path) -> Option<Self> {
        let mut chain = Vec::new();
        load_chain(path, &mut chain)
    }
}

fn load_chain(path: &Path, chain: &mut Vec<PathBuf>) -> Option<TsConfig> {
    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if chain.contains(&key) {
        debug!("inheritance cycle at {}, ending chain", path.display());
        return None;
    }

    let doc = match TsConfig::from_file(path) {
        Ok(doc) => doc,
        Err(e) => {
            debug!("ignoring {}: {e}", path.display());
            return None;
        }
    };

    chain.push(key);
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut path_aliases = IndexMap::new();
    let mut base_url = None;
    for reference in &doc.extends {
        let Some(parent_path) = locate_parent(dir, reference) else {
            debug!("parent `{reference}` of {} not found", path.display());
            continue;
        };
        if let Some(parent) = load_chain(&parent_path, chain) {
            path_aliases.extend(parent.path_aliases);
            if parent.base_url.is_some() {
                base_url = parent.base_url;
            }
        }
    }
    chain.pop();

    path_aliases.extend(doc.path_aliases);

    Some(TsConfig {
        path_aliases,
        base_url: doc.base_url.or(base_url),
        extends: doc.extends,
    })
}

fn locate_parent(dir: &Path, reference: &str) -> Option<PathBuf> {
    let candidate = dir.join(reference);
    if candidate.is_file() {
        return Some(candidate);
    }
    if !reference.ends_with(".json") {
        let with_ext = dir.join(format!("{reference}.json"));
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }
    None
}

/// Searches `start` and its ancestors for a configuration document.
///
/// A relative `start` is anchored at the process working directory so the
/// search can climb above it.
#[must_use]
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| start.to_path_buf(), |cwd| cwd.join(start))
    };

    for dir in start.ancestors() {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!("found {}", candidate.display());
                return Some(candidate);
            }
        }
    }
    None
}

/// Removes `//` and `/* */` comments and trailing commas, leaving string
/// literals untouched.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    let without_comments = strip_comments(input);
    strip_trailing_commas(&without_comments)
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().copied().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}' | ']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_paths_in_document_order() {
        let doc = TsConfig::parse(
            r#"{
  "compilerOptions": {
    "baseUrl": ".",
    "paths": { "~/*": ["./src/*"], "@/*": ["./src/*"] }
  }
}"#,
        )
        .unwrap();
        let keys: Vec<&str> = doc.path_aliases.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["~/*", "@/*"]);
        assert_eq!(doc.path_aliases["@/*"], vec!["./src/*".to_string()]);
        assert_eq!(doc.base_url.as_deref(), Some("."));
    }

    #[test]
    fn parses_jsonc_with_comments_and_trailing_commas() {
        let doc = TsConfig::parse(
            r#"{
  // base config
  "extends": "./tsconfig.base.json", /* inline */
  "compilerOptions": {
    "paths": {
      "@/*": ["./src/*"],
    },
  },
}"#,
        )
        .unwrap();
        assert_eq!(doc.extends, vec!["./tsconfig.base.json".to_string()]);
        assert!(doc.path_aliases.contains_key("@/*"));
    }

    #[test]
    fn comment_markers_inside_strings_survive() {
        let stripped = strip_jsonc(r#"{"a": "http://x/*y*/", "b": "q\"//"}"#);
        assert_eq!(stripped, r#"{"a": "http://x/*y*/", "b": "q\"//"}"#);
    }

    #[test]
    fn extends_array_is_accepted() {
        let doc = TsConfig::parse(r#"{"extends": ["./a.json", "./b.json"]}"#).unwrap();
        assert_eq!(doc.extends.len(), 2);
        assert!(doc.path_aliases.is_empty());
    }

    #[test]
    fn invalid_document_is_an_error() {
        assert!(TsConfig::parse("{ not json").is_err());
        assert!(TsConfig::parse(r#"{"compilerOptions": 3}"#).is_err());
    }

    #[test]
    fn merge_child_overrides_parent() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("base.json"),
            r#"{"compilerOptions": {"baseUrl": "base", "paths": {"@base/*": ["a/*"], "@/*": ["parent/*"]}}}"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("tsconfig.json"),
            r#"{"extends": "./base", "compilerOptions": {"paths": {"@/*": ["child/*"]}}}"#,
        )
        .unwrap();

        let merged = TsConfig::load_merged(&tmp.path().join("tsconfig.json")).unwrap();
        let keys: Vec<&str> = merged.path_aliases.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@base/*", "@/*"]);
        assert_eq!(merged.path_aliases["@/*"], vec!["child/*".to_string()]);
        assert_eq!(merged.base_url.as_deref(), Some("base"));
    }

    #[test]
    fn missing_parent_ends_chain() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("tsconfig.json"),
            r#"{"extends": "./nope.json", "compilerOptions": {"paths": {"@/*": ["src/*"]}}}"#,
        )
        .unwrap();

        let merged = TsConfig::load_merged(&tmp.path().join("tsconfig.json")).unwrap();
        assert_eq!(merged.path_aliases.len(), 1);
    }

    #[test]
    fn cycle_terminates() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.json"),
            r#"{"extends": "./b.json", "compilerOptions": {"paths": {"@a/*": ["a/*"]}}}"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("b.json"),
            r#"{"extends": "./a.json", "compilerOptions": {"paths": {"@b/*": ["b/*"]}}}"#,
        )
        .unwrap();

        let merged = TsConfig::load_merged(&tmp.path().join("a.json")).unwrap();
        let keys: Vec<&str> = merged.path_aliases.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@b/*", "@a/*"]);
    }

    #[test]
    fn unreadable_root_document_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(TsConfig::load_merged(&tmp.path().join("missing.json")).is_none());
    }

    #[test]
    fn find_config_searches_upward() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("src/features/auth");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("tsconfig.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(tmp.path().join("tsconfig.json")));
    }

    #[test]
    fn find_config_prefers_nearest_document() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("packages/web");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("tsconfig.json"), "{}").unwrap();
        fs::write(nested.join("jsconfig.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("jsconfig.json")));
    }
}
