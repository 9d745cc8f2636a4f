//! Path normalization and slice classification.
//!
//! Everything here is pure string manipulation: no filesystem access,
//! no knowledge of where files really live.

use std::path::Path;

use crate::aliases::AliasSet;
use crate::edge::{is_relative_specifier, ImportEdge};
use crate::layer::{Layer, Slice};

/// Converts back-slashes to forward-slashes and strips the first matching
/// alias prefix (longest first) exactly once.
#[must_use]
pub fn normalize_path(path: &str, aliases: &AliasSet) -> String {
    strip_alias(path, aliases).0
}

/// Like [`normalize_path`], also reporting which alias was stripped.
fn strip_alias(path: &str, aliases: &AliasSet) -> (String, Option<String>) {
    let slashed = path.replace('\\', "/");
    match aliases.match_prefix(&slashed) {
        Some(prefix) => (slashed[prefix.len()..].to_string(), Some(prefix.to_string())),
        None => (slashed, None),
    }
}

/// Classifies a normalized path into its slice.
///
/// Matches `^(layer)/([^/]+)`. Returns `None` for paths outside the
/// governed architecture.
#[must_use]
pub fn classify(normalized: &str) -> Option<Slice> {
    let (root, rest) = normalized.split_once('/')?;
    let layer: Layer = root.parse().ok()?;
    let name = rest.split('/').next().filter(|n| !n.is_empty())?;
    Some(Slice::new(layer, name))
}

/// Turns a file path into a `/`-separated path relative to the source tree
/// root. Paths outside `root` are returned slash-normalized but otherwise
/// untouched.
#[must_use]
pub fn tree_path(file: &Path, root: Option<&Path>) -> String {
    let file = file.to_string_lossy().replace('\\', "/");
    let file = file.strip_prefix("./").unwrap_or(&file);

    let Some(root) = root else {
        return file.to_string();
    };
    let root = root.to_string_lossy().replace('\\', "/");
    let root = root.strip_prefix("./").unwrap_or(&root).trim_end_matches('/');
    if root.is_empty() || root == "." {
        return file.to_string();
    }

    file.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(file)
        .to_string()
}

/// Resolves a relative specifier against the directory of `from_file`
/// (both tree-relative). Returns `None` when the result climbs above the
/// tree root.
#[must_use]
pub fn resolve_relative(from_file: &str, specifier: &str) -> Option<String> {
    let mut segments: Vec<&str> = from_file.split('/').collect();
    segments.pop();

    for part in specifier.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.join("/"))
}

/// Computes the relative specifier that reaches `target` from the directory
/// of `from_file` (both tree-relative).
#[must_use]
pub fn relative_specifier(from_file: &str, target: &str) -> String {
    let mut from_dir: Vec<&str> = from_file.split('/').collect();
    from_dir.pop();
    let target: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_dir.len() - common;
    let rest = target[common..].join("/");

    if ups == 0 {
        return if rest.is_empty() {
            ".".to_string()
        } else {
            format!("./{rest}")
        };
    }

    let mut parts = vec![".."; ups].join("/");
    if !rest.is_empty() {
        parts.push('/');
        parts.push_str(&rest);
    }
    parts
}

/// Classifier output shared by every rule evaluating one [`ImportEdge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceContext {
    /// Tree-relative path of the importing file.
    pub from_path: String,
    /// Slice of the importing file.
    pub from: Option<Slice>,
    /// Slice of the import target.
    pub to: Option<Slice>,
    /// Normalized import target (alias stripped, relative paths resolved).
    pub target: String,
    /// Alias prefix stripped from the specifier, if any.
    pub alias: Option<String>,
    /// Whether the specifier was written relative to the importing file.
    pub relative: bool,
}

impl SliceContext {
    /// Classifies both ends of an edge.
    ///
    /// `from_path` is the importing file relative to the source tree root.
    #[must_use]
    pub fn classify_edge(from_path: &str, edge: &ImportEdge, aliases: &AliasSet) -> Self {
        let from_path = from_path.replace('\\', "/");
        let from = classify(&from_path);

        let relative = is_relative_specifier(&edge.specifier);
        let (target, alias) = if relative {
            match resolve_relative(&from_path, &edge.specifier) {
                Some(resolved) => (resolved, None),
                None => (edge.specifier.replace('\\', "/"), None),
            }
        } else {
            strip_alias(&edge.specifier, aliases)
        };

        let to = if is_relative_specifier(&target) {
            None
        } else {
            classify(&target)
        };

        Self {
            from_path,
            from,
            to,
            target,
            alias,
            relative,
        }
    }

    /// Whether both ends classify and belong to the same slice.
    #[must_use]
    pub fn is_same_slice(&self) -> bool {
        matches!((&self.from, &self.to), (Some(f), Some(t)) if f == t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> AliasSet {
        AliasSet::new(["@/", "~/", "@/shared-alias/"])
    }

    #[test]
    fn normalize_strips_alias_once() {
        assert_eq!(normalize_path("@/entities/user", &aliases()), "entities/user");
        assert_eq!(normalize_path("~/pages/home", &aliases()), "pages/home");
    }

    #[test]
    fn normalize_prefers_longest_alias() {
        assert_eq!(
            normalize_path("@/shared-alias/ui/Button", &aliases()),
            "ui/Button"
        );
    }

    #[test]
    fn normalize_converts_backslashes() {
        assert_eq!(
            normalize_path("@\\entities\\user\\model", &aliases()),
            "entities/user/model"
        );
        assert_eq!(normalize_path("react", &aliases()), "react");
    }

    #[test]
    fn normalize_is_idempotent_for_single_alias_paths() {
        for p in ["@/features/auth", "entities/user/lib", "lodash", "~/app/store"] {
            let once = normalize_path(p, &aliases());
            assert_eq!(normalize_path(&once, &aliases()), once);
        }
    }

    #[test]
    fn classify_layer_paths() {
        assert_eq!(
            classify("entities/user/model/types"),
            Some(Slice::new(Layer::Entities, "user"))
        );
        assert_eq!(classify("app/providers"), Some(Slice::new(Layer::App, "providers")));
    }

    #[test]
    fn classify_rejects_non_layer_paths() {
        assert_eq!(classify("react"), None);
        assert_eq!(classify("entities"), None);
        assert_eq!(classify("entities/"), None);
        assert_eq!(classify("src/entities/user"), None);
        assert_eq!(classify("sharedx/ui"), None);
    }

    #[test]
    fn classify_round_trips_slice_identity() {
        for layer in Layer::ALL {
            let slice = Slice::new(layer, "thing");
            let path = format!("{}/arbitrary/suffix", slice.full_path());
            assert_eq!(classify(&path), Some(slice));
        }
    }

    #[test]
    fn tree_path_strips_root() {
        assert_eq!(
            tree_path(Path::new("src/entities/user/model.ts"), Some(Path::new("src"))),
            "entities/user/model.ts"
        );
        assert_eq!(
            tree_path(Path::new("./src/app/index.ts"), Some(Path::new("./src/"))),
            "app/index.ts"
        );
        assert_eq!(
            tree_path(Path::new("features/auth/ui.ts"), None),
            "features/auth/ui.ts"
        );
        assert_eq!(
            tree_path(Path::new("lib/other.ts"), Some(Path::new("src"))),
            "lib/other.ts"
        );
    }

    #[test]
    fn resolve_relative_paths() {
        assert_eq!(
            resolve_relative("features/auth/ui/Form.tsx", "../model/slice").as_deref(),
            Some("features/auth/model/slice")
        );
        assert_eq!(
            resolve_relative("features/auth/ui/Form.tsx", "../../../entities/user").as_deref(),
            Some("entities/user")
        );
        assert_eq!(resolve_relative("app/index.ts", "../../outside"), None);
    }

    #[test]
    fn relative_specifier_paths() {
        assert_eq!(
            relative_specifier("entities/user/model.ts", "entities/user/lib/helper"),
            "./lib/helper"
        );
        assert_eq!(
            relative_specifier("entities/user/ui/Card.tsx", "entities/user/model/types"),
            "../model/types"
        );
        assert_eq!(relative_specifier("entities/user/index.ts", "entities/user"), ".");
        assert_eq!(relative_specifier("entities/user/ui/Card.tsx", "entities/user"), "..");
    }

    #[test]
    fn context_classifies_aliased_edge() {
        let edge = ImportEdge::new("src/features/auth/model.ts", "@/entities/user");
        let ctx = SliceContext::classify_edge("features/auth/model.ts", &edge, &aliases());
        assert_eq!(ctx.from, Some(Slice::new(Layer::Features, "auth")));
        assert_eq!(ctx.to, Some(Slice::new(Layer::Entities, "user")));
        assert_eq!(ctx.target, "entities/user");
        assert_eq!(ctx.alias.as_deref(), Some("@/"));
        assert!(!ctx.relative);
        assert!(!ctx.is_same_slice());
    }

    #[test]
    fn context_resolves_relative_edge() {
        let edge = ImportEdge::new("features/auth/ui/Form.tsx", "../../../entities/user/lib");
        let ctx = SliceContext::classify_edge("features/auth/ui/Form.tsx", &edge, &aliases());
        assert_eq!(ctx.to, Some(Slice::new(Layer::Entities, "user")));
        assert_eq!(ctx.target, "entities/user/lib");
        assert!(ctx.alias.is_none());
        assert!(ctx.relative);
    }

    #[test]
    fn context_ignores_packages() {
        let edge = ImportEdge::new("features/auth/ui/Form.tsx", "react");
        let ctx = SliceContext::classify_edge("features/auth/ui/Form.tsx", &edge, &aliases());
        assert!(ctx.to.is_none());
        assert!(!ctx.is_same_slice());
    }
}
