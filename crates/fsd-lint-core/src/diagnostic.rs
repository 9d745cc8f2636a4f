//! Structured rule diagnostics.
//!
//! Each diagnostic carries exactly the data needed to re-derive the fix,
//! e.g. `expectedPath` is the literal corrected specifier.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::layer::Layer;

/// A rule finding for one import edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id", content = "data", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A lower layer imports from a higher layer.
    #[serde(rename_all = "camelCase")]
    LayerViolation {
        /// Layer of the importing file.
        from_layer: Layer,
        /// Layer of the import target.
        to_layer: Layer,
    },
    /// Same-layer sibling import without escape notation.
    #[serde(rename_all = "camelCase")]
    CrossImportViolation {
        /// Importing slice, `layer/name`.
        from_slice: String,
        /// Imported slice, `layer/name`.
        to_slice: String,
    },
    /// Escape notation naming a slice other than the importer.
    #[serde(rename_all = "camelCase")]
    InvalidCrossNotation {
        /// Importing slice, `layer/name`.
        from_slice: String,
        /// Specifier as written.
        import_path: String,
        /// Specifier with the escape segment naming the importer.
        expected_path: String,
    },
    /// Import reaching into another slice's internals.
    #[serde(rename_all = "camelCase")]
    PublicApiViolation {
        /// Imported slice, `layer/name`.
        slice: String,
        /// The slice's public entry point.
        public_api: String,
    },
    /// Absolute or aliased import into the importer's own slice.
    PathViolation,
}

impl Diagnostic {
    /// Diagnostic id, e.g. `"layerViolation"`.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::LayerViolation { .. } => "layerViolation",
            Self::CrossImportViolation { .. } => "crossImportViolation",
            Self::InvalidCrossNotation { .. } => "invalidCrossNotation",
            Self::PublicApiViolation { .. } => "publicApiViolation",
            Self::PathViolation => "pathViolation",
        }
    }

    /// Diagnostic data as an ordered string map.
    #[must_use]
    pub fn data(&self) -> IndexMap<&'static str, String> {
        let mut data = IndexMap::new();
        match self {
            Self::LayerViolation {
                from_layer,
                to_layer,
            } => {
                data.insert("fromLayer", from_layer.to_string());
                data.insert("toLayer", to_layer.to_string());
            }
            Self::CrossImportViolation {
                from_slice,
                to_slice,
            } => {
                data.insert("fromSlice", from_slice.clone());
                data.insert("toSlice", to_slice.clone());
            }
            Self::InvalidCrossNotation {
                from_slice,
                import_path,
                expected_path,
            } => {
                data.insert("fromSlice", from_slice.clone());
                data.insert("importPath", import_path.clone());
                data.insert("expectedPath", expected_path.clone());
            }
            Self::PublicApiViolation { slice, public_api } => {
                data.insert("slice", slice.clone());
                data.insert("publicApi", public_api.clone());
            }
            Self::PathViolation => {}
        }
        data
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::LayerViolation {
                from_layer,
                to_layer,
            } => format!(
                "layer `{from_layer}` must not import from higher layer `{to_layer}`"
            ),
            Self::CrossImportViolation {
                from_slice,
                to_slice,
            } => format!(
                "`{from_slice}` must not import sibling slice `{to_slice}`; use `@x/` notation if this dependency is intended"
            ),
            Self::InvalidCrossNotation {
                from_slice,
                import_path,
                expected_path,
            } => format!(
                "cross-import `{import_path}` from `{from_slice}` must name the importing slice: `{expected_path}`"
            ),
            Self::PublicApiViolation { slice, public_api } => format!(
                "imports from `{slice}` must go through its public API `{public_api}`"
            ),
            Self::PathViolation => {
                "imports within the same slice must be relative".to_string()
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id(), self.message())
    }
}
