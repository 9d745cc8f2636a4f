//! Architecture layers and the slices that live inside them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six fixed Feature-Sliced Design layers.
///
/// Variants are declared in ascending rank, so the derived `Ord` agrees
/// with [`Layer::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Reusable infrastructure with no business logic.
    Shared,
    /// Business entities.
    Entities,
    /// User-facing interactions.
    Features,
    /// Composite UI blocks.
    Widgets,
    /// Full pages.
    Pages,
    /// Application bootstrap.
    App,
}

impl Layer {
    /// All layers in ascending rank order.
    pub const ALL: [Layer; 6] = [
        Layer::Shared,
        Layer::Entities,
        Layer::Features,
        Layer::Widgets,
        Layer::Pages,
        Layer::App,
    ];

    /// Position in the hierarchy; a layer may only depend on layers of
    /// equal or lower rank.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Shared => 0,
            Self::Entities => 1,
            Self::Features => 2,
            Self::Widgets => 3,
            Self::Pages => 4,
            Self::App => 5,
        }
    }

    /// Directory name of this layer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Entities => "entities",
            Self::Features => "features",
            Self::Widgets => "widgets",
            Self::Pages => "pages",
            Self::App => "app",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the six layer names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layer `{0}`")]
pub struct UnknownLayer(pub String);

impl FromStr for Layer {
    type Err = UnknownLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownLayer(s.to_string()))
    }
}

/// A named module group within a layer, identified by `layer/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slice {
    /// Owning layer.
    pub layer: Layer,
    /// Slice directory name.
    pub name: String,
}

impl Slice {
    /// Creates a new slice.
    #[must_use]
    pub fn new(layer: Layer, name: impl Into<String>) -> Self {
        Self {
            layer,
            name: name.into(),
        }
    }

    /// Identity key, `"<layer>/<name>"`.
    #[must_use]
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.layer, self.name)
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.layer, self.name)
    }
}
