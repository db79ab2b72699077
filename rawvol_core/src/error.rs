use std::path::PathBuf;

/// Preparation-time configuration errors. Any of these keeps the slot from being installed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterfaceError {
    /// The `path` attribute is absent, not a string, or empty.
    #[error("{interface} slot must have a path attribute")]
    MissingPathAttribute { interface: String },

    /// The canonical path is not a recognized raw partition node.
    #[error("{interface} path attribute must be a valid device node (got {path:?})")]
    InvalidDevicePath { interface: String, path: String },

    #[error("Unknown interface: {name}")]
    UnknownInterface { name: String },
}

impl InterfaceError {
    /// Short category name, stable across message wording changes.
    pub fn kind(&self) -> &'static str {
        match self {
            InterfaceError::MissingPathAttribute { .. } => "missing-attribute",
            InterfaceError::InvalidDevicePath { .. } => "invalid-device-path",
            InterfaceError::UnknownInterface { .. } => "unknown-interface",
        }
    }
}

/// Attribute lookup failures on slot and plug attribute views.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttrError {
    #[error("attribute {key:?} not found")]
    Missing { key: String },

    #[error("attribute {key:?} is not a {expected}")]
    WrongType { key: String, expected: &'static str },
}

/// Failures while loading slot manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest '{path:?}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON manifest '{path:?}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML manifest '{path:?}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported manifest format '{path:?}' (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },
}
