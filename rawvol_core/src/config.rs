//! # Slot Manifests
//!
//! Operators describe the slots a gadget or core snap will offer in a manifest file, so
//! they can be checked before the snap is built. A manifest is a list of slot
//! declarations:
//!
//! ```toml
//! [[slots]]
//! snap = "pc"
//! name = "data-partition"
//! interface = "raw-volume"
//! attrs = { path = "/dev/sda3" }
//! ```
//!
//! JSON manifests use the same structure. Attribute values may be of any type; the
//! interface decides which types it accepts.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ManifestError;
use crate::host::{Attrs, SlotInfo};

/// A set of slot declarations loaded from one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotManifest {
    #[serde(default)]
    pub slots: Vec<SlotDeclaration>,
}

/// One declared slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotDeclaration {
    pub snap: String,
    pub name: String,
    pub interface: String,
    #[serde(default)]
    pub attrs: Attrs,
}

impl SlotDeclaration {
    pub fn to_slot_info(&self) -> SlotInfo {
        SlotInfo {
            snap: self.snap.clone(),
            name: self.name.clone(),
            interface: self.interface.clone(),
            attrs: self.attrs.clone(),
        }
    }
}

impl SlotManifest {
    /// Load a manifest, choosing the parser from the file extension.
    pub fn load_from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content).map_err(|source| ManifestError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Some("toml") => Self::from_toml(&content).map_err(|source| ManifestError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(ManifestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Whether `path` has an extension [`SlotManifest::load_from_file`] understands.
pub fn is_manifest_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("json") | Some("toml")
    )
}
