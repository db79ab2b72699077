//! # Host Connection Model
//!
//! The slot/plug carriers handed to interfaces by the host framework. A slot offers a
//! capability, a plug consumes it, and a connection pairs one of each. Only the parts an
//! interface reads are modelled here: identity and attributes.
//!
//! Attributes are arbitrary JSON values, since declarations come from YAML/JSON/TOML and
//! may carry any type. Interfaces must check the type they expect.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::AttrError;

/// Static attributes declared on a slot or plug.
pub type Attrs = BTreeMap<String, Value>;

/// A slot as declared, before any connection exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotInfo {
    pub snap: String,
    pub name: String,
    pub interface: String,
    pub attrs: Attrs,
}

/// A plug as declared, before any connection exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlugInfo {
    pub snap: String,
    pub name: String,
    pub interface: String,
    pub attrs: Attrs,
}

impl SlotInfo {
    pub fn new(
        snap: impl Into<String>,
        name: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            snap: snap.into(),
            name: name.into(),
            interface: interface.into(),
            attrs: Attrs::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}

impl PlugInfo {
    pub fn new(
        snap: impl Into<String>,
        name: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            snap: snap.into(),
            name: name.into(),
            interface: interface.into(),
            attrs: Attrs::new(),
        }
    }
}

/// Read-only attribute view of a connected slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedSlot {
    info: SlotInfo,
    dynamic_attrs: Attrs,
}

/// Read-only attribute view of a connected plug.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedPlug {
    info: PlugInfo,
    dynamic_attrs: Attrs,
}

impl ConnectedSlot {
    pub fn new(info: SlotInfo, dynamic_attrs: Attrs) -> Self {
        Self {
            info,
            dynamic_attrs,
        }
    }

    pub fn info(&self) -> &SlotInfo {
        &self.info
    }

    /// Look up an attribute; dynamic (connection-time) values shadow static ones.
    pub fn attr(&self, key: &str) -> Result<&Value, AttrError> {
        lookup(key, &self.dynamic_attrs, &self.info.attrs)
    }

    pub fn attr_str(&self, key: &str) -> Result<&str, AttrError> {
        as_str(key, self.attr(key)?)
    }
}

impl ConnectedPlug {
    pub fn new(info: PlugInfo, dynamic_attrs: Attrs) -> Self {
        Self {
            info,
            dynamic_attrs,
        }
    }

    pub fn info(&self) -> &PlugInfo {
        &self.info
    }

    pub fn attr(&self, key: &str) -> Result<&Value, AttrError> {
        lookup(key, &self.dynamic_attrs, &self.info.attrs)
    }

    pub fn attr_str(&self, key: &str) -> Result<&str, AttrError> {
        as_str(key, self.attr(key)?)
    }
}

fn lookup<'a>(
    key: &str,
    dynamic: &'a Attrs,
    declared: &'a Attrs,
) -> Result<&'a Value, AttrError> {
    dynamic
        .get(key)
        .or_else(|| declared.get(key))
        .ok_or_else(|| AttrError::Missing {
            key: key.to_string(),
        })
}

fn as_str<'a>(key: &str, value: &'a Value) -> Result<&'a str, AttrError> {
    value.as_str().ok_or_else(|| AttrError::WrongType {
        key: key.to_string(),
        expected: "string",
    })
}
