//! Composition root for the built-in interfaces.
//!
//! The set is assembled explicitly by [`builtin_interfaces`]; there is no global registry
//! and nothing registers itself at startup.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::InterfaceError;
use crate::host::SlotInfo;
use crate::interfaces::{Interface, RawVolumeInterface};

/// Every interface this crate provides, in a fixed order.
pub fn builtin_interfaces() -> Vec<Box<dyn Interface>> {
    vec![Box::new(RawVolumeInterface)]
}

/// Interfaces indexed by name.
#[derive(Debug)]
pub struct Registry {
    interfaces: BTreeMap<&'static str, Box<dyn Interface>>,
}

impl Registry {
    /// Build from an explicit list. Later entries with a duplicate name are ignored.
    pub fn new(interfaces: Vec<Box<dyn Interface>>) -> Self {
        let mut by_name = BTreeMap::new();
        for iface in interfaces {
            let name = iface.name();
            if by_name.contains_key(name) {
                warn!(interface = name, "duplicate interface ignored");
                continue;
            }
            by_name.insert(name, iface);
        }
        Self {
            interfaces: by_name,
        }
    }

    pub fn with_builtins() -> Self {
        Self::new(builtin_interfaces())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Interface> {
        self.interfaces.get(name).map(|iface| iface.as_ref())
    }

    /// Interface names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.interfaces.keys().copied()
    }

    /// Run the preparation-time check of the slot's interface.
    pub fn prepare_slot(&self, slot: &SlotInfo) -> Result<(), InterfaceError> {
        let iface = self
            .get(&slot.interface)
            .ok_or_else(|| InterfaceError::UnknownInterface {
                name: slot.interface.clone(),
            })?;
        iface.before_prepare_slot(slot)?;
        debug!(snap = %slot.snap, slot = %slot.name, interface = iface.name(), "slot prepared");
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
