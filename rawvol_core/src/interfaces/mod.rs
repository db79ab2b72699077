//! # Interfaces
//!
//! An interface describes one kind of capability a slot can offer. The host framework
//! calls into it at two points:
//!
//! 1. **Preparation** (`before_prepare_slot`): once per slot, before installation. An
//!    error here rejects the slot outright.
//! 2. **Connection** (`*_connected_plug`): once per enforcement subsystem for every
//!    plug/slot connection, contributing snippets to that subsystem's specification.
//!
//! Whether a slot may be installed or auto-connected by default is decided by the
//! declarative policy in [`StaticInfo`], not here.

pub mod raw_volume;

use std::fmt;

use crate::apparmor::AppArmorSpecification;
use crate::error::InterfaceError;
use crate::host::{ConnectedPlug, ConnectedSlot, PlugInfo, SlotInfo};
use crate::udev::UdevSpecification;

pub use raw_volume::RawVolumeInterface;

/// Static description and base declarations of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticInfo {
    pub summary: &'static str,
    /// Declaration text governing plugs of this interface.
    pub base_declaration_plugs: &'static str,
    /// Declaration text governing slots of this interface.
    pub base_declaration_slots: &'static str,
}

pub trait Interface: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn static_info(&self) -> StaticInfo;

    /// Validate a slot before it is installed.
    fn before_prepare_slot(&self, slot: &SlotInfo) -> Result<(), InterfaceError>;

    /// Contribute access-control snippets for a connection.
    fn apparmor_connected_plug(
        &self,
        spec: &mut dyn AppArmorSpecification,
        plug: &ConnectedPlug,
        slot: &ConnectedSlot,
    ) -> Result<(), InterfaceError>;

    /// Contribute device tag rules for a connection.
    fn udev_connected_plug(
        &self,
        spec: &mut dyn UdevSpecification,
        plug: &ConnectedPlug,
        slot: &ConnectedSlot,
    ) -> Result<(), InterfaceError>;

    /// Whether the pair may auto-connect, before declarative policy is applied.
    fn auto_connect(&self, plug: &PlugInfo, slot: &SlotInfo) -> bool;
}

impl fmt::Display for dyn Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
