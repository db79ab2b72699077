//! # Raw Volume Access
//!
//! Before a confined application is granted raw read/write access to a disk partition,
//! the requested device path must be proven to name an actual partition node, never a
//! whole disk, loop device, CD-ROM, network block device or tape. This crate provides
//! that proof and turns it into the access-control artifacts consumed by the
//! enforcement subsystems.
//!
//! ## Components
//!
//! - **`grammar`**: the six recognized partition naming families and their numeric bounds.
//! - **`canonical`**: purely lexical path cleaning.
//! - **`validator`**: the preparation-time gate combining the two.
//! - **`synthesizer`**: renders the access-control snippet and the device tag rule.
//! - **`interfaces`**: the `Interface` trait and the `raw-volume` implementation the host
//!   framework calls into.
//! - **`registry`**: the explicit composition root listing built-in interfaces.
//!
//! Supporting modules: `host` (slot/plug carriers), `apparmor` and `udev` (seams to the
//! enforcement subsystems), `config` (slot manifests), `error`, and `utils::logging`.
//!
//! Everything is synchronous and free of I/O apart from manifest loading and logging
//! setup. The grammar is compiled once and shared read-only.
//!
//! ## Example
//!
//! ```
//! use rawvol_core::apparmor::SnippetSet;
//! use rawvol_core::host::{Attrs, ConnectedPlug, ConnectedSlot, PlugInfo, SlotInfo};
//! use rawvol_core::registry::Registry;
//!
//! let registry = Registry::with_builtins();
//! let slot = SlotInfo::new("pc", "data", "raw-volume").with_attr("path", "/dev/sda3");
//! registry.prepare_slot(&slot).unwrap();
//!
//! let iface = registry.get("raw-volume").unwrap();
//! let plug = ConnectedPlug::new(PlugInfo::new("app", "data", "raw-volume"), Attrs::new());
//! let slot = ConnectedSlot::new(slot, Attrs::new());
//! let mut spec = SnippetSet::new();
//! iface.apparmor_connected_plug(&mut spec, &plug, &slot).unwrap();
//! assert!(spec.render().contains("/dev/sda3 rw,"));
//! ```

pub mod apparmor;
pub mod canonical;
pub mod config;
pub mod error;
pub mod grammar;
pub mod host;
pub mod interfaces;
pub mod registry;
pub mod synthesizer;
pub mod udev;
pub mod utils;
pub mod validator;

pub use canonical::CanonicalPath;
pub use error::{AttrError, InterfaceError, ManifestError};
pub use grammar::{DeviceFamily, DeviceNode};
pub use interfaces::{Interface, RawVolumeInterface, StaticInfo};
pub use registry::Registry;
pub use validator::{ValidatedDevice, validate_device_path};
