//! # Device Path Validation
//!
//! The single preparation-time gate for raw partition slots. A slot's `path` attribute is
//! canonicalized lexically and then must match exactly one [`DeviceFamily`] within its
//! numeric bounds. Anything else is a configuration error and the slot is never installed.
//!
//! [`DeviceFamily`]: crate::grammar::DeviceFamily

use tracing::debug;

use crate::canonical::CanonicalPath;
use crate::error::InterfaceError;
use crate::grammar::{DeviceNode, match_device_path};
use crate::host::Attrs;

/// Name of the slot attribute holding the device node path.
pub const PATH_ATTR: &str = "path";

/// A canonical path proven to name a raw partition node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDevice {
    pub path: CanonicalPath,
    pub node: DeviceNode,
}

/// Canonicalize `raw` and match it against the partition grammar.
pub fn validate_device_path(raw: &str) -> Option<ValidatedDevice> {
    let path = CanonicalPath::new(raw);
    let node = match_device_path(path.as_str())?;
    Some(ValidatedDevice { path, node })
}

/// Validate a slot's declared attributes on behalf of `interface`.
///
/// Fails with [`InterfaceError::MissingPathAttribute`] when `path` is absent, not a string
/// or empty, and with [`InterfaceError::InvalidDevicePath`] when its canonical form is not
/// a recognized partition node.
pub fn validate_slot_attrs(
    interface: &str,
    attrs: &Attrs,
) -> Result<ValidatedDevice, InterfaceError> {
    let raw = attrs
        .get(PATH_ATTR)
        .and_then(|value| value.as_str())
        .filter(|path| !path.is_empty())
        .ok_or_else(|| InterfaceError::MissingPathAttribute {
            interface: interface.to_string(),
        })?;

    match validate_device_path(raw) {
        Some(device) => {
            debug!(
                interface,
                path = %device.path,
                family = %device.node.family,
                "accepted raw partition device"
            );
            Ok(device)
        }
        None => {
            let canonical = CanonicalPath::new(raw);
            debug!(interface, raw, path = %canonical, "rejected device path");
            Err(InterfaceError::InvalidDevicePath {
                interface: interface.to_string(),
                path: canonical.into_string(),
            })
        }
    }
}
