//! The `raw-volume` interface: read/write access to one specific disk partition.
//!
//! Slots name the partition through a `path` attribute, e.g. `/dev/sda1`. Only gadget and
//! core snaps may declare such slots and connections are always manual.

use tracing::warn;

use super::{Interface, StaticInfo};
use crate::apparmor::AppArmorSpecification;
use crate::canonical::CanonicalPath;
use crate::error::InterfaceError;
use crate::host::{ConnectedPlug, ConnectedSlot, PlugInfo, SlotInfo};
use crate::synthesizer::{apparmor_snippet, udev_tag};
use crate::udev::UdevSpecification;
use crate::validator::{PATH_ATTR, validate_device_path, validate_slot_attrs};

pub const RAW_VOLUME: &str = "raw-volume";

const SUMMARY: &str = "allows read/write access to specific disk partition";

const BASE_DECLARATION_PLUGS: &str = r#"
  raw-volume:
    allow-installation: false
    deny-auto-connection: true
"#;

const BASE_DECLARATION_SLOTS: &str = r#"
  raw-volume:
    allow-installation:
      slot-snap-type:
        - core
        - gadget
    deny-auto-connection: true
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct RawVolumeInterface;

impl RawVolumeInterface {
    /// Canonical device path for a connection, or `None` when the slot has no usable path.
    ///
    /// The path is matched against the partition grammar again, since connection-time
    /// attributes may shadow the declared one. Preparation already rejected unusable
    /// declarations, so a skip here means the host bypassed it or replaced the path. The
    /// caller contributes nothing in that case.
    fn connected_path(&self, slot: &ConnectedSlot, subsystem: &str) -> Option<CanonicalPath> {
        let raw = match slot.attr_str(PATH_ATTR) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    interface = RAW_VOLUME,
                    subsystem,
                    slot = %slot.info().name,
                    error = %e,
                    "skipping connected plug contribution: slot path unavailable"
                );
                return None;
            }
        };

        match validate_device_path(raw) {
            Some(device) => Some(device.path),
            None => {
                warn!(
                    interface = RAW_VOLUME,
                    subsystem,
                    slot = %slot.info().name,
                    path = raw,
                    "skipping connected plug contribution: slot path is not a partition device"
                );
                None
            }
        }
    }
}

impl Interface for RawVolumeInterface {
    fn name(&self) -> &'static str {
        RAW_VOLUME
    }

    fn static_info(&self) -> StaticInfo {
        StaticInfo {
            summary: SUMMARY,
            base_declaration_plugs: BASE_DECLARATION_PLUGS,
            base_declaration_slots: BASE_DECLARATION_SLOTS,
        }
    }

    fn before_prepare_slot(&self, slot: &SlotInfo) -> Result<(), InterfaceError> {
        validate_slot_attrs(self.name(), &slot.attrs).map(|_| ())
    }

    fn apparmor_connected_plug(
        &self,
        spec: &mut dyn AppArmorSpecification,
        _plug: &ConnectedPlug,
        slot: &ConnectedSlot,
    ) -> Result<(), InterfaceError> {
        if let Some(path) = self.connected_path(slot, "apparmor") {
            spec.add_snippet(apparmor_snippet(&path));
        }
        Ok(())
    }

    fn udev_connected_plug(
        &self,
        spec: &mut dyn UdevSpecification,
        _plug: &ConnectedPlug,
        slot: &ConnectedSlot,
    ) -> Result<(), InterfaceError> {
        if let Some(path) = self.connected_path(slot, "udev") {
            spec.tag_device(udev_tag(&path));
        }
        Ok(())
    }

    fn auto_connect(&self, _plug: &PlugInfo, _slot: &SlotInfo) -> bool {
        // Allow what is allowed in the declarations.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apparmor::SnippetSet;
    use crate::host::Attrs;
    use crate::udev::TagSet;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn connection(slot: SlotInfo) -> (ConnectedPlug, ConnectedSlot) {
        let plug = PlugInfo::new("consumer", "raw-volume", RAW_VOLUME);
        (
            ConnectedPlug::new(plug, Attrs::new()),
            ConnectedSlot::new(slot, Attrs::new()),
        )
    }

    #[test]
    fn name_and_display() {
        let iface: &dyn Interface = &RawVolumeInterface;
        assert_eq!(iface.name(), "raw-volume");
        assert_eq!(iface.to_string(), "raw-volume");
    }

    #[test]
    fn static_info_denies_auto_connection() {
        let info = RawVolumeInterface.static_info();
        assert_eq!(info.summary, SUMMARY);
        assert!(info.base_declaration_plugs.contains("allow-installation: false"));
        assert!(info.base_declaration_slots.contains("- gadget"));
        assert!(info.base_declaration_slots.contains("deny-auto-connection: true"));
    }

    #[test]
    fn missing_path_at_connection_contributes_nothing() {
        let (plug, slot) = connection(SlotInfo::new("gadget", "disk", RAW_VOLUME));
        let mut snippets = SnippetSet::new();
        let mut tags = TagSet::new();

        RawVolumeInterface
            .apparmor_connected_plug(&mut snippets, &plug, &slot)
            .unwrap();
        RawVolumeInterface
            .udev_connected_plug(&mut tags, &plug, &slot)
            .unwrap();

        assert!(snippets.is_empty());
        assert!(tags.is_empty());
    }

    #[test]
    fn connection_uses_canonical_path() {
        let slot = SlotInfo::new("gadget", "disk", RAW_VOLUME).with_attr("path", "/dev/./sda1");
        let (plug, slot) = connection(slot);
        let mut snippets = SnippetSet::new();
        let mut tags = TagSet::new();

        RawVolumeInterface
            .apparmor_connected_plug(&mut snippets, &plug, &slot)
            .unwrap();
        RawVolumeInterface
            .udev_connected_plug(&mut tags, &plug, &slot)
            .unwrap();

        assert!(snippets.render().contains("\n/dev/sda1 rw,\n"));
        assert_eq!(tags.rules(), [r#"KERNEL=="sda1""#.to_string()]);
    }

    #[test]
    fn auto_connect_defers_to_declarations() {
        let plug = PlugInfo::new("consumer", "raw-volume", RAW_VOLUME);
        let slot = SlotInfo::new("gadget", "disk", RAW_VOLUME);
        assert!(RawVolumeInterface.auto_connect(&plug, &slot));
    }

    /// Shared buffer handed to a scoped `fmt` subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn captured_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn skipped_contribution_is_logged_per_subsystem() {
        let (plug, slot) = connection(SlotInfo::new("gadget", "disk", RAW_VOLUME));
        let logs = captured_logs(|| {
            RawVolumeInterface
                .apparmor_connected_plug(&mut SnippetSet::new(), &plug, &slot)
                .unwrap();
            RawVolumeInterface
                .udev_connected_plug(&mut TagSet::new(), &plug, &slot)
                .unwrap();
        });

        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("slot path unavailable"), "logs: {logs}");
        assert!(logs.contains("subsystem=\"apparmor\""), "logs: {logs}");
        assert!(logs.contains("subsystem=\"udev\""), "logs: {logs}");
    }

    #[test]
    fn replaced_path_outside_grammar_is_logged() {
        let slot = SlotInfo::new("gadget", "disk", RAW_VOLUME).with_attr("path", "/etc/shadow");
        let (plug, slot) = connection(slot);
        let mut snippets = SnippetSet::new();
        let logs = captured_logs(|| {
            RawVolumeInterface
                .apparmor_connected_plug(&mut snippets, &plug, &slot)
                .unwrap();
        });

        assert!(snippets.is_empty());
        assert!(logs.contains("not a partition device"), "logs: {logs}");
        assert!(logs.contains("subsystem=\"apparmor\""), "logs: {logs}");
    }
}
