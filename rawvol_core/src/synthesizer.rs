//! Policy snippet rendering for an accepted device path.
//!
//! Both artifacts are pure functions of the canonical path: the same path always renders
//! byte-identical text.

use crate::canonical::CanonicalPath;
use crate::grammar::DEVICE_DIR_PREFIX;

/// Only disk partitions are granted; loop, ram, CD-ROM, generic SCSI, network, tape and
/// RAID nodes never reach this template.
const CONNECTED_PLUG_APPARMOR: &str = r#"
# Description: can access disk partition read/write
{path} rw,

# needed for write access
capability sys_admin,

# allow read access to sysfs and udev for block devices
@{PROC}/devices r,
/run/udev/data/b[0-9]*:[0-9]* r,
/sys/block/ r,
/sys/devices/**/block/** r,
"#;

/// Access-control snippet granting read/write on the device node.
pub fn apparmor_snippet(path: &CanonicalPath) -> String {
    CONNECTED_PLUG_APPARMOR.replacen("{path}", path.as_str(), 1)
}

/// The kernel name: the path with the `/dev/` prefix removed.
pub fn kernel_name(path: &CanonicalPath) -> &str {
    path.as_str()
        .strip_prefix(DEVICE_DIR_PREFIX)
        .unwrap_or(path.as_str())
}

/// Device tag match expression for the node.
pub fn udev_tag(path: &CanonicalPath) -> String {
    format!(r#"KERNEL=="{}""#, kernel_name(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apparmor_snippet_substitutes_only_the_path() {
        let snippet = apparmor_snippet(&CanonicalPath::new("/dev/sda1"));
        assert!(snippet.contains("\n/dev/sda1 rw,\n"));
        assert!(snippet.contains("capability sys_admin,\n"));
        assert!(snippet.contains("@{PROC}/devices r,\n"));
        assert!(!snippet.contains("{path}"));
    }

    #[test]
    fn udev_tag_strips_device_dir() {
        assert_eq!(
            udev_tag(&CanonicalPath::new("/dev/mmcblk0p1")),
            r#"KERNEL=="mmcblk0p1""#
        );
        assert_eq!(
            udev_tag(&CanonicalPath::new("/dev/i2o/hda1")),
            r#"KERNEL=="i2o/hda1""#
        );
    }
}
