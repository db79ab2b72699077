//! # Raw Partition Device Grammar
//!
//! The closed set of kernel block-device naming schemes that denote a single disk
//! *partition*. Whole disks, loop devices, optical drives, generic SCSI nodes, network
//! block devices, tapes and RAID arrays are not representable here.
//!
//! Numbering follows `Documentation/admin-guide/devices.txt`. Only common families are
//! listed; Acorn MFM, ACSI, parallel port IDE/ATAPI and USB block devices are skipped.
//!
//! ## Structure
//!
//! Each [`DeviceFamily`] owns a shape matcher (compiled once on first use) that splits a
//! kernel name into its identifier and partition fields, followed by explicit numeric
//! bound checks. Families use disjoint prefixes, so at most one can ever match a name.
//!
//! Numeric fields are decimal without leading zeros. Partition `0` names the whole disk
//! and is always rejected.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Every device node lives directly under this directory.
pub const DEVICE_DIR_PREFIX: &str = "/dev/";

/// Highest partition number accepted for the 63-partition families.
pub const MAX_PARTITION: u32 = 63;

/// SCSI and I2O disks only expose 15 minors per disk.
pub const MAX_PARTITION_SMALL: u32 = 15;

/// Highest NVMe namespace number accepted.
pub const MAX_NVME_NAMESPACE: u32 = 63;

static HD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^hd([a-z]+)([0-9]+)$").expect("hd shape regex must compile"));

static SD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sd([a-z]+)([0-9]+)$").expect("sd shape regex must compile"));

static I2O_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^i2o/hd([a-z]+)([0-9]+)$").expect("i2o shape regex must compile")
});

static MMC_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^mmcblk([0-9]+)p([0-9]+)$").expect("mmc shape regex must compile")
});

static NVME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^nvme([0-9]+)(?:n([0-9]+))?p([0-9]+)$").expect("nvme shape regex must compile")
});

static VD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^vd([a-z]+)([0-9]+)$").expect("vd shape regex must compile"));

/// A kernel bus/controller class with its own partition naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFamily {
    /// IDE, MFM and RLL disks: `hda`-`hdt`, partitions 1-63.
    Ide,
    /// SCSI disks: `sda`-`sdiv`, partitions 1-15.
    Scsi,
    /// I2O disks: `i2o/hda`-`i2o/hddx`, partitions 1-15.
    I2o,
    /// MMC block devices: `mmcblk0`-`mmcblk999`, partitions 1-63.
    ///
    /// The partition count is a kernel command line setting (Ubuntu uses 32), so 63 leaves
    /// headroom.
    Mmc,
    /// NVMe controllers `nvme0`-`nvme99`, optional namespace 1-63, partitions 1-63.
    Nvme,
    /// virtio block devices: `vda`-`vdz`, partitions 1-63.
    Virtio,
}

/// A kernel name that matched one family within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceNode {
    pub family: DeviceFamily,
    /// Zero-based disk index (letters) or controller number (digits).
    pub disk: u32,
    /// NVMe namespace, when present.
    pub namespace: Option<u32>,
    pub partition: u32,
}

impl DeviceFamily {
    pub const ALL: [DeviceFamily; 6] = [
        DeviceFamily::Ide,
        DeviceFamily::Scsi,
        DeviceFamily::I2o,
        DeviceFamily::Mmc,
        DeviceFamily::Nvme,
        DeviceFamily::Virtio,
    ];

    /// Short label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            DeviceFamily::Ide => "ide",
            DeviceFamily::Scsi => "scsi",
            DeviceFamily::I2o => "i2o",
            DeviceFamily::Mmc => "mmc",
            DeviceFamily::Nvme => "nvme",
            DeviceFamily::Virtio => "virtio",
        }
    }

    /// Highest disk index (letters) or controller number (digits).
    pub fn max_disk(self) -> u32 {
        match self {
            DeviceFamily::Ide => 19,
            DeviceFamily::Scsi => 255,
            DeviceFamily::I2o => 127,
            DeviceFamily::Mmc => 999,
            DeviceFamily::Nvme => 99,
            DeviceFamily::Virtio => 25,
        }
    }

    /// Highest partition number; the lowest is always 1.
    pub fn max_partition(self) -> u32 {
        match self {
            DeviceFamily::Scsi | DeviceFamily::I2o => MAX_PARTITION_SMALL,
            _ => MAX_PARTITION,
        }
    }

    /// Match a kernel name (the path below `/dev/`) against this family only.
    pub fn match_kernel_name(self, name: &str) -> Option<DeviceNode> {
        let (disk, namespace, partition) = match self {
            DeviceFamily::Ide => lettered(&HD_SHAPE, name)?,
            DeviceFamily::Scsi => lettered(&SD_SHAPE, name)?,
            DeviceFamily::I2o => lettered(&I2O_SHAPE, name)?,
            DeviceFamily::Virtio => lettered(&VD_SHAPE, name)?,
            DeviceFamily::Mmc => {
                let caps = MMC_SHAPE.captures(name)?;
                (number(&caps[1])?, None, number(&caps[2])?)
            }
            DeviceFamily::Nvme => {
                let caps = NVME_SHAPE.captures(name)?;
                let namespace = match caps.get(2) {
                    Some(ns) => Some(number(ns.as_str())?),
                    None => None,
                };
                (number(&caps[1])?, namespace, number(&caps[3])?)
            }
        };

        if disk > self.max_disk() {
            return None;
        }
        if !(1..=self.max_partition()).contains(&partition) {
            return None;
        }
        if let Some(ns) = namespace
            && !(1..=MAX_NVME_NAMESPACE).contains(&ns)
        {
            return None;
        }

        Some(DeviceNode {
            family: self,
            disk,
            namespace,
            partition,
        })
    }

    /// Render the kernel name for the given fields. Used to enumerate the grammar in tests
    /// and diagnostics; the output is not bound-checked.
    pub fn kernel_name(self, disk: u32, namespace: Option<u32>, partition: u32) -> String {
        match self {
            DeviceFamily::Ide => format!("hd{}{partition}", disk_letters(disk)),
            DeviceFamily::Scsi => format!("sd{}{partition}", disk_letters(disk)),
            DeviceFamily::I2o => format!("i2o/hd{}{partition}", disk_letters(disk)),
            DeviceFamily::Virtio => format!("vd{}{partition}", disk_letters(disk)),
            DeviceFamily::Mmc => format!("mmcblk{disk}p{partition}"),
            DeviceFamily::Nvme => match namespace {
                Some(ns) => format!("nvme{disk}n{ns}p{partition}"),
                None => format!("nvme{disk}p{partition}"),
            },
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Match a canonical path against the union of all families.
///
/// The whole string must match: `/dev/` followed by exactly one family's name.
pub fn match_device_path(path: &str) -> Option<DeviceNode> {
    let name = path.strip_prefix(DEVICE_DIR_PREFIX)?;
    DeviceFamily::ALL
        .iter()
        .find_map(|family| family.match_kernel_name(name))
}

fn lettered(shape: &Regex, name: &str) -> Option<(u32, Option<u32>, u32)> {
    let caps = shape.captures(name)?;
    Some((letters_index(&caps[1])?, None, number(&caps[2])?))
}

/// Decode a disk letter sequence (`a`=0 .. `z`=25, `aa`=26 ..).
///
/// Sequences longer than two letters are never assigned by the families here.
fn letters_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 2 {
        return None;
    }
    let value = letters
        .bytes()
        .fold(0u32, |acc, b| acc * 26 + u32::from(b - b'a') + 1);
    Some(value - 1)
}

/// Inverse of [`letters_index`] for indices below 702.
pub fn disk_letters(index: u32) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'a' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Parse a decimal field, rejecting leading zeros and overflow.
fn number(digits: &str) -> Option<u32> {
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}
