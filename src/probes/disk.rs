// Partition enumeration with per-mount fail-soft usage reads

use std::io;
use std::path::PathBuf;

use crate::models::PartitionStat;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub free: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mountpoint: PathBuf,
    pub filesystem: String,
    /// Usage as reported by the enumeration source, before the mountpoint is checked.
    pub reported: DiskUsage,
}

/// Builds one `PartitionStat` per mount whose usage can be read.
/// Mounts failing with `PermissionDenied` (or any other IO error) are skipped.
pub fn collect_partitions<I, F>(mounts: I, mut usage: F) -> Vec<PartitionStat>
where
    I: IntoIterator<Item = MountEntry>,
    F: FnMut(&MountEntry) -> io::Result<DiskUsage>,
{
    let mut partitions = Vec::new();
    for mount in mounts {
        match usage(&mount) {
            Ok(u) => partitions.push(PartitionStat::new(
                mount.device,
                mount.mountpoint.to_string_lossy().into_owned(),
                mount.filesystem,
                u.total,
                u.free,
            )),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::debug!(mountpoint = %mount.mountpoint.display(), "skipping partition: permission denied");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    mountpoint = %mount.mountpoint.display(),
                    operation = "disk_usage",
                    "skipping partition"
                );
            }
        }
    }
    partitions
}

