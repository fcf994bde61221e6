// Linux-specific helpers: cpufreq limits, /proc/diskstats, interface flags and speed, hwmon thresholds.

use std::collections::HashMap;
use std::path::Path;

/// Min/max CPU frequency in MHz from cpufreq (values are in kHz).
pub(super) fn read_cpu_freq_limits_mhz() -> Option<(f64, f64)> {
    #[cfg(target_os = "linux")]
    {
        let read_khz = |name: &str| -> Option<f64> {
            let path = format!("/sys/devices/system/cpu/cpu0/cpufreq/{}", name);
            std::fs::read_to_string(path).ok()?.trim().parse::<f64>().ok()
        };
        let min = read_khz("cpuinfo_min_freq")?;
        let max = read_khz("cpuinfo_max_freq")?;
        Some((min / 1000.0, max / 1000.0))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Cumulative (read_bytes, write_bytes) over whole block devices listed in /sys/block.
/// Partitions are excluded so their traffic is not counted twice.
pub(super) fn read_disk_io_counters() -> Option<(u64, u64)> {
    #[cfg(target_os = "linux")]
    {
        const SECTOR_SIZE: u64 = 512;
        let content = std::fs::read_to_string("/proc/diskstats").ok()?;
        let mut read = 0u64;
        let mut written = 0u64;
        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 10 {
                continue;
            }
            let name = fields[2];
            if !std::path::Path::new("/sys/block").join(name).exists() {
                continue;
            }
            let sectors_read = fields[5].parse::<u64>().unwrap_or(0);
            let sectors_written = fields[9].parse::<u64>().unwrap_or(0);
            read = read.saturating_add(sectors_read.saturating_mul(SECTOR_SIZE));
            written = written.saturating_add(sectors_written.saturating_mul(SECTOR_SIZE));
        }
        Some((read, written))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// IFF_UP bit of a hex `flags` value such as `0x1003`.
pub fn parse_interface_flags(flags: &str) -> Option<bool> {
    const IFF_UP: u32 = 0x1;
    let flags = u32::from_str_radix(flags.trim().trim_start_matches("0x"), 16).ok()?;
    Some(flags & IFF_UP != 0)
}

/// IFF_UP bit of /sys/class/net/<interface>/flags.
pub(super) fn read_interface_is_up(interface_name: &str) -> Option<bool> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/flags", interface_name);
        let content = std::fs::read_to_string(path).ok()?;
        parse_interface_flags(&content)
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = interface_name;
        None
    }
}

/// Link speed in Mbit/s from /sys/class/net/<interface>/speed, or 0 if unavailable.
pub(super) fn get_interface_speed_mbps(interface_name: &str) -> u64 {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/speed", interface_name);
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(mbps) = content.trim().parse::<i64>()
            && mbps > 0
        {
            return mbps as u64;
        }
    }
    #[cfg(not(target_os = "linux"))]
    let _ = interface_name;
    0
}

fn read_trimmed(path: &Path) -> Option<String> {
    let s = std::fs::read_to_string(path).ok()?;
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// hwmon values are millidegrees Celsius; non-positive means no threshold.
fn parse_millidegrees(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|m| *m > 0.0)
        .map(|m| m / 1000.0)
}

/// `tempN_max` high thresholds in °C for every chip under an hwmon root, keyed like sysinfo
/// component labels: `"<chip> <tempN_label>"`, or `"<chip> tempN"` plus the bare chip name
/// when the sensor has no label file.
pub fn hwmon_high_thresholds(root: &Path) -> HashMap<String, f64> {
    let mut thresholds = HashMap::new();
    let Ok(chips) = std::fs::read_dir(root) else {
        return thresholds;
    };
    for chip in chips.flatten() {
        let dir = chip.path();
        let Some(name) = read_trimmed(&dir.join("name")) else {
            continue;
        };
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(sensor) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix("_max"))
                .filter(|s| s.starts_with("temp"))
            else {
                continue;
            };
            let Some(high_c) = read_trimmed(&entry.path()).and_then(|v| parse_millidegrees(&v))
            else {
                continue;
            };
            match read_trimmed(&dir.join(format!("{sensor}_label"))) {
                Some(label) => {
                    thresholds.insert(format!("{name} {label}"), high_c);
                }
                None => {
                    thresholds.insert(format!("{name} {sensor}"), high_c);
                    thresholds.entry(name.clone()).or_insert(high_c);
                }
            }
        }
    }
    thresholds
}

/// High thresholds from /sys/class/hwmon; empty where the platform has none.
pub(super) fn read_temp_high_thresholds() -> HashMap<String, f64> {
    #[cfg(target_os = "linux")]
    {
        hwmon_high_thresholds(Path::new("/sys/class/hwmon"))
    }
    #[cfg(not(target_os = "linux"))]
    HashMap::new()
}
