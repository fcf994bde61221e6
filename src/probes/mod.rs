// Metric probes: one function per metric family, backed by sysinfo (+ NVML for GPUs)

mod disk;
mod gpu;
mod linux;

pub use disk::{DiskUsage, MountEntry, collect_partitions};
pub use linux::{hwmon_high_thresholds, parse_interface_flags};

use crate::models::*;
use std::sync::Mutex;
use std::time::Duration;
use sysinfo::{Components, Disks, Networks, System};
use tracing::instrument;

/// Blocking window between the two CPU refreshes that bound a usage sample.
pub fn cpu_sample_window() -> Duration {
    sysinfo::MINIMUM_CPU_UPDATE_INTERVAL.max(Duration::from_millis(100))
}

/// Cumulative counters plus interface state, read in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkReading {
    pub counters: NetworkCounters,
    pub interfaces: Vec<InterfaceStat>,
}

/// Source of raw metric readings. Calls block; the assembler runs them off the runtime.
///
/// Fallible probes report `Err` and the caller substitutes a zero reading;
/// `temperature` never fails and returns sentinel entries instead.
pub trait Probes: Send + Sync {
    fn cpu(&self) -> anyhow::Result<CpuStats>;
    fn memory(&self) -> anyhow::Result<MemoryStats>;
    fn disk(&self) -> anyhow::Result<DiskStats>;
    fn network(&self) -> anyhow::Result<NetworkReading>;
    fn temperature(&self) -> TemperatureStats;
}

pub struct SysinfoProbes {
    sys: Mutex<System>,
    disks: Mutex<Disks>,
    networks: Mutex<Networks>,
    components: Mutex<Components>,
    gpus: gpu::GpuReader,
}

impl Default for SysinfoProbes {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProbes {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Mutex::new(sys),
            disks: Mutex::new(Disks::new_with_refreshed_list()),
            networks: Mutex::new(Networks::new_with_refreshed_list()),
            components: Mutex::new(Components::new_with_refreshed_list()),
            gpus: gpu::GpuReader::init(),
        }
    }
}

impl Probes for SysinfoProbes {
    #[instrument(skip(self), fields(probe = "cpu"))]
    fn cpu(&self) -> anyhow::Result<CpuStats> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
        sys.refresh_cpu_all();
        std::thread::sleep(cpu_sample_window());
        sys.refresh_cpu_all();

        let per_core_percent = sys
            .cpus()
            .iter()
            .map(|c| (c.cpu_usage() as f64).clamp(0.0, 100.0))
            .collect();
        let current_mhz = sys.cpus().first().map(|c| c.frequency()).unwrap_or(0) as f64;
        let (min_mhz, max_mhz) = linux::read_cpu_freq_limits_mhz().unwrap_or((0.0, 0.0));

        Ok(CpuStats {
            usage_percent: (sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
            per_core_percent,
            physical_cores: System::physical_core_count().unwrap_or(0) as u32,
            logical_cores: sys.cpus().len() as u32,
            frequency: CpuFrequency {
                current_mhz,
                min_mhz,
                max_mhz,
            },
        })
    }

    #[instrument(skip(self), fields(probe = "memory"))]
    fn memory(&self) -> anyhow::Result<MemoryStats> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
        sys.refresh_memory();

        let total = sys.total_memory();
        let available = sys.available_memory();
        Ok(MemoryStats {
            virtual_memory: VirtualMemory::from_bytes(
                total,
                total.saturating_sub(available),
                available,
            ),
            swap: SwapMemory::from_bytes(sys.total_swap(), sys.used_swap()),
        })
    }

    #[instrument(skip(self), fields(probe = "disk"))]
    fn disk(&self) -> anyhow::Result<DiskStats> {
        let mut disks = self
            .disks
            .lock()
            .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
        disks.refresh(true);

        let mounts = disks.list().iter().map(|d| MountEntry {
            device: d.name().to_string_lossy().into_owned(),
            mountpoint: d.mount_point().to_path_buf(),
            filesystem: d.file_system().to_string_lossy().into_owned(),
            reported: DiskUsage {
                total: d.total_space(),
                free: d.available_space(),
            },
        });
        // sysinfo keeps the last statvfs result; only trust it while the mountpoint is reachable.
        let partitions = collect_partitions(mounts, |m| {
            std::fs::metadata(&m.mountpoint)?;
            Ok(m.reported)
        });

        let (read_bytes, write_bytes) = linux::read_disk_io_counters().unwrap_or((0, 0));
        Ok(DiskStats {
            partitions,
            io: DiskIoStats::from_counters(read_bytes, write_bytes),
        })
    }

    #[instrument(skip(self), fields(probe = "network"))]
    fn network(&self) -> anyhow::Result<NetworkReading> {
        let mut networks = self
            .networks
            .lock()
            .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
        networks.refresh(true);

        let mut counters = NetworkCounters::default();
        let mut interfaces: Vec<InterfaceStat> = Vec::with_capacity(networks.list().len());
        for (name, data) in networks.list() {
            counters.bytes_sent += data.total_transmitted();
            counters.bytes_recv += data.total_received();
            counters.packets_sent += data.total_packets_transmitted();
            counters.packets_recv += data.total_packets_received();

            let mac_address = data.mac_address().to_string();
            let mut addresses: Vec<InterfaceAddress> = data
                .ip_networks()
                .iter()
                .map(|n| InterfaceAddress {
                    address: n.addr.to_string(),
                    family: if n.addr.is_ipv4() { "IPv4" } else { "IPv6" }.into(),
                })
                .collect();
            addresses.push(InterfaceAddress {
                address: mac_address.clone(),
                family: "MAC".into(),
            });

            interfaces.push(InterfaceStat {
                name: name.clone(),
                // Unknown link state (non-Linux, unreadable flags) is reported as down
                is_up: linux::read_interface_is_up(name).unwrap_or(false),
                link_speed_mbps: linux::get_interface_speed_mbps(name),
                mac_address,
                addresses,
            });
        }
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(NetworkReading {
            counters,
            interfaces,
        })
    }

    #[instrument(skip(self), fields(probe = "temperature"))]
    fn temperature(&self) -> TemperatureStats {
        let thresholds = linux::read_temp_high_thresholds();
        let cpu_sensors = match self.components.lock() {
            Ok(mut components) => {
                components.refresh(true);
                components
                    .list()
                    .iter()
                    .filter_map(|c| {
                        let current = c.temperature()?;
                        Some(CpuSensor {
                            label: c.label().to_string(),
                            current_c: current as f64,
                            high_c: thresholds.get(c.label()).copied(),
                            critical_c: c.critical().filter(|v| *v > 0.0).map(f64::from),
                        })
                    })
                    .collect()
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "read_components", "sensor lock poisoned");
                vec![]
            }
        };
        TemperatureStats::new(cpu_sensors, self.gpus.read())
    }
}
