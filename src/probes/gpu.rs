// GPU sensors via NVML. Without the `nvml` feature, driver or device, no GPU is reported.

use crate::models::GpuSensor;

#[cfg(feature = "nvml")]
use nvml_wrapper::Nvml;
#[cfg(feature = "nvml")]
use nvml_wrapper::enum_wrappers::device::TemperatureSensor;

pub(super) struct GpuReader {
    /// NVML must be initialized once; `None` when the library could not be loaded.
    #[cfg(feature = "nvml")]
    nvml: Option<Nvml>,
}

impl GpuReader {
    pub(super) fn init() -> Self {
        #[cfg(feature = "nvml")]
        {
            let nvml = match Nvml::init() {
                Ok(n) => Some(n),
                Err(e) => {
                    tracing::debug!(error = %e, "NVML not available; GPU sensors disabled");
                    None
                }
            };
            Self { nvml }
        }
        #[cfg(not(feature = "nvml"))]
        Self {}
    }

    /// One entry per GPU; empty when no GPU can be read.
    pub(super) fn read(&self) -> Vec<GpuSensor> {
        #[cfg(feature = "nvml")]
        {
            if let Some(nvml) = &self.nvml {
                return read_nvml(nvml);
            }
        }
        Vec::new()
    }
}

#[cfg(feature = "nvml")]
fn read_nvml(nvml: &Nvml) -> Vec<GpuSensor> {
    const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

    let count = match nvml.device_count() {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, operation = "nvml_device_count", "GPU enumeration failed");
            return Vec::new();
        }
    };
    (0..count)
        .filter_map(|index| {
            let device = nvml.device_by_index(index).ok()?;
            let name = device.name().unwrap_or_else(|_| "NVIDIA GPU".to_string());
            let temperature = device.temperature(TemperatureSensor::Gpu).unwrap_or(0);
            let load = device.utilization_rates().map(|u| u.gpu).unwrap_or(0);
            // Partial data is fine: a missing total yields a 0% memory reading.
            let (used_mb, total_mb) = device
                .memory_info()
                .map(|m| (m.used as f64 / BYTES_PER_MB, m.total as f64 / BYTES_PER_MB))
                .unwrap_or((0.0, 0.0));
            Some(GpuSensor::new(
                index,
                name,
                temperature as f64,
                load as f64,
                crate::models::round2(used_mb),
                crate::models::round2(total_mb),
            ))
        })
        .collect()
}
