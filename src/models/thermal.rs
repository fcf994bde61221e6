// CPU sensor and GPU models. Missing hardware is a sentinel entry, never an empty list.

use serde::{Deserialize, Serialize};

use super::percent_of;

pub const NOT_AVAILABLE: &str = "not available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuSensor {
    pub label: String,
    pub current_c: f64,
    pub high_c: Option<f64>,
    pub critical_c: Option<f64>,
}

impl CpuSensor {
    pub fn not_available() -> Self {
        Self {
            label: NOT_AVAILABLE.into(),
            current_c: 0.0,
            high_c: None,
            critical_c: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuSensor {
    pub id: u32,
    pub name: String,
    pub temperature_c: f64,
    pub load_percent: f64,
    pub memory_used_mb: f64,
    pub memory_total_mb: f64,
    pub memory_percent: f64,
}

impl GpuSensor {
    pub fn new(
        id: u32,
        name: String,
        temperature_c: f64,
        load_percent: f64,
        memory_used_mb: f64,
        memory_total_mb: f64,
    ) -> Self {
        Self {
            id,
            name,
            temperature_c,
            load_percent: load_percent.clamp(0.0, 100.0),
            memory_used_mb,
            memory_total_mb,
            memory_percent: super::round2(percent_of(memory_used_mb, memory_total_mb)),
        }
    }

    pub fn not_available() -> Self {
        Self::new(0, NOT_AVAILABLE.into(), 0.0, 0.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureStats {
    pub cpu_sensors: Vec<CpuSensor>,
    pub gpu_sensors: Vec<GpuSensor>,
}

impl TemperatureStats {
    /// Fills empty families with their sentinel so every snapshot has the same shape.
    pub fn new(cpu_sensors: Vec<CpuSensor>, gpu_sensors: Vec<GpuSensor>) -> Self {
        let cpu_sensors = if cpu_sensors.is_empty() {
            vec![CpuSensor::not_available()]
        } else {
            cpu_sensors
        };
        let gpu_sensors = if gpu_sensors.is_empty() {
            vec![GpuSensor::not_available()]
        } else {
            gpu_sensors
        };
        Self {
            cpu_sensors,
            gpu_sensors,
        }
    }
}

impl Default for TemperatureStats {
    fn default() -> Self {
        Self::new(vec![], vec![])
    }
}
