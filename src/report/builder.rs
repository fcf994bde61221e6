// Composes aggregator output, chart images and the latest snapshot into a Document.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

use super::ReportError;
use super::chart::{ChartRenderer, ChartSpec, Rgb};
use super::document::{Align, Block, Document, Table};
use crate::aggregator::{Metric, series, summarize};
use crate::models::Snapshot;

pub const REPORT_TITLE: &str = "System Resource Monitoring Report";
pub const STATUS_HEADING: &str = "Current System Status";
pub const STATISTICS_HEADING: &str = "Statistics Summary";

const STATUS_HEADER_COLOR: &str = "#3498DB";
const STATISTICS_HEADER_COLOR: &str = "#2ECC71";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

struct ChartSection {
    heading: Option<&'static str>,
    metric: Metric,
    spec: ChartSpec,
}

/// Charts laid out on one page.
struct ChartPage {
    heading: Option<&'static str>,
    charts: &'static [ChartSection],
}

const CHART_PAGES: &[ChartPage] = &[
    ChartPage {
        heading: None,
        charts: &[
            ChartSection {
                heading: Some("CPU Usage Over Time"),
                metric: Metric::CpuPercent,
                spec: ChartSpec {
                    title: "CPU Usage",
                    y_label: "CPU Usage (%)",
                    color: Rgb(0xE7, 0x4C, 0x3C),
                },
            },
            ChartSection {
                heading: Some("Memory Usage Over Time"),
                metric: Metric::MemoryPercent,
                spec: ChartSpec {
                    title: "Memory Usage",
                    y_label: "Memory Usage (%)",
                    color: Rgb(0x34, 0x98, 0xDB),
                },
            },
        ],
    },
    ChartPage {
        heading: None,
        charts: &[
            ChartSection {
                heading: Some("Network Upload Speed Over Time"),
                metric: Metric::UploadKbps,
                spec: ChartSpec {
                    title: "Network Upload",
                    y_label: "Upload Speed (KB/s)",
                    color: Rgb(0x2E, 0xCC, 0x71),
                },
            },
            ChartSection {
                heading: Some("Network Download Speed Over Time"),
                metric: Metric::DownloadKbps,
                spec: ChartSpec {
                    title: "Network Download",
                    y_label: "Download Speed (KB/s)",
                    color: Rgb(0x9B, 0x59, 0xB6),
                },
            },
        ],
    },
    ChartPage {
        heading: Some("Temperature Monitoring"),
        charts: &[
            ChartSection {
                heading: None,
                metric: Metric::CpuTemperature,
                spec: ChartSpec {
                    title: "CPU Temperature",
                    y_label: "Temperature (°C)",
                    color: Rgb(0xF3, 0x9C, 0x12),
                },
            },
            ChartSection {
                heading: None,
                metric: Metric::GpuTemperature,
                spec: ChartSpec {
                    title: "GPU Temperature",
                    y_label: "Temperature (°C)",
                    color: Rgb(0xE6, 0x7E, 0x22),
                },
            },
        ],
    },
];

fn format_timestamp(ts_ms: u64) -> String {
    Local
        .timestamp_millis_opt(ts_ms as i64)
        .earliest()
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn row(cells: [String; 3]) -> Vec<String> {
    cells.into()
}

pub struct ReportBuilder<'a> {
    charts: &'a dyn ChartRenderer,
    sample_interval: Duration,
}

impl<'a> ReportBuilder<'a> {
    /// `sample_interval` is the nominal cadence used for the reported duration.
    pub fn new(charts: &'a dyn ChartRenderer, sample_interval: Duration) -> Self {
        Self {
            charts,
            sample_interval,
        }
    }

    pub fn build(
        &self,
        history: &[Snapshot],
        generated_at: DateTime<Local>,
    ) -> Result<Document, ReportError> {
        let (Some(first), Some(latest)) = (history.first(), history.last()) else {
            return Err(ReportError::NoData);
        };

        let mut blocks = vec![
            Block::Title(REPORT_TITLE.to_string()),
            self.metadata(first, latest, history.len(), generated_at),
            Block::Spacer,
            Block::Heading(STATUS_HEADING.to_string()),
            Block::Table(status_table(latest)),
            Block::Spacer,
            Block::Heading(STATISTICS_HEADING.to_string()),
            Block::Table(statistics_table(history)),
            Block::Spacer,
        ];

        for page in CHART_PAGES {
            let mut page_blocks = Vec::new();
            for section in page.charts {
                let points = series(history, section.metric);
                if points.is_empty() {
                    continue;
                }
                let image = self.charts.render(&section.spec, &points)?;
                if let Some(heading) = section.heading {
                    page_blocks.push(Block::Heading(heading.to_string()));
                }
                page_blocks.push(Block::Image(image));
                page_blocks.push(Block::Spacer);
            }
            if page_blocks.is_empty() {
                continue;
            }
            blocks.push(Block::PageBreak);
            if let Some(heading) = page.heading {
                blocks.push(Block::Heading(heading.to_string()));
            }
            blocks.append(&mut page_blocks);
        }

        Ok(Document {
            title: REPORT_TITLE.to_string(),
            blocks,
        })
    }

    fn metadata(
        &self,
        first: &Snapshot,
        latest: &Snapshot,
        samples: usize,
        generated_at: DateTime<Local>,
    ) -> Block {
        let duration_secs = self.sample_interval.as_secs() * samples as u64;
        Block::Metadata(vec![
            (
                "Report Period".to_string(),
                format!(
                    "{} to {}",
                    format_timestamp(first.timestamp),
                    format_timestamp(latest.timestamp)
                ),
            ),
            (
                "Duration".to_string(),
                format!("{duration_secs} seconds ({samples} samples)"),
            ),
            (
                "Generated".to_string(),
                generated_at.format(TIME_FORMAT).to_string(),
            ),
        ])
    }
}

fn status_table(latest: &Snapshot) -> Table {
    let cpu = &latest.cpu;
    let mem = &latest.memory.virtual_memory;
    let net = &latest.network;

    let mut rows = vec![
        row([
            "CPU Usage".into(),
            format!("{:.1}%", cpu.usage_percent),
            format!(
                "{} cores, {} threads",
                cpu.physical_cores, cpu.logical_cores
            ),
        ]),
        row([
            "Memory Usage".into(),
            format!("{:.1}%", mem.usage_percent),
            format!("{:.2} GB / {:.2} GB", mem.used_gb, mem.total_gb),
        ]),
        match latest.disk.partitions.first() {
            Some(p) => row([
                "Disk Usage".into(),
                format!("{:.1}%", p.usage_percent),
                format!("{:.2} GB / {:.2} GB", p.used_gb, p.total_gb),
            ]),
            None => row(["Disk Usage".into(), "N/A".into(), "N/A".into()]),
        },
        row([
            "Network Upload".into(),
            format!("{:.2} KB/s", net.speed.upload_kbps),
            format!("Total: {:.2} MB", net.totals.mb_sent),
        ]),
        row([
            "Network Download".into(),
            format!("{:.2} KB/s", net.speed.download_kbps),
            format!("Total: {:.2} MB", net.totals.mb_recv),
        ]),
    ];

    if let Some(sensor) = latest.temperature.cpu_sensors.first()
        && sensor.current_c > 0.0
    {
        rows.push(row([
            "CPU Temperature".into(),
            format!("{:.1}°C", sensor.current_c),
            sensor.label.clone(),
        ]));
    }
    if let Some(gpu) = latest.temperature.gpu_sensors.first()
        && gpu.temperature_c > 0.0
    {
        rows.push(row([
            "GPU Temperature".into(),
            format!("{:.1}°C", gpu.temperature_c),
            gpu.name.clone(),
        ]));
    }

    Table {
        columns: vec!["Metric".into(), "Current Value".into(), "Details".into()],
        rows,
        header_color: STATUS_HEADER_COLOR,
        align: Align::Left,
    }
}

fn statistics_table(history: &[Snapshot]) -> Table {
    let rows = [
        ("CPU Usage (%)", Metric::CpuPercent, 1),
        ("Memory Usage (%)", Metric::MemoryPercent, 1),
        ("Upload Speed (KB/s)", Metric::UploadKbps, 2),
        ("Download Speed (KB/s)", Metric::DownloadKbps, 2),
    ]
    .into_iter()
    .map(|(label, metric, precision)| {
        let mut cells = vec![label.to_string()];
        match summarize(history, metric) {
            Some(s) => cells.extend(
                [s.min, s.max, s.mean]
                    .map(|v| format!("{v:.precision$}"))
                    .into_iter(),
            ),
            None => cells.extend(["N/A", "N/A", "N/A"].map(String::from)),
        }
        cells
    })
    .collect();

    Table {
        columns: ["Metric", "Minimum", "Maximum", "Average"]
            .map(String::from)
            .into(),
        rows,
        header_color: STATISTICS_HEADER_COLOR,
        align: Align::Center,
    }
}
