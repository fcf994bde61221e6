// Time-series line charts rendered to standalone SVG with plotters

use chrono::{Local, TimeZone};
use plotters::prelude::*;

use super::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub y_label: &'static str,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub title: String,
    pub svg: String,
    pub width: u32,
    pub height: u32,
}

pub trait ChartRenderer: Send + Sync {
    /// Renders `points` (`(timestamp_ms, value)`, history order) as a line chart.
    fn render(&self, spec: &ChartSpec, points: &[(u64, f64)]) -> Result<ChartImage, ReportError>;
}

pub struct SvgChartRenderer {
    width: u32,
    height: u32,
}

impl SvgChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new(1000, 400)
    }
}

/// Single-sample charts get a window this wide around the point.
const MIN_X_SPAN_MS: i64 = 10_000;

fn format_time_of_day(ts_ms: i64) -> String {
    match Local.timestamp_millis_opt(ts_ms) {
        chrono::LocalResult::Single(t) | chrono::LocalResult::Ambiguous(t, _) => {
            t.format("%H:%M:%S").to_string()
        }
        chrono::LocalResult::None => String::new(),
    }
}

fn x_range(points: &[(u64, f64)]) -> (i64, i64) {
    let first = points.first().map_or(0, |p| p.0 as i64);
    let last = points.last().map_or(0, |p| p.0 as i64);
    if last - first < MIN_X_SPAN_MS {
        let mid = first + (last - first) / 2;
        (mid - MIN_X_SPAN_MS / 2, mid + MIN_X_SPAN_MS / 2)
    } else {
        (first, last)
    }
}

/// Y axis bounds: always includes 0, padded 10% above the largest value.
pub fn value_range(points: &[(u64, f64)]) -> (f64, f64) {
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
            (lo.min(v), hi.max(v))
        });
    let lo = min.min(0.0);
    let hi = max + (max - lo).abs() * 0.1;
    if hi > lo { (lo, hi) } else { (lo, lo + 1.0) }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, spec: &ChartSpec, points: &[(u64, f64)]) -> Result<ChartImage, ReportError> {
        if points.is_empty() {
            return Err(ReportError::Chart(format!("{}: no data points", spec.title)));
        }
        let color = RGBColor(spec.color.0, spec.color.1, spec.color.2);
        let (x_min, x_max) = x_range(points);
        let (y_min, y_max) = value_range(points);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(ReportError::chart)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(spec.title, ("sans-serif", 22))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(65)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(ReportError::chart)?;

            chart
                .configure_mesh()
                .x_labels(8)
                .x_label_formatter(&|ts: &i64| format_time_of_day(*ts))
                .x_desc("Time")
                .y_desc(spec.y_label)
                .light_line_style(BLACK.mix(0.05))
                .draw()
                .map_err(ReportError::chart)?;

            chart
                .draw_series(LineSeries::new(
                    points.iter().map(|&(t, v)| (t as i64, v)),
                    color.stroke_width(2),
                ))
                .map_err(ReportError::chart)?;
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(t, v)| Circle::new((t as i64, v), 3, color.filled())),
                )
                .map_err(ReportError::chart)?;

            root.present().map_err(ReportError::chart)?;
        }

        Ok(ChartImage {
            title: spec.title.to_string(),
            svg,
            width: self.width,
            height: self.height,
        })
    }
}
