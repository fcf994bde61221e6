// Report pipeline: history -> Document -> rendered file on disk

mod builder;
mod chart;
mod document;
mod error;
mod html;

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use tracing::instrument;

pub use builder::{REPORT_TITLE, ReportBuilder, STATISTICS_HEADING, STATUS_HEADING};
pub use chart::{ChartImage, ChartRenderer, ChartSpec, Rgb, SvgChartRenderer, value_range};
pub use document::{Align, Block, Document, DocumentRenderer, Table};
pub use error::ReportError;
pub use html::HtmlRenderer;

use crate::models::Snapshot;

#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub file_name: String,
    pub path: PathBuf,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ReportExporter {
    output_dir: PathBuf,
    sample_interval: Duration,
    charts: Box<dyn ChartRenderer>,
    renderer: Box<dyn DocumentRenderer>,
}

impl ReportExporter {
    /// plotters SVG charts laid out as HTML.
    pub fn new(output_dir: impl Into<PathBuf>, sample_interval: Duration) -> Self {
        Self::with_renderers(
            output_dir,
            sample_interval,
            Box::new(SvgChartRenderer::default()),
            Box::new(HtmlRenderer),
        )
    }

    pub fn with_renderers(
        output_dir: impl Into<PathBuf>,
        sample_interval: Duration,
        charts: Box<dyn ChartRenderer>,
        renderer: Box<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            sample_interval,
            charts,
            renderer,
        }
    }

    /// Builds the document without writing anything.
    pub fn build(&self, history: &[Snapshot]) -> Result<Document, ReportError> {
        ReportBuilder::new(self.charts.as_ref(), self.sample_interval).build(history, Local::now())
    }

    /// Renders `history` and writes `system_report_<unix_secs>.<ext>` into the output directory.
    /// Empty history fails with `NoData` before anything touches the filesystem.
    #[instrument(skip(self, history), fields(samples = history.len()))]
    pub fn export(&self, history: &[Snapshot]) -> Result<ExportedReport, ReportError> {
        let document = self.build(history)?;
        let bytes = self.renderer.render(&document)?;

        std::fs::create_dir_all(&self.output_dir)?;
        let file_name = format!(
            "system_report_{}.{}",
            Local::now().timestamp(),
            self.renderer.extension()
        );
        let path = self.output_dir.join(&file_name);
        std::fs::write(&path, &bytes)?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "Report written");
        Ok(ExportedReport {
            file_name,
            path,
            content_type: self.renderer.content_type(),
            bytes,
        })
    }
}
