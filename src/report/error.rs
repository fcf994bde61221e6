use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// History is empty; nothing to report.
    #[error("No data available. Start monitoring first.")]
    NoData,

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("document rendering failed: {0}")]
    Render(String),

    #[error("writing report failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub(crate) fn chart<E: std::fmt::Display>(e: E) -> Self {
        ReportError::Chart(e.to_string())
    }

    pub(crate) fn render<E: std::fmt::Display>(e: E) -> Self {
        ReportError::Render(e.to_string())
    }
}
