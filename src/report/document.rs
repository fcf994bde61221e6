// Toolkit-neutral document tree produced by the report builder

use super::ReportError;
use super::chart::ChartImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Header row background, `#RRGGBB`.
    pub header_color: &'static str,
    pub align: Align,
}

impl Table {
    /// First row whose leading cell equals `label`.
    pub fn row(&self, label: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|r| r.first().is_some_and(|c| c == label))
            .map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    /// Bold label / value lines.
    Metadata(Vec<(String, String)>),
    Heading(String),
    Table(Table),
    Image(ChartImage),
    Spacer,
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading(h) => Some(h.as_str()),
            _ => None,
        })
    }

    /// The table directly following heading `heading`.
    pub fn table_after(&self, heading: &str) -> Option<&Table> {
        let start = self
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Heading(h) if h == heading))?;
        self.blocks[start + 1..].iter().find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ChartImage> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Image(i) => Some(i),
            _ => None,
        })
    }

    pub fn page_count(&self) -> usize {
        1 + self
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count()
    }
}

/// Lays a document out into a paginated file format.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &Document) -> Result<Vec<u8>, ReportError>;
    fn extension(&self) -> &'static str;
    fn content_type(&self) -> &'static str;
}
