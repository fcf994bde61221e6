// Print-ready HTML: one file, inline SVG charts, CSS page breaks between chart pages.

use std::fmt::Write as _;

use super::ReportError;
use super::document::{Align, Block, Document, DocumentRenderer, Table};

const STYLE: &str = r#"
@page { size: letter; margin: 0.75in; }
body { font-family: Helvetica, Arial, sans-serif; color: #222; max-width: 7in; margin: 0 auto; }
h1.title { font-size: 24pt; color: #2C3E50; text-align: center; margin-bottom: 30px; }
h2 { font-size: 16pt; color: #34495E; margin: 12px 0; }
.metadata p { margin: 4px 0; }
table { border-collapse: collapse; width: 100%; font-size: 10pt; }
th { color: whitesmoke; font-size: 12pt; padding: 6px 8px 12px; border: 1px solid black; }
td { padding: 4px 8px; border: 1px solid black; }
tbody tr:nth-child(even) { background: lightgrey; }
.left { text-align: left; }
.center { text-align: center; }
.spacer { height: 0.3in; }
.page-break { break-before: page; page-break-before: always; }
figure.chart { margin: 0; }
figure.chart svg { width: 100%; height: auto; }
"#;

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_table(out: &mut String, table: &Table) -> std::fmt::Result {
    let class = match table.align {
        Align::Left => "left",
        Align::Center => "center",
    };
    writeln!(out, r#"<table class="{class}">"#)?;
    write!(
        out,
        r#"<thead><tr style="background: {}">"#,
        escape(table.header_color)
    )?;
    for col in &table.columns {
        write!(out, "<th>{}</th>", escape(col))?;
    }
    writeln!(out, "</tr></thead>")?;
    writeln!(out, "<tbody>")?;
    for row in &table.rows {
        write!(out, "<tr>")?;
        for cell in row {
            write!(out, "<td>{}</td>", escape(cell))?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody></table>")
}

fn write_document(out: &mut String, document: &Document) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, r#"<html lang="en"><head><meta charset="utf-8">"#)?;
    writeln!(out, "<title>{}</title>", escape(&document.title))?;
    writeln!(out, "<style>{STYLE}</style></head><body>")?;
    for block in &document.blocks {
        match block {
            Block::Title(t) => writeln!(out, r#"<h1 class="title">{}</h1>"#, escape(t))?,
            Block::Metadata(lines) => {
                writeln!(out, r#"<div class="metadata">"#)?;
                for (label, value) in lines {
                    writeln!(out, "<p><b>{}:</b> {}</p>", escape(label), escape(value))?;
                }
                writeln!(out, "</div>")?;
            }
            Block::Heading(h) => writeln!(out, "<h2>{}</h2>", escape(h))?,
            Block::Table(table) => write_table(out, table)?,
            // plotters output is trusted markup
            Block::Image(image) => writeln!(
                out,
                r#"<figure class="chart" aria-label="{}">{}</figure>"#,
                escape(&image.title),
                image.svg
            )?,
            Block::Spacer => writeln!(out, r#"<div class="spacer"></div>"#)?,
            Block::PageBreak => writeln!(out, r#"<div class="page-break"></div>"#)?,
        }
    }
    writeln!(out, "</body></html>")
}

impl DocumentRenderer for HtmlRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, ReportError> {
        let mut out = String::new();
        write_document(&mut out, document).map_err(ReportError::render)?;
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }
}
