//! Turns a [Report] into an exportable document.
//!
//! Building the document decides *what* gets printed and in what order: a
//! title, one entry per piece, then the summary and per-person subtotals. How
//! it looks on a page is a [DocumentRenderer]'s job. A PDF backend implements
//! that trait outside this crate; [TextRenderer] ships here.
//!
//! [Report]: ../struct.Report.html
//! [DocumentRenderer]: trait.DocumentRenderer.html
//! [TextRenderer]: struct.TextRenderer.html

use chrono::{DateTime, TimeZone};
use crate::{
    error::{Error, Result},
    models::piece::Piece,
    report::{Report, format::CurrencyFormat},
    util,
};
use getset::Getters;
use serde::{Serialize, Deserialize};
use std::fmt::Display;
use url::Url;

/// Title and naming for exported reports.
#[derive(Clone, Debug, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
#[serde(default)]
pub struct ReportOptions {
    title: String,
    /// Exported files are named `<prefix>_<YYYY-MM-DD>.<ext>`
    file_prefix: String,
}

impl ReportOptions {
    pub fn new<T: Into<String>, P: Into<String>>(title: T, file_prefix: P) -> Self {
        Self {
            title: title.into(),
            file_prefix: file_prefix.into(),
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::new("Studio Production Report", "studio_report")
    }
}

/// The lines printed for a single piece.
#[derive(Clone, Debug, PartialEq, Getters, Serialize)]
#[getset(get = "pub")]
pub struct Entry {
    /// Production date, person, and piece type
    header: String,
    /// The three cost components
    costs: String,
    total: String,
    registered: String,
    /// Printed alongside the entry when the piece has a photo
    photo_url: Option<Url>,
}

/// One element of a document, top to bottom.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Block {
    Title(String),
    Entry(Entry),
    Heading(String),
    Line(String),
}

/// A report laid out as an ordered list of blocks.
#[derive(Clone, Debug, PartialEq, Getters, Serialize)]
#[getset(get = "pub")]
pub struct ReportDocument {
    /// File name without an extension
    stem: String,
    blocks: Vec<Block>,
}

impl ReportDocument {
    /// Lay out a report. An empty report has nothing to export and gives
    /// `None`.
    ///
    /// `photo_url` is asked for each piece's photo; pieces without one (or
    /// whose URL can't be found) are printed without it.
    pub fn build<F, Tz>(report: &Report, options: &ReportOptions, currency: &CurrencyFormat, now: &DateTime<Tz>, photo_url: F) -> Option<Self>
        where F: Fn(&Piece) -> Option<Url>,
              Tz: TimeZone,
              Tz::Offset: Display,
    {
        if report.is_empty() {
            return None;
        }
        let mut blocks = vec![Block::Title(options.title().clone())];
        for piece in report.pieces() {
            let costs = piece.costs();
            blocks.push(Block::Entry(Entry {
                header: format!("Production: {} | Person: {} | Piece: {}", piece.production_date(), piece.person_name(), piece.piece_type()),
                costs: format!(
                    "  Costs: bisque firing ({}), glaze firing ({}), clay ({})",
                    currency.format(costs.firing()),
                    currency.format(costs.glaze()),
                    currency.format(costs.clay()),
                ),
                total: format!("  >> Piece total: {}", currency.format(costs.total())),
                registered: format!("  (Registered on: {})", piece.registration_date()),
                photo_url: photo_url(piece),
            }));
        }
        blocks.push(Block::Heading("--- TOTAL SUMMARY ---".into()));
        blocks.push(Block::Line(format!("Total pieces: {}", report.count())));
        blocks.push(Block::Line(format!("GRAND TOTAL: {}", currency.format(report.grand_total()))));
        blocks.push(Block::Heading("--- SUMMARY BY PERSON ---".into()));
        for person in report.per_person() {
            blocks.push(Block::Line(format!("  {}: {}", person.name(), currency.format(person.total()))));
        }
        Some(Self {
            stem: format!("{}_{}", options.file_prefix(), util::time::format_file_date(now)),
            blocks,
        })
    }
}

/// Something that can turn a document into a file.
pub trait DocumentRenderer {
    /// The file extension, without the dot.
    fn extension(&self) -> &str;

    /// ie `application/pdf`
    fn content_type(&self) -> &str;

    /// Render the document into file contents.
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>>;
}

/// A rendered report, ready to download.
#[derive(Clone, Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Export {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Render a document. Failures come back as `Error::Render`; the report the
/// document was built from is untouched either way.
pub fn export<R: DocumentRenderer>(document: &ReportDocument, renderer: &R) -> Result<Export> {
    let bytes = renderer.render(document)
        .map_err(|e| match e {
            Error::Render(msg) => Error::Render(msg),
            other => Error::Render(other.to_string()),
        })?;
    tracing::debug!(file = document.stem().as_str(), bytes = bytes.len(), "report rendered");
    Ok(Export {
        file_name: format!("{}.{}", document.stem(), renderer.extension()),
        content_type: renderer.content_type().into(),
        bytes,
    })
}

/// Renders a document as plain UTF-8 text.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer;

const RULE: &str = "----------------------------------------";

impl DocumentRenderer for TextRenderer {
    fn extension(&self) -> &str {
        "txt"
    }

    fn content_type(&self) -> &str {
        "text/plain; charset=utf-8"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>> {
        let mut out = String::new();
        for block in document.blocks() {
            match block {
                Block::Title(title) => {
                    out.push_str(title);
                    out.push_str("\n\n");
                }
                Block::Entry(entry) => {
                    for line in &[entry.header(), entry.costs(), entry.total(), entry.registered()] {
                        out.push_str(line);
                        out.push('\n');
                    }
                    if let Some(url) = entry.photo_url() {
                        out.push_str(&format!("  Photo: {}\n", url));
                    }
                    out.push_str(RULE);
                    out.push('\n');
                }
                Block::Heading(heading) => {
                    out.push('\n');
                    out.push_str(heading);
                    out.push('\n');
                }
                Block::Line(line) => {
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        Ok(out.into_bytes())
    }
}
