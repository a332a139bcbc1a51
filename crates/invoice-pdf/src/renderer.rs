//! # Invoice Renderer
//!
//! Drives a fresh [`Canvas`] through the fixed invoice layout, then hands
//! the finished page to the PDF writer.
//!
//! ## Stages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Start ──► Header ──► InvoiceBanner ──► BillTo ──► ItemsTable           │
//! │            issuer     number, dates     client     header + N rows      │
//! │                                                        │                │
//! │            Finalize ◄── Footer ◄── TotalsBlock ◄───────┘                │
//! │            PDF bytes    thanks     subtotal [, tax, total]              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stage sets the font and colors it needs. The stages only ever move
//! the cursor down, and any failure aborts the whole render: there is no
//! partial document.

use std::fmt;

use invoice_core::{Invoice, LineItem, Party, Totals, DEFAULT_CURRENCY_CODE};
use tracing::{debug, info};

use crate::canvas::{Align, Canvas, CellStyle, NextPosition, PageGeometry, PageLayout, Rgb};
use crate::error::{RenderError, RenderResult};
use crate::font::FontStyle;
use crate::format::{format_date, format_money, format_quantity};
use crate::writer::{write_pdf, DocumentInfo};

// =============================================================================
// Styles
// =============================================================================

/// Heading color for the company name and the `INVOICE` banner.
pub const ACCENT: Rgb = Rgb(74, 107, 175);

/// Footer text color.
pub const FOOTER_GRAY: Rgb = Rgb(119, 119, 119);

/// Background of the items table header row.
pub const HEADER_FILL: Rgb = Rgb(245, 245, 245);

/// Default closing line above the company name in the footer.
pub const DEFAULT_FOOTER_TEXT: &str = "Thank you for your business!";

/// Items table columns: header label, width in mm, alignment.
const COLUMNS: [(&str, f32, Align); 4] = [
    ("Description", 100.0, Align::Left),
    ("Qty", 20.0, Align::Left),
    ("Rate", 30.0, Align::Right),
    ("Amount", 30.0, Align::Right),
];

const LABEL_WIDTH: f32 = 150.0;
const VALUE_WIDTH: f32 = 30.0;

const LINE_HEIGHT: f32 = 6.0;
const ROW_HEIGHT: f32 = 10.0;
const SECTION_GAP: f32 = 10.0;
const TOTALS_GAP: f32 = 5.0;
const FOOTER_GAP: f32 = 20.0;

// =============================================================================
// Options & Output
// =============================================================================

/// Presentation choices that are not part of the invoice data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix printed before every monetary value.
    pub currency_code: String,
    pub footer_text: String,
    /// Print the tax and total lines even when the tax rate is zero.
    pub always_show_tax_lines: bool,
    /// Document title; `Invoice <number>` when unset.
    pub title: Option<String>,
    pub producer: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            footer_text: DEFAULT_FOOTER_TEXT.to_string(),
            always_show_tax_lines: false,
            title: None,
            producer: concat!("invoice-pdf ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A finished PDF, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

impl RenderedDocument {
    pub const MEDIA_TYPE: &'static str = "application/pdf";

    #[inline]
    pub fn media_type(&self) -> &'static str {
        Self::MEDIA_TYPE
    }
}

/// File name offered for download, e.g. `Invoice_INV-0001.pdf`.
///
/// The number is used as-is; making it safe for a particular file system
/// is up to the caller.
pub fn suggested_file_name(invoice_number: &str) -> String {
    format!("Invoice_{invoice_number}.pdf")
}

// =============================================================================
// Entry Points
// =============================================================================

/// Lays the invoice out without serializing it.
///
/// Useful for inspecting exactly what would be drawn.
pub fn layout_invoice(invoice: &Invoice, options: &RenderOptions) -> RenderResult<PageLayout> {
    InvoiceRenderer::new(invoice, options)?.run()
}

/// Renders the invoice to a single-page PDF.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use invoice_core::{Invoice, InvoiceMeta, LineItem, Money, Party, TaxRate};
/// use invoice_pdf::{render_invoice, RenderOptions};
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();
/// let invoice = Invoice {
///     company: Party { name: "Acme LLC".into(), ..Party::default() },
///     client: Party { name: "Beta Inc".into(), ..Party::default() },
///     meta: InvoiceMeta {
///         invoice_number: "INV-0001".into(),
///         invoice_date: date,
///         due_date: date,
///     },
///     items: vec![LineItem::new("Consulting", 2, Money::from_cents(15000))],
///     tax_rate: TaxRate::from_bps(1000),
/// };
///
/// let document = render_invoice(&invoice, &RenderOptions::default()).unwrap();
/// assert!(document.bytes.starts_with(b"%PDF-"));
/// assert_eq!(document.file_name, "Invoice_INV-0001.pdf");
/// ```
pub fn render_invoice(invoice: &Invoice, options: &RenderOptions) -> RenderResult<RenderedDocument> {
    let layout = layout_invoice(invoice, options)?;

    let info = DocumentInfo {
        title: options
            .title
            .clone()
            .unwrap_or_else(|| format!("Invoice {}", invoice.meta.invoice_number)),
        producer: options.producer.clone(),
    };
    let bytes = write_pdf(&layout, &info);

    info!(
        invoice_number = %invoice.meta.invoice_number,
        items = invoice.items.len(),
        bytes = bytes.len(),
        "Rendered invoice"
    );

    Ok(RenderedDocument {
        bytes,
        file_name: suggested_file_name(&invoice.meta.invoice_number),
    })
}

// =============================================================================
// Layout Driver
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Header,
    InvoiceBanner,
    BillTo,
    ItemsTable,
    TotalsBlock,
    Footer,
    Finalize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Header => "header",
            Stage::InvoiceBanner => "invoice_banner",
            Stage::BillTo => "bill_to",
            Stage::ItemsTable => "items_table",
            Stage::TotalsBlock => "totals_block",
            Stage::Footer => "footer",
            Stage::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

struct InvoiceRenderer<'a> {
    invoice: &'a Invoice,
    options: &'a RenderOptions,
    totals: Totals,
    canvas: Canvas,
    stage: Stage,
}

impl<'a> InvoiceRenderer<'a> {
    fn new(invoice: &'a Invoice, options: &'a RenderOptions) -> RenderResult<Self> {
        let totals = invoice
            .try_totals()
            .map_err(|_| RenderError::AmountOverflow)?;

        Ok(InvoiceRenderer {
            invoice,
            options,
            totals,
            canvas: Canvas::new(PageGeometry::a4()),
            stage: Stage::Start,
        })
    }

    fn run(mut self) -> RenderResult<PageLayout> {
        self.enter(Stage::Header);
        self.header()?;
        self.enter(Stage::InvoiceBanner);
        self.banner()?;
        self.enter(Stage::BillTo);
        self.bill_to()?;
        self.enter(Stage::ItemsTable);
        self.items_table()?;
        self.enter(Stage::TotalsBlock);
        self.totals_block()?;
        self.enter(Stage::Footer);
        self.footer()?;
        self.enter(Stage::Finalize);

        Ok(self.canvas.finish())
    }

    fn enter(&mut self, next: Stage) {
        debug!(from = %self.stage, to = %next, y = self.canvas.y(), "Layout stage");
        self.stage = next;
    }

    fn body_style(&mut self) {
        self.canvas.set_font(FontStyle::Regular, 12.0);
        self.canvas.set_text_color(Rgb::BLACK);
    }

    fn heading_style(&mut self, size_pt: f32) {
        self.canvas.set_font(FontStyle::Bold, size_pt);
        self.canvas.set_text_color(ACCENT);
    }

    /// Multi-line address followed by phone and email.
    fn contact_block(&mut self, party: &Party) -> RenderResult<()> {
        self.canvas
            .multi_cell(0.0, LINE_HEIGHT, &party.address, Align::Justify)?;
        self.canvas.cell(0.0, LINE_HEIGHT, &party.phone, CellStyle::LINE)?;
        self.canvas.cell(0.0, LINE_HEIGHT, &party.email, CellStyle::LINE)
    }

    fn header(&mut self) -> RenderResult<()> {
        let invoice = self.invoice;
        let company = &invoice.company;

        self.heading_style(16.0);
        self.canvas.cell(0.0, ROW_HEIGHT, &company.name, CellStyle::LINE)?;
        self.body_style();
        self.contact_block(company)
    }

    fn banner(&mut self) -> RenderResult<()> {
        let invoice = self.invoice;
        let meta = &invoice.meta;
        let right = CellStyle::LINE.aligned(Align::Right);

        self.canvas.ln(SECTION_GAP);
        self.heading_style(14.0);
        self.canvas.cell(0.0, ROW_HEIGHT, "INVOICE", right)?;

        self.body_style();
        let lines = [
            format!("Invoice #: {}", meta.invoice_number),
            format!("Date: {}", format_date(meta.invoice_date)),
            format!("Due Date: {}", format_date(meta.due_date)),
        ];
        for line in &lines {
            self.canvas.cell(0.0, LINE_HEIGHT, line, right)?;
        }
        Ok(())
    }

    fn bill_to(&mut self) -> RenderResult<()> {
        let invoice = self.invoice;
        let client = &invoice.client;

        self.canvas.ln(SECTION_GAP);
        self.canvas.set_font(FontStyle::Bold, 12.0);
        self.canvas.cell(0.0, LINE_HEIGHT, "Bill To:", CellStyle::LINE)?;
        self.canvas.set_font(FontStyle::Regular, 12.0);
        self.canvas.cell(0.0, LINE_HEIGHT, &client.name, CellStyle::LINE)?;
        self.contact_block(client)
    }

    fn items_table(&mut self) -> RenderResult<()> {
        self.canvas.ln(SECTION_GAP);
        self.canvas.set_font(FontStyle::Bold, 12.0);
        self.canvas.set_fill_color(HEADER_FILL);

        let header = CellStyle::INLINE.bordered().filled();
        self.table_row(COLUMNS.map(|(label, _, _)| label.to_string()), header)?;

        self.canvas.set_font(FontStyle::Regular, 12.0);
        let invoice = self.invoice;
        for item in &invoice.items {
            let cells = self.item_cells(item)?;
            self.table_row(cells, CellStyle::INLINE.bordered())?;
        }

        debug!(rows = invoice.items.len(), "Items table drawn");
        Ok(())
    }

    fn item_cells(&self, item: &LineItem) -> RenderResult<[String; 4]> {
        let code = &self.options.currency_code;
        let amount = item
            .rate
            .checked_multiply_quantity(item.quantity)
            .ok_or(RenderError::AmountOverflow)?;

        Ok([
            item.description.clone(),
            format_quantity(item.quantity),
            format_money(item.rate, code),
            format_money(amount, code),
        ])
    }

    /// One bordered row; the last cell moves the cursor to the next row.
    fn table_row(&mut self, cells: [String; 4], style: CellStyle) -> RenderResult<()> {
        let last = COLUMNS.len() - 1;
        for (i, ((_, width, align), text)) in COLUMNS.iter().zip(cells.iter()).enumerate() {
            let next = if i == last {
                NextPosition::NextLine
            } else {
                NextPosition::Right
            };
            self.canvas
                .cell(*width, ROW_HEIGHT, text, style.aligned(*align).then(next))?;
        }
        Ok(())
    }

    fn totals_block(&mut self) -> RenderResult<()> {
        let code = self.options.currency_code.clone();
        let totals = self.totals;

        self.canvas.ln(TOTALS_GAP);
        self.total_line("Subtotal:", &format_money(totals.subtotal, &code))?;

        if totals.tax_rate.is_positive() || self.options.always_show_tax_lines {
            self.total_line(
                &format!("Tax ({}%):", totals.tax_rate),
                &format_money(totals.tax_amount, &code),
            )?;
            self.canvas.set_font(FontStyle::Bold, 12.0);
            self.total_line("Total:", &format_money(totals.total, &code))?;
        } else {
            debug!("Zero tax rate, tax and total lines omitted");
        }
        Ok(())
    }

    fn total_line(&mut self, label: &str, value: &str) -> RenderResult<()> {
        let right = CellStyle::INLINE.aligned(Align::Right);
        self.canvas.cell(LABEL_WIDTH, ROW_HEIGHT, label, right)?;
        self.canvas
            .cell(VALUE_WIDTH, ROW_HEIGHT, value, right.then(NextPosition::NextLine))
    }

    fn footer(&mut self) -> RenderResult<()> {
        let centred = CellStyle::LINE.aligned(Align::Center);

        self.canvas.ln(FOOTER_GAP);
        self.canvas.set_font(FontStyle::Italic, 10.0);
        self.canvas.set_text_color(FOOTER_GRAY);
        self.canvas
            .cell(0.0, LINE_HEIGHT, &self.options.footer_text, centred)?;
        self.canvas
            .cell(0.0, LINE_HEIGHT, &self.invoice.company.name, centred)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
