//! # Page Canvas
//!
//! A single page with an explicit drawing cursor. Every drawing call
//! appends to a display list and moves the cursor; nothing is serialized
//! until [`crate::writer`] turns the finished [`PageLayout`] into PDF.
//!
//! ## Coordinate System
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ (0,0) ───────────────────────────────────────────────────► x (mm)       │
//! │   │   ┌─ margin 10mm ─────────────────────────────── margin 10mm ─┐     │
//! │   │   │ ● cursor starts here                                      │     │
//! │   │   │ ┌────────────────┬──────┬────────┬────────┐               │     │
//! │   │   │ │ cell (w × h)   │ cell │  cell  │  cell  │ ← ln = Right   │     │
//! │   │   │ └────────────────┴──────┴────────┴────────┘               │     │
//! │   │   │ ● ← ln = NextLine: y += h, x = left margin                │     │
//! │   ▼   │                                                           │     │
//! │ y (mm)│                                                           │     │
//! │       └─── page break trigger (297 - 20mm): only warned about ────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Units are millimetres with y growing downwards; the writer flips to PDF
//! points.

use tracing::warn;

use crate::encoding::{decode_latin1, encode_latin1};
use crate::error::RenderResult;
use crate::font::{Font, FontStyle};

/// PDF points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Border line width in millimetres.
pub const LINE_WIDTH_MM: f32 = 0.567 / PT_PER_MM;

// =============================================================================
// Geometry & Style Primitives
// =============================================================================

/// Page size and margins, all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    /// Distance from the bottom edge where the printable area ends.
    pub margin_bottom: f32,
    /// Horizontal padding inside a cell.
    pub cell_padding: f32,
}

impl PageGeometry {
    /// A4 portrait with 1 cm side margins and a 2 cm bottom margin.
    pub fn a4() -> Self {
        let margin = 28.35 / PT_PER_MM;
        PageGeometry {
            width: 210.0,
            height: 297.0,
            margin_left: margin,
            margin_top: margin,
            margin_right: margin,
            margin_bottom: 2.0 * margin,
            cell_padding: margin / 10.0,
        }
    }

    /// Lowest y that still lies in the printable area.
    #[inline]
    pub fn break_trigger(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Components scaled to `0.0..=1.0` for PDF color operators.
    pub fn unit(self) -> [f32; 3] {
        [self.0, self.1, self.2].map(|c| f32::from(c) / 255.0)
    }
}

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
    /// Left aligned, with stretched word spacing on wrapped lines of a
    /// [`Canvas::multi_cell`].
    Justify,
}

/// Where the cursor goes after a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPosition {
    /// To the right edge of the cell, same row.
    Right,
    /// To the start of the next row at the left margin.
    NextLine,
    /// Directly below the cell, keeping x.
    Below,
}

/// How a cell is drawn and where it leaves the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub border: bool,
    pub fill: bool,
    pub align: Align,
    pub next: NextPosition,
}

impl CellStyle {
    /// Plain left-aligned text line; the cursor moves to the next line.
    pub const LINE: CellStyle = CellStyle {
        border: false,
        fill: false,
        align: Align::Left,
        next: NextPosition::NextLine,
    };

    /// Left-aligned text; the cursor stays on the row.
    pub const INLINE: CellStyle = CellStyle {
        next: NextPosition::Right,
        ..CellStyle::LINE
    };

    pub const fn aligned(self, align: Align) -> Self {
        CellStyle { align, ..self }
    }

    pub const fn bordered(self) -> Self {
        CellStyle {
            border: true,
            ..self
        }
    }

    pub const fn filled(self) -> Self {
        CellStyle { fill: true, ..self }
    }

    pub const fn then(self, next: NextPosition) -> Self {
        CellStyle { next, ..self }
    }
}

// =============================================================================
// Display List
// =============================================================================

/// One positioned string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub baseline: f32,
    pub text: String,
    /// `text` in Latin-1, as written to the content stream.
    pub encoded: Vec<u8>,
    pub font: Font,
    pub color: Rgb,
    /// Extra space added to each space character, in millimetres.
    pub word_spacing: f32,
}

/// A drawing operation, in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: bool,
    },
    Text(TextRun),
}

/// Finished page: geometry plus the ordered display list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub geometry: PageGeometry,
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    /// Text runs in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            DrawOp::Rect { .. } => None,
        })
    }

    /// Whether any run draws exactly `text`.
    pub fn contains_text(&self, text: &str) -> bool {
        self.texts().any(|run| run.text == text)
    }
}

// =============================================================================
// Canvas
// =============================================================================

/// Single-page drawing surface with a manually advanced cursor.
///
/// Style is explicit state: font, text color and fill color stay as set
/// until changed, and nothing resets them between sections.
#[derive(Debug)]
pub struct Canvas {
    geometry: PageGeometry,
    x: f32,
    y: f32,
    font: Font,
    text_color: Rgb,
    fill_color: Rgb,
    word_spacing: f32,
    overflow_reported: bool,
    ops: Vec<DrawOp>,
}

impl Canvas {
    /// Creates an empty page with the cursor at the top-left margin.
    pub fn new(geometry: PageGeometry) -> Self {
        Canvas {
            geometry,
            x: geometry.margin_left,
            y: geometry.margin_top,
            font: Font::default(),
            text_color: Rgb::BLACK,
            fill_color: Rgb::BLACK,
            word_spacing: 0.0,
            overflow_reported: false,
            ops: Vec::new(),
        }
    }

    /// Current vertical cursor. After [`Canvas::multi_cell`] this is the
    /// only way to learn how far the block went.
    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.font = Font::new(style, size_pt);
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    /// Moves to the left margin and down by `height`.
    pub fn ln(&mut self, height: f32) {
        self.x = self.geometry.margin_left;
        self.y += height;
    }

    /// Draws one cell at the cursor and advances it.
    ///
    /// A `width` of `0.0` stretches the cell to the right margin. Empty
    /// text draws no text run, but borders, fills and cursor movement
    /// still apply.
    pub fn cell(&mut self, width: f32, height: f32, text: &str, style: CellStyle) -> RenderResult<()> {
        let encoded = encode_latin1(text)?;
        let width = self.resolve_width(width);
        self.cell_encoded(width, height, &encoded, style);
        Ok(())
    }

    /// Draws `text` as a block of wrapped lines of `height` each.
    ///
    /// ## Wrapping Rules
    /// - Carriage returns are dropped, a single trailing newline is ignored
    /// - Explicit newlines always start a new line
    /// - Lines break at the last space that fits; a word wider than the
    ///   cell breaks at the last character that fits
    /// - With [`Align::Justify`], lines broken at a space get stretched
    ///   word spacing; explicit-newline and final lines do not
    ///
    /// Each line is a cell that keeps x; afterwards x returns to the left
    /// margin. Returns the number of lines produced.
    pub fn multi_cell(&mut self, width: f32, height: f32, text: &str, align: Align) -> RenderResult<usize> {
        let encoded: Vec<u8> = encode_latin1(text)?
            .into_iter()
            .filter(|&b| b != b'\r')
            .collect();
        let width = self.resolve_width(width);
        let max_units = (width - 2.0 * self.geometry.cell_padding) * 1000.0 / self.font.size_mm();
        let widths = self.font.style.widths();
        let style = CellStyle::LINE.aligned(align).then(NextPosition::Below);

        let mut end = encoded.len();
        if encoded.last() == Some(&b'\n') {
            end -= 1;
        }

        let mut i = 0;
        let mut line_start = 0;
        let mut separator: Option<usize> = None;
        let mut width_at_separator = 0.0;
        let mut line_units = 0.0;
        let mut spaces = 0u32;
        let mut lines = 1;

        while i < end {
            let byte = encoded[i];

            if byte == b'\n' {
                self.word_spacing = 0.0;
                self.cell_encoded(width, height, &encoded[line_start..i], style);
                i += 1;
                line_start = i;
                separator = None;
                line_units = 0.0;
                spaces = 0;
                lines += 1;
                continue;
            }

            if byte == b' ' {
                separator = Some(i);
                width_at_separator = line_units;
                spaces += 1;
            }

            line_units += f32::from(widths[usize::from(byte)]);
            if line_units <= max_units {
                i += 1;
                continue;
            }

            match separator {
                None => {
                    if i == line_start {
                        i += 1;
                    }
                    self.word_spacing = 0.0;
                    self.cell_encoded(width, height, &encoded[line_start..i], style);
                }
                Some(at) => {
                    if align == Align::Justify {
                        self.word_spacing = if spaces > 1 {
                            (max_units - width_at_separator) / 1000.0 * self.font.size_mm()
                                / (spaces - 1) as f32
                        } else {
                            0.0
                        };
                    }
                    self.cell_encoded(width, height, &encoded[line_start..at], style);
                    i = at + 1;
                }
            }

            line_start = i;
            separator = None;
            line_units = 0.0;
            spaces = 0;
            lines += 1;
        }

        self.word_spacing = 0.0;
        self.cell_encoded(width, height, &encoded[line_start..i], style);
        self.x = self.geometry.margin_left;

        Ok(lines)
    }

    /// Consumes the canvas and returns the display list.
    pub fn finish(self) -> PageLayout {
        PageLayout {
            geometry: self.geometry,
            ops: self.ops,
        }
    }

    fn resolve_width(&self, width: f32) -> f32 {
        if width == 0.0 {
            self.geometry.width - self.geometry.margin_right - self.x
        } else {
            width
        }
    }

    fn cell_encoded(&mut self, width: f32, height: f32, encoded: &[u8], style: CellStyle) {
        if self.y + height > self.geometry.break_trigger() && !self.overflow_reported {
            warn!(
                y = self.y,
                height,
                limit = self.geometry.break_trigger(),
                "Content runs past the printable area of the single page"
            );
            self.overflow_reported = true;
        }

        if style.border || style.fill {
            self.ops.push(DrawOp::Rect {
                x: self.x,
                y: self.y,
                width,
                height,
                fill: style.fill.then_some(self.fill_color),
                stroke: style.border,
            });
        }

        if !encoded.is_empty() {
            let padding = self.geometry.cell_padding;
            let offset = match style.align {
                Align::Right => width - padding - self.font.text_width(encoded),
                Align::Center => (width - self.font.text_width(encoded)) / 2.0,
                Align::Left | Align::Justify => padding,
            };

            self.ops.push(DrawOp::Text(TextRun {
                x: self.x + offset,
                baseline: self.y + 0.5 * height + 0.3 * self.font.size_mm(),
                text: decode_latin1(encoded),
                encoded: encoded.to_vec(),
                font: self.font,
                color: self.text_color,
                word_spacing: self.word_spacing,
            }));
        }

        match style.next {
            NextPosition::Right => self.x += width,
            NextPosition::NextLine => {
                self.y += height;
                self.x = self.geometry.margin_left;
            }
            NextPosition::Below => self.y += height,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
