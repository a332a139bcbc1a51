//! # invoice-pdf: Invoice Document Renderer for Invoice Forge
//!
//! Lays an [`invoice_core::Invoice`] out on a single A4 page with a manually
//! advanced cursor and serializes the result as PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Render Pipeline                                 │
//! │                                                                         │
//! │   &Invoice ──► renderer ──► canvas ──► PageLayout ──► writer ──► bytes │
//! │                (stages)    (cursor,    (display       (pdf-writer)      │
//! │                             cells,      list)                           │
//! │                             wrapping)                                   │
//! │                    │            │                                       │
//! │                    ▼            ▼                                       │
//! │                 format       encoding + font                            │
//! │                 money,dates  Latin-1, Helvetica metrics                 │
//! │                                                                         │
//! │   Any RenderError aborts the pipeline: no partial document.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`renderer`] - The fixed invoice layout and the public entry points
//! - [`canvas`] - Cursor, cells, multi-line wrapping, display list
//! - [`writer`] - PDF object and content stream serialization
//! - [`font`] - Base-14 Helvetica family and glyph metrics
//! - [`encoding`] - Latin-1 text encoding
//! - [`format`] - Money, date and quantity formatting
//! - [`error`] - Render error types
//!
//! ## Concurrency
//!
//! Rendering is synchronous and allocates a fresh canvas per call. Nothing
//! is shared between calls, so separate threads may render separate
//! invoices freely.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod canvas;
pub mod encoding;
pub mod error;
pub mod font;
pub mod format;
pub mod renderer;
pub mod writer;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use canvas::{DrawOp, PageLayout, TextRun};
pub use error::{RenderError, RenderResult};
pub use renderer::{layout_invoice, render_invoice, suggested_file_name, RenderOptions, RenderedDocument};
