//! # Invoice CLI
//!
//! Command-line collaborator around the invoice engine: it plays the part
//! of the invoice form.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  form.json? ──► InvoiceForm ──► clamp + validate ──► Invoice            │
//! │  (defaults)                                            │                │
//! │                                        totals summary ◄┤ (stdout)       │
//! │                                                        ▼                │
//! │                                  render_invoice ──► Invoice_<n>.pdf     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables, each overridable by a flag:
//! - `INVOICE_OUTPUT_DIR` - Output directory (default: `.`)
//! - `INVOICE_CURRENCY` - Currency code (default: `INR`)
//! - `INVOICE_FOOTER` - Footer closing line
//! - `INVOICE_ALWAYS_SHOW_TAX_LINES` - `true` to print tax lines at 0%

pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod form;

// Re-exports
pub use args::Args;
pub use config::{CliConfig, ConfigError};
pub use error::{CliError, CliResult};
pub use form::InvoiceForm;
