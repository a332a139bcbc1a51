//! # invoice-core: Pure Invoice Arithmetic for Invoice Forge
//!
//! This crate holds the invoice data model and derives every monetary total
//! as a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Invoice Forge Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Collaborator (apps/invoice-cli)                   │   │
//! │  │    Form values ──► defaults ──► clamping ──► totals summary     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Invoice (owned snapshot)               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ invoice-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Invoice  │  │   Money   │  │  clamps   │                  │   │
//! │  │   │  Totals   │  │  TaxCalc  │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO ENV • PURE FUNCTIONS                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &Invoice                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 invoice-pdf (Document Renderer)                 │   │
//! │  │              Cursor layout, cells, PDF serialization            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Invoice, Party, LineItem, TaxRate, Totals)
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Caller-side validation and range clamping
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same items and rate in, bit-identical totals out
//! 2. **No I/O**: file system, network, and environment access is FORBIDDEN here
//! 3. **Round Once**: full precision internally, 2 places only for display
//! 4. **Explicit Errors**: all errors are typed, never strings; overflow has
//!    checked variants (`try_compute_totals`, `Money::checked_*`)
//!
//! ## Example Usage
//!
//! ```rust
//! use invoice_core::{compute_totals, LineItem, Money, TaxRate};
//!
//! let items = vec![LineItem::new("Consulting", 2, Money::from_cents(15000))];
//! let totals = compute_totals(&items, TaxRate::from_bps(1000)); // 10%
//!
//! assert_eq!(totals.subtotal.to_string(), "300.00");
//! assert_eq!(totals.tax_amount.to_string(), "30.00");
//! assert_eq!(totals.total.to_string(), "330.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use invoice_core::Money` instead of
// `use invoice_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

use rust_decimal::Decimal;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The single currency code printed in front of every amount.
pub const DEFAULT_CURRENCY_CODE: &str = "INR";

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Catches typos (an extra zero or two) before they reach a printed invoice.
pub const MAX_ITEM_QUANTITY: u32 = 999_999;

/// Maximum unit rate of a single line item: 1,000,000,000.00.
///
/// With [`MAX_ITEM_QUANTITY`] and a 100% tax rate a single row stays near
/// 2e15, far inside `Decimal`'s range, so validated totals cannot overflow.
pub const MAX_ITEM_RATE: Money =
    Money::from_decimal(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

/// Upper bound of the tax rate percentage.
pub const MAX_TAX_RATE_PERCENT: Decimal = Decimal::ONE_HUNDRED;
