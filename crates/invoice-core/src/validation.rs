//! # Validation Module
//!
//! Caller-side validation and clamping for invoice input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Collaborator (form / CLI)                                    │
//! │  ├── Range clamping: qty ≥ 1, rate ∈ [0, 1e9], tax ∈ [0, 100]          │
//! │  └── clamp_* functions in THIS MODULE                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: validate_invoice (THIS MODULE)                               │
//! │  └── Rejects anything the clamps did not cover                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Renderer                                                     │
//! │  └── Text encoding check (Latin-1 only)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The arithmetic in [`crate::types`] never calls into this module; the
//! input contract makes it optional. Collaborators that take raw user input
//! should run both layers.
//!
//! ## Usage
//! ```rust
//! use invoice_core::validation::{validate_quantity, clamp_quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(0).is_err());
//! assert_eq!(clamp_quantity(-3), 1);
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Invoice, TaxRate};
use crate::{MAX_ITEM_QUANTITY, MAX_ITEM_RATE, MAX_TAX_RATE_PERCENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit rate.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed [`MAX_ITEM_RATE`]
///
/// ## Example
/// ```rust
/// use invoice_core::money::Money;
/// use invoice_core::validation::validate_rate;
///
/// assert!(validate_rate(Money::from_cents(1099)).is_ok());
/// assert!(validate_rate(Money::zero()).is_ok());
/// assert!(validate_rate(Money::from_cents(-100)).is_err());
/// assert!(validate_rate(Money::from_cents(100_000_000_001)).is_err());
/// ```
pub fn validate_rate(rate: Money) -> ValidationResult<()> {
    if rate.is_negative() {
        return Err(ValidationError::Negative {
            field: "rate".to_string(),
        });
    }

    if rate > MAX_ITEM_RATE {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: "0".to_string(),
            max: MAX_ITEM_RATE.amount().to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.percent() < Decimal::ZERO || rate.percent() > MAX_TAX_RATE_PERCENT {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: "0".to_string(),
            max: MAX_TAX_RATE_PERCENT.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Invoice Validator
// =============================================================================

/// Validates a whole invoice against the renderer's input contract.
///
/// ## Rules
/// - Invoice number must not be blank (it names the output file)
/// - Every item passes [`validate_quantity`] and [`validate_rate`]
/// - Tax rate passes [`validate_tax_rate`]
///
/// Text fields are free-form; their encoding is checked by the renderer.
pub fn validate_invoice(invoice: &Invoice) -> CoreResult<()> {
    if invoice.meta.invoice_number.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "invoice number".to_string(),
        }
        .into());
    }

    for (index, item) in invoice.items.iter().enumerate() {
        validate_quantity(item.quantity)
            .and_then(|()| validate_rate(item.rate))
            .map_err(|source| CoreError::InvalidItem { index, source })?;
    }

    validate_tax_rate(invoice.tax_rate)?;

    Ok(())
}

// =============================================================================
// Clamping
// =============================================================================
// Mirrors the form widgets' min/max bounds: out-of-range input snaps to the
// nearest allowed value instead of being rejected.

/// Clamps a raw quantity into `[1, MAX_ITEM_QUANTITY]`.
pub fn clamp_quantity(raw: i64) -> u32 {
    let clamped = raw.clamp(1, i64::from(MAX_ITEM_QUANTITY));
    u32::try_from(clamped).unwrap_or(MAX_ITEM_QUANTITY)
}

/// Clamps a rate into `[0, MAX_ITEM_RATE]`.
#[inline]
pub fn clamp_rate(raw: Money) -> Money {
    raw.clamp(Money::zero(), MAX_ITEM_RATE)
}

/// Clamps a tax rate into `[0, 100]`.
#[inline]
pub fn clamp_tax_rate(raw: TaxRate) -> TaxRate {
    raw.clamped()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InvoiceMeta, LineItem, Party};
    use chrono::NaiveDate;

    fn sample_invoice() -> Invoice {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        Invoice {
            company: Party::default(),
            client: Party::default(),
            meta: InvoiceMeta {
                invoice_number: "INV-0001".to_string(),
                invoice_date: date,
                due_date: date,
            },
            items: vec![LineItem::new("Service 1", 1, Money::from_cents(10000))],
            tax_rate: TaxRate::from_bps(1000),
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate(Money::zero()).is_ok());
        assert!(validate_rate(MAX_ITEM_RATE).is_ok());

        assert!(matches!(
            validate_rate(Money::from_cents(-1)),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            validate_rate(MAX_ITEM_RATE + Money::from_cents(1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::zero()).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(825)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10000)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10001)).is_err());
        assert!(validate_tax_rate(TaxRate::from_percent(Decimal::NEGATIVE_ONE)).is_err());
    }

    #[test]
    fn test_validate_invoice_ok() {
        assert!(validate_invoice(&sample_invoice()).is_ok());
    }

    #[test]
    fn test_validate_invoice_allows_empty_items() {
        let mut invoice = sample_invoice();
        invoice.items.clear();
        assert!(validate_invoice(&invoice).is_ok());
    }

    #[test]
    fn test_validate_invoice_requires_number() {
        let mut invoice = sample_invoice();
        invoice.meta.invoice_number = "   ".to_string();

        let err = validate_invoice(&invoice).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "invoice number"
        ));
        assert_eq!(err.to_string(), "Validation error: invoice number is required");
    }

    #[test]
    fn test_validate_invoice_rejects_rate_above_ceiling() {
        let mut invoice = sample_invoice();
        let huge = Money::from_decimal(Decimal::from_i128_with_scale(10_i128.pow(26), 0));
        invoice.items.push(LineItem::new("Huge", 1000, huge));

        let err = validate_invoice(&invoice).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidItem {
                index: 1,
                source: ValidationError::OutOfRange { .. }
            }
        ));
        assert_eq!(err.to_string(), "Item 2: rate must be between 0 and 1000000000");
    }

    #[test]
    fn test_validate_invoice_reports_item_index() {
        let mut invoice = sample_invoice();
        invoice.items.push(LineItem::new("Broken", 0, Money::zero()));

        let err = validate_invoice(&invoice).unwrap_err();
        assert!(matches!(err, CoreError::InvalidItem { index: 1, .. }));
        assert_eq!(err.to_string(), "Item 2: quantity must be positive");
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-10), 1);
        assert_eq!(clamp_quantity(7), 7);
        assert_eq!(clamp_quantity(i64::MAX), MAX_ITEM_QUANTITY);

        assert_eq!(clamp_rate(Money::from_cents(-1)), Money::zero());
        assert_eq!(clamp_rate(Money::from_cents(250)), Money::from_cents(250));
        assert_eq!(clamp_rate(MAX_ITEM_RATE), MAX_ITEM_RATE);
        assert_eq!(clamp_rate(Money::from_cents(i64::MAX)), MAX_ITEM_RATE);

        assert_eq!(clamp_tax_rate(TaxRate::from_bps(20000)), TaxRate::from_bps(10000));
    }
}
