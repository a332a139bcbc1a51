//! # Domain Types
//!
//! Core domain types describing one invoice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Invoice                                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ Party (company) │   │ Party (client)  │   │   InvoiceMeta   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  name           │   │  invoice_number │       │
//! │  │  address        │   │  address        │   │  invoice_date   │       │
//! │  │  phone, email   │   │  phone, email   │   │  due_date       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ Vec<LineItem>   │   │    TaxRate      │   │     Totals      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  (derived only) │       │
//! │  │  description    │   │  percent (Dec)  │   │  subtotal       │       │
//! │  │  quantity (u32) │   │  10.0 = 10%     │   │  tax_amount     │       │
//! │  │  rate (Money)   │   └─────────────────┘   │  total          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An `Invoice` is built fresh for every render request and dropped after
//! it. `Totals` is never stored on it: ask [`Invoice::totals`] each time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a percentage (`10` means 10%).
///
/// Expected range is `[0, 100]`. The type does not enforce it; use
/// [`crate::validation::validate_tax_rate`] or [`TaxRate::clamped`] at the
/// boundary where the value enters the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        TaxRate(percent)
    }

    /// Creates a tax rate from basis points (825 = 8.25%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 2))
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if tax rate is strictly above zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns the rate clamped into `[0, 100]`.
    pub fn clamped(self) -> Self {
        TaxRate(self.0.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Renders the percentage the way the invoice form shows numbers:
/// integral rates keep one decimal (`10.0`), others print exactly (`8.25`).
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            write!(f, "{normalized}.0")
        } else {
            write!(f, "{normalized}")
        }
    }
}

// =============================================================================
// Parties
// =============================================================================

/// Issuer or recipient of an invoice. Free text, shown as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// May span several lines; the renderer wraps it.
    pub address: String,
    pub phone: String,
    pub email: String,
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row of the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// At least 1 under the input contract.
    pub quantity: u32,
    /// Unit price, never negative under the input contract.
    pub rate: Money,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, rate: Money) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            rate,
        }
    }

    /// `quantity × rate` at full precision.
    #[inline]
    pub fn amount(&self) -> Money {
        compute_amount(self)
    }
}

// =============================================================================
// Invoice Metadata
// =============================================================================

/// Number and dates printed in the invoice banner.
///
/// No ordering is enforced between `invoice_date` and `due_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
}

// =============================================================================
// Totals
// =============================================================================

/// Aggregate monetary values of an invoice, always derived from the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax_amount: Money,
    pub total: Money,
}

/// Returns `quantity × rate` with no rounding.
#[inline]
pub fn compute_amount(item: &LineItem) -> Money {
    item.rate.multiply_quantity(item.quantity)
}

/// Computes subtotal, tax amount and total for a list of items.
///
/// ## Formulas
/// ```text
/// subtotal   = Σ quantity × rate
/// tax_amount = subtotal × tax_rate / 100
/// total      = subtotal + tax_amount
/// ```
///
/// The rate is assumed to be in `[0, 100]` already; it is not re-checked.
///
/// # Panics
/// If a sum or product leaves `Decimal`'s range, which validated input
/// cannot reach. [`try_compute_totals`] reports that case instead.
///
/// ## Example
/// ```rust
/// use invoice_core::money::Money;
/// use invoice_core::types::{compute_totals, LineItem, TaxRate};
///
/// let items = vec![LineItem::new("Consulting", 2, Money::from_cents(15000))];
/// let totals = compute_totals(&items, TaxRate::from_bps(1000));
///
/// assert_eq!(totals.subtotal, Money::from_cents(30000));
/// assert_eq!(totals.tax_amount, Money::from_cents(3000));
/// assert_eq!(totals.total, Money::from_cents(33000));
/// ```
pub fn compute_totals(items: &[LineItem], tax_rate: TaxRate) -> Totals {
    let subtotal: Money = items.iter().map(compute_amount).sum();
    let tax_amount = subtotal.calculate_tax(tax_rate);

    Totals {
        subtotal,
        tax_rate,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

/// Computes the same totals as [`compute_totals`] with checked arithmetic.
///
/// Returns [`CoreError::AmountOverflow`] when any amount, the subtotal, the
/// tax or the total leaves `Decimal`'s range.
pub fn try_compute_totals(items: &[LineItem], tax_rate: TaxRate) -> CoreResult<Totals> {
    let subtotal = items.iter().try_fold(Money::zero(), |acc, item| {
        item.rate
            .checked_multiply_quantity(item.quantity)
            .and_then(|amount| acc.checked_add(amount))
    });
    let subtotal = subtotal.ok_or(CoreError::AmountOverflow)?;
    let tax_amount = subtotal
        .checked_calculate_tax(tax_rate)
        .ok_or(CoreError::AmountOverflow)?;
    let total = subtotal
        .checked_add(tax_amount)
        .ok_or(CoreError::AmountOverflow)?;

    Ok(Totals {
        subtotal,
        tax_rate,
        tax_amount,
        total,
    })
}

// =============================================================================
// Invoice
// =============================================================================

/// A complete invoice snapshot, as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub company: Party,
    pub client: Party,
    pub meta: InvoiceMeta,
    /// Row order is document order. May be empty.
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub tax_rate: TaxRate,
}

impl Invoice {
    /// Derives the totals from the current items and tax rate.
    #[inline]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items, self.tax_rate)
    }

    /// Derives the totals with checked arithmetic, see [`try_compute_totals`].
    #[inline]
    pub fn try_totals(&self) -> CoreResult<Totals> {
        try_compute_totals(&self.items, self.tax_rate)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.percent(), dec("8.25"));
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_percent(dec("10")).to_string(), "10.0");
        assert_eq!(TaxRate::from_percent(dec("10.00")).to_string(), "10.0");
        assert_eq!(TaxRate::from_percent(dec("8.25")).to_string(), "8.25");
        assert_eq!(TaxRate::from_percent(dec("7.50")).to_string(), "7.5");
        assert_eq!(TaxRate::zero().to_string(), "0.0");
    }

    #[test]
    fn test_tax_rate_clamped() {
        assert_eq!(TaxRate::from_percent(dec("150")).clamped().percent(), dec("100"));
        assert_eq!(TaxRate::from_percent(dec("-1")).clamped(), TaxRate::zero());
        assert_eq!(TaxRate::from_bps(825).clamped(), TaxRate::from_bps(825));
    }

    #[test]
    fn test_line_item_amount() {
        let item = LineItem::new("Consulting", 2, Money::from_cents(15000));
        assert_eq!(item.amount(), Money::from_cents(30000));
    }

    #[test]
    fn test_totals_empty_items() {
        let totals = compute_totals(&[], TaxRate::from_bps(1000));
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax_amount.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_totals_zero_rate() {
        let items = vec![LineItem::new("Item", 1, Money::from_cents(10000))];
        let totals = compute_totals(&items, TaxRate::zero());
        assert!(totals.tax_amount.is_zero());
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_totals_multiple_items() {
        let items = vec![
            LineItem::new("Design", 3, Money::from_cents(1999)),
            LineItem::new("Hosting", 12, Money::from_cents(500)),
        ];
        let totals = compute_totals(&items, TaxRate::from_bps(1850));

        assert_eq!(totals.subtotal, Money::from_cents(11997));
        // 119.97 × 18.5% = 22.19445, unrounded
        assert_eq!(totals.tax_amount.amount(), dec("22.19445"));
        assert_eq!(totals.total.amount(), dec("142.16445"));
        assert_eq!(totals.total.to_string(), "142.16");
    }

    #[test]
    fn test_checked_totals_at_largest_valid_row() {
        let items = vec![LineItem::new("Row", crate::MAX_ITEM_QUANTITY, crate::MAX_ITEM_RATE)];
        let totals = try_compute_totals(&items, TaxRate::from_percent(Decimal::ONE_HUNDRED)).unwrap();

        assert_eq!(totals.subtotal.to_string(), "999,999,000,000,000.00");
        assert_eq!(totals.tax_amount, totals.subtotal);
        assert_eq!(totals.total.to_string(), "1,999,998,000,000,000.00");
        assert_eq!(totals, compute_totals(&items, totals.tax_rate));
    }

    #[test]
    fn test_checked_totals_report_overflow() {
        // 1e26 × 1000 is past Decimal::MAX (about 7.9e28)
        let rate = Money::from_decimal(dec("100000000000000000000000000"));
        let items = vec![LineItem::new("Row", 1000, rate)];
        assert!(matches!(
            try_compute_totals(&items, TaxRate::zero()),
            Err(CoreError::AmountOverflow)
        ));

        // the subtotal fits, the tax does not
        let items = vec![LineItem::new("Row", 1, Money::from_decimal(Decimal::MAX))];
        assert!(matches!(
            try_compute_totals(&items, TaxRate::from_bps(5000)),
            Err(CoreError::AmountOverflow)
        ));
    }

    #[test]
    fn test_invoice_deserializes_from_json() {
        let json = r#"{
            "company": {"name": "Acme LLC", "address": "1 Road", "phone": "1", "email": "a@acme.test"},
            "client": {"name": "Beta Inc", "address": "2 Road", "phone": "2", "email": "b@beta.test"},
            "meta": {"invoice_number": "INV-7", "invoice_date": "2025-04-03", "due_date": "2025-05-03"},
            "items": [{"description": "Consulting", "quantity": 2, "rate": 150.0}],
            "tax_rate": 10
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.meta.invoice_date, NaiveDate::from_ymd_opt(2025, 4, 3).unwrap());
        assert_eq!(invoice.totals().total, Money::from_cents(33000));
        assert_eq!(invoice.try_totals().unwrap(), invoice.totals());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn money_strategy() -> impl Strategy<Value = Money> {
            (0i64..100_000_000).prop_map(Money::from_cents)
        }

        fn rate_strategy() -> impl Strategy<Value = TaxRate> {
            (0u32..=10_000).prop_map(TaxRate::from_bps)
        }

        fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
            prop::collection::vec(
                (1u32..10_000, money_strategy())
                    .prop_map(|(qty, rate)| LineItem::new("Row", qty, rate)),
                0..20,
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: amount is exactly quantity × rate.
            #[test]
            fn amount_is_exact_product(qty in 0u32..1_000_000, rate in money_strategy()) {
                let item = LineItem::new("Row", qty, rate);
                prop_assert_eq!(
                    compute_amount(&item).amount(),
                    rate.amount() * Decimal::from(qty)
                );
            }

            /// Property: amount never decreases when quantity or rate grows.
            #[test]
            fn amount_is_monotonic(
                qty in 0u32..100_000,
                extra_qty in 0u32..100_000,
                rate in money_strategy(),
                extra_cents in 0i64..1_000_000,
            ) {
                let base = LineItem::new("Row", qty, rate).amount();
                let more_qty = LineItem::new("Row", qty + extra_qty, rate).amount();
                let more_rate =
                    LineItem::new("Row", qty, rate + Money::from_cents(extra_cents)).amount();

                prop_assert!(more_qty >= base);
                prop_assert!(more_rate >= base);
            }

            /// Property: subtotal equals the sum of amounts; tax and total
            /// follow their formulas exactly.
            #[test]
            fn totals_follow_formulas(items in items_strategy(), rate in rate_strategy()) {
                let totals = compute_totals(&items, rate);

                let expected_subtotal = items
                    .iter()
                    .fold(Decimal::ZERO, |acc, item| acc + item.amount().amount());
                prop_assert_eq!(totals.subtotal.amount(), expected_subtotal);
                prop_assert_eq!(
                    totals.tax_amount.amount(),
                    expected_subtotal * rate.percent() / Decimal::ONE_HUNDRED
                );
                prop_assert_eq!(totals.total, totals.subtotal + totals.tax_amount);
            }

            /// Property: a zero rate means no tax and total == subtotal.
            #[test]
            fn zero_rate_means_no_tax(items in items_strategy()) {
                let totals = compute_totals(&items, TaxRate::zero());
                prop_assert!(totals.tax_amount.is_zero());
                prop_assert_eq!(totals.total, totals.subtotal);
            }

            /// Property: the checked totals agree with the plain ones.
            #[test]
            fn checked_totals_agree(items in items_strategy(), rate in rate_strategy()) {
                prop_assert_eq!(try_compute_totals(&items, rate).ok(), Some(compute_totals(&items, rate)));
            }

            /// Property: computing totals twice yields identical results.
            #[test]
            fn totals_are_idempotent(items in items_strategy(), rate in rate_strategy()) {
                let first = compute_totals(&items, rate);
                let second = compute_totals(&items, rate);
                prop_assert_eq!(first, second);
                prop_assert_eq!(first.total.amount().serialize(), second.total.amount().serialize());
            }
        }
    }
}
