//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Invoices need two things at once:                                      │
//! │    • exact sums (subtotal == Σ amount, always)                          │
//! │    • full precision until display (8.25% of 0.10 = 0.00825)             │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    Every intermediate value is exact; rounding to 2 places happens      │
//! │    exactly once, when the value is formatted for the document           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoice_core::money::Money;
//!
//! // Create from cents (preferred for literals)
//! let rate = Money::from_cents(15000); // 150.00
//!
//! // Arithmetic operations
//! let amount = rate.multiply_quantity(2); // 300.00
//! let total = amount + Money::from_cents(3000); // 330.00
//!
//! assert_eq!(total.to_string(), "330.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use crate::types::TaxRate;

/// Number of decimal places shown for every monetary value.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the invoice's single currency.
///
/// ## Design Decisions
/// - **Decimal (signed)**: exact base-10 math, no binary float drift
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **No rounding in arithmetic**: only [`Money::round_to_cents`] and
///   `Display` round
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  LineItem.rate ──► × quantity ──► LineItem.amount                       │
/// │                                        │                                │
/// │                                        ▼                                │
/// │                     Σ amounts ──► subtotal ──► × rate% ──► tax_amount   │
/// │                                        │                       │        │
/// │                                        └───────► total ◄───────┘        │
/// │                                                                         │
/// │  Displayed as "INR 1,234.56" by the document renderer                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest display unit).
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    ///
    /// let price = Money::from_cents(123450);
    /// assert_eq!(price.to_string(), "1,234.50");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, DISPLAY_DECIMALS))
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert!(zero.is_zero());
    /// assert_eq!(zero.to_string(), "0.00");
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies money by a quantity. No rounding.
    ///
    /// # Panics
    /// If the product leaves `Decimal`'s range. Use
    /// [`Money::checked_multiply_quantity`] for unvalidated input.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    ///
    /// let rate = Money::from_cents(299); // 2.99
    /// let amount = rate.multiply_quantity(3);
    /// assert_eq!(amount, Money::from_cents(897)); // 8.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Adds two values, or `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Calculates `self * rate / 100` at full precision.
    ///
    /// # Panics
    /// If `self * rate` leaves `Decimal`'s range.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    /// use invoice_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(1000); // 10.00
    /// let rate = TaxRate::from_bps(825);      // 8.25%
    ///
    /// let tax = subtotal.calculate_tax(rate);
    /// // 10.00 × 8.25% = 0.825, kept exactly
    /// assert_eq!(tax.amount().normalize().to_string(), "0.825");
    /// // ...and only rounded for display (half to even)
    /// assert_eq!(tax.to_string(), "0.82");
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.percent() / Decimal::ONE_HUNDRED)
    }

    /// Calculates the tax like [`Money::calculate_tax`], or `None` on overflow.
    pub fn checked_calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        self.0
            .checked_mul(rate.percent())?
            .checked_div(Decimal::ONE_HUNDRED)
            .map(Money)
    }

    /// Rounds to two decimal places using Bankers Rounding.
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
    /// │    0.005 → 0.01, 0.015 → 0.02, 0.025 → 0.03 (always up)            │
    /// │                                                                     │
    /// │  Bankers Rounding rounds 0.5 to nearest EVEN digit:                │
    /// │    0.005 → 0.00, 0.015 → 0.02, 0.025 → 0.02 (alternates)           │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Returns the display value in cents (rounded, see [`Money::round_to_cents`]).
    ///
    /// `None` when the cent count itself is out of `Decimal`'s range.
    pub fn cents(&self) -> Option<i128> {
        let rounded = self.round_to_cents().0;
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|cents| cents.trunc().mantissa())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the rounded value with thousands separators: `1,234.56`.
///
/// The currency code is not part of the value; the renderer prefixes it.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        let rounded = rounded.abs();
        let whole = rounded.trunc().to_string();
        let fraction = (rounded.fract() * Decimal::ONE_HUNDRED).trunc().to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(f, "{sign}{grouped}.{fraction:0>2}")
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
