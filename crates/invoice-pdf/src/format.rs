//! Text formatting for values printed on the invoice.

use chrono::NaiveDate;
use invoice_core::Money;

/// Date format used in the invoice banner, e.g. `January 05, 2025`.
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// Formats a monetary value as `<CODE> 1,234.56`.
///
/// ## Example
/// ```rust
/// use invoice_core::Money;
/// use invoice_pdf::format::format_money;
///
/// assert_eq!(format_money(Money::from_cents(123450), "INR"), "INR 1,234.50");
/// ```
pub fn format_money(amount: Money, currency_code: &str) -> String {
    format!("{currency_code} {amount}")
}

/// Formats a date as full month name, zero-padded day and year.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Quantities print as plain integers.
pub fn format_quantity(quantity: u32) -> String {
    quantity.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_money_grouping_and_decimals() {
        let amount = Money::from_decimal(Decimal::from_str("1234.5").unwrap());
        assert_eq!(format_money(amount, "INR"), "INR 1,234.50");
        assert_eq!(format_money(Money::zero(), "INR"), "INR 0.00");
        assert_eq!(format_money(Money::from_cents(100_000_000), "USD"), "USD 1,000,000.00");
    }

    #[test]
    fn test_money_rounds_half_to_even() {
        let amount = Money::from_decimal(Decimal::from_str("0.125").unwrap());
        assert_eq!(format_money(amount, "INR"), "INR 0.12");
        let amount = Money::from_decimal(Decimal::from_str("0.135").unwrap());
        assert_eq!(format_money(amount, "INR"), "INR 0.14");
    }

    #[test]
    fn test_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();
        assert_eq!(format_date(date), "April 03, 2025");
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date(date), "January 05, 2025");
    }

    #[test]
    fn test_quantity_is_plain_integer() {
        assert_eq!(format_quantity(1), "1");
        assert_eq!(format_quantity(999_999), "999999");
    }
}
