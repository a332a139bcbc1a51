//! # Invoice Form
//!
//! Raw form values as read from JSON. Every field is optional; whatever is
//! missing takes the value the blank form starts with.
//!
//! ```json
//! {
//!   "company": { "name": "Acme LLC" },
//!   "client": { "name": "Beta Inc", "email": "ap@beta.example" },
//!   "invoice_number": "INV-0042",
//!   "items": [{ "description": "Consulting", "quantity": 2, "rate": 150 }],
//!   "tax_rate": 10
//! }
//! ```
//!
//! Numeric values are clamped into the ranges the form widgets allow, so a
//! negative quantity becomes 1, a rate above `MAX_ITEM_RATE` becomes that
//! ceiling and a tax rate of 120 becomes 100.

use chrono::NaiveDate;
use invoice_core::validation::{clamp_quantity, clamp_rate, clamp_tax_rate};
use invoice_core::{Invoice, InvoiceMeta, LineItem, Money, Party, TaxRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INVOICE_NUMBER: &str = "INV-0001";

/// Contact details as entered; blanks are filled from a default party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl PartyForm {
    fn into_party(self, defaults: Party) -> Party {
        Party {
            name: self.name.unwrap_or(defaults.name),
            address: self.address.unwrap_or(defaults.address),
            phone: self.phone.unwrap_or(defaults.phone),
            email: self.email.unwrap_or(defaults.email),
        }
    }
}

/// One item row as entered.
///
/// Quantity is signed so out-of-range input can be clamped instead of
/// failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemForm {
    pub description: Option<String>,
    pub quantity: i64,
    pub rate: Decimal,
}

impl Default for ItemForm {
    fn default() -> Self {
        ItemForm {
            description: None,
            quantity: 1,
            rate: Decimal::ONE_HUNDRED,
        }
    }
}

/// All form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceForm {
    pub company: PartyForm,
    pub client: PartyForm,
    pub invoice_number: String,
    /// Today when unset.
    pub invoice_date: Option<NaiveDate>,
    /// Today when unset.
    pub due_date: Option<NaiveDate>,
    pub items: Vec<ItemForm>,
    /// Percentage, `10` meaning 10%.
    pub tax_rate: Decimal,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        InvoiceForm {
            company: PartyForm::default(),
            client: PartyForm::default(),
            invoice_number: DEFAULT_INVOICE_NUMBER.to_string(),
            invoice_date: None,
            due_date: None,
            items: vec![ItemForm::default()],
            tax_rate: Decimal::TEN,
        }
    }
}

pub fn default_company() -> Party {
    Party {
        name: "Your Company LLC".to_string(),
        address: "123 Business St\nCity, State 12345".to_string(),
        phone: "(123) 456-7890".to_string(),
        email: "billing@company.com".to_string(),
    }
}

pub fn default_client() -> Party {
    Party {
        name: "Client Company Inc".to_string(),
        address: "456 Client Ave\nCity, State 67890".to_string(),
        phone: "(987) 654-3210".to_string(),
        email: "accounts@client.com".to_string(),
    }
}

impl InvoiceForm {
    /// Builds the invoice snapshot: fills defaults and clamps numbers.
    ///
    /// Items without a description are named `Service <n>` after their
    /// one-based row.
    pub fn into_invoice(self, today: NaiveDate) -> Invoice {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| LineItem {
                description: item
                    .description
                    .unwrap_or_else(|| format!("Service {}", index + 1)),
                quantity: clamp_quantity(item.quantity),
                rate: clamp_rate(Money::from_decimal(item.rate)),
            })
            .collect();

        Invoice {
            company: self.company.into_party(default_company()),
            client: self.client.into_party(default_client()),
            meta: InvoiceMeta {
                invoice_number: self.invoice_number,
                invoice_date: self.invoice_date.unwrap_or(today),
                due_date: self.due_date.unwrap_or(today),
            },
            items,
            tax_rate: clamp_tax_rate(TaxRate::from_percent(self.tax_rate)),
        }
    }
}
