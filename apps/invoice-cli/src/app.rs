//! Generation steps the binary runs in order: read the form, prepare the
//! invoice, print the summary, render and write the file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use invoice_core::validation::validate_invoice;
use invoice_core::{Invoice, Totals};
use invoice_pdf::format::format_money;
use invoice_pdf::render_invoice;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::form::InvoiceForm;

pub const SUCCESS_MESSAGE: &str = "Invoice generated successfully!";

/// Reads the form from a JSON file, or starts from the blank form.
pub fn load_form(path: Option<&Path>) -> CliResult<InvoiceForm> {
    let Some(path) = path else {
        debug!("No input file, using form defaults");
        return Ok(InvoiceForm::default());
    };

    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let form = serde_json::from_str(&raw).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "Form loaded");
    Ok(form)
}

/// Fills defaults, clamps and validates.
pub fn prepare_invoice(form: InvoiceForm, today: NaiveDate) -> CliResult<Invoice> {
    let invoice = form.into_invoice(today);
    validate_invoice(&invoice)?;
    Ok(invoice)
}

/// The totals lines shown before generating.
pub fn totals_summary(totals: &Totals, currency_code: &str) -> String {
    format!(
        "Subtotal: {}\nTax ({}%): {}\nTotal: {}",
        format_money(totals.subtotal, currency_code),
        totals.tax_rate,
        format_money(totals.tax_amount, currency_code),
        format_money(totals.total, currency_code),
    )
}

/// Renders the invoice and writes it into the configured directory.
///
/// Returns the path of the written file.
pub fn write_invoice(invoice: &Invoice, config: &CliConfig) -> CliResult<PathBuf> {
    let document = render_invoice(invoice, &config.render_options())?;

    fs::create_dir_all(&config.output_dir).map_err(|source| CliError::WriteOutput {
        path: config.output_dir.clone(),
        source,
    })?;

    let path = config.output_dir.join(file_system_name(&document.file_name));
    fs::write(&path, &document.bytes).map_err(|source| CliError::WriteOutput {
        path: path.clone(),
        source,
    })?;

    info!(
        path = %path.display(),
        bytes = document.bytes.len(),
        media_type = document.media_type(),
        "Invoice written"
    );
    Ok(path)
}

/// Keeps the suggested name inside the output directory.
fn file_system_name(suggested: &str) -> String {
    suggested.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_core::{LineItem, Money, TaxRate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 3).unwrap()
    }

    fn config_in(dir: &Path) -> CliConfig {
        CliConfig {
            output_dir: dir.to_path_buf(),
            ..CliConfig::default()
        }
    }

    #[test]
    fn test_load_form_without_path() {
        assert_eq!(load_form(None).unwrap(), InvoiceForm::default());
    }

    #[test]
    fn test_load_form_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_form(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::ParseInput { .. }));
    }

    #[test]
    fn test_load_form_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_form(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, CliError::ReadInput { .. }));
    }

    #[test]
    fn test_blank_invoice_number_is_rejected() {
        let form = InvoiceForm {
            invoice_number: "  ".to_string(),
            ..InvoiceForm::default()
        };
        let err = prepare_invoice(form, today()).unwrap_err();
        assert!(matches!(err, CliError::Invalid(_)));
    }

    #[test]
    fn test_totals_summary() {
        let items = vec![LineItem::new("Consulting", 2, Money::from_cents(15000))];
        let totals = invoice_core::compute_totals(&items, TaxRate::from_bps(1000));

        assert_eq!(
            totals_summary(&totals, "INR"),
            "Subtotal: INR 300.00\nTax (10.0%): INR 30.00\nTotal: INR 330.00"
        );
    }

    #[test]
    fn test_huge_rate_is_clamped_before_totals() {
        let json = r#"{"items": [{"quantity": 1000, "rate": "100000000000000000000000000"}], "tax_rate": 0}"#;
        let form: InvoiceForm = serde_json::from_str(json).unwrap();
        let invoice = prepare_invoice(form, today()).unwrap();

        let totals = invoice.try_totals().unwrap();
        assert_eq!(
            totals_summary(&totals, "INR"),
            "Subtotal: INR 1,000,000,000,000.00\nTax (0.0%): INR 0.00\nTotal: INR 1,000,000,000,000.00"
        );
    }

    #[test]
    fn test_writes_default_invoice() {
        let dir = tempfile::tempdir().unwrap();
        let invoice = prepare_invoice(InvoiceForm::default(), today()).unwrap();

        let path = write_invoice(&invoice, &config_in(dir.path())).unwrap();
        assert_eq!(path, dir.path().join("Invoice_INV-0001.pdf"));

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("2025");
        let invoice = prepare_invoice(InvoiceForm::default(), today()).unwrap();

        let path = write_invoice(&invoice, &config_in(&nested)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_separator_in_number_stays_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let form = InvoiceForm {
            invoice_number: "2025/04".to_string(),
            ..InvoiceForm::default()
        };
        let invoice = prepare_invoice(form, today()).unwrap();

        let path = write_invoice(&invoice, &config_in(dir.path())).unwrap();
        assert_eq!(path, dir.path().join("Invoice_2025_04.pdf"));
    }

    #[test]
    fn test_encoding_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut invoice = prepare_invoice(InvoiceForm::default(), today()).unwrap();
        invoice.client.name = "株式会社".to_string();

        let err = write_invoice(&invoice, &config_in(dir.path())).unwrap_err();
        assert!(matches!(err, CliError::Render(_)));
        assert!(err.user_message().starts_with("Error generating PDF: "));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
