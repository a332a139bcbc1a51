//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Generate a PDF invoice from form values")]
pub struct Args {
    /// JSON file with form values; missing fields take the form defaults
    pub input: Option<PathBuf>,

    /// Directory to write the PDF to (overrides INVOICE_OUTPUT_DIR)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Currency code printed before amounts (overrides INVOICE_CURRENCY)
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Footer closing line (overrides INVOICE_FOOTER)
    #[arg(short, long)]
    pub footer: Option<String>,

    /// Print tax and total lines even when the tax rate is zero
    #[arg(long)]
    pub always_show_tax_lines: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::parse_from(["invoice-cli"]);
        assert!(args.input.is_none());
        assert!(args.output_dir.is_none());
        assert!(!args.always_show_tax_lines);
    }

    #[test]
    fn test_positional_input_and_short_flags() {
        let args = Args::parse_from(["invoice-cli", "form.json", "-o", "out", "-c", "USD", "-f", "Thanks"]);
        assert_eq!(args.input, Some(PathBuf::from("form.json")));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.currency.as_deref(), Some("USD"));
        assert_eq!(args.footer.as_deref(), Some("Thanks"));
    }
}
