//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults; command-line flags override it afterwards.

use std::env;
use std::path::PathBuf;

use invoice_core::DEFAULT_CURRENCY_CODE;
use invoice_pdf::RenderOptions;

use crate::args::Args;

/// Invoice CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory the PDF is written to
    pub output_dir: PathBuf,

    /// Prefix for every monetary value
    pub currency_code: String,

    /// Footer closing line (renderer default when unset)
    pub footer_text: Option<String>,

    /// Print tax and total lines even at a zero tax rate
    pub always_show_tax_lines: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            output_dir: PathBuf::from("."),
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            footer_text: None,
            always_show_tax_lines: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CliConfig {
            output_dir: lookup("INVOICE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),

            currency_code: lookup("INVOICE_CURRENCY")
                .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string()),

            footer_text: lookup("INVOICE_FOOTER"),

            always_show_tax_lines: lookup("INVOICE_ALWAYS_SHOW_TAX_LINES")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("INVOICE_ALWAYS_SHOW_TAX_LINES".to_string()))?,
        };

        if config.currency_code.trim().is_empty() {
            return Err(ConfigError::InvalidValue("INVOICE_CURRENCY".to_string()));
        }

        Ok(config)
    }

    /// Applies command-line flags on top of the environment values.
    pub fn with_overrides(mut self, args: &Args) -> Result<Self, ConfigError> {
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(code) = &args.currency {
            if code.trim().is_empty() {
                return Err(ConfigError::InvalidValue("--currency".to_string()));
            }
            self.currency_code = code.clone();
        }
        if let Some(footer) = &args.footer {
            self.footer_text = Some(footer.clone());
        }
        if args.always_show_tax_lines {
            self.always_show_tax_lines = true;
        }
        Ok(self)
    }

    /// Renderer options for this configuration.
    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            currency_code: self.currency_code.clone(),
            footer_text: self.footer_text.clone().unwrap_or(defaults.footer_text),
            always_show_tax_lines: self.always_show_tax_lines,
            title: None,
            producer: defaults.producer,
        }
    }
}

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
