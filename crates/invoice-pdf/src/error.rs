//! # Render Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Canvas::cell / multi_cell                                             │
//! │       │  text contains a non Latin-1 character                          │
//! │       ▼                                                                 │
//! │  RenderError::Encoding (this module) ← character, position, text       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  render_invoice returns Err, no bytes are produced                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Collaborator shows RenderError::user_message()                        │
//! │                                                                         │
//! │  Totals or a row amount leave Decimal's range                          │
//! │       └──► RenderError::AmountOverflow, no bytes are produced           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Document rendering errors.
///
/// Under the input contract the only way to fail is text the output
/// encoding cannot represent. Retrying is pointless: the text must change.
/// Input that skipped validation can also fail with amounts too large to
/// compute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A drawn string contains a character outside Latin-1.
    ///
    /// ## When This Occurs
    /// - Names or addresses typed with non-Latin scripts
    /// - Symbols such as `₹` or `€` in descriptions
    /// - Emoji anywhere
    #[error(
        "character {character:?} (U+{code_point:04X}) at position {position} in {text:?} \
         cannot be encoded as Latin-1"
    )]
    Encoding {
        character: char,
        code_point: u32,
        /// Zero-based character index within `text`.
        position: usize,
        text: String,
    },

    /// An amount, subtotal, tax or total is past `Decimal`'s range.
    ///
    /// ## When This Occurs
    /// - Rates above `invoice_core::MAX_ITEM_RATE` that were never validated
    #[error("amount is too large to compute")]
    AmountOverflow,
}

impl RenderError {
    /// The message a collaborator shows to the user as-is.
    pub fn user_message(&self) -> String {
        format!("Error generating PDF: {self}")
    }
}

/// Convenience type alias for Results with RenderError.
pub type RenderResult<T> = Result<T, RenderError>;
