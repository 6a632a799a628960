//! Command implementations.
//!
//! Each command writes to a caller-supplied [`std::io::Write`] so output can
//! be captured in tests.

pub mod catalog;
pub mod quote;

use promo_quote_core::pricing::{QuoteError, SelectionError};
use promo_quote_core::types::PriceParseError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog price could not be read.
    #[error("Invalid catalog price: {0}")]
    InvalidPrice(#[from] PriceParseError),

    /// The price is below zero.
    #[error("Catalog price cannot be negative")]
    NegativePrice,

    /// A `SIZE=N` total does not fit the quantity type.
    #[error("Total quantity is too large")]
    QuantityOverflow,

    /// Method or zone is not legal for the category.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Price or quantity outside the range the engine accepts.
    #[error(transparent)]
    Quote(QuoteError),

    /// Validation found problems; they have already been printed.
    #[error("Catalog has {0} problem(s)")]
    InvalidCatalog(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<QuoteError> for CommandError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::Selection(err) => Self::Selection(err),
            err => Self::Quote(err),
        }
    }
}
