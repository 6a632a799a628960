//! Core value types.
//!
//! This module provides type-safe wrappers for money and contact details.

pub mod email;
pub mod price;

pub use email::{Email, EmailError};
pub use price::{PriceParseError, format_euro, parse_catalog_price};
