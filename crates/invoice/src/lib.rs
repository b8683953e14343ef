//! Invoice - billing document model and totals computation
//!
//! This crate provides:
//! - The invoice data model (parties, line items, tax, currency)
//! - A fixed currency table with display symbols
//! - `InvoiceStore`, the single mutation surface that keeps derived
//!   amounts, subtotal and total consistent after every edit
//! - Number and date formatting used when printing invoices
//!
//! # Example
//!
//! ```
//! use invoice::{InvoiceStore, NewItem};
//!
//! let mut store = InvoiceStore::default();
//! store.add_item(NewItem::new("Design", 2.0, 50.0)).unwrap();
//! store.set_tax(10.0).unwrap();
//!
//! assert_eq!(store.invoice().subtotal(), 100.0);
//! assert_eq!(store.invoice().total(), 110.0);
//! ```

mod currency;
mod format;
mod model;
mod store;

pub use currency::Currency;
pub use format::{
    format_grouped, format_long_date, format_money, format_quantity, parse_iso_date,
};
pub use model::{Client, ClientId, Invoice, ItemId, LineItem, Party};
pub use store::{ClientUpdate, InvoiceSnapshot, InvoiceStore, ItemPatch, NewItem};

use thiserror::Error;

/// Errors that can occur while editing an invoice
#[derive(Debug, Error, PartialEq)]
pub enum InvoiceError {
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Invalid line item: {0}")]
    InvalidItem(String),

    #[error("Invalid tax amount: {0}")]
    InvalidTax(f64),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for invoice operations
pub type Result<T> = std::result::Result<T, InvoiceError>;
