//! Invoice data model
//!
//! Derived fields (`amount`, `subtotal`, `total`) are only readable here;
//! [`crate::InvoiceStore`] is the only code that writes them.

use crate::currency::Currency;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque line item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Opaque identifier of the billed-to client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A named party with a postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// Free text, may span several lines
    pub address: String,
}

impl Party {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// The client an invoice is billed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    /// Contact name
    pub name: String,
    /// Business name and address
    pub business: Party,
}

/// One billable row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) quantity: f64,
    pub(crate) rate: f64,
    pub(crate) amount: f64,
}

impl LineItem {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secondary text, `None` when not provided
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Always `quantity * rate`
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Recompute `amount` from the current quantity and rate
    pub(crate) fn recompute_amount(&mut self) {
        self.amount = self.quantity * self.rate;
    }
}

/// Invoice root aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub(crate) number: String,
    pub(crate) date: NaiveDate,
    pub(crate) due_date: Option<NaiveDate>,
    pub(crate) currency: Currency,
    pub(crate) billed_by: Party,
    pub(crate) billed_to: Option<Client>,
    pub(crate) items: Vec<LineItem>,
    pub(crate) tax: Option<f64>,
    pub(crate) subtotal: f64,
    pub(crate) total: f64,
}

impl Invoice {
    /// Create an empty invoice dated `date`
    pub fn new(number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            date,
            due_date: None,
            currency: Currency::default(),
            billed_by: Party::default(),
            billed_to: None,
            items: Vec::new(),
            tax: None,
            subtotal: 0.0,
            total: 0.0,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn billed_by(&self) -> &Party {
        &self.billed_by
    }

    pub fn billed_to(&self) -> Option<&Client> {
        self.billed_to.as_ref()
    }

    /// Line items in display order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Find an item by identifier
    pub fn item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Flat tax amount, `None` when never set
    pub fn tax(&self) -> Option<f64> {
        self.tax
    }

    /// Sum of all line amounts
    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    /// Subtotal plus tax
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Recompute `subtotal` and `total` from the items and tax
    pub(crate) fn recompute_totals(&mut self) {
        self.subtotal = self.items.iter().map(|item| item.amount).sum();
        self.total = self.subtotal + self.tax.unwrap_or(0.0);
    }
}
