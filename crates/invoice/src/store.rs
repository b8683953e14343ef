//! Invoice state container
//!
//! [`InvoiceStore`] owns the live invoice and is its only mutation surface.
//! Each operation recomputes every derived value before it returns, so a
//! caller never observes a stale `amount`, `subtotal` or `total`.

use crate::currency::Currency;
use crate::model::{Client, ClientId, Invoice, ItemId, LineItem, Party};
use crate::{InvoiceError, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Input for a new line item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub rate: f64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, quantity: f64, rate: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            quantity,
            rate,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update of a line item; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub rate: Option<f64>,
}

impl ItemPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn quantity(quantity: f64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn rate(rate: f64) -> Self {
        Self {
            rate: Some(rate),
            ..Self::default()
        }
    }

    fn touches_amount(&self) -> bool {
        self.quantity.is_some() || self.rate.is_some()
    }
}

/// New contents of the billed-to client; the id is managed by the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientUpdate {
    pub name: String,
    pub business: Party,
}

/// Immutable copy of everything needed to print an invoice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSnapshot {
    pub invoice: Invoice,
    pub company_name: String,
    pub footer_text: String,
}

impl InvoiceSnapshot {
    /// Suggested output file name: `invoice-<number>.<ext>`
    ///
    /// Path separators and other reserved characters in the number become `-`.
    pub fn file_name(&self, ext: &str) -> String {
        file_name(&self.invoice, ext)
    }
}

/// Live invoice plus the document settings printed around it
#[derive(Debug, Clone)]
pub struct InvoiceStore {
    invoice: Invoice,
    company_name: String,
    footer_text: String,
    /// Every item id handed out during this store's lifetime
    issued_ids: HashSet<ItemId>,
}

impl Default for InvoiceStore {
    /// A fresh invoice dated today
    fn default() -> Self {
        Self::new(Invoice::new("", Local::now().date_naive()))
    }
}

impl InvoiceStore {
    /// Take ownership of `invoice` as the live state
    pub fn new(mut invoice: Invoice) -> Self {
        invoice.recompute_totals();
        let issued_ids = invoice.items.iter().map(|item| item.id).collect();
        Self {
            invoice,
            company_name: String::new(),
            footer_text: String::new(),
            issued_ids,
        }
    }

    /// Current invoice state
    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn footer_text(&self) -> &str {
        &self.footer_text
    }

    /// Owned copy for export; later edits do not reach it
    pub fn snapshot(&self) -> InvoiceSnapshot {
        InvoiceSnapshot {
            invoice: self.invoice.clone(),
            company_name: self.company_name.clone(),
            footer_text: self.footer_text.clone(),
        }
    }

    /// Suggested output file name: `invoice-<number>.<ext>`
    ///
    /// Path separators and other reserved characters in the number become `-`.
    pub fn file_name(&self, ext: &str) -> String {
        file_name(&self.invoice, ext)
    }

    pub fn set_company_name(&mut self, name: impl Into<String>) {
        self.company_name = name.into();
    }

    pub fn set_footer_text(&mut self, text: impl Into<String>) {
        self.footer_text = text.into();
    }

    /// Switch the currency label by code; unknown codes leave the state unchanged
    pub fn set_currency(&mut self, code: &str) -> Result<&Invoice> {
        let currency = code.parse::<Currency>().map_err(|e| {
            warn!(code, "rejected unknown currency");
            e
        })?;
        Ok(self.set_currency_typed(currency))
    }

    pub fn set_currency_typed(&mut self, currency: Currency) -> &Invoice {
        self.invoice.currency = currency;
        &self.invoice
    }

    pub fn set_invoice_number(&mut self, number: impl Into<String>) -> &Invoice {
        self.invoice.number = number.into();
        &self.invoice
    }

    pub fn set_invoice_date(&mut self, date: NaiveDate) -> &Invoice {
        self.invoice.date = date;
        &self.invoice
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) -> &Invoice {
        self.invoice.due_date = due_date;
        &self.invoice
    }

    pub fn set_billed_by(&mut self, party: Party) -> &Invoice {
        self.invoice.billed_by = party;
        &self.invoice
    }

    /// Replace the billed-to client, creating it with a new id on first write
    pub fn set_billed_to(&mut self, update: ClientUpdate) -> &Invoice {
        match self.invoice.billed_to.as_mut() {
            Some(client) => {
                client.name = update.name;
                client.business = update.business;
            }
            None => {
                let id = ClientId::generate();
                debug!(%id, "created billed-to client");
                self.invoice.billed_to = Some(Client {
                    id,
                    name: update.name,
                    business: update.business,
                });
            }
        }
        &self.invoice
    }

    pub fn clear_billed_to(&mut self) -> &Invoice {
        self.invoice.billed_to = None;
        &self.invoice
    }

    /// Append a line item and return its new identifier
    pub fn add_item(&mut self, item: NewItem) -> Result<ItemId> {
        if item.name.trim().is_empty() {
            warn!("rejected line item without a name");
            return Err(InvoiceError::InvalidItem(
                "name must not be empty".to_string(),
            ));
        }
        validate_number("quantity", item.quantity)?;
        validate_number("rate", item.rate)?;

        let id = self.next_item_id();
        let mut line = LineItem {
            id,
            name: item.name,
            description: item.description.filter(|d| !d.is_empty()),
            quantity: item.quantity,
            rate: item.rate,
            amount: 0.0,
        };
        line.recompute_amount();
        self.invoice.items.push(line);
        self.invoice.recompute_totals();

        debug!(
            %id,
            subtotal = self.invoice.subtotal,
            total = self.invoice.total,
            "added line item"
        );
        Ok(id)
    }

    /// Remove a line item; unknown ids are ignored
    pub fn remove_item(&mut self, id: ItemId) -> &Invoice {
        let before = self.invoice.items.len();
        self.invoice.items.retain(|item| item.id != id);

        if self.invoice.items.len() != before {
            self.invoice.recompute_totals();
            debug!(
                %id,
                subtotal = self.invoice.subtotal,
                total = self.invoice.total,
                "removed line item"
            );
        }
        &self.invoice
    }

    /// Merge `patch` into the item `id`; unknown ids are ignored
    ///
    /// When the patch touches quantity or rate, the amount is recomputed
    /// from the merged values of both.
    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> Result<&Invoice> {
        if let Some(quantity) = patch.quantity {
            validate_number("quantity", quantity)?;
        }
        if let Some(rate) = patch.rate {
            validate_number("rate", rate)?;
        }

        let Some(item) = self.invoice.items.iter_mut().find(|item| item.id == id) else {
            return Ok(&self.invoice);
        };

        let touches_amount = patch.touches_amount();
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = Some(description).filter(|d| !d.is_empty());
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(rate) = patch.rate {
            item.rate = rate;
        }

        if touches_amount {
            item.recompute_amount();
            self.invoice.recompute_totals();
            debug!(
                %id,
                subtotal = self.invoice.subtotal,
                total = self.invoice.total,
                "updated line item"
            );
        }
        Ok(&self.invoice)
    }

    /// Replace the flat tax amount; negative or non-finite input is rejected
    pub fn set_tax(&mut self, amount: f64) -> Result<&Invoice> {
        if !amount.is_finite() || amount < 0.0 {
            warn!(amount, "rejected tax amount");
            return Err(InvoiceError::InvalidTax(amount));
        }

        self.invoice.tax = Some(amount);
        self.invoice.recompute_totals();
        debug!(tax = amount, total = self.invoice.total, "set tax");
        Ok(&self.invoice)
    }

    /// Remove the tax entirely
    pub fn clear_tax(&mut self) -> &Invoice {
        self.invoice.tax = None;
        self.invoice.recompute_totals();
        &self.invoice
    }

    /// A fresh id never issued before by this store
    fn next_item_id(&mut self) -> ItemId {
        loop {
            let id = ItemId::generate();
            if self.issued_ids.insert(id) {
                return id;
            }
        }
    }
}

/// Quantities and rates must be finite and non-negative
fn validate_number(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        warn!(field, value, "rejected line item number");
        Err(InvoiceError::InvalidItem(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

/// Characters that cannot appear in a file name on common platforms
const RESERVED_FILE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

fn file_name(invoice: &Invoice, ext: &str) -> String {
    let number: String = invoice
        .number
        .chars()
        .map(|c| {
            if RESERVED_FILE_CHARS.contains(&c) || c.is_control() {
                '-'
            } else {
                c
            }
        })
        .collect();
    format!("invoice-{}.{}", number, ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> InvoiceStore {
        InvoiceStore::new(Invoice::new(
            "INV-001",
            NaiveDate::from_ymd_opt(2025, 1, 22).unwrap(),
        ))
    }

    #[test]
    fn test_add_item_computes_amount() {
        let mut store = store();
        let id = store.add_item(NewItem::new("Design", 2.0, 50.0)).unwrap();

        let item = store.invoice().item(id).unwrap();
        assert_eq!(item.amount(), 100.0);
        assert_eq!(item.quantity(), 2.0);
        assert_eq!(store.invoice().subtotal(), 100.0);
        assert_eq!(store.invoice().total(), 100.0);
    }

    #[test]
    fn test_add_item_rejects_empty_name() {
        let mut store = store();
        let result = store.add_item(NewItem::new("   ", 1.0, 1.0));
        assert!(matches!(result, Err(InvoiceError::InvalidItem(_))));
        assert!(store.invoice().items().is_empty());
    }

    #[test]
    fn test_add_item_rejects_bad_numbers() {
        let mut store = store();
        assert!(store.add_item(NewItem::new("A", -1.0, 1.0)).is_err());
        assert!(store.add_item(NewItem::new("A", 1.0, f64::NAN)).is_err());
        assert!(store.add_item(NewItem::new("A", f64::INFINITY, 1.0)).is_err());
        assert!(store.invoice().items().is_empty());
        assert_eq!(store.invoice().total(), 0.0);
    }

    #[test]
    fn test_add_item_accepts_zero_quantity() {
        let mut store = store();
        let id = store.add_item(NewItem::new("Free", 0.0, 10.0)).unwrap();
        assert_eq!(store.invoice().item(id).unwrap().amount(), 0.0);
    }

    #[test]
    fn test_empty_description_is_absent() {
        let mut store = store();
        let id = store
            .add_item(NewItem::new("A", 1.0, 1.0).with_description(""))
            .unwrap();
        assert_eq!(store.invoice().item(id).unwrap().description(), None);

        store
            .update_item(id, ItemPatch::description("Monthly"))
            .unwrap();
        assert_eq!(
            store.invoice().item(id).unwrap().description(),
            Some("Monthly")
        );
    }

    #[test]
    fn test_update_quantity_uses_existing_rate() {
        let mut store = store();
        let id = store.add_item(NewItem::new("Hours", 1.0, 20.0)).unwrap();

        store.update_item(id, ItemPatch::quantity(3.0)).unwrap();

        assert_eq!(store.invoice().item(id).unwrap().amount(), 60.0);
        assert_eq!(store.invoice().total(), 60.0);
    }

    #[test]
    fn test_update_rate_uses_existing_quantity() {
        let mut store = store();
        let id = store.add_item(NewItem::new("Hours", 4.0, 20.0)).unwrap();

        store.update_item(id, ItemPatch::rate(5.0)).unwrap();

        assert_eq!(store.invoice().item(id).unwrap().amount(), 20.0);
        assert_eq!(store.invoice().subtotal(), 20.0);
    }

    #[test]
    fn test_update_rejects_negative_without_change() {
        let mut store = store();
        let id = store.add_item(NewItem::new("Hours", 4.0, 20.0)).unwrap();
        let before = store.invoice().clone();

        let result = store.update_item(
            id,
            ItemPatch {
                name: Some("Renamed".to_string()),
                quantity: Some(-2.0),
                ..ItemPatch::default()
            },
        );

        assert!(result.is_err());
        assert_eq!(store.invoice(), &before);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = store();
        store.add_item(NewItem::new("A", 1.0, 1.0)).unwrap();
        let before = store.invoice().clone();

        store
            .update_item(ItemId::generate(), ItemPatch::quantity(9.0))
            .unwrap();
        assert_eq!(store.invoice(), &before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = store();
        store.add_item(NewItem::new("A", 1.0, 1.0)).unwrap();
        let before = store.invoice().clone();

        store.remove_item(ItemId::generate());
        assert_eq!(store.invoice(), &before);
    }

    #[test]
    fn test_set_tax() {
        let mut store = store();
        store.add_item(NewItem::new("A", 1.0, 100.0)).unwrap();

        store.set_tax(15.0).unwrap();
        assert_eq!(store.invoice().total(), 115.0);

        assert_eq!(store.set_tax(-1.0), Err(InvoiceError::InvalidTax(-1.0)));
        assert_eq!(store.invoice().tax(), Some(15.0));
        assert!(store.set_tax(f64::NAN).is_err());

        store.clear_tax();
        assert_eq!(store.invoice().tax(), None);
        assert_eq!(store.invoice().total(), 100.0);
    }

    #[test]
    fn test_set_currency() {
        let mut store = store();
        store.add_item(NewItem::new("A", 2.0, 10.0)).unwrap();

        store.set_currency("USD").unwrap();
        assert_eq!(store.invoice().currency(), Currency::Usd);
        assert_eq!(store.invoice().total(), 20.0);

        let err = store.set_currency("XXX").unwrap_err();
        assert_eq!(err, InvoiceError::UnknownCurrency("XXX".to_string()));
        assert_eq!(store.invoice().currency(), Currency::Usd);
    }

    #[test]
    fn test_billed_to_keeps_id() {
        let mut store = store();
        assert!(store.invoice().billed_to().is_none());

        store.set_billed_to(ClientUpdate {
            name: "Jane".to_string(),
            business: Party::default(),
        });
        let first_id = store.invoice().billed_to().unwrap().id;

        store.set_billed_to(ClientUpdate {
            name: "Jane".to_string(),
            business: Party::new("Acme", "1 Main St"),
        });
        let client = store.invoice().billed_to().unwrap();
        assert_eq!(client.id, first_id);
        assert_eq!(client.business.address, "1 Main St");

        store.clear_billed_to();
        assert!(store.invoice().billed_to().is_none());
    }

    #[test]
    fn test_plain_setters() {
        let mut store = store();
        let due = NaiveDate::from_ymd_opt(2025, 2, 22).unwrap();

        store.set_invoice_number("INV-042");
        store.set_invoice_date(NaiveDate::from_ymd_opt(2025, 1, 23).unwrap());
        store.set_due_date(Some(due));
        store.set_billed_by(Party::new("Studio", "Colombo"));

        let invoice = store.invoice();
        assert_eq!(invoice.number(), "INV-042");
        assert_eq!(invoice.date().to_string(), "2025-01-23");
        assert_eq!(invoice.due_date(), Some(due));
        assert_eq!(invoice.billed_by().name, "Studio");

        store.set_due_date(None);
        assert!(store.invoice().due_date().is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = store();
        store.set_company_name("Acme");
        store.set_footer_text("Thank you");
        store.add_item(NewItem::new("A", 1.0, 10.0)).unwrap();

        let snapshot = store.snapshot();
        store.add_item(NewItem::new("B", 1.0, 5.0)).unwrap();
        store.set_company_name("Other");

        assert_eq!(snapshot.invoice.items().len(), 1);
        assert_eq!(snapshot.invoice.total(), 10.0);
        assert_eq!(snapshot.company_name, "Acme");
        assert_eq!(snapshot.footer_text, "Thank you");
    }

    #[test]
    fn test_file_name() {
        let store = store();
        assert_eq!(store.file_name("pdf"), "invoice-INV-001.pdf");
        assert_eq!(store.snapshot().file_name("pdf"), "invoice-INV-001.pdf");
    }

    #[test]
    fn test_file_name_replaces_path_separators() {
        let mut store = store();
        store.set_invoice_number("2025/01");
        assert_eq!(store.file_name("pdf"), "invoice-2025-01.pdf");

        store.set_invoice_number("a/../b\\c:d");
        assert_eq!(store.file_name("pdf"), "invoice-a-..-b-c-d.pdf");
    }

    #[test]
    fn test_new_recomputes_totals() {
        let mut invoice = Invoice::new("1", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        invoice.tax = Some(5.0);
        let store = InvoiceStore::new(invoice);
        assert_eq!(store.invoice().total(), 5.0);
    }
}
