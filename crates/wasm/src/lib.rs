//! WASM bindings for invoicegen
//!
//! This crate provides JavaScript-friendly API for:
//! - Editing an invoice (items, parties, dates, currency, tax)
//! - Reading derived totals and a serializable snapshot for previews
//! - Rendering the invoice to PDF bytes
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { InvoiceEditor } from 'invoicegen-wasm';
//!
//! await init();
//!
//! const editor = new InvoiceEditor();
//! editor.setCompanyName('Acme Studio');
//! editor.setCurrency('USD');
//! const id = editor.addItem('Design', 'Logo', 2, 50);
//! editor.updateItem(id, { quantity: 3 });
//! editor.setTax(10);
//!
//! console.log(editor.total()); // 160
//! const pdf = editor.renderPdf(); // Uint8Array
//! download(pdf, editor.fileName());
//! ```

use chrono::NaiveDate;
use invoice::{ClientUpdate, Currency, Invoice, InvoiceStore, ItemId, ItemPatch, NewItem, Party};
use layout::{export_pdf_blocking, PageSetup};
use serde::Serialize;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Today's date in the browser's local time zone
#[cfg(target_arch = "wasm32")]
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn parse_item_id(id: &str) -> Result<ItemId, JsValue> {
    id.parse()
        .map_err(|_| js_error(format!("Invalid item id: {id}")))
}

/// Entry of the currency picker
#[derive(Serialize)]
struct CurrencyOption {
    code: &'static str,
    symbol: &'static str,
}

/// Invoice editing session
///
/// Every setter keeps item amounts, subtotal and total consistent; invalid
/// input throws and leaves the invoice unchanged.
#[wasm_bindgen]
pub struct InvoiceEditor {
    store: InvoiceStore,
    setup: PageSetup,
}

#[wasm_bindgen]
impl InvoiceEditor {
    /// Create an empty invoice dated today
    #[wasm_bindgen(constructor)]
    pub fn new() -> InvoiceEditor {
        InvoiceEditor {
            store: InvoiceStore::new(Invoice::new("", today())),
            setup: PageSetup::a4(),
        }
    }

    /// Available currencies
    ///
    /// @returns Array of `{ code, symbol }`
    pub fn currencies() -> Result<JsValue, JsValue> {
        let options: Vec<CurrencyOption> = Currency::ALL
            .iter()
            .map(|currency| CurrencyOption {
                code: currency.code(),
                symbol: currency.symbol(),
            })
            .collect();
        Ok(serde_wasm_bindgen::to_value(&options)?)
    }

    /// Set the currency label (amounts are not converted)
    ///
    /// @param code - Currency code, e.g. "USD"
    #[wasm_bindgen(js_name = setCurrency)]
    pub fn set_currency(&mut self, code: &str) -> Result<(), JsValue> {
        self.store.set_currency(code).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setInvoiceNumber)]
    pub fn set_invoice_number(&mut self, number: &str) {
        self.store.set_invoice_number(number);
    }

    /// @param date - Date as "YYYY-MM-DD"
    #[wasm_bindgen(js_name = setInvoiceDate)]
    pub fn set_invoice_date(&mut self, date: &str) -> Result<(), JsValue> {
        let date = invoice::parse_iso_date(date).map_err(js_error)?;
        self.store.set_invoice_date(date);
        Ok(())
    }

    /// Set or clear the due date
    ///
    /// @param date - Date as "YYYY-MM-DD"; empty or undefined clears it
    #[wasm_bindgen(js_name = setDueDate)]
    pub fn set_due_date(&mut self, date: Option<String>) -> Result<(), JsValue> {
        let due_date = match date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(invoice::parse_iso_date(text).map_err(js_error)?),
        };
        self.store.set_due_date(due_date);
        Ok(())
    }

    #[wasm_bindgen(js_name = setBilledBy)]
    pub fn set_billed_by(&mut self, name: &str, address: &str) {
        self.store.set_billed_by(Party::new(name, address));
    }

    /// Set the client name, creating the client on first use
    #[wasm_bindgen(js_name = setBilledToName)]
    pub fn set_billed_to_name(&mut self, name: &str) {
        let mut update = self.billed_to();
        update.name = name.to_string();
        self.store.set_billed_to(update);
    }

    /// Set the client's business address, creating the client on first use
    #[wasm_bindgen(js_name = setBilledToAddress)]
    pub fn set_billed_to_address(&mut self, address: &str) {
        let mut update = self.billed_to();
        update.business.address = address.to_string();
        self.store.set_billed_to(update);
    }

    #[wasm_bindgen(js_name = clearBilledTo)]
    pub fn clear_billed_to(&mut self) {
        self.store.clear_billed_to();
    }

    /// Append a line item
    ///
    /// @returns The new item's id
    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(
        &mut self,
        name: &str,
        description: Option<String>,
        quantity: f64,
        rate: f64,
    ) -> Result<String, JsValue> {
        let mut item = NewItem::new(name, quantity, rate);
        item.description = description;
        let id = self.store.add_item(item).map_err(js_error)?;
        Ok(id.to_string())
    }

    /// Remove a line item; unknown ids are ignored
    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&mut self, id: &str) -> Result<(), JsValue> {
        self.store.remove_item(parse_item_id(id)?);
        Ok(())
    }

    /// Merge changes into a line item
    ///
    /// @param patch - Object with any of `name`, `description`, `quantity`, `rate`
    #[wasm_bindgen(js_name = updateItem)]
    pub fn update_item(&mut self, id: &str, patch: JsValue) -> Result<(), JsValue> {
        let id = parse_item_id(id)?;
        let patch: ItemPatch = serde_wasm_bindgen::from_value(patch)?;
        self.store.update_item(id, patch).map_err(js_error)?;
        Ok(())
    }

    /// Set a flat tax amount (not a percentage)
    #[wasm_bindgen(js_name = setTax)]
    pub fn set_tax(&mut self, amount: f64) -> Result<(), JsValue> {
        self.store.set_tax(amount).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = clearTax)]
    pub fn clear_tax(&mut self) {
        self.store.clear_tax();
    }

    #[wasm_bindgen(js_name = setCompanyName)]
    pub fn set_company_name(&mut self, name: &str) {
        self.store.set_company_name(name);
    }

    #[wasm_bindgen(js_name = setFooterText)]
    pub fn set_footer_text(&mut self, text: &str) {
        self.store.set_footer_text(text);
    }

    /// Change paper size and margins
    ///
    /// @param json - Page setup JSON, e.g. `{ "width": 612, "height": 792 }`
    #[wasm_bindgen(js_name = setPageSetup)]
    pub fn set_page_setup(&mut self, json: &str) -> Result<(), JsValue> {
        self.setup = PageSetup::from_json(json).map_err(js_error)?;
        Ok(())
    }

    pub fn subtotal(&self) -> f64 {
        self.store.invoice().subtotal()
    }

    pub fn total(&self) -> f64 {
        self.store.invoice().total()
    }

    /// Current state for previews
    ///
    /// @returns `{ invoice, companyName, footerText }`
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.store.snapshot())?)
    }

    /// Render the invoice as a PDF
    ///
    /// @returns PDF bytes (Uint8Array)
    #[wasm_bindgen(js_name = renderPdf)]
    pub fn render_pdf(&self) -> Result<Vec<u8>, JsValue> {
        let file = export_pdf_blocking(&self.store.snapshot(), &self.setup).map_err(js_error)?;
        Ok(file.bytes)
    }

    /// Suggested download name, `invoice-<number>.pdf`
    #[wasm_bindgen(js_name = fileName)]
    pub fn file_name(&self) -> String {
        self.store.file_name("pdf")
    }
}

impl InvoiceEditor {
    /// Current client fields, or empty ones when there is no client yet
    fn billed_to(&self) -> ClientUpdate {
        self.store
            .invoice()
            .billed_to()
            .map(|client| ClientUpdate {
                name: client.name.clone(),
                business: client.business.clone(),
            })
            .unwrap_or_default()
    }
}

impl Default for InvoiceEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_totals_follow_edits() {
        let mut editor = InvoiceEditor::new();
        let design = editor.add_item("Design", None, 2.0, 50.0).unwrap();
        editor.add_item("Hosting", None, 1.0, 25.0).unwrap();
        editor.set_tax(10.0).unwrap();
        assert_eq!(editor.subtotal(), 125.0);
        assert_eq!(editor.total(), 135.0);

        editor.remove_item(&design).unwrap();
        assert_eq!(editor.subtotal(), 25.0);
        assert_eq!(editor.total(), 35.0);
    }

    #[wasm_bindgen_test]
    fn test_billed_to_fields_merge() {
        let mut editor = InvoiceEditor::new();
        editor.set_billed_to_name("Jane Doe");
        editor.set_billed_to_address("5 Main St");

        let client = editor.store.invoice().billed_to().unwrap();
        assert_eq!(client.name, "Jane Doe");
        assert_eq!(client.business.address, "5 Main St");
    }

    #[wasm_bindgen_test]
    fn test_dates() {
        let mut editor = InvoiceEditor::new();
        editor.set_invoice_date("2025-01-22").unwrap();
        editor.set_due_date(Some("2025-02-05".to_string())).unwrap();
        assert_eq!(
            editor.store.invoice().due_date(),
            NaiveDate::from_ymd_opt(2025, 2, 5)
        );

        editor.set_due_date(Some(String::new())).unwrap();
        assert_eq!(editor.store.invoice().due_date(), None);
    }

    #[wasm_bindgen_test]
    fn test_render_pdf_and_file_name() {
        let mut editor = InvoiceEditor::new();
        editor.set_invoice_number("INV-9");
        editor.set_company_name("Acme");
        editor.add_item("Design", Some("Logo".to_string()), 2.0, 50.0).unwrap();

        let bytes = editor.render_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(editor.file_name(), "invoice-INV-9.pdf");
    }
}
