//! Build a sample invoice and export it as a PDF
//! Run with: cargo run -p layout --example render_invoice [output-dir]
//!
//! Set `RUST_LOG=debug` to see projection and rendering logs.

use anyhow::Context;
use chrono::NaiveDate;
use invoice::{ClientUpdate, Invoice, InvoiceStore, NewItem, Party};
use layout::{export_pdf, PageSetup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "output".to_string());
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {out_dir}"))?;

    let date = NaiveDate::from_ymd_opt(2025, 1, 22).context("invalid invoice date")?;
    let mut store = InvoiceStore::new(Invoice::new("INV-2025-001", date));
    store.set_company_name("Acme Studio");
    store.set_footer_text("Thank you for your business");
    store.set_currency("USD")?;
    store.set_due_date(NaiveDate::from_ymd_opt(2025, 2, 5));
    store.set_billed_by(Party::new("Acme Studio Ltd", "12 Galle Road\nColombo 03"));
    store.set_billed_to(ClientUpdate {
        name: "Jane Doe".to_string(),
        business: Party::new("Doe Consulting", "5 Main Street\nSpringfield"),
    });

    store.add_item(
        NewItem::new("Brand design", 1.0, 1200.0).with_description("Logo, palette and type"),
    )?;
    store.add_item(NewItem::new("Website build", 40.0, 65.0))?;
    store.add_item(NewItem::new("Hosting (12 months)", 12.0, 15.5))?;
    store.set_tax(386.0)?;

    println!(
        "Subtotal {:.2}, total {:.2}",
        store.invoice().subtotal(),
        store.invoice().total()
    );

    let file = export_pdf(store.snapshot(), PageSetup::a4()).await?;
    let path = file.write_to(&out_dir)?;
    println!("Wrote {} ({} bytes)", path.display(), file.bytes.len());

    Ok(())
}
