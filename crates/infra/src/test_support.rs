use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use invoicer_core::InvoiceId;
use invoicer_invoicing::{InvoiceRecord, LineItem, PartyDetails};

pub fn sample_invoice(id: &str) -> InvoiceRecord {
    InvoiceRecord {
        id: InvoiceId::new(id),
        invoice_name: "Invoice #1".to_string(),
        invoice_number: 1,
        currency: "USD".to_string(),
        from: PartyDetails {
            name: "Jane Builder".to_string(),
            email: "jane@builder.dev".to_string(),
            address: "1 Forge Lane, Springfield".to_string(),
        },
        client: PartyDetails {
            name: "Acme Corp".to_string(),
            email: "billing@acme.test".to_string(),
            address: "42 Market Street, Metropolis".to_string(),
        },
        date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        due_date: 30,
        item: LineItem {
            description: "Design work".to_string(),
            quantity: dec!(10),
            rate: dec!(50.00),
        },
        total: dec!(500.00),
        note: None,
    }
}

pub fn workspace_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

pub fn logo_path() -> PathBuf {
    workspace_path("public/logotext.png")
}

pub fn seed_fixture_path() -> PathBuf {
    workspace_path("fixtures/invoices.json")
}
