use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoicer_core::InvoiceId;

/// Sender or client details, printed as stacked lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDetails {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl PartyDetails {
    pub fn lines(&self) -> [&str; 3] {
        [&self.name, &self.email, &self.address]
    }
}

/// The single billed line of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

/// Read-only invoice record as returned by the data-access layer.
///
/// Exactly one line item is modelled; there are no tax or discount fields.
/// `due_date` is a net-days payment term, not a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub invoice_name: String,
    pub invoice_number: i64,
    /// ISO-4217 code understood by `invoicer_core::money`.
    pub currency: String,
    pub from: PartyDetails,
    pub client: PartyDetails,
    pub date: NaiveDate,
    pub due_date: i32,
    pub item: LineItem,
    pub total: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

impl InvoiceRecord {
    /// The note, if present and not blank.
    pub fn note(&self) -> Option<&str> {
        self.note
            .as_deref()
            .filter(|note| !note.trim().is_empty())
    }

    /// Rows of the item table with the amount printed in the row's total column.
    ///
    /// The single row shows the invoice total, as stored, rather than a
    /// recomputed `quantity * rate`.
    pub fn billed_items(&self) -> Vec<(&LineItem, Decimal)> {
        vec![(&self.item, self.total)]
    }
}
