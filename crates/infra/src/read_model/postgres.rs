//! Postgres-backed invoice store.
//!
//! Invoices live in a single `invoices` table keyed by a TEXT id. Ids are
//! opaque strings owned by whoever created the row, so a malformed id is just
//! a key that matches no row.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database / PoolClosed / Io / other | `Database` |
//! | Column decode failure on a fetched row | `CorruptRow` |

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use invoicer_core::InvoiceId;
use invoicer_invoicing::{InvoiceRecord, LineItem, PartyDetails};

use super::store::{InvoiceStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS invoices (
    id                       TEXT PRIMARY KEY,
    invoice_name             TEXT NOT NULL,
    invoice_number           BIGINT NOT NULL,
    currency                 TEXT NOT NULL,
    from_name                TEXT NOT NULL,
    from_email               TEXT NOT NULL,
    from_address             TEXT NOT NULL,
    client_name              TEXT NOT NULL,
    client_email             TEXT NOT NULL,
    client_address           TEXT NOT NULL,
    date                     DATE NOT NULL,
    due_date                 INTEGER NOT NULL,
    invoice_item_description TEXT NOT NULL,
    invoice_item_quantity    NUMERIC NOT NULL,
    invoice_item_rate        NUMERIC NOT NULL,
    total                    NUMERIC NOT NULL,
    note                     TEXT,
    created_at               TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at               TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Postgres-backed [`InvoiceStore`].
///
/// `PgPool` is internally reference counted and safe to share; each lookup
/// checks out its own connection.
#[derive(Debug, Clone)]
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with default pool settings.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `invoices` table if it does not exist yet.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn find_invoice_by_id(&self, id: &InvoiceId) -> Result<Option<InvoiceRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT
                id,
                invoice_name,
                invoice_number,
                currency,
                from_name,
                from_email,
                from_address,
                client_name,
                client_email,
                client_address,
                date,
                due_date,
                invoice_item_description,
                invoice_item_quantity,
                invoice_item_rate,
                total,
                note
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_invoice_by_id", e))?;

        row.map(|row| {
            row_to_record(&row).map_err(|e| StoreError::CorruptRow {
                id: id.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
    }

    #[instrument(skip(self, record), fields(invoice_id = %record.id))]
    async fn upsert_invoice(&self, record: InvoiceRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id,
                invoice_name,
                invoice_number,
                currency,
                from_name,
                from_email,
                from_address,
                client_name,
                client_email,
                client_address,
                date,
                due_date,
                invoice_item_description,
                invoice_item_quantity,
                invoice_item_rate,
                total,
                note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (id)
            DO UPDATE SET
                invoice_name = EXCLUDED.invoice_name,
                invoice_number = EXCLUDED.invoice_number,
                currency = EXCLUDED.currency,
                from_name = EXCLUDED.from_name,
                from_email = EXCLUDED.from_email,
                from_address = EXCLUDED.from_address,
                client_name = EXCLUDED.client_name,
                client_email = EXCLUDED.client_email,
                client_address = EXCLUDED.client_address,
                date = EXCLUDED.date,
                due_date = EXCLUDED.due_date,
                invoice_item_description = EXCLUDED.invoice_item_description,
                invoice_item_quantity = EXCLUDED.invoice_item_quantity,
                invoice_item_rate = EXCLUDED.invoice_item_rate,
                total = EXCLUDED.total,
                note = EXCLUDED.note,
                updated_at = NOW()
            "#,
        )
        .bind(record.id.as_str())
        .bind(&record.invoice_name)
        .bind(record.invoice_number)
        .bind(&record.currency)
        .bind(&record.from.name)
        .bind(&record.from.email)
        .bind(&record.from.address)
        .bind(&record.client.name)
        .bind(&record.client.email)
        .bind(&record.client.address)
        .bind(record.date)
        .bind(record.due_date)
        .bind(&record.item.description)
        .bind(record.item.quantity)
        .bind(record.item.rate)
        .bind(record.total)
        .bind(&record.note)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("upsert_invoice", e))?;

        Ok(())
    }
}

fn row_to_record(row: &PgRow) -> Result<InvoiceRecord, sqlx::Error> {
    Ok(InvoiceRecord {
        id: InvoiceId::new(row.try_get::<String, _>("id")?),
        invoice_name: row.try_get("invoice_name")?,
        invoice_number: row.try_get("invoice_number")?,
        currency: row.try_get("currency")?,
        from: PartyDetails {
            name: row.try_get("from_name")?,
            email: row.try_get("from_email")?,
            address: row.try_get("from_address")?,
        },
        client: PartyDetails {
            name: row.try_get("client_name")?,
            email: row.try_get("client_email")?,
            address: row.try_get("client_address")?,
        },
        date: row.try_get("date")?,
        due_date: row.try_get("due_date")?,
        item: LineItem {
            description: row.try_get("invoice_item_description")?,
            quantity: row.try_get("invoice_item_quantity")?,
            rate: row.try_get("invoice_item_rate")?,
        },
        total: row.try_get("total")?,
        note: row.try_get("note")?,
    })
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    let message = match err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => format!("{} (sqlstate {})", db_err.message(), code),
            None => db_err.message().to_string(),
        },
        sqlx::Error::PoolClosed => "connection pool closed".to_string(),
        sqlx::Error::PoolTimedOut => "timed out acquiring a connection".to_string(),
        other => other.to_string(),
    };
    StoreError::Database { operation, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_invoice;

    // Needs a reachable database: DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn round_trips_every_column() {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return;
        };
        let store = PostgresInvoiceStore::connect(&url).await.unwrap();
        store.ensure_schema().await.unwrap();

        let mut record = sample_invoice("pg_round_trip_0001");
        record.note = Some("Paid by card".to_string());
        store.upsert_invoice(record.clone()).await.unwrap();

        let found = store.find_invoice_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(found, record);

        let missing = store
            .find_invoice_by_id(&InvoiceId::new(" pg_round_trip_0001 "))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn pool_errors_keep_the_operation_name() {
        let err = map_sqlx_error("find_invoice_by_id", sqlx::Error::PoolClosed);
        assert_eq!(
            err.to_string(),
            "database error in find_invoice_by_id: connection pool closed"
        );
    }
}
