use crate::traits::{row_columns, validate_identifier, RecordError, RecordResult, RecordStore};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Record store backed by a direct PostgreSQL connection
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool to `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> RecordResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
            .connect(database_url)
            .await
            .map_err(|e| RecordError::ConfigError(format!("Failed to connect to database: {}", e)))?;

        tracing::info!(max_connections, "Database pool created");
        Ok(Self::new(pool))
    }

    /// Apply the schema migrations shipped with the workspace
    pub async fn run_migrations(&self) -> RecordResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RecordError::BackendError(format!("Migration failed: {}", e)))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

/// `INSERT` that lets Postgres coerce each JSON field to its column type
fn insert_sql(table: &str, columns: &[&str]) -> String {
    let column_list = columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO \"{table}\" ({cols}) SELECT {cols} FROM jsonb_populate_record(NULL::\"{table}\", $1)",
        table = table,
        cols = column_list
    )
}

#[async_trait]
impl RecordStore for PgRecordStore {
    #[tracing::instrument(skip(self, row), fields(db.table = %table, db.operation = "insert"))]
    async fn insert(&self, table: &str, row: serde_json::Value) -> RecordResult<()> {
        validate_identifier(table)?;
        let sql = insert_sql(table, &row_columns(&row)?);

        sqlx::query(&sql)
            .bind(&row)
            .execute(&self.pool)
            .await
            .map_err(|e| RecordError::InsertFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sql() {
        let sql = insert_sql("products", &["name", "user_id"]);
        assert_eq!(
            sql,
            "INSERT INTO \"products\" (\"name\", \"user_id\") SELECT \"name\", \"user_id\" \
             FROM jsonb_populate_record(NULL::\"products\", $1)"
        );
    }
}
