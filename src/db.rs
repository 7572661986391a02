//! Database module
//!
//! Connection checks for the Postgres store.
//! The schema itself lives in raw SQL files under migrations/.

use sqlx::PgPool;

use crate::store::Collection;

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Check if the five collection tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    for collection in Collection::ALL {
        let table = collection.table_name();
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    tracing::info!("Schema verified: members, transactions, goals, workshops, products");
    Ok(true)
}
