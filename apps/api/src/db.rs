use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Opens the applicant-database pool. Pool size comes from
/// `DB_MAX_CONNECTIONS`; the acquire timeout is short so a saturated pool
/// surfaces as a request error instead of a hung upload.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to the applicant database...");

    let pool = pool_options(max_connections).connect(database_url).await?;

    info!("Applicant database pool ready ({max_connections} connections max)");
    Ok(pool)
}

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_options_respect_configured_size() {
        let options = pool_options(3);
        assert_eq!(options.get_max_connections(), 3);
    }
}
