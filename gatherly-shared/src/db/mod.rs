/// Database layer for Gatherly
///
/// This module provides PostgreSQL connection pooling. Schema migrations live
/// in the workspace-level `migrations/` directory and are applied at API
/// startup via `sqlx::migrate!`.
///
/// # Example
///
/// ```no_run
/// use gatherly_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
