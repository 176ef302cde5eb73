// MySQL connection pool implementation

use crate::config::DatabaseConfig;
use crate::errors::DatabaseError;
use sqlx::mysql::{MySql, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use tracing::{info, instrument};

/// Exclusively owned connection checked out of a [`DbPool`].
///
/// Dropping the lease hands the connection back to the pool, so it is
/// returned on every exit path of the operation holding it.
pub type PoolLease = PoolConnection<MySql>;

/// Database connection pool wrapper
/// Provides a bounded, shareable pool of MySQL connections
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: MySqlPool,
}

impl DbPool {
    /// Create a new database connection pool
    ///
    /// One connection is opened eagerly so unreachable hosts and rejected
    /// credentials surface here rather than on the first query.
    ///
    /// # Errors
    /// Returns `DatabaseError::ConnectionFailed` if unable to establish connection
    #[instrument(skip(config), fields(address = %config.address(), max_connections = config.max_connections))]
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        info!("Initializing database connection pool");

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(config.idle_timeout())
            .acquire_timeout(config.acquire_timeout())
            .connect_with(config.connect_options())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create database pool");
                DatabaseError::ConnectionFailed(e.to_string())
            })?;

        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Database connection pool initialized successfully"
        );

        Ok(Self { pool })
    }

    /// Wrap an already configured sqlx pool
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Lease a connection, waiting while every connection is in use
    ///
    /// # Errors
    /// Returns `DatabaseError::ConnectionFailed` if the pool is closed or the
    /// acquire timeout elapses
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Result<PoolLease, DatabaseError> {
        self.pool.acquire().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to acquire pooled connection");
            DatabaseError::ConnectionFailed(e.to_string())
        })
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Perform a health check on the database connection
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Database health check failed");
                DatabaseError::HealthCheckFailed(e.to_string())
            })?;

        tracing::debug!("Database health check passed");
        Ok(())
    }

    /// Get the current number of connections in the pool
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    /// Get the number of idle connections in the pool
    pub fn num_idle(&self) -> usize {
        self.pool.num_idle()
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Close the connection pool gracefully
    ///
    /// Waits for outstanding leases to be returned before closing them
    #[instrument(skip(self))]
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
