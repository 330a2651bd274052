//! Database module for handling MongoDB connections
//!
//! This module provides connection pooling, configuration, and health checks
//! for the document store backing the coupon catalog.

use crate::error::{DatabaseError, DatabaseResult};
use mongodb::{
    Client, Database,
    bson::doc,
    options::ClientOptions,
};
use std::{env, time::Duration};
use tracing::{error, info};

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub mongo_url: String,
    /// Name of the database holding the coupon collection
    pub db_name: String,
    /// Maximum number of pooled connections
    pub max_pool_size: u32,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MONGO_URL`: connection string (default: "mongodb://localhost:27017")
    /// - `DB_NAME`: database name (default: "coupondeck")
    /// - `MONGO_MAX_POOL_SIZE`: maximum pooled connections (default: 10)
    /// - `MONGO_CONNECT_TIMEOUT`: connection timeout in seconds (default: 10)
    pub fn from_env() -> DatabaseResult<Self> {
        let mongo_url =
            env::var("MONGO_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let db_name = env::var("DB_NAME").unwrap_or_else(|_| "coupondeck".to_string());
        if db_name.trim().is_empty() {
            return Err(DatabaseError::Configuration(
                "DB_NAME must not be empty".to_string(),
            ));
        }

        let max_pool_size = env::var("MONGO_MAX_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let connect_timeout = env::var("MONGO_CONNECT_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            mongo_url,
            db_name,
            max_pool_size,
            connect_timeout,
        })
    }
}

/// Initialize a MongoDB client and return a handle to the configured database
///
/// The driver connects lazily, so this only fails on a malformed connection
/// string. Use [`health_check`] to verify the server is reachable.
pub async fn init_database(config: &DatabaseConfig) -> DatabaseResult<Database> {
    info!("Initializing document store client");

    let mut options = ClientOptions::parse(&config.mongo_url)
        .await
        .map_err(|e| DatabaseError::Configuration(format!("Invalid MONGO_URL: {}", e)))?;
    options.max_pool_size = Some(config.max_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout));
    options.app_name = Some("coupon-api".to_string());

    let client = Client::with_options(options).map_err(DatabaseError::Connection)?;

    info!("Document store client initialized for database {}", config.db_name);
    Ok(client.database(&config.db_name))
}

/// Check document store connectivity
///
/// # Returns
/// * `DatabaseResult<bool>` - True if the server answered a ping, false otherwise
pub async fn health_check(database: &Database) -> DatabaseResult<bool> {
    match database.run_command(doc! { "ping": 1 }).await {
        Ok(_) => Ok(true),
        Err(e) => {
            error!("Database health check failed: {}", e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_database_config_defaults() {
        unsafe {
            env::remove_var("MONGO_URL");
            env::remove_var("DB_NAME");
            env::remove_var("MONGO_MAX_POOL_SIZE");
            env::remove_var("MONGO_CONNECT_TIMEOUT");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.mongo_url, "mongodb://localhost:27017");
        assert_eq!(config.db_name, "coupondeck");
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.connect_timeout, 10);
    }

    #[test]
    #[serial]
    fn test_database_config_from_env_with_custom_values() {
        unsafe {
            env::set_var("MONGO_URL", "mongodb://db.internal:27017");
            env::set_var("DB_NAME", "coupons_test");
            env::set_var("MONGO_MAX_POOL_SIZE", "25");
            env::set_var("MONGO_CONNECT_TIMEOUT", "3");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.mongo_url, "mongodb://db.internal:27017");
        assert_eq!(config.db_name, "coupons_test");
        assert_eq!(config.max_pool_size, 25);
        assert_eq!(config.connect_timeout, 3);

        unsafe {
            env::remove_var("MONGO_URL");
            env::remove_var("DB_NAME");
            env::remove_var("MONGO_MAX_POOL_SIZE");
            env::remove_var("MONGO_CONNECT_TIMEOUT");
        }
    }

    #[test]
    #[serial]
    fn test_database_config_rejects_blank_db_name() {
        unsafe {
            env::set_var("DB_NAME", "  ");
        }

        let result = DatabaseConfig::from_env();
        assert!(matches!(result, Err(DatabaseError::Configuration(_))));

        unsafe {
            env::remove_var("DB_NAME");
        }
    }

    #[tokio::test]
    async fn test_init_database_rejects_malformed_url() {
        let config = DatabaseConfig {
            mongo_url: "not-a-mongo-url".to_string(),
            db_name: "coupondeck".to_string(),
            max_pool_size: 1,
            connect_timeout: 1,
        };

        let result = init_database(&config).await;
        assert!(matches!(result, Err(DatabaseError::Configuration(_))));
    }
}
