//! Common library for the coupon catalog
//!
//! This crate provides shared functionality used by the API service,
//! namely document store connectivity and the associated error types.

pub mod database;
pub mod error;

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, health_check, init_database};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let database = init_database(&config).await?;
///     let is_healthy = health_check(&database).await?;
///     println!("Database health check: {}", is_healthy);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
