//! SQLite storage implementation for Fintrack.
//!
//! This crate holds every Diesel dependency of the application. It implements
//! the repository traits defined in `fintrack-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Embedded Diesel migrations
//! - Repository implementations for users, transactions, budgets, goals and
//!   currency preferences
//! - Database-specific row types (with Diesel derives)
//!
//! ```text
//!      core (domain, derived metrics)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budgets;
pub mod currency;
pub mod goals;
pub mod transactions;
pub mod users;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from fintrack-core for convenience
pub use fintrack_core::errors::{DatabaseError, Error, Result};
