//! Fintrack Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the finance tracker: the
//! derived-metrics engine (spending aggregation, budget evaluation, goal
//! allocation, statistics and reminders) and the services that feed it.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod budgets;
pub mod constants;
pub mod currency;
pub mod dashboard;
pub mod errors;
pub mod goals;
pub mod notifications;
pub mod reports;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
