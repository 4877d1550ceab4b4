//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories for development and tests
//! - **security**: token signing and password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod memory;
pub mod persistence;
mod repositories;
pub mod security;

pub use repositories::ClinicRepositories;
