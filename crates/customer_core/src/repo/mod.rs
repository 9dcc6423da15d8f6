//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contract consumed by query/command handlers.
//! - Isolate SQLite query details from handler orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Customer::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod customer_repo;
pub mod memory;
