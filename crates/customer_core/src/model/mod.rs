//! Customer domain model and presentation projection.
//!
//! # Responsibility
//! - Define the canonical `Customer` record used by repositories.
//! - Define the `CustomerModel` shape returned to handler callers.
//!
//! # Invariants
//! - Every customer is identified by a stable, non-nil `CustomerId`.
//! - The presentation mapping is total: every `Customer` maps to a model.

pub mod customer;
pub mod presentation;
