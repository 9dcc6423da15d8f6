//! Customer domain model.
//!
//! # Responsibility
//! - Define the canonical customer record persisted by repositories.
//! - Separate the mutable field set (`CustomerFields`) from identity and
//!   storage timestamps.
//!
//! # Invariants
//! - `id` is stable, non-nil, and never reused for another customer.
//! - `email` and `(first_name, last_name, date_of_birth)` are unique across
//!   stored customers. Callers enforce this through the existence queries
//!   before issuing add/update commands.
//! - Deletion is a hard delete; there is no tombstone state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a stored customer.
pub type CustomerId = Uuid;

/// Domain validation errors for customer construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerValidationError {
    /// Nil UUID is reserved and cannot identify a customer.
    NilId,
}

impl Display for CustomerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "customer id must not be nil"),
        }
    }
}

impl Error for CustomerValidationError {}

/// Mutable customer attributes carried by add/update commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
}

/// Canonical stored customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed by repositories on update.
    pub updated_at: i64,
}

impl Customer {
    /// Creates a new customer with a generated stable ID.
    pub fn new(fields: CustomerFields) -> Self {
        let now = now_epoch_ms();
        Self::from_parts(Uuid::new_v4(), fields, now)
    }

    /// Creates a customer with a caller-provided stable ID.
    ///
    /// Used by import paths and fixtures where identity already exists.
    ///
    /// # Errors
    /// - Returns `CustomerValidationError::NilId` for `Uuid::nil()`.
    pub fn with_id(id: CustomerId, fields: CustomerFields) -> Result<Self, CustomerValidationError> {
        let customer = Self::from_parts(id, fields, now_epoch_ms());
        customer.validate()?;
        Ok(customer)
    }

    /// Validates identity invariants.
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if self.id.is_nil() {
            return Err(CustomerValidationError::NilId);
        }
        Ok(())
    }

    /// Overwrites every mutable field in place. Identity and `created_at`
    /// are untouched.
    pub fn apply(&mut self, fields: CustomerFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.email = fields.email;
        self.date_of_birth = fields.date_of_birth;
        self.phone_number = fields.phone_number;
    }

    /// Returns a copy of the mutable field set.
    pub fn fields(&self) -> CustomerFields {
        CustomerFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number.clone(),
        }
    }

    fn from_parts(id: CustomerId, fields: CustomerFields, now: i64) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            date_of_birth: fields.date_of_birth,
            phone_number: fields.phone_number,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Current wall clock in epoch milliseconds.
///
/// Falls back to `0` if the clock is set before the unix epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
