//! Presentation projection returned by query and command handlers.

use crate::model::customer::{Customer, CustomerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Externally visible customer shape.
///
/// Storage timestamps are not projected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerModel {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
}

impl From<&Customer> for CustomerModel {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            date_of_birth: customer.date_of_birth,
            phone_number: customer.phone_number.clone(),
        }
    }
}

impl From<Customer> for CustomerModel {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            date_of_birth: customer.date_of_birth,
            phone_number: customer.phone_number,
        }
    }
}
