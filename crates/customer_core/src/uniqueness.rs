//! Customer lookup predicates backing the uniqueness checks.
//!
//! # Responsibility
//! - Describe find-by-predicate requests independently of storage.
//! - Provide the reference in-memory evaluation (`CustomerFilter::matches`).
//!
//! # Invariants
//! - String comparison is exact: case-sensitive, no trimming.
//! - A record whose id equals `exclude` never matches, so an edit that keeps
//!   its own email or name is not reported as a conflict.

use crate::model::customer::{Customer, CustomerId};
use chrono::NaiveDate;

/// Predicate over stored customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerFilter {
    /// Matches every customer.
    All,
    /// Matches customers holding `email`.
    Email {
        email: String,
        exclude: Option<CustomerId>,
    },
    /// Matches customers holding the `(first, last, date of birth)` triple.
    Name {
        first_name: String,
        last_name: String,
        date_of_birth: NaiveDate,
        exclude: Option<CustomerId>,
    },
}

impl CustomerFilter {
    pub fn email(email: impl Into<String>) -> Self {
        Self::Email {
            email: email.into(),
            exclude: None,
        }
    }

    pub fn name(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self::Name {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            exclude: None,
        }
    }

    /// Returns the same predicate with `id` excluded from matching.
    ///
    /// Has no effect on `CustomerFilter::All`.
    pub fn excluding(self, id: CustomerId) -> Self {
        match self {
            Self::All => Self::All,
            Self::Email { email, .. } => Self::Email {
                email,
                exclude: Some(id),
            },
            Self::Name {
                first_name,
                last_name,
                date_of_birth,
                ..
            } => Self::Name {
                first_name,
                last_name,
                date_of_birth,
                exclude: Some(id),
            },
        }
    }

    /// Id excluded from matching, if any.
    pub fn excluded_id(&self) -> Option<CustomerId> {
        match self {
            Self::All => None,
            Self::Email { exclude, .. } | Self::Name { exclude, .. } => *exclude,
        }
    }

    /// Evaluates the predicate against one customer.
    pub fn matches(&self, customer: &Customer) -> bool {
        if self.excluded_id() == Some(customer.id) {
            return false;
        }

        match self {
            Self::All => true,
            Self::Email { email, .. } => customer.email == *email,
            Self::Name {
                first_name,
                last_name,
                date_of_birth,
                ..
            } => {
                customer.first_name == *first_name
                    && customer.last_name == *last_name
                    && customer.date_of_birth == *date_of_birth
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CustomerFilter;
    use crate::model::customer::{Customer, CustomerFields};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn customer(email: &str) -> Customer {
        Customer::new(CustomerFields {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            phone_number: "+441234567890".to_string(),
        })
    }

    #[test]
    fn email_match_is_exact_and_case_sensitive() {
        let stored = customer("ada@example.com");
        assert!(CustomerFilter::email("ada@example.com").matches(&stored));
        assert!(!CustomerFilter::email("ADA@example.com").matches(&stored));
        assert!(!CustomerFilter::email(" ada@example.com").matches(&stored));
    }

    #[test]
    fn excluded_id_never_matches() {
        let stored = customer("ada@example.com");
        let filter = CustomerFilter::email("ada@example.com").excluding(stored.id);
        assert!(!filter.matches(&stored));

        let other = CustomerFilter::email("ada@example.com").excluding(Uuid::new_v4());
        assert!(other.matches(&stored));
    }

    #[test]
    fn name_match_requires_all_three_fields() {
        let stored = customer("ada@example.com");
        let dob = stored.date_of_birth;
        assert!(CustomerFilter::name("Ada", "Lovelace", dob).matches(&stored));
        assert!(!CustomerFilter::name("Ada", "Byron", dob).matches(&stored));
        assert!(!CustomerFilter::name(
            "Ada",
            "Lovelace",
            NaiveDate::from_ymd_opt(1815, 12, 11).unwrap()
        )
        .matches(&stored));
    }

    #[test]
    fn all_ignores_exclusion() {
        let stored = customer("ada@example.com");
        assert!(CustomerFilter::All.excluding(stored.id).matches(&stored));
    }
}
