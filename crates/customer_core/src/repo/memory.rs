//! In-memory customer repository.
//!
//! Stands in for the SQLite store in tests and embedding scenarios that do
//! not need persistence. Listing preserves insertion order.

use crate::model::customer::{now_epoch_ms, Customer, CustomerId};
use crate::repo::customer_repo::{CustomerRepository, RepoError, RepoResult};
use crate::uniqueness::CustomerFilter;
use std::cell::RefCell;

/// Vector-backed repository with interior mutability.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: RefCell<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with existing records, bypassing validation.
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        Self {
            customers: RefCell::new(customers.into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.customers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.borrow().is_empty()
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        Ok(self.customers.borrow().clone())
    }

    fn find_customers(&self, filter: &CustomerFilter) -> RepoResult<Vec<Customer>> {
        Ok(self
            .customers
            .borrow()
            .iter()
            .filter(|customer| filter.matches(customer))
            .cloned()
            .collect())
    }

    fn any_customer(&self, filter: &CustomerFilter) -> RepoResult<bool> {
        Ok(self
            .customers
            .borrow()
            .iter()
            .any(|customer| filter.matches(customer)))
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        Ok(self
            .customers
            .borrow()
            .iter()
            .find(|customer| customer.id == id)
            .cloned())
    }

    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        customer.validate()?;

        let mut customers = self.customers.borrow_mut();
        if customers.iter().any(|existing| existing.id == customer.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate customer id `{}`",
                customer.id
            )));
        }
        customers.push(customer.clone());
        Ok(customer.id)
    }

    fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        customer.validate()?;

        let mut customers = self.customers.borrow_mut();
        let stored = customers
            .iter_mut()
            .find(|existing| existing.id == customer.id)
            .ok_or(RepoError::NotFound(customer.id))?;
        stored.apply(customer.fields());
        stored.updated_at = now_epoch_ms();
        Ok(())
    }

    fn delete_customer(&self, id: CustomerId) -> RepoResult<()> {
        let mut customers = self.customers.borrow_mut();
        let index = customers
            .iter()
            .position(|existing| existing.id == id)
            .ok_or(RepoError::NotFound(id))?;
        customers.remove(index);
        Ok(())
    }
}
