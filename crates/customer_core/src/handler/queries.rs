//! Customer query values and their handler.
//!
//! # Invariants
//! - Listing always succeeds on a healthy store (empty vec when empty).
//! - Get-by-id on a missing id fails with `Failure::NotFound`.
//! - Existence checks use exact string equality; the `ForUpdate` variants
//!   exclude the customer being edited.

use crate::cancel::CancellationToken;
use crate::handler::{run_handler, QueryHandler};
use crate::model::customer::CustomerId;
use crate::model::presentation::CustomerModel;
use crate::repo::customer_repo::CustomerRepository;
use crate::result::{Failure, HandlerResult};
use crate::uniqueness::CustomerFilter;
use chrono::NaiveDate;

/// Lists every stored customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetCustomersQuery;

/// Loads one customer by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCustomerByIdQuery {
    pub id: CustomerId,
}

/// Checks whether any customer already uses `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsExistCustomerEmailQuery {
    pub email: String,
}

/// Checks whether a customer other than `id` already uses `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsExistCustomerEmailForUpdateQuery {
    pub id: CustomerId,
    pub email: String,
}

/// Checks whether any customer already holds the name/birth date triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsExistCustomerNameQuery {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
}

/// Checks whether a customer other than `id` holds the name/birth date triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsExistCustomerNameForUpdateQuery {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
}

/// Read-side handler for every customer query.
pub struct CustomerQueryHandler<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerQueryHandler<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    fn exists(
        &self,
        operation: &'static str,
        filter: CustomerFilter,
        cancel: &CancellationToken,
    ) -> HandlerResult<bool> {
        run_handler(operation, cancel, || Ok(self.repo.any_customer(&filter)?))
    }
}

impl<R: CustomerRepository> QueryHandler<GetCustomersQuery> for CustomerQueryHandler<R> {
    type Output = Vec<CustomerModel>;

    fn handle(
        &self,
        _query: GetCustomersQuery,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        run_handler("get_customers", cancel, || {
            let customers = self.repo.list_customers()?;
            Ok(customers.into_iter().map(CustomerModel::from).collect())
        })
    }
}

impl<R: CustomerRepository> QueryHandler<GetCustomerByIdQuery> for CustomerQueryHandler<R> {
    type Output = CustomerModel;

    fn handle(
        &self,
        query: GetCustomerByIdQuery,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        run_handler("get_customer_by_id", cancel, || {
            self.repo
                .get_customer(query.id)?
                .map(CustomerModel::from)
                .ok_or(Failure::NotFound(query.id))
        })
    }
}

impl<R: CustomerRepository> QueryHandler<IsExistCustomerEmailQuery> for CustomerQueryHandler<R> {
    type Output = bool;

    fn handle(
        &self,
        query: IsExistCustomerEmailQuery,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        self.exists(
            "is_exist_customer_email",
            CustomerFilter::email(query.email),
            cancel,
        )
    }
}

impl<R: CustomerRepository> QueryHandler<IsExistCustomerEmailForUpdateQuery>
    for CustomerQueryHandler<R>
{
    type Output = bool;

    fn handle(
        &self,
        query: IsExistCustomerEmailForUpdateQuery,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        self.exists(
            "is_exist_customer_email_for_update",
            CustomerFilter::email(query.email).excluding(query.id),
            cancel,
        )
    }
}

impl<R: CustomerRepository> QueryHandler<IsExistCustomerNameQuery> for CustomerQueryHandler<R> {
    type Output = bool;

    fn handle(
        &self,
        query: IsExistCustomerNameQuery,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        self.exists(
            "is_exist_customer_name",
            CustomerFilter::name(query.first_name, query.last_name, query.date_of_birth),
            cancel,
        )
    }
}

impl<R: CustomerRepository> QueryHandler<IsExistCustomerNameForUpdateQuery>
    for CustomerQueryHandler<R>
{
    type Output = bool;

    fn handle(
        &self,
        query: IsExistCustomerNameForUpdateQuery,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        self.exists(
            "is_exist_customer_name_for_update",
            CustomerFilter::name(query.first_name, query.last_name, query.date_of_birth)
                .excluding(query.id),
            cancel,
        )
    }
}
