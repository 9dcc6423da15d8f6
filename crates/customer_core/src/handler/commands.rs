//! Customer command values and their handler.
//!
//! # Invariants
//! - Add generates a fresh id; the caller never chooses identity.
//! - Update and delete fail with `Failure::NotFound` for unknown ids.
//! - Add and update return the read-back model, not the input echo.

use crate::cancel::CancellationToken;
use crate::handler::{run_handler, CommandHandler};
use crate::model::customer::{Customer, CustomerFields, CustomerId};
use crate::model::presentation::CustomerModel;
use crate::repo::customer_repo::CustomerRepository;
use crate::result::{Failure, HandlerResult};

/// Inserts a new customer built from `customer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCustomerCommand {
    pub customer: CustomerFields,
}

/// Overwrites the mutable fields of customer `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCustomerCommand {
    pub id: CustomerId,
    pub customer: CustomerFields,
}

/// Removes customer `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCustomerCommand {
    pub id: CustomerId,
}

/// Write-side handler for every customer command.
pub struct CustomerCommandHandler<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerCommandHandler<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    fn read_back(&self, id: CustomerId, details: &'static str) -> Result<CustomerModel, Failure> {
        self.repo
            .get_customer(id)?
            .map(CustomerModel::from)
            .ok_or(Failure::Inconsistent(details))
    }
}

impl<R: CustomerRepository> CommandHandler<AddCustomerCommand> for CustomerCommandHandler<R> {
    type Output = CustomerModel;

    fn handle(
        &self,
        command: AddCustomerCommand,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        run_handler("add_customer", cancel, || {
            let customer = Customer::new(command.customer);
            let id = self.repo.create_customer(&customer)?;
            self.read_back(id, "created customer not found in read-back")
        })
    }
}

impl<R: CustomerRepository> CommandHandler<UpdateCustomerCommand> for CustomerCommandHandler<R> {
    type Output = CustomerModel;

    fn handle(
        &self,
        command: UpdateCustomerCommand,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        run_handler("update_customer", cancel, || {
            let mut customer = self
                .repo
                .get_customer(command.id)?
                .ok_or(Failure::NotFound(command.id))?;
            customer.apply(command.customer);
            self.repo.update_customer(&customer)?;
            self.read_back(command.id, "updated customer not found in read-back")
        })
    }
}

impl<R: CustomerRepository> CommandHandler<DeleteCustomerCommand> for CustomerCommandHandler<R> {
    type Output = ();

    fn handle(
        &self,
        command: DeleteCustomerCommand,
        cancel: &CancellationToken,
    ) -> HandlerResult<Self::Output> {
        run_handler("delete_customer", cancel, || {
            Ok(self.repo.delete_customer(command.id)?)
        })
    }
}
