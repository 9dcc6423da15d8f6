//! Core customer management logic.
//! Query/command handlers over a repository abstraction, plus the SQLite and
//! in-memory stores that implement it.

pub mod cancel;
pub mod db;
pub mod handler;
pub mod logging;
pub mod model;
pub mod repo;
pub mod result;
pub mod uniqueness;

pub use cancel::CancellationToken;
pub use handler::commands::{
    AddCustomerCommand, CustomerCommandHandler, DeleteCustomerCommand, UpdateCustomerCommand,
};
pub use handler::queries::{
    CustomerQueryHandler, GetCustomerByIdQuery, GetCustomersQuery,
    IsExistCustomerEmailForUpdateQuery, IsExistCustomerEmailQuery,
    IsExistCustomerNameForUpdateQuery, IsExistCustomerNameQuery,
};
pub use handler::{CommandHandler, QueryHandler};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::{Customer, CustomerFields, CustomerId, CustomerValidationError};
pub use model::presentation::CustomerModel;
pub use repo::customer_repo::{CustomerRepository, RepoError, RepoResult, SqliteCustomerRepository};
pub use repo::memory::InMemoryCustomerRepository;
pub use result::{Failure, HandlerResult, ResultStatus};
pub use uniqueness::CustomerFilter;

/// Minimal health-check API for smoke integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
