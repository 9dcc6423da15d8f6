//! Query and command handlers over the customer repository.
//!
//! # Responsibility
//! - Map one query/command value to a `HandlerResult`.
//! - Translate every repository fault into a failed result.
//!
//! # Invariants
//! - A token cancelled before the call starts yields `Failure::Cancelled`
//!   and the repository is never touched.
//! - Query handlers never mutate the repository.
//! - Command handlers trust their input; uniqueness is checked by callers
//!   through the existence queries.

use crate::cancel::CancellationToken;
use crate::result::{Failure, HandlerResult};
use log::{debug, error, warn};
use std::time::Instant;

pub mod commands;
pub mod queries;

/// Handles one read-only query type.
pub trait QueryHandler<Q> {
    type Output;

    fn handle(&self, query: Q, cancel: &CancellationToken) -> HandlerResult<Self::Output>;
}

/// Handles one state-changing command type.
pub trait CommandHandler<C> {
    type Output;

    fn handle(&self, command: C, cancel: &CancellationToken) -> HandlerResult<Self::Output>;
}

/// Shared handler envelope: cancellation gate, outcome logging and
/// conversion into `HandlerResult`.
pub(crate) fn run_handler<T>(
    operation: &'static str,
    cancel: &CancellationToken,
    work: impl FnOnce() -> Result<T, Failure>,
) -> HandlerResult<T> {
    if cancel.is_cancelled() {
        warn!("event=customer_handler module=handler status=cancelled op={operation}");
        return HandlerResult::Failed(Failure::Cancelled);
    }

    let started_at = Instant::now();
    match work() {
        Ok(data) => {
            debug!(
                "event=customer_handler module=handler status=ok op={} duration_ms={}",
                operation,
                started_at.elapsed().as_millis()
            );
            HandlerResult::Succeeded(data)
        }
        Err(failure) => {
            match &failure {
                Failure::NotFound(id) => warn!(
                    "event=customer_handler module=handler status=not_found op={} customer_id={}",
                    operation, id
                ),
                other => error!(
                    "event=customer_handler module=handler status=error op={} duration_ms={} error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    other
                ),
            }
            HandlerResult::Failed(failure)
        }
    }
}
