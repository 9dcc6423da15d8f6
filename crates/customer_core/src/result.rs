//! Uniform success/failure envelope returned by every handler.
//!
//! # Invariants
//! - A failed result never carries a payload; the enum shape enforces it.
//! - Handlers return this envelope instead of `Err`, so callers inspect
//!   `status()` before reading `data()`.

use crate::model::customer::CustomerId;
use crate::repo::customer_repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Coarse outcome of a handler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Succeeded,
    Failed,
}

/// Reason a handler call failed.
#[derive(Debug)]
pub enum Failure {
    /// Target customer does not exist.
    NotFound(CustomerId),
    /// Cancellation was signalled before work started.
    Cancelled,
    /// Data-access fault.
    Storage(RepoError),
    /// A write succeeded but the read-back did not observe it.
    Inconsistent(&'static str),
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "customer not found: {id}"),
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
            Self::Inconsistent(details) => write!(f, "inconsistent customer state: {details}"),
        }
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for Failure {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Handler outcome: payload on success, failure reason otherwise.
///
/// `HandlerResult` with the default `T = ()` models void operations.
#[derive(Debug)]
#[must_use]
pub enum HandlerResult<T = ()> {
    Succeeded(T),
    Failed(Failure),
}

impl<T> HandlerResult<T> {
    pub fn status(&self) -> ResultStatus {
        match self {
            Self::Succeeded(_) => ResultStatus::Succeeded,
            Self::Failed(_) => ResultStatus::Failed,
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Payload of a succeeded result.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Succeeded(data) => Some(data),
            Self::Failed(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Succeeded(data) => Some(data),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> HandlerResult<U> {
        match self {
            Self::Succeeded(data) => HandlerResult::Succeeded(f(data)),
            Self::Failed(failure) => HandlerResult::Failed(failure),
        }
    }

    /// Converts into a std `Result` for `?`-based callers.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Self::Succeeded(data) => Ok(data),
            Self::Failed(failure) => Err(failure),
        }
    }
}

impl<T> From<RepoResult<T>> for HandlerResult<T> {
    fn from(value: RepoResult<T>) -> Self {
        match value {
            Ok(data) => Self::Succeeded(data),
            Err(err) => Self::Failed(err.into()),
        }
    }
}

impl<T> From<Result<T, Failure>> for HandlerResult<T> {
    fn from(value: Result<T, Failure>) -> Self {
        match value {
            Ok(data) => Self::Succeeded(data),
            Err(failure) => Self::Failed(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Failure, HandlerResult, ResultStatus};
    use crate::repo::customer_repo::{RepoError, RepoResult};
    use uuid::Uuid;

    #[test]
    fn failed_result_has_no_payload() {
        let result: HandlerResult<u32> = HandlerResult::Failed(Failure::Cancelled);
        assert_eq!(result.status(), ResultStatus::Failed);
        assert!(result.data().is_none());
        assert!(matches!(result.failure(), Some(Failure::Cancelled)));
    }

    #[test]
    fn repo_not_found_maps_to_not_found_failure() {
        let id = Uuid::new_v4();
        let repo_result: RepoResult<()> = Err(RepoError::NotFound(id));
        let result = HandlerResult::from(repo_result);
        assert!(matches!(result, HandlerResult::Failed(Failure::NotFound(found)) if found == id));
    }

    #[test]
    fn other_repo_errors_map_to_storage_failure() {
        let repo_result: RepoResult<()> = Err(RepoError::InvalidData("bad row".to_string()));
        let result = HandlerResult::from(repo_result);
        let failure = result.failure().expect("result should be failed");
        assert!(matches!(failure, Failure::Storage(_)));
        assert!(failure.to_string().contains("bad row"));
    }

    #[test]
    fn map_preserves_status() {
        let result = HandlerResult::Succeeded(2).map(|value| value * 2);
        assert_eq!(result.into_data(), Some(4));
    }
}
