//! Repository functions: the persistence contract the use cases depend on.
//!
//! Every function takes the connection or transaction to run on, so a use
//! case composes several calls inside one `with_txn`.

pub mod games;
pub mod locations;
pub mod rounds;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Narrow a stored integer into its domain type.
pub(crate) fn narrow<T, U>(value: T, column: &'static str) -> Result<U, DomainError>
where
    U: TryFrom<T>,
    T: Copy + std::fmt::Display,
{
    U::try_from(value).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("{column} out of range: {value}"),
        )
    })
}
