use std::borrow::Cow;

use thiserror::Error;

use crate::value::Value;

/// Error type returned by generated data-access code and its collaborators.
#[derive(Debug, Error)]
pub enum DaoError {
    /// A value could not be converted into the requested Rust type.
    #[error("cannot convert {found} value into {expected}")]
    TypeMismatch { expected: &'static str, found: &'static str },

    /// An integer or float did not fit the requested Rust type.
    #[error("value {value} out of range for {target}")]
    OutOfRange { target: &'static str, value: String },

    /// A row mapper asked for a column the row does not carry.
    #[error("column `{column}` not present in row")]
    MissingColumn { column: String },

    /// A parameter was bound at an invalid position.
    #[error("invalid parameter position {position} (positions start at 1)")]
    InvalidParameter { position: usize },

    /// A key-returning insert produced no key.
    #[error("statement returned no generated key: {statement}")]
    MissingGeneratedKey { statement: String },

    /// A guarded property was read before anything was assigned to it.
    #[error("property `{property}` read before it was set")]
    PropertyNotSet { property: Cow<'static, str> },

    /// Failure reported by the statement executor.
    #[error("executor error: {message}")]
    Executor { message: Cow<'static, str> },

    #[error("{message}")]
    Other { message: Cow<'static, str> },
}

impl DaoError {
    pub fn type_mismatch(expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }

    pub fn executor(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Executor { message: message.into() }
    }
}

pub type DaoResult<T> = Result<T, DaoError>;
