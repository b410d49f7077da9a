//! Flowstate errors.
//!
//! Lattice operations never fail: an absent key is an empty set, not an
//! error. Errors are reserved for malformed input handed to us by a
//! collaborator, such as a descriptor without a name, or a parameter which
//! does not exist on its method. Such input would corrupt the lattice, so it
//! is rejected at construction time.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed {kind} descriptor: {reason}")]
    MalformedDescriptor { kind: &'static str, reason: String },
    #[error("Parameter {index} is out of range for {method}, which takes {arity} parameters")]
    ParameterOutOfRange {
        method: String,
        index: usize,
        arity: usize,
    },
    #[error("Parameter {index} of {method} has type {expected}, but the descriptor says {found}")]
    ParameterType {
        method: String,
        index: usize,
        expected: String,
        found: String,
    },
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub(crate) fn malformed<S: Into<String>>(kind: &'static str, reason: S) -> Error {
        Error::MalformedDescriptor {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Error {
        Error::Custom(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
