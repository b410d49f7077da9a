//! Abstract values.
//!
//! An abstract value stands in for one or more concrete runtime values. A
//! value is either a reference to a heap object, represented by its
//! `Address`, or an opaque token produced by the value abstraction of the
//! analysis, such as a taint label or a constant.

use crate::intern::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An abstract value.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Value {
    Address(Address),
    Opaque(Opaque),
}

impl Value {
    /// If this value is a reference, the address it refers to.
    pub fn address(&self) -> Option<&Address> {
        match *self {
            Value::Address(ref address) => Some(address),
            Value::Opaque(_) => None,
        }
    }

    pub fn opaque(&self) -> Option<&Opaque> {
        match *self {
            Value::Address(_) => None,
            Value::Opaque(ref opaque) => Some(opaque),
        }
    }

    pub fn is_address(&self) -> bool {
        self.address().is_some()
    }
}

impl From<Address> for Value {
    fn from(address: Address) -> Value {
        Value::Address(address)
    }
}

impl From<Opaque> for Value {
    fn from(opaque: Opaque) -> Value {
        Value::Opaque(opaque)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Address(ref address) => write!(f, "{}", address),
            Value::Opaque(ref opaque) => write!(f, "{}", opaque),
        }
    }
}

/// A value which is not a reference.
///
/// The set of opaque values belongs to the value abstraction, and will grow
/// with it. Match on this type with a wildcard arm.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[non_exhaustive]
pub enum Opaque {
    /// An information-flow label, such as the kind of source a value came
    /// from.
    Taint(String),
    /// A constant, in its textual form.
    Constant(String),
    /// Any other token of the value abstraction.
    Token { kind: String, label: String },
}

impl Opaque {
    pub fn taint<S: Into<String>>(label: S) -> Opaque {
        Opaque::Taint(label.into())
    }

    pub fn constant<S: Into<String>>(text: S) -> Opaque {
        Opaque::Constant(text.into())
    }

    pub fn token<K: Into<String>, L: Into<String>>(kind: K, label: L) -> Opaque {
        Opaque::Token {
            kind: kind.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Opaque::Taint(ref label) => write!(f, "taint:{}", label),
            Opaque::Constant(ref text) => write!(f, "\"{}\"", text),
            Opaque::Token {
                ref kind,
                ref label,
            } => write!(f, "{}:{}", kind, label),
        }
    }
}
