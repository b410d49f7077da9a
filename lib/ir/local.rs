use crate::Error;
use serde::Serialize;
use std::fmt;

/// A local variable in a method body.
///
/// A `Local` carries no reference to its method. Pair it with one through
/// `Interners::local`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Local {
    name: String,
    type_: String,
}

impl Local {
    pub fn new<N, T>(name: N, type_: T) -> Result<Local, Error>
    where
        N: Into<String>,
        T: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::malformed("local", "name is empty"));
        }
        Ok(Local {
            name,
            type_: type_.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }
}

impl fmt::Display for Local {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A reference to a formal parameter, by position and type.
///
/// Two references to the same position with the same type are the same
/// parameter, no matter where in the method body they appear.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Parameter {
    index: usize,
    type_: String,
}

impl Parameter {
    pub fn new<T: Into<String>>(index: usize, type_: T) -> Parameter {
        Parameter {
            index,
            type_: type_.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "@parameter{}: {}", self.index, self.type_)
    }
}
