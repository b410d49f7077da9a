use crate::ir::{Local, Method, Parameter};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub(crate) struct MethodLocalData {
    method: Method,
    local: Local,
}

interned_handle!(
    /// A local variable of a specific method.
    MethodLocal,
    MethodLocalData
);

impl MethodLocal {
    pub(crate) fn from_parts(method: Method, local: Local) -> MethodLocal {
        MethodLocal::new(MethodLocalData { method, local })
    }

    pub fn method(&self) -> &Method {
        &self.data.method
    }

    pub fn local(&self) -> &Local {
        &self.data.local
    }
}

impl fmt::Display for MethodLocal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.data.local)
    }
}

#[derive(Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub(crate) struct MethodParameterData {
    method: Method,
    parameter: Parameter,
}

interned_handle!(
    /// A formal parameter of a specific method.
    ///
    /// Only parameters which exist on their method can be interned, see
    /// `Interners::parameter`.
    MethodParameter,
    MethodParameterData
);

impl MethodParameter {
    pub(crate) fn from_parts(method: Method, parameter: Parameter) -> MethodParameter {
        MethodParameter::new(MethodParameterData { method, parameter })
    }

    pub fn method(&self) -> &Method {
        &self.data.method
    }

    pub fn parameter(&self) -> &Parameter {
        &self.data.parameter
    }

    pub fn index(&self) -> usize {
        self.data.parameter.index()
    }
}

impl fmt::Display for MethodParameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.data.parameter)
    }
}
