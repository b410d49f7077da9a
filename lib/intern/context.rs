use crate::ir::CallEdge;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub(crate) struct ContextData {
    entry: CallEdge,
    call: CallEdge,
}

interned_handle!(
    /// A calling context: the edge which entered the current method, and the
    /// call edge being analyzed from it.
    ///
    /// Create contexts with `Interners::context`.
    Context,
    ContextData
);

impl Context {
    pub(crate) fn from_edges(entry: CallEdge, call: CallEdge) -> Context {
        Context::new(ContextData { entry, call })
    }

    /// The edge through which the method of this context was entered.
    pub fn entry(&self) -> &CallEdge {
        &self.data.entry
    }

    /// The call edge of this context.
    pub fn call(&self) -> &CallEdge {
        &self.data.call
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.data.entry, self.data.call)
    }
}
