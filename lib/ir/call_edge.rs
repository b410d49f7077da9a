use crate::ir::Method;
use serde::Serialize;
use std::fmt;

/// An edge of the call graph.
///
/// Entry edges, which lead from the harness into an entry point of the
/// program, have no source method and no call site.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct CallEdge {
    source: Option<Method>,
    site: Option<usize>,
    target: Method,
}

impl CallEdge {
    /// Create a new `CallEdge` from the call at statement `site` of `source`
    /// to `target`.
    pub fn new(source: Method, site: usize, target: Method) -> CallEdge {
        CallEdge {
            source: Some(source),
            site: Some(site),
            target,
        }
    }

    /// Create a new entry edge into `target`.
    pub fn entry(target: Method) -> CallEdge {
        CallEdge {
            source: None,
            site: None,
            target,
        }
    }

    pub fn source(&self) -> Option<&Method> {
        self.source.as_ref()
    }

    /// The index of the calling statement in the source method.
    pub fn site(&self) -> Option<usize> {
        self.site
    }

    pub fn target(&self) -> &Method {
        &self.target
    }

    pub fn is_entry(&self) -> bool {
        self.source.is_none()
    }
}

impl fmt::Display for CallEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.source.as_ref(), self.site) {
            (Some(source), Some(site)) => {
                write!(f, "{} @{} -> {}", source, site, self.target)
            }
            _ => write!(f, "<entry> -> {}", self.target),
        }
    }
}
