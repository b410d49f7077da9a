//! Descriptors supplied by the analysis front-end.
//!
//! Flowstate does not lift programs, build call graphs or compute points-to
//! sets. It consumes the results of those analyses as the descriptors in
//! this module. Every descriptor compares structurally, so two descriptors
//! built from the same facts are interchangeable, and every descriptor has a
//! canonical textual form which gives it a total order for printing.
//!
//! * `Method` - A method, identified by its signature.
//! * `Field` - An instance or static field, identified by its signature.
//! * `Local` - A local variable of a method body.
//! * `Parameter` - A formal parameter reference, by index and type.
//! * `AllocSite` - An allocation site from the points-to analysis.
//! * `CallEdge` - An edge of the call graph.

mod alloc_site;
mod call_edge;
mod field;
mod local;
mod method;

pub use self::alloc_site::*;
pub use self::call_edge::*;
pub use self::field::*;
pub(crate) use self::field::FieldDescriptor;
pub use self::local::*;
pub use self::method::*;
