//! Flowstate: the abstract state of a context-sensitive information-flow
//! analysis.
//!
//! Flowstate represents, for every calling context, an abstraction of a
//! running program's stack frames, heap and static storage, together with
//! the operations a fixed-point driver needs to compute a sound result over
//! all execution paths.
//!
//! # Layers
//!
//! * `ir` - Descriptors supplied by the front-end: methods, fields, locals,
//! parameters, allocation sites and call-graph edges. Flowstate treats these as
//! opaque, already-resolved identifiers.
//! * `intern` - Interning tables which canonicalize compound keys (contexts,
//! addresses, address/field pairs, method/local pairs and method/parameter
//! pairs), so structurally equal keys always yield the same identity.
//! * `value` / `value_set` - Abstract values, and the immutable sets of
//! abstract values attached to every location.
//! * `state` - The lattice itself: `Frame`, `Heap`, `Statics`,
//! `FrameHeapStatics` and `States`, with merge, minus, strong and weak
//! updates, reachability-based garbage collection and localization.
//! * `session` - The interning tables and options owned by one analysis run.
//!
//! # Sharing
//!
//! All lattice values share their value sets through `RC`, which is
//! `std::rc::Rc` by default. Enable the `thread_safe` feature to switch `RC` to
//! `std::sync::Arc`, which allows `States` to be handed to worker threads.
//! Interning tables are always thread safe.

pub mod error;
pub mod intern;
pub mod ir;
pub mod session;
pub mod state;
#[cfg(test)]
mod tests;
pub mod value;
pub mod value_set;

pub use crate::error::Error;
pub use crate::intern::{Address, AddressField, Context, Interners, MethodLocal, MethodParameter};
pub use crate::session::{Options, OptionsBuilder, Session};
pub use crate::state::{
    Arrays, Frame, FrameHeapStatics, FrameSlot, Heap, Instances, Lattice, LocalizeScope, States,
    Statics,
};
pub use crate::value::{Opaque, Value};
pub use crate::value_set::ValueSet;

#[cfg(not(feature = "thread_safe"))]
use std::rc::Rc as RC;
#[cfg(feature = "thread_safe")]
use std::sync::Arc as RC;
