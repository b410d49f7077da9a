//! The abstract state lattice.
//!
//! The abstract state of the analysis is built from the following pieces,
//! from the leaves up:
//!
//! * `DefaultMap` - A map from a location key to a `ValueSet`, where an absent
//! key is the empty set. Every other component is made of these.
//! * `Frame` - The locals, receivers and parameters of method activations.
//! * `Heap` - `Instances`, keyed by address and field, and `Arrays`, keyed by
//! address, where one entry stands for every cell of the array.
//! * `Statics` - Static fields.
//! * `FrameHeapStatics` - A complete snapshot for one calling context.
//! * `States` - A snapshot for every calling context.
//!
//! Every piece implements `Lattice`. `merge` joins two values, and `minus`
//! computes what one value holds that another does not, which is what a
//! fixed-point driver uses to decide whether it has found anything new.
//! Neither operation modifies its operands.
//!
//! Locations are updated either strongly, replacing what the location holds,
//! or weakly, adding to it. A strong update is only sound when the write is
//! known to target exactly one concrete location. Deciding this is up to the
//! caller, which is why the two updates are separate methods.

mod default_map;
mod frame;
mod frame_heap_statics;
mod heap;
mod states;
mod statics;

pub use self::default_map::*;
pub use self::frame::*;
pub use self::frame_heap_statics::*;
pub use self::heap::*;
pub use self::states::*;
pub use self::statics::*;

/// A join semi-lattice with a set difference.
pub trait Lattice: Clone + PartialEq {
    /// The least element, which holds no information.
    fn bottom() -> Self;

    /// Join this value with `other`.
    fn merge(&self, other: &Self) -> Self;

    /// The information in this value which is not in `other`.
    fn minus(&self, other: &Self) -> Self;

    /// Returns true if this value holds no information.
    fn is_bottom(&self) -> bool;
}
