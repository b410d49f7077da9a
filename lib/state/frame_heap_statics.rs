use crate::intern::{Address, AddressField};
use crate::ir::Field;
use crate::state::{Frame, Heap, Lattice, Statics};
use rustc_hash::FxHashSet;
use std::fmt;

/// The parts of the heap and statics which stay visible across a call
/// boundary.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocalizeScope {
    address_fields: Vec<AddressField>,
    addresses: Vec<Address>,
    static_fields: Vec<Field>,
}

impl LocalizeScope {
    /// Create a new `LocalizeScope`.
    ///
    /// * `address_fields` - The instance fields the callee may read or write.
    /// * `addresses` - The addresses of the arrays the callee may read or
    /// write.
    /// * `static_fields` - The static fields the callee may read or write.
    pub fn new(
        address_fields: Vec<AddressField>,
        addresses: Vec<Address>,
        static_fields: Vec<Field>,
    ) -> LocalizeScope {
        LocalizeScope {
            address_fields,
            addresses,
            static_fields,
        }
    }

    pub fn address_fields(&self) -> &[AddressField] {
        &self.address_fields
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn static_fields(&self) -> &[Field] {
        &self.static_fields
    }
}

/// A complete abstract snapshot for one calling context.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameHeapStatics {
    frame: Frame,
    heap: Heap,
    statics: Statics,
}

impl FrameHeapStatics {
    pub fn new(frame: Frame, heap: Heap, statics: Statics) -> FrameHeapStatics {
        FrameHeapStatics {
            frame,
            heap,
            statics,
        }
    }

    /// A snapshot in which every location is empty.
    pub fn empty() -> FrameHeapStatics {
        FrameHeapStatics::default()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    pub fn statics(&self) -> &Statics {
        &self.statics
    }

    pub fn statics_mut(&mut self) -> &mut Statics {
        &mut self.statics
    }

    pub fn merge(&self, other: &FrameHeapStatics) -> FrameHeapStatics {
        FrameHeapStatics {
            frame: self.frame.merge(&other.frame),
            heap: self.heap.merge(&other.heap),
            statics: self.statics.merge(&other.statics),
        }
    }

    pub fn minus(&self, other: &FrameHeapStatics) -> FrameHeapStatics {
        FrameHeapStatics {
            frame: self.frame.minus(&other.frame),
            heap: self.heap.minus(&other.heap),
            statics: self.statics.minus(&other.statics),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty() && self.heap.is_empty() && self.statics.is_empty()
    }

    /// The addresses held in the frame and in the statics.
    pub fn roots(&self) -> FxHashSet<Address> {
        let mut roots = self.frame.roots();
        roots.extend(self.statics.roots());
        roots
    }

    /// This snapshot with the heap reduced to what its roots reach.
    pub fn gc(&self) -> FrameHeapStatics {
        FrameHeapStatics {
            frame: self.frame.clone(),
            heap: self.heap.gc(&self.roots()),
            statics: self.statics.clone(),
        }
    }

    /// The snapshot a callee sees when called with `frame`.
    ///
    /// Statics are reduced to `scope.static_fields()`. The heap is localized
    /// to what `frame` and the reduced statics reach, keeping the instance
    /// fields and arrays of `scope`, and `taint_field` wherever it is
    /// reachable.
    pub fn localize(
        &self,
        frame: Frame,
        scope: &LocalizeScope,
        taint_field: &Field,
    ) -> FrameHeapStatics {
        let statics = self.statics.localize(scope.static_fields());
        let mut roots = frame.roots();
        roots.extend(statics.roots());
        let heap = self.heap.localize(
            &roots,
            scope.address_fields(),
            scope.addresses(),
            taint_field,
        );
        FrameHeapStatics {
            frame,
            heap,
            statics,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("frame".into(), self.frame.to_json());
        object.insert("heap".into(), self.heap.to_json());
        object.insert("statics".into(), self.statics.to_json());
        serde_json::Value::Object(object)
    }
}

impl Lattice for FrameHeapStatics {
    fn bottom() -> FrameHeapStatics {
        FrameHeapStatics::empty()
    }

    fn merge(&self, other: &FrameHeapStatics) -> FrameHeapStatics {
        FrameHeapStatics::merge(self, other)
    }

    fn minus(&self, other: &FrameHeapStatics) -> FrameHeapStatics {
        FrameHeapStatics::minus(self, other)
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}

impl fmt::Display for FrameHeapStatics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.frame, self.heap, self.statics)
    }
}
