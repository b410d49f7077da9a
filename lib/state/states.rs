use crate::intern::Context;
use crate::state::{FrameHeapStatics, Lattice};
use log::trace;
use rustc_hash::FxHashMap;
use std::collections::hash_map;
use std::fmt;

/// A snapshot for every calling context.
///
/// A context without a snapshot has the empty snapshot. Empty snapshots are
/// never stored.
#[derive(Clone, Debug, Default)]
pub struct States {
    contexts: FxHashMap<Context, FrameHeapStatics>,
    empty: FrameHeapStatics,
}

impl States {
    /// Create a new, empty `States`.
    pub fn new() -> States {
        States::default()
    }

    /// Get the snapshot of `context`, or the empty snapshot.
    pub fn get(&self, context: &Context) -> &FrameHeapStatics {
        self.contexts.get(context).unwrap_or(&self.empty)
    }

    /// Set the snapshot of `context`. An empty snapshot removes `context`.
    /// Returns the snapshot previously held.
    pub fn put(
        &mut self,
        context: Context,
        frame_heap_statics: FrameHeapStatics,
    ) -> Option<FrameHeapStatics> {
        if frame_heap_statics.is_empty() {
            self.contexts.remove(&context)
        } else {
            self.contexts.insert(context, frame_heap_statics)
        }
    }

    pub fn remove(&mut self, context: &Context) -> Option<FrameHeapStatics> {
        self.contexts.remove(context)
    }

    pub fn iter(&self) -> hash_map::Iter<Context, FrameHeapStatics> {
        self.contexts.iter()
    }

    pub fn contexts(&self) -> hash_map::Keys<Context, FrameHeapStatics> {
        self.contexts.keys()
    }

    /// The number of contexts with a non-empty snapshot.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Join the snapshots of this `States` with those of `other`, context by
    /// context.
    pub fn merge(&self, other: &States) -> States {
        let mut states = self.clone();
        for (context, frame_heap_statics) in other.iter() {
            match states.contexts.entry(context.clone()) {
                hash_map::Entry::Occupied(mut entry) => {
                    let merged = entry.get().merge(frame_heap_statics);
                    entry.insert(merged);
                }
                hash_map::Entry::Vacant(entry) => {
                    entry.insert(frame_heap_statics.clone());
                }
            }
        }
        states
    }

    /// For every context of this `States`, what its snapshot holds that the
    /// snapshot of the same context in `other` does not.
    ///
    /// Contexts which only `other` holds contribute nothing.
    pub fn minus(&self, other: &States) -> States {
        let mut states = States::new();
        for (context, frame_heap_statics) in self.iter() {
            states.put(context.clone(), frame_heap_statics.minus(other.get(context)));
        }
        trace!(
            "minus: {} of {} contexts hold new facts",
            states.len(),
            self.len()
        );
        states
    }

    /// The contexts of this `States` in canonical order.
    fn sorted(&self) -> Vec<(&Context, &FrameHeapStatics)> {
        let mut contexts: Vec<(&Context, &FrameHeapStatics)> = self.contexts.iter().collect();
        contexts.sort_by(|lhs, rhs| lhs.0.cmp(rhs.0));
        contexts
    }

    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .contexts
            .iter()
            .map(|(context, frame_heap_statics)| {
                (context.to_string(), frame_heap_statics.to_json())
            })
            .collect();
        serde_json::Value::Object(object)
    }
}

impl PartialEq for States {
    fn eq(&self, other: &States) -> bool {
        self.contexts == other.contexts
    }
}

impl Eq for States {}

impl Lattice for States {
    fn bottom() -> States {
        States::new()
    }

    fn merge(&self, other: &States) -> States {
        States::merge(self, other)
    }

    fn minus(&self, other: &States) -> States {
        States::minus(self, other)
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}

impl fmt::Display for States {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.sorted()
                .into_iter()
                .map(|(context, frame_heap_statics)| {
                    format!("{}={}", context, frame_heap_statics)
                })
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}
