use crate::intern::{Address, MethodLocal, MethodParameter};
use crate::ir::Method;
use crate::state::{DefaultMap, Lattice};
use crate::value_set::ValueSet;
use rustc_hash::FxHashSet;
use std::fmt;
use std::hash::Hash;

/// A kind of location held in a `Frame`.
///
/// * `MethodLocal` - A local variable of a method.
/// * `Method` - The receiver, `this`, of a method.
/// * `MethodParameter` - A formal parameter of a method.
pub trait FrameSlot: 'static + Clone + Eq + Hash + Ord + fmt::Display {
    /// The map of `frame` which holds slots of this kind.
    fn slots(frame: &Frame) -> &DefaultMap<Self>;

    /// A mutable reference to the map of `frame` which holds slots of this
    /// kind.
    fn slots_mut(frame: &mut Frame) -> &mut DefaultMap<Self>;

    /// A label for this slot which is unique across methods.
    fn label(&self) -> String;
}

impl FrameSlot for MethodLocal {
    fn slots(frame: &Frame) -> &DefaultMap<MethodLocal> {
        &frame.locals
    }

    fn slots_mut(frame: &mut Frame) -> &mut DefaultMap<MethodLocal> {
        &mut frame.locals
    }

    fn label(&self) -> String {
        format!(
            "{} {}: {}",
            self.method(),
            self.local().name(),
            self.local().type_()
        )
    }
}

impl FrameSlot for Method {
    fn slots(frame: &Frame) -> &DefaultMap<Method> {
        &frame.receivers
    }

    fn slots_mut(frame: &mut Frame) -> &mut DefaultMap<Method> {
        &mut frame.receivers
    }

    fn label(&self) -> String {
        format!("{} this", self)
    }
}

impl FrameSlot for MethodParameter {
    fn slots(frame: &Frame) -> &DefaultMap<MethodParameter> {
        &frame.parameters
    }

    fn slots_mut(frame: &mut Frame) -> &mut DefaultMap<MethodParameter> {
        &mut frame.parameters
    }

    fn label(&self) -> String {
        format!("{} {}", self.method(), self.parameter())
    }
}

/// The abstraction of method activations: the values of locals, receivers
/// and parameters.
///
/// Slots are keyed by method, so one `Frame` can hold the activations of
/// every method analyzed in a context.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Frame {
    locals: DefaultMap<MethodLocal>,
    receivers: DefaultMap<Method>,
    parameters: DefaultMap<MethodParameter>,
}

impl Frame {
    /// Create a new, empty `Frame`.
    pub fn new() -> Frame {
        Frame::default()
    }

    /// Create a `Frame` from its three maps.
    pub fn from_parts(
        locals: DefaultMap<MethodLocal>,
        receivers: DefaultMap<Method>,
        parameters: DefaultMap<MethodParameter>,
    ) -> Frame {
        Frame {
            locals,
            receivers,
            parameters,
        }
    }

    /// A `Frame` with the locals of this frame, and the given receivers and
    /// parameters. This is how the frame of a callee is set up at a call.
    pub fn with_receivers_and_parameters(
        &self,
        receivers: DefaultMap<Method>,
        parameters: DefaultMap<MethodParameter>,
    ) -> Frame {
        Frame {
            locals: self.locals.clone(),
            receivers,
            parameters,
        }
    }

    /// Get the values held in `slot`.
    pub fn get<S: FrameSlot>(&self, slot: &S) -> &ValueSet {
        S::slots(self).get(slot)
    }

    /// Replace the values held in `slot` with `values`. Returns the values
    /// previously held.
    pub fn put_strong<S: FrameSlot>(&mut self, slot: S, values: ValueSet) -> Option<ValueSet> {
        S::slots_mut(self).put_strong(slot, values)
    }

    /// Add `values` to the values held in `slot`. Returns the values
    /// previously held.
    pub fn put_weak<S: FrameSlot>(&mut self, slot: S, values: &ValueSet) -> Option<ValueSet> {
        S::slots_mut(self).put_weak(slot, values)
    }

    pub fn remove<S: FrameSlot>(&mut self, slot: &S) -> Option<ValueSet> {
        S::slots_mut(self).remove(slot)
    }

    pub fn locals(&self) -> &DefaultMap<MethodLocal> {
        &self.locals
    }

    pub fn receivers(&self) -> &DefaultMap<Method> {
        &self.receivers
    }

    pub fn parameters(&self) -> &DefaultMap<MethodParameter> {
        &self.parameters
    }

    /// Join this frame with `other`.
    pub fn merge(&self, other: &Frame) -> Frame {
        Frame {
            locals: self.locals.merge(&other.locals),
            receivers: self.receivers.merge(&other.receivers),
            parameters: self.parameters.merge(&other.parameters),
        }
    }

    /// The values held in this frame which `other` does not hold in the same
    /// slot.
    pub fn minus(&self, other: &Frame) -> Frame {
        Frame {
            locals: self.locals.minus(&other.locals),
            receivers: self.receivers.minus(&other.receivers),
            parameters: self.parameters.minus(&other.parameters),
        }
    }

    /// Every address held in this frame. These are the roots this frame
    /// contributes to heap reachability.
    pub fn roots(&self) -> FxHashSet<Address> {
        let mut roots = self.locals.addresses();
        roots.extend(self.receivers.addresses());
        roots.extend(self.parameters.addresses());
        roots
    }

    pub fn is_empty(&self) -> bool {
        self.locals.is_empty() && self.receivers.is_empty() && self.parameters.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("locals".into(), self.locals.to_json(FrameSlot::label));
        object.insert("receivers".into(), self.receivers.to_json(FrameSlot::label));
        object.insert(
            "parameters".into(),
            self.parameters.to_json(FrameSlot::label),
        );
        serde_json::Value::Object(object)
    }
}

impl Lattice for Frame {
    fn bottom() -> Frame {
        Frame::new()
    }

    fn merge(&self, other: &Frame) -> Frame {
        Frame::merge(self, other)
    }

    fn minus(&self, other: &Frame) -> Frame {
        Frame::minus(self, other)
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.locals, self.receivers, self.parameters)
    }
}
