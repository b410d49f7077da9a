//! An analysis session: the interning tables and options of one run.

use crate::intern::Interners;
use crate::ir::{Field, FieldDescriptor};
use crate::state::{Frame, FrameHeapStatics, LocalizeScope};
use crate::Error;
use serde::Deserialize;

/// Options which change the behavior of the abstract state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    taint_field: Field,
}

impl Options {
    /// Create a new set of Options.
    ///
    /// * `taint_field` - The field which carries information-flow labels.
    /// It is kept on every reachable address when a heap is localized.
    pub fn new(taint_field: Field) -> Options {
        Options { taint_field }
    }

    /// Parse Options from json, such as
    /// `{"taint_field": {"class": "java.lang.Object", "type_": "double", "name": "taint"}}`.
    pub fn from_json(json: &str) -> Result<Options, Error> {
        #[derive(Deserialize)]
        struct OptionsDescriptor {
            taint_field: FieldDescriptor,
        }

        let descriptor: OptionsDescriptor = serde_json::from_str(json)?;
        Ok(Options::new(Field::try_from(descriptor.taint_field)?))
    }

    /// The field which carries information-flow labels.
    pub fn taint_field(&self) -> &Field {
        &self.taint_field
    }

    pub fn set_taint_field(&mut self, taint_field: Field) {
        self.taint_field = taint_field;
    }
}

/// Create your options with the builder pattern.
///
/// For more details on the options, see `session::Options`
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Create a new builder for options, with the field which carries
    /// information-flow labels.
    pub fn new(taint_field: Field) -> OptionsBuilder {
        OptionsBuilder {
            options: Options::new(taint_field),
        }
    }

    pub fn taint_field(mut self, taint_field: Field) -> OptionsBuilder {
        self.options.set_taint_field(taint_field);
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}

/// One run of the analysis.
///
/// A `Session` owns the interning tables every key of the run is built
/// through, so keys from two sessions must never be mixed. Share a `Session`
/// by reference between the workers of a run.
#[derive(Debug)]
pub struct Session {
    interners: Interners,
    options: Options,
}

impl Session {
    /// Create a new `Session` with empty interning tables.
    pub fn new(options: Options) -> Session {
        Session {
            interners: Interners::new(),
            options,
        }
    }

    pub fn interners(&self) -> &Interners {
        &self.interners
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Localize `frame_heap_statics` for a callee with `frame`, keeping the
    /// taint field of this session.
    pub fn localize(
        &self,
        frame_heap_statics: &FrameHeapStatics,
        frame: Frame,
        scope: &LocalizeScope,
    ) -> FrameHeapStatics {
        frame_heap_statics.localize(frame, scope, self.options.taint_field())
    }
}
