//! Interning of compound keys.
//!
//! The maps of the abstract state are keyed by compound keys: a calling
//! context is a pair of call edges, an instance location is an address and a
//! field, and so on. Each key shape has an interning table which maps the
//! structural key to one shared handle. Interning the same structural key
//! twice, from any thread, yields the identical handle.
//!
//! Tables are append-only. They belong to an analysis session, see
//! `Interners`, and live as long as it does.
//!
//! Handles compare by identity first and structurally second, and hash
//! structurally, so a handle behaves like the key it was built from. The
//! order of handles is the canonical order of their keys, which is only used
//! to print states deterministically.

/// Declares an interned handle type over a data type.
///
/// The data type must implement `Eq`, `Hash`, `Ord` and `Serialize`.
macro_rules! interned_handle {
    ($(#[$meta:meta])* $name:ident, $data:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            data: std::sync::Arc<$data>,
            hash: u64,
        }

        impl $name {
            pub(crate) fn new(data: $data) -> $name {
                use std::hash::{Hash, Hasher};
                let mut hasher = rustc_hash::FxHasher::default();
                data.hash(&mut hasher);
                $name {
                    data: std::sync::Arc::new(data),
                    hash: hasher.finish(),
                }
            }

            /// Returns true if `self` and `other` are the identical interned
            /// object.
            pub fn ptr_eq(&self, other: &$name) -> bool {
                std::sync::Arc::ptr_eq(&self.data, &other.data)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &$name) -> bool {
                self.ptr_eq(other) || (self.hash == other.hash && self.data == other.data)
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.hash);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &$name) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &$name) -> std::cmp::Ordering {
                if self.ptr_eq(other) {
                    std::cmp::Ordering::Equal
                } else {
                    self.data.cmp(&other.data)
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.data.serialize(serializer)
            }
        }
    };
}

mod address;
mod context;
mod interner;
mod interners;
mod location;

pub use self::address::*;
pub use self::context::*;
pub use self::interner::*;
pub use self::interners::*;
pub use self::location::*;
