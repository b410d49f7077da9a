use crate::ir::Method;
use crate::Error;
use serde::Serialize;
use std::fmt;

/// An allocation site, as identified by the points-to analysis.
///
/// Every concrete object allocated at one site is represented by the same
/// site. Sites are ordered by their canonical textual form.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct AllocSite {
    canonical: String,
    id: u64,
    type_: String,
    method: Option<String>,
}

impl AllocSite {
    /// Create a new `AllocSite`.
    ///
    /// * `id` - The identifier the points-to analysis gave this site.
    /// * `type_` - The type of the allocated object.
    /// * `method` - The method holding the allocation, if there is one.
    /// Synthetic sites, such as objects created by the runtime model, have no
    /// method.
    pub fn new<T: Into<String>>(
        id: u64,
        type_: T,
        method: Option<&Method>,
    ) -> Result<AllocSite, Error> {
        let type_ = type_.into();
        if type_.is_empty() {
            return Err(Error::malformed(
                "allocation site",
                format!("type of site {} is empty", id),
            ));
        }

        let method = method.map(|method| method.signature().to_string());
        let canonical = match method {
            Some(ref method) => format!("AllocNode {} new {} in method {}", id, type_, method),
            None => format!("AllocNode {} new {}", id, type_),
        };

        Ok(AllocSite {
            canonical,
            id,
            type_,
            method,
        })
    }

    /// The canonical textual form of this site.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for AllocSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

#[test]
fn alloc_site_canonical() {
    let method = Method::new("com.example.Foo", "bar", Vec::new(), "void").unwrap();
    let site = AllocSite::new(7, "java.lang.StringBuilder", Some(&method)).unwrap();
    assert_eq!(
        site.canonical(),
        "AllocNode 7 new java.lang.StringBuilder in method <com.example.Foo: void bar()>"
    );
    assert!(AllocSite::new(8, "", None).is_err());
}
