use crate::ir::{AllocSite, Field};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub(crate) struct AddressData {
    site: AllocSite,
}

interned_handle!(
    /// The abstract identity of every object allocated at one allocation
    /// site.
    ///
    /// Addresses are ordered by the canonical form of their site. Create
    /// addresses with `Interners::address`.
    Address,
    AddressData
);

impl Address {
    pub(crate) fn from_site(site: AllocSite) -> Address {
        Address::new(AddressData { site })
    }

    /// The allocation site this address abstracts.
    pub fn site(&self) -> &AllocSite {
        &self.data.site
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.data.site)
    }
}

#[derive(Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub(crate) struct AddressFieldData {
    address: Address,
    field: Field,
}

interned_handle!(
    /// One field of the objects at an address.
    ///
    /// Ordered by address, then by field signature. Create these with
    /// `Interners::address_field`.
    AddressField,
    AddressFieldData
);

impl AddressField {
    pub(crate) fn from_parts(address: Address, field: Field) -> AddressField {
        AddressField::new(AddressFieldData { address, field })
    }

    pub fn address(&self) -> &Address {
        &self.data.address
    }

    pub fn field(&self) -> &Field {
        &self.data.field
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.data.address, self.data.field)
    }
}
