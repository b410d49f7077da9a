use crate::intern::{Address, AddressField, Interners};
use crate::ir::Field;
use crate::state::{DefaultMap, Lattice};
use crate::value_set::ValueSet;
use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::hash_map;
use std::fmt;

/// The fields of heap objects, keyed by address and field.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Instances {
    address_fields: DefaultMap<AddressField>,
}

impl Instances {
    /// Create a new, empty `Instances`.
    pub fn new() -> Instances {
        Instances::default()
    }

    pub fn get(&self, address_field: &AddressField) -> &ValueSet {
        self.address_fields.get(address_field)
    }

    /// Get the values of `field` of the objects at `address`.
    pub fn get_field(&self, interners: &Interners, address: &Address, field: &Field) -> &ValueSet {
        self.get(&interners.address_field(address, field))
    }

    /// Replace the values at `address_field`. Returns the values previously
    /// held.
    pub fn put_strong(&mut self, address_field: AddressField, values: ValueSet) -> Option<ValueSet> {
        self.address_fields.put_strong(address_field, values)
    }

    /// Add to the values at `address_field`. Returns the values previously
    /// held.
    pub fn put_weak(&mut self, address_field: AddressField, values: &ValueSet) -> Option<ValueSet> {
        self.address_fields.put_weak(address_field, values)
    }

    pub fn put_strong_field(
        &mut self,
        interners: &Interners,
        address: &Address,
        field: &Field,
        values: ValueSet,
    ) -> Option<ValueSet> {
        self.put_strong(interners.address_field(address, field), values)
    }

    pub fn put_weak_field(
        &mut self,
        interners: &Interners,
        address: &Address,
        field: &Field,
        values: &ValueSet,
    ) -> Option<ValueSet> {
        self.put_weak(interners.address_field(address, field), values)
    }

    pub fn remove(&mut self, address_field: &AddressField) -> Option<ValueSet> {
        self.address_fields.remove(address_field)
    }

    pub fn iter(&self) -> hash_map::Iter<AddressField, ValueSet> {
        self.address_fields.iter()
    }

    pub fn len(&self) -> usize {
        self.address_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address_fields.is_empty()
    }

    pub fn merge(&self, other: &Instances) -> Instances {
        Instances {
            address_fields: self.address_fields.merge(&other.address_fields),
        }
    }

    pub fn minus(&self, other: &Instances) -> Instances {
        Instances {
            address_fields: self.address_fields.minus(&other.address_fields),
        }
    }

    fn filter<F: Fn(&AddressField) -> bool>(&self, predicate: F) -> Instances {
        Instances {
            address_fields: self.address_fields.filter(predicate),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.address_fields.to_json(|address_field| address_field.to_string())
    }
}

impl fmt::Display for Instances {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.address_fields)
    }
}

/// The cells of arrays, keyed by the address of the array.
///
/// Arrays are not index sensitive. The values at an address are the values of
/// any cell of the arrays allocated there.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Arrays {
    addresses: DefaultMap<Address>,
}

impl Arrays {
    /// Create a new, empty `Arrays`.
    pub fn new() -> Arrays {
        Arrays::default()
    }

    pub fn get(&self, address: &Address) -> &ValueSet {
        self.addresses.get(address)
    }

    pub fn put_strong(&mut self, address: Address, values: ValueSet) -> Option<ValueSet> {
        self.addresses.put_strong(address, values)
    }

    pub fn put_weak(&mut self, address: Address, values: &ValueSet) -> Option<ValueSet> {
        self.addresses.put_weak(address, values)
    }

    pub fn remove(&mut self, address: &Address) -> Option<ValueSet> {
        self.addresses.remove(address)
    }

    pub fn iter(&self) -> hash_map::Iter<Address, ValueSet> {
        self.addresses.iter()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn merge(&self, other: &Arrays) -> Arrays {
        Arrays {
            addresses: self.addresses.merge(&other.addresses),
        }
    }

    pub fn minus(&self, other: &Arrays) -> Arrays {
        Arrays {
            addresses: self.addresses.minus(&other.addresses),
        }
    }

    fn filter<F: Fn(&Address) -> bool>(&self, predicate: F) -> Arrays {
        Arrays {
            addresses: self.addresses.filter(predicate),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.addresses.to_json(|address| address.to_string())
    }
}

impl fmt::Display for Arrays {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.addresses)
    }
}

/// The abstract heap: object fields and array cells.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Heap {
    instances: Instances,
    arrays: Arrays,
}

impl Heap {
    /// Create a new, empty `Heap`.
    pub fn new() -> Heap {
        Heap::default()
    }

    pub fn from_parts(instances: Instances, arrays: Arrays) -> Heap {
        Heap { instances, arrays }
    }

    /// A `Heap` with the instances of this heap, and the given arrays.
    pub fn with_arrays(&self, arrays: Arrays) -> Heap {
        Heap {
            instances: self.instances.clone(),
            arrays,
        }
    }

    pub fn instances(&self) -> &Instances {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut Instances {
        &mut self.instances
    }

    pub fn arrays(&self) -> &Arrays {
        &self.arrays
    }

    pub fn arrays_mut(&mut self) -> &mut Arrays {
        &mut self.arrays
    }

    pub fn merge(&self, other: &Heap) -> Heap {
        Heap {
            instances: self.instances.merge(&other.instances),
            arrays: self.arrays.merge(&other.arrays),
        }
    }

    pub fn minus(&self, other: &Heap) -> Heap {
        Heap {
            instances: self.instances.minus(&other.instances),
            arrays: self.arrays.minus(&other.arrays),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty() && self.arrays.is_empty()
    }

    /// Every address reachable from `roots`, including the roots.
    ///
    /// An address reaches every address held in any field of its objects,
    /// and every address held in its array cells.
    pub fn reachable(&self, roots: &FxHashSet<Address>) -> FxHashSet<Address> {
        let mut successors: FxHashMap<&Address, Vec<&Address>> = FxHashMap::default();
        for (address_field, values) in self.instances.iter() {
            successors
                .entry(address_field.address())
                .or_default()
                .extend(values.addresses());
        }
        for (address, values) in self.arrays.iter() {
            successors
                .entry(address)
                .or_default()
                .extend(values.addresses());
        }

        let mut reachable = roots.clone();
        let mut frontier: Vec<&Address> = roots.iter().collect();
        while let Some(address) = frontier.pop() {
            if let Some(addresses) = successors.get(address) {
                for &successor in addresses {
                    if reachable.insert(successor.clone()) {
                        frontier.push(successor);
                    }
                }
            }
        }

        reachable
    }

    /// The part of this heap reachable from `roots`.
    pub fn gc(&self, roots: &FxHashSet<Address>) -> Heap {
        let reachable = self.reachable(roots);
        let heap = Heap {
            instances: self
                .instances
                .filter(|address_field| reachable.contains(address_field.address())),
            arrays: self.arrays.filter(|address| reachable.contains(address)),
        };
        trace!(
            "gc: {} roots, {} reachable, kept {} of {} entries",
            roots.len(),
            reachable.len(),
            heap.instances.len() + heap.arrays.len(),
            self.instances.len() + self.arrays.len()
        );
        heap
    }

    /// The part of this heap reachable from `roots` which is visible across
    /// a call boundary.
    ///
    /// Of the reachable instances, only those in `address_fields` are kept,
    /// except that `taint_field` is kept for every reachable address. Of the
    /// reachable arrays, only those in `addresses` are kept.
    pub fn localize(
        &self,
        roots: &FxHashSet<Address>,
        address_fields: &[AddressField],
        addresses: &[Address],
        taint_field: &Field,
    ) -> Heap {
        let reachable = self.reachable(roots);
        let address_fields: FxHashSet<&AddressField> = address_fields.iter().collect();
        let addresses: FxHashSet<&Address> = addresses.iter().collect();

        let heap = Heap {
            instances: self.instances.filter(|address_field| {
                reachable.contains(address_field.address())
                    && (address_fields.contains(address_field)
                        || address_field.field() == taint_field)
            }),
            arrays: self
                .arrays
                .filter(|address| reachable.contains(address) && addresses.contains(address)),
        };
        trace!(
            "localize: {} reachable, kept {} of {} entries",
            reachable.len(),
            heap.instances.len() + heap.arrays.len(),
            self.instances.len() + self.arrays.len()
        );
        heap
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("instances".into(), self.instances.to_json());
        object.insert("arrays".into(), self.arrays.to_json());
        serde_json::Value::Object(object)
    }
}

impl Lattice for Instances {
    fn bottom() -> Instances {
        Instances::new()
    }

    fn merge(&self, other: &Instances) -> Instances {
        Instances::merge(self, other)
    }

    fn minus(&self, other: &Instances) -> Instances {
        Instances::minus(self, other)
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}

impl Lattice for Arrays {
    fn bottom() -> Arrays {
        Arrays::new()
    }

    fn merge(&self, other: &Arrays) -> Arrays {
        Arrays::merge(self, other)
    }

    fn minus(&self, other: &Arrays) -> Arrays {
        Arrays::minus(self, other)
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}

impl Lattice for Heap {
    fn bottom() -> Heap {
        Heap::new()
    }

    fn merge(&self, other: &Heap) -> Heap {
        Heap::merge(self, other)
    }

    fn minus(&self, other: &Heap) -> Heap {
        Heap::minus(self, other)
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}

impl fmt::Display for Heap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.instances, self.arrays)
    }
}

#[cfg(test)]
mod tests {
    use super::{Arrays, Heap};
    use crate::intern::{Address, Interners};
    use crate::ir::{AllocSite, Field};
    use crate::value::Opaque;
    use crate::value_set::ValueSet;
    use rustc_hash::FxHashSet;

    fn address(interners: &Interners, id: u64) -> Address {
        interners.address(&AllocSite::new(id, "com.example.Node", None).unwrap())
    }

    fn field(name: &str) -> Field {
        Field::new("com.example.Node", "java.lang.Object", name).unwrap()
    }

    fn taint_field() -> Field {
        Field::new("java.lang.Object", "double", "taint").unwrap()
    }

    fn roots(addresses: &[&Address]) -> FxHashSet<Address> {
        addresses.iter().map(|address| (*address).clone()).collect()
    }

    /// a.next -> b, b.next -> c, c.next -> a, b[*] -> d, e is unreachable
    /// from a.
    fn cyclic_heap(interners: &Interners) -> (Heap, Vec<Address>) {
        let addresses: Vec<Address> = (0..5).map(|id| address(interners, id)).collect();
        let (a, b, c, d, e) = (
            &addresses[0],
            &addresses[1],
            &addresses[2],
            &addresses[3],
            &addresses[4],
        );

        let mut heap = Heap::new();
        let next = field("next");
        let instances = heap.instances_mut();
        instances.put_strong_field(interners, a, &next, ValueSet::singleton(b.clone()));
        instances.put_strong_field(interners, b, &next, ValueSet::singleton(c.clone()));
        instances.put_strong_field(interners, c, &next, ValueSet::singleton(a.clone()));
        instances.put_strong_field(interners, e, &next, ValueSet::singleton(a.clone()));
        heap.arrays_mut()
            .put_strong(b.clone(), ValueSet::singleton(d.clone()));
        heap.arrays_mut()
            .put_strong(d.clone(), ValueSet::singleton(Opaque::taint("SMS")));

        (heap, addresses)
    }

    #[test]
    fn reachable_through_cycles() {
        let interners = Interners::new();
        let (heap, addresses) = cyclic_heap(&interners);

        let reachable = heap.reachable(&roots(&[&addresses[0]]));
        assert_eq!(reachable.len(), 4);
        assert!(!reachable.contains(&addresses[4]));

        let reachable = heap.reachable(&roots(&[&addresses[4]]));
        assert_eq!(reachable.len(), 5);
    }

    #[test]
    fn gc() {
        let interners = Interners::new();
        let (heap, addresses) = cyclic_heap(&interners);
        let from_a = roots(&[&addresses[0]]);

        let collected = heap.gc(&from_a);
        assert_eq!(collected.instances().len(), 3);
        assert_eq!(collected.arrays().len(), 2);
        assert!(collected
            .instances()
            .get_field(&interners, &addresses[4], &field("next"))
            .is_empty());

        assert_eq!(collected.gc(&from_a), collected);
        assert!(heap.gc(&FxHashSet::default()).is_empty());
        assert_eq!(heap.gc(&roots(&[&addresses[4]])), heap);
    }

    #[test]
    fn localize_keeps_taint() {
        let interners = Interners::new();
        let a = address(&interners, 0);
        let b = address(&interners, 1);
        let next = field("next");
        let data = field("data");

        let mut heap = Heap::new();
        heap.instances_mut()
            .put_strong_field(&interners, &a, &next, ValueSet::singleton(b.clone()));
        heap.instances_mut().put_strong_field(
            &interners,
            &a,
            &data,
            ValueSet::singleton(Opaque::constant("x")),
        );
        heap.instances_mut().put_strong_field(
            &interners,
            &b,
            &taint_field(),
            ValueSet::singleton(Opaque::taint("IMEI")),
        );
        heap.arrays_mut()
            .put_strong(a.clone(), ValueSet::singleton(Opaque::constant("y")));
        heap.arrays_mut()
            .put_strong(b.clone(), ValueSet::singleton(Opaque::constant("z")));

        let a_next = interners.address_field(&a, &next);
        let localized = heap.localize(
            &roots(&[&a]),
            &[a_next.clone()],
            &[b.clone()],
            &taint_field(),
        );

        assert_eq!(localized.instances().len(), 2);
        assert_eq!(*localized.instances().get(&a_next), ValueSet::singleton(b.clone()));
        assert!(localized
            .instances()
            .get_field(&interners, &a, &data)
            .is_empty());
        assert_eq!(
            *localized
                .instances()
                .get_field(&interners, &b, &taint_field()),
            ValueSet::singleton(Opaque::taint("IMEI"))
        );
        assert!(localized.arrays().get(&a).is_empty());
        assert_eq!(localized.arrays().len(), 1);

        // Nothing is reachable, so even the taint field goes.
        let localized = heap.localize(&FxHashSet::default(), &[a_next], &[b], &taint_field());
        assert!(localized.is_empty());
    }

    #[test]
    fn localize_matches_taint_field_by_parts() {
        let interners = Interners::new();
        let a = address(&interners, 0);
        let mut heap = Heap::new();
        heap.instances_mut().put_strong_field(
            &interners,
            &a,
            &taint_field(),
            ValueSet::singleton(Opaque::taint("SMS")),
        );

        let json = r#"{"signature": "<java.lang.Object: int taint>", "class": "java.lang.Object", "type_": "double", "name": "taint"}"#;
        let taint: Field = serde_json::from_str(json).unwrap();
        let localized = heap.localize(&roots(&[&a]), &[], &[], &taint);
        assert_eq!(localized, heap);
    }

    #[test]
    fn with_arrays() {
        let interners = Interners::new();
        let (heap, _) = cyclic_heap(&interners);
        let replaced = heap.with_arrays(Arrays::new());
        assert_eq!(replaced.instances(), heap.instances());
        assert!(replaced.arrays().is_empty());
    }
}
