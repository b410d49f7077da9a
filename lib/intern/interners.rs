use crate::intern::{
    Address, AddressField, Context, Interner, MethodLocal, MethodParameter,
};
use crate::ir::{AllocSite, CallEdge, Field, Local, Method, Parameter};
use crate::Error;

/// The interning tables of one analysis session.
///
/// There is one table per key shape. `Interners` is `Send` and `Sync`, and is
/// meant to be shared by reference between everything which builds keys
/// during a session.
#[derive(Debug, Default)]
pub struct Interners {
    contexts: Interner<(CallEdge, CallEdge), Context>,
    addresses: Interner<AllocSite, Address>,
    address_fields: Interner<(Address, Field), AddressField>,
    locals: Interner<(Method, Local), MethodLocal>,
    parameters: Interner<(Method, Parameter), MethodParameter>,
}

impl Interners {
    /// Create a new set of empty interning tables.
    pub fn new() -> Interners {
        Interners::default()
    }

    /// Intern the calling context made of an entry edge and a call edge.
    pub fn context(&self, entry: &CallEdge, call: &CallEdge) -> Context {
        self.contexts
            .intern_with((entry.clone(), call.clone()), |(entry, call)| {
                Context::from_edges(entry.clone(), call.clone())
            })
    }

    /// Intern the address of an allocation site.
    pub fn address(&self, site: &AllocSite) -> Address {
        self.addresses
            .intern_with(site.clone(), |site| Address::from_site(site.clone()))
    }

    /// Intern a field of the objects at `address`.
    pub fn address_field(&self, address: &Address, field: &Field) -> AddressField {
        self.address_fields
            .intern_with((address.clone(), field.clone()), |(address, field)| {
                AddressField::from_parts(address.clone(), field.clone())
            })
    }

    /// Intern a local variable of `method`.
    pub fn local(&self, method: &Method, local: &Local) -> MethodLocal {
        self.locals
            .intern_with((method.clone(), local.clone()), |(method, local)| {
                MethodLocal::from_parts(method.clone(), local.clone())
            })
    }

    /// Intern a formal parameter of `method`.
    ///
    /// The parameter must exist on `method`, with the type `method` declares
    /// for it.
    pub fn parameter(
        &self,
        method: &Method,
        parameter: &Parameter,
    ) -> Result<MethodParameter, Error> {
        let declared = method
            .parameters()
            .get(parameter.index())
            .ok_or_else(|| Error::ParameterOutOfRange {
                method: method.signature().to_string(),
                index: parameter.index(),
                arity: method.arity(),
            })?;

        if declared != parameter.type_() {
            return Err(Error::ParameterType {
                method: method.signature().to_string(),
                index: parameter.index(),
                expected: declared.clone(),
                found: parameter.type_().to_string(),
            });
        }

        Ok(self
            .parameters
            .intern_with((method.clone(), parameter.clone()), |(method, parameter)| {
                MethodParameter::from_parts(method.clone(), parameter.clone())
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::Interners;
    use crate::ir::{AllocSite, CallEdge, Field, Local, Method, Parameter};

    fn method() -> Method {
        Method::new(
            "com.example.Foo",
            "bar",
            vec!["int".to_string(), "java.lang.Object".to_string()],
            "void",
        )
        .unwrap()
    }

    #[test]
    fn address_identity() {
        let interners = Interners::new();
        let site = AllocSite::new(1, "java.lang.Object", None).unwrap();
        let other = AllocSite::new(2, "java.lang.Object", None).unwrap();

        let a = interners.address(&site);
        let b = interners.address(&site.clone());
        let c = interners.address(&other);

        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&c));
        assert_ne!(a, c);
        assert_eq!(interners.addresses.len(), 2);
    }

    #[test]
    fn address_order() {
        let interners = Interners::new();
        let a = interners.address(&AllocSite::new(10, "A", None).unwrap());
        let b = interners.address(&AllocSite::new(9, "B", None).unwrap());
        // "AllocNode 10 ..." sorts before "AllocNode 9 ..."
        assert!(a < b);

        let field_x = Field::new("A", "int", "x").unwrap();
        let field_y = Field::new("A", "int", "y").unwrap();
        let ax = interners.address_field(&a, &field_x);
        let ay = interners.address_field(&a, &field_y);
        let bx = interners.address_field(&b, &field_x);
        assert!(ax < ay);
        assert!(ay < bx);
    }

    #[test]
    fn structural_keys() {
        let interners = Interners::new();
        let x = interners.local(&method(), &Local::new("x", "int").unwrap());
        let y = interners.local(&method(), &Local::new("x", "int").unwrap());
        assert!(x.ptr_eq(&y));

        let entry = CallEdge::entry(method());
        let context = interners.context(&entry, &entry.clone());
        assert!(context.ptr_eq(&interners.context(&entry, &entry)));
        assert_eq!(interners.contexts.len(), 1);
    }

    #[test]
    fn parameters() {
        let interners = Interners::new();
        let p0 = interners
            .parameter(&method(), &Parameter::new(0, "int"))
            .unwrap();
        let p0_again = interners
            .parameter(&method(), &Parameter::new(0, "int"))
            .unwrap();
        assert!(p0.ptr_eq(&p0_again));
        assert_eq!(p0.index(), 0);

        assert!(interners
            .parameter(&method(), &Parameter::new(2, "int"))
            .is_err());
        assert!(interners
            .parameter(&method(), &Parameter::new(1, "int"))
            .is_err());
    }
}
