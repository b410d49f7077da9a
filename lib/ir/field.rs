use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field, either an instance field or a static field.
///
/// Fields are ordered by their signature, `<class: type name>`. A
/// deserialized `Field` is validated like one built with `Field::new`, and its
/// signature is rebuilt from its parts.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "FieldDescriptor")]
pub struct Field {
    signature: String,
    class: String,
    name: String,
    type_: String,
}

impl Field {
    /// Create a new `Field` declared in `class` with the given type and name.
    pub fn new<C, T, N>(class: C, type_: T, name: N) -> Result<Field, Error>
    where
        C: Into<String>,
        T: Into<String>,
        N: Into<String>,
    {
        let class = class.into();
        let type_ = type_.into();
        let name = name.into();

        if class.is_empty() {
            return Err(Error::malformed("field", "declaring class is empty"));
        }
        if name.is_empty() {
            return Err(Error::malformed(
                "field",
                format!("field name in {} is empty", class),
            ));
        }

        let signature = format!("<{}: {} {}>", class, type_, name);

        Ok(Field {
            signature,
            class,
            name,
            type_,
        })
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// The parts of a `Field`, as written in json.
#[derive(Debug, Deserialize)]
pub(crate) struct FieldDescriptor {
    class: String,
    type_: String,
    name: String,
}

impl TryFrom<FieldDescriptor> for Field {
    type Error = Error;

    fn try_from(descriptor: FieldDescriptor) -> Result<Field, Error> {
        Field::new(descriptor.class, descriptor.type_, descriptor.name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.signature)
    }
}

#[test]
fn field_deserialize_validates() {
    let malformed = r#"{"signature": "<java.lang.Object: double taint>", "class": "", "name": "", "type_": ""}"#;
    assert!(serde_json::from_str::<Field>(malformed).is_err());

    let stale = r#"{"signature": "<stale>", "class": "java.lang.Object", "type_": "double", "name": "taint"}"#;
    let field: Field = serde_json::from_str(stale).unwrap();
    assert_eq!(field, Field::new("java.lang.Object", "double", "taint").unwrap());
    assert_eq!(field.signature(), "<java.lang.Object: double taint>");

    let written = serde_json::to_string(&field).unwrap();
    assert_eq!(serde_json::from_str::<Field>(&written).unwrap(), field);
}
