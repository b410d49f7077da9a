use crate::Error;
use serde::Serialize;
use std::fmt;

/// A method, as resolved by the front-end.
///
/// Methods are ordered by their signature, which has the form
/// `<class: return_type name(parameter,parameter)>`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Method {
    signature: String,
    class: String,
    name: String,
    parameters: Vec<String>,
    return_type: String,
}

impl Method {
    /// Create a new `Method`.
    ///
    /// * `class` - The fully qualified name of the declaring class.
    /// * `name` - The name of the method.
    /// * `parameters` - The types of the formal parameters, in order.
    /// * `return_type` - The return type of the method.
    pub fn new<C, N, R>(
        class: C,
        name: N,
        parameters: Vec<String>,
        return_type: R,
    ) -> Result<Method, Error>
    where
        C: Into<String>,
        N: Into<String>,
        R: Into<String>,
    {
        let class = class.into();
        let name = name.into();
        let return_type = return_type.into();

        if class.is_empty() {
            return Err(Error::malformed("method", "declaring class is empty"));
        }
        if name.is_empty() {
            return Err(Error::malformed(
                "method",
                format!("method name in {} is empty", class),
            ));
        }
        if let Some(index) = parameters.iter().position(|p| p.is_empty()) {
            return Err(Error::malformed(
                "method",
                format!("type of parameter {} of {}.{} is empty", index, class, name),
            ));
        }

        let signature = format!(
            "<{}: {} {}({})>",
            class,
            return_type,
            name,
            parameters.join(",")
        );

        Ok(Method {
            signature,
            class,
            name,
            parameters,
            return_type,
        })
    }

    /// The canonical signature of this method.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The types of this method's formal parameters.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// The number of formal parameters, not counting the receiver.
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.signature)
    }
}

#[test]
fn method_signature() {
    let method = Method::new(
        "com.example.Foo",
        "bar",
        vec!["int".to_string(), "java.lang.String".to_string()],
        "void",
    )
    .unwrap();
    assert_eq!(
        method.signature(),
        "<com.example.Foo: void bar(int,java.lang.String)>"
    );
    assert_eq!(method.arity(), 2);
}

#[test]
fn method_malformed() {
    assert!(Method::new("", "bar", Vec::new(), "void").is_err());
    assert!(Method::new("com.example.Foo", "", Vec::new(), "void").is_err());
    assert!(Method::new("com.example.Foo", "bar", vec![String::new()], "void").is_err());
}
