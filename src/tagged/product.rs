//! Named product types with fixed, ordered fields.

use std::collections::HashSet;
use std::sync::Arc;

use super::instance::{Origin, TaggedInstance};
use crate::error::{Error, Result};
use crate::value::{Function, Value};

/// Name and ordered field list shared by products and sum cases.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Shape {
    pub(crate) name: Arc<str>,
    pub(crate) fields: Vec<String>,
}

impl Shape {
    pub(crate) fn new<I>(name: &str, fields: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.as_str()) {
                return Err(Error::DuplicateField {
                    type_name: name.to_string(),
                    field: field.clone(),
                });
            }
        }
        Ok(Self {
            name: Arc::from(name),
            fields,
        })
    }

    pub(crate) fn check_arity(&self, actual: usize) -> Result<()> {
        if actual == self.fields.len() {
            Ok(())
        } else {
            Err(Error::Arity {
                type_name: self.name.to_string(),
                expected: self.fields.len(),
                actual,
            })
        }
    }
}

/// Constructor for a named record type with a fixed, ordered field list.
///
/// A `TaggedProduct` is defined once and then used to build any number of
/// immutable instances. Construction is positional and checks arity.
///
/// # Examples
///
/// ```rust
/// use bilby::{TaggedProduct, Value};
///
/// let tuple = TaggedProduct::new("Tuple2", ["_1", "_2"]).unwrap();
/// let pair = tuple.construct(vec![Value::from(1), Value::from(2)]).unwrap();
///
/// let instance = pair.as_tagged().unwrap();
/// assert_eq!(instance.get("_1"), Some(&Value::from(1)));
/// assert_eq!(instance.get("_2"), Some(&Value::from(2)));
/// assert_eq!(pair.to_string(), "Tuple2(1, 2)");
///
/// assert!(tuple.construct(vec![Value::from(1)]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TaggedProduct {
    shape: Arc<Shape>,
}

impl TaggedProduct {
    /// Defines a product type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateField`] when a field name appears twice.
    pub fn new<I>(name: &str, fields: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let shape = Shape::new(name, fields)?;
        tracing::debug!(name, fields = shape.fields.len(), "defined tagged product");
        Ok(Self {
            shape: Arc::new(shape),
        })
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.shape.name
    }

    /// Returns the declared field names in order.
    pub fn fields(&self) -> &[String] {
        &self.shape.fields
    }

    /// Builds an instance, binding `values` to the fields positionally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arity`] when `values.len()` differs from the field count.
    pub fn construct(&self, values: Vec<Value>) -> Result<Value> {
        self.shape.check_arity(values.len())?;
        Ok(Value::from(TaggedInstance::new(
            Origin::Product(Arc::clone(&self.shape)),
            values,
        )))
    }

    /// Exposes the constructor as a first-class [`Function`].
    pub fn to_function(&self) -> Function {
        let product = self.clone();
        Function::new(self.shape.name.clone(), move |arguments| {
            product.construct(arguments.to_vec())
        })
    }

    /// Returns `true` if `value` was built by this constructor.
    pub fn is_instance(&self, value: &Value) -> bool {
        value
            .as_tagged()
            .is_some_and(|instance| match instance.origin() {
                Origin::Product(shape) => Arc::ptr_eq(shape, &self.shape),
                Origin::Case { .. } => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    fn tuple() -> TaggedProduct {
        TaggedProduct::new("Tuple2", ["_1", "_2"]).unwrap()
    }

    #[rstest]
    fn test_fields_bound_in_order() {
        let value = tuple()
            .construct(vec![Value::from("a"), Value::from("b")])
            .unwrap();
        let instance = value.as_tagged().unwrap();
        assert_eq!(instance.values(), &[Value::from("a"), Value::from("b")]);
        assert_eq!(instance.fields(), &["_1".to_string(), "_2".to_string()]);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    fn test_wrong_arity_is_rejected(#[case] count: usize) {
        let values = vec![Value::Null; count];
        let error = tuple().construct(values).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Arity);
        assert_eq!(
            error,
            Error::Arity {
                type_name: "Tuple2".to_string(),
                expected: 2,
                actual: count,
            }
        );
    }

    #[rstest]
    fn test_duplicate_field_is_rejected() {
        let error = TaggedProduct::new("Point", ["x", "x"]).unwrap_err();
        assert_eq!(
            error,
            Error::DuplicateField {
                type_name: "Point".to_string(),
                field: "x".to_string(),
            }
        );
    }

    #[rstest]
    fn test_function_form_constructs_equal_instances() {
        let product = tuple();
        let direct = product
            .construct(vec![Value::from(1), Value::from(2)])
            .unwrap();
        let via_function = product
            .to_function()
            .call(&[Value::from(1), Value::from(2)])
            .unwrap();
        assert_eq!(direct, via_function);
    }

    #[rstest]
    fn test_is_instance_distinguishes_types_with_same_name() {
        let first = tuple();
        let second = tuple();
        let value = first
            .construct(vec![Value::from(1), Value::from(2)])
            .unwrap();
        assert!(first.is_instance(&value));
        assert!(!second.is_instance(&value));
    }

    #[rstest]
    fn test_zero_field_product() {
        let unit = TaggedProduct::new("Unit", Vec::<String>::new()).unwrap();
        let value = unit.construct(Vec::new()).unwrap();
        assert_eq!(value.to_string(), "Unit()");
    }
}
