//! Immutable instances of tagged products and sum cases.

use std::fmt;
use std::sync::Arc;

use super::cases::Cases;
use super::product::Shape;
use super::sum::CaseTable;
use crate::error::{Error, Result};
use crate::value::{Piece, Value, equal_all, render};

/// Where an instance came from.
#[derive(Debug, Clone)]
pub(crate) enum Origin {
    /// Built by a [`TaggedProduct`](super::TaggedProduct).
    Product(Arc<Shape>),
    /// Built from one case of a [`TaggedSum`](super::TaggedSum).
    Case {
        table: Arc<CaseTable>,
        index: usize,
    },
}

impl Origin {
    fn shape(&self) -> &Shape {
        match self {
            Self::Product(shape) => shape,
            Self::Case { table, index } => table.shape(*index),
        }
    }

    fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Product(left), Self::Product(right)) => Arc::ptr_eq(left, right),
            (
                Self::Case {
                    table: left_table,
                    index: left_index,
                },
                Self::Case {
                    table: right_table,
                    index: right_index,
                },
            ) => Arc::ptr_eq(left_table, right_table) && left_index == right_index,
            _ => false,
        }
    }
}

/// An immutable value built by a tagged constructor.
///
/// Instances know their type (or case) and keep their field values in
/// declaration order. Sum instances also carry a reference to the case
/// table of the sum they belong to, which lets code inspect sibling cases
/// without holding on to the [`TaggedSum`](super::TaggedSum) itself.
///
/// # Examples
///
/// ```rust
/// use bilby::{Cases, TaggedSum, Value};
///
/// let option = TaggedSum::new("Option", [("Some", vec!["value"]), ("None", vec![])]).unwrap();
/// let some = option.construct("Some", vec![Value::from(5)]).unwrap();
///
/// let cases = Cases::new()
///     .on("Some", |values| Ok(Value::from(values[0].expect_number()? + 1.0)))
///     .on("None", |_| Ok(Value::from(0)));
/// let result = some.as_tagged().unwrap().match_with(&cases).unwrap();
/// assert_eq!(result, Value::from(6));
/// ```
#[derive(Debug, Clone)]
pub struct TaggedInstance {
    origin: Origin,
    values: Vec<Value>,
}

impl TaggedInstance {
    pub(crate) const fn new(origin: Origin, values: Vec<Value>) -> Self {
        Self { origin, values }
    }

    pub(crate) const fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Returns the product name, or the case key for sum instances.
    pub fn name(&self) -> &str {
        &self.origin.shape().name
    }

    /// Returns the product name, or the sum name for sum instances.
    pub fn type_name(&self) -> &str {
        match &self.origin {
            Origin::Product(shape) => &shape.name,
            Origin::Case { table, .. } => table.name(),
        }
    }

    /// Returns the case key if this instance belongs to a tagged sum.
    pub fn case_key(&self) -> Option<&str> {
        match &self.origin {
            Origin::Product(_) => None,
            Origin::Case { table, index } => Some(&table.shape(*index).name),
        }
    }

    /// Returns the case table of the owning sum, if any.
    pub fn case_table(&self) -> Option<&Arc<CaseTable>> {
        match &self.origin {
            Origin::Product(_) => None,
            Origin::Case { table, .. } => Some(table),
        }
    }

    /// Returns the field names in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.origin.shape().fields
    }

    /// Returns the field values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns `true` for a sum case without fields, which renders as its
    /// bare key.
    pub(crate) fn is_marker(&self) -> bool {
        self.case_key().is_some() && self.values.is_empty()
    }

    /// Returns `true` if both instances come from the same product, or the
    /// same case of the same sum.
    pub(crate) fn same_type(&self, other: &Self) -> bool {
        self.origin.same_type(&other.origin)
    }

    /// Looks up a field value by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields()
            .iter()
            .position(|name| name == field)
            .and_then(|index| self.values.get(index))
    }

    /// Collects every leaf field value, descending into nested tagged
    /// values, into one flat sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bilby::{TaggedProduct, Value};
    ///
    /// let pair = TaggedProduct::new("Pair", ["left", "right"]).unwrap();
    /// let inner = pair.construct(vec![Value::from(2), Value::from(3)]).unwrap();
    /// let outer = pair.construct(vec![Value::from(1), inner]).unwrap();
    ///
    /// let flat = outer.as_tagged().unwrap().to_array();
    /// assert_eq!(flat, vec![Value::from(1), Value::from(2), Value::from(3)]);
    /// ```
    pub fn to_array(&self) -> Vec<Value> {
        let mut collected = Vec::with_capacity(self.values.len());
        let mut pending: Vec<&Value> = self.values.iter().rev().collect();
        while let Some(value) = pending.pop() {
            match value {
                Value::Tagged(nested) => pending.extend(nested.values.iter().rev()),
                leaf => collected.push(leaf.clone()),
            }
        }
        collected
    }

    /// Calls the handler registered for this instance's case with the field
    /// values as positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCase`] when `cases` has no handler for this
    /// instance's case, or whatever the handler itself returns.
    pub fn match_with(&self, cases: &Cases) -> Result<Value> {
        let key = self.name();
        let handler = cases.handler(key).ok_or_else(|| Error::MissingCase {
            type_name: self.type_name().to_string(),
            case: key.to_string(),
        })?;
        handler.call(&self.values)
    }
}

impl PartialEq for TaggedInstance {
    fn eq(&self, other: &Self) -> bool {
        self.same_type(other) && equal_all(&self.values, &other.values)
    }
}

impl fmt::Display for TaggedInstance {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(formatter, Piece::Tagged(self))
    }
}

impl Drop for TaggedInstance {
    // Unlinks uniquely owned children one at a time so that dropping a long
    // list does not recurse once per element.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.values);
        while let Some(value) = pending.pop() {
            match value {
                Value::Tagged(instance) => {
                    if let Ok(mut instance) = Arc::try_unwrap(instance) {
                        pending.append(&mut instance.values);
                    }
                }
                Value::Array(elements) => {
                    if let Ok(mut elements) = Arc::try_unwrap(elements) {
                        pending.append(&mut elements);
                    }
                }
                Value::Object(entries) => {
                    if let Ok(entries) = Arc::try_unwrap(entries) {
                        pending.extend(entries.into_values());
                    }
                }
                _ => {}
            }
        }
    }
}
