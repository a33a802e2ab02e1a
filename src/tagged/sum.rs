//! Named sums of products (discriminated unions).

use std::collections::HashSet;
use std::sync::Arc;

use super::instance::{Origin, TaggedInstance};
use super::product::Shape;
use crate::error::{Error, Result};
use crate::value::{Function, Value};

/// The closed, ordered set of cases declared by a tagged sum.
///
/// Every sum instance holds a reference to the table of its sum.
#[derive(Debug)]
pub struct CaseTable {
    name: Arc<str>,
    cases: Vec<Shape>,
}

impl CaseTable {
    /// Returns the sum name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates over the case keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|shape| &*shape.name)
    }

    /// Returns the field names of the case `key`.
    pub fn fields(&self, key: &str) -> Option<&[String]> {
        self.index_of(key)
            .map(|index| self.cases[index].fields.as_slice())
    }

    /// Returns `true` if the sum declares the case `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Returns the number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns `true` if the sum declares no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.cases.iter().position(|shape| &*shape.name == key)
    }

    pub(crate) fn shape(&self, index: usize) -> &Shape {
        &self.cases[index]
    }
}

/// Constructor for one non-marker case of a tagged sum.
#[derive(Debug, Clone)]
pub struct CaseConstructor {
    table: Arc<CaseTable>,
    index: usize,
}

impl CaseConstructor {
    /// Returns the case key.
    pub fn key(&self) -> &str {
        &self.table.shape(self.index).name
    }

    /// Returns the case's field names.
    pub fn fields(&self) -> &[String] {
        &self.table.shape(self.index).fields
    }

    /// Builds an instance of this case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arity`] when `values.len()` differs from the field count.
    pub fn construct(&self, values: Vec<Value>) -> Result<Value> {
        self.table.shape(self.index).check_arity(values.len())?;
        Ok(Value::from(TaggedInstance::new(
            Origin::Case {
                table: Arc::clone(&self.table),
                index: self.index,
            },
            values,
        )))
    }

    /// Exposes the constructor as a first-class [`Function`].
    pub fn to_function(&self) -> Function {
        let constructor = self.clone();
        Function::new(self.key().to_string(), move |arguments| {
            constructor.construct(arguments.to_vec())
        })
    }
}

/// One entry of a tagged sum: a singleton for marker cases, a constructor
/// otherwise.
#[derive(Debug, Clone)]
pub enum CaseEntry {
    /// The single canonical instance of a zero-field case.
    Sentinel(Value),
    /// The constructor of a case with fields.
    Constructor(CaseConstructor),
}

/// A named, closed set of cases, each either a marker or a product.
///
/// Marker (zero-field) cases are singletons created when the sum is
/// defined; cases with fields are built through their constructors.
///
/// # Examples
///
/// ```rust
/// use bilby::{CaseEntry, Cases, TaggedSum, Value};
///
/// let option = TaggedSum::new("Option", [("Some", vec!["value"]), ("None", vec![])]).unwrap();
///
/// let none = option.sentinel("None").unwrap();
/// assert_eq!(none.to_string(), "None");
///
/// let cases = Cases::new()
///     .on("Some", |_| Err(bilby::Error::custom("unreachable")))
///     .on("None", |_| Ok(Value::from(-1)));
/// assert_eq!(none.as_tagged().unwrap().match_with(&cases).unwrap(), Value::from(-1));
///
/// assert!(matches!(option.get("Some"), Some(CaseEntry::Constructor(_))));
/// ```
#[derive(Debug, Clone)]
pub struct TaggedSum {
    table: Arc<CaseTable>,
    entries: Vec<CaseEntry>,
}

impl TaggedSum {
    /// Defines a tagged sum from `(case key, field names)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateCase`] when a case key repeats, or
    /// [`Error::DuplicateField`] when a case repeats a field name.
    pub fn new<I, K, F>(name: &str, cases: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut shapes = Vec::new();
        for (key, fields) in cases {
            let key = key.into();
            if !seen.insert(key.clone()) {
                return Err(Error::DuplicateCase {
                    type_name: name.to_string(),
                    case: key,
                });
            }
            shapes.push(Shape::new(&key, fields)?);
        }

        let table = Arc::new(CaseTable {
            name: Arc::from(name),
            cases: shapes,
        });
        let entries = (0..table.len())
            .map(|index| {
                if table.shape(index).fields.is_empty() {
                    CaseEntry::Sentinel(Value::from(TaggedInstance::new(
                        Origin::Case {
                            table: Arc::clone(&table),
                            index,
                        },
                        Vec::new(),
                    )))
                } else {
                    CaseEntry::Constructor(CaseConstructor {
                        table: Arc::clone(&table),
                        index,
                    })
                }
            })
            .collect();

        tracing::debug!(name, cases = table.len(), "defined tagged sum");
        Ok(Self { table, entries })
    }

    /// Returns the sum name.
    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// Returns the shared case table.
    pub const fn table(&self) -> &Arc<CaseTable> {
        &self.table
    }

    /// Iterates over the case keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys()
    }

    /// Returns the entry for `key`.
    pub fn get(&self, key: &str) -> Option<&CaseEntry> {
        self.table.index_of(key).map(|index| &self.entries[index])
    }

    /// Returns the singleton of the marker case `key`.
    ///
    /// Returns `None` when `key` is unknown or has fields.
    pub fn sentinel(&self, key: &str) -> Option<Value> {
        match self.get(key)? {
            CaseEntry::Sentinel(value) => Some(value.clone()),
            CaseEntry::Constructor(_) => None,
        }
    }

    /// Returns the constructor of the case `key`.
    ///
    /// Returns `None` when `key` is unknown or is a marker case.
    pub fn constructor(&self, key: &str) -> Option<&CaseConstructor> {
        match self.get(key)? {
            CaseEntry::Constructor(constructor) => Some(constructor),
            CaseEntry::Sentinel(_) => None,
        }
    }

    /// Builds a value of case `key`. Marker cases accept no values and
    /// yield their singleton.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCase`] for undeclared keys and
    /// [`Error::Arity`] when the value count does not fit the case.
    pub fn construct(&self, key: &str, values: Vec<Value>) -> Result<Value> {
        match self.get(key) {
            Some(CaseEntry::Constructor(constructor)) => constructor.construct(values),
            Some(CaseEntry::Sentinel(sentinel)) => {
                if values.is_empty() {
                    Ok(sentinel.clone())
                } else {
                    Err(Error::Arity {
                        type_name: key.to_string(),
                        expected: 0,
                        actual: values.len(),
                    })
                }
            }
            None => Err(Error::UnknownCase {
                type_name: self.name().to_string(),
                case: key.to_string(),
            }),
        }
    }

    /// Returns `true` if `value` is an instance of any case of this sum.
    pub fn is_member(&self, value: &Value) -> bool {
        value
            .as_tagged()
            .and_then(TaggedInstance::case_table)
            .is_some_and(|table| Arc::ptr_eq(table, &self.table))
    }

    /// Returns `true` if `value` is an instance of the case `key` of this sum.
    pub fn is_case(&self, value: &Value, key: &str) -> bool {
        self.is_member(value)
            && value
                .as_tagged()
                .is_some_and(|instance| instance.name() == key)
    }
}
