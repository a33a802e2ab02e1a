//! Dynamic values.
//!
//! Every piece of bilby operates on [`Value`], a cheaply clonable dynamic
//! value. Compound values are reference counted with [`Arc`], so cloning a
//! value never copies its contents and values can be shared freely between
//! threads.
//!
//! # Examples
//!
//! ```rust
//! use bilby::Value;
//!
//! let numbers = Value::from(vec![Value::from(1), Value::from(2)]);
//! assert_eq!(numbers.to_string(), "[1, 2]");
//! assert_eq!(numbers.type_name(), "array");
//!
//! let greeting = Value::from("hello");
//! assert_eq!(greeting.as_str(), Some("hello"));
//! ```

mod function;
#[cfg(feature = "json")]
mod json;
#[cfg(feature = "serde")]
mod serialize;
mod traverse;

use std::collections::BTreeMap;
use std::fmt;
use std::slice;
use std::sync::Arc;

pub use function::Function;
pub(crate) use traverse::{Piece, equal_all, render};

use crate::error::{Error, Result};
use crate::tagged::TaggedInstance;

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Boolean(bool),
    /// A double precision number.
    Number(f64),
    /// An immutable string.
    String(Arc<str>),
    /// An ordered sequence of values.
    Array(Arc<Vec<Value>>),
    /// A string-keyed record, iterated in key order.
    Object(Arc<BTreeMap<String, Value>>),
    /// An instance of a tagged product or a tagged sum case.
    Tagged(Arc<TaggedInstance>),
    /// A first-class callable.
    Function(Function),
}

impl Value {
    /// Builds an object value from key/value pairs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bilby::Value;
    ///
    /// let point = Value::object([("x", Value::from(1)), ("y", Value::from(2))]);
    /// assert_eq!(point.to_string(), "{x: 1, y: 2}");
    /// ```
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(Arc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }

    /// Returns a short name for the kind of this value.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Tagged(_) => "tagged",
            Self::Function(_) => "function",
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean if this is a [`Value::Boolean`].
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the entries if this is a [`Value::Object`].
    pub fn as_object(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the instance if this is a [`Value::Tagged`].
    pub fn as_tagged(&self) -> Option<&TaggedInstance> {
        match self {
            Self::Tagged(instance) => Some(instance),
            _ => None,
        }
    }

    /// Returns the callable if this is a [`Value::Function`].
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Extracts a number or reports a type error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] when the value is not a number.
    pub fn expect_number(&self) -> Result<f64> {
        self.as_number().ok_or(Error::Type {
            expected: "number",
            actual: self.type_name(),
        })
    }

    /// Extracts a callable or reports a type error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] when the value is not a function.
    pub fn expect_function(&self) -> Result<&Function> {
        self.as_function().ok_or(Error::Type {
            expected: "function",
            actual: self.type_name(),
        })
    }

    /// Extracts array elements or reports a type error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] when the value is not an array.
    pub fn expect_array(&self) -> Result<&[Self]> {
        self.as_array().ok_or(Error::Type {
            expected: "array",
            actual: self.type_name(),
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        equal_all(slice::from_ref(self), slice::from_ref(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(formatter, Piece::Value(self))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => write!(formatter, "{text:?}"),
            Self::Array(elements) => formatter.debug_list().entries(elements.iter()).finish(),
            Self::Object(entries) => formatter.debug_map().entries(entries.iter()).finish(),
            other => write!(formatter, "{other}"),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Boolean(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

macro_rules! impl_from_lossless_number {
    ($($number:ty),*) => {
        $(
            impl From<$number> for Value {
                fn from(number: $number) -> Self {
                    Self::Number(f64::from(number))
                }
            }
        )*
    };
}

impl_from_lossless_number!(i8, i16, i32, u8, u16, u32, f32);

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::Array(Arc::new(elements))
    }
}

impl From<TaggedInstance> for Value {
    fn from(instance: TaggedInstance) -> Self {
        Self::Tagged(Arc::new(instance))
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::Array(Arc::new(iterator.into_iter().collect()))
    }
}
