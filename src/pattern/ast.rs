//! Pattern syntax tree and the destructuring it drives.

use std::fmt;

use crate::value::Value;

/// A compiled pattern.
///
/// # Examples
///
/// ```rust
/// use bilby::pattern::{self, Pattern};
///
/// let pattern = pattern::parse("Cons(head, _)").unwrap();
/// assert_eq!(
///     pattern,
///     Pattern::Constructor {
///         path: vec!["Cons".to_string()],
///         arguments: vec![Pattern::Identifier("head".to_string()), Pattern::Wildcard],
///     }
/// );
/// assert_eq!(pattern.binding_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Matches anything and binds it.
    Identifier(String),
    /// Matches anything and binds nothing.
    Wildcard,
    /// Matches a tagged instance whose case key (or product name) is the
    /// last segment of `path` and whose fields match `arguments`.
    Constructor {
        /// Name segments; only the last one takes part in matching.
        path: Vec<String>,
        /// One sub-pattern per field.
        arguments: Vec<Self>,
    },
    /// Matches values structurally equal to the literal.
    Literal(Value),
}

impl Pattern {
    /// Returns the number of values a successful match binds.
    pub fn binding_count(&self) -> usize {
        match self {
            Self::Identifier(_) => 1,
            Self::Wildcard | Self::Literal(_) => 0,
            Self::Constructor { arguments, .. } => arguments.iter().map(Self::binding_count).sum(),
        }
    }

    /// Matches `value`, returning the bound values in left-to-right order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bilby::{TaggedSum, Value};
    /// use bilby::pattern;
    ///
    /// let list = TaggedSum::new("List", [("Cons", vec!["head", "tail"]), ("Nil", vec![])]).unwrap();
    /// let nil = list.sentinel("Nil").unwrap();
    /// let value = list.construct("Cons", vec![Value::from(1), nil]).unwrap();
    ///
    /// let pattern = pattern::parse("Cons(x, Nil())").unwrap();
    /// assert_eq!(pattern.bind(&value), Some(vec![Value::from(1)]));
    /// assert_eq!(pattern::parse("Nil()").unwrap().bind(&value), None);
    /// ```
    pub fn bind(&self, value: &Value) -> Option<Vec<Value>> {
        let mut bindings = Vec::with_capacity(self.binding_count());
        self.destructure(value, &mut bindings).then_some(bindings)
    }

    fn destructure(&self, value: &Value, bindings: &mut Vec<Value>) -> bool {
        match self {
            Self::Identifier(_) => {
                bindings.push(value.clone());
                true
            }
            Self::Wildcard => true,
            Self::Literal(expected) => expected == value,
            Self::Constructor { path, arguments } => {
                let Some(instance) = value.as_tagged() else {
                    return false;
                };
                path.last().is_some_and(|name| name == instance.name())
                    && arguments.len() == instance.values().len()
                    && arguments
                        .iter()
                        .zip(instance.values())
                        .all(|(argument, field)| argument.destructure(field, bindings))
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => formatter.write_str(name),
            Self::Wildcard => formatter.write_str("_"),
            Self::Literal(value) => write!(formatter, "{value:?}"),
            Self::Constructor { path, arguments } => {
                write!(formatter, "{}(", path.join("."))?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{argument}")?;
                }
                formatter.write_str(")")
            }
        }
    }
}
