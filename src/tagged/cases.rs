//! Case-indexed handler tables for [`TaggedInstance::match_with`].
//!
//! [`TaggedInstance::match_with`]: super::TaggedInstance::match_with

use std::collections::HashMap;

use crate::error::Result;
use crate::value::{Function, Value};

/// Handlers keyed by case key (or product name).
///
/// # Examples
///
/// ```rust
/// use bilby::{Cases, Value};
///
/// let cases = Cases::new()
///     .on("Some", |values| Ok(values[0].clone()))
///     .on("None", |_| Ok(Value::Null));
/// assert!(cases.contains("Some"));
/// assert!(!cases.contains("Other"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cases {
    handlers: HashMap<String, Function>,
}

impl Cases {
    /// Creates an empty handler table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the handler for `key`.
    #[must_use]
    pub fn on<F>(self, key: &str, handler: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.on_function(key, Function::new(key, handler))
    }

    /// Adds (or replaces) the handler for `key` from an existing function.
    #[must_use]
    pub fn on_function(mut self, key: &str, handler: Function) -> Self {
        self.handlers.insert(key.to_string(), handler);
        self
    }

    /// Returns `true` if a handler is registered for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub(crate) fn handler(&self, key: &str) -> Option<&Function> {
        self.handlers.get(key)
    }
}
