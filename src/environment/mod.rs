//! Predicate-dispatched environments.
//!
//! An [`Environment`] maps names either to *methods* (ordered lists of
//! predicate/implementation overloads) or to *properties* (plain values).
//! Environments are persistent: [`Environment::method`] and
//! [`Environment::property`] return a new generation and leave the receiver
//! untouched, sharing every older registration with it.
//!
//! Calling a method tries its overloads oldest first and commits to the first
//! one whose predicate accepts the arguments. A general predicate registered
//! before a specific one shadows it, so catch-alls belong last.
//!
//! [`Partial`] is the single-method flavor of the same mechanism.
//!
//! # Examples
//!
//! ```rust
//! use bilby::{Environment, ErrorKind, Value};
//! use bilby::environment::predicate;
//!
//! let environment = Environment::new()
//!     .method("f", predicate::is_number(), |_, arguments| {
//!         Ok(Value::from(arguments[0].expect_number()? + 1.0))
//!     })
//!     .unwrap()
//!     .method("f", predicate::is_string(), |_, arguments| {
//!         Ok(Value::from(format!("{}!", arguments[0])))
//!     })
//!     .unwrap();
//!
//! assert_eq!(environment.call("f", &[Value::from(3)]).unwrap(), Value::from(4));
//! assert_eq!(environment.call("f", &[Value::from("hi")]).unwrap(), Value::from("hi!"));
//!
//! let error = environment.call("f", &[Value::from(true)]).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::DispatchMiss);
//! ```

mod partial;
pub mod predicate;
mod registry;

use std::sync::Arc;

pub use partial::Partial;
pub use predicate::Predicate;

use registry::{Binding, Overload, Registration, Registry};

use crate::error::{BindingKind, Error, Result};
use crate::value::{Function, Value};

/// Implementation half of a method overload. The first argument is the
/// environment the call was made on.
pub(crate) type Implementation =
    Arc<dyn Fn(&Environment, &[Value]) -> Result<Value> + Send + Sync>;

/// A persistent registry of predicate-dispatched methods and properties.
///
/// Each registration produces a new generation; earlier generations remain
/// valid and unchanged. Generations are immutable, so an environment can be
/// shared across threads and call sites without locking.
#[derive(Clone, Default)]
pub struct Environment {
    registry: Registry,
}

impl Environment {
    /// Creates the empty environment.
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Returns a new generation with one more overload for `name`.
    ///
    /// The implementation receives the environment the call is made on, so it
    /// can call other methods of the same environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] when `name` is already a property.
    pub fn method<F>(&self, name: &str, predicate: Predicate, implementation: F) -> Result<Self>
    where
        F: Fn(&Self, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.check(name, BindingKind::Method)?;
        let overload = Overload {
            predicate,
            implementation: Arc::new(implementation),
        };
        Ok(self.push(name, Binding::Method(self.overloads_after(name, overload))))
    }

    /// Returns a new generation with `name` bound to `value`.
    ///
    /// Re-binding an existing property is allowed; the newest value wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] when `name` is already a method.
    pub fn property(&self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.check(name, BindingKind::Property)?;
        Ok(self.push(name, Binding::Property(value.into())))
    }

    /// Replays every registration of `other`, oldest first, on top of
    /// `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] when a name is a method in one
    /// environment and a property in the other.
    pub fn concat(&self, other: &Self) -> Result<Self> {
        let mut environment = self.clone();
        for registration in other.registry.oldest_first() {
            let name = &*registration.name;
            environment.check(name, registration.binding.kind())?;
            environment = match &registration.binding {
                Binding::Method(overloads) => match overloads.last() {
                    Some(added) => {
                        let overloads = environment.overloads_after(name, added.clone());
                        environment.push(name, Binding::Method(overloads))
                    }
                    None => environment,
                },
                Binding::Property(value) => {
                    environment.push(name, Binding::Property(value.clone()))
                }
            };
        }
        Ok(environment)
    }

    fn check(&self, name: &str, kind: BindingKind) -> Result<()> {
        match self.lookup(name).map(Binding::kind) {
            Some(existing) if existing != kind => Err(Error::Conflict {
                name: name.to_string(),
                existing,
            }),
            _ => Ok(()),
        }
    }

    fn push(&self, name: &str, binding: Binding) -> Self {
        tracing::debug!(
            name,
            kind = %binding.kind(),
            generation = self.registry.len() + 1,
            "extended environment"
        );
        Self {
            registry: self.registry.cons(Registration {
                name: Arc::from(name),
                binding,
            }),
        }
    }

    /// The newest binding of `name`.
    fn lookup(&self, name: &str) -> Option<&Binding> {
        self.registry
            .iter()
            .find(|registration| &*registration.name == name)
            .map(|registration| &registration.binding)
    }

    /// The overloads of `name` with `overload` appended, oldest first.
    fn overloads_after(&self, name: &str, overload: Overload) -> Arc<[Overload]> {
        let previous: &[Overload] = match self.lookup(name) {
            Some(Binding::Method(overloads)) => &overloads[..],
            _ => &[],
        };
        previous
            .iter()
            .cloned()
            .chain(std::iter::once(overload))
            .collect()
    }

    fn resolve(&self, name: &str, arguments: &[Value]) -> Option<(usize, &Overload)> {
        match self.lookup(name)? {
            Binding::Method(overloads) => select(overloads, arguments),
            Binding::Property(_) => None,
        }
    }

    /// Calls `name` with `arguments`.
    ///
    /// For a method, the first overload (in registration order) whose
    /// predicate accepts `arguments` is invoked with `self` as receiver. For a
    /// property holding a [`Function`], the function is invoked.
    ///
    /// # Errors
    ///
    /// - [`Error::NotImplemented`] when no overload accepts the arguments
    /// - [`Error::NotCallable`] when `name` is a non-function property
    /// - [`Error::Undefined`] when `name` is unbound
    /// - any error returned by the selected implementation
    pub fn call(&self, name: &str, arguments: &[Value]) -> Result<Value> {
        match self.lookup(name) {
            Some(Binding::Method(overloads)) => {
                let (index, overload) =
                    select(overloads, arguments).ok_or_else(|| Error::NotImplemented {
                        name: name.to_string(),
                    })?;
                tracing::trace!(name, overload = index, "dispatched method");
                (overload.implementation)(self, arguments)
            }
            Some(Binding::Property(Value::Function(function))) => function.call(arguments),
            Some(Binding::Property(_)) => Err(Error::NotCallable {
                name: name.to_string(),
            }),
            None => Err(Error::Undefined {
                name: name.to_string(),
            }),
        }
    }

    /// Returns `true` if some overload of `name` accepts `arguments`.
    ///
    /// No implementation is invoked.
    pub fn is_defined_at(&self, name: &str, arguments: &[Value]) -> bool {
        self.resolve(name, arguments).is_some()
    }

    /// Returns the current value of the property `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.lookup(name)? {
            Binding::Property(value) => Some(value),
            Binding::Method(_) => None,
        }
    }

    /// Returns the dispatcher for `name` as a first-class [`Function`] bound
    /// to this generation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bilby::{Environment, Value};
    /// use bilby::environment::predicate;
    ///
    /// let environment = Environment::new()
    ///     .method("negate", predicate::is_number(), |_, arguments| {
    ///         Ok(Value::from(-arguments[0].expect_number()?))
    ///     })
    ///     .unwrap();
    /// let negate = environment.method_function("negate").unwrap();
    /// assert_eq!(negate.call(&[Value::from(2)]).unwrap(), Value::from(-2));
    /// ```
    pub fn method_function(&self, name: &str) -> Option<Function> {
        if !self.has_method(name) {
            return None;
        }
        let environment = self.clone();
        let method = name.to_string();
        Some(Function::new(name, move |arguments| {
            environment.call(&method, arguments)
        }))
    }

    /// Returns `true` if `name` is bound as a method.
    pub fn has_method(&self, name: &str) -> bool {
        matches!(self.lookup(name), Some(Binding::Method(_)))
    }

    /// Returns `true` if `name` is bound as a property.
    pub fn has_property(&self, name: &str) -> bool {
        matches!(self.lookup(name), Some(Binding::Property(_)))
    }

    /// Returns every bound name once, in order of first registration.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for registration in self.registry.oldest_first() {
            if !names.contains(&&*registration.name) {
                names.push(&registration.name);
            }
        }
        names
    }

    /// Returns the number of registrations behind this generation.
    pub const fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` for the empty environment.
    pub const fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }
}

/// The first overload accepting `arguments`, with its position.
fn select<'a>(overloads: &'a [Overload], arguments: &[Value]) -> Option<(usize, &'a Overload)> {
    overloads
        .iter()
        .enumerate()
        .find(|(_, overload)| overload.predicate.test(arguments))
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Environment")
            .field("names", &self.names())
            .field("generation", &self.len())
            .finish()
    }
}
