//! Persistent registration log backing [`Environment`](super::Environment).
//!
//! The log is a cons list with the newest registration at the head. Adding a
//! registration allocates one node and shares every older node with the
//! previous generation:
//!
//! ```text
//! generation 1: f#1 -> nil
//! generation 2: f#2 -> [f#1 -> nil]          // shares [f#1] with generation 1
//! generation 3: a   -> [f#2 -> f#1 -> nil]   // shares [f#2, f#1] with generation 2
//! ```

use std::sync::Arc;

use super::{Implementation, Predicate};
use crate::error::BindingKind;
use crate::value::Value;

/// A predicate paired with the implementation it guards.
#[derive(Clone)]
pub(crate) struct Overload {
    pub(crate) predicate: Predicate,
    pub(crate) implementation: Implementation,
}

/// What a registered name is bound to.
#[derive(Clone)]
pub(crate) enum Binding {
    /// Every overload of the method up to and including this registration,
    /// oldest first. The last entry is the one this registration added.
    Method(Arc<[Overload]>),
    Property(Value),
}

impl Binding {
    pub(crate) const fn kind(&self) -> BindingKind {
        match self {
            Self::Method(_) => BindingKind::Method,
            Self::Property(_) => BindingKind::Property,
        }
    }
}

/// One registration: a name and its binding.
#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) name: Arc<str>,
    pub(crate) binding: Binding,
}

struct Node {
    registration: Registration,
    next: Option<Arc<Self>>,
}

/// Immutable cons list of registrations, newest first.
#[derive(Clone, Default)]
pub(crate) struct Registry {
    head: Option<Arc<Node>>,
    length: usize,
}

impl Registry {
    pub(crate) const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Returns a new log with `registration` in front, sharing `self`.
    pub(crate) fn cons(&self, registration: Registration) -> Self {
        Self {
            head: Some(Arc::new(Node {
                registration,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    /// Iterates newest first.
    pub(crate) fn iter(&self) -> RegistryIterator<'_> {
        RegistryIterator {
            current: self.head.as_ref(),
        }
    }

    /// Collects the registrations oldest first.
    pub(crate) fn oldest_first(&self) -> Vec<&Registration> {
        let mut registrations: Vec<&Registration> = self.iter().collect();
        registrations.reverse();
        registrations
    }
}

impl Drop for Registry {
    // Unlink uniquely owned nodes one at a time so long logs do not
    // recurse through every `Arc<Node>` on drop.
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            match Arc::try_unwrap(node) {
                Ok(mut node) => current = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

pub(crate) struct RegistryIterator<'a> {
    current: Option<&'a Arc<Node>>,
}

impl<'a> Iterator for RegistryIterator<'a> {
    type Item = &'a Registration;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            &node.registration
        })
    }
}
