//! # bilby
//!
//! Tagged unions, predicate-dispatched environments and structural pattern
//! matching over dynamic values.
//!
//! ## Overview
//!
//! bilby brings the toolkit of a dynamically typed functional programming
//! library to Rust. Values are [`Value`]s; on top of them the crate
//! provides:
//!
//! - **Tagged values**: [`TaggedProduct`] records and [`TaggedSum`]
//!   discriminated unions with case analysis through [`Cases`]
//! - **Dispatch environments**: persistent [`Environment`]s that resolve a
//!   method name to the first registered overload whose predicate accepts
//!   the arguments, and the single-slot [`Partial`]
//! - **Structural matching**: textual patterns such as
//!   `"Cons(a, Cons(b, _))"` compiled into a [`Matcher`]
//! - **Builtins**: a standard environment with `equal`, `concat`, `map`,
//!   `fold` and friends
//!
//! ## Feature Flags
//!
//! - `environment`: dispatch environments and partial functions
//! - `pattern`: the structural matcher (pulls in `json`)
//! - `builtins`: the standard environment
//! - `json`: conversion from `serde_json::Value`
//! - `serde`: `Serialize` for [`Value`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use bilby::prelude::*;
//!
//! let option = TaggedSum::new("Option", [("Some", vec!["value"]), ("None", vec![])]).unwrap();
//! let some = option.construct("Some", vec![Value::from(5)]).unwrap();
//!
//! let environment = Environment::new()
//!     .method("get_or", predicate::is_case(&option, "Some"), |_, arguments| {
//!         Ok(arguments[0].as_tagged().unwrap().values()[0].clone())
//!     })
//!     .unwrap()
//!     .method("get_or", predicate::always(), |_, arguments| Ok(arguments[1].clone()))
//!     .unwrap();
//!
//! let none = option.sentinel("None").unwrap();
//! assert_eq!(environment.call("get_or", &[some, Value::from(0)]).unwrap(), Value::from(5));
//! assert_eq!(environment.call("get_or", &[none, Value::from(0)]).unwrap(), Value::from(0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use bilby::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::tagged::*;
    pub use crate::value::{Function, Value};

    #[cfg(feature = "environment")]
    pub use crate::environment::{Environment, Partial, Predicate, predicate};

    #[cfg(feature = "pattern")]
    pub use crate::pattern::{Matcher, Pattern};
}

mod error;
pub mod tagged;
pub mod value;

#[cfg(feature = "environment")]
pub mod environment;

#[cfg(feature = "pattern")]
pub mod pattern;

#[cfg(feature = "builtins")]
pub mod builtins;

pub use error::{BindingKind, Error, ErrorKind, Result};
pub use tagged::{CaseConstructor, CaseEntry, CaseTable, Cases, TaggedInstance, TaggedProduct, TaggedSum};
pub use value::{Function, Value};

#[cfg(feature = "environment")]
pub use environment::{Environment, Partial, Predicate};

#[cfg(feature = "pattern")]
pub use pattern::Matcher;
