//! Structural pattern matching over tagged values.
//!
//! Patterns are written as text and compiled once into a [`Matcher`]:
//!
//! - `name` binds the whole value
//! - `_` matches anything and binds nothing
//! - `Case(p1, ..., pn)` matches an instance of `Case` whose fields match
//!   `p1` to `pn`; `Sum.Case(...)` is accepted too, the qualifier is not
//!   checked
//! - `Case()` (or `Sum.Case`) matches a marker case. A bare `Nil` is an
//!   identifier, so `Cons(a, Nil)` matches any tail and binds it; write
//!   `Cons(a, Nil())` or `Cons(a, List.Nil)` to require the empty list.
//! - `42`, `'text'`, `true`, `null`, `[1, 2]`, `{"k": 1}` match by structural
//!   equality
//!
//! Arms are tried in order and the first match wins, the same policy the
//! [`Environment`](crate::Environment) applies to method overloads.
//!
//! # Examples
//!
//! ```rust
//! use bilby::{Function, Matcher, TaggedSum, Value};
//!
//! let option = TaggedSum::new("Option", [("Some", vec!["value"]), ("None", vec![])]).unwrap();
//! let describe = Matcher::compile([
//!     ("Some(0)", Function::constant(Value::from("zero"))),
//!     ("Some(n)", Function::identity()),
//!     ("None()", Function::constant(Value::from("nothing"))),
//! ])
//! .unwrap();
//!
//! let five = option.construct("Some", vec![Value::from(5)]).unwrap();
//! assert_eq!(describe.apply(&five).unwrap(), Value::from(5));
//! assert_eq!(describe.apply(&option.sentinel("None").unwrap()).unwrap(), Value::from("nothing"));
//! ```

mod ast;
mod matcher;
mod parser;

pub use ast::Pattern;
pub use matcher::Matcher;
pub use parser::{MAX_DEPTH, parse};
