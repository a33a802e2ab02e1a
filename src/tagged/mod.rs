//! Tagged products and tagged sums.
//!
//! This module provides the value-level algebraic data types every other
//! part of bilby builds on:
//!
//! - [`TaggedProduct`]: a named record with fixed, ordered fields
//! - [`TaggedSum`]: a named closed set of marker and product cases
//! - [`TaggedInstance`]: an immutable value built by either of the above
//! - [`Cases`]: a handler table for case analysis with
//!   [`TaggedInstance::match_with`]
//!
//! Types are defined once and are immutable afterwards. Instances are
//! immutable too; nothing mutates a field after construction.
//!
//! # Examples
//!
//! ```rust
//! use bilby::{Cases, TaggedSum, Value};
//!
//! let shape = TaggedSum::new(
//!     "Shape",
//!     [("Circle", vec!["radius"]), ("Rectangle", vec!["width", "height"])],
//! )
//! .unwrap();
//!
//! let area = Cases::new()
//!     .on("Circle", |values| {
//!         let radius = values[0].expect_number()?;
//!         Ok(Value::from(3.0 * radius * radius))
//!     })
//!     .on("Rectangle", |values| {
//!         Ok(Value::from(values[0].expect_number()? * values[1].expect_number()?))
//!     });
//!
//! let rectangle = shape.construct("Rectangle", vec![Value::from(2), Value::from(4)]).unwrap();
//! assert_eq!(rectangle.as_tagged().unwrap().match_with(&area).unwrap(), Value::from(8));
//! assert_eq!(rectangle.to_string(), "Rectangle(2, 4)");
//! ```

mod cases;
mod instance;
mod product;
mod sum;

pub use cases::Cases;
pub use instance::TaggedInstance;
pub use product::TaggedProduct;
pub use sum::{CaseConstructor, CaseEntry, CaseTable, TaggedSum};
