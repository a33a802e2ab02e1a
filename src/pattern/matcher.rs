//! Compiled pattern-to-handler tables.

use super::ast::Pattern;
use super::parser::parse;
use crate::error::{Error, Result};
use crate::value::{Function, Value};

#[derive(Debug, Clone)]
struct Arm {
    source: String,
    pattern: Pattern,
    handler: Function,
}

/// An ordered list of patterns, each paired with a handler.
///
/// Patterns are parsed once, at compile time. Applying the matcher tries the
/// arms in order and calls the handler of the first pattern that matches,
/// passing the values bound by identifier sub-patterns as positional
/// arguments (left to right across the whole pattern).
///
/// # Examples
///
/// ```rust
/// use bilby::{Function, Matcher, TaggedSum, Value};
///
/// let list = TaggedSum::new("List", [("Cons", vec!["head", "tail"]), ("Nil", vec![])]).unwrap();
/// let nil = list.sentinel("Nil").unwrap();
/// let cons = |head: i32, tail: Value| list.construct("Cons", vec![Value::from(head), tail]).unwrap();
/// let value = cons(1, cons(2, nil));
///
/// let first_two = Matcher::new()
///     .arm("Cons(a, Cons(b, _))", |bindings| Ok(Value::from(bindings.to_vec())))
///     .unwrap()
///     .arm("_", |_| Ok(Value::Null))
///     .unwrap();
///
/// assert_eq!(
///     first_two.apply(&value).unwrap(),
///     Value::from(vec![Value::from(1), Value::from(2)])
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    arms: Vec<Arm>,
}

impl Matcher {
    /// Creates a matcher with no arms.
    pub const fn new() -> Self {
        Self { arms: Vec::new() }
    }

    /// Compiles `(pattern text, handler)` pairs, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternSyntax`] for the first pattern that does not
    /// parse.
    pub fn compile<I, S>(arms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Function)>,
        S: AsRef<str>,
    {
        let arms = arms
            .into_iter()
            .map(|(source, handler)| {
                let source = source.as_ref();
                parse(source).map(|pattern| Arm {
                    source: source.to_string(),
                    pattern,
                    handler,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(arms = arms.len(), "compiled matcher");
        Ok(Self { arms })
    }

    /// Appends an arm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternSyntax`] when `source` does not parse.
    pub fn arm<F>(mut self, source: &str, handler: F) -> Result<Self>
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let pattern = parse(source)?;
        self.arms.push(Arm {
            source: source.to_string(),
            pattern,
            handler: Function::new(source, handler),
        });
        Ok(self)
    }

    /// Calls the handler of the first arm whose pattern matches `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatch`] when no arm matches, or whatever the
    /// selected handler returns.
    pub fn apply(&self, value: &Value) -> Result<Value> {
        for (index, arm) in self.arms.iter().enumerate() {
            if let Some(bindings) = arm.pattern.bind(value) {
                tracing::trace!(arm = index, pattern = %arm.source, "pattern matched");
                return arm.handler.call(&bindings);
            }
        }
        Err(Error::NoMatch {
            value: value.to_string(),
        })
    }

    /// Returns `true` if some arm matches `value`. No handler is invoked.
    pub fn matches(&self, value: &Value) -> bool {
        self.arms.iter().any(|arm| arm.pattern.bind(value).is_some())
    }

    /// Iterates over the pattern sources in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.arms.iter().map(|arm| arm.source.as_str())
    }

    /// Returns the number of arms.
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// Returns `true` if the matcher has no arms.
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Exposes the matcher as a first-class [`Function`] of one argument.
    pub fn to_function(&self) -> Function {
        let matcher = self.clone();
        Function::new("matcher", move |arguments| {
            matcher.apply(arguments.first().unwrap_or(&Value::Null))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::tagged::TaggedSum;
    use rstest::rstest;

    fn label(text: &'static str) -> Function {
        Function::constant(Value::from(text))
    }

    fn option() -> TaggedSum {
        TaggedSum::new("Option", [("Some", vec!["value"]), ("None", vec![])]).unwrap()
    }

    #[rstest]
    fn test_first_matching_arm_wins() {
        let option = option();
        let some = option.construct("Some", vec![Value::from(1)]).unwrap();
        let matcher = Matcher::compile([
            ("Some(x)", label("first")),
            ("Some(_)", label("second")),
            ("_", label("default")),
        ])
        .unwrap();
        assert_eq!(matcher.apply(&some), Ok(Value::from("first")));
    }

    #[rstest]
    fn test_falls_through_to_wildcard() {
        let option = option();
        let none = option.sentinel("None").unwrap();
        let matcher =
            Matcher::compile([("Some(x)", label("some")), ("_", label("default"))]).unwrap();
        assert_eq!(matcher.apply(&none), Ok(Value::from("default")));
    }

    #[rstest]
    fn test_no_match_names_value() {
        let option = option();
        let none = option.sentinel("None").unwrap();
        let matcher = Matcher::compile([("Some(x)", label("some"))]).unwrap();
        assert_eq!(
            matcher.apply(&none),
            Err(Error::NoMatch {
                value: "None".to_string()
            })
        );
    }

    #[rstest]
    fn test_literal_sub_pattern() {
        let option = option();
        let some_zero = option.construct("Some", vec![Value::from(0)]).unwrap();
        let some_one = option.construct("Some", vec![Value::from(1)]).unwrap();
        let matcher =
            Matcher::compile([("Some(0)", label("zero")), ("Some(n)", label("other"))]).unwrap();
        assert_eq!(matcher.apply(&some_zero), Ok(Value::from("zero")));
        assert_eq!(matcher.apply(&some_one), Ok(Value::from("other")));
    }

    #[rstest]
    fn test_compile_reports_syntax_error() {
        let error = Matcher::compile([("Some(", label("bad"))]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PatternSyntax);
    }

    #[rstest]
    fn test_identifier_binds_whole_value() {
        let matcher = Matcher::new()
            .arm("whole", |bindings| Ok(Value::from(bindings.len() as u32)))
            .unwrap();
        assert_eq!(matcher.apply(&Value::from("x")), Ok(Value::from(1)));
    }

    #[rstest]
    fn test_qualifier_is_informational() {
        let option = option();
        let none = option.sentinel("None").unwrap();
        let matcher = Matcher::compile([("Maybe.None", label("none"))]).unwrap();
        assert_eq!(matcher.apply(&none), Ok(Value::from("none")));
    }

    #[rstest]
    fn test_field_count_mismatch_is_not_a_match() {
        let option = option();
        let some = option.construct("Some", vec![Value::from(1)]).unwrap();
        let matcher = Matcher::compile([("Some(a, b)", label("two"))]).unwrap();
        assert!(!matcher.matches(&some));
    }

    #[rstest]
    fn test_function_form() {
        let matcher = Matcher::compile([("_", label("any"))]).unwrap();
        assert_eq!(
            matcher.to_function().call(&[Value::from(3)]),
            Ok(Value::from("any"))
        );
        assert_eq!(matcher.patterns().collect::<Vec<_>>(), vec!["_"]);
    }
}
