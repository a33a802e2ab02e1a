//! Structural equality and rendering over explicit work stacks.
//!
//! Tagged lists nest one level per element, so walking them with native
//! recursion would bound list length by the thread's stack size.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::tagged::TaggedInstance;

/// One unit of pending output.
pub(crate) enum Piece<'a> {
    Value(&'a Value),
    Tagged(&'a TaggedInstance),
    Text(&'a str),
}

/// Writes `root` in canonical form.
pub(crate) fn render(formatter: &mut fmt::Formatter<'_>, root: Piece<'_>) -> fmt::Result {
    let mut pending = vec![root];
    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Text(text) => formatter.write_str(text)?,
            Piece::Tagged(instance) => {
                formatter.write_str(instance.name())?;
                if !instance.is_marker() {
                    formatter.write_str("(")?;
                    push_separated(
                        &mut pending,
                        ")",
                        instance.values().iter().map(|value| [Piece::Value(value)]),
                    );
                }
            }
            Piece::Value(value) => match value {
                Value::Null => formatter.write_str("null")?,
                Value::Boolean(flag) => write!(formatter, "{flag}")?,
                Value::Number(number) => write!(formatter, "{number}")?,
                Value::String(text) => formatter.write_str(text)?,
                Value::Array(elements) => {
                    formatter.write_str("[")?;
                    push_separated(
                        &mut pending,
                        "]",
                        elements.iter().map(|element| [Piece::Value(element)]),
                    );
                }
                Value::Object(entries) => {
                    formatter.write_str("{")?;
                    push_separated(
                        &mut pending,
                        "}",
                        entries.iter().map(|(key, value)| {
                            [Piece::Text(key), Piece::Text(": "), Piece::Value(value)]
                        }),
                    );
                }
                Value::Tagged(instance) => pending.push(Piece::Tagged(instance)),
                Value::Function(function) => write!(formatter, "{function}")?,
            },
        }
    }
    Ok(())
}

/// Schedules `items` joined by `", "` and followed by `close`.
fn push_separated<'a, const N: usize, I>(
    pending: &mut Vec<Piece<'a>>,
    close: &'static str,
    items: I,
) where
    I: DoubleEndedIterator<Item = [Piece<'a>; N]> + ExactSizeIterator,
{
    pending.push(Piece::Text(close));
    let last = items.len().saturating_sub(1);
    for (index, item) in items.rev().enumerate() {
        pending.extend(item.into_iter().rev());
        if index < last {
            pending.push(Piece::Text(", "));
        }
    }
}

/// Compares two value sequences element by element, structurally.
///
/// Tagged values are equal when they come from the same type (or the same
/// case of the same sum) and their fields are equal. Functions compare by
/// identity.
pub(crate) fn equal_all(left: &[Value], right: &[Value]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut pending: Vec<(&Value, &Value)> = left.iter().zip(right).collect();
    while let Some(pair) = pending.pop() {
        match pair {
            (Value::Array(left), Value::Array(right)) if left.len() == right.len() => {
                pending.extend(left.iter().zip(right.iter()));
            }
            (Value::Object(left), Value::Object(right)) if left.len() == right.len() => {
                for ((left_key, left_value), (right_key, right_value)) in
                    left.iter().zip(right.iter())
                {
                    if left_key != right_key {
                        return false;
                    }
                    pending.push((left_value, right_value));
                }
            }
            (Value::Tagged(left), Value::Tagged(right)) => {
                if Arc::ptr_eq(left, right) {
                    continue;
                }
                if !left.same_type(right) || left.values().len() != right.values().len() {
                    return false;
                }
                pending.extend(left.values().iter().zip(right.values()));
            }
            (left, right) => {
                if !leaf_equal(left, right) {
                    return false;
                }
            }
        }
    }
    true
}

fn leaf_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Boolean(left), Value::Boolean(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => left == right,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Function(left), Value::Function(right)) => left.same_as(right),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn nested_arrays(depth: usize) -> Value {
        (0..depth).fold(Value::from(0), |inner, _| Value::from(vec![inner]))
    }

    #[rstest]
    #[case(Value::from(Vec::new()), "[]")]
    #[case(Value::object([("k", Value::from(vec![Value::from(1)]))]), "{k: [1]}")]
    #[case(Value::object(Vec::<(String, Value)>::new()), "{}")]
    #[case(
        Value::from(vec![Value::from(vec![Value::from(1), Value::from(2)]), Value::from(3)]),
        "[[1, 2], 3]"
    )]
    fn test_render_nested(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn test_objects_with_different_keys_are_not_equal() {
        let left = Value::object([("a", Value::from(1))]);
        let right = Value::object([("b", Value::from(1))]);
        assert!(!equal_all(&[left], &[right]));
    }

    #[rstest]
    fn test_arrays_of_different_length_are_not_equal() {
        let left = Value::from(vec![Value::from(1)]);
        let right = Value::from(vec![Value::from(1), Value::from(2)]);
        assert!(!equal_all(&[left], &[right]));
    }

    #[rstest]
    fn test_deeply_nested_arrays_compare_and_render() {
        let left = nested_arrays(1000);
        let right = nested_arrays(1000);
        assert!(equal_all(&[left.clone()], &[right]));
        assert!(left.to_string().starts_with("[[[0"));
    }
}
