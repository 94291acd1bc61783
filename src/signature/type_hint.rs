//! Declared type annotations for parameters and return values

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type annotation checked against dynamic example values.
///
/// Checking is structural: containers check every element. `Float`
/// accepts integers, every other scalar is strict.
///
/// ```rust
/// use fn_examples::TypeHint;
/// use serde_json::json;
///
/// let hint = TypeHint::list(TypeHint::optional(TypeHint::Int));
/// assert!(hint.accepts(&json!([1, null, 3])));
/// assert!(!hint.accepts(&json!([1, "2"])));
/// assert_eq!(hint.to_string(), "list[Optional[int]]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeHint {
    /// Any value
    Any,
    /// Only `null`
    None,
    /// Boolean
    Bool,
    /// Integer number
    Int,
    /// Any number
    Float,
    /// String
    Str,
    /// Array whose elements all match
    List(Box<TypeHint>),
    /// Fixed-length array matched position by position
    Tuple(Vec<TypeHint>),
    /// Object whose values all match
    Dict(Box<TypeHint>),
    /// `null` or the inner type
    Optional(Box<TypeHint>),
    /// Any of the alternatives
    Union(Vec<TypeHint>),
    /// One of the listed values
    Literal(Vec<Value>),
}

impl TypeHint {
    /// `list[inner]`
    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// `dict[str, values]`
    #[must_use]
    pub fn dict(values: Self) -> Self {
        Self::Dict(Box::new(values))
    }

    /// `Optional[inner]`
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// `Union[...]`
    #[must_use]
    pub fn union(alternatives: impl IntoIterator<Item = Self>) -> Self {
        Self::Union(alternatives.into_iter().collect())
    }

    /// `Literal[...]`
    #[must_use]
    pub fn literal<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Literal(values.into_iter().map(Into::into).collect())
    }

    /// Check whether `value` conforms to this type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::None => value.is_null(),
            Self::Bool => value.is_boolean(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Str => value.is_string(),
            Self::List(inner) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| inner.accepts(item))),
            Self::Tuple(items) => value.as_array().is_some_and(|values| {
                values.len() == items.len()
                    && items.iter().zip(values).all(|(hint, item)| hint.accepts(item))
            }),
            Self::Dict(inner) => value
                .as_object()
                .is_some_and(|map| map.values().all(|item| inner.accepts(item))),
            Self::Optional(inner) => value.is_null() || inner.accepts(value),
            Self::Union(alternatives) => alternatives.iter().any(|hint| hint.accepts(value)),
            Self::Literal(values) => values.contains(value),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::None => f.write_str("None"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::List(inner) => write!(f, "list[{inner}]"),
            Self::Tuple(items) => {
                f.write_str("tuple[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Self::Dict(inner) => write!(f, "dict[str, {inner}]"),
            Self::Optional(inner) => write!(f, "Optional[{inner}]"),
            Self::Union(alternatives) => {
                f.write_str("Union[")?;
                write_joined(f, alternatives)?;
                f.write_str("]")
            }
            Self::Literal(values) => {
                f.write_str("Literal[")?;
                write_joined(f, values)?;
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_hints() {
        assert!(TypeHint::Int.accepts(&json!(3)));
        assert!(TypeHint::Int.accepts(&json!(u64::MAX)));
        assert!(!TypeHint::Int.accepts(&json!(3.5)));
        assert!(!TypeHint::Int.accepts(&json!("3")));
        assert!(TypeHint::Float.accepts(&json!(3)));
        assert!(TypeHint::Float.accepts(&json!(3.5)));
        assert!(TypeHint::Str.accepts(&json!("apple")));
        assert!(TypeHint::Bool.accepts(&json!(false)));
        assert!(!TypeHint::Bool.accepts(&json!(0)));
        assert!(TypeHint::None.accepts(&Value::Null));
        assert!(TypeHint::Any.accepts(&json!({"a": [1]})));
    }

    #[test]
    fn test_container_hints() {
        let tuple = TypeHint::Tuple(vec![TypeHint::Int, TypeHint::Str]);
        assert!(tuple.accepts(&json!([1, "a"])));
        assert!(!tuple.accepts(&json!([1, "a", 2])));
        assert!(!tuple.accepts(&json!(["a", 1])));

        let dict = TypeHint::dict(TypeHint::Float);
        assert!(dict.accepts(&json!({"x": 1, "y": 2.5})));
        assert!(!dict.accepts(&json!({"x": "1"})));
        assert!(!dict.accepts(&json!([1.0])));
    }

    #[test]
    fn test_union_and_literal() {
        let hint = TypeHint::union([TypeHint::Int, TypeHint::Str]);
        assert!(hint.accepts(&json!(1)));
        assert!(hint.accepts(&json!("1")));
        assert!(!hint.accepts(&json!(null)));

        let literal = TypeHint::literal(["red", "green"]);
        assert!(literal.accepts(&json!("red")));
        assert!(!literal.accepts(&json!("blue")));
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeHint::dict(TypeHint::Int).to_string(), "dict[str, int]");
        assert_eq!(
            TypeHint::union([TypeHint::Int, TypeHint::None]).to_string(),
            "Union[int, None]"
        );
        assert_eq!(TypeHint::literal([1, 2]).to_string(), "Literal[1, 2]");
    }

    #[test]
    fn test_serde_shape() {
        let hint = TypeHint::list(TypeHint::Int);
        let json = serde_json::to_value(&hint).unwrap();
        assert_eq!(json, json!({"list": "int"}));
        let back: TypeHint = serde_json::from_value(json).unwrap();
        assert_eq!(back, hint);
    }
}
