//! Validated input sequences.

use std::ops::Index;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AlignError, Argument};

/// Owned, validated sequence. Guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<T>(Vec<T>);

impl<T> Sequence<T> {
    /// Create a new sequence, validating that it is non-empty.
    ///
    /// `argument` names the position the sequence will occupy in an alignment
    /// and is carried into the error.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::EmptySequence`] | `values` is empty |
    pub fn new(values: Vec<T>, argument: Argument) -> Result<Self, AlignError> {
        if values.is_empty() {
            return Err(AlignError::EmptySequence { argument });
        }
        Ok(Self(values))
    }

    /// Return the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Return the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed [`Sequence`]. Provided to satisfy the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: DeserializeOwned> Sequence<T> {
    /// Decode a sequence from an untyped JSON value.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::NotASequence`] | `value` is not an array, or an element does not decode as `T` |
    /// | [`AlignError::EmptySequence`] | `value` is an empty array |
    pub fn from_json(value: Value, argument: Argument) -> Result<Self, AlignError> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(AlignError::NotASequence {
                    argument,
                    reason: format!("expected a JSON array, found {}", json_kind(&other)),
                });
            }
        };

        let values = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| AlignError::NotASequence {
                    argument,
                    reason: format!("element {index}: {e}"),
                })
            })
            .collect::<Result<Vec<T>, _>>()?;

        Self::new(values, argument)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "a null value",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Sequence<T>> for Vec<T> {
    fn from(seq: Sequence<T>) -> Self {
        seq.0
    }
}
