//! Discrete value set
//!
//! The ordered list of positions a slider can snap to. Iteration order is the
//! order the values were supplied in; min/max are derived from the numeric
//! values, never from position in the list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SliderError;

/// Display text attached to a dash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral numbers print without the trailing ".0"
            Label::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Label::Number(n) => write!(f, "{}", n),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<f64> for Label {
    fn from(n: f64) -> Self {
        Label::Number(n)
    }
}

impl From<i32> for Label {
    fn from(n: i32) -> Self {
        Label::Number(n as f64)
    }
}

/// One selectable position on the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteValue {
    /// Numeric identity, unique within a set
    pub value: f64,
    /// Text shown above the dash
    pub label: Label,
}

impl DiscreteValue {
    pub fn new(value: f64, label: impl Into<Label>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Validated, non-empty set of discrete values
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSet {
    values: Vec<DiscreteValue>,
    min: f64,
    max: f64,
}

impl ValueSet {
    /// Validate and wrap a list of values
    ///
    /// Rejects empty lists, non-finite numbers and duplicate numeric values.
    pub fn new(values: Vec<DiscreteValue>) -> Result<Self, SliderError> {
        if values.is_empty() {
            return Err(SliderError::EmptyValues);
        }
        if values.iter().any(|v| !v.value.is_finite()) {
            return Err(SliderError::NonFiniteValue);
        }
        for (i, v) in values.iter().enumerate() {
            if values[..i].iter().any(|prev| prev.value == v.value) {
                return Err(SliderError::DuplicateValue(v.value));
            }
        }

        let min = values.iter().map(|v| v.value).fold(f64::INFINITY, f64::min);
        let max = values.iter().map(|v| v.value).fold(f64::NEG_INFINITY, f64::max);

        Ok(Self { values, min, max })
    }

    /// Consecutive integers `start..=end` labelled with their own number
    pub fn from_range(start: i64, end: i64) -> Result<Self, SliderError> {
        Self::new(
            (start..=end)
                .map(|n| DiscreteValue::new(n as f64, Label::Number(n as f64)))
                .collect(),
        )
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DiscreteValue> {
        self.values.get(index)
    }

    /// Position of `value` in supply order (exact numeric match)
    pub fn index_of(&self, value: f64) -> Option<usize> {
        self.values.iter().position(|v| v.value == value)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.index_of(value).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiscreteValue> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[DiscreteValue] {
        &self.values
    }
}
