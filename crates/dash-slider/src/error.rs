//! Error type for slider construction and value commits

/// Errors raised by the slider core
///
/// Only configuration problems are errors. Geometry edge cases (single value,
/// zero-width track) and missing window bounds are handled in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SliderError {
    #[error("value {0} is not listed in input values")]
    ValueNotListed(f64),

    #[error("slider requires at least one value")]
    EmptyValues,

    #[error("value {0} is listed more than once")]
    DuplicateValue(f64),

    #[error("slider values must be finite numbers")]
    NonFiniteValue,
}
