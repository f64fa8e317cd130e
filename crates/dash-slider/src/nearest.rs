//! Nearest-value resolver
//!
//! Maps an arbitrary pixel offset to the closest dash. Ties go to the dash
//! that comes first in value-set order.

use crate::layout::DashState;

/// Dash whose offset is closest to `offset`
///
/// Returns `None` only for an empty slice.
pub fn nearest_dash(dashes: &[DashState], offset: f32) -> Option<&DashState> {
    dashes.iter().fold(None, |best: Option<&DashState>, dash| match best {
        Some(b) if (b.offset - offset).abs() <= (dash.offset - offset).abs() => Some(b),
        _ => Some(dash),
    })
}

/// Value of the dash closest to `offset`
pub fn nearest_value(dashes: &[DashState], offset: f32) -> Option<f64> {
    nearest_dash(dashes, offset).map(|d| d.value)
}
