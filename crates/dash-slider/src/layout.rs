//! Layout engine
//!
//! Pure geometry: places every discrete value on the track, positions the
//! handle for the selected value and derives the active window (the
//! step-aligned segment emphasised around the selection).
//!
//! All offsets are in pixels relative to the left edge of the inner track.

use crate::config::ResolvedOptions;
use crate::error::SliderError;
use crate::values::ValueSet;

/// Render state of a single dash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    /// Index in the value set (supply order)
    pub index: usize,
    /// Numeric value of the dash
    pub value: f64,
    /// Pixel offset from the start of the track
    pub offset: f32,
    /// Labels off the step grid are hidden but still hit-testable
    pub visible: bool,
}

/// Step-aligned segment around the selected value
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveWindow {
    pub lower: f64,
    pub upper: f64,
    /// Index of the dash the window starts on
    pub start_index: usize,
    pub start_offset: f32,
    pub end_offset: f32,
    /// Band colour, `None` keeps the dash colour
    pub color: Option<String>,
}

/// Result of one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub dashes: Vec<DashState>,
    pub track_width: f32,
    /// Committed value the layout was computed for
    pub value: f64,
    /// Index of `value` in the value set
    pub active_index: usize,
    /// Pixel offset of the handle centre
    pub handle_offset: f32,
    /// `None` when the window bounds don't land on configured dashes
    pub window: Option<ActiveWindow>,
}

impl Layout {
    /// Lay out `values` on a track `track_width` pixels wide
    ///
    /// `selection` of `None` selects the smallest value. A selection that is not
    /// a member of the set is a configuration error and aborts the pass.
    pub fn compute(
        values: &ValueSet,
        track_width: f32,
        options: &ResolvedOptions,
        selection: Option<f64>,
    ) -> Result<Self, SliderError> {
        let (min, max) = (values.min(), values.max());
        let value = selection.unwrap_or(min);
        let active_index = values
            .index_of(value)
            .ok_or(SliderError::ValueNotListed(value))?;

        let step = options.effective_step();
        let dashes: Vec<DashState> = values
            .iter()
            .enumerate()
            .map(|(index, v)| DashState {
                index,
                value: v.value,
                offset: pixel_offset(v.value, min, max, track_width),
                visible: index % step == 0,
            })
            .collect();

        let handle_offset = dashes[active_index].offset;
        let window = active_window(&dashes, values, value, active_index, options);

        log::debug!(
            "layout: {} dashes over {}px, value {} at {}px",
            dashes.len(),
            track_width,
            value,
            handle_offset
        );

        Ok(Self {
            dashes,
            track_width,
            value,
            active_index,
            handle_offset,
            window,
        })
    }

    /// Smallest and largest dash offsets (drag bounds)
    pub fn offset_bounds(&self) -> (f32, f32) {
        self.dashes.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d.offset), hi.max(d.offset))
        })
    }

    /// Offset of the dash at `index`
    pub fn offset_of(&self, index: usize) -> Option<f32> {
        self.dashes.get(index).map(|d| d.offset)
    }
}

/// Normalized position (0.0 - 1.0) of `value` between `min` and `max`
///
/// A degenerate range (`min == max`) places everything at 0.
pub fn normalized(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        0.0
    } else {
        (value - min) / (max - min)
    }
}

/// Pixel offset of `value` on a track of `track_width` pixels
pub fn pixel_offset(value: f64, min: f64, max: f64, track_width: f32) -> f32 {
    (normalized(value, min, max) * track_width as f64).round() as f32
}

fn active_window(
    dashes: &[DashState],
    values: &ValueSet,
    value: f64,
    index: usize,
    options: &ResolvedOptions,
) -> Option<ActiveWindow> {
    let step = options.effective_step();
    let (min, max) = (values.min(), values.max());
    let gap = if values.len() > 1 {
        (max - min) / (values.len() - 1) as f64
    } else {
        0.0
    };

    let lower = value - (index % step) as f64 * gap;
    let upper = (lower + step as f64 * gap).min(max);

    let find = |target: f64| dashes.iter().find(|d| same_value(d.value, target));
    let (Some(start), Some(end)) = (find(lower), find(upper)) else {
        log::warn!(
            "layout: active window {}..{} has no matching dash, skipping recolour",
            lower,
            upper
        );
        return None;
    };

    let color = options
        .indicator_colors
        .iter()
        .find(|band| value <= band.limit)
        .map(|band| band.color.clone());

    Some(ActiveWindow {
        lower,
        upper,
        start_index: start.index,
        start_offset: start.offset,
        end_offset: end.offset,
        color,
    })
}

/// Equality tolerant to the rounding of the window arithmetic
fn same_value(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * 4.0 * a.abs().max(b.abs()).max(1.0)
}
