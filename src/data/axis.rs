use ndarray::{Array1, ArrayView1};

use super::peak::ParamRange;

/// Build `n_points` evenly spaced values from `range.min` to `range.max`,
/// both inclusive.
///
/// A single point equals `range.min`; zero points give an empty axis.
pub fn linspace(range: ParamRange, n_points: usize) -> Array1<f64> {
    Array1::linspace(range.min, range.max, n_points)
}

/// Step between consecutive axis points, or `None` for fewer than two points.
pub fn spacing(axis: ArrayView1<'_, f64>) -> Option<f64> {
    if axis.len() < 2 {
        return None;
    }
    Some(axis[1] - axis[0])
}
