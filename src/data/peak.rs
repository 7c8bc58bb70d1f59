use ndarray::{Array1, ArrayView1, ArrayViewMut1, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ParamRange – closed interval a peak parameter is drawn from
// ---------------------------------------------------------------------------

/// A `[min, max]` interval. Serialised as a two-element array.
///
/// Bounds are not checked: `min == max` always yields `min`, and an
/// inverted range yields values in `(max, min]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ParamRange { min, max }
    }

    /// Draw a value uniformly as `min + u·(max − min)`, `u ∈ [0, 1)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.random();
        self.min + u * (self.max - self.min)
    }

    /// `min <= max` and both bounds finite.
    pub fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// The range collapses to a single value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl From<(f64, f64)> for ParamRange {
    fn from((min, max): (f64, f64)) -> Self {
        ParamRange { min, max }
    }
}

impl From<ParamRange> for (f64, f64) {
    fn from(range: ParamRange) -> Self {
        (range.min, range.max)
    }
}

// ---------------------------------------------------------------------------
// Peak – one Gaussian contribution
// ---------------------------------------------------------------------------

/// Parameters of a single Gaussian peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub center: f64,
    /// Variance (σ²), not the standard deviation.
    pub variance: f64,
    pub amplitude: f64,
}

impl Peak {
    /// Draw center, variance and amplitude, in that order.
    pub fn draw<R: Rng + ?Sized>(
        rng: &mut R,
        centers: &ParamRange,
        variances: &ParamRange,
        amplitudes: &ParamRange,
    ) -> Self {
        let center = centers.sample(rng);
        let variance = variances.sample(rng);
        let amplitude = amplitudes.sample(rng);
        Peak {
            center,
            variance,
            amplitude,
        }
    }

    /// `amplitude · exp(−(x − center)² / (2·variance))`.
    ///
    /// A zero or negative variance is not guarded and yields NaN/Inf or a
    /// growing curve.
    #[inline]
    pub fn value_at(&self, x: f64) -> f64 {
        let d = x - self.center;
        self.amplitude * (-(d * d) / (2.0 * self.variance)).exp()
    }

    /// Add this peak's curve into `row`, element-wise over `axis`.
    pub fn add_to(&self, axis: ArrayView1<'_, f64>, row: ArrayViewMut1<'_, f64>) {
        Zip::from(row)
            .and(axis)
            .for_each(|y, &x| *y += self.value_at(x));
    }

    /// The curve evaluated over `axis`.
    pub fn curve(&self, axis: ArrayView1<'_, f64>) -> Array1<f64> {
        axis.mapv(|x| self.value_at(x))
    }
}
