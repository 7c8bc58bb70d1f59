//! Mixed samples for curve-resolution inputs: `samples = weights · components`.
//!
//! The components are pure spectra from a [`SpectrumSynthesizer`]; the weights
//! are per-sample concentrations. Both are kept so the mixture carries its own
//! ground truth.

use log::debug;
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::synth::SpectrumSynthesizer;

/// Errors raised while mixing components.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MixtureError {
    #[error("weights have {weights} columns but there are {components} components")]
    ComponentCountMismatch { weights: usize, components: usize },
    #[error("components have {components} points but the axis has {axis}")]
    AxisLengthMismatch { components: usize, axis: usize },
}

/// Element-wise transform applied to weights or component spectra before mixing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Values are used as given.
    #[default]
    None,
    /// `ln(1 + eˣ)`, keeps every value strictly positive.
    Softplus,
}

impl Modifier {
    pub fn apply(&self, values: &Array2<f64>) -> Array2<f64> {
        match self {
            Modifier::None => values.clone(),
            Modifier::Softplus => values.mapv(softplus),
        }
    }
}

/// One [`Modifier`] per side of the product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixtureModifiers {
    pub weights: Modifier,
    pub spectra: Modifier,
}

impl MixtureModifiers {
    /// The same modifier on both sides.
    pub fn both(modifier: Modifier) -> Self {
        MixtureModifiers {
            weights: modifier,
            spectra: modifier,
        }
    }
}

/// Overflow-safe `ln(1 + eˣ)`.
pub fn softplus(x: f64) -> f64 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

/// `n_samples × n_components` weights drawn uniformly from `[0, 1)`.
pub fn random_weights<R: Rng + ?Sized>(
    n_samples: usize,
    n_components: usize,
    rng: &mut R,
) -> Array2<f64> {
    Array2::from_shape_simple_fn((n_samples, n_components), || rng.random())
}

/// Mix `components` (K×W) by `weights` (M×K) into M×W samples.
pub fn mix(weights: &Array2<f64>, components: &Array2<f64>) -> Result<Array2<f64>, MixtureError> {
    if weights.ncols() != components.nrows() {
        return Err(MixtureError::ComponentCountMismatch {
            weights: weights.ncols(),
            components: components.nrows(),
        });
    }
    Ok(weights.dot(components))
}

// ---------------------------------------------------------------------------
// MixtureDataset
// ---------------------------------------------------------------------------

/// Mixed samples with the components and weights that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureDataset {
    pub axis: Array1<f64>,
    /// Effective component spectra after the modifier, K×W.
    pub components: Array2<f64>,
    /// Effective weights after the modifier, M×K.
    pub weights: Array2<f64>,
    /// `weights · components`, M×W.
    pub samples: Array2<f64>,
}

impl MixtureDataset {
    pub fn n_samples(&self) -> usize {
        self.samples.nrows()
    }

    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }
}

/// Draw `n_components` pure spectra of `n_peaks` peaks, then `n_samples`
/// random weight rows, and mix them.
///
/// Components are drawn first, weights second, from the same `rng`.
pub fn synthesize_mixture<R: Rng + ?Sized>(
    synth: &SpectrumSynthesizer,
    n_samples: usize,
    n_components: usize,
    n_peaks: usize,
    modifiers: MixtureModifiers,
    rng: &mut R,
) -> MixtureDataset {
    let (axis, components) = synth
        .generate_with_rng(n_components, n_peaks, rng)
        .into_parts();
    let weights = random_weights(n_samples, n_components, rng);
    combine(axis, &weights, &components, modifiers)
}

/// Like [`synthesize_mixture`] with caller-supplied weights; the number of
/// components is `weights.ncols()`.
pub fn synthesize_mixture_with_weights<R: Rng + ?Sized>(
    synth: &SpectrumSynthesizer,
    weights: &Array2<f64>,
    n_peaks: usize,
    modifiers: MixtureModifiers,
    rng: &mut R,
) -> MixtureDataset {
    let (axis, components) = synth
        .generate_with_rng(weights.ncols(), n_peaks, rng)
        .into_parts();
    combine(axis, weights, &components, modifiers)
}

/// Mix caller-supplied weights (M×K) and component spectra (K×W) over `axis`.
pub fn mix_preloaded(
    axis: Array1<f64>,
    weights: &Array2<f64>,
    components: &Array2<f64>,
    modifiers: MixtureModifiers,
) -> Result<MixtureDataset, MixtureError> {
    if components.ncols() != axis.len() {
        return Err(MixtureError::AxisLengthMismatch {
            components: components.ncols(),
            axis: axis.len(),
        });
    }
    if weights.ncols() != components.nrows() {
        return Err(MixtureError::ComponentCountMismatch {
            weights: weights.ncols(),
            components: components.nrows(),
        });
    }
    Ok(combine(axis, weights, components, modifiers))
}

// Shapes are already consistent here.
fn combine(
    axis: Array1<f64>,
    weights: &Array2<f64>,
    components: &Array2<f64>,
    modifiers: MixtureModifiers,
) -> MixtureDataset {
    debug!(
        "mixing {} samples from {} components ({:?} weights, {:?} spectra)",
        weights.nrows(),
        components.nrows(),
        modifiers.weights,
        modifiers.spectra
    );
    let weights = modifiers.weights.apply(weights);
    let components = modifiers.spectra.apply(components);
    let samples = weights.dot(&components);
    MixtureDataset {
        axis,
        components,
        weights,
        samples,
    }
}
