//! Synthetic spectrum generation: sums of randomly parameterised Gaussian peaks.

use log::{debug, trace};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::data::axis;
use crate::data::model::{LabeledSpectra, SyntheticSpectra};
use crate::data::peak::{ParamRange, Peak};

pub const DEFAULT_N_POINTS: usize = 1000;
pub const DEFAULT_X_RANGE: ParamRange = ParamRange::new(0.0, 100.0);
pub const DEFAULT_CENTER_LIMITS: ParamRange = ParamRange::new(0.0, 100.0);
pub const DEFAULT_VARIANCE_LIMITS: ParamRange = ParamRange::new(1.0, 50.0);
pub const DEFAULT_AMPLITUDE_LIMITS: ParamRange = ParamRange::new(0.5, 1.0);

/// Generates spectra as sums of Gaussian peaks over a fixed grid.
///
/// Nothing is validated here: a non-positive variance lower bound, inverted
/// limits or a zero-point grid produce NaN/Inf or empty output rather than
/// an error. Use [`crate::config::SynthConfig::validate`] to check first.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSynthesizer {
    pub n_points: usize,
    pub x_range: ParamRange,
    pub center_limits: ParamRange,
    pub variance_limits: ParamRange,
    pub amplitude_limits: ParamRange,
}

impl Default for SpectrumSynthesizer {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_N_POINTS,
            x_range: DEFAULT_X_RANGE,
            center_limits: DEFAULT_CENTER_LIMITS,
            variance_limits: DEFAULT_VARIANCE_LIMITS,
            amplitude_limits: DEFAULT_AMPLITUDE_LIMITS,
        }
    }
}

impl SpectrumSynthesizer {
    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    pub fn with_x_range(mut self, range: impl Into<ParamRange>) -> Self {
        self.x_range = range.into();
        self
    }

    pub fn with_center_limits(mut self, range: impl Into<ParamRange>) -> Self {
        self.center_limits = range.into();
        self
    }

    pub fn with_variance_limits(mut self, range: impl Into<ParamRange>) -> Self {
        self.variance_limits = range.into();
        self
    }

    pub fn with_amplitude_limits(mut self, range: impl Into<ParamRange>) -> Self {
        self.amplitude_limits = range.into();
        self
    }

    /// The shared x-axis every spectrum is evaluated on.
    pub fn axis(&self) -> Array1<f64> {
        axis::linspace(self.x_range, self.n_points)
    }

    /// Draw one peak from the configured limits.
    pub fn draw_peak<R: Rng + ?Sized>(&self, rng: &mut R) -> Peak {
        Peak::draw(
            rng,
            &self.center_limits,
            &self.variance_limits,
            &self.amplitude_limits,
        )
    }

    /// `n_spectra` spectra of `n_peaks` peaks each, using the thread RNG.
    pub fn generate(&self, n_spectra: usize, n_peaks: usize) -> SyntheticSpectra {
        self.generate_with_rng(n_spectra, n_peaks, &mut rand::rng())
    }

    /// Same as [`generate`](Self::generate) with a ChaCha20 stream seeded from `seed`.
    pub fn generate_seeded(&self, n_spectra: usize, n_peaks: usize, seed: u64) -> SyntheticSpectra {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        self.generate_with_rng(n_spectra, n_peaks, &mut rng)
    }

    /// Draws come from `rng` row by row, peak by peak, each peak as
    /// center, variance, amplitude.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        n_spectra: usize,
        n_peaks: usize,
        rng: &mut R,
    ) -> SyntheticSpectra {
        self.fill(n_spectra, n_peaks, rng, |_, _| {})
    }

    /// Like [`generate_with_rng`](Self::generate_with_rng) but keeps every
    /// drawn peak alongside the spectra.
    pub fn generate_labeled_with_rng<R: Rng + ?Sized>(
        &self,
        n_spectra: usize,
        n_peaks: usize,
        rng: &mut R,
    ) -> LabeledSpectra {
        let mut peaks: Vec<Vec<Peak>> = (0..n_spectra)
            .map(|_| Vec::with_capacity(n_peaks))
            .collect();
        let data = self.fill(n_spectra, n_peaks, rng, |row, peak| {
            peaks[row].push(*peak)
        });
        LabeledSpectra { data, peaks }
    }

    fn fill<R, F>(
        &self,
        n_spectra: usize,
        n_peaks: usize,
        rng: &mut R,
        mut on_peak: F,
    ) -> SyntheticSpectra
    where
        R: Rng + ?Sized,
        F: FnMut(usize, &Peak),
    {
        debug!(
            "synthesizing {n_spectra} spectra x {n_peaks} peaks over {} points",
            self.n_points
        );
        let mut data = SyntheticSpectra::zeros(self.axis(), n_spectra);
        let SyntheticSpectra { axis: grid, spectra } = &mut data;

        for (i, mut row) in spectra.rows_mut().into_iter().enumerate() {
            for _ in 0..n_peaks {
                let peak = self.draw_peak(rng);
                peak.add_to(grid.view(), row.view_mut());
                on_peak(i, &peak);
            }
            trace!("spectrum {i} done");
        }
        data
    }
}

/// One-shot form of [`SpectrumSynthesizer::generate`].
///
/// Returns `(axis, spectra)` with `axis.len() == n_points` and
/// `spectra.dim() == (n_spectra, n_points)`.
pub fn generate(
    n_spectra: usize,
    n_peaks: usize,
    n_points: usize,
    x_range: impl Into<ParamRange>,
    center_limits: impl Into<ParamRange>,
    variance_limits: impl Into<ParamRange>,
    amplitude_limits: impl Into<ParamRange>,
) -> (Array1<f64>, Array2<f64>) {
    SpectrumSynthesizer {
        n_points,
        x_range: x_range.into(),
        center_limits: center_limits.into(),
        variance_limits: variance_limits.into(),
        amplitude_limits: amplitude_limits.into(),
    }
    .generate(n_spectra, n_peaks)
    .into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn shape_matches_request() {
        init_logging();
        let synth = SpectrumSynthesizer::default().with_n_points(64);
        let data = synth.generate_seeded(7, 4, 1);
        assert_eq!(data.axis.len(), 64);
        assert_eq!(data.spectra.dim(), (7, 64));
        assert!(data.rows().all(|row| row.len() == 64));
    }

    #[test]
    fn default_grid() {
        let synth = SpectrumSynthesizer::default();
        let axis = synth.axis();
        assert_eq!(axis.len(), 1000);
        assert_eq!(axis[0], 0.0);
        assert!((axis[999] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_peak_scenario() {
        init_logging();
        let (axis, spectra) = generate(1, 1, 5, (0.0, 4.0), (2.0, 2.0), (1.0, 1.0), (1.0, 1.0));
        assert_eq!(axis.to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let expected = [
            (-2.0f64).exp(),
            (-0.5f64).exp(),
            1.0,
            (-0.5f64).exp(),
            (-2.0f64).exp(),
        ];
        for (got, want) in spectra.row(0).iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[test]
    fn zero_peaks_give_zero_matrix() {
        let synth = SpectrumSynthesizer::default().with_n_points(10);
        let data = synth.generate(3, 0);
        assert_eq!(data.spectra.dim(), (3, 10));
        assert!(data.spectra.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn zero_spectra_keeps_axis() {
        let data = SpectrumSynthesizer::default().with_n_points(10).generate(0, 5);
        assert!(data.is_empty());
        assert_eq!(data.n_points(), 10);
    }

    #[test]
    fn default_amplitudes_are_non_negative() {
        let data = SpectrumSynthesizer::default().generate_seeded(20, 5, 99);
        assert!(data.spectra.iter().all(|&v| v >= 0.0));
        assert!(data.spectra.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn negative_amplitudes_can_go_below_zero() {
        let synth = SpectrumSynthesizer::default()
            .with_n_points(50)
            .with_amplitude_limits((-1.0, -0.5));
        let data = synth.generate_seeded(4, 3, 5);
        assert!(data.spectra.iter().all(|&v| v <= 0.0));
        assert!(data.spectra.iter().any(|&v| v < 0.0));
    }

    #[test]
    fn same_seed_same_output() {
        let synth = SpectrumSynthesizer::default().with_n_points(200);
        let a = synth.generate_seeded(5, 6, 42);
        let b = synth.generate_seeded(5, 6, 42);
        assert_eq!(a, b);
        let c = synth.generate_seeded(5, 6, 43);
        assert_ne!(a.spectra, c.spectra);
    }

    #[test]
    fn superposition_of_two_peaks() {
        let synth = SpectrumSynthesizer::default().with_n_points(300);
        let combined = synth.generate_seeded(1, 2, 2024);

        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        let first = synth.draw_peak(&mut rng);
        let second = synth.draw_peak(&mut rng);
        let axis = synth.axis();
        let expected = first.curve(axis.view()) + second.curve(axis.view());

        for (got, want) in combined.spectrum(0).iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn labeled_peaks_rebuild_spectra() {
        let synth = SpectrumSynthesizer::default().with_n_points(128);
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let labeled = synth.generate_labeled_with_rng(3, 4, &mut rng);

        assert_eq!(labeled.peaks.len(), 3);
        for (i, row) in labeled.data.rows().enumerate() {
            let peaks = labeled.peaks_of(i).unwrap();
            assert_eq!(peaks.len(), 4);
            let mut rebuilt = Array1::zeros(128);
            for peak in peaks {
                assert!((0.0..100.0).contains(&peak.center));
                assert!((1.0..50.0).contains(&peak.variance));
                assert!((0.5..1.0).contains(&peak.amplitude));
                peak.add_to(labeled.data.axis.view(), rebuilt.view_mut());
            }
            for (got, want) in row.iter().zip(rebuilt.iter()) {
                assert_eq!(got, want);
            }
        }

        // Labeling must not change the draw stream.
        let plain = synth.generate_with_rng(3, 4, &mut ChaCha20Rng::seed_from_u64(8));
        assert_eq!(plain, labeled.into_unlabeled());
    }

    #[test]
    fn zero_variance_propagates_nan() {
        let synth = SpectrumSynthesizer::default()
            .with_n_points(5)
            .with_x_range((0.0, 4.0))
            .with_center_limits((2.0, 2.0))
            .with_variance_limits((0.0, 0.0));
        let data = synth.generate_seeded(1, 1, 0);
        assert!(data.spectrum(0)[2].is_nan());
    }
}
