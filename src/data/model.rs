use ndarray::{Array1, Array2, ArrayView1};

use super::peak::Peak;

// ---------------------------------------------------------------------------
// SyntheticSpectra – the generated dataset
// ---------------------------------------------------------------------------

/// A batch of synthesized spectra over one shared axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpectra {
    /// Shared x-axis, `W` points.
    pub axis: Array1<f64>,
    /// Intensities, shape `(M, W)`; row `i` is spectrum `i` in axis order.
    pub spectra: Array2<f64>,
}

impl SyntheticSpectra {
    /// `M` zero rows over `axis`.
    pub fn zeros(axis: Array1<f64>, n_spectra: usize) -> Self {
        let spectra = Array2::zeros((n_spectra, axis.len()));
        SyntheticSpectra { axis, spectra }
    }

    /// Number of spectra (`M`).
    pub fn n_spectra(&self) -> usize {
        self.spectra.nrows()
    }

    /// Number of axis points (`W`).
    pub fn n_points(&self) -> usize {
        self.axis.len()
    }

    /// Intensities of spectrum `i`.
    ///
    /// Panics when `i >= n_spectra()`.
    pub fn spectrum(&self, i: usize) -> ArrayView1<'_, f64> {
        self.spectra.row(i)
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.spectra.rows().into_iter()
    }

    /// Split into `(axis, spectra)`.
    pub fn into_parts(self) -> (Array1<f64>, Array2<f64>) {
        (self.axis, self.spectra)
    }

    pub fn len(&self) -> usize {
        self.n_spectra()
    }

    pub fn is_empty(&self) -> bool {
        self.n_spectra() == 0
    }
}

// ---------------------------------------------------------------------------
// LabeledSpectra – spectra plus the peaks that built them
// ---------------------------------------------------------------------------

/// Spectra together with the peak parameters drawn for each row, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSpectra {
    pub data: SyntheticSpectra,
    /// `peaks[i]` holds the `N` peaks summed into spectrum `i`.
    pub peaks: Vec<Vec<Peak>>,
}

impl LabeledSpectra {
    /// Peaks of spectrum `i`, if it exists.
    pub fn peaks_of(&self, i: usize) -> Option<&[Peak]> {
        self.peaks.get(i).map(Vec::as_slice)
    }

    pub fn into_unlabeled(self) -> SyntheticSpectra {
        self.data
    }
}
