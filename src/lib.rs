//! Synthetic spectral data: sums of random Gaussian peaks over a shared axis.
//!
//! ```no_run
//! use peakforge::SpectrumSynthesizer;
//!
//! let data = SpectrumSynthesizer::default()
//!     .with_n_points(500)
//!     .generate_seeded(8, 3, 42);
//! assert_eq!(data.spectra.dim(), (8, 500));
//! ```

pub mod config;
pub mod data;
pub mod mixture;
pub mod synth;

pub use config::{ConfigError, SynthConfig};
pub use data::model::{LabeledSpectra, SyntheticSpectra};
pub use data::peak::{ParamRange, Peak};
pub use mixture::{MixtureDataset, MixtureError, MixtureModifiers, Modifier};
pub use synth::{generate, SpectrumSynthesizer};
