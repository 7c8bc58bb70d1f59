/// Data layer: core types, the shared axis, and peak parameters.
///
/// Architecture:
/// ```text
///   x_range, W
///        │
///        ▼
///   ┌──────────┐
///   │   axis    │  W evenly spaced points, min..=max
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   peak    │  (center, variance, amplitude) drawn per ParamRange
///   └──────────┘
///        │  accumulated N times per row
///        ▼
///   ┌─────────────────┐
///   │ SyntheticSpectra │  shared axis + M×W intensity matrix
///   └─────────────────┘
/// ```

pub mod axis;
pub mod model;
pub mod peak;
