//! Sweep grid construction for spectral probing.

use ndarray::Array2;
use serde::Serialize;

use crate::error::{LensError, LensResult};

/// How a single sweep scalar maps onto a (possibly multi-feature) row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SweepMode {
    /// Only `feature_index` varies; every other feature stays at 0.
    Single { feature_index: usize },
    /// The sweep scalar is broadcast to every feature at once, probing
    /// the combined frequency response. For features entering the same
    /// rotation angle additively this doubles (or n-tuples) the
    /// single-feature frequency.
    Global,
}

/// The 1-D grid over which the kernel is probed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepConfig {
    /// Number of evenly spaced sample points. Higher means better
    /// resolution and less aliasing.
    pub n_samples: usize,
    /// Upper end of the closed sampling interval `[0, interval_end]`.
    /// For standard Pauli encodings 2π or 4π is customary.
    pub interval_end: f64,
    pub mode: SweepMode,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            interval_end: std::f64::consts::TAU,
            mode: SweepMode::Single { feature_index: 0 },
        }
    }
}

impl SweepConfig {
    /// # Errors
    ///
    /// Returns `InvalidSweep` when fewer than two samples are
    /// requested, the interval is empty, or the feature index falls
    /// outside `0..n_features`.
    pub fn validate(&self, n_features: usize) -> LensResult<()> {
        if self.n_samples < 2 {
            return Err(LensError::invalid_sweep(format!(
                "n_samples must be at least 2, got {}",
                self.n_samples
            )));
        }
        if !(self.interval_end > 0.0) {
            return Err(LensError::invalid_sweep(format!(
                "interval_end must be positive, got {}",
                self.interval_end
            )));
        }
        if n_features == 0 {
            return Err(LensError::invalid_sweep(
                "sweep needs at least one feature".to_string(),
            ));
        }
        if let SweepMode::Single { feature_index } = self.mode {
            if feature_index >= n_features {
                return Err(LensError::invalid_sweep(format!(
                    "feature_index {} out of range for {} features",
                    feature_index, n_features
                )));
            }
        }
        Ok(())
    }

    /// Builds the `n_samples × n_features` sweep rows. Row 0 is the
    /// all-zero reference point the signal is measured against.
    pub fn rows(&self, n_features: usize) -> LensResult<Array2<f64>> {
        self.validate(n_features)?;

        let values = linspace(0.0, self.interval_end, self.n_samples);
        let mut rows = Array2::zeros((self.n_samples, n_features));
        match self.mode {
            SweepMode::Single { feature_index } => {
                for (i, value) in values.iter().enumerate() {
                    rows[[i, feature_index]] = *value;
                }
            }
            SweepMode::Global => {
                for (i, value) in values.iter().enumerate() {
                    rows.row_mut(i).fill(*value);
                }
            }
        }
        Ok(rows)
    }
}

/// Evenly spaced values over the closed interval `[start, end]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}
