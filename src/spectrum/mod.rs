//! Frequency-spectrum analysis of quantum kernels.
//!
//! A sweep probes one scalar input dimension over `[0, interval_end]`,
//! the kernel column against the reference point 0 becomes a 1-D
//! signal, and a real-input DFT decomposes that signal into calibrated
//! (frequency, normalized power) pairs. The frequency axis is scaled by
//! 2π so that 1.0 means one full oscillation per 2π of encoded angle,
//! the standard convention for angle-encoded rotation circuits.
//!
//! **Precondition:** using column 0 as "the signal" treats the kernel
//! as a function of the angular difference alone. The analyzer does not
//! verify this; results are only meaningful for shift-invariant
//! encodings.

pub mod fft;
pub mod sweep;

pub use fft::power_spectrum;
pub use sweep::{linspace, SweepConfig, SweepMode};

use ndarray::Array2;
use serde::Serialize;
use std::f64::consts::TAU;

use crate::error::{LensError, LensResult};
use crate::logging;

/// A calibrated frequency spectrum: ascending frequencies starting at
/// the DC bin, with power normalized to sum to 1.
#[derive(Debug, Clone, Serialize)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub power: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency of the bin carrying the most power, DC included.
    pub fn dominant_frequency(&self) -> f64 {
        self.frequencies[argmax(&self.power)]
    }

    /// Frequency of the strongest oscillatory (non-DC) bin.
    pub fn dominant_nonzero_frequency(&self) -> f64 {
        self.frequencies[1 + argmax(&self.power[1..])]
    }

    /// Share of total power carried by the strongest non-DC bin,
    /// relative to all non-DC power.
    pub fn nonzero_peak_share(&self) -> f64 {
        let oscillatory: f64 = self.power[1..].iter().sum();
        if oscillatory == 0.0 {
            return 0.0;
        }
        self.power[1 + argmax(&self.power[1..])] / oscillatory
    }
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(index, _)| index)
        .expect("spectrum always has at least two bins")
}

/// Summary emitted to the operation log after each analysis.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpectrumStatistics {
    pub n_samples: usize,
    pub interval_end: f64,
    pub total_power: f64,
    pub dominant_frequency: f64,
}

/// Sweeps a kernel and decomposes the resulting signal.
///
/// The kernel callable is injected rather than hard-wired, so the
/// analyzer works uniformly over both provider backends and over
/// composite sweep modes.
pub struct SpectrumAnalyzer {
    sweep: SweepConfig,
    n_features: usize,
}

impl SpectrumAnalyzer {
    pub fn new(sweep: SweepConfig, n_features: usize) -> Self {
        Self { sweep, n_features }
    }

    /// Runs the sweep → kernel → DFT pipeline.
    ///
    /// # Errors
    ///
    /// - `InvalidSweep` for bad sweep parameters,
    /// - `DimensionMismatch` if the kernel callable does not return an
    ///   N×N matrix over the N sweep rows,
    /// - `DegenerateSignal` if the swept signal is identically zero, in
    ///   which case power normalization would be 0/0. Failing here is a
    ///   deliberate policy; no NaN spectrum is ever returned.
    pub fn compute<K>(&self, kernel_fn: K) -> LensResult<Spectrum>
    where
        K: Fn(&Array2<f64>) -> LensResult<Array2<f64>>,
    {
        let rows = self.sweep.rows(self.n_features)?;
        let n = self.sweep.n_samples;

        let kernel = kernel_fn(&rows)?;
        if kernel.nrows() != n || kernel.ncols() != n {
            return Err(LensError::dimension_mismatch(
                n,
                kernel.nrows().max(kernel.ncols()),
                "kernel output",
            ));
        }

        // Column 0 is the similarity of every sweep point to the
        // reference point at 0.
        let signal: Vec<f64> = kernel.column(0).to_vec();
        let raw_power = fft::power_spectrum(&signal)?;

        let total_power: f64 = raw_power.iter().sum();
        if total_power <= 0.0 {
            return Err(LensError::degenerate_signal("spectrum normalization"));
        }

        let power: Vec<f64> = raw_power.iter().map(|bin| bin / total_power).collect();
        let frequencies: Vec<f64> = (0..power.len())
            .map(|k| k as f64 * TAU / self.sweep.interval_end)
            .collect();

        let spectrum = Spectrum { frequencies, power };
        log_spectrum(&self.sweep, total_power, &spectrum);
        Ok(spectrum)
    }
}

/// One-shot single-feature analysis over `[0, interval_end]`, matching
/// the minimal analyzer contract: `kernel_fn` receives the sweep values
/// as an N×1 batch.
pub fn compute_spectrum<K>(kernel_fn: K, n_samples: usize, interval_end: f64) -> LensResult<Spectrum>
where
    K: Fn(&Array2<f64>) -> LensResult<Array2<f64>>,
{
    let sweep = SweepConfig {
        n_samples,
        interval_end,
        mode: SweepMode::Single { feature_index: 0 },
    };
    SpectrumAnalyzer::new(sweep, 1).compute(kernel_fn)
}

fn log_spectrum(sweep: &SweepConfig, total_power: f64, spectrum: &Spectrum) {
    let stats = SpectrumStatistics {
        n_samples: sweep.n_samples,
        interval_end: sweep.interval_end,
        total_power,
        dominant_frequency: spectrum.dominant_frequency(),
    };
    if let Err(err) = logging::log_operation("spectrum", &stats) {
        eprintln!("failed to log spectrum: {err}");
    }
}
