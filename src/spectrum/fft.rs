//! Real-input power spectrum via rustfft.

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::error::{LensError, LensResult};

/// Power spectrum of a real signal: squared magnitudes of the first
/// `floor(n/2)+1` DFT coefficients (the non-redundant half for real
/// input). Any signal length ≥ 2 is supported; the planner falls back
/// to mixed-radix or Bluestein for non-power-of-two lengths.
pub fn power_spectrum(signal: &[f64]) -> LensResult<Vec<f64>> {
    let n = signal.len();
    if n < 2 {
        return Err(LensError::invalid_sweep(format!(
            "transform needs at least 2 samples, got {}",
            n
        )));
    }

    let mut buffer: Vec<Complex64> = signal
        .iter()
        .map(|&value| Complex64::new(value, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    Ok(buffer[..n / 2 + 1]
        .iter()
        .map(|coeff| coeff.norm_sqr())
        .collect())
}
