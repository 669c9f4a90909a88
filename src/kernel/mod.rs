//! Kernel (Gram) matrix construction from state overlaps.
//!
//! For a batch `X` of feature rows the builder computes
//! `K[i,j] = |⟨ψ(x_i)|ψ(x_j)⟩|²`: every row is turned into a state
//! vector by the injected provider, the vectors are stacked into a
//! matrix `M`, and the kernel is the elementwise squared magnitude of
//! `M·M^H`. `K` is symmetric because `M·M^H` is Hermitian, and the
//! diagonal is the squared norm of each state (≈ 1 for a normalized
//! oracle).
//!
//! The matrix is built fresh on every call; callers needing reuse must
//! cache it themselves.

use ndarray::{Array2, Axis};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{LensError, LensResult};
use crate::logging;
use crate::state::StateVectorProvider;

/// Builds Gram matrices over batches of feature rows.
pub struct KernelMatrixBuilder<P: StateVectorProvider> {
    provider: P,
}

/// Summary emitted to the operation log after each build.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GramStatistics {
    pub rows: usize,
    pub state_dim: usize,
    pub min: f64,
    pub max: f64,
    pub mean_diagonal: f64,
}

impl<P: StateVectorProvider> KernelMatrixBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Computes the N×N kernel matrix for an N×d batch.
    ///
    /// The N state computations are independent and run in parallel;
    /// results are identical to a sequential pass.
    ///
    /// # Errors
    ///
    /// Propagates provider failures and returns `DimensionMismatch` if
    /// the oracle yields state vectors of inconsistent length within
    /// the batch.
    pub fn build(&self, x: &Array2<f64>) -> LensResult<Array2<f64>> {
        let n = x.nrows();
        if n == 0 {
            return Ok(Array2::zeros((0, 0)));
        }

        let rows: Vec<Vec<f64>> = x.axis_iter(Axis(0)).map(|row| row.to_vec()).collect();
        let states = rows
            .par_iter()
            .map(|row| self.provider.get_state(row))
            .collect::<LensResult<Vec<_>>>()?;

        let dim = states[0].len();
        for state in &states[1..] {
            if state.len() != dim {
                return Err(LensError::dimension_mismatch(
                    dim,
                    state.len(),
                    "state stacking",
                ));
            }
        }

        let mut m = Array2::zeros((n, dim));
        for (i, state) in states.iter().enumerate() {
            m.row_mut(i).assign(state);
        }

        let conj_t = m.mapv(|amp| amp.conj()).reversed_axes();
        let kernel = m.dot(&conj_t).mapv(|overlap| overlap.norm_sqr());

        log_build(&kernel, dim);
        Ok(kernel)
    }

    /// Convenience for scalar sweeps: reshapes a 1-D input to N×1 (one
    /// feature per row) so it shares the [`build`](Self::build) path.
    pub fn build_flat(&self, x: &[f64]) -> LensResult<Array2<f64>> {
        let column = Array2::from_shape_vec((x.len(), 1), x.to_vec())
            .expect("N values always reshape to N×1");
        self.build(&column)
    }
}

fn log_build(kernel: &Array2<f64>, state_dim: usize) {
    let rows = kernel.nrows();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in kernel.iter() {
        min = min.min(value);
        max = max.max(value);
    }
    let mean_diagonal = if rows == 0 {
        0.0
    } else {
        kernel.diag().sum() / rows as f64
    };

    let stats = GramStatistics {
        rows,
        state_dim,
        min,
        max,
        mean_diagonal,
    };
    if let Err(err) = logging::log_operation("kernel_matrix", &stats) {
        eprintln!("failed to log kernel build: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::RotationCircuit;
    use crate::state::BoundProvider;
    use ndarray::Array1;
    use num_complex::Complex64;
    use std::f64::consts::PI;

    fn single_rx_builder() -> KernelMatrixBuilder<BoundProvider<RotationCircuit>> {
        let circuit = RotationCircuit::new(1).rx("x", 0);
        KernelMatrixBuilder::new(BoundProvider::from_circuit(circuit))
    }

    #[test]
    fn kernel_is_symmetric_with_unit_diagonal() {
        let builder = single_rx_builder();
        let kernel = builder.build_flat(&[0.0, 0.7, 1.9, 3.1]).unwrap();

        for i in 0..4 {
            assert!((kernel[[i, i]] - 1.0).abs() < 1e-12);
            for j in 0..4 {
                assert!((kernel[[i, j]] - kernel[[j, i]]).abs() < 1e-12);
                assert!(kernel[[i, j]] >= -1e-12 && kernel[[i, j]] <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn kernel_matches_closed_form_overlap() {
        // For Rx encoding, K(x, y) = cos²((x − y) / 2).
        let builder = single_rx_builder();
        let points = [0.0, 0.5, 2.0];
        let kernel = builder.build_flat(&points).unwrap();

        for (i, &xi) in points.iter().enumerate() {
            for (j, &xj) in points.iter().enumerate() {
                let expected = ((xi - xj) / 2.0).cos().powi(2);
                assert!((kernel[[i, j]] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn build_is_idempotent() {
        let builder = single_rx_builder();
        let first = builder.build_flat(&[0.0, 1.0, 2.0]).unwrap();
        let second = builder.build_flat(&[0.0, 1.0, 2.0]).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn orthogonal_states_give_zero_entry() {
        let builder = single_rx_builder();
        let kernel = builder.build_flat(&[0.0, PI]).unwrap();

        assert!(kernel[[0, 1]].abs() < 1e-12);
    }

    #[test]
    fn empty_batch_yields_empty_matrix() {
        let builder = single_rx_builder();
        let kernel = builder.build(&Array2::zeros((0, 1))).unwrap();
        assert_eq!(kernel.dim(), (0, 0));
    }

    #[test]
    fn inconsistent_oracle_dimensions_are_rejected() {
        let oracle = |assignment: &std::collections::HashMap<String, f64>| -> LensResult<Array1<Complex64>> {
            let x = assignment["x"];
            // Misconfigured oracle: output length depends on the input.
            let dim = if x < 1.0 { 2 } else { 4 };
            let mut state = Array1::zeros(dim);
            state[0] = Complex64::new(1.0, 0.0);
            Ok(state)
        };
        let provider = BoundProvider::from_fn(oracle, vec!["x".to_string()]);
        let builder = KernelMatrixBuilder::new(provider);

        let result = builder.build_flat(&[0.0, 2.0]);
        assert!(matches!(
            result,
            Err(LensError::DimensionMismatch { expected: 2, got: 4, .. })
        ));
    }
}
