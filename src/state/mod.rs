//! State-vector providers: the bridge between feature rows and the
//! simulation oracle.
//!
//! A provider turns one row of classical features into a complex
//! amplitude vector. Two backends exist behind the same trait:
//!
//! - **Bound-parameter** (`BoundProvider`): an ordered feature binding
//!   maps row columns to named circuit parameters; the assignment is
//!   substituted into a fixed template before simulation.
//! - **Direct-call** (`DirectProvider`): the oracle itself accepts the
//!   feature row. A length-1 row is passed as a bare scalar, matching
//!   oracles that expect a number rather than a one-element vector.
//!
//! The kernel and spectrum layers depend only on [`StateVectorProvider`],
//! never on which backend is active.

use std::collections::HashMap;

use ndarray::Array1;
use num_complex::Complex64;

use crate::circuit::RotationCircuit;
use crate::error::{LensError, LensResult};

/// Name of the only compiled-in simulation backend.
pub const STATEVECTOR_BACKEND: &str = "statevector";

/// Capability interface shared by both provider backends.
pub trait StateVectorProvider: Sync {
    /// Computes the state vector for one feature row.
    fn get_state(&self, row: &[f64]) -> LensResult<Array1<Complex64>>;
}

/// An oracle consumed by the bound-parameter backend: given a complete
/// name→value assignment, return the state vector.
pub trait BoundOracle: Sync {
    fn simulate(&self, assignment: &HashMap<String, f64>) -> LensResult<Array1<Complex64>>;
}

impl BoundOracle for RotationCircuit {
    fn simulate(&self, assignment: &HashMap<String, f64>) -> LensResult<Array1<Complex64>> {
        self.statevector(assignment)
    }
}

/// Adapter turning a plain closure into a bound oracle.
pub struct FnOracle<F>(pub F);

impl<F> BoundOracle for FnOracle<F>
where
    F: Fn(&HashMap<String, f64>) -> LensResult<Array1<Complex64>> + Sync,
{
    fn simulate(&self, assignment: &HashMap<String, f64>) -> LensResult<Array1<Complex64>> {
        (self.0)(assignment)
    }
}

/// Bound-parameter backend: explicit name→value substitution before
/// simulation.
pub struct BoundProvider<O: BoundOracle> {
    oracle: O,
    binding: Vec<String>,
}

impl BoundProvider<RotationCircuit> {
    /// Wraps a circuit, binding row columns to the circuit's parameters
    /// in declaration order.
    pub fn from_circuit(circuit: RotationCircuit) -> Self {
        let binding = circuit.parameters();
        Self {
            oracle: circuit,
            binding,
        }
    }

    /// Same as [`from_circuit`](Self::from_circuit), but for a backend
    /// selected by name (typically from config). Unknown backends fail
    /// here, at construction, before any computation is attempted.
    pub fn for_backend(backend: &str, circuit: RotationCircuit) -> LensResult<Self> {
        if backend != STATEVECTOR_BACKEND {
            return Err(LensError::missing_dependency(backend));
        }
        Ok(Self::from_circuit(circuit))
    }
}

impl<F> BoundProvider<FnOracle<F>>
where
    F: Fn(&HashMap<String, f64>) -> LensResult<Array1<Complex64>> + Sync,
{
    /// Wraps a closure oracle with an explicit feature binding.
    pub fn from_fn(oracle: F, binding: Vec<String>) -> Self {
        Self {
            oracle: FnOracle(oracle),
            binding,
        }
    }
}

impl<O: BoundOracle> BoundProvider<O> {
    /// Wraps an arbitrary bound oracle with an explicit feature binding.
    pub fn new(oracle: O, binding: Vec<String>) -> Self {
        Self { oracle, binding }
    }

    /// The ordered feature binding (row column → parameter name).
    pub fn binding(&self) -> &[String] {
        &self.binding
    }
}

impl<O: BoundOracle> StateVectorProvider for BoundProvider<O> {
    fn get_state(&self, row: &[f64]) -> LensResult<Array1<Complex64>> {
        if row.len() != self.binding.len() {
            return Err(LensError::shape_mismatch(
                self.binding.len(),
                row.len(),
                "bound provider",
            ));
        }

        let assignment: HashMap<String, f64> = self
            .binding
            .iter()
            .cloned()
            .zip(row.iter().copied())
            .collect();
        self.oracle.simulate(&assignment)
    }
}

/// Input handed to a direct-call oracle.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectInput {
    Scalar(f64),
    Vector(Vec<f64>),
}

/// Direct-call backend: the oracle accepts the feature row itself.
pub struct DirectProvider<F> {
    oracle: F,
    expected_features: Option<usize>,
}

impl<F> DirectProvider<F>
where
    F: Fn(&DirectInput) -> LensResult<Array1<Complex64>> + Sync,
{
    pub fn new(oracle: F) -> Self {
        Self {
            oracle,
            expected_features: None,
        }
    }

    /// Returns a provider that validates every row against a fixed
    /// feature count. Without this, the row length is whatever the
    /// caller supplies and arity errors surface inside the oracle.
    pub fn with_expected_features(self, expected: usize) -> Self {
        Self {
            expected_features: Some(expected),
            ..self
        }
    }
}

impl<F> StateVectorProvider for DirectProvider<F>
where
    F: Fn(&DirectInput) -> LensResult<Array1<Complex64>> + Sync,
{
    fn get_state(&self, row: &[f64]) -> LensResult<Array1<Complex64>> {
        if let Some(expected) = self.expected_features {
            if row.len() != expected {
                return Err(LensError::shape_mismatch(
                    expected,
                    row.len(),
                    "direct provider",
                ));
            }
        }

        let input = match row {
            [single] => DirectInput::Scalar(*single),
            _ => DirectInput::Vector(row.to_vec()),
        };
        (self.oracle)(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus_state() -> Array1<Complex64> {
        let amp = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        Array1::from(vec![amp, amp])
    }

    #[test]
    fn bound_provider_binds_in_declaration_order() {
        let circuit = RotationCircuit::new(1).rx("x0", 0).rx("x1", 0);
        let provider = BoundProvider::from_circuit(circuit);

        assert_eq!(provider.binding(), ["x0", "x1"]);

        let state = provider.get_state(&[std::f64::consts::PI, 0.0]).unwrap();
        assert!(state[0].norm() < 1e-12);
    }

    #[test]
    fn bound_provider_rejects_wrong_arity() {
        let circuit = RotationCircuit::new(1).rx("x", 0);
        let provider = BoundProvider::from_circuit(circuit);

        let result = provider.get_state(&[0.1, 0.2]);
        match result {
            Err(LensError::ShapeMismatch { expected, got, .. }) => {
                assert_eq!(expected, 1);
                assert_eq!(got, 2);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn bound_provider_accepts_closure_oracle() {
        let oracle = |assignment: &HashMap<String, f64>| -> LensResult<Array1<Complex64>> {
            let theta = assignment["theta"];
            Ok(Array1::from(vec![
                Complex64::new((theta / 2.0).cos(), 0.0),
                Complex64::new(0.0, -(theta / 2.0).sin()),
            ]))
        };
        let provider = BoundProvider::from_fn(oracle, vec!["theta".to_string()]);

        let state = provider.get_state(&[0.0]).unwrap();
        assert!((state[0].re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_backend_fails_at_construction() {
        let circuit = RotationCircuit::new(1).rx("x", 0);
        let result = BoundProvider::for_backend("tensor-network", circuit);

        assert!(matches!(
            result,
            Err(LensError::MissingDependency { backend }) if backend == "tensor-network"
        ));
    }

    #[test]
    fn direct_provider_passes_scalar_for_single_feature() {
        let oracle = |input: &DirectInput| -> LensResult<Array1<Complex64>> {
            assert!(matches!(input, DirectInput::Scalar(_)));
            Ok(plus_state())
        };
        let provider = DirectProvider::new(oracle);

        provider.get_state(&[0.5]).unwrap();
    }

    #[test]
    fn direct_provider_passes_vector_for_multiple_features() {
        let oracle = |input: &DirectInput| -> LensResult<Array1<Complex64>> {
            match input {
                DirectInput::Vector(values) => assert_eq!(values.len(), 3),
                DirectInput::Scalar(_) => panic!("expected vector input"),
            }
            Ok(plus_state())
        };
        let provider = DirectProvider::new(oracle);

        provider.get_state(&[0.1, 0.2, 0.3]).unwrap();
    }

    #[test]
    fn direct_provider_enforces_expected_features() {
        let oracle = |_: &DirectInput| Ok(plus_state());
        let provider = DirectProvider::new(oracle).with_expected_features(2);

        assert!(provider.get_state(&[0.1, 0.2]).is_ok());
        assert!(matches!(
            provider.get_state(&[0.1]),
            Err(LensError::ShapeMismatch { expected: 2, got: 1, .. })
        ));
    }
}
