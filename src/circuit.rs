//! Minimal parameterized state-vector simulator.
//!
//! Provides the built-in oracle behind the bound-parameter provider: a
//! `RotationCircuit` is a fixed gate template whose rotation angles may
//! reference named parameters, and `statevector` evolves `|0…0⟩` under
//! the fully bound template. Dimension is `2^qubits` throughout.
//!
//! This is a feature-map simulator, not a general circuit engine; the
//! gate set covers angle encodings (Rx/Ry/Rz), basis changes (H) and
//! entanglement (CNOT).

use std::collections::HashMap;
use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{LensError, LensResult};

/// A rotation angle: either a fixed value or a named circuit parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Angle {
    Fixed(f64),
    Param(String),
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Fixed(value)
    }
}

impl From<&str> for Angle {
    fn from(name: &str) -> Self {
        Angle::Param(name.to_string())
    }
}

impl Angle {
    fn resolve(&self, assignment: &HashMap<String, f64>) -> LensResult<f64> {
        match self {
            Angle::Fixed(value) => Ok(*value),
            Angle::Param(name) => assignment
                .get(name)
                .copied()
                .ok_or_else(|| LensError::unbound_parameter(name.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    Rx { angle: Angle, qubit: usize },
    Ry { angle: Angle, qubit: usize },
    Rz { angle: Angle, qubit: usize },
    H { qubit: usize },
    Cnot { control: usize, target: usize },
}

/// A fixed gate template over `qubits` wires.
///
/// Gates are applied in insertion order. Builder methods consume and
/// return `self` so circuits read as a gate sequence:
///
/// ```
/// use hilbert_lens::circuit::RotationCircuit;
///
/// // Angle (x0 + x1) on one wire: the frequency-adder template.
/// let circuit = RotationCircuit::new(1).rx("x0", 0).rx("x1", 0);
/// assert_eq!(circuit.parameters(), vec!["x0", "x1"]);
/// ```
#[derive(Debug, Clone)]
pub struct RotationCircuit {
    qubits: usize,
    gates: Vec<Gate>,
}

impl RotationCircuit {
    pub fn new(qubits: usize) -> Self {
        assert!(qubits > 0, "circuit needs at least one qubit");
        Self {
            qubits,
            gates: Vec::new(),
        }
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// State-vector dimension, `2^qubits`.
    pub fn dim(&self) -> usize {
        1 << self.qubits
    }

    pub fn rx(mut self, angle: impl Into<Angle>, qubit: usize) -> Self {
        self.check_wire(qubit);
        self.gates.push(Gate::Rx {
            angle: angle.into(),
            qubit,
        });
        self
    }

    pub fn ry(mut self, angle: impl Into<Angle>, qubit: usize) -> Self {
        self.check_wire(qubit);
        self.gates.push(Gate::Ry {
            angle: angle.into(),
            qubit,
        });
        self
    }

    pub fn rz(mut self, angle: impl Into<Angle>, qubit: usize) -> Self {
        self.check_wire(qubit);
        self.gates.push(Gate::Rz {
            angle: angle.into(),
            qubit,
        });
        self
    }

    pub fn h(mut self, qubit: usize) -> Self {
        self.check_wire(qubit);
        self.gates.push(Gate::H { qubit });
        self
    }

    pub fn cnot(mut self, control: usize, target: usize) -> Self {
        self.check_wire(control);
        self.check_wire(target);
        assert_ne!(control, target, "control and target must differ");
        self.gates.push(Gate::Cnot { control, target });
        self
    }

    /// Ordered list of distinct parameter names, first occurrence wins.
    pub fn parameters(&self) -> Vec<String> {
        let mut names = Vec::new();
        for gate in &self.gates {
            let angle = match gate {
                Gate::Rx { angle, .. } | Gate::Ry { angle, .. } | Gate::Rz { angle, .. } => angle,
                Gate::H { .. } | Gate::Cnot { .. } => continue,
            };
            if let Angle::Param(name) = angle {
                if !names.iter().any(|n| n == name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    /// Evolves `|0…0⟩` under the bound template.
    ///
    /// # Errors
    ///
    /// Returns `UnboundParameter` if any gate references a parameter
    /// name missing from `assignment`.
    pub fn statevector(&self, assignment: &HashMap<String, f64>) -> LensResult<Array1<Complex64>> {
        let mut state = Array1::zeros(self.dim());
        state[0] = Complex64::new(1.0, 0.0);

        for gate in &self.gates {
            match gate {
                Gate::Rx { angle, qubit } => {
                    let half = angle.resolve(assignment)? / 2.0;
                    let (cos, sin) = (half.cos(), half.sin());
                    apply_single_qubit(
                        &mut state,
                        *qubit,
                        [
                            Complex64::new(cos, 0.0),
                            Complex64::new(0.0, -sin),
                            Complex64::new(0.0, -sin),
                            Complex64::new(cos, 0.0),
                        ],
                    );
                }
                Gate::Ry { angle, qubit } => {
                    let half = angle.resolve(assignment)? / 2.0;
                    let (cos, sin) = (half.cos(), half.sin());
                    apply_single_qubit(
                        &mut state,
                        *qubit,
                        [
                            Complex64::new(cos, 0.0),
                            Complex64::new(-sin, 0.0),
                            Complex64::new(sin, 0.0),
                            Complex64::new(cos, 0.0),
                        ],
                    );
                }
                Gate::Rz { angle, qubit } => {
                    let half = angle.resolve(assignment)? / 2.0;
                    apply_single_qubit(
                        &mut state,
                        *qubit,
                        [
                            Complex64::from_polar(1.0, -half),
                            Complex64::new(0.0, 0.0),
                            Complex64::new(0.0, 0.0),
                            Complex64::from_polar(1.0, half),
                        ],
                    );
                }
                Gate::H { qubit } => {
                    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                    apply_single_qubit(&mut state, *qubit, [h, h, h, -h]);
                }
                Gate::Cnot { control, target } => {
                    apply_cnot(&mut state, *control, *target);
                }
            }
        }

        Ok(state)
    }

    fn check_wire(&self, qubit: usize) {
        assert!(
            qubit < self.qubits,
            "qubit {} out of range for {}-qubit circuit",
            qubit,
            self.qubits
        );
    }
}

/// Applies a 2×2 unitary `[u00, u01, u10, u11]` to one wire.
///
/// Basis indices pair up as `(i, i | 1<<qubit)` for every `i` whose
/// `qubit` bit is clear.
fn apply_single_qubit(state: &mut Array1<Complex64>, qubit: usize, u: [Complex64; 4]) {
    let mask = 1usize << qubit;
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (a, b) = (state[i], state[j]);
            state[i] = u[0] * a + u[1] * b;
            state[j] = u[2] * a + u[3] * b;
        }
    }
}

fn apply_cnot(state: &mut Array1<Complex64>, control: usize, target: usize) {
    let control_mask = 1usize << control;
    let target_mask = 1usize << target;
    for i in 0..state.len() {
        // Visit each swapped pair once, from the target-clear side.
        if i & control_mask != 0 && i & target_mask == 0 {
            let j = i | target_mask;
            state.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assignment(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn norm_sqr(state: &Array1<Complex64>) -> f64 {
        state.iter().map(|amp| amp.norm_sqr()).sum()
    }

    #[test]
    fn rx_rotates_half_angle() {
        let circuit = RotationCircuit::new(1).rx("x", 0);
        let state = circuit.statevector(&assignment(&[("x", PI / 2.0)])).unwrap();

        let expected = (PI / 4.0).cos();
        assert!((state[0].re - expected).abs() < 1e-12);
        assert!((state[1].im + (PI / 4.0).sin()).abs() < 1e-12);
    }

    #[test]
    fn rx_full_turn_flips_to_one() {
        let circuit = RotationCircuit::new(1).rx(PI, 0);
        let state = circuit.statevector(&HashMap::new()).unwrap();

        assert!(state[0].norm() < 1e-12);
        assert!((state[1].norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn h_cnot_prepares_bell_state() {
        let circuit = RotationCircuit::new(2).h(0).cnot(0, 1);
        let state = circuit.statevector(&HashMap::new()).unwrap();

        assert!((state[0].norm_sqr() - 0.5).abs() < 1e-12);
        assert!((state[3].norm_sqr() - 0.5).abs() < 1e-12);
        assert!(state[1].norm() < 1e-12);
        assert!(state[2].norm() < 1e-12);
    }

    #[test]
    fn statevector_stays_normalized() {
        let circuit = RotationCircuit::new(2)
            .h(0)
            .rx("a", 0)
            .ry("b", 1)
            .rz(0.3, 0)
            .cnot(0, 1);
        let state = circuit
            .statevector(&assignment(&[("a", 1.1), ("b", -0.7)]))
            .unwrap();

        assert!((norm_sqr(&state) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unbound_parameter_is_reported_by_name() {
        let circuit = RotationCircuit::new(1).rx("theta", 0);
        let result = circuit.statevector(&HashMap::new());

        match result {
            Err(LensError::UnboundParameter { name }) => assert_eq!(name, "theta"),
            other => panic!("expected UnboundParameter, got {:?}", other),
        }
    }

    #[test]
    fn parameters_are_ordered_and_distinct() {
        let circuit = RotationCircuit::new(1).rx("x1", 0).rz("x0", 0).ry("x1", 0);
        assert_eq!(circuit.parameters(), vec!["x1", "x0"]);
    }
}
