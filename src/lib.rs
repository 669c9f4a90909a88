//! # Hilbert Lens
//!
//! Spectral expressivity analysis for quantum feature-map kernels.
//! A parameterized state-generation procedure becomes a pairwise
//! squared-overlap (Gram) kernel, and a 1-D sweep of that kernel is
//! decomposed into a calibrated frequency spectrum, revealing which
//! function classes the feature map can represent.
//!
//! ## Quick Start
//!
//! ```rust
//! use hilbert_lens::circuit::RotationCircuit;
//! use hilbert_lens::kernel::KernelMatrixBuilder;
//! use hilbert_lens::spectrum::compute_spectrum;
//! use hilbert_lens::state::BoundProvider;
//! use std::f64::consts::TAU;
//!
//! // A single-qubit angle encoding: |ψ(x)⟩ = Rx(x)|0⟩.
//! let circuit = RotationCircuit::new(1).rx("x", 0);
//! let builder = KernelMatrixBuilder::new(BoundProvider::from_circuit(circuit));
//!
//! // Sweep [0, 2π] and decompose K(x, 0) into frequencies.
//! let spectrum = compute_spectrum(|x| builder.build(x), 256, TAU).unwrap();
//!
//! let total: f64 = spectrum.power.iter().sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! assert!((spectrum.dominant_nonzero_frequency() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Core Modules
//!
//! - [`state`] - State-vector providers over bound-parameter and
//!   direct-call oracles
//! - [`kernel`] - Gram matrix construction from state overlaps
//! - [`spectrum`] - Sweep, Fourier transform and frequency calibration
//! - [`circuit`] - Built-in parameterized rotation-circuit simulator
//! - [`config`] - Analyzer configuration via TOML

pub mod circuit;
pub mod config;
pub mod error;
pub mod kernel;
pub mod logging;
pub mod spectrum;
pub mod state;

pub use circuit::RotationCircuit;
pub use config::LensConfig;
pub use error::{LensError, LensResult};
pub use kernel::KernelMatrixBuilder;
pub use spectrum::{compute_spectrum, Spectrum, SpectrumAnalyzer, SweepConfig, SweepMode};
pub use state::{BoundProvider, DirectProvider, StateVectorProvider};
