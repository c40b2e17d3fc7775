//! Fixed-point logic solver.
//!
//! This module computes the steady-state value of every node in a possibly
//! cyclic combinational circuit.
//!
//! ## Relaxation
//!
//! Instead of ordering gates topologically, the solver repeatedly sweeps the
//! node list in declaration order:
//!
//! 1. Seed every `In` node from the input assignments (default `false`)
//! 2. Recompute each `Out` and gate whose inputs are all known
//! 3. Stop when a sweep changes nothing, or after [`MAX_ITERATIONS`] sweeps
//!
//! Feedback loops are neither detected nor rejected here; they just stop at
//! the cap. [`validate_circuit`](crate::circuit::validate_circuit) reports
//! them, and [`Evaluator::evaluate_strict`] turns a missed fixed point into an
//! error.

mod evaluator;
mod relax;

pub use evaluator::{evaluate, parse_assignment, Evaluation, Evaluator, EvaluatorConfig, SignalMap};
pub use relax::{Relaxation, Settle};

/// Maximum relaxation passes per evaluation.
pub const MAX_ITERATIONS: usize = 100;
