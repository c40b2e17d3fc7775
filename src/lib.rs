//! # Billyprints Core
//!
//! A text DSL and fixed-point evaluator for combinational logic circuits.
//!
//! This library provides:
//! - A line-oriented DSL for declaring inputs, outputs, gates and wires
//! - A lenient parser that reports per-line diagnostics instead of failing
//! - A bounded relaxation solver that settles every node and wire, even in
//!   circuits with feedback
//! - Plain data (signal maps and a canvas view model) for an external renderer
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Parser for the circuit description language
//! - [`circuit`] - Typed node kinds, wiring index and validation
//! - [`solver`] - Relaxation-based evaluation
//! - [`view`] - Renderer-facing view of an evaluated circuit
//! - [`demos`] - Built-in demo circuits
//!
//! ## Usage
//!
//! ```rust
//! use billyprints_core::{dsl, solver::{evaluate, SignalMap}};
//!
//! let circuit = dsl::parse(r#"
//!     In A @ 60, 40
//!     In B @ 60, 180
//!     XOR xor1 @ 280, 20
//!     AND and1 @ 280, 160
//!     Out Sum @ 480, 80
//!     Out Carry @ 480, 220
//!     A -> xor1.a
//!     B -> xor1.b
//!     A -> and1.a
//!     B -> and1.b
//!     xor1 -> Sum
//!     and1 -> Carry
//! "#);
//! assert!(circuit.diagnostics.is_empty());
//!
//! let inputs: SignalMap = [("A".to_string(), true), ("B".to_string(), true)].into();
//! let result = evaluate(&circuit, &inputs);
//! assert_eq!(result.output("Sum"), Some(false));
//! assert_eq!(result.output("Carry"), Some(true));
//! assert!(result.edge_states["A.out->xor1.a"]);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! billyprints adder.bp --set A=1 --set B=1
//! billyprints --demo full-adder --format json
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuit } from 'billyprints_core';
//!
//! const circuit = new WasmCircuit(script);
//! circuit.toggle('A');
//! const view = JSON.parse(circuit.view_json());
//! ```

pub mod circuit;
pub mod demos;
pub mod dsl;
pub mod error;
pub mod solver;
pub mod view;

// Re-export main types for convenience
pub use dsl::{parse, ParsedCircuit};
pub use error::{BillyprintsError, Result};
pub use solver::{evaluate, Evaluation, Evaluator};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;
