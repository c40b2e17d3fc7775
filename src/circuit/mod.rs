//! Typed view of a parsed circuit.
//!
//! [`Netlist`] turns the string-keyed [`ParsedCircuit`](crate::dsl::ParsedCircuit)
//! into interned signals and pre-resolved node inputs, which is what the
//! solver iterates over. [`validate_circuit`] reports the problems that
//! evaluation silently tolerates.

mod graph;
mod types;
mod validate;

pub use graph::{
    Element, Inputs, Netlist, Wire, FIRST_INPUT_SLOTS, OUTPUT_SLOTS, SECOND_INPUT_SLOTS, UNARY_SLOTS,
};
pub use types::*;
pub use validate::{validate_circuit, Warning};
