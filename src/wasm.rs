//! WASM bindings for Billyprints Core.
//!
//! This module provides JavaScript-friendly bindings for driving a node-graph
//! editor in the browser: the page owns the text editor and the canvas, this
//! object owns the parsed circuit and the input switch states.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit, demo_script } from 'billyprints_core';
//!
//! await init();
//!
//! const circuit = new WasmCircuit(demo_script('half-adder'));
//! circuit.toggle('A');
//!
//! const { nodes, edges } = JSON.parse(circuit.view_json());
//! const errors = JSON.parse(circuit.diagnostics_json());
//! ```

use wasm_bindgen::prelude::*;

use crate::dsl::{self, ParsedCircuit};
use crate::solver::{Evaluator, EvaluatorConfig, SignalMap};
use crate::view::CircuitView;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// An editable circuit with its input switch states.
///
/// Switch states survive re-parsing for every `In` id that still exists, so
/// editing the script does not reset the inputs the user already toggled.
#[wasm_bindgen]
pub struct WasmCircuit {
    circuit: ParsedCircuit,
    inputs: SignalMap,
    config: EvaluatorConfig,
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Parse a script. Malformed lines are reported by `diagnostics_json`,
    /// never thrown.
    #[wasm_bindgen(constructor)]
    pub fn new(script: &str) -> WasmCircuit {
        let mut circuit = WasmCircuit {
            circuit: ParsedCircuit::new(),
            inputs: SignalMap::new(),
            config: EvaluatorConfig::default(),
        };
        circuit.set_script(script);
        circuit
    }

    /// Replace the script, keeping the switch state of surviving inputs.
    #[wasm_bindgen]
    pub fn set_script(&mut self, script: &str) {
        self.circuit = dsl::parse(script);
        self.inputs = self
            .circuit
            .inputs()
            .map(|n| (n.id.clone(), self.inputs.get(&n.id).copied().unwrap_or(false)))
            .collect();
    }

    /// Set the maximum relaxation passes per evaluation (default: 100).
    #[wasm_bindgen]
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.config = EvaluatorConfig::new().with_max_iterations(max_iterations);
    }

    /// Set an input switch. Unknown ids are ignored.
    #[wasm_bindgen]
    pub fn set_input(&mut self, id: &str, value: bool) {
        if let Some(slot) = self.inputs.get_mut(id) {
            *slot = value;
        }
    }

    /// Flip an input switch and return its new state, or `undefined` if the
    /// id is not an input.
    #[wasm_bindgen]
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let slot = self.inputs.get_mut(id)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Parse diagnostics as a JSON array of `"Line N: ..."` strings.
    #[wasm_bindgen]
    pub fn diagnostics_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.circuit.messages()).map_err(to_js)
    }

    /// Evaluate with the current switch states; JSON with `nodeOutputs`,
    /// `edgeStates`, `iterations` and `converged`.
    #[wasm_bindgen]
    pub fn evaluate_json(&self) -> Result<String, JsValue> {
        let evaluator = Evaluator::with_config(&self.circuit, self.config.clone());
        serde_json::to_string(&evaluator.evaluate(&self.inputs)).map_err(to_js)
    }

    /// Evaluate and build the canvas view; JSON with `nodes` and `edges`.
    #[wasm_bindgen]
    pub fn view_json(&self) -> Result<String, JsValue> {
        let evaluator = Evaluator::with_config(&self.circuit, self.config.clone());
        let evaluation = evaluator.evaluate(&self.inputs);
        let view = CircuitView::from_netlist(evaluator.netlist(), &self.inputs, &evaluation);
        serde_json::to_string(&view).map_err(to_js)
    }

    /// Canonical text of the current circuit.
    #[wasm_bindgen]
    pub fn format(&self) -> String {
        dsl::format_script(&self.circuit)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Script of a built-in demo circuit, or `undefined` for an unknown id.
#[wasm_bindgen]
pub fn demo_script(id: &str) -> Option<String> {
    crate::demos::find(id).map(|d| d.script.to_string())
}

/// Ids of the built-in demo circuits, as a JSON array.
#[wasm_bindgen]
pub fn demo_ids_json() -> String {
    let ids: Vec<&str> = crate::demos::DEMOS.iter().map(|d| d.id).collect();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_script_keeps_surviving_inputs() {
        let mut circuit = WasmCircuit::new("In A @ 0, 0\nIn B @ 0, 0\nAND g @ 0, 0\nA -> g.a\nB -> g.b");
        assert_eq!(circuit.toggle("A"), Some(true));
        assert_eq!(circuit.toggle("B"), Some(true));

        circuit.set_script("In A @ 0, 0\nIn C @ 0, 0\nOR g @ 0, 0\nA -> g.a\nC -> g.b");
        assert_eq!(circuit.inputs.get("A"), Some(&true));
        assert_eq!(circuit.inputs.get("B"), None);
        assert_eq!(circuit.inputs.get("C"), Some(&false));
    }

    #[test]
    fn test_unknown_ids_ignored() {
        let mut circuit = WasmCircuit::new("In A @ 0, 0\nNOT n @ 0, 0\nA -> n");
        assert_eq!(circuit.toggle("nope"), None);
        assert_eq!(circuit.toggle("n"), None);
        circuit.set_input("nope", true);
        circuit.set_input("A", true);

        let expected: SignalMap = [("A".to_string(), true)].into();
        assert_eq!(circuit.inputs, expected);
    }

    #[test]
    fn test_view_json_tracks_toggles() {
        let mut circuit = WasmCircuit::new("In A @ 0, 0\nOut Y @ 0, 0\nA -> Y");
        circuit.toggle("A");

        let view: serde_json::Value = serde_json::from_str(&circuit.view_json().unwrap()).unwrap();
        assert_eq!(view["nodes"][1]["data"]["value"], true);
        assert_eq!(view["edges"][0]["active"], true);

        let eval: serde_json::Value = serde_json::from_str(&circuit.evaluate_json().unwrap()).unwrap();
        assert_eq!(eval["nodeOutputs"]["Y"], true);
        assert_eq!(eval["converged"], true);
    }
}
