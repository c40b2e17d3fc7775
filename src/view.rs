//! Renderer-facing view of an evaluated circuit.
//!
//! A node-graph canvas needs positions, a widget type per node, the value on
//! each pin and whether each wire is live. [`CircuitView`] packages exactly
//! that as plain serializable data; layout, dragging and drawing stay with the
//! renderer.

use serde::Serialize;

use crate::circuit::{Netlist, NodeKind, FIRST_INPUT_SLOTS, SECOND_INPUT_SLOTS};
use crate::dsl::{Node, ParsedCircuit};
use crate::solver::{Evaluation, SignalMap};

/// Canvas position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

/// Widget shown for a node, with the values it displays.
///
/// Pin values are `None` when the pin is wired but its source has no value
/// yet, and `Some(false)` when nothing is wired to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Widget {
    /// Toggle switch for an `In` node
    #[serde(rename_all = "camelCase")]
    InputNode { label: String, value: bool },
    /// Lamp for an `Out` node
    #[serde(rename_all = "camelCase")]
    OutputNode { label: String, value: Option<bool> },
    /// Single-input gate (`NOT`, `BUF`)
    #[serde(rename_all = "camelCase")]
    NotGateNode {
        label: String,
        input: Option<bool>,
        output: Option<bool>,
    },
    /// Two-input gate; unknown node types are drawn this way too
    #[serde(rename_all = "camelCase")]
    GateNode {
        label: String,
        input_a: Option<bool>,
        input_b: Option<bool>,
        output: Option<bool>,
    },
}

/// One node on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewNode {
    pub id: String,
    pub position: Position,
    pub data: Widget,
}

/// One wire on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEdge {
    /// Edge key, `source.slot->target.slot`
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
    /// Whether the wire carries a high level
    pub active: bool,
}

/// Everything a renderer needs to draw one evaluated circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitView {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

impl CircuitView {
    /// Build the view from a circuit, the input assignments it was evaluated
    /// with, and the evaluation result.
    pub fn build(circuit: &ParsedCircuit, inputs: &SignalMap, evaluation: &Evaluation) -> Self {
        Self::from_netlist(&Netlist::build(circuit), inputs, evaluation)
    }

    /// Like [`CircuitView::build`], reusing an already built wiring index
    /// such as [`Evaluator::netlist`](crate::solver::Evaluator::netlist).
    pub fn from_netlist(netlist: &Netlist<'_>, inputs: &SignalMap, evaluation: &Evaluation) -> Self {
        let circuit = netlist.circuit();

        let nodes = circuit
            .nodes
            .iter()
            .map(|node| ViewNode {
                id: node.id.clone(),
                position: Position { x: node.x, y: node.y },
                data: widget(netlist, node, inputs, evaluation),
            })
            .collect();

        let edges = circuit
            .connections
            .iter()
            .map(|conn| ViewEdge {
                id: conn.key(),
                source: conn.source_id.clone(),
                source_handle: conn.source_slot.clone(),
                target: conn.target_id.clone(),
                target_handle: conn.target_slot.clone(),
                active: evaluation.edge(conn),
            })
            .collect();

        Self { nodes, edges }
    }
}

fn widget(netlist: &Netlist<'_>, node: &Node, inputs: &SignalMap, evaluation: &Evaluation) -> Widget {
    // Value seen through a connection: unwired pins read low, wired pins
    // read whatever their source produced (possibly nothing yet).
    let pin = |connection: Option<usize>| match connection {
        Some(idx) => evaluation.output(&netlist.circuit().connections[idx].source_id),
        None => Some(false),
    };

    match NodeKind::from_type(&node.node_type) {
        NodeKind::Input => Widget::InputNode {
            label: node.id.clone(),
            value: inputs.get(&node.id).copied().unwrap_or(false),
        },
        NodeKind::Output => Widget::OutputNode {
            label: node.id.clone(),
            value: evaluation.output(&node.id),
        },
        NodeKind::Gate(gate) if gate.arity() == 1 => Widget::NotGateNode {
            label: node.node_type.clone(),
            input: pin(netlist.first_incoming(&node.id)),
            output: evaluation.output(&node.id),
        },
        NodeKind::Gate(_) | NodeKind::Unknown => Widget::GateNode {
            label: node.node_type.clone(),
            input_a: pin(netlist.first_connection(&node.id, FIRST_INPUT_SLOTS)),
            input_b: pin(netlist.first_connection(&node.id, SECOND_INPUT_SLOTS)),
            output: evaluation.output(&node.id),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;
    use crate::solver::evaluate;

    #[test]
    fn test_half_adder_view() {
        let ast = parse(crate::demos::find("half-adder").unwrap().script);
        let inputs: SignalMap = [("A".to_string(), true), ("B".to_string(), false)].into();
        let eval = evaluate(&ast, &inputs);
        let view = CircuitView::build(&ast, &inputs, &eval);

        assert_eq!(view.nodes.len(), 6);
        assert_eq!(view.nodes[0].position, Position { x: 60, y: 40 });
        assert_eq!(
            view.nodes[2].data,
            Widget::GateNode {
                label: "XOR".to_string(),
                input_a: Some(true),
                input_b: Some(false),
                output: Some(true),
            }
        );
        assert_eq!(
            view.nodes[4].data,
            Widget::OutputNode {
                label: "Sum".to_string(),
                value: Some(true)
            }
        );

        assert_eq!(view.edges.len(), 6);
        assert_eq!(view.edges[0].id, "A.out->xor1.a");
        assert!(view.edges[0].active);
        assert!(!view.edges[1].active);
    }

    #[test]
    fn test_unwired_and_pending_pins() {
        let ast = parse("NOT n @ 0, 0\nAND g @ 0, 0\nghost -> g.a");
        let eval = evaluate(&ast, &SignalMap::new());
        let view = CircuitView::build(&ast, &SignalMap::new(), &eval);

        assert_eq!(
            view.nodes[0].data,
            Widget::NotGateNode {
                label: "NOT".to_string(),
                input: Some(false),
                output: None
            }
        );
        assert_eq!(
            view.nodes[1].data,
            Widget::GateNode {
                label: "AND".to_string(),
                input_a: None,
                input_b: Some(false),
                output: None
            }
        );
    }

    #[test]
    fn test_serialized_shape() {
        let ast = parse("In A @ 1, 2\nOut Y @ 3, 4\nA -> Y");
        let inputs: SignalMap = [("A".to_string(), true)].into();
        let eval = evaluate(&ast, &inputs);
        let json = serde_json::to_value(CircuitView::build(&ast, &inputs, &eval)).unwrap();

        assert_eq!(json["nodes"][0]["data"]["type"], "inputNode");
        assert_eq!(json["nodes"][1]["data"]["value"], true);
        assert_eq!(json["edges"][0]["sourceHandle"], "out");
        assert_eq!(json["edges"][0]["active"], true);
    }

    #[test]
    fn test_view_from_evaluator_index() {
        let ast = parse("In A @ 0, 0\nNOT n @ 0, 0\nBUF b @ 0, 0\nA -> n.in0\nn -> b");
        let inputs: SignalMap = [("A".to_string(), true)].into();
        let evaluator = crate::solver::Evaluator::new(&ast);
        let eval = evaluator.evaluate(&inputs);
        let view = CircuitView::from_netlist(evaluator.netlist(), &inputs, &eval);

        assert_eq!(view, CircuitView::build(&ast, &inputs, &eval));
        assert_eq!(
            view.nodes[1].data,
            Widget::NotGateNode {
                label: "NOT".to_string(),
                input: Some(true),
                output: Some(false)
            }
        );
        assert_eq!(
            view.nodes[2].data,
            Widget::NotGateNode {
                label: "BUF".to_string(),
                input: Some(false),
                output: Some(false)
            }
        );
    }
}
