//! Circuit validation.
//!
//! Validation is advisory: evaluation tolerates everything reported here, so
//! the checks return warnings instead of failing.

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use super::graph::{Inputs, Netlist, FIRST_INPUT_SLOTS, OUTPUT_SLOTS, SECOND_INPUT_SLOTS, UNARY_SLOTS};
use super::types::{NodeKind, SignalId};
use crate::dsl::ParsedCircuit;

/// Something suspicious about a circuit that evaluation silently tolerates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Several nodes share an id; later declarations overwrite earlier values
    DuplicateNodeId { id: String, count: usize },
    /// A connection names a source node that was never declared
    UnknownSource { connection: String },
    /// A connection names a target node that was never declared
    UnknownTarget { connection: String },
    /// A node type that is neither `In`, `Out` nor a known gate
    UnknownNodeType { id: String, node_type: String },
    /// A required input slot has no connection
    UnwiredInput { id: String, slots: &'static [&'static str] },
    /// Nodes that feed back into themselves
    FeedbackLoop { nodes: Vec<String> },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNodeId { id, count } => {
                write!(f, "node id '{id}' is declared {count} times")
            }
            Self::UnknownSource { connection } => {
                write!(f, "connection '{connection}' reads from an undeclared node")
            }
            Self::UnknownTarget { connection } => {
                write!(f, "connection '{connection}' drives an undeclared node")
            }
            Self::UnknownNodeType { id, node_type } => {
                write!(f, "node '{id}' has unknown type '{node_type}' and never produces a value")
            }
            Self::UnwiredInput { id, slots } => {
                write!(f, "node '{id}' has nothing connected to {}", slots.join("/"))
            }
            Self::FeedbackLoop { nodes } => {
                write!(f, "combinational feedback loop through {}", nodes.join(", "))
            }
        }
    }
}

/// Check a circuit for problems that evaluation would silently tolerate.
///
/// Checks, in report order:
/// - Duplicate node ids
/// - Connections to or from undeclared nodes
/// - Unknown node types
/// - Outputs and gates with an unwired input
/// - Combinational feedback loops
pub fn validate_circuit(circuit: &ParsedCircuit) -> Vec<Warning> {
    let netlist = Netlist::build(circuit);
    let mut warnings = Vec::new();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for node in &circuit.nodes {
        *counts.entry(node.id.as_str()).or_default() += 1;
    }
    let mut reported = HashSet::new();
    for node in &circuit.nodes {
        let count = counts[node.id.as_str()];
        if count > 1 && reported.insert(node.id.as_str()) {
            warnings.push(Warning::DuplicateNodeId {
                id: node.id.clone(),
                count,
            });
        }
    }

    for conn in &circuit.connections {
        if netlist.signal(&conn.source_id).is_none() {
            warnings.push(Warning::UnknownSource { connection: conn.key() });
        }
        if netlist.signal(&conn.target_id).is_none() {
            warnings.push(Warning::UnknownTarget { connection: conn.key() });
        }
    }

    for element in netlist.elements() {
        let node = &circuit.nodes[element.node];
        let missing: Vec<&'static [&'static str]> = match (element.kind, element.inputs) {
            (NodeKind::Unknown, _) => {
                warnings.push(Warning::UnknownNodeType {
                    id: node.id.clone(),
                    node_type: node.node_type.clone(),
                });
                continue;
            }
            (NodeKind::Output, Inputs::Single(None)) => vec![OUTPUT_SLOTS],
            (NodeKind::Gate(_), Inputs::Single(None)) => vec![UNARY_SLOTS],
            (NodeKind::Gate(_), Inputs::Pair(a, b)) => {
                let mut slots = Vec::new();
                if a.is_none() {
                    slots.push(FIRST_INPUT_SLOTS);
                }
                if b.is_none() {
                    slots.push(SECOND_INPUT_SLOTS);
                }
                slots
            }
            _ => Vec::new(),
        };
        for slots in missing {
            warnings.push(Warning::UnwiredInput {
                id: node.id.clone(),
                slots,
            });
        }
    }

    warnings.extend(feedback_loops(&netlist));
    warnings
}

/// Strongly connected components of the wiring actually read by the
/// evaluator, restricted to real cycles.
fn feedback_loops(netlist: &Netlist<'_>) -> Vec<Warning> {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let nodes: Vec<NodeIndex> = (0..netlist.num_signals()).map(|s| graph.add_node(s)).collect();

    for element in netlist.elements() {
        for wire in element.inputs.wires() {
            if let Some(source) = wire.source {
                graph.update_edge(nodes[source.0], nodes[element.signal.0], ());
            }
        }
    }

    let mut loops: Vec<Vec<usize>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut signals: Vec<usize> = scc.into_iter().map(|n| graph[n]).collect();
            signals.sort_unstable();
            signals
        })
        .collect();
    loops.sort();

    loops
        .into_iter()
        .map(|signals| Warning::FeedbackLoop {
            nodes: signals
                .into_iter()
                .map(|s| netlist.signal_name(SignalId(s)).to_string())
                .collect(),
        })
        .collect()
}
