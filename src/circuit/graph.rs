//! Resolved wiring of a parsed circuit.

use std::collections::HashMap;

use super::types::{NodeKind, SignalId};
use crate::dsl::{Node, ParsedCircuit};

/// Target slots read by an `Out` node.
pub const OUTPUT_SLOTS: &[&str] = &["in"];

/// Target slots read by `NOT` and `BUF`.
pub const UNARY_SLOTS: &[&str] = &["in", "in0"];

/// Target slots read as the first input of a two-input gate.
pub const FIRST_INPUT_SLOTS: &[&str] = &["in0", "a"];

/// Target slots read as the second input of a two-input gate.
pub const SECOND_INPUT_SLOTS: &[&str] = &["in1", "b"];

/// A connection chosen to drive a node input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wire {
    /// Index into [`ParsedCircuit::connections`]
    pub connection: usize,
    /// Signal of the source node, `None` when the source id names no node
    pub source: Option<SignalId>,
}

/// The inputs a node reads, resolved once per circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inputs {
    /// `In` nodes and unknown types read nothing
    None,
    /// `Out`, `NOT`, `BUF`
    Single(Option<Wire>),
    /// Every other gate
    Pair(Option<Wire>, Option<Wire>),
}

impl Inputs {
    /// Wires that were found, in slot order.
    pub fn wires(&self) -> impl Iterator<Item = Wire> {
        let (a, b) = match *self {
            Inputs::None => (None, None),
            Inputs::Single(a) => (a, None),
            Inputs::Pair(a, b) => (a, b),
        };
        a.into_iter().chain(b)
    }
}

/// One node of the circuit with its kind and resolved inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    /// Index into [`ParsedCircuit::nodes`]
    pub node: usize,
    /// Signal this node writes
    pub signal: SignalId,
    pub kind: NodeKind,
    pub inputs: Inputs,
}

/// A parsed circuit with node ids interned and connections indexed by
/// `(target id, target slot)`.
///
/// Building the index once keeps input lookup independent of the number of
/// connections; the relaxation loop only walks [`Netlist::elements`].
#[derive(Debug)]
pub struct Netlist<'a> {
    circuit: &'a ParsedCircuit,

    /// Node id -> signal (duplicate ids share a signal)
    signal_map: HashMap<&'a str, SignalId>,

    /// Signal -> node id
    signal_names: Vec<&'a str>,

    /// Target id -> target slot -> first connection in declaration order
    slot_index: HashMap<&'a str, HashMap<&'a str, usize>>,

    /// Target id -> first connection on any slot
    first_incoming: HashMap<&'a str, usize>,

    elements: Vec<Element>,
}

impl<'a> Netlist<'a> {
    /// Index a parsed circuit.
    pub fn build(circuit: &'a ParsedCircuit) -> Self {
        let mut signal_map = HashMap::new();
        let mut signal_names = Vec::new();

        for node in &circuit.nodes {
            signal_map.entry(node.id.as_str()).or_insert_with(|| {
                signal_names.push(node.id.as_str());
                SignalId(signal_names.len() - 1)
            });
        }

        let mut slot_index: HashMap<&str, HashMap<&str, usize>> = HashMap::new();
        let mut first_incoming = HashMap::new();
        for (idx, conn) in circuit.connections.iter().enumerate() {
            slot_index
                .entry(conn.target_id.as_str())
                .or_default()
                .entry(conn.target_slot.as_str())
                .or_insert(idx);
            first_incoming.entry(conn.target_id.as_str()).or_insert(idx);
        }

        let mut netlist = Self {
            circuit,
            signal_map,
            signal_names,
            slot_index,
            first_incoming,
            elements: Vec::with_capacity(circuit.nodes.len()),
        };

        netlist.elements = circuit
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| netlist.resolve(idx, node))
            .collect();

        netlist
    }

    fn resolve(&self, idx: usize, node: &Node) -> Element {
        let kind = NodeKind::from_type(&node.node_type);
        let id = node.id.as_str();
        let inputs = match kind {
            NodeKind::Input | NodeKind::Unknown => Inputs::None,
            NodeKind::Output => Inputs::Single(self.wire(id, OUTPUT_SLOTS)),
            NodeKind::Gate(gate) if gate.arity() == 1 => Inputs::Single(self.wire(id, UNARY_SLOTS)),
            NodeKind::Gate(_) => Inputs::Pair(
                self.wire(id, FIRST_INPUT_SLOTS),
                self.wire(id, SECOND_INPUT_SLOTS),
            ),
        };

        Element {
            node: idx,
            signal: self.signal_map[id],
            kind,
            inputs,
        }
    }

    fn wire(&self, target: &str, slots: &[&str]) -> Option<Wire> {
        let connection = self.first_connection(target, slots)?;
        let source = self.signal(&self.circuit.connections[connection].source_id);
        Some(Wire { connection, source })
    }

    /// The earliest-declared connection into `target` on any of `slots`.
    pub fn first_connection(&self, target: &str, slots: &[&str]) -> Option<usize> {
        let by_slot = self.slot_index.get(target)?;
        slots.iter().filter_map(|slot| by_slot.get(*slot).copied()).min()
    }

    /// The earliest-declared connection into `target` on any slot.
    pub fn first_incoming(&self, target: &str) -> Option<usize> {
        self.first_incoming.get(target).copied()
    }

    /// Signal for a node id.
    pub fn signal(&self, id: &str) -> Option<SignalId> {
        self.signal_map.get(id).copied()
    }

    /// Node id for a signal.
    pub fn signal_name(&self, signal: SignalId) -> &'a str {
        self.signal_names[signal.0]
    }

    /// Number of distinct node ids.
    pub fn num_signals(&self) -> usize {
        self.signal_names.len()
    }

    /// Nodes in declaration order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The circuit this netlist indexes.
    pub fn circuit(&self) -> &'a ParsedCircuit {
        self.circuit
    }
}
