//! Parsed representation of a circuit script.

use serde::Serialize;

use super::diagnostic::Diagnostic;

/// Slot name used for a connection source when none is written.
pub const DEFAULT_SOURCE_SLOT: &str = "out";

/// Slot name used for a connection target when none is written.
pub const DEFAULT_TARGET_SLOT: &str = "in";

/// One circuit element declared as `TYPE id @ x, y [options...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Case-sensitive node name
    pub id: String,
    /// Type keyword as written (`In`, `Out`, or a gate keyword)
    #[serde(rename = "type")]
    pub node_type: String,
    /// Layout x coordinate (renderer only)
    pub x: i64,
    /// Layout y coordinate (renderer only)
    pub y: i64,
    /// Free-form tokens after the coordinates
    pub options: Vec<String>,
}

impl Node {
    /// Whether a free-form option token is present, e.g. `momentary`.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// One directed wire declared as `source[.slot] -> target[.slot]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source_id: String,
    pub source_slot: String,
    pub target_id: String,
    pub target_slot: String,
}

impl Connection {
    /// Build a connection from its two endpoint references.
    pub fn new(source: SlotRef, target: SlotRef) -> Self {
        Self {
            source_id: source.node,
            source_slot: source.slot,
            target_id: target.node,
            target_slot: target.slot,
        }
    }

    /// Edge key `source.slot->target.slot` used by the signal maps.
    pub fn key(&self) -> String {
        format!(
            "{}.{}->{}.{}",
            self.source_id, self.source_slot, self.target_id, self.target_slot
        )
    }
}

/// A `node` or `node.slot` endpoint reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRef {
    pub node: String,
    pub slot: String,
}

impl SlotRef {
    /// Split `text` at its first `.`; without one, the whole text is the node
    /// and `default_slot` is used.
    pub fn parse(text: &str, default_slot: &str) -> Self {
        match text.split_once('.') {
            Some((node, slot)) => Self {
                node: node.trim().to_string(),
                slot: slot.trim().to_string(),
            },
            None => Self {
                node: text.trim().to_string(),
                slot: default_slot.to_string(),
            },
        }
    }
}

/// Result of parsing a script: nodes and connections in declaration order,
/// plus per-line diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCircuit {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedCircuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics rendered as `Line N: ...` strings.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// Whether parsing produced any diagnostics.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// First node declared with `id`.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes of type `In`, in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.node_type == "In")
    }

    /// Nodes of type `Out`, in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.node_type == "Out")
    }
}
