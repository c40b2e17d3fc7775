//! Core types for the typed circuit view.

use std::fmt;

/// Index of a distinct node id in a [`Netlist`](super::Netlist).
///
/// Nodes declared with the same id share one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(pub usize);

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// The primitive logic gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    /// Buffer (identity)
    Buf,
}

impl GateKind {
    /// All gate kinds, in table order.
    pub const ALL: [GateKind; 8] = [
        Self::And,
        Self::Or,
        Self::Not,
        Self::Nand,
        Self::Nor,
        Self::Xor,
        Self::Xnor,
        Self::Buf,
    ];

    /// Parse a gate keyword, ignoring case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "NAND" => Some(Self::Nand),
            "NOR" => Some(Self::Nor),
            "XOR" => Some(Self::Xor),
            "XNOR" => Some(Self::Xnor),
            "BUF" => Some(Self::Buf),
            _ => None,
        }
    }

    /// Canonical upper-case keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Xnor => "XNOR",
            Self::Buf => "BUF",
        }
    }

    /// Number of inputs the evaluator wires up. Multi-input gates are fixed
    /// at two.
    pub fn arity(&self) -> usize {
        match self {
            Self::Not | Self::Buf => 1,
            _ => 2,
        }
    }

    /// Apply the gate to its input values.
    pub fn eval(&self, inputs: &[bool]) -> bool {
        let first = inputs.first().copied().unwrap_or(false);
        let ones = inputs.iter().filter(|&&v| v).count();
        match self {
            Self::And => inputs.iter().all(|&v| v),
            Self::Or => inputs.iter().any(|&v| v),
            Self::Not => !first,
            Self::Nand => !inputs.iter().all(|&v| v),
            Self::Nor => !inputs.iter().any(|&v| v),
            Self::Xor => ones % 2 == 1,
            Self::Xnor => ones % 2 == 0,
            Self::Buf => first,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// What a node does, derived from its type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `In`: driven by an external input assignment
    Input,
    /// `Out`: copies the signal wired to its `in` slot
    Output,
    /// A primitive gate
    Gate(GateKind),
    /// Accepted by the parser but never produces a value
    Unknown,
}

impl NodeKind {
    /// Classify a node type. `In` and `Out` are case-sensitive; gate keywords
    /// are not.
    pub fn from_type(node_type: &str) -> Self {
        match node_type {
            "In" => Self::Input,
            "Out" => Self::Output,
            other => GateKind::from_keyword(other).map_or(Self::Unknown, Self::Gate),
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_from_type() {
        assert_eq!(NodeKind::from_type("In"), NodeKind::Input);
        assert_eq!(NodeKind::from_type("Out"), NodeKind::Output);
        assert_eq!(NodeKind::from_type("xNoR"), NodeKind::Gate(GateKind::Xnor));
        assert_eq!(NodeKind::from_type("in"), NodeKind::Unknown);
        assert_eq!(NodeKind::from_type("OUT"), NodeKind::Unknown);
        assert_eq!(NodeKind::from_type("HalfAdder"), NodeKind::Unknown);
    }

    #[test]
    fn test_keywords_round_trip() {
        for kind in GateKind::ALL {
            assert_eq!(GateKind::from_keyword(kind.keyword()), Some(kind));
        }
    }

    #[test]
    fn test_two_input_truth_tables() {
        let rows = [[false, false], [false, true], [true, false], [true, true]];
        let expect = |kind: GateKind| -> Vec<bool> { rows.iter().map(|r| kind.eval(r)).collect() };

        assert_eq!(expect(GateKind::And), [false, false, false, true]);
        assert_eq!(expect(GateKind::Or), [false, true, true, true]);
        assert_eq!(expect(GateKind::Nand), [true, true, true, false]);
        assert_eq!(expect(GateKind::Nor), [true, false, false, false]);
        assert_eq!(expect(GateKind::Xor), [false, true, true, false]);
        assert_eq!(expect(GateKind::Xnor), [true, false, false, true]);
    }

    #[test]
    fn test_unary_gates() {
        assert!(!GateKind::Not.eval(&[true]));
        assert!(GateKind::Not.eval(&[false]));
        assert!(GateKind::Buf.eval(&[true]));
        assert!(!GateKind::Buf.eval(&[]));
        assert_eq!(GateKind::Not.arity(), 1);
        assert_eq!(GateKind::Nand.arity(), 2);
    }
}
