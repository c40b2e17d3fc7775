//! Parser for the circuit DSL.

use log::debug;

use super::ast::*;
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::scanner::{scan_coordinates, LineKind, Scanner};

/// Parser for circuit scripts.
///
/// Malformed lines are recorded as diagnostics and parsing carries on with
/// the next line, so [`Parser::parse`] always yields a circuit.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given scanner.
    pub fn new(scanner: Scanner<'a>) -> Self {
        Self { scanner }
    }

    /// Parse the entire script.
    pub fn parse(&mut self) -> ParsedCircuit {
        let mut circuit = ParsedCircuit::new();

        for line in self.scanner.by_ref() {
            let result = match line.kind {
                LineKind::Blank | LineKind::Other => Ok(()),
                LineKind::Connection { left, right } => {
                    parse_connection(left, right).map(|c| circuit.connections.push(c))
                }
                LineKind::Node { head, tail } => {
                    parse_node(head, tail).map(|n| circuit.nodes.push(n))
                }
            };

            if let Err(kind) = result {
                circuit.diagnostics.push(Diagnostic::new(line.number, kind));
            }
        }

        debug!(
            "parsed {} nodes, {} connections, {} diagnostics",
            circuit.nodes.len(),
            circuit.connections.len(),
            circuit.diagnostics.len()
        );

        circuit
    }
}

fn parse_connection(left: &str, right: &str) -> Result<Connection, DiagnosticKind> {
    let source = SlotRef::parse(left, DEFAULT_SOURCE_SLOT);
    let target = SlotRef::parse(right, DEFAULT_TARGET_SLOT);

    if source.node.is_empty() || target.node.is_empty() {
        return Err(DiagnosticKind::InvalidConnection);
    }

    Ok(Connection::new(source, target))
}

fn parse_node(head: &str, tail: &str) -> Result<Node, DiagnosticKind> {
    let mut words = head.split_whitespace();
    let (node_type, id) = match (words.next(), words.next()) {
        (Some(t), Some(id)) => (t, id),
        _ => return Err(DiagnosticKind::MissingTypeOrId),
    };

    let coords = scan_coordinates(tail).ok_or(DiagnosticKind::InvalidCoordinates)?;

    Ok(Node {
        id: id.to_string(),
        node_type: node_type.to_string(),
        x: coords.x,
        y: coords.y,
        options: coords.rest.split_whitespace().map(String::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;

    #[test]
    fn test_parse_node() {
        let ast = parse("AND g1 @ 280, -20");
        assert!(ast.diagnostics.is_empty());
        assert_eq!(ast.nodes.len(), 1);
        let node = &ast.nodes[0];
        assert_eq!(node.node_type, "AND");
        assert_eq!(node.id, "g1");
        assert_eq!((node.x, node.y), (280, -20));
        assert!(node.options.is_empty());
    }

    #[test]
    fn test_parse_node_options() {
        let ast = parse("In A @ 60,40   momentary  red ");
        assert_eq!(ast.nodes[0].options, vec!["momentary", "red"]);
        assert!(ast.nodes[0].has_option("momentary"));
    }

    #[test]
    fn test_extra_head_words_ignored() {
        let ast = parse("XOR x1 extra @ 0, 0");
        assert_eq!(ast.nodes[0].id, "x1");
    }

    #[test]
    fn test_default_slots() {
        let ast = parse("A -> B");
        assert_eq!(ast.connections.len(), 1);
        let c = &ast.connections[0];
        assert_eq!((c.source_id.as_str(), c.source_slot.as_str()), ("A", "out"));
        assert_eq!((c.target_id.as_str(), c.target_slot.as_str()), ("B", "in"));
    }

    #[test]
    fn test_explicit_slots() {
        let ast = parse("A.q -> B.d");
        let c = &ast.connections[0];
        assert_eq!(c.source_slot, "q");
        assert_eq!(c.target_slot, "d");
    }

    #[test]
    fn test_arrow_wins_over_at() {
        let ast = parse("AND g @ 1, 2 -> B");
        assert!(ast.nodes.is_empty());
        assert_eq!(ast.connections[0].source_id, "AND g @ 1, 2");
    }

    #[test]
    fn test_invalid_coordinates() {
        let ast = parse("AND g1 @ x, y");
        assert!(ast.nodes.is_empty());
        assert_eq!(ast.diagnostics.len(), 1);
        assert_eq!(ast.diagnostics[0].line, 1);
        assert!(ast.messages()[0].contains("Invalid coordinates"));
    }

    #[test]
    fn test_missing_type_or_id() {
        let ast = parse("\n\nAND @ 1, 2\n@ 3, 4");
        assert_eq!(ast.messages(), vec!["Line 3: Need TYPE and id", "Line 4: Need TYPE and id"]);
    }

    #[test]
    fn test_invalid_connection() {
        let ast = parse("-> B\nA ->\n.x -> B\nA -> B");
        assert_eq!(ast.connections.len(), 1);
        assert_eq!(
            ast.messages(),
            vec![
                "Line 1: Invalid connection",
                "Line 2: Invalid connection",
                "Line 3: Invalid connection"
            ]
        );
    }

    #[test]
    fn test_other_lines_ignored() {
        let ast = parse("define Foo(a) -> (b):\nthis is not a circuit line\n// comment");
        // The define header contains an arrow and becomes a (harmless) connection.
        assert_eq!(ast.connections.len(), 1);
        assert!(ast.nodes.is_empty());
        assert!(ast.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_continues_after_errors() {
        let ast = parse("In A @ 0, 0\nIn B @ a, b\nOut Y @ 1, 1\nA -> Y");
        assert_eq!(ast.nodes.len(), 2);
        assert_eq!(ast.connections.len(), 1);
        assert_eq!(ast.messages(), vec!["Line 2: Invalid coordinates"]);
    }

    #[test]
    fn test_idempotent() {
        let script = "In A @ 0, 0\nNOT n @ 5, 5\nA -> n\nbad @ line\nn -> Q";
        assert_eq!(parse(script), parse(script));
    }
}
