//! Canonical script output.
//!
//! Writes a parsed circuit back to DSL text: nodes first, a blank line, then
//! every connection with both slots spelled out. Diagnostics and lines the
//! parser ignored are not reproduced.

use std::fmt::Write;

use super::ast::ParsedCircuit;

/// Render `circuit` as a script that parses back to the same nodes and
/// connections.
pub fn format_script(circuit: &ParsedCircuit) -> String {
    let mut out = String::new();

    for node in &circuit.nodes {
        let _ = write!(out, "{} {} @ {}, {}", node.node_type, node.id, node.x, node.y);
        for option in &node.options {
            out.push(' ');
            out.push_str(option);
        }
        out.push('\n');
    }

    if !circuit.nodes.is_empty() && !circuit.connections.is_empty() {
        out.push('\n');
    }

    for conn in &circuit.connections {
        let _ = writeln!(
            out,
            "{}.{} -> {}.{}",
            conn.source_id, conn.source_slot, conn.target_id, conn.target_slot
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;

    #[test]
    fn test_format_spells_out_slots() {
        let ast = parse("In A @ 60,40 momentary\n  NOT n @ -1 , 2\nA -> n");
        assert_eq!(
            format_script(&ast),
            "In A @ 60, 40 momentary\nNOT n @ -1, 2\n\nA.out -> n.in\n"
        );
    }

    #[test]
    fn test_format_reparses_to_same_circuit() {
        let ast = parse(crate::demos::find("mini-cpu").unwrap().script);
        let again = parse(&format_script(&ast));
        assert_eq!(again.nodes, ast.nodes);
        assert_eq!(again.connections, ast.connections);
        assert!(again.diagnostics.is_empty());
    }
}
