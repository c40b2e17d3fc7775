//! DSL (Domain Specific Language) parser for logic circuit scripts.
//!
//! The language is line-oriented and whitespace-insensitive. Every line is
//! either a node declaration, a connection, a comment, or ignored.
//!
//! # Grammar Overview
//!
//! ```text
//! script      = { line }
//! line        = comment | connection | node | other
//! comment     = '//' { any_char }
//! connection  = slot_ref '->' slot_ref
//! node        = type id { word } '@' int ',' int { option }
//!
//! slot_ref    = id [ '.' slot ]
//! type        = "In" | "Out" | gate
//! gate        = "AND" | "OR" | "NOT" | "NAND" | "NOR" | "XOR" | "XNOR" | "BUF"
//! int         = ['-'] digit+
//! ```
//!
//! A line containing `->` is always a connection, even if it also contains
//! `@`. Lines that match neither form are skipped silently.
//!
//! # Slots
//!
//! | Side | Default | Accepted by |
//! |------|---------|-------------|
//! | source | `out` | every node |
//! | target | `in` | `Out`, `NOT`, `BUF` (`in0` also accepted by gates) |
//! | target | `a` / `in0` | first input of two-input gates |
//! | target | `b` / `in1` | second input of two-input gates |
//!
//! # Example
//!
//! ```text
//! // Half Adder
//! In A @ 60, 40
//! In B @ 60, 180
//! XOR xor1 @ 280, 20
//! AND and1 @ 280, 160
//! Out Sum @ 480, 80
//! Out Carry @ 480, 220
//!
//! A -> xor1.a
//! B -> xor1.b
//! A -> and1.a
//! B -> and1.b
//! xor1 -> Sum
//! and1 -> Carry
//! ```

mod ast;
mod diagnostic;
mod format;
mod parser;
mod scanner;

pub use ast::*;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use format::format_script;
pub use parser::Parser;
pub use scanner::{classify, scan_coordinates, Coordinates, Line, LineKind, Scanner};

/// Parse a circuit script. Never fails; see [`ParsedCircuit::diagnostics`].
pub fn parse(input: &str) -> ParsedCircuit {
    let scanner = Scanner::new(input);
    let mut parser = Parser::new(scanner);
    parser.parse()
}

/// Parse a circuit script file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> crate::error::Result<ParsedCircuit> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::BillyprintsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(parse(&content))
}
