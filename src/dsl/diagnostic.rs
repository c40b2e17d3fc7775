//! Per-line parse diagnostics.

use std::fmt;

use serde::Serialize;

/// What was wrong with a script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Either side of `->` resolved to an empty node id
    InvalidConnection,
    /// Fewer than two tokens before `@`
    MissingTypeOrId,
    /// Text after `@` does not start with `x, y`
    InvalidCoordinates,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InvalidConnection => "Invalid connection",
            Self::MissingTypeOrId => "Need TYPE and id",
            Self::InvalidCoordinates => "Invalid coordinates",
        };
        f.write_str(text)
    }
}

/// A diagnostic tied to a 1-based script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.kind)
    }
}
