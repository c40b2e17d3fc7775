//! Line scanner for the circuit DSL.
//!
//! The DSL is strictly line-oriented, so instead of a token stream the scanner
//! classifies each trimmed line by the markers it contains (`//`, `->`, `@`)
//! and hands the raw halves to the parser.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading `x, y` pair after the `@` of a node line.
static COORDINATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?[0-9]+)\s*,\s*(-?[0-9]+)").expect("coordinate pattern is valid")
});

/// Classification of a single script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line or `//` comment
    Blank,
    /// `left -> right`, split at the first arrow
    Connection { left: &'a str, right: &'a str },
    /// `head @ tail`, split at the first `@`
    Node { head: &'a str, tail: &'a str },
    /// Anything else; ignored without a diagnostic
    Other,
}

/// A classified line with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub kind: LineKind<'a>,
}

/// Iterator over the classified lines of a script.
pub struct Scanner<'a> {
    lines: std::iter::Enumerate<std::str::Split<'a, char>>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given script. A leading byte-order mark
    /// is skipped.
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            lines: input.split('\n').enumerate(),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, raw) = self.lines.next()?;
        Some(Line {
            number: idx + 1,
            kind: classify(raw),
        })
    }
}

/// Classify one raw line. Arrows take priority over `@`.
pub fn classify(raw: &str) -> LineKind<'_> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with("//") {
        return LineKind::Blank;
    }

    if let Some((left, right)) = line.split_once("->") {
        return LineKind::Connection {
            left: left.trim(),
            right: right.trim(),
        };
    }

    if let Some((head, tail)) = line.split_once('@') {
        return LineKind::Node {
            head: head.trim(),
            tail: tail.trim(),
        };
    }

    LineKind::Other
}

/// Coordinates matched at the start of a node line's tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates<'a> {
    pub x: i64,
    pub y: i64,
    /// Text after the matched pair
    pub rest: &'a str,
}

/// Match a leading `x, y` integer pair. Values outside `i64` do not match.
pub fn scan_coordinates(tail: &str) -> Option<Coordinates<'_>> {
    let caps = COORDINATES.captures(tail)?;
    let x = caps[1].parse().ok()?;
    let y = caps[2].parse().ok()?;
    let end = caps.get(0)?.end();
    Some(Coordinates {
        x,
        y,
        rest: &tail[end..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("  // AND g @ 1, 2"), LineKind::Blank);
        assert_eq!(
            classify("a@1 -> b"),
            LineKind::Connection {
                left: "a@1",
                right: "b"
            }
        );
        assert_eq!(
            classify("AND g1 @ 10, 20"),
            LineKind::Node {
                head: "AND g1",
                tail: "10, 20"
            }
        );
        assert_eq!(classify("hello world"), LineKind::Other);
    }

    #[test]
    fn test_line_numbers() {
        let lines: Vec<_> = Scanner::new("// c\r\n\nIn A @ 0,0").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].number, 3);
        assert!(matches!(lines[2].kind, LineKind::Node { head: "In A", .. }));
    }

    #[test]
    fn test_scan_coordinates() {
        let c = scan_coordinates("-40 ,  120 momentary").unwrap();
        assert_eq!((c.x, c.y), (-40, 120));
        assert_eq!(c.rest, " momentary");

        assert!(scan_coordinates("x, y").is_none());
        assert!(scan_coordinates("10 20").is_none());
        assert!(scan_coordinates("99999999999999999999, 1").is_none());
    }

    #[test]
    fn test_byte_order_mark_skipped() {
        let lines: Vec<_> = Scanner::new("\u{FEFF}In A @ 0, 0\nOut Y @ 1, 1").collect();
        assert_eq!(
            lines[0].kind,
            LineKind::Node {
                head: "In A",
                tail: "0, 0"
            }
        );
        assert_eq!(lines[1].number, 2);

        let ast = crate::dsl::parse("\u{FEFF}In A @ 0, 0");
        assert_eq!(ast.nodes[0].node_type, "In");
    }
}
