//! Built-in demo circuits.
//!
//! Small classic combinational circuits, handy for trying the DSL and as
//! fixtures in tests.

/// A named demo circuit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demo {
    /// Stable identifier, e.g. `half-adder`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// DSL source
    pub script: &'static str,
}

/// All demos, in menu order.
pub const DEMOS: &[Demo] = &[
    Demo {
        id: "half-adder",
        name: "Half Adder",
        description: "Adds two bits. XOR=Sum, AND=Carry.",
        script: HALF_ADDER,
    },
    Demo {
        id: "full-adder",
        name: "Full Adder",
        description: "Adds 3 bits with carry. Core of ALU.",
        script: FULL_ADDER,
    },
    Demo {
        id: "mux-2to1",
        name: "2:1 Multiplexer",
        description: "S=0 outputs D0, S=1 outputs D1.",
        script: MUX_2TO1,
    },
    Demo {
        id: "mini-cpu",
        name: "Mini CPU",
        description: "A 1-bit ALU and control unit simulation.",
        script: MINI_CPU,
    },
    Demo {
        id: "decoder-2to4",
        name: "2:4 Decoder",
        description: "Binary to one-hot decoder.",
        script: DECODER_2TO4,
    },
];

/// Look up a demo by id.
pub fn find(id: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.id == id)
}

const HALF_ADDER: &str = r#"// Half Adder
In A @ 60, 40
In B @ 60, 180

XOR xor1 @ 280, 20
AND and1 @ 280, 160

Out Sum @ 480, 80
Out Carry @ 480, 220

A -> xor1.a
B -> xor1.b
A -> and1.a
B -> and1.b
xor1 -> Sum
and1 -> Carry


// Try Editing..."#;

const FULL_ADDER: &str = r#"// Full Adder
In A @ 40, 0
In B @ 40, 120
In Cin @ 40, 260

XOR xor1 @ 200, 0
XOR xor2 @ 380, 40
AND and1 @ 200, 160
AND and2 @ 380, 200
OR or1 @ 540, 180

Out Sum @ 560, 40
Out Cout @ 720, 240

A -> xor1.a
B -> xor1.b
xor1 -> xor2.a
Cin -> xor2.b
xor2 -> Sum

A -> and1.a
B -> and1.b
xor1 -> and2.a
Cin -> and2.b
and1 -> or1.a
and2 -> or1.b
or1 -> Cout

// Try Editing..."#;

const MUX_2TO1: &str = r#"// 2:1 Multiplexer
In D0 @ 40, 20
In D1 @ 40, 140
In S @ 40, 280

NOT not1 @ 180, 240
AND and1 @ 320, 20
AND and2 @ 320, 160
OR or1 @ 480, 90

Out Y @ 660, 150

S -> not1
D0 -> and1.a
not1 -> and1.b
D1 -> and2.a
S -> and2.b
  and1 -> or1.a
and2 -> or1.b
or1 -> Y

// Try Editing..."#;

const MINI_CPU: &str = r#"// 1-bit Mini CPU
In OpA @ 40, 40
In OpB @ 40, 140
In Ctrl @ 40, 280

AND and_gate @ 220, 20
XOR xor_gate @ 220, 120
NOT ctrl_inv @ 220, 240

AND sel1 @ 400, 60
AND sel2 @ 400, 180
OR final_out @ 580, 120

Out Result @ 760, 140

OpA -> and_gate.a
OpB -> and_gate.b
OpA -> xor_gate.a
OpB -> xor_gate.b

and_gate -> sel1.a
Ctrl -> sel1.b

xor_gate -> sel2.a
ctrl_inv -> sel2.b
Ctrl -> ctrl_inv

sel1 -> final_out.a
sel2 -> final_out.b
final_out -> Result

// Try Editing..."#;

const DECODER_2TO4: &str = r#"// 2-to-4 Decoder
In A0 @ 40, 80
In A1 @ 40, 240

NOT n0 @ 180, 40
NOT n1 @ 180, 200
AND y0 @ 340, 0
AND y1 @ 340, 100
AND y2 @ 340, 200
AND y3 @ 340, 300

Out Y0 @ 520, 60
Out Y1 @ 520, 160
Out Y2 @ 520, 260
Out Y3 @ 520, 360

A0 -> n0
A1 -> n1
n0 -> y0.a
n1 -> y0.b
A0 -> y1.a
n1 -> y1.b
n0 -> y2.a
A1 -> y2.b
A0 -> y3.a
A1 -> y3.b
y0 -> Y0
y1 -> Y1
y2 -> Y2
y3 -> Y3

// Try Editing..."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;
    use crate::solver::{evaluate, SignalMap};

    fn run(id: &str, pairs: &[(&str, bool)]) -> crate::solver::Evaluation {
        let ast = parse(find(id).unwrap().script);
        assert!(ast.diagnostics.is_empty(), "{id}: {:?}", ast.messages());
        let inputs: SignalMap = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        evaluate(&ast, &inputs)
    }

    #[test]
    fn test_all_demos_parse_and_settle() {
        for demo in DEMOS {
            let ast = parse(demo.script);
            assert!(ast.diagnostics.is_empty(), "{}", demo.id);
            let eval = evaluate(&ast, &SignalMap::new());
            assert!(eval.converged, "{}", demo.id);
            for out in ast.outputs() {
                assert!(eval.output(&out.id).is_some(), "{}: {} unset", demo.id, out.id);
            }
        }
    }

    #[test]
    fn test_full_adder() {
        for bits in 0..8u8 {
            let (a, b, c) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let eval = run("full-adder", &[("A", a), ("B", b), ("Cin", c)]);
            let total = a as u8 + b as u8 + c as u8;
            assert_eq!(eval.output("Sum"), Some(total % 2 == 1), "bits {bits:03b}");
            assert_eq!(eval.output("Cout"), Some(total >= 2), "bits {bits:03b}");
        }
    }

    #[test]
    fn test_mux_selects() {
        let eval = run("mux-2to1", &[("D0", true), ("D1", false), ("S", false)]);
        assert_eq!(eval.output("Y"), Some(true));
        let eval = run("mux-2to1", &[("D0", true), ("D1", false), ("S", true)]);
        assert_eq!(eval.output("Y"), Some(false));
    }

    #[test]
    fn test_decoder_is_one_hot() {
        let eval = run("decoder-2to4", &[("A0", true), ("A1", false)]);
        let lines: Vec<_> = ["Y0", "Y1", "Y2", "Y3"].iter().map(|y| eval.output(y)).collect();
        assert_eq!(lines, [Some(false), Some(true), Some(false), Some(false)]);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("mini-cpu").map(|d| d.name), Some("Mini CPU"));
        assert!(find("nope").is_none());
    }
}
