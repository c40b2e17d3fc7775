//! Bounded fixed-point relaxation.
//!
//! Every pass recomputes each non-input node, in declaration order, from the
//! values known so far. A pass that changes nothing ends the search. The pass
//! count is capped, so combinational feedback stops at the cap with whatever
//! values it has reached rather than looping forever.

use log::trace;

use super::MAX_ITERATIONS;
use crate::circuit::{Inputs, Netlist, NodeKind, Wire};

/// Outcome of a relaxation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settle {
    /// Passes performed
    pub iterations: usize,
    /// Whether the last pass changed nothing
    pub converged: bool,
}

/// Relaxation solver over a [`Netlist`].
#[derive(Debug, Clone)]
pub struct Relaxation {
    /// Maximum number of passes
    pub max_iterations: usize,
}

impl Default for Relaxation {
    fn default() -> Self {
        Self::new()
    }
}

impl Relaxation {
    /// Create a solver with the default pass cap.
    pub fn new() -> Self {
        Self::with_max_iterations(MAX_ITERATIONS)
    }

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Relax `values` (one slot per signal, `None` = not yet known) towards a
    /// fixed point. Input signals must already be seeded.
    pub fn solve(&self, netlist: &Netlist<'_>, values: &mut [Option<bool>]) -> Settle {
        for iter in 0..self.max_iterations {
            let changes = self.pass(netlist, values);
            trace!("relaxation pass {}: {} change(s)", iter + 1, changes);

            if changes == 0 {
                return Settle {
                    iterations: iter + 1,
                    converged: true,
                };
            }
        }

        Settle {
            iterations: self.max_iterations,
            converged: false,
        }
    }

    /// One pass over every node. Returns the number of values that changed.
    fn pass(&self, netlist: &Netlist<'_>, values: &mut [Option<bool>]) -> usize {
        let mut changes = 0;

        for element in netlist.elements() {
            let next = match (element.kind, element.inputs) {
                (NodeKind::Output, Inputs::Single(wire)) => read(values, wire),
                (NodeKind::Gate(gate), Inputs::Single(wire)) => {
                    read(values, wire).map(|v| gate.eval(&[v]))
                }
                // Two-input gates never fire on a single known input.
                (NodeKind::Gate(gate), Inputs::Pair(a, b)) => match (read(values, a), read(values, b)) {
                    (Some(a), Some(b)) => Some(gate.eval(&[a, b])),
                    _ => None,
                },
                _ => None,
            };

            if let Some(value) = next {
                let slot = &mut values[element.signal.0];
                if *slot != Some(value) {
                    *slot = Some(value);
                    changes += 1;
                }
            }
        }

        changes
    }
}

/// Value on a wire, if it exists and its source is known.
fn read(values: &[Option<bool>], wire: Option<Wire>) -> Option<bool> {
    values[wire?.source?.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;

    fn seeded(netlist: &Netlist<'_>, ids: &[(&str, bool)]) -> Vec<Option<bool>> {
        let mut values = vec![None; netlist.num_signals()];
        for (id, v) in ids {
            values[netlist.signal(id).unwrap().0] = Some(*v);
        }
        values
    }

    #[test]
    fn test_reverse_declaration_order_needs_extra_passes() {
        // Declared back to front, so each pass only advances one stage.
        let ast = parse(
            "Out Y @ 0, 0\nNOT n2 @ 0, 0\nNOT n1 @ 0, 0\nIn A @ 0, 0\n\
             A -> n1\nn1 -> n2\nn2 -> Y",
        );
        let net = Netlist::build(&ast);
        let mut values = seeded(&net, &[("A", true)]);

        let settle = Relaxation::new().solve(&net, &mut values);
        assert_eq!(settle, Settle { iterations: 4, converged: true });
        assert_eq!(values[net.signal("Y").unwrap().0], Some(true));
    }

    #[test]
    fn test_oscillator_hits_cap() {
        let ast = parse("NOT osc @ 0, 0\nIn E @ 0, 0\nAND g @ 0, 0\nE -> g.a\nosc -> g.b\ng -> osc");
        let net = Netlist::build(&ast);
        let mut values = seeded(&net, &[("E", true)]);
        values[net.signal("osc").unwrap().0] = Some(false);

        let settle = Relaxation::with_max_iterations(7).solve(&net, &mut values);
        assert_eq!(settle, Settle { iterations: 7, converged: false });
    }

    #[test]
    fn test_single_known_input_does_not_fire() {
        let ast = parse("In A @ 0, 0\nOR g @ 0, 0\nA -> g.a\nmissing -> g.b");
        let net = Netlist::build(&ast);
        let mut values = seeded(&net, &[("A", true)]);

        Relaxation::new().solve(&net, &mut values);
        assert_eq!(values[net.signal("g").unwrap().0], None);
    }
}
