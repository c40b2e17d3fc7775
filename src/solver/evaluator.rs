//! Main evaluator interface.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use super::relax::Relaxation;
use super::MAX_ITERATIONS;
use crate::circuit::{Netlist, NodeKind, SignalId};
use crate::dsl::{Connection, ParsedCircuit};
use crate::error::{BillyprintsError, Result};

/// Node id (or edge key) to logic level.
pub type SignalMap = BTreeMap<String, bool>;

/// Configuration for the evaluator.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Maximum relaxation passes per evaluation.
    pub max_iterations: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl EvaluatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of relaxation passes.
    ///
    /// Acyclic circuits settle within one pass per level of logic depth (plus
    /// one confirming pass) when declared in reverse order, and faster when
    /// declared inputs-first.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Settled signal values of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Value of every node that produced one. Nodes never computed are absent.
    pub node_outputs: SignalMap,
    /// Value carried by every connection, keyed by [`Connection::key`].
    pub edge_states: SignalMap,
    /// Relaxation passes performed
    pub iterations: usize,
    /// Whether a fixed point was reached before the pass cap
    pub converged: bool,
}

impl Evaluation {
    /// Value of a node, if it was computed.
    pub fn output(&self, id: &str) -> Option<bool> {
        self.node_outputs.get(id).copied()
    }

    /// Value carried by a connection; `false` if its source was never computed.
    pub fn edge(&self, conn: &Connection) -> bool {
        self.edge_states.get(&conn.key()).copied().unwrap_or(false)
    }
}

/// Evaluates a parsed circuit under different input assignments.
///
/// The wiring index is built once in [`Evaluator::new`]; every call to
/// [`Evaluator::evaluate`] starts from scratch with only the input
/// assignments carried in.
pub struct Evaluator<'a> {
    netlist: Netlist<'a>,
    relaxation: Relaxation,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator for the given circuit with default configuration.
    pub fn new(circuit: &'a ParsedCircuit) -> Self {
        Self::with_config(circuit, EvaluatorConfig::default())
    }

    /// Create a new evaluator for the given circuit with custom configuration.
    pub fn with_config(circuit: &'a ParsedCircuit, config: EvaluatorConfig) -> Self {
        Self {
            netlist: Netlist::build(circuit),
            relaxation: Relaxation::with_max_iterations(config.max_iterations),
        }
    }

    /// Compute the settled value of every node and connection.
    ///
    /// `In` nodes missing from `inputs` are driven low. Assignments for ids
    /// that are not `In` nodes are ignored. Never fails: if the pass cap is
    /// reached the values computed so far are returned with
    /// `converged == false`.
    pub fn evaluate(&self, inputs: &SignalMap) -> Evaluation {
        let netlist = &self.netlist;
        let mut values: Vec<Option<bool>> = vec![None; netlist.num_signals()];

        for element in netlist.elements().iter().filter(|e| e.kind == NodeKind::Input) {
            let id = netlist.signal_name(element.signal);
            values[element.signal.0] = Some(inputs.get(id).copied().unwrap_or(false));
        }

        let settle = self.relaxation.solve(netlist, &mut values);
        if settle.converged {
            debug!("circuit settled after {} pass(es)", settle.iterations);
        } else {
            debug!("circuit still changing after {} passes, returning partial values", settle.iterations);
        }

        let node_outputs: SignalMap = values
            .iter()
            .enumerate()
            .filter_map(|(idx, v)| {
                v.map(|v| (netlist.signal_name(SignalId(idx)).to_string(), v))
            })
            .collect();

        let edge_states: SignalMap = netlist
            .circuit()
            .connections
            .iter()
            .map(|conn| {
                let value = netlist
                    .signal(&conn.source_id)
                    .and_then(|s| values[s.0])
                    .unwrap_or(false);
                (conn.key(), value)
            })
            .collect();

        Evaluation {
            node_outputs,
            edge_states,
            iterations: settle.iterations,
            converged: settle.converged,
        }
    }

    /// Like [`Evaluator::evaluate`], but fails if the circuit did not settle.
    pub fn evaluate_strict(&self, inputs: &SignalMap) -> Result<Evaluation> {
        let evaluation = self.evaluate(inputs);
        if !evaluation.converged {
            return Err(BillyprintsError::convergence_failure(evaluation.iterations));
        }
        Ok(evaluation)
    }

    /// The resolved wiring this evaluator runs on.
    pub fn netlist(&self) -> &Netlist<'a> {
        &self.netlist
    }
}

/// Parse an `ID=VALUE` input assignment. Accepts `1/0`, `true/false`,
/// `on/off` and `high/low`, ignoring case.
pub fn parse_assignment(text: &str) -> Result<(String, bool)> {
    let (id, value) = text
        .split_once('=')
        .ok_or_else(|| BillyprintsError::invalid_assignment(text, "expected ID=VALUE"))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(BillyprintsError::invalid_assignment(text, "empty node id"));
    }

    let value = match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "high" => true,
        "0" | "false" | "off" | "low" => false,
        other => {
            return Err(BillyprintsError::invalid_assignment(
                text,
                format!("'{other}' is not a logic level"),
            ))
        }
    };

    Ok((id.to_string(), value))
}

/// Evaluate `circuit` once with the default configuration.
pub fn evaluate(circuit: &ParsedCircuit, inputs: &SignalMap) -> Evaluation {
    Evaluator::new(circuit).evaluate(inputs)
}
