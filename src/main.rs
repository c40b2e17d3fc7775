//! Billyprints - Logic Circuit Evaluator
//!
//! Parses a circuit script, settles it under the given inputs and prints the
//! value of every node and wire.
//!
//! # Usage
//!
//! ```bash
//! billyprints adder.bp --set A=1 --set B=0
//! billyprints --demo mux-2to1 --set S=1 --format json
//! billyprints adder.bp --fmt > adder.formatted.bp
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::{info, warn};
use serde::Serialize;

use billyprints_core::{
    circuit::{validate_circuit, Warning},
    demos, dsl,
    error::{BillyprintsError, Result},
    solver::{parse_assignment, Evaluation, Evaluator, EvaluatorConfig, SignalMap, MAX_ITERATIONS},
    ParsedCircuit,
};

/// Combinational logic circuit evaluator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit script
    #[arg(value_name = "SCRIPT_FILE", required_unless_present_any = ["demo", "list_demos"])]
    script_file: Option<PathBuf>,

    /// Evaluate a built-in demo circuit instead of a file
    #[arg(long, value_name = "ID", conflicts_with = "script_file")]
    demo: Option<String>,

    /// List the built-in demo circuits and exit
    #[arg(long)]
    list_demos: bool,

    /// Drive an input, e.g. `--set A=1` (repeatable; unset inputs are low)
    #[arg(short, long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, bool)>,

    /// Maximum relaxation passes
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    max_iterations: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Fail on parse diagnostics or if the circuit does not settle
    #[arg(long)]
    strict: bool,

    /// Print the circuit as canonical script text instead of evaluating it
    #[arg(long)]
    fmt: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Everything printed by `--format json`.
#[derive(Serialize)]
struct Report<'a> {
    diagnostics: Vec<String>,
    warnings: &'a [Warning],
    #[serde(flatten)]
    evaluation: &'a Evaluation,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_demos {
        for demo in demos::DEMOS {
            println!("{:<14} {:<16} {}", demo.id, demo.name, demo.description);
        }
        return Ok(());
    }

    // Load the circuit
    let circuit = match (&args.demo, &args.script_file) {
        (Some(id), _) => {
            let demo = demos::find(id).ok_or_else(|| BillyprintsError::UnknownDemo { id: id.clone() })?;
            dsl::parse(demo.script)
        }
        (None, Some(path)) => dsl::parse_file(path)?,
        (None, None) => unreachable!("clap requires a script file or a demo"),
    };
    info!(
        "loaded {} nodes and {} connections",
        circuit.nodes.len(),
        circuit.connections.len()
    );

    for diagnostic in &circuit.diagnostics {
        eprintln!("{diagnostic}");
    }
    if args.strict {
        if let Some(first) = circuit.diagnostics.first() {
            return Err(BillyprintsError::Diagnostics {
                count: circuit.diagnostics.len(),
                first: first.to_string(),
            });
        }
    }

    if args.fmt {
        print!("{}", dsl::format_script(&circuit));
        return Ok(());
    }

    let warnings = validate_circuit(&circuit);
    for warning in &warnings {
        warn!("{warning}");
    }

    let inputs: SignalMap = args.set.iter().cloned().collect();
    for id in inputs.keys() {
        if !circuit.inputs().any(|n| &n.id == id) {
            warn!("'{id}' is not an input of this circuit; assignment ignored");
        }
    }

    // Evaluate
    let config = EvaluatorConfig::new().with_max_iterations(args.max_iterations);
    let evaluator = Evaluator::with_config(&circuit, config);
    let evaluation = if args.strict {
        evaluator.evaluate_strict(&inputs)?
    } else {
        evaluator.evaluate(&inputs)
    };

    match args.format {
        Format::Text => print_text(&circuit, &evaluation),
        Format::Json => {
            let report = Report {
                diagnostics: circuit.messages(),
                warnings: &warnings,
                evaluation: &evaluation,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn level(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "1",
        Some(false) => "0",
        None => "-",
    }
}

fn print_text(circuit: &ParsedCircuit, evaluation: &Evaluation) {
    let id_width = circuit.nodes.iter().map(|n| n.id.len()).max().unwrap_or(0);
    let type_width = circuit.nodes.iter().map(|n| n.node_type.len()).max().unwrap_or(0);

    println!("Nodes:");
    for node in &circuit.nodes {
        println!(
            "  {:<id_width$}  {:<type_width$}  {}",
            node.id,
            node.node_type,
            level(evaluation.output(&node.id)),
        );
    }

    if !circuit.connections.is_empty() {
        let key_width = circuit.connections.iter().map(|c| c.key().len()).max().unwrap_or(0);
        println!("Edges:");
        for conn in &circuit.connections {
            println!("  {:<key_width$}  {}", conn.key(), level(Some(evaluation.edge(conn))));
        }
    }

    if evaluation.converged {
        println!("settled after {} pass(es)", evaluation.iterations);
    } else {
        println!("did not settle after {} passes", evaluation.iterations);
    }
}

fn init_logging(verbose: u8) {
    let level = match std::env::var("LEVEL").unwrap_or_default().to_uppercase().as_str() {
        "TRACE" => log::LevelFilter::Trace,
        "DEBUG" => log::LevelFilter::Debug,
        "INFO" => log::LevelFilter::Info,
        _ => match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        },
    };

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Err(e) = dispatch.apply() {
        eprintln!("failed to initialize logging: {e}");
    }
}
