use serde::Serialize;
use std::io::{Read, Write};
use sylva::SylvaConfig;
use sylva::layout::{Bounds, LayoutEdge, PositionedNode, TopicTreeEngine, engine_from_text};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Sylva(sylva::Error),
    Json(serde_json::Error),
    Findings(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Sylva(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Findings(1) => write!(f, "1 problem found"),
            CliError::Findings(n) => write!(f, "{n} problems found"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<sylva::Error> for CliError {
    fn from(value: sylva::Error) -> Self {
        Self::Sylva(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Outline,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    expand: Vec<String>,
    expand_all: bool,
    pretty: bool,
    verbose: bool,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    nodes: &'a [PositionedNode],
    edges: &'a [LayoutEdge],
    bounds: Option<Bounds>,
}

fn usage() -> &'static str {
    "sylva-cli\n\
\n\
USAGE:\n\
  sylva-cli [layout] [--expand <id>]... [--expand-all] [--pretty] [--config <path>] [--verbose] [<path>|-]\n\
  sylva-cli outline [--expand <id>]... [--expand-all] [--config <path>] [--verbose] [<path>|-]\n\
  sylva-cli check [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a topic tree JSON document; Markdown code fences around it are ignored.\n\
  - --expand clicks the given node; repeat it to drill down. Clicks apply in order.\n\
  - --expand-all applies after the clicks and opens every node with subtopics.\n\
  - --config merges a JSON object over the defaults (e.g. {\"layout\":{\"levelSpacing\":120}}).\n\
  - check exits with status 1 when it reports anything.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "outline" => args.command = Command::Outline,
            "check" => args.command = Command::Check,
            "--pretty" => args.pretty = true,
            "--expand-all" => args.expand_all = true,
            "--verbose" | "-v" => args.verbose = true,
            "--expand" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.expand.push(id.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(path: Option<&str>) -> Result<SylvaConfig, CliError> {
    let Some(path) = path else {
        return Ok(SylvaConfig::defaults());
    };
    let text = std::fs::read_to_string(path)?;
    let overrides: serde_json::Value = serde_json::from_str(&text)?;
    Ok(SylvaConfig::with_overrides(&overrides))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn apply_clicks(engine: &mut TopicTreeEngine, args: &Args) {
    for id in &args.expand {
        if !engine.on_node_click(id) {
            tracing::warn!(id = %id, "--expand ignored: node is not rendered or has no subtopics");
        }
    }
    if args.expand_all {
        engine.expand_all();
    }
}

fn write_outline(engine: &TopicTreeEngine) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    for node in &engine.graph().nodes {
        let marker = match (node.has_children, node.is_expanded) {
            (true, true) => '-',
            (true, false) => '+',
            (false, _) => '*',
        };
        writeln!(
            out,
            "{:indent$}{marker} {} ({})",
            "",
            node.label,
            node.accuracy_percent(),
            indent = node.depth * 2
        )?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let (mut engine, diagnostics) = engine_from_text(&text, &config)?;

    match args.command {
        Command::Check => {
            let mut out = std::io::stdout().lock();
            for d in &diagnostics {
                writeln!(out, "{d}")?;
            }
            if diagnostics.is_empty() {
                Ok(())
            } else {
                Err(CliError::Findings(diagnostics.len()))
            }
        }
        Command::Layout => {
            apply_clicks(&mut engine, &args);
            let graph = engine.graph();
            let out = LayoutOut {
                nodes: &graph.nodes,
                edges: &graph.edges,
                bounds: graph.bounds(engine.config()),
            };
            write_json(&out, args.pretty)
        }
        Command::Outline => {
            apply_clicks(&mut engine, &args);
            write_outline(&engine)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
