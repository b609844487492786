use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sitelist::{Config, ParsedXml, Resolver};

#[derive(Debug, Parser)]
#[command(
    name = "sitelist",
    version,
    about = "Resolve Enterprise Mode / site-list XML into browser handoff rules"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Lines)]
    format: OutputFormat,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Maximum element nesting depth (0 means the built-in ceiling)
    #[arg(long, default_value_t = Config::default().max_depth)]
    max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    #[arg(long, default_value_t = Config::default().max_size)]
    max_size: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `[!]pattern` rule per line
    Lines,
    /// `{"rules": [...], "error": ...}`
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(Args::parse()).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let xml = read_input(&args.input)?;
    let resolver = Resolver::with_config(Config::new(args.max_depth, args.max_size));
    let parsed = resolver.resolve(xml).await;

    let rendered = render(&parsed, args.format)?;
    write_output(&args.output, rendered.as_bytes())?;

    if let Some(err) = parsed.error {
        bail!("no usable site list: {err}");
    }
    info!(rules = parsed.rules.len(), "site list resolved");
    Ok(())
}

fn render(parsed: &ParsedXml, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Lines => Ok(parsed
            .rule_strings()
            .iter()
            .map(|rule| format!("{rule}\n"))
            .collect()),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(parsed).context("failed to serialize result")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
