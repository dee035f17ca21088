mod script;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use shape_transform::handle::{cursor_for_handle, handle_positions};
use shape_transform::{Geometry, Options, OptionsError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid options: {0}")]
    Options(#[from] OptionsError),
}

#[derive(Parser, Debug)]
#[command(name = "transform-cli", about = "Replay gestures through the shape transform engine")]
struct Cli {
    /// JSON file with transform options; overrides options embedded in a script.
    #[arg(long, env = "TRANSFORM_OPTIONS", global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a gesture script and print every emitted event as a JSON line.
    Replay { script: PathBuf },
    /// Print handle centers and cursors for a geometry.
    Handles {
        /// Geometry as JSON, e.g. '{"x":0,"y":0,"width":100,"height":50}'.
        #[arg(long)]
        geometry: String,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = match &cli.options {
        Some(path) => Some(Options::from_json(&read(path)?)?),
        None => None,
    };

    match cli.command {
        Command::Replay { script } => run_replay(&script, options),
        Command::Handles { geometry } => run_handles(&geometry),
    }
}

fn run_replay(path: &Path, options: Option<Options>) -> Result<(), CliError> {
    let recorded: script::Script = serde_json::from_str(&read(path)?)?;
    let options = match options.or(recorded.options) {
        Some(options) => {
            options.validate()?;
            options
        }
        None => Options::default(),
    };
    tracing::info!(events = recorded.events.len(), "replaying script");

    for emitted in script::replay(&recorded, options) {
        println!("{}", serde_json::to_string(&emitted)?);
    }
    Ok(())
}

fn run_handles(geometry: &str) -> Result<(), CliError> {
    let geometry: Geometry = serde_json::from_str(geometry)?;
    let handles: Vec<Value> = handle_positions(&geometry)
        .into_iter()
        .map(|(id, center)| {
            json!({
                "handle": id.name(),
                "x": center.x,
                "y": center.y,
                "cursor": cursor_for_handle(id).as_css(),
            })
        })
        .collect();
    print_json(&Value::Array(handles))
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
