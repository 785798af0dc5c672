mod config;

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use debugger::{DebuggerEvent, DebuggerState};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    console::Message,
    domain::{ActionData, CanvasWidgets, MetaState},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tree-tools", about = "Build entity trees and replay debugger events")]
struct Cli {
    /// Overrides the configured tracing filter.
    #[arg(long)]
    log_filter: Option<String>,
    #[arg(long)]
    compact: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    /// JSON array of action records.
    #[arg(long)]
    actions: Option<PathBuf>,
    /// JSON object of widgets keyed by widget id.
    #[arg(long)]
    widgets: Option<PathBuf>,
    /// JSON object of runtime widget state keyed by widget id.
    #[arg(long)]
    meta: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Build {
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
    Invoke {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        path: String,
        args: Vec<String>,
    },
    Debugger {
        #[arg(long)]
        events: PathBuf,
        /// Only print current errors for this entity id.
        #[arg(long)]
        entity: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, config_problem) = config::load_settings();
    let log_filter = cli.log_filter.unwrap_or(settings.log_filter);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    if let Some(problem) = config_problem {
        warn!("{problem}");
    }
    let pretty = settings.pretty_json && !cli.compact;

    match cli.command {
        Command::Build { snapshot } => {
            let tree = load_snapshot(&snapshot)?;
            info!(entities = tree.len(), "entity tree built");
            print_json(&tree, pretty)?;
        }
        Command::Invoke {
            snapshot,
            path,
            args,
        } => {
            let tree = load_snapshot(&snapshot)?;
            let args: Vec<Value> = args.iter().map(|arg| parse_argument(arg)).collect();
            let intent = tree
                .invoke(&path, &args)
                .with_context(|| format!("failed to invoke '{path}'"))?;
            print_json(&intent, pretty)?;
        }
        Command::Debugger { events, entity } => {
            let events: Vec<DebuggerEvent> = read_json(&events)?;
            let count = events.len();
            let state = DebuggerState::replay(events);
            info!(events = count, errors = state.errors.len(), "debugger events replayed");
            match entity {
                Some(entity_id) => {
                    let errors: BTreeMap<&str, &Message> =
                        state.errors_for_entity(&entity_id).collect();
                    print_json(&errors, pretty)?;
                }
                None => print_json(&state, pretty)?,
            }
        }
    }

    Ok(())
}

fn load_snapshot(snapshot: &SnapshotArgs) -> Result<data_tree::DataTree> {
    let actions: Vec<ActionData> = read_optional_json(snapshot.actions.as_deref())?;
    let widgets: CanvasWidgets = read_optional_json(snapshot.widgets.as_deref())?;
    let widgets_meta: MetaState = read_optional_json(snapshot.meta.as_deref())?;
    Ok(data_tree::build(&actions, &widgets, &widgets_meta))
}

fn read_optional_json<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => read_json(path),
        None => Ok(T::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse '{}'", path.display()))
}

/// Arguments that parse as JSON are passed as values, everything else as a
/// plain string, so `tree-tools invoke showAlert hello info` works unquoted.
fn parse_argument(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
