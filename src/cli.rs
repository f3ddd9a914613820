//! Command-line interface for inspecting and editing bindings
//!
//! Supports:
//! - Listing bindings (plain, as a bind script, or as JSON)
//! - Binding and unbinding keys
//! - Looking up a key's command or a command's keys
//! - Resetting to the default game bindings

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::keymap::{
    bind_script, cmd_bind, cmd_unbind, list_bindings, load_bindings_file, run_script,
    upgrade_bindings, ActionBinding, BindingsFile, KeyBindingTable, KeyEvent, KeymapError,
    Phase, CURRENT_BINDINGS_VERSION,
};

/// Inspect and edit game key bindings
#[derive(Parser, Debug)]
#[command(name = "bzkeys", version, about = "Inspect and edit game key bindings")]
pub struct CliArgs {
    /// Bindings file (defaults to ~/.config/bzkeys/bindings.yaml)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// List every binding as "<key> down|up <command>"
    List {
        /// Print JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print the bindings as a bind script
    Script,
    /// Run a bind script of bind/unbind lines
    Run {
        #[arg(value_name = "SCRIPT")]
        path: PathBuf,
    },
    /// Bind a command to a key
    Bind {
        key: String,
        /// `down` or `up`
        state: String,
        #[arg(required = true, num_args = 1..)]
        command: Vec<String>,
    },
    /// Remove a key's binding
    Unbind {
        key: String,
        /// `down` or `up`
        state: String,
    },
    /// Remove every key bound to a command
    UnbindCommand {
        #[arg(required = true, num_args = 1..)]
        command: Vec<String>,
    },
    /// Show the command bound to a key
    Get {
        key: String,
        /// Look at the key release binding
        #[arg(long)]
        release: bool,
    },
    /// Show the keys bound to a command
    Keys {
        #[arg(required = true, num_args = 1..)]
        command: Vec<String>,
        /// Look at key release bindings
        #[arg(long)]
        release: bool,
    },
    /// Replace the game action bindings with the defaults
    Reset,
}

/// Bindings loaded for a CLI session
#[derive(Debug)]
pub struct LoadedBindings {
    pub table: KeyBindingTable,
    /// True when loading changed the bindings (an upgrade) and they should be saved
    pub dirty: bool,
}

/// Load bindings from `path`, falling back to the default game bindings when
/// the file does not exist. Old files are upgraded in place.
pub fn load_table(path: &Path) -> Result<LoadedBindings, KeymapError> {
    let mut table = KeyBindingTable::new();

    if !path.exists() {
        tracing::debug!(
            "Bindings file not found at {}, using defaults",
            path.display()
        );
        ActionBinding::new().reset_bindings(&mut table);
        return Ok(LoadedBindings {
            table,
            dirty: false,
        });
    }

    let file = load_bindings_file(path)?;
    for skipped in file.apply_to(&mut table) {
        eprintln!("Warning: {}", skipped);
    }

    let dirty = file.version < CURRENT_BINDINGS_VERSION;
    if dirty {
        upgrade_bindings(&mut table, file.version);
    }
    Ok(LoadedBindings { table, dirty })
}

/// Result of running one CLI command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    /// Number of binding changes the command made
    pub changes: usize,
}

fn phase_for(release: bool) -> Phase {
    Phase::from_press(!release)
}

fn parse_key(name: &str) -> Result<KeyEvent> {
    name.parse()
        .with_context(|| format!("cannot parse key {:?}", name))
}

/// Run a command against the table
pub fn run_command(table: &mut KeyBindingTable, command: &CliCommand) -> Result<Outcome> {
    let changes = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&changes);
    let id = table.add_callback(move |_, _, _| counter.set(counter.get() + 1));

    let output = dispatch(table, command);
    table.remove_callback(id);

    Ok(Outcome {
        output: output?,
        changes: changes.get(),
    })
}

fn dispatch(table: &mut KeyBindingTable, command: &CliCommand) -> Result<String> {
    match command {
        CliCommand::List { json: false } => Ok(list_bindings(table)),
        CliCommand::List { json: true } => {
            let file = BindingsFile::from_table(table);
            let mut out = serde_json::to_string_pretty(&file.bindings)?;
            out.push('\n');
            Ok(out)
        }
        CliCommand::Script => Ok(bind_script(table)),
        CliCommand::Run { path } => {
            let script = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let errors = run_script(table, &script);
            if let Some((line, first)) = errors.first() {
                bail!(
                    "{}:{}: {} ({} failing lines)",
                    path.display(),
                    line,
                    first,
                    errors.len()
                );
            }
            Ok(String::new())
        }
        CliCommand::Bind {
            key,
            state,
            command,
        } => {
            let mut args = vec![key.clone(), state.clone()];
            args.extend(command.iter().cloned());
            Ok(cmd_bind(table, &args)?)
        }
        CliCommand::Unbind { key, state } => {
            Ok(cmd_unbind(table, &[key.clone(), state.clone()])?)
        }
        CliCommand::UnbindCommand { command } => {
            let removed = table.unbind_command(&command.join(" "));
            Ok(format!("removed {} bindings\n", removed))
        }
        CliCommand::Get { key, release } => {
            let event = parse_key(key)?;
            Ok(format!("{}\n", table.get(&event, phase_for(*release))))
        }
        CliCommand::Keys { command, release } => {
            let keys = table.keys_for_command(&command.join(" "), phase_for(*release));
            Ok(keys.iter().map(|k| format!("{}\n", k)).collect())
        }
        CliCommand::Reset => {
            let mut actions = ActionBinding::new();
            actions.sync_from(table);
            actions.reset_bindings(table);
            Ok(String::new())
        }
    }
}
