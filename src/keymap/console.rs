//! `bind` / `unbind` console commands and bind scripts
//!
//! ```text
//! bind                                  list every binding
//! bind <button-name> {up|down} <command> <args>...
//! unbind <button-name> {up|down}
//! ```
//!
//! A bind script is one such command per line. It is the format written by
//! [`bind_script`] and read back by [`run_script`].

use std::fmt;

use super::table::KeyBindingTable;
use super::types::{KeyEvent, Phase};

/// Errors from running a console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Usage(&'static str),
    UnknownButton(String),
    IllegalState(String),
    UnknownCommand(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage(usage) => write!(f, "usage: {}", usage),
            CommandError::UnknownButton(name) => {
                write!(f, "bind error:  unknown button name \"{}\"", name)
            }
            CommandError::IllegalState(state) => {
                write!(f, "bind error:  illegal state \"{}\"", state)
            }
            CommandError::UnknownCommand(cmd) => write!(f, "unknown command: {}", cmd),
        }
    }
}

impl std::error::Error for CommandError {}

const BIND_USAGE: &str = "bind <button-name> {up|down} <command> <args>...";
const UNBIND_USAGE: &str = "unbind <button-name> {up|down}";

/// Split a command line into words. Double quotes group words and are removed.
///
/// `\"` and `\\` stand for a literal quote and backslash. Any other backslash
/// is kept as is.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_word = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                match chars.next_if(|next| matches!(next, '"' | '\\')) {
                    Some(escaped) => current.push(escaped),
                    None => current.push(c),
                }
                in_word = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// Run one console command line against the table
///
/// Returns the command's output, which is empty for everything but the
/// listing form of `bind`.
pub fn execute(table: &mut KeyBindingTable, line: &str) -> Result<String, CommandError> {
    let words = tokenize(line);
    let Some((name, args)) = words.split_first() else {
        return Ok(String::new());
    };

    match name.as_str() {
        "bind" => cmd_bind(table, args),
        "unbind" => cmd_unbind(table, args),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn parse_key(name: &str) -> Result<KeyEvent, CommandError> {
    name.parse()
        .map_err(|_| CommandError::UnknownButton(name.to_string()))
}

fn parse_state(state: &str) -> Result<Phase, CommandError> {
    state
        .parse()
        .map_err(|_| CommandError::IllegalState(state.to_string()))
}

/// `bind` with no arguments lists bindings, otherwise binds a command
pub fn cmd_bind(table: &mut KeyBindingTable, args: &[String]) -> Result<String, CommandError> {
    if args.is_empty() {
        return Ok(list_bindings(table));
    }
    if args.len() < 3 {
        return Err(CommandError::Usage(BIND_USAGE));
    }

    let key = parse_key(&args[0])?;
    let phase = parse_state(&args[1])?;
    let command = args[2..].join(" ");

    table.bind(key, phase, command);
    Ok(String::new())
}

/// `unbind <button-name> {up|down}`
pub fn cmd_unbind(table: &mut KeyBindingTable, args: &[String]) -> Result<String, CommandError> {
    if args.len() != 2 {
        return Err(CommandError::Usage(UNBIND_USAGE));
    }

    let key = parse_key(&args[0])?;
    let phase = parse_state(&args[1])?;

    table.unbind(key, phase);
    Ok(String::new())
}

/// One `"<key> down|up <command>"` line per binding
pub fn list_bindings(table: &KeyBindingTable) -> String {
    let mut out = String::new();
    table.iterate(|name, phase, command| {
        out.push_str(&format!("{} {} {}\n", name, phase, command));
    });
    out
}

/// Quote a word so [`tokenize`] reads it back unchanged
fn quote(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 2);
    out.push('"');
    for c in word.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// The table as a script of `bind "<key>" down "<command>"` lines
pub fn bind_script(table: &KeyBindingTable) -> String {
    let mut out = String::new();
    table.iterate(|name, phase, command| {
        out.push_str(&format!("bind {} {} {}\n", quote(name), phase, quote(command)));
    });
    out
}

/// Run a bind script, returning the errors by 1-based line number
///
/// Blank lines and lines starting with `#` are skipped. A failing line does
/// not stop the script.
pub fn run_script(table: &mut KeyBindingTable, script: &str) -> Vec<(usize, CommandError)> {
    let mut errors = Vec::new();
    for (idx, line) in script.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Err(e) = execute(table, trimmed) {
            tracing::warn!("line {}: {}", idx + 1, e);
            errors.push((idx + 1, e));
        }
    }
    errors
}
