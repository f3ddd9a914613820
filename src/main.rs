use anyhow::{Context, Result};
use clap::Parser;

use bzkeys::cli::{load_table, run_command, CliArgs};
use bzkeys::keymap::{save_bindings_file, BindingsFile};

fn main() -> Result<()> {
    bzkeys::tracing::init();

    let args = CliArgs::parse();
    let path = match args.file {
        Some(path) => path,
        None => bzkeys::config_paths::bindings_file()
            .context("no config directory available, pass --file")?,
    };

    let mut loaded = load_table(&path)
        .with_context(|| format!("failed to load bindings from {}", path.display()))?;
    if loaded.dirty {
        tracing::info!("Upgraded bindings in {}", path.display());
    }

    let outcome = run_command(&mut loaded.table, &args.command)?;
    print!("{}", outcome.output);

    if outcome.changes > 0 || loaded.dirty {
        save_bindings_file(&path, &BindingsFile::from_table(&loaded.table))
            .with_context(|| format!("failed to save bindings to {}", path.display()))?;
    }

    Ok(())
}
