//! Dispatches parsed arguments to the command handlers.
//!
//! Returns a `CommandResult` carrying the command summary and its findings,
//! or `Err` when the command could not run (config errors, malformed
//! catalogs, refused renames).

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, extract::extract, init::init, rename::rename, scan::scan, search::search,
        translate::translate, watch::watch,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Rename(cmd)) => rename(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Search(cmd)) => search(cmd),
        Some(Command::Watch(cmd)) => watch(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
