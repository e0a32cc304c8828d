use anyhow::Result;

use super::helper::{load_settings, resolve_key_node};
use super::{CommandResult, CommandSummary, RenameSummary};
use crate::cli::args::RenameCommand;

/// Rename one key node. Without an explicit target the conventional name for
/// the key's folder is used.
pub fn rename(cmd: RenameCommand) -> Result<CommandResult> {
    let settings = load_settings(&cmd.common)?;
    let mut controller = settings.controller();
    controller.scan()?;

    let id = resolve_key_node(controller.tree(), &cmd.key, cmd.file.as_deref())?;
    let new_key = match cmd.new_key {
        Some(new_key) => new_key,
        None => controller.tree().default_key_name(id)?,
    };
    let outcome = controller.rename(id, &new_key)?;

    Ok(CommandResult::new(CommandSummary::Rename(RenameSummary {
        outcome,
        source_root: settings.source_root,
    })))
}
