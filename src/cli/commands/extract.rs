use std::{collections::BTreeSet, fs};

use anyhow::{Context, Result};

use super::helper::load_settings;
use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::cli::args::ExtractCommand;
use crate::core::Tree;

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let settings = load_settings(&cmd.common)?;
    let mut controller = settings.controller();
    controller.scan()?;

    let keys = distinct_keys(controller.tree());
    if let Some(output) = &cmd.output {
        let mut content = keys.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(output, content)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    Ok(CommandResult::new(CommandSummary::Extract(ExtractSummary {
        keys,
        output: cmd.output,
    })))
}

/// Every key text used anywhere in the tree, in ordinal order.
fn distinct_keys(tree: &Tree) -> Vec<String> {
    tree.key_nodes()
        .into_iter()
        .map(|id| tree.node(id).key.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
