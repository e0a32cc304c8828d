use anyhow::Result;

use super::helper::load_settings;
use super::{CommandResult, CommandSummary, ScanSummary};
use crate::cli::args::ScanCommand;

/// Build the key tree once. With `--missing`, every missing translation is a
/// finding.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let settings = load_settings(&cmd.common)?;
    let mut controller = settings.controller();
    controller.scan()?;

    let tree = controller.into_tree();
    let missing = tree.node(tree.root()).missing_count();
    let result = CommandResult::new(CommandSummary::Scan(ScanSummary {
        tree,
        missing_only: cmd.missing,
    }));

    Ok(if cmd.missing {
        result.with_findings(missing)
    } else {
        result
    })
}
