use anyhow::{Result, bail};

use super::helper::{load_settings, matching_key_nodes};
use super::{CommandResult, CommandSummary, TranslateSummary};
use crate::cli::args::TranslateCommand;

/// Store one translation text. All key nodes sharing the key share the
/// catalog entry, so the first match is as good as any.
pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let settings = load_settings(&cmd.common)?;
    let mut controller = settings.controller();
    controller.scan()?;

    let Some(&id) = matching_key_nodes(controller.tree(), &cmd.key, cmd.file.as_deref()).first()
    else {
        bail!("Key \"{}\" is not used in any source file", cmd.key);
    };
    let language = cmd.language.trim().to_lowercase();
    let action = controller.set_translation(id, &language, Some(&cmd.text))?;

    Ok(CommandResult::new(CommandSummary::Translate(TranslateSummary {
        key: cmd.key,
        catalog: controller.store().language_path(&language),
        language,
        action,
    })))
}
