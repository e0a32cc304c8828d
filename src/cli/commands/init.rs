use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write a default config file into the current directory. An existing file
/// is left alone and reported as a finding.
pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(CommandResult::new(CommandSummary::Init(InitSummary {
            created: false,
            error: Some(format!("{} already exists", CONFIG_FILE_NAME)),
        }))
        .with_findings(1));
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(CommandResult::new(CommandSummary::Init(InitSummary {
        created: true,
        error: None,
    })))
}
