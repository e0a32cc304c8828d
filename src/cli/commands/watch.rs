use std::{fs, time::Duration};

use anyhow::{Context, Result};
use tracing::debug;

use super::helper::load_settings;
use super::{CommandResult, CommandSummary, WatchSummary};
use crate::cli::args::WatchCommand;
use crate::cli::report;
use crate::core::{FsChangeSource, ScanController};

/// How long one wait for file events blocks.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Quiet period that ends a burst of file events.
const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Print the key tree, then again after every change below the source or
/// i18n folder. Runs until the watcher goes away or the process is stopped.
pub fn watch(cmd: WatchCommand) -> Result<CommandResult> {
    let settings = load_settings(&cmd.common)?;
    fs::create_dir_all(&settings.i18n_root)
        .with_context(|| format!("Failed to create {}", settings.i18n_root.display()))?;

    let changes = FsChangeSource::watch(&[&settings.source_root, &settings.i18n_root])?;
    let mut controller =
        ScanController::new(settings.tree_builder(), settings.catalog_store(), changes);

    let mut scan_count = 0;
    match controller.scan() {
        Ok(()) => {
            scan_count += 1;
            report::print_tree(controller.tree(), cmd.missing);
        }
        Err(err) => report::print_error(&err),
    }
    report::print_watching(&settings.source_root, &settings.i18n_root);

    loop {
        match controller.change_source().wait(POLL_INTERVAL, SETTLE_DELAY) {
            None => break,
            Some(false) => continue,
            Some(true) => debug!("changes detected"),
        }
        match controller.on_change_detected() {
            Ok(true) => {
                scan_count += 1;
                report::print_tree(controller.tree(), cmd.missing);
            }
            Ok(false) => {}
            Err(err) => report::print_error(&err),
        }
    }

    Ok(CommandResult::new(CommandSummary::Watch(WatchSummary {
        scan_count,
    })))
}

