//! Filesystem-backed [`ChangeSource`] built on `notify`.

use std::{
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError},
    },
    thread,
    time::Duration,
};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::trace;

use crate::core::{
    controller::ChangeSource,
    error::{LocalizerError, LocalizerResult},
};

/// Quiet period required before notifications are delivered again.
const RESUME_SETTLE: Duration = Duration::from_millis(100);

/// Watches folders recursively and reports coalesced "something changed"
/// signals.
///
/// Events keep queueing while disabled. Re-enabling discards them once the
/// watcher has been quiet for [`RESUME_SETTLE`], so events for our own writes
/// that notify delivers late are dropped too.
pub struct FsChangeSource {
    _watcher: RecommendedWatcher,
    enabled: AtomicBool,
    events: Receiver<()>,
}

impl FsChangeSource {
    pub fn watch(folders: &[&Path]) -> LocalizerResult<Self> {
        let (tx, rx) = mpsc::channel::<()>();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let Ok(event) = res else {
                    return;
                };
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                trace!(paths = ?event.paths, "change event");
                let _ = tx.send(());
            },
            Config::default(),
        )
        .map_err(|source| LocalizerError::Watch {
            path: folders.first().map(|p| p.to_path_buf()).unwrap_or_default(),
            source,
        })?;

        for folder in folders {
            watcher
                .watch(folder, RecursiveMode::Recursive)
                .map_err(|source| LocalizerError::Watch {
                    path: folder.to_path_buf(),
                    source,
                })?;
        }

        Ok(Self {
            _watcher: watcher,
            enabled: AtomicBool::new(true),
            events: rx,
        })
    }

    /// Block until a change arrives or `timeout` passes. Returns `None` once
    /// the watcher is gone, otherwise whether anything changed.
    ///
    /// A burst of events is folded into one signal: after the first event,
    /// further events are drained until `settle` passes without one.
    ///
    /// While disabled this only sleeps for `timeout` and reports nothing.
    pub fn wait(&self, timeout: Duration, settle: Duration) -> Option<bool> {
        if !self.enabled.load(Ordering::SeqCst) {
            thread::sleep(timeout);
            return Some(false);
        }
        match self.events.recv_timeout(timeout) {
            Ok(()) => {}
            Err(RecvTimeoutError::Timeout) => return Some(false),
            Err(RecvTimeoutError::Disconnected) => return None,
        }
        while self.events.recv_timeout(settle).is_ok() {}
        Some(true)
    }

    /// Discard queued events until `quiet` passes without a new one.
    fn drain(&self, quiet: Duration) {
        while self.events.recv_timeout(quiet).is_ok() {}
    }
}

impl ChangeSource for FsChangeSource {
    fn set_enabled(&self, enabled: bool) {
        if enabled {
            self.drain(RESUME_SETTLE);
        }
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}
