//! Directory watch session.
//!
//! A [`WatchSession`] owns the filesystem observer for one directory and
//! feeds creation events into a single dispatch loop. The observer callback
//! only forwards raw events over a channel; all filtering and every pipeline
//! run happen on the loop thread, so regenerations are serialized by
//! construction and can never race on the output artifact.
//!
//! Event filtering (depth, dotfiles, self-generated artifact, image check)
//! lives in [`should_trigger`] as a pure function, so the loop's behavior is
//! testable by feeding synthetic paths without a real watcher.

use crate::classify;
use crate::pipeline::Pipeline;
use crate::publish::Vcs;
use log::{error, info, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("failed to watch directory: {0}")]
    Notify(#[from] notify::Error),
}

/// Live subscription to creation events for one directory.
///
/// The watcher handle must stay alive for events to flow; dropping the
/// session tears the subscription down. `notify` delivers no events for
/// pre-existing files, so the session is active as soon as `start` returns.
pub struct WatchSession {
    dir: PathBuf,
    // Held for its Drop; events arrive via rx.
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl WatchSession {
    /// Register the observer on `dir` (direct children only).
    pub fn start(dir: PathBuf) -> Result<Self, WatchError> {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // Receiver gone means the session is shutting down.
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            dir,
            _watcher: watcher,
            rx,
        })
    }

    /// Consume events until the subscription dies, running the pipeline once
    /// per qualifying image addition.
    ///
    /// A failing run is logged and does not stop the loop — the next
    /// qualifying event gets a fresh attempt.
    pub fn run<V: Vcs>(self, pipeline: &Pipeline<V>) -> Result<(), WatchError> {
        info!("watching {} for new images", self.dir.display());

        for result in &self.rx {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    warn!("watch event error: {e}");
                    continue;
                }
            };
            if !matches!(event.kind, EventKind::Create(_)) {
                continue;
            }
            for path in &event.paths {
                dispatch(path, &self.dir, pipeline);
            }
        }

        Ok(())
    }
}

/// Handle one added path: filter, then run the full pipeline synchronously.
fn dispatch<V: Vcs>(path: &Path, dir: &Path, pipeline: &Pipeline<V>) {
    if !should_trigger(path, dir, pipeline.output_name()) {
        return;
    }
    info!("image added: {}", path.display());
    if let Err(e) = pipeline.run() {
        error!("regeneration failed: {e}");
    }
}

/// Whether an added path should trigger a regeneration.
///
/// Rejects, in order: paths outside the watched directory or deeper than its
/// direct children, the output artifact itself (self-generated events would
/// otherwise loop forever), dotfiles and version-control internals, and
/// anything the classifier does not recognize as an image.
fn should_trigger(path: &Path, dir: &Path, output_name: &str) -> bool {
    let Ok(rel) = path.strip_prefix(dir) else {
        return false;
    };
    if rel.components().count() != 1 {
        return false;
    }
    let Some(name) = rel.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name == output_name || name.starts_with('.') {
        return false;
    }
    classify::is_image(path)
}
