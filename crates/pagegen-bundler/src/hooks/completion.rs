use std::time::Duration;

use tokio::sync::oneshot;

use crate::assets::AssetTable;
use crate::source::Source;

type Signal = anyhow::Result<AssetTable>;

/// One-shot completion signal for deferred handlers.
///
/// Signalling consumes the value, so a completion can be signalled at most
/// once. Dropping it without signalling is reported by the pipeline as
/// [`Error::CompletionDropped`](crate::Error::CompletionDropped).
///
/// The handler's borrow of the compilation ends when it returns, so work
/// that finishes later writes through [`Completion::emit_asset`]. Those
/// writes land in the asset table when the completion is signalled, before
/// the next tap runs.
#[derive(Debug)]
pub struct Completion {
    tx: oneshot::Sender<Signal>,
    assets: AssetTable,
}

/// Receiving side of a [`Completion`], awaited by the pipeline.
#[derive(Debug)]
pub struct PendingCompletion {
    rx: oneshot::Receiver<Signal>,
}

pub(crate) enum WaitError {
    Dropped,
    TimedOut(Duration),
}

impl Completion {
    /// Create a completion and the pending side the pipeline waits on.
    pub fn channel() -> (Completion, PendingCompletion) {
        let (tx, rx) = oneshot::channel();
        (
            Completion {
                tx,
                assets: AssetTable::new(),
            },
            PendingCompletion { rx },
        )
    }

    /// Queue an asset write applied when this completion is signalled.
    pub fn emit_asset<S: Source + 'static>(&mut self, name: impl Into<String>, source: S) {
        self.assets.insert(name, source);
    }

    /// Signal success; queued assets are written.
    pub fn done(self) {
        let Completion { tx, assets } = self;
        send(tx, Ok(assets));
    }

    /// Signal failure; queued assets are discarded.
    pub fn fail(self, err: impl Into<anyhow::Error>) {
        send(self.tx, Err(err.into()));
    }

    /// Signal `done` or `fail` depending on `result`.
    pub fn finish(self, result: anyhow::Result<()>) {
        match result {
            Ok(()) => self.done(),
            Err(err) => self.fail(err),
        }
    }
}

fn send(tx: oneshot::Sender<Signal>, signal: Signal) {
    if tx.send(signal).is_err() {
        // The pipeline stopped waiting (timeout) before the work finished.
        tracing::debug!("completion signalled after the pipeline stopped waiting");
    }
}

impl PendingCompletion {
    /// Wait for the completion, bounded by `timeout` when one is set.
    pub(crate) async fn wait(self, timeout: Option<Duration>) -> Result<Signal, WaitError> {
        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.rx)
                .await
                .map_err(|_| WaitError::TimedOut(limit))?,
            None => self.rx.await,
        };
        received.map_err(|_| WaitError::Dropped)
    }
}
