use std::time::Duration;

use crate::compilation::Compilation;
use crate::hooks::completion::{Completion, WaitError};
use crate::hooks::event::HookEvent;
use crate::hooks::tap::{AsyncTap, Outcome, Subscriber, SyncTap};
use crate::{Error, Result};

/// Handlers registered against one lifecycle event.
///
/// Handlers run in registration order, one at a time. The first failure
/// stops the hook; later taps do not run.
pub struct Hook {
    event: HookEvent,
    taps: Vec<Box<dyn Subscriber>>,
}

impl Hook {
    pub(crate) fn new(event: HookEvent) -> Self {
        Self {
            event,
            taps: Vec::new(),
        }
    }

    pub fn event(&self) -> HookEvent {
        self.event
    }

    /// Register a synchronous handler.
    ///
    /// The pipeline continues as soon as `handler` returns. Work it spawns in
    /// the background is not awaited and may finish after output is written.
    pub fn tap<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut Compilation) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(SyncTap::new(name.into(), handler));
    }

    /// Register a handler that signals through a [`Completion`].
    ///
    /// The pipeline waits for the completion before running the next tap.
    pub fn tap_async<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut Compilation, Completion) + Send + Sync + 'static,
    {
        self.subscribe(AsyncTap::new(name.into(), handler));
    }

    /// Register a custom [`Subscriber`].
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) {
        tracing::trace!(hook = %self.event, plugin = subscriber.name(), "tap registered");
        self.taps.push(Box::new(subscriber));
    }

    pub fn is_used(&self) -> bool {
        !self.taps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Names of the registered taps, in firing order.
    pub fn tap_names(&self) -> impl Iterator<Item = &str> {
        self.taps.iter().map(|tap| tap.name())
    }

    /// Run every tap against `compilation`.
    ///
    /// Deferred taps are awaited (bounded by `timeout`) and their queued
    /// asset writes applied before the next tap runs.
    pub(crate) async fn call(
        &self,
        compilation: &mut Compilation,
        timeout: Option<Duration>,
    ) -> Result<()> {
        for tap in &self.taps {
            let plugin = tap.name();
            tracing::debug!(hook = %self.event, plugin, "calling tap");

            let outcome = tap
                .call(compilation)
                .map_err(|err| Error::plugin(plugin, self.event, err))?;

            let Outcome::Deferred(pending) = outcome else {
                continue;
            };

            match pending.wait(timeout).await {
                Ok(Ok(assets)) => compilation.assets_mut().merge(assets),
                Ok(Err(err)) => return Err(Error::plugin(plugin, self.event, err)),
                Err(WaitError::Dropped) => {
                    return Err(Error::CompletionDropped {
                        plugin: plugin.to_string(),
                        hook: self.event,
                    });
                }
                Err(WaitError::TimedOut(timeout)) => {
                    tracing::warn!(hook = %self.event, plugin, ?timeout, "completion never signalled");
                    return Err(Error::CompletionTimeout {
                        plugin: plugin.to_string(),
                        hook: self.event,
                        timeout,
                    });
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hook")
            .field("event", &self.event)
            .field("taps", &self.tap_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Every hook the pipeline fires.
#[derive(Debug)]
pub struct Hooks {
    pub compilation: Hook,
    pub emit: Hook,
    pub after_emit: Hook,
    pub done: Hook,
}

impl Hooks {
    pub fn new() -> Self {
        Self {
            compilation: Hook::new(HookEvent::Compilation),
            emit: Hook::new(HookEvent::Emit),
            after_emit: Hook::new(HookEvent::AfterEmit),
            done: Hook::new(HookEvent::Done),
        }
    }

    pub fn get(&self, event: HookEvent) -> &Hook {
        match event {
            HookEvent::Compilation => &self.compilation,
            HookEvent::Emit => &self.emit,
            HookEvent::AfterEmit => &self.after_emit,
            HookEvent::Done => &self.done,
        }
    }

    pub fn get_mut(&mut self, event: HookEvent) -> &mut Hook {
        match event {
            HookEvent::Compilation => &mut self.compilation,
            HookEvent::Emit => &mut self.emit,
            HookEvent::AfterEmit => &mut self.after_emit,
            HookEvent::Done => &mut self.done,
        }
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self::new()
    }
}
