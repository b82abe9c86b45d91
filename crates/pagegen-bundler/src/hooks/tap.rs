use crate::compilation::Compilation;
use crate::hooks::completion::{Completion, PendingCompletion};

/// What a handler left behind when it returned.
#[derive(Debug)]
pub enum Outcome {
    /// The handler finished its work before returning
    Done,
    /// The handler finishes later and signals through a [`Completion`]
    Deferred(PendingCompletion),
}

/// A handler registered against a hook.
///
/// Both registration styles reduce to this: synchronous taps return
/// [`Outcome::Done`], completion-based handlers return
/// [`Outcome::Deferred`]. The pipeline only distinguishes the two.
pub trait Subscriber: Send + Sync {
    /// Name used in diagnostics; not required to be unique.
    fn name(&self) -> &str;

    fn call(&self, compilation: &mut Compilation) -> anyhow::Result<Outcome>;
}

type SyncHandler = Box<dyn Fn(&mut Compilation) -> anyhow::Result<()> + Send + Sync>;
type AsyncHandler = Box<dyn Fn(&mut Compilation, Completion) + Send + Sync>;

pub(crate) struct SyncTap {
    name: String,
    handler: SyncHandler,
}

impl SyncTap {
    pub(crate) fn new<F>(name: String, handler: F) -> Self
    where
        F: Fn(&mut Compilation) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name,
            handler: Box::new(handler),
        }
    }
}

impl Subscriber for SyncTap {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, compilation: &mut Compilation) -> anyhow::Result<Outcome> {
        (self.handler)(compilation)?;
        Ok(Outcome::Done)
    }
}

pub(crate) struct AsyncTap {
    name: String,
    handler: AsyncHandler,
}

impl AsyncTap {
    pub(crate) fn new<F>(name: String, handler: F) -> Self
    where
        F: Fn(&mut Compilation, Completion) + Send + Sync + 'static,
    {
        Self {
            name,
            handler: Box::new(handler),
        }
    }
}

impl Subscriber for AsyncTap {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, compilation: &mut Compilation) -> anyhow::Result<Outcome> {
        let (completion, pending) = Completion::channel();
        (self.handler)(compilation, completion);
        Ok(Outcome::Deferred(pending))
    }
}
