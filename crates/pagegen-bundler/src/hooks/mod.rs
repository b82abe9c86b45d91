//! Lifecycle hooks.
//!
//! This module provides:
//! - [`HookEvent`]: the lifecycle points the pipeline fires, in order
//! - [`Hook`]: the taps registered against one event
//! - [`Subscriber`] / [`Outcome`]: the shape every registration style reduces to
//! - [`Completion`]: the one-shot signal handed to deferred handlers

mod completion;
mod event;
mod hook;
mod tap;

pub use completion::{Completion, PendingCompletion};
pub use event::HookEvent;
pub use hook::{Hook, Hooks};
pub use tap::{Outcome, Subscriber};
