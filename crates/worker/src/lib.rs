//! Async plumbing shared by list controllers.
//!
//! * [`spawn`]: runs a future on the ambient tokio runtime, falling back to a
//!   small process-wide runtime when called outside one.
//! * [`SequenceClock`]: issues monotonically increasing request sequence
//!   numbers so only the latest request may commit.
//! * [`ScopeToken`]: cancellation scope tying spawned work to its owner's
//!   lifetime.

mod scope;
mod sequence;
mod spawn;

pub use scope::ScopeToken;
pub use sequence::{Seq, SequenceClock};
pub use spawn::{SpawnError, spawn};
