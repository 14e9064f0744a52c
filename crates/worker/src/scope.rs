use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::SpawnError;

/// Cancellation scope for work owned by one controller.
///
/// Futures spawned through [`ScopeToken::spawn`] stop at their next await
/// point once the scope is cancelled, resolving to `None`.
#[derive(Debug, Clone, Default)]
pub struct ScopeToken {
	cancel: CancellationToken,
}

impl ScopeToken {
	/// Creates a new, live scope.
	pub fn new() -> Self {
		Self::default()
	}

	/// Requests cancellation of every task spawned in this scope.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Spawns `fut` bound to this scope.
	pub fn spawn<F>(&self, label: &'static str, fut: F) -> Result<JoinHandle<Option<F::Output>>, SpawnError>
	where
		F: Future + Send + 'static,
		F::Output: Send + 'static,
	{
		let cancel = self.cancel.clone();
		crate::spawn(label, async move {
			tokio::select! {
				biased;
				_ = cancel.cancelled() => None,
				out = fut => Some(out),
			}
		})
	}
}
