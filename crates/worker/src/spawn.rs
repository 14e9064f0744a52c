use std::future::Future;
use std::sync::OnceLock;

use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

/// Error returned when no runtime is available to run a task on.
#[derive(Debug, Clone, Error)]
pub enum SpawnError {
	/// No ambient runtime exists and the fallback runtime failed to start.
	#[error("failed to start fallback runtime: {0}")]
	Runtime(String),
}

fn runtime_handle() -> Result<Handle, SpawnError> {
	if let Ok(handle) = Handle::try_current() {
		return Ok(handle);
	}

	static FALLBACK_RT: OnceLock<Result<Runtime, String>> = OnceLock::new();
	let runtime = FALLBACK_RT.get_or_init(|| {
		Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("scola-worker")
			.build()
			.map_err(|e| e.to_string())
	});
	match runtime {
		Ok(runtime) => Ok(runtime.handle().clone()),
		Err(message) => Err(SpawnError::Runtime(message.clone())),
	}
}

/// Spawns an async task, tagging it with `label` for tracing.
pub fn spawn<F>(label: &'static str, fut: F) -> Result<JoinHandle<F::Output>, SpawnError>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	let handle = runtime_handle()?;
	tracing::trace!(task = label, "worker.spawn");
	Ok(handle.spawn(fut))
}
