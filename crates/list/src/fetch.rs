//! Request lifecycle for one list.
//!
//! Each issued request gets a fresh sequence number from a
//! [`SequenceClock`]. Requests run as scoped tasks and send their outcome back
//! over an unbounded channel; the owner applies completions with
//! [`FetchOrchestrator::poll_completions`] or [`FetchOrchestrator::recv`].
//! A completion commits only while its sequence is still current, so a slow
//! response to an old query can never overwrite a newer one.

use std::sync::Arc;
use std::time::Duration;

use scola_api::{EnvelopeFields, JsonValue, ListEndpoint, ListParams, TransportError};
use scola_worker::{ScopeToken, Seq, SequenceClock};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::normalize::{NormalizationError, Normalized, ResponseNormalizer};

/// Request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
	/// Nothing requested yet.
	#[default]
	Idle,
	/// A request is in flight.
	Loading,
	/// The latest request succeeded.
	Success,
	/// The latest request failed.
	Error,
}

/// Why the latest request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The request could not complete.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The server answered but reported failure.
	#[error(transparent)]
	Server(#[from] NormalizationError),
	/// The request task could not be started.
	#[error("failed to schedule request: {0}")]
	Spawn(String),
}

/// Rows and status of a list.
#[derive(Debug, Clone)]
pub struct ResultSet<R> {
	items: Vec<R>,
	total_count: usize,
	status: FetchStatus,
	error_message: Option<String>,
}

impl<R> Default for ResultSet<R> {
	fn default() -> Self {
		Self {
			items: Vec::new(),
			total_count: 0,
			status: FetchStatus::Idle,
			error_message: None,
		}
	}
}

impl<R> ResultSet<R> {
	/// Rows of the current page.
	pub fn items(&self) -> &[R] {
		&self.items
	}

	/// Total matching rows across all pages.
	pub const fn total_count(&self) -> usize {
		self.total_count
	}

	/// Lifecycle state.
	pub const fn status(&self) -> FetchStatus {
		self.status
	}

	/// Message of the last failure while in [`FetchStatus::Error`].
	pub fn error_message(&self) -> Option<&str> {
		self.error_message.as_deref()
	}

	/// Returns true while a request is in flight.
	pub fn is_loading(&self) -> bool {
		self.status == FetchStatus::Loading
	}
}

/// Result of applying a current completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
	/// A page replaced the result set.
	Committed {
		/// Sequence of the committed request.
		seq: Seq,
		/// Parameters the page was requested with.
		params: ListParams,
		/// Reported total.
		total_count: usize,
	},
	/// The request failed; the result set was cleared.
	Failed {
		/// Sequence of the failed request.
		seq: Seq,
		/// Why it failed.
		error: FetchError,
	},
}

#[derive(Debug)]
struct FetchComplete {
	seq: Seq,
	params: ListParams,
	outcome: Result<JsonValue, FetchError>,
}

/// Issues list requests and owns the [`ResultSet`] they produce.
pub struct FetchOrchestrator<R> {
	endpoint: Arc<dyn ListEndpoint>,
	normalizer: ResponseNormalizer,
	timeout: Duration,
	clock: SequenceClock,
	scope: ScopeToken,
	results: ResultSet<R>,
	completion_tx: mpsc::UnboundedSender<FetchComplete>,
	completion_rx: mpsc::UnboundedReceiver<FetchComplete>,
	disposed: bool,
}

impl<R> std::fmt::Debug for FetchOrchestrator<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FetchOrchestrator")
			.field("endpoint", &self.endpoint.name())
			.field("latest", &self.clock.current())
			.field("status", &self.results.status)
			.field("total_count", &self.results.total_count)
			.field("disposed", &self.disposed)
			.finish()
	}
}

impl<R> FetchOrchestrator<R> {
	/// Returns the current result set.
	pub fn results(&self) -> &ResultSet<R> {
		&self.results
	}

	/// Returns the sequence of the request allowed to commit, if any.
	pub fn latest(&self) -> Option<Seq> {
		self.clock.current()
	}

	/// Returns true once [`Self::dispose`] has run.
	pub const fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// Cancels in-flight requests and refuses all further work.
	///
	/// Completions that still arrive are treated as stale.
	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.disposed = true;
		self.clock.retire();
		self.scope.cancel();
		debug!(endpoint = self.endpoint.name(), "list.fetch.disposed");
	}
}

impl<R> Drop for FetchOrchestrator<R> {
	fn drop(&mut self) {
		self.scope.cancel();
	}
}

impl<R: DeserializeOwned> FetchOrchestrator<R> {
	/// Creates an idle orchestrator for `endpoint`.
	pub fn new(endpoint: Arc<dyn ListEndpoint>, fields: EnvelopeFields, timeout: Duration) -> Self {
		let normalizer = ResponseNormalizer::new(endpoint.name(), fields);
		let (completion_tx, completion_rx) = mpsc::unbounded_channel();
		Self {
			endpoint,
			normalizer,
			timeout,
			clock: SequenceClock::new(),
			scope: ScopeToken::new(),
			results: ResultSet::default(),
			completion_tx,
			completion_rx,
			disposed: false,
		}
	}

	/// Issues a request, superseding any request still in flight.
	///
	/// The previous rows stay visible while loading. Returns `None` after
	/// disposal.
	pub fn issue(&mut self, params: ListParams) -> Option<Seq> {
		if self.disposed {
			return None;
		}
		let seq = self.clock.issue();
		self.results.status = FetchStatus::Loading;
		debug!(
			endpoint = self.endpoint.name(),
			seq = seq.get(),
			page = params.page_number,
			page_size = params.page_size,
			search = params.search.as_deref().unwrap_or(""),
			"list.fetch.issue"
		);

		let endpoint = Arc::clone(&self.endpoint);
		let tx = self.completion_tx.clone();
		let timeout = self.timeout;
		let task_params = params.clone();
		let spawned = self.scope.spawn("list.fetch", async move {
			let outcome = match tokio::time::timeout(timeout, endpoint.fetch(&task_params)).await {
				Ok(outcome) => outcome.map_err(FetchError::from),
				Err(_) => Err(FetchError::Transport(TransportError::Timeout(timeout))),
			};
			let _ = tx.send(FetchComplete {
				seq,
				params: task_params,
				outcome,
			});
		});

		if let Err(error) = spawned {
			let _ = self.completion_tx.send(FetchComplete {
				seq,
				params,
				outcome: Err(FetchError::Spawn(error.to_string())),
			});
		}
		Some(seq)
	}

	/// Applies every completion that has already arrived.
	pub fn poll_completions(&mut self) -> Vec<FetchOutcome> {
		let mut outcomes = Vec::new();
		while let Ok(complete) = self.completion_rx.try_recv() {
			if let Some(outcome) = self.apply(complete) {
				outcomes.push(outcome);
			}
		}
		outcomes
	}

	/// Waits for the next completion that commits or fails, skipping stale
	/// ones. Returns `None` once disposed.
	///
	/// Cancel-safe: a completion is applied in the same poll it is received.
	pub async fn recv(&mut self) -> Option<FetchOutcome> {
		loop {
			if self.disposed {
				return None;
			}
			let complete = self.completion_rx.recv().await?;
			if let Some(outcome) = self.apply(complete) {
				return Some(outcome);
			}
		}
	}

	fn apply(&mut self, complete: FetchComplete) -> Option<FetchOutcome> {
		let FetchComplete { seq, params, outcome } = complete;
		if !self.clock.is_current(seq) {
			trace!(endpoint = self.endpoint.name(), seq = seq.get(), "list.fetch.stale");
			return None;
		}

		let page = outcome.and_then(|raw| self.normalizer.normalize::<R>(raw).map_err(FetchError::from));

		match page {
			Ok(Normalized { items, total_count }) => {
				debug!(
					endpoint = self.endpoint.name(),
					seq = seq.get(),
					rows = items.len(),
					total_count,
					"list.fetch.commit"
				);
				self.results = ResultSet {
					items,
					total_count,
					status: FetchStatus::Success,
					error_message: None,
				};
				Some(FetchOutcome::Committed { seq, params, total_count })
			}
			Err(error) => {
				warn!(endpoint = self.endpoint.name(), seq = seq.get(), %error, "list.fetch.failed");
				self.results = ResultSet {
					items: Vec::new(),
					total_count: 0,
					status: FetchStatus::Error,
					error_message: Some(error.to_string()),
				};
				Some(FetchOutcome::Failed { seq, error })
			}
		}
	}
}
