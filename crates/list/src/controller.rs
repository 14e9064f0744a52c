use std::sync::Arc;
use std::time::Instant;

use scola_api::screens::ScreenPreset;
use scola_api::{EnvelopeFields, ListEndpoint, ListParams};
use scola_primitives::{EntryRange, PageSize, PageState, total_pages};
use scola_worker::Seq;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
	ConfigError, FetchOrchestrator, FetchOutcome, ListConfig, PageSizeError, PageSizeResolver, PageWindow, Query, ResultSet,
	SearchDebouncer,
};

/// Observable change produced while driving a [`ListController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
	/// The search quiet period ended; the list went back to page 1.
	///
	/// Also emitted when the text came back to the settled value while the
	/// list was on a later page.
	QuerySettled {
		/// The new settled text.
		query: String,
		/// Request issued for the new query.
		seq: Option<Seq>,
	},
	/// A page replaced the list contents.
	Committed {
		/// Sequence of the committed request.
		seq: Seq,
		/// Total rows reported by the server.
		total_count: usize,
	},
	/// The latest request failed and the list was cleared.
	Failed {
		/// Sequence of the failed request.
		seq: Seq,
		/// User-facing failure message.
		message: String,
	},
}

/// Search, paging and fetch state of one list screen.
///
/// `R` is the row type decoded from the endpoint's envelope.
#[derive(Debug)]
pub struct ListController<R> {
	config: ListConfig,
	debouncer: SearchDebouncer,
	resolver: PageSizeResolver,
	page: PageState,
	fetch: FetchOrchestrator<R>,
}

impl<R> ListController<R> {
	/// Returns the configuration the controller was built with.
	pub fn config(&self) -> &ListConfig {
		&self.config
	}

	/// Returns the raw and settled search text.
	pub fn query(&self) -> &Query {
		self.debouncer.query()
	}

	/// Returns the page position and size selection.
	pub const fn page_state(&self) -> PageState {
		self.page
	}

	/// Returns the rows, total and request status.
	pub fn results(&self) -> &ResultSet<R> {
		self.fetch.results()
	}

	/// Rows of the current page.
	pub fn items(&self) -> &[R] {
		self.fetch.results().items()
	}

	/// Row count sent with the next request.
	pub fn effective_page_size(&self) -> usize {
		// `Fixed(0)` never reaches the page state: `new` validates the default
		// size and `set_page_size` rejects zero.
		self.resolver
			.resolve(self.page.page_size(), self.fetch.results().total_count())
			.unwrap_or(1)
	}

	/// Number of pages for the last reported total, at least 1.
	pub fn total_pages(&self) -> usize {
		total_pages(self.fetch.results().total_count(), self.effective_page_size())
	}

	/// Visible entry range for the current page.
	pub fn entry_range(&self) -> EntryRange {
		EntryRange::new(
			self.page.page_number(),
			self.effective_page_size(),
			self.fetch.results().total_count(),
		)
	}

	/// Pager window around the current page.
	pub fn page_window(&self) -> PageWindow {
		PageWindow::compute(self.page.page_number(), self.total_pages(), self.config.window_radius)
	}

	/// Returns true once [`Self::dispose`] has run.
	pub const fn is_disposed(&self) -> bool {
		self.fetch.is_disposed()
	}

	/// Tears the controller down: cancels the pending search settle and
	/// in-flight requests. Later input and completions are ignored.
	pub fn dispose(&mut self) {
		self.debouncer.dispose();
		self.fetch.dispose();
	}
}

impl<R: DeserializeOwned> ListController<R> {
	/// Creates a controller for `endpoint`. Nothing is fetched until
	/// [`Self::start`].
	///
	/// Fails when `config` does not pass [`ListConfig::validate`].
	pub fn new(endpoint: Arc<dyn ListEndpoint>, fields: EnvelopeFields, config: ListConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let fetch = FetchOrchestrator::new(endpoint, fields, config.request_timeout());
		Ok(Self {
			debouncer: SearchDebouncer::new(config.debounce()),
			resolver: PageSizeResolver::new(config.all_ceiling),
			page: PageState::new(config.default_page_size),
			fetch,
			config,
		})
	}

	/// Creates a controller for a screen preset reached over HTTP.
	pub fn for_screen(preset: &ScreenPreset, base_url: &str, config: ListConfig) -> Result<Self, ConfigError> {
		let endpoint = preset.endpoint(base_url)?.with_timeout(config.request_timeout());
		Self::new(Arc::new(endpoint), preset.fields.clone(), config)
	}

	/// Loads the first page for the current state.
	pub fn start(&mut self) -> Option<Seq> {
		self.issue()
	}

	/// Records search input typed at `now`.
	///
	/// The list is not refetched until the text settles; see [`Self::tick`].
	/// Returns true when the quiet period restarted.
	pub fn set_search(&mut self, raw: &str, now: Instant) -> bool {
		self.debouncer.observe(raw, now)
	}

	/// Moves to `page`, clamped to the known page range.
	///
	/// Returns the issued request, or `None` when the position did not
	/// change.
	pub fn set_page(&mut self, page: usize) -> Option<Seq> {
		if self.is_disposed() {
			return None;
		}
		let page = page.clamp(1, self.total_pages());
		if !self.page.set_page_number(page) {
			return None;
		}
		self.issue()
	}

	/// Moves one page forward.
	pub fn next_page(&mut self) -> Option<Seq> {
		self.set_page(self.page.page_number().saturating_add(1))
	}

	/// Moves one page back.
	pub fn previous_page(&mut self) -> Option<Seq> {
		self.set_page(self.page.page_number().saturating_sub(1))
	}

	/// Selects a page size and returns to page 1.
	///
	/// Selecting the current size issues nothing.
	pub fn set_page_size(&mut self, size: PageSize) -> Result<Option<Seq>, PageSizeError> {
		match size {
			PageSize::Fixed(0) => return Err(PageSizeError::Zero),
			PageSize::Fixed(n) if !self.config.allows(size) => return Err(PageSizeError::NotAllowed(n)),
			_ => {}
		}
		if self.is_disposed() || !self.page.set_page_size(size) {
			return Ok(None);
		}
		Ok(self.issue())
	}

	/// Re-requests the current page without changing any state.
	pub fn refresh(&mut self) -> Option<Seq> {
		self.issue()
	}

	/// Applies a due search settle and every completion that has arrived.
	pub fn tick(&mut self, now: Instant) -> Vec<ListEvent> {
		if self.is_disposed() {
			return Vec::new();
		}
		let mut events = Vec::new();
		events.extend(self.settle(now));
		for outcome in self.fetch.poll_completions() {
			events.push(self.on_outcome(outcome));
		}
		events
	}

	/// Waits for the next search settle or request completion and applies it.
	///
	/// Uses the tokio clock for the debounce deadline. Returns `None` once
	/// the controller is disposed.
	pub async fn next_event(&mut self) -> Option<ListEvent> {
		loop {
			if self.is_disposed() {
				return None;
			}
			let deadline = self.debouncer.deadline();
			let wake_at = deadline.map_or_else(tokio::time::Instant::now, tokio::time::Instant::from_std);

			tokio::select! {
				outcome = self.fetch.recv() => {
					return outcome.map(|outcome| self.on_outcome(outcome));
				}
				_ = tokio::time::sleep_until(wake_at), if deadline.is_some() => {
					if let Some(event) = self.settle(tokio::time::Instant::now().into_std()) {
						return Some(event);
					}
				}
			}
		}
	}

	fn settle(&mut self, now: Instant) -> Option<ListEvent> {
		if !self.debouncer.is_due(now) {
			return None;
		}
		let changed = self.debouncer.poll(now).is_some();
		let moved = self.page.reset();
		if !changed && !moved {
			return None;
		}
		let query = self.debouncer.query().settled().to_string();
		debug!(query = %query, changed, "list.query.settled");
		let seq = self.issue();
		Some(ListEvent::QuerySettled { query, seq })
	}

	fn on_outcome(&mut self, outcome: FetchOutcome) -> ListEvent {
		match outcome {
			FetchOutcome::Committed {
				seq,
				params,
				total_count,
			} => {
				if self.page.page_size().is_all() && total_count > params.page_size {
					debug!(requested = params.page_size, total_count, "list.fetch.all_top_up");
					self.issue();
				} else if total_count > 0 && self.page.page_number() > self.total_pages() {
					let last = self.total_pages();
					debug!(page = self.page.page_number(), last, total_count, "list.page.clamped");
					self.page.set_page_number(last);
					self.issue();
				}
				ListEvent::Committed { seq, total_count }
			}
			FetchOutcome::Failed { seq, error } => ListEvent::Failed {
				seq,
				message: error.to_string(),
			},
		}
	}

	fn issue(&mut self) -> Option<Seq> {
		let params = ListParams::new(
			self.page.page_number(),
			self.effective_page_size(),
			self.debouncer.query().settled(),
		);
		self.fetch.issue(params)
	}
}
