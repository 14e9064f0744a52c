//! Server-backed, searchable, paginated list controller.
//!
//! # Purpose
//!
//! * Owns the search/page/page-size state of one list screen.
//! * Turns state changes into page requests against a [`ListEndpoint`].
//! * Commits only the response to the most recently issued request.
//! * Derives pager data (total pages, visible range, page window) on demand.
//!
//! # Mental model
//!
//! * [`ListController`] is a single-owner state machine driven by its host:
//!   * setters record intent and issue requests immediately, except search
//!     text, which settles through [`SearchDebouncer`] first.
//!   * [`ListController::tick`] (or [`ListController::next_event`]) applies
//!     due debounce deadlines and finished requests.
//! * Requests run as tasks on the ambient tokio runtime and report back over a
//!   completion channel; results are applied on the owner's thread.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints |
//! |---|---|---|
//! | [`SearchDebouncer`] | raw → settled search text | Must not emit after disposal |
//! | [`PageSizeResolver`] | `Fixed(n)`/`All` → request size | Must reject `Fixed(0)` |
//! | [`PageWindow`] | pager slots with ellipses | Always contains page 1 and the last page |
//! | [`ResponseNormalizer`] | envelope → `{items, total_count}` | Must degrade malformed data to empty/zero |
//! | [`FetchOrchestrator`] | request lifecycle and [`ResultSet`] owner | Must drop stale completions |
//!
//! # Invariants
//!
//! * Page number resets to 1 whenever the settled query or page size changes.
//! * Only the completion carrying the latest sequence number commits.
//! * A successful fetch replaces items and total together.
//! * Nothing mutates state after [`ListController::dispose`].
//!
//! # Lifecycle
//!
//! * Create with [`ListController::new`] or [`ListController::for_screen`].
//! * Call [`ListController::start`] to load the first page.
//! * Feed input through `set_search`, `set_page`, `set_page_size`, `refresh`.
//! * Drive with `tick(now)` from a frame loop, or `next_event().await`.
//! * Call `dispose` (or drop the controller) on teardown.
//!
//! [`ListEndpoint`]: scola_api::ListEndpoint

mod config;
mod controller;
mod debounce;
mod fetch;
mod normalize;
mod page_size;
mod window;

pub use config::{ConfigError, ListConfig};
pub use controller::{ListController, ListEvent};
pub use debounce::{Query, SearchDebouncer};
pub use fetch::{FetchError, FetchOrchestrator, FetchOutcome, FetchStatus, ResultSet};
pub use normalize::{NormalizationError, Normalized, ResponseNormalizer};
pub use page_size::{PageSizeError, PageSizeResolver};
pub use scola_primitives::{EntryRange, PageSize, PageState, total_pages};
pub use window::{PageSlot, PageWindow, PageWindowIter};
