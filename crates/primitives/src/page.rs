use std::fmt;

use crate::PageSize;

/// Current page position of a list.
///
/// Page numbers are 1-based. Changing the page size always returns the list
/// to its first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
	page_number: usize,
	page_size: PageSize,
}

impl PageState {
	/// Creates a page state positioned on page 1.
	pub const fn new(page_size: PageSize) -> Self {
		Self { page_number: 1, page_size }
	}

	/// Returns the 1-based page number.
	pub const fn page_number(&self) -> usize {
		self.page_number
	}

	/// Returns the page size selection.
	pub const fn page_size(&self) -> PageSize {
		self.page_size
	}

	/// Moves to `page`, treating 0 as page 1.
	///
	/// Returns true when the position changed.
	pub fn set_page_number(&mut self, page: usize) -> bool {
		let page = page.max(1);
		let changed = page != self.page_number;
		self.page_number = page;
		changed
	}

	/// Selects a new page size and returns to page 1.
	///
	/// Selecting the current size is a no-op and returns false.
	pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
		if page_size == self.page_size {
			return false;
		}
		self.page_size = page_size;
		self.page_number = 1;
		true
	}

	/// Returns to page 1. Returns true when the position changed.
	pub fn reset(&mut self) -> bool {
		self.set_page_number(1)
	}
}

/// Number of pages needed for `total_count` rows at `effective_size` rows per
/// page. Never less than 1, so an empty list still shows a single page.
pub fn total_pages(total_count: usize, effective_size: usize) -> usize {
	total_count.div_ceil(effective_size.max(1)).max(1)
}

/// One-based, inclusive range of visible entries: "showing `start`–`end` of
/// `total`".
///
/// `start` is 0 exactly when the list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryRange {
	/// First visible entry, or 0 for an empty list.
	pub start: usize,
	/// Last visible entry.
	pub end: usize,
	/// Total number of matching entries.
	pub total: usize,
}

impl EntryRange {
	/// Computes the visible range for `page_number` at `effective_size` rows
	/// per page.
	pub fn new(page_number: usize, effective_size: usize, total_count: usize) -> Self {
		if total_count == 0 {
			return Self::default();
		}
		let size = effective_size.max(1);
		let page = page_number.max(1);
		Self {
			start: (page - 1).saturating_mul(size).saturating_add(1),
			end: page.saturating_mul(size).min(total_count),
			total: total_count,
		}
	}

	/// Returns true when no entries match.
	pub const fn is_empty(&self) -> bool {
		self.total == 0
	}
}

impl fmt::Display for EntryRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}–{} of {}", self.start, self.end, self.total)
	}
}
