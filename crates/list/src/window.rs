//! Pager window: which page buttons to show around the current page.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::RangeInclusive;

/// One pager slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSlot {
	/// A 1-based page button.
	Page(usize),
	/// A gap of one or more elided pages.
	Ellipsis,
}

impl fmt::Display for PageSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Page(n) => write!(f, "{n}"),
			Self::Ellipsis => f.write_str("..."),
		}
	}
}

/// Pager window around the current page.
///
/// The window is a small value; iterating it produces the slots lazily and
/// every call to [`PageWindow::iter`] starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
	current: usize,
	total: usize,
	left: usize,
	right: usize,
}

impl PageWindow {
	/// Number of pages shown on each side of the current page.
	pub const DEFAULT_RADIUS: usize = 2;

	/// Computes the window for `current` out of `total` pages.
	///
	/// `total` is raised to 1 and `current` is clamped into `1..=total`.
	/// Near either end the window snaps to that end and keeps its full width
	/// of `2 * radius + 1` pages where possible.
	pub fn compute(current: usize, total: usize, radius: usize) -> Self {
		let total = total.max(1);
		let current = current.clamp(1, total);
		let width = radius.saturating_mul(2);

		let (left, right) = if current <= radius.saturating_add(1) {
			(1, total.min(width.saturating_add(1)))
		} else if current.saturating_add(radius) >= total {
			(total.saturating_sub(width).max(1), total)
		} else {
			(current - radius, current + radius)
		};

		Self {
			current,
			total,
			left,
			right,
		}
	}

	/// Returns the clamped current page.
	pub const fn current(&self) -> usize {
		self.current
	}

	/// Returns the total page count, at least 1.
	pub const fn total(&self) -> usize {
		self.total
	}

	/// Returns the contiguous run of page buttons around the current page.
	pub const fn range(&self) -> RangeInclusive<usize> {
		self.left..=self.right
	}

	/// Iterates the slots from left to right.
	pub fn iter(&self) -> PageWindowIter {
		PageWindowIter {
			window: *self,
			stage: Stage::First,
		}
	}

	/// Collects the slots.
	pub fn to_vec(&self) -> Vec<PageSlot> {
		self.iter().collect()
	}
}

impl IntoIterator for PageWindow {
	type Item = PageSlot;
	type IntoIter = PageWindowIter;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl IntoIterator for &PageWindow {
	type Item = PageSlot;
	type IntoIter = PageWindowIter;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
	First,
	LeadingGap,
	Run(usize),
	TrailingGap,
	Last,
	Done,
}

/// Iterator over the slots of a [`PageWindow`].
#[derive(Debug, Clone)]
pub struct PageWindowIter {
	window: PageWindow,
	stage: Stage,
}

impl Iterator for PageWindowIter {
	type Item = PageSlot;

	fn next(&mut self) -> Option<PageSlot> {
		let PageWindow { left, right, total, .. } = self.window;
		loop {
			match self.stage {
				Stage::First => {
					self.stage = Stage::LeadingGap;
					if left > 1 {
						return Some(PageSlot::Page(1));
					}
				}
				Stage::LeadingGap => {
					self.stage = Stage::Run(left);
					if left > 2 {
						return Some(PageSlot::Ellipsis);
					}
				}
				Stage::Run(page) if page <= right => {
					self.stage = Stage::Run(page + 1);
					return Some(PageSlot::Page(page));
				}
				Stage::Run(_) => self.stage = Stage::TrailingGap,
				Stage::TrailingGap => {
					self.stage = Stage::Last;
					if right + 1 < total {
						return Some(PageSlot::Ellipsis);
					}
				}
				Stage::Last => {
					self.stage = Stage::Done;
					if right < total {
						return Some(PageSlot::Page(total));
					}
				}
				Stage::Done => return None,
			}
		}
	}
}

impl FusedIterator for PageWindowIter {}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;
	use rstest::rstest;

	use super::PageSlot::{Ellipsis as E, Page as P};
	use super::*;

	fn slots(current: usize, total: usize) -> Vec<PageSlot> {
		PageWindow::compute(current, total, PageWindow::DEFAULT_RADIUS).to_vec()
	}

	#[test]
	fn single_page_has_no_ellipses() {
		assert_eq!(slots(1, 1), vec![P(1)]);
	}

	#[test]
	fn empty_list_still_shows_page_one() {
		assert_eq!(slots(1, 0), vec![P(1)]);
		assert_eq!(slots(4, 0), vec![P(1)]);
	}

	#[rstest]
	#[case(1, vec![P(1), P(2), P(3), P(4), P(5), E, P(10)])]
	#[case(2, vec![P(1), P(2), P(3), P(4), P(5), E, P(10)])]
	#[case(3, vec![P(1), P(2), P(3), P(4), P(5), E, P(10)])]
	#[case(4, vec![P(1), P(2), P(3), P(4), P(5), P(6), E, P(10)])]
	#[case(5, vec![P(1), E, P(3), P(4), P(5), P(6), P(7), E, P(10)])]
	#[case(6, vec![P(1), E, P(4), P(5), P(6), P(7), P(8), E, P(10)])]
	#[case(7, vec![P(1), E, P(5), P(6), P(7), P(8), P(9), P(10)])]
	#[case(8, vec![P(1), E, P(6), P(7), P(8), P(9), P(10)])]
	#[case(9, vec![P(1), E, P(6), P(7), P(8), P(9), P(10)])]
	#[case(10, vec![P(1), E, P(6), P(7), P(8), P(9), P(10)])]
	fn ten_pages_radius_two(#[case] current: usize, #[case] expected: Vec<PageSlot>) {
		assert_eq!(slots(current, 10), expected);
	}

	#[test]
	fn out_of_range_current_is_clamped() {
		assert_eq!(slots(0, 10), slots(1, 10));
		assert_eq!(slots(42, 10), slots(10, 10));
		assert_eq!(PageWindow::compute(42, 10, 2).current(), 10);
	}

	#[test]
	fn small_totals_show_every_page() {
		assert_eq!(slots(2, 3), vec![P(1), P(2), P(3)]);
		assert_eq!(slots(5, 5), vec![P(1), P(2), P(3), P(4), P(5)]);
	}

	#[test]
	fn iteration_restarts() {
		let window = PageWindow::compute(6, 20, 1);
		let first: Vec<_> = window.iter().collect();
		let second: Vec<_> = (&window).into_iter().collect();
		assert_eq!(first, second);
		assert_eq!(first, vec![P(1), E, P(5), P(6), P(7), E, P(20)]);
	}

	#[test]
	fn slot_labels() {
		let labels: Vec<String> = slots(6, 10).iter().map(ToString::to_string).collect();
		assert_eq!(labels, ["1", "...", "4", "5", "6", "7", "8", "...", "10"]);
	}

	proptest! {
		#[test]
		fn window_is_ordered_and_bounded(current in 0usize..300, total in 0usize..300, radius in 1usize..6) {
			let window = PageWindow::compute(current, total, radius);
			let pages: Vec<usize> = window.iter().filter_map(|s| match s {
				PageSlot::Page(n) => Some(n),
				PageSlot::Ellipsis => None,
			}).collect();

			prop_assert_eq!(pages.first().copied(), Some(1));
			prop_assert_eq!(pages.last().copied(), Some(total.max(1)));
			prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
			prop_assert!(pages.contains(&window.current()));

			let slots = window.to_vec();
			prop_assert!(slots.windows(2).all(|w| !(w[0] == PageSlot::Ellipsis && w[1] == PageSlot::Ellipsis)));
		}
	}
}
