use scola_primitives::PageSize;
use thiserror::Error;

/// Invalid page size selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageSizeError {
	/// A fixed size of zero rows.
	#[error("page size must be positive")]
	Zero,
	/// A fixed size outside the configured choices.
	#[error("page size {0} is not one of the allowed sizes")]
	NotAllowed(usize),
}

/// Resolves a [`PageSize`] selection into the row count sent with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeResolver {
	all_ceiling: usize,
}

impl Default for PageSizeResolver {
	fn default() -> Self {
		Self::new(Self::DEFAULT_ALL_CEILING)
	}
}

impl PageSizeResolver {
	/// Request size used for `All` before the server has reported a total.
	pub const DEFAULT_ALL_CEILING: usize = 10_000;

	/// Creates a resolver with the given `All` fallback ceiling.
	pub const fn new(all_ceiling: usize) -> Self {
		Self {
			all_ceiling: if all_ceiling == 0 { 1 } else { all_ceiling },
		}
	}

	/// Returns the `All` fallback ceiling.
	pub const fn all_ceiling(&self) -> usize {
		self.all_ceiling
	}

	/// Returns the effective page size for `selection`.
	///
	/// `All` resolves to `known_total` once the server has reported one, and
	/// to the fallback ceiling while the total is still 0.
	pub fn resolve(&self, selection: PageSize, known_total: usize) -> Result<usize, PageSizeError> {
		match selection {
			PageSize::Fixed(0) => Err(PageSizeError::Zero),
			PageSize::Fixed(n) => Ok(n),
			PageSize::All if known_total > 0 => Ok(known_total),
			PageSize::All => Ok(self.all_ceiling),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fixed_sizes_pass_through() {
		let resolver = PageSizeResolver::default();
		assert_eq!(resolver.resolve(PageSize::Fixed(25), 0), Ok(25));
		assert_eq!(resolver.resolve(PageSize::Fixed(25), 437), Ok(25));
	}

	#[test]
	fn all_uses_known_total_or_ceiling() {
		let resolver = PageSizeResolver::default();
		assert_eq!(resolver.resolve(PageSize::All, 0), Ok(PageSizeResolver::DEFAULT_ALL_CEILING));
		assert_eq!(resolver.resolve(PageSize::All, 437), Ok(437));
	}

	#[test]
	fn zero_fixed_size_is_rejected() {
		assert_eq!(PageSizeResolver::default().resolve(PageSize::Fixed(0), 10), Err(PageSizeError::Zero));
	}

	#[test]
	fn zero_ceiling_is_raised_to_one() {
		assert_eq!(PageSizeResolver::new(0).resolve(PageSize::All, 0), Ok(1));
	}
}
