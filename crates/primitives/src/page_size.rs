use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rows-per-page selection for a paginated list.
///
/// `All` is a sentinel meaning "every matching row on one page"; it is
/// resolved into a concrete size only when a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
	/// A fixed number of rows per page.
	Fixed(usize),
	/// Every matching row on a single page.
	All,
}

impl PageSize {
	/// Returns the fixed row count, or `None` for [`PageSize::All`].
	pub const fn fixed(self) -> Option<usize> {
		match self {
			Self::Fixed(n) => Some(n),
			Self::All => None,
		}
	}

	/// Returns true for the [`PageSize::All`] sentinel.
	pub const fn is_all(self) -> bool {
		matches!(self, Self::All)
	}
}

impl fmt::Display for PageSize {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Fixed(n) => write!(f, "{n}"),
			Self::All => f.write_str("all"),
		}
	}
}

/// Error returned when a page size string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePageSizeError {
	/// The input was empty or whitespace.
	#[error("empty page size")]
	Empty,
	/// The input was neither a positive integer nor `all`.
	#[error("invalid page size '{0}' (expected a positive number or 'all')")]
	Invalid(String),
}

impl FromStr for PageSize {
	type Err = ParsePageSizeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err(ParsePageSizeError::Empty);
		}
		if s.eq_ignore_ascii_case("all") {
			return Ok(Self::All);
		}
		s.parse::<usize>()
			.ok()
			.filter(|n| *n > 0)
			.map(Self::Fixed)
			.ok_or_else(|| ParsePageSizeError::Invalid(s.to_string()))
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use std::fmt;

	use serde::de::{self, Unexpected, Visitor};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::PageSize;

	impl Serialize for PageSize {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			match self {
				Self::Fixed(n) => serializer.serialize_u64(*n as u64),
				Self::All => serializer.serialize_str("all"),
			}
		}
	}

	impl<'de> Deserialize<'de> for PageSize {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			deserializer.deserialize_any(PageSizeVisitor)
		}
	}

	struct PageSizeVisitor;

	impl<'de> Visitor<'de> for PageSizeVisitor {
		type Value = PageSize;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a positive integer or \"all\"")
		}

		fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
			if v == 0 {
				return Err(E::invalid_value(Unexpected::Unsigned(v), &self));
			}
			usize::try_from(v)
				.map(PageSize::Fixed)
				.map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
		}

		fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
			match u64::try_from(v) {
				Ok(v) => self.visit_u64(v),
				Err(_) => Err(E::invalid_value(Unexpected::Signed(v), &self)),
			}
		}

		fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
			v.parse().map_err(E::custom)
		}
	}
}
