//! List controller configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use scola_api::TransportError;
use scola_primitives::PageSize;
use serde::Deserialize;
use thiserror::Error;

use crate::{PageSizeResolver, PageWindow, SearchDebouncer};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Values parse but do not make sense together.
	#[error("invalid list config: {0}")]
	Invalid(String),

	/// The configured base URL and the screen path do not form an endpoint.
	#[error("invalid endpoint: {0}")]
	Endpoint(#[from] TransportError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tunables shared by every list screen.
///
/// ```toml
/// debounce_ms = 500
/// page_sizes = [5, 10, 25, 50, 100]
/// default_page_size = 10    # or "all"
/// all_ceiling = 10000
/// window_radius = 2
/// request_timeout_ms = 30000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
	/// Quiet period before search text settles, in milliseconds.
	pub debounce_ms: u64,
	/// Fixed page sizes the user may pick; `All` is always allowed.
	pub page_sizes: Vec<usize>,
	/// Page size selected when a screen opens.
	pub default_page_size: PageSize,
	/// Request size for `All` before the server reports a total.
	pub all_ceiling: usize,
	/// Pages shown on each side of the current page in the pager.
	pub window_radius: usize,
	/// Upper bound on a single request, in milliseconds.
	pub request_timeout_ms: u64,
}

impl Default for ListConfig {
	fn default() -> Self {
		Self {
			debounce_ms: SearchDebouncer::DEFAULT_DELAY.as_millis() as u64,
			page_sizes: vec![5, 10, 25, 50, 100],
			default_page_size: PageSize::Fixed(10),
			all_ceiling: PageSizeResolver::DEFAULT_ALL_CEILING,
			window_radius: PageWindow::DEFAULT_RADIUS,
			request_timeout_ms: 30_000,
		}
	}
}

impl ListConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Checks cross-field constraints.
	pub fn validate(&self) -> Result<()> {
		if self.page_sizes.is_empty() {
			return Err(ConfigError::Invalid("page_sizes must not be empty".into()));
		}
		if self.page_sizes.contains(&0) {
			return Err(ConfigError::Invalid("page_sizes must be positive".into()));
		}
		if !self.allows(self.default_page_size) {
			return Err(ConfigError::Invalid(format!(
				"default_page_size {} is not in page_sizes {:?}",
				self.default_page_size, self.page_sizes
			)));
		}
		if self.all_ceiling == 0 {
			return Err(ConfigError::Invalid("all_ceiling must be positive".into()));
		}
		if self.window_radius == 0 {
			return Err(ConfigError::Invalid("window_radius must be at least 1".into()));
		}
		if self.request_timeout_ms == 0 {
			return Err(ConfigError::Invalid("request_timeout_ms must be positive".into()));
		}
		Ok(())
	}

	/// Returns true when `size` is a selectable page size.
	pub fn allows(&self, size: PageSize) -> bool {
		match size {
			PageSize::Fixed(n) => self.page_sizes.contains(&n),
			PageSize::All => true,
		}
	}

	/// Search debounce quiet period.
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Per-request timeout.
	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms)
	}

	/// Selectable page sizes in display order, ending with `All`.
	pub fn page_size_choices(&self) -> Vec<PageSize> {
		self.page_sizes
			.iter()
			.copied()
			.map(PageSize::Fixed)
			.chain(std::iter::once(PageSize::All))
			.collect()
	}
}
