use std::time::{Duration, Instant};

/// Search text as typed and as settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	raw: String,
	settled: String,
}

impl Query {
	/// Text as last typed.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Text the list is currently filtered by.
	pub fn settled(&self) -> &str {
		&self.settled
	}
}

/// Settles rapidly changing search input after a quiet period.
///
/// The pending settle is a deadline rather than a timer task; the owner
/// polls it with the current time.
#[derive(Debug)]
pub struct SearchDebouncer {
	query: Query,
	delay: Duration,
	deadline: Option<Instant>,
	disposed: bool,
}

impl SearchDebouncer {
	/// Default quiet period.
	pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

	/// Creates a debouncer with empty raw and settled text.
	pub fn new(delay: Duration) -> Self {
		Self {
			query: Query::default(),
			delay,
			deadline: None,
			disposed: false,
		}
	}

	/// Returns the current raw and settled text.
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// Returns the quiet period.
	pub const fn delay(&self) -> Duration {
		self.delay
	}

	/// Records new raw input observed at `now`, restarting the quiet period.
	///
	/// Returns false, without touching the pending deadline, when `raw`
	/// equals the current raw text or the debouncer is disposed.
	pub fn observe(&mut self, raw: &str, now: Instant) -> bool {
		if self.disposed || raw == self.query.raw {
			return false;
		}
		self.query.raw = raw.to_string();
		self.deadline = Some(now + self.delay);
		true
	}

	/// Returns when the pending settle is due, if any.
	pub const fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Returns true once the pending settle's quiet period has elapsed.
	pub fn is_due(&self, now: Instant) -> bool {
		self.deadline.is_some_and(|deadline| now >= deadline)
	}

	/// Returns true while a settle is pending.
	pub const fn is_pending(&self) -> bool {
		self.deadline.is_some()
	}

	/// Settles the raw text once the deadline has passed.
	///
	/// Returns the new settled text, or `None` when nothing is due or the
	/// raw text came back to the already-settled value. In the latter case
	/// the deadline is still consumed; check [`Self::is_due`] first to tell
	/// the two apart.
	pub fn poll(&mut self, now: Instant) -> Option<&str> {
		let deadline = self.deadline?;
		if now < deadline {
			return None;
		}
		self.deadline = None;
		if self.query.raw == self.query.settled {
			return None;
		}
		self.query.settled.clone_from(&self.query.raw);
		Some(&self.query.settled)
	}

	/// Cancels any pending settle and ignores all further input.
	pub fn dispose(&mut self) {
		self.disposed = true;
		self.deadline = None;
	}
}

impl Default for SearchDebouncer {
	fn default() -> Self {
		Self::new(Self::DEFAULT_DELAY)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ms(n: u64) -> Duration {
		Duration::from_millis(n)
	}

	#[test]
	fn rapid_input_settles_once_on_last_value() {
		let t0 = Instant::now();
		let mut debouncer = SearchDebouncer::new(ms(500));

		for (i, raw) in ["a", "ab", "abd", "abdu", "abdul"].into_iter().enumerate() {
			let at = t0 + ms(100 * i as u64);
			assert!(debouncer.observe(raw, at));
			assert_eq!(debouncer.poll(at), None);
		}

		assert_eq!(debouncer.poll(t0 + ms(899)), None);
		assert_eq!(debouncer.query().settled(), "");
		assert_eq!(debouncer.poll(t0 + ms(900)), Some("abdul"));
		assert_eq!(debouncer.poll(t0 + ms(5000)), None);
		assert_eq!(debouncer.query().settled(), "abdul");
	}

	#[test]
	fn repeated_value_does_not_restart_quiet_period() {
		let t0 = Instant::now();
		let mut debouncer = SearchDebouncer::new(ms(500));

		assert!(debouncer.observe("x", t0));
		assert!(!debouncer.observe("x", t0 + ms(400)));
		assert_eq!(debouncer.deadline(), Some(t0 + ms(500)));
		assert_eq!(debouncer.poll(t0 + ms(500)), Some("x"));
	}

	#[test]
	fn returning_to_settled_text_emits_nothing() {
		let t0 = Instant::now();
		let mut debouncer = SearchDebouncer::new(ms(100));
		debouncer.observe("kim", t0);
		assert_eq!(debouncer.poll(t0 + ms(100)), Some("kim"));

		debouncer.observe("ki", t0 + ms(200));
		debouncer.observe("kim", t0 + ms(250));
		assert!(!debouncer.is_due(t0 + ms(349)));
		assert!(debouncer.is_due(t0 + ms(350)));
		assert_eq!(debouncer.poll(t0 + ms(400)), None);
		assert!(!debouncer.is_pending());
	}

	#[test]
	fn disposal_cancels_pending_settle() {
		let t0 = Instant::now();
		let mut debouncer = SearchDebouncer::new(ms(100));
		debouncer.observe("late", t0);
		debouncer.dispose();

		assert_eq!(debouncer.poll(t0 + ms(1000)), None);
		assert!(!debouncer.observe("later", t0 + ms(1000)));
		assert_eq!(debouncer.query().settled(), "");
	}
}
