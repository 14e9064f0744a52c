use std::fmt;

/// Sequence number attached to one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seq(u64);

impl Seq {
	/// Returns the raw sequence value.
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for Seq {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Monotonic request sequence with latest-wins semantics.
///
/// Only the most recently issued [`Seq`] is current. Issuing a new one, or
/// retiring the clock, makes every earlier sequence stale.
#[derive(Debug, Default)]
pub struct SequenceClock {
	latest: u64,
	issued: Option<Seq>,
}

impl SequenceClock {
	/// Creates a clock with no issued sequence.
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues the next sequence number and makes it the only current one.
	pub fn issue(&mut self) -> Seq {
		self.latest = self.latest.saturating_add(1);
		let seq = Seq(self.latest);
		self.issued = Some(seq);
		seq
	}

	/// Returns the current sequence, if one is outstanding.
	pub const fn current(&self) -> Option<Seq> {
		self.issued
	}

	/// Returns true when `seq` is the latest issued, unretired sequence.
	pub fn is_current(&self, seq: Seq) -> bool {
		self.issued == Some(seq)
	}

	/// Invalidates every issued sequence without issuing a new one.
	pub fn retire(&mut self) {
		self.issued = None;
	}
}
