use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread;

use dashmap::DashMap;
use log::debug;

use super::alphabet::{Alphabet, Symbol};

/// Concurrent table of transition counts.
///
/// Each entry maps an ordered pair `(prev, curr)` to the number of times
/// `curr` was observed right after `prev`.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences, possibly from many threads at once
/// - Split long sequences into segments counted in parallel
/// - Hand out immutable snapshots from which everything else is derived
///
/// ## Invariants
/// - Every stored count is strictly positive
/// - Feeding a sequence of length `L >= 2` adds exactly `L - 1` to the total,
///   whatever the number of segments
#[derive(Debug)]
pub struct TransitionCounter<S: Symbol> {
	/// Occurrences of each observed pair.
	/// Example: { ('l', 'o') => 42, ('o', 'r') => 3 }
	counts: DashMap<(S, S), u64>,
}

impl<S: Symbol> Default for TransitionCounter<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: Symbol> TransitionCounter<S> {
	/// Creates an empty counter.
	pub fn new() -> Self {
		Self { counts: DashMap::new() }
	}

	/// Records one occurrence of `curr` following `prev` and returns the
	/// updated count.
	///
	/// The increment holds the shard lock of the pair, so concurrent
	/// callers never lose updates.
	pub fn observe(&self, prev: S, curr: S) -> u64 {
		let mut count = self.counts.entry((prev, curr)).or_insert(0);
		*count += 1;
		*count
	}

	/// Observes every adjacent pair of `sequence` exactly once, spreading
	/// the work over at most `segments` threads.
	///
	/// The sequence is cut into contiguous segments sharing one element
	/// with their neighbour: segment `k` ends on the element segment `k + 1`
	/// starts with. Each worker only pairs elements inside its own segment,
	/// so the boundary pair belongs to exactly one segment and no two
	/// non-adjacent elements are ever paired.
	///
	/// Returns the number of pairs observed (`L - 1`, or 0 when `L < 2`).
	pub fn observe_sequence(&self, sequence: &[S], segments: usize) -> usize {
		if sequence.len() < 2 {
			return 0;
		}

		let pairs = sequence.len() - 1;
		let segments = segments.clamp(1, pairs);
		let segment_size = pairs.div_ceil(segments);
		debug!("counting {pairs} pairs in segments of {segment_size}");

		if segments == 1 {
			return self.observe_segment(sequence);
		}

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for start in (0..pairs).step_by(segment_size) {
				let end = (start + segment_size).min(pairs);
				// Elements start..=end hold the pairs start..end
				let segment = &sequence[start..=end];
				let tx = tx.clone();

				scope.spawn(move || {
					let observed = self.observe_segment(segment);
					tx.send(observed).expect("receiver outlives the counting scope");
				});
			}
		});
		drop(tx);

		let observed: usize = rx.iter().sum();
		debug!("observed {observed} pairs");
		observed
	}

	fn observe_segment(&self, segment: &[S]) -> usize {
		for window in segment.windows(2) {
			self.observe(window[0].clone(), window[1].clone());
		}
		segment.len().saturating_sub(1)
	}

	/// Returns how many times `curr` was observed right after `prev`.
	pub fn get(&self, prev: &S, curr: &S) -> u64 {
		// DashMap lookups need an owned key for tuple keys
		self.counts.get(&(prev.clone(), curr.clone())).map(|count| *count).unwrap_or(0)
	}

	/// Sum of all counts.
	pub fn total(&self) -> u64 {
		self.counts.iter().map(|entry| *entry.value()).sum()
	}

	/// Number of distinct pairs observed.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Adds every count of `other` into this counter.
	///
	/// Intended for combining counters filled independently (ex. one per corpus).
	///
	/// `other` may be this very counter: its entries are copied out before
	/// any write, as a shard cannot be read and written at the same time.
	pub fn merge(&self, other: &Self) {
		let entries: Vec<((S, S), u64)> =
			other.counts.iter().map(|entry| (entry.key().clone(), *entry.value())).collect();
		for (pair, count) in entries {
			*self.counts.entry(pair).or_insert(0) += count;
		}
	}

	/// Forgets every observation.
	pub fn clear(&self) {
		self.counts.clear();
	}

	/// Copies the current counts into an immutable [`CountSnapshot`].
	///
	/// The copy visits the shards one after the other. When other threads
	/// keep observing during the copy, the snapshot is approximate: it may
	/// hold some of the in-flight increments and miss others.
	pub fn snapshot(&self) -> CountSnapshot<S> {
		CountSnapshot::from_counts(self.counts.iter().map(|entry| (entry.key().clone(), *entry.value())))
	}
}

/// Immutable, ordered copy of a count table.
///
/// Alphabets, transition matrices and distributions are all pure
/// functions of a snapshot, so they never mix counts from different points
/// in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountSnapshot<S: Symbol> {
	counts: BTreeMap<(S, S), u64>,
	total: u64,
}

impl<S: Symbol> CountSnapshot<S> {
	/// Builds a snapshot from `((prev, curr), count)` entries.
	///
	/// Entries with a zero count are dropped; repeated pairs are summed.
	pub fn from_counts<I: IntoIterator<Item = ((S, S), u64)>>(entries: I) -> Self {
		let mut counts = BTreeMap::new();
		let mut total = 0;
		for (pair, count) in entries {
			if count == 0 {
				continue;
			}
			*counts.entry(pair).or_insert(0) += count;
			total += count;
		}
		Self { counts, total }
	}

	pub fn get(&self, prev: &S, curr: &S) -> u64 {
		self.counts.get(&(prev.clone(), curr.clone())).copied().unwrap_or(0)
	}

	/// Sum of all counts.
	pub fn total(&self) -> u64 {
		self.total
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(prev, curr)` pairs and their counts, in pair order.
	pub fn iter(&self) -> impl Iterator<Item = (&(S, S), u64)> {
		self.counts.iter().map(|(pair, count)| (pair, *count))
	}

	/// Symbols found at either end of any counted pair.
	pub fn alphabet(&self) -> Alphabet<S> {
		Alphabet::new(self.counts.keys().flat_map(|(prev, curr)| [prev.clone(), curr.clone()]))
	}
}
