use std::sync::Arc;
use std::thread;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ChainConfig;
use crate::error::ChainError;

use super::alphabet::{Alphabet, Symbol};
use super::counter::{CountSnapshot, TransitionCounter};
use super::ergodicity;
use super::generator::{ChainSampler, SamplingTables};
use super::matrix::TransitionMatrix;

/// First-order Markov chain learned from observed transitions.
///
/// The chain owns its count table; the alphabet, the transition matrix and
/// the sampling distributions are recomputed from a fresh snapshot on every
/// query, so they always reflect the observations made so far. Values
/// obtained before a later `observe` are not updated.
///
/// All learning methods take `&self`: a chain can be shared between threads
/// (ex. behind an `Arc`) and fed concurrently.
#[derive(Debug)]
pub struct MarkovChain<S: Symbol> {
	counter: TransitionCounter<S>,
	config: ChainConfig,
}

impl<S: Symbol> Default for MarkovChain<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: Symbol> MarkovChain<S> {
	/// Creates an empty chain with the default configuration.
	pub fn new() -> Self {
		Self::with_config(ChainConfig::default())
	}

	pub fn with_config(config: ChainConfig) -> Self {
		Self { counter: TransitionCounter::new(), config }
	}

	pub fn config(&self) -> &ChainConfig {
		&self.config
	}

	/// Records one `prev -> curr` transition and returns its updated count.
	pub fn observe(&self, prev: S, curr: S) -> u64 {
		self.counter.observe(prev, curr)
	}

	/// Tuple form of [`MarkovChain::observe`].
	pub fn observe_pair(&self, (prev, curr): (S, S)) -> u64 {
		self.counter.observe(prev, curr)
	}

	/// Observes every adjacent pair of `sequence`, in parallel over the
	/// configured number of segments. Returns the number of pairs observed.
	pub fn observe_sequence(&self, sequence: &[S]) -> usize {
		self.counter.observe_sequence(sequence, self.config.workers())
	}

	/// Adds the counts of another chain into this one.
	pub fn merge(&self, other: &Self) {
		self.counter.merge(&other.counter);
	}

	/// Number of times `curr` was observed right after `prev`.
	pub fn get(&self, prev: &S, curr: &S) -> u64 {
		self.counter.get(prev, curr)
	}

	pub fn counter(&self) -> &TransitionCounter<S> {
		&self.counter
	}

	/// Point-in-time copy of the counts; see [`TransitionCounter::snapshot`].
	pub fn snapshot(&self) -> CountSnapshot<S> {
		self.counter.snapshot()
	}

	/// Distinct symbols observed so far, in matrix order.
	pub fn alphabet(&self) -> Alphabet<S> {
		self.snapshot().alphabet()
	}

	/// Alphabet size.
	pub fn size(&self) -> usize {
		self.alphabet().len()
	}

	/// Builds the transition matrix of the current counts.
	///
	/// # Errors
	/// Returns [`ChainError::EmptyChain`] if nothing was observed yet.
	pub fn transition_matrix(&self) -> Result<TransitionMatrix<S>, ChainError> {
		TransitionMatrix::from_snapshot(&self.snapshot(), self.config.normalization)
	}

	/// Whether every state reaches every other state; see [`ergodicity::is_ergodic`].
	///
	/// # Errors
	/// Returns [`ChainError::EmptyChain`] if nothing was observed yet.
	pub fn is_ergodic(&self) -> Result<bool, ChainError> {
		Ok(ergodicity::is_ergodic(&self.transition_matrix()?))
	}

	/// Underflow-free variant of [`MarkovChain::is_ergodic`].
	pub fn is_ergodic_structural(&self) -> Result<bool, ChainError> {
		Ok(ergodicity::is_ergodic_structural(&self.transition_matrix()?))
	}

	/// Returns an endless sampler over the current dynamics, drawing from `rng`.
	///
	/// # Errors
	/// Returns [`ChainError::EmptyChain`] if nothing was observed yet.
	pub fn sample<R: Rng>(&self, rng: R) -> Result<ChainSampler<S, R>, ChainError> {
		Ok(ChainSampler::new(self.sampling_tables()?, rng))
	}

	/// [`MarkovChain::sample`] with a `StdRng` seeded from `seed`.
	pub fn sample_seeded(&self, seed: u64) -> Result<ChainSampler<S, StdRng>, ChainError> {
		self.sample(StdRng::seed_from_u64(seed))
	}

	/// Generates `count` independent sequences of `length` symbols.
	///
	/// Sequences are produced in parallel; sequence `i` uses its own `StdRng`
	/// seeded with `seed + i`, so the whole batch only depends on `seed`
	/// and the counts.
	///
	/// # Errors
	/// Returns [`ChainError::EmptyChain`] if nothing was observed yet.
	pub fn sample_batch(&self, count: usize, length: usize, seed: u64) -> Result<Vec<Vec<S>>, ChainError> {
		let tables = self.sampling_tables()?;
		let mut batch: Vec<Vec<S>> = vec![Vec::new(); count];
		if count == 0 {
			return Ok(batch);
		}

		let workers = num_cpus::get().clamp(1, count);
		let chunk_size = count.div_ceil(workers);
		debug!("sampling {count} sequences of {length} symbols on {workers} threads");

		thread::scope(|scope| {
			for (chunk_index, chunk) in batch.chunks_mut(chunk_size).enumerate() {
				let tables = Arc::clone(&tables);

				scope.spawn(move || {
					for (offset, slot) in chunk.iter_mut().enumerate() {
						let index = (chunk_index * chunk_size + offset) as u64;
						let rng = StdRng::seed_from_u64(seed.wrapping_add(index));
						*slot = ChainSampler::new(Arc::clone(&tables), rng).take(length).collect();
					}
				});
			}
		});

		Ok(batch)
	}

	fn sampling_tables(&self) -> Result<Arc<SamplingTables<S>>, ChainError> {
		Ok(Arc::new(SamplingTables::new(self.transition_matrix()?)?))
	}
}

/// Learns a [`MarkovChain`] from any sequence of symbols.
///
/// ```
/// use markovian_core::model::chain::IntoMarkovChain;
///
/// let chain = "abab".chars().to_markov_chain();
/// assert_eq!(chain.get(&'a', &'b'), 2);
/// assert_eq!(chain.get(&'b', &'a'), 1);
/// ```
pub trait IntoMarkovChain<S: Symbol> {
	/// Learns a chain with the default configuration.
	fn to_markov_chain(self) -> MarkovChain<S>;

	/// Learns a chain with `config`.
	fn to_markov_chain_with(self, config: ChainConfig) -> MarkovChain<S>;
}

impl<S: Symbol, I: IntoIterator<Item = S>> IntoMarkovChain<S> for I {
	fn to_markov_chain(self) -> MarkovChain<S> {
		self.to_markov_chain_with(ChainConfig::default())
	}

	fn to_markov_chain_with(self, config: ChainConfig) -> MarkovChain<S> {
		let sequence: Vec<S> = self.into_iter().collect();
		let chain = MarkovChain::with_config(config);
		chain.observe_sequence(&sequence);
		chain
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::config::Normalization;

	#[test]
	fn empty_chain_queries_fail() {
		let chain = MarkovChain::<char>::new();
		assert_eq!(chain.size(), 0);
		assert!(matches!(chain.transition_matrix(), Err(ChainError::EmptyChain)));
		assert!(matches!(chain.is_ergodic(), Err(ChainError::EmptyChain)));
		assert!(matches!(chain.sample_seeded(0), Err(ChainError::EmptyChain)));
		assert!(matches!(chain.sample_batch(2, 5, 0), Err(ChainError::EmptyChain)));
	}

	#[test]
	fn observe_pair_and_observe_agree() {
		let chain = MarkovChain::new();
		chain.observe_pair(("lorem", "ipsum"));
		chain.observe("lorem", "ipsum");
		assert_eq!(chain.get(&"lorem", &"ipsum"), 2);
	}

	#[test]
	fn derived_values_follow_new_observations() {
		let chain = MarkovChain::new();
		chain.observe('a', 'b');
		let before = chain.transition_matrix().unwrap();
		assert_eq!(before.size(), 2);

		chain.observe('b', 'c');
		let after = chain.transition_matrix().unwrap();
		assert_eq!(after.size(), 3);
		assert_eq!(before.size(), 2);
	}

	#[test]
	fn per_row_config_is_applied() {
		let config = ChainConfig::new().with_normalization(Normalization::PerRow);
		let chain = "aab".chars().to_markov_chain_with(config);
		let matrix = chain.transition_matrix().unwrap();
		assert!((matrix.prob(&'a', &'a').unwrap() - 0.5).abs() < 1e-12);
		assert!((matrix.prob(&'a', &'b').unwrap() - 0.5).abs() < 1e-12);
	}

	#[test]
	fn merge_adds_counts() {
		let left = "ab".chars().to_markov_chain();
		let right = "abc".chars().to_markov_chain();
		left.merge(&right);
		assert_eq!(left.get(&'a', &'b'), 2);
		assert_eq!(left.get(&'b', &'c'), 1);
	}

	#[test]
	fn batch_is_reproducible() {
		let chain = "the quick brown fox jumps over the lazy dog".chars().to_markov_chain();
		let first = chain.sample_batch(5, 40, 11).unwrap();
		let second = chain.sample_batch(5, 40, 11).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.len(), 5);
		assert!(first.iter().all(|sequence| sequence.len() == 40));
	}

	#[test]
	fn batch_sequences_match_seeded_samplers() {
		let chain = "mississippi".chars().to_markov_chain();
		let batch = chain.sample_batch(3, 25, 100).unwrap();
		for (i, sequence) in batch.iter().enumerate() {
			let expected: Vec<char> = chain.sample_seeded(100 + i as u64).unwrap().take(25).collect();
			assert_eq!(sequence, &expected);
		}
	}

	#[test]
	fn empty_batch() {
		let chain = "ab".chars().to_markov_chain();
		assert!(chain.sample_batch(0, 10, 0).unwrap().is_empty());
	}
}
