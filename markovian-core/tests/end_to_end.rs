use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use markovian_core::{ChainConfig, ChainError, IntoMarkovChain, MarkovChain, Normalization};

// ---------------------------------------------------------------------------
// Alternating sequence
// ---------------------------------------------------------------------------
#[test]
fn alternating_sequence() {
	let chain = ['A', 'B', 'A', 'B', 'A', 'B'].to_markov_chain();

	let snapshot = chain.snapshot();
	assert_eq!(snapshot.get(&'A', &'B'), 3);
	assert_eq!(snapshot.get(&'B', &'A'), 2);
	assert_eq!(snapshot.total(), 5);
	assert_eq!(snapshot.len(), 2);

	assert_eq!(chain.alphabet().as_slice(), &['A', 'B']);

	let matrix = chain.transition_matrix().expect("chain has observations");
	assert!((matrix.prob(&'A', &'B').unwrap() - 3.0 / 5.0).abs() < 1e-12);
	assert!((matrix.prob(&'B', &'A').unwrap() - 2.0 / 5.0).abs() < 1e-12);
	assert_eq!(matrix.prob(&'A', &'A'), Some(0.0));
	assert_eq!(matrix.prob(&'B', &'B'), Some(0.0));

	let sample: Vec<char> = chain.sample_seeded(2024).unwrap().take(10).collect();
	assert_eq!(sample.len(), 10);
	assert!(sample.iter().all(|c| *c == 'A' || *c == 'B'));
	// Each symbol only ever leads to the other one
	assert!(sample.windows(2).all(|w| w[0] != w[1]));

	assert!(chain.is_ergodic().unwrap());
}

// ---------------------------------------------------------------------------
// Uniform random source over three symbols
// ---------------------------------------------------------------------------
#[test]
fn uniform_three_symbol_source() {
	let mut rng = StdRng::seed_from_u64(17);
	let sequence: Vec<u8> = (0..10_000).map(|_| rng.random_range(0..3u8)).collect();

	let chain = MarkovChain::with_config(ChainConfig::new().with_workers(6).unwrap());
	assert_eq!(chain.observe_sequence(&sequence), 9_999);

	let matrix = chain.transition_matrix().unwrap();
	assert_eq!(matrix.size(), 3);
	for i in 0..3 {
		for j in 0..3 {
			let p = matrix.get(i, j);
			assert!((p - 1.0 / 9.0).abs() < 0.02, "entry [{i}][{j}] = {p}");
		}
	}
	assert!((matrix.sum() - 1.0).abs() < 1e-9);

	assert!(chain.is_ergodic().unwrap());
	assert!(chain.is_ergodic_structural().unwrap());
}

// ---------------------------------------------------------------------------
// Disconnected absorbing states
// ---------------------------------------------------------------------------
#[test]
fn absorbing_states_are_not_ergodic() {
	let chain = MarkovChain::new();
	chain.observe('A', 'A');
	chain.observe('B', 'B');
	assert_eq!(chain.is_ergodic(), Ok(false));
}

// ---------------------------------------------------------------------------
// Text corpus
// ---------------------------------------------------------------------------
#[test]
fn text_corpus_sample_stays_in_alphabet() {
	let text = "lorem ipsum dolor sit amet, consectetur adipiscing elit. donec placerat nec lectus a bibendum.";
	let chain = text.chars().to_markov_chain();
	let alphabet = chain.alphabet();

	let sample: Vec<char> = chain.sample_seeded(5).unwrap().take(500).collect();
	assert!(sample.iter().all(|c| alphabet.index_of(c).is_some()));

	// Every emitted pair was seen in the corpus, except restarts after the final '.'
	for w in sample.windows(2) {
		assert!(chain.get(&w[0], &w[1]) > 0 || w[0] == '.', "unseen pair {:?}", w);
	}
}

#[test]
fn per_row_and_grand_total_sample_alike() {
	let text = "abracadabra alakazam";
	let grand = text.chars().to_markov_chain();
	let per_row = text.chars().to_markov_chain_with(ChainConfig::new().with_normalization(Normalization::PerRow));

	// Per-row rows are renormalized by the CDF anyway, so walks only differ
	// in the distribution of the first symbol.
	let matrix = per_row.transition_matrix().unwrap();
	for (i, sum) in matrix.row_sums().into_iter().enumerate() {
		assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-9, "row {i} sums to {sum}");
	}
	assert!((grand.transition_matrix().unwrap().sum() - 1.0).abs() < 1e-9);
}

#[test]
fn empty_chain_reports_empty() {
	let chain = std::iter::once('x').to_markov_chain();
	assert!(chain.snapshot().is_empty());
	assert_eq!(chain.transition_matrix().unwrap_err(), ChainError::EmptyChain);
}
