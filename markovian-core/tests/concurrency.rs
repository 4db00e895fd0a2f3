use std::sync::Arc;
use std::thread;

use markovian_core::{IntoMarkovChain, MarkovChain};

#[test]
fn shared_chain_fed_from_many_threads() {
	let chain = Arc::new(MarkovChain::new());
	let sentences = ["lorem ipsum dolor", "sit amet consectetur", "adipiscing elit", "donec placerat"];

	let handles: Vec<_> = sentences
		.iter()
		.map(|sentence| {
			let chain = Arc::clone(&chain);
			let symbols: Vec<char> = sentence.chars().collect();
			thread::spawn(move || chain.observe_sequence(&symbols))
		})
		.collect();

	let observed: usize = handles.into_iter().map(|handle| handle.join().unwrap()).sum();
	let expected: usize = sentences.iter().map(|s| s.chars().count() - 1).sum();
	assert_eq!(observed, expected);
	assert_eq!(chain.snapshot().total(), expected as u64);
}

#[test]
fn independent_samplers_do_not_interfere() {
	let chain = Arc::new("the rain in spain stays mainly in the plain".chars().to_markov_chain());
	let reference: Vec<String> = (0..4).map(|seed| chain.sample_seeded(seed).unwrap().take(60).collect()).collect();

	let handles: Vec<_> = (0..4u64)
		.map(|seed| {
			let chain = Arc::clone(&chain);
			thread::spawn(move || chain.sample_seeded(seed).unwrap().take(60).collect::<String>())
		})
		.collect();

	for (seed, handle) in handles.into_iter().enumerate() {
		assert_eq!(handle.join().unwrap(), reference[seed]);
	}
}

#[test]
fn snapshot_during_observation_is_bounded() {
	let chain = Arc::new(MarkovChain::new());
	let writer = {
		let chain = Arc::clone(&chain);
		thread::spawn(move || {
			for i in 0..5_000u32 {
				chain.observe(i % 7, (i + 1) % 7);
			}
		})
	};

	// Snapshots taken mid-flight are approximate, but each one is a
	// consistent table whose totals never shrink nor exceed the final one
	let mut previous = 0;
	for _ in 0..10 {
		let snapshot = chain.snapshot();
		let summed: u64 = snapshot.iter().map(|(_, count)| count).sum();
		assert_eq!(snapshot.total(), summed);
		assert!(snapshot.iter().all(|((prev, curr), count)| count > 0 && *curr == (prev + 1) % 7));
		assert!(snapshot.total() >= previous && snapshot.total() <= 5_000);
		previous = snapshot.total();
	}
	writer.join().unwrap();

	let snapshot = chain.snapshot();
	assert_eq!(snapshot.total(), 5_000);
	assert_eq!(snapshot.len(), 7);
	assert_eq!(snapshot.iter().map(|(_, count)| count).sum::<u64>(), 5_000);
}
