//! Top-level module for the Markov chain system.
//!
//! This module provides a first-order Markov chain learner and sampler, including:
//! - Concurrent transition counting (`TransitionCounter`)
//! - Transition matrices over a sorted alphabet (`TransitionMatrix`)
//! - Cumulative distributions and inverse-transform sampling (`Cdf`)
//! - Ergodicity testing
//! - Endless sequence generation (`ChainSampler`)
//! - A high-level facade tying it together (`MarkovChain`)

/// Symbols and the ordered alphabet indexing matrices.
pub mod alphabet;

/// High-level chain: learning, matrix queries, ergodicity and sampling.
///
/// Also exposes `IntoMarkovChain` to learn a chain straight from an iterator.
pub mod chain;

/// Cumulative distributions and inverse-transform sampling.
pub mod cdf;

/// Concurrent pair counting and immutable count snapshots.
///
/// Long sequences are split into overlapping segments counted in parallel.
pub mod counter;

/// Matrix-power ergodicity tests.
pub mod ergodicity;

/// Lazy, endless walks through a learned chain.
pub mod generator;

/// Dense transition matrices built from count snapshots.
pub mod matrix;
