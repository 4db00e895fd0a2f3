//! First-order Markov chain learning and sampling library.
//!
//! This crate provides:
//! - Concurrent transition counting over arbitrary symbols
//! - Transition matrices (grand-total or per-row normalized)
//! - Ergodicity testing
//! - Lazy, reproducible sequence generation and parallel batch sampling
//! - A renderer seam for plotting distributions
//!
//! ```
//! use markovian_core::IntoMarkovChain;
//!
//! let chain = "ABABAB".chars().to_markov_chain();
//! let matrix = chain.transition_matrix()?;
//! assert_eq!(matrix.prob(&'A', &'B'), Some(0.6));
//!
//! let sample: String = chain.sample_seeded(42)?.take(10).collect();
//! assert!(sample.chars().all(|c| c == 'A' || c == 'B'));
//! # Ok::<(), markovian_core::ChainError>(())
//! ```

/// Chain settings (normalization, counting parallelism).
pub mod config;

/// Error taxonomy shared by every fallible operation.
pub mod error;

/// Core Markov chain models and sampling logic.
pub mod model;

/// Plotting collaborator contract and series helpers.
pub mod render;

pub use config::{ChainConfig, Normalization};
pub use error::ChainError;
pub use model::alphabet::{Alphabet, Symbol};
pub use model::cdf::Cdf;
pub use model::chain::{IntoMarkovChain, MarkovChain};
pub use model::counter::{CountSnapshot, TransitionCounter};
pub use model::ergodicity::{is_ergodic, is_ergodic_structural};
pub use model::generator::{ChainSampler, SamplingTables};
pub use model::matrix::TransitionMatrix;
pub use render::{Renderer, Series};
