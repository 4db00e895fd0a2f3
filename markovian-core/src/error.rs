//! Error types for the markovian-core crate.

/// Error type for all fallible operations of a chain.
///
/// Numerical edge cases met while sampling are not represented here: they
/// are absorbed by the sampler (see [`crate::model::cdf::Cdf::sample_index`]).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChainError {
	/// A transition matrix was requested before any transition was observed.
	#[error("chain is empty: no transitions observed")]
	EmptyChain,

	/// A cumulative distribution was requested over unusable weights.
	#[error("invalid distribution: {reason}")]
	InvalidDistribution {
		/// Description of the problem.
		reason: String,
	},

	/// A configuration value is out of range.
	#[error("invalid configuration: {reason}")]
	InvalidConfig {
		/// Description of the problem.
		reason: String,
	},

	/// A renderer backend failed to produce its output.
	#[error("render failed: {reason}")]
	Render {
		/// Description of the problem.
		reason: String,
	},
}
