use crate::error::ChainError;

/// Number of counting segments handed to each CPU.
///
/// Several segments per core keep the workers busy when some of them
/// finish early.
const SEGMENTS_PER_CPU: usize = 8;

/// How pair counts are turned into matrix entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
	/// Every entry is divided by the sum of all counts.
	/// The whole matrix sums to 1; rows generally do not.
	#[default]
	GrandTotal,
	/// Every entry is divided by the sum of its row.
	/// Each row with outgoing transitions sums to 1.
	PerRow,
}

/// Settings of a [`crate::model::chain::MarkovChain`].
///
/// # Invariants
/// - `workers` is always >= 1
#[derive(Debug, Clone)]
pub struct ChainConfig {
	/// Normalization applied when building transition matrices.
	pub normalization: Normalization,

	/// Number of segments a sequence is split into while counting.
	workers: usize,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			normalization: Normalization::default(),
			workers: num_cpus::get() * SEGMENTS_PER_CPU,
		}
	}
}

impl ChainConfig {
	/// Creates a configuration with grand-total normalization and
	/// `cpus * 8` counting segments.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of counting segments.
	pub fn workers(&self) -> usize {
		self.workers
	}

	/// Sets the number of counting segments.
	///
	/// # Errors
	/// Returns an error if `workers` is 0.
	pub fn set_workers(&mut self, workers: usize) -> Result<(), ChainError> {
		if workers == 0 {
			return Err(ChainError::InvalidConfig { reason: "workers must be >= 1".to_owned() });
		}
		self.workers = workers;
		Ok(())
	}

	/// Builder form of [`ChainConfig::set_workers`].
	pub fn with_workers(mut self, workers: usize) -> Result<Self, ChainError> {
		self.set_workers(workers)?;
		Ok(self)
	}

	/// Builder form for the normalization mode.
	pub fn with_normalization(mut self, normalization: Normalization) -> Self {
		self.normalization = normalization;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_uses_grand_total_and_cpus() {
		let config = ChainConfig::new();
		assert_eq!(config.normalization, Normalization::GrandTotal);
		assert_eq!(config.workers(), num_cpus::get() * SEGMENTS_PER_CPU);
	}

	#[test]
	fn zero_workers_rejected() {
		let mut config = ChainConfig::new();
		assert!(matches!(config.set_workers(0), Err(ChainError::InvalidConfig { .. })));
		assert!(config.workers() >= 1);
	}

	#[test]
	fn builder_sets_fields() {
		let config = ChainConfig::new()
			.with_normalization(Normalization::PerRow)
			.with_workers(3)
			.unwrap();
		assert_eq!(config.normalization, Normalization::PerRow);
		assert_eq!(config.workers(), 3);
	}
}
