use std::sync::Arc;

use log::debug;
use rand::Rng;

use crate::error::ChainError;

use super::alphabet::Symbol;
use super::cdf::{Cdf, row_cdfs};
use super::matrix::TransitionMatrix;

/// Distributions needed to walk a chain, derived once from a matrix.
///
/// Shared (read-only) between every sampler built from it.
#[derive(Debug)]
pub struct SamplingTables<S> {
	matrix: TransitionMatrix<S>,
	/// Distribution of the first symbol (matrix row sums).
	marginal: Cdf,
	/// Distribution of the next symbol, per current symbol.
	/// `None` for symbols without outgoing transitions.
	rows: Vec<Option<Cdf>>,
}

impl<S: Symbol> SamplingTables<S> {
	/// Derives the marginal and per-row distributions of `matrix`.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidDistribution`] if the matrix has no mass at all.
	pub fn new(matrix: TransitionMatrix<S>) -> Result<Self, ChainError> {
		let marginal = Cdf::new(&matrix.row_sums())?;
		let rows = row_cdfs(&matrix);
		Ok(Self { matrix, marginal, rows })
	}

	pub fn matrix(&self) -> &TransitionMatrix<S> {
		&self.matrix
	}

	pub fn marginal(&self) -> &Cdf {
		&self.marginal
	}
}

/// Endless, lazy walk through a learned chain.
///
/// The first symbol is drawn from the marginal distribution, every
/// following one from the row of the previously emitted symbol. Each pull
/// consumes exactly one uniform draw from the sampler's own RNG, so two
/// samplers over the same tables and identically seeded RNGs emit the same
/// sequence.
///
/// A symbol without outgoing transitions (typically the last symbol of the
/// training sequence, seen nowhere else) is a dead end: the walk restarts
/// from the marginal distribution.
///
/// The iterator never returns `None`; bound it with `take`.
#[derive(Debug)]
pub struct ChainSampler<S, R> {
	tables: Arc<SamplingTables<S>>,
	rng: R,
	/// Alphabet index of the last emitted symbol, `None` before the first pull.
	last: Option<usize>,
}

impl<S: Symbol, R: Rng> ChainSampler<S, R> {
	/// Creates a sampler that has not emitted anything yet.
	pub fn new(tables: Arc<SamplingTables<S>>, rng: R) -> Self {
		Self { tables, rng, last: None }
	}

	/// Shortcut deriving fresh tables from `matrix`.
	pub fn from_matrix(matrix: TransitionMatrix<S>, rng: R) -> Result<Self, ChainError> {
		Ok(Self::new(Arc::new(SamplingTables::new(matrix)?), rng))
	}

	/// The most recently emitted symbol.
	///
	/// Not named `last`: that name resolves to the consuming
	/// `Iterator::last`, which never returns on this endless iterator.
	pub fn last_symbol(&self) -> Option<&S> {
		self.last.and_then(|index| self.tables.matrix.alphabet().get(index))
	}

	pub fn tables(&self) -> &Arc<SamplingTables<S>> {
		&self.tables
	}
}

impl<S: Symbol, R: Rng> Iterator for ChainSampler<S, R> {
	type Item = S;

	fn next(&mut self) -> Option<S> {
		let row = self.last.and_then(|index| self.tables.rows[index].as_ref());

		let index = match row {
			Some(cdf) => cdf.sample(&mut self.rng),
			None => {
				if let Some(last) = self.last {
					debug!("symbol #{last} has no outgoing transition, restarting from the marginal");
				}
				self.tables.marginal.sample(&mut self.rng)
			}
		};

		self.last = Some(index);
		// Sampled indices are bounded by the alphabet size
		self.tables.matrix.alphabet().get(index).cloned()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(usize::MAX, None)
	}
}
