use crate::config::Normalization;
use crate::error::ChainError;

use super::alphabet::{Alphabet, Symbol};
use super::counter::CountSnapshot;

/// Dense transition matrix over the alphabet of a count snapshot.
///
/// Entry `[i][j]` is derived from the number of times `alphabet[j]` was
/// observed right after `alphabet[i]`. With [`Normalization::GrandTotal`]
/// every entry is divided by the sum of all counts, so the whole matrix
/// sums to 1 and each row sum is the share of transitions leaving that
/// symbol. With [`Normalization::PerRow`] each row is divided by its own
/// sum.
///
/// # Invariants
/// - `data.len() == alphabet.len() * alphabet.len()` (row-major)
/// - All entries are finite and >= 0
#[derive(Clone, Debug)]
pub struct TransitionMatrix<S> {
	alphabet: Alphabet<S>,
	data: Vec<f64>,
}

impl<S: Symbol> TransitionMatrix<S> {
	/// Builds the matrix from a snapshot of the count table.
	///
	/// # Errors
	/// Returns [`ChainError::EmptyChain`] if the snapshot holds no observation.
	pub fn from_snapshot(snapshot: &CountSnapshot<S>, normalization: Normalization) -> Result<Self, ChainError> {
		let total = snapshot.total();
		if total == 0 {
			return Err(ChainError::EmptyChain);
		}

		let alphabet = snapshot.alphabet();
		let size = alphabet.len();
		let mut data = vec![0.0; size * size];

		for ((prev, curr), count) in snapshot.iter() {
			// Both ends come from the snapshot the alphabet was built from
			if let (Some(i), Some(j)) = (alphabet.index_of(prev), alphabet.index_of(curr)) {
				data[i * size + j] = count as f64;
			}
		}

		match normalization {
			Normalization::GrandTotal => {
				let total = total as f64;
				data.iter_mut().for_each(|value| *value /= total);
			}
			Normalization::PerRow => {
				for row in data.chunks_mut(size) {
					let sum: f64 = row.iter().sum();
					if sum > 0.0 {
						row.iter_mut().for_each(|value| *value /= sum);
					}
				}
			}
		}

		Ok(Self { alphabet, data })
	}

	pub fn alphabet(&self) -> &Alphabet<S> {
		&self.alphabet
	}

	/// Dimension of the matrix (alphabet size).
	pub fn size(&self) -> usize {
		self.alphabet.len()
	}

	/// Returns entry `[i][j]`.
	///
	/// # Panics
	/// Panics if `i` or `j` is out of bounds.
	pub fn get(&self, i: usize, j: usize) -> f64 {
		let size = self.size();
		assert!(i < size && j < size, "index ({i}, {j}) out of bounds for size {size}");
		self.data[i * size + j]
	}

	/// Returns the entry for the transition `prev -> curr`, or `None` if
	/// either symbol is unknown.
	pub fn prob(&self, prev: &S, curr: &S) -> Option<f64> {
		let i = self.alphabet.index_of(prev)?;
		let j = self.alphabet.index_of(curr)?;
		Some(self.data[i * self.size() + j])
	}

	/// Returns row `i`.
	pub fn row(&self, i: usize) -> &[f64] {
		let size = self.size();
		&self.data[i * size..(i + 1) * size]
	}

	pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
		self.data.chunks(self.size())
	}

	/// Sum of each row, used as the marginal weight of each symbol.
	pub fn row_sums(&self) -> Vec<f64> {
		self.rows().map(|row| row.iter().sum()).collect()
	}

	/// Sum of every entry.
	pub fn sum(&self) -> f64 {
		self.data.iter().sum()
	}

	/// Row-major entries.
	pub fn as_slice(&self) -> &[f64] {
		&self.data
	}
}
