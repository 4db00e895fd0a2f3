use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use crate::model::alphabet::{Alphabet, Symbol};
use crate::model::matrix::TransitionMatrix;

/// Named series of `(x, y)` points handed to a [`Renderer`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Series {
	pub name: String,
	pub points: Vec<(f64, f64)>,
}

impl Series {
	pub fn new(name: &str, points: Vec<(f64, f64)>) -> Self {
		Self { name: name.to_owned(), points }
	}
}

/// Plotting backend.
///
/// Output is write-only from the chain's point of view: the returned bytes
/// (an image, a text chart...) are only meant to be displayed or stored by
/// the caller.
pub trait Renderer {
	/// Renders every series of `series` on a single chart titled `title`.
	///
	/// # Errors
	/// Returns [`ChainError::Render`] if the backend fails.
	fn render(&self, series: &[Series], title: &str) -> Result<Vec<u8>, ChainError>;
}

/// Marginal weight of each symbol of `matrix`, indexed by alphabet position.
pub fn marginal_series<S: Symbol>(name: &str, matrix: &TransitionMatrix<S>) -> Series {
	let points = matrix.row_sums().into_iter().enumerate().map(|(i, weight)| (i as f64, weight)).collect();
	Series::new(name, points)
}

/// Relative frequency of each symbol of `alphabet` in `sample`.
///
/// Symbols of `sample` missing from `alphabet` are ignored; an empty sample
/// yields zero frequencies.
pub fn frequency_series<S: Symbol>(name: &str, alphabet: &Alphabet<S>, sample: &[S]) -> Series {
	let mut occurrences: HashMap<usize, usize> = HashMap::new();
	for symbol in sample {
		if let Some(index) = alphabet.index_of(symbol) {
			*occurrences.entry(index).or_insert(0) += 1;
		}
	}

	let total = sample.len().max(1) as f64;
	let points = (0..alphabet.len())
		.map(|i| (i as f64, *occurrences.get(&i).unwrap_or(&0) as f64 / total))
		.collect();
	Series::new(name, points)
}
