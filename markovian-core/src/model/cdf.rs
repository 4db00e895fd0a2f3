use std::ops::Deref;

use log::trace;
use rand::Rng;

use crate::error::ChainError;

use super::alphabet::Symbol;
use super::matrix::TransitionMatrix;

/// Largest `f64` strictly below 1.0.
const LARGEST_DRAW: f64 = 1.0 - f64::EPSILON / 2.0;

/// Cumulative distribution over the indices of a weight vector.
///
/// Entry `i` is the share of the total weight held by indices `0..=i`.
///
/// # Invariants
/// - Never empty
/// - Non-decreasing, every entry in `[0, 1]`
/// - The last entry is exactly 1.0
#[derive(Clone, Debug, PartialEq)]
pub struct Cdf {
	cdf: Vec<f64>,
}

impl Cdf {
	/// Builds the cumulative distribution of `weights`.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidDistribution`] if `weights` is empty,
	/// holds a negative or non-finite value, or sums to 0.
	pub fn new(weights: &[f64]) -> Result<Self, ChainError> {
		if weights.is_empty() {
			return Err(ChainError::InvalidDistribution { reason: "no weights".to_owned() });
		}
		if let Some(weight) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
			return Err(ChainError::InvalidDistribution {
				reason: format!("weight {weight} is not a finite non-negative number"),
			});
		}

		// Scaling by the largest weight keeps the sum finite even for huge weights
		let largest = weights.iter().copied().fold(0.0_f64, f64::max);
		if largest <= 0.0 {
			return Err(ChainError::InvalidDistribution { reason: "total weight is 0".to_owned() });
		}
		let scaled: Vec<f64> = weights.iter().map(|weight| weight / largest).collect();
		let total: f64 = scaled.iter().sum();

		// Summing in the same order as `total` makes the last entry total / total
		let mut running = 0.0;
		let cdf = scaled
			.iter()
			.map(|weight| {
				running += weight;
				running / total
			})
			.collect();

		Ok(Self { cdf })
	}

	/// Inverse-transform sampling: returns the smallest index whose
	/// cumulative mass strictly exceeds `draw`.
	///
	/// `draw` is clamped to `[0, 1)` (NaN counts as 0). Should rounding
	/// leave no qualifying index, the last index is returned.
	pub fn sample_index(&self, draw: f64) -> usize {
		let draw = if draw.is_nan() { 0.0 } else { draw.clamp(0.0, LARGEST_DRAW) };

		self.cdf.iter().position(|&mass| 0.0 < mass - draw).unwrap_or_else(|| {
			trace!("no cumulative mass above {draw}, falling back to the last index");
			self.cdf.len() - 1
		})
	}

	/// Draws an index using a fresh uniform value from `rng`.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
		self.sample_index(rng.random::<f64>())
	}
}

impl Deref for Cdf {
	type Target = [f64];

	fn deref(&self) -> &[f64] {
		&self.cdf
	}
}

/// Cumulative distribution of every row of `matrix`.
///
/// Rows without outgoing mass (symbols only ever seen last) have no
/// distribution and map to `None`.
pub fn row_cdfs<S: Symbol>(matrix: &TransitionMatrix<S>) -> Vec<Option<Cdf>> {
	matrix.rows().map(|row| Cdf::new(row).ok()).collect()
}
