use super::alphabet::Symbol;
use super::matrix::TransitionMatrix;

/// Tests whether the chain described by `matrix` is ergodic.
///
/// Computes `(M + I)^n` with `n` the alphabet size and checks that every
/// entry is strictly positive, i.e. that every state reaches every other
/// state in at most `n` steps. Adding the identity lets shorter paths
/// survive the exponentiation.
///
/// Very small transition probabilities may underflow to zero along the
/// way; [`is_ergodic_structural`] runs the same test on the adjacency
/// pattern only.
pub fn is_ergodic<S: Symbol>(matrix: &TransitionMatrix<S>) -> bool {
	let size = matrix.size();
	if size == 0 {
		return false;
	}

	let mut base = matrix.as_slice().to_vec();
	for i in 0..size {
		base[i * size + i] += 1.0;
	}

	let power = pow(&base, size, size, 1.0, 0.0, |a, b| a * b, |a, b| a + b);
	power.iter().all(|&value| 0.0 < value)
}

/// Same test as [`is_ergodic`], on the boolean pattern of non-zero entries.
///
/// Only reachability matters, so no magnitude can underflow.
pub fn is_ergodic_structural<S: Symbol>(matrix: &TransitionMatrix<S>) -> bool {
	let size = matrix.size();
	if size == 0 {
		return false;
	}

	let mut base: Vec<bool> = matrix.as_slice().iter().map(|&value| value > 0.0).collect();
	for i in 0..size {
		base[i * size + i] = true;
	}

	let power = pow(&base, size, size, true, false, |a, b| a && b, |a, b| a || b);
	power.iter().all(|&reachable| reachable)
}

/// Raises the square row-major matrix `base` to `exponent` by repeated
/// squaring, over the semiring given by `mul`, `add` and their units.
fn pow<T: Copy>(
	base: &[T],
	size: usize,
	mut exponent: usize,
	one: T,
	zero: T,
	mul: impl Fn(T, T) -> T + Copy,
	add: impl Fn(T, T) -> T + Copy,
) -> Vec<T> {
	let mut result = vec![zero; size * size];
	for i in 0..size {
		result[i * size + i] = one;
	}

	let mut square = base.to_vec();
	while exponent > 0 {
		if exponent & 1 == 1 {
			result = mat_mul(&result, &square, size, zero, mul, add);
		}
		exponent >>= 1;
		if exponent > 0 {
			square = mat_mul(&square, &square, size, zero, mul, add);
		}
	}
	result
}

fn mat_mul<T: Copy>(
	left: &[T],
	right: &[T],
	size: usize,
	zero: T,
	mul: impl Fn(T, T) -> T,
	add: impl Fn(T, T) -> T,
) -> Vec<T> {
	let mut out = vec![zero; size * size];
	for i in 0..size {
		for j in 0..size {
			let mut acc = zero;
			for k in 0..size {
				acc = add(acc, mul(left[i * size + k], right[k * size + j]));
			}
			out[i * size + j] = acc;
		}
	}
	out
}
