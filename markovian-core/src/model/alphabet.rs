use std::hash::Hash;

/// A state of the chain.
///
/// Any value that can be hashed, ordered, cloned and shared across
/// threads qualifies: characters, tokens, small enums...
pub trait Symbol: Eq + Hash + Ord + Clone + Send + Sync {}

impl<T: Eq + Hash + Ord + Clone + Send + Sync> Symbol for T {}

/// Ordered set of the distinct symbols of a chain.
///
/// The alphabet indexes the rows and columns of a transition matrix.
/// Symbols are kept in sorted order, so two alphabets built from the same
/// counts always agree on every index.
///
/// # Invariants
/// - `symbols` is sorted and free of duplicates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet<S> {
	symbols: Vec<S>,
}

impl<S: Symbol> Alphabet<S> {
	/// Builds an alphabet from any collection of symbols.
	/// Duplicates are dropped.
	pub fn new<I: IntoIterator<Item = S>>(symbols: I) -> Self {
		let mut symbols: Vec<S> = symbols.into_iter().collect();
		symbols.sort();
		symbols.dedup();
		Self { symbols }
	}

	/// Returns the position of `symbol`, or `None` if it is not part of the alphabet.
	pub fn index_of(&self, symbol: &S) -> Option<usize> {
		self.symbols.binary_search(symbol).ok()
	}

	/// Returns the symbol at `index`.
	pub fn get(&self, index: usize) -> Option<&S> {
		self.symbols.get(index)
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &S> {
		self.symbols.iter()
	}

	pub fn as_slice(&self) -> &[S] {
		&self.symbols
	}
}
