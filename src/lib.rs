//! # aliastables
//!
//! Fixed-point alias tables for sampling a discrete distribution.
//!
//! A coherent state-preparation circuit built on alias sampling needs the
//! distribution in a very particular shape: for each index `i` an integer
//! `keep[i]` out of `2^mu` coin outcomes and a fallback index `alt[i]`.
//! This crate computes that shape with a per-entry error bound `epsilon`
//! and also samples from it classically in O(1).
//!
//! There are three ways to use it:
//!
//! 1. **Raw tables** with [`AliasTable::new`]
//! 2. **Ad-hoc pairs** with [`WeightedTable::from_pairs`]
//! 3. **Compile-time enums** with the [`WeightedEnum`] derive macro (from the
//!    companion `aliastables_macros` crate).
//!
//! ## Quick start (table)
//!
//! ```rust
//! use aliastables::AliasTable;
//!
//! let table = AliasTable::new(&[1.0, 1.0, 3.0, 2.0], 1.0 / 32.0).unwrap();
//! assert_eq!(table.mu(), 3);
//! assert!(table.max_error(&[1.0, 1.0, 3.0, 2.0]).unwrap() <= 1.0 / 32.0);
//!
//! let mut rng = rand::rng();
//! let i = table.sample_index(&mut rng);
//! assert!(i < 4);
//! ```
//!
//! ## Quick start (enum + macro)
//!
//! ```rust,ignore
//! use aliastables::{Precision, WeightedEnum};
//!
//! #[derive(Copy, Clone, Debug, WeightedEnum)]
//! enum Term {
//!     #[coefficient(1)] XX,
//!     #[coefficient(1)] YY,
//!     #[coefficient(3)] ZZ,
//!     #[coefficient(2)] ZI,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Term::weighted_table(Precision::Epsilon(1.0 / 32.0))?;
//! let mut rng = rand::rng();
//! let term = table.sample(&mut rng); // &Term
//! # Ok(()) }
//! ```
//!
//! ## Precision
//! `mu` is the smallest number of sub-bits with `1 / (n * 2^mu) <= epsilon`.
//! The weights are rounded to the grid of `n * 2^mu` bins before pairing, so
//! the reconstructed probabilities are off by at most one bin each.
//!
//! ## Performance
//! * **Build**: O(n log n) to discretize and pair the weights.
//! * **Sample**: O(1) per draw (2 random numbers, 1 branch).
//! * **Space**: 2 vectors of length `n` (u64 + usize).
//!
//! ## Logging
//! Table construction reports through the `log` facade; install any logger
//! to see it.

mod discretize;
mod error;
mod sampler;
mod walker;

/// A minimal interface for “index samplers”.
#[allow(clippy::len_without_is_empty)]
pub trait IndexSampler {
    fn len(&self) -> usize;
    fn sample_index<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> usize;
}

pub use discretize::{Discretized, MAX_BINS_LOG2, Precision, discretize};
pub use error::AliasError;
pub use sampler::histogram;
pub use walker::AliasTable;

use rand::Rng;

/// Items paired with coefficients, sampled through an internal
/// [`AliasTable`].
///
/// Build it from any iterator of `(item, coefficient)` where `coefficient >= 0`.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    alias: AliasTable,
    items: Vec<T>,
}

/// Derive macro imported from `aliastables_macros`.
/// See the crate-level example for usage.
pub use aliastables_macros::WeightedEnum;

/// Trait implemented by the `WeightedEnum` derive macro.
///
/// Each variant and its coefficient is exposed via [`WeightedEnum::ENTRIES`].
pub trait WeightedEnum: Sized + 'static {
    /// All `(variant, coefficient)` pairs for the enum.
    const ENTRIES: &'static [(Self, f64)];

    /// Build a [`WeightedTable`] from the enum entries.
    ///
    /// # Errors
    /// See [`WeightedTable::from_pairs`].
    fn weighted_table(precision: Precision) -> Result<WeightedTable<Self>, AliasError>
    where
        Self: Copy,
    {
        WeightedTable::from_pairs(Self::ENTRIES.iter().copied(), precision)
    }
}

impl<T> WeightedTable<T> {
    /// Build from any `(item, coefficient)` iterator.
    ///
    /// # Errors
    /// * [`AliasError::Empty`] if there are no items.
    /// * [`AliasError::Negative`] / [`AliasError::NonFinite`] for a bad coefficient.
    /// * [`AliasError::ZeroSum`] if the coefficients sum to zero or overflow.
    /// * [`AliasError::InvalidEpsilon`] / [`AliasError::PrecisionOverflow`]
    ///   for an unusable `precision`.
    pub fn from_pairs<I>(pairs: I, precision: Precision) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let (items, coefficients): (Vec<T>, Vec<f64>) = pairs.into_iter().unzip();
        let alias = AliasTable::with_precision(&coefficients, precision)?;
        Ok(Self { alias, items })
    }

    /// Sample an item **by reference**.
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a T {
        &self.items[self.alias.sample_index(rng)]
    }

    /// Sample an item **by value** (clones the chosen element).
    pub fn sample_owned<R: Rng + ?Sized>(&self, rng: &mut R) -> T
    where
        T: Clone,
    {
        self.sample(rng).clone()
    }

    /// The underlying `keep`/`alt` table.
    pub fn alias_table(&self) -> &AliasTable {
        &self.alias
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.alias.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.alias.is_empty()
    }
}
