//! Walker's Alias Method over fixed-point weights.
//!
//! Every entry owns `2^mu` coin outcomes. Entry `i` keeps the first
//! `keep[i]` of them and hands the rest to `alt[i]`. Because the weights
//! are integers that sum to exactly `n * 2^mu`, the pairing below leaves
//! no residual mass.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, trace, warn};
use rand::Rng;

use crate::discretize::{Discretized, Precision, discretize, validate};
use crate::error::AliasError;

/// Alias table: `keep`/`alt` pairs at `mu` bits of coin precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    keep: Vec<u64>,
    alt: Vec<usize>,
    mu: u32,
}

impl AliasTable {
    /// Build from non-negative coefficients so that every probability is
    /// reproduced within `epsilon`.
    ///
    /// # Errors
    /// [`AliasError::Empty`] for no coefficients, [`AliasError::InvalidEpsilon`]
    /// for `epsilon <= 0`, plus the coefficient checks of [`discretize`].
    ///
    /// # Examples
    /// ```
    /// use aliastables::AliasTable;
    ///
    /// let table = AliasTable::new(&[1.0, 1.0, 3.0, 2.0], 1.0 / 32.0).unwrap();
    /// assert_eq!(table.mu(), 3);
    /// assert_eq!(table.keep(), &[5, 4, 7, 8]);
    /// assert_eq!(table.alt(), &[2, 2, 3, 3]);
    /// ```
    pub fn new(coefficients: &[f64], epsilon: f64) -> Result<Self, AliasError> {
        Self::with_precision(coefficients, Precision::Epsilon(epsilon))
    }

    /// Build at an explicit [`Precision`].
    pub fn with_precision(coefficients: &[f64], precision: Precision) -> Result<Self, AliasError> {
        Ok(Self::from_discretized(&discretize(coefficients, precision)?))
    }

    /// Pair light and heavy entries of an already discretized distribution.
    /// O(n log n).
    pub fn from_discretized(weights: &Discretized) -> Self {
        let n = weights.len();
        let mu = weights.mu();
        let target = 1u64 << mu;
        let mut w = weights.numerators().to_vec();

        let mut keep = vec![target; n];
        let mut alt: Vec<usize> = (0..n).collect();

        // Lightest first, heaviest first; ties go to the lower index.
        let mut light = BinaryHeap::with_capacity(n);
        let mut heavy = BinaryHeap::with_capacity(n);
        for (i, &wi) in w.iter().enumerate() {
            if wi < target {
                light.push(Reverse((wi, i)));
            } else if wi > target {
                heavy.push((wi, Reverse(i)));
            }
        }

        while let Some(Reverse((wl, l))) = light.pop() {
            let Some((wh, Reverse(h))) = heavy.pop() else {
                warn!("alias table residual: entry {l} left with weight {wl} of {target}");
                light.push(Reverse((wl, l)));
                break;
            };
            keep[l] = wl;
            alt[l] = h;

            let donated = target - wl;
            w[h] = wh - donated;
            trace!("entry {l} keeps {wl}, borrows {donated} from {h}");

            if w[h] < target {
                light.push(Reverse((w[h], h)));
            } else if w[h] > target {
                heavy.push((w[h], Reverse(h)));
            }
        }

        // Unreachable with exact sums; clamp whatever is left to itself.
        for i in light
            .into_iter()
            .map(|Reverse((_, i))| i)
            .chain(heavy.into_iter().map(|(_, Reverse(i))| i))
        {
            warn!("alias table residual: clamping entry {i}");
            keep[i] = target;
            alt[i] = i;
        }

        debug!(
            "built alias table: len={n} mu={mu} denominator={}",
            weights.denominator()
        );
        Self { keep, alt, mu }
    }

    /// Draw a single sample in O(1).
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let i = rng.random_range(0..self.keep.len());
        let coin = rng.random_range(0..1u64 << self.mu);
        if coin < self.keep[i] { i } else { self.alt[i] }
    }

    /// Number of coin outcomes kept by each entry, out of `2^mu`.
    pub fn keep(&self) -> &[u64] {
        &self.keep
    }

    /// Fallback index for each entry.
    pub fn alt(&self) -> &[usize] {
        &self.alt
    }

    pub fn mu(&self) -> u32 {
        self.mu
    }

    /// `len * 2^mu`.
    pub fn denominator(&self) -> u64 {
        (self.keep.len() as u64) << self.mu
    }

    /// The distribution this table actually samples from.
    pub fn probabilities(&self) -> Vec<f64> {
        let target = 1u64 << self.mu;
        let mut mass = self.keep.clone();
        for (&k, &a) in self.keep.iter().zip(&self.alt) {
            mass[a] += target - k;
        }
        let denom = self.denominator() as f64;
        mass.into_iter().map(|m| m as f64 / denom).collect()
    }

    /// Largest absolute gap between the normalized `coefficients` and
    /// [`probabilities`](Self::probabilities).
    ///
    /// # Errors
    /// The coefficient checks of [`discretize`], and
    /// [`AliasError::LengthMismatch`] if the lengths differ.
    pub fn max_error(&self, coefficients: &[f64]) -> Result<f64, AliasError> {
        if coefficients.len() != self.len() {
            return Err(AliasError::LengthMismatch {
                expected: self.len(),
                found: coefficients.len(),
            });
        }
        let total = validate(coefficients)?;
        Ok(coefficients
            .iter()
            .zip(self.probabilities())
            .map(|(&c, q)| (c / total - q).abs())
            .fold(0.0, f64::max))
    }

    pub fn len(&self) -> usize {
        self.keep.len()
    }
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }
}
