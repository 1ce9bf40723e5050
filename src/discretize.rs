//! Fixed-point discretization of a coefficient vector.
//!
//! A distribution over `n` entries at `mu` bits of sub-bit precision is
//! represented by `n` integer numerators over the common denominator
//! `n * 2^mu`. The numerators are taken as differences of the rounded
//! cumulative sums, which keeps their total exact.

use crate::error::AliasError;

/// Largest supported `log2(n * 2^mu)`: every bin edge stays an exact `f64`.
pub const MAX_BINS_LOG2: u32 = 53;

/// How finely probabilities are resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precision {
    /// Smallest `mu` whose resolution `1 / (n * 2^mu)` is at most epsilon.
    Epsilon(f64),
    /// Use exactly this many sub-bits.
    Bits(u32),
}

impl Precision {
    /// Resolve to a concrete `mu` for a table of `len` entries.
    ///
    /// # Errors
    /// * [`AliasError::InvalidEpsilon`] if epsilon is not finite and positive.
    /// * [`AliasError::PrecisionOverflow`] if `len * 2^mu` exceeds `2^53`.
    pub fn mu_for(self, len: usize) -> Result<u32, AliasError> {
        let mu = match self {
            Precision::Bits(mu) => mu,
            Precision::Epsilon(eps) => {
                if !eps.is_finite() || eps <= 0.0 {
                    return Err(AliasError::InvalidEpsilon(eps));
                }
                let bits = (-(eps * len as f64).log2()).ceil();
                if bits > 0.0 { bits as u32 } else { 0 }
            }
        };
        check_bins(mu, len)?;
        Ok(mu)
    }
}

impl From<f64> for Precision {
    fn from(eps: f64) -> Self {
        Precision::Epsilon(eps)
    }
}

fn check_bins(mu: u32, len: usize) -> Result<(), AliasError> {
    let fits = mu <= MAX_BINS_LOG2 && ((len as u128) << mu) <= (1u128 << MAX_BINS_LOG2);
    if fits {
        Ok(())
    } else {
        Err(AliasError::PrecisionOverflow { mu, len })
    }
}

/// Check coefficients and return their sum.
pub(crate) fn validate(coefficients: &[f64]) -> Result<f64, AliasError> {
    if coefficients.is_empty() {
        return Err(AliasError::Empty);
    }
    let mut sum = 0.0f64;
    for (index, &value) in coefficients.iter().enumerate() {
        if value.is_nan() || value.is_infinite() {
            return Err(AliasError::NonFinite { index, value });
        }
        if value < 0.0 {
            return Err(AliasError::Negative { index, value });
        }
        sum += value;
    }
    if !sum.is_finite() || sum == 0.0 {
        return Err(AliasError::ZeroSum);
    }
    Ok(sum)
}

/// Integer numerators over the denominator `len * 2^mu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discretized {
    numerators: Vec<u64>,
    mu: u32,
}

impl Discretized {
    pub fn numerators(&self) -> &[u64] {
        &self.numerators
    }

    pub fn mu(&self) -> u32 {
        self.mu
    }

    /// `len * 2^mu`; equal to the sum of the numerators.
    pub fn denominator(&self) -> u64 {
        (self.numerators.len() as u64) << self.mu
    }

    pub fn len(&self) -> usize {
        self.numerators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numerators.is_empty()
    }
}

/// Round non-negative coefficients onto the fixed-point grid chosen by
/// `precision`. Each numerator is within one bin of the exact scaled
/// probability. O(n).
///
/// # Errors
/// * [`AliasError::Empty`] if there are no coefficients.
/// * [`AliasError::Negative`] / [`AliasError::NonFinite`] for a bad entry.
/// * [`AliasError::ZeroSum`] if the sum is zero or not finite.
/// * Anything [`Precision::mu_for`] rejects.
pub fn discretize(
    coefficients: &[f64],
    precision: impl Into<Precision>,
) -> Result<Discretized, AliasError> {
    let total = validate(coefficients)?;
    let n = coefficients.len();
    let mu = precision.into().mu_for(n)?;
    let scale = ((n as u64) << mu) as f64;

    let mut numerators = Vec::with_capacity(n);
    let mut cumulative = 0.0f64;
    let mut prev_edge = 0u64;
    for &c in coefficients {
        cumulative += c;
        // Same summation order as `validate`, so the last edge is exactly `scale`.
        let edge = (cumulative / total * scale + 0.5).floor() as u64;
        numerators.push(edge - prev_edge);
        prev_edge = edge;
    }
    debug_assert_eq!(prev_edge, (n as u64) << mu);

    Ok(Discretized { numerators, mu })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mu_from_epsilon() {
        assert_eq!(Precision::Epsilon(1.0 / 32.0).mu_for(4), Ok(3));
        assert_eq!(Precision::Epsilon(0.5).mu_for(4), Ok(0));
        assert_eq!(Precision::Epsilon(0.01).mu_for(1), Ok(7));
        assert_eq!(Precision::Bits(5).mu_for(10), Ok(5));
    }

    #[test]
    fn rejects_bad_epsilon() {
        for eps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Precision::Epsilon(eps).mu_for(4),
                Err(AliasError::InvalidEpsilon(_))
            ));
        }
    }

    #[test]
    fn rejects_too_many_bins() {
        assert_eq!(
            Precision::Bits(60).mu_for(1),
            Err(AliasError::PrecisionOverflow { mu: 60, len: 1 })
        );
        assert!(Precision::Bits(52).mu_for(2).is_ok());
        assert!(Precision::Bits(52).mu_for(3).is_err());
        assert!(Precision::Epsilon(1e-300).mu_for(4).is_err());
    }

    #[test]
    fn rejects_bad_coefficients() {
        assert_eq!(discretize(&[], 0.1), Err(AliasError::Empty));
        assert_eq!(discretize(&[0.0, 0.0], 0.1), Err(AliasError::ZeroSum));
        assert!(matches!(
            discretize(&[1.0, -0.5], 0.1),
            Err(AliasError::Negative { index: 1, .. })
        ));
        assert!(matches!(
            discretize(&[f64::NAN], 0.1),
            Err(AliasError::NonFinite { index: 0, .. })
        ));
        assert_eq!(discretize(&[f64::MAX, f64::MAX], 0.1), Err(AliasError::ZeroSum));
    }

    #[test]
    fn rounds_cumulative_sums() {
        let d = discretize(&[1.0, 1.0, 3.0, 2.0], 1.0 / 32.0).unwrap();
        assert_eq!(d.mu(), 3);
        assert_eq!(d.denominator(), 32);
        assert_eq!(d.numerators(), &[5, 4, 14, 9]);
    }

    #[test]
    fn numerators_sum_to_denominator() {
        let coeffs = [0.3, 0.0, 1e-9, 7.25, 2.0, 0.1, 0.1];
        for mu in 0..12 {
            let d = discretize(&coeffs, Precision::Bits(mu)).unwrap();
            assert_eq!(d.numerators().iter().sum::<u64>(), d.denominator());
        }
    }
}
