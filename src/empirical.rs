//! Discretized marginal distributions.
//!
//! An [`EmpiricalDistribution`] is a finite, index-aligned pair of weights and
//! ascending support values. The marginal builder
//! ([`EmpiricalDistribution::from_distribution`]) truncates a
//! [`DiscreteDistribution`] at the first integer whose upper tail falls below
//! a tolerance and (optionally) folds the discarded tail mass into the last
//! support point so the weights sum to exactly one.
//!
//! An [`EmpDistrArray`] holds one marginal per dimension, in dimension order.
//!
//! # Example
//!
//! ```
//! use frechet_bounds::{EmpiricalDistribution, MarginalConfig};
//! use statrs::distribution::Poisson;
//!
//! let poisson = Poisson::new(5.0).unwrap();
//! let marginal = EmpiricalDistribution::from_distribution(&poisson, &MarginalConfig::default()).unwrap();
//!
//! assert_eq!(marginal.len(), 18); // support 0..=17
//! assert!(marginal.is_valid());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::DiscreteDistribution;
use crate::error::{Error, Result};
use crate::seq::with_unit_sum;

/// Tolerance used by [`EmpiricalDistribution::is_valid`].
pub const VALIDITY_TOLERANCE: f64 = 1e-7;

/// Configuration for the marginal builder.
///
/// Use [`Default::default()`] for the usual settings or chain the setters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarginalConfig {
    /// Largest upper-tail mass left after truncation (default: `1e-5`).
    pub tail_tolerance: f64,
    /// Number of integers searched for a truncation point (default: 1000).
    pub search_cap: u64,
    /// Fold the truncated tail into the last support point (default: `true`).
    pub edit_tail: bool,
}

impl Default for MarginalConfig {
    fn default() -> Self {
        Self {
            tail_tolerance: 1e-5,
            search_cap: 1000,
            edit_tail: true,
        }
    }
}

impl MarginalConfig {
    /// Sets the tail tolerance.
    #[must_use]
    pub fn tail_tolerance(mut self, tolerance: f64) -> Self {
        self.tail_tolerance = tolerance;
        self
    }

    /// Sets the search cap.
    #[must_use]
    pub fn search_cap(mut self, cap: u64) -> Self {
        self.search_cap = cap;
        self
    }

    /// Enables or disables the tail correction.
    #[must_use]
    pub fn edit_tail(mut self, edit: bool) -> Self {
        self.edit_tail = edit;
        self
    }
}

/// Finds the smallest `k < search_cap` with `P(X > k) <= tolerance`.
///
/// # Errors
///
/// Returns `Error::InvalidTolerance` if `tolerance` is not finite and positive.
/// Returns `Error::TruncationFailed` if no such `k` exists below `search_cap`.
///
/// # Examples
///
/// ```
/// use frechet_bounds::empirical::upper_bound;
/// use statrs::distribution::Poisson;
///
/// let poisson = Poisson::new(5.0).unwrap();
/// assert_eq!(upper_bound(&poisson, 1e-5, 1000).unwrap(), 17);
/// ```
pub fn upper_bound<D>(dist: &D, tolerance: f64, search_cap: u64) -> Result<u64>
where
    D: DiscreteDistribution + ?Sized,
{
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(Error::InvalidTolerance(tolerance));
    }

    let end = (0..search_cap)
        .find(|&k| dist.sf(k) <= tolerance)
        .ok_or(Error::TruncationFailed {
            tolerance,
            search_cap,
        })?;

    trace_debug!(end, tolerance, "truncation point found");
    Ok(end)
}

/// `sum_i weights[i] * support[i]^n`.
#[must_use]
pub fn discrete_nth_moment(weights: &[f64], support: &[f64], n: i32) -> f64 {
    weights
        .iter()
        .zip(support)
        .map(|(w, s)| w * s.powi(n))
        .sum()
}

/// A finite discrete distribution on ascending real support.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEmpiricalDistribution"))]
pub struct EmpiricalDistribution {
    weights: Vec<f64>,
    support: Vec<f64>,
}

/// Unchecked wire form, validated by [`EmpiricalDistribution::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawEmpiricalDistribution {
    weights: Vec<f64>,
    support: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEmpiricalDistribution> for EmpiricalDistribution {
    type Error = Error;

    fn try_from(raw: RawEmpiricalDistribution) -> Result<Self> {
        Self::new(raw.weights, raw.support)
    }
}

impl EmpiricalDistribution {
    /// Creates a distribution from index-aligned weights and support.
    ///
    /// The weights are not required to sum to one; use
    /// [`is_valid`](Self::is_valid) to check.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the two sequences differ in length.
    /// Returns `Error::EmptyDistribution` if they are empty.
    /// Returns `Error::UnsortedSupport` if `support` is not strictly ascending.
    pub fn new(weights: Vec<f64>, support: Vec<f64>) -> Result<Self> {
        if weights.len() != support.len() {
            return Err(Error::LengthMismatch {
                weights: weights.len(),
                support: support.len(),
            });
        }
        if support.is_empty() {
            return Err(Error::EmptyDistribution);
        }
        if let Some(i) = support.windows(2).position(|w| w[0] >= w[1]) {
            return Err(Error::UnsortedSupport(i + 1));
        }
        Ok(Self { weights, support })
    }

    /// Discretizes `dist` over `0..=K`, where `K` is the truncation point
    /// found by [`upper_bound`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`upper_bound`].
    #[allow(clippy::cast_precision_loss)]
    pub fn from_distribution<D>(dist: &D, config: &MarginalConfig) -> Result<Self>
    where
        D: DiscreteDistribution + ?Sized,
    {
        let end = upper_bound(dist, config.tail_tolerance, config.search_cap)?;

        let support: Vec<f64> = (0..=end).map(|k| k as f64).collect();
        let raw: Vec<f64> = (0..=end).map(|k| dist.pmf(k)).collect();
        let weights = if config.edit_tail {
            with_unit_sum(&raw)
        } else {
            raw
        };

        Ok(Self { weights, support })
    }

    /// The probability weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The support values, strictly ascending.
    #[must_use]
    pub fn support(&self) -> &[f64] {
        &self.support
    }

    /// Number of support points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.support.len()
    }

    /// Always `false` for a successfully constructed distribution.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    /// First moment of the weights over the support.
    #[must_use]
    pub fn mean(&self) -> f64 {
        discrete_nth_moment(&self.weights, &self.support, 1)
    }

    /// Second central moment.
    #[must_use]
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        discrete_nth_moment(&self.weights, &self.support, 2) - mean * mean
    }

    /// Sum of the weights.
    #[must_use]
    pub fn total_prob(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Shannon entropy in nats. Zero-weight points contribute nothing.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        -self
            .weights
            .iter()
            .filter(|&&w| w > 0.0)
            .map(|w| w * w.ln())
            .sum::<f64>()
    }

    /// Whether the weights are non-negative and sum to one within
    /// [`VALIDITY_TOLERANCE`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weights.iter().all(|&w| w >= 0.0)
            && (self.total_prob() - 1.0).abs() <= VALIDITY_TOLERANCE
    }
}

/// One marginal per dimension, in dimension order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmpDistrArray {
    marginals: Vec<EmpiricalDistribution>,
}

impl EmpDistrArray {
    /// Wraps `marginals`, one per dimension.
    #[must_use]
    pub fn new(marginals: Vec<EmpiricalDistribution>) -> Self {
        Self { marginals }
    }

    /// Builds one marginal per provider with [`EmpiricalDistribution::from_distribution`].
    ///
    /// # Errors
    ///
    /// Returns the first truncation error encountered.
    pub fn from_distributions<D>(dists: &[D], config: &MarginalConfig) -> Result<Self>
    where
        D: DiscreteDistribution,
    {
        let marginals = dists
            .iter()
            .map(|d| EmpiricalDistribution::from_distribution(d, config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { marginals })
    }

    /// Appends a marginal as the next dimension.
    pub fn push(&mut self, marginal: EmpiricalDistribution) {
        self.marginals.push(marginal);
    }

    #[must_use]
    pub fn marginals(&self) -> &[EmpiricalDistribution] {
        &self.marginals
    }

    #[must_use]
    pub fn get(&self, dim: usize) -> Option<&EmpiricalDistribution> {
        self.marginals.get(dim)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, EmpiricalDistribution> {
        self.marginals.iter()
    }

    /// Number of marginals.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.marginals.len()
    }

    /// Mean of each marginal.
    #[must_use]
    pub fn means(&self) -> Vec<f64> {
        self.marginals.iter().map(EmpiricalDistribution::mean).collect()
    }

    /// Variance of each marginal.
    #[must_use]
    pub fn variances(&self) -> Vec<f64> {
        self.marginals
            .iter()
            .map(EmpiricalDistribution::variance)
            .collect()
    }

    /// Sum of the total probabilities of all marginals.
    #[must_use]
    pub fn total_prob(&self) -> f64 {
        self.marginals
            .iter()
            .map(EmpiricalDistribution::total_prob)
            .sum()
    }

    /// Entropy of each marginal, in nats.
    #[must_use]
    pub fn entropies(&self) -> Vec<f64> {
        self.marginals
            .iter()
            .map(EmpiricalDistribution::entropy)
            .collect()
    }

    /// Whether every marginal passes [`EmpiricalDistribution::is_valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.marginals.iter().all(EmpiricalDistribution::is_valid)
    }
}

impl<'a> IntoIterator for &'a EmpDistrArray {
    type Item = &'a EmpiricalDistribution;
    type IntoIter = core::slice::Iter<'a, EmpiricalDistribution>;

    fn into_iter(self) -> Self::IntoIter {
        self.marginals.iter()
    }
}

impl FromIterator<EmpiricalDistribution> for EmpDistrArray {
    fn from_iter<I: IntoIterator<Item = EmpiricalDistribution>>(iter: I) -> Self {
        Self {
            marginals: iter.into_iter().collect(),
        }
    }
}
