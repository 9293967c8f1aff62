//! Marginal distribution providers.
//!
//! The construction only ever needs two things from a marginal: its
//! probability mass at a non-negative integer and its complementary CDF.
//! Every `statrs` distribution that exposes both over `u64` gets the
//! [`DiscreteDistribution`] implementation for free.

use statrs::distribution::{Discrete, DiscreteCDF};

/// A distribution over the non-negative integers with closed-form pmf and
/// complementary CDF.
///
/// # Examples
///
/// ```
/// use frechet_bounds::DiscreteDistribution;
/// use statrs::distribution::Poisson;
///
/// let poisson = Poisson::new(5.0).unwrap();
/// assert!(DiscreteDistribution::pmf(&poisson, 5) > 0.17);
/// assert!(DiscreteDistribution::sf(&poisson, 17) < 1e-5);
/// ```
pub trait DiscreteDistribution {
    /// Probability mass at `k`.
    fn pmf(&self, k: u64) -> f64;

    /// Complementary CDF, `P(X > k)`.
    fn sf(&self, k: u64) -> f64;
}

impl<D> DiscreteDistribution for D
where
    D: Discrete<u64, f64> + DiscreteCDF<u64, f64>,
{
    fn pmf(&self, k: u64) -> f64 {
        <D as Discrete<u64, f64>>::pmf(self, k)
    }

    fn sf(&self, k: u64) -> f64 {
        <D as DiscreteCDF<u64, f64>>::sf(self, k)
    }
}
