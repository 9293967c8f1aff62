//! Correlations of extreme measures and the bounds they imply.
//!
//! Among all couplings of two fixed marginals, the comonotone coupling
//! attains the largest correlation and the countermonotone coupling the
//! smallest. These are exactly the two 2-D extreme measures, so the
//! correlation bounds are read directly off them.

use crate::empirical::MarginalConfig;
use crate::error::Result;
use crate::extreme::{ExtremeMeasure, construct_poisson_extreme_measures};
use crate::lattice::LatticePoint;

/// `E[X Y]` under the 2-D measure `(support, weights)`.
///
/// # Panics
///
/// Panics if any support point is not 2-dimensional.
#[must_use]
pub fn bivariate_expectation(support: &[LatticePoint], weights: &[f64]) -> f64 {
    assert!(
        support.iter().all(|p| p.dimension() == 2),
        "bivariate expectation requires a 2-dimensional measure"
    );
    support
        .iter()
        .zip(weights)
        .map(|(p, w)| p.product() * w)
        .sum()
}

/// Pearson correlation of the 2-D measure `(support, weights)` given the
/// marginal means and variances.
///
/// # Panics
///
/// Panics if the measure is not 2-dimensional or fewer than two means or
/// variances are supplied.
#[must_use]
pub fn correlation(
    support: &[LatticePoint],
    weights: &[f64],
    means: &[f64],
    variances: &[f64],
) -> f64 {
    assert!(
        means.len() >= 2 && variances.len() >= 2,
        "correlation requires two means and two variances"
    );
    let bivarexp = bivariate_expectation(support, weights);
    (bivarexp - means[0] * means[1]) / (variances[0] * variances[1]).sqrt()
}

impl ExtremeMeasure {
    /// Correlation of a 2-D extreme measure, using its stored means and
    /// variances.
    ///
    /// # Panics
    ///
    /// Panics if the measure is not 2-dimensional.
    #[must_use]
    pub fn correlation(&self) -> f64 {
        assert_eq!(
            self.dimension(),
            2,
            "correlation requires a 2-dimensional measure"
        );
        correlation(self.support(), self.weights(), self.means(), self.variances())
    }
}

/// Correlation of every coordinate pair `(i, j)`, `i < j`, in lexicographic
/// order, each computed on the 2-D marginalization of `em`.
///
/// # Errors
///
/// Propagates marginalization errors; none occur for a well-formed measure.
pub fn correlations(em: &ExtremeMeasure) -> Result<Vec<((usize, usize), f64)>> {
    let n = em.dimension();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let pair = em.marginalize(&[i, j])?;
            out.push(((i, j), pair.correlation()));
        }
    }
    Ok(out)
}

/// `(max, min)` achievable correlation between two Poisson variables with
/// the given intensities.
///
/// # Errors
///
/// Returns `Error::InvalidIntensity` for a non-positive intensity, or a
/// truncation error if a marginal cannot be truncated.
///
/// # Examples
///
/// ```
/// use frechet_bounds::poiss_correlation_bounds_2d;
///
/// let (max, min) = poiss_correlation_bounds_2d(3.0, 5.0).unwrap();
/// assert!((max - 0.9768).abs() < 1e-3);
/// assert!((min + 0.9387).abs() < 1e-3);
/// ```
pub fn poiss_correlation_bounds_2d(intensity1: f64, intensity2: f64) -> Result<(f64, f64)> {
    let ems = construct_poisson_extreme_measures(
        &[intensity1, intensity2],
        &MarginalConfig::default(),
    )?;
    let max_corr = ems[0].correlation();
    let min_corr = ems[1].correlation();
    trace_info!(intensity1, intensity2, max_corr, min_corr, "poisson correlation bounds");
    Ok((max_corr, min_corr))
}
