//! Extreme points of the Fréchet class.
//!
//! Given `n` marginals and a sign pattern, the construction couples the
//! marginals through a single uniform variable: marginal `i` is inverted at
//! `u` through its CDF taken in ascending support order when its sign is `+1`
//! and in descending order when it is `-1`.
//!
//! # Algorithm
//!
//! 1. Build an oriented CDF per marginal (reverse support and weights first
//!    for a `-1` sign).
//! 2. Merge all CDF values into one sorted, deduplicated breakpoint sequence,
//!    dropping values within `near_one_epsilon` of one and appending an exact
//!    `1.0`.
//! 3. The weights are the successive differences of the breakpoints.
//! 4. At each breakpoint `v`, coordinate `i` is the support value at the first
//!    index where marginal `i`'s oriented CDF reaches `v` (the last index if it
//!    never does).
//!
//! For two marginals the patterns `(+1, +1)` and `(+1, -1)` give the
//! comonotone and countermonotone couplings, which attain the maximal and
//! minimal correlation among all couplings.
//!
//! # Example
//!
//! ```
//! use frechet_bounds::{EmpDistrArray, ExtremeMeasure, MarginalConfig, SignPattern};
//! use statrs::distribution::Poisson;
//!
//! let dists = [Poisson::new(3.0).unwrap(), Poisson::new(5.0).unwrap()];
//! let marginals = EmpDistrArray::from_distributions(&dists, &MarginalConfig::default()).unwrap();
//!
//! let em = ExtremeMeasure::builder(&marginals)
//!     .signs(SignPattern::countermonotone())
//!     .means(vec![3.0, 5.0])
//!     .variances(vec![3.0, 5.0])
//!     .build()
//!     .unwrap();
//!
//! assert!((em.total_weight() - 1.0).abs() < 1e-12);
//! assert!(em.correlation() < -0.9);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use statrs::distribution::Poisson;

use crate::empirical::{EmpDistrArray, EmpiricalDistribution, MarginalConfig};
use crate::error::{Error, Result};
use crate::lattice::{DiscreteMeasure, LatticePoint, validate_projection};
use crate::monotone::{MonotonicityStructure, Sign, SignPattern};
use crate::seq::{adjacent_difference, cumsum, merge_breakpoints};

/// Configuration for the extreme-measure construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtremeMeasureConfig {
    /// CDF values closer than this to one are merged into the single right
    /// endpoint `1.0` (default: `1e-9`).
    pub near_one_epsilon: f64,
}

impl Default for ExtremeMeasureConfig {
    fn default() -> Self {
        Self {
            near_one_epsilon: 1e-9,
        }
    }
}

/// A discrete measure that is an extreme point of the Fréchet class of its
/// marginals, together with the sign pattern that selected it and the
/// per-dimension means and variances used for dependence measures.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawExtremeMeasure"))]
pub struct ExtremeMeasure {
    measure: DiscreteMeasure,
    monotone_structure: SignPattern,
    means: Vec<f64>,
    variances: Vec<f64>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawExtremeMeasure {
    measure: DiscreteMeasure,
    monotone_structure: SignPattern,
    means: Vec<f64>,
    variances: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawExtremeMeasure> for ExtremeMeasure {
    type Error = Error;

    fn try_from(raw: RawExtremeMeasure) -> Result<Self> {
        let dimension = raw.measure.dimension();
        if raw.monotone_structure.len() != dimension {
            return Err(Error::SignPatternLength {
                expected: dimension,
                got: raw.monotone_structure.len(),
            });
        }
        check_moment_length("means", &raw.means, dimension)?;
        check_moment_length("variances", &raw.variances, dimension)?;
        Ok(Self {
            measure: raw.measure,
            monotone_structure: raw.monotone_structure,
            means: raw.means,
            variances: raw.variances,
        })
    }
}

impl ExtremeMeasure {
    /// Starts building the extreme measure of `marginals`.
    #[must_use]
    pub fn builder(marginals: &EmpDistrArray) -> ExtremeMeasureBuilder<'_> {
        ExtremeMeasureBuilder::new(marginals)
    }

    #[must_use]
    pub fn measure(&self) -> &DiscreteMeasure {
        &self.measure
    }

    #[must_use]
    pub fn into_measure(self) -> DiscreteMeasure {
        self.measure
    }

    #[must_use]
    pub fn support(&self) -> &[LatticePoint] {
        self.measure.support()
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        self.measure.weights()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.measure.size()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.measure.dimension()
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.measure.total_weight()
    }

    /// The sign pattern this measure was constructed for.
    #[must_use]
    pub fn monotone_structure(&self) -> &SignPattern {
        &self.monotone_structure
    }

    #[must_use]
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    #[must_use]
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    /// Replaces the per-dimension means and variances.
    ///
    /// # Errors
    ///
    /// Returns `Error::MomentLength` if either has the wrong length.
    pub fn with_moments(mut self, means: Vec<f64>, variances: Vec<f64>) -> Result<Self> {
        let dimension = self.dimension();
        check_moment_length("means", &means, dimension)?;
        check_moment_length("variances", &variances, dimension)?;
        self.means = means;
        self.variances = variances;
        Ok(self)
    }

    /// Restricts the measure to the coordinates in `keep` (in that order),
    /// summing weights over collapsed points. The sign pattern, means and
    /// variances are restricted the same way.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyProjection`, `Error::DimensionOutOfRange` or
    /// `Error::DuplicateDimension` for an invalid `keep`.
    pub fn marginalize(&self, keep: &[usize]) -> Result<Self> {
        validate_projection(keep, self.dimension())?;
        Ok(Self {
            measure: self.measure.marginalize(keep)?,
            monotone_structure: self.monotone_structure.select(keep),
            means: keep.iter().map(|&d| self.means[d]).collect(),
            variances: keep.iter().map(|&d| self.variances[d]).collect(),
        })
    }
}

fn check_moment_length(name: &'static str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(Error::MomentLength {
            name,
            expected,
            got: values.len(),
        })
    }
}

/// Builder for [`ExtremeMeasure`].
///
/// Defaults:
/// - signs: all `+1` (the comonotone coupling)
/// - means / variances: the empirical moments of the marginals
/// - config: [`ExtremeMeasureConfig::default()`]
///
/// Means and variances are normally supplied from known distributional
/// parameters; the empirical fallback reflects the truncated marginals.
#[derive(Debug, Clone)]
pub struct ExtremeMeasureBuilder<'a> {
    marginals: &'a EmpDistrArray,
    signs: Option<SignPattern>,
    means: Option<Vec<f64>>,
    variances: Option<Vec<f64>>,
    config: ExtremeMeasureConfig,
}

impl<'a> ExtremeMeasureBuilder<'a> {
    #[must_use]
    pub fn new(marginals: &'a EmpDistrArray) -> Self {
        Self {
            marginals,
            signs: None,
            means: None,
            variances: None,
            config: ExtremeMeasureConfig::default(),
        }
    }

    /// Sets the sign pattern selecting the extreme point.
    #[must_use]
    pub fn signs(mut self, signs: SignPattern) -> Self {
        self.signs = Some(signs);
        self
    }

    #[must_use]
    pub fn means(mut self, means: Vec<f64>) -> Self {
        self.means = Some(means);
        self
    }

    #[must_use]
    pub fn variances(mut self, variances: Vec<f64>) -> Self {
        self.variances = Some(variances);
        self
    }

    #[must_use]
    pub fn config(mut self, config: ExtremeMeasureConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn near_one_epsilon(mut self, epsilon: f64) -> Self {
        self.config.near_one_epsilon = epsilon;
        self
    }

    /// Runs the construction.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyMarginals` if there are no marginals.
    /// Returns `Error::SignPatternLength` if the sign pattern doesn't have
    /// one entry per marginal.
    /// Returns `Error::MomentLength` if means or variances are mis-sized.
    /// Propagates the marginal checks of [`construct_measure`].
    pub fn build(self) -> Result<ExtremeMeasure> {
        let dimension = self.marginals.dimensions();
        if dimension == 0 {
            return Err(Error::EmptyMarginals);
        }

        let signs = self
            .signs
            .unwrap_or_else(|| SignPattern::comonotone(dimension));
        let means = self.means.unwrap_or_else(|| self.marginals.means());
        let variances = self
            .variances
            .unwrap_or_else(|| self.marginals.variances());
        check_moment_length("means", &means, dimension)?;
        check_moment_length("variances", &variances, dimension)?;

        let measure = construct_measure(self.marginals, &signs, &self.config)?;
        trace_debug!(
            dimension,
            size = measure.size(),
            signs = %signs,
            "extreme measure constructed"
        );

        Ok(ExtremeMeasure {
            measure,
            monotone_structure: signs,
            means,
            variances,
        })
    }
}

/// CDF and support of `marginal`, reversed first for a `-1` sign.
fn oriented_cdf(marginal: &EmpiricalDistribution, sign: Sign) -> (Vec<f64>, Vec<f64>) {
    match sign {
        Sign::Plus => (cumsum(marginal.weights()), marginal.support().to_vec()),
        Sign::Minus => {
            let weights: Vec<f64> = marginal.weights().iter().rev().copied().collect();
            let support: Vec<f64> = marginal.support().iter().rev().copied().collect();
            (cumsum(&weights), support)
        }
    }
}

/// Rejects marginals the merge cannot couple: weights must form a
/// probability distribution and support values must be `i64` integers.
#[allow(clippy::cast_precision_loss)]
fn check_marginals(marginals: &EmpDistrArray) -> Result<()> {
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    let range = (i64::MIN as f64)..(i64::MAX as f64);
    for (dim, marginal) in marginals.iter().enumerate() {
        if !marginal.is_valid() {
            return Err(Error::InvalidMarginal(dim));
        }
        if let Some(&value) = marginal
            .support()
            .iter()
            .find(|&&v| v.fract() != 0.0 || !range.contains(&v))
        {
            return Err(Error::NonLatticeSupport { dim, value });
        }
    }
    Ok(())
}

/// The simultaneous CDF-inversion merge.
///
/// # Errors
///
/// Returns `Error::EmptyMarginals` if there are no marginals and
/// `Error::SignPatternLength` if `signs` doesn't match their number.
/// Returns `Error::InvalidMarginal` if a marginal fails
/// [`EmpiricalDistribution::is_valid`] and `Error::NonLatticeSupport` if a
/// support value is not an integer in `i64` range.
#[allow(clippy::cast_possible_truncation)]
pub fn construct_measure(
    marginals: &EmpDistrArray,
    signs: &SignPattern,
    config: &ExtremeMeasureConfig,
) -> Result<DiscreteMeasure> {
    let dimension = marginals.dimensions();
    if dimension == 0 {
        return Err(Error::EmptyMarginals);
    }
    if signs.len() != dimension {
        return Err(Error::SignPatternLength {
            expected: dimension,
            got: signs.len(),
        });
    }
    check_marginals(marginals)?;

    let (cdfs, supports): (Vec<Vec<f64>>, Vec<Vec<f64>>) = marginals
        .iter()
        .zip(signs.signs())
        .map(|(m, &s)| oriented_cdf(m, s))
        .unzip();

    let breakpoints = merge_breakpoints(&cdfs, config.near_one_epsilon);
    let weights = adjacent_difference(&breakpoints);

    let mut points: Vec<LatticePoint> = Vec::with_capacity(breakpoints.len());
    let mut point_weights: Vec<f64> = Vec::with_capacity(breakpoints.len());
    for (&v, w) in breakpoints.iter().zip(weights) {
        let coords: Vec<i64> = cdfs
            .iter()
            .zip(&supports)
            .map(|(cdf, support)| {
                let k = cdf.partition_point(|&c| c < v).min(cdf.len() - 1);
                support[k] as i64
            })
            .collect();
        let point = LatticePoint::from(coords);

        // Consecutive breakpoints past a marginal's exhausted mass can map
        // to the same point; the coupling only ever revisits it immediately.
        if points.last() == Some(&point) {
            if let Some(last) = point_weights.last_mut() {
                *last += w;
            }
        } else {
            points.push(point);
            point_weights.push(w);
        }
    }

    DiscreteMeasure::new(points, point_weights)
}

/// One extreme measure per column of the monotonicity structure for
/// `marginals`, with the supplied means and variances attached to each.
///
/// With the `parallel` feature the sign patterns are processed on the
/// `rayon` thread pool.
///
/// # Errors
///
/// Returns `Error::InvalidDimension` for fewer than two marginals, plus any
/// error of [`ExtremeMeasureBuilder::build`].
pub fn construct_extreme_measures(
    marginals: &EmpDistrArray,
    means: &[f64],
    variances: &[f64],
    config: &ExtremeMeasureConfig,
) -> Result<Vec<ExtremeMeasure>> {
    let structure = MonotonicityStructure::new(marginals.dimensions())?;
    trace_info!(
        dimension = structure.dimension(),
        n_extreme_points = structure.num_extremepts(),
        "constructing extreme measures"
    );

    let patterns: Vec<SignPattern> = structure.patterns().collect();
    build_all(patterns, |signs| {
        ExtremeMeasure::builder(marginals)
            .signs(signs)
            .means(means.to_vec())
            .variances(variances.to_vec())
            .config(config.clone())
            .build()
    })
}

#[cfg(feature = "parallel")]
fn build_all<F>(patterns: Vec<SignPattern>, build: F) -> Result<Vec<ExtremeMeasure>>
where
    F: Fn(SignPattern) -> Result<ExtremeMeasure> + Sync + Send,
{
    patterns.into_par_iter().map(build).collect()
}

#[cfg(not(feature = "parallel"))]
fn build_all<F>(patterns: Vec<SignPattern>, build: F) -> Result<Vec<ExtremeMeasure>>
where
    F: Fn(SignPattern) -> Result<ExtremeMeasure>,
{
    patterns.into_iter().map(build).collect()
}

/// Extreme measures of the Fréchet class of independent-parameter Poisson
/// marginals. Means and variances are set to the intensities.
///
/// # Errors
///
/// Returns `Error::InvalidIntensity` for a non-positive or non-finite
/// intensity, plus any truncation or construction error.
pub fn construct_poisson_extreme_measures(
    intensities: &[f64],
    config: &MarginalConfig,
) -> Result<Vec<ExtremeMeasure>> {
    let dists = intensities
        .iter()
        .map(|&l| Poisson::new(l).map_err(|_| Error::InvalidIntensity(l)))
        .collect::<Result<Vec<_>>>()?;
    let marginals = EmpDistrArray::from_distributions(&dists, config)?;

    construct_extreme_measures(
        &marginals,
        intensities,
        intensities,
        &ExtremeMeasureConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn marginal(weights: &[f64], support: &[f64]) -> EmpiricalDistribution {
        EmpiricalDistribution::new(weights.to_vec(), support.to_vec()).unwrap()
    }

    fn point(coords: &[i64]) -> LatticePoint {
        LatticePoint::from(coords.to_vec())
    }

    /// Weight per distinct value of coordinate `dim`.
    fn coordinate_marginal(measure: &DiscreteMeasure, dim: usize) -> BTreeMap<i64, f64> {
        let mut out = BTreeMap::new();
        for (p, w) in measure.iter() {
            *out.entry(p.coords()[dim]).or_insert(0.0) += w;
        }
        out
    }

    fn coin_and_die() -> EmpDistrArray {
        EmpDistrArray::new(vec![
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
            marginal(&[0.25, 0.25, 0.25, 0.25], &[1.0, 2.0, 3.0, 4.0]),
        ])
    }

    #[test]
    fn test_oriented_cdf() {
        let m = marginal(&[0.2, 0.3, 0.5], &[0.0, 1.0, 2.0]);
        let (cdf, support) = oriented_cdf(&m, Sign::Plus);
        assert_eq!(support, vec![0.0, 1.0, 2.0]);
        assert!((cdf[1] - 0.5).abs() < 1e-15);

        let (cdf, support) = oriented_cdf(&m, Sign::Minus);
        assert_eq!(support, vec![2.0, 1.0, 0.0]);
        assert!((cdf[0] - 0.5).abs() < 1e-15);
        assert!((cdf[1] - 0.8).abs() < 1e-15);
    }

    #[test]
    fn test_comonotone_coupling() {
        let measure = construct_measure(
            &coin_and_die(),
            &SignPattern::comonotone(2),
            &ExtremeMeasureConfig::default(),
        )
        .unwrap();

        assert_eq!(
            measure.support(),
            &[point(&[0, 1]), point(&[0, 2]), point(&[1, 3]), point(&[1, 4])]
        );
        assert!(measure.weights().iter().all(|w| (w - 0.25).abs() < 1e-15));
    }

    #[test]
    fn test_countermonotone_coupling() {
        let measure = construct_measure(
            &coin_and_die(),
            &SignPattern::countermonotone(),
            &ExtremeMeasureConfig::default(),
        )
        .unwrap();

        // Sorted support; the coupling pairs 0 with {4, 3} and 1 with {2, 1}.
        assert_eq!(
            measure.support(),
            &[point(&[0, 3]), point(&[0, 4]), point(&[1, 1]), point(&[1, 2])]
        );
        assert!((measure.total_weight() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_unequal_atoms_split_mass() {
        let marginals = EmpDistrArray::new(vec![
            marginal(&[0.3, 0.7], &[0.0, 1.0]),
            marginal(&[0.6, 0.4], &[0.0, 1.0]),
        ]);
        let measure = construct_measure(
            &marginals,
            &SignPattern::comonotone(2),
            &ExtremeMeasureConfig::default(),
        )
        .unwrap();

        assert_eq!(measure.size(), 3);
        assert!((measure.weight_of(&point(&[0, 0])).unwrap() - 0.3).abs() < 1e-12);
        assert!((measure.weight_of(&point(&[1, 0])).unwrap() - 0.3).abs() < 1e-12);
        assert!((measure.weight_of(&point(&[1, 1])).unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn test_marginals_are_reproduced_for_every_pattern() {
        let marginals = EmpDistrArray::new(vec![
            marginal(&[0.1, 0.2, 0.3, 0.4], &[0.0, 1.0, 2.0, 3.0]),
            marginal(&[0.5, 0.25, 0.25], &[-1.0, 0.0, 5.0]),
            marginal(&[0.15, 0.35, 0.2, 0.2, 0.1], &[2.0, 3.0, 4.0, 7.0, 9.0]),
        ]);
        let structure = MonotonicityStructure::new(3).unwrap();

        for signs in structure.patterns() {
            let measure =
                construct_measure(&marginals, &signs, &ExtremeMeasureConfig::default()).unwrap();
            assert!((measure.total_weight() - 1.0).abs() < 1e-12);

            for (dim, m) in marginals.iter().enumerate() {
                let grouped = coordinate_marginal(&measure, dim);
                assert_eq!(grouped.len(), m.len(), "signs {signs}, dim {dim}");
                for ((&value, &weight), (&s, &w)) in
                    grouped.iter().zip(m.support().iter().zip(m.weights()))
                {
                    assert_eq!(value, s.round() as i64);
                    assert!((weight - w).abs() < 1e-12, "signs {signs}, dim {dim}");
                }
            }
        }
    }

    #[test]
    fn test_sign_pattern_length_mismatch() {
        let result = construct_measure(
            &coin_and_die(),
            &SignPattern::comonotone(3),
            &ExtremeMeasureConfig::default(),
        );
        assert!(matches!(
            result,
            Err(Error::SignPatternLength {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn test_empty_marginals() {
        let empty = EmpDistrArray::default();
        assert!(matches!(
            ExtremeMeasure::builder(&empty).build(),
            Err(Error::EmptyMarginals)
        ));
    }

    #[test]
    fn test_builder_moments() {
        let marginals = coin_and_die();
        let em = ExtremeMeasure::builder(&marginals).build().unwrap();
        assert_eq!(em.monotone_structure(), &SignPattern::comonotone(2));
        assert!((em.means()[0] - 0.5).abs() < 1e-15);
        assert!((em.variances()[1] - 1.25).abs() < 1e-12);

        let supplied = ExtremeMeasure::builder(&marginals)
            .means(vec![0.5, 2.5])
            .variances(vec![0.25, 1.25])
            .build()
            .unwrap();
        assert_eq!(supplied.means(), &[0.5, 2.5]);

        let bad = ExtremeMeasure::builder(&marginals).means(vec![1.0]).build();
        assert!(matches!(
            bad,
            Err(Error::MomentLength {
                name: "means",
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_near_one_epsilon_merges_right_tail() {
        // The first marginal's CDF passes through 1 - 1e-7 before reaching one.
        let marginals = EmpDistrArray::new(vec![
            marginal(&[0.5, 0.5 - 1e-7, 1e-7], &[0.0, 1.0, 2.0]),
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
        ]);

        let strict = ExtremeMeasure::builder(&marginals)
            .near_one_epsilon(1e-9)
            .build()
            .unwrap();
        assert_eq!(strict.size(), 3);
        assert_eq!(
            strict.support(),
            &[point(&[0, 0]), point(&[1, 1]), point(&[2, 1])]
        );
        assert!((strict.weights()[2] - 1e-7).abs() < 1e-12);

        let loose = ExtremeMeasure::builder(&marginals)
            .near_one_epsilon(1e-6)
            .build()
            .unwrap();
        assert_eq!(loose.size(), 2);
        assert_eq!(loose.support(), &[point(&[0, 0]), point(&[2, 1])]);
        assert!((loose.weights()[1] - 0.5).abs() < 1e-15);
        assert!((loose.total_weight() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_marginal_is_rejected() {
        let marginals = EmpDistrArray::new(vec![
            marginal(&[0.5, 0.7], &[0.0, 1.0]),
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
        ]);
        assert!(!marginals.is_valid());
        assert!(matches!(
            ExtremeMeasure::builder(&marginals).build(),
            Err(Error::InvalidMarginal(0))
        ));

        let negative = EmpDistrArray::new(vec![
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
            marginal(&[1.2, -0.2], &[0.0, 1.0]),
        ]);
        assert!(matches!(
            construct_measure(
                &negative,
                &SignPattern::countermonotone(),
                &ExtremeMeasureConfig::default()
            ),
            Err(Error::InvalidMarginal(1))
        ));
    }

    #[test]
    fn test_non_integer_support_is_rejected() {
        let marginals = EmpDistrArray::new(vec![
            marginal(&[0.5, 0.5], &[0.2, 0.4]),
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
        ]);
        let result = ExtremeMeasure::builder(&marginals).build();
        assert!(matches!(
            result,
            Err(Error::NonLatticeSupport { dim: 0, value }) if (value - 0.2).abs() < 1e-15
        ));

        let huge = EmpDistrArray::new(vec![
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
            marginal(&[0.5, 0.5], &[0.0, 1e19]),
        ]);
        assert!(matches!(
            ExtremeMeasure::builder(&huge).build(),
            Err(Error::NonLatticeSupport { dim: 1, .. })
        ));
    }

    #[test]
    fn test_batch_construction() {
        let marginals = EmpDistrArray::new(vec![
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
        ]);
        let ems = construct_extreme_measures(
            &marginals,
            &[0.5; 3],
            &[0.25; 3],
            &ExtremeMeasureConfig::default(),
        )
        .unwrap();

        assert_eq!(ems.len(), 4);
        for (em, signs) in ems.iter().zip(MonotonicityStructure::new(3).unwrap().patterns()) {
            assert_eq!(em.monotone_structure(), &signs);
            assert_eq!(em.size(), 2);
        }
    }

    #[test]
    fn test_batch_requires_two_marginals() {
        let marginals = EmpDistrArray::new(vec![marginal(&[1.0], &[0.0])]);
        assert!(matches!(
            construct_extreme_measures(&marginals, &[0.0], &[0.0], &ExtremeMeasureConfig::default()),
            Err(Error::InvalidDimension(1))
        ));
    }

    #[test]
    fn test_poisson_extreme_measures() {
        let pms = construct_poisson_extreme_measures(&[3.0, 5.0], &MarginalConfig::default())
            .unwrap();
        assert_eq!(pms.len(), 2);
        for em in &pms {
            assert_eq!(em.means(), &[3.0, 5.0]);
            assert_eq!(em.means(), em.variances());
            assert_eq!(em.dimension(), 2);
            assert!((em.total_weight() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_poisson_invalid_intensity() {
        let result = construct_poisson_extreme_measures(&[3.0, -1.0], &MarginalConfig::default());
        assert!(matches!(result, Err(Error::InvalidIntensity(l)) if (l + 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_marginalize_extreme_measure() {
        let marginals = EmpDistrArray::new(vec![
            marginal(&[0.5, 0.5], &[0.0, 1.0]),
            marginal(&[0.25, 0.75], &[0.0, 1.0]),
            marginal(&[0.5, 0.5], &[3.0, 4.0]),
        ]);
        let em = ExtremeMeasure::builder(&marginals)
            .signs(SignPattern::try_from(&[1_i64, -1, -1][..]).unwrap())
            .build()
            .unwrap();

        let reduced = em.marginalize(&[2, 0]).unwrap();
        assert_eq!(reduced.dimension(), 2);
        assert_eq!(reduced.monotone_structure().values(), vec![-1, 1]);
        assert_eq!(reduced.means(), &[em.means()[2], em.means()[0]]);
        assert!((reduced.total_weight() - 1.0).abs() < 1e-12);

        let first = em.marginalize(&[1]).unwrap();
        assert_eq!(first.support(), &[point(&[0]), point(&[1])]);
        assert!((first.weights()[0] - 0.25).abs() < 1e-12);

        assert!(em.marginalize(&[3]).is_err());
    }
}
