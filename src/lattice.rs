//! Lattice points and finite discrete measures over them.
//!
//! A [`DiscreteMeasure`] keeps its support strictly ascending and unique at
//! all times; weights are index-aligned with the support. Two measures of the
//! same dimension combine with `+=`, which adds weights on shared points and
//! inserts new ones.
//!
//! Lattice points compare lexicographically, coordinate by coordinate.

use core::fmt;
use core::ops::AddAssign;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An integer point in the joint support space.
///
/// # Examples
///
/// ```
/// use frechet_bounds::LatticePoint;
///
/// let p = LatticePoint::from(vec![1, 2, 3, 4]);
/// let q = LatticePoint::from(vec![1, 3, 3, 4]);
/// assert!(p < q);
/// assert_eq!(p.dimension(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatticePoint(Vec<i64>);

impl LatticePoint {
    #[must_use]
    pub fn new(coords: Vec<i64>) -> Self {
        Self(coords)
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn coords(&self) -> &[i64] {
        &self.0
    }

    /// Product of all coordinates, computed in floating point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn product(&self) -> f64 {
        self.0.iter().map(|&c| c as f64).product()
    }

    /// The point restricted to `dims`, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if any index in `dims` is out of range.
    #[must_use]
    pub fn project(&self, dims: &[usize]) -> Self {
        Self(dims.iter().map(|&d| self.0[d]).collect())
    }
}

impl From<Vec<i64>> for LatticePoint {
    fn from(coords: Vec<i64>) -> Self {
        Self(coords)
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

/// Applies `perm` to both sequences in place, so that afterwards
/// `support[i]` holds what was at `support[perm[i]]`.
///
/// Follows each cycle once; `perm` is consumed as the visited marker.
fn apply_permutation<T, U>(perm: &mut [usize], support: &mut [T], weights: &mut [U]) {
    for start in 0..perm.len() {
        if perm[start] == start {
            continue;
        }
        let mut current = start;
        loop {
            let next = perm[current];
            perm[current] = current;
            if next == start {
                break;
            }
            support.swap(current, next);
            weights.swap(current, next);
            current = next;
        }
    }
}

/// A finite set of weighted lattice points of equal dimension.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDiscreteMeasure"))]
pub struct DiscreteMeasure {
    dimension: usize,
    support: Vec<LatticePoint>,
    weights: Vec<f64>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawDiscreteMeasure {
    dimension: usize,
    support: Vec<LatticePoint>,
    weights: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDiscreteMeasure> for DiscreteMeasure {
    type Error = Error;

    fn try_from(raw: RawDiscreteMeasure) -> Result<Self> {
        if raw.support.is_empty() && raw.weights.is_empty() {
            return Ok(Self::empty(raw.dimension));
        }
        let measure = Self::new(raw.support, raw.weights)?;
        if measure.dimension != raw.dimension {
            return Err(Error::DimensionMismatch {
                expected: raw.dimension,
                got: measure.dimension,
            });
        }
        Ok(measure)
    }
}

impl DiscreteMeasure {
    /// A measure with no support points.
    #[must_use]
    pub fn empty(dimension: usize) -> Self {
        Self {
            dimension,
            support: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Creates a measure from index-aligned points and weights, in any order.
    ///
    /// The pairs are sorted by point.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the sequences differ in length.
    /// Returns `Error::EmptyDistribution` if they are empty.
    /// Returns `Error::DimensionMismatch` if the points differ in dimension.
    /// Returns `Error::DuplicateSupportPoint` if a point appears twice.
    pub fn new(support: Vec<LatticePoint>, weights: Vec<f64>) -> Result<Self> {
        if support.len() != weights.len() {
            return Err(Error::LengthMismatch {
                weights: weights.len(),
                support: support.len(),
            });
        }
        let dimension = support
            .first()
            .map(LatticePoint::dimension)
            .ok_or(Error::EmptyDistribution)?;
        if let Some(bad) = support.iter().find(|p| p.dimension() != dimension) {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                got: bad.dimension(),
            });
        }

        let mut measure = Self {
            dimension,
            support,
            weights,
        };
        measure.sort();
        if let Some(i) = measure.support.windows(2).position(|w| w[0] == w[1]) {
            return Err(Error::DuplicateSupportPoint(i + 1));
        }
        Ok(measure)
    }

    /// Builds from pairs already sorted and unique.
    pub(crate) fn from_sorted_unchecked(
        dimension: usize,
        support: Vec<LatticePoint>,
        weights: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(support.len(), weights.len());
        debug_assert!(support.windows(2).all(|w| w[0] < w[1]));
        Self {
            dimension,
            support,
            weights,
        }
    }

    #[must_use]
    pub fn support(&self) -> &[LatticePoint] {
        &self.support
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of support points.
    #[must_use]
    pub fn size(&self) -> usize {
        self.support.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// `(point, weight)` pairs in ascending point order.
    pub fn iter(&self) -> impl Iterator<Item = (&LatticePoint, f64)> + '_ {
        self.support.iter().zip(self.weights.iter().copied())
    }

    /// Weight at `point`, if it is in the support.
    #[must_use]
    pub fn weight_of(&self, point: &LatticePoint) -> Option<f64> {
        self.support
            .binary_search(point)
            .ok()
            .map(|i| self.weights[i])
    }

    /// Combines `other` into `self`: weights on shared points are added,
    /// new points are inserted, and the support is re-sorted.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the dimensions differ.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if other.dimension != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                got: other.dimension,
            });
        }

        let existing = self.support.len();
        for (point, weight) in other.iter() {
            match self.support[..existing].binary_search(point) {
                Ok(i) => self.weights[i] += weight,
                Err(_) => {
                    self.support.push(point.clone());
                    self.weights.push(weight);
                }
            }
        }

        if self.support.len() > existing {
            self.sort();
        }
        Ok(())
    }

    /// Sums weights over points that agree on `keep`, producing a measure on
    /// those coordinates (in the order given).
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyProjection` if `keep` is empty.
    /// Returns `Error::DimensionOutOfRange` for an index `>= dimension()`.
    /// Returns `Error::DuplicateDimension` if an index repeats.
    pub fn marginalize(&self, keep: &[usize]) -> Result<Self> {
        validate_projection(keep, self.dimension)?;

        let mut collapsed: BTreeMap<LatticePoint, f64> = BTreeMap::new();
        for (point, weight) in self.iter() {
            *collapsed.entry(point.project(keep)).or_insert(0.0) += weight;
        }

        let (support, weights) = collapsed.into_iter().unzip();
        Ok(Self::from_sorted_unchecked(keep.len(), support, weights))
    }

    /// Sorts support ascending and carries the weights along.
    fn sort(&mut self) {
        let mut perm: Vec<usize> = (0..self.support.len()).collect();
        perm.sort_unstable_by(|&a, &b| self.support[a].cmp(&self.support[b]));
        apply_permutation(&mut perm, &mut self.support, &mut self.weights);
    }
}

pub(crate) fn validate_projection(keep: &[usize], dimension: usize) -> Result<()> {
    if keep.is_empty() {
        return Err(Error::EmptyProjection);
    }
    let mut seen = vec![false; dimension];
    for &index in keep {
        let slot = seen
            .get_mut(index)
            .ok_or(Error::DimensionOutOfRange { index, dimension })?;
        if *slot {
            return Err(Error::DuplicateDimension(index));
        }
        *slot = true;
    }
    Ok(())
}

impl AddAssign<&DiscreteMeasure> for DiscreteMeasure {
    /// # Panics
    ///
    /// Panics if the measures have different dimensions.
    fn add_assign(&mut self, rhs: &DiscreteMeasure) {
        if let Err(err) = self.merge(rhs) {
            panic!("{err}");
        }
    }
}

impl AddAssign for DiscreteMeasure {
    fn add_assign(&mut self, rhs: DiscreteMeasure) {
        *self += &rhs;
    }
}
