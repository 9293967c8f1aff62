//! Monotonicity structures: the sign patterns that select extreme points.
//!
//! For `n` marginals the structure is an `n x 2^(n-1)` matrix of `±1`. Each
//! column is one admissible orientation; the first coordinate is always `+1`
//! because flipping every sign yields the same coupling.
//!
//! The matrix is built by recursive doubling:
//!
//! ```text
//! n = 2:  [ +1 +1 ]      n = 3:  [ +1 +1 +1 +1 ]
//!         [ +1 -1 ]              [ +1 -1 +1 -1 ]
//!                                [ +1 +1 -1 -1 ]
//! ```
//!
//! Every recursive step allocates a fresh matrix and copies the smaller
//! structure into both halves.

use core::fmt;

use nalgebra::DMatrix;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest number of marginals a structure can be built for.
///
/// The structure holds `n * 2^(n-1)` bytes; at this cap that is 10 MiB.
pub const MAX_DIMENSION: usize = 20;

/// Orientation of one marginal in a coupling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    /// Ascending support order (comonotone with the first marginal).
    Plus,
    /// Descending support order (countermonotone with the first marginal).
    Minus,
}

impl Sign {
    /// `+1` or `-1`.
    #[must_use]
    pub fn value(self) -> i8 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }
}

impl TryFrom<i64> for Sign {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Self::Plus),
            -1 => Ok(Self::Minus),
            other => Err(Error::InvalidSign(other)),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+1"),
            Self::Minus => write!(f, "-1"),
        }
    }
}

/// One sign per dimension.
///
/// # Examples
///
/// ```
/// use frechet_bounds::{Sign, SignPattern};
///
/// let pattern = SignPattern::try_from(&[1_i64, -1][..]).unwrap();
/// assert_eq!(pattern.signs(), &[Sign::Plus, Sign::Minus]);
/// assert!(SignPattern::try_from(&[1_i64, 0][..]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignPattern(Vec<Sign>);

impl SignPattern {
    #[must_use]
    pub fn new(signs: Vec<Sign>) -> Self {
        Self(signs)
    }

    /// The comonotone pattern `(+1, ..., +1)`.
    #[must_use]
    pub fn comonotone(dimension: usize) -> Self {
        Self(vec![Sign::Plus; dimension])
    }

    /// The 2-D countermonotone pattern `(+1, -1)`.
    #[must_use]
    pub fn countermonotone() -> Self {
        Self(vec![Sign::Plus, Sign::Minus])
    }

    #[must_use]
    pub fn signs(&self) -> &[Sign] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Signs as `±1` integers.
    #[must_use]
    pub fn values(&self) -> Vec<i8> {
        self.0.iter().copied().map(Sign::value).collect()
    }

    /// Keeps the signs at `dims`, in the given order. Indices must be in range.
    pub(crate) fn select(&self, dims: &[usize]) -> Self {
        Self(dims.iter().map(|&d| self.0[d]).collect())
    }
}

impl TryFrom<&[i64]> for SignPattern {
    type Error = Error;

    fn try_from(values: &[i64]) -> Result<Self> {
        values
            .iter()
            .map(|&v| Sign::try_from(v))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl From<Vec<Sign>> for SignPattern {
    fn from(signs: Vec<Sign>) -> Self {
        Self(signs)
    }
}

impl fmt::Display for SignPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{s}")?;
        }
        write!(f, ")")
    }
}

/// Shape of the monotonicity structure for `n` marginals: `(n, 2^(n-1))`.
///
/// # Errors
///
/// Returns `Error::InvalidDimension` for the same `n` that
/// [`MonotonicityStructure::new`] rejects.
pub fn monotone_struct_size(n: usize) -> Result<(usize, usize)> {
    check_dimension(n)?;
    Ok((n, 1_usize << (n - 1)))
}

fn check_dimension(n: usize) -> Result<()> {
    if (2..=MAX_DIMENSION).contains(&n) {
        Ok(())
    } else {
        Err(Error::InvalidDimension(n))
    }
}

/// Recursive doubling; `n >= 2` is checked by the caller.
fn construct_matrix(n: usize) -> DMatrix<i8> {
    if n == 2 {
        return DMatrix::from_row_slice(2, 2, &[1, 1, 1, -1]);
    }

    let lower = construct_matrix(n - 1);
    let half = lower.ncols();
    DMatrix::from_fn(n, 2 * half, |row, col| {
        if row < n - 1 {
            lower[(row, col % half)]
        } else if col < half {
            1
        } else {
            -1
        }
    })
}

/// All admissible sign patterns for `n` marginals.
///
/// # Examples
///
/// ```
/// use frechet_bounds::MonotonicityStructure;
///
/// let ms = MonotonicityStructure::new(3).unwrap();
/// assert_eq!(ms.num_extremepts(), 4);
/// assert_eq!(ms.column(3).unwrap().values(), vec![1, -1, -1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonotonicityStructure {
    matrix: DMatrix<i8>,
}

impl MonotonicityStructure {
    /// Builds the structure for `dimension` marginals.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `dimension` is outside
    /// `2..=MAX_DIMENSION`.
    pub fn new(dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        Ok(Self {
            matrix: construct_matrix(dimension),
        })
    }

    /// Number of dimensions (rows).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of extreme points (columns), `2^(n-1)`.
    #[must_use]
    pub fn num_extremepts(&self) -> usize {
        self.matrix.ncols()
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// The sign pattern of extreme point `j`.
    #[must_use]
    pub fn column(&self, j: usize) -> Option<SignPattern> {
        (j < self.num_extremepts()).then(|| {
            self.matrix
                .column(j)
                .iter()
                .map(|&v| if v > 0 { Sign::Plus } else { Sign::Minus })
                .collect::<Vec<_>>()
                .into()
        })
    }

    /// All sign patterns, in column order.
    pub fn patterns(&self) -> impl Iterator<Item = SignPattern> + '_ {
        (0..self.num_extremepts()).filter_map(|j| self.column(j))
    }

    /// The raw `±1` matrix.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<i8> {
        &self.matrix
    }
}

impl fmt::Display for MonotonicityStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.matrix.row_iter() {
            let line: Vec<String> = row.iter().map(|v| format!("{v:>2}")).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
