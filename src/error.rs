#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when no truncation point satisfies the tail tolerance within the search cap.
    #[error(
        "truncation failed: no support end with tail mass <= {tolerance} found within {search_cap} points"
    )]
    TruncationFailed {
        /// The tail tolerance that could not be met.
        tolerance: f64,
        /// The number of integers searched.
        search_cap: u64,
    },

    /// Returned when the tail tolerance is not a finite positive number.
    #[error("invalid tolerance: {0} must be finite and positive")]
    InvalidTolerance(f64),

    /// Returned when weights and support have different lengths.
    #[error("length mismatch: {weights} weights but {support} support points")]
    LengthMismatch {
        /// The number of weights.
        weights: usize,
        /// The number of support points.
        support: usize,
    },

    /// Returned when an empirical distribution has no support points.
    #[error("empirical distribution requires at least one support point")]
    EmptyDistribution,

    /// Returned when an empirical distribution's support is not strictly ascending.
    #[error("support must be strictly ascending (violated at index {0})")]
    UnsortedSupport(usize),

    /// Returned when a marginal's weights are negative or don't sum to one.
    #[error("marginal {0} is not a probability distribution")]
    InvalidMarginal(usize),

    /// Returned when a marginal's support value is not an integer representable as `i64`.
    #[error("marginal {dim} has support value {value}, which is not a lattice coordinate")]
    NonLatticeSupport {
        /// The offending marginal.
        dim: usize,
        /// The offending support value.
        value: f64,
    },

    /// Returned when a marginal array is empty.
    #[error("at least one marginal distribution is required")]
    EmptyMarginals,

    /// Returned when a monotonicity structure is requested for fewer than two
    /// or more than [`MAX_DIMENSION`](crate::monotone::MAX_DIMENSION) marginals.
    #[error(
        "invalid dimension: {0} (between 2 and {max} marginals are supported)",
        max = crate::monotone::MAX_DIMENSION
    )]
    InvalidDimension(usize),

    /// Returned when a sign entry is neither `+1` nor `-1`.
    #[error("invalid sign: {0} (must be +1 or -1)")]
    InvalidSign(i64),

    /// Returned when a sign pattern's length doesn't match the number of marginals.
    #[error("sign pattern length mismatch: expected {expected} signs but got {got}")]
    SignPatternLength {
        /// The number of marginals.
        expected: usize,
        /// The number of signs supplied.
        got: usize,
    },

    /// Returned when support points or measures have inconsistent dimensions.
    #[error("dimension mismatch: expected {expected} dimensions but got {got}")]
    DimensionMismatch {
        /// The expected number of dimensions.
        expected: usize,
        /// The actual number of dimensions.
        got: usize,
    },

    /// Returned when per-dimension means or variances have the wrong length.
    #[error("{name} has {got} entries but the measure has {expected} dimensions")]
    MomentLength {
        /// Which statistic was mis-sized (`"means"` or `"variances"`).
        name: &'static str,
        /// The dimension of the measure.
        expected: usize,
        /// The number of entries supplied.
        got: usize,
    },

    /// Returned when the same lattice point appears twice in a support.
    #[error("duplicate support point at index {0}")]
    DuplicateSupportPoint(usize),

    /// Returned when a marginalization index is outside the measure's dimension.
    #[error("dimension index {index} out of range for a {dimension}-dimensional measure")]
    DimensionOutOfRange {
        /// The offending index.
        index: usize,
        /// The dimension of the measure.
        dimension: usize,
    },

    /// Returned when a marginalization lists the same coordinate twice.
    #[error("dimension index {0} listed more than once")]
    DuplicateDimension(usize),

    /// Returned when a marginalization keeps no coordinates.
    #[error("marginalization must keep at least one dimension")]
    EmptyProjection,

    /// Returned when a Poisson intensity is rejected by the distribution provider.
    #[error("invalid intensity: {0} must be finite and positive")]
    InvalidIntensity(f64),
}

pub type Result<T> = core::result::Result<T, Error>;
