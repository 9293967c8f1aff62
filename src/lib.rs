#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Extreme points of the Fréchet class of discrete multivariate measures.
//!
//! The Fréchet class of a collection of one-dimensional marginals is the set
//! of all joint distributions with exactly those marginals. Its extreme
//! points are selected by a sign pattern (one `±1` per marginal) and built by
//! a simultaneous CDF-inversion merge. Pairs of 2-D extreme points give the
//! maximal and minimal correlation achievable by any coupling, for example
//! of two Poisson counts with fixed intensities.
//!
//! # Getting Started
//!
//! ```
//! use frechet_bounds::prelude::*;
//!
//! let (max, min) = poiss_correlation_bounds_2d(3.0, 5.0).unwrap();
//! assert!(max > 0.97 && min < -0.93);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`EmpiricalDistribution`] | A truncated, discretized marginal with weights summing to one. |
//! | [`EmpDistrArray`] | One marginal per dimension. |
//! | [`MonotonicityStructure`] | All `2^(n-1)` admissible sign patterns for `n` marginals. |
//! | [`LatticePoint`] / [`DiscreteMeasure`] | Sorted, weighted integer support with a merge operator. |
//! | [`ExtremeMeasure`] | A Fréchet extreme point plus its sign pattern, means and variances. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on the public data types | off |
//! | `parallel` | Build the extreme measures of all sign patterns on the `rayon` pool | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod correlation;
mod distribution;
pub mod empirical;
mod error;
pub mod extreme;
pub mod lattice;
pub mod monotone;
pub mod seq;

pub use correlation::{
    bivariate_expectation, correlation, correlations, poiss_correlation_bounds_2d,
};
pub use distribution::DiscreteDistribution;
pub use empirical::{EmpDistrArray, EmpiricalDistribution, MarginalConfig};
pub use error::{Error, Result};
pub use extreme::{
    ExtremeMeasure, ExtremeMeasureBuilder, ExtremeMeasureConfig, construct_extreme_measures,
    construct_measure, construct_poisson_extreme_measures,
};
pub use lattice::{DiscreteMeasure, LatticePoint};
pub use monotone::{MonotonicityStructure, Sign, SignPattern, monotone_struct_size};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use frechet_bounds::prelude::*;
/// ```
pub mod prelude {
    pub use crate::correlation::{correlations, poiss_correlation_bounds_2d};
    pub use crate::distribution::DiscreteDistribution;
    pub use crate::empirical::{EmpDistrArray, EmpiricalDistribution, MarginalConfig};
    pub use crate::error::{Error, Result};
    pub use crate::extreme::{
        ExtremeMeasure, ExtremeMeasureConfig, construct_extreme_measures,
        construct_poisson_extreme_measures,
    };
    pub use crate::lattice::{DiscreteMeasure, LatticePoint};
    pub use crate::monotone::{MonotonicityStructure, Sign, SignPattern};
}
