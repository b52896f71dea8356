//! Construction-time errors.
//!
//! Stepping an engine never fails; the only failure mode is a malformed
//! configuration or point set, reported before any engine exists.

use thiserror::Error;

/// Rejected configuration or point set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfiguration {
    /// Fewer than two points (or a city count below two).
    #[error("at least 2 points are required, got {0}")]
    TooFewPoints(usize),

    /// A point has a NaN or infinite coordinate.
    #[error("point {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteCoordinate {
        /// Position of the offending point in the input.
        index: usize,
        /// Its x coordinate.
        x: f64,
        /// Its y coordinate.
        y: f64,
    },

    /// `T0` is zero, negative, NaN or infinite.
    #[error("initial temperature must be positive and finite, got {0}")]
    InitialTemperature(f64),

    /// `Tf` is negative, NaN, or not below `T0`.
    #[error("final temperature must be in [0, {initial}), got {final_temperature}")]
    FinalTemperature {
        /// The rejected final temperature.
        final_temperature: f64,
        /// The configured initial temperature.
        initial: f64,
    },

    /// `alpha` lies outside the open interval (0, 1).
    #[error("cooling factor alpha must be in (0, 1), got {0}")]
    CoolingFactor(f64),

    /// A session tick would run no steps.
    #[error("steps per tick must be at least 1")]
    StepsPerTick,

    /// Generated coordinates would have an empty, non-finite, or
    /// overflowing span.
    #[error("coordinate range must be finite with lo < hi, got ({lo}, {hi})")]
    CoordinateRange {
        /// Lower bound.
        lo: f64,
        /// Upper bound.
        hi: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            InvalidConfiguration::TooFewPoints(1).to_string(),
            "at least 2 points are required, got 1"
        );
        assert_eq!(
            InvalidConfiguration::CoolingFactor(1.5).to_string(),
            "cooling factor alpha must be in (0, 1), got 1.5"
        );
        let err = InvalidConfiguration::FinalTemperature {
            final_temperature: 20.0,
            initial: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "final temperature must be in [0, 10), got 20"
        );
    }
}
