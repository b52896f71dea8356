//! Annealing configuration.

use crate::error::InvalidConfiguration;

/// Configuration for an annealing run.
///
/// The engine reads the three thermodynamic parameters
/// (`initial_temperature`, `final_temperature`, `alpha`) and `seed`;
/// [`AnnealingSession`](super::AnnealingSession) additionally uses
/// `city_count`, `coordinate_range` and `steps_per_tick`.
///
/// # Examples
///
/// ```
/// use tsp_anneal::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(100.0)
///     .with_final_temperature(0.01)
///     .with_alpha(0.995)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Number of cities generated by a session.
    pub city_count: usize,

    /// Starting temperature `T0`. Higher values accept more uphill moves.
    pub initial_temperature: f64,

    /// Freezing point `Tf`. Once the temperature is at or below it, steps
    /// are no-ops.
    ///
    /// Zero is allowed. Geometric cooling never reaches zero exactly, so a
    /// zero floor freezes the engine once `alpha * T` rounds back to `T` in
    /// the subnormal range.
    pub final_temperature: f64,

    /// Geometric cooling factor: `T_{k+1} = alpha * T_k`.
    ///
    /// Must lie in (0, 1). Closer to 1 means slower cooling.
    pub alpha: f64,

    /// Engine steps per session tick (per display refresh).
    pub steps_per_tick: usize,

    /// Bounds `(lo, hi)` for generated coordinates, applied to both axes.
    ///
    /// The span must be small enough that every tour over `city_count`
    /// points has a finite length.
    pub coordinate_range: (f64, f64),

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            city_count: 60,
            initial_temperature: 2500.0,
            final_temperature: 0.01,
            alpha: 0.9993,
            steps_per_tick: 15,
            coordinate_range: (5.0, 95.0),
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_city_count(mut self, n: usize) -> Self {
        self.city_count = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_steps_per_tick(mut self, n: usize) -> Self {
        self.steps_per_tick = n;
        self
    }

    pub fn with_coordinate_range(mut self, lo: f64, hi: f64) -> Self {
        self.coordinate_range = (lo, hi);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters the engine depends on.
    ///
    /// Comparisons are written so that NaN fails every check.
    pub fn validate_schedule(&self) -> Result<(), InvalidConfiguration> {
        let t0 = self.initial_temperature;
        if !(t0 > 0.0 && t0.is_finite()) {
            return Err(InvalidConfiguration::InitialTemperature(t0));
        }
        let tf = self.final_temperature;
        if !(tf >= 0.0 && tf < t0) {
            return Err(InvalidConfiguration::FinalTemperature {
                final_temperature: tf,
                initial: t0,
            });
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(InvalidConfiguration::CoolingFactor(self.alpha));
        }
        Ok(())
    }

    /// Validates the whole configuration, session parameters included.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        self.validate_schedule()?;
        if self.city_count < 2 {
            return Err(InvalidConfiguration::TooFewPoints(self.city_count));
        }
        if self.steps_per_tick == 0 {
            return Err(InvalidConfiguration::StepsPerTick);
        }
        let (lo, hi) = self.coordinate_range;
        // Longest possible tour: every edge a full diagonal of the square.
        let longest_tour = (hi - lo) * std::f64::consts::SQRT_2 * self.city_count as f64;
        if !(lo.is_finite() && hi.is_finite() && lo < hi && longest_tour.is_finite()) {
            return Err(InvalidConfiguration::CoordinateRange { lo, hi });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert_eq!(config.city_count, 60);
        assert!((config.initial_temperature - 2500.0).abs() < 1e-10);
        assert!((config.final_temperature - 0.01).abs() < 1e-15);
        assert!((config.alpha - 0.9993).abs() < 1e-15);
        assert_eq!(config.steps_per_tick, 15);
        assert_eq!(config.coordinate_range, (5.0, 95.0));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(AnnealConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_final_temperature_ok() {
        let config = AnnealConfig::default().with_final_temperature(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_initial_temperature() {
        for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = AnnealConfig::default().with_initial_temperature(t);
            assert!(
                matches!(
                    config.validate(),
                    Err(InvalidConfiguration::InitialTemperature(_))
                ),
                "accepted T0 = {t}"
            );
        }
    }

    #[test]
    fn test_validate_final_ge_initial() {
        let config = AnnealConfig::default()
            .with_initial_temperature(10.0)
            .with_final_temperature(10.0);
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::FinalTemperature { .. })
        ));
    }

    #[test]
    fn test_validate_negative_final() {
        let config = AnnealConfig::default().with_final_temperature(-0.5);
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::FinalTemperature { .. })
        ));
    }

    #[test]
    fn test_validate_bad_alpha() {
        for alpha in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let config = AnnealConfig::default().with_alpha(alpha);
            assert!(
                matches!(config.validate(), Err(InvalidConfiguration::CoolingFactor(_))),
                "accepted alpha = {alpha}"
            );
        }
    }

    #[test]
    fn test_validate_session_parameters() {
        assert_eq!(
            AnnealConfig::default().with_city_count(1).validate(),
            Err(InvalidConfiguration::TooFewPoints(1))
        );
        assert_eq!(
            AnnealConfig::default().with_steps_per_tick(0).validate(),
            Err(InvalidConfiguration::StepsPerTick)
        );
        assert!(matches!(
            AnnealConfig::default()
                .with_coordinate_range(10.0, 10.0)
                .validate(),
            Err(InvalidConfiguration::CoordinateRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unbounded_span() {
        // Endpoints are finite but hi - lo overflows.
        let config = AnnealConfig::default().with_coordinate_range(-f64::MAX, f64::MAX);
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::CoordinateRange { .. })
        ));

        // Finite span, but 60 diagonal edges would overflow the tour length.
        let config = AnnealConfig::default().with_coordinate_range(0.0, 1e307);
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::CoordinateRange { .. })
        ));

        let config = AnnealConfig::default().with_coordinate_range(-1e6, 1e6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_schedule_ignores_session_parameters() {
        let config = AnnealConfig::default()
            .with_city_count(0)
            .with_steps_per_tick(0);
        assert!(config.validate_schedule().is_ok());
    }
}
