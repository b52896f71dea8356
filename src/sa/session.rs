//! Driving layer: ticks and resets around one engine.
//!
//! A renderer owns an [`AnnealingSession`], calls [`tick`] once per frame
//! and draws from [`engine`]. The engine never calls back into the session.
//!
//! [`tick`]: AnnealingSession::tick
//! [`engine`]: AnnealingSession::engine

use super::config::AnnealConfig;
use super::engine::{AnnealEngine, StepOutcome};
use crate::error::InvalidConfiguration;
use crate::tsp::{random_points, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::mem;
use std::sync::Arc;
use tracing::debug;

/// What one [`AnnealingSession::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Steps that were not frozen no-ops.
    pub active_steps: usize,
    /// Accepted moves.
    pub accepted: usize,
    /// Moves that produced a new best tour.
    pub new_bests: usize,
}

/// Owns one engine plus the randomness for generating point sets.
///
/// With a configured seed the whole session, resets included, is
/// reproducible: point sets and engine seeds are drawn from one RNG.
///
/// # Examples
///
/// ```
/// use tsp_anneal::sa::{AnnealConfig, AnnealingSession};
///
/// let config = AnnealConfig::default().with_city_count(20).with_seed(1);
/// let mut session = AnnealingSession::new(config).unwrap();
///
/// let report = session.tick();
/// assert_eq!(report.active_steps, 15);
/// assert_eq!(session.status_label(), "ACTIVE");
/// ```
#[derive(Debug)]
pub struct AnnealingSession {
    config: AnnealConfig,
    rng: StdRng,
    engine: AnnealEngine,
    resets: usize,
}

impl AnnealingSession {
    /// Validates `config` and starts on a freshly generated point set.
    pub fn new(config: AnnealConfig) -> Result<Self, InvalidConfiguration> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let points = random_points(config.city_count, config.coordinate_range, &mut rng);
        let engine = build_engine(points, &config, &mut rng)?;
        Ok(Self {
            config,
            rng,
            engine,
            resets: 0,
        })
    }

    /// Starts on a caller-supplied point set.
    ///
    /// `city_count` is taken from the points; later [`reset`](Self::reset)
    /// calls generate that many random points.
    pub fn with_points(
        config: AnnealConfig,
        points: impl Into<Arc<[Point]>>,
    ) -> Result<Self, InvalidConfiguration> {
        let points: Arc<[Point]> = points.into();
        let config = config.with_city_count(points.len());
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let engine = build_engine(points, &config, &mut rng)?;
        Ok(Self {
            config,
            rng,
            engine,
            resets: 0,
        })
    }

    /// Runs `steps_per_tick` engine steps.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        for _ in 0..self.config.steps_per_tick {
            match self.engine.step() {
                StepOutcome::Frozen => break,
                StepOutcome::Accepted { new_best, .. } => {
                    report.active_steps += 1;
                    report.accepted += 1;
                    if new_best {
                        report.new_bests += 1;
                    }
                }
                StepOutcome::Rejected => report.active_steps += 1,
            }
        }
        report
    }

    /// Replaces the engine with a new one on a new random point set.
    ///
    /// Returns the retired engine; it shares no mutable state with the new one.
    pub fn reset(&mut self) -> Result<AnnealEngine, InvalidConfiguration> {
        let points = random_points(
            self.config.city_count,
            self.config.coordinate_range,
            &mut self.rng,
        );
        self.reset_with_points(points)
    }

    /// Replaces the engine with a new one on the given point set.
    pub fn reset_with_points(
        &mut self,
        points: impl Into<Arc<[Point]>>,
    ) -> Result<AnnealEngine, InvalidConfiguration> {
        let engine = build_engine(points, &self.config, &mut self.rng)?;
        self.resets += 1;
        debug!(
            resets = self.resets,
            cities = engine.points().len(),
            energy = engine.current_energy(),
            "session reset"
        );
        Ok(mem::replace(&mut self.engine, engine))
    }

    pub fn engine(&self) -> &AnnealEngine {
        &self.engine
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Number of completed resets.
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// `"ACTIVE"` while annealing, `"FROZEN"` afterwards.
    pub fn status_label(&self) -> &'static str {
        if self.engine.is_frozen() {
            "FROZEN"
        } else {
            "ACTIVE"
        }
    }
}

fn build_engine(
    points: impl Into<Arc<[Point]>>,
    config: &AnnealConfig,
    rng: &mut StdRng,
) -> Result<AnnealEngine, InvalidConfiguration> {
    let engine_rng = StdRng::seed_from_u64(rng.random());
    AnnealEngine::new(points, config, engine_rng)
}
