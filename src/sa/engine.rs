//! The annealing engine.
//!
//! [`AnnealEngine`] owns the whole search state for one run and advances
//! it by exactly one Metropolis step per [`AnnealEngine::step`] call. A
//! driving loop (see [`AnnealingSession`](super::AnnealingSession)) calls
//! `step` repeatedly and reads the state back through the accessors.
//!
//! # Step
//!
//! 1. If `T <= T_f`, or cooling has stopped changing `T`, the engine is
//!    frozen and nothing changes.
//! 2. Pick two distinct positions `i < j` and reverse `tour[i..=j]` on a
//!    copy of the current tour (2-opt).
//! 3. Accept with the Metropolis rule on `delta = E(candidate) - E(current)`.
//! 4. Cool: `T <- alpha * T`.

use super::config::AnnealConfig;
use crate::error::InvalidConfiguration;
use crate::tsp::{random_tour, reverse_segment, tour_length, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, trace};

/// Iterations between two samples of [`AnnealSummary::cost_history`].
const HISTORY_INTERVAL: usize = 100;

/// Metropolis acceptance probability for an energy change `delta`.
///
/// Improving moves (`delta < 0`) are always accepted. Otherwise the
/// probability is `exp(-delta / temperature)` for a positive temperature
/// and zero when the temperature is not positive.
///
/// # Examples
///
/// ```
/// use tsp_anneal::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(-1.0, 0.01), 1.0);
/// assert_eq!(acceptance_probability(5.0, 0.0), 0.0);
/// assert!((acceptance_probability(1.0, 1.0) - (-1.0f64).exp()).abs() < 1e-15);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else if temperature > 0.0 {
        (-delta / temperature).exp()
    } else {
        0.0
    }
}

/// Macro-state of an engine.
///
/// The only transition is `Active -> Frozen`, driven by cooling. An engine
/// also freezes when `alpha * T` rounds back to `T`, which is how a
/// `final_temperature` of zero is eventually reached in floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// `temperature > final_temperature`; steps propose and cool.
    Active,
    /// `temperature <= final_temperature` or cooling stalled; steps are no-ops.
    Frozen,
}

/// What a single [`AnnealEngine::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The engine was already frozen. No state changed.
    Frozen,
    /// The candidate replaced the current tour.
    Accepted {
        /// The candidate was strictly shorter than the current tour.
        downhill: bool,
        /// The candidate became the new best tour.
        new_best: bool,
    },
    /// The candidate was discarded.
    Rejected,
}

/// Cumulative move counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Active steps taken (neighbor evaluations).
    pub iterations: usize,
    /// Accepted moves, improving ones included.
    pub accepted_moves: usize,
    /// Accepted moves with `delta < 0`.
    pub improving_moves: usize,
}

/// Owned copy of the observable engine state, for renderers and for
/// comparing states.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSnapshot {
    pub current_tour: Vec<usize>,
    pub current_energy: f64,
    pub best_tour: Vec<usize>,
    pub best_energy: f64,
    pub temperature: f64,
    pub phase: Phase,
    /// Endpoint cities of the last proposed 2-opt move.
    pub active_pair: Option<(usize, usize)>,
}

/// Result of [`AnnealEngine::run`].
#[derive(Debug, Clone)]
pub struct AnnealSummary {
    /// The best tour found so far.
    pub best_tour: Vec<usize>,

    /// Length of the best tour.
    pub best_energy: f64,

    /// Active steps taken during this run.
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Accepted moves during this run (including improvements).
    pub accepted_moves: usize,

    /// Improving moves during this run.
    pub improving_moves: usize,

    /// Whether the engine is frozen at the end of the run.
    pub frozen: bool,

    /// Best energy sampled at regular intervals. Non-increasing.
    pub cost_history: Vec<f64>,
}

/// Simulated annealing engine for one Euclidean TSP instance.
///
/// Generic over the random source so tests can inject a seeded one;
/// defaults to [`StdRng`].
///
/// # Examples
///
/// ```
/// use tsp_anneal::sa::{AnnealConfig, AnnealEngine};
/// use tsp_anneal::tsp::Point;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ];
/// let config = AnnealConfig::default()
///     .with_initial_temperature(100.0)
///     .with_final_temperature(0.01)
///     .with_alpha(0.995)
///     .with_seed(7);
///
/// let mut engine = AnnealEngine::from_config(points, &config).unwrap();
/// while !engine.is_frozen() {
///     engine.step();
/// }
/// assert!(engine.best_energy() <= 4.0 + 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealEngine<R = StdRng> {
    points: Arc<[Point]>,
    current_tour: Vec<usize>,
    current_energy: f64,
    best_tour: Vec<usize>,
    best_energy: f64,
    temperature: f64,
    final_temperature: f64,
    alpha: f64,
    /// Set once `alpha * temperature` no longer changes the temperature.
    cooling_stalled: bool,
    active_pair: Option<(usize, usize)>,
    stats: EngineStats,
    rng: R,
}

impl AnnealEngine<StdRng> {
    /// Creates an engine seeded from `config.seed`, or from entropy when
    /// no seed is set.
    pub fn from_config(
        points: impl Into<Arc<[Point]>>,
        config: &AnnealConfig,
    ) -> Result<Self, InvalidConfiguration> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::new(points, config, rng)
    }
}

impl<R: Rng> AnnealEngine<R> {
    /// Creates an engine over `points` with a uniformly random initial tour.
    ///
    /// Uses `initial_temperature`, `final_temperature` and `alpha` from
    /// `config`; the session fields are ignored.
    ///
    /// # Errors
    ///
    /// Fewer than two points, a non-finite coordinate, or an invalid
    /// cooling schedule.
    pub fn new(
        points: impl Into<Arc<[Point]>>,
        config: &AnnealConfig,
        mut rng: R,
    ) -> Result<Self, InvalidConfiguration> {
        let points: Arc<[Point]> = points.into();
        if points.len() < 2 {
            return Err(InvalidConfiguration::TooFewPoints(points.len()));
        }
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(InvalidConfiguration::NonFiniteCoordinate {
                index,
                x: p.x,
                y: p.y,
            });
        }
        config.validate_schedule()?;

        let current_tour = random_tour(points.len(), &mut rng);
        let current_energy = tour_length(&points, &current_tour);

        debug!(
            cities = points.len(),
            energy = current_energy,
            initial_temperature = config.initial_temperature,
            final_temperature = config.final_temperature,
            alpha = config.alpha,
            "annealing engine created"
        );

        Ok(Self {
            best_tour: current_tour.clone(),
            best_energy: current_energy,
            points,
            current_tour,
            current_energy,
            temperature: config.initial_temperature,
            final_temperature: config.final_temperature,
            alpha: config.alpha,
            cooling_stalled: false,
            active_pair: None,
            stats: EngineStats::default(),
            rng,
        })
    }

    /// Performs one Metropolis step.
    ///
    /// A frozen engine returns [`StepOutcome::Frozen`] and is left
    /// untouched, temperature included.
    pub fn step(&mut self) -> StepOutcome {
        if self.is_frozen() {
            return StepOutcome::Frozen;
        }

        let (i, j) = self.sample_positions();
        self.active_pair = Some((self.current_tour[i], self.current_tour[j]));

        let mut candidate = self.current_tour.clone();
        reverse_segment(&mut candidate, i, j);
        let candidate_energy = tour_length(&self.points, &candidate);
        let delta = candidate_energy - self.current_energy;

        // Metropolis acceptance criterion
        let downhill = delta < 0.0;
        let accept = downhill
            || (self.temperature > 0.0
                && self.rng.random_range(0.0..1.0)
                    < acceptance_probability(delta, self.temperature));

        self.stats.iterations += 1;

        let outcome = if accept {
            self.current_tour = candidate;
            self.current_energy = candidate_energy;
            self.stats.accepted_moves += 1;
            if downhill {
                self.stats.improving_moves += 1;
            }

            let new_best = self.current_energy < self.best_energy;
            if new_best {
                self.best_tour.clone_from(&self.current_tour);
                self.best_energy = self.current_energy;
                trace!(energy = self.best_energy, "new best tour");
            }
            StepOutcome::Accepted { downhill, new_best }
        } else {
            StepOutcome::Rejected
        };

        // Cool down; subnormal temperatures can round back to themselves.
        let cooled = self.temperature * self.alpha;
        self.cooling_stalled = cooled >= self.temperature;
        self.temperature = cooled;
        if self.is_frozen() {
            debug!(
                temperature = self.temperature,
                best_energy = self.best_energy,
                iterations = self.stats.iterations,
                "annealing frozen"
            );
        }

        outcome
    }

    /// Steps until frozen or until `max_steps` active steps were taken.
    ///
    /// Always terminates: with `final_temperature == 0` the engine freezes
    /// once geometric cooling can no longer lower the temperature.
    pub fn run(&mut self, max_steps: usize) -> AnnealSummary {
        let start = self.stats;
        let mut cost_history = vec![self.best_energy];
        let mut steps = 0usize;

        while steps < max_steps && !self.is_frozen() {
            self.step();
            steps += 1;
            if steps.is_multiple_of(HISTORY_INTERVAL) {
                cost_history.push(self.best_energy);
            }
        }

        if cost_history
            .last()
            .is_none_or(|&last| (last - self.best_energy).abs() > 1e-15)
        {
            cost_history.push(self.best_energy);
        }

        AnnealSummary {
            best_tour: self.best_tour.clone(),
            best_energy: self.best_energy,
            iterations: steps,
            final_temperature: self.temperature,
            accepted_moves: self.stats.accepted_moves - start.accepted_moves,
            improving_moves: self.stats.improving_moves - start.improving_moves,
            frozen: self.is_frozen(),
            cost_history,
        }
    }

    /// Two distinct uniform positions, ordered.
    fn sample_positions(&mut self) -> (usize, usize) {
        let n = self.current_tour.len();
        let a = self.rng.random_range(0..n);
        let mut b = self.rng.random_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl<R> AnnealEngine<R> {
    /// The fixed point set.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Shared handle to the point set, for renderers.
    pub fn shared_points(&self) -> Arc<[Point]> {
        Arc::clone(&self.points)
    }

    pub fn current_tour(&self) -> &[usize] {
        &self.current_tour
    }

    pub fn current_energy(&self) -> f64 {
        self.current_energy
    }

    pub fn best_tour(&self) -> &[usize] {
        &self.best_tour
    }

    pub fn best_energy(&self) -> f64 {
        self.best_energy
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn final_temperature(&self) -> f64 {
        self.final_temperature
    }

    pub fn is_frozen(&self) -> bool {
        self.temperature <= self.final_temperature || self.cooling_stalled
    }

    pub fn phase(&self) -> Phase {
        if self.is_frozen() {
            Phase::Frozen
        } else {
            Phase::Active
        }
    }

    /// Endpoint cities of the most recent 2-opt proposal, if any.
    pub fn active_pair(&self) -> Option<(usize, usize)> {
        self.active_pair
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            current_tour: self.current_tour.clone(),
            current_energy: self.current_energy,
            best_tour: self.best_tour.clone(),
            best_energy: self.best_energy,
            temperature: self.temperature,
            phase: self.phase(),
            active_pair: self.active_pair,
        }
    }
}
