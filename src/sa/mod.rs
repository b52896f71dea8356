//! Simulated Annealing (SA) for the Euclidean TSP.
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Worsening 2-opt moves are accepted with the
//! Boltzmann probability `exp(-delta / T)` while the temperature `T`
//! decreases geometrically, which lets the tour escape local minima early
//! on and settle as the system freezes.
//!
//! # References
//!
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod engine;
mod session;

pub use config::AnnealConfig;
pub use engine::{
    acceptance_probability, AnnealEngine, AnnealSummary, EngineSnapshot, EngineStats, Phase,
    StepOutcome,
};
pub use session::{AnnealingSession, TickReport};
