//! Simulated annealing for the Euclidean travelling salesman problem.
//!
//! - **Geometry** ([`tsp`]): points, the Euclidean metric, and the tour
//!   energy (closed tour length).
//! - **Annealing** ([`sa`]): the [`AnnealEngine`](sa::AnnealEngine), which
//!   performs one Metropolis step per call with 2-opt segment reversal and
//!   geometric cooling, plus [`AnnealingSession`](sa::AnnealingSession),
//!   the tick/reset driver a renderer holds.
//! - **WASM** (`wasm` feature): a `wasm-bindgen` wrapper around a session.
//!
//! # Architecture
//!
//! The engine owns all search state and never calls back into its driver.
//! Randomness is an explicit, seedable RNG owned by the engine, so a fixed
//! seed reproduces a run exactly. The result is a heuristic: short tours,
//! not proven optimal ones.

pub mod error;
pub mod sa;
pub mod tsp;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::InvalidConfiguration;
