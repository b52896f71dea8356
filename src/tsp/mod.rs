//! Euclidean TSP geometry.
//!
//! Points, the Euclidean metric, and the tour energy (closed tour
//! length) that the annealing engine minimizes.

mod tour;
mod types;

pub use tour::{is_permutation, random_points, random_tour, reverse_segment, tour_length};
pub use types::Point;
