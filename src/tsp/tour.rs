//! Tour helpers: energy, random permutations and the 2-opt reversal.
//!
//! A tour is a `Vec<usize>` holding a permutation of `0..n`, read as a
//! closed cycle: the successor of the last city is the first one.

use super::types::Point;
use rand::seq::SliceRandom;
use rand::Rng;

/// Total length of the closed tour, wrap-around edge included.
///
/// This is the energy the annealing engine minimizes. O(n).
///
/// # Examples
///
/// ```
/// use tsp_anneal::tsp::{tour_length, Point};
///
/// let square = [
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ];
/// assert!((tour_length(&square, &[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
/// ```
pub fn tour_length(points: &[Point], tour: &[usize]) -> f64 {
    let n = tour.len();
    (0..n)
        .map(|k| points[tour[k]].distance(&points[tour[(k + 1) % n]]))
        .sum()
}

/// A uniformly random permutation of `0..n`.
pub fn random_tour<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut tour: Vec<usize> = (0..n).collect();
    tour.shuffle(rng);
    tour
}

/// Reverses positions `i..=j` of the tour in place (2-opt move).
///
/// Requires `i <= j < tour.len()`.
#[inline]
pub fn reverse_segment(tour: &mut [usize], i: usize, j: usize) {
    debug_assert!(i <= j && j < tour.len());
    tour[i..=j].reverse();
}

/// Returns `true` if `tour` contains every index of `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Draws `n` points uniformly from the square `[lo, hi) x [lo, hi)`.
///
/// Requires finite bounds with `lo < hi`.
pub fn random_points<R: Rng>(n: usize, (lo, hi): (f64, f64), rng: &mut R) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.random_range(lo..hi), rng.random_range(lo..hi)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_tour_length_includes_wraparound() {
        let points = unit_square();
        assert!((tour_length(&points, &[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
        // Crossing tour: two sides plus two diagonals.
        let crossed = 2.0 + 2.0 * 2f64.sqrt();
        assert!((tour_length(&points, &[0, 2, 1, 3]) - crossed).abs() < 1e-12);
    }

    #[test]
    fn test_tour_length_two_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        assert!((tour_length(&points, &[1, 0]) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_tour_length_rotation_invariant() {
        let points = unit_square();
        let a = tour_length(&points, &[0, 2, 3, 1]);
        let b = tour_length(&points, &[3, 1, 0, 2]);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_random_tour_is_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [2, 3, 10, 60] {
            let tour = random_tour(n, &mut rng);
            assert!(is_permutation(&tour, n));
        }
    }

    #[test]
    fn test_reverse_segment() {
        let mut tour = vec![0, 1, 2, 3, 4, 5];
        reverse_segment(&mut tour, 1, 4);
        assert_eq!(tour, vec![0, 4, 3, 2, 1, 5]);

        reverse_segment(&mut tour, 0, 5);
        assert_eq!(tour, vec![5, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_reverse_whole_tour_keeps_length() {
        let points = unit_square();
        let mut tour = vec![0, 2, 1, 3];
        let before = tour_length(&points, &tour);
        reverse_segment(&mut tour, 0, 3);
        assert!((tour_length(&points, &tour) - before).abs() < 1e-12);
    }

    #[test]
    fn test_is_permutation_rejects() {
        assert!(!is_permutation(&[0, 1, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(is_permutation(&[2, 0, 1], 3));
    }

    #[test]
    fn test_random_points_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = random_points(200, (5.0, 95.0), &mut rng);
        assert_eq!(points.len(), 200);
        for p in &points {
            assert!((5.0..95.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((5.0..95.0).contains(&p.y), "y out of range: {}", p.y);
        }
    }
}
