use crate::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Cost of the cheapest obstacle-free 8-connected path between two points.
///
/// A diagonal move never counts for more than two axis moves, and an axis
/// step never counts for more than a diagonal (two diagonals zigzag over two
/// axis steps), so the result stays a lower bound whatever the cost pair.
pub fn octile(a: Point, b: Point, axis_cost: f64, diagonal_cost: f64) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let diagonals = dx.min(dy);
    let orthos = dx.max(dy) - diagonals;
    let diagonal_cost = diagonal_cost.min(2.0 * axis_cost);
    let axis_cost = axis_cost.min(diagonal_cost);
    orthos as f64 * axis_cost + diagonals as f64 * diagonal_cost
}

/// Heuristic a [`GridModel`](crate::GridModel) estimates remaining cost with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Manhattan distance times the axis cost. Overestimates when diagonal
    /// moves are allowed, so paths are not guaranteed optimal.
    #[default]
    Manhattan,
    /// Cost on an open 8-connected grid, exact for the default costs.
    /// Admissible for any positive cost pair.
    Octile,
    /// Chebyshev distance times the cheaper of the two move costs. Admissible.
    Chebyshev,
    /// Always zero, which turns A* into Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: Point, to: Point, axis_cost: f64, diagonal_cost: f64) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(from, to) as f64 * axis_cost,
            Heuristic::Octile => octile(from, to, axis_cost, diagonal_cost),
            Heuristic::Chebyshev => chebyshev(from, to) as f64 * axis_cost.min(diagonal_cost),
            Heuristic::Zero => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 3);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 3);
        assert!((octile(a, b, 1.0, 1.4) - 3.8).abs() < 1e-9);
        assert_eq!(Heuristic::Zero.estimate(a, b, 1.0, 1.4), 0.0);
        assert_eq!(Heuristic::Manhattan.estimate(a, b, 2.0, 1.4), 10.0);
        assert_eq!(Heuristic::Chebyshev.estimate(a, b, 1.0, 1.4), 3.0);
    }

    #[test]
    fn octile_never_exceeds_cheaper_detours() {
        // two axis moves beat one expensive diagonal
        let a = Point::new(0, 2);
        let b = Point::new(2, 0);
        assert_eq!(octile(a, b, 1.0, 3.0), 4.0);
        // a zigzag of two diagonals beats two expensive axis moves
        assert_eq!(octile(Point::new(0, 0), Point::new(2, 0), 3.0, 1.0), 2.0);
        assert_eq!(octile(a, b, 1.0, 1.5), 3.0);
    }
}
