//! Interfaces between search algorithms and search spaces.

use std::fmt::Debug;
use std::hash::Hash;

/// A node identity in a search space.
///
/// Positions are plain values: two positions denote the same node iff they
/// compare equal. Any `Clone + Eq + Hash + Debug` type is a position.
pub trait Position: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Position for T {}

/// A search space queried by path search algorithms.
///
/// The model is only ever read during a search, so a `Sync` model can serve
/// searches running on several threads at once.
pub trait SpaceModel {
    /// Node identity type of this space.
    type Position: Position;

    /// Append every position reachable from `node` in a single step to `out`.
    ///
    /// The caller clears `out` before calling. The sequence must be finite and
    /// must not contain `node` itself.
    fn neighbors(&self, node: &Self::Position, out: &mut Vec<Self::Position>);

    /// Estimate the remaining cost from `node` to `goal`.
    ///
    /// Must be non-negative. A* only guarantees optimal paths if the estimate
    /// never exceeds the true cost (the heuristic is admissible).
    fn heuristic_estimate(&self, node: &Self::Position, goal: &Self::Position) -> f64;

    /// Exact cost of the single step from `from` to the adjacent `to`. Must be > 0.
    fn movement_cost(&self, from: &Self::Position, to: &Self::Position) -> f64;

    /// Whether `node` belongs to this space. Searches reject start and goal
    /// positions for which this returns false.
    fn contains(&self, _node: &Self::Position) -> bool {
        true
    }
}

impl<M: SpaceModel + ?Sized> SpaceModel for &M {
    type Position = M::Position;

    fn neighbors(&self, node: &Self::Position, out: &mut Vec<Self::Position>) {
        (**self).neighbors(node, out)
    }

    fn heuristic_estimate(&self, node: &Self::Position, goal: &Self::Position) -> f64 {
        (**self).heuristic_estimate(node, goal)
    }

    fn movement_cost(&self, from: &Self::Position, to: &Self::Position) -> f64 {
        (**self).movement_cost(from, to)
    }

    fn contains(&self, node: &Self::Position) -> bool {
        (**self).contains(node)
    }
}
