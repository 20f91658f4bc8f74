//! Lowest-cost path search over pluggable search spaces.
//!
//! A search space implements [`traits::SpaceModel`]; [`AStarSearcher`] (or the
//! one-shot [`find_path`]) finds a path through it, using the
//! [`PriorityQueue`] from `waypath-core` as its frontier.
//!
//! ```
//! use waypath::grid::{GridModel, Point};
//! use waypath::{find_path, SearchOutcome};
//!
//! let model = GridModel::parse("1 1 1\n1 0 1\n1 1 1").unwrap();
//! let outcome = find_path(&model, Point::new(0, 0), Point::new(2, 2)).unwrap();
//! let SearchOutcome::Found(path) = outcome else { panic!("no path") };
//! assert_eq!(path.start(), &Point::new(0, 0));
//! assert_eq!(path.goal(), &Point::new(2, 2));
//! ```

mod astar;
mod path;

use waypath_core::traits::SpaceModel;

pub use waypath_core::*;
pub use waypath_geom as geom;
pub use waypath_grid as grid;

pub use crate::astar::{AStarSearcher, SearchLimits, SearchStats, SearchTree};
pub use crate::path::{Path, SearchOutcome};

/// Find a lowest-cost path from `start` to `goal` with a fresh [`AStarSearcher`].
pub fn find_path<M: SpaceModel + ?Sized>(
    model: &M,
    start: M::Position,
    goal: M::Position,
) -> SearchResult<SearchOutcome<M::Position>, M::Position> {
    AStarSearcher::new().search(model, start, goal)
}
