//! Grid search spaces for `waypath`.
//!
//! [`GridModel`] turns a 2D grid of cell values into a
//! [`SpaceModel`](waypath_core::traits::SpaceModel): cells with a value of
//! zero or less are impassable, and movement is allowed in any subset of the
//! eight [`Direction`]s.

mod direction;
mod distance;
mod grid;
mod point;

pub mod eight_connected;
pub mod movingai;

pub use self::direction::*;
pub use self::distance::*;
pub use self::eight_connected::{GridModel, AXIS_COST, DIAGONAL_COST};
pub use self::grid::*;
pub use self::point::*;
