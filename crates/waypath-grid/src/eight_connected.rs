//! Search spaces over 8-connected grid maps.

use enumset::EnumSet;
use waypath_core::traits::SpaceModel;

use crate::{Direction, Grid, GridError, Heuristic, Point};

/// Cost of a move along one axis.
pub const AXIS_COST: f64 = 1.0;

/// Cost of a diagonal move, an approximation of √2.
pub const DIAGONAL_COST: f64 = 1.4;

/// A grid of cell values searched as a [`SpaceModel`].
///
/// Cells with a value `<= 0` are impassable, every other cell is passable.
/// By default all eight directions are allowed, diagonal moves may cut past
/// blocked corners, axis moves cost [`AXIS_COST`], diagonal moves cost
/// [`DIAGONAL_COST`] and the heuristic is [`Heuristic::Manhattan`].
///
/// The domain of the model is the grid rectangle: searches from or to a point
/// outside it are rejected, while impassable cells inside it are valid (but
/// unreachable) endpoints.
#[derive(Clone, Debug)]
pub struct GridModel {
    cells: Grid<i32>,
    directions: EnumSet<Direction>,
    heuristic: Heuristic,
    corner_cutting: bool,
    axis_cost: f64,
    diagonal_cost: f64,
}

impl GridModel {
    pub fn new(cells: Grid<i32>) -> Self {
        GridModel {
            cells,
            directions: EnumSet::all(),
            heuristic: Heuristic::default(),
            corner_cutting: true,
            axis_cost: AXIS_COST,
            diagonal_cost: DIAGONAL_COST,
        }
    }

    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        Ok(Self::new(Grid::from_rows(rows)?))
    }

    /// Parse whitespace-separated integer cell values, one line per row.
    /// Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows = vec![];
        for (row, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let cells = line
                .split_whitespace()
                .map(|token| {
                    token.parse().map_err(|_| GridError::InvalidCell {
                        row,
                        token: token.to_owned(),
                    })
                })
                .collect::<Result<Vec<i32>, _>>()?;
            rows.push(cells);
        }
        Self::from_rows(rows)
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Restrict movement to `directions`, e.g. [`Direction::CARDINAL`] for a
    /// 4-connected grid.
    pub fn with_directions(mut self, directions: EnumSet<Direction>) -> Self {
        self.directions = directions;
        self
    }

    /// Whether a diagonal move is allowed when one of the two cells it passes
    /// between is impassable. Diagonal moves past two impassable cells are
    /// likewise only allowed with corner cutting.
    pub fn with_corner_cutting(mut self, corner_cutting: bool) -> Self {
        self.corner_cutting = corner_cutting;
        self
    }

    /// # Panics
    /// Panics unless both costs are positive.
    #[track_caller]
    pub fn with_costs(mut self, axis_cost: f64, diagonal_cost: f64) -> Self {
        assert!(axis_cost > 0.0, "axis cost must be positive");
        assert!(diagonal_cost > 0.0, "diagonal cost must be positive");
        self.axis_cost = axis_cost;
        self.diagonal_cost = diagonal_cost;
        self
    }

    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    pub fn cells(&self) -> &Grid<i32> {
        &self.cells
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn is_passable(&self, p: Point) -> bool {
        self.cells.get(p).is_some_and(|&value| value > 0)
    }
}

impl SpaceModel for GridModel {
    type Position = Point;

    fn neighbors(&self, node: &Point, out: &mut Vec<Point>) {
        for dir in self.directions {
            let next = node.step(dir);
            if !self.is_passable(next) {
                continue;
            }
            if !self.corner_cutting
                && !dir
                    .components()
                    .iter()
                    .all(|component| self.is_passable(node.step(component)))
            {
                continue;
            }
            out.push(next);
        }
    }

    fn heuristic_estimate(&self, node: &Point, goal: &Point) -> f64 {
        self.heuristic
            .estimate(*node, *goal, self.axis_cost, self.diagonal_cost)
    }

    fn movement_cost(&self, from: &Point, to: &Point) -> f64 {
        if from.is_diagonal_to(*to) {
            self.diagonal_cost
        } else {
            self.axis_cost
        }
    }

    fn contains(&self, node: &Point) -> bool {
        self.cells.in_bounds(*node)
    }
}
