/// A path found by a search: positions from start to goal inclusive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<S> {
    positions: Vec<S>,
    cost: f64,
}

impl<S> Path<S> {
    pub(crate) fn new(positions: Vec<S>, cost: f64) -> Self {
        debug_assert!(!positions.is_empty());
        Path { positions, cost }
    }

    /// Positions along the path, start first.
    pub fn positions(&self) -> &[S] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<S> {
        self.positions
    }

    /// Sum of the movement costs of every step.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of positions, which is one more than the number of steps.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; a path contains at least its start.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn start(&self) -> &S {
        &self.positions[0]
    }

    pub fn goal(&self) -> &S {
        &self.positions[self.positions.len() - 1]
    }
}

/// Terminal result of a search that ran to completion.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome<S> {
    /// The goal was reached.
    Found(Path<S>),
    /// Every position reachable from the start was examined without reaching
    /// the goal.
    NoPath,
}

impl<S> SearchOutcome<S> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path<S>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NoPath => None,
        }
    }

    pub fn into_path(self) -> Option<Path<S>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NoPath => None,
        }
    }
}
