use std::fmt::Debug;

use thiserror::Error;

/// Result type alias for search operations over positions of type `P`.
pub type SearchResult<T, P> = Result<T, SearchError<P>>;

/// Failure of a [`PriorityQueue`](crate::PriorityQueue) operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// A value was required but the queue holds no elements.
    #[error("priority queue is empty")]
    Empty,

    /// The handle does not address a live element of this queue.
    #[error("handle does not refer to a live queue element")]
    StaleHandle,
}

/// Failure of a search.
///
/// Not finding a path is not an error; it is reported as a normal search
/// outcome. These variants cover malformed input, aborted searches and space
/// models that break their contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError<P: Debug> {
    /// The start position is outside the model's domain.
    #[error("start position {position:?} is outside the search space")]
    InvalidStart {
        /// The rejected start position.
        position: P,
    },

    /// The goal position is outside the model's domain.
    #[error("goal position {position:?} is outside the search space")]
    InvalidGoal {
        /// The rejected goal position.
        position: P,
    },

    /// The model reported a negative or NaN movement cost.
    #[error("movement cost from {from:?} to {to:?} is invalid: {cost}")]
    InvalidCost {
        /// Position the step starts at.
        from: P,
        /// Position the step ends at.
        to: P,
        /// The reported cost.
        cost: f64,
    },

    /// The model reported a negative or NaN heuristic estimate.
    #[error("heuristic estimate at {position:?} is invalid: {estimate}")]
    InvalidHeuristic {
        /// Position the estimate was requested for.
        position: P,
        /// The reported estimate.
        estimate: f64,
    },

    /// The search expanded as many nodes as its limit allows without
    /// reaching the goal.
    #[error("search aborted after expanding {expanded} nodes")]
    ExpansionLimit {
        /// Number of nodes expanded before aborting.
        expanded: usize,
    },

    /// The frontier queue rejected an operation.
    #[error(transparent)]
    Queue(#[from] QueueError),
}
