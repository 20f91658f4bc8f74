use tracing::{debug, trace, warn};
use waypath_core::traits::{Position, SpaceModel};
use waypath_core::{Handle, HashPool, NodeId, PriorityQueue, SearchError, SearchResult};

use crate::path::{Path, SearchOutcome};

/// Frontier ordering: lowest `f` first, then earliest discovered.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
struct FrontierKey {
    f: f64,
    order: usize,
}

#[derive(Clone, Copy, Debug)]
enum NodeState {
    Open(Handle),
    Closed,
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    g: f64,
    h: f64,
    parent: Option<NodeId>,
    state: NodeState,
}

impl SearchNode {
    fn f(&self) -> f64 {
        self.g + self.h
    }

    fn key(&self, id: NodeId) -> FrontierKey {
        FrontierKey {
            f: self.f(),
            order: id.index(),
        }
    }
}

/// Bounds on the work a single search may do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Abort with [`SearchError::ExpansionLimit`] once this many nodes have
    /// been expanded without reaching the goal.
    pub max_expansions: Option<usize>,
}

/// Counters describing the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose neighbors were generated.
    pub expanded: usize,
    /// Distinct positions discovered, including the start.
    pub generated: usize,
    /// Frontier entries whose cost was lowered after discovery.
    pub updated: usize,
}

/// A* searcher over positions of type `S`.
///
/// The searcher owns the frontier queue, the position pool and the per-node
/// records. Every call to [`search`](Self::search) starts from a clean state;
/// only allocations are reused. After a search the explored region can be
/// inspected through [`tree`](Self::tree).
pub struct AStarSearcher<S> {
    limits: SearchLimits,
    pool: HashPool<S>,
    nodes: Vec<SearchNode>,
    open: PriorityQueue<FrontierKey, NodeId>,
    neighbors: Vec<S>,
    stats: SearchStats,
}

impl<S: Position> Default for AStarSearcher<S> {
    fn default() -> Self {
        Self::with_limits(SearchLimits::default())
    }
}

impl<S: Position> AStarSearcher<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        AStarSearcher {
            limits,
            pool: HashPool::new(),
            nodes: vec![],
            open: PriorityQueue::new(),
            neighbors: vec![],
            stats: SearchStats::default(),
        }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.limits = limits;
    }

    /// Counters of the most recent search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Read-only view of the positions discovered by the most recent search.
    pub fn tree(&self) -> SearchTree<'_, S> {
        SearchTree {
            pool: &self.pool,
            nodes: &self.nodes,
        }
    }

    /// Find a lowest-cost path from `start` to `goal` through `model`.
    ///
    /// The path is optimal if the model's heuristic is admissible. Returns
    /// `Ok(SearchOutcome::NoPath)` when the goal is unreachable; errors are
    /// reserved for invalid input, aborted searches and model contract
    /// violations.
    pub fn search<M>(&mut self, model: &M, start: S, goal: S) -> SearchResult<SearchOutcome<S>, S>
    where
        M: SpaceModel<Position = S> + ?Sized,
    {
        self.reset();

        if !model.contains(&start) {
            return Err(SearchError::InvalidStart { position: start });
        }
        if !model.contains(&goal) {
            return Err(SearchError::InvalidGoal { position: goal });
        }

        let h = estimate(model, &start, &goal)?;
        let start = self.pool.generate(start);
        let start_node = SearchNode {
            g: 0.0,
            h,
            parent: None,
            state: NodeState::Closed,
        };
        let handle = self.open.push(start_node.key(start), start);
        self.nodes.push(SearchNode {
            state: NodeState::Open(handle),
            ..start_node
        });
        self.stats.generated = 1;

        let mut neighbors = std::mem::take(&mut self.neighbors);
        let outcome = self.run(model, &goal, &mut neighbors);
        self.neighbors = neighbors;

        match &outcome {
            Ok(SearchOutcome::Found(path)) => debug!(
                expanded = self.stats.expanded,
                generated = self.stats.generated,
                updated = self.stats.updated,
                cost = path.cost(),
                steps = path.len() - 1,
                "path found"
            ),
            Ok(SearchOutcome::NoPath) => debug!(
                expanded = self.stats.expanded,
                generated = self.stats.generated,
                "no path"
            ),
            Err(_) => {}
        }
        outcome
    }

    fn run<M>(
        &mut self,
        model: &M,
        goal: &S,
        neighbors: &mut Vec<S>,
    ) -> SearchResult<SearchOutcome<S>, S>
    where
        M: SpaceModel<Position = S> + ?Sized,
    {
        while let Some(current) = self.open.pop_min() {
            let node = &mut self.nodes[current.index()];
            node.state = NodeState::Closed;
            let current_g = node.g;
            let position = self.pool.state(current).clone();

            if position == *goal {
                return Ok(SearchOutcome::Found(self.reconstruct(current)));
            }

            if self
                .limits
                .max_expansions
                .is_some_and(|max| self.stats.expanded >= max)
            {
                warn!(expanded = self.stats.expanded, "expansion limit reached");
                return Err(SearchError::ExpansionLimit {
                    expanded: self.stats.expanded,
                });
            }
            self.stats.expanded += 1;
            trace!(node = ?position, g = current_g, "expanding");

            neighbors.clear();
            model.neighbors(&position, neighbors);

            for neighbor in neighbors.drain(..) {
                let cost = model.movement_cost(&position, &neighbor);
                if cost.is_nan() || cost < 0.0 {
                    return Err(SearchError::InvalidCost {
                        from: position,
                        to: neighbor,
                        cost,
                    });
                }
                let tentative_g = current_g + cost;

                let id = self.pool.generate(neighbor);
                if id.index() == self.nodes.len() {
                    let h = estimate(model, self.pool.state(id), goal)?;
                    let mut node = SearchNode {
                        g: tentative_g,
                        h,
                        parent: Some(current),
                        state: NodeState::Closed,
                    };
                    node.state = NodeState::Open(self.open.push(node.key(id), id));
                    self.nodes.push(node);
                    self.stats.generated += 1;
                    trace!(node = ?self.pool.state(id), g = tentative_g, f = node.f(), "discovered");
                    continue;
                }

                let node = &mut self.nodes[id.index()];
                let NodeState::Open(handle) = node.state else {
                    continue;
                };
                if tentative_g < node.g {
                    node.g = tentative_g;
                    node.parent = Some(current);
                    let key = node.key(id);
                    self.open.update_priority(handle, key)?;
                    self.stats.updated += 1;
                    trace!(node = ?self.pool.state(id), g = tentative_g, f = key.f, "improved");
                }
            }
        }

        Ok(SearchOutcome::NoPath)
    }

    fn reconstruct(&self, goal: NodeId) -> Path<S> {
        let mut positions = vec![self.pool.state(goal).clone()];
        let mut cursor = self.nodes[goal.index()].parent;
        while let Some(id) = cursor {
            positions.push(self.pool.state(id).clone());
            cursor = self.nodes[id.index()].parent;
        }
        positions.reverse();
        Path::new(positions, self.nodes[goal.index()].g)
    }

    fn reset(&mut self) {
        self.pool.reset();
        self.nodes.clear();
        self.open.clear();
        self.stats = SearchStats::default();
    }
}

fn estimate<M>(model: &M, node: &M::Position, goal: &M::Position) -> SearchResult<f64, M::Position>
where
    M: SpaceModel + ?Sized,
{
    let estimate = model.heuristic_estimate(node, goal);
    if estimate.is_nan() || estimate < 0.0 {
        return Err(SearchError::InvalidHeuristic {
            position: node.clone(),
            estimate,
        });
    }
    Ok(estimate)
}

/// The predecessor tree left behind by a search.
///
/// Covers every position the search discovered. When the search reported
/// [`SearchOutcome::NoPath`], that is exactly the set of positions reachable
/// from the start.
pub struct SearchTree<'a, S> {
    pool: &'a HashPool<S>,
    nodes: &'a [SearchNode],
}

impl<'a, S: Position> SearchTree<'a, S> {
    /// Number of discovered positions.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, position: &S) -> bool {
        self.pool.get(position).is_some()
    }

    /// Best known cost from the start to `position`.
    pub fn g_score(&self, position: &S) -> Option<f64> {
        self.node(position).map(|node| node.g)
    }

    /// The position `position` was last reached from. `None` for the start and
    /// for undiscovered positions.
    pub fn predecessor(&self, position: &S) -> Option<&'a S> {
        let parent = self.node(position)?.parent?;
        Some(self.pool.state(parent))
    }

    /// Whether `position` was finalized (expanded or selected as goal).
    pub fn is_closed(&self, position: &S) -> bool {
        self.node(position)
            .is_some_and(|node| matches!(node.state, NodeState::Closed))
    }

    /// Discovered positions in discovery order.
    pub fn positions(&self) -> impl Iterator<Item = &'a S> + 'a {
        self.pool.iter().map(|(_, state)| state)
    }

    fn node(&self, position: &S) -> Option<&'a SearchNode> {
        let id = self.pool.get(position)?;
        Some(&self.nodes[id.index()])
    }
}
