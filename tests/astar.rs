use std::collections::VecDeque;

use rand::prelude::*;
use rand_pcg::Pcg64;
use waypath::grid::{Grid, GridModel, Heuristic, Point, AXIS_COST, DIAGONAL_COST};
use waypath::traits::SpaceModel;
use waypath::{find_path, AStarSearcher, Path, SearchError, SearchLimits, SearchOutcome};

const EPSILON: f64 = 1e-9;

fn open_grid(width: i32, height: i32) -> GridModel {
    GridModel::new(Grid::new(width, height, |_, _| 1))
}

fn grid_with_walls(width: i32, height: i32, walls: &[(i32, i32)]) -> GridModel {
    GridModel::new(Grid::new(width, height, |x, y| {
        i32::from(!walls.contains(&(x, y)))
    }))
}

#[track_caller]
fn expect_path<S: std::fmt::Debug>(outcome: SearchOutcome<S>) -> Path<S> {
    match outcome {
        SearchOutcome::Found(path) => path,
        SearchOutcome::NoPath => panic!("expected a path"),
    }
}

/// Checks that consecutive positions are adjacent and that the reported cost
/// is the sum of the step costs.
#[track_caller]
fn assert_consistent<M: SpaceModel>(model: &M, path: &Path<M::Position>) {
    let mut cost = 0.0;
    let mut neighbors = vec![];
    for step in path.positions().windows(2) {
        neighbors.clear();
        model.neighbors(&step[0], &mut neighbors);
        assert!(neighbors.contains(&step[1]), "{:?} is not adjacent to {:?}", step[1], step[0]);
        cost += model.movement_cost(&step[0], &step[1]);
    }
    assert!((cost - path.cost()).abs() < EPSILON, "{cost} != {}", path.cost());
}

fn reachable<M: SpaceModel>(model: &M, start: M::Position) -> Vec<M::Position> {
    let mut seen = vec![start.clone()];
    let mut queue = VecDeque::from([start]);
    let mut neighbors = vec![];
    while let Some(p) = queue.pop_front() {
        neighbors.clear();
        model.neighbors(&p, &mut neighbors);
        for n in neighbors.drain(..) {
            if !seen.contains(&n) {
                seen.push(n.clone());
                queue.push_back(n);
            }
        }
    }
    seen
}

#[test]
fn open_grid_goes_straight_along_the_diagonal() {
    let model = open_grid(5, 5);
    let path = expect_path(find_path(&model, Point::new(0, 0), Point::new(4, 4)).unwrap());
    assert_eq!(path.len(), 5);
    assert_eq!(
        path.positions(),
        (0..5).map(|i| Point::new(i, i)).collect::<Vec<_>>()
    );
    assert!((path.cost() - 5.6).abs() < EPSILON);
    assert_consistent(&model, &path);
}

#[test]
fn blocked_centre_forces_a_detour() {
    let model = grid_with_walls(5, 5, &[(2, 2)]);
    let path = expect_path(find_path(&model, Point::new(0, 0), Point::new(4, 4)).unwrap());
    assert!(path.cost() > 5.6 + EPSILON);
    assert!(!path.positions().contains(&Point::new(2, 2)));
    assert_consistent(&model, &path);

    let model = model.with_heuristic(Heuristic::Octile);
    let path = expect_path(find_path(&model, Point::new(0, 0), Point::new(4, 4)).unwrap());
    assert!((path.cost() - 6.2).abs() < EPSILON);
}

#[test]
fn blocked_corners_force_a_longer_detour() {
    // Without corner cutting, every diagonal move next to (2, 2) is blocked.
    let model = grid_with_walls(5, 5, &[(2, 2)])
        .with_corner_cutting(false)
        .with_heuristic(Heuristic::Octile);
    let path = expect_path(find_path(&model, Point::new(0, 0), Point::new(4, 4)).unwrap());
    assert!(!path.positions().contains(&Point::new(2, 2)));
    assert!((path.cost() - 6.8).abs() < EPSILON, "{}", path.cost());
    assert_consistent(&model, &path);
}

#[test]
fn start_equal_to_goal_needs_no_expansion() {
    let model = open_grid(3, 3);
    let mut searcher = AStarSearcher::new();
    let path = expect_path(
        searcher
            .search(&model, Point::new(1, 1), Point::new(1, 1))
            .unwrap(),
    );
    assert_eq!(path.positions(), [Point::new(1, 1)]);
    assert_eq!(path.cost(), 0.0);
    assert_eq!(searcher.stats().expanded, 0);
}

#[test]
fn isolated_goal_has_no_path() {
    let model = grid_with_walls(5, 5, &[(3, 3), (3, 4), (4, 3)]);
    let start = Point::new(0, 0);
    let goal = Point::new(4, 4);
    let mut searcher = AStarSearcher::new();
    assert_eq!(
        searcher.search(&model, start, goal).unwrap(),
        SearchOutcome::NoPath
    );

    let tree = searcher.tree();
    let mut expected = reachable(&model, start);
    let mut discovered: Vec<Point> = tree.positions().copied().collect();
    expected.sort();
    discovered.sort();
    assert_eq!(discovered, expected);
    assert_eq!(tree.len(), 21);
    assert!(!tree.contains(&goal));

    for p in &discovered {
        assert!(tree.is_closed(p));
        match tree.predecessor(p) {
            Some(parent) => {
                assert!(tree.contains(parent));
                let step = model.movement_cost(parent, p);
                let via_parent = tree.g_score(parent).unwrap() + step;
                assert!((tree.g_score(p).unwrap() - via_parent).abs() < EPSILON);
            }
            None => assert_eq!(*p, start),
        }
    }
}

#[test]
fn impassable_goal_has_no_path() {
    let model = grid_with_walls(4, 4, &[(3, 3)]);
    let outcome = find_path(&model, Point::new(0, 0), Point::new(3, 3)).unwrap();
    assert!(!outcome.is_found());
    assert_eq!(outcome.into_path(), None);
}

#[test]
fn positions_outside_the_grid_are_rejected() {
    let model = open_grid(3, 3);
    assert_eq!(
        find_path(&model, Point::new(-1, 0), Point::new(2, 2)),
        Err(SearchError::InvalidStart {
            position: Point::new(-1, 0)
        })
    );
    assert_eq!(
        find_path(&model, Point::new(0, 0), Point::new(3, 0)),
        Err(SearchError::InvalidGoal {
            position: Point::new(3, 0)
        })
    );
}

#[test]
fn expansion_limit_aborts_the_search() {
    let model = open_grid(50, 50);
    let mut searcher = AStarSearcher::with_limits(SearchLimits {
        max_expansions: Some(3),
    });
    let err = searcher
        .search(&model, Point::new(0, 0), Point::new(49, 49))
        .unwrap_err();
    assert_eq!(err, SearchError::ExpansionLimit { expanded: 3 });
    assert_eq!(searcher.stats().expanded, 3);

    searcher.set_limits(SearchLimits::default());
    let outcome = searcher
        .search(&model, Point::new(0, 0), Point::new(49, 49))
        .unwrap();
    assert!(outcome.is_found());
}

/// Directed graph over node indices with explicit edge costs.
struct Graph {
    edges: Vec<Vec<(usize, f64)>>,
    heuristic: Vec<f64>,
}

impl Graph {
    fn new(nodes: usize, edges: &[(usize, usize, f64)]) -> Self {
        let mut adjacency = vec![vec![]; nodes];
        for &(from, to, cost) in edges {
            adjacency[from].push((to, cost));
        }
        Graph {
            edges: adjacency,
            heuristic: vec![0.0; nodes],
        }
    }
}

impl SpaceModel for Graph {
    type Position = usize;

    fn neighbors(&self, node: &usize, out: &mut Vec<usize>) {
        out.extend(self.edges[*node].iter().map(|&(to, _)| to));
    }

    fn heuristic_estimate(&self, node: &usize, _goal: &usize) -> f64 {
        self.heuristic[*node]
    }

    fn movement_cost(&self, from: &usize, to: &usize) -> f64 {
        self.edges[*from]
            .iter()
            .find(|&&(target, _)| target == *to)
            .map_or(f64::INFINITY, |&(_, cost)| cost)
    }

    fn contains(&self, node: &usize) -> bool {
        *node < self.edges.len()
    }
}

#[test]
fn cheaper_route_lowers_an_open_node() {
    let graph = Graph::new(
        4,
        &[(0, 1, 1.0), (0, 2, 4.0), (1, 2, 1.0), (2, 3, 1.0)],
    );
    let mut searcher = AStarSearcher::new();
    let path = expect_path(searcher.search(&graph, 0, 3).unwrap());
    assert_eq!(path.positions(), [0, 1, 2, 3]);
    assert_eq!(path.cost(), 3.0);
    assert_eq!(searcher.stats().updated, 1);
    assert_eq!(searcher.tree().predecessor(&2), Some(&1));
}

#[test]
fn equal_costs_break_ties_by_discovery_order() {
    // Two equally short routes; the one through the first discovered
    // neighbor wins every time.
    let graph = Graph::new(
        4,
        &[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)],
    );
    for _ in 0..3 {
        let path = expect_path(find_path(&graph, 0, 3).unwrap());
        assert_eq!(path.positions(), [0, 1, 3]);
    }
}

#[test]
fn model_contract_violations_are_reported() {
    let mut graph = Graph::new(3, &[(0, 1, 1.0), (1, 2, -2.0)]);
    assert_eq!(
        find_path(&graph, 0, 2),
        Err(SearchError::InvalidCost {
            from: 1,
            to: 2,
            cost: -2.0
        })
    );

    graph.edges[1][0].1 = 1.0;
    graph.heuristic[1] = f64::NAN;
    assert!(matches!(
        find_path(&graph, 0, 2),
        Err(SearchError::InvalidHeuristic { position: 1, .. })
    ));
}

fn random_grid(rng: &mut Pcg64, size: i32) -> GridModel {
    GridModel::new(Grid::new(size, size, |_, _| {
        i32::from(rng.gen_bool(0.72))
    }))
}

fn random_passable(rng: &mut Pcg64, model: &GridModel) -> Point {
    loop {
        let p = Point::new(rng.gen_range(0..model.width()), rng.gen_range(0..model.height()));
        if model.is_passable(p) {
            return p;
        }
    }
}

fn assert_matches_dijkstra(seed: u64, axis_cost: f64, diagonal_cost: f64) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut searcher = AStarSearcher::new();
    let mut found = 0;

    for _ in 0..40 {
        let model = random_grid(&mut rng, 24).with_costs(axis_cost, diagonal_cost);
        let start = random_passable(&mut rng, &model);
        let goal = random_passable(&mut rng, &model);

        let dijkstra = model.clone().with_heuristic(Heuristic::Zero);
        let reference = searcher.search(&dijkstra, start, goal).unwrap();

        for heuristic in [Heuristic::Octile, Heuristic::Chebyshev] {
            let model = model.clone().with_heuristic(heuristic);
            let outcome = searcher.search(&model, start, goal).unwrap();
            match (&reference, &outcome) {
                (SearchOutcome::Found(best), SearchOutcome::Found(path)) => {
                    assert!(
                        (best.cost() - path.cost()).abs() < EPSILON,
                        "{heuristic:?} with costs {axis_cost}/{diagonal_cost}: {} != {}",
                        path.cost(),
                        best.cost()
                    );
                    assert_eq!(path.start(), &start);
                    assert_eq!(path.goal(), &goal);
                    assert_consistent(&model, path);
                    found += 1;
                }
                (SearchOutcome::NoPath, SearchOutcome::NoPath) => {}
                _ => panic!("{heuristic:?} disagrees with Dijkstra on reachability"),
            }
        }
    }

    assert!(found > 0);
}

#[test]
fn admissible_heuristics_find_optimal_paths() {
    assert_matches_dijkstra(0xa5a5, AXIS_COST, DIAGONAL_COST);
}

#[test]
fn admissible_heuristics_survive_lopsided_costs() {
    // diagonals dearer than two axis moves, then axis moves dearer than a diagonal
    assert_matches_dijkstra(0x5a5a, 1.0, 3.0);
    assert_matches_dijkstra(0x7e57, 3.0, 1.0);
}

#[test]
fn reused_searcher_matches_fresh_searches() {
    let mut rng = Pcg64::seed_from_u64(99);
    let model = random_grid(&mut rng, 16).with_heuristic(Heuristic::Octile);
    let mut searcher = AStarSearcher::new();
    for _ in 0..10 {
        let start = random_passable(&mut rng, &model);
        let goal = random_passable(&mut rng, &model);
        assert_eq!(
            searcher.search(&model, start, goal).unwrap(),
            find_path(&model, start, goal).unwrap()
        );
    }
}

#[cfg(feature = "serde")]
#[test]
fn paths_serialize() {
    let model = open_grid(2, 2);
    let path = expect_path(find_path(&model, Point::new(0, 0), Point::new(1, 0)).unwrap());
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, r#"{"positions":[{"x":0,"y":0},{"x":1,"y":0}],"cost":1.0}"#);
    let back: Path<Point> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, path);
}
