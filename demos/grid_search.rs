use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use waypath::grid::{movingai, GridModel, Heuristic, AXIS_COST};
use waypath::{AStarSearcher, SearchLimits, SearchOutcome};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Octile,
    Chebyshev,
    Zero,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Octile => Heuristic::Octile,
            HeuristicArg::Chebyshev => Heuristic::Chebyshev,
            HeuristicArg::Zero => Heuristic::Zero,
        }
    }
}

/// Solve every problem of a MovingAI scenario with A*.
#[derive(Parser, Debug)]
struct Options {
    /// Scenario file; its map is looked up next to it.
    scen: PathBuf,
    #[arg(long, value_enum, default_value = "octile")]
    heuristic: HeuristicArg,
    /// Forbid diagonal moves past blocked cells, as the benchmark does.
    #[arg(long)]
    no_corner_cutting: bool,
    #[arg(long, default_value_t = std::f64::consts::SQRT_2, value_parser = positive_cost)]
    diagonal_cost: f64,
    #[arg(long)]
    max_expansions: Option<usize>,
    /// Worker threads; 0 uses one per core.
    #[arg(long, short = 'j', default_value_t = 0)]
    threads: usize,
    /// Tracing filter, e.g. `info` or `waypath=trace`.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn positive_cost(text: &str) -> Result<f64, String> {
    let cost: f64 = text.parse().map_err(|e| format!("{e}"))?;
    if cost.is_finite() && cost > 0.0 {
        Ok(cost)
    } else {
        Err(format!("cost must be positive and finite, got {cost}"))
    }
}

fn main() -> ExitCode {
    let opt = Options::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&opt.log_level))
        .init();

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let scen = movingai::load_scenario(&opt.scen)?;
    let map = movingai::load_map(&scen.map)?;
    info!(
        map = %scen.map.display(),
        width = map.width(),
        height = map.height(),
        problems = scen.instances.len(),
        "loaded scenario"
    );

    let model = GridModel::new(map)
        .with_heuristic(opt.heuristic.into())
        .with_corner_cutting(!opt.no_corner_cutting)
        .with_costs(AXIS_COST, opt.diagonal_cost);
    let limits = SearchLimits {
        max_expansions: opt.max_expansions,
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opt.threads)
        .build()?;
    let results: Vec<_> = pool.install(|| {
        scen.instances
            .par_iter()
            .map_init(
                || AStarSearcher::with_limits(limits),
                |searcher, problem| {
                    let outcome = searcher.search(&model, problem.start, problem.goal);
                    (outcome, searcher.stats())
                },
            )
            .collect()
    });

    let mut mismatches = 0;
    for (problem, (outcome, stats)) in scen.instances.iter().zip(results) {
        match outcome {
            Ok(SearchOutcome::Found(path)) => {
                let delta = path.cost() - problem.optimal;
                if delta.abs() > 1e-3 {
                    mismatches += 1;
                }
                println!(
                    "{} {} -> {}: {:.4} (published {:.4}, {} expanded)",
                    problem.bucket,
                    problem.start,
                    problem.goal,
                    path.cost(),
                    problem.optimal,
                    stats.expanded,
                );
            }
            Ok(SearchOutcome::NoPath) => {
                println!("{} {} -> {}: no path", problem.bucket, problem.start, problem.goal);
            }
            Err(e) => println!("{} {} -> {}: {e}", problem.bucket, problem.start, problem.goal),
        }
    }
    info!(mismatches, "done");
    Ok(())
}
