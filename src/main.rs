//! Command-line front end for the iterated local search.

use clap::{Args, Parser, Subcommand};
use ils_solver::config::Config;
use ils_solver::error::{Error, Result};
use ils_solver::problem::Problem;
use ils_solver::solution::SearchResult;
use ils_solver::sudoku::{format_grid, SudokuGrid, SudokuProblem};
use ils_solver::tour::hcp::{HcpInstance, HcpLoader, MAX_NODES};
use ils_solver::tour::tsp::TspLoader;
use ils_solver::utils::{self, format_duration, RunSummary};
use ils_solver::IlsAlgorithm;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ils-solver", version, about = "Iterated local search for HCP, TSP and Sudoku")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RunArgs {
    /// JSON file with a search configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Number of seeds to try
    #[arg(long, global = true)]
    seeds: Option<usize>,
    /// Time limit in seconds
    #[arg(long = "time-limit", value_name = "SECS", global = true)]
    time_limit: Option<f64>,
    /// Skip the perturbation step
    #[arg(long = "no-perturb", global = true)]
    no_perturb: bool,
    /// Skip the global refinement pass
    #[arg(long = "no-refine", global = true)]
    no_refine: bool,
    /// Directory for result files
    #[arg(long = "output-dir", default_value = "results", global = true)]
    output_dir: PathBuf,
    /// Also write a JSON summary to this file
    #[arg(long, global = true)]
    summary: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Search a Hamiltonian cycle in an HCP edge-list file
    Hcp {
        file: PathBuf,
        /// Largest node id accepted
        #[arg(long = "max-nodes", default_value_t = MAX_NODES)]
        max_nodes: usize,
    },
    /// Search a short tour for a TSP coordinate file
    Tsp {
        file: PathBuf,
        /// Known optimal tour to compare against
        #[arg(long = "opt-tour")]
        opt_tour: Option<PathBuf>,
    },
    /// Complete a Sudoku grid
    Sudoku { file: PathBuf },
    /// Generate a random HCP instance with a hidden Hamiltonian cycle
    GenerateHcp {
        #[arg(long, default_value_t = 100)]
        nodes: usize,
        #[arg(long, default_value_t = 0.01)]
        probability: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        output: PathBuf,
    },
}

impl RunArgs {
    /// Build the configuration: file (or defaults with the domain budget), then flags.
    fn config(&self, default_budget: usize) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::new().with_seed_budget(default_budget),
        };

        if let Some(seeds) = self.seeds {
            config.seed_budget = seeds;
        }
        if let Some(secs) = self.time_limit {
            let limit = Duration::try_from_secs_f64(secs.max(0.0)).map_err(|e| {
                Error::parse(0, format!("invalid --time-limit {}: {}", secs, e))
            })?;
            config.time_limit = Some(limit);
        }
        if self.no_perturb {
            config.perturb = false;
        }
        if self.no_refine {
            config.refine = false;
        }

        Ok(config)
    }

    /// Write the JSON summary if requested; failures are only logged.
    fn write_summary(&self, summary: &RunSummary) {
        if let Some(path) = &self.summary {
            if let Err(e) = utils::save_summary(path, summary) {
                error!("{}", e);
            }
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| Error::parse(e.line(), e.to_string()))
}

fn summarize<P: Problem>(
    instance: &str,
    kind: &str,
    problem: &P,
    result: &SearchResult<P::Value>,
    configuration: Vec<usize>,
) -> RunSummary {
    RunSummary {
        instance: instance.to_string(),
        problem: kind.to_string(),
        cost: result.cost,
        optimum: problem.optimum(),
        optimal: result.optimal,
        seeds_run: result.seeds_run,
        found_after_secs: result.found_after.as_secs_f64(),
        elapsed_secs: result.elapsed.as_secs_f64(),
        configuration,
    }
}

fn run_hcp(args: &RunArgs, file: &Path, max_nodes: usize) -> Result<()> {
    let instance = HcpLoader::new().with_max_nodes(max_nodes).from_path(file)?;
    info!(
        "Graph {} looks valid: {} nodes, {} edges",
        instance.name,
        instance.node_count(),
        instance.edge_count()
    );

    let problem = instance.to_problem();
    let config = args.config(instance.node_count())?;
    let mut algorithm = IlsAlgorithm::new(problem, config);
    let result = algorithm.run();

    info!("Best dist: {}", result.cost);
    info!("Min dist: {}", instance.node_count());
    if instance.is_hamiltonian_cycle(&result.configuration) {
        info!("Solution is a Hamiltonian cycle");
    } else {
        warn!("No Hamiltonian cycle found");
    }
    info!("Total time: {}", format_duration(result.elapsed));

    if let Err(e) = utils::save_hcp_tour(&args.output_dir, &instance.name, &result.configuration) {
        error!("{}", e);
    }
    let tour = result.configuration.iter().map(|&v| v + 1).collect();
    args.write_summary(&summarize(&instance.name, "hcp", &algorithm.problem, &result, tour));
    Ok(())
}

fn run_tsp(args: &RunArgs, file: &Path, opt_tour: Option<&Path>) -> Result<()> {
    let loader = TspLoader::new();
    let instance = loader.from_path(file)?;
    let optimal_length = match opt_tour {
        Some(path) => Some(instance.tour_length(&loader.tour_from_path(path)?)?),
        None => None,
    };
    info!("Loaded {} with {} points", instance.name, instance.node_count());

    let problem = instance.to_problem();
    let config = args.config(10)?;
    let mut algorithm = IlsAlgorithm::new(problem, config);
    let result = algorithm.run();

    if let Some(length) = optimal_length {
        info!("Optimal distance: {}", length);
    }
    info!("Best found distance: {}", result.cost);
    info!("Total time: {}", format_duration(result.elapsed));

    if let Err(e) = utils::save_tsp_tour(
        &args.output_dir,
        &instance.name,
        &result.configuration,
        result.cost,
        result.elapsed,
    ) {
        error!("{}", e);
    }
    let tour = result.configuration.iter().map(|&v| v + 1).collect();
    args.write_summary(&summarize(&instance.name, "tsp", &algorithm.problem, &result, tour));
    Ok(())
}

fn run_sudoku(args: &RunArgs, file: &Path) -> Result<()> {
    let grid = SudokuGrid::from_path(file)?;
    info!("Sudoku {} seems valid, {} blank cells", grid.name, grid.blank_count());

    let name = grid.name.clone();
    let (size, block) = (grid.size(), grid.block_size());
    let problem = SudokuProblem::new(grid);
    let config = args.config(250)?;
    let mut algorithm = IlsAlgorithm::new(problem, config);
    let result = algorithm.run();

    info!("Grid:\n{}", format_grid(&result.configuration, size, block));
    info!("Lowest cost: {} (solved at {})", result.cost, algorithm.problem.min_cost());
    info!("Total time: {}", format_duration(result.elapsed));

    if let Err(e) = utils::save_sudoku_solution(
        &args.output_dir,
        &name,
        &result.configuration,
        size,
        result.elapsed,
    ) {
        error!("{}", e);
    }
    let cells = result.configuration.iter().map(|&v| v as usize).collect();
    args.write_summary(&summarize(&name, "sudoku", &algorithm.problem, &result, cells));
    Ok(())
}

fn generate_hcp(nodes: usize, probability: f64, seed: u64, output: &Path) -> Result<()> {
    let (instance, cycle) = HcpInstance::generate(nodes, probability, seed)?;
    info!(
        "Generated {} nodes, {} edges; hidden cycle starts {:?}",
        instance.node_count(),
        instance.edge_count(),
        &cycle[..cycle.len().min(10)]
    );
    utils::save_hcp_instance(output, &instance)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let outcome = match &cli.command {
        Command::Hcp { file, max_nodes } => run_hcp(&cli.run, file, *max_nodes),
        Command::Tsp { file, opt_tour } => run_tsp(&cli.run, file, opt_tour.as_deref()),
        Command::Sudoku { file } => run_sudoku(&cli.run, file),
        Command::GenerateHcp {
            nodes,
            probability,
            seed,
            output,
        } => generate_hcp(*nodes, *probability, *seed, output),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if e.is_fatal() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
