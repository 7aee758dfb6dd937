//! Command implementations.

pub mod check;
pub mod project;
pub mod solve;

pub use self::check::execute_check;
pub use self::project::execute_project;
pub use self::solve::execute_solve;

use crate::cli::SolverArgs;
use crate::config::Config;
use prr_engine::SolverConfig;

/// Solver configuration from the config file with command-line overrides applied.
pub fn solver_config(config: &Config, args: &SolverArgs) -> SolverConfig {
    let mut solver = config.solver.clone();
    if let Some(max_iterations) = args.max_iterations {
        solver.max_iterations = Some(max_iterations);
    }
    if let Some(grounding) = args.grounding {
        solver.grounding = grounding.into();
    }
    solver
}
