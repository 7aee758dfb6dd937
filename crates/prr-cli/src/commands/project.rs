//! Project command implementation.

use crate::cli::ProjectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use prr_engine::{load_definitions, FixedPointSolver};

/// Execute the project command.
pub async fn execute_project(args: ProjectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let graph = load_definitions(&args.file)?;
    let solver = FixedPointSolver::new(super::solver_config(config, &args.solver));
    let solution = solver.solve(&graph)?;

    println!("{}", formatter.format_projection(&solution.projection())?);

    Ok(())
}
