//! Solve command implementation.

use crate::cli::SolveArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{FileOutcome, Formatter};
use prr_engine::{load_definitions, EngineError, FixedPointSolver, ParallelSolver, SentenceGraph, Solution};
use std::path::PathBuf;
use std::sync::Arc;

/// Execute the solve command.
pub async fn execute_solve(args: SolveArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut solver_config = super::solver_config(config, &args.solver);
    if args.trace {
        solver_config.record_trace = true;
    }

    tracing::debug!(
        "Solving {} file(s) (parallel: {}, grounding: {})",
        args.files.len(),
        args.parallel,
        solver_config.grounding.as_str()
    );

    let outcomes = if args.parallel {
        solve_parallel(&args.files, ParallelSolver::new(solver_config)).await
    } else {
        solve_concurrently(&args.files, Arc::new(FixedPointSolver::new(solver_config))).await
    };

    println!("{}", formatter.format_outcomes(&outcomes)?);

    let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
    if failed > 0 {
        return Err(CliError::Failed {
            failed,
            total: outcomes.len(),
        });
    }

    Ok(())
}

/// Solve every file on its own blocking task.
pub async fn solve_concurrently(files: &[PathBuf], solver: Arc<FixedPointSolver>) -> Vec<FileOutcome> {
    let handles: Vec<_> = files
        .iter()
        .cloned()
        .map(|file| {
            let solver = Arc::clone(&solver);
            tokio::task::spawn_blocking(move || {
                let result = load_definitions(&file).and_then(|graph| solver.solve(&graph));
                (file, result)
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (handle, file) in handles.into_iter().zip(files) {
        let (file, result) = match handle.await {
            Ok(done) => done,
            Err(e) => (file.clone(), Err(EngineError::Worker(e.to_string()))),
        };
        outcomes.push(FileOutcome {
            file: file.display().to_string(),
            result,
        });
    }
    outcomes
}

/// Solve every file with round-level parallelism.
pub async fn solve_parallel(files: &[PathBuf], solver: ParallelSolver) -> Vec<FileOutcome> {
    let mut loaded: Vec<Arc<SentenceGraph>> = Vec::new();
    let mut load_errors: Vec<Option<EngineError>> = Vec::with_capacity(files.len());
    for file in files {
        match load_definitions(file) {
            Ok(graph) => {
                loaded.push(Arc::new(graph));
                load_errors.push(None);
            }
            Err(e) => load_errors.push(Some(e)),
        }
    }

    let mut solved = solver.solve_all(loaded).await.into_iter();
    files
        .iter()
        .zip(load_errors)
        .map(|(file, load_error)| {
            let result: prr_engine::Result<Solution> = match load_error {
                Some(e) => Err(e),
                None => solved
                    .next()
                    .unwrap_or_else(|| Err(EngineError::Worker("missing result".to_string()))),
            };
            FileOutcome {
                file: file.display().to_string(),
                result,
            }
        })
        .collect()
}
