//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use prr_engine::Grounding;
use std::path::PathBuf;

/// PRR - Solve self-referential sentences in four-valued logic.
#[derive(Debug, Parser)]
#[command(name = "prr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, env = "PRR_FORMAT")]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PRR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (name=value lines)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve definition files to stable assignments
    Solve(SolveArgs),

    /// Validate a definition file and describe its structure
    Check(CheckArgs),

    /// Solve a definition file and print confidence intervals only
    Project(ProjectArgs),
}

/// Solver overrides shared by `solve` and `project`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SolverArgs {
    /// Round bound (default: 2N + 2 for N sentences)
    #[arg(short, long)]
    pub max_iterations: Option<usize>,

    /// How references to still-unvalued sentences are read
    #[arg(short, long, value_enum)]
    pub grounding: Option<GroundingArg>,
}

/// Arguments for the solve command.
#[derive(Debug, Parser)]
pub struct SolveArgs {
    /// Definition files (.toml or .json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Evaluate each round on several blocking tasks
    #[arg(short, long)]
    pub parallel: bool,

    /// Print every intermediate assignment
    #[arg(short, long)]
    pub trace: bool,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Definition file (.toml or .json)
    pub file: PathBuf,

    /// Also print the definitions back as canonical TOML
    #[arg(short, long)]
    pub normalize: bool,
}

/// Arguments for the project command.
#[derive(Debug, Parser)]
pub struct ProjectArgs {
    /// Definition file (.toml or .json)
    pub file: PathBuf,

    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Grounding argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum GroundingArg {
    /// Unvalued sentences read as false within their own cycle
    ClosedWorld,
    /// Least fixed point; unvalued sentences stay unvalued
    Open,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<GroundingArg> for Grounding {
    fn from(grounding: GroundingArg) -> Self {
        match grounding {
            GroundingArg::ClosedWorld => Grounding::ClosedWorld,
            GroundingArg::Open => Grounding::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_command() {
        let cli = Cli::parse_from([
            "prr",
            "solve",
            "liar.toml",
            "mutual.toml",
            "--grounding",
            "open",
            "--max-iterations",
            "9",
            "--parallel",
        ]);
        match cli.command {
            Command::Solve(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.solver.max_iterations, Some(9));
                assert!(matches!(args.solver.grounding, Some(GroundingArg::Open)));
                assert!(args.parallel);
                assert!(!args.trace);
            }
            _ => panic!("Expected Solve command"),
        }
    }

    #[test]
    fn test_solve_requires_a_file() {
        assert!(Cli::try_parse_from(["prr", "solve"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["prr", "check", "liar.toml", "--format", "json", "--no-color"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn test_grounding_conversion() {
        let grounding: Grounding = GroundingArg::ClosedWorld.into();
        assert_eq!(grounding, Grounding::ClosedWorld);
    }
}
