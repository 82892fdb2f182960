//! Command line driver for the backtracking search engine

use anyhow::{Context, Result};
use backtrack_search::{
    combinatorial::{
        combination_sum, combination_sum_unique, combinations_with_size, digit_combinations,
        has_subset_with_sum, palindrome_partitions, power_set, unique_subsets,
    },
    config::{CliOverrides, OutputFormat, Settings},
    engine::SearchReport,
    grid::{
        count_n_queens, create_example_puzzles, find_paths, is_valid_solution,
        load_open_grid_from_file, load_sudoku_from_file, open_grid_to_string, solve_n_queens,
        solve_sudoku,
    },
    utils::{ColorOutput, SolutionFormatter},
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "backtrack")]
#[command(about = "Exhaustive backtracking search over combinatorial and grid puzzles")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format (overrides config)
    #[arg(long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Split the root branches across threads
    #[arg(long, global = true)]
    parallel: bool,

    /// Stop after this many solutions (overrides config)
    #[arg(long, global = true)]
    max_solutions: Option<usize>,

    /// Maximum recursion depth (overrides config)
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Save the report into this directory (overrides config)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Combinations of positive values that add up to a target
    Combinations {
        /// Comma separated values
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<i64>,

        #[arg(long, allow_negative_numbers = true)]
        target: i64,

        /// Use each element at most once and skip duplicate combinations
        #[arg(long, conflicts_with = "size")]
        unique: bool,

        /// Only combinations of exactly this many elements
        #[arg(long)]
        size: Option<usize>,
    },

    /// Sets of distinct digits 1-9 with a given size and sum
    Digits {
        #[arg(long)]
        count: usize,

        #[arg(long, allow_negative_numbers = true)]
        target: i64,
    },

    /// Every subset of the given values
    Subsets {
        /// Comma separated values
        #[arg(long, value_delimiter = ',')]
        values: Vec<String>,

        /// Skip subsets equal to one already produced
        #[arg(long)]
        unique: bool,
    },

    /// Whether some subset of the values sums to the target
    SubsetSum {
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<i64>,

        #[arg(long, allow_negative_numbers = true)]
        target: i64,
    },

    /// Split a string into palindromic pieces
    Partition {
        text: String,
    },

    /// Place n non-attacking queens
    Queens {
        #[arg(short, long, default_value_t = 8)]
        size: usize,

        /// Print only the number of solutions
        #[arg(long)]
        count_only: bool,
    },

    /// Solve a sudoku puzzle file
    Sudoku {
        #[arg(short, long)]
        puzzle: PathBuf,
    },

    /// Enumerate corner to corner paths through a maze file
    Maze {
        #[arg(short, long)]
        grid: PathBuf,
    },

    /// Create a default configuration and sample puzzles
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Setup { directory, force } = &cli.command {
        init_logging(cli.verbose)?;
        return setup_command(directory, *force);
    }

    let settings = load_settings(&cli)?;
    init_logging(settings.logging.verbosity)?;
    run_command(cli.command, &settings)
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = if cli.config.exists() {
        Settings::from_file(&cli.config)
            .with_context(|| format!("Failed to load config from {}", cli.config.display()))?
    } else {
        Settings::default()
    };

    let cli_overrides = CliOverrides {
        max_depth: cli.max_depth,
        max_solutions: cli.max_solutions,
        parallel: cli.parallel,
        format: cli.format.map(OutputFormat::from),
        output_dir: cli.output.clone(),
        verbosity: cli.verbose,
    };
    settings.merge_with_cli(&cli_overrides);

    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn init_logging(verbosity: u8) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;

    let env_filter = tracing_subscriber::filter::EnvFilter::from_default_env();
    let level_filter = match verbosity {
        0 => tracing_subscriber::filter::LevelFilter::INFO,
        1 => tracing_subscriber::filter::LevelFilter::DEBUG,
        _ => tracing_subscriber::filter::LevelFilter::TRACE,
    };
    let registry = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(level_filter);
    let mut fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time();
    if verbosity < 3 {
        fmt_layer = fmt_layer.with_target(false);
    }
    let sub = registry.with(fmt_layer);
    tracing::subscriber::set_global_default(sub).context("Failed to install logger")
}

fn run_command(command: Commands, settings: &Settings) -> Result<()> {
    let config = &settings.search;

    match command {
        Commands::Combinations {
            values,
            target,
            unique,
            size,
        } => {
            let report = match (unique, size) {
                (_, Some(size)) => combinations_with_size(&values, size, target, config)?,
                (true, None) => combination_sum_unique(&values, target, config)?,
                (false, None) => combination_sum(&values, target, config)?,
            };
            emit(&report, settings, "combinations", |s| SolutionFormatter::format_sequence(s))
        }
        Commands::Digits { count, target } => {
            let report = digit_combinations(count, target, config)?;
            emit(&report, settings, "digits", |s| SolutionFormatter::format_sequence(s))
        }
        Commands::Subsets { values, unique } => {
            let report = if unique {
                unique_subsets(&values, config)?
            } else {
                power_set(&values, config)?
            };
            emit(&report, settings, "subsets", |s| SolutionFormatter::format_sequence(s))
        }
        Commands::SubsetSum { values, target } => {
            match has_subset_with_sum(&values, target, config)? {
                Some(subset) => println!(
                    "{}",
                    ColorOutput::success(&format!(
                        "Subset summing to {}: {}",
                        target,
                        SolutionFormatter::format_sequence(&subset)
                    ))
                ),
                None => println!(
                    "{}",
                    ColorOutput::warning(&format!("No subset sums to {}", target))
                ),
            }
            Ok(())
        }
        Commands::Partition { text } => {
            let report = palindrome_partitions(&text, config)?;
            emit(&report, settings, "partitions", |s| SolutionFormatter::format_pieces(s))
        }
        Commands::Queens { size, count_only } => {
            if count_only {
                let count = count_n_queens(size, config)?;
                println!("{}", ColorOutput::info(&format!("{}-queens: {} solution(s)", size, count)));
                return Ok(());
            }
            let report = solve_n_queens(size, config)?;
            emit(&report, settings, "queens", SolutionFormatter::format_queens)
        }
        Commands::Sudoku { puzzle } => {
            let board = load_sudoku_from_file(&puzzle)?;
            println!("Puzzle:\n{}", SolutionFormatter::format_sudoku(&board));

            let report = solve_sudoku(&board, config)?;
            match report.first() {
                Some(solved) if !is_valid_solution(solved) => {
                    anyhow::bail!("Solver produced an invalid grid");
                }
                Some(_) => {}
                None => eprintln!("{}", ColorOutput::error("Puzzle has no solution")),
            }
            emit(&report, settings, "sudoku", SolutionFormatter::format_sudoku)
        }
        Commands::Maze { grid } => {
            let open = load_open_grid_from_file(&grid)?;
            println!("Maze:\n{}", open_grid_to_string(&open));

            let report = find_paths(&open, config)?;
            emit(&report, settings, "maze", |s| SolutionFormatter::format_path(s))
        }
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

/// Print a report in the configured format and save it when requested
fn emit<S: Serialize>(
    report: &SearchReport<S>,
    settings: &Settings,
    name: &str,
    render: impl Fn(&S) -> String,
) -> Result<()> {
    let rendered = SolutionFormatter::format_report(report, render);

    match settings.output.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print!("{}", rendered);
            if report.is_success() {
                println!("{}", ColorOutput::success(&format!("Found {} solution(s)", report.len())));
            }
            if settings.logging.verbosity > 0 {
                println!("\n{}", report.statistics);
            }
        }
    }

    if settings.output.save {
        let path = SolutionFormatter::save_report(
            report,
            &rendered,
            &settings.output.output_directory,
            name,
            settings.output.format,
        )
        .context("Failed to save report")?;
        eprintln!("{}", ColorOutput::info(&format!("Report saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: &PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&input_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: backtrack sudoku --puzzle {}", input_dir.join("sudoku.txt").display());

    Ok(())
}
