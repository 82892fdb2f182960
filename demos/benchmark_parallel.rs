//! Benchmark comparing sequential and parallel N-Queens searches
//!
//! Each board size is solved several times with the root branches explored
//! on one thread and then on the rayon pool, and the timings are compared.

use anyhow::{Context, Result};
use backtrack_search::{config::SearchConfig, grid::solve_n_queens};
use itertools::Itertools;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct BenchmarkResult {
    size: usize,
    parallel: bool,
    run_times: Vec<Duration>,
    solutions_found: usize,
}

impl BenchmarkResult {
    fn new(size: usize, parallel: bool) -> Self {
        Self {
            size,
            parallel,
            run_times: Vec::new(),
            solutions_found: 0,
        }
    }

    fn add_run(&mut self, duration: Duration, solutions_found: usize) {
        self.run_times.push(duration);
        self.solutions_found = solutions_found;
    }

    fn average_time(&self) -> Duration {
        if self.run_times.is_empty() {
            return Duration::ZERO;
        }
        self.run_times.iter().sum::<Duration>() / self.run_times.len() as u32
    }

    fn format_time(duration: Duration) -> String {
        format!("{:.3}s", duration.as_secs_f64())
    }

    fn display(&self) -> String {
        format!(
            "  {}-queens {}:\n    Runs: [{}]\n    Avg: {} | Min: {} | Max: {} | Solutions: {}",
            self.size,
            if self.parallel { "parallel" } else { "sequential" },
            self.run_times.iter().map(|d| Self::format_time(*d)).join(", "),
            Self::format_time(self.average_time()),
            Self::format_time(self.run_times.iter().min().copied().unwrap_or_default()),
            Self::format_time(self.run_times.iter().max().copied().unwrap_or_default()),
            self.solutions_found
        )
    }
}

fn run_single_benchmark(size: usize, parallel: bool) -> Result<(Duration, usize)> {
    let config = SearchConfig {
        parallel,
        ..SearchConfig::default()
    };

    let start_time = Instant::now();
    let report = solve_n_queens(size, &config)
        .with_context(|| format!("Failed to solve {}-queens", size))?;
    Ok((start_time.elapsed(), report.len()))
}

fn main() -> Result<()> {
    let sizes = [8, 10, 11, 12];
    let runs_per_config = 3;

    println!("Starting N-Queens benchmark ({} runs per config)\n", runs_per_config);

    let mut results = Vec::new();
    for size in sizes {
        for parallel in [false, true] {
            let mut result = BenchmarkResult::new(size, parallel);
            for run in 1..=runs_per_config {
                let (duration, solutions_found) = run_single_benchmark(size, parallel)?;
                println!(
                    "  {}-queens {} run {}/{}: {}",
                    size,
                    if parallel { "parallel" } else { "sequential" },
                    run,
                    runs_per_config,
                    BenchmarkResult::format_time(duration)
                );
                result.add_run(duration, solutions_found);
            }
            results.push(result);
        }
    }

    println!("\nResults:");
    for result in &results {
        println!("{}", result.display());
    }

    println!("\nSpeedup:");
    for (sequential, parallel) in results.iter().tuples() {
        if sequential.solutions_found != parallel.solutions_found {
            anyhow::bail!(
                "{}-queens: sequential found {}, parallel found {}",
                sequential.size,
                sequential.solutions_found,
                parallel.solutions_found
            );
        }
        let speedup =
            sequential.average_time().as_secs_f64() / parallel.average_time().as_secs_f64().max(1e-9);
        println!("  {}-queens: {:.2}x", sequential.size, speedup);
    }

    Ok(())
}
