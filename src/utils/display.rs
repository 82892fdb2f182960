//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::engine::{Outcome, SearchReport};
use crate::grid::{Board, QueensSolution};
use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Format search results for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a value sequence as `[a, b, c]`
    pub fn format_sequence<T: Display>(values: &[T]) -> String {
        format!("[{}]", values.iter().join(", "))
    }

    /// Format palindrome pieces as `a | bb | a`
    pub fn format_pieces(pieces: &[String]) -> String {
        if pieces.is_empty() {
            "(empty)".to_string()
        } else {
            pieces.iter().join(" | ")
        }
    }

    /// Format a direction-letter path; the empty path is spelled out
    pub fn format_path(path: &str) -> String {
        if path.is_empty() {
            "(already at destination)".to_string()
        } else {
            path.to_string()
        }
    }

    pub fn format_queens(solution: &QueensSolution) -> String {
        solution.to_string()
    }

    /// Format a sudoku board with box separators
    pub fn format_sudoku(board: &Board<u8>) -> String {
        let mut output = String::new();
        for (r, row) in board.rows().enumerate() {
            if r > 0 && r % 3 == 0 {
                output.push_str("------+-------+------\n");
            }
            let line = row
                .chunks(3)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|&digit| if digit == 0 { ".".to_string() } else { digit.to_string() })
                        .join(" ")
                })
                .join(" | ");
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// Number every solution and append the outcome line
    pub fn format_report<S>(report: &SearchReport<S>, render: impl Fn(&S) -> String) -> String {
        let mut output = String::new();

        for (i, solution) in report.solutions.iter().enumerate() {
            let rendered = render(solution);
            if rendered.contains('\n') {
                output.push_str(&format!("=== Solution {} ===\n", i + 1));
                output.push_str(&rendered);
                if !rendered.ends_with('\n') {
                    output.push('\n');
                }
            } else {
                output.push_str(&format!("{:4}: {}\n", i + 1, rendered));
            }
        }

        output.push_str(&Self::format_outcome(report));
        output
    }

    /// One-line summary of how the run ended
    pub fn format_outcome<S>(report: &SearchReport<S>) -> String {
        match report.outcome {
            Outcome::Exhausted => "No solutions found\n".to_string(),
            Outcome::Found if report.len() == 1 => "Stopped at the first solution\n".to_string(),
            Outcome::Found => format!("Stopped after {} solutions (cap reached)\n", report.len()),
            Outcome::Continue => format!("{} solution(s), search space exhausted\n", report.len()),
        }
    }

    /// Save a report under `output_dir` as `<name>.json` or `<name>.txt`
    pub fn save_report<S: Serialize>(
        report: &SearchReport<S>,
        rendered: &str,
        output_dir: &Path,
        name: &str,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let filepath = match format {
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.json", name));
                let json = serde_json::to_string_pretty(report)
                    .context("Failed to serialize report")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.txt", name));
                let content = format!("{}\n{}", rendered, report.statistics);
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
        };

        Ok(filepath)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
