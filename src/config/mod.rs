//! Configuration management for the backtracking search engine

pub mod settings;

pub use settings::{
    Settings, SearchConfig, OutputConfig, OutputFormat, LoggingConfig, CliOverrides
};
