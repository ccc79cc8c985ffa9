//! Configuration, CLI, and the generation pipeline for entitygen.
//!
//! This crate provides:
//! - [`GeneratorConfig`] - Run configuration with TOML loading
//! - [`Cli`] - Command-line arguments of the `entitygen` binary
//! - [`Generator`] - Scan, parse, resolve, render, and write in one run
//! - [`output_path`] and [`write_all`] - Placement of generated sources

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod writer;

pub use cli::Cli;
pub use config::{CONFIG_FILE_NAME, GeneratorConfig};
pub use pipeline::{Generator, RunOutcome, RunSummary};
pub use writer::{WriteSummary, output_path, write_all, write_entity};
