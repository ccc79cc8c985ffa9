//! entitygen CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use entitygen_runtime::{Cli, Generator, RunOutcome, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = cli.resolve_config()?;
    logging::init(&config.log_level);

    let generator = Generator::new(config);
    match generator.generate(&cli.output)? {
        RunOutcome::NoSchemas => {
            println!("No schemas found");
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Generated(summary) => {
            println!(
                "Generated {} of {} entities from {} schemas into {}",
                summary.writes.written.len(),
                summary.entities,
                summary.schemas,
                cli.output.display()
            );
            for (entity, error) in &summary.writes.failed {
                eprintln!("\x1b[33m  failed: {entity}: {error}\x1b[0m");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
