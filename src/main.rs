//! paramgen CLI
//!
//! Usage:
//!   paramgen [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>  Generator config (TOML); defaults to ./paramgen.toml if present
//!       --schema <FILE>  Parameter schema (TOML) instead of the built-in table
//!       --check          Verify generated files are up to date without writing
//!       --list           Print the parameter table and exit
//!   -v, --verbose        More log output (repeatable)
//!   -q, --quiet          Only log errors
//!   -h, --help           Print help

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use paramgen::config::DEFAULT_CONFIG_FILE;
use paramgen::{GenerateError, Generator, GeneratorConfig, ParameterSchema};

#[derive(Parser)]
#[command(name = "paramgen")]
#[command(about = "Generate C++ parameter declarations, definitions and parsing from one table")]
struct Cli {
    /// Generator config file (TOML); its relative paths are resolved
    /// against the file's directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parameter schema file (TOML) instead of the built-in table,
    /// relative to the working directory
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Check that generated files are up to date; write nothing
    #[arg(long)]
    check: bool,

    /// Print the parameter table and exit
    #[arg(long)]
    list: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match cli.verbose {
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(cli.verbose >= 2).with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig, GenerateError> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            GeneratorConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => GeneratorConfig::default(),
    };
    if let Some(schema) = &cli.schema {
        config = config.with_schema(schema);
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<ExitCode, GenerateError> {
    let generator = Generator::from_config(load_config(cli)?)?;

    if cli.list {
        print_schema(generator.schema());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.check {
        let report = generator.check()?;
        let mut stale = false;
        for artifact in report.stale() {
            eprintln!("{} is out of date", artifact.output.display());
            stale = true;
        }
        return Ok(if stale {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let report = generator.run()?;
    for artifact in &report.artifacts {
        println!(
            "{} -> {} ({} anchor{})",
            artifact.name,
            artifact.output.display(),
            artifact.anchors.len(),
            if artifact.anchors.len() == 1 { "" } else { "s" }
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn print_schema(schema: &ParameterSchema) {
    for def in schema {
        println!(
            "{:<22} {:<8} {:<22} {}",
            def.key, def.value_type, def.symbol_name, def.default_literal
        );
        if !def.description.is_empty() {
            println!("    {}", def.description);
        }
    }
}
