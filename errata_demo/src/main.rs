//! # errata demo
//!
//! Small programs showing how annotated chains are built, echoed and
//! dispatched.
//!
//! # Usage
//!
//! ```bash
//! # Wrapped failures echoed from worker threads
//! errata_demo basic
//!
//! # Warn vs error depending on the failure
//! errata_demo warn
//!
//! # Recovered panic reported as a call stack
//! errata_demo panic
//!
//! # Callbacks per severity, including one that panics
//! errata_demo --config errata_demo/config/demo.toml callbacks
//! ```

#![deny(warnings)]

mod demos;

use clap::{Parser, Subcommand};
use errata::{ConfigError, ConfigLoader, LogLevel, ReporterConfig, global};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// errata demo programs
#[derive(Parser, Debug)]
#[command(name = "errata_demo")]
#[command(version)]
#[command(about = "Demo programs for annotated error chains")]
struct Args {
    #[command(subcommand)]
    demo: Demo,

    /// Path to demo configuration (log level + reporter settings)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Demo {
    /// Echo wrapped failures from several worker threads
    Basic,
    /// Echo odd inputs as warnings and large ones as errors
    Warn,
    /// Recover a panic and echo it as a stack report
    Panic,
    /// Register callbacks for every severity and drive them
    Callbacks,
}

/// Demo configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DemoConfig {
    #[serde(default)]
    log_level: LogLevel,

    #[serde(default)]
    reporter: ReporterConfig,
}

/// Version stamped on reports when no config file is given.
const APP_VERSION: &str = "v1.2.3";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("demo failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Tracing comes up before the config result is checked so a bad file is
    // still reported.
    let loaded = load_config(args.config.as_deref());
    let log_level = loaded.as_ref().map(|c| c.log_level).unwrap_or_default();
    setup_tracing(&args, log_level);
    let config = loaded?;

    info!(
        "errata {} demo, reporting as {}",
        errata::BASE_VERSION,
        config.reporter.version
    );

    global::configure(config.reporter);

    match args.demo {
        Demo::Basic => demos::basic(),
        Demo::Warn => demos::warn(),
        Demo::Panic => demos::panic(),
        Demo::Callbacks => demos::callbacks(),
    }

    info!("done");
    Ok(())
}

/// Load and validate the config file, or fall back to built-in defaults.
fn load_config(path: Option<&Path>) -> Result<DemoConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = DemoConfig::load(path)?;
            config.reporter.validate()?;
            Ok(config)
        }
        None => Ok(DemoConfig {
            reporter: ReporterConfig {
                version: APP_VERSION.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }),
    }
}

/// Setup tracing subscriber based on CLI arguments and configured level.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let filter = if args.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_level.as_directive()))
    };

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.reporter.version, APP_VERSION);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/demo.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound));
    }

    #[test]
    fn shipped_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/demo.toml");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.reporter.version, "v1.2.3");
    }
}
