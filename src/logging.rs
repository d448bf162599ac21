// File: ./src/logging.rs
//! Logger setup for the command-line binary.
//!
//! Messages at `level` go to stderr. The log file in the cache directory
//! always records at least `Info`, so imports leave a trace even when the
//! terminal is quiet.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;

pub fn init_logging(ctx: &dyn AppContext, level: LevelFilter) -> Result<()> {
    let path = ctx.get_log_file_path()?;
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file '{}'", path.display()))?;

    let log_config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Debug)
        .set_time_format_rfc3339()
        .build();

    CombinedLogger::init(vec![
        TermLogger::new(
            level,
            log_config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level.max(LevelFilter::Info), log_config, file),
    ])
    .context("Logger was already initialized")?;

    log::debug!("Logging to {}", path.display());
    Ok(())
}
