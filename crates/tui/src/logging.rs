use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

// The terminal is in raw mode while running, so logs go to a file.
pub fn init(cfg: &AppConfig) -> Result<Option<WorkerGuard>> {
    let Some(dir) = cfg.data_dir.as_ref() else {
        return Ok(None);
    };
    fs::create_dir_all(dir).with_context(|| format!("create log dir: {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(dir, "cmdbox.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_new(&cfg.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;
    Ok(Some(guard))
}
