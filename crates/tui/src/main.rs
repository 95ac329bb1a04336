mod app;
mod config;
mod events;
mod logging;
mod persist;
mod strings;
mod terminal;
mod theme;
mod ui;

use anyhow::Result;
use terminal::TerminalGuard;
use tracing::{info, warn};

fn main() -> Result<()> {
    let (cfg, config_warnings) = config::AppConfig::from_env_and_file();
    let _log_guard = logging::init(&cfg)?;
    for w in &config_warnings {
        warn!(target: "tui", "config: {}", w);
    }
    info!(target: "tui", "starting, data_dir={:?}", cfg.data_dir);
    let mut app = app::App::new(cfg);
    let mut term = TerminalGuard::new()?;
    events::run(&mut term.terminal, &mut app)
}
