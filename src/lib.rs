//! Ace Planner
//!
//! Headless student planner: an animated pinch drawer, task and schedule
//! screens, and a stack navigator, driven by a tokio event loop.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use ace_planner::{app_state::ShellEvent, load_config, start};
//!
//! let config = load_config(None)?;
//! let handle = start(&config);
//! handle.send(ShellEvent::Pinch { pointer_count: 2, scale: 0.8 });
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

pub use app_core;
pub use app_state;
pub use app_ui;

use app_state::{spawn_shell, AppConfig, AppShell, ShellHandle};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `filter` when set. Calling this twice is harmless.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

/// Read configuration from `path`, or use the defaults when there is none
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    AppConfig::from_json(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Spawn a shell for `config` on the current tokio runtime
pub fn start(config: &AppConfig) -> ShellHandle {
    spawn_shell(AppShell::new(config), config.frame_interval())
}
