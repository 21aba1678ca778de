//! Application shell for Ace Planner
//!
//! This crate wires the drawer, navigation and screen models together:
//! configuration, the [`AppShell`] that owns all transient state, and the
//! tokio task that feeds it events and animation ticks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod runtime;
pub mod shell;

pub use config::{AppConfig, ConfigError, DrawerSettings};
pub use runtime::{spawn_shell, ShellHandle};
pub use shell::{AppShell, Screen, ScreenEvent, ShellEvent};
