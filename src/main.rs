//! Scripted walk through the planner: open the drawer with a pinch, pick
//! "Tasks" from the menu, delete a task behind the confirmation dialog and
//! print what the shell ended up with.

use std::path::PathBuf;
use std::time::Duration;

use ace_planner::app_state::{ScreenEvent, ShellEvent};
use ace_planner::app_ui::{DialogAction, Route};
use ace_planner::{init_tracing, load_config, start};
use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    init_tracing(&config.log_filter);

    let handle = start(&config);
    let longest = config
        .drawer
        .open_duration_ms
        .max(config.drawer.close_duration_ms);
    let settle = Duration::from_millis(longest + 50);

    handle.send(ShellEvent::Navigate(Route::Home));
    handle.send(ShellEvent::Pinch {
        pointer_count: 2,
        scale: 0.8,
    });
    handle.send(ShellEvent::PinchEnd);
    tokio::time::sleep(settle).await;
    info!(phase = ?handle.frame().phase, "Drawer after pinch");

    let tasks = handle
        .frame()
        .items
        .iter()
        .position(|item| item.route == Route::Tasks)
        .context("Drawer menu has no Tasks entry")?;
    handle.send(ShellEvent::SelectMenu(tasks));
    tokio::time::sleep(settle).await;

    handle.send(ShellEvent::Screen(ScreenEvent::RequestDelete {
        task_id: "Wash".to_string(),
    }));
    handle.send(ShellEvent::Dialog(DialogAction::Confirm));

    let shell = handle.shutdown().await.context("Shell task failed")?;
    info!(
        route = shell.current_route().key(),
        phase = ?shell.drawer_phase(),
        "Shell stopped"
    );
    println!("{}", serde_json::to_string_pretty(shell.screen())?);
    Ok(())
}
