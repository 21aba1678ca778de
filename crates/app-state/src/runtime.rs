//! Shell runtime
//!
//! Runs an [`AppShell`] on a tokio task. Events arrive over an unbounded
//! channel and are applied in arrival order; a fixed interval ticks the
//! animations. After every step the latest [`DrawerFrame`] is published on a
//! watch channel. The task ends once every event sender is dropped.

use std::time::Duration;

use app_ui::DrawerFrame;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::shell::{AppShell, ShellEvent};

/// Handle to a running shell
#[derive(Debug)]
pub struct ShellHandle {
    events: mpsc::UnboundedSender<ShellEvent>,
    frames: watch::Receiver<DrawerFrame>,
    task: JoinHandle<AppShell>,
}

impl ShellHandle {
    /// Queue an event; returns false once the shell has stopped
    pub fn send(&self, event: ShellEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Another sender for the same shell
    pub fn sender(&self) -> mpsc::UnboundedSender<ShellEvent> {
        self.events.clone()
    }

    /// Subscribe to frame updates
    pub fn frames(&self) -> watch::Receiver<DrawerFrame> {
        self.frames.clone()
    }

    /// Most recently published frame
    pub fn frame(&self) -> DrawerFrame {
        self.frames.borrow().clone()
    }

    /// Stop accepting events and wait for the shell to drain.
    ///
    /// Returns the final shell state, or `None` if the task panicked. Other
    /// senders obtained through [`sender`](Self::sender) keep the shell alive
    /// until they are dropped too.
    pub async fn shutdown(self) -> Option<AppShell> {
        let ShellHandle { events, task, .. } = self;
        drop(events);
        match task.await {
            Ok(shell) => Some(shell),
            Err(e) => {
                error!(error = %e, "Shell task failed");
                None
            }
        }
    }
}

/// Run `shell` on a new tokio task
pub fn spawn_shell(shell: AppShell, frame_interval: Duration) -> ShellHandle {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (frames_tx, frames_rx) = watch::channel(shell.frame());

    let task = tokio::spawn(run_shell(shell, events_rx, frames_tx, frame_interval));

    ShellHandle {
        events: events_tx,
        frames: frames_rx,
        task,
    }
}

/// Drive `shell` until `events` closes; returns the final state
pub async fn run_shell(
    mut shell: AppShell,
    mut events: mpsc::UnboundedReceiver<ShellEvent>,
    frames: watch::Sender<DrawerFrame>,
    frame_interval: Duration,
) -> AppShell {
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                shell.handle(event);
            }
            now = ticker.tick() => {
                let delta = now.saturating_duration_since(last_tick);
                last_tick = now;
                if let Some(phase) = shell.tick(delta) {
                    debug!(?phase, "Drawer settled");
                }
            }
        }

        let next = shell.frame();
        frames.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    debug!("Shell event channel closed");
    shell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use app_ui::{DrawerPhase, Route};

    fn spawn() -> ShellHandle {
        let config = AppConfig::default();
        spawn_shell(AppShell::new(&config), config.frame_interval())
    }

    #[tokio::test(start_paused = true)]
    async fn test_pinch_opens_over_time() {
        let handle = spawn();
        assert_eq!(handle.frame().phase, DrawerPhase::Closed);
        assert!(!handle.frame().visible);

        assert!(handle.send(ShellEvent::Pinch {
            pointer_count: 2,
            scale: 0.8,
        }));
        tokio::time::sleep(Duration::from_millis(50)).await;
        let frame = handle.frame();
        assert_eq!(frame.phase, DrawerPhase::Opening);
        assert!(frame.visible);
        assert!(frame.translate_x < 0.0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        let frame = handle.frame();
        assert_eq!(frame.phase, DrawerPhase::Open);
        assert_eq!(frame.translate_x, 0.0);
        assert_eq!(frame.opacity, 1.0);

        let shell = handle.shutdown().await.unwrap();
        assert!(shell.is_drawer_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_notify_subscribers() {
        let handle = spawn();
        let mut frames = handle.frames();

        handle.send(ShellEvent::SetDrawerOpen(true));
        frames.changed().await.unwrap();
        assert!(frames.borrow_and_update().visible);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_apply_in_order() {
        let handle = spawn();
        handle.send(ShellEvent::Navigate(Route::Home));
        handle.send(ShellEvent::Navigate(Route::Tasks));
        handle.send(ShellEvent::GoBack);

        let shell = handle.shutdown().await.unwrap();
        assert_eq!(shell.current_route(), Route::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_mid_open_settles_closed() {
        let handle = spawn();
        handle.send(ShellEvent::SetDrawerOpen(true));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.send(ShellEvent::SetDrawerOpen(false));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(handle.frame().phase, DrawerPhase::Closing);

        tokio::time::sleep(Duration::from_millis(500)).await;
        let frame = handle.frame();
        assert_eq!(frame.phase, DrawerPhase::Closed);
        assert!(frame.items.is_empty());

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_extra_sender_keeps_shell_alive() {
        let handle = spawn();
        let sender = handle.sender();
        let frames = handle.frames();
        let join = tokio::spawn(handle.shutdown());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!join.is_finished());
        assert!(sender.send(ShellEvent::SetDrawerOpen(true)).is_ok());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(frames.borrow().phase, DrawerPhase::Open);

        drop(sender);
        let shell = join.await.unwrap().unwrap();
        assert_eq!(shell.drawer_phase(), DrawerPhase::Open);
    }
}
