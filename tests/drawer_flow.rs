//! Drawer integration tests
//!
//! End-to-end checks of the pinch drawer: gestures in, phases and frames out,
//! both on the synchronous widget and through the tokio shell runtime.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ace_planner::app_state::{AppConfig, ShellEvent};
use ace_planner::app_ui::{
    Drawer, DrawerConfig, DrawerPhase, DrawerProps, NavigationState, PointerEvent, Route,
    Transition,
};
use ace_planner::start;

const FRAME: Duration = Duration::from_millis(16);

fn run_frames(drawer: &mut Drawer, frames: usize) -> Vec<DrawerPhase> {
    (0..frames).filter_map(|_| drawer.tick(FRAME)).collect()
}

fn counting_drawer(is_open: bool) -> (Drawer, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let opened = Arc::new(AtomicUsize::new(0));
    let closed = Arc::new(AtomicUsize::new(0));
    let (o, c) = (Arc::clone(&opened), Arc::clone(&closed));
    let props = DrawerProps::new(is_open)
        .with_on_open(move || {
            o.fetch_add(1, Ordering::SeqCst);
        })
        .with_on_close(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
    (Drawer::new(props, DrawerConfig::default()), opened, closed)
}

/// Closed drawer, two-finger pinch to 0.8: Opening then Open; a second pinch
/// while open changes nothing.
#[test]
fn test_pinch_opens_and_second_pinch_is_ignored() {
    let (mut drawer, opened, _) = counting_drawer(false);
    assert_eq!(drawer.phase(), DrawerPhase::Closed);

    let transition = drawer.handle_pinch(2, 0.8);
    assert_eq!(transition, Transition::Started(DrawerPhase::Opening));
    assert_eq!(opened.load(Ordering::SeqCst), 1);

    assert_eq!(run_frames(&mut drawer, 30), vec![DrawerPhase::Open]);
    assert_eq!(drawer.phase(), DrawerPhase::Open);

    drawer.end_pinch();
    assert_eq!(drawer.handle_pinch(2, 0.5), Transition::Ignored);
    assert_eq!(drawer.phase(), DrawerPhase::Open);
    assert_eq!(opened.load(Ordering::SeqCst), 1);
}

#[test]
fn test_raw_pointer_pinch_opens() {
    let (mut drawer, opened, _) = counting_drawer(false);
    drawer.handle_pointer(PointerEvent::down(1, 100.0, 400.0));
    drawer.handle_pointer(PointerEvent::down(2, 300.0, 400.0));
    assert_eq!(
        drawer.handle_pointer(PointerEvent::moved(2, 280.0, 400.0)),
        Transition::Ignored
    );

    let transition = drawer.handle_pointer(PointerEvent::moved(2, 200.0, 400.0));
    assert!(transition.changed());
    assert_eq!(drawer.phase(), DrawerPhase::Opening);
    assert_eq!(opened.load(Ordering::SeqCst), 1);
}

#[test]
fn test_single_finger_never_opens() {
    let (mut drawer, _, _) = counting_drawer(false);
    assert_eq!(drawer.handle_pinch(1, 0.1), Transition::Ignored);
    assert_eq!(drawer.handle_pinch(3, 0.1), Transition::Ignored);
    assert_eq!(drawer.phase(), DrawerPhase::Closed);
}

/// Closing mid-open heads for the closed values without ever reaching the
/// open ones first.
#[test]
fn test_close_mid_open_never_reaches_open() {
    let (mut drawer, _, closed) = counting_drawer(false);
    drawer.handle_pinch(2, 0.8);
    run_frames(&mut drawer, 6);
    let peak = drawer.frame().opacity;
    assert!(peak > 0.0 && peak < 1.0);

    assert!(drawer.press_close().changed());
    assert_eq!(closed.load(Ordering::SeqCst), 1);

    let mut last = peak;
    let mut settled = Vec::new();
    for _ in 0..40 {
        if let Some(phase) = drawer.tick(FRAME) {
            settled.push(phase);
        }
        let frame = drawer.frame();
        assert!(frame.opacity <= last + 1e-9);
        assert!(frame.opacity < 1.0);
        last = frame.opacity;
    }
    assert_eq!(settled, vec![DrawerPhase::Closed]);
    assert_eq!(drawer.frame().opacity, 0.0);
}

/// The settled phase always agrees with the latest intent.
#[test]
fn test_settled_phase_matches_latest_intent() {
    let (mut drawer, _, _) = counting_drawer(false);
    let intents = [true, false, true, true, false, true];
    for open in intents {
        if open {
            drawer.open();
        } else {
            drawer.close();
        }
        run_frames(&mut drawer, 3);
    }
    let settled = run_frames(&mut drawer, 40);
    assert_eq!(settled, vec![DrawerPhase::Open]);
    assert!(drawer.machine().is_open());
}

#[test]
fn test_frame_values_stay_in_range() {
    let (mut drawer, _, _) = counting_drawer(false);
    let width = drawer.machine().config().screen_width;
    drawer.open();
    for step in 0..60 {
        if step == 10 {
            drawer.close();
        }
        if step == 20 {
            drawer.open();
        }
        drawer.tick(FRAME);
        let frame = drawer.frame();
        assert!((0.0..=1.0).contains(&frame.opacity));
        assert!((0.7..=1.0).contains(&frame.scale));
        assert!((-width..=0.0).contains(&frame.translate_x));
    }
}

#[test]
fn test_props_drive_drawer_without_callbacks() {
    let (mut drawer, opened, closed) = counting_drawer(false);
    assert!(drawer.set_props(DrawerProps::new(true)).changed());
    run_frames(&mut drawer, 30);
    assert_eq!(drawer.phase(), DrawerPhase::Open);
    assert_eq!(drawer.set_props(DrawerProps::new(true)), Transition::Ignored);
    assert_eq!(opened.load(Ordering::SeqCst), 0);
    assert_eq!(closed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_menu_hidden_until_drawer_moves() {
    let (mut drawer, _, _) = counting_drawer(false);
    assert!(drawer.frame().items.is_empty());
    assert!(!drawer.frame().blocks_content);

    drawer.open();
    let frame = drawer.frame();
    assert_eq!(frame.items.len(), drawer.items().len());
    assert!(frame.blocks_content);
}

#[test]
fn test_select_dispatches_then_closes() {
    let (mut drawer, _, closed) = counting_drawer(true);
    let mut navigation = NavigationState::new();

    let index = drawer
        .items()
        .iter()
        .position(|item| item.route == Route::TimeTable)
        .unwrap();
    assert!(drawer.select(index, &mut navigation));
    assert_eq!(navigation.current_route(), Route::TimeTable);
    assert_eq!(drawer.phase(), DrawerPhase::Closing);
    assert_eq!(closed.load(Ordering::SeqCst), 1);

    // Closing drawer ignores further selections
    assert!(!drawer.select(0, &mut navigation));
}

#[tokio::test(start_paused = true)]
async fn test_shell_runtime_pinch_and_close() {
    let config = AppConfig::default();
    let handle = start(&config);

    handle.send(ShellEvent::Pinch {
        pointer_count: 2,
        scale: 0.8,
    });
    handle.send(ShellEvent::PinchEnd);
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(handle.frame().phase, DrawerPhase::Open);

    handle.send(ShellEvent::CloseDrawer);
    tokio::time::sleep(Duration::from_millis(100)).await;
    let frame = handle.frame();
    assert_eq!(frame.phase, DrawerPhase::Closing);
    assert!(frame.visible);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(handle.frame().phase, DrawerPhase::Closed);

    let shell = handle.shutdown().await.unwrap();
    assert!(!shell.is_drawer_open());
}
