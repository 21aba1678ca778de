//! Drawer view binding
//!
//! [`Drawer`] is the controlled component: the host passes [`DrawerProps`],
//! feeds pointer input and frame ticks, and renders the [`DrawerFrame`] it
//! gets back. Changes the drawer makes on its own (pinch, close control,
//! menu selection) are reported through the `on_open`/`on_close` callbacks
//! so the host can keep its `is_open` prop in sync.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::machine::{DrawerConfig, DrawerIntent, DrawerMachine, DrawerPhase, Transition};
use crate::gesture::{GestureConfig, GestureEvent, GestureKind, GestureRecognizer, PointerEvent};
use crate::navigation::{NavigationDispatch, Route};

// =============================================================================
// Props
// =============================================================================

/// Callback invoked when the drawer changes state on its own
pub type DrawerCallback = Arc<dyn Fn() + Send + Sync>;

/// Inputs supplied by the host
#[derive(Clone, Default)]
pub struct DrawerProps {
    /// Desired open state
    pub is_open: bool,
    /// Called when a gesture opens the drawer
    pub on_open: Option<DrawerCallback>,
    /// Called when the close control or a menu selection closes the drawer
    pub on_close: Option<DrawerCallback>,
}

impl DrawerProps {
    /// Props with no callbacks
    pub fn new(is_open: bool) -> Self {
        Self {
            is_open,
            ..Default::default()
        }
    }

    /// Set the open callback
    pub fn with_on_open(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_open = Some(Arc::new(callback));
        self
    }

    /// Set the close callback
    pub fn with_on_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for DrawerProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerProps")
            .field("is_open", &self.is_open)
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

// =============================================================================
// Menu
// =============================================================================

/// One entry in the drawer menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawerMenuItem {
    /// Visible label
    pub label: String,
    /// Icon name
    pub icon: String,
    /// Destination
    pub route: Route,
}

impl DrawerMenuItem {
    /// Create a menu item
    pub fn new(label: impl Into<String>, icon: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            route,
        }
    }

    /// The standard menu
    pub fn defaults() -> Vec<DrawerMenuItem> {
        vec![
            Self::new("Home", "home", Route::Home),
            Self::new("Schedules", "calendar", Route::TimeTable),
            Self::new("Tasks", "check-square", Route::Tasks),
            Self::new("CWA Calculator", "grid", Route::CwaCalculator),
            Self::new("Chat ACE", "message-circle", Route::Chat),
            Self::new("Notification", "bell", Route::Notifications),
            Self::new("Profile", "user", Route::Profile),
            Self::new("Log Out", "log-out", Route::LogOut),
        ]
    }
}

// =============================================================================
// Frame
// =============================================================================

/// Everything needed to render the drawer for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerFrame {
    /// Current phase
    pub phase: DrawerPhase,
    /// Whether the drawer is rendered
    pub visible: bool,
    /// Horizontal offset
    pub translate_x: f64,
    /// Panel scale
    pub scale: f64,
    /// Panel opacity
    pub opacity: f64,
    /// Whether the content underneath is inert
    pub blocks_content: bool,
    /// Menu entries; empty while closed
    pub items: Vec<DrawerMenuItem>,
}

impl Default for DrawerFrame {
    fn default() -> Self {
        let config = DrawerConfig::default();
        Self {
            phase: DrawerPhase::Closed,
            visible: false,
            translate_x: -config.screen_width,
            scale: config.closed_scale,
            opacity: 0.0,
            blocks_content: false,
            items: Vec::new(),
        }
    }
}

// =============================================================================
// Drawer
// =============================================================================

/// Pinch-to-open navigation drawer
pub struct Drawer {
    props: DrawerProps,
    machine: DrawerMachine,
    recognizer: GestureRecognizer,
    items: Vec<DrawerMenuItem>,
}

impl fmt::Debug for Drawer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawer")
            .field("props", &self.props)
            .field("phase", &self.machine.phase())
            .field("items", &self.items.len())
            .finish()
    }
}

impl Drawer {
    /// Mount a drawer
    pub fn new(props: DrawerProps, config: DrawerConfig) -> Self {
        let recognizer = GestureRecognizer::new(GestureConfig {
            pinch_threshold: config.pinch_threshold,
        });
        Self {
            machine: DrawerMachine::new(config, props.is_open),
            props,
            recognizer,
            items: DrawerMenuItem::defaults(),
        }
    }

    /// Replace the menu
    pub fn with_menu(mut self, items: Vec<DrawerMenuItem>) -> Self {
        self.items = items;
        self
    }

    /// Current phase
    pub fn phase(&self) -> DrawerPhase {
        self.machine.phase()
    }

    /// Underlying state machine
    pub fn machine(&self) -> &DrawerMachine {
        &self.machine
    }

    /// Menu entries
    pub fn items(&self) -> &[DrawerMenuItem] {
        &self.items
    }

    /// Update the screen width used for translation; false if rejected
    pub fn set_screen_width(&mut self, width: f64) -> bool {
        self.machine.set_screen_width(width)
    }

    /// Apply new props from the host; never fires callbacks
    pub fn set_props(&mut self, props: DrawerProps) -> Transition {
        let changed = props.is_open != self.props.is_open;
        self.props = props;
        if changed {
            self.request(self.props.is_open)
        } else {
            Transition::Ignored
        }
    }

    fn request(&mut self, open: bool) -> Transition {
        let intent = if open {
            DrawerIntent::Open
        } else {
            DrawerIntent::Close
        };
        self.machine.request(intent)
    }

    /// Open on the host's behalf
    pub fn open(&mut self) -> Transition {
        self.props.is_open = true;
        self.request(true)
    }

    /// Close on the host's behalf
    pub fn close(&mut self) -> Transition {
        self.props.is_open = false;
        self.request(false)
    }

    fn notify(&self, open: bool) {
        let callback = if open {
            self.props.on_open.clone()
        } else {
            self.props.on_close.clone()
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Apply a recognized gesture; changes are reported to the host
    pub fn handle_gesture(&mut self, gesture: GestureEvent) -> Transition {
        let open = match gesture.kind {
            GestureKind::PinchIn => true,
            GestureKind::TapClose => false,
        };
        let transition = self.request(open);
        if transition.changed() {
            self.props.is_open = open;
            self.notify(open);
        }
        transition
    }

    /// Feed a raw pointer event
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Transition {
        let open = self.machine.phase().target_open();
        match self.recognizer.on_pointer(event, open) {
            Some(gesture) => self.handle_gesture(gesture),
            None => Transition::Ignored,
        }
    }

    /// Feed a platform pinch sample
    pub fn handle_pinch(&mut self, pointer_count: usize, scale: f64) -> Transition {
        let open = self.machine.phase().target_open();
        match self.recognizer.on_pinch_sample(pointer_count, scale, open) {
            Some(gesture) => self.handle_gesture(gesture),
            None => Transition::Ignored,
        }
    }

    /// The platform reported the end of a pinch
    pub fn end_pinch(&mut self) {
        self.recognizer.on_pinch_end();
    }

    /// The close control was tapped
    pub fn press_close(&mut self) -> Transition {
        let gesture = self.recognizer.on_close_control();
        self.handle_gesture(gesture)
    }

    /// Select a menu entry.
    ///
    /// Only accepted while fully open. Dispatches the entry's screen key and
    /// then closes the drawer, notifying `on_close`.
    pub fn select(&mut self, index: usize, navigation: &mut dyn NavigationDispatch) -> bool {
        if self.machine.phase() != DrawerPhase::Open {
            debug!(phase = ?self.machine.phase(), "Menu selection ignored");
            return false;
        }
        let Some(item) = self.items.get(index) else {
            warn!(index, "Menu index out of range");
            return false;
        };

        debug!(label = %item.label, screen = item.route.key(), "Menu selection");
        navigation.dispatch(item.route.key());
        self.press_close();
        true
    }

    /// Advance animations; returns the stable phase reached, if any
    pub fn tick(&mut self, delta: Duration) -> Option<DrawerPhase> {
        self.machine.tick(delta)
    }

    /// Snapshot for rendering
    pub fn frame(&self) -> DrawerFrame {
        let phase = self.machine.phase();
        DrawerFrame {
            phase,
            visible: phase.is_visible(),
            translate_x: self.machine.translate_x(),
            scale: self.machine.scale(),
            opacity: self.machine.opacity(),
            blocks_content: phase.blocks_content(),
            items: if phase.is_visible() {
                self.items.clone()
            } else {
                Vec::new()
            },
        }
    }
}
