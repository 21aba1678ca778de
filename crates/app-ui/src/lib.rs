//! User interface for Ace Planner
//!
//! This crate provides the headless UI layer: the animated navigation
//! drawer, navigation, component models, theming and design tokens.
//!
//! # Modules
//!
//! - [`animation`] - Eased tweens over named channels
//! - [`gesture`] - Pinch and close-tap recognition
//! - [`drawer`] - Drawer state machine and view binding
//! - [`navigation`] - Routes, stack and tab navigation
//! - [`components`] - Checkbox, tab bar, dialogs, empty states
//! - [`theme`] - Colors and themes
//! - [`tokens`] - Design tokens (durations, easing, drawer geometry)
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use app_ui::drawer::{Drawer, DrawerConfig, DrawerPhase, DrawerProps};
//!
//! let mut drawer = Drawer::new(DrawerProps::new(false), DrawerConfig::default());
//! drawer.handle_pinch(2, 0.8);
//! assert_eq!(drawer.phase(), DrawerPhase::Opening);
//!
//! while drawer.tick(Duration::from_millis(16)).is_none() {}
//! assert_eq!(drawer.phase(), DrawerPhase::Open);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod animation;
pub mod components;
pub mod drawer;
pub mod gesture;
pub mod navigation;
pub mod theme;
pub mod tokens;

// Re-export commonly used types
pub use animation::{
    AnimationDriver, AnimationEvent, AnimationHandle, CubicBezier, Easing, ValueRange,
};

pub use drawer::{
    Drawer, DrawerCallback, DrawerConfig, DrawerFrame, DrawerIntent, DrawerMachine,
    DrawerMenuItem, DrawerPhase, DrawerProps, Transition,
};

pub use gesture::{
    GestureConfig, GestureEvent, GestureKind, GestureRecognizer, PointerEvent, PointerPhase,
};

pub use navigation::{
    NavigationAnimation, NavigationDispatch, NavigationStack, NavigationState, NavigationTab,
    PendingNavigation, Route, StackEntry,
};

pub use components::{
    Checkbox, ConfirmPrompt, Dialog, DialogAction, DialogButton, DialogController, EmptyState,
    TabBar, TabBarItem,
};

pub use theme::{get_theme, Theme, ThemeName};

pub use tokens::{duration, easing};
