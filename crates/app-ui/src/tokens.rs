//! Design tokens for Ace Planner
//!
//! Animation timing and easing curves, plus the drawer geometry shared by
//! every screen.

use crate::animation::CubicBezier;

// =============================================================================
// Animation Tokens
// =============================================================================

/// Animation duration tokens (in milliseconds)
pub mod duration {
    /// Normal (300ms) - dashboard slide
    pub const NORMAL: u64 = 300;
    /// Drawer open (300ms)
    pub const DRAWER_OPEN: u64 = 300;
    /// Drawer close (350ms)
    pub const DRAWER_CLOSE: u64 = 350;
}

/// Easing curves
pub mod easing {
    use super::CubicBezier;

    /// Ease in
    pub const EASE_IN: CubicBezier = CubicBezier::new(0.4, 0.0, 1.0, 1.0);
    /// Ease out
    pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.2, 1.0);
    /// Ease in out (also the drawer close curve)
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);
    /// Drawer open curve
    pub const DRAWER_OPEN: CubicBezier = CubicBezier::new(0.4, 0.0, 0.5, 1.0);
    /// Drawer close curve
    pub const DRAWER_CLOSE: CubicBezier = EASE_IN_OUT;
}

// =============================================================================
// Drawer Geometry
// =============================================================================

/// Drawer geometry
pub mod drawer {
    /// Scale of the drawer panel when fully closed
    pub const CLOSED_SCALE: f64 = 0.7;
    /// Scale of the drawer panel when fully open
    pub const OPEN_SCALE: f64 = 1.0;
    /// Fallback screen width when the host has not reported one
    pub const DEFAULT_SCREEN_WIDTH: f64 = 390.0;
    /// Two-finger separation ratio under which a pinch counts as "in"
    pub const PINCH_THRESHOLD: f64 = 0.9;
}
