//! Gesture recognition for the drawer
//!
//! Turns a raw pointer stream (or pre-computed platform pinch samples) into
//! drawer intents. A two-finger pinch-in raises [`GestureKind::PinchIn`]; the
//! drawer's close control raises [`GestureKind::TapClose`]. Taps anywhere
//! else never close the drawer.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::tokens;

// =============================================================================
// Pointer Input
// =============================================================================

/// Platform pointer identifier
pub type PointerId = u64;

/// Lifecycle phase of a single pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Contact landed
    Down,
    /// Contact moved
    Move,
    /// Contact lifted
    Up,
    /// Platform cancelled the contact
    Cancel,
}

/// One raw pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Pointer identifier
    pub id: PointerId,
    /// Phase
    pub phase: PointerPhase,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl PointerEvent {
    /// A contact landing
    pub fn down(id: PointerId, x: f64, y: f64) -> Self {
        Self { id, phase: PointerPhase::Down, x, y }
    }

    /// A contact moving
    pub fn moved(id: PointerId, x: f64, y: f64) -> Self {
        Self { id, phase: PointerPhase::Move, x, y }
    }

    /// A contact lifting
    pub fn up(id: PointerId, x: f64, y: f64) -> Self {
        Self { id, phase: PointerPhase::Up, x, y }
    }

    /// A contact cancelled by the platform
    pub fn cancel(id: PointerId) -> Self {
        Self { id, phase: PointerPhase::Cancel, x: 0.0, y: 0.0 }
    }
}

// =============================================================================
// Gesture Output
// =============================================================================

/// Recognized gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Two fingers moved toward each other
    PinchIn,
    /// The close control was tapped
    TapClose,
}

/// A recognized gesture, consumed once by the drawer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// What was recognized
    pub kind: GestureKind,
    /// Contacts down when it was recognized
    pub pointer_count: usize,
    /// Current separation over starting separation (1.0 for taps)
    pub scale_delta: f64,
}

impl GestureEvent {
    /// A pinch-in with the given scale
    pub fn pinch_in(pointer_count: usize, scale_delta: f64) -> Self {
        Self {
            kind: GestureKind::PinchIn,
            pointer_count,
            scale_delta,
        }
    }

    /// A tap on the close control
    pub fn tap_close() -> Self {
        Self {
            kind: GestureKind::TapClose,
            pointer_count: 1,
            scale_delta: 1.0,
        }
    }
}

// =============================================================================
// Recognizer
// =============================================================================

/// Recognizer tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Separation ratio (< 1.0) under which a pinch counts as "in"
    pub pinch_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: tokens::drawer::PINCH_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Contact {
    id: PointerId,
    x: f64,
    y: f64,
}

/// Recognizes pinch-in and close-tap gestures
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    contacts: Vec<Contact>,
    /// Separation when the current two-finger gesture began
    start_separation: Option<f64>,
    /// Set once the current two-finger gesture has produced a pinch
    latched: bool,
}

impl GestureRecognizer {
    /// Create a recognizer with the given configuration
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Active configuration
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Contacts currently down
    pub fn pointer_count(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the current gesture already produced a pinch
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    fn separation(&self) -> Option<f64> {
        match self.contacts.as_slice() {
            [a, b] => {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                (distance > f64::EPSILON).then_some(distance)
            }
            _ => None,
        }
    }

    fn qualifies(&self, pointer_count: usize, scale: f64, drawer_open: bool) -> bool {
        pointer_count == 2
            && !drawer_open
            && !self.latched
            && scale.is_finite()
            && scale < self.config.pinch_threshold
    }

    /// Feed one raw pointer event
    pub fn on_pointer(&mut self, event: PointerEvent, drawer_open: bool) -> Option<GestureEvent> {
        match event.phase {
            PointerPhase::Down => {
                match self.contacts.iter_mut().find(|c| c.id == event.id) {
                    Some(contact) => {
                        contact.x = event.x;
                        contact.y = event.y;
                    }
                    None => self.contacts.push(Contact {
                        id: event.id,
                        x: event.x,
                        y: event.y,
                    }),
                }
                self.start_separation = self.separation();
                None
            }
            PointerPhase::Move => {
                let contact = self.contacts.iter_mut().find(|c| c.id == event.id)?;
                contact.x = event.x;
                contact.y = event.y;

                let start = self.start_separation?;
                let current = self.separation()?;
                let scale = current / start;
                trace!(scale, "Pinch sample");

                if self.qualifies(self.contacts.len(), scale, drawer_open) {
                    self.latched = true;
                    debug!(scale, "Pinch-in recognized");
                    Some(GestureEvent::pinch_in(self.contacts.len(), scale))
                } else {
                    None
                }
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                self.contacts.retain(|c| c.id != event.id);
                // Returning to exactly two contacts starts a fresh baseline
                self.start_separation = self.separation();
                if self.contacts.len() < 2 {
                    self.latched = false;
                }
                None
            }
        }
    }

    /// Feed a platform-computed pinch sample
    pub fn on_pinch_sample(
        &mut self,
        pointer_count: usize,
        scale: f64,
        drawer_open: bool,
    ) -> Option<GestureEvent> {
        if pointer_count < 2 {
            self.latched = false;
            return None;
        }
        if self.qualifies(pointer_count, scale, drawer_open) {
            self.latched = true;
            debug!(scale, "Pinch-in recognized from platform sample");
            Some(GestureEvent::pinch_in(pointer_count, scale))
        } else {
            None
        }
    }

    /// The platform reported the end of a pinch
    pub fn on_pinch_end(&mut self) {
        self.latched = false;
    }

    /// The close control was tapped
    pub fn on_close_control(&mut self) -> GestureEvent {
        GestureEvent::tap_close()
    }

    /// Forget all contacts
    pub fn reset(&mut self) {
        self.contacts.clear();
        self.start_separation = None;
        self.latched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinch(recognizer: &mut GestureRecognizer, to_gap: f64, open: bool) -> Option<GestureEvent> {
        recognizer.on_pointer(PointerEvent::down(1, 0.0, 0.0), open);
        recognizer.on_pointer(PointerEvent::down(2, 100.0, 0.0), open);
        recognizer.on_pointer(PointerEvent::moved(2, to_gap, 0.0), open)
    }

    #[test]
    fn test_pinch_in_recognized() {
        let mut recognizer = GestureRecognizer::default();
        let event = pinch(&mut recognizer, 80.0, false).unwrap();
        assert_eq!(event.kind, GestureKind::PinchIn);
        assert_eq!(event.pointer_count, 2);
        assert!((event.scale_delta - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_small_pinch_below_threshold_ignored() {
        let mut recognizer = GestureRecognizer::default();
        assert!(pinch(&mut recognizer, 95.0, false).is_none());
    }

    #[test]
    fn test_pinch_out_ignored() {
        let mut recognizer = GestureRecognizer::default();
        assert!(pinch(&mut recognizer, 150.0, false).is_none());
    }

    #[test]
    fn test_pinch_ignored_while_open() {
        let mut recognizer = GestureRecognizer::default();
        assert!(pinch(&mut recognizer, 50.0, true).is_none());
    }

    #[test]
    fn test_pinch_fires_once_per_gesture() {
        let mut recognizer = GestureRecognizer::default();
        assert!(pinch(&mut recognizer, 80.0, false).is_some());
        assert!(recognizer
            .on_pointer(PointerEvent::moved(2, 60.0, 0.0), false)
            .is_none());

        recognizer.on_pointer(PointerEvent::up(2, 60.0, 0.0), false);
        recognizer.on_pointer(PointerEvent::up(1, 0.0, 0.0), false);
        assert!(!recognizer.is_latched());
        assert!(pinch(&mut recognizer, 70.0, false).is_some());
    }

    #[test]
    fn test_three_fingers_do_not_pinch() {
        let mut recognizer = GestureRecognizer::default();
        recognizer.on_pointer(PointerEvent::down(1, 0.0, 0.0), false);
        recognizer.on_pointer(PointerEvent::down(2, 100.0, 0.0), false);
        recognizer.on_pointer(PointerEvent::down(3, 50.0, 50.0), false);
        assert!(recognizer
            .on_pointer(PointerEvent::moved(2, 10.0, 0.0), false)
            .is_none());
        assert_eq!(recognizer.pointer_count(), 3);
    }

    #[test]
    fn test_single_finger_move_ignored() {
        let mut recognizer = GestureRecognizer::default();
        recognizer.on_pointer(PointerEvent::down(1, 0.0, 0.0), false);
        assert!(recognizer
            .on_pointer(PointerEvent::moved(1, 10.0, 0.0), false)
            .is_none());
    }

    #[test]
    fn test_platform_samples() {
        let mut recognizer = GestureRecognizer::default();
        assert!(recognizer.on_pinch_sample(1, 0.5, false).is_none());
        assert!(recognizer.on_pinch_sample(2, 0.95, false).is_none());
        assert!(recognizer.on_pinch_sample(2, 0.8, true).is_none());
        assert!(recognizer.on_pinch_sample(2, f64::NAN, false).is_none());

        let event = recognizer.on_pinch_sample(2, 0.8, false).unwrap();
        assert_eq!(event.kind, GestureKind::PinchIn);
        assert!(recognizer.on_pinch_sample(2, 0.7, false).is_none());

        recognizer.on_pinch_end();
        assert!(recognizer.on_pinch_sample(2, 0.7, false).is_some());
    }

    #[test]
    fn test_close_control_tap() {
        let mut recognizer = GestureRecognizer::default();
        assert_eq!(recognizer.on_close_control().kind, GestureKind::TapClose);
    }

    #[test]
    fn test_custom_threshold() {
        let mut recognizer = GestureRecognizer::new(GestureConfig {
            pinch_threshold: 0.5,
        });
        assert!(recognizer.on_pinch_sample(2, 0.6, false).is_none());
        assert!(recognizer.on_pinch_sample(2, 0.4, false).is_some());
    }

    #[test]
    fn test_reset() {
        let mut recognizer = GestureRecognizer::default();
        pinch(&mut recognizer, 80.0, false);
        recognizer.reset();
        assert_eq!(recognizer.pointer_count(), 0);
        assert!(!recognizer.is_latched());
    }
}
