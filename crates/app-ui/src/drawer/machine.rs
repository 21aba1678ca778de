//! Drawer open/close state machine

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::animation::{AnimationDriver, AnimationHandle, Easing, ValueRange};
use crate::tokens;

// =============================================================================
// Phases & Intents
// =============================================================================

/// Drawer lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DrawerPhase {
    /// Fully closed, not rendered
    #[default]
    Closed,
    /// Animating toward open
    Opening,
    /// Fully open
    Open,
    /// Animating toward closed
    Closing,
}

impl DrawerPhase {
    /// Whether the drawer is rendered at all
    pub fn is_visible(&self) -> bool {
        !matches!(self, DrawerPhase::Closed)
    }

    /// Whether a transition is in flight
    pub fn is_animating(&self) -> bool {
        matches!(self, DrawerPhase::Opening | DrawerPhase::Closing)
    }

    /// Whether the phase is open or heading there
    pub fn target_open(&self) -> bool {
        matches!(self, DrawerPhase::Opening | DrawerPhase::Open)
    }

    /// Whether the content underneath must ignore input
    pub fn blocks_content(&self) -> bool {
        self.target_open()
    }
}

/// A request to open or close the drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerIntent {
    /// Open the drawer
    Open,
    /// Close the drawer
    Close,
}

/// Animation channels owned by the drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawerChannel {
    /// 0 = closed, 1 = open; drives translation and opacity
    Slide,
    /// Panel scale
    Scale,
}

/// Outcome of a drawer request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Already at or heading to the requested state
    Ignored,
    /// A transition started from a stable phase
    Started(DrawerPhase),
    /// An in-flight transition was turned around
    Reversed(DrawerPhase),
}

impl Transition {
    /// Whether the request changed anything
    pub fn changed(&self) -> bool {
        !matches!(self, Transition::Ignored)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Drawer timing and geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawerConfig {
    /// Width of the screen the drawer slides across
    pub screen_width: f64,
    /// Opening duration
    pub open_duration: Duration,
    /// Closing duration
    pub close_duration: Duration,
    /// Opening curve
    pub open_easing: Easing,
    /// Closing curve
    pub close_easing: Easing,
    /// Panel scale when closed
    pub closed_scale: f64,
    /// Pinch separation ratio that opens the drawer
    pub pinch_threshold: f64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            screen_width: tokens::drawer::DEFAULT_SCREEN_WIDTH,
            open_duration: Duration::from_millis(tokens::duration::DRAWER_OPEN),
            close_duration: Duration::from_millis(tokens::duration::DRAWER_CLOSE),
            open_easing: Easing::CubicBezier(tokens::easing::DRAWER_OPEN),
            close_easing: Easing::CubicBezier(tokens::easing::DRAWER_CLOSE),
            closed_scale: tokens::drawer::CLOSED_SCALE,
            pinch_threshold: tokens::drawer::PINCH_THRESHOLD,
        }
    }
}

impl DrawerConfig {
    /// Set the screen width
    pub fn with_screen_width(mut self, width: f64) -> Self {
        self.screen_width = width;
        self
    }

    /// Set both durations
    pub fn with_durations(mut self, open: Duration, close: Duration) -> Self {
        self.open_duration = open;
        self.close_duration = close;
        self
    }

    /// Set the pinch threshold
    pub fn with_pinch_threshold(mut self, threshold: f64) -> Self {
        self.pinch_threshold = threshold;
        self
    }
}

// =============================================================================
// Machine
// =============================================================================

/// Owns the drawer phase and its animation channels
#[derive(Debug, Clone)]
pub struct DrawerMachine {
    config: DrawerConfig,
    phase: DrawerPhase,
    driver: AnimationDriver<DrawerChannel>,
    /// Tweens that must settle before the phase becomes stable
    in_flight: Vec<AnimationHandle<DrawerChannel>>,
}

impl DrawerMachine {
    /// Create a machine, closed unless `initially_open`
    pub fn new(config: DrawerConfig, initially_open: bool) -> Self {
        let (slide, scale, phase) = if initially_open {
            (1.0, tokens::drawer::OPEN_SCALE, DrawerPhase::Open)
        } else {
            (0.0, config.closed_scale, DrawerPhase::Closed)
        };
        let driver = AnimationDriver::new()
            .with_channel(DrawerChannel::Slide, slide, ValueRange::UNIT)
            .with_channel(
                DrawerChannel::Scale,
                scale,
                ValueRange::new(config.closed_scale, tokens::drawer::OPEN_SCALE),
            );

        Self {
            config,
            phase,
            driver,
            in_flight: Vec::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> DrawerPhase {
        self.phase
    }

    /// Whether the drawer is fully open
    pub fn is_open(&self) -> bool {
        self.phase == DrawerPhase::Open
    }

    /// Active configuration
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Tween handles the current transition waits on
    pub fn in_flight(&self) -> &[AnimationHandle<DrawerChannel>] {
        &self.in_flight
    }

    /// Update the width used for translation.
    ///
    /// Zero, negative and non-finite widths are rejected and leave the
    /// current width in place.
    pub fn set_screen_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width <= 0.0 {
            warn!(width, "Ignoring invalid screen width");
            return false;
        }
        self.config.screen_width = width;
        true
    }

    /// Apply an open/close intent
    pub fn request(&mut self, intent: DrawerIntent) -> Transition {
        let from = self.phase;
        let (next, transition) = match (from, intent) {
            (DrawerPhase::Closed, DrawerIntent::Open) => {
                (DrawerPhase::Opening, Transition::Started(DrawerPhase::Opening))
            }
            (DrawerPhase::Open, DrawerIntent::Close) => {
                (DrawerPhase::Closing, Transition::Started(DrawerPhase::Closing))
            }
            (DrawerPhase::Closing, DrawerIntent::Open) => {
                (DrawerPhase::Opening, Transition::Reversed(DrawerPhase::Opening))
            }
            (DrawerPhase::Opening, DrawerIntent::Close) => {
                (DrawerPhase::Closing, Transition::Reversed(DrawerPhase::Closing))
            }
            _ => return Transition::Ignored,
        };

        self.phase = next;
        self.retarget(next.target_open());
        debug!(?from, to = ?next, ?intent, "Drawer transition");
        transition
    }

    fn retarget(&mut self, open: bool) {
        let (slide, scale, duration, easing) = if open {
            (
                1.0,
                tokens::drawer::OPEN_SCALE,
                self.config.open_duration,
                self.config.open_easing,
            )
        } else {
            (
                0.0,
                self.config.closed_scale,
                self.config.close_duration,
                self.config.close_easing,
            )
        };

        self.in_flight = [
            self.driver
                .animate_to(DrawerChannel::Slide, slide, duration, easing),
            self.driver
                .animate_to(DrawerChannel::Scale, scale, duration, easing),
        ]
        .into_iter()
        .flatten()
        .collect();
    }

    /// Advance the animation; returns the stable phase reached, if any
    pub fn tick(&mut self, delta: Duration) -> Option<DrawerPhase> {
        for event in self.driver.tick(delta) {
            let handle = event.handle();
            self.in_flight.retain(|h| *h != handle);
        }

        if !self.phase.is_animating() || !self.in_flight.is_empty() {
            return None;
        }

        let settled = match self.phase {
            DrawerPhase::Opening => DrawerPhase::Open,
            _ => DrawerPhase::Closed,
        };
        debug!(phase = ?settled, "Drawer settled");
        self.phase = settled;
        Some(settled)
    }

    /// Open progress in 0..=1
    pub fn progress(&self) -> f64 {
        self.driver.value(DrawerChannel::Slide).unwrap_or(0.0)
    }

    /// Horizontal offset in -screen_width..=0
    pub fn translate_x(&self) -> f64 {
        -self.config.screen_width * (1.0 - self.progress())
    }

    /// Panel scale in closed_scale..=1
    pub fn scale(&self) -> f64 {
        self.driver
            .value(DrawerChannel::Scale)
            .unwrap_or(self.config.closed_scale)
    }

    /// Panel opacity in 0..=1
    pub fn opacity(&self) -> f64 {
        self.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn run_until_settled(machine: &mut DrawerMachine) -> Option<DrawerPhase> {
        for _ in 0..100 {
            if let Some(phase) = machine.tick(ms(16)) {
                return Some(phase);
            }
        }
        None
    }

    #[test]
    fn test_initial_phases() {
        let closed = DrawerMachine::new(DrawerConfig::default(), false);
        assert_eq!(closed.phase(), DrawerPhase::Closed);
        assert_eq!(closed.translate_x(), -390.0);
        assert_eq!(closed.scale(), 0.7);
        assert_eq!(closed.opacity(), 0.0);

        let open = DrawerMachine::new(DrawerConfig::default(), true);
        assert_eq!(open.phase(), DrawerPhase::Open);
        assert_eq!(open.translate_x(), 0.0);
        assert_eq!(open.scale(), 1.0);
        assert_eq!(open.opacity(), 1.0);
    }

    #[test]
    fn test_open_then_close() {
        let mut machine = DrawerMachine::new(DrawerConfig::default(), false);
        assert_eq!(
            machine.request(DrawerIntent::Open),
            Transition::Started(DrawerPhase::Opening)
        );
        assert_eq!(run_until_settled(&mut machine), Some(DrawerPhase::Open));
        assert!(machine.is_open());

        assert_eq!(
            machine.request(DrawerIntent::Close),
            Transition::Started(DrawerPhase::Closing)
        );
        assert!(machine.phase().is_visible());
        assert_eq!(run_until_settled(&mut machine), Some(DrawerPhase::Closed));
        assert_eq!(machine.translate_x(), -390.0);
    }

    #[test]
    fn test_redundant_intents_ignored() {
        let mut machine = DrawerMachine::new(DrawerConfig::default(), false);
        assert_eq!(machine.request(DrawerIntent::Close), Transition::Ignored);

        machine.request(DrawerIntent::Open);
        let handles = machine.in_flight().to_vec();
        assert_eq!(machine.request(DrawerIntent::Open), Transition::Ignored);
        assert_eq!(machine.in_flight(), handles.as_slice());

        run_until_settled(&mut machine);
        assert_eq!(machine.request(DrawerIntent::Open), Transition::Ignored);
    }

    #[test]
    fn test_close_mid_open_never_reaches_open() {
        let mut machine = DrawerMachine::new(DrawerConfig::default(), false);
        machine.request(DrawerIntent::Open);
        machine.tick(ms(100));
        let peak = machine.progress();
        assert!(peak > 0.0 && peak < 1.0);

        assert_eq!(
            machine.request(DrawerIntent::Close),
            Transition::Reversed(DrawerPhase::Closing)
        );
        assert_eq!(machine.progress(), peak);

        for _ in 0..100 {
            let settled = machine.tick(ms(16));
            assert!(machine.progress() <= peak + 1e-9);
            assert_ne!(settled, Some(DrawerPhase::Open));
            if settled.is_some() {
                break;
            }
        }
        assert_eq!(machine.phase(), DrawerPhase::Closed);
    }

    #[test]
    fn test_open_mid_close_reverses() {
        let mut machine = DrawerMachine::new(DrawerConfig::default(), true);
        machine.request(DrawerIntent::Close);
        machine.tick(ms(100));
        assert_eq!(
            machine.request(DrawerIntent::Open),
            Transition::Reversed(DrawerPhase::Opening)
        );
        assert_eq!(run_until_settled(&mut machine), Some(DrawerPhase::Open));
    }

    #[test]
    fn test_values_within_ranges() {
        let mut machine = DrawerMachine::new(DrawerConfig::default(), false);
        machine.request(DrawerIntent::Open);
        for step in 0..40 {
            machine.tick(ms(16));
            if step == 5 {
                machine.request(DrawerIntent::Close);
            }
            if step == 12 {
                machine.request(DrawerIntent::Open);
            }
            assert!((-390.0..=0.0).contains(&machine.translate_x()));
            assert!((0.7..=1.0).contains(&machine.scale()));
            assert!((0.0..=1.0).contains(&machine.opacity()));
        }
    }

    #[test]
    fn test_screen_width_rejects_degenerate_values() {
        let mut machine = DrawerMachine::new(DrawerConfig::default(), false);
        for width in [0.0, -120.0, f64::NAN, f64::INFINITY] {
            assert!(!machine.set_screen_width(width));
        }
        assert_eq!(machine.config().screen_width, 390.0);
        assert_eq!(machine.translate_x(), -390.0);

        assert!(machine.set_screen_width(430.0));
        assert_eq!(machine.translate_x(), -430.0);
    }

    #[test]
    fn test_zero_duration_settles_next_tick() {
        let config = DrawerConfig::default().with_durations(Duration::ZERO, Duration::ZERO);
        let mut machine = DrawerMachine::new(config, false);
        machine.request(DrawerIntent::Open);
        assert_eq!(machine.phase(), DrawerPhase::Opening);
        assert_eq!(machine.tick(Duration::ZERO), Some(DrawerPhase::Open));
    }

    #[test]
    fn test_phase_helpers() {
        assert!(!DrawerPhase::Closed.is_visible());
        assert!(DrawerPhase::Closing.is_visible());
        assert!(DrawerPhase::Opening.blocks_content());
        assert!(!DrawerPhase::Closing.blocks_content());
        assert!(DrawerPhase::Closing.is_animating());
        assert!(!DrawerPhase::Open.is_animating());
    }
}
