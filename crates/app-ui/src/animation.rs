//! Animation driver
//!
//! Numeric values advanced toward a target over a fixed duration. Time
//! advances linearly; the value follows an easing curve. Every channel owns
//! at most one tween, and starting a new tween on a channel supersedes the
//! old one without ever reporting it as settled.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, trace};

use crate::tokens;

// =============================================================================
// Easing
// =============================================================================

/// A CSS-style cubic Bézier timing curve through (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    /// First control point x (0..=1)
    pub x1: f64,
    /// First control point y
    pub y1: f64,
    /// Second control point x (0..=1)
    pub x2: f64,
    /// Second control point y
    pub y2: f64,
}

impl CubicBezier {
    const NEWTON_ITERATIONS: usize = 8;
    const EPSILON: f64 = 1e-7;

    /// Create a curve from its two control points
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coefficients(a1: f64, a2: f64) -> (f64, f64, f64) {
        let c = 3.0 * a1;
        let b = 3.0 * (a2 - a1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        let (a, b, c) = Self::coefficients(a1, a2);
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative_x(&self, t: f64) -> f64 {
        let (a, b, c) = Self::coefficients(self.x1, self.x2);
        (3.0 * a * t + 2.0 * b) * t + c
    }

    /// Find the curve parameter whose x equals `x`
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let error = Self::sample(self.x1, self.x2, t) - x;
            if error.abs() < Self::EPSILON {
                return t;
            }
            let slope = self.sample_derivative_x(t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= error / slope;
        }

        // Newton stalled; bisect
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let value = Self::sample(self.x1, self.x2, t);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if x > value {
                lo = t;
            } else {
                hi = t;
            }
            let next = (lo + hi) / 2.0;
            if (next - t).abs() < f64::EPSILON {
                break;
            }
            t = next;
        }
        t
    }

    /// Map linear progress (clamped to 0..=1) to eased progress
    pub fn apply(&self, progress: f64) -> f64 {
        let x = clamp_unit(progress);
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.solve_t(x))
    }

    /// CSS representation
    pub fn to_css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Easing function applied to tween progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Value tracks time
    #[default]
    Linear,
    /// Slow start
    EaseIn,
    /// Slow end
    EaseOut,
    /// Slow start and end
    EaseInOut,
    /// Arbitrary curve
    CubicBezier(CubicBezier),
}

impl Easing {
    /// Map linear progress (clamped to 0..=1) to eased progress
    pub fn apply(&self, progress: f64) -> f64 {
        match self {
            Easing::Linear => clamp_unit(progress),
            Easing::EaseIn => tokens::easing::EASE_IN.apply(progress),
            Easing::EaseOut => tokens::easing::EASE_OUT.apply(progress),
            Easing::EaseInOut => tokens::easing::EASE_IN_OUT.apply(progress),
            Easing::CubicBezier(curve) => curve.apply(progress),
        }
    }
}

impl From<CubicBezier> for Easing {
    fn from(curve: CubicBezier) -> Self {
        Easing::CubicBezier(curve)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

// =============================================================================
// Value Range
// =============================================================================

/// Inclusive range a channel's value is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ValueRange {
    /// The 0..=1 range used for progress and opacity
    pub const UNIT: ValueRange = ValueRange { min: 0.0, max: 1.0 };

    /// Create a range; bounds are swapped if given in reverse
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Clamp a value into the range
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Check whether a value lies in the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::UNIT
    }
}

// =============================================================================
// Handles & Events
// =============================================================================

/// Identifies one `animate_to` call on one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle<K> {
    /// Channel the tween runs on
    pub channel: K,
    /// Monotonic generation, unique per driver
    pub generation: u64,
}

/// Events produced by [`AnimationDriver::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent<K> {
    /// The tween reached its target and was not superseded
    Settled(AnimationHandle<K>),
}

impl<K: Copy> AnimationEvent<K> {
    /// Handle carried by the event
    pub fn handle(&self) -> AnimationHandle<K> {
        match self {
            AnimationEvent::Settled(handle) => *handle,
        }
    }
}

// =============================================================================
// Driver
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    generation: u64,
}

impl Tween {
    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            clamp_unit(self.elapsed.as_secs_f64() / self.duration.as_secs_f64())
        }
    }

    fn value(&self) -> f64 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Channel<K> {
    key: K,
    value: f64,
    range: ValueRange,
    tween: Option<Tween>,
}

/// Drives a fixed set of named animation channels
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDriver<K> {
    channels: Vec<Channel<K>>,
    next_generation: u64,
}

impl<K> Default for AnimationDriver<K> {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            next_generation: 1,
        }
    }
}

impl<K: Copy + Eq + Debug> AnimationDriver<K> {
    /// Create a driver with no channels
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_channel`](Self::add_channel)
    pub fn with_channel(mut self, key: K, initial: f64, range: ValueRange) -> Self {
        self.add_channel(key, initial, range);
        self
    }

    /// Register a channel, replacing any existing channel with the same key
    pub fn add_channel(&mut self, key: K, initial: f64, range: ValueRange) {
        let channel = Channel {
            key,
            value: range.clamp(initial),
            range,
            tween: None,
        };
        match self.channel_mut(key) {
            Some(existing) => *existing = channel,
            None => self.channels.push(channel),
        }
    }

    fn channel(&self, key: K) -> Option<&Channel<K>> {
        self.channels.iter().find(|c| c.key == key)
    }

    fn channel_mut(&mut self, key: K) -> Option<&mut Channel<K>> {
        self.channels.iter_mut().find(|c| c.key == key)
    }

    /// Current value of a channel
    pub fn value(&self, key: K) -> Option<f64> {
        self.channel(key).map(|c| c.value)
    }

    /// Value the channel is heading to (its current value when idle)
    pub fn target(&self, key: K) -> Option<f64> {
        self.channel(key)
            .map(|c| c.tween.as_ref().map_or(c.value, |t| t.to))
    }

    /// Range a channel is confined to
    pub fn range(&self, key: K) -> Option<ValueRange> {
        self.channel(key).map(|c| c.range)
    }

    /// Whether a channel has an unsettled tween
    pub fn is_animating(&self, key: K) -> bool {
        self.channel(key).is_some_and(|c| c.tween.is_some())
    }

    /// Whether no channel has an unsettled tween
    pub fn is_idle(&self) -> bool {
        self.channels.iter().all(|c| c.tween.is_none())
    }

    /// Whether `handle` is still the live tween on its channel
    pub fn is_current(&self, handle: &AnimationHandle<K>) -> bool {
        self.channel(handle.channel)
            .and_then(|c| c.tween.as_ref())
            .is_some_and(|t| t.generation == handle.generation)
    }

    /// Jump a channel to a value, dropping any tween without settling it
    pub fn set_value(&mut self, key: K, value: f64) -> bool {
        match self.channel_mut(key) {
            Some(channel) => {
                channel.value = channel.range.clamp(value);
                channel.tween = None;
                true
            }
            None => false,
        }
    }

    /// Start a tween from the channel's current value toward `target`.
    ///
    /// Any tween already running on the channel is superseded and will never
    /// settle. A zero duration moves the value immediately and settles on the
    /// next tick. Returns `None` for an unknown channel.
    pub fn animate_to(
        &mut self,
        key: K,
        target: f64,
        duration: Duration,
        easing: Easing,
    ) -> Option<AnimationHandle<K>> {
        let generation = self.next_generation;
        let channel = self.channel_mut(key)?;

        let to = channel.range.clamp(target);
        if let Some(old) = channel.tween.take() {
            debug!(
                channel = ?key,
                superseded = old.generation,
                by = generation,
                "Tween superseded"
            );
        }

        let mut tween = Tween {
            from: channel.value,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
            generation,
        };
        if duration.is_zero() {
            channel.value = to;
            tween.from = to;
        }
        channel.tween = Some(tween);

        self.next_generation += 1;
        trace!(channel = ?key, to, ?duration, generation, "Tween started");

        Some(AnimationHandle {
            channel: key,
            generation,
        })
    }

    /// Advance every channel by `delta` and report tweens that settled
    pub fn tick(&mut self, delta: Duration) -> Vec<AnimationEvent<K>> {
        let mut events = Vec::new();

        for channel in &mut self.channels {
            let Some(tween) = channel.tween.as_mut() else {
                continue;
            };

            tween.elapsed = tween.elapsed.saturating_add(delta).min(tween.duration);
            let settled = tween.elapsed >= tween.duration;
            let value = if settled { tween.to } else { tween.value() };
            let generation = tween.generation;

            channel.value = channel.range.clamp(value);
            if settled {
                channel.tween = None;
                events.push(AnimationEvent::Settled(AnimationHandle {
                    channel: channel.key,
                    generation,
                }));
            }
        }

        events
    }

    /// [`tick`](Self::tick) with a host-supplied millisecond delta.
    ///
    /// Negative and non-finite deltas count as zero.
    pub fn tick_millis(&mut self, delta_ms: f64) -> Vec<AnimationEvent<K>> {
        let delta = if delta_ms.is_finite() && delta_ms > 0.0 {
            Duration::try_from_secs_f64(delta_ms / 1000.0).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        self.tick(delta)
    }
}
