//! Home dashboard
//!
//! Overview/Task tabs, progress cards, the next-class card and the quote
//! image that slides the dashboard down when expanded.

use app_ui::{tokens, AnimationDriver, Easing, ValueRange};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::schedules::NextClass;

/// Time the dashboard takes to slide
pub const EXPAND_DURATION: Duration = Duration::from_millis(tokens::duration::NORMAL);

/// Screen height taken up by everything above the slid-down dashboard
const EXPANDED_INSET: f64 = 690.0;

/// Dashboard tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    /// Next class and overall progress
    #[default]
    Overview,
    /// Progress cards
    Task,
}

/// A progress card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    /// Card title
    pub title: String,
    /// Number of tasks
    pub tasks: u32,
    /// Completion percentage (0-100)
    pub completion: u8,
    /// Accent color
    pub color: String,
}

impl TaskCard {
    /// Create a card; completion is capped at 100
    pub fn new(title: impl Into<String>, tasks: u32, completion: u8, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tasks,
            completion: completion.min(100),
            color: color.into(),
        }
    }

    /// Label like "3 Tasks"
    pub fn tasks_label(&self) -> String {
        format!("{} Tasks", self.tasks)
    }
}

/// Animated value behind the quote-image slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideChannel {
    /// 0 = resting, 1 = slid down
    Offset,
}

fn slide_driver() -> AnimationDriver<SlideChannel> {
    AnimationDriver::new().with_channel(SlideChannel::Offset, 0.0, ValueRange::UNIT)
}

/// State of the Home screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    tab: DashboardTab,
    cards: Vec<TaskCard>,
    next_class: Option<NextClass>,
    image_expanded: bool,
    #[serde(skip, default = "slide_driver")]
    slide: AnimationDriver<SlideChannel>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::sample()
    }
}

impl Dashboard {
    /// Create a dashboard
    pub fn new(cards: Vec<TaskCard>, next_class: Option<NextClass>) -> Self {
        Self {
            tab: DashboardTab::Overview,
            cards,
            next_class,
            image_expanded: false,
            slide: slide_driver(),
        }
    }

    /// The seeded dashboard
    pub fn sample() -> Self {
        let next_class = NaiveDate::from_ymd_opt(2024, 11, 8)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .map(|at| NextClass {
                subject: "Numerical Analysis".to_string(),
                location: "COS 9F11".to_string(),
                at,
            });
        Self::new(
            vec![
                TaskCard::new("Work", 3, 60, "#00B074"),
                TaskCard::new("Study", 5, 45, "#FFA500"),
                TaskCard::new("Personal", 2, 80, "#4169E1"),
                TaskCard::new("Coding", 8, 30, "#088a6a"),
            ],
            next_class,
        )
    }

    /// Active tab
    pub fn tab(&self) -> DashboardTab {
        self.tab
    }

    /// Switch tabs
    pub fn set_tab(&mut self, tab: DashboardTab) {
        self.tab = tab;
    }

    /// Progress cards
    pub fn cards(&self) -> &[TaskCard] {
        &self.cards
    }

    /// Next-class card contents
    pub fn next_class(&self) -> Option<&NextClass> {
        self.next_class.as_ref()
    }

    /// Replace the next-class card
    pub fn set_next_class(&mut self, next_class: Option<NextClass>) {
        self.next_class = next_class;
    }

    /// Mean completion across cards
    pub fn total_completion(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.cards.iter().map(|c| f64::from(c.completion)).sum();
        sum / self.cards.len() as f64
    }

    /// Rounded completion label, e.g. "54%"
    pub fn total_completion_label(&self) -> String {
        format!("{}%", self.total_completion().round())
    }

    // =========================================================================
    // Image expansion
    // =========================================================================

    /// Whether the image is expanded. Flips only once a slide finishes.
    pub fn is_image_expanded(&self) -> bool {
        self.image_expanded
    }

    /// Whether a slide is running
    pub fn is_sliding(&self) -> bool {
        self.slide.is_animating(SlideChannel::Offset)
    }

    /// Slide position, 0 = resting and 1 = slid down
    pub fn slide_progress(&self) -> f64 {
        self.slide.value(SlideChannel::Offset).unwrap_or_default()
    }

    fn slide_to(&mut self, to: f64) {
        self.slide
            .animate_to(SlideChannel::Offset, to, EXPAND_DURATION, Easing::EaseInOut);
    }

    /// Tap on the quote image
    pub fn toggle_image_expand(&mut self) {
        let to = if self.image_expanded { 0.0 } else { 1.0 };
        debug!(expand = to > 0.5, "Dashboard slide");
        self.slide_to(to);
    }

    /// Tap on the dashboard; slides back up when expanded
    pub fn reset_dashboard_position(&mut self) -> bool {
        if !self.image_expanded {
            return false;
        }
        self.slide_to(0.0);
        true
    }

    /// Advance the slide; returns the new expanded flag when it finishes
    pub fn tick(&mut self, delta: Duration) -> Option<bool> {
        if self.slide.tick(delta).is_empty() {
            return None;
        }
        self.image_expanded = self.slide_progress() > 0.5;
        Some(self.image_expanded)
    }

    /// Vertical offset of the dashboard panel for a screen height
    pub fn offset_y(&self, screen_height: f64) -> f64 {
        self.slide_progress() * (screen_height - EXPANDED_INSET).max(0.0)
    }
}
