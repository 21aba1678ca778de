//! Schedule form and timetable
//!
//! The form produces one [`Schedule`] per selected weekday; the
//! [`Timetable`] collects them and answers "what's the next class".

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weekday abbreviations in form order
pub const DAYS_OF_WEEK: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const TIME_FORMAT: &str = "%I:%M %p";
const NEXT_CLASS_FORMAT: &str = "%a %-d %b, %-I:%M%p";

// =============================================================================
// Schedule
// =============================================================================

/// A weekly class slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique identifier
    pub id: String,
    /// Display time, e.g. "09:30 AM"
    pub time: String,
    /// Subject
    pub subject: String,
    /// Room or building
    pub location: String,
    /// Day of month of the start date
    pub date: u32,
    /// Month of the start date (1-12)
    pub month: u32,
    /// Weekday abbreviation
    pub day: String,
    /// Start time
    pub starts_at: NaiveTime,
}

impl Schedule {
    /// Weekday the class repeats on
    pub fn weekday(&self) -> Option<Weekday> {
        self.day.parse().ok()
    }

    /// First occurrence at or after `now`
    pub fn next_occurrence(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let weekday = self.weekday()?;
        let today = now.date().weekday().num_days_from_sunday();
        let ahead = (weekday.num_days_from_sunday() + 7 - today) % 7;
        let candidate = (now.date() + Duration::days(i64::from(ahead))).and_time(self.starts_at);
        Some(if candidate < now {
            candidate + Duration::days(7)
        } else {
            candidate
        })
    }
}

// =============================================================================
// Form
// =============================================================================

/// Result reported by the platform time picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePickerEvent {
    /// A time was chosen
    Set(NaiveTime),
    /// The picker was dismissed
    Dismissed,
}

/// State of the "Create Schedule" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleForm {
    /// First day of the schedule
    pub start_date: NaiveDate,
    /// Last day of the schedule
    pub end_date: NaiveDate,
    /// Class time
    pub time: NaiveTime,
    /// Whether the time picker is showing
    pub show_time_picker: bool,
    /// Subject input
    pub subject: String,
    /// Location input
    pub location: String,
    /// Weekday toggles, Sunday first
    pub selected_days: [bool; 7],
}

impl ScheduleForm {
    /// A blank form dated `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            start_date: now.date(),
            end_date: now.date(),
            time: now.time(),
            show_time_picker: false,
            subject: String::new(),
            location: String::new(),
            selected_days: [false; 7],
        }
    }

    /// Flip a weekday toggle; out-of-range indices are ignored
    pub fn toggle_day(&mut self, index: usize) -> Option<bool> {
        let day = self.selected_days.get_mut(index)?;
        *day = !*day;
        Some(*day)
    }

    /// Abbreviations of the selected weekdays
    pub fn selected_day_names(&self) -> Vec<&'static str> {
        DAYS_OF_WEEK
            .iter()
            .zip(self.selected_days)
            .filter_map(|(name, on)| on.then_some(*name))
            .collect()
    }

    /// Show the time picker
    pub fn open_time_picker(&mut self) {
        self.show_time_picker = true;
    }

    /// Apply a time picker result; the picker hides either way
    pub fn handle_time_picker(&mut self, event: TimePickerEvent) {
        self.show_time_picker = false;
        if let TimePickerEvent::Set(time) = event {
            self.time = time;
        }
    }

    /// Time as shown on the form
    pub fn formatted_time(&self) -> String {
        format_time(self.time)
    }

    /// Build one schedule per selected day, then reset the form
    pub fn save(&mut self, now: NaiveDateTime) -> Vec<Schedule> {
        let stamp = now.and_utc().timestamp_millis();
        let time = self.formatted_time();

        let schedules: Vec<Schedule> = self
            .selected_days
            .iter()
            .zip(DAYS_OF_WEEK)
            .enumerate()
            .filter(|(_, (on, _))| **on)
            .map(|(index, (_, day))| Schedule {
                id: format!("{stamp}-{index}"),
                time: time.clone(),
                subject: self.subject.clone(),
                location: self.location.clone(),
                date: self.start_date.day(),
                month: self.start_date.month(),
                day: day.to_string(),
                starts_at: self.time,
            })
            .collect();

        debug!(count = schedules.len(), subject = %self.subject, "Schedules saved");
        self.reset(now);
        schedules
    }

    /// Clear every field
    pub fn reset(&mut self, now: NaiveDateTime) {
        *self = Self::new(now);
    }
}

/// Format a time as "hh:mm AM"
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

// =============================================================================
// Timetable
// =============================================================================

/// The next upcoming class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextClass {
    /// Subject
    pub subject: String,
    /// Location
    pub location: String,
    /// When it starts
    pub at: NaiveDateTime,
}

impl NextClass {
    /// Label like "Fri 8 Nov, 12:30PM"
    pub fn label(&self) -> String {
        self.at.format(NEXT_CLASS_FORMAT).to_string()
    }
}

/// Saved schedules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    schedules: Vec<Schedule>,
}

impl Timetable {
    /// An empty timetable
    pub fn new() -> Self {
        Self::default()
    }

    /// Add schedules from a form save
    pub fn add(&mut self, schedules: impl IntoIterator<Item = Schedule>) {
        self.schedules.extend(schedules);
    }

    /// All schedules
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Schedules on one weekday, earliest first
    pub fn for_day(&self, day: Weekday) -> Vec<&Schedule> {
        let mut slots: Vec<&Schedule> = self
            .schedules
            .iter()
            .filter(|s| s.weekday() == Some(day))
            .collect();
        slots.sort_by_key(|s| s.starts_at);
        slots
    }

    /// Remove a schedule
    pub fn remove(&mut self, id: &str) -> Option<Schedule> {
        let index = self.schedules.iter().position(|s| s.id == id)?;
        Some(self.schedules.remove(index))
    }

    /// The next class at or after `now`
    pub fn next_class(&self, now: NaiveDateTime) -> Option<NextClass> {
        self.schedules
            .iter()
            .filter_map(|s| Some((s.next_occurrence(now)?, s)))
            .min_by_key(|(at, _)| *at)
            .map(|(at, s)| NextClass {
                subject: s.subject.clone(),
                location: s.location.clone(),
                at,
            })
    }
}
