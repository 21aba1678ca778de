//! Core application logic for Ace Planner
//!
//! This crate holds the screen models: the task board, the category task
//! manager, the schedule form and timetable, the home dashboard and the
//! sign-in forms. Everything is in-memory and seeded with sample data.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod categories;
pub mod dashboard;
pub mod forms;
pub mod schedules;
pub mod search;
pub mod tasks;

pub use categories::{Category, CategoryTask, ManagerTab, TaskManager};
pub use dashboard::{Dashboard, DashboardTab, TaskCard};
pub use forms::{EnterMailForm, LoginForm, SignUpForm};
pub use schedules::{NextClass, Schedule, ScheduleForm, TimePickerEvent, Timetable};
pub use search::{filter, SearchQuery, Searchable};
pub use tasks::{ChecklistEntry, PendingDeletion, Task, TaskBoard, TaskError, NO_TASKS_MESSAGE};
