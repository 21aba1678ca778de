//! Task board
//!
//! The Tasks screen: colored tasks, each with a checklist of options, a
//! search box, per-task expansion and confirmation-guarded deletion.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::search::{self, SearchQuery, Searchable};

/// Errors that can occur when editing the task board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// Name is empty after trimming
    #[error("Task name cannot be empty")]
    EmptyName,

    /// A task with this name already exists
    #[error("Task already exists: {0}")]
    Duplicate(String),

    /// Color is not a #RRGGBB hex string
    #[error("Invalid task color: {0}")]
    InvalidColor(String),
}

/// Result type for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Message shown when the search matches nothing
pub const NO_TASKS_MESSAGE: &str = "No tasks found";

// =============================================================================
// Types
// =============================================================================

/// A task with its checklist options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task name; also its identifier
    pub id: String,
    /// Accent color (#RRGGBB)
    pub color: String,
    /// Checklist option labels
    pub options: Vec<String>,
}

impl Task {
    /// Create a task
    pub fn new(id: impl Into<String>, color: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            options,
        }
    }
}

impl Searchable for Task {
    fn display_text(&self) -> &str {
        &self.id
    }
}

/// One checklist row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    /// Row label
    pub label: String,
    /// Checked state
    pub checked: bool,
}

impl ChecklistEntry {
    /// An unchecked row
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
        }
    }
}

/// A deletion waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeletion {
    /// Task to delete
    pub task_id: String,
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

// =============================================================================
// Board
// =============================================================================

/// State of the Tasks screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    checklists: HashMap<String, Vec<ChecklistEntry>>,
    query: SearchQuery,
    expanded: HashSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending_deletion: Option<PendingDeletion>,
}

impl TaskBoard {
    /// Create a board with every checklist entry unchecked
    pub fn new(tasks: Vec<Task>) -> Self {
        let checklists = tasks
            .iter()
            .map(|t| {
                let entries = t.options.iter().map(ChecklistEntry::new).collect();
                (t.id.clone(), entries)
            })
            .collect();
        Self {
            tasks,
            checklists,
            ..Default::default()
        }
    }

    /// The seeded board
    pub fn sample() -> Self {
        let task = |id: &str, color: &str, options: [&str; 2]| {
            Task::new(id, color, options.iter().map(|o| o.to_string()).collect())
        };
        Self::new(vec![
            task("Wash", "#f28b82", ["Option 1", "Option 2"]),
            task("Shopping", "#fbbc04", ["Option A", "Option B"]),
            task("Games", "#34a853", ["Level 1", "Level 2"]),
            task("Study", "#fb72ff", ["Chapter 1", "Chapter 2"]),
        ])
    }

    /// All tasks in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Checklist of a task
    pub fn checklist(&self, id: &str) -> Option<&[ChecklistEntry]> {
        self.checklists.get(id).map(Vec::as_slice)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Current search text
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Update the search text; clearing it collapses every task
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = SearchQuery::new(query);
        if self.query.is_empty() {
            self.expanded.clear();
        }
    }

    /// Tasks matching the search text
    pub fn filtered(&self) -> Vec<Task> {
        search::filter(&self.tasks, self.query.as_str())
    }

    /// Empty-state message, when the search matches nothing
    pub fn empty_message(&self) -> Option<&'static str> {
        self.filtered().is_empty().then_some(NO_TASKS_MESSAGE)
    }

    // =========================================================================
    // Expansion & Checklists
    // =========================================================================

    /// Expand or collapse a task; returns the new state
    pub fn toggle_expand(&mut self, id: &str) -> Option<bool> {
        self.task(id)?;
        if self.expanded.remove(id) {
            Some(false)
        } else {
            self.expanded.insert(id.to_string());
            Some(true)
        }
    }

    /// Whether a task is expanded
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip one checklist entry; unknown ids or indices change nothing
    pub fn toggle_checklist_entry(&mut self, id: &str, index: usize) -> Option<bool> {
        let entry = self.checklists.get_mut(id)?.get_mut(index)?;
        entry.checked = !entry.checked;
        Some(entry.checked)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Add a task from the Add Task screen
    pub fn add_task(&mut self, name: &str, color: &str, options: Vec<String>) -> Result<&Task> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskError::EmptyName);
        }
        if self.task(name).is_some() {
            return Err(TaskError::Duplicate(name.to_string()));
        }
        if !is_hex_color(color) {
            return Err(TaskError::InvalidColor(color.to_string()));
        }

        let task = Task::new(name, color, options);
        self.checklists.insert(
            task.id.clone(),
            task.options.iter().map(ChecklistEntry::new).collect(),
        );
        debug!(task = %task.id, "Task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// First phase of deletion. Nothing is removed until
    /// [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, id: &str) -> Option<&PendingDeletion> {
        if self.task(id).is_none() {
            warn!(task = id, "Delete requested for unknown task");
            return None;
        }
        self.pending_deletion = Some(PendingDeletion {
            task_id: id.to_string(),
        });
        self.pending_deletion.as_ref()
    }

    /// Alias for [`request_delete`](Self::request_delete)
    pub fn delete_task(&mut self, id: &str) -> Option<&PendingDeletion> {
        self.request_delete(id)
    }

    /// Deletion awaiting confirmation
    pub fn pending_deletion(&self) -> Option<&PendingDeletion> {
        self.pending_deletion.as_ref()
    }

    /// Remove the pending task together with its checklist
    pub fn confirm_delete(&mut self) -> Option<Task> {
        let pending = self.pending_deletion.take()?;
        let index = self.tasks.iter().position(|t| t.id == pending.task_id)?;
        let task = self.tasks.remove(index);
        self.checklists.remove(&task.id);
        self.expanded.remove(&task.id);
        debug!(task = %task.id, "Task deleted");
        Some(task)
    }

    /// Drop the pending deletion without changing anything else
    pub fn cancel_delete(&mut self) -> bool {
        self.pending_deletion.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(board: &TaskBoard) -> Vec<&str> {
        board.tasks().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sample_board() {
        let board = TaskBoard::sample();
        assert_eq!(ids(&board), vec!["Wash", "Shopping", "Games", "Study"]);
        let checklist = board.checklist("Games").unwrap();
        assert_eq!(checklist[1].label, "Level 2");
        assert!(checklist.iter().all(|e| !e.checked));
    }

    #[test]
    fn test_filter_by_name() {
        let mut board = TaskBoard::sample();
        board.set_query("sh");
        let names: Vec<_> = board.filtered().into_iter().map(|t| t.id).collect();
        assert_eq!(names, vec!["Wash", "Shopping"]);
        assert_eq!(board.empty_message(), None);

        board.set_query("zzz");
        assert_eq!(board.empty_message(), Some("No tasks found"));
    }

    #[test]
    fn test_clearing_query_collapses() {
        let mut board = TaskBoard::sample();
        board.set_query("wa");
        assert_eq!(board.toggle_expand("Wash"), Some(true));
        board.set_query("w");
        assert!(board.is_expanded("Wash"));
        board.set_query("");
        assert!(!board.is_expanded("Wash"));
    }

    #[test]
    fn test_toggle_expand_unknown() {
        let mut board = TaskBoard::sample();
        assert_eq!(board.toggle_expand("Nope"), None);
        assert_eq!(board.toggle_expand("Study"), Some(true));
        assert_eq!(board.toggle_expand("Study"), Some(false));
    }

    #[test]
    fn test_toggle_checklist_twice_restores() {
        let mut board = TaskBoard::sample();
        let before = board.clone();
        assert_eq!(board.toggle_checklist_entry("Wash", 1), Some(true));
        assert!(!board.checklist("Wash").unwrap()[0].checked);
        assert_eq!(board.toggle_checklist_entry("Wash", 1), Some(false));
        assert_eq!(board, before);
    }

    #[test]
    fn test_toggle_checklist_unknown_is_noop() {
        let mut board = TaskBoard::sample();
        let before = board.clone();
        assert_eq!(board.toggle_checklist_entry("Nope", 0), None);
        assert_eq!(board.toggle_checklist_entry("Wash", 5), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut board = TaskBoard::new(TaskBoard::sample().tasks()[..2].to_vec());
        assert!(board.delete_task("Wash").is_some());
        assert_eq!(ids(&board), vec!["Wash", "Shopping"]);

        assert!(board.cancel_delete());
        assert_eq!(ids(&board), vec!["Wash", "Shopping"]);
        assert!(board.confirm_delete().is_none());

        board.request_delete("Wash");
        let removed = board.confirm_delete().unwrap();
        assert_eq!(removed.id, "Wash");
        assert_eq!(ids(&board), vec!["Shopping"]);
        assert!(board.checklist("Wash").is_none());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut board = TaskBoard::sample();
        assert!(board.request_delete("Nope").is_none());
        assert!(board.pending_deletion().is_none());
        assert!(!board.cancel_delete());
    }

    #[test]
    fn test_add_task() {
        let mut board = TaskBoard::sample();
        let task = board
            .add_task("  Read ", "#01796F", vec!["Ch 1".to_string()])
            .unwrap();
        assert_eq!(task.id, "Read");
        assert_eq!(board.checklist("Read").unwrap().len(), 1);

        assert_eq!(board.add_task(" ", "#000000", vec![]), Err(TaskError::EmptyName));
        assert_eq!(
            board.add_task("Wash", "#000000", vec![]),
            Err(TaskError::Duplicate("Wash".to_string()))
        );
        assert_eq!(
            board.add_task("Cook", "red", vec![]),
            Err(TaskError::InvalidColor("red".to_string()))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TaskError::EmptyName.to_string(), "Task name cannot be empty");
        assert_eq!(
            TaskError::Duplicate("Wash".into()).to_string(),
            "Task already exists: Wash"
        );
    }
}
