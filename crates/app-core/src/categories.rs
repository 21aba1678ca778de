//! Category task manager
//!
//! Tasks grouped into categories, with a "Task List"/"Completed" tab
//! switcher, category chips and a title search.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::search::{SearchQuery, Searchable};

/// Category identifier
pub type CategoryId = u32;

/// Task identifier
pub type TaskId = u32;

/// A task inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTask {
    /// Identifier, unique across categories
    pub id: TaskId,
    /// Title
    pub title: String,
    /// Done flag
    pub completed: bool,
    /// Emoji icon
    pub icon: String,
}

impl Searchable for CategoryTask {
    fn display_text(&self) -> &str {
        &self.title
    }
}

/// A group of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// Background color
    pub color: String,
    /// Emoji icon
    pub icon: String,
    /// Tasks
    pub tasks: Vec<CategoryTask>,
}

impl Category {
    /// Number of tasks in the category
    pub fn count_label(&self) -> String {
        format!("+{} task", self.tasks.len())
    }
}

/// Manager tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ManagerTab {
    /// Category tasks
    #[default]
    TaskList,
    /// Finished tasks across categories
    Completed,
}

impl ManagerTab {
    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            ManagerTab::TaskList => "Task List",
            ManagerTab::Completed => "Completed",
        }
    }
}

/// State of the category task manager screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskManager {
    categories: Vec<Category>,
    tab: ManagerTab,
    selected: Option<CategoryId>,
    query: SearchQuery,
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::sample()
    }
}

impl TaskManager {
    /// Create a manager over the given categories
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            tab: ManagerTab::TaskList,
            selected: None,
            query: SearchQuery::default(),
        }
    }

    /// The seeded categories
    pub fn sample() -> Self {
        let task = |id: TaskId, title: &str, completed: bool, icon: &str| CategoryTask {
            id,
            title: title.to_string(),
            completed,
            icon: icon.to_string(),
        };
        let category = |id, name: &str, color: &str, icon: &str, tasks| Category {
            id,
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            tasks,
        };

        Self::new(vec![
            category(
                1,
                "Works",
                "#FFE8B2",
                "💼",
                vec![
                    task(1, "Email Check", true, "📧"),
                    task(2, "Weekly Meeting", false, "👥"),
                    task(3, "Project Review", false, "📊"),
                ],
            ),
            category(
                2,
                "Sport",
                "#E8F5E9",
                "🏃",
                vec![
                    task(4, "Morning Run", false, "🏃"),
                    task(5, "Gym Session", true, "💪"),
                    task(6, "Tennis Practice", false, "🎾"),
                ],
            ),
            category(
                3,
                "Habits",
                "#E3F2FD",
                "✨",
                vec![
                    task(7, "Read 30 mins", false, "📚"),
                    task(8, "Meditate", true, "🧘"),
                    task(9, "Journal", false, "📝"),
                ],
            ),
        ])
    }

    /// All categories
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Active tab
    pub fn tab(&self) -> ManagerTab {
        self.tab
    }

    /// Switch tabs
    pub fn set_tab(&mut self, tab: ManagerTab) {
        self.tab = tab;
    }

    /// Selected category, if any
    pub fn selected(&self) -> Option<&Category> {
        let id = self.selected?;
        self.categories.iter().find(|c| c.id == id)
    }

    /// Select a category; unknown ids are ignored
    pub fn select_category(&mut self, id: CategoryId) -> bool {
        if self.categories.iter().any(|c| c.id == id) {
            self.selected = Some(id);
            true
        } else {
            debug!(category = id, "Unknown category");
            false
        }
    }

    /// Clear the category selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Update the title search
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = SearchQuery::new(query);
    }

    fn all_tasks(&self) -> impl Iterator<Item = &CategoryTask> {
        self.categories.iter().flat_map(|c| c.tasks.iter())
    }

    /// Tasks for the current tab, category and search
    pub fn visible_tasks(&self) -> Vec<&CategoryTask> {
        let base: Vec<&CategoryTask> = match (self.tab, self.selected()) {
            (ManagerTab::Completed, _) => self.all_tasks().filter(|t| t.completed).collect(),
            (ManagerTab::TaskList, Some(category)) => category.tasks.iter().collect(),
            (ManagerTab::TaskList, None) => self.all_tasks().collect(),
        };
        base.into_iter().filter(|t| self.query.matches(*t)).collect()
    }

    /// Heading above the task list
    pub fn section_title(&self) -> String {
        match (self.tab, self.selected()) {
            (ManagerTab::Completed, _) => "Completed Tasks".to_string(),
            (ManagerTab::TaskList, Some(category)) => format!("{} Tasks", category.name),
            (ManagerTab::TaskList, None) => "All Tasks".to_string(),
        }
    }

    /// Flip a task's done flag; returns the new value
    pub fn toggle_task(&mut self, id: TaskId) -> Option<bool> {
        let task = self
            .categories
            .iter_mut()
            .flat_map(|c| c.tasks.iter_mut())
            .find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }
}
