//! UI component models for Ace Planner
//!
//! Headless component descriptions consumed by the rendering layer:
//! - Checkbox rows for task checklists
//! - The bottom tab bar
//! - Dialogs and confirmation prompts
//! - Empty states

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::navigation::{NavigationState, NavigationTab};

fn default_true() -> bool {
    true
}

/// Button color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    /// Brand color
    #[default]
    Primary,
    /// Neutral
    Secondary,
    /// Destructive
    Negative,
}

// =============================================================================
// Checkbox Component
// =============================================================================

/// A labelled checkbox row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkbox {
    /// Row label
    pub label: String,
    /// Checked state
    pub checked: bool,
}

impl Checkbox {
    /// Create an unchecked checkbox
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
        }
    }

    /// Set checked state
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

// =============================================================================
// Tab Bar Component
// =============================================================================

/// Tab bar item representing a navigation tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabBarItem {
    /// Tab this item opens
    pub tab: NavigationTab,
    /// Icon name
    pub icon: String,
    /// Label text
    pub label: String,
    /// Whether this tab is currently active
    pub is_active: bool,
    /// Accessibility label
    pub accessibility_label: String,
}

impl TabBarItem {
    /// Create an item for a tab
    pub fn new(tab: NavigationTab) -> Self {
        Self {
            tab,
            icon: tab.icon().to_string(),
            label: tab.label().to_string(),
            is_active: false,
            accessibility_label: format!("{} tab", tab.label()),
        }
    }

    /// Set active state
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

/// Bottom tab bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabBar {
    /// Tab items
    pub items: Vec<TabBarItem>,
    /// Whether to show labels
    pub show_labels: bool,
}

impl Default for TabBar {
    fn default() -> Self {
        Self::new(NavigationTab::default())
    }
}

impl TabBar {
    /// Create a tab bar with `active` highlighted
    pub fn new(active: NavigationTab) -> Self {
        Self {
            items: NavigationTab::all()
                .into_iter()
                .map(|tab| TabBarItem::new(tab).with_active(tab == active))
                .collect(),
            show_labels: true,
        }
    }

    /// Tab bar for the current navigation state
    pub fn for_state(state: &NavigationState) -> Self {
        Self::new(state.active_tab)
    }

    /// Highlighted tab
    pub fn active(&self) -> Option<NavigationTab> {
        self.items.iter().find(|i| i.is_active).map(|i| i.tab)
    }

    /// Press a tab. Navigates unless the tab's screen is already focused.
    pub fn press(&mut self, tab: NavigationTab, navigation: &mut NavigationState) -> bool {
        if !navigation.switch_tab(tab) {
            debug!(tab = tab.label(), "Tab already focused");
            return false;
        }
        for item in &mut self.items {
            item.is_active = item.tab == tab;
        }
        true
    }
}

// =============================================================================
// Dialog Components
// =============================================================================

/// Action a dialog button reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogAction {
    /// Confirm the prompt
    Confirm,
    /// Back out
    Cancel,
}

/// Dialog button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogButton {
    /// Button label
    pub label: String,
    /// Reported action
    pub action: DialogAction,
    /// Button color
    pub color: ButtonColor,
}

impl DialogButton {
    /// Create a primary confirm button
    pub fn confirm(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: DialogAction::Confirm,
            color: ButtonColor::Primary,
        }
    }

    /// Create a destructive confirm button
    pub fn destructive(label: impl Into<String>) -> Self {
        Self {
            color: ButtonColor::Negative,
            ..Self::confirm(label)
        }
    }

    /// Create a cancel button
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: DialogAction::Cancel,
            color: ButtonColor::Secondary,
        }
    }
}

/// Modal dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    /// Unique identifier
    pub id: String,
    /// Dialog title
    pub title: String,
    /// Dialog message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Whether dialog is open
    pub is_open: bool,
    /// Action buttons, in display order
    pub buttons: Vec<DialogButton>,
    /// Whether tapping the backdrop dismisses the dialog
    #[serde(default = "default_true")]
    pub cancelable: bool,
}

impl Dialog {
    /// Create an alert dialog (just OK button)
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            message: Some(message.into()),
            is_open: false,
            buttons: vec![DialogButton::confirm("OK")],
            cancelable: true,
        }
    }

    /// Set buttons
    pub fn with_buttons(mut self, buttons: Vec<DialogButton>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Set backdrop dismissal
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Action of the button labelled `label`
    pub fn action_for(&self, label: &str) -> Option<DialogAction> {
        self.buttons
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.action)
    }
}

/// Dialog controller for managing stacked dialogs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DialogController {
    /// Stack of open dialogs
    pub dialogs: Vec<Dialog>,
}

impl DialogController {
    /// Create a new controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a dialog
    pub fn show(&mut self, mut dialog: Dialog) {
        dialog.is_open = true;
        self.dialogs.push(dialog);
    }

    /// Close the top dialog
    pub fn close_top(&mut self) -> Option<Dialog> {
        self.dialogs.pop()
    }

    /// Close a specific dialog by ID
    pub fn close(&mut self, id: &str) -> Option<Dialog> {
        let pos = self.dialogs.iter().position(|d| d.id == id)?;
        Some(self.dialogs.remove(pos))
    }

    /// Backdrop tap; closes the top dialog only if it is cancelable
    pub fn dismiss_backdrop(&mut self) -> Option<Dialog> {
        if self.top().is_some_and(|d| d.cancelable) {
            self.close_top()
        } else {
            None
        }
    }

    /// Get the top dialog
    pub fn top(&self) -> Option<&Dialog> {
        self.dialogs.last()
    }

    /// Check if any dialog is open
    pub fn has_open(&self) -> bool {
        !self.dialogs.is_empty()
    }
}

/// Confirmation prompt (simplified dialog for yes/no questions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmPrompt {
    /// Unique identifier
    pub id: String,
    /// Title text
    pub title: String,
    /// Description text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Confirm button label
    pub confirm_label: String,
    /// Cancel button label
    pub cancel_label: String,
    /// Confirm button color
    pub confirm_color: ButtonColor,
    /// Whether the backdrop dismisses the prompt
    #[serde(default = "default_true")]
    pub cancelable: bool,
}

impl ConfirmPrompt {
    /// Create a new confirmation prompt
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            confirm_color: ButtonColor::Primary,
            cancelable: true,
        }
    }

    /// The task deletion prompt
    pub fn delete_task(name: &str) -> Self {
        Self::new("Delete Task")
            .with_description(format!("Are you sure you want to delete \"{name}\"?"))
            .with_confirm_label("Delete")
            .destructive()
            .with_cancelable(false)
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set confirm label
    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    /// Use the destructive color for the confirm button
    pub fn destructive(mut self) -> Self {
        self.confirm_color = ButtonColor::Negative;
        self
    }

    /// Set backdrop dismissal
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Convert to a dialog (cancel first, then confirm)
    pub fn to_dialog(&self) -> Dialog {
        let confirm = match self.confirm_color {
            ButtonColor::Negative => DialogButton::destructive(&self.confirm_label),
            _ => DialogButton::confirm(&self.confirm_label),
        };
        Dialog {
            id: self.id.clone(),
            title: self.title.clone(),
            message: self.description.clone(),
            is_open: false,
            buttons: vec![DialogButton::cancel(&self.cancel_label), confirm],
            cancelable: self.cancelable,
        }
    }
}

// =============================================================================
// Empty State
// =============================================================================

/// Placeholder shown when a list has nothing to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    /// Message text
    pub message: String,
    /// Optional icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl EmptyState {
    /// Create an empty state
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            icon: None,
        }
    }

    /// Task search with no matches
    pub fn no_tasks() -> Self {
        Self::new("No tasks found")
    }
}
