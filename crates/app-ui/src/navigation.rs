//! Navigation system for Ace Planner
//!
//! This module provides a type-safe navigation framework with:
//! - Route definitions with stable screen keys
//! - Stack navigation rooted at the welcome screen
//! - Bottom tab navigation
//! - Modal presentation
//! - The [`NavigationDispatch`] seam used by the drawer menu

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    // Onboarding & auth
    /// Landing screen
    #[default]
    Welcome,
    /// Login form
    Login,
    /// Sign-up form
    SignUp,
    /// One-time password entry
    OtpVerification,
    /// Forgot-password e-mail entry
    EnterMail,
    /// E-mail verification code
    EmailVerification,
    /// New password entry
    SetNewPassword,

    // Main screens
    /// Dashboard
    Home,
    /// Weekly timetable
    TimeTable,
    /// Schedule creation form
    ScheduleForm,
    /// Task list with checklists
    Tasks,
    /// New task form
    AddTask,
    /// CWA calculator
    CwaCalculator,
    /// Chat assistant
    Chat,
    /// Notifications
    Notifications,
    /// Profile
    Profile,

    // Special
    /// Sign out and return to the welcome screen
    LogOut,
    /// Unknown destination
    NotFound,
}

impl Route {
    /// Every route, in declaration order
    pub fn all() -> [Route; 18] {
        [
            Route::Welcome,
            Route::Login,
            Route::SignUp,
            Route::OtpVerification,
            Route::EnterMail,
            Route::EmailVerification,
            Route::SetNewPassword,
            Route::Home,
            Route::TimeTable,
            Route::ScheduleForm,
            Route::Tasks,
            Route::AddTask,
            Route::CwaCalculator,
            Route::Chat,
            Route::Notifications,
            Route::Profile,
            Route::LogOut,
            Route::NotFound,
        ]
    }

    /// Stable screen key used by navigators and the drawer menu
    pub fn key(&self) -> &'static str {
        match self {
            Route::Welcome => "WelcomeScreen",
            Route::Login => "Login",
            Route::SignUp => "SignUp",
            Route::OtpVerification => "OTPVerification",
            Route::EnterMail => "EnterMail",
            Route::EmailVerification => "EmailVerification",
            Route::SetNewPassword => "SetNewPassword",
            Route::Home => "Home",
            Route::TimeTable => "TimeTable",
            Route::ScheduleForm => "ScheduleForms",
            Route::Tasks => "Task",
            Route::AddTask => "AddTask",
            Route::CwaCalculator => "CWACalculator",
            Route::Chat => "Chat",
            Route::Notifications => "Notifications",
            Route::Profile => "Profile",
            Route::LogOut => "Logout",
            Route::NotFound => "NotFound",
        }
    }

    /// Look up a route by screen key
    pub fn from_key(key: &str) -> Option<Route> {
        Route::all().into_iter().find(|r| r.key() == key)
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Welcome => "Welcome",
            Route::Login => "Login",
            Route::SignUp => "Sign Up",
            Route::OtpVerification => "Verify OTP",
            Route::EnterMail => "Forgot Password",
            Route::EmailVerification => "Email Verification",
            Route::SetNewPassword => "Set New Password",
            Route::Home => "Home",
            Route::TimeTable => "Schedules",
            Route::ScheduleForm => "New Schedule",
            Route::Tasks => "Tasks",
            Route::AddTask => "Add Task",
            Route::CwaCalculator => "CWA Calculator",
            Route::Chat => "Chat ACE",
            Route::Notifications => "Notification",
            Route::Profile => "Profile",
            Route::LogOut => "Log Out",
            Route::NotFound => "Not Found",
        }
    }

    /// Whether the screen shows the bottom tab bar
    pub fn shows_tab_bar(&self) -> bool {
        NavigationTab::for_route(*self).is_some()
    }

    /// Whether the route is part of the signed-out flow
    pub fn is_onboarding(&self) -> bool {
        matches!(
            self,
            Route::Welcome
                | Route::Login
                | Route::SignUp
                | Route::OtpVerification
                | Route::EnterMail
                | Route::EmailVerification
                | Route::SetNewPassword
        )
    }
}

// =============================================================================
// Tab Navigation
// =============================================================================

/// Bottom navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Dashboard
    #[default]
    Home,
    /// Timetable
    Calendar,
    /// Task list
    Checklist,
    /// Chat assistant
    Chat,
    /// Profile
    Profile,
}

impl NavigationTab {
    /// Route the tab opens
    pub fn root_route(&self) -> Route {
        match self {
            NavigationTab::Home => Route::Home,
            NavigationTab::Calendar => Route::TimeTable,
            NavigationTab::Checklist => Route::Tasks,
            NavigationTab::Chat => Route::Chat,
            NavigationTab::Profile => Route::Profile,
        }
    }

    /// Get icon name for tab
    pub fn icon(&self) -> &'static str {
        match self {
            NavigationTab::Home => "home",
            NavigationTab::Calendar => "calendar-alt",
            NavigationTab::Checklist => "clipboard-check",
            NavigationTab::Chat => "paper-plane",
            NavigationTab::Profile => "user",
        }
    }

    /// Get label for tab
    pub fn label(&self) -> &'static str {
        match self {
            NavigationTab::Home => "Home",
            NavigationTab::Calendar => "Calendar",
            NavigationTab::Checklist => "Checklist",
            NavigationTab::Chat => "Chat",
            NavigationTab::Profile => "Profile",
        }
    }

    /// Get all tabs in order
    pub fn all() -> [NavigationTab; 5] {
        [
            NavigationTab::Home,
            NavigationTab::Calendar,
            NavigationTab::Checklist,
            NavigationTab::Chat,
            NavigationTab::Profile,
        ]
    }

    /// Tab whose root is `route`
    pub fn for_route(route: Route) -> Option<NavigationTab> {
        Self::all().into_iter().find(|t| t.root_route() == route)
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Stack of screens above a root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    /// Root entry, never popped
    root: StackEntry,
    /// Entries pushed above the root (bottom to top)
    entries: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self {
            root: StackEntry::new(root),
            entries: Vec::new(),
        }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.entries.push(StackEntry::new(route));
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.entries.pop().is_some()
    }

    /// Pop to root
    pub fn pop_to_root(&mut self) {
        self.entries.clear();
    }

    /// Depth index of the topmost entry for `route`
    pub fn position(&self, route: Route) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|e| e.route == route)
            .map(|i| i + 1)
            .or_else(|| (self.root.route == route).then_some(0))
    }

    /// Pop entries until `route` is on top; false if it is not in the stack
    pub fn pop_to(&mut self, route: Route) -> bool {
        match self.position(route) {
            Some(depth) => {
                self.entries.truncate(depth);
                true
            }
            None => false,
        }
    }

    /// Get the current (top) route
    pub fn current(&self) -> Route {
        self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.entries.last().unwrap_or(&self.root)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.entries.len() + 1
    }

    /// Routes bottom to top
    pub fn routes(&self) -> Vec<Route> {
        std::iter::once(self.root.route)
            .chain(self.entries.iter().map(|e| e.route))
            .collect()
    }

    /// Reset to a new root
    pub fn reset(&mut self, route: Route) {
        self.root = StackEntry::new(route);
        self.entries.clear();
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// Animation type for navigation transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationAnimation {
    /// Push animation (slide in from right)
    #[default]
    Push,
    /// Pop animation (slide out to right)
    Pop,
    /// Fade animation
    Fade,
    /// None (instant)
    None,
}

/// Pending navigation action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingNavigation {
    /// Target route
    pub route: Route,
    /// Animation type
    pub animation: NavigationAnimation,
    /// Target tab (if switching)
    pub target_tab: Option<NavigationTab>,
}

/// Complete navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    /// The screen stack
    pub stack: NavigationStack,
    /// Tab highlighted in the bottom bar
    pub active_tab: NavigationTab,
    /// Modal stack (overlays on top of stack content)
    pub modal_stack: Vec<StackEntry>,
    /// Pending navigation (for animations)
    #[serde(skip)]
    pub pending: Option<PendingNavigation>,
    /// Is navigation in progress
    #[serde(skip)]
    pub is_navigating: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::with_initial_route(Route::Welcome)
    }
}

impl NavigationState {
    /// Create a new navigation state rooted at the welcome screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigation state rooted at `route`
    pub fn with_initial_route(route: Route) -> Self {
        Self {
            stack: NavigationStack::new(route),
            active_tab: NavigationTab::for_route(route).unwrap_or_default(),
            modal_stack: Vec::new(),
            pending: None,
            is_navigating: false,
        }
    }

    /// Get the current route (considering modals)
    pub fn current_route(&self) -> Route {
        self.modal_stack
            .last()
            .map(|m| m.route)
            .unwrap_or_else(|| self.stack.current())
    }

    fn begin(&mut self, route: Route, animation: NavigationAnimation, target_tab: Option<NavigationTab>) {
        if let Some(tab) = NavigationTab::for_route(route) {
            self.active_tab = tab;
        }
        self.pending = Some(PendingNavigation {
            route,
            animation,
            target_tab,
        });
        self.is_navigating = animation != NavigationAnimation::None;
    }

    /// Navigate to a route.
    ///
    /// Returns to an existing entry for the same route instead of stacking a
    /// duplicate. [`Route::LogOut`] resets the stack to the welcome screen.
    pub fn navigate(&mut self, route: Route) {
        self.navigate_with_animation(route, NavigationAnimation::Push);
    }

    /// Navigate to a route with animation
    pub fn navigate_with_animation(&mut self, route: Route, animation: NavigationAnimation) {
        if route == Route::LogOut {
            info!("Logging out");
            self.reset_to(Route::Welcome);
            return;
        }

        if route == self.current_route() && self.modal_stack.is_empty() {
            return;
        }

        self.modal_stack.clear();
        if self.stack.pop_to(route) {
            info!(route = route.key(), "Returning to screen");
            self.begin(route, NavigationAnimation::Pop, None);
        } else {
            info!(route = route.key(), "Navigating");
            self.stack.push(route);
            self.begin(route, animation, None);
        }
    }

    /// Go back
    pub fn go_back(&mut self) -> bool {
        // First try to dismiss a modal
        if self.modal_stack.pop().is_some() {
            return true;
        }

        if self.stack.pop() {
            let route = self.stack.current();
            self.begin(route, NavigationAnimation::Pop, None);
            true
        } else {
            false
        }
    }

    /// Switch to a tab; pressing the focused tab does nothing
    pub fn switch_tab(&mut self, tab: NavigationTab) -> bool {
        let route = tab.root_route();
        if self.current_route() == route {
            return false;
        }
        self.navigate_with_animation(route, NavigationAnimation::None);
        if let Some(pending) = self.pending.as_mut() {
            pending.target_tab = Some(tab);
        }
        self.active_tab = tab;
        true
    }

    /// Present a modal
    pub fn present_modal(&mut self, route: Route) {
        self.modal_stack.push(StackEntry::new(route));
    }

    /// Dismiss the top modal
    pub fn dismiss_modal(&mut self) -> bool {
        self.modal_stack.pop().is_some()
    }

    /// Check if any modals are presented
    pub fn has_modals(&self) -> bool {
        !self.modal_stack.is_empty()
    }

    /// Complete the pending navigation
    pub fn complete_navigation(&mut self) {
        self.pending = None;
        self.is_navigating = false;
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.modal_stack.is_empty() || self.stack.can_go_back()
    }

    /// Replace the whole history with a single route
    pub fn reset_to(&mut self, route: Route) {
        self.stack.reset(route);
        self.modal_stack.clear();
        self.begin(route, NavigationAnimation::Fade, None);
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Receives navigation requests addressed by screen key
#[cfg_attr(test, mockall::automock)]
pub trait NavigationDispatch {
    /// Navigate to the screen with the given key
    fn dispatch(&mut self, screen: &str);
}

impl NavigationDispatch for NavigationState {
    fn dispatch(&mut self, screen: &str) {
        match Route::from_key(screen) {
            Some(route) => self.navigate(route),
            None => {
                warn!(screen, "Unknown screen key");
                self.navigate(Route::NotFound);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
