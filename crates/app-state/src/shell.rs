//! Application shell
//!
//! [`AppShell`] owns the navigation state, the drawer, the tab bar, the
//! dialog stack and the transient state of the focused screen. Every input
//! arrives as a [`ShellEvent`] and is applied in order; animations advance
//! through [`AppShell::tick`].
//!
//! Screen state is rebuilt whenever the focused route changes, so leaving a
//! screen discards its search text, toggles and pending deletions. The
//! timetable is the exception: schedules saved from the form are kept for
//! the lifetime of the shell.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use app_core::{
    Dashboard, DashboardTab, EnterMailForm, LoginForm, ManagerTab, ScheduleForm, SignUpForm,
    TaskBoard, TaskManager, TimePickerEvent, Timetable,
};
use app_ui::{
    get_theme, Checkbox, ConfirmPrompt, DialogAction, DialogController, Drawer, DrawerFrame,
    DrawerPhase, DrawerProps, EmptyState, NavigationState, NavigationTab, PointerEvent,
    PointerPhase, Route, TabBar, Theme,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::AppConfig;

/// Source of the current local time
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// =============================================================================
// Events
// =============================================================================

/// Input addressed to the focused screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenEvent {
    /// Search text changed (Tasks, Add Task)
    SetQuery {
        /// New search text
        query: String,
    },
    /// Expand or collapse a task (Tasks)
    ToggleExpand {
        /// Task id
        task_id: String,
    },
    /// Tick or untick a checklist entry (Tasks)
    ToggleChecklistEntry {
        /// Task id
        task_id: String,
        /// Entry index
        index: usize,
    },
    /// Create a task (Tasks)
    AddTask {
        /// Task name
        name: String,
        /// Accent color
        color: String,
        /// Checklist option labels
        options: Vec<String>,
    },
    /// Ask to delete a task (Tasks); shows a confirmation dialog
    RequestDelete {
        /// Task id
        task_id: String,
    },
    /// Select a category chip (Add Task)
    SelectCategory {
        /// Category id
        category_id: u32,
    },
    /// Clear the category chip (Add Task)
    ClearCategory,
    /// Switch the manager tab (Add Task)
    SetManagerTab {
        /// Tab
        tab: ManagerTab,
    },
    /// Tick a category task (Add Task)
    ToggleCategoryTask {
        /// Task id
        task_id: u32,
    },
    /// Switch the dashboard tab (Home)
    SetDashboardTab {
        /// Tab
        tab: DashboardTab,
    },
    /// Tap on the quote image (Home)
    ToggleImageExpand,
    /// Tap on the dashboard (Home)
    ResetDashboard,
    /// Flip a weekday toggle (Schedule form)
    ToggleDay {
        /// Index, Sunday first
        index: usize,
    },
    /// Show the time picker (Schedule form)
    OpenTimePicker,
    /// Time picker result (Schedule form)
    TimePicked {
        /// Picker event
        event: TimePickerEvent,
    },
    /// Subject input (Schedule form)
    SetSubject {
        /// Subject
        subject: String,
    },
    /// Location input (Schedule form)
    SetLocation {
        /// Location
        location: String,
    },
    /// Save the schedule form and return to the timetable
    SaveSchedule,
    /// E-mail input (Login, Sign Up, Enter Mail)
    SetEmail {
        /// E-mail
        email: String,
    },
    /// Password input (Login, Sign Up)
    SetPassword {
        /// Password
        password: String,
    },
    /// Username input (Sign Up)
    SetUsername {
        /// Username
        username: String,
    },
    /// Eye icon tapped (Login, Sign Up)
    TogglePasswordVisibility,
}

/// Input to the shell
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// Raw touch input
    Pointer(PointerEvent),
    /// Platform pinch sample
    Pinch {
        /// Fingers on screen
        pointer_count: usize,
        /// Scale relative to the gesture start
        scale: f64,
    },
    /// Platform pinch ended
    PinchEnd,
    /// Drawer close control tapped
    CloseDrawer,
    /// Host sets the drawer's `is_open` prop
    SetDrawerOpen(bool),
    /// Drawer menu entry tapped
    SelectMenu(usize),
    /// Bottom tab tapped
    PressTab(NavigationTab),
    /// Programmatic navigation
    Navigate(Route),
    /// Back button
    GoBack,
    /// Top dialog button pressed
    Dialog(DialogAction),
    /// Tap outside the top dialog
    DismissDialog,
    /// Screen rotated or resized
    Resize {
        /// New screen width
        width: f64,
    },
    /// Screen-specific input
    Screen(ScreenEvent),
}

// =============================================================================
// Screens
// =============================================================================

/// Transient state of the focused screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "state", rename_all = "snake_case")]
pub enum Screen {
    /// A screen with no state of its own
    Static(Route),
    /// Login
    Login(LoginForm),
    /// Sign up
    SignUp(SignUpForm),
    /// Forgot password
    EnterMail(EnterMailForm),
    /// Dashboard
    Home(Dashboard),
    /// Saved schedules; the data lives on the shell
    TimeTable,
    /// Create-schedule form
    ScheduleForm(ScheduleForm),
    /// Task list
    Tasks(TaskBoard),
    /// Category task manager
    AddTask(TaskManager),
}

impl Screen {
    /// Fresh state for `route`
    pub fn for_route(route: Route, now: NaiveDateTime, timetable: &Timetable) -> Self {
        match route {
            Route::Login => Screen::Login(LoginForm::default()),
            Route::SignUp => Screen::SignUp(SignUpForm::default()),
            Route::EnterMail => Screen::EnterMail(EnterMailForm::default()),
            Route::Home => {
                let mut dashboard = Dashboard::sample();
                if let Some(next) = timetable.next_class(now) {
                    dashboard.set_next_class(Some(next));
                }
                Screen::Home(dashboard)
            }
            Route::TimeTable => Screen::TimeTable,
            Route::ScheduleForm => Screen::ScheduleForm(ScheduleForm::new(now)),
            Route::Tasks => Screen::Tasks(TaskBoard::sample()),
            Route::AddTask => Screen::AddTask(TaskManager::sample()),
            other => Screen::Static(other),
        }
    }

    /// Route this state belongs to
    pub fn route(&self) -> Route {
        match self {
            Screen::Static(route) => *route,
            Screen::Login(_) => Route::Login,
            Screen::SignUp(_) => Route::SignUp,
            Screen::EnterMail(_) => Route::EnterMail,
            Screen::Home(_) => Route::Home,
            Screen::TimeTable => Route::TimeTable,
            Screen::ScheduleForm(_) => Route::ScheduleForm,
            Screen::Tasks(_) => Route::Tasks,
            Screen::AddTask(_) => Route::AddTask,
        }
    }
}

// =============================================================================
// Shell
// =============================================================================

/// Owner of all application state
pub struct AppShell {
    navigation: NavigationState,
    drawer: Drawer,
    drawer_open: Arc<AtomicBool>,
    tab_bar: TabBar,
    dialogs: DialogController,
    delete_dialog: Option<String>,
    screen: Screen,
    timetable: Timetable,
    theme: Theme,
    clock: Clock,
}

impl std::fmt::Debug for AppShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppShell")
            .field("route", &self.navigation.current_route())
            .field("drawer", &self.drawer.phase())
            .field("dialogs", &self.dialogs.dialogs.len())
            .finish()
    }
}

impl AppShell {
    /// Build a shell on the welcome screen
    pub fn new(config: &AppConfig) -> Self {
        let drawer_open = Arc::new(AtomicBool::new(config.drawer.initially_open));
        let drawer = Drawer::new(
            Self::drawer_props(&drawer_open, config.drawer.initially_open),
            config.drawer_config(),
        );
        let navigation = NavigationState::new();
        let timetable = Timetable::new();
        let screen = Screen::for_route(navigation.current_route(), local_now(), &timetable);

        Self {
            tab_bar: TabBar::for_state(&navigation),
            navigation,
            drawer,
            drawer_open,
            dialogs: DialogController::new(),
            delete_dialog: None,
            screen,
            timetable,
            theme: get_theme(config.theme),
            clock: local_now,
        }
    }

    /// Use a different clock; the focused screen is rebuilt with it
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.screen = Screen::for_route(self.navigation.current_route(), clock(), &self.timetable);
        self
    }

    /// Props whose callbacks mirror the drawer's reported state into `flag`
    fn drawer_props(flag: &Arc<AtomicBool>, is_open: bool) -> DrawerProps {
        let on_open = Arc::clone(flag);
        let on_close = Arc::clone(flag);
        DrawerProps::new(is_open)
            .with_on_open(move || on_open.store(true, Ordering::SeqCst))
            .with_on_close(move || on_close.store(false, Ordering::SeqCst))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Navigation state
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Focused route
    pub fn current_route(&self) -> Route {
        self.navigation.current_route()
    }

    /// The drawer
    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    /// Drawer phase
    pub fn drawer_phase(&self) -> DrawerPhase {
        self.drawer.phase()
    }

    /// The drawer's `is_open` prop as last reported through its callbacks
    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open.load(Ordering::SeqCst)
    }

    /// Bottom tab bar
    pub fn tab_bar(&self) -> &TabBar {
        &self.tab_bar
    }

    /// Dialog stack
    pub fn dialogs(&self) -> &DialogController {
        &self.dialogs
    }

    /// Focused screen state
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Saved schedules
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Active theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Drawer snapshot for rendering
    pub fn frame(&self) -> DrawerFrame {
        self.drawer.frame()
    }

    /// Checkbox rows for an expanded task on the Tasks screen
    pub fn checklist_rows(&self, task_id: &str) -> Option<Vec<Checkbox>> {
        let Screen::Tasks(board) = &self.screen else {
            return None;
        };
        if !board.is_expanded(task_id) {
            return None;
        }
        let rows = board
            .checklist(task_id)?
            .iter()
            .map(|entry| Checkbox::new(entry.label.clone()).with_checked(entry.checked))
            .collect();
        Some(rows)
    }

    /// Empty state for the Tasks screen when the search matches nothing
    pub fn empty_state(&self) -> Option<EmptyState> {
        match &self.screen {
            Screen::Tasks(board) => board.empty_message().map(EmptyState::new),
            _ => None,
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Apply one event; returns whether it was accepted
    pub fn handle(&mut self, event: ShellEvent) -> bool {
        match event {
            ShellEvent::Pointer(pointer) => {
                // Lifts still reach the recognizer so no contact is left stuck
                let lifts = matches!(pointer.phase, PointerPhase::Up | PointerPhase::Cancel);
                if self.dialogs.has_open() && !lifts {
                    debug!("Gesture ignored under dialog");
                    return false;
                }
                self.drawer.handle_pointer(pointer).changed()
            }
            ShellEvent::Pinch {
                pointer_count,
                scale,
            } => {
                if self.dialogs.has_open() {
                    debug!("Gesture ignored under dialog");
                    return false;
                }
                self.drawer.handle_pinch(pointer_count, scale).changed()
            }
            ShellEvent::PinchEnd => {
                self.drawer.end_pinch();
                true
            }
            ShellEvent::CloseDrawer => self.drawer.press_close().changed(),
            ShellEvent::SetDrawerOpen(open) => {
                self.drawer_open.store(open, Ordering::SeqCst);
                let props = Self::drawer_props(&self.drawer_open, open);
                self.drawer.set_props(props).changed()
            }
            ShellEvent::SelectMenu(index) => {
                let selected = self.drawer.select(index, &mut self.navigation);
                if selected {
                    self.sync_screen();
                }
                selected
            }
            ShellEvent::PressTab(tab) => {
                if self.content_blocked() {
                    return false;
                }
                let pressed = self.tab_bar.press(tab, &mut self.navigation);
                if pressed {
                    self.sync_screen();
                }
                pressed
            }
            ShellEvent::Navigate(route) => {
                self.navigation.navigate(route);
                self.sync_screen();
                true
            }
            ShellEvent::GoBack => {
                let went_back = self.navigation.go_back();
                if went_back {
                    self.sync_screen();
                }
                went_back
            }
            ShellEvent::Dialog(action) => self.handle_dialog(action),
            ShellEvent::DismissDialog => {
                let dismissed = self.dialogs.dismiss_backdrop().is_some();
                if !dismissed {
                    debug!("Dialog requires an explicit choice");
                }
                dismissed
            }
            ShellEvent::Resize { width } => self.drawer.set_screen_width(width),
            ShellEvent::Screen(event) => {
                if self.content_blocked() {
                    return false;
                }
                self.handle_screen(event)
            }
        }
    }

    /// Advance animations by `delta`; returns the stable drawer phase reached, if any
    pub fn tick(&mut self, delta: Duration) -> Option<DrawerPhase> {
        if let Screen::Home(dashboard) = &mut self.screen {
            dashboard.tick(delta);
        }
        self.drawer.tick(delta)
    }

    /// Content under an open drawer or a dialog does not take input
    fn content_blocked(&self) -> bool {
        let blocked = self.drawer.phase().blocks_content() || self.dialogs.has_open();
        if blocked {
            debug!(phase = ?self.drawer.phase(), "Content is blocked");
        }
        blocked
    }

    /// Rebuild screen state after the focused route changed
    fn sync_screen(&mut self) {
        self.navigation.complete_navigation();
        self.tab_bar = TabBar::for_state(&self.navigation);

        let route = self.navigation.current_route();
        if self.screen.route() == route {
            return;
        }
        info!(from = self.screen.route().key(), to = route.key(), "Screen changed");
        self.dialogs = DialogController::new();
        self.delete_dialog = None;
        self.screen = Screen::for_route(route, (self.clock)(), &self.timetable);
    }

    fn handle_dialog(&mut self, action: DialogAction) -> bool {
        let Some(dialog) = self.dialogs.close_top() else {
            debug!("No dialog to answer");
            return false;
        };
        if self.delete_dialog.as_deref() != Some(dialog.id.as_str()) {
            return true;
        }
        self.delete_dialog = None;

        if let Screen::Tasks(board) = &mut self.screen {
            match action {
                DialogAction::Confirm => {
                    if let Some(task) = board.confirm_delete() {
                        info!(task = %task.id, "Task removed");
                    }
                }
                DialogAction::Cancel => {
                    board.cancel_delete();
                }
            }
        }
        true
    }

    fn save_schedule(&mut self) -> bool {
        let Screen::ScheduleForm(form) = &mut self.screen else {
            warn!(screen = self.screen.route().key(), "No schedule form to save");
            return false;
        };
        let schedules = form.save((self.clock)());
        info!(count = schedules.len(), "Schedules added to timetable");
        self.timetable.add(schedules);
        self.navigation.navigate(Route::TimeTable);
        self.sync_screen();
        true
    }

    fn handle_screen(&mut self, event: ScreenEvent) -> bool {
        if event == ScreenEvent::SaveSchedule {
            return self.save_schedule();
        }
        match (&mut self.screen, event) {
            (Screen::Tasks(board), ScreenEvent::SetQuery { query }) => {
                board.set_query(query);
                true
            }
            (Screen::AddTask(manager), ScreenEvent::SetQuery { query }) => {
                manager.set_query(query);
                true
            }
            (Screen::Tasks(board), ScreenEvent::ToggleExpand { task_id }) => {
                board.toggle_expand(&task_id).is_some()
            }
            (Screen::Tasks(board), ScreenEvent::ToggleChecklistEntry { task_id, index }) => {
                board.toggle_checklist_entry(&task_id, index).is_some()
            }
            (
                Screen::Tasks(board),
                ScreenEvent::AddTask {
                    name,
                    color,
                    options,
                },
            ) => match board.add_task(&name, &color, options) {
                Ok(task) => {
                    info!(task = %task.id, "Task added");
                    true
                }
                Err(e) => {
                    warn!(error = %e, "Task rejected");
                    false
                }
            },
            (Screen::Tasks(board), ScreenEvent::RequestDelete { task_id }) => {
                if board.request_delete(&task_id).is_none() {
                    return false;
                }
                let dialog = ConfirmPrompt::delete_task(&task_id).to_dialog();
                self.delete_dialog = Some(dialog.id.clone());
                self.dialogs.show(dialog);
                true
            }
            (Screen::AddTask(manager), ScreenEvent::SelectCategory { category_id }) => {
                manager.select_category(category_id)
            }
            (Screen::AddTask(manager), ScreenEvent::ClearCategory) => {
                manager.clear_selection();
                true
            }
            (Screen::AddTask(manager), ScreenEvent::SetManagerTab { tab }) => {
                manager.set_tab(tab);
                true
            }
            (Screen::AddTask(manager), ScreenEvent::ToggleCategoryTask { task_id }) => {
                manager.toggle_task(task_id).is_some()
            }
            (Screen::Home(dashboard), ScreenEvent::SetDashboardTab { tab }) => {
                dashboard.set_tab(tab);
                true
            }
            (Screen::Home(dashboard), ScreenEvent::ToggleImageExpand) => {
                dashboard.toggle_image_expand();
                true
            }
            (Screen::Home(dashboard), ScreenEvent::ResetDashboard) => {
                dashboard.reset_dashboard_position()
            }
            (Screen::ScheduleForm(form), ScreenEvent::ToggleDay { index }) => {
                form.toggle_day(index).is_some()
            }
            (Screen::ScheduleForm(form), ScreenEvent::OpenTimePicker) => {
                form.open_time_picker();
                true
            }
            (Screen::ScheduleForm(form), ScreenEvent::TimePicked { event }) => {
                form.handle_time_picker(event);
                true
            }
            (Screen::ScheduleForm(form), ScreenEvent::SetSubject { subject }) => {
                form.subject = subject;
                true
            }
            (Screen::ScheduleForm(form), ScreenEvent::SetLocation { location }) => {
                form.location = location;
                true
            }
            (Screen::Login(form), ScreenEvent::SetEmail { email }) => {
                form.email = email;
                true
            }
            (Screen::SignUp(form), ScreenEvent::SetEmail { email }) => {
                form.email = email;
                true
            }
            (Screen::EnterMail(form), ScreenEvent::SetEmail { email }) => {
                form.email = email;
                true
            }
            (Screen::Login(form), ScreenEvent::SetPassword { password }) => {
                form.password = password;
                true
            }
            (Screen::SignUp(form), ScreenEvent::SetPassword { password }) => {
                form.set_password(password);
                true
            }
            (Screen::SignUp(form), ScreenEvent::SetUsername { username }) => {
                form.username = username;
                true
            }
            (Screen::Login(form), ScreenEvent::TogglePasswordVisibility) => {
                form.toggle_password_visibility();
                true
            }
            (Screen::SignUp(form), ScreenEvent::TogglePasswordVisibility) => {
                form.toggle_password_visibility();
                true
            }
            (screen, event) => {
                warn!(screen = screen.route().key(), ?event, "Event not handled by screen");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::NO_TASKS_MESSAGE;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn shell() -> AppShell {
        AppShell::new(&AppConfig::default()).with_clock(fixed_now)
    }

    fn settle(shell: &mut AppShell) {
        for _ in 0..40 {
            shell.tick(Duration::from_millis(16));
        }
    }

    fn board(shell: &AppShell) -> &TaskBoard {
        match shell.screen() {
            Screen::Tasks(board) => board,
            other => panic!("expected tasks screen, got {other:?}"),
        }
    }

    #[test]
    fn test_starts_on_welcome() {
        let shell = shell();
        assert_eq!(shell.current_route(), Route::Welcome);
        assert_eq!(shell.screen(), &Screen::Static(Route::Welcome));
        assert_eq!(shell.drawer_phase(), DrawerPhase::Closed);
        assert!(!shell.is_drawer_open());
    }

    #[test]
    fn test_navigation_rebuilds_screen() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Tasks));
        shell.handle(ShellEvent::Screen(ScreenEvent::SetQuery {
            query: "zzz".to_string(),
        }));
        assert_eq!(board(&shell).empty_message(), Some(NO_TASKS_MESSAGE));

        shell.handle(ShellEvent::Navigate(Route::Home));
        shell.handle(ShellEvent::Navigate(Route::Tasks));
        assert_eq!(board(&shell).query(), "");
        assert_eq!(board(&shell).filtered().len(), 4);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Tasks));
        assert!(shell.handle(ShellEvent::Screen(ScreenEvent::RequestDelete {
            task_id: "Wash".to_string(),
        })));

        let dialog = shell.dialogs().top().unwrap();
        assert_eq!(dialog.title, "Delete Task");
        assert!(board(&shell).task("Wash").is_some());

        // Not cancelable by backdrop
        assert!(!shell.handle(ShellEvent::DismissDialog));
        // Screen input is blocked while the dialog is up
        assert!(!shell.handle(ShellEvent::Screen(ScreenEvent::SetQuery {
            query: "w".to_string(),
        })));

        assert!(shell.handle(ShellEvent::Dialog(DialogAction::Cancel)));
        assert!(board(&shell).task("Wash").is_some());
        assert!(board(&shell).pending_deletion().is_none());

        shell.handle(ShellEvent::Screen(ScreenEvent::RequestDelete {
            task_id: "Wash".to_string(),
        }));
        shell.handle(ShellEvent::Dialog(DialogAction::Confirm));
        assert!(board(&shell).task("Wash").is_none());
        assert!(board(&shell).checklist("Wash").is_none());
        assert!(!shell.dialogs().has_open());
    }

    #[test]
    fn test_checklist_rows_and_empty_state() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Tasks));
        assert!(shell.checklist_rows("Wash").is_none());

        shell.handle(ShellEvent::Screen(ScreenEvent::ToggleExpand {
            task_id: "Wash".to_string(),
        }));
        shell.handle(ShellEvent::Screen(ScreenEvent::ToggleChecklistEntry {
            task_id: "Wash".to_string(),
            index: 1,
        }));
        let rows = shell.checklist_rows("Wash").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].checked);
        assert!(rows[1].checked);
        assert_eq!(rows[1].label, "Option 2");

        assert!(shell.empty_state().is_none());
        shell.handle(ShellEvent::Screen(ScreenEvent::SetQuery {
            query: "nothing".to_string(),
        }));
        assert_eq!(shell.empty_state().unwrap().message, NO_TASKS_MESSAGE);
    }

    #[test]
    fn test_unknown_delete_shows_no_dialog() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Tasks));
        assert!(!shell.handle(ShellEvent::Screen(ScreenEvent::RequestDelete {
            task_id: "Nope".to_string(),
        })));
        assert!(!shell.dialogs().has_open());
    }

    #[test]
    fn test_drawer_blocks_screen_input() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Tasks));
        assert!(shell.handle(ShellEvent::Pinch {
            pointer_count: 2,
            scale: 0.8,
        }));
        assert!(shell.is_drawer_open());
        assert!(!shell.handle(ShellEvent::PressTab(NavigationTab::Home)));
        assert!(!shell.handle(ShellEvent::Screen(ScreenEvent::ToggleExpand {
            task_id: "Wash".to_string(),
        })));

        settle(&mut shell);
        assert_eq!(shell.drawer_phase(), DrawerPhase::Open);
    }

    #[test]
    fn test_delete_dialog_blocks_drawer_gestures() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Tasks));
        shell.handle(ShellEvent::Screen(ScreenEvent::RequestDelete {
            task_id: "Wash".to_string(),
        }));
        assert!(shell.dialogs().has_open());

        assert!(!shell.handle(ShellEvent::Pinch {
            pointer_count: 2,
            scale: 0.5,
        }));
        shell.handle(ShellEvent::Pointer(PointerEvent::down(1, 100.0, 400.0)));
        shell.handle(ShellEvent::Pointer(PointerEvent::down(2, 300.0, 400.0)));
        assert!(!shell.handle(ShellEvent::Pointer(PointerEvent::moved(2, 150.0, 400.0))));
        assert_eq!(shell.drawer_phase(), DrawerPhase::Closed);
        assert!(!shell.is_drawer_open());

        shell.handle(ShellEvent::Pointer(PointerEvent::up(1, 100.0, 400.0)));
        shell.handle(ShellEvent::Pointer(PointerEvent::up(2, 150.0, 400.0)));
        assert!(shell.handle(ShellEvent::Dialog(DialogAction::Cancel)));
        assert!(shell.handle(ShellEvent::Pinch {
            pointer_count: 2,
            scale: 0.5,
        }));
        assert_eq!(shell.drawer_phase(), DrawerPhase::Opening);
    }

    #[test]
    fn test_menu_selection_navigates_and_closes() {
        let mut shell = shell();
        shell.handle(ShellEvent::SetDrawerOpen(true));
        settle(&mut shell);
        assert_eq!(shell.drawer_phase(), DrawerPhase::Open);

        // "Tasks" is the third entry
        assert!(shell.handle(ShellEvent::SelectMenu(2)));
        assert_eq!(shell.current_route(), Route::Tasks);
        assert!(matches!(shell.screen(), Screen::Tasks(_)));
        assert_eq!(shell.drawer_phase(), DrawerPhase::Closing);
        assert!(!shell.is_drawer_open());

        settle(&mut shell);
        assert_eq!(shell.drawer_phase(), DrawerPhase::Closed);
    }

    #[test]
    fn test_menu_log_out_resets_to_welcome() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Home));
        shell.handle(ShellEvent::Navigate(Route::Tasks));
        shell.handle(ShellEvent::SetDrawerOpen(true));
        settle(&mut shell);

        let log_out = shell
            .drawer()
            .items()
            .iter()
            .position(|item| item.route == Route::LogOut)
            .unwrap();
        shell.handle(ShellEvent::SelectMenu(log_out));
        assert_eq!(shell.current_route(), Route::Welcome);
        assert!(!shell.navigation().can_go_back());
    }

    #[test]
    fn test_tab_bar_follows_navigation() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Home));
        assert_eq!(shell.tab_bar().active(), Some(NavigationTab::Home));

        assert!(shell.handle(ShellEvent::PressTab(NavigationTab::Checklist)));
        assert_eq!(shell.current_route(), Route::Tasks);
        assert_eq!(shell.tab_bar().active(), Some(NavigationTab::Checklist));

        assert!(!shell.handle(ShellEvent::PressTab(NavigationTab::Checklist)));
    }

    #[test]
    fn test_schedule_save_returns_to_timetable() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::TimeTable));
        shell.handle(ShellEvent::Navigate(Route::ScheduleForm));
        for event in [
            ScreenEvent::SetSubject {
                subject: "Physics".to_string(),
            },
            ScreenEvent::SetLocation {
                location: "Lab 2".to_string(),
            },
            ScreenEvent::ToggleDay { index: 2 },
            ScreenEvent::ToggleDay { index: 4 },
        ] {
            assert!(shell.handle(ShellEvent::Screen(event)));
        }
        assert!(shell.handle(ShellEvent::Screen(ScreenEvent::SaveSchedule)));

        assert_eq!(shell.current_route(), Route::TimeTable);
        assert_eq!(shell.screen(), &Screen::TimeTable);
        assert_eq!(shell.timetable().schedules().len(), 2);

        shell.handle(ShellEvent::Navigate(Route::Home));
        match shell.screen() {
            Screen::Home(dashboard) => {
                assert_eq!(dashboard.next_class().unwrap().subject, "Physics");
            }
            other => panic!("expected home screen, got {other:?}"),
        }
    }

    #[test]
    fn test_screen_mismatch_is_ignored() {
        let mut shell = shell();
        assert!(!shell.handle(ShellEvent::Screen(ScreenEvent::SaveSchedule)));
        assert_eq!(shell.current_route(), Route::Welcome);
    }

    #[test]
    fn test_signup_password_hint() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::SignUp));
        shell.handle(ShellEvent::Screen(ScreenEvent::SetPassword {
            password: "abc".to_string(),
        }));
        match shell.screen() {
            Screen::SignUp(form) => assert!(form.password_error().is_some()),
            other => panic!("expected sign-up screen, got {other:?}"),
        }
    }

    #[test]
    fn test_dashboard_ticks_with_shell() {
        let mut shell = shell();
        shell.handle(ShellEvent::Navigate(Route::Home));
        shell.handle(ShellEvent::Screen(ScreenEvent::ToggleImageExpand));
        settle(&mut shell);
        match shell.screen() {
            Screen::Home(dashboard) => assert!(dashboard.is_image_expanded()),
            other => panic!("expected home screen, got {other:?}"),
        }
    }

    #[test]
    fn test_resize_rejects_invalid_width() {
        let mut shell = shell();
        assert!(!shell.handle(ShellEvent::Resize { width: -1.0 }));
        assert!(shell.handle(ShellEvent::Resize { width: 430.0 }));
        assert_eq!(shell.frame().translate_x, -430.0);
    }
}
