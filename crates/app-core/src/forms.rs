//! Sign-in, sign-up and password recovery forms
//!
//! These hold field state only. Nothing here authenticates anyone; the only
//! validation is the inline password-length hint on sign-up.

use serde::{Deserialize, Serialize};

/// Minimum password length before the sign-up hint clears
pub const MIN_PASSWORD_LEN: usize = 8;

/// Inline hint shown while the sign-up password is too short
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long.";

/// Icon for a password visibility toggle
pub fn visibility_icon(visible: bool) -> &'static str {
    if visible {
        "eye"
    } else {
        "eye-off"
    }
}

/// Login screen fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// E-mail
    pub email: String,
    /// Password
    pub password: String,
    /// Whether the password is shown in clear text
    pub password_visible: bool,
}

impl LoginForm {
    /// Show or hide the password; returns the new state
    pub fn toggle_password_visibility(&mut self) -> bool {
        self.password_visible = !self.password_visible;
        self.password_visible
    }

    /// Icon for the visibility toggle
    pub fn password_icon(&self) -> &'static str {
        visibility_icon(self.password_visible)
    }
}

/// Sign-up screen fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpForm {
    /// Username
    pub username: String,
    /// E-mail
    pub email: String,
    password: String,
    /// Whether the password is shown in clear text
    pub password_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_error: Option<String>,
}

impl SignUpForm {
    /// Current password
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Update the password and its inline hint
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.password_error = (self.password.chars().count() < MIN_PASSWORD_LEN)
            .then(|| PASSWORD_TOO_SHORT.to_string());
    }

    /// Inline hint, if any
    pub fn password_error(&self) -> Option<&str> {
        self.password_error.as_deref()
    }

    /// Show or hide the password; returns the new state
    pub fn toggle_password_visibility(&mut self) -> bool {
        self.password_visible = !self.password_visible;
        self.password_visible
    }

    /// Icon for the visibility toggle
    pub fn password_icon(&self) -> &'static str {
        visibility_icon(self.password_visible)
    }
}

/// Forgot-password e-mail entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterMailForm {
    /// E-mail
    pub email: String,
}

impl EnterMailForm {
    /// Whether "Continue" is enabled
    pub fn can_continue(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_visibility_toggle() {
        let mut form = LoginForm::default();
        assert_eq!(form.password_icon(), "eye-off");
        assert!(form.toggle_password_visibility());
        assert_eq!(form.password_icon(), "eye");
    }

    #[test]
    fn test_signup_password_hint() {
        let mut form = SignUpForm::default();
        assert_eq!(form.password_error(), None);

        form.set_password("short");
        assert_eq!(form.password_error(), Some(PASSWORD_TOO_SHORT));

        form.set_password("longenough");
        assert_eq!(form.password_error(), None);
        assert_eq!(form.password(), "longenough");

        form.set_password("");
        assert!(form.password_error().is_some());
    }

    #[test]
    fn test_enter_mail() {
        let mut form = EnterMailForm::default();
        assert!(!form.can_continue());
        form.email = "  ".to_string();
        assert!(!form.can_continue());
        form.email = "student@example.com".to_string();
        assert!(form.can_continue());
    }
}
