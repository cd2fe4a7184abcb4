//! Types for tracking console UI state.

use crate::models::{LoginCredentials, UserCreate};

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Login,
    Dashboard,
    Mines,
    Alerts,
    Environment,
    Equipment,
    Maintenance,
}

impl Screen {
    /// Screens reachable with the number keys, in key order.
    pub const NAVIGABLE: [Screen; 6] = [
        Screen::Dashboard,
        Screen::Mines,
        Screen::Alerts,
        Screen::Environment,
        Screen::Equipment,
        Screen::Maintenance,
    ];

    /// `'1'` is the dashboard, `'6'` maintenance.
    pub fn from_digit(c: char) -> Option<Screen> {
        let index = c.to_digit(10)?.checked_sub(1)? as usize;
        Self::NAVIGABLE.get(index).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign in",
            Screen::Dashboard => "Dashboard",
            Screen::Mines => "Mines",
            Screen::Alerts => "Alerts",
            Screen::Environment => "Environment",
            Screen::Equipment => "Equipment",
            Screen::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    SignIn,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Username,
    Email,
    FullName,
    Password,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Username => "Username",
            FormField::Email => "Email",
            FormField::FullName => "Full name",
            FormField::Password => "Password",
        }
    }
}

const SIGN_IN_FIELDS: &[FormField] = &[FormField::Username, FormField::Password];
const REGISTER_FIELDS: &[FormField] = &[
    FormField::Username,
    FormField::Email,
    FormField::FullName,
    FormField::Password,
];

/// Controlled values of the sign-in / register form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub mode: FormMode,
    focus: usize,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    /// A login or register call is in flight
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn fields(&self) -> &'static [FormField] {
        match self.mode {
            FormMode::SignIn => SIGN_IN_FIELDS,
            FormMode::Register => REGISTER_FIELDS,
        }
    }

    pub fn focused(&self) -> FormField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn is_last_field(&self) -> bool {
        self.focus + 1 >= self.fields().len()
    }

    /// Switch between signing in and registering. Username and password are kept.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            FormMode::SignIn => FormMode::Register,
            FormMode::Register => FormMode::SignIn,
        };
        self.focus = 0;
        self.error = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::FullName => &self.full_name,
            FormField::Password => &self.password,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::FullName => &mut self.full_name,
            FormField::Password => &mut self.password,
        }
    }

    pub fn push(&mut self, c: char) {
        let field = self.focused();
        self.value_mut(field).push(c);
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        self.value_mut(field).pop();
    }

    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials::new(self.username.trim(), self.password.clone())
    }

    pub fn new_user(&self) -> UserCreate {
        UserCreate::new(self.username.trim(), self.email.trim(), self.password.clone())
            .with_full_name(self.full_name.trim())
    }

    /// Forget everything but the username.
    pub fn reset(&mut self) {
        let username = std::mem::take(&mut self.username);
        *self = Self {
            username,
            ..Self::default()
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Row a delete was requested for, waiting for `y`/`n`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub screen: Screen,
    pub id: i64,
    pub label: String,
}

/// Selected row per screen.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    rows: std::collections::HashMap<Screen, usize>,
}

impl Selection {
    pub fn index(&self, screen: Screen) -> usize {
        self.rows.get(&screen).copied().unwrap_or(0)
    }

    /// Row for a list of `len` items, clamped to the last one.
    pub fn clamped(&self, screen: Screen, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.index(screen).min(len - 1))
        }
    }

    pub fn move_up(&mut self, screen: Screen) {
        let row = self.rows.entry(screen).or_insert(0);
        *row = row.saturating_sub(1);
    }

    pub fn move_down(&mut self, screen: Screen, len: usize) {
        let row = self.rows.entry(screen).or_insert(0);
        if *row + 1 < len {
            *row += 1;
        }
    }

    pub fn reset(&mut self) {
        self.rows.clear();
    }
}
