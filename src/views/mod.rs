//! The client's pages, as headless components.
//!
//! Each component keeps its own state, talks to the server through an
//! [`Api`](crate::Api) and reports what should happen next with a
//! [`Submission`]. Rendering is plain text.

mod create_ride;
mod login;
mod navbar;
mod ride_list;
mod signup;

pub use create_ride::{FormError, RideCreationForm};
pub use login::LoginForm;
pub use navbar::{DeleteOutcome, NavBar};
pub use ride_list::{RideEntry, RideListView};
pub use signup::SignUpForm;

use crate::Route;
use std::fmt::{self, Display, Formatter};

/// What a component wants to happen after the user did something.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Submission {
    /// Where to go next. `None` means stay on the current page.
    pub navigate_to: Option<Route>,
    /// A short-lived notification to show the user.
    pub toast: Option<Toast>,
}

impl Submission {
    pub fn stay() -> Self { Submission::default() }

    pub fn navigate(route: Route) -> Self {
        Submission {
            navigate_to: Some(route),
            toast: None,
        }
    }

    pub fn with_toast(self, toast: Toast) -> Self {
        Submission {
            toast: Some(toast),
            ..self
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Toast {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Toast {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

impl Display for Toast {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
        };

        write!(f, "{} {}", marker, self.message)
    }
}

/// Render a form field, hiding secrets.
fn field(out: &mut String, label: &str, value: &str, secret: bool) {
    let shown = if secret {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    out.push_str(&format!("{:<16}{}\n", format!("{}:", label), shown));
}
