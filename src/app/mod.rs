//! The desktop form
//!
//! [`controller`] holds the form state and the action handlers and is usable
//! without a window; `window` renders it with eframe when the `gui` feature
//! is enabled.

pub mod controller;

#[cfg(feature = "gui")]
#[cfg_attr(docsrs, doc(cfg(feature = "gui")))]
pub mod window;

pub use controller::{Dialogs, FormController, FormState};

/// Severity of a message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation or cancellation
    Info,
    /// Something was skipped but the action went ahead
    Warning,
    /// The action failed
    Error,
}

/// A dismissable message produced by a form action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Window title
    pub title: String,
    /// Body text
    pub message: String,
}

impl Notice {
    /// Informational notice
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    /// Warning notice
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    /// Error notice
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}
