//! User-facing notifications (toast equivalent).

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A fire-and-forget notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

/// Fire-and-forget notification display.
///
/// Panels hold an `Rc<dyn NotificationSink>` and never learn whether (or
/// how) the notice was rendered.
pub trait NotificationSink {
    fn show(&self, notice: Notice);
}

/// Sink that routes notices into the tracing pipeline.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn show(&self, notice: Notice) {
        match notice.severity {
            Severity::Error => {
                tracing::error!(title = %notice.title, "{}", notice.message);
            }
            Severity::Warning => {
                tracing::warn!(title = %notice.title, "{}", notice.message);
            }
            Severity::Info | Severity::Success => {
                tracing::info!(title = %notice.title, "{}", notice.message);
            }
        }
    }
}

/// Sink that records notices for assertions in tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    notices: RefCell<Vec<Notice>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices shown so far, clearing the record.
    pub fn drain(&self) -> Vec<Notice> {
        self.notices.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }
}

impl NotificationSink for CollectingSink {
    fn show(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}
