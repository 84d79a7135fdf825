use serde::Serialize;

use walink_core::link::WhatsAppLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// A user-facing message handed to a [`Notifier`](crate::outbound::Notifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// One history row as displayed: the link and the number it points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntryView {
    pub link: String,
    pub phone_number: String,
}

impl From<&WhatsAppLink> for HistoryEntryView {
    fn from(link: &WhatsAppLink) -> Self {
        Self {
            link: link.as_str().to_string(),
            phone_number: link.phone_number().to_string(),
        }
    }
}

/// Outcome of a generate request that did not fail validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Generated(WhatsAppLink),
    /// Another request was still in progress; nothing happened.
    Busy,
}
