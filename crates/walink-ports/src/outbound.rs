use async_trait::async_trait;

use crate::error::PortError;
use crate::types::{Notice, NoticeLevel};

/// Fire-and-forget user notifications (toasts in the browser build).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);

    fn success(&self, message: &str) {
        self.notify(&Notice::new(NoticeLevel::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(&Notice::new(NoticeLevel::Error, message));
    }

    fn warning(&self, message: &str) {
        self.notify(&Notice::new(NoticeLevel::Warning, message));
    }

    fn info(&self, message: &str) {
        self.notify(&Notice::new(NoticeLevel::Info, message));
    }
}

/// String key-value persistence with localStorage semantics.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PortError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), PortError>;
}

/// Optional hooks on the phone input field.
pub trait InputFeedback: Send + Sync {
    fn shake_error(&self);
    fn success(&self);
}

/// Feedback sink that ignores every hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl InputFeedback for NoFeedback {
    fn shake_error(&self) {}
    fn success(&self) {}
}
