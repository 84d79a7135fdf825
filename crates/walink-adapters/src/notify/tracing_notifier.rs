use walink_ports::outbound::Notifier;
use walink_ports::types::{Notice, NoticeLevel};

/// Sends notices to the log instead of a UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(kind = ?notice.level, message = %notice.message, "notice")
            }
            NoticeLevel::Warning => tracing::warn!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::error!(message = %notice.message, "notice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_is_accepted_without_subscriber() {
        let notifier = TracingNotifier;
        notifier.success("done");
        notifier.info("info");
        notifier.warning("careful");
        notifier.error("failed");
    }
}
