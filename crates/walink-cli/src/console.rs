use walink_ports::outbound::Notifier;
use walink_ports::types::{Notice, NoticeLevel};

/// Prints notices on stderr, one per line, so stdout carries only links
/// and history listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let marker = match notice.level {
            NoticeLevel::Success => "✔",
            NoticeLevel::Error => "✖",
            NoticeLevel::Warning => "⚠",
            NoticeLevel::Info => "ℹ",
        };
        eprintln!("{marker} {}", notice.message);
    }
}
