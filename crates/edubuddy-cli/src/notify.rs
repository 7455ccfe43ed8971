//! Terminal rendering of notices.

use edubuddy_types::{Notice, NoticeLevel};

/// Leading symbol for a notice level.
pub fn symbol(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "✔",
        NoticeLevel::Error => "✖",
        NoticeLevel::Info => "ℹ",
    }
}

/// One line, e.g. `✔ Logged out successfully.`
pub fn render(notice: &Notice) -> String {
    format!("{} {}", symbol(notice.level), notice.message)
}

/// Print to stdout, or stderr for errors.
pub fn show(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{}", render(notice));
    } else {
        println!("{}", render(notice));
    }
}
