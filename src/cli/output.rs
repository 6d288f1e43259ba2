//! Labelled shell messages.
//!
//! Plain mode drops colour and is forced for scripts, so piped output stays
//! stable. Errors go to stderr; everything else goes to stdout.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

impl MessageKind {
    fn label(self) -> Option<&'static str> {
        match self {
            MessageKind::Success => Some("[ok]"),
            MessageKind::Warning => Some("[!]"),
            MessageKind::Error => Some("[x]"),
            MessageKind::Hint => Some("hint:"),
            MessageKind::Info | MessageKind::Section => None,
        }
    }
}

static PLAIN: AtomicBool = AtomicBool::new(false);

pub fn set_plain(plain: bool) {
    PLAIN.store(plain, Ordering::Relaxed);
    if plain {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}

pub fn is_plain() -> bool {
    PLAIN.load(Ordering::Relaxed)
}

/// Text for one message, coloured unless plain mode is on.
pub fn format_message(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let base = match (kind, kind.label()) {
        (MessageKind::Section, _) => format!("=== {} ===", text.trim()),
        (_, Some(label)) => format!("{label} {text}"),
        (_, None) => text,
    };
    if is_plain() {
        return base;
    }
    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Hint => base.dimmed().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        MessageKind::Error => eprintln!("{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints pre-rendered text (tables, reports) as-is.
pub fn block(text: &str) {
    println!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_carry_labels_only() {
        set_plain(true);
        assert_eq!(format_message(MessageKind::Success, "saved"), "[ok] saved");
        assert_eq!(format_message(MessageKind::Error, "boom"), "[x] boom");
        assert_eq!(format_message(MessageKind::Hint, "try again"), "hint: try again");
        assert_eq!(format_message(MessageKind::Section, " Ledger "), "=== Ledger ===");
        assert_eq!(format_message(MessageKind::Info, "P-1: 6"), "P-1: 6");
    }
}
