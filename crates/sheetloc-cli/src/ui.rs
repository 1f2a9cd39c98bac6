// Console output helpers. Status lines go to stderr; stdout carries only the
// command's result (text summary or JSON).

use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

static COLOR: AtomicBool = AtomicBool::new(false);

pub fn set_color(enabled: bool) {
    COLOR.store(enabled, Ordering::Relaxed);
}

pub fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy)]
pub enum Tone {
    Ok,
    Info,
    Warn,
    Err,
}

pub fn decorate(tone: Tone, msg: &str) -> String {
    let icon = match tone {
        Tone::Ok => "✔",
        Tone::Info => "ℹ",
        Tone::Warn => "⚠",
        Tone::Err => "✖",
    };
    if !color_enabled() {
        return format!("{icon} {msg}");
    }
    match tone {
        Tone::Ok => format!("{} {}", icon.green(), msg.green()),
        Tone::Info => format!("{} {}", icon.cyan(), msg),
        Tone::Warn => format!("{} {}", icon.yellow(), msg.yellow()),
        Tone::Err => format!("{} {}", icon.red(), msg.red()),
    }
}

macro_rules! ui_ok {
    ($($arg:tt)*) => {{
        eprintln!("{}", $crate::ui::decorate($crate::ui::Tone::Ok, &format!($($arg)*)));
    }};
}

macro_rules! ui_info {
    ($($arg:tt)*) => {{
        eprintln!("{}", $crate::ui::decorate($crate::ui::Tone::Info, &format!($($arg)*)));
    }};
}

macro_rules! ui_warn {
    ($($arg:tt)*) => {{
        eprintln!("{}", $crate::ui::decorate($crate::ui::Tone::Warn, &format!($($arg)*)));
    }};
}

macro_rules! ui_err {
    ($($arg:tt)*) => {{
        eprintln!("{}", $crate::ui::decorate($crate::ui::Tone::Err, &format!($($arg)*)));
    }};
}

macro_rules! ui_out {
    ($($arg:tt)*) => {{
        println!($($arg)*);
    }};
}
