//! User-facing messages.
//! Prefixed lines (`ok:`, `info:`, `warn:`, `error:`), colored only when
//! stdout is a TTY. Results go to stdout, problems to stderr.

use owo_colors::{AnsiColors, OwoColorize};

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Info,
    Warn,
    Error,
}

impl Tone {
    fn prefix(self) -> &'static str {
        match self {
            Tone::Success => "ok:",
            Tone::Info => "info:",
            Tone::Warn => "warn:",
            Tone::Error => "error:",
        }
    }

    fn color(self) -> AnsiColors {
        match self {
            Tone::Success => AnsiColors::Green,
            Tone::Info => AnsiColors::Cyan,
            Tone::Warn => AnsiColors::Yellow,
            Tone::Error => AnsiColors::Red,
        }
    }
}

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn emit(tone: Tone, msg: &str) {
    let prefix = if is_tty() {
        tone.prefix().color(tone.color()).bold().to_string()
    } else {
        tone.prefix().to_string()
    };
    match tone {
        Tone::Success | Tone::Info => println!("{prefix} {msg}"),
        Tone::Warn | Tone::Error => eprintln!("{prefix} {msg}"),
    }
}

pub fn print_success(msg: &str) {
    emit(Tone::Success, msg);
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}
