extern crate termcolor;

use std::{io::Write, sync::Mutex};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Progress,
    Ok,
    Error,
}
impl Status {
    fn color(self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Progress => Color::Cyan,
            Self::Ok => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

/// Receives the human readable progress of an extraction.
pub trait Reporter: Send + Sync {
    fn report(&self, status: Status, typ: &str, message: &str);
}

pub struct Console {
    stream: Mutex<StandardStream>,
}
impl Console {
    pub fn stderr(choice: ColorChoice) -> Self {
        Self {
            stream: Mutex::new(StandardStream::stderr(choice)),
        }
    }
}
impl Reporter for Console {
    #[allow(unused_must_use)]
    fn report(&self, status: Status, typ: &str, message: &str) {
        if let Ok(mut stream) = self.stream.lock() {
            stream.set_color(
                ColorSpec::new()
                    .set_fg(Some(status.color()))
                    .set_intense(true),
            );
            write!(stream, "{:>8}: ", typ);
            stream.reset();
            writeln!(stream, "{}", message);
            stream.flush();
        }
    }
}

pub struct Quiet;
impl Reporter for Quiet {
    fn report(&self, _status: Status, _typ: &str, _message: &str) {}
}
