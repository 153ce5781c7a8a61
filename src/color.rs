extern crate termcolor;

use termcolor::{Color, ColorSpec, WriteColor};

macro_rules! get_version {
    ($file:expr) => {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " ",
            include_str!(concat!(env!("OUT_DIR"), "/", $file))
        )
    };
}

pub fn set_fg<W: WriteColor>(dest: &mut W, color: Color) {
    dest.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true))
        .expect("Error: can't set output color");
}
pub fn reset_fg<W: WriteColor>(dest: &mut W) {
    dest.reset().expect("Error: Can't reset color");
}

macro_rules! write_color {
    ($dest:expr, $color:expr, $typ:expr, $($arg:tt)*) => { {
        $crate::color::set_fg($dest, $color);
        write!($dest, "{:>8}: ", $typ).expect("Failed to write output");
        $crate::color::reset_fg($dest);
        writeln!($dest, $($arg)*).expect("Failed to write output");
    }
    };
}

macro_rules! write_error {
    ($dest:expr, $typ:expr, $($arg:tt)*) => {
        write_color!($dest, termcolor::Color::Red, $typ, $($arg)*);
    };
}

#[allow(unused_macros)]
macro_rules! write_info {
    ($dest:expr, $typ:expr, $($arg:tt)*) => {
        write_color!($dest, termcolor::Color::Blue, $typ, $($arg)*);
    };
}

macro_rules! write_ok {
    ($dest:expr, $typ:expr, $($arg:tt)*) => {
        write_color!($dest, termcolor::Color::Green, $typ, $($arg)*);
    };
}

#[allow(unused_macros)]
macro_rules! write_progress {
    ($dest:expr, $typ:expr, $($arg:tt)*) => {
        write_color!($dest, termcolor::Color::Cyan, $typ, $($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use termcolor::Buffer;

    #[test]
    fn tags_are_right_aligned() {
        let mut buf = Buffer::no_color();
        write_ok!(&mut buf, "Success", "Extracted {} problems of {}", 3, "START50");
        write_error!(&mut buf, "Fail", "no listing");
        write_info!(&mut buf, "Contest", "Starters 50");
        write_progress!(&mut buf, "Running", "P1");
        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            " Success: Extracted 3 problems of START50\n    Fail: no listing\n Contest: Starters 50\n Running: P1\n"
        );
    }
}
