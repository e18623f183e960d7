use kurbo::{Point, Vec2};

use crate::parse::Span;

/// The drawing surface opened by the generated program.
pub struct Canvas;

impl Canvas {
    pub const WIDTH: i32 = 800;
    pub const HEIGHT: i32 = 800;

    /// Where every script's turtle starts out.
    pub fn center() -> Position {
        Position {
            x: i64::from(Canvas::WIDTH / 2),
            y: i64::from(Canvas::HEIGHT / 2),
        }
    }
}

/// Heading of a fresh turtle, in degrees.
pub const INITIAL_HEADING: i32 = 90;

// Pen-up moves of up to `u32::MAX` steps accumulate, so an `i32` isn't wide enough.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Turtle {
    pub pos: Position,
    // Invariant: always in [0, 360).
    heading: i32,
}

impl Default for Turtle {
    fn default() -> Self {
        Turtle {
            pos: Canvas::center(),
            heading: INITIAL_HEADING,
        }
    }
}

impl Turtle {
    #[cfg(test)]
    pub fn heading(&self) -> i32 {
        self.heading
    }

    /// The point `dist` steps away along the current heading.
    ///
    /// Coordinates are truncated towards zero after the projection, so a move along an axis
    /// never picks up rounding noise from the other one.
    pub fn destination(&self, dist: f64) -> Position {
        let radians = (f64::from(self.heading) * std::f64::consts::PI) / 180.0;
        let start = Point::new(self.pos.x as f64, self.pos.y as f64);
        let end = start + Vec2::from_angle(radians) * dist;
        Position {
            x: end.x as i64,
            y: end.y as i64,
        }
    }

    /// Turns counter-clockwise by `degrees` (clockwise if negative).
    pub fn rotate(&mut self, degrees: i64) {
        let heading = (i64::from(self.heading) + degrees.rem_euclid(360)).rem_euclid(360);
        self.heading = heading as i32;
    }
}

/// The sixteen colors of the BGI palette, in palette order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Color {
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Brown,
    LightGray,
    DarkGray,
    LightBlue,
    LightGreen,
    LightCyan,
    LightRed,
    LightMagenta,
    Yellow,
    White,
}

const PALETTE: [Color; 16] = [
    Color::Black,
    Color::Blue,
    Color::Green,
    Color::Cyan,
    Color::Red,
    Color::Magenta,
    Color::Brown,
    Color::LightGray,
    Color::DarkGray,
    Color::LightBlue,
    Color::LightGreen,
    Color::LightCyan,
    Color::LightRed,
    Color::LightMagenta,
    Color::Yellow,
    Color::White,
];

impl Color {
    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "BLACK",
            Color::Blue => "BLUE",
            Color::Green => "GREEN",
            Color::Cyan => "CYAN",
            Color::Red => "RED",
            Color::Magenta => "MAGENTA",
            Color::Brown => "BROWN",
            Color::LightGray => "LIGHTGRAY",
            Color::DarkGray => "DARKGRAY",
            Color::LightBlue => "LIGHTBLUE",
            Color::LightGreen => "LIGHTGREEN",
            Color::LightCyan => "LIGHTCYAN",
            Color::LightRed => "LIGHTRED",
            Color::LightMagenta => "LIGHTMAGENTA",
            Color::Yellow => "YELLOW",
            Color::White => "WHITE",
        }
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }
}

/// Accepts either the palette name or the palette index, e.g. `"CYAN"` or `"3"`.
impl TryFrom<&str> for Color {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PALETTE
            .iter()
            .copied()
            .find(|c| c.name() == value || c.index().to_string() == value)
            .ok_or(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Forward(u32),
    Backward(u32),
    Left(i32),
    Right(i32),
    Loop(u32),
    LoopEnd,
    Draw,
    NoDraw,
    Color(Color),
    BgColor(Color),
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("line {line}: I don't know how to {text:?}")]
    UnrecognizedCommand { line: u32, text: String },
    #[error("line {line}: expected loopend after {text:?}, found end of file")]
    UnterminatedLoop { line: u32, text: String },
    #[error("line {line}: {text:?} is inside another loop, and loops don't nest")]
    NestedLoop { line: u32, text: String },
}

impl Error {
    pub(crate) fn unrecognized(span: Span) -> Error {
        Error::UnrecognizedCommand {
            line: span.location_line(),
            text: span.fragment().trim().to_owned(),
        }
    }

    pub(crate) fn unterminated(span: Span) -> Error {
        Error::UnterminatedLoop {
            line: span.location_line(),
            text: span.fragment().trim().to_owned(),
        }
    }

    pub(crate) fn nested(span: Span) -> Error {
        Error::NestedLoop {
            line: span.location_line(),
            text: span.fragment().trim().to_owned(),
        }
    }

    /// The 1-based line that the error points at.
    pub fn line(&self) -> u32 {
        match self {
            Error::UnrecognizedCommand { line, .. }
            | Error::UnterminatedLoop { line, .. }
            | Error::NestedLoop { line, .. } => *line,
        }
    }

    /// The offending line, with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        match self {
            Error::UnrecognizedCommand { text, .. }
            | Error::UnterminatedLoop { text, .. }
            | Error::NestedLoop { text, .. } => text,
        }
    }
}
