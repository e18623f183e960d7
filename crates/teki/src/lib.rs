//! Transpiler from teki, a tiny line-oriented turtle language, to C programs that draw with
//! the BGI `graphics.h` API.
//!
//! ```text
//! nodraw
//! forward 50
//! draw
//! loop 4
//! forward 100
//! right 90
//! loopend
//! ```
//!
//! Loops are unrolled: the generated program contains the loop's body once per iteration.

mod emit;
mod interp;
mod parse;
mod typ;

pub use emit::{preamble, EPILOGUE};
pub use typ::{Color, Error};

use interp::Interp;

/// Translates a whole script into the source of a C program.
///
/// Fails on the first line that can't be translated; no partial output is produced.
pub fn transpile(source: &str) -> Result<String, Error> {
    Interp::new(source).run()
}
