use crate::{
    emit::Emitter,
    parse::{script, statement, Span},
    typ::{Command, Error, Turtle},
};

/// The `loop` that is currently being unrolled.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoopFrame {
    /// Index of the first line after `loop`.
    pub body_start: usize,
    /// Index of the matching `loopend`.
    pub body_end: usize,
    pub remaining: u32,
}

/// Finds the `loopend` matching the `loop` on line index `start`.
///
/// Lines that don't classify are skipped here; they get reported when the body runs.
pub fn find_loopend(lines: &[Span], start: usize) -> Result<usize, Error> {
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        match statement(*line) {
            Ok((_, Some(Command::LoopEnd))) => return Ok(i),
            Ok((_, Some(Command::Loop(_)))) => return Err(Error::nested(*line)),
            _ => {}
        }
    }
    Err(Error::unterminated(lines[start]))
}

/// A single transpilation run.
///
/// The interpreter walks the script with a cursor, one line at a time. Loops are unrolled by
/// moving the cursor back to the start of the body, so the body's statements are emitted once
/// per iteration while the loop header and footer are emitted once.
pub struct Interp<'a> {
    lines: Vec<Span<'a>>,
    cursor: usize,
    turtle: Turtle,
    pen_down: bool,
    // Invariant: there is never more than one active loop.
    frame: Option<LoopFrame>,
    emitter: Emitter,
}

impl<'a> Interp<'a> {
    pub fn new(source: &'a str) -> Self {
        Interp {
            lines: script(source),
            cursor: 0,
            turtle: Turtle::default(),
            pen_down: true,
            frame: None,
            emitter: Emitter::default(),
        }
    }

    #[cfg(test)]
    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    #[cfg(test)]
    pub fn pen_down(&self) -> bool {
        self.pen_down
    }

    #[cfg(test)]
    pub fn frame(&self) -> Option<LoopFrame> {
        self.frame
    }

    #[cfg(test)]
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Runs the line under the cursor. Returns `false` once the script is exhausted.
    pub fn step(&mut self) -> Result<bool, Error> {
        let Some(&line) = self.lines.get(self.cursor) else {
            return Ok(false);
        };
        log::debug!("{}: {:?}", line.location_line(), line.fragment());

        let cmd = match statement(line) {
            Ok((_, Some(cmd))) => cmd,
            Ok((_, None)) => {
                self.cursor += 1;
                return Ok(true);
            }
            Err(_) => return Err(Error::unrecognized(line)),
        };
        self.cursor += 1;

        match cmd {
            Command::Forward(dist) => self.walk(f64::from(dist)),
            Command::Backward(dist) => self.walk(-f64::from(dist)),
            Command::Left(deg) => self.turtle.rotate(deg.into()),
            Command::Right(deg) => self.turtle.rotate(-i64::from(deg)),
            Command::Draw => self.pen_down = true,
            Command::NoDraw => self.pen_down = false,
            Command::Color(c) => self.emitter.set_color(c),
            Command::BgColor(c) => self.emitter.set_bg_color(c),
            Command::Loop(count) => {
                if self.frame.is_some() {
                    return Err(Error::nested(line));
                }
                let body_end = find_loopend(&self.lines, self.cursor - 1)?;
                self.frame = Some(LoopFrame {
                    body_start: self.cursor,
                    body_end,
                    remaining: count,
                });
                self.emitter.open_loop(count);
            }
            Command::LoopEnd => {
                // Only the loopend found when the frame was opened closes it.
                let here = self.cursor - 1;
                let Some(frame) = self.frame.as_mut().filter(|f| f.body_end == here) else {
                    return Err(Error::unrecognized(line));
                };
                if frame.remaining > 1 {
                    frame.remaining -= 1;
                    log::trace!(
                        "rewinding to line {}, {} iterations left",
                        frame.body_start + 1,
                        frame.remaining
                    );
                    self.cursor = frame.body_start;
                } else {
                    self.frame = None;
                    self.emitter.close_loop();
                }
            }
        }
        Ok(true)
    }

    // A pen-down move paints a stroke but leaves the turtle where it was; only pen-up moves
    // change the turtle's position.
    fn walk(&mut self, dist: f64) {
        let dest = self.turtle.destination(dist);
        if self.pen_down {
            self.emitter.stroke(self.turtle.pos, dest);
        } else {
            self.turtle.pos = dest;
        }
    }

    pub fn run(mut self) -> Result<String, Error> {
        while self.step()? {}
        Ok(self.emitter.finish())
    }
}
