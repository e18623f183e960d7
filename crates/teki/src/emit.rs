use std::fmt::Display;

use crate::typ::{Canvas, Color, Position};

/// Closes the generated `main`: wait for a key, tear down the window and exit cleanly.
pub const EPILOGUE: &str = "\n\tgetch();\n\tclosegraph();\n\treturn 0;\n}\n";

/// Opens the generated `main` and the drawing window.
pub fn preamble() -> String {
    format!(
        "#include <graphics.h>\n#include <stdlib.h>\n#include <stdio.h>\n\nint main()\n{{\n\tinitwindow({}, {});\n\n",
        Canvas::WIDTH,
        Canvas::HEIGHT
    )
}

/// Accumulates the C statements of a generated program.
#[derive(Debug)]
pub struct Emitter {
    out: String,
    depth: usize,
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter {
            out: preamble(),
            depth: 0,
        }
    }
}

impl Emitter {
    fn stmt(&mut self, stmt: impl Display) {
        for _ in 0..=self.depth {
            self.out.push('\t');
        }
        self.out += &stmt.to_string();
        self.out.push('\n');
    }

    pub fn stroke(&mut self, from: Position, to: Position) {
        self.stmt(format_args!(
            "line({}, {}, {}, {});",
            from.x, from.y, to.x, to.y
        ));
    }

    pub fn open_loop(&mut self, count: u32) {
        self.stmt(format_args!("for (int i = 0; i < {count}; i++) {{"));
        self.depth += 1;
    }

    pub fn close_loop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.stmt("}");
    }

    pub fn set_color(&mut self, color: Color) {
        self.stmt(format_args!("setcolor({});", color.name()));
    }

    pub fn set_bg_color(&mut self, color: Color) {
        self.stmt(format_args!("setbkcolor({});", color.name()));
        self.stmt("cleardevice();");
    }

    /// The statements emitted so far, without the epilogue.
    #[cfg(test)]
    pub fn body(&self) -> &str {
        &self.out
    }

    pub fn finish(mut self) -> String {
        self.out += EPILOGUE;
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program() {
        let out = Emitter::default().finish();
        assert!(out.starts_with("#include <graphics.h>\n"));
        assert!(out.contains("initwindow(800, 800);"));
        assert_eq!(out, preamble() + EPILOGUE);
    }

    #[test]
    fn loop_body_is_indented() {
        let mut e = Emitter::default();
        e.open_loop(2);
        e.stroke(Position { x: 1, y: 2 }, Position { x: 3, y: 4 });
        e.close_loop();
        e.set_bg_color(Color::Cyan);

        let body = &e.body()[preamble().len()..];
        assert_eq!(
            body,
            "\tfor (int i = 0; i < 2; i++) {\n\t\tline(1, 2, 3, 4);\n\t}\n\tsetbkcolor(CYAN);\n\tcleardevice();\n"
        );
    }
}
