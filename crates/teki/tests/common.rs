use std::path::Path;

use teki::Error;

/// One case from a fixture file:
///
/// ```text
/// === name of the case
/// script lines
/// ---
/// expected lines
/// ```
#[derive(Default)]
pub struct Case {
    name: String,
    input: String,
    expected: String,
}

// The generated statements, minus the fixed preamble and epilogue, one per line.
fn statements(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

fn exec_one(s: &str) -> Result<Vec<String>, Error> {
    let out = teki::transpile(dbg!(s))?;
    let preamble = teki::preamble();
    assert!(out.starts_with(&preamble));
    assert!(out.ends_with(teki::EPILOGUE));
    Ok(statements(
        &out[preamble.len()..out.len() - teki::EPILOGUE.len()],
    ))
}

fn kind(e: &Error) -> &'static str {
    match e {
        Error::UnrecognizedCommand { .. } => "unrecognized",
        Error::UnterminatedLoop { .. } => "unterminated",
        Error::NestedLoop { .. } => "nested",
    }
}

fn parse_loc(s: &str) -> (u32, &str, &str) {
    let mut split = s.trim().splitn(3, ' ');
    let line = split.next().unwrap().parse().unwrap();
    let kind = split.next().unwrap();
    let rest = split.next().unwrap();
    (line, kind, rest)
}

impl Case {
    fn exec(&self) {
        let a = exec_one(&self.input).unwrap();
        assert_eq!(a, statements(&self.expected), "{}", self.name);
    }

    fn exec_failure(&self) {
        let e = exec_one(&self.input).unwrap_err();
        assert_eq!(
            parse_loc(&self.expected),
            (e.line(), kind(&e), e.text()),
            "{}",
            self.name
        );
    }
}

pub fn read_cases(path: impl AsRef<Path>) -> Vec<Case> {
    let text = std::fs::read_to_string(path).unwrap();
    let mut cases: Vec<Case> = Vec::new();
    let mut in_expected = false;

    for line in text.split_inclusive('\n') {
        if let Some(name) = line.strip_prefix("=== ") {
            cases.push(Case {
                name: name.trim().to_owned(),
                ..Case::default()
            });
            in_expected = false;
        } else if line.trim_end() == "---" {
            in_expected = true;
        } else if let Some(case) = cases.last_mut() {
            if in_expected {
                case.expected += line;
            } else {
                case.input += line;
            }
        }
    }
    cases
}

#[test]
fn text_tests() {
    let cases = read_cases("tests/transpile.txt");
    assert!(!cases.is_empty());
    for case in cases {
        case.exec();
    }
}

#[test]
fn exec_failures() {
    let cases = read_cases("tests/failures.txt");
    assert!(!cases.is_empty());
    for case in cases {
        case.exec_failure();
    }
}
