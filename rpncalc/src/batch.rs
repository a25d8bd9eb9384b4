//! Run a file of expressions as test cases.
//!
//! One case per line, optionally followed by `=>` and the expected outcome:
//!
//! ```text
//! # comments and blank lines are skipped
//! 2 ^ 3 ^ 2 => 64
//! 4 / 0 => eval error
//! 1 + 1
//! ```
//!
//! An expectation is either a number or one of `lex error`, `syntax error`,
//! `eval error`. Every case runs regardless of how earlier ones went.

use std::fmt;
use std::io::{self, BufRead};

use crate::{evaluate_expression, CalcError};

const STAGES: &[&str] = &["lex", "syntax", "eval"];

#[derive(Clone, Debug, PartialEq)]
pub enum Expected {
    Value(f64),
    Failure(&'static str), // pipeline stage
}

impl Expected {
    pub fn parse(text: &str) -> Option<Expected> {
        let text = text.trim();
        if let Some(stage) = text.strip_suffix("error") {
            let stage = stage.trim();
            return STAGES.iter().copied().find(|s| *s == stage).map(Expected::Failure);
        }
        text.parse().ok().map(Expected::Value)
    }

    fn check(&self, result: &Result<f64, CalcError>) -> Verdict {
        match (self, result) {
            (Expected::Value(want), Ok(got)) if close(*want, *got) => Verdict::Passed,
            (Expected::Failure(stage), Err(e)) if e.stage() == *stage => Verdict::Passed,
            _ => Verdict::Failed(format!("expected {}", self)),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Expected::Value(v) => write!(f, "{}", v),
            Expected::Failure(stage) => write!(f, "{} error", stage),
        }
    }
}

fn close(want: f64, got: f64) -> bool {
    want == got || (want - got).abs() <= 1e-9 * want.abs().max(got.abs()).max(1.0)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    Unchecked,
    Passed,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseOutcome {
    pub line: usize,
    pub input: String,
    pub result: Result<f64, CalcError>,
    pub verdict: Verdict,
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {} => ", self.line, self.input)?;
        match self.result {
            Ok(value) => write!(f, "Result: {}", value)?,
            Err(ref e) => write!(f, "Error: {}", e)?,
        }
        match self.verdict {
            Verdict::Unchecked => Ok(()),
            Verdict::Passed => write!(f, " [PASS]"),
            Verdict::Failed(ref why) => write!(f, " [FAIL: {}]", why),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&Verdict) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.verdict)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(|v| *v == Verdict::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Failed(_)))
    }

    pub fn unchecked(&self) -> usize {
        self.count(|v| *v == Verdict::Unchecked)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        write!(f, "{} cases: {} passed, {} failed, {} unchecked",
               self.outcomes.len(), self.passed(), self.failed(), self.unchecked())
    }
}

fn run_case(line: usize, text: &str) -> CaseOutcome {
    let (input, expectation) = match text.split_once("=>") {
        Some((input, expected)) => (input.trim(), Some(expected.trim())),
        None => (text, None),
    };
    let result = evaluate_expression(input);
    let verdict = match expectation {
        None => Verdict::Unchecked,
        Some(text) => match Expected::parse(text) {
            Some(expected) => expected.check(&result),
            None => Verdict::Failed(format!("unreadable expectation '{}'", text)),
        },
    };
    if let Verdict::Failed(ref why) = verdict {
        tracing::warn!(line, input, why = why.as_str(), "batch case failed");
    }
    CaseOutcome{line, input: input.to_string(), result, verdict}
}

/// Evaluate every case in `reader`. Only I/O errors stop the run.
pub fn run_batch<R: BufRead>(reader: R) -> io::Result<BatchReport> {
    let mut report = BatchReport::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        report.outcomes.push(run_case(idx + 1, text));
    }
    tracing::info!(cases = report.outcomes.len(), failed = report.failed(), "batch finished");
    Ok(report)
}

///////////////////////////////////////////////////////////////////////////////
