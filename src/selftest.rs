//! The fixed table of expressions the CLI checks with `--test`.

use std::fmt::Display;

use tracing::{info, warn};

use crate::{Config, ParseError, error::ErrorKind, eval::evaluate, parse::TreeBuilder};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expected {
    Value(f64),
    Rejected(ErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Case {
    pub expression: &'static str,
    pub expected: Expected,
}

pub const CASES: [Case; 8] = [
    Case {
        expression: "(4 + 5 * (7 - 3)) - 2",
        expected: Expected::Value(22.0),
    },
    Case {
        expression: "4+5+7/2",
        expected: Expected::Value(12.5),
    },
    Case {
        expression: "10+1",
        expected: Expected::Rejected(ErrorKind::MultiDigitNotSupported),
    },
    Case {
        expression: "-10",
        expected: Expected::Rejected(ErrorKind::InsufficientOperands),
    },
    Case {
        expression: "",
        expected: Expected::Rejected(ErrorKind::MalformedExpression),
    },
    Case {
        expression: "asdf",
        expected: Expected::Rejected(ErrorKind::InvalidCharacter),
    },
    Case {
        expression: "(2 * 4) + (8 * 5) - ( 6 / 3 )",
        expected: Expected::Value(46.0),
    },
    Case {
        expression: "((2 * 4) + (8 * 5) - ( 6 / 3 )) / 2",
        expected: Expected::Value(23.0),
    },
];

#[derive(Debug)]
pub struct Outcome {
    pub number: usize,
    pub case: Case,
    pub actual: Result<f64, ParseError>,
}

impl Outcome {
    /// Values are compared with exact `f64` equality; every expected value in
    /// the table is exactly representable.
    pub fn passed(&self) -> bool {
        match (self.case.expected, &self.actual) {
            (Expected::Value(expected), Ok(actual)) => *actual == expected,
            (Expected::Rejected(kind), Err(e)) => e.kind() == kind,
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

pub fn run(config: &Config) -> Report {
    let outcomes = CASES
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let number = i + 1;
            let name = format!("self-test #{number}");
            let actual = TreeBuilder::new(Some(&name), case.expression)
                .with_config(*config)
                .build()
                .map(|tree| evaluate(&tree));
            let outcome = Outcome {
                number,
                case: *case,
                actual,
            };
            if outcome.passed() {
                info!(number, expression = case.expression, "self-test passed");
            } else {
                warn!(number, expression = case.expression, "self-test failed");
            }
            outcome
        })
        .collect();

    Report { outcomes }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Test case        : {}", self.number)?;
        writeln!(f, "Expr             : {}", self.case.expression)?;
        match self.case.expected {
            Expected::Value(value) => {
                writeln!(f, "Valid Expr       : yes")?;
                writeln!(f, "Expected Value   : {value}")?;
            }
            Expected::Rejected(kind) => {
                writeln!(f, "Valid Expr       : no")?;
                writeln!(f, "Expected Error   : {kind}")?;
            }
        }
        match &self.actual {
            Ok(value) => writeln!(f, "Calculated Value : {value}")?,
            Err(e) => writeln!(f, "Reported Error   : {} ({e})", e.kind())?,
        }
        let verdict = if self.passed() { "Pass" } else { "Fail" };
        writeln!(f, "Test Result      : {verdict}")
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
            writeln!(f, "--------------------------------------")?;
        }
        write!(
            f,
            "{} passed, {} failed",
            self.passed(),
            self.failed()
        )
    }
}
