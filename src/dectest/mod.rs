//! A runner for [decTest] test vectors.
//!
//! [decTest]: https://speleotrove.com/decimal/dectest.html

#![cfg(test)]

mod op;
mod parse;

use std::{error, fmt};

use anyhow::{anyhow, Result};

pub use op::Op;
pub use parse::parse;

use crate::{
    ctx::{Condition, Context},
    dec::Decimal,
};

#[derive(Copy, Clone, Debug)]
pub struct Case<'a> {
    pub ctx: Context,
    pub id: &'a str,
    pub op: Op<'a>,
    pub conds: Condition,
}

impl Case<'_> {
    pub fn run(&self) -> Result<(), Failure<'_>> {
        self.try_run().map_err(|err| Failure { case: self, err })
    }

    fn try_run(&self) -> Result<()> {
        let ctx = &self.ctx;
        let (got, status) = match self.op {
            Op::Divide { lhs, rhs, .. } => parse_input(lhs)?.div(&parse_input(rhs)?, ctx),
            Op::SquareRoot { input, .. } => parse_input(input)?.sqrt(ctx),
            Op::ToSci { input, .. } => (parse_input(input)?, Condition::empty()),
        };
        self.check(&got, status)
    }

    fn check(&self, got: &Decimal, status: Condition) -> Result<()> {
        let got = got.to_string();
        let want = self.op.result();
        if got != want {
            Err(anyhow!("got {got}, expected {want}"))
        } else if status != self.conds {
            Err(anyhow!(
                "got conditions {status:?}, expected {:?}",
                self.conds
            ))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Case<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.op)
    }
}

fn parse_input(s: &str) -> Result<Decimal> {
    s.parse().map_err(|err| anyhow!("invalid operand `{s}`: {err}"))
}

/// A test case failure.
pub struct Failure<'a> {
    case: &'a Case<'a>,
    err: anyhow::Error,
}

impl error::Error for Failure<'_> {}

impl fmt::Display for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "test failure for `{}`: {}", self.case, self.err)
    }
}

impl fmt::Debug for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Runs every case in `s`, reporting all failures at once.
fn run(s: &str) {
    let cases = parse(s).unwrap();
    let failures = cases
        .iter()
        .filter_map(|case| case.run().err())
        .map(|err| err.to_string())
        .collect::<Vec<_>>();
    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}

#[test]
fn test_divide() {
    run(include_str!("../testdata/divide.decTest"));
}

#[test]
fn test_squareroot() {
    run(include_str!("../testdata/squareroot.decTest"));
}

#[test]
fn test_tosci() {
    run(include_str!("../testdata/tosci.decTest"));
}
