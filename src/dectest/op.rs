use std::fmt;

/// A decTest operation and its operands.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Op<'a> {
    Divide {
        lhs: &'a str,
        rhs: &'a str,
        result: &'a str,
    },
    SquareRoot {
        input: &'a str,
        result: &'a str,
    },
    ToSci {
        input: &'a str,
        result: &'a str,
    },
}

impl<'a> Op<'a> {
    /// Returns the expected result.
    pub fn result(&self) -> &'a str {
        match self {
            Self::Divide { result, .. }
            | Self::SquareRoot { result, .. }
            | Self::ToSci { result, .. } => result,
        }
    }
}

impl fmt::Display for Op<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Divide { lhs, rhs, result } => {
                write!(f, "divide {lhs} {rhs} -> {result}")
            }
            Self::SquareRoot { input, result } => {
                write!(f, "squareroot {input} -> {result}")
            }
            Self::ToSci { input, result } => {
                write!(f, "tosci {input} -> {result}")
            }
        }
    }
}
