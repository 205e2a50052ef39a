//! String conversions.
//!
//! Parsing and printing follow the [numeric string][conv]
//! syntax. Parsing is exact: the result is never rounded.
//!
//! [conv]: https://speleotrove.com/decimal/daconvs.html

use core::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    dec::{Decimal, Kind},
    uint::{AllocError, Uint},
    util::{self, to_digits, to_exp},
};

/// The largest exponent magnitude accepted by the parser.
const MAX_ABS_EXP: i64 = 1_000_000_000_000_000;

/// An error returned when parsing a decimal from a string.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}")]
pub struct ParseError {
    kind: ErrorKind,
}

impl ParseError {
    const fn empty() -> Self {
        Self {
            kind: ErrorKind::Empty,
        }
    }

    const fn invalid(reason: &'static str) -> Self {
        Self {
            kind: ErrorKind::Invalid(reason),
        }
    }

    const fn exponent() -> Self {
        Self {
            kind: ErrorKind::Exponent,
        }
    }
}

impl From<AllocError> for ParseError {
    fn from(_: AllocError) -> Self {
        Self {
            kind: ErrorKind::Alloc,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
enum ErrorKind {
    #[error("cannot parse decimal from empty string")]
    Empty,
    #[error("invalid decimal literal: {0}")]
    Invalid(&'static str),
    #[error("exponent out of range")]
    Exponent,
    #[error("out of memory")]
    Alloc,
}

impl Decimal {
    /// Parses a decimal from a string.
    ///
    /// Leading and trailing whitespace is not allowed. Special
    /// values are matched case-insensitively: `Inf`,
    /// `Infinity`, `NaN` and `sNaN`, the NaNs optionally
    /// followed by a payload.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let mut s = s.as_bytes();
        if s.is_empty() {
            return Err(ParseError::empty());
        }

        let mut sign = false;
        if let Some((c @ (b'-' | b'+'), rest)) = s.split_first() {
            sign = *c == b'-';
            s = rest;
        }

        match s.first() {
            Some(b'0'..=b'9' | b'.') => {}
            Some(b'i' | b'I' | b'n' | b'N' | b's' | b'S') => return parse_special(sign, s),
            Some(_) => return Err(ParseError::invalid("expected digit or special")),
            None => return Err(ParseError::invalid("unexpected end of input")),
        }

        let (pre, rest) = split_digits(s);
        let (post, rest) = match rest.split_first() {
            Some((b'.', rest)) => split_digits(rest),
            _ => (&[][..], rest),
        };
        if pre.is_empty() && post.is_empty() {
            return Err(ParseError::invalid("expected digit"));
        }

        // The exponent is reduced by the number of digits after
        // the decimal point.
        let exp = parse_exp(rest)?
            .checked_sub(to_exp(post.len()))
            .filter(|exp| exp.abs() <= MAX_ABS_EXP)
            .ok_or(ParseError::exponent())?;

        let coeff = if post.is_empty() {
            Uint::from_ascii_digits(pre)?
        } else {
            let mut digits = Vec::new();
            digits
                .try_reserve_exact(pre.len() + post.len())
                .map_err(|_| AllocError)?;
            digits.extend_from_slice(pre);
            digits.extend_from_slice(post);
            Uint::from_ascii_digits(&digits)?
        };
        Ok(Self::finite(sign, coeff, exp))
    }
}

/// Splits `s` at the first non-digit.
fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let n = s.iter().take_while(|c| c.is_ascii_digit()).count();
    s.split_at(n)
}

fn parse_exp(mut s: &[u8]) -> Result<i64, ParseError> {
    if s.is_empty() {
        return Ok(0);
    }

    if let Some((b'e' | b'E', rest)) = s.split_first() {
        s = rest;
    } else {
        return Err(ParseError::invalid("expected `e` or `E`"));
    }

    let mut sign = false;
    if let Some((c @ (b'-' | b'+'), rest)) = s.split_first() {
        sign = *c == b'-';
        s = rest;
    }
    if s.is_empty() {
        return Err(ParseError::invalid("expected exponent digits"));
    }

    let mut exp: i64 = 0;
    for &c in s {
        let d = c.wrapping_sub(b'0');
        if d >= 10 {
            return Err(ParseError::invalid("expected digit"));
        }
        // Saturate so that long exponents are reported as out
        // of range rather than malformed.
        exp = exp.saturating_mul(10).saturating_add(i64::from(d));
    }
    Ok(if sign { -exp } else { exp })
}

/// Parses a special from `s`.
///
/// The sign has already been parsed.
fn parse_special(sign: bool, s: &[u8]) -> Result<Decimal, ParseError> {
    if s.eq_ignore_ascii_case(b"inf") || s.eq_ignore_ascii_case(b"infinity") {
        return Ok(Decimal::infinity(sign));
    }

    let (kind, payload) = if s.len() >= 4 && s[..4].eq_ignore_ascii_case(b"snan") {
        (Kind::SignalingNan, &s[4..])
    } else if s.len() >= 3 && s[..3].eq_ignore_ascii_case(b"nan") {
        (Kind::QuietNan, &s[3..])
    } else {
        return Err(ParseError::invalid("unknown special"));
    };
    if !payload.iter().all(u8::is_ascii_digit) {
        return Err(ParseError::invalid("expected digit"));
    }
    Ok(Decimal::special(sign, kind, Uint::from_ascii_digits(payload)?))
}

impl FromStr for Decimal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

/// Formats the number as a [scientific string][sci].
///
/// [sci]: https://speleotrove.com/decimal/daconvs.html#reftostr
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign {
            f.write_str("-")?;
        }
        match self.kind {
            Kind::Infinite => return f.write_str("Infinity"),
            Kind::QuietNan | Kind::SignalingNan => {
                if self.is_snan() {
                    f.write_str("s")?;
                }
                f.write_str("NaN")?;
                if !self.coeff.is_zero() {
                    write!(f, "{}", self.coeff)?;
                }
                return Ok(());
            }
            Kind::Finite => {}
        }

        let coeff = self.coeff.to_string();
        let digits = to_exp(coeff.len());
        util::debug_assert_all_digits(coeff.as_bytes());

        // `pre` is the number of digits before the '.'. It can
        // exceed an `i64` for extreme exponents.
        let mut pre = i128::from(digits) + i128::from(self.exp);
        let mut e = 0;
        if self.exp > 0 || pre < -5 {
            // Exponential form.
            e = pre - 1;
            pre = 1;
        }

        if pre <= 0 {
            // 0.000ddd
            f.write_str("0.")?;
            for _ in 0..pre.unsigned_abs() {
                f.write_str("0")?;
            }
            f.write_str(&coeff)?;
        } else if pre < i128::from(digits) {
            // `0 < pre < digits`, so it fits.
            let (lhs, rhs) = coeff.split_at(to_digits(pre as i64));
            write!(f, "{lhs}.{rhs}")?;
        } else {
            f.write_str(&coeff)?;
        }

        if e != 0 {
            write!(f, "E{e:+}")?;
        }
        Ok(())
    }
}
