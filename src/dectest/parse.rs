use anyhow::{bail, Context as _, Result};

use super::{op::Op, Case};
use crate::ctx::{Condition, Context, RoundingMode};

/// Parses test cases.
///
/// Directives apply to every case that follows them.
pub fn parse(s: &str) -> Result<Vec<Case<'_>>> {
    let mut ctx = Context::new(9).with_traps(Condition::empty());
    let mut cases = Vec::new();
    for (i, line) in s.lines().enumerate() {
        let i = i + 1;
        let tokens = Tokens::new(line)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("#{i}: unable to tokenize `{line}`"))?;
        let Some((&first, rest)) = tokens.split_first() else {
            continue;
        };

        if let Some(kw) = first.strip_suffix(':') {
            let [v] = rest else {
                bail!("#{i}: directive `{kw}` needs exactly one value");
            };
            ctx = directive(ctx, kw, v).with_context(|| format!("#{i}: bad directive"))?;
            continue;
        }

        let (op, conds) =
            parse_op(rest).with_context(|| format!("#{i}: unable to parse op: `{line}`"))?;
        cases.push(Case {
            ctx,
            id: first,
            op,
            conds,
        });
    }
    if cases.is_empty() {
        bail!("no test cases");
    }
    Ok(cases)
}

fn directive(ctx: Context, kw: &str, v: &str) -> Result<Context> {
    let ctx = match kw.to_ascii_lowercase().as_str() {
        "version" | "extended" => ctx,
        "precision" => ctx.with_precision(v.parse().context("precision")?),
        "rounding" => ctx.with_rounding_mode(
            RoundingMode::try_from_str(&v.to_ascii_lowercase())
                .with_context(|| format!("invalid rounding mode: `{v}`"))?,
        ),
        "maxexponent" => ctx.with_emax(v.parse().context("maxExponent")?),
        "minexponent" => ctx.with_emin(v.parse().context("minExponent")?),
        "clamp" => ctx.with_clamp(v.parse::<u8>().context("clamp")? == 1),
        // Not part of the decTest format: caps the size of
        // precision-sized buffers.
        "alloclimit" => ctx.with_alloc_limit(match v {
            "none" => None,
            v => Some(v.parse().context("allocLimit")?),
        }),
        _ => bail!("unknown directive: `{kw}`"),
    };
    Ok(ctx)
}

/// Parses `op operands... -> result conditions...`.
fn parse_op<'a>(tokens: &[&'a str]) -> Result<(Op<'a>, Condition)> {
    let Some(arrow) = tokens.iter().position(|&t| t == "->") else {
        bail!("missing `->`");
    };
    let (lhs, rhs) = tokens.split_at(arrow);
    let Some((&name, operands)) = lhs.split_first() else {
        bail!("missing operation");
    };
    let Some((&result, conds)) = rhs.get(1..).and_then(<[_]>::split_first) else {
        bail!("missing result");
    };

    let op = match (name.to_ascii_lowercase().as_str(), operands) {
        ("divide", &[lhs, rhs]) => Op::Divide { lhs, rhs, result },
        ("squareroot", &[input]) => Op::SquareRoot { input, result },
        ("tosci", &[input]) => Op::ToSci { input, result },
        ("divide" | "squareroot" | "tosci", _) => {
            bail!("wrong number of operands for `{name}`")
        }
        _ => bail!("unknown op: `{name}`"),
    };

    let mut set = Condition::empty();
    for &c in conds {
        set |= Condition::try_from_str(c).with_context(|| format!("unknown condition: `{c}`"))?;
    }
    Ok((op, set))
}

/// Splits a line into whitespace-separated tokens.
///
/// Tokens may be quoted with `'` or `"`. A `--` outside quotes
/// starts a comment.
struct Tokens<'a> {
    s: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(s: &'a str) -> Self {
        Self { s }
    }

    fn parse_quoted_token(&mut self, quote: char) -> Result<&'a str> {
        let Some((token, rest)) = self.s.split_once(quote) else {
            bail!("unterminated quote");
        };
        self.s = rest;
        Ok(token)
    }

    fn parse_unquoted_token(&mut self) -> &'a str {
        let (token, rest) = self
            .s
            .split_once(char::is_whitespace)
            .unwrap_or((self.s, ""));
        self.s = rest;
        token
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        self.s = self.s.trim_start();
        if self.s.is_empty() || self.s.starts_with("--") {
            self.s = "";
            return None;
        }
        let mut chars = self.s.chars();
        match chars.next() {
            Some(quote @ ('\'' | '"')) => {
                self.s = chars.as_str();
                Some(self.parse_quoted_token(quote))
            }
            _ => Some(Ok(self.parse_unquoted_token())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let got = Tokens::new("  div1 divide '1' \"2\" -> 0.5 Inexact -- trailing")
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(got, ["div1", "divide", "1", "2", "->", "0.5", "Inexact"]);
        assert!(Tokens::new("x 'open").collect::<Result<Vec<_>>>().is_err());
    }

    #[test]
    fn test_parse() {
        let s = "\
-- A comment.
precision: 5
rounding: half_up
maxExponent: 99
minexponent: -99
clamp: 1
allocLimit: 10

t1 divide 1 3 -> 0.33333 Inexact Rounded
t2 squareroot '-1' -> NaN Invalid_operation
";
        let cases = parse(s).unwrap();
        assert_eq!(cases.len(), 2);
        let ctx = cases[0].ctx;
        assert_eq!(ctx.precision(), 5);
        assert_eq!(ctx.rounding_mode(), RoundingMode::ToNearestAway);
        assert_eq!((ctx.emax(), ctx.emin()), (99, -99));
        assert!(ctx.clamp());
        assert_eq!(ctx.alloc_limit(), Some(10));
        assert_eq!(
            cases[0].op,
            Op::Divide {
                lhs: "1",
                rhs: "3",
                result: "0.33333"
            }
        );
        assert_eq!(cases[0].conds, Condition::INEXACT | Condition::ROUNDED);
        assert_eq!(cases[1].id, "t2");
        assert_eq!(cases[1].conds, Condition::INVALID_OPERATION);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse("precision: x").is_err());
        assert!(parse("t1 divide 1 -> 1").is_err());
        assert!(parse("t1 frobnicate 1 -> 1").is_err());
        assert!(parse("t1 divide 1 2 -> 0.5 Bogus").is_err());
        assert!(parse("t1 divide 1 2 0.5").is_err());
    }
}
