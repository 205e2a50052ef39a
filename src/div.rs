//! Division.

use crate::{
    ctx::{Condition, Context},
    dec::Decimal,
    retry::{self, Attempt},
    round::{finalize, reduce_toward},
    uint::{AllocError, Budget, Uint},
    util::{narrow_exp, to_exp},
};

/// Computes `a / b`, correctly rounded, and writes it to `out`.
///
/// Conditions are ORed into `status`.
///
/// If a buffer sized by the precision cannot be allocated, the
/// division is retried once at the precision
/// `digits(a) + 4*digits(b)`, which is enough for any exact
/// quotient. If that yields an exact result it is written to
/// `out` as if nothing failed. Otherwise `out` is set to
/// [`Decimal::error_sentinel`] and
/// [`MALLOC_ERROR`][Condition::MALLOC_ERROR] is raised.
pub fn divide(out: &mut Decimal, a: &Decimal, b: &Decimal, ctx: &Context, status: &mut Condition) {
    if ctx.validate().is_err() {
        *out = Decimal::invalid(status, Condition::INVALID_CONTEXT);
        return;
    }

    // An exact quotient of coefficients `a/b` in lowest terms
    // has a denominator of the form 2^i * 5^j. Clearing it
    // takes at most `log2(10) ≈ 3.32` digits per digit of `b`.
    let bound = a
        .digits()
        .saturating_add(b.digits().saturating_mul(4));
    retry::exact_retry(
        "divide",
        out,
        ctx,
        status,
        Condition::MALLOC_ERROR,
        bound,
        |ctx| attempt(a, b, ctx),
    );
}

impl Decimal {
    /// Returns `self / rhs` and the conditions raised.
    ///
    /// See [`divide`].
    pub fn div(&self, rhs: &Self, ctx: &Context) -> (Self, Condition) {
        let mut out = Self::zero();
        let mut status = Condition::empty();
        divide(&mut out, self, rhs, ctx, &mut status);
        (out, status)
    }
}

fn attempt(a: &Decimal, b: &Decimal, ctx: &Context) -> Attempt {
    let mut status = Condition::empty();
    match quotient(a, b, ctx, &mut status) {
        Ok(q) => (q, status),
        Err(AllocError) => (
            Decimal::error_sentinel(),
            status | Condition::MALLOC_ERROR,
        ),
    }
}

fn quotient(
    a: &Decimal,
    b: &Decimal,
    ctx: &Context,
    status: &mut Condition,
) -> Result<Decimal, AllocError> {
    let sign = a.sign ^ b.sign;

    if a.is_nan() || b.is_nan() {
        return Ok(Decimal::select_nan(a, Some(b), ctx, status));
    }
    if a.is_infinite() {
        if b.is_infinite() {
            // ±Inf / ±Inf
            return Ok(Decimal::invalid(status, Condition::INVALID_OPERATION));
        }
        // ±Inf / x
        return Ok(Decimal::infinity(sign));
    }
    if b.is_infinite() {
        // x / ±Inf
        *status |= Condition::CLAMPED;
        return Ok(Decimal::finite(sign, Uint::zero(), ctx.etiny()));
    }
    if b.is_zero() {
        if a.is_zero() {
            // 0 / 0
            return Ok(Decimal::invalid(
                status,
                Condition::DIVISION_UNDEFINED | Condition::INVALID_OPERATION,
            ));
        }
        // x / 0
        *status |= Condition::DIVISION_BY_ZERO;
        return Ok(Decimal::infinity(sign));
    }

    let ideal = narrow_exp(i128::from(a.exp) - i128::from(b.exp));
    if a.is_zero() {
        return finalize(sign, Uint::zero(), ideal, false, ctx, status);
    }

    // Scale the dividend so the quotient has at least one digit
    // more than the precision.
    let prec = ctx.prec as usize;
    let (da, db) = (a.coeff.digits(), b.coeff.digits());
    let shift = (prec + 1 + db).saturating_sub(da);

    let budget = Budget::new(ctx.alloc_limit);
    let num = a.coeff.mul_pow10(shift, budget)?;
    let (q, r) = num.div_rem(&b.coeff, budget)?;
    let exp = ideal - to_exp(shift);

    if r.is_zero() {
        let (q, exp) = reduce_toward(q, exp, ideal)?;
        finalize(sign, q, exp, false, ctx, status)
    } else {
        finalize(sign, q, exp, true, ctx, status)
    }
}
