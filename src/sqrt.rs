//! Square root.

use crate::{
    ctx::{Condition, Context, RoundingMode},
    dec::Decimal,
    retry::{self, Attempt},
    round::{finalize, reduce_toward},
    uint::{AllocError, Budget, Uint},
    util::{narrow_exp, to_exp},
};

/// Computes the square root of `a`, correctly rounded, and
/// writes it to `out`.
///
/// Conditions are ORed into `status`. The result is always
/// rounded half-even, regardless of the context's rounding
/// mode.
///
/// If the computation cannot allocate its working buffers, the
/// working precision cannot be represented, or the integer
/// square root does not converge, it is retried once at the
/// precision `digits(a)`, which is enough for any
/// exact square root. If that yields an exact result it is
/// written to `out` as if nothing failed. Otherwise `out` is set
/// to [`Decimal::error_sentinel`] and the original conditions
/// are raised.
pub fn sqrt(out: &mut Decimal, a: &Decimal, ctx: &Context, status: &mut Condition) {
    sqrt_with(out, a, ctx, status, MAX_ITER);
}

/// The number of Newton steps allowed for the integer square
/// root. About `log2(digits)` are needed.
const MAX_ITER: usize = 256;

fn sqrt_with(
    out: &mut Decimal,
    a: &Decimal,
    ctx: &Context,
    status: &mut Condition,
    max_iter: usize,
) {
    if ctx.validate().is_err() {
        *out = Decimal::invalid(status, Condition::INVALID_CONTEXT);
        return;
    }
    retry::exact_retry(
        "sqrt",
        out,
        ctx,
        status,
        Condition::MALLOC_ERROR | Condition::DIVISION_IMPOSSIBLE,
        a.digits(),
        |ctx| attempt(a, ctx, max_iter),
    );
}

impl Decimal {
    /// Returns the square root of `self` and the conditions
    /// raised.
    ///
    /// See [`sqrt`][crate::sqrt()].
    pub fn sqrt(&self, ctx: &Context) -> (Self, Condition) {
        let mut out = Self::zero();
        let mut status = Condition::empty();
        sqrt(&mut out, self, ctx, &mut status);
        (out, status)
    }
}

/// Why a finite square root could not be computed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Error {
    Alloc,
    /// The working precision or exponent is out of range, or the
    /// integer square root did not converge.
    Impossible,
}

impl From<AllocError> for Error {
    fn from(_: AllocError) -> Self {
        Self::Alloc
    }
}

fn attempt(a: &Decimal, ctx: &Context, max_iter: usize) -> Attempt {
    let mut status = Condition::empty();
    match root(a, ctx, max_iter, &mut status) {
        Ok(r) => (r, status),
        Err(Error::Alloc) => (
            Decimal::error_sentinel(),
            status | Condition::MALLOC_ERROR,
        ),
        Err(Error::Impossible) => (
            Decimal::error_sentinel(),
            status | Condition::DIVISION_IMPOSSIBLE | Condition::INVALID_OPERATION,
        ),
    }
}

fn root(
    a: &Decimal,
    ctx: &Context,
    max_iter: usize,
    status: &mut Condition,
) -> Result<Decimal, Error> {
    if a.is_nan() {
        return Ok(Decimal::select_nan(a, None, ctx, status));
    }
    if a.sign && !a.is_zero() {
        // Including -Inf.
        return Ok(Decimal::invalid(status, Condition::INVALID_OPERATION));
    }
    if a.is_infinite() {
        return Ok(Decimal::infinity(false));
    }

    let ctx = ctx.with_rounding_mode(RoundingMode::ToNearestEven);
    let ideal = a.exp.div_euclid(2);
    if a.is_zero() {
        return Ok(finalize(a.sign, Uint::zero(), ideal, false, &ctx, status)?);
    }

    let budget = Budget::new(ctx.alloc_limit);

    // Make the exponent even so it can be halved.
    let (c, e) = if a.exp % 2 != 0 {
        (a.coeff.mul_pow10(1, budget)?, a.exp - 1)
    } else {
        (a.coeff.clone(), a.exp)
    };

    // Scale by 10^(2k) so the integer root has at least one
    // digit more than the precision.
    let prec = ctx.prec as usize;
    let k = (prec + 1).saturating_sub(c.digits().div_ceil(2));
    let twok = k.checked_mul(2).ok_or(Error::Impossible)?;
    let scale = i128::try_from(twok).map_err(|_| Error::Impossible)?;
    let exp = narrow_exp((i128::from(e) - scale) / 2);

    let n = c.mul_pow10(twok, budget)?;
    let r = n.isqrt(budget, max_iter)?.ok_or(Error::Impossible)?;
    let exact = r.mul(&r, budget)?.cmp(&n).is_eq();

    if exact {
        let (r, exp) = reduce_toward(r, exp, ideal)?;
        Ok(finalize(false, r, exp, false, &ctx, status)?)
    } else {
        debug_assert!(to_exp(r.digits()) > i64::from(ctx.prec));
        Ok(finalize(false, r, exp, true, &ctx, status)?)
    }
}
