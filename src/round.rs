//! Rounding and normalization of exact intermediate results.

use crate::{
    ctx::{Condition, Context, RoundingMode},
    dec::Decimal,
    uint::{AllocError, Budget, Rem, Uint},
    util::{to_digits, to_exp},
};

/// Reports whether a truncated coefficient whose least
/// significant digit is `lsd` must be incremented.
pub(crate) const fn increment(mode: RoundingMode, sign: bool, lsd: u8, rem: Rem) -> bool {
    if rem.is_zero() {
        return false;
    }
    match mode {
        RoundingMode::ToZero => false,
        RoundingMode::AwayFromZero => true,
        RoundingMode::ToPositiveInf => !sign,
        RoundingMode::ToNegativeInf => sign,
        RoundingMode::ToNearestAway => matches!(rem, Rem::Half | Rem::GtHalf),
        RoundingMode::ToNearestTowardZero => matches!(rem, Rem::GtHalf),
        RoundingMode::ToNearestEven => match rem {
            Rem::GtHalf => true,
            Rem::Half => lsd % 2 != 0,
            _ => false,
        },
        RoundingMode::ZeroFiveUp => lsd == 0 || lsd == 5,
    }
}

/// Strips trailing zeros from an exact `(coeff, exp)` until the
/// exponent reaches `ideal`.
pub(crate) fn reduce_toward(coeff: Uint, exp: i64, ideal: i64) -> Result<(Uint, i64), AllocError> {
    if exp >= ideal || coeff.is_zero() {
        return Ok((coeff, exp));
    }
    let n = coeff.trailing_zeros().min(to_digits(ideal - exp));
    if n == 0 {
        return Ok((coeff, exp));
    }
    let (coeff, rem) = coeff.div_pow10(n)?;
    debug_assert!(rem.is_zero());
    Ok((coeff, exp + to_exp(n)))
}

/// Rounds `(-1)^sign * coeff * 10^exp` to the context, once.
///
/// `sticky` means the true value lies strictly above `coeff`
/// by less than one unit in its last digit. Callers that set it
/// must supply at least one digit more than the precision.
pub(crate) fn finalize(
    sign: bool,
    coeff: Uint,
    exp: i64,
    sticky: bool,
    ctx: &Context,
    status: &mut Condition,
) -> Result<Decimal, AllocError> {
    let prec = ctx.prec as usize;
    let etiny = ctx.etiny();
    let etop = ctx.etop();

    if coeff.is_zero() && !sticky {
        let mut exp = exp;
        if exp < etiny {
            exp = etiny;
            *status |= Condition::CLAMPED;
        }
        let top = if ctx.clamp { etop } else { ctx.emax };
        if exp > top {
            exp = top;
            *status |= Condition::CLAMPED;
        }
        return Ok(Decimal::finite(sign, coeff, exp));
    }

    let digits = coeff.digits();
    let subnormal = exp + to_exp(digits) - 1 < ctx.emin;

    let shift = to_digits(
        to_exp(digits.saturating_sub(prec))
            .max(etiny.saturating_sub(exp))
            .max(0),
    );
    let (mut coeff, rem) = coeff.div_pow10(shift)?;
    let rem = rem.with_sticky(sticky);
    let mut exp = exp + to_exp(shift);

    if increment(ctx.rounding, sign, coeff.low_digit(), rem) {
        coeff = coeff.add_small(1)?;
        if coeff.digits() > prec {
            // 999... became 1000..., so drop a trailing zero.
            (coeff, _) = coeff.div_pow10(1)?;
            exp += 1;
        }
    }

    let rounded = shift > 0 || sticky;
    let inexact = !rem.is_zero();

    if !coeff.is_zero() && exp + to_exp(coeff.digits()) - 1 > ctx.emax {
        *status |= Condition::OVERFLOW | Condition::INEXACT | Condition::ROUNDED;
        return overflow(sign, ctx);
    }

    if subnormal {
        *status |= Condition::SUBNORMAL;
        if inexact {
            *status |= Condition::UNDERFLOW;
            if coeff.is_zero() {
                *status |= Condition::CLAMPED;
            }
        }
    }
    if rounded {
        *status |= Condition::ROUNDED;
    }
    if inexact {
        *status |= Condition::INEXACT;
    }

    if ctx.clamp && exp > etop && !coeff.is_zero() {
        // Fold the exponent down by padding the coefficient.
        let pad = to_digits(exp - etop);
        coeff = coeff.mul_pow10(pad, Budget::new(ctx.alloc_limit))?;
        exp = etop;
        *status |= Condition::CLAMPED;
    }

    Ok(Decimal::finite(sign, coeff, exp))
}

/// The result of an overflow: infinity or the largest finite
/// number, depending on the rounding mode.
fn overflow(sign: bool, ctx: &Context) -> Result<Decimal, AllocError> {
    let to_inf = match ctx.rounding {
        RoundingMode::ToZero | RoundingMode::ZeroFiveUp => false,
        RoundingMode::ToPositiveInf => !sign,
        RoundingMode::ToNegativeInf => sign,
        RoundingMode::ToNearestEven
        | RoundingMode::ToNearestAway
        | RoundingMode::ToNearestTowardZero
        | RoundingMode::AwayFromZero => true,
    };
    if to_inf {
        return Ok(Decimal::infinity(sign));
    }
    let one = Uint::from_u64(1);
    let max = one
        .mul_pow10(ctx.prec as usize, Budget::new(ctx.alloc_limit))?
        .sub(&one)?;
    Ok(Decimal::finite(sign, max, ctx.etop()))
}
