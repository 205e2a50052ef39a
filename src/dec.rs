use crate::{
    ctx::{Condition, Context},
    uint::Uint,
};

#[cfg(feature = "rand")]
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

/// The class of a [`Decimal`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    /// A finite number.
    Finite,
    /// Positive or negative infinity.
    Infinite,
    /// A quiet NaN.
    QuietNan,
    /// A signaling NaN.
    SignalingNan,
}

/// An arbitrary-precision decimal floating point number.
///
/// A finite value is `(-1)^sign * coefficient * 10^exponent`.
/// NaNs carry an optional diagnostic payload in place of the
/// coefficient.
///
/// Equality is structural: `1.0` and `1.00` are different
/// values, and a NaN equals an identical NaN.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Decimal {
    pub(crate) sign: bool,
    pub(crate) kind: Kind,
    pub(crate) exp: i64,
    /// The coefficient, or the payload of a NaN.
    pub(crate) coeff: Uint,
}

impl Decimal {
    /// Creates a finite number from its sign, coefficient, and
    /// exponent.
    pub fn new(sign: bool, coeff: u64, exp: i64) -> Self {
        Self::finite(sign, Uint::from_u64(coeff), exp)
    }

    /// Creates an integer.
    pub fn from_i64(v: i64) -> Self {
        Self::new(v < 0, v.unsigned_abs(), 0)
    }

    /// Creates a positive zero with exponent zero.
    pub const fn zero() -> Self {
        Self::finite(false, Uint::zero(), 0)
    }

    /// Creates an infinity.
    pub const fn infinity(sign: bool) -> Self {
        Self {
            sign,
            kind: Kind::Infinite,
            exp: 0,
            coeff: Uint::zero(),
        }
    }

    /// Creates a positive quiet NaN with the diagnostic
    /// `payload`.
    pub fn nan(payload: u64) -> Self {
        Self {
            sign: false,
            kind: Kind::QuietNan,
            exp: 0,
            coeff: Uint::from_u64(payload),
        }
    }

    /// Creates a positive signaling NaN with the diagnostic
    /// `payload`.
    pub fn snan(payload: u64) -> Self {
        Self {
            kind: Kind::SignalingNan,
            ..Self::nan(payload)
        }
    }

    pub(crate) const fn finite(sign: bool, coeff: Uint, exp: i64) -> Self {
        Self {
            sign,
            kind: Kind::Finite,
            exp,
            coeff,
        }
    }

    pub(crate) fn special(sign: bool, kind: Kind, payload: Uint) -> Self {
        Self {
            sign,
            kind,
            exp: 0,
            coeff: payload,
        }
    }

    /// Returns the canonical value written by an operation that
    /// failed permanently: a positive quiet NaN without a
    /// payload.
    pub const fn error_sentinel() -> Self {
        Self {
            sign: false,
            kind: Kind::QuietNan,
            exp: 0,
            coeff: Uint::zero(),
        }
    }

    /// Overwrites `self` with [`error_sentinel`][Self::error_sentinel].
    pub fn set_error_sentinel(&mut self) {
        *self = Self::error_sentinel();
    }

    /// Returns the class of the number.
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Reports whether the number is a quiet or signaling NaN.
    pub const fn is_nan(&self) -> bool {
        matches!(self.kind, Kind::QuietNan | Kind::SignalingNan)
    }

    /// Reports whether the number is a quiet NaN.
    pub const fn is_qnan(&self) -> bool {
        matches!(self.kind, Kind::QuietNan)
    }

    /// Reports whether the number is a signaling NaN.
    pub const fn is_snan(&self) -> bool {
        matches!(self.kind, Kind::SignalingNan)
    }

    /// Reports whether the number is infinite.
    pub const fn is_infinite(&self) -> bool {
        matches!(self.kind, Kind::Infinite)
    }

    /// Reports whether the number is neither infinite nor NaN.
    pub const fn is_finite(&self) -> bool {
        matches!(self.kind, Kind::Finite)
    }

    /// Reports whether the number is a zero of either sign.
    pub fn is_zero(&self) -> bool {
        self.is_finite() && self.coeff.is_zero()
    }

    /// Reports whether the sign bit is set.
    pub const fn is_sign_negative(&self) -> bool {
        self.sign
    }

    /// Reports whether the sign bit is clear.
    pub const fn is_sign_positive(&self) -> bool {
        !self.sign
    }

    /// Returns the number of digits in the coefficient, or in
    /// the payload of a NaN.
    ///
    /// Zero and infinity have one digit.
    pub fn digits(&self) -> usize {
        self.coeff.digits()
    }

    /// Returns the exponent of a finite number.
    pub const fn exponent(&self) -> Option<i64> {
        match self.kind {
            Kind::Finite => Some(self.exp),
            _ => None,
        }
    }

    /// Returns the exponent of the most significant digit of
    /// a finite number, if it fits in an `i64`.
    pub fn adjusted_exponent(&self) -> Option<i64> {
        self.exponent()?
            .checked_add(crate::util::to_exp(self.digits()) - 1)
    }

    /// Returns the coefficient as a `u128`, if it is finite and
    /// fits.
    pub fn coefficient_u128(&self) -> Option<u128> {
        if self.is_finite() {
            self.coeff.to_u128()
        } else {
            None
        }
    }

    /// Selects the NaN result of an operation per the
    /// [arithmetic operation rules][rules].
    ///
    /// One of the two arguments *must* be NaN. A signaling NaN
    /// raises [`INVALID_OPERATION`][Condition::INVALID_OPERATION]
    /// and is quieted. Payloads too long for the context are
    /// dropped.
    ///
    /// [rules]: https://speleotrove.com/decimal/daops.html
    pub(crate) fn select_nan(
        lhs: &Self,
        rhs: Option<&Self>,
        ctx: &Context,
        status: &mut Condition,
    ) -> Self {
        let nan = match rhs {
            _ if lhs.is_snan() => lhs,
            Some(rhs) if rhs.is_snan() => rhs,
            _ if lhs.is_nan() => lhs,
            Some(rhs) => rhs,
            None => lhs,
        };
        debug_assert!(nan.is_nan());

        if nan.is_snan() {
            *status |= Condition::INVALID_OPERATION;
        }
        let max = (ctx.prec as usize).saturating_sub(usize::from(ctx.clamp));
        let payload = if nan.coeff.is_zero() || nan.coeff.digits() > max {
            Uint::zero()
        } else {
            nan.coeff.clone()
        };
        Self::special(nan.sign, Kind::QuietNan, payload)
    }

    /// The NaN produced by an invalid operation.
    pub(crate) fn invalid(status: &mut Condition, cond: Condition) -> Self {
        *status |= cond;
        Self::error_sentinel()
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(feature = "rand")]
#[cfg_attr(docsrs, doc(cfg(feature = "rand")))]
impl Distribution<Decimal> for Standard {
    /// Samples a finite decimal with up to 38 digits and an
    /// exponent in `[-50, 50]`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Decimal {
        let digits = rng.gen_range(1..=38u32);
        let coeff = rng.gen_range(0..10u128.pow(digits));
        let exp = rng.gen_range(-50..=50);
        Decimal::finite(rng.gen(), Uint::from_u128(coeff), exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries() {
        let x = Decimal::new(true, 12345, -2);
        assert!(x.is_finite());
        assert!(x.is_sign_negative());
        assert!(!x.is_zero());
        assert_eq!(x.digits(), 5);
        assert_eq!(x.exponent(), Some(-2));
        assert_eq!(x.adjusted_exponent(), Some(2));
        assert_eq!(x.coefficient_u128(), Some(12345));

        assert!(Decimal::zero().is_zero());
        assert!(Decimal::new(true, 0, 7).is_zero());
        assert!(Decimal::infinity(false).is_infinite());
        assert_eq!(Decimal::infinity(false).exponent(), None);
        assert!(Decimal::nan(0).is_qnan());
        assert!(Decimal::snan(3).is_snan());
        assert_eq!(Decimal::from_i64(-42), Decimal::new(true, 42, 0));

        assert_eq!(Decimal::new(false, 1, i64::MAX).adjusted_exponent(), Some(i64::MAX));
        assert_eq!(Decimal::new(false, 12, i64::MAX).adjusted_exponent(), None);
        assert_eq!(Decimal::new(false, 12, i64::MIN).adjusted_exponent(), Some(i64::MIN + 1));
    }

    #[test]
    fn test_error_sentinel() {
        let mut x = Decimal::new(false, 9, 9);
        x.set_error_sentinel();
        assert_eq!(x, Decimal::error_sentinel());
        assert!(x.is_qnan());
        assert!(x.is_sign_positive());
        assert_eq!(x.coeff, Uint::zero());

        // Idempotent.
        x.set_error_sentinel();
        assert_eq!(x, Decimal::error_sentinel());
    }

    #[test]
    fn test_select_nan() {
        let ctx = Context::new(9);
        let one = Decimal::from_i64(1);

        let mut status = Condition::empty();
        let got = Decimal::select_nan(&Decimal::nan(7), Some(&one), &ctx, &mut status);
        assert_eq!(got, Decimal::nan(7));
        assert_eq!(status, Condition::empty());

        let got = Decimal::select_nan(&Decimal::nan(7), Some(&Decimal::snan(8)), &ctx, &mut status);
        assert_eq!(got, Decimal::nan(8));
        assert_eq!(status, Condition::INVALID_OPERATION);

        let mut status = Condition::empty();
        let got = Decimal::select_nan(&one, Some(&Decimal::nan(5)), &ctx, &mut status);
        assert_eq!(got, Decimal::nan(5));
        assert_eq!(status, Condition::empty());

        // Payload longer than the precision is dropped.
        let ctx = Context::new(3);
        let got = Decimal::select_nan(&Decimal::nan(1234), None, &ctx, &mut status);
        assert_eq!(got, Decimal::nan(0));
    }
}
