use core::fmt;

use bitflags::bitflags;
use thiserror::Error;

/// The environment for an arithmetic operation.
///
/// A `Context` is read-only for the duration of a call and can
/// be shared by any number of concurrent calls. Conditions
/// raised by an operation are reported through a separate,
/// caller-owned [`Condition`] set.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Context {
    pub(crate) prec: u32,
    pub(crate) rounding: RoundingMode,
    pub(crate) emax: i64,
    pub(crate) emin: i64,
    pub(crate) clamp: bool,
    pub(crate) traps: Condition,
    pub(crate) alloc_limit: Option<usize>,
}

impl Context {
    /// The largest supported precision.
    pub const MAX_PREC: u32 = 999_999_999;
    /// The largest supported `emax`.
    pub const MAX_EMAX: i64 = 999_999_999;
    /// The smallest supported `emin`.
    pub const MIN_EMIN: i64 = -999_999_999;

    /// Creates a context with `prec` digits of precision,
    /// round-half-even, the widest exponent range, and the
    /// default traps.
    pub const fn new(prec: u32) -> Self {
        Self {
            prec,
            rounding: RoundingMode::ToNearestEven,
            emax: Self::MAX_EMAX,
            emin: Self::MIN_EMIN,
            clamp: false,
            traps: Condition::DEFAULT_TRAPS,
            alloc_limit: None,
        }
    }

    /// The General Decimal Arithmetic "basic" context: nine
    /// digits, round-half-up, `emax` 999999999.
    pub const fn basic() -> Self {
        Self::new(9).with_rounding_mode(RoundingMode::ToNearestAway)
    }

    /// The IEEE 754-2008 decimal32 context.
    pub const fn decimal32() -> Self {
        Self::ieee(7, 96)
    }

    /// The IEEE 754-2008 decimal64 context.
    pub const fn decimal64() -> Self {
        Self::ieee(16, 384)
    }

    /// The IEEE 754-2008 decimal128 context.
    pub const fn decimal128() -> Self {
        Self::ieee(34, 6144)
    }

    const fn ieee(prec: u32, emax: i64) -> Self {
        Self::new(prec)
            .with_emax(emax)
            .with_emin(1 - emax)
            .with_clamp(true)
            .with_traps(Condition::empty())
    }

    /// Sets the precision.
    pub const fn with_precision(self, prec: u32) -> Self {
        let mut ctx = self;
        ctx.prec = prec;
        ctx
    }

    /// Sets the rounding mode.
    pub const fn with_rounding_mode(self, mode: RoundingMode) -> Self {
        let mut ctx = self;
        ctx.rounding = mode;
        ctx
    }

    /// Sets the maximum adjusted exponent.
    pub const fn with_emax(self, emax: i64) -> Self {
        let mut ctx = self;
        ctx.emax = emax;
        ctx
    }

    /// Sets the minimum adjusted exponent of a normal number.
    pub const fn with_emin(self, emin: i64) -> Self {
        let mut ctx = self;
        ctx.emin = emin;
        ctx
    }

    /// Enables or disables IEEE 754 exponent clamping.
    pub const fn with_clamp(self, clamp: bool) -> Self {
        let mut ctx = self;
        ctx.clamp = clamp;
        ctx
    }

    /// Sets the trap set.
    pub const fn with_traps(self, traps: Condition) -> Self {
        let mut ctx = self;
        ctx.traps = traps;
        ctx
    }

    /// Caps the size, in digits, of any coefficient buffer
    /// sized by the precision.
    ///
    /// A buffer larger than `limit` digits fails the same way
    /// a failed allocation does, raising
    /// [`MALLOC_ERROR`][Condition::MALLOC_ERROR].
    pub const fn with_alloc_limit(self, limit: Option<usize>) -> Self {
        let mut ctx = self;
        ctx.alloc_limit = limit;
        ctx
    }

    /// Returns the precision.
    pub const fn precision(&self) -> u32 {
        self.prec
    }

    /// Returns the rounding mode.
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.rounding
    }

    /// Returns the maximum adjusted exponent.
    pub const fn emax(&self) -> i64 {
        self.emax
    }

    /// Returns the minimum adjusted exponent of a normal number.
    pub const fn emin(&self) -> i64 {
        self.emin
    }

    /// Reports whether exponent clamping is enabled.
    pub const fn clamp(&self) -> bool {
        self.clamp
    }

    /// Returns the trap set.
    pub const fn traps(&self) -> Condition {
        self.traps
    }

    /// Returns the allocation limit, if any.
    pub const fn alloc_limit(&self) -> Option<usize> {
        self.alloc_limit
    }

    /// The smallest exponent of a subnormal number.
    pub const fn etiny(&self) -> i64 {
        self.emin - (self.prec as i64 - 1)
    }

    /// The largest exponent of a full-length coefficient.
    pub const fn etop(&self) -> i64 {
        self.emax - (self.prec as i64 - 1)
    }

    /// Reports whether `cond` is trapped.
    ///
    /// The arithmetic never acts on traps. This is a hook for
    /// callers that escalate conditions.
    pub const fn is_trapped(&self, cond: Condition) -> bool {
        self.traps.intersects(cond)
    }

    /// Returns the subset of `status` that is trapped.
    pub const fn trapped(&self, status: Condition) -> Condition {
        self.traps.intersection(status)
    }

    /// Checks that the context is usable.
    pub const fn validate(&self) -> Result<(), ContextError> {
        if self.prec == 0 || self.prec > Self::MAX_PREC {
            return Err(ContextError::Precision(self.prec));
        }
        if self.emax < 0 || self.emax > Self::MAX_EMAX {
            return Err(ContextError::Emax(self.emax));
        }
        if self.emin > 0 || self.emin < Self::MIN_EMIN || self.emin < -self.emax {
            return Err(ContextError::Emin(self.emin));
        }
        Ok(())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::decimal128()
    }
}

/// An error returned by [`Context::validate`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ContextError {
    /// The precision is zero or too large.
    #[error("precision out of range: {0}")]
    Precision(u32),
    /// `emax` is negative or too large.
    #[error("emax out of range: {0}")]
    Emax(i64),
    /// `emin` is positive, too small, or smaller than
    /// `-emax`.
    #[error("emin out of range: {0}")]
    Emin(i64),
}

/// Determines how a result is rounded when it cannot be
/// represented exactly.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub enum RoundingMode {
    /// IEEE 754-2008 roundTiesToEven.
    ///
    /// - Under 0.5 rounds down.
    /// - Over 0.5 rounds up.
    /// - Exactly 0.5 rounds to the nearest even.
    #[default]
    ToNearestEven,
    /// IEEE 754-2008 roundTiesToAway.
    ///
    /// Like [`ToNearestEven`][Self::ToNearestEven], except that
    /// 0.5 rounds up.
    ToNearestAway,
    /// IEEE 754-2008 roundTowardZero.
    ///
    /// AKA truncation.
    ToZero,
    /// No IEEE 754-2008 equivalent.
    ///
    /// Rounds up if the discarded digits are non-zero.
    AwayFromZero,
    /// IEEE 754-2008 roundTowardNegative.
    ///
    /// AKA floor.
    ToNegativeInf,
    /// IEEE 754-2008 roundTowardPositive.
    ///
    /// AKA ceiling.
    ToPositiveInf,
    /// No IEEE 754-2008 equivalent.
    ///
    /// Like [`ToNearestAway`][Self::ToNearestAway], except that
    /// 0.5 rounds down.
    ToNearestTowardZero,
    /// No IEEE 754-2008 equivalent.
    ///
    /// Truncates, then rounds up if the discarded digits are
    /// non-zero and the last kept digit is 0 or 5.
    ZeroFiveUp,
}

impl RoundingMode {
    /// Parses the decTest spelling of a rounding mode.
    pub fn try_from_str(s: &str) -> Option<Self> {
        let mode = match s {
            "half_even" => Self::ToNearestEven,
            "half_up" => Self::ToNearestAway,
            "half_down" => Self::ToNearestTowardZero,
            "down" => Self::ToZero,
            "up" => Self::AwayFromZero,
            "floor" => Self::ToNegativeInf,
            "ceiling" => Self::ToPositiveInf,
            "05up" => Self::ZeroFiveUp,
            _ => return None,
        };
        Some(mode)
    }

    /// Returns the decTest spelling of the rounding mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToNearestEven => "half_even",
            Self::ToNearestAway => "half_up",
            Self::ToNearestTowardZero => "half_down",
            Self::ToZero => "down",
            Self::AwayFromZero => "up",
            Self::ToNegativeInf => "floor",
            Self::ToPositiveInf => "ceiling",
            Self::ZeroFiveUp => "05up",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An exceptional condition raised during or after an operation.
///
/// Operations OR conditions into a caller-owned set and never
/// clear it. The default set is empty.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Condition(u32);

impl Condition {
    /// The traps enabled by default.
    pub const DEFAULT_TRAPS: Self = Self::all().difference(
        Self::INEXACT.union(Self::ROUNDED).union(Self::SUBNORMAL),
    );
}

bitflags! {
    impl Condition: u32 {
        /// Occurs if the exponent has been modified to fit the
        /// constraints of the decimal representation.
        const CLAMPED = 0x1;
        /// Occurs when a string is converted to a decimal and
        /// does not have a valid syntax.
        const CONVERSION_SYNTAX = 0x2;
        /// Occurs when division is attempted with a finite,
        /// non-zero dividend and a divisor with a value of zero.
        const DIVISION_BY_ZERO = 0x4;
        /// Occurs when the result of integer division would
        /// contain too many digits, or when an internal working
        /// precision was insufficient to produce a correctly
        /// rounded result.
        const DIVISION_IMPOSSIBLE = 0x8;
        /// Occurs when division is attempted with in which both
        /// the divided and divisor are zero.
        const DIVISION_UNDEFINED = 0x10;
        /// Occurs when the result of an operation (e.g.
        /// division) is not exact, or when the
        /// [OVERFLOW][Condition::OVERFLOW] or
        /// [UNDERFLOW][Condition::UNDERFLOW] conditions occur.
        const INEXACT = 0x20;
        /// Occurs when an invalid context was detected during an
        /// operation. See [`Context::validate`].
        const INVALID_CONTEXT = 0x40;
        /// Occurs when:
        ///
        /// - An operand to an operation is a signaling NaN.
        /// - An attempt is made to divide an infinity by an
        /// infinity.
        /// - Both operands of a division are zero.
        /// - The operand of the square-root operation has a sign
        /// of one and a non-zero coefficient.
        const INVALID_OPERATION = 0x80;
        /// Occurs when the system doesn't have enough storage
        /// (i.e. memory) to hold an intermediate coefficient.
        const MALLOC_ERROR = 0x100;
        /// Occurs when the adjusted exponent, after rounding,
        /// would be greater than the maximum allowed exponent.
        /// ([INEXACT][Condition::INEXACT] and
        /// [ROUNDED][Condition::ROUNDED] will also be raised.)
        const OVERFLOW = 0x200;
        /// Occurs when the result of an operation is rounded, or
        /// if an [OVERFLOW][Condition::OVERFLOW] or
        /// [UNDERFLOW][Condition::UNDERFLOW] occurs.
        const ROUNDED = 0x400;
        /// Ocurs when the result of a conversion or operation is
        /// subnormal (i.e. the adjusted exponent is less than
        /// the minimum allowed exponent before any rounding).
        const SUBNORMAL = 0x800;
        /// Occurs when the result is inexact and the adjusted
        /// exponent would be smaller (more negative) than the
        /// minimum allowed exponent.
        const UNDERFLOW = 0x1000;
    }
}

impl Condition {
    /// Parses the decTest spelling of a condition, e.g.
    /// `Division_by_zero`.
    pub fn try_from_str(s: &str) -> Option<Self> {
        let cond = match s.to_ascii_lowercase().as_str() {
            "clamped" => Self::CLAMPED,
            "conversion_syntax" => Self::CONVERSION_SYNTAX,
            "division_by_zero" => Self::DIVISION_BY_ZERO,
            "division_impossible" => Self::DIVISION_IMPOSSIBLE,
            "division_undefined" => Self::DIVISION_UNDEFINED,
            "inexact" => Self::INEXACT,
            "invalid_context" => Self::INVALID_CONTEXT,
            "invalid_operation" => Self::INVALID_OPERATION,
            "insufficient_storage" | "malloc_error" => Self::MALLOC_ERROR,
            "overflow" => Self::OVERFLOW,
            "rounded" => Self::ROUNDED,
            "subnormal" => Self::SUBNORMAL,
            "underflow" => Self::UNDERFLOW,
            _ => return None,
        };
        Some(cond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_traps() {
        assert_eq!(Condition::default(), Condition::empty());
        assert_eq!(Context::new(9).traps(), Condition::DEFAULT_TRAPS);

        let traps = Condition::DEFAULT_TRAPS;
        assert!(!traps.contains(Condition::INEXACT));
        assert!(!traps.contains(Condition::ROUNDED));
        assert!(!traps.contains(Condition::SUBNORMAL));
        assert!(traps.contains(Condition::DIVISION_BY_ZERO));
        assert!(traps.contains(Condition::MALLOC_ERROR));
    }

    #[test]
    fn test_is_trapped() {
        let ctx = Context::new(9).with_traps(Condition::OVERFLOW);
        assert!(ctx.is_trapped(Condition::OVERFLOW));
        assert!(!ctx.is_trapped(Condition::INEXACT));
        let status = Condition::OVERFLOW | Condition::INEXACT | Condition::ROUNDED;
        assert_eq!(ctx.trapped(status), Condition::OVERFLOW);
    }

    #[test]
    fn test_validate() {
        assert_eq!(Context::new(9).validate(), Ok(()));
        assert_eq!(Context::decimal128().validate(), Ok(()));
        assert_eq!(
            Context::new(0).validate(),
            Err(ContextError::Precision(0))
        );
        assert_eq!(
            Context::new(9).with_emax(-1).validate(),
            Err(ContextError::Emax(-1))
        );
        assert_eq!(
            Context::new(9).with_emin(1).validate(),
            Err(ContextError::Emin(1))
        );
        assert_eq!(
            Context::new(9).with_emax(10).with_emin(-20).validate(),
            Err(ContextError::Emin(-20))
        );
    }

    #[test]
    fn test_bounds() {
        let ctx = Context::decimal64();
        assert_eq!(ctx.etiny(), -398);
        assert_eq!(ctx.etop(), 369);
    }

    #[test]
    fn test_rounding_mode_names() {
        for mode in [
            RoundingMode::ToNearestEven,
            RoundingMode::ToNearestAway,
            RoundingMode::ToNearestTowardZero,
            RoundingMode::ToZero,
            RoundingMode::AwayFromZero,
            RoundingMode::ToNegativeInf,
            RoundingMode::ToPositiveInf,
            RoundingMode::ZeroFiveUp,
        ] {
            assert_eq!(RoundingMode::try_from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(RoundingMode::try_from_str("sideways"), None);
    }

    #[test]
    fn test_condition_names() {
        assert_eq!(
            Condition::try_from_str("Division_by_zero"),
            Some(Condition::DIVISION_BY_ZERO)
        );
        assert_eq!(
            Condition::try_from_str("Insufficient_storage"),
            Some(Condition::MALLOC_ERROR)
        );
        assert_eq!(Condition::try_from_str("bogus"), None);
    }
}
