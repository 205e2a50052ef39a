macro_rules! const_assert {
    ($($tt:tt)*) => {
        const _: () = ::core::assert!($($tt)*);
    }
}
pub(crate) use const_assert;

/// Asserts that every byte in `s` is an ASCII digit.
#[track_caller]
pub(super) const fn debug_assert_all_digits(s: &[u8]) {
    if !cfg!(debug_assertions) {
        return;
    }
    let mut i = 0;
    while i < s.len() {
        debug_assert!(s[i].is_ascii_digit());
        i += 1;
    }
}

/// Converts a digit count to an exponent delta.
///
/// Digit counts are bounded by allocation sizes, so they always
/// fit.
pub(super) const fn to_exp(n: usize) -> i64 {
    debug_assert!(n <= i64::MAX as usize);
    n as i64
}

/// Converts a non-negative exponent delta to a digit count.
pub(super) const fn to_digits(n: i64) -> usize {
    debug_assert!(n >= 0);
    if n < 0 {
        0
    } else {
        n as usize
    }
}

/// The largest exponent magnitude used for intermediate
/// results.
///
/// Any context's exponent range and precision are far below
/// this, so a result narrowed to it overflows or underflows the
/// same way the exact result does, and adding a digit count
/// cannot overflow an `i64`.
pub(super) const EXP_LIMIT: i64 = 1 << 62;

/// Narrows an exponent computed in `i128` to
/// `[-EXP_LIMIT, EXP_LIMIT]`.
pub(super) const fn narrow_exp(e: i128) -> i64 {
    if e > EXP_LIMIT as i128 {
        EXP_LIMIT
    } else if e < -EXP_LIMIT as i128 {
        -EXP_LIMIT
    } else {
        e as i64
    }
}
