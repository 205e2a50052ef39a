//! Arbitrary length unsigned integers used as decimal
//! coefficients.
//!
//! Every allocation goes through [`Vec::try_reserve_exact`] so
//! that running out of memory is reported as [`AllocError`]
//! instead of aborting.

use core::{cmp::Ordering, fmt};

use crate::util;

/// The radix of a limb.
pub(crate) const RADIX: u64 = 10_000_000_000_000_000_000;

/// The number of decimal digits in a limb.
pub(crate) const LIMB_DIGITS: usize = 19;

/// `10^i` for `i` in `[0, 19]`.
const POW10: [u64; LIMB_DIGITS + 1] = {
    let mut table = [1u64; LIMB_DIGITS + 1];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};
util::const_assert!(POW10[LIMB_DIGITS] == RADIX);

/// Memory for a coefficient could not be obtained.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct AllocError;

/// Caps the size of coefficient buffers sized by the working
/// precision.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Budget {
    limit: Option<usize>,
}

impl Budget {
    #[cfg(test)]
    pub const UNLIMITED: Self = Self { limit: None };

    pub const fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    /// Fails if a buffer of `digits` digits is not allowed.
    pub fn check(self, digits: usize) -> Result<(), AllocError> {
        match self.limit {
            Some(limit) if digits > limit => Err(AllocError),
            _ => Ok(()),
        }
    }
}

/// Allocates room for `n` limbs.
fn alloc_limbs(n: usize) -> Result<Vec<u64>, AllocError> {
    let mut v = Vec::new();
    v.try_reserve_exact(n).map_err(|_| AllocError)?;
    Ok(v)
}

/// Returns `(x + y + carry) % RADIX` and the carry out.
///
/// The sum of two limbs does not fit in a `u64`.
fn adc(x: u64, y: u64, carry: u64) -> (u64, u64) {
    let sum = u128::from(x) + u128::from(y) + u128::from(carry);
    let radix = u128::from(RADIX);
    if sum >= radix {
        ((sum - radix) as u64, 1)
    } else {
        (sum as u64, 0)
    }
}

/// Returns the number of decimal digits in `x`.
///
/// Zero has one digit.
pub(crate) const fn digits_u64(x: u64) -> usize {
    let mut n = 1;
    while n < POW10.len() && x >= POW10[n] {
        n += 1;
    }
    n
}

/// Classifies the digits discarded by a right shift relative to
/// one half of a unit in the last kept place.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub(crate) enum Rem {
    /// Nothing was discarded.
    Zero,
    /// Less than one half.
    LtHalf,
    /// Exactly one half.
    Half,
    /// More than one half.
    GtHalf,
}

impl Rem {
    /// Folds in a non-zero tail that lies below every
    /// discarded digit.
    pub const fn with_sticky(self, sticky: bool) -> Self {
        if !sticky {
            return self;
        }
        match self {
            Self::Zero => Self::LtHalf,
            Self::Half => Self::GtHalf,
            rem => rem,
        }
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }
}

/// An unsigned integer stored as little-endian limbs in radix
/// 10^19.
///
/// The most significant limb is never zero, so zero has no
/// limbs.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub(crate) struct Uint {
    limbs: Vec<u64>,
}

impl Uint {
    pub const fn zero() -> Self {
        Self { limbs: Vec::new() }
    }

    pub fn from_u64(v: u64) -> Self {
        Self::from_limbs(vec![v % RADIX, v / RADIX])
    }

    #[cfg(any(test, feature = "rand"))]
    pub fn from_u128(v: u128) -> Self {
        let radix = u128::from(RADIX);
        let mut limbs = Vec::with_capacity(3);
        let mut v = v;
        while v > 0 {
            limbs.push((v % radix) as u64);
            v /= radix;
        }
        Self::from_limbs(limbs)
    }

    fn from_limbs(mut limbs: Vec<u64>) -> Self {
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        Self { limbs }
    }

    /// Parses a run of ASCII digits.
    pub fn from_ascii_digits(s: &[u8]) -> Result<Self, AllocError> {
        util::debug_assert_all_digits(s);

        let mut limbs = alloc_limbs(s.len() / LIMB_DIGITS + 1)?;
        for chunk in s.rchunks(LIMB_DIGITS) {
            let limb = chunk
                .iter()
                .fold(0u64, |acc, &c| acc * 10 + u64::from(c - b'0'));
            limbs.push(limb);
        }
        Ok(Self::from_limbs(limbs))
    }

    /// Converts the integer to a `u128`, if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        let mut v: u128 = 0;
        for &limb in self.limbs.iter().rev() {
            v = v.checked_mul(u128::from(RADIX))?.checked_add(u128::from(limb))?;
        }
        Some(v)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Returns the number of decimal digits.
    ///
    /// Zero has one digit.
    pub fn digits(&self) -> usize {
        match self.limbs.split_last() {
            None => 1,
            Some((&top, rest)) => rest.len() * LIMB_DIGITS + digits_u64(top),
        }
    }

    /// Returns the least significant decimal digit.
    pub fn low_digit(&self) -> u8 {
        self.limbs.first().map_or(0, |&limb| (limb % 10) as u8)
    }

    /// Returns the number of trailing decimal zeros.
    ///
    /// Zero has no trailing zeros.
    pub fn trailing_zeros(&self) -> usize {
        let mut n = 0;
        for &limb in &self.limbs {
            if limb == 0 {
                n += LIMB_DIGITS;
                continue;
            }
            let mut limb = limb;
            while limb % 10 == 0 {
                limb /= 10;
                n += 1;
            }
            return n;
        }
        0
    }

    /// Returns the decimal digit at `pos`, counting from the
    /// least significant digit.
    fn digit_at(&self, pos: usize) -> u8 {
        let (idx, off) = (pos / LIMB_DIGITS, pos % LIMB_DIGITS);
        self.limbs
            .get(idx)
            .map_or(0, |&limb| ((limb / POW10[off]) % 10) as u8)
    }

    /// Reports whether any digit below `pos` is non-zero.
    fn any_nonzero_below(&self, pos: usize) -> bool {
        let (idx, off) = (pos / LIMB_DIGITS, pos % LIMB_DIGITS);
        let full = idx.min(self.limbs.len());
        if self.limbs[..full].iter().any(|&limb| limb != 0) {
            return true;
        }
        self.limbs
            .get(idx)
            .is_some_and(|&limb| limb % POW10[off] != 0)
    }

    pub fn cmp(&self, rhs: &Self) -> Ordering {
        self.limbs
            .len()
            .cmp(&rhs.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(rhs.limbs.iter().rev()))
    }

    /// Returns `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Result<Self, AllocError> {
        let (long, short) = if self.limbs.len() >= rhs.limbs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let mut limbs = alloc_limbs(long.limbs.len() + 1)?;
        let mut carry = 0;
        for (i, &x) in long.limbs.iter().enumerate() {
            let y = short.limbs.get(i).copied().unwrap_or(0);
            let (sum, c) = adc(x, y, carry);
            limbs.push(sum);
            carry = c;
        }
        limbs.push(carry);
        Ok(Self::from_limbs(limbs))
    }

    /// Returns `self + v` where `v < 10^19`.
    pub fn add_small(&self, v: u64) -> Result<Self, AllocError> {
        debug_assert!(v < RADIX);

        let mut limbs = alloc_limbs(self.limbs.len() + 1)?;
        limbs.extend_from_slice(&self.limbs);
        limbs.push(0);
        let mut carry = v;
        for limb in &mut limbs {
            if carry == 0 {
                break;
            }
            (*limb, carry) = adc(*limb, carry, 0);
        }
        Ok(Self::from_limbs(limbs))
    }

    /// Returns `self - rhs`.
    ///
    /// `self` must be at least `rhs`.
    pub fn sub(&self, rhs: &Self) -> Result<Self, AllocError> {
        debug_assert!(self.cmp(rhs) != Ordering::Less);

        let mut limbs = alloc_limbs(self.limbs.len())?;
        let mut borrow = 0;
        for (i, &x) in self.limbs.iter().enumerate() {
            let y = rhs.limbs.get(i).copied().unwrap_or(0) + borrow;
            if x >= y {
                limbs.push(x - y);
                borrow = 0;
            } else {
                limbs.push(x + (RADIX - y));
                borrow = 1;
            }
        }
        debug_assert_eq!(borrow, 0);
        Ok(Self::from_limbs(limbs))
    }

    /// Returns `self * m` where `m < 10^19`.
    pub fn mul_small(&self, m: u64) -> Result<Self, AllocError> {
        debug_assert!(m < RADIX);

        let mut limbs = alloc_limbs(self.limbs.len() + 1)?;
        let mut carry = 0u128;
        for &x in &self.limbs {
            let p = u128::from(x) * u128::from(m) + carry;
            limbs.push((p % u128::from(RADIX)) as u64);
            carry = p / u128::from(RADIX);
        }
        limbs.push(carry as u64);
        Ok(Self::from_limbs(limbs))
    }

    /// Returns `self * rhs`.
    pub fn mul(&self, rhs: &Self, budget: Budget) -> Result<Self, AllocError> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::zero());
        }
        budget.check(self.digits() + rhs.digits())?;

        let n = self.limbs.len() + rhs.limbs.len();
        let mut limbs = alloc_limbs(n)?;
        limbs.resize(n, 0);
        for (i, &x) in self.limbs.iter().enumerate() {
            let mut carry = 0u128;
            for (j, &y) in rhs.limbs.iter().enumerate() {
                let t = u128::from(x) * u128::from(y) + u128::from(limbs[i + j]) + carry;
                limbs[i + j] = (t % u128::from(RADIX)) as u64;
                carry = t / u128::from(RADIX);
            }
            limbs[i + rhs.limbs.len()] = carry as u64;
        }
        Ok(Self::from_limbs(limbs))
    }

    /// Returns `self * 10^n`.
    pub fn mul_pow10(&self, n: usize, budget: Budget) -> Result<Self, AllocError> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let digits = self.digits().checked_add(n).ok_or(AllocError)?;
        budget.check(digits)?;

        let (whole, part) = (n / LIMB_DIGITS, n % LIMB_DIGITS);
        let mut limbs = alloc_limbs(self.limbs.len() + whole + 1)?;
        limbs.resize(whole, 0);
        let mut carry = 0u128;
        for &x in &self.limbs {
            let p = u128::from(x) * u128::from(POW10[part]) + carry;
            limbs.push((p % u128::from(RADIX)) as u64);
            carry = p / u128::from(RADIX);
        }
        limbs.push(carry as u64);
        Ok(Self::from_limbs(limbs))
    }

    /// Returns `self / 10^n` along with the classification of
    /// the discarded digits.
    pub fn div_pow10(&self, n: usize) -> Result<(Self, Rem), AllocError> {
        if n == 0 {
            return Ok((self.clone(), Rem::Zero));
        }
        let rem = match self.digit_at(n - 1) {
            d if d > 5 => Rem::GtHalf,
            5 => Rem::Half.with_sticky(self.any_nonzero_below(n - 1)),
            d => Rem::Zero.with_sticky(d != 0 || self.any_nonzero_below(n - 1)),
        };
        if n >= self.digits() {
            return Ok((Self::zero(), rem));
        }

        let (whole, part) = (n / LIMB_DIGITS, n % LIMB_DIGITS);
        let src = &self.limbs[whole..];
        let mut limbs = alloc_limbs(src.len())?;
        for (i, &x) in src.iter().enumerate() {
            let mut limb = x / POW10[part];
            if part != 0 {
                if let Some(&next) = src.get(i + 1) {
                    limb += (next % POW10[part]) * POW10[LIMB_DIGITS - part];
                }
            }
            limbs.push(limb);
        }
        Ok((Self::from_limbs(limbs), rem))
    }

    /// Returns `(self / d, self % d)` where `0 < d < 10^19`.
    pub fn div_rem_small(&self, d: u64) -> Result<(Self, u64), AllocError> {
        debug_assert!(d != 0 && d < RADIX);

        let mut limbs = alloc_limbs(self.limbs.len())?;
        limbs.resize(self.limbs.len(), 0);
        let mut r = 0u128;
        for (i, &x) in self.limbs.iter().enumerate().rev() {
            let cur = r * u128::from(RADIX) + u128::from(x);
            limbs[i] = (cur / u128::from(d)) as u64;
            r = cur % u128::from(d);
        }
        Ok((Self::from_limbs(limbs), r as u64))
    }

    /// Returns `(self / d, self % d)`.
    ///
    /// `d` must be non-zero.
    pub fn div_rem(&self, d: &Self, budget: Budget) -> Result<(Self, Self), AllocError> {
        debug_assert!(!d.is_zero());

        if self.cmp(d) == Ordering::Less {
            return Ok((Self::zero(), self.clone()));
        }
        budget.check(self.digits() - d.digits() + 1)?;

        if let [v] = d.limbs[..] {
            let (q, r) = self.div_rem_small(v)?;
            return Ok((q, Self::from_u64(r)));
        }
        self.div_rem_knuth(d)
    }

    /// Knuth, TAOCP vol. 2, 4.3.1, algorithm D.
    fn div_rem_knuth(&self, d: &Self) -> Result<(Self, Self), AllocError> {
        let n = d.limbs.len();
        let m = self.limbs.len() - n;
        debug_assert!(n >= 2);

        // D1. Normalize so that the top limb of the divisor is
        // at least RADIX/2.
        let f = RADIX / (d.limbs[n - 1] + 1);
        let mut u = self.mul_small(f)?.limbs;
        u.try_reserve_exact((m + n + 1).saturating_sub(u.len()))
            .map_err(|_| AllocError)?;
        u.resize(m + n + 1, 0);
        let v = d.mul_small(f)?.limbs;
        debug_assert_eq!(v.len(), n);
        debug_assert!(v[n - 1] >= RADIX / 2);

        let radix = u128::from(RADIX);
        let vtop = u128::from(v[n - 1]);
        let vnext = u128::from(v[n - 2]);

        let mut q = alloc_limbs(m + 1)?;
        q.resize(m + 1, 0);

        for j in (0..=m).rev() {
            // D3. Estimate the quotient limb.
            let num = u128::from(u[j + n]) * radix + u128::from(u[j + n - 1]);
            let mut qhat = num / vtop;
            let mut rhat = num % vtop;
            while qhat >= radix || qhat * vnext > rhat * radix + u128::from(u[j + n - 2]) {
                qhat -= 1;
                rhat += vtop;
                if rhat >= radix {
                    break;
                }
            }

            // D4. Multiply and subtract.
            let mut carry = 0u128;
            let mut borrow = 0i128;
            for i in 0..n {
                let p = qhat * u128::from(v[i]) + carry;
                carry = p / radix;
                let mut t = i128::from(u[i + j]) - (p % radix) as i128 - borrow;
                borrow = 0;
                if t < 0 {
                    t += radix as i128;
                    borrow = 1;
                }
                u[i + j] = t as u64;
            }
            let t = i128::from(u[j + n]) - carry as i128 - borrow;

            if t < 0 {
                // D6. Add back.
                u[j + n] = (t + radix as i128) as u64;
                qhat -= 1;
                let mut carry = 0;
                for i in 0..n {
                    (u[i + j], carry) = adc(u[i + j], v[i], carry);
                }
                u[j + n] = (u[j + n] + carry) % RADIX;
            } else {
                u[j + n] = t as u64;
            }
            q[j] = qhat as u64;
        }

        // D8. Unnormalize the remainder.
        u.truncate(n);
        let (r, rest) = Self::from_limbs(u).div_rem_small(f)?;
        debug_assert_eq!(rest, 0);
        Ok((Self::from_limbs(q), r))
    }

    /// Returns `floor(sqrt(self))`, or `None` if the Newton
    /// iteration does not settle within `max_iter` steps.
    pub fn isqrt(&self, budget: Budget, max_iter: usize) -> Result<Option<Self>, AllocError> {
        if self.is_zero() {
            return Ok(Some(Self::zero()));
        }
        // 10^ceil(d/2) > sqrt(self), and Newton's method
        // decreases monotonically from above.
        let one = Self::from_u64(1);
        let mut x = one.mul_pow10(self.digits().div_ceil(2), budget)?;
        for _ in 0..max_iter {
            let (q, _) = self.div_rem(&x, budget)?;
            let (y, _) = x.add(&q)?.div_rem_small(2)?;
            if y.cmp(&x) != Ordering::Less {
                return Ok(Some(x));
            }
            x = y;
        }
        Ok(None)
    }
}

impl fmt::Display for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.limbs.split_last() {
            None => f.write_str("0"),
            Some((top, rest)) => {
                write!(f, "{top}")?;
                for limb in rest.iter().rev() {
                    write!(f, "{limb:019}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{random, thread_rng, Rng};

    use super::*;

    fn uint(s: &str) -> Uint {
        Uint::from_ascii_digits(s.as_bytes()).unwrap()
    }

    fn u(v: u128) -> Uint {
        Uint::from_u128(v)
    }

    #[test]
    fn test_digits() {
        assert_eq!(Uint::zero().digits(), 1);
        for i in 0..=38u32 {
            let v = 10u128.pow(i);
            assert_eq!(u(v).digits(), i as usize + 1, "10^{i}");
            if i > 0 {
                assert_eq!(u(v - 1).digits(), i as usize, "10^{i}-1");
            }
        }
    }

    #[test]
    fn test_parse_display() {
        for s in [
            "0",
            "1",
            "9999999999999999999",
            "10000000000000000000",
            "123456789012345678901234567890123456789012345678901234567890",
        ] {
            assert_eq!(uint(s).to_string(), s);
        }
        assert_eq!(uint("000123").to_string(), "123");
    }

    #[test]
    fn test_trailing_zeros() {
        assert_eq!(Uint::zero().trailing_zeros(), 0);
        assert_eq!(u(1).trailing_zeros(), 0);
        assert_eq!(u(1000).trailing_zeros(), 3);
        assert_eq!(u(10u128.pow(19)).trailing_zeros(), 19);
        assert_eq!(u(25 * 10u128.pow(30)).trailing_zeros(), 30);
    }

    #[test]
    fn test_arith_u128() {
        let mut rng = thread_rng();
        for _ in 0..10_000 {
            let x: u128 = random::<u128>() >> rng.gen_range(1..128);
            let y: u128 = random::<u128>() >> rng.gen_range(1..128);
            let (big, small) = if x >= y { (x, y) } else { (y, x) };
            assert_eq!(u(big).sub(&u(small)).unwrap(), u(big - small));
            if let Some(sum) = x.checked_add(y) {
                assert_eq!(u(x).add(&u(y)).unwrap(), u(sum), "{x} + {y}");
            }
            if let Some(prod) = x.checked_mul(y) {
                assert_eq!(u(x).mul(&u(y), Budget::UNLIMITED).unwrap(), u(prod));
            }
            if y != 0 {
                let (q, r) = u(x).div_rem(&u(y), Budget::UNLIMITED).unwrap();
                assert_eq!((q, r), (u(x / y), u(x % y)), "{x} / {y}");
            }
            assert_eq!(u(x).cmp(&u(y)), x.cmp(&y));
        }
    }

    #[test]
    fn test_add_carry() {
        let x = u(9_500_000_000_000_000_000);
        assert_eq!(x.add(&x).unwrap(), u(19_000_000_000_000_000_000));

        let max = u(u128::from(RADIX) * u128::from(RADIX) - 1);
        assert_eq!(
            max.add(&max).unwrap(),
            u(2 * u128::from(RADIX) * u128::from(RADIX) - 2)
        );
        assert_eq!(max.add_small(1).unwrap(), u(u128::from(RADIX).pow(2)));
        assert_eq!(
            max.add_small(RADIX - 1).unwrap(),
            u(u128::from(RADIX).pow(2) + u128::from(RADIX) - 2)
        );
        assert_eq!(
            u(u128::from(RADIX) - 1).add_small(RADIX - 1).unwrap(),
            u(2 * u128::from(RADIX) - 2)
        );
    }

    #[test]
    fn test_div_pow10() {
        let tests = [
            (12345u128, 0, 12345u128, Rem::Zero),
            (12345, 1, 1234, Rem::LtHalf),
            (12345, 2, 123, Rem::LtHalf),
            (12350, 2, 123, Rem::Half),
            (12351, 2, 123, Rem::GtHalf),
            (12360, 2, 123, Rem::GtHalf),
            (12300, 2, 123, Rem::Zero),
            (12345, 5, 0, Rem::LtHalf),
            (52345, 5, 0, Rem::GtHalf),
            (50000, 5, 0, Rem::Half),
            (12345, 9, 0, Rem::LtHalf),
            (5 * 10u128.pow(25), 26, 0, Rem::Half),
            (123 * 10u128.pow(30) + 5 * 10u128.pow(29), 30, 123, Rem::Half),
            (123 * 10u128.pow(30) + 5 * 10u128.pow(29) + 1, 30, 123, Rem::GtHalf),
        ];
        for (i, (x, n, want, rem)) in tests.into_iter().enumerate() {
            let got = u(x).div_pow10(n).unwrap();
            assert_eq!(got, (u(want), rem), "#{i}: {x} / 10^{n}");
        }
    }

    #[test]
    fn test_mul_pow10() {
        for n in 0..60 {
            let got = u(7).mul_pow10(n, Budget::UNLIMITED).unwrap();
            let want = format!("7{}", "0".repeat(n));
            assert_eq!(got.to_string(), want);
            let (back, rem) = got.div_pow10(n).unwrap();
            assert_eq!(back, u(7));
            assert_eq!(rem, Rem::Zero);
        }
    }

    #[test]
    fn test_budget() {
        let x = u(123);
        assert!(x.mul_pow10(7, Budget::new(Some(10))).is_ok());
        assert_eq!(x.mul_pow10(8, Budget::new(Some(10))), Err(AllocError));
        assert_eq!(
            x.mul(&u(10u128.pow(20)), Budget::new(Some(10))),
            Err(AllocError)
        );
    }

    #[test]
    fn test_isqrt() {
        for x in (0u128..2000).chain([10u128.pow(30), u64::MAX as u128, u128::MAX]) {
            let got = u(x).isqrt(Budget::UNLIMITED, 256).unwrap().unwrap();
            let r = got.to_u128().unwrap();
            assert!(r * r <= x, "isqrt({x}) = {r}");
            assert!((r + 1).checked_mul(r + 1).map_or(true, |sq| sq > x), "isqrt({x}) = {r}");
        }
        let big = uint(&format!("1{}", "0".repeat(100)));
        let want = uint(&format!("1{}", "0".repeat(50)));
        assert_eq!(big.isqrt(Budget::UNLIMITED, 256).unwrap(), Some(want));

        // 10^16 is the first estimate of sqrt(10^30).
        assert_eq!(u(10u128.pow(30)).isqrt(Budget::UNLIMITED, 1).unwrap(), None);
        assert_eq!(u(4).isqrt(Budget::UNLIMITED, 0).unwrap(), None);
    }

    /// Limbs near the top of the radix exercise every carry and
    /// the add-back step of long division.
    fn limbs() -> impl Strategy<Value = Uint> {
        let limb = prop_oneof![
            0..RADIX,
            RADIX - 1_000..RADIX,
            RADIX / 2 - 1_000..RADIX / 2 + 1_000,
        ];
        prop::collection::vec(limb, 0..6).prop_map(Uint::from_limbs)
    }

    proptest! {
        #[test]
        fn prop_div_rem(x in limbs(), y in limbs()) {
            prop_assume!(!y.is_zero());
            let (q, r) = x.div_rem(&y, Budget::UNLIMITED).unwrap();
            prop_assert_eq!(r.cmp(&y), Ordering::Less);
            let back = q.mul(&y, Budget::UNLIMITED).unwrap().add(&r).unwrap();
            prop_assert_eq!(back, x);
        }

        #[test]
        fn prop_add_sub(x in limbs(), y in limbs()) {
            let sum = x.add(&y).unwrap();
            prop_assert_eq!(sum.clone(), y.add(&x).unwrap());
            prop_assert_eq!(sum.sub(&y).unwrap(), x);
        }

        #[test]
        fn prop_mul_then_div(x in limbs(), y in limbs(), r in limbs()) {
            prop_assume!(!y.is_zero() && r.cmp(&y) == Ordering::Less);
            let n = x.mul(&y, Budget::UNLIMITED).unwrap().add(&r).unwrap();
            let got = n.div_rem(&y, Budget::UNLIMITED).unwrap();
            prop_assert_eq!(got, (x, r));
        }

        #[test]
        fn prop_isqrt(x in limbs()) {
            let s = x.isqrt(Budget::UNLIMITED, 256).unwrap().unwrap();
            let sq = s.mul(&s, Budget::UNLIMITED).unwrap();
            prop_assert_ne!(sq.cmp(&x), Ordering::Greater);
            let s1 = s.add_small(1).unwrap();
            let sq1 = s1.mul(&s1, Budget::UNLIMITED).unwrap();
            prop_assert_eq!(sq1.cmp(&x), Ordering::Greater);
        }
    }
}
