//! Exact ratio type over arbitrary-precision integers.
//!
//! `Ratio` wraps `num_rational::BigRational`: `den > 0`, always reduced, so
//! structural equality is numeric equality. Addition, subtraction,
//! multiplication and comparison cannot fail; only division by zero and
//! parsing report errors. Normalizing many unrelated fractional weights
//! keeps every intermediate exact, whatever the size of its denominator.

use crate::errors::CoreError;
use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Largest decimal exponent accepted by the parser (`1e4096`).
const MAX_EXPONENT: u32 = 4096;

/// Exact ratio with normalized sign and positive denominator.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Ratio(BigRational);

impl Ratio {
    pub fn zero() -> Ratio {
        Ratio(BigRational::zero())
    }

    pub fn one() -> Ratio {
        Ratio(BigRational::one())
    }

    /// Construct a ratio, ensuring `den > 0` and reducing by GCD.
    pub fn new(num: i128, den: i128) -> Result<Ratio, CoreError> {
        Ratio::from_big(BigInt::from(num), BigInt::from(den))
    }

    fn from_big(num: BigInt, den: BigInt) -> Result<Ratio, CoreError> {
        if den.is_zero() {
            return Err(CoreError::InvalidRatio);
        }
        Ok(Ratio(BigRational::new(num, den)))
    }

    pub fn from_integer(n: i128) -> Ratio {
        Ratio(BigRational::from_integer(BigInt::from(n)))
    }

    #[inline]
    pub fn numer(&self) -> &BigInt { self.0.numer() }

    #[inline]
    pub fn denom(&self) -> &BigInt { self.0.denom() }

    #[inline]
    pub fn is_zero(&self) -> bool { self.0.is_zero() }

    #[inline]
    pub fn is_positive(&self) -> bool { self.0.is_positive() }

    #[inline]
    pub fn is_negative(&self) -> bool { self.0.is_negative() }

    #[inline]
    pub fn is_integer(&self) -> bool { self.0.is_integer() }

    /// Integer part, rounded toward zero. Fails only if it does not fit `i128`.
    pub fn trunc(&self) -> Result<i128, CoreError> {
        self.0.to_integer().to_i128().ok_or(CoreError::Overflow)
    }

    pub fn abs(&self) -> Ratio {
        Ratio(self.0.abs())
    }

    pub fn checked_div(&self, rhs: &Ratio) -> Result<Ratio, CoreError> {
        if rhs.is_zero() {
            return Err(CoreError::InvalidRatio);
        }
        Ok(Ratio(&self.0 / &rhs.0))
    }

    /// Exact value of the float's shortest round-trip decimal form.
    /// Non-finite inputs are rejected.
    pub fn from_f64(x: f64) -> Result<Ratio, CoreError> {
        if !x.is_finite() {
            return Err(CoreError::InvalidRatio);
        }
        format!("{x}").parse()
    }

    /// Decimal rendering with `places` fractional digits, rounding half away
    /// from zero.
    pub fn to_decimal_string(&self, places: u32) -> String {
        let scale = num_traits::pow(BigInt::from(10u32), places as usize);
        let scaled = self.numer() * &scale;
        let den = self.denom();

        let mut q = &scaled / den;
        let r = &scaled % den;
        if r.abs() * 2u32 >= *den {
            if scaled.is_negative() {
                q -= BigInt::one();
            } else {
                q += BigInt::one();
            }
        }

        let sign = if q.is_negative() { "-" } else { "" };
        let mut digits = q.magnitude().to_string();
        let width = places as usize + 1;
        if digits.len() < width {
            digits.insert_str(0, &"0".repeat(width - digits.len()));
        }
        if places == 0 {
            return format!("{sign}{digits}");
        }
        let (int_part, frac_part) = digits.split_at(digits.len() - places as usize);
        format!("{sign}{int_part}.{frac_part}")
    }
}

impl Default for Ratio {
    fn default() -> Self { Ratio::zero() }
}

impl From<i64> for Ratio {
    fn from(n: i64) -> Self { Ratio::from_integer(i128::from(n)) }
}

impl From<u64> for Ratio {
    fn from(n: u64) -> Self { Ratio::from_integer(i128::from(n)) }
}

impl From<u32> for Ratio {
    fn from(n: u32) -> Self { Ratio::from_integer(i128::from(n)) }
}

macro_rules! forward_binop {
    ($Trait:ident, $method:ident) => {
        impl<'a, 'b> $Trait<&'b Ratio> for &'a Ratio {
            type Output = Ratio;

            fn $method(self, rhs: &'b Ratio) -> Ratio {
                Ratio((&self.0).$method(&rhs.0))
            }
        }

        impl $Trait for Ratio {
            type Output = Ratio;

            fn $method(self, rhs: Ratio) -> Ratio {
                Ratio(self.0.$method(rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Ratio {
    type Output = Ratio;

    fn neg(self) -> Ratio { Ratio(-self.0) }
}

impl Sum for Ratio {
    fn sum<I: Iterator<Item = Ratio>>(iter: I) -> Ratio {
        iter.fold(Ratio::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Ratio> for Ratio {
    fn sum<I: Iterator<Item = &'a Ratio>>(iter: I) -> Ratio {
        iter.fold(Ratio::zero(), |acc, x| &acc + x)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

/// Parse `[+-]digits[.digits][e[+-]digits]` exactly.
fn parse_decimal(s: &str) -> Result<Ratio, CoreError> {
    let s = s.trim();
    let (neg, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exp) = match body.find(|c| c == 'e' || c == 'E') {
        Some(i) => {
            let exp = body[i + 1..]
                .parse::<i32>()
                .map_err(|_| CoreError::InvalidRatio)?;
            (&body[..i], exp)
        }
        None => (body, 0),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(CoreError::InvalidRatio);
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidRatio);
    }

    let digits: String = int_part.chars().chain(frac_part.chars()).collect();
    let mut num = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or(CoreError::InvalidRatio)?;
    if neg {
        num = -num;
    }

    let frac_len = i32::try_from(frac_part.len()).map_err(|_| CoreError::Overflow)?;
    let scale = frac_len.checked_sub(exp).ok_or(CoreError::Overflow)?;
    if scale.unsigned_abs() > MAX_EXPONENT {
        return Err(CoreError::Overflow);
    }
    let pow10 = num_traits::pow(BigInt::from(10u32), scale.unsigned_abs() as usize);
    if scale >= 0 {
        Ratio::from_big(num, pow10)
    } else {
        Ratio::from_big(num * pow10, BigInt::one())
    }
}

impl FromStr for Ratio {
    type Err = CoreError;

    /// Accepts integers (`"3"`), decimals (`"0.25"`, `"1e-3"`) and
    /// fractions of those (`"1/3"`, `"0.5/3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((n, d)) => parse_decimal(n)?.checked_div(&parse_decimal(d)?),
            None => parse_decimal(s),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Ratio;
    use core::fmt;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Ratios travel as strings ("3", "1/3") so no precision is lost.
    impl Serialize for Ratio {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    struct RatioVisitor;

    impl<'de> Visitor<'de> for RatioVisitor {
        type Value = Ratio;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a ratio string like \"1/3\"")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Ratio, E> {
            v.parse().map_err(|e| E::custom(e))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Ratio, E> {
            Ok(Ratio::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Ratio, E> {
            Ok(Ratio::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Ratio, E> {
            Ratio::from_f64(v).map_err(|e| E::custom(e))
        }
    }

    impl<'de> Deserialize<'de> for Ratio {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(RatioVisitor)
        }
    }
}
