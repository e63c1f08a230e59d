use crate::constants::{PARTITION_DIGITS, PARTITION_RADIX};
use crate::context::{default_context, Approximation, Context, Format};
use crate::error::Error;
use crate::ops;
use crate::str::{format_value, parse_str};

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::iter::Sum;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use num_traits::{FromPrimitive, Num, One, Signed, ToPrimitive, Zero};

/// `BigDecimal` is an arbitrary precision signed decimal number.
///
/// The magnitude is stored as a little-endian sequence of base-1,000,000
/// digit groups (*partitions*, six decimal digits each) together with an
/// *offset* locating the least significant stored group, so both very large
/// and very small values stay compact:
///
/// ```text
/// magnitude = Σ partitions[i] * 1_000_000^(offset + i)
/// ```
///
/// The sign is carried separately and every partition is non-negative.
/// Values are immutable: each operation returns a newly constructed value in
/// canonical form (no leading or trailing zero partition; zero is the empty
/// sequence).
///
/// Integer-equivalent arithmetic is exact. Division is truncated at a
/// configurable number of decimal digits (100 by default), and all four
/// operations are followed by a configurable canonicalization policy — see
/// [`Context`] and [`Approximation`].
///
/// # Example
///
/// ```
/// use bigdec::BigDecimal;
/// use std::str::FromStr;
///
/// let price = BigDecimal::from_str("123.456")?;
/// let fee = BigDecimal::from_str("0.544")?;
/// assert_eq!(price + fee, BigDecimal::from(124));
/// # Ok::<(), bigdec::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct BigDecimal {
    partitions: Vec<u32>,
    offset: i32,
    negative: bool,
}

impl BigDecimal {
    /// The canonical zero.
    pub const ZERO: BigDecimal = BigDecimal {
        partitions: Vec::new(),
        offset: 0,
        negative: false,
    };

    /// Builds a value from raw parts and restores the canonical form:
    /// leading and trailing zero partitions are trimmed away and a zero
    /// magnitude always carries the positive sign.
    pub(crate) fn from_parts(partitions: Vec<u32>, offset: i32, negative: bool) -> BigDecimal {
        let (partitions, offset) = ops::common::trim(partitions, offset);
        let negative = negative && !partitions.is_empty();
        BigDecimal {
            partitions,
            offset,
            negative,
        }
    }

    pub(crate) fn partitions(&self) -> &[u32] {
        &self.partitions
    }

    pub(crate) fn partition_len(&self) -> usize {
        self.partitions.len()
    }

    /// Group index of the least significant stored partition.
    pub(crate) fn lo_group(&self) -> i32 {
        self.offset
    }

    /// Group index just above the most significant stored partition.
    pub(crate) fn hi_group(&self) -> i32 {
        self.offset + self.partitions.len() as i32
    }

    /// The partition at a group index, zero outside the stored range.
    pub(crate) fn partition_at(&self, group: i32) -> u32 {
        let idx = group - self.offset;
        if idx < 0 {
            0
        } else {
            self.partitions.get(idx as usize).copied().unwrap_or(0)
        }
    }

    /// -1, 0 or +1.
    pub(crate) fn sign_value(&self) -> i32 {
        if self.partitions.is_empty() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// The absolute value as a fresh positive value.
    pub(crate) fn magnitude(&self) -> BigDecimal {
        BigDecimal {
            partitions: self.partitions.clone(),
            offset: self.offset,
            negative: false,
        }
    }

    pub(crate) fn negated(&self) -> BigDecimal {
        BigDecimal {
            partitions: self.partitions.clone(),
            offset: self.offset,
            negative: !self.negative && !self.partitions.is_empty(),
        }
    }

    /// Multiplies by `RADIX^groups` by relocating the partitions.
    pub(crate) fn shifted(self, groups: i32) -> BigDecimal {
        if self.partitions.is_empty() {
            return self;
        }
        BigDecimal {
            offset: self.offset + groups,
            ..self
        }
    }

    /// Returns `true` if the value has zero magnitude.
    pub fn is_zero(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Returns `true` for negative values; zero is not negative.
    pub fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` for positive values and zero.
    pub fn is_sign_positive(&self) -> bool {
        !self.negative
    }

    /// The absolute value.
    pub fn abs(&self) -> BigDecimal {
        self.magnitude()
    }

    /// Addition under an explicit canonicalization policy.
    pub fn add_with(&self, other: &BigDecimal, approximation: Approximation) -> BigDecimal {
        ops::approx_impl(ops::add_impl(self, other), approximation)
    }

    /// Subtraction under an explicit canonicalization policy.
    pub fn sub_with(&self, other: &BigDecimal, approximation: Approximation) -> BigDecimal {
        ops::approx_impl(ops::sub_impl(self, other), approximation)
    }

    /// Multiplication under an explicit canonicalization policy.
    pub fn mul_with(&self, other: &BigDecimal, approximation: Approximation) -> BigDecimal {
        ops::approx_impl(ops::mul_impl(self, other), approximation)
    }

    /// Division under an explicit context, which supplies both the digit
    /// precision and the canonicalization policy.
    ///
    /// # Example
    ///
    /// ```
    /// use bigdec::{BigDecimal, Context, Error};
    ///
    /// let ctx = Context::new().with_div_precision(24)?;
    /// let sevenths = BigDecimal::from(5).div_with(&BigDecimal::from(7), &ctx)?;
    /// assert_eq!(sevenths, "0.714285714285".parse()?);
    ///
    /// let err = BigDecimal::from(5).div_with(&BigDecimal::ZERO, &ctx);
    /// assert_eq!(err, Err(Error::DivisionByZero));
    /// # Ok::<(), bigdec::Error>(())
    /// ```
    pub fn div_with(&self, other: &BigDecimal, context: &Context) -> Result<BigDecimal, Error> {
        ops::div_impl(self, other, context.div_precision())
            .map(|quotient| ops::approx_impl(quotient, context.approximation()))
    }

    /// Division under the default context, `None` on a zero divisor.
    pub fn checked_div(&self, other: &BigDecimal) -> Option<BigDecimal> {
        self.div_with(other, &default_context()).ok()
    }

    /// Truncated remainder under the default canonicalization policy, `None`
    /// on a zero divisor.
    pub fn checked_rem(&self, other: &BigDecimal) -> Option<BigDecimal> {
        let approximation = default_context().approximation();
        ops::rem_impl(self, other)
            .ok()
            .map(|r| ops::approx_impl(r, approximation))
    }

    /// Applies a canonicalization policy to this value directly.
    pub fn approximate(&self, approximation: Approximation) -> BigDecimal {
        ops::approx_impl(self.clone(), approximation)
    }

    /// Rounds toward negative infinity at a decimal digit position.
    ///
    /// Position 0 is the units digit, positive positions are fractional
    /// digits and negative positions are higher order integer digits.
    ///
    /// # Example
    ///
    /// ```
    /// use bigdec::BigDecimal;
    /// use std::str::FromStr;
    ///
    /// let x = BigDecimal::from_str("-5.5")?;
    /// assert_eq!(x.floor_at(0), BigDecimal::from(-6));
    /// assert_eq!(x.ceil_at(0), BigDecimal::from(-5));
    /// # Ok::<(), bigdec::Error>(())
    /// ```
    pub fn floor_at(&self, position: i32) -> BigDecimal {
        ops::floor_impl(self, position)
    }

    /// Rounds toward positive infinity at a decimal digit position.
    pub fn ceil_at(&self, position: i32) -> BigDecimal {
        ops::ceil_impl(self, position)
    }

    /// Rounds half away from zero at a decimal digit position: the digit just
    /// below the position decides, the sign never flips.
    ///
    /// # Example
    ///
    /// ```
    /// use bigdec::BigDecimal;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(BigDecimal::from_str("2.5")?.round_at(0), BigDecimal::from(3));
    /// assert_eq!(BigDecimal::from_str("-2.5")?.round_at(0), BigDecimal::from(-3));
    /// # Ok::<(), bigdec::Error>(())
    /// ```
    pub fn round_at(&self, position: i32) -> BigDecimal {
        ops::round_impl(self, position)
    }

    /// Rounds toward negative infinity at the units digit.
    pub fn floor(&self) -> BigDecimal {
        self.floor_at(0)
    }

    /// Rounds toward positive infinity at the units digit.
    pub fn ceil(&self) -> BigDecimal {
        self.ceil_at(0)
    }

    /// Rounds half away from zero at the units digit.
    pub fn round(&self) -> BigDecimal {
        self.round_at(0)
    }

    /// Drops the fractional part, truncating toward zero.
    pub fn trunc(&self) -> BigDecimal {
        ops::trunc_impl(self)
    }

    /// Renders with an explicit format, ignoring the default context.
    ///
    /// # Example
    ///
    /// ```
    /// use bigdec::{BigDecimal, Format};
    /// use std::str::FromStr;
    ///
    /// let x = BigDecimal::from_str("123.456")?;
    /// assert_eq!(x.format(Format::Decimal), "123.456");
    /// assert_eq!(x.format(Format::Scientific), "1.23456e2");
    /// assert_eq!(x.format(Format::DecimalPlaces(2)), "123.46");
    /// # Ok::<(), bigdec::Error>(())
    /// ```
    pub fn format(&self, format: Format) -> String {
        format_value(self, format)
    }

    fn from_magnitude(mut magnitude: u64, negative: bool) -> BigDecimal {
        let radix = PARTITION_RADIX as u64;
        let mut partitions = Vec::new();
        let mut offset = 0;
        while magnitude != 0 {
            let partition = (magnitude % radix) as u32;
            if partition == 0 && partitions.is_empty() {
                offset += 1;
            } else {
                partitions.push(partition);
            }
            magnitude /= radix;
        }
        let negative = negative && !partitions.is_empty();
        BigDecimal {
            partitions,
            offset,
            negative,
        }
    }
}

impl Default for BigDecimal {
    fn default() -> Self {
        BigDecimal::ZERO
    }
}

// Equality and ordering are one comparison: the canonical form guarantees a
// single structural representation per value, so comparing by value and
// hashing by structure agree.
impl PartialEq for BigDecimal {
    fn eq(&self, other: &BigDecimal) -> bool {
        ops::cmp_impl(self, other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &BigDecimal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &BigDecimal) -> Ordering {
        ops::cmp_impl(self, other)
    }
}

impl Hash for BigDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.partitions.hash(state);
        self.offset.hash(state);
        self.negative.hash(state);
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigDecimal {
                fn from(value: $t) -> BigDecimal {
                    let negative = value < 0;
                    BigDecimal::from_magnitude(value.unsigned_abs() as u64, negative)
                }
            }
        )*
    };
}

macro_rules! impl_from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigDecimal {
                fn from(value: $t) -> BigDecimal {
                    BigDecimal::from_magnitude(value as u64, false)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64);
impl_from_uint!(u8, u16, u32, u64);

impl TryFrom<f64> for BigDecimal {
    type Error = Error;

    fn try_from(value: f64) -> Result<BigDecimal, Error> {
        BigDecimal::from_f64(value).ok_or_else(|| Error::InvalidDecimal(value.to_string()))
    }
}

impl TryFrom<f32> for BigDecimal {
    type Error = Error;

    fn try_from(value: f32) -> Result<BigDecimal, Error> {
        BigDecimal::from_f32(value).ok_or_else(|| Error::InvalidDecimal(value.to_string()))
    }
}

impl Neg for BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        self.negated()
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        self.negated()
    }
}

impl Add<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn add(self, other: &BigDecimal) -> BigDecimal {
        self.add_with(other, default_context().approximation())
    }
}

impl Sub<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn sub(self, other: &BigDecimal) -> BigDecimal {
        self.sub_with(other, default_context().approximation())
    }
}

impl Mul<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn mul(self, other: &BigDecimal) -> BigDecimal {
        self.mul_with(other, default_context().approximation())
    }
}

impl Div<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn div(self, other: &BigDecimal) -> BigDecimal {
        match self.div_with(other, &default_context()) {
            Ok(quotient) => quotient,
            Err(_) => panic!("Division by zero"),
        }
    }
}

impl Rem<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn rem(self, other: &BigDecimal) -> BigDecimal {
        match self.checked_rem(other) {
            Some(remainder) => remainder,
            None => panic!("Division by zero"),
        }
    }
}

macro_rules! forward_binop {
    ($(impl $imp:ident, $method:ident;)*) => {
        $(
            impl $imp<BigDecimal> for BigDecimal {
                type Output = BigDecimal;

                fn $method(self, other: BigDecimal) -> BigDecimal {
                    $imp::$method(&self, &other)
                }
            }

            impl $imp<&BigDecimal> for BigDecimal {
                type Output = BigDecimal;

                fn $method(self, other: &BigDecimal) -> BigDecimal {
                    $imp::$method(&self, other)
                }
            }

            impl $imp<BigDecimal> for &BigDecimal {
                type Output = BigDecimal;

                fn $method(self, other: BigDecimal) -> BigDecimal {
                    $imp::$method(self, &other)
                }
            }
        )*
    };
}

forward_binop! {
    impl Add, add;
    impl Sub, sub;
    impl Mul, mul;
    impl Div, div;
    impl Rem, rem;
}

impl Sum for BigDecimal {
    fn sum<I: Iterator<Item = BigDecimal>>(iter: I) -> BigDecimal {
        iter.fold(BigDecimal::ZERO, |sum, value| sum + value)
    }
}

impl<'a> Sum<&'a BigDecimal> for BigDecimal {
    fn sum<I: Iterator<Item = &'a BigDecimal>>(iter: I) -> BigDecimal {
        iter.fold(BigDecimal::ZERO, |sum, value| sum + value)
    }
}

impl Zero for BigDecimal {
    fn zero() -> BigDecimal {
        BigDecimal::ZERO
    }

    fn is_zero(&self) -> bool {
        self.partitions.is_empty()
    }
}

impl One for BigDecimal {
    fn one() -> BigDecimal {
        BigDecimal::from(1)
    }
}

impl Num for BigDecimal {
    type FromStrRadixErr = Error;

    fn from_str_radix(str: &str, radix: u32) -> Result<BigDecimal, Error> {
        if radix != 10 {
            return Err(Error::UnsupportedRadix(radix));
        }
        parse_str(str)
    }
}

impl Signed for BigDecimal {
    fn abs(&self) -> BigDecimal {
        self.magnitude()
    }

    fn abs_sub(&self, other: &BigDecimal) -> BigDecimal {
        if self <= other {
            BigDecimal::ZERO
        } else {
            self - other
        }
    }

    fn signum(&self) -> BigDecimal {
        BigDecimal::from(self.sign_value())
    }

    fn is_positive(&self) -> bool {
        self.sign_value() > 0
    }

    fn is_negative(&self) -> bool {
        self.sign_value() < 0
    }
}

impl FromPrimitive for BigDecimal {
    fn from_i64(n: i64) -> Option<BigDecimal> {
        Some(BigDecimal::from(n))
    }

    fn from_u64(n: u64) -> Option<BigDecimal> {
        Some(BigDecimal::from(n))
    }

    // Floats travel through their shortest round-trip decimal rendering, so
    // `0.1f64` becomes exactly `0.1` rather than the nearest binary fraction.
    fn from_f64(n: f64) -> Option<BigDecimal> {
        if !n.is_finite() {
            return None;
        }
        parse_str(&n.to_string()).ok()
    }

    fn from_f32(n: f32) -> Option<BigDecimal> {
        if !n.is_finite() {
            return None;
        }
        parse_str(&n.to_string()).ok()
    }
}

// Integer conversions truncate toward zero; a value whose integer part does
// not fit the target type yields `None` rather than wrapping.
impl ToPrimitive for BigDecimal {
    fn to_i64(&self) -> Option<i64> {
        let radix = PARTITION_RADIX as i64;
        let mut result: i64 = 0;
        for group in (0..self.hi_group().max(0)).rev() {
            let partition = self.partition_at(group) as i64;
            result = result.checked_mul(radix)?;
            result = if self.negative {
                result.checked_sub(partition)?
            } else {
                result.checked_add(partition)?
            };
        }
        Some(result)
    }

    fn to_i128(&self) -> Option<i128> {
        let radix = PARTITION_RADIX as i128;
        let mut result: i128 = 0;
        for group in (0..self.hi_group().max(0)).rev() {
            let partition = self.partition_at(group) as i128;
            result = result.checked_mul(radix)?;
            result = if self.negative {
                result.checked_sub(partition)?
            } else {
                result.checked_add(partition)?
            };
        }
        Some(result)
    }

    fn to_u64(&self) -> Option<u64> {
        let radix = PARTITION_RADIX as u64;
        let mut result: u64 = 0;
        for group in (0..self.hi_group().max(0)).rev() {
            result = result.checked_mul(radix)?;
            result = result.checked_add(self.partition_at(group) as u64)?;
        }
        if self.negative && result != 0 {
            return None;
        }
        Some(result)
    }

    fn to_u128(&self) -> Option<u128> {
        let radix = PARTITION_RADIX as u128;
        let mut result: u128 = 0;
        for group in (0..self.hi_group().max(0)).rev() {
            result = result.checked_mul(radix)?;
            result = result.checked_add(self.partition_at(group) as u128)?;
        }
        if self.negative && result != 0 {
            return None;
        }
        Some(result)
    }

    fn to_f64(&self) -> Option<f64> {
        if self.is_zero() {
            return Some(0.0);
        }
        let hi = self.hi_group().max(0);
        let lo = self.lo_group().min(0);
        let mut result = 0.0;
        for group in (lo..hi).rev() {
            result = result * PARTITION_RADIX as f64 + self.partition_at(group) as f64;
        }
        result *= 10f64.powi(lo * PARTITION_DIGITS as i32);
        Some(if self.negative { -result } else { result })
    }

    fn to_f32(&self) -> Option<f32> {
        self.to_f64().map(|f| f as f32)
    }
}
