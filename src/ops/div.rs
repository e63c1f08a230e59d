use crate::constants::{PARTITION_DIGITS, PARTITION_RADIX};
use crate::decimal::BigDecimal;
use crate::error::Error;
use crate::ops::add::sub_impl;
use crate::ops::mul::mul_impl;
use crate::ops::round::trunc_impl;

/// Long division over digit groups, truncated at `precision` decimal digits.
///
/// Classic normalized-estimate long division: the two most significant
/// divisor partitions form a fixed estimator denominator, and every step
/// pulls a three-partition window of the current remainder (signed, since an
/// estimate may overshoot and drive the remainder briefly negative), divides
/// it by the estimator to produce one quotient partition, then subtracts
/// `divisor * digit * RADIX^position` from the remainder. A misestimate of
/// ±1 near partition boundaries is repaired by [`normalize`], which re-splits
/// the already-placed quotient partitions rather than recomputing the
/// estimate.
pub(crate) fn div_impl(d1: &BigDecimal, d2: &BigDecimal, precision: u32) -> Result<BigDecimal, Error> {
    if d2.is_zero() {
        return Err(Error::DivisionByZero);
    }
    if d1.is_zero() {
        return Ok(BigDecimal::ZERO);
    }

    let radix = PARTITION_RADIX as i64;
    let dividend = d1.magnitude();
    let divisor = d2.magnitude();

    let dividend_hi = dividend.hi_group();
    let divisor_hi = divisor.hi_group();

    let head = divisor.partitions();
    let second = if head.len() > 1 { head[head.len() - 2] as i64 } else { 0 };
    let div_head = head[head.len() - 1] as i64 * radix + second;

    // Quotient partitions accumulate most significant first; the digit placed
    // with the loop at `exp` carries weight RADIX^(exp + 1).
    let mut quotient: Vec<i64> = Vec::new();
    let mut remainder = dividend;
    let mut exp = dividend_hi - divisor_hi + 1;

    while !remainder.is_zero() && (quotient.len() as u32) * PARTITION_DIGITS < precision {
        exp -= 1;

        let w2 = remainder.partition_at(exp + divisor_hi + 1) as i64;
        let w1 = remainder.partition_at(exp + divisor_hi) as i64;
        let w0 = remainder.partition_at(exp + divisor_hi - 1) as i64;
        let mut window = (w2 * radix + w1) * radix + w0;
        if remainder.is_sign_negative() {
            window = -window;
        }

        let digit = window / div_head;
        quotient.push(digit);
        normalize(&mut quotient);

        let step = mul_impl(&divisor, &BigDecimal::from(digit).shifted(exp + 1));
        remainder = sub_impl(&remainder, &step);
    }

    debug_assert!(quotient.iter().all(|&d| (0..radix).contains(&d)));

    quotient.reverse();
    let partitions = quotient.into_iter().map(|d| d as u32).collect();
    Ok(BigDecimal::from_parts(
        partitions,
        exp + 1,
        d1.is_sign_negative() != d2.is_sign_negative(),
    ))
}

/// Re-splits quotient partitions so each lands back in `[0, RADIX)`. Only the
/// freshly appended digit can be out of range, so the walk stops at the first
/// zero carry. Euclidean splitting keeps the remainder non-negative for
/// over- and under-estimates alike; a carry out of the leading partition
/// grows the quotient by one group.
fn normalize(quotient: &mut Vec<i64>) {
    let radix = PARTITION_RADIX as i64;
    for idx in (1..quotient.len()).rev() {
        let carry = quotient[idx].div_euclid(radix);
        if carry == 0 {
            break;
        }
        quotient[idx] -= carry * radix;
        quotient[idx - 1] += carry;
    }
    let carry = quotient[0].div_euclid(radix);
    if carry != 0 {
        quotient[0] -= carry * radix;
        quotient.insert(0, carry);
    }
}

/// Truncated remainder: `d1 - d2 * trunc(d1 / d2)`, with the sign following
/// the dividend. The quotient runs two partitions past its integer span: for
/// divisors longer than the estimator head, a boundary digit may start off
/// by one, and the guard digits let [`normalize`] settle the units digit
/// before the truncation reads it.
pub(crate) fn rem_impl(d1: &BigDecimal, d2: &BigDecimal) -> Result<BigDecimal, Error> {
    if d2.is_zero() {
        return Err(Error::DivisionByZero);
    }
    if d1.is_zero() {
        return Ok(BigDecimal::ZERO);
    }

    let span = (d1.hi_group() - d2.hi_group() + 4).max(1) as u32;
    let quotient = trunc_impl(&div_impl(d1, d2, span * PARTITION_DIGITS)?);
    Ok(sub_impl(d1, &mul_impl(&quotient, d2)))
}
