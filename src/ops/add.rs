use crate::constants::PARTITION_RADIX;
use crate::decimal::BigDecimal;
use crate::ops::cmp::cmp_impl;

use core::cmp::Ordering;

/// Signed addition. Mixed signs are redirected to subtraction of the negated
/// operand so the partition loop below only ever sees matching signs.
pub(crate) fn add_impl(d1: &BigDecimal, d2: &BigDecimal) -> BigDecimal {
    if d1.is_zero() {
        return d2.clone();
    }
    if d2.is_zero() {
        return d1.clone();
    }
    if d1.is_sign_negative() != d2.is_sign_negative() {
        return sub_impl(d1, &d2.negated());
    }

    let lo = d1.lo_group().min(d2.lo_group());
    let hi = d1.hi_group().max(d2.hi_group());

    let mut partitions = Vec::with_capacity((hi - lo + 1) as usize);
    let mut carry = 0;
    for group in lo..hi {
        let sum = d1.partition_at(group) + d2.partition_at(group) + carry;
        partitions.push(sum % PARTITION_RADIX);
        carry = sum / PARTITION_RADIX;
    }
    if carry != 0 {
        partitions.push(carry);
    }

    BigDecimal::from_parts(partitions, lo, d1.is_sign_negative())
}

/// Signed subtraction. Differing signs are redirected to addition; matching
/// signs compare magnitudes first so the partition loop always subtracts the
/// smaller magnitude from the larger and no intermediate partition goes
/// negative. The result sign combines the borrow direction with the sign of
/// the original expression.
pub(crate) fn sub_impl(d1: &BigDecimal, d2: &BigDecimal) -> BigDecimal {
    if d1.is_zero() {
        return d2.negated();
    }
    if d2.is_zero() {
        return d1.clone();
    }
    if d1.is_sign_negative() != d2.is_sign_negative() {
        return add_impl(d1, &d2.negated());
    }

    let lo = d1.lo_group().min(d2.lo_group());
    let hi = d1.hi_group().max(d2.hi_group());

    // `d1 > d2` on negative operands means `|d1| < |d2|`, so this single
    // comparison picks the larger magnitude for either shared sign.
    let forward = (cmp_impl(d1, d2) == Ordering::Greater) == d1.is_sign_positive();
    let (minuend, subtrahend) = if forward { (d1, d2) } else { (d2, d1) };

    let mut partitions = Vec::with_capacity((hi - lo) as usize);
    let mut borrow = 0;
    for group in lo..hi {
        let diff =
            minuend.partition_at(group) as i32 - subtrahend.partition_at(group) as i32 - borrow;
        if diff < 0 {
            partitions.push((diff + PARTITION_RADIX as i32) as u32);
            borrow = 1;
        } else {
            partitions.push(diff as u32);
            borrow = 0;
        }
    }

    BigDecimal::from_parts(partitions, lo, forward == d1.is_sign_negative())
}
