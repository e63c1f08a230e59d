use crate::constants::{PARTITION_DIGITS, PARTITION_RADIX, POWERS_10};
use crate::decimal::BigDecimal;
use crate::ops::add::add_impl;
use crate::ops::common::unit_at;

/// A value sliced at a decimal digit position. `kept` is the truncation
/// toward zero at that position; `group` and `rem` locate the position
/// (partition index and digit offset inside it) for rebuilding one unit;
/// `next_digit` is the single digit just below the position and
/// `dropped_nonzero` reports whether any truncated digit was nonzero.
struct Split {
    kept: BigDecimal,
    group: i32,
    rem: u32,
    next_digit: u32,
    dropped_nonzero: bool,
}

/// Positions follow the public convention: 0 is the units digit, positive
/// positions walk into the fraction, negative positions up the integer part.
/// The partition holding the position is masked down to a power-of-ten
/// multiple; partitions entirely below it are dropped and the untouched
/// higher partitions are spliced back on.
fn split_at(value: &BigDecimal, position: i32) -> Split {
    let unit = -position;
    let rem = unit.rem_euclid(PARTITION_DIGITS as i32) as u32;
    let group = (unit - rem as i32) / PARTITION_DIGITS as i32;

    let sliced = value.partition_at(group);
    let (trimmed, next_digit) = if rem == 0 {
        let next = value.partition_at(group - 1) / (PARTITION_RADIX / 10);
        (sliced, next)
    } else {
        let pow = POWERS_10[rem as usize];
        let trimmed = sliced / pow * pow;
        (trimmed, (sliced - trimmed) / POWERS_10[rem as usize - 1])
    };

    let len = value.partition_len();
    let slice_idx = group - value.lo_group();
    let keep_from = (slice_idx + 1).clamp(0, len as i32) as usize;
    let below = (slice_idx).clamp(0, len as i32) as usize;

    let dropped_nonzero =
        sliced != trimmed || value.partitions()[..below].iter().any(|&p| p != 0);

    // Anchor the rebuilt sequence one group below the first kept partition:
    // when the position sits inside or just under the stored range that group
    // is exactly `group`; further below it degenerates to a zero partition
    // that trims away while the kept storage holds its place.
    let mut partitions = Vec::with_capacity(1 + len - keep_from);
    partitions.push(trimmed);
    partitions.extend_from_slice(&value.partitions()[keep_from..]);
    let anchor = value.lo_group() + keep_from as i32 - 1;
    let kept = BigDecimal::from_parts(partitions, anchor, value.is_sign_negative());

    Split {
        kept,
        group,
        rem,
        next_digit,
        dropped_nonzero,
    }
}

/// Rounds toward negative infinity: plain truncation for positive values;
/// for negative values any nonzero truncated digit steps the result one unit
/// further down.
pub(crate) fn floor_impl(value: &BigDecimal, position: i32) -> BigDecimal {
    let split = split_at(value, position);
    if value.is_sign_negative() && split.dropped_nonzero {
        add_impl(&split.kept, &unit_at(split.group, split.rem, true))
    } else {
        split.kept
    }
}

/// Rounds toward positive infinity, derived from `floor` by sign inversion.
pub(crate) fn ceil_impl(value: &BigDecimal, position: i32) -> BigDecimal {
    floor_impl(&value.negated(), position).negated()
}

/// Rounds half away from zero: truncate, then bump the magnitude one unit at
/// the position when the single next lower digit is 5 or more. The sign never
/// flips.
pub(crate) fn round_impl(value: &BigDecimal, position: i32) -> BigDecimal {
    let split = split_at(value, position);
    if split.next_digit >= 5 {
        let unit = unit_at(split.group, split.rem, value.is_sign_negative());
        add_impl(&split.kept, &unit)
    } else {
        split.kept
    }
}

/// Truncation toward zero at the units digit.
pub(crate) fn trunc_impl(value: &BigDecimal) -> BigDecimal {
    split_at(value, 0).kept
}
