use crate::decimal::BigDecimal;

use core::cmp::Ordering;

/// Total order over values. Signs decide first; equal signs fall through to a
/// partition-wise scan from the most significant group either operand stores
/// down to the least, with missing groups reading as zero. The first
/// differing group decides, flipped for negative values.
pub(crate) fn cmp_impl(d1: &BigDecimal, d2: &BigDecimal) -> Ordering {
    let s1 = d1.sign_value();
    let s2 = d2.sign_value();
    if s1 != s2 {
        return s1.cmp(&s2);
    }

    let lo = d1.lo_group().min(d2.lo_group());
    let hi = d1.hi_group().max(d2.hi_group());
    for group in (lo..hi).rev() {
        let p1 = d1.partition_at(group);
        let p2 = d2.partition_at(group);
        if p1 != p2 {
            return if s1 < 0 { p2.cmp(&p1) } else { p1.cmp(&p2) };
        }
    }
    Ordering::Equal
}
