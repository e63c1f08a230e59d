use crate::constants::POWERS_10;
use crate::decimal::BigDecimal;

/// Strips leading (most significant) and trailing (least significant) zero
/// partitions, raising the offset by one for every low partition removed.
/// An all-zero sequence collapses to the canonical empty zero.
pub(crate) fn trim(partitions: Vec<u32>, offset: i32) -> (Vec<u32>, i32) {
    let Some(first) = partitions.iter().position(|&p| p != 0) else {
        return (Vec::new(), 0);
    };
    let last = partitions.iter().rposition(|&p| p != 0).unwrap_or(first);
    let trimmed = partitions[first..=last].to_vec();
    (trimmed, offset + first as i32)
}

/// One unit at the decimal position described by `group` and `rem`, i.e.
/// `10^rem * RADIX^group`, carrying the requested sign.
pub(crate) fn unit_at(group: i32, rem: u32, negative: bool) -> BigDecimal {
    BigDecimal::from_parts(vec![POWERS_10[rem as usize]], group, negative)
}
