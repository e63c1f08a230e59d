use crate::constants::PARTITION_RADIX;
use crate::decimal::BigDecimal;

/// Grade-school convolution over partition pairs. Each product is accumulated
/// into result index `i + j` with its carry pushed through higher indices
/// straight away, in 64 bit intermediates since `(RADIX - 1)^2` does not fit
/// in 32 bits. The result never needs more partitions than the operands hold
/// together.
pub(crate) fn mul_impl(d1: &BigDecimal, d2: &BigDecimal) -> BigDecimal {
    if d1.is_zero() || d2.is_zero() {
        return BigDecimal::ZERO;
    }

    let radix = PARTITION_RADIX as u64;
    let mut partitions = vec![0u32; d1.partition_len() + d2.partition_len()];

    for (i, &n) in d1.partitions().iter().enumerate() {
        for (j, &m) in d2.partitions().iter().enumerate() {
            let mut idx = i + j;
            let mut carry = n as u64 * m as u64;

            while carry > 0 {
                let sum = carry + partitions[idx] as u64;
                partitions[idx] = (sum % radix) as u32;
                carry = sum / radix;
                idx += 1;
            }
        }
    }

    BigDecimal::from_parts(
        partitions,
        d1.lo_group() + d2.lo_group(),
        d1.is_sign_negative() != d2.is_sign_negative(),
    )
}
