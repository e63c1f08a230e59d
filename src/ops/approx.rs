use crate::constants::PARTITION_MAX;
use crate::context::Approximation;
use crate::decimal::BigDecimal;
use crate::ops::add::add_impl;

/// Applies the canonicalization policy after an arithmetic operation.
///
/// Partitions are scanned from least to most significant. The canonical trim
/// guarantees the lowest partition is nonzero, so a qualifying zero run is
/// always interior: dropping it and everything below loses only digits the
/// policy deems noise. An all-nines run additionally increments the retained
/// portion one unit above the run, treating the tail as a rounding artifact
/// of the next unit up; the addition carries as far as it needs to.
pub(crate) fn approx_impl(value: BigDecimal, approximation: Approximation) -> BigDecimal {
    let Some(run_length) = approximation.run_length() else {
        return value;
    };

    let mut zeros = 0;
    let mut nines = 0;
    for (i, &partition) in value.partitions().iter().enumerate() {
        match partition {
            0 => {
                zeros += 1;
                nines = 0;
            }
            PARTITION_MAX => {
                nines += 1;
                zeros = 0;
            }
            _ => {
                zeros = 0;
                nines = 0;
            }
        }

        if zeros >= run_length {
            let kept = value.partitions()[i + 1..].to_vec();
            return BigDecimal::from_parts(
                kept,
                value.lo_group() + i as i32 + 1,
                value.is_sign_negative(),
            );
        }

        if nines >= run_length {
            let kept_group = value.lo_group() + i as i32 + 1;
            let kept = BigDecimal::from_parts(
                value.partitions()[i + 1..].to_vec(),
                kept_group,
                value.is_sign_negative(),
            );
            let unit = BigDecimal::from_parts(vec![1], kept_group, value.is_sign_negative());
            return add_impl(&kept, &unit);
        }
    }

    value
}
