/// Radix of a single stored partition. Each partition packs six decimal
/// digits, so carries in 32 bit additions and 64 bit products never overflow.
pub(crate) const PARTITION_RADIX: u32 = 1_000_000;

/// Number of decimal digits held by one partition.
pub(crate) const PARTITION_DIGITS: u32 = 6;

/// Largest value a partition may hold; a run of these is an all-nines run.
pub(crate) const PARTITION_MAX: u32 = PARTITION_RADIX - 1;

/// Default number of decimal digits computed by division before truncation.
pub(crate) const DEFAULT_DIV_PRECISION: u32 = 100;

// Fast access for 10^n where n is 0-6
pub(crate) const POWERS_10: [u32; 7] = [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000];
