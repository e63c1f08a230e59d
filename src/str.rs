use crate::constants::PARTITION_DIGITS;
use crate::context::{default_context, Format};
use crate::decimal::BigDecimal;
use crate::error::Error;

use core::fmt;
use core::str::FromStr;

/// Parses the decimal grammar `(-)?(\d+)(\.\d+)?([eE](-)?\d+)?`.
///
/// The digit string is assembled from the integer and fractional parts, the
/// net exponent is the explicit exponent minus the fractional digit count,
/// and enough zeros are appended so the exponent lands on a partition
/// boundary. Splitting into six-digit groups from the least significant end
/// then yields the little-endian partitions directly.
pub(crate) fn parse_str(value: &str) -> Result<BigDecimal, Error> {
    parse_parts(value).ok_or_else(|| Error::InvalidDecimal(value.to_string()))
}

fn parse_parts(value: &str) -> Option<BigDecimal> {
    let bytes = value.as_bytes();
    let (negative, rest) = match bytes {
        [b'-', rest @ ..] => (true, rest),
        _ => (false, bytes),
    };

    let (int_digits, rest) = take_digits(rest);
    if int_digits.is_empty() {
        return None;
    }

    let (frac_digits, rest) = match rest {
        [b'.', rest @ ..] => {
            let (digits, rest) = take_digits(rest);
            if digits.is_empty() {
                return None;
            }
            (digits, rest)
        }
        _ => (&[][..], rest),
    };

    let explicit_exp = match rest {
        [] => 0,
        [b'e' | b'E', rest @ ..] => {
            let (exp_negative, rest) = match rest {
                [b'-', rest @ ..] => (true, rest),
                _ => (false, rest),
            };
            let (digits, rest) = take_digits(rest);
            if digits.is_empty() || !rest.is_empty() {
                return None;
            }
            let mut exp = 0i32;
            for &digit in digits {
                exp = exp.checked_mul(10)?.checked_add((digit - b'0') as i32)?;
            }
            if exp_negative {
                -exp
            } else {
                exp
            }
        }
        _ => return None,
    };

    let exp = explicit_exp - frac_digits.len() as i32;
    let pad = exp.rem_euclid(PARTITION_DIGITS as i32);
    let offset = (exp - pad) / PARTITION_DIGITS as i32;

    let mut digits = Vec::with_capacity(int_digits.len() + frac_digits.len() + pad as usize);
    digits.extend_from_slice(int_digits);
    digits.extend_from_slice(frac_digits);
    digits.resize(digits.len() + pad as usize, b'0');

    let mut partitions = Vec::with_capacity(digits.len() / PARTITION_DIGITS as usize + 1);
    for chunk in digits.rchunks(PARTITION_DIGITS as usize) {
        let mut partition = 0u32;
        for &digit in chunk {
            partition = partition * 10 + (digit - b'0') as u32;
        }
        partitions.push(partition);
    }

    Some(BigDecimal::from_parts(partitions, offset, negative))
}

fn take_digits(bytes: &[u8]) -> (&[u8], &[u8]) {
    let len = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    bytes.split_at(len)
}

/// Renders a value with an explicit format.
pub(crate) fn format_value(value: &BigDecimal, format: Format) -> String {
    match format {
        Format::Auto => match leading_exponent(value) {
            Some(exponent) if exponent >= PARTITION_DIGITS as i32 => scientific_string(value, "e"),
            Some(_) => decimal_string(value),
            None => String::from("0.0"),
        },
        Format::Decimal => decimal_string(value),
        Format::Scientific => scientific_string(value, "e"),
        Format::DecimalPlaces(places) => decimal_places_string(value, places),
        Format::ScientificPlaces(places) => scientific_places_string(value, places),
    }
}

/// Power of ten of the leading significant digit; `None` for zero.
fn leading_exponent(value: &BigDecimal) -> Option<i32> {
    let top = value.partitions().last()?;
    Some((value.hi_group() - 1) * PARTITION_DIGITS as i32 + top.ilog10() as i32)
}

fn push_partition(buf: &mut String, partition: u32) {
    let digits = partition.to_string();
    for _ in digits.len()..PARTITION_DIGITS as usize {
        buf.push('0');
    }
    buf.push_str(&digits);
}

/// `[-]INT.FRAC`: partition groups walked from the top of the integer part
/// down through the bottom of the fraction, zero padded to six digits each,
/// then trimmed back to `"0"` placeholders when a side comes up empty.
fn decimal_string(value: &BigDecimal) -> String {
    if value.is_zero() {
        return String::from("0.0");
    }

    let hi = value.hi_group().max(0);
    let lo = value.lo_group().min(0);

    let mut int_part = String::with_capacity((hi.max(1) as usize) * PARTITION_DIGITS as usize);
    for group in (0..hi).rev() {
        push_partition(&mut int_part, value.partition_at(group));
    }
    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    let mut frac_part = String::with_capacity((-lo) as usize * PARTITION_DIGITS as usize);
    for group in (lo..0).rev() {
        push_partition(&mut frac_part, value.partition_at(group));
    }
    let frac_part = frac_part.trim_end_matches('0');
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };

    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{int_part}.{frac_part}")
}

/// `[-]d.ddd...eEXP`: one digit ahead of the point, insignificant zeros
/// trimmed from both ends of the concatenated partitions. A single
/// significant digit renders without the point.
fn scientific_string(value: &BigDecimal, exponent_symbol: &str) -> String {
    let Some(exponent) = leading_exponent(value) else {
        return String::from("0.0");
    };

    let mut digits = String::with_capacity(value.partition_len() * PARTITION_DIGITS as usize);
    for &partition in value.partitions().iter().rev() {
        push_partition(&mut digits, partition);
    }
    let digits = digits.trim_matches('0');

    let mut rep = String::with_capacity(digits.len() + 8);
    if value.is_sign_negative() {
        rep.push('-');
    }
    rep.push_str(&digits[..1]);
    if digits.len() > 1 {
        rep.push('.');
        rep.push_str(&digits[1..]);
    }
    rep.push_str(exponent_symbol);
    rep.push_str(&exponent.to_string());
    rep
}

/// Decimal notation rounded to `places` fractional digits and padded back up
/// with zeros to exactly that many.
fn decimal_places_string(value: &BigDecimal, places: u32) -> String {
    if value.is_zero() {
        return String::from("0.0");
    }

    let rounded = value.round_at(places as i32);
    let mut rep = decimal_string(&rounded);
    let frac_len = match rep.find('.') {
        Some(point) => rep.len() - point - 1,
        None => 0,
    };
    for _ in frac_len..places as usize {
        rep.push('0');
    }
    rep
}

/// Scientific notation rounded to `places` mantissa digits after the point
/// and padded back up with zeros to exactly that many.
fn scientific_places_string(value: &BigDecimal, places: u32) -> String {
    let Some(exponent) = leading_exponent(value) else {
        return String::from("0.0");
    };

    let rounded = value.round_at(places as i32 - exponent);
    let rep = scientific_string(&rounded, "e");
    let Some(symbol) = rep.find('e') else {
        return rep;
    };

    let (mantissa, exp_part) = rep.split_at(symbol);
    let frac_len = match mantissa.find('.') {
        Some(point) => mantissa.len() - point - 1,
        None => 0,
    };
    if frac_len >= places as usize {
        return rep;
    }

    let mut out = String::with_capacity(rep.len() + places as usize - frac_len + 1);
    out.push_str(mantissa);
    if frac_len == 0 {
        out.push('.');
    }
    for _ in frac_len..places as usize {
        out.push('0');
    }
    out.push_str(exp_part);
    out
}

impl FromStr for BigDecimal {
    type Err = Error;

    fn from_str(value: &str) -> Result<BigDecimal, Error> {
        parse_str(value)
    }
}

impl TryFrom<&str> for BigDecimal {
    type Error = Error;

    fn try_from(value: &str) -> Result<BigDecimal, Error> {
        parse_str(value)
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rep = format_value(self, default_context().format());
        f.pad_integral(
            self.is_sign_positive(),
            "",
            rep.strip_prefix('-').unwrap_or(&rep),
        )
    }
}

impl fmt::LowerExp for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rep = scientific_string(self, "e");
        f.pad_integral(
            self.is_sign_positive(),
            "",
            rep.strip_prefix('-').unwrap_or(&rep),
        )
    }
}

impl fmt::UpperExp for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rep = scientific_string(self, "E");
        f.pad_integral(
            self.is_sign_positive(),
            "",
            rep.strip_prefix('-').unwrap_or(&rep),
        )
    }
}
