use bigdec::{
    default_context, set_default_context, set_default_div_precision, set_default_format,
    Approximation, BigDecimal, Context, Error, Format,
};

use num_traits::{FromPrimitive, Num, Signed, ToPrimitive, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::str::FromStr;

fn parse(src: &str) -> BigDecimal {
    BigDecimal::from_str(src).unwrap()
}

fn exact() -> Context {
    Context::new().with_approximation(Approximation::None)
}

// Parsing

#[test]
fn it_parses_integer_strings() {
    let a = parse("233");
    assert!(a.is_sign_positive());
    assert_eq!(a.format(Format::Decimal), "233.0");

    let b = parse("-233");
    assert!(b.is_sign_negative());
    assert_eq!(b.format(Format::Decimal), "-233.0");
}

#[test]
fn it_parses_fractional_strings() {
    let a = parse("233.323223");
    assert_eq!(a.format(Format::Decimal), "233.323223");
    assert_eq!(parse("-0.000001").format(Format::Decimal), "-0.000001");
}

#[test]
fn it_parses_scientific_strings() {
    assert_eq!(parse("1.5e3"), parse("1500"));
    assert_eq!(parse("25E-4"), parse("0.0025"));
    assert_eq!(parse("-1.25e-1"), parse("-0.125"));
}

#[test]
fn it_parses_big_strings() {
    let a = parse("79228162514264337593543950330.123456789");
    assert_eq!(
        a.format(Format::Decimal),
        "79228162514264337593543950330.123456789"
    );
}

#[test]
fn it_rejects_invalid_strings() {
    for src in ["", "hello", "1.2.3", "5.", ".5", "+1", "1e", "12 "] {
        assert_eq!(
            BigDecimal::from_str(src),
            Err(Error::InvalidDecimal(src.to_string())),
            "{src}"
        );
    }
    assert_eq!(
        Error::InvalidDecimal("abc".to_string()).to_string(),
        "Invalid decimal: abc"
    );
}

#[test]
fn it_canonicalizes_every_zero_form() {
    for src in ["0", "0.0", "-0", "00.00", "0e5", "-0.0e-5"] {
        let zero = BigDecimal::from_str(src).unwrap();
        assert!(zero.is_zero(), "{src}");
        assert!(zero.is_sign_positive(), "{src}");
        assert_eq!(zero, BigDecimal::ZERO, "{src}");
    }
}

#[test]
fn it_compares_equal_across_trailing_zeros() {
    let a = parse("123.450");
    let b = parse("123.45");
    assert_eq!(a, b);
    assert_eq!(a.format(Format::Decimal), "123.45");
}

// Addition / subtraction

#[test]
fn it_adds_decimals() {
    let test = |a: &str, b: &str, expected: &str| {
        assert_eq!(parse(a) + parse(b), parse(expected), "{a} + {b}");
    };
    test("2", "3", "5");
    test("2454495034", "3451204593", "5905699627");
    test("24544.95034", "0.3451204593", "24545.2954604593");
    test("0.1", "0.2", "0.3");
    test("123.456", "0.544", "124");
    test("-2", "-3", "-5");
    test("-2", "3", "1");
    test("2", "-3", "-1");
    test("0", "-5.5", "-5.5");
}

#[test]
fn it_subtracts_decimals() {
    let test = |a: &str, b: &str, expected: &str| {
        assert_eq!(parse(a) - parse(b), parse(expected), "{a} - {b}");
    };
    test("5", "3", "2");
    test("3", "5", "-2");
    test("-5", "-3", "-2");
    test("-3", "-5", "2");
    test("5", "-3", "8");
    test("-5", "3", "-8");
    test("1", "0.9999999999999", "0.0000000000001");
    test("0.1", "0.1", "0");
}

#[test]
fn it_carries_across_partition_boundaries() {
    assert_eq!(parse("999999") + parse("1"), parse("1000000"));
    assert_eq!(
        parse("1000000").sub_with(&parse("0.000001"), Approximation::None),
        parse("999999.999999")
    );
    assert_eq!(
        parse("1e12").sub_with(&parse("1"), Approximation::None),
        parse("999999999999")
    );
    assert_eq!(
        parse("999999999999999999").add_with(&parse("0.000000000000000001"), Approximation::None),
        parse("999999999999999999.000000000000000001")
    );
}

// Multiplication

#[test]
fn it_multiplies_decimals() {
    let test = |a: &str, b: &str, expected: &str| {
        assert_eq!(parse(a) * parse(b), parse(expected), "{a} * {b}");
    };
    test("2", "3", "6");
    test("2.5", "4", "10");
    test("-2.5", "4", "-10");
    test("-2.5", "-4", "10");
    test("0.5", "0.5", "0.25");
    test("8", "0", "0");
    test("999999", "999999", "999998000001");
    test("999999999999", "999999999999", "999999999998000000000001");
    test("0.000001", "0.000001", "0.000000000001");
    test("123456.789", "987654.321", "121932631112.635269");
}

// Division

#[test]
fn it_divides_decimals() {
    let test = |a: &str, b: &str, expected: &str| {
        assert_eq!(parse(a) / parse(b), parse(expected), "{a} / {b}");
    };
    test("10", "4", "2.5");
    test("1", "8", "0.125");
    test("-10", "4", "-2.5");
    test("10", "-4", "-2.5");
    test("-10", "-4", "2.5");
    test("1000001", "1000001", "1");
    test("0", "3", "0");
    test("2.5", "0.5", "5");
}

#[test]
fn it_fails_dividing_by_zero() {
    let ctx = Context::new();
    assert_eq!(
        parse("1").div_with(&BigDecimal::ZERO, &ctx),
        Err(Error::DivisionByZero)
    );
    assert_eq!(parse("1").checked_div(&BigDecimal::ZERO), None);
    assert_eq!(parse("1").checked_rem(&BigDecimal::ZERO), None);
    assert_eq!(Error::DivisionByZero.to_string(), "Division by zero");
}

#[test]
#[should_panic(expected = "Division by zero")]
fn it_panics_on_operator_division_by_zero() {
    let _ = parse("1") / BigDecimal::ZERO;
}

#[test]
fn it_truncates_division_at_the_context_precision() {
    let ctx = exact().with_div_precision(24).unwrap();
    let third = parse("1").div_with(&parse("3"), &ctx).unwrap();
    assert_eq!(third.format(Format::Decimal), "0.333333333333");

    let ctx = exact().with_div_precision(60).unwrap();
    let seventh = parse("5").div_with(&parse("7"), &ctx).unwrap();
    assert!(seventh
        .format(Format::Decimal)
        .starts_with("0.714285714285714285714285"));
}

#[test]
fn it_reconstructs_exact_quotients() {
    // Multiply-back identities: division must terminate on a zero remainder
    // and hand back the exact factor, whatever the estimator did on the way.
    let divisors = [
        "999999999999",
        "999999999998",
        "999999000001",
        "999999999999.999999",
        "1000000000001",
        "1000001",
        "3.000003",
        "0.999999",
        "2",
    ];
    let quotients = [
        "1",
        "2.5",
        "0.000001",
        "999999.999999",
        "123456789.987654321",
        "999999999999",
    ];
    let ctx = exact().with_div_precision(200).unwrap();
    for divisor in divisors {
        for quotient in quotients {
            let d = parse(divisor);
            let q = parse(quotient);
            let product = d.mul_with(&q, Approximation::None);
            assert_eq!(
                product.div_with(&d, &ctx).unwrap(),
                q,
                "({quotient} * {divisor}) / {divisor}"
            );
        }
    }
}

#[test]
fn it_divides_by_divisors_with_all_nines_heads() {
    // 1 / (10^12 - 1) repeats with period 12; the two leading divisor
    // partitions sit right at the estimator's worst case.
    let ctx = exact().with_div_precision(40).unwrap();
    let q = parse("1").div_with(&parse("999999999999"), &ctx).unwrap();
    let rep = q.format(Format::Scientific);
    assert!(rep.starts_with("1.000000000001000000000001"), "{rep}");
    assert!(rep.ends_with("e-12"), "{rep}");
}

// Remainder

#[test]
fn it_computes_truncated_remainders() {
    let test = |a: &str, b: &str, expected: &str| {
        assert_eq!(parse(a) % parse(b), parse(expected), "{a} % {b}");
    };
    test("7", "4", "3");
    test("-7", "4", "-3");
    test("7", "-4", "3");
    test("-7", "-4", "-3");
    test("10.5", "3", "1.5");
    test("7.5", "0.5", "0");
    test("0.3", "0.1", "0");
    test("1", "999999999999", "1");
}

// Comparison

#[test]
fn it_orders_values_totally() {
    let ordered = [
        "-1e20",
        "-999999999999",
        "-5.5",
        "-5",
        "-0.5",
        "-0.01",
        "0",
        "0.000001",
        "0.5",
        "5",
        "5.000001",
        "999999999999",
        "1e20",
    ];
    for (i, a) in ordered.iter().enumerate() {
        for (j, b) in ordered.iter().enumerate() {
            let (da, db) = (parse(a), parse(b));
            assert_eq!(da.cmp(&db), i.cmp(&j), "{a} vs {b}");
            assert_eq!(da == db, i == j, "{a} vs {b}");
        }
    }
}

#[test]
fn it_compares_value_not_structure() {
    assert_eq!(parse("2.50"), parse("2.5"));
    assert_eq!(parse("1e6"), parse("1000000"));
    assert!(parse("-0.5") < parse("-0.01"));
    assert!(parse("0.5") > parse("0.01"));

    let mut set = HashSet::new();
    set.insert(parse("2.50"));
    assert!(set.contains(&parse("2.5")));
}

// Digit operations

#[test]
fn it_floors_toward_negative_infinity() {
    let test = |src: &str, position: i32, expected: &str| {
        assert_eq!(
            parse(src).floor_at(position),
            parse(expected),
            "floor({src}, {position})"
        );
    };
    test("5.5", 0, "5");
    test("-5.5", 0, "-6");
    test("5.55", 1, "5.5");
    test("-5.55", 1, "-5.6");
    test("1234.5", -2, "1200");
    test("-1234.5", -2, "-1300");
    test("-5", 0, "-5");
    test("-5.000001", 0, "-6");
    test("0", 3, "0");
    test("0.000004", 0, "0");
    test("-123.456", 6, "-123.456");
}

#[test]
fn it_ceils_toward_positive_infinity() {
    let test = |src: &str, position: i32, expected: &str| {
        assert_eq!(
            parse(src).ceil_at(position),
            parse(expected),
            "ceil({src}, {position})"
        );
    };
    test("5.5", 0, "6");
    test("-5.5", 0, "-5");
    test("5.55", 1, "5.6");
    test("-5.55", 1, "-5.5");
    test("1234.5", -2, "1300");
    test("-1234.5", -2, "-1200");
    test("5", 0, "5");
    test("4.000001", 0, "5");
}

#[test]
fn it_rounds_half_away_from_zero() {
    let test = |src: &str, position: i32, expected: &str| {
        assert_eq!(
            parse(src).round_at(position),
            parse(expected),
            "round({src}, {position})"
        );
    };
    test("2.5", 0, "3");
    test("-2.5", 0, "-3");
    test("2.4", 0, "2");
    test("-2.4", 0, "-2");
    test("123.456", 2, "123.46");
    test("123.454", 2, "123.45");
    test("15", -1, "20");
    test("-15", -1, "-20");
    test("0.0999943", 5, "0.09999");
    test("0.0999995", 5, "0.1");
    test("9.9999995", 6, "10");
}

#[test]
fn it_rounds_idempotently() {
    let samples = ["2.5", "-2.5", "123.456", "-123.456", "0.0999995", "999999.999999"];
    for src in samples {
        for position in [-3, 0, 2, 5] {
            let x = parse(src);
            let rounded = x.round_at(position);
            assert_eq!(rounded.round_at(position), rounded, "round {src} @ {position}");
            let floored = x.floor_at(position);
            assert_eq!(floored.floor_at(position), floored, "floor {src} @ {position}");
            let ceiled = x.ceil_at(position);
            assert_eq!(ceiled.ceil_at(position), ceiled, "ceil {src} @ {position}");
        }
    }
}

#[test]
fn it_derives_ceil_from_floor_by_negation() {
    let samples = ["2.5", "-2.5", "5", "-5", "123.456", "-0.000001", "1e12", "0"];
    for src in samples {
        for position in [-4, -1, 0, 1, 6] {
            let x = parse(src);
            assert_eq!(
                x.ceil_at(position),
                -((-&x).floor_at(position)),
                "{src} @ {position}"
            );
        }
    }
}

#[test]
fn it_truncates_toward_zero() {
    assert_eq!(parse("2.7").trunc(), parse("2"));
    assert_eq!(parse("-2.7").trunc(), parse("-2"));
    assert_eq!(parse("0.9").trunc(), BigDecimal::ZERO);
    assert_eq!(parse("-0.9").trunc(), BigDecimal::ZERO);
    assert_eq!(parse("2.7").floor(), parse("2"));
    assert_eq!(parse("2.5").round(), parse("3"));
    assert_eq!(parse("-2.7").ceil(), parse("-2"));
}

// Approximation policy

#[test]
fn it_collapses_zero_runs() {
    let noisy = parse("0.3000000000000000004");
    assert_eq!(noisy.approximate(Approximation::Round2), parse("0.3"));
    assert_eq!(noisy.approximate(Approximation::Round3), noisy);
    assert_eq!(noisy.approximate(Approximation::None), noisy);
}

#[test]
fn it_collapses_nines_runs() {
    let noisy = parse("1.999999999999");
    assert_eq!(noisy.approximate(Approximation::Round2), parse("2"));
    assert_eq!(noisy.approximate(Approximation::Round3), noisy);

    let negative = parse("-1.999999999999");
    assert_eq!(negative.approximate(Approximation::Round2), parse("-2"));

    // The increment carries across the retained portion.
    let carry = parse("2.999999999999999999");
    assert_eq!(carry.approximate(Approximation::Round3), parse("3"));
}

#[test]
fn it_applies_the_policy_after_arithmetic() {
    // 0.6 + 1.399999999999 leaves twelve trailing nines, which the default
    // Round2 policy treats as the next unit up.
    assert_eq!(parse("0.6") + parse("1.399999999999"), parse("2"));
    assert_eq!(
        parse("0.6").add_with(&parse("1.399999999999"), Approximation::None),
        parse("1.999999999999")
    );

    // Likewise a borrow chain that leaves twelve trailing nines, and a sum
    // whose far-distant tail reads as noise under the default policy.
    assert_eq!(parse("1e12") - parse("1"), parse("1e12"));
    assert_eq!(
        parse("999999999999999999") + parse("0.000000000000000001"),
        parse("999999999999999999")
    );
}

// Interop

#[test]
fn it_round_trips_integers() {
    let samples = [
        0i64,
        1,
        -1,
        999_999,
        -999_999,
        1_000_000,
        123_456_789_012_345_678,
        -123_456_789_012_345_678,
        i64::MAX,
        i64::MIN,
    ];
    for n in samples {
        assert_eq!(BigDecimal::from(n).to_i64(), Some(n), "{n}");
    }
    assert_eq!(BigDecimal::from(u64::MAX).to_u64(), Some(u64::MAX));
}

#[test]
fn it_reports_overflow_on_narrow_conversions() {
    assert_eq!(parse("1e30").to_i64(), None);
    assert_eq!(parse("1e30").to_i128(), Some(10i128.pow(30)));
    assert_eq!(parse("-1").to_u64(), None);
    assert_eq!(parse("-0.5").to_u64(), Some(0));
    assert_eq!(parse("300").to_u8(), None);
    assert_eq!(parse("2.9").to_i64(), Some(2));
    assert_eq!(parse("-2.9").to_i64(), Some(-2));
}

#[test]
fn it_converts_floats_through_their_decimal_rendering() {
    assert_eq!(BigDecimal::from_f64(0.1), Some(parse("0.1")));
    assert_eq!(BigDecimal::from_f64(-2.5), Some(parse("-2.5")));
    assert_eq!(BigDecimal::from_f64(1e21), Some(parse("1e21")));
    assert_eq!(BigDecimal::from_f64(f64::NAN), None);
    assert_eq!(BigDecimal::from_f64(f64::INFINITY), None);
    assert_eq!(BigDecimal::from_f32(0.25), Some(parse("0.25")));
    assert!(BigDecimal::try_from(f64::NAN).is_err());

    assert_eq!(parse("2.5").to_f64(), Some(2.5));
    assert_eq!(parse("-2.5").to_f64(), Some(-2.5));
    assert_eq!(BigDecimal::ZERO.to_f64(), Some(0.0));
    let tenth = parse("0.1").to_f64().unwrap();
    assert!((tenth - 0.1).abs() < 1e-15, "{tenth}");
}

#[test]
fn it_agrees_with_native_integer_arithmetic() {
    let mut rng = StdRng::seed_from_u64(0x0b16_dec0);

    for _ in 0..500 {
        let a = rng.gen_range(-999_999_999_999i64..=999_999_999_999);
        let b = rng.gen_range(-999_999_999_999i64..=999_999_999_999);
        let (da, db) = (BigDecimal::from(a), BigDecimal::from(b));
        assert_eq!(
            da.add_with(&db, Approximation::None).to_i64(),
            Some(a + b),
            "{a} + {b}"
        );
        assert_eq!(
            da.sub_with(&db, Approximation::None).to_i64(),
            Some(a - b),
            "{a} - {b}"
        );
        assert_eq!(da.cmp(&db), a.cmp(&b), "{a} cmp {b}");
    }

    for _ in 0..500 {
        let a = rng.gen_range(-999_999_999i64..=999_999_999);
        let b = rng.gen_range(-999_999_999i64..=999_999_999);
        let (da, db) = (BigDecimal::from(a), BigDecimal::from(b));
        assert_eq!(
            da.mul_with(&db, Approximation::None).to_i64(),
            Some(a * b),
            "{a} * {b}"
        );
    }

    let ctx = exact();
    for _ in 0..500 {
        let a = rng.gen_range(-999_999_999i64..=999_999_999);
        let b = rng.gen_range(1i64..=999_999);
        let b = if rng.gen_bool(0.5) { -b } else { b };
        let (da, db) = (BigDecimal::from(a), BigDecimal::from(b));
        let quotient = da.div_with(&db, &ctx).unwrap().trunc();
        assert_eq!(quotient.to_i64(), Some(a / b), "{a} / {b}");
        assert_eq!((&da % &db).to_i64(), Some(a % b), "{a} % {b}");
    }
}

// num-traits surface

#[test]
fn it_implements_the_numeric_traits() {
    assert!(BigDecimal::zero().is_zero());
    assert_eq!(BigDecimal::zero() + parse("5"), parse("5"));
    assert_eq!(num_traits::one::<BigDecimal>() * parse("5"), parse("5"));

    assert_eq!(parse("-5.5").abs(), parse("5.5"));
    assert_eq!(Signed::signum(&parse("-5.5")), parse("-1"));
    assert_eq!(Signed::signum(&BigDecimal::ZERO), BigDecimal::ZERO);
    assert!(Signed::is_negative(&parse("-5.5")));
    assert!(!Signed::is_positive(&BigDecimal::ZERO));
    assert_eq!(parse("3").abs_sub(&parse("5")), BigDecimal::ZERO);
    assert_eq!(parse("5").abs_sub(&parse("3")), parse("2"));

    assert_eq!(
        BigDecimal::from_str_radix("-12.5", 10),
        Ok(parse("-12.5"))
    );
    assert_eq!(
        BigDecimal::from_str_radix("ff", 16),
        Err(Error::UnsupportedRadix(16))
    );

    let total: BigDecimal = (1..=100).map(BigDecimal::from).sum();
    assert_eq!(total, parse("5050"));
}

// Configuration

#[test]
fn it_validates_division_precision() {
    assert_eq!(set_default_div_precision(0), Err(Error::InvalidPrecision));
    assert_eq!(
        Context::new().with_div_precision(0),
        Err(Error::InvalidPrecision)
    );
    // The previous precision is retained after a rejected update.
    assert_eq!(default_context().div_precision(), 100);
}

#[test]
fn it_uses_the_default_format_for_display() {
    let saved = default_context();

    set_default_format(Format::Scientific);
    assert_eq!(parse("123.456").to_string(), "1.23456e2");

    set_default_format(Format::DecimalPlaces(2));
    assert_eq!(parse("123.456").to_string(), "123.46");

    set_default_context(saved);
    assert_eq!(parse("123.456").to_string(), "123.456");
    assert_eq!(parse("1e20").to_string(), "1e20");
}
