use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

//
// ─── FRACTION STRINGS ──────────────────────────────────────────────────────────
//

/// Fractions the worksheet presents for coloring and matching.
pub const VALID_FRACTIONS: [&str; 8] = ["1/2", "1/4", "3/4", "2/4", "1/3", "2/3", "1/1", "0/1"];

static FRACTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+/\d+$").expect("fraction pattern is a valid regex"));

/// Checks that `input` is exactly `<digits>/<digits>` with no surrounding
/// whitespace and no signs.
///
/// # Examples
///
/// ```
/// # use worksheet_core::fraction::is_valid_format;
/// assert!(is_valid_format("1/2"));
/// assert!(!is_valid_format(" 1/2 "));
/// assert!(!is_valid_format("1.5/2"));
/// ```
#[must_use]
pub fn is_valid_format(input: &str) -> bool {
    FRACTION_PATTERN.is_match(input)
}

/// Decimal value of a fraction string, or `None` if it does not decode.
///
/// Decoding fails when the string does not split into exactly two integer
/// parts or when the denominator is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_decimal(fraction: &str) -> Option<f64> {
    let (numerator, denominator) = split_parts(fraction)?;
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}

/// Greatest common divisor via Euclid's algorithm.
///
/// `gcd(a, 0) == a`, so `gcd(0, d) == d` reduces `0/d` to `0/1`.
#[must_use]
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Reduces a fraction string to lowest terms.
///
/// Fails closed: anything that does not split into two integer parts (and
/// the degenerate `0/0`, whose gcd is zero) is returned unchanged.
///
/// # Examples
///
/// ```
/// # use worksheet_core::fraction::simplify;
/// assert_eq!(simplify("4/8"), "1/2");
/// assert_eq!(simplify("0/4"), "0/1");
/// assert_eq!(simplify("not a fraction"), "not a fraction");
/// ```
#[must_use]
pub fn simplify(fraction: &str) -> String {
    let Some((numerator, denominator)) = split_parts(fraction) else {
        return fraction.to_owned();
    };

    let divisor = gcd(numerator, denominator);
    if divisor == 0 {
        return fraction.to_owned();
    }

    format!("{}/{}", numerator / divisor, denominator / divisor)
}

/// Compares two fraction strings by decimal value.
///
/// Returns `None` when either side fails to decode; ties are `Equal`.
#[must_use]
pub fn compare(fraction1: &str, fraction2: &str) -> Option<Ordering> {
    let dec1 = to_decimal(fraction1)?;
    let dec2 = to_decimal(fraction2)?;
    dec1.partial_cmp(&dec2)
}

/// Renders an ordering the way the worksheet prints it: `<`, `=`, or `>`.
#[must_use]
pub fn ordering_symbol(ordering: Ordering) -> char {
    match ordering {
        Ordering::Less => '<',
        Ordering::Equal => '=',
        Ordering::Greater => '>',
    }
}

fn split_parts(fraction: &str) -> Option<(u64, u64)> {
    let mut parts = fraction.split('/');
    let numerator = parts.next()?.parse().ok()?;
    let denominator = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((numerator, denominator))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_decimal_of_zero_numerator_is_zero() {
        assert_eq!(to_decimal("0/1"), Some(0.0));
    }

    #[test]
    fn to_decimal_rejects_zero_denominator() {
        assert_eq!(to_decimal("1/0"), None);
        assert_eq!(to_decimal("7/0"), None);
        assert_eq!(to_decimal("0/0"), None);
    }

    #[test]
    fn to_decimal_rejects_non_fractions() {
        assert_eq!(to_decimal("bad"), None);
        assert_eq!(to_decimal("1/2/3"), None);
        assert_eq!(to_decimal("a/2"), None);
        assert_eq!(to_decimal(""), None);
    }

    #[test]
    fn to_decimal_divides() {
        assert_eq!(to_decimal("1/2"), Some(0.5));
        assert_eq!(to_decimal("3/4"), Some(0.75));
    }

    #[test]
    fn simplify_reduces_to_lowest_terms() {
        assert_eq!(simplify("4/8"), "1/2");
        assert_eq!(simplify("2/4"), "1/2");
        assert_eq!(simplify("6/9"), "2/3");
        assert_eq!(simplify("1/2"), "1/2");
    }

    #[test]
    fn simplify_zero_numerator_yields_zero_over_one() {
        assert_eq!(simplify("0/4"), "0/1");
        assert_eq!(simplify("0/1"), "0/1");
    }

    #[test]
    fn simplify_fails_closed_on_malformed_input() {
        assert_eq!(simplify("bad"), "bad");
        assert_eq!(simplify("1/2/3"), "1/2/3");
        assert_eq!(simplify("a/b"), "a/b");
        assert_eq!(simplify("0/0"), "0/0");
    }

    #[test]
    fn simplify_is_idempotent() {
        for fraction in VALID_FRACTIONS {
            let once = simplify(fraction);
            assert_eq!(simplify(&once), once);
        }
    }

    #[test]
    fn simplify_preserves_value() {
        for fraction in ["4/8", "2/4", "6/8", "10/4", "3/3"] {
            let reduced = simplify(fraction);
            assert_eq!(to_decimal(fraction), to_decimal(&reduced));
        }
    }

    #[test]
    fn simplified_terms_are_coprime() {
        for fraction in ["4/8", "6/9", "12/16", "5/10"] {
            let reduced = simplify(fraction);
            let mut parts = reduced.split('/');
            let p: u64 = parts.next().unwrap().parse().unwrap();
            let q: u64 = parts.next().unwrap().parse().unwrap();
            assert_eq!(gcd(p, q), 1, "{fraction} reduced to {reduced}");
        }
    }

    #[test]
    fn format_accepts_plain_digit_fractions() {
        assert!(is_valid_format("1/2"));
        assert!(is_valid_format("10/100"));
        assert!(is_valid_format("0/1"));
    }

    #[test]
    fn format_rejects_everything_else() {
        assert!(!is_valid_format(""));
        assert!(!is_valid_format("1/"));
        assert!(!is_valid_format("/2"));
        assert!(!is_valid_format("1.5/2"));
        assert!(!is_valid_format(" 1/2 "));
        assert!(!is_valid_format("-1/2"));
        assert!(!is_valid_format("1/2/3"));
    }

    #[test]
    fn compare_orders_by_value() {
        assert_eq!(compare("1/4", "1/2"), Some(Ordering::Less));
        assert_eq!(compare("1/2", "1/4"), Some(Ordering::Greater));
        assert_eq!(compare("2/4", "1/2"), Some(Ordering::Equal));
    }

    #[test]
    fn compare_is_none_when_either_side_fails() {
        assert_eq!(compare("abc", "1/2"), None);
        assert_eq!(compare("1/2", "1/0"), None);
    }

    #[test]
    fn ordering_symbols() {
        assert_eq!(ordering_symbol(Ordering::Less), '<');
        assert_eq!(ordering_symbol(Ordering::Equal), '=');
        assert_eq!(ordering_symbol(Ordering::Greater), '>');
    }

    #[test]
    fn catalogue_fractions_all_decode() {
        for fraction in VALID_FRACTIONS {
            assert!(is_valid_format(fraction));
            assert!(to_decimal(fraction).is_some());
        }
    }
}
