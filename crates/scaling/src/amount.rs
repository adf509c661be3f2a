use std::sync::LazyLock;

use regex::Regex;

/// Unicode vulgar fractions accepted in amounts, alone or after a whole number.
pub const UNICODE_FRACTIONS: [(char, f64); 9] = [
    ('⅛', 0.125),
    ('¼', 0.25),
    ('⅓', 1.0 / 3.0),
    ('⅜', 0.375),
    ('½', 0.5),
    ('⅝', 0.625),
    ('⅔', 2.0 / 3.0),
    ('¾', 0.75),
    ('⅞', 0.875),
];

static RE_MIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:\s+|-)(\d+)\s*/\s*(\d+)$").unwrap());
static RE_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*/\s*(\d+)$").unwrap());
static RE_LEADING_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)").unwrap());

/// Parse a free-text amount into a quantity.
///
/// Supports:
/// - Whole numbers and decimals: "2", "0.5"
/// - Pure fractions: "1/2"
/// - Mixed fractions: "1 1/2", "1-1/2"
/// - Unicode fractions, alone or trailing a whole number: "½", "2½", "2 ½"
///
/// Anything else is read as a leading decimal ("2 large" -> 2). Text without a
/// usable number, negative values and zero denominators give 0, which callers
/// treat the same as a blank amount.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    for (glyph, value) in UNICODE_FRACTIONS {
        if let Some(whole) = trimmed.strip_suffix(glyph) {
            let whole = whole.trim();
            if whole.is_empty() {
                return value;
            }
            return leading_decimal(whole).map_or(0.0, |whole| whole + value);
        }
    }

    if let Some(caps) = RE_MIXED.captures(trimmed) {
        let whole = caps[1].parse::<f64>().unwrap_or(0.0);
        return ratio(&caps[2], &caps[3]).map_or(0.0, |fraction| whole + fraction);
    }

    if let Some(caps) = RE_FRACTION.captures(trimmed) {
        return ratio(&caps[1], &caps[2]).unwrap_or(0.0);
    }

    leading_decimal(trimmed).unwrap_or(0.0)
}

fn ratio(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator = numerator.parse::<f64>().ok()?;
    let denominator = denominator.parse::<f64>().ok()?;

    if denominator == 0.0 {
        return None;
    }

    Some(numerator / denominator)
}

fn leading_decimal(text: &str) -> Option<f64> {
    let caps = RE_LEADING_DECIMAL.captures(text)?;
    caps[1].parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_whole_and_decimal() {
        assert_eq!(parse_amount("2"), 2.0);
        assert_eq!(parse_amount(" 0.5 "), 0.5);
        assert_eq!(parse_amount(".25"), 0.25);
    }

    #[test]
    fn test_parse_pure_fraction() {
        assert_eq!(parse_amount("1/2"), 0.5);
        assert_eq!(parse_amount("3 / 4"), 0.75);
    }

    #[test]
    fn test_parse_mixed_fraction() {
        assert_eq!(parse_amount("1 1/2"), 1.5);
        assert_eq!(parse_amount("2-3/4"), 2.75);
    }

    #[test]
    fn test_parse_unicode_fraction() {
        assert_eq!(parse_amount("½"), 0.5);
        assert_eq!(parse_amount("2½"), 2.5);
        assert_eq!(parse_amount("1 ¼"), 1.25);
        assert!(approx(parse_amount("⅓"), 1.0 / 3.0));
        assert!(approx(parse_amount("1⅔"), 1.0 + 2.0 / 3.0));
    }

    #[test]
    fn test_parse_best_effort_leading_number() {
        assert_eq!(parse_amount("2 large"), 2.0);
        assert_eq!(parse_amount("2-3"), 2.0);
        assert_eq!(parse_amount("1.5kg"), 1.5);
    }

    #[test]
    fn test_parse_unparseable_gives_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("to taste"), 0.0);
        assert_eq!(parse_amount("a pinch"), 0.0);
        assert_eq!(parse_amount("1/0"), 0.0);
        assert_eq!(parse_amount("-2"), 0.0);
        assert_eq!(parse_amount("some½"), 0.0);
    }
}
