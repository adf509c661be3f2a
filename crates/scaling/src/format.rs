use crate::rounding::is_whole;
use crate::unit;

/// Render a number without float noise: 3.0 -> "3", 1.1 -> "1.1", 48.690000001 -> "48.69".
pub fn format_number(value: f64) -> String {
    if is_whole(value) {
        return format!("{}", value.round() as i64);
    }

    let trimmed = (value * 10_000.0).round() / 10_000.0;
    format!("{}", trimmed)
}

/// Join an amount and a unit with the spacing cooks expect.
///
/// - No unit or "whole": amount only ("½", "3")
/// - Metric units: no space ("300g", "1.1l")
/// - Everything else: a space ("2 cups", "¼ tsp")
pub fn format_amount_with_unit(amount: &str, unit: &str) -> String {
    let normalized = unit::normalize_unit(unit);

    if normalized.is_empty() || normalized == "whole" {
        return amount.to_string();
    }

    if unit::is_metric(unit) {
        return format!("{}{}", amount, unit.trim());
    }

    format!("{} {}", amount, unit.trim())
}

/// Display a scale factor as a short multiplier ("1×", "½×", "1½×", "2.3×").
pub fn format_scale_factor(factor: f64) -> String {
    if factor == 1.0 {
        return "1×".to_string();
    }
    if factor == 0.5 {
        return "½×".to_string();
    }
    if factor == 1.5 {
        return "1½×".to_string();
    }
    if factor == 2.0 {
        return "2×".to_string();
    }

    let rounded = (factor * 10.0).round() / 10.0;
    format!("{}×", format_number(rounded))
}
