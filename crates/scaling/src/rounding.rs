//! Friendly-quantity rounding.
//!
//! Two measuring realities, two rules:
//! - metric amounts land on graduations a kitchen scale or jug can show
//!   (52ml -> 50ml, 127g -> 125g, 3ml -> 5ml);
//! - imperial and counted amounts land on a fraction a cup, spoon or hand can
//!   produce (0.33 -> ⅓, 0.74 -> ¾).

use crate::format::format_number;
use crate::unit::{self, UnitClass};

/// Fractions that standard measuring cups and spoons can actually produce.
pub const FRIENDLY_FRACTIONS: [(f64, char); 5] = [
    (0.25, '¼'),
    (1.0 / 3.0, '⅓'),
    (0.5, '½'),
    (2.0 / 3.0, '⅔'),
    (0.75, '¾'),
];

/// Maximum distance between a fractional part and a friendly fraction.
pub const FRACTION_TOLERANCE: f64 = 0.06;

/// Graduations a kitchen scale or measuring jug realistically offers.
pub const METRIC_INCREMENTS: [f64; 14] = [
    5.0, 10.0, 15.0, 25.0, 50.0, 75.0, 100.0, 125.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0,
];

/// Above the last increment, metric amounts round to this step.
pub const LARGE_METRIC_STEP: f64 = 50.0;

const WHOLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct RoundedQuantity {
    pub value: f64,
    pub display: String,
}

impl RoundedQuantity {
    fn new(value: f64, display: impl Into<String>) -> Self {
        Self {
            value,
            display: display.into(),
        }
    }

    fn whole(value: f64) -> Self {
        Self::new(value, format_number(value))
    }

    fn with_glyph(whole: f64, fraction: f64, glyph: char) -> Self {
        let display = if whole > 0.0 {
            format!("{}{}", format_number(whole), glyph)
        } else {
            glyph.to_string()
        };
        Self::new(whole + fraction, display)
    }
}

/// Which rounding rule applies to an amount expressed in a given unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingPolicy {
    MeasurableMetric,
    FriendlyFraction,
}

impl RoundingPolicy {
    pub fn for_unit(unit: &str) -> Self {
        match unit::classify(unit) {
            UnitClass::Volume | UnitClass::Weight if unit::is_metric(unit) => {
                RoundingPolicy::MeasurableMetric
            }
            UnitClass::Volume | UnitClass::Weight => RoundingPolicy::FriendlyFraction,
            UnitClass::Count | UnitClass::Unknown => RoundingPolicy::FriendlyFraction,
        }
    }
}

pub fn is_whole(value: f64) -> bool {
    (value - value.round()).abs() < WHOLE_EPSILON
}

/// Round a decimal to the nearest friendly cooking fraction.
///
/// Whole numbers pass through. Otherwise the closest friendly fraction within
/// [`FRACTION_TOLERANCE`] wins, then the nearest quarter. An amount too small to
/// reach a quarter keeps one decimal place instead of collapsing to zero.
pub fn round_to_friendly_fraction(decimal: f64) -> RoundedQuantity {
    if is_whole(decimal) {
        return RoundedQuantity::whole(decimal.round());
    }

    let whole = decimal.floor();
    let fractional = decimal - whole;

    let closest = FRIENDLY_FRACTIONS
        .iter()
        .map(|&(value, glyph)| ((fractional - value).abs(), value, glyph))
        .filter(|(distance, _, _)| *distance < FRACTION_TOLERANCE)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((_, value, glyph)) = closest {
        return RoundedQuantity::with_glyph(whole, value, glyph);
    }

    let quarters = (fractional * 4.0).round() / 4.0;

    if quarters == 0.0 && whole > 0.0 {
        return RoundedQuantity::whole(whole);
    }
    if quarters == 1.0 {
        return RoundedQuantity::whole(whole + 1.0);
    }

    let quarter_glyph = FRIENDLY_FRACTIONS
        .iter()
        .find(|(value, _)| *value == quarters)
        .map(|&(_, glyph)| glyph);

    match quarter_glyph {
        Some(glyph) => RoundedQuantity::with_glyph(whole, quarters, glyph),
        None => {
            let one_decimal = ((decimal * 10.0).round() / 10.0).max(0.1);
            RoundedQuantity::new(one_decimal, format_number(one_decimal))
        }
    }
}

/// Round a metric amount (in ml or g) to a measurable increment.
pub fn round_to_measurable_metric(amount: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }

    let first = METRIC_INCREMENTS[0];
    let last = METRIC_INCREMENTS[METRIC_INCREMENTS.len() - 1];

    if amount < first {
        return first;
    }

    if amount > last {
        return (amount / LARGE_METRIC_STEP).round() * LARGE_METRIC_STEP;
    }

    let mut closest = first;
    let mut min_diff = (amount - first).abs();

    for increment in METRIC_INCREMENTS {
        let diff = (amount - increment).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = increment;
        }
    }

    closest
}

/// Round an amount in `unit` according to that unit's [`RoundingPolicy`].
///
/// Metric rounding happens at base-unit scale, so 1.23 kg is rounded as 1230 g
/// and expressed back in kg.
pub fn round_quantity(amount: f64, unit: &str) -> RoundedQuantity {
    match RoundingPolicy::for_unit(unit) {
        RoundingPolicy::MeasurableMetric => {
            let Some((base_amount, base_unit)) = unit::to_base(amount, unit) else {
                return round_to_friendly_fraction(amount);
            };
            let rounded = round_to_measurable_metric(base_amount);
            let value = unit::convert(rounded, base_unit, unit).unwrap_or(rounded);
            RoundedQuantity::new(value, format_number(value))
        }
        RoundingPolicy::FriendlyFraction => round_to_friendly_fraction(amount),
    }
}
