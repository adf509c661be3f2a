//! Items conventionally counted in whole units: eggs, cloves, slices, whole vegetables.

use std::sync::LazyLock;

use regex::Regex;

use crate::format::format_number;

static RE_INDIVISIBLE_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(eggs?|egg\s+(whites?|yolks?)|cloves?|garlic\s+cloves?|slices?|fillets?|breasts?|thighs?|drumsticks?|wings?|steaks?|chops?|whole|heads?|bunch(es)?|cans?|packets?|packages?|sheets?|sticks?)$",
    )
    .unwrap()
});

static RE_SIZED_WHOLE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(whole|large|medium|small)\s+(eggs?|onions?|garlic|lemons?)\b").unwrap()
});

static RE_EGG_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\beggs?\b").unwrap());
static RE_EGG_UNIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^eggs?$").unwrap());

const INDIVISIBLE_NAMES: [&str; 17] = [
    "egg",
    "eggs",
    "garlic",
    "onion",
    "shallot",
    "lemon",
    "lime",
    "orange",
    "apple",
    "banana",
    "avocado",
    "tomato",
    "potato",
    "carrot",
    "celery",
    "bay leaf",
    "bay leaves",
];

/// Volume equivalents of a fractional beaten egg, keyed by the fraction.
const EGG_EQUIVALENTS: [(f64, &str); 5] = [
    (0.25, "≈1½ tsp beaten"),
    (0.33, "≈1 tbsp beaten"),
    (0.5, "≈1½ tbsp beaten"),
    (0.66, "≈2 tbsp beaten"),
    (0.75, "≈2½ tbsp beaten"),
];

const EGG_EQUIVALENT_TOLERANCE: f64 = 0.1;

/// Rough volume of one beaten large egg.
pub const TBSP_PER_EGG: f64 = 3.0;

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

// "tomatoes" -> "tomato", "lemons" -> "lemon"
fn singular(name: &str) -> Option<&str> {
    name.strip_suffix("es")
        .filter(|stem| stem.ends_with('o'))
        .or_else(|| name.strip_suffix('s'))
}

fn matches_indivisible_name(name: &str) -> bool {
    INDIVISIBLE_NAMES.iter().any(|item| {
        name == *item
            || name.starts_with(&format!("{item} "))
            || name.ends_with(&format!(" {item}"))
    })
}

/// Whether an ingredient should be shown as a count rather than a decimal.
///
/// Either the unit ("3 cloves", "2 slices") or the ingredient name ("1 lemon",
/// "1 tbsp garlic") marks the line, whatever class the unit belongs to.
pub fn is_indivisible(name: &str, unit: &str) -> bool {
    if RE_INDIVISIBLE_UNIT.is_match(&normalize(unit)) {
        return true;
    }

    let name = normalize(name);
    if matches_indivisible_name(&name) {
        return true;
    }
    if singular(&name).is_some_and(matches_indivisible_name) {
        return true;
    }

    RE_SIZED_WHOLE_ITEM.is_match(&name)
}

pub fn is_egg(name: &str, unit: &str) -> bool {
    RE_EGG_UNIT.is_match(&normalize(unit)) || RE_EGG_NAME.is_match(&normalize(name))
}

/// Note describing a fractional egg in beaten-egg volume ("≈1½ tbsp beaten").
///
/// `None` for whole amounts. Fractions near a curated entry use it; anything else
/// falls back to [`TBSP_PER_EGG`].
pub fn egg_equivalent_note(amount: f64) -> Option<String> {
    let fractional = amount - amount.floor();
    if fractional < 1e-9 || 1.0 - fractional < 1e-9 {
        return None;
    }

    let key = (fractional * 100.0).round() / 100.0;

    if let Some((_, note)) = EGG_EQUIVALENTS
        .iter()
        .find(|(value, _)| (value - key).abs() < 1e-9)
    {
        return Some((*note).to_string());
    }

    let closest = EGG_EQUIVALENTS
        .iter()
        .map(|(value, note)| ((value - fractional).abs(), note))
        .filter(|(distance, _)| *distance < EGG_EQUIVALENT_TOLERANCE)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((_, note)) = closest {
        return Some((*note).to_string());
    }

    let tbsp = (fractional * TBSP_PER_EGG * 10.0).round() / 10.0;
    (tbsp > 0.0).then(|| format!("≈{} tbsp beaten", format_number(tbsp)))
}
