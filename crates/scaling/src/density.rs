//! Approximate ingredient densities for a secondary weight reading of volumes.
//!
//! Unknown ingredients get no density at all: a missing gram reading is better
//! than a wrong one.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::unit::{self, UnitClass};

/// Grams per millilitre.
static DENSITIES: &[(&str, f64)] = &[
    ("water", 1.0),
    ("stock", 1.0),
    ("broth", 1.0),
    ("milk", 1.03),
    ("buttermilk", 1.03),
    ("cream", 1.0),
    ("heavy cream", 1.0),
    ("yogurt", 1.03),
    ("oil", 0.92),
    ("olive oil", 0.92),
    ("butter", 0.96),
    ("honey", 1.4),
    ("syrup", 1.4),
    ("maple syrup", 1.37),
    ("corn syrup", 1.38),
    ("molasses", 1.4),
    ("flour", 0.53),
    ("all-purpose flour", 0.53),
    ("bread flour", 0.55),
    ("cake flour", 0.5),
    ("whole wheat flour", 0.51),
    ("sugar", 0.85),
    ("granulated sugar", 0.85),
    ("brown sugar", 0.82),
    ("powdered sugar", 0.56),
    ("salt", 1.2),
    ("kosher salt", 0.58),
    ("sea salt", 1.15),
    ("rice", 0.75),
    ("soy sauce", 1.1),
    ("fish sauce", 1.12),
    ("vinegar", 1.0),
    ("lemon juice", 1.03),
    ("lime juice", 1.03),
    ("vanilla extract", 0.88),
    ("cocoa", 0.4),
    ("cocoa powder", 0.4),
    ("cornstarch", 0.54),
    ("baking powder", 0.9),
    ("baking soda", 1.1),
    ("yeast", 0.72),
    ("oats", 0.4),
    ("rolled oats", 0.4),
];

static DENSITY_INDEX: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| DENSITIES.iter().copied().collect());

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

// Whole-word occurrence: "olive oil" in "extra virgin olive oil", not "rice" in "licorice".
fn contains_word(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Look up an ingredient's density in g/ml.
///
/// Exact normalized name first, then its plural ("oat" -> oats), then the
/// longest table entry appearing as whole words in the name
/// ("extra virgin olive oil" -> olive oil).
pub fn estimate_density(ingredient_name: &str) -> Option<f64> {
    let normalized = ingredient_name.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let plurals = [format!("{normalized}s"), format!("{normalized}es")];
    let direct = std::iter::once(normalized.as_str())
        .chain(plurals.iter().map(String::as_str))
        .find_map(|key| DENSITY_INDEX.get(key).copied());
    if direct.is_some() {
        return direct;
    }

    let found = DENSITIES
        .iter()
        .filter(|(key, _)| contains_word(&normalized, key))
        .max_by_key(|(key, _)| key.len())
        .map(|(_, density)| *density);

    if found.is_none() {
        tracing::trace!(ingredient = %normalized, "no density for ingredient");
    }

    found
}

/// Estimate the weight in whole grams of a volume measurement.
///
/// `None` for non-volume units and ingredients without a known density.
pub fn estimate_grams(amount: f64, unit: &str, ingredient_name: &str) -> Option<f64> {
    if unit::classify(unit) != UnitClass::Volume {
        return None;
    }

    let (ml, _) = unit::to_base(amount, unit)?;
    let density = estimate_density(ingredient_name)?;

    Some((ml * density).round())
}
