//! Unit classification and same-class conversion.
//!
//! Every known unit belongs to one [`UnitClass`]. Volume and weight units carry a
//! factor to their class base unit (ml and g); conversions always route through
//! that base. Count units are labels only and never convert into one another.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, VariantArray, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UnitClass {
    Volume,
    Weight,
    Count,
    Unknown,
}

impl UnitClass {
    /// Canonical unit every conversion in this class goes through.
    pub fn base_unit(&self) -> Option<&'static str> {
        match self {
            UnitClass::Volume => Some("ml"),
            UnitClass::Weight => Some("g"),
            UnitClass::Count | UnitClass::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSpec {
    pub canonical: &'static str,
    pub class: UnitClass,
    /// Size of one unit expressed in the class base unit. 1.0 for count units.
    pub factor: f64,
    pub metric: bool,
}

const fn volume(canonical: &'static str, factor: f64, metric: bool) -> UnitSpec {
    UnitSpec {
        canonical,
        class: UnitClass::Volume,
        factor,
        metric,
    }
}

const fn weight(canonical: &'static str, factor: f64, metric: bool) -> UnitSpec {
    UnitSpec {
        canonical,
        class: UnitClass::Weight,
        factor,
        metric,
    }
}

const fn count(canonical: &'static str) -> UnitSpec {
    UnitSpec {
        canonical,
        class: UnitClass::Count,
        factor: 1.0,
        metric: false,
    }
}

static UNIT_TABLE: &[(UnitSpec, &[&str])] = &[
    // Volume, base ml
    (
        volume("ml", 1.0, true),
        &["ml", "mls", "milliliter", "milliliters", "millilitre", "millilitres"],
    ),
    (
        volume("cl", 10.0, true),
        &["cl", "centiliter", "centiliters", "centilitre", "centilitres"],
    ),
    (
        volume("dl", 100.0, true),
        &["dl", "deciliter", "deciliters", "decilitre", "decilitres"],
    ),
    (
        volume("l", 1000.0, true),
        &["l", "lt", "ltr", "liter", "liters", "litre", "litres"],
    ),
    (
        volume("tsp", 5.0, false),
        &["tsp", "tsps", "tspn", "teaspoon", "teaspoons"],
    ),
    (
        volume("tbsp", 15.0, false),
        &[
            "tbsp",
            "tbsps",
            "tbs",
            "tbl",
            "tbls",
            "tblsp",
            "tablespoon",
            "tablespoons",
        ],
    ),
    (volume("cup", 240.0, false), &["cup", "cups"]),
    (
        volume("fl oz", 29.5735, false),
        &["fl oz", "floz", "fl ounce", "fluid ounce", "fluid ounces"],
    ),
    (volume("pint", 473.176, false), &["pint", "pints", "pt"]),
    (volume("quart", 946.353, false), &["quart", "quarts", "qt"]),
    (volume("gallon", 3785.41, false), &["gallon", "gallons", "gal"]),
    // Weight, base g
    (
        weight("mg", 0.001, true),
        &["mg", "milligram", "milligrams", "milligramme", "milligrammes"],
    ),
    (
        weight("g", 1.0, true),
        &["g", "gr", "gram", "grams", "gramme", "grammes"],
    ),
    (
        weight("kg", 1000.0, true),
        &[
            "kg",
            "kgs",
            "kilo",
            "kilos",
            "kilogram",
            "kilograms",
            "kilogramme",
        ],
    ),
    (weight("oz", 28.3495, false), &["oz", "ounce", "ounces"]),
    (
        weight("lb", 453.592, false),
        &["lb", "lbs", "pound", "pounds"],
    ),
    // Count, labels only
    (count(""), &[""]),
    (count("whole"), &["whole"]),
    (count("piece"), &["piece", "pieces", "pc", "pcs", "each", "ea"]),
    (count("item"), &["item", "items"]),
    (count("clove"), &["clove", "cloves"]),
    (count("slice"), &["slice", "slices"]),
    (count("stalk"), &["stalk", "stalks"]),
    (count("sprig"), &["sprig", "sprigs"]),
    (count("bunch"), &["bunch", "bunches"]),
    (count("head"), &["head", "heads"]),
    (count("leaf"), &["leaf", "leaves"]),
    (count("pinch"), &["pinch", "pinches"]),
    (count("dash"), &["dash", "dashes"]),
    (count("handful"), &["handful", "handfuls"]),
    (count("can"), &["can", "cans", "tin", "tins"]),
    (count("jar"), &["jar", "jars"]),
    (count("bottle"), &["bottle", "bottles"]),
    (count("packet"), &["packet", "packets"]),
    (count("package"), &["package", "packages", "pkg"]),
    (count("stick"), &["stick", "sticks"]),
    (count("sheet"), &["sheet", "sheets"]),
    (count("fillet"), &["fillet", "fillets", "filet", "filets"]),
    (count("breast"), &["breast", "breasts"]),
    (count("thigh"), &["thigh", "thighs"]),
    (count("drumstick"), &["drumstick", "drumsticks"]),
    (count("wing"), &["wing", "wings"]),
    (count("steak"), &["steak", "steaks"]),
    (count("chop"), &["chop", "chops"]),
];

static UNIT_INDEX: LazyLock<HashMap<&'static str, &'static UnitSpec>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for (spec, aliases) in UNIT_TABLE {
        for alias in *aliases {
            index.insert(*alias, spec);
        }
    }
    index
});

// Below this length a single edit turns one unit into another ("tbs" / "tsp").
const FUZZY_MIN_LEN: usize = 6;

/// Lowercase, trim, drop periods and collapse inner whitespace: " Fl. Oz " -> "fl oz".
pub fn normalize_unit(unit: &str) -> String {
    unit.to_lowercase()
        .replace('.', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a free-text unit to its table entry.
///
/// Tries the normalized text, then singular forms, then a single-edit match for
/// longer words when exactly one unit is that close.
pub fn lookup(unit: &str) -> Option<&'static UnitSpec> {
    let normalized = normalize_unit(unit);

    if let Some(spec) = UNIT_INDEX.get(normalized.as_str()) {
        return Some(*spec);
    }

    for suffix in ["es", "s"] {
        let singular = normalized
            .strip_suffix(suffix)
            .filter(|stem| !stem.is_empty())
            .and_then(|stem| UNIT_INDEX.get(stem));
        if let Some(spec) = singular {
            return Some(*spec);
        }
    }

    if normalized.chars().count() < FUZZY_MIN_LEN {
        return None;
    }

    let mut found: Option<&'static UnitSpec> = None;
    for (alias, spec) in UNIT_INDEX.iter() {
        if alias.chars().count() < FUZZY_MIN_LEN || strsim::levenshtein(alias, &normalized) > 1 {
            continue;
        }
        match found {
            Some(existing) if existing.canonical != spec.canonical => return None,
            _ => found = Some(*spec),
        }
    }

    if let Some(spec) = found {
        tracing::trace!(unit, canonical = spec.canonical, "unit resolved by edit distance");
    }

    found
}

pub fn classify(unit: &str) -> UnitClass {
    lookup(unit).map_or(UnitClass::Unknown, |spec| spec.class)
}

/// Canonical short name ("tablespoons" -> "tbsp"), `None` for unknown units.
pub fn canonical_unit(unit: &str) -> Option<&'static str> {
    lookup(unit).map(|spec| spec.canonical)
}

/// Metric units render without a space between amount and unit ("300g").
pub fn is_metric(unit: &str) -> bool {
    lookup(unit).is_some_and(|spec| spec.metric)
}

/// Convert `amount` between two units of the same volume or weight class.
///
/// The same count unit converts to itself; distinct count units, unknown units
/// and cross-class pairs yield `None`.
pub fn convert(amount: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let from = lookup(from_unit)?;
    let to = lookup(to_unit)?;

    if from.class != to.class {
        return None;
    }

    match from.class {
        UnitClass::Volume | UnitClass::Weight => Some(amount * from.factor / to.factor),
        UnitClass::Count => (from.canonical == to.canonical).then_some(amount),
        UnitClass::Unknown => None,
    }
}

/// Express `amount` in the class base unit (ml or g).
pub fn to_base(amount: f64, unit: &str) -> Option<(f64, &'static str)> {
    let spec = lookup(unit)?;
    let base = spec.class.base_unit()?;

    Some((amount * spec.factor, base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_case_and_space_insensitive() {
        assert_eq!(classify("  CUPS "), UnitClass::Volume);
        assert_eq!(classify("Tbsp."), UnitClass::Volume);
        assert_eq!(classify("Fl. Oz"), UnitClass::Volume);
        assert_eq!(classify("KG"), UnitClass::Weight);
        assert_eq!(classify("Cloves"), UnitClass::Count);
        assert_eq!(classify(""), UnitClass::Count);
        assert_eq!(classify("to taste"), UnitClass::Unknown);
    }

    #[test]
    fn test_classify_plural_and_typos() {
        assert_eq!(canonical_unit("pinches"), Some("pinch"));
        assert_eq!(canonical_unit("tablespon"), Some("tbsp"));
        assert_eq!(canonical_unit("teaspooons"), Some("tsp"));
        assert_eq!(canonical_unit("kilogramm"), Some("kg"));
        // Short words never go through edit distance
        assert_eq!(canonical_unit("tbp"), None);
    }

    #[test]
    fn test_bare_plural_suffix_is_unknown() {
        assert_eq!(classify("s"), UnitClass::Unknown);
        assert_eq!(classify("es"), UnitClass::Unknown);
        assert_eq!(canonical_unit("S."), None);
    }

    #[test]
    fn test_convert_volume_through_base() {
        assert_eq!(convert(1.0, "cup", "ml"), Some(240.0));
        assert_eq!(convert(1.0, "tbsp", "tsp"), Some(3.0));
        assert_eq!(convert(4.0, "tablespoons", "cup"), Some(0.25));
        assert_eq!(convert(1500.0, "ml", "l"), Some(1.5));
    }

    #[test]
    fn test_convert_weight_through_base() {
        let grams = convert(1.0, "lb", "g").unwrap();
        assert!((grams - 453.592).abs() < 1e-9);

        let ounces = convert(453.592, "g", "oz").unwrap();
        assert!((ounces - 16.0).abs() < 0.01);
    }

    #[test]
    fn test_convert_rejects_cross_class_and_count() {
        assert_eq!(convert(1.0, "cup", "g"), None);
        assert_eq!(convert(2.0, "clove", "slice"), None);
        assert_eq!(convert(2.0, "cloves", "clove"), Some(2.0));
        assert_eq!(convert(1.0, "handful", "handful"), Some(1.0));
        assert_eq!(convert(1.0, "to taste", "to taste"), None);
    }

    #[test]
    fn test_to_base() {
        assert_eq!(to_base(2.0, "tbsp"), Some((30.0, "ml")));
        assert_eq!(to_base(1.5, "kg"), Some((1500.0, "g")));
        assert_eq!(to_base(3.0, "cloves"), None);
    }

    #[test]
    fn test_is_metric() {
        assert!(is_metric("grams"));
        assert!(is_metric("ml"));
        assert!(!is_metric("cups"));
        assert!(!is_metric("whole"));
    }

    #[test]
    fn test_unit_class_strum() {
        assert_eq!(UnitClass::Volume.to_string(), "volume");
        assert_eq!("weight".parse::<UnitClass>().unwrap(), UnitClass::Weight);
        assert_eq!(UnitClass::VARIANTS.len(), 4);
    }
}
