//! Ingredient scaling: parse, scale, classify, step, round, and add a weight reading.

use larder_shared::{IngredientGroup, IngredientLine};
use serde::{Deserialize, Serialize};

use crate::amount::parse_amount;
use crate::density;
use crate::error::{ScaleError, ScaleResult};
use crate::format::{format_amount_with_unit, format_number};
use crate::indivisible::{egg_equivalent_note, is_egg, is_indivisible};
use crate::rounding::{self, RoundedQuantity};
use crate::stepper::{self, Measure};
use crate::unit::{self, UnitClass};

/// Serving counts for one scaling call.
///
/// `original_servings` must be positive; [`ScaleContext::new`] trusts its input,
/// [`ScaleContext::try_new`] checks it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleContext {
    pub original_servings: f64,
    pub target_servings: f64,
    /// Disables friendly rounding and unit stepping: amounts keep two decimals.
    #[serde(default)]
    pub requires_precision: bool,
}

impl ScaleContext {
    pub fn new(original_servings: f64, target_servings: f64) -> Self {
        Self {
            original_servings,
            target_servings,
            requires_precision: false,
        }
    }

    pub fn with_precision(mut self, requires_precision: bool) -> Self {
        self.requires_precision = requires_precision;
        self
    }

    pub fn try_new(
        original_servings: f64,
        target_servings: f64,
        requires_precision: bool,
    ) -> ScaleResult<Self> {
        for servings in [original_servings, target_servings] {
            if !servings.is_finite() || servings <= 0.0 {
                return Err(ScaleError::InvalidServings(servings));
            }
        }

        Ok(Self::new(original_servings, target_servings).with_precision(requires_precision))
    }

    /// Build the context that brings one ingredient to a requested amount.
    ///
    /// The requested amount is converted into the unit the ingredient is written
    /// in, so "300 ml of milk" works against a recipe listing "1 cup milk".
    pub fn from_ingredient_target(
        groups: &[IngredientGroup],
        ingredient_name: &str,
        target_amount: f64,
        target_unit: &str,
        original_servings: f64,
        requires_precision: bool,
    ) -> ScaleResult<Self> {
        let wanted = ingredient_name.trim().to_lowercase();
        let line = groups
            .iter()
            .flat_map(|group| group.items.iter())
            .find(|item| item.name.trim().to_lowercase() == wanted)
            .ok_or_else(|| ScaleError::IngredientNotFound(ingredient_name.to_string()))?;

        let base_amount = line.amount.as_deref().map_or(0.0, parse_amount);
        if base_amount <= 0.0 {
            return Err(ScaleError::MissingAmount(line.name.clone()));
        }

        let converted = unit::convert(target_amount, target_unit, &line.unit).ok_or_else(|| {
            ScaleError::UnconvertibleUnits {
                from: target_unit.to_string(),
                to: line.unit.clone(),
            }
        })?;

        let factor = converted / base_amount;

        Self::try_new(
            original_servings,
            original_servings * factor,
            requires_precision,
        )
    }

    /// Always `target / original`.
    pub fn scale_factor(&self) -> f64 {
        self.target_servings / self.original_servings
    }

    /// Servings implied by the factor, to one decimal.
    pub fn scaled_servings(&self) -> f64 {
        (self.original_servings * self.scale_factor() * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledIngredient {
    pub name: String,
    /// What to measure with ("¾ cup", "50ml", "½").
    pub practical_display: String,
    /// Secondary reading when one exists ("180g"), otherwise the practical one.
    pub precise_display: String,
    /// "{practical} ({precise})" when both differ, otherwise the practical one.
    pub combined_display: String,
    pub unit: String,
    pub is_indivisible: bool,
    pub equivalent_note: Option<String>,
    pub preparation: Option<String>,
    pub optional: bool,
    /// Parsed amount times the scale factor, before any rounding.
    pub scaled_amount: f64,
    pub original_amount: Option<String>,
    pub original_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledIngredientGroup {
    pub name: String,
    pub items: Vec<ScaledIngredient>,
}

struct Reading {
    practical: String,
    precise: Option<String>,
    unit: String,
}

impl ScaledIngredient {
    fn unscaled(line: &IngredientLine) -> Self {
        Self {
            name: line.name.clone(),
            practical_display: String::new(),
            precise_display: String::new(),
            combined_display: String::new(),
            unit: line.unit.clone(),
            is_indivisible: false,
            equivalent_note: None,
            preparation: line.preparation.clone(),
            optional: line.optional,
            scaled_amount: 0.0,
            original_amount: line.amount.clone(),
            original_unit: line.unit.clone(),
        }
    }

    fn from_reading(
        line: &IngredientLine,
        scaled_amount: f64,
        reading: Reading,
        is_indivisible: bool,
        equivalent_note: Option<String>,
    ) -> Self {
        let Reading {
            practical,
            precise,
            unit,
        } = reading;

        let (precise_display, combined_display) = match precise {
            Some(precise) if precise != practical => {
                let combined = format!("{} ({})", practical, precise);
                (precise, combined)
            }
            _ => (practical.clone(), practical.clone()),
        };

        Self {
            name: line.name.clone(),
            practical_display: practical,
            precise_display,
            combined_display,
            unit,
            is_indivisible,
            equivalent_note,
            preparation: line.preparation.clone(),
            optional: line.optional,
            scaled_amount,
            original_amount: line.amount.clone(),
            original_unit: line.unit.clone(),
        }
    }
}

/// Scale one ingredient line.
///
/// Lines without an amount ("salt to taste") pass through with empty displays.
pub fn scale_ingredient(line: &IngredientLine, context: &ScaleContext) -> ScaledIngredient {
    let parsed = line.amount.as_deref().map_or(0.0, parse_amount);
    if !line.has_amount() || parsed == 0.0 {
        return ScaledIngredient::unscaled(line);
    }

    let scaled = parsed * context.scale_factor();
    let unit = line.unit.as_str();
    let indivisible = is_indivisible(&line.name, unit);

    if indivisible || unit::classify(unit) == UnitClass::Count {
        let rounded = rounding::round_to_friendly_fraction(scaled);
        let note = if is_egg(&line.name, unit) {
            egg_equivalent_note(rounded.value)
        } else {
            None
        };
        let reading = Reading {
            practical: format_amount_with_unit(&rounded.display, unit),
            precise: None,
            unit: line.unit.clone(),
        };

        return ScaledIngredient::from_reading(line, scaled, reading, indivisible, note);
    }

    let reading = if context.requires_precision {
        exact_reading(scaled, unit)
    } else {
        practical_reading(scaled, unit, &line.name)
    };

    tracing::trace!(
        ingredient = %line.name,
        scaled,
        display = %reading.practical,
        "ingredient scaled"
    );

    ScaledIngredient::from_reading(line, scaled, reading, false, None)
}

/// Scale every group, keeping group and item order.
pub fn scale_groups(
    groups: &[IngredientGroup],
    context: &ScaleContext,
) -> Vec<ScaledIngredientGroup> {
    tracing::debug!(
        original_servings = context.original_servings,
        target_servings = context.target_servings,
        scale_factor = context.scale_factor(),
        requires_precision = context.requires_precision,
        groups = groups.len(),
        "scaling ingredient groups"
    );

    groups
        .iter()
        .map(|group| ScaledIngredientGroup {
            name: group.name.clone(),
            items: group
                .items
                .iter()
                .map(|item| scale_ingredient(item, context))
                .collect(),
        })
        .collect()
}

fn exact_reading(scaled: f64, unit: &str) -> Reading {
    let exact = (scaled * 100.0).round() / 100.0;

    Reading {
        practical: format_amount_with_unit(&format_number(exact), unit),
        precise: None,
        unit: unit.to_string(),
    }
}

fn practical_reading(scaled: f64, unit: &str, name: &str) -> Reading {
    match unit::classify(unit) {
        UnitClass::Volume => volume_reading(scaled, unit, name),
        UnitClass::Weight => weight_reading(scaled, unit),
        UnitClass::Count | UnitClass::Unknown => fraction_reading(scaled, unit),
    }
}

fn volume_reading(scaled: f64, unit: &str, name: &str) -> Reading {
    // Metric volumes are stepped and rounded from millilitres.
    let start = match unit::to_base(scaled, unit) {
        Some((ml, base)) if unit::is_metric(unit) => Measure::new(ml, base),
        _ => Measure::new(scaled, unit),
    };

    let (rounded, practical_unit) = settle(stepper::step(start.amount, &start.unit));

    let precise = density::estimate_grams(scaled, unit, name)
        .filter(|grams| *grams > 0.0)
        .map(|grams| format!("{}g", format_number(grams)));

    Reading {
        practical: format_amount_with_unit(&rounded.display, &practical_unit),
        precise,
        unit: practical_unit,
    }
}

fn weight_reading(scaled: f64, unit: &str) -> Reading {
    let Some((grams, base)) = unit::to_base(scaled, unit) else {
        return fraction_reading(scaled, unit);
    };

    let (rounded, practical_unit) = settle(stepper::step(grams, base));

    Reading {
        practical: format_amount_with_unit(&rounded.display, &practical_unit),
        precise: None,
        unit: practical_unit,
    }
}

fn fraction_reading(scaled: f64, unit: &str) -> Reading {
    let rounded = rounding::round_to_friendly_fraction(scaled);

    Reading {
        practical: format_amount_with_unit(&rounded.display, unit),
        precise: None,
        unit: unit.to_string(),
    }
}

/// Round a stepped measure, promoting once more if rounding reached a step-up
/// threshold (990 ml rounds to 1000 ml, shown as 1l).
fn settle(stepped: Measure) -> (RoundedQuantity, String) {
    let rounded = rounding::round_quantity(stepped.amount, &stepped.unit);
    let promoted = stepper::step_up(Measure::new(rounded.value, stepped.unit.clone()));

    if promoted.unit == stepped.unit {
        return (rounded, stepped.unit);
    }

    let rounded = rounding::round_quantity(promoted.amount, &promoted.unit);
    (rounded, promoted.unit)
}
