//! Locate the "same" ingredient or step in the previous version of a recipe.

use larder_shared::{IngredientGroup, IngredientLine, RecipeDocument, RecipeStep};
use serde::Serialize;

use crate::similarity::{
    INGREDIENT_MATCH_THRESHOLD, STEP_MATCH_THRESHOLD, normalize, similarity,
};

/// Best candidate for `current`.
///
/// An exact normalized match returns immediately. Otherwise the highest
/// similarity strictly above `threshold` wins, and ties keep the earlier
/// candidate. No candidate above the threshold gives `None`.
pub fn best_match<'a, T, I, F>(
    current: &str,
    candidates: I,
    key: F,
    threshold: f64,
) -> Option<&'a T>
where
    T: ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> &'a str,
{
    let wanted = normalize(current);
    let mut best: Option<(&'a T, f64)> = None;

    for candidate in candidates {
        let text = key(candidate);
        if normalize(text) == wanted {
            return Some(candidate);
        }

        let score = similarity(&wanted, text);
        if score <= threshold {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    if let Some((_, score)) = best {
        tracing::debug!(current, score, "fuzzy match found");
    }

    best.map(|(candidate, _)| candidate)
}

/// An ingredient from the previous version, ready to show next to its edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedIngredient<'a> {
    pub ingredient: &'a IngredientLine,
    /// "{amount} {unit}", the amount alone when there is no unit, empty without an amount.
    pub display_amount: String,
}

impl<'a> MatchedIngredient<'a> {
    pub fn new(ingredient: &'a IngredientLine) -> Self {
        let amount = ingredient.amount.as_deref().map(str::trim).unwrap_or_default();
        let unit = ingredient.unit.trim();

        let display_amount = match (amount.is_empty(), unit.is_empty()) {
            (true, _) => String::new(),
            (false, true) => amount.to_string(),
            (false, false) => format!("{amount} {unit}"),
        };

        Self {
            ingredient,
            display_amount,
        }
    }
}

fn ingredient_name(item: &IngredientLine) -> &str {
    &item.name
}

fn step_instruction(step: &RecipeStep) -> &str {
    &step.instruction
}

/// Search every group of the previous version for `current`.
pub fn find_matching_ingredient<'a>(
    current: &IngredientLine,
    original_groups: &'a [IngredientGroup],
) -> Option<MatchedIngredient<'a>> {
    let candidates = original_groups.iter().flat_map(|group| group.items.iter());

    best_match(
        &current.name,
        candidates,
        ingredient_name,
        INGREDIENT_MATCH_THRESHOLD,
    )
    .map(MatchedIngredient::new)
}

pub fn find_matching_step<'a>(
    current: &RecipeStep,
    original_steps: &'a [RecipeStep],
) -> Option<&'a RecipeStep> {
    best_match(
        &current.instruction,
        original_steps,
        step_instruction,
        STEP_MATCH_THRESHOLD,
    )
}

/// Index-based lookups against the previous version of a recipe.
///
/// A recipe without a previous version has nothing to match, so every lookup is
/// `None`.
#[derive(Debug, Clone, Copy)]
pub struct RecipeDiff<'a> {
    previous: Option<&'a RecipeDocument>,
}

impl<'a> RecipeDiff<'a> {
    pub fn new(previous: Option<&'a RecipeDocument>) -> Self {
        Self { previous }
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn original_ingredient(
        &self,
        current_groups: &[IngredientGroup],
        group_idx: usize,
        item_idx: usize,
    ) -> Option<MatchedIngredient<'a>> {
        let previous = self.previous?;
        let current = current_groups.get(group_idx)?.items.get(item_idx)?;

        find_matching_ingredient(current, &previous.ingredient_groups)
    }

    pub fn original_step(
        &self,
        current_steps: &[RecipeStep],
        step_idx: usize,
    ) -> Option<&'a RecipeStep> {
        let previous = self.previous?;
        let current = current_steps.get(step_idx)?;

        find_matching_step(current, &previous.steps)
    }
}
