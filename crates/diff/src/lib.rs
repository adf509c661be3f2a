//! Fuzzy pairing of ingredients and steps across two versions of a recipe.

pub mod matcher;
pub mod similarity;

pub use matcher::{
    MatchedIngredient, RecipeDiff, best_match, find_matching_ingredient, find_matching_step,
};
pub use similarity::{INGREDIENT_MATCH_THRESHOLD, STEP_MATCH_THRESHOLD, similarity};
