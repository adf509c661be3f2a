use thiserror::Error;

pub type ScaleResult<T> = Result<T, ScaleError>;

/// Rejections from the validating helpers callers run before scaling.
///
/// The scaling pipeline itself never fails; these only come from building a
/// [`crate::ScaleContext`] or a [`crate::ServingsSelector`] out of untrusted input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error("Invalid servings: {0} - servings must be a positive number")]
    InvalidServings(f64),

    #[error("Invalid servings bounds: min {min}, max {max}, step {step}")]
    InvalidBounds { min: f64, max: f64, step: f64 },

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("Ingredient has no amount to scale from: {0}")]
    MissingAmount(String),

    #[error("Cannot convert {from} to {to}")]
    UnconvertibleUnits { from: String, to: String },
}
