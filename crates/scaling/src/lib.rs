//! Recipe scaling and measurement normalization.
//!
//! Scales ingredient lines to a new serving count and renders amounts a cook can
//! actually measure. Everything here is pure: no I/O, no shared mutable state.

pub mod amount;
pub mod density;
pub mod error;
pub mod format;
pub mod indivisible;
pub mod rounding;
pub mod scaler;
pub mod servings;
pub mod stepper;
pub mod unit;

pub use amount::parse_amount;
pub use density::{estimate_density, estimate_grams};
pub use error::{ScaleError, ScaleResult};
pub use format::{format_amount_with_unit, format_number, format_scale_factor};
pub use indivisible::{egg_equivalent_note, is_egg, is_indivisible};
pub use rounding::{
    RoundedQuantity, RoundingPolicy, round_quantity, round_to_friendly_fraction,
    round_to_measurable_metric,
};
pub use scaler::{
    ScaleContext, ScaledIngredient, ScaledIngredientGroup, scale_groups, scale_ingredient,
};
pub use servings::{ServingsBounds, ServingsSelector};
pub use stepper::{Measure, step};
pub use unit::{UnitClass, canonical_unit, classify, convert, is_metric};

/// Servings implied by a context, rounded to one decimal.
pub fn scaled_servings(context: &ScaleContext) -> f64 {
    context.scaled_servings()
}
