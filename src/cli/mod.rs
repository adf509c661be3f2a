mod convert;
mod diff;
mod scale;

use std::path::Path;

use anyhow::{Context, Result};
use larder_shared::RecipeDocument;

pub use convert::{convert, convert_amount};
pub use diff::{DiffEntry, DiffKind, diff, diff_recipes, render_diff};
pub use scale::{ScaleReport, render_scale, scale, scale_recipe};

/// Read a recipe version from a JSON file.
pub fn load_recipe(path: &Path) -> Result<RecipeDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe {}", path.display()))?;

    let recipe = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse recipe {}", path.display()))?;

    tracing::debug!(path = %path.display(), "recipe loaded");

    Ok(recipe)
}
