use std::path::Path;

use anyhow::{Context, Result};
use larder_scaling::{
    ScaledIngredient, ScaledIngredientGroup, ServingsBounds, ServingsSelector, format_number,
    format_scale_factor, scale_groups,
};
use larder_shared::RecipeDocument;
use serde::Serialize;

use crate::config::{Config, OutputFormat};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleReport {
    pub recipe: String,
    pub original_servings: f64,
    pub servings: f64,
    pub scale_factor: String,
    pub requires_precision: bool,
    pub groups: Vec<ScaledIngredientGroup>,
}

/// Scale a recipe to the requested servings, clamped to what the configuration
/// and the recipe itself allow. No request keeps the original servings.
pub fn scale_recipe(
    recipe: &RecipeDocument,
    servings: Option<f64>,
    bounds: ServingsBounds,
) -> Result<ScaleReport> {
    let bounds = bounds.narrowed(recipe.servings.min, recipe.servings.max);
    let mut selector = ServingsSelector::new(recipe.servings.original, bounds)
        .with_context(|| format!("Recipe {:?} has invalid servings", recipe.name))?;

    if let Some(requested) = servings {
        let picked = selector.set(requested);
        if picked != requested {
            tracing::warn!(requested, servings = picked, "servings clamped to allowed range");
        }
    }

    let context = selector.context(recipe.requires_precision);
    let groups = scale_groups(&recipe.ingredient_groups, &context);

    Ok(ScaleReport {
        recipe: recipe.name.clone(),
        original_servings: selector.original(),
        servings: context.scaled_servings(),
        scale_factor: format_scale_factor(selector.scale_factor()),
        requires_precision: recipe.requires_precision,
        groups,
    })
}

fn ingredient_line(item: &ScaledIngredient) -> String {
    let mut line = if item.combined_display.is_empty() {
        format!("{} {}", item.name, item.unit).trim_end().to_string()
    } else {
        format!("{} {}", item.combined_display, item.name)
    };

    let preparation = item
        .preparation
        .as_deref()
        .map(str::trim)
        .filter(|preparation| !preparation.is_empty());
    if let Some(preparation) = preparation {
        line.push_str(", ");
        line.push_str(preparation);
    }
    if let Some(note) = &item.equivalent_note {
        line.push_str(&format!(" [{note}]"));
    }
    if item.optional {
        line.push_str(" (optional)");
    }

    line
}

pub fn render_scale(report: &ScaleReport) -> String {
    let mut lines = vec![
        report.recipe.clone(),
        format!(
            "{} -> {} servings ({})",
            format_number(report.original_servings),
            format_number(report.servings),
            report.scale_factor
        ),
    ];

    for group in &report.groups {
        lines.push(String::new());
        if !group.name.trim().is_empty() {
            lines.push(group.name.clone());
        }
        lines.extend(
            group
                .items
                .iter()
                .map(|item| format!("  {}", ingredient_line(item))),
        );
    }

    lines.join("\n")
}

pub fn scale(
    config: &Config,
    recipe_path: &Path,
    servings: Option<f64>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let recipe = super::load_recipe(recipe_path)?;
    let report = scale_recipe(&recipe, servings, config.servings.bounds())?;

    match format.unwrap_or(config.output.format) {
        OutputFormat::Text => println!("{}", render_scale(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_shared::{IngredientGroup, IngredientLine, Servings};

    fn pancakes() -> RecipeDocument {
        RecipeDocument {
            name: "Pancakes".to_string(),
            servings: Servings {
                original: 4.0,
                min: Some(2.0),
                max: Some(8.0),
            },
            ingredient_groups: vec![IngredientGroup::new(
                "Batter",
                vec![
                    IngredientLine::new("flour", Some("1"), "cup").with_preparation("sifted"),
                    IngredientLine::new("egg", Some("1"), ""),
                    IngredientLine::new("salt", None, "to taste"),
                    IngredientLine::new("blueberries", Some("100"), "g").optional(),
                ],
            )],
            ..Default::default()
        }
    }

    #[test]
    fn test_scale_recipe_clamps_to_recipe_bounds() -> anyhow::Result<()> {
        let report = scale_recipe(&pancakes(), Some(20.0), ServingsBounds::default())?;

        assert_eq!(report.servings, 8.0);
        assert_eq!(report.scale_factor, "2×");

        Ok(())
    }

    #[test]
    fn test_scale_recipe_without_request_keeps_original() -> anyhow::Result<()> {
        let report = scale_recipe(&pancakes(), None, ServingsBounds::default())?;

        assert_eq!(report.servings, 4.0);
        assert_eq!(report.scale_factor, "1×");
        assert_eq!(report.groups[0].items[0].practical_display, "1 cup");

        Ok(())
    }

    #[test]
    fn test_scale_recipe_original_below_recipe_min() -> anyhow::Result<()> {
        let mut recipe = pancakes();
        recipe.servings.min = Some(6.0);

        let report = scale_recipe(&recipe, None, ServingsBounds::default())?;
        assert_eq!(report.servings, 4.0);
        assert_eq!(report.scale_factor, "1×");

        let report = scale_recipe(&recipe, Some(5.0), ServingsBounds::default())?;
        assert_eq!(report.servings, 6.0);

        Ok(())
    }

    #[test]
    fn test_render_scale() -> anyhow::Result<()> {
        let report = scale_recipe(&pancakes(), Some(2.0), ServingsBounds::default())?;

        let expected = [
            "Pancakes",
            "4 -> 2 servings (½×)",
            "",
            "Batter",
            "  ½ cup (64g) flour, sifted",
            "  ½ egg [≈1½ tbsp beaten]",
            "  salt to taste",
            "  50g blueberries (optional)",
        ]
        .join("\n");

        assert_eq!(render_scale(&report), expected);

        Ok(())
    }

    #[test]
    fn test_invalid_recipe_servings() {
        let mut recipe = pancakes();
        recipe.servings.original = 0.0;

        assert!(scale_recipe(&recipe, None, ServingsBounds::default()).is_err());
    }
}
