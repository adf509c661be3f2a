use std::path::Path;

use anyhow::Result;
use larder_diff::{MatchedIngredient, RecipeDiff};
use larder_shared::RecipeDocument;
use serde::Serialize;
use strum::Display;

use crate::config::{Config, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiffKind {
    Ingredient,
    Step,
}

/// One element of the current version next to what it was, if anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub current: String,
    pub original: Option<String>,
}

fn describe_ingredient(matched: &MatchedIngredient<'_>) -> String {
    if matched.display_amount.is_empty() {
        return matched.ingredient.name.clone();
    }

    format!("{} ({})", matched.ingredient.name, matched.display_amount)
}

pub fn diff_recipes(previous: &RecipeDocument, current: &RecipeDocument) -> Vec<DiffEntry> {
    let diff = RecipeDiff::new(Some(previous));
    let mut entries = Vec::new();

    for (group_idx, group) in current.ingredient_groups.iter().enumerate() {
        for (item_idx, item) in group.items.iter().enumerate() {
            let original = diff
                .original_ingredient(&current.ingredient_groups, group_idx, item_idx)
                .map(|matched| describe_ingredient(&matched));

            entries.push(DiffEntry {
                kind: DiffKind::Ingredient,
                current: describe_ingredient(&MatchedIngredient::new(item)),
                original,
            });
        }
    }

    for (step_idx, step) in current.steps.iter().enumerate() {
        let original = diff
            .original_step(&current.steps, step_idx)
            .map(|step| step.instruction.clone());

        entries.push(DiffEntry {
            kind: DiffKind::Step,
            current: step.instruction.clone(),
            original,
        });
    }

    tracing::debug!(
        entries = entries.len(),
        matched = entries.iter().filter(|entry| entry.original.is_some()).count(),
        "recipe versions compared"
    );

    entries
}

pub fn render_diff(entries: &[DiffEntry]) -> String {
    entries
        .iter()
        .map(|entry| match &entry.original {
            Some(original) => format!("[{}] {} <- {}", entry.kind, entry.current, original),
            None => format!("[{}] {} (new)", entry.kind, entry.current),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn diff(
    config: &Config,
    previous_path: &Path,
    current_path: &Path,
    format: Option<OutputFormat>,
) -> Result<()> {
    let previous = super::load_recipe(previous_path)?;
    let current = super::load_recipe(current_path)?;
    let entries = diff_recipes(&previous, &current);

    match format.unwrap_or(config.output.format) {
        OutputFormat::Text => println!("{}", render_diff(&entries)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    Ok(())
}
