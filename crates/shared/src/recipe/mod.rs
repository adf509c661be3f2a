use serde::{Deserialize, Deserializer, Serialize};

/// One ingredient as the author wrote it.
///
/// `amount` is kept as raw text ("1 1/2", "2½", "0.5") and only interpreted by the
/// scaling engine. A missing or blank amount marks a quantity-free line such as
/// "salt to taste".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    #[serde(default, deserialize_with = "amount_text")]
    pub amount: Option<String>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub preparation: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, amount: Option<&str>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.map(str::to_owned),
            unit: unit.into(),
            preparation: None,
            optional: false,
        }
    }

    pub fn with_preparation(mut self, preparation: impl Into<String>) -> Self {
        self.preparation = Some(preparation.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// True when the line carries a non-blank amount.
    pub fn has_amount(&self) -> bool {
        self.amount.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<IngredientLine>,
}

impl IngredientGroup {
    pub fn new(name: impl Into<String>, items: Vec<IngredientLine>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub instruction: String,
}

impl RecipeStep {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }
}

/// Author-declared serving counts. `min`/`max` bound what a reader may pick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Servings {
    pub original: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Default for Servings {
    fn default() -> Self {
        Self {
            original: 1.0,
            min: None,
            max: None,
        }
    }
}

/// A full recipe version as loaded from disk or handed over by the recipe UI.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub servings: Servings,
    /// Set for baking, confectionery, fermentation and similar recipes where
    /// friendly rounding would hurt the result.
    #[serde(default)]
    pub requires_precision: bool,
    #[serde(default)]
    pub ingredient_groups: Vec<IngredientGroup>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(f64),
}

// Recipe exports write amounts either as strings or as bare JSON numbers.
fn amount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;

    Ok(raw.map(|raw| match raw {
        RawAmount::Text(text) => text,
        RawAmount::Number(value) => value.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_amount_blank_and_missing() {
        assert!(!IngredientLine::new("salt", None, "to taste").has_amount());
        assert!(!IngredientLine::new("salt", Some("   "), "").has_amount());
        assert!(IngredientLine::new("flour", Some("1 1/2"), "cups").has_amount());
    }

    #[test]
    fn test_deserialize_amount_as_number_or_text() {
        let json = r#"{
            "name": "Pancakes",
            "servings": { "original": 4 },
            "ingredient_groups": [
                { "name": "Batter", "items": [
                    { "name": "flour", "amount": 1.5, "unit": "cups" },
                    { "name": "eggs", "amount": "2" },
                    { "name": "salt", "unit": "pinch", "optional": true }
                ] }
            ],
            "steps": [ { "instruction": "Whisk everything." } ]
        }"#;

        let recipe: RecipeDocument = serde_json::from_str(json).unwrap();
        let items = &recipe.ingredient_groups[0].items;

        assert_eq!(recipe.servings.original, 4.0);
        assert!(!recipe.requires_precision);
        assert_eq!(items[0].amount.as_deref(), Some("1.5"));
        assert_eq!(items[1].amount.as_deref(), Some("2"));
        assert_eq!(items[1].unit, "");
        assert_eq!(items[2].amount, None);
        assert!(items[2].optional);
        assert_eq!(recipe.steps[0].instruction, "Whisk everything.");
    }
}
