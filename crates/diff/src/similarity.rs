//! String similarity for pairing elements of two recipe versions.

/// Minimum similarity for two ingredient names to count as the same ingredient.
pub const INGREDIENT_MATCH_THRESHOLD: f64 = 0.6;

/// Minimum similarity for two instructions to count as the same step.
///
/// Lower than the ingredient threshold: steps are sentences, and rewording a few
/// words moves the score a lot.
pub const STEP_MATCH_THRESHOLD: f64 = 0.5;

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// `1 - levenshtein(a, b) / max(len(a), len(b))` over normalized text, counted in chars.
///
/// Equal strings score 1.0; an empty string against a non-empty one scores 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }

    strsim::normalized_levenshtein(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("Eggs ", "eggs"), 1.0);
        assert_eq!(similarity("", "flour"), 0.0);
        assert_eq!(similarity("", "  "), 1.0);
    }

    #[test]
    fn test_similarity_ratio() {
        assert_eq!(similarity("salt", "malt"), 0.75);
        assert_eq!(similarity("parmesan", "parmigiano"), 0.6);
        assert!((similarity("sugar", "sugars") - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_counts_chars_not_bytes() {
        assert_eq!(similarity("crème", "creme"), 0.8);
    }
}
