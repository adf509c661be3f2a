use anyhow::{Result, bail};
use larder_scaling::{ScaleError, format_amount_with_unit, format_number, parse_amount};

/// Convert a free-text amount between two units of the same class.
///
/// Returns the rendered result ("240ml", "1.5 cups").
pub fn convert_amount(amount: &str, from: &str, to: &str) -> Result<String> {
    let value = parse_amount(amount);
    if value <= 0.0 {
        bail!("Invalid amount: {amount:?}");
    }

    let converted = larder_scaling::convert(value, from, to).ok_or_else(|| {
        ScaleError::UnconvertibleUnits {
            from: from.to_string(),
            to: to.to_string(),
        }
    })?;

    Ok(format_amount_with_unit(&format_number(converted), to))
}

pub fn convert(amount: &str, from: &str, to: &str) -> Result<()> {
    println!("{}", convert_amount(amount, from, to)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_amount() -> anyhow::Result<()> {
        assert_eq!(convert_amount("1", "cup", "ml")?, "240ml");
        assert_eq!(convert_amount("1 1/2", "tbsp", "tsp")?, "4.5 tsp");
        assert_eq!(convert_amount("2½", "kg", "g")?, "2500g");

        Ok(())
    }

    #[test]
    fn test_convert_amount_errors() {
        let err = convert_amount("1", "cup", "g").unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert cup to g");

        assert!(convert_amount("some", "cup", "ml").is_err());
        assert!(convert_amount("2", "cloves", "slices").is_err());
    }
}
