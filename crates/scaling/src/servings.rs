use serde::{Deserialize, Serialize};

use crate::error::{ScaleError, ScaleResult};
use crate::scaler::ScaleContext;

const SERVINGS_EPSILON: f64 = 1e-9;

/// Range and granularity the servings picker allows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServingsBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ServingsBounds {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 99.0,
            step: 0.5,
        }
    }
}

impl ServingsBounds {
    pub fn new(min: f64, max: f64, step: f64) -> ScaleResult<Self> {
        let bounds = Self { min, max, step };
        bounds.validate()?;

        Ok(bounds)
    }

    pub fn validate(&self) -> ScaleResult<()> {
        let valid = self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min > 0.0
            && self.max >= self.min
            && self.step > 0.0;

        if !valid {
            return Err(ScaleError::InvalidBounds {
                min: self.min,
                max: self.max,
                step: self.step,
            });
        }

        Ok(())
    }

    /// Intersect with a recipe's own limits. A recipe range that falls outside
    /// these bounds is ignored on that side.
    pub fn narrowed(&self, min: Option<f64>, max: Option<f64>) -> Self {
        let mut bounds = *self;

        if let Some(min) = min.filter(|min| *min > bounds.min && *min <= bounds.max) {
            bounds.min = min;
        }
        if let Some(max) = max.filter(|max| *max < bounds.max && *max >= bounds.min) {
            bounds.max = max;
        }

        bounds
    }

    pub fn clamp(&self, servings: f64) -> f64 {
        servings.max(self.min).min(self.max)
    }
}

/// Caller-side servings state: validates the counts handed to the scaler.
///
/// Starts at the recipe's own servings even when they sit outside `bounds`, so
/// an untouched selector always scales by 1×. Every change lands inside bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ServingsSelector {
    original: f64,
    current: f64,
    bounds: ServingsBounds,
}

impl ServingsSelector {
    pub fn new(original: f64, bounds: ServingsBounds) -> ScaleResult<Self> {
        if !original.is_finite() || original <= 0.0 {
            return Err(ScaleError::InvalidServings(original));
        }
        bounds.validate()?;

        Ok(Self {
            original,
            current: original,
            bounds,
        })
    }

    pub fn original(&self) -> f64 {
        self.original
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn bounds(&self) -> ServingsBounds {
        self.bounds
    }

    pub fn increment(&mut self) -> f64 {
        self.current = self.bounds.clamp(self.current + self.bounds.step);
        self.current
    }

    pub fn decrement(&mut self) -> f64 {
        self.current = self.bounds.clamp(self.current - self.bounds.step);
        self.current
    }

    pub fn reset(&mut self) -> f64 {
        self.current = self.original;
        self.current
    }

    /// Set the target servings, clamped into bounds. Non-finite input is ignored.
    pub fn set(&mut self, servings: f64) -> f64 {
        if servings.is_finite() {
            self.current = self.bounds.clamp(servings);
        }
        self.current
    }

    pub fn scale_factor(&self) -> f64 {
        self.current / self.original
    }

    pub fn is_scaled(&self) -> bool {
        (self.current - self.original).abs() > SERVINGS_EPSILON
    }

    pub fn context(&self, requires_precision: bool) -> ScaleContext {
        ScaleContext::new(self.original, self.current).with_precision(requires_precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_validation() {
        assert!(ServingsBounds::new(0.5, 99.0, 0.5).is_ok());
        assert!(ServingsBounds::new(0.0, 99.0, 0.5).is_err());
        assert!(ServingsBounds::new(4.0, 2.0, 0.5).is_err());
        assert_eq!(
            ServingsBounds::new(1.0, 2.0, 0.0),
            Err(ScaleError::InvalidBounds {
                min: 1.0,
                max: 2.0,
                step: 0.0
            })
        );
    }

    #[test]
    fn test_bounds_narrowed_by_recipe() {
        let bounds = ServingsBounds::default().narrowed(Some(2.0), Some(12.0));
        assert_eq!(bounds.min, 2.0);
        assert_eq!(bounds.max, 12.0);

        let ignored = ServingsBounds::default().narrowed(Some(0.1), Some(500.0));
        assert_eq!(ignored, ServingsBounds::default());
    }

    #[test]
    fn test_increment_and_decrement_stay_in_bounds() {
        let bounds = ServingsBounds::new(1.0, 5.0, 1.0).unwrap();
        let mut selector = ServingsSelector::new(4.0, bounds).unwrap();

        assert_eq!(selector.increment(), 5.0);
        assert_eq!(selector.increment(), 5.0);

        selector.set(1.5);
        assert_eq!(selector.decrement(), 1.0);
        assert_eq!(selector.decrement(), 1.0);
    }

    #[test]
    fn test_set_clamps_and_reset_restores() {
        let mut selector = ServingsSelector::new(4.0, ServingsBounds::default()).unwrap();

        assert_eq!(selector.set(250.0), 99.0);
        assert_eq!(selector.set(0.0), 0.5);
        assert_eq!(selector.set(f64::NAN), 0.5);
        assert!(selector.is_scaled());

        assert_eq!(selector.reset(), 4.0);
        assert!(!selector.is_scaled());
    }

    #[test]
    fn test_context_carries_factor_and_precision() {
        let mut selector = ServingsSelector::new(4.0, ServingsBounds::default()).unwrap();
        selector.set(6.0);

        let ctx = selector.context(true);
        assert_eq!(selector.scale_factor(), 1.5);
        assert_eq!(ctx.scale_factor(), 1.5);
        assert!(ctx.requires_precision);
    }

    #[test]
    fn test_original_outside_bounds_is_not_scaled() {
        let bounds = ServingsBounds::default().narrowed(Some(6.0), Some(12.0));
        let mut selector = ServingsSelector::new(4.0, bounds).unwrap();

        assert_eq!(selector.current(), 4.0);
        assert_eq!(selector.scale_factor(), 1.0);
        assert!(!selector.is_scaled());

        assert_eq!(selector.increment(), 6.0);
        assert_eq!(selector.reset(), 4.0);
        assert_eq!(selector.decrement(), 6.0);
    }

    #[test]
    fn test_invalid_original_servings() {
        assert_eq!(
            ServingsSelector::new(0.0, ServingsBounds::default()),
            Err(ScaleError::InvalidServings(0.0))
        );
    }
}
