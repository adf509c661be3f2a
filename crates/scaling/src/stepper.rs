//! Unit stepping: keep the displayed number in a range a cook reads at a glance.
//!
//! Rules (closed set, cooking convention):
//! - cup -> tbsp below ¼ cup
//! - tbsp -> tsp below 1 tbsp
//! - tsp -> tbsp from 3 tsp
//! - tbsp -> cup from 4 tbsp
//! - g -> kg from 1000 g
//! - ml -> l from 1000 ml
//!
//! Step-down runs before step-up so an amount settles on one unit instead of
//! bouncing between two.

use crate::unit::{self, UnitClass};

#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub amount: f64,
    pub unit: String,
}

impl Measure {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }
}

struct StepRule {
    from: &'static str,
    to: &'static str,
    threshold: f64,
}

const STEP_DOWN: [StepRule; 2] = [
    StepRule {
        from: "cup",
        to: "tbsp",
        threshold: 0.25,
    },
    StepRule {
        from: "tbsp",
        to: "tsp",
        threshold: 1.0,
    },
];

const STEP_UP: [StepRule; 4] = [
    StepRule {
        from: "tsp",
        to: "tbsp",
        threshold: 3.0,
    },
    StepRule {
        from: "tbsp",
        to: "cup",
        threshold: 4.0,
    },
    StepRule {
        from: "g",
        to: "kg",
        threshold: 1000.0,
    },
    StepRule {
        from: "ml",
        to: "l",
        threshold: 1000.0,
    },
];

fn apply(measure: Measure, rules: &[StepRule], fires: impl Fn(f64, f64) -> bool) -> Measure {
    let mut current = measure;

    // Rules chain (cup -> tbsp -> tsp) but never loop, so one pass per rule is enough.
    for _ in 0..rules.len() {
        let Some(canonical) = unit::canonical_unit(&current.unit) else {
            break;
        };

        let next = rules
            .iter()
            .filter(|rule| rule.from == canonical && fires(current.amount, rule.threshold))
            .find_map(|rule| {
                unit::convert(current.amount, rule.from, rule.to)
                    .map(|amount| Measure::new(amount, rule.to))
            });

        match next {
            Some(stepped) => {
                tracing::trace!(
                    from = %current.unit,
                    to = %stepped.unit,
                    amount = stepped.amount,
                    "unit stepped"
                );
                current = stepped;
            }
            None => break,
        }
    }

    current
}

/// Move to a smaller unit while the amount is below the rule threshold.
pub fn step_down(measure: Measure) -> Measure {
    apply(measure, &STEP_DOWN, |amount, threshold| amount < threshold)
}

/// Move to a larger unit while the amount reaches the rule threshold.
pub fn step_up(measure: Measure) -> Measure {
    apply(measure, &STEP_UP, |amount, threshold| amount >= threshold)
}

/// Step down, then up. Count and unknown units are returned untouched.
pub fn step(amount: f64, unit: &str) -> Measure {
    let measure = Measure::new(amount, unit);

    match unit::classify(unit) {
        UnitClass::Volume | UnitClass::Weight => step_up(step_down(measure)),
        UnitClass::Count | UnitClass::Unknown => measure,
    }
}
