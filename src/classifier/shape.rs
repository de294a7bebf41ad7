use super::range::{clauses, gender_clause_text, AgeBracket, Interval};
use crate::models::{Gender, ResultStatus};

/// The interpretation of a range string chosen for one patient.
///
/// Selection order is fixed: gender clause, then age bracket, then the
/// whole string as a simple interval. A partitioned string whose clauses
/// don't cover the patient falls through to the simple-interval attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeShape {
    Gender {
        gender: Gender,
        interval: Option<Interval>,
    },
    Age(AgeBracket),
    Simple(Interval),
    Unparseable,
}

impl RangeShape {
    pub fn evaluate(&self, value: f64) -> ResultStatus {
        match self {
            Self::Gender {
                interval: Some(interval),
                ..
            }
            | Self::Simple(interval) => interval.compare(value),
            Self::Age(bracket) => bracket.bounds.compare(value),
            Self::Gender { interval: None, .. } | Self::Unparseable => ResultStatus::Undetermined,
        }
    }
}

pub fn select_shape(normal_range: &str, age: Option<u32>, gender: Option<Gender>) -> RangeShape {
    if normal_range.contains(',') {
        if let Some(gender) = gender {
            if let Some(text) = gender_clause_text(normal_range, gender) {
                return RangeShape::Gender {
                    gender,
                    interval: Interval::parse_simple(text),
                };
            }
        }
    }

    // Age 0 counts as absent.
    if normal_range.contains("years") {
        if let Some(age) = age.filter(|&a| a > 0) {
            let bracket = clauses(normal_range)
                .filter_map(AgeBracket::parse)
                .find(|b| b.contains_age(age));
            if let Some(bracket) = bracket {
                return RangeShape::Age(bracket);
            }
        }
    }

    match Interval::parse_simple(normal_range) {
        Some(interval) => RangeShape::Simple(interval),
        None => RangeShape::Unparseable,
    }
}
