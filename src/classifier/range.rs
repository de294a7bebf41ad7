//! Range-specification tokenizer.
//!
//! Normal ranges arrive as free text in one of three shapes:
//! - simple interval: `"5-15"`, `"4.5-5.9"` (either order)
//! - gender-partitioned: `"Male: 4.5-5.9, Female: 4.1-5.5"`
//! - age-partitioned: `"0-12 years: 50-150, 12-18 years: 70-170"`
//!
//! `RangeSpec::parse` gives the context-free structural view used for
//! catalog validation. Patient-dependent selection lives in `shape`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::value::parse_number;
use crate::models::{Gender, ResultStatus};

/// `<ageMin>-<ageMax> years: <min>-<max>`; bounds may be negative decimals.
static RE_AGE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)-(\d+)\s*years:\s*(-?\d+(?:\.\d+)?)-(-?\d+(?:\.\d+)?)").unwrap()
});

/// Closed numeric interval. Values on either bound are `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    /// Interval from two bounds in either order.
    pub fn ordered(a: f64, b: f64) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Interval with bounds taken as written.
    pub fn literal(min: f64, max: f64) -> Self {
        Self {
            low: min,
            high: max,
        }
    }

    /// Parse `"<a>-<b>"`. Exactly one dash is accepted, so negative bounds
    /// are not representable in this shape.
    pub fn parse_simple(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split('-').collect();
        let [a, b] = parts.as_slice() else {
            return None;
        };
        Some(Self::ordered(parse_number(a)?, parse_number(b)?))
    }

    pub fn compare(&self, value: f64) -> ResultStatus {
        if value < self.low {
            ResultStatus::Low
        } else if value > self.high {
            ResultStatus::High
        } else {
            ResultStatus::Normal
        }
    }
}

/// One `"<Gender>: <interval>"` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderClause {
    pub gender: Gender,
    /// `None` when the text after the colon is not a simple interval.
    pub interval: Option<Interval>,
}

/// One `"<ageMin>-<ageMax> years: <min>-<max>"` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBracket {
    pub age_min: u32,
    pub age_max: u32,
    pub bounds: Interval,
}

impl AgeBracket {
    pub fn parse(clause: &str) -> Option<Self> {
        let caps = RE_AGE_CLAUSE.captures(clause)?;
        Some(Self {
            age_min: caps[1].parse().ok()?,
            age_max: caps[2].parse().ok()?,
            bounds: Interval::literal(caps[3].parse().ok()?, caps[4].parse().ok()?),
        })
    }

    /// Inclusive on both ends.
    pub fn contains_age(&self, age: u32) -> bool {
        self.age_min <= age && age <= self.age_max
    }
}

/// Comma-separated clauses, trimmed.
pub fn clauses(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim)
}

/// Interval text of the first clause starting with `"<gender>:"`
/// (case-insensitive). `None` if no clause matches or the text after the
/// colon is empty.
pub fn gender_clause_text(text: &str, gender: Gender) -> Option<&str> {
    let prefix = format!("{}:", gender.as_str().to_lowercase());
    let clause = clauses(text).find(|c| c.to_lowercase().starts_with(&prefix))?;
    let (_, rest) = clause.split_once(':')?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

/// Structural view of a range specification, independent of any patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "clauses", rename_all = "snake_case")]
pub enum RangeSpec {
    Simple(Interval),
    GenderPartitioned(Vec<GenderClause>),
    AgePartitioned(Vec<AgeBracket>),
    Unparseable,
}

impl RangeSpec {
    /// Classify the text with the same preconditions the classifier applies:
    /// gender clauses need a comma, age clauses need the word "years".
    pub fn parse(text: &str) -> Self {
        if text.contains(',') {
            let found: Vec<GenderClause> = [Gender::Male, Gender::Female]
                .into_iter()
                .filter_map(|gender| {
                    gender_clause_text(text, gender).map(|t| GenderClause {
                        gender,
                        interval: Interval::parse_simple(t),
                    })
                })
                .collect();
            if !found.is_empty() {
                return Self::GenderPartitioned(found);
            }
        }

        if text.contains("years") {
            let brackets: Vec<AgeBracket> = clauses(text).filter_map(AgeBracket::parse).collect();
            if !brackets.is_empty() {
                return Self::AgePartitioned(brackets);
            }
        }

        match Interval::parse_simple(text) {
            Some(interval) => Self::Simple(interval),
            None => Self::Unparseable,
        }
    }

    /// Whether at least one patient could get a definite status from it.
    pub fn is_recognized(&self) -> bool {
        match self {
            Self::Simple(_) | Self::AgePartitioned(_) => true,
            Self::GenderPartitioned(clauses) => clauses.iter().any(|c| c.interval.is_some()),
            Self::Unparseable => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple",
            Self::GenderPartitioned(_) => "gender_partitioned",
            Self::AgePartitioned(_) => "age_partitioned",
            Self::Unparseable => "unparseable",
        }
    }
}
