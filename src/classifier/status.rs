use super::shape::select_shape;
use crate::models::{Gender, MeasurementValue, PresentationTag, ResultStatus};

/// Classify a lab result against its normal range.
///
/// Total over its inputs: a value that is not a number, or a range that
/// matches no recognized shape for this patient, yields
/// [`ResultStatus::Undetermined`]. `age` and `gender` are consulted only
/// when the range text is partitioned by them.
pub fn classify(
    value: impl Into<MeasurementValue>,
    normal_range: &str,
    age: Option<u32>,
    gender: Option<Gender>,
) -> ResultStatus {
    let value: MeasurementValue = value.into();
    let Some(value) = value.as_f64() else {
        return ResultStatus::Undetermined;
    };
    select_shape(normal_range, age, gender).evaluate(value)
}

/// Map a status string to its display category. Unknown text maps to
/// [`PresentationTag::Unknown`].
pub fn status_to_presentation_tag(status: &str) -> PresentationTag {
    status
        .parse::<ResultStatus>()
        .map(|s| s.presentation_tag())
        .unwrap_or(PresentationTag::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GENDERED: &str = "Male: 4.5-5.9, Female: 4.1-5.5";
    const AGED: &str = "0-12 years: 50-150, 12-18 years: 70-170";

    #[test]
    fn simple_interval() {
        assert_eq!(classify(4, "5-15", None, None), ResultStatus::Low);
        assert_eq!(classify(10, "5-15", None, None), ResultStatus::Normal);
        assert_eq!(classify(16, "5-15", None, None), ResultStatus::High);
        assert_eq!(classify("5.9", "4.5-5.9", None, None), ResultStatus::Normal);
    }

    #[test]
    fn non_numeric_value_is_undetermined() {
        assert_eq!(classify("abc", "5-15", None, None), ResultStatus::Undetermined);
        assert_eq!(classify("", "5-15", None, None), ResultStatus::Undetermined);
        assert_eq!(classify("  ", "5-15", None, None), ResultStatus::Undetermined);
        assert_eq!(
            classify(f64::NAN, "5-15", None, None),
            ResultStatus::Undetermined
        );
    }

    #[test]
    fn infinite_values_compare_past_bounds() {
        assert_eq!(classify(f64::INFINITY, "5-15", None, None), ResultStatus::High);
        assert_eq!(
            classify(f64::NEG_INFINITY, "5-15", None, None),
            ResultStatus::Low
        );
        assert_eq!(classify("inf", "5-15", None, None), ResultStatus::High);
    }

    #[test]
    fn gender_clause_selection() {
        // 5.0 sits inside both the male and the female interval.
        assert_eq!(
            classify(5.0, GENDERED, None, Some(Gender::Female)),
            ResultStatus::Normal
        );
        assert_eq!(
            classify(5.0, GENDERED, None, Some(Gender::Male)),
            ResultStatus::Normal
        );
        assert_eq!(
            classify(5.7, GENDERED, None, Some(Gender::Female)),
            ResultStatus::High
        );
        assert_eq!(
            classify(4.3, GENDERED, None, Some(Gender::Male)),
            ResultStatus::Low
        );
    }

    #[test]
    fn age_clause_selection() {
        assert_eq!(classify(100, AGED, Some(10), None), ResultStatus::Normal);
        assert_eq!(classify(60, AGED, Some(15), None), ResultStatus::Low);
        assert_eq!(classify(171, AGED, Some(15), None), ResultStatus::High);
    }

    #[test]
    fn age_bounds_may_be_negative() {
        let range = "0-17 years: -1.5-1, 18-120 years: -2.5-2";
        assert_eq!(classify(-2.0, range, Some(40), None), ResultStatus::Normal);
        assert_eq!(classify(-2.0, range, Some(10), None), ResultStatus::Low);
    }

    #[test]
    fn missing_disambiguator_is_undetermined() {
        assert_eq!(classify(10, GENDERED, None, None), ResultStatus::Undetermined);
        assert_eq!(classify(100, AGED, None, None), ResultStatus::Undetermined);
        assert_eq!(classify(100, AGED, Some(0), None), ResultStatus::Undetermined);
    }

    #[test]
    fn malformed_ranges_are_undetermined() {
        for range in ["N/A", "", "5 to 15", "-5-5", "<5", "Male: 4.5-5.9"] {
            assert_eq!(
                classify(5, range, Some(30), Some(Gender::Male)),
                ResultStatus::Undetermined,
                "range {range:?}"
            );
        }
    }

    #[test]
    fn presentation_tags() {
        assert_eq!(status_to_presentation_tag("Normal"), PresentationTag::Ok);
        assert_eq!(status_to_presentation_tag("High"), PresentationTag::High);
        assert_eq!(status_to_presentation_tag("Low"), PresentationTag::Low);
        assert_eq!(
            status_to_presentation_tag("Unable to determine"),
            PresentationTag::Unknown
        );
        assert_eq!(status_to_presentation_tag("normal"), PresentationTag::Unknown);
        assert_eq!(status_to_presentation_tag(""), PresentationTag::Unknown);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn interval_classification(
            lo in -1000i32..1000,
            width in 1i32..1000,
            value in -3000.0f64..3000.0,
        ) {
            // Negative bounds add dashes, so keep the range non-negative.
            let lo = lo.abs();
            let hi = lo + width;
            let range = format!("{lo}-{hi}");
            let expected = if value < f64::from(lo) {
                ResultStatus::Low
            } else if value > f64::from(hi) {
                ResultStatus::High
            } else {
                ResultStatus::Normal
            };
            prop_assert_eq!(classify(value, &range, None, None), expected);
        }

        #[test]
        fn interval_order_independent(
            a in 0.0f64..500.0,
            b in 0.0f64..500.0,
            value in -100.0f64..600.0,
        ) {
            let forward = format!("{a}-{b}");
            let reverse = format!("{b}-{a}");
            prop_assert_eq!(
                classify(value, &forward, None, None),
                classify(value, &reverse, None, None)
            );
        }

        #[test]
        fn classify_is_idempotent(
            value in "[-0-9.a-z ]{0,8}",
            range in "[-0-9.,: a-zA-Z]{0,24}",
            age in proptest::option::of(0u32..120),
        ) {
            let first = classify(value.as_str(), &range, age, Some(Gender::Female));
            let second = classify(value.as_str(), &range, age, Some(Gender::Female));
            prop_assert_eq!(first, second);
        }
    }
}
