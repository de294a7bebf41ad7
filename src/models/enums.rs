use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(ResultStatus {
    Normal => "Normal",
    High => "High",
    Low => "Low",
    Undetermined => "Unable to determine",
});

str_enum!(PresentationTag {
    Ok => "ok",
    High => "high",
    Low => "low",
    Unknown => "unknown",
});

// Matched exactly: "male" or "Other" never select a gender clause.
str_enum!(Gender {
    Male => "Male",
    Female => "Female",
});

impl ResultStatus {
    /// Display category used by report views for styling.
    pub fn presentation_tag(&self) -> PresentationTag {
        match self {
            Self::Normal => PresentationTag::Ok,
            Self::High => PresentationTag::High,
            Self::Low => PresentationTag::Low,
            Self::Undetermined => PresentationTag::Unknown,
        }
    }

    pub fn is_abnormal(&self) -> bool {
        matches!(self, Self::High | Self::Low)
    }
}

impl Gender {
    /// Read a free-text patient gender field. Anything other than the exact
    /// strings "Male" and "Female" is treated as absent.
    pub fn from_patient_field(field: Option<&str>) -> Option<Self> {
        field.and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn result_status_round_trip() {
        for (variant, s) in [
            (ResultStatus::Normal, "Normal"),
            (ResultStatus::High, "High"),
            (ResultStatus::Low, "Low"),
            (ResultStatus::Undetermined, "Unable to determine"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ResultStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn presentation_tag_round_trip() {
        for (variant, s) in [
            (PresentationTag::Ok, "ok"),
            (PresentationTag::High, "high"),
            (PresentationTag::Low, "low"),
            (PresentationTag::Unknown, "unknown"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(PresentationTag::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn status_serializes_to_display_literal() {
        let json = serde_json::to_string(&ResultStatus::Undetermined).unwrap();
        assert_eq!(json, "\"Unable to determine\"");
        let back: ResultStatus = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(back, ResultStatus::High);
    }

    #[test]
    fn status_maps_to_tag() {
        assert_eq!(ResultStatus::Normal.presentation_tag(), PresentationTag::Ok);
        assert_eq!(ResultStatus::High.presentation_tag(), PresentationTag::High);
        assert_eq!(ResultStatus::Low.presentation_tag(), PresentationTag::Low);
        assert_eq!(
            ResultStatus::Undetermined.presentation_tag(),
            PresentationTag::Unknown
        );
    }

    #[test]
    fn only_high_and_low_are_abnormal() {
        assert!(ResultStatus::High.is_abnormal());
        assert!(ResultStatus::Low.is_abnormal());
        assert!(!ResultStatus::Normal.is_abnormal());
        assert!(!ResultStatus::Undetermined.is_abnormal());
    }

    #[test]
    fn gender_is_case_sensitive() {
        assert_eq!(Gender::from_patient_field(Some("Male")), Some(Gender::Male));
        assert_eq!(
            Gender::from_patient_field(Some("Female")),
            Some(Gender::Female)
        );
        assert_eq!(Gender::from_patient_field(Some("male")), None);
        assert_eq!(Gender::from_patient_field(Some("Other")), None);
        assert_eq!(Gender::from_patient_field(None), None);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(ResultStatus::from_str("normal").is_err());
        assert!(Gender::from_str("").is_err());
        let err = PresentationTag::from_str("green").unwrap_err();
        assert_eq!(err.to_string(), "Invalid enum value for PresentationTag: green");
    }
}
