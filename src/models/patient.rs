use serde::{Deserialize, Serialize};

use super::enums::Gender;

/// Patient record fields as supplied by the booking system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub age: Option<u32>,
    /// Free text; only "Male" and "Female" disambiguate gender ranges.
    pub gender: Option<String>,
}

/// The subset of a patient record the classifier consults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatientContext {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
}

impl Patient {
    pub fn context(&self) -> PatientContext {
        PatientContext {
            age: self.age,
            gender: Gender::from_patient_field(self.gender.as_deref()),
        }
    }
}
