//! Lab-result status classification.
//!
//! A pure, total function of `(value, normal_range, age, gender)`. Every
//! malformed or ambiguous input collapses into
//! [`ResultStatus::Undetermined`](crate::models::ResultStatus::Undetermined);
//! nothing here returns an error or panics.

pub mod range;
pub mod shape;
pub mod status;
pub mod value;

pub use range::*;
pub use shape::*;
pub use status::*;
pub use value::*;
