pub mod enums;
pub mod lab;
pub mod patient;

pub use enums::*;
pub use lab::*;
pub use patient::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
