pub mod analysis;
pub mod dose;
pub mod enums;

pub use analysis::*;
pub use dose::*;
pub use enums::*;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("Invalid value {value:?} for {field}")]
    InvalidEnum { field: String, value: String },
}
