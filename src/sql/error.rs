use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqlError {
    #[error("No data to update")]
    EmptyUpdate,

    #[error("minEmployees ({min}) cannot be greater than maxEmployees ({max})")]
    InvalidBounds { min: i64, max: i64 },
}
