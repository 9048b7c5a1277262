pub mod error;
pub mod filter;
pub mod types;
pub mod update;

pub use error::SqlError;
pub use filter::CompanyFilter;
pub use types::SqlResult;
pub use update::{update_set, ColumnMap};
