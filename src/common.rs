pub mod error;
pub use error::AppError;
pub mod query;
pub use query::{PageQuery, Pagination};
