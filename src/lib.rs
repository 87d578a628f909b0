pub mod config;
pub mod error;
pub mod fixture;
pub mod process;
pub mod schema;

pub use config::Config;
pub use error::ConvertError;
pub use process::{convert, convert_file, CoercedBatch};
pub use schema::{lookup, SemanticType, TableSchema};
