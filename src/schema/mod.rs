pub mod arrow;
pub mod registry;
pub mod types;

pub use self::arrow::{build_arrow_field, build_arrow_schema, map_to_arrow_type};
pub use registry::{all_schemas, lookup, table_name_for_path, table_names};
pub use types::{SemanticType, TableSchema};
