pub mod parse;
pub mod types;

pub use parse::{parse_schema, ParsedSchema, SchemaError};
pub use types::{DataType, FieldSpec, Schema, Width};
