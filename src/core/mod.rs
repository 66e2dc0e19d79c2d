pub mod error;
pub mod types;
pub mod value;

pub use error::{DbError, Result, SchemaError};
pub use types::{EntitySchema, FieldKind, FieldSpec, FieldType, PrimaryKey, Row};
pub use value::{DATE_FORMAT, DATETIME_FORMAT, Value};
