//! Everything an application needs to declare entities and wire a DAO.
//!
//! ```
//! use roomdb::prelude::*;
//! ```

pub use crate::{
    Args, Dao, Database, DatabaseConfig, DbError, EntityInstance, FieldType, InsertBinding,
    QueryBinding, Result, Row, Schema, TemplateArgs, Value, entity, template_args,
};
