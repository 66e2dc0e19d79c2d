// ============================================================================
// roomdb Library
// ============================================================================

//! Declarative entity mapping over SQLite.
//!
//! An entity declares typed fields, exactly one of them the primary key, and
//! gets its `CREATE TABLE`, `INSERT` and `UPDATE` statements derived from
//! that declaration. DAO operations are wired explicitly from two binding
//! kinds: [`QueryBinding`] (literal template substitution) and
//! [`InsertBinding`] (bound-parameter bulk insert).
//!
//! ```
//! use roomdb::{Args, Database, InsertBinding, QueryBinding, Value, entity};
//!
//! entity! {
//!     pub struct Food {
//!         uid: PrimaryKey(Integer),
//!         name: Text,
//!         calories: Real,
//!     }
//! }
//!
//! # fn main() -> roomdb::Result<()> {
//! let db = Database::open_in_memory()?;
//! let dao = db.dao();
//!
//! let insert = InsertBinding::<Food>::new()?;
//! let all_food = QueryBinding::<Food>::new("SELECT * FROM {table}")?;
//!
//! insert.call(&dao, &[Food::build(Args::new().arg(1).arg("Apple").arg(52.0))?])?;
//! assert_eq!(
//!     all_food.call(&dao, &())?,
//!     vec![vec![Value::Integer(1), Value::Text("Apple".into()), Value::Real(52.0)]]
//! );
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod connection;
pub mod core;
pub mod entity;
pub mod facade;
pub mod prelude;
pub mod result;
pub mod statement;

// Re-export main types for convenience
pub use binding::{InsertBinding, QueryBinding, TemplateArgs};
pub use connection::{DatabaseConfig, Target};
pub use crate::core::{
    DbError, EntitySchema, FieldKind, FieldSpec, FieldType, PrimaryKey, Result, Row, SchemaError,
    Value,
};
pub use entity::{Args, EntityInstance, Schema};
pub use facade::{Dao, Database};
pub use result::QueryResult;
pub use statement::Statement;

#[doc(hidden)]
pub mod __private {
    pub use lazy_static::lazy_static;
}
