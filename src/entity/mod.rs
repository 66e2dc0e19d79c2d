//! Entity declaration and instance construction.
//!
//! An entity type implements [`Schema`], usually through the [`entity!`]
//! macro, and its values are [`EntityInstance`]s built from [`Args`].

mod args;
mod instance;
mod macros;

pub use args::Args;
pub use instance::EntityInstance;

use crate::core::{EntitySchema, SchemaError};

/// Capability of a mapped record type: it knows its validated column list.
///
/// Implementations derive and validate the schema once and hand out the
/// memoized result afterwards, including a memoized failure.
pub trait Schema: Sized + 'static {
    fn schema() -> Result<&'static EntitySchema, SchemaError>;

    fn table_name() -> Result<&'static str, SchemaError> {
        Ok(Self::schema()?.table_name())
    }
}
