use tracing::debug;

use crate::core::{Result, Value};
use crate::entity::{EntityInstance, Schema};
use crate::facade::Database;
use crate::statement;

/// Capability handle bound to one [`Database`].
///
/// Application DAOs hold one of these next to their bindings and pass it to
/// [`QueryBinding::call`](crate::QueryBinding::call) and
/// [`InsertBinding::call`](crate::InsertBinding::call).
#[derive(Clone, Copy)]
pub struct Dao<'db> {
    db: &'db Database,
}

impl<'db> Dao<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &'db Database {
        self.db
    }

    /// Looks `name` up in the SQLite catalog.
    ///
    /// Inspection only; bindings create their tables with an idempotent
    /// CREATE and never consult this.
    pub fn check_table_exists(&self, name: &str) -> Result<bool> {
        let result = self.db.query_with(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            &[Value::from(name)],
        )?;
        let count = result
            .rows
            .first()
            .and_then(|row| row.first())
            .and_then(Value::as_i64)
            .unwrap_or(0);
        Ok(count > 0)
    }

    /// Creates the entity's table unless it already exists.
    pub fn create_table<E: Schema>(&self) -> Result<()> {
        let schema = E::schema()?;
        debug!(table = schema.table_name(), "ensure table");
        self.db.execute(&statement::create_table_sql(schema), &[])?;
        Ok(())
    }

    /// Rewrites the row whose key equals the instance's key, returning the
    /// number of rows changed.
    pub fn update<E: Schema>(&self, instance: &EntityInstance<E>) -> Result<usize> {
        self.create_table::<E>()?;
        let stmt = instance.update_statement();
        self.db.execute(&stmt.sql, &stmt.params)
    }
}
