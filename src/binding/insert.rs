use std::marker::PhantomData;

use tracing::info;

use crate::core::{EntitySchema, Result, Value};
use crate::entity::{EntityInstance, Schema};
use crate::facade::Dao;
use crate::statement;

/// Bulk insert operation bound to entity `E`.
///
/// Values always travel as bound parameters, never as SQL text.
pub struct InsertBinding<E: Schema> {
    schema: &'static EntitySchema,
    _bound: PhantomData<fn() -> E>,
}

impl<E: Schema> InsertBinding<E> {
    pub fn new() -> Result<Self> {
        Ok(Self {
            schema: E::schema()?,
            _bound: PhantomData,
        })
    }

    /// Ensures the table exists, then writes every instance in one
    /// transaction and commits. Returns the number of rows inserted.
    pub fn call(&self, dao: &Dao<'_>, instances: &[EntityInstance<E>]) -> Result<usize> {
        dao.create_table::<E>()?;
        let sql = statement::insert_sql(self.schema);
        let inserted = dao.database().execute_many(&sql, Self::params(instances))?;

        info!(entity = self.schema.entity(), inserted, "bulk insert committed");
        Ok(inserted)
    }

    /// Parameter tuples the next call would bind, one per instance.
    pub fn params(instances: &[EntityInstance<E>]) -> Vec<&[Value]> {
        instances.iter().map(|i| i.values()).collect()
    }
}
