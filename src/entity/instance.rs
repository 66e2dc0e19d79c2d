use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

use super::{Args, Schema};
use crate::core::{DbError, EntitySchema, Result, Value};
use crate::statement::{self, Statement};

/// Validated, immutable values of one entity, stored in column order.
pub struct EntityInstance<E: Schema> {
    schema: &'static EntitySchema,
    values: Vec<Value>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Schema> EntityInstance<E> {
    /// Builds an instance from positional and named arguments.
    ///
    /// Columns are filled in declaration order. A named argument with the
    /// column's name and type wins; otherwise the next unconsumed positional
    /// argument is taken if its type matches. A named argument of the wrong
    /// type does not fail on its own, the positional source is still tried.
    /// Arguments left over once every column is filled are rejected.
    pub fn new(args: Args) -> Result<Self> {
        let schema = E::schema()?;
        let (positional, mut named) = args.into_parts();
        let mut positional: VecDeque<Value> = positional.into();
        let mut values = Vec::with_capacity(schema.column_count());

        for column in schema.columns() {
            let named_match = named
                .iter()
                .position(|(name, value)| name == column.name() && column.accepts(value));

            let value = match named_match {
                Some(idx) => Some(named.remove(idx).1),
                None if positional.front().is_some_and(|v| column.accepts(v)) => {
                    positional.pop_front()
                }
                None => None,
            };
            values.push(value.ok_or_else(|| missing(schema, column.name()))?);
        }

        if !positional.is_empty() || !named.is_empty() {
            return Err(DbError::UnusedArguments {
                entity: schema.entity().to_string(),
                positional: positional.len(),
                named: named.into_iter().map(|(name, _)| name).collect(),
            });
        }

        Ok(Self {
            schema,
            values,
            _entity: PhantomData,
        })
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    /// Values in column declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.schema
            .find_column_index(column)
            .map(|idx| &self.values[idx])
    }

    pub fn primary_key_value(&self) -> &Value {
        &self.values[self.schema.primary_key_index()]
    }

    pub fn insert_statement(&self) -> Statement {
        statement::insert(self)
    }

    pub fn update_statement(&self) -> Statement {
        statement::update(self)
    }
}

fn missing(schema: &EntitySchema, column: &str) -> DbError {
    DbError::MissingOrMistypedField {
        entity: schema.entity().to_string(),
        column: column.to_string(),
        expected: schema.to_string(),
    }
}

impl<E: Schema> Clone for EntityInstance<E> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema,
            values: self.values.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Schema> PartialEq for EntityInstance<E> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<E: Schema> fmt::Debug for EntityInstance<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (column, value) in self.schema.columns().iter().zip(&self.values) {
            map.entry(&column.name(), value);
        }
        map.finish()
    }
}

/// `<Food: uid=1, name="Apple", calories=52.0>`
impl<E: Schema> fmt::Display for EntityInstance<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: ", self.schema.entity())?;
        for (idx, (column, value)) in self.schema.columns().iter().zip(&self.values).enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            if value.is_bare() {
                write!(f, "{}={}", column.name(), value)?;
            } else {
                write!(f, "{}=\"{}\"", column.name(), value)?;
            }
        }
        write!(f, ">")
    }
}
