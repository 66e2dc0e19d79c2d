use std::marker::PhantomData;

use tracing::debug;

use super::{Template, TemplateArgs};
use crate::core::{EntitySchema, Result, Row};
use crate::entity::Schema;
use crate::facade::Dao;
use crate::statement::quote_identifier;

/// Query operation bound to entity `E`, filled from argument record `A`.
///
/// The template is checked when the binding is defined: `{table}` becomes
/// the entity's backtick-quoted table name and every other `{name}` must be
/// one of `A::PARAMS`.
///
/// Substitution is textual. Each argument's display form is pasted into the
/// SQL as-is, with no quoting or escaping, so a value can change the shape
/// of the statement. Only pass trusted values; anything user-controlled
/// belongs in an [`InsertBinding`](crate::InsertBinding) or in
/// [`Database::query_with`](crate::Database::query_with) parameters.
pub struct QueryBinding<E: Schema, A: TemplateArgs = ()> {
    schema: &'static EntitySchema,
    template: Template,
    _bound: PhantomData<fn(&A) -> E>,
}

impl<E: Schema, A: TemplateArgs> QueryBinding<E, A> {
    pub fn new(template: &str) -> Result<Self> {
        let schema = E::schema()?;
        let template = Template::parse(template, A::PARAMS)?;
        Ok(Self {
            schema,
            template,
            _bound: PhantomData,
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Formats the statement this binding would run for `args`.
    pub fn sql(&self, args: &A) -> Result<String> {
        let table = quote_identifier(self.schema.table_name());
        self.template.render(&table, |name| args.value(name))
    }

    /// Ensures the table exists, runs the query and returns every row.
    pub fn call(&self, dao: &Dao<'_>, args: &A) -> Result<Vec<Row>> {
        dao.create_table::<E>()?;
        let sql = self.sql(args)?;
        debug!(entity = self.schema.entity(), %sql, "query binding");
        let result = dao.database().query(&sql)?;
        Ok(result.into_rows())
    }
}
