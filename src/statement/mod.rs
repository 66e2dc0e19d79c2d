//! SQL text generation for mapped entities.
//!
//! Statements are formatted on every call from the live schema and values;
//! nothing is prepared ahead of time or cached here. Table and column names
//! are always backtick-quoted, so keywords such as `Order` work as names.

mod literal;

pub use literal::{quote_identifier, sql_escape_string, sql_literal};

use crate::core::{EntitySchema, Value};
use crate::entity::{EntityInstance, Schema};

/// Statement text together with the values bound to its `?` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
    placeholders: usize,
}

impl Statement {
    /// Number of `?` parameters the generator emitted. Question marks inside
    /// literals are not counted.
    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }
}

/// ``CREATE TABLE IF NOT EXISTS `Food`(`uid` INT, `name` TEXT, ...)``
pub fn create_table_sql(schema: &EntitySchema) -> String {
    let columns: Vec<String> = schema
        .columns()
        .iter()
        .map(|col| format!("{} {}", quote_identifier(col.name()), col.sql_type()))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {}({})",
        quote_identifier(schema.table_name()),
        columns.join(", ")
    )
}

/// ``INSERT INTO `Food` VALUES (?, ?, ...)``, one placeholder per column.
pub fn insert_sql(schema: &EntitySchema) -> String {
    let placeholders = vec!["?"; schema.column_count()];
    format!(
        "INSERT INTO {} VALUES ({})",
        quote_identifier(schema.table_name()),
        placeholders.join(", ")
    )
}

/// INSERT text with the instance's values bound in column order.
pub fn insert<E: Schema>(instance: &EntityInstance<E>) -> Statement {
    let schema = instance.schema();
    Statement {
        sql: insert_sql(schema),
        params: instance.values().to_vec(),
        placeholders: schema.column_count(),
    }
}

/// ``UPDATE `Food` SET `uid` = ?, `name` = ? WHERE `uid` = 1``
///
/// Every column, the key included, is a bound SET parameter. The WHERE
/// clause carries the key value captured now as a literal, so the parameter
/// count always equals the column count.
pub fn update<E: Schema>(instance: &EntityInstance<E>) -> Statement {
    let schema = instance.schema();
    let assignments: Vec<String> = schema
        .columns()
        .iter()
        .map(|col| format!("{} = ?", quote_identifier(col.name())))
        .collect();

    Statement {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = {}",
            quote_identifier(schema.table_name()),
            assignments.join(", "),
            quote_identifier(schema.primary_key().name()),
            sql_literal(instance.primary_key_value())
        ),
        params: instance.values().to_vec(),
        placeholders: assignments.len(),
    }
}
