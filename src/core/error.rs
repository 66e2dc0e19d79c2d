use thiserror::Error;

use super::types::FieldType;

/// Violations of the entity-schema invariants.
///
/// Kept separate from [`DbError`] and `Clone` so a memoized validation
/// outcome can be handed out on every later schema lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{0} is an invalid primary key type. Use Integer, Text or Blob")]
    InvalidKeyType(FieldType),

    #[error("No primary key found in '{0}'. Exactly one column must be marked")]
    NoPrimaryKey(String),

    #[error("Found more than one primary key in '{entity}': {columns:?}. Exactly one column must be marked")]
    MultiplePrimaryKeys { entity: String, columns: Vec<String> },

    #[error("Column '{column}' is declared more than once in '{entity}'")]
    DuplicateColumn { entity: String, column: String },

    #[error("Entity name '{0}' is not a valid table name")]
    InvalidEntityName(String),
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Column '{column}' of '{entity}' is missing or has the wrong type. Expected: {expected}")]
    MissingOrMistypedField {
        entity: String,
        column: String,
        expected: String,
    },

    #[error("'{entity}' received arguments it does not use: {positional} positional, named {named:?}")]
    UnusedArguments {
        entity: String,
        positional: usize,
        named: Vec<String>,
    },

    #[error("Template placeholder '{{{0}}}' is not a declared parameter")]
    UnknownPlaceholder(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
