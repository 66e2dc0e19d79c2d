use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{SchemaError, Value};

/// A result row, one value per selected column.
pub type Row = Vec<Value>;

/// Semantic type of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Integer,
    Real,
    Text,
    Blob,
    Boolean,
    Date,
    DateTime,
}

impl FieldType {
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Integer => "INT",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Boolean => "BOOL",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
        }
    }

    /// Exact type match: no numeric widening, no bool-as-int.
    pub fn accepts(&self, value: &Value) -> bool {
        value.field_type() == Some(*self)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "Integer",
            Self::Real => "Real",
            Self::Text => "Text",
            Self::Blob => "Blob",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
        };
        write!(f, "{}", name)
    }
}

/// Identity marker. Only `Integer`, `Text` and `Blob` can identify a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimaryKey(FieldType);

impl PrimaryKey {
    pub fn new(key_type: FieldType) -> Result<Self, SchemaError> {
        match key_type {
            FieldType::Integer | FieldType::Text | FieldType::Blob => Ok(Self(key_type)),
            other => Err(SchemaError::InvalidKeyType(other)),
        }
    }

    pub fn key_type(&self) -> FieldType {
        self.0
    }

    pub fn sql_type(&self) -> &'static str {
        match self.0 {
            FieldType::Integer => "INT",
            FieldType::Text => "TEXT",
            FieldType::Blob => "BLOB",
            // unreachable through `new`
            other => other.sql_type(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Plain(FieldType),
    Key(PrimaryKey),
}

/// Declared name and semantic type of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Plain(field_type),
        }
    }

    /// Declares the identity column. Fails for types a key cannot wrap.
    pub fn primary_key(name: impl Into<String>, key_type: FieldType) -> Result<Self, SchemaError> {
        Ok(Self {
            name: name.into(),
            kind: FieldKind::Key(PrimaryKey::new(key_type)?),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(self.kind, FieldKind::Key(_))
    }

    /// The type values for this column must have; for the key, the wrapped type.
    pub fn field_type(&self) -> FieldType {
        match self.kind {
            FieldKind::Plain(t) => t,
            FieldKind::Key(k) => k.key_type(),
        }
    }

    pub fn sql_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Plain(t) => t.sql_type(),
            FieldKind::Key(k) => k.sql_type(),
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.field_type().accepts(value)
    }

    fn is_internal(&self) -> bool {
        self.name.starts_with('_')
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FieldKind::Plain(t) => write!(f, "{}: {}", self.name, t),
            FieldKind::Key(k) => write!(f, "{}: PrimaryKey({})", self.name, k.key_type()),
        }
    }
}

/// Validated, ordered column list of one entity type.
///
/// Built once per entity. Holds exactly one key column and unique column
/// names; fields whose name starts with `_` are internal and never become
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    entity: String,
    columns: Vec<FieldSpec>,
    primary_key: usize,
}

impl EntitySchema {
    pub fn new(entity: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        let entity = entity.into();
        if entity.is_empty() || entity.contains('`') {
            return Err(SchemaError::InvalidEntityName(entity));
        }

        let (internal, columns): (Vec<FieldSpec>, Vec<FieldSpec>) =
            fields.into_iter().partition(FieldSpec::is_internal);
        if !internal.is_empty() {
            warn!(
                entity = %entity,
                skipped = ?internal.iter().map(FieldSpec::name).collect::<Vec<_>>(),
                "internal fields are not mapped to columns"
            );
        }

        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(SchemaError::DuplicateColumn {
                    entity,
                    column: column.name.clone(),
                });
            }
        }

        let keys: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_primary_key())
            .map(|(idx, _)| idx)
            .collect();

        let primary_key = match keys.as_slice() {
            [] => return Err(SchemaError::NoPrimaryKey(entity)),
            [only] => *only,
            _ => {
                let columns = keys.iter().map(|&idx| columns[idx].name.clone()).collect();
                return Err(SchemaError::MultiplePrimaryKeys { entity, columns });
            }
        };

        Ok(Self {
            entity,
            columns,
            primary_key,
        })
    }

    /// Entity name, used verbatim as the table name.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn table_name(&self) -> &str {
        &self.entity
    }

    pub fn columns(&self) -> &[FieldSpec] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn find_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    pub fn get_column(&self, name: &str) -> Option<&FieldSpec> {
        self.find_column_index(name).map(|idx| &self.columns[idx])
    }

    pub fn primary_key_index(&self) -> usize {
        self.primary_key
    }

    pub fn primary_key(&self) -> &FieldSpec {
        &self.columns[self.primary_key]
    }
}

/// Renders as `[uid: PrimaryKey(Integer), name: Text]`, used in error reports.
impl fmt::Display for EntitySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, column) in self.columns.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", column)?;
        }
        write!(f, "]")
    }
}
