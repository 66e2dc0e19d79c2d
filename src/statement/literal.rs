use crate::core::{DATE_FORMAT, DATETIME_FORMAT, Value};

/// Escapes a string for inclusion in a SQL literal.
///
/// Replaces single quotes with double single quotes.
pub fn sql_escape_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Wraps an identifier in backticks, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Renders a value as a SQL literal, matching how it is stored on write.
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(_) => value.to_string(),
        Value::Text(s) => format!("'{}'", sql_escape_string(s)),
        Value::Blob(b) => {
            let hex: String = b.iter().map(|byte| format!("{:02X}", byte)).collect();
            format!("X'{}'", hex)
        }
        Value::Boolean(b) => i64::from(*b).to_string(),
        Value::Date(d) => format!("'{}'", d.format(DATE_FORMAT)),
        Value::DateTime(dt) => format!("'{}'", dt.format(DATETIME_FORMAT)),
    }
}
