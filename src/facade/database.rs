use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info};

use crate::connection::{DatabaseConfig, Target};
use crate::core::{Result, Row, Value};
use crate::facade::Dao;
use crate::result::QueryResult;

/// Owner of the single SQLite connection everything else runs on.
///
/// The connection opens in [`Database::open`] and closes when the value is
/// dropped, on every exit path. [`Database::close`] does the same but
/// reports a failing close.
///
/// Booleans are stored as 0/1 and read back as `x > 0` for columns declared
/// `BOOL`; SQLite has no boolean storage class. Dates and datetimes are
/// stored as ISO-8601 text.
///
/// A `Database` is not `Sync`: callers driving it from several threads must
/// serialize access themselves.
pub struct Database {
    conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        config.validate()?;

        let conn = match &config.target {
            Target::Memory => Connection::open_in_memory()?,
            Target::File(path) => Connection::open(path)?,
        };

        if let Some(timeout) = config.busy_timeout_duration() {
            conn.busy_timeout(timeout)?;
        }
        conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;

        info!(target_url = %config.to_url(), "database opened");
        Ok(Self { conn, config })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(DatabaseConfig::in_memory())
    }

    /// Opens `":memory:"` or a filesystem path.
    pub fn open_target(target: &str) -> Result<Self> {
        Self::open(DatabaseConfig::from_target(target))
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Direct access to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// A DAO handle bound to this database.
    pub fn dao(&self) -> Dao<'_> {
        Dao::new(self)
    }

    /// Runs one statement and returns the number of changed rows.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        debug!(sql, params = params.len(), "execute");
        let changed = self.conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(changed)
    }

    /// Runs a query and materializes every row.
    pub fn query(&self, sql: &str) -> Result<QueryResult> {
        self.query_with(sql, &[])
    }

    pub fn query_with(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        debug!(sql, params = params.len(), "query");
        let mut stmt = self.conn.prepare(sql)?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let decl_types: Vec<Option<String>> = stmt
            .columns()
            .iter()
            .map(|c| c.decl_type().map(String::from))
            .collect();

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out: Vec<Row> = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(decl_types.len());
            for (idx, decl_type) in decl_types.iter().enumerate() {
                values.push(Value::from_column(row.get_ref(idx)?, decl_type.as_deref())?);
            }
            out.push(values);
        }

        Ok(QueryResult::new(columns, out))
    }

    /// Executes `sql` once per parameter tuple inside one transaction.
    ///
    /// Either every row is written and committed, or the transaction is
    /// rolled back and the first error is returned.
    pub fn execute_many<'a, I>(&self, sql: &str, batches: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a [Value]>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let mut changed = 0;
        {
            let mut stmt = tx.prepare(sql)?;
            for params in batches {
                changed += stmt.execute(params_from_iter(params.iter()))?;
            }
        }
        tx.commit()?;

        debug!(sql, changed, "execute_many committed");
        Ok(changed)
    }

    /// Column layout of a table as reported by `PRAGMA table_info`.
    pub fn table_info(&self, table: &str) -> Result<QueryResult> {
        self.query_with(
            "SELECT cid, name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?)",
            &[Value::from(table)],
        )
    }

    /// Closes the connection, reporting errors a plain drop would swallow.
    pub fn close(self) -> Result<()> {
        let url = self.config.to_url();
        self.conn.close().map_err(|(_, err)| err)?;
        info!(target_url = %url, "database closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_decodes_declared_types() {
        let db = Database::open_in_memory().unwrap();
        db.execute("CREATE TABLE t (id INT, flag BOOL, day DATE)", &[])
            .unwrap();
        db.execute(
            "INSERT INTO t VALUES (?, ?, ?)",
            &[
                Value::Integer(1),
                Value::Boolean(true),
                Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
            ],
        )
        .unwrap();

        let raw: i64 = db
            .connection()
            .query_row("SELECT flag FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(raw, 1);

        let result = db.query("SELECT * FROM t").unwrap();
        assert_eq!(result.columns, vec!["id", "flag", "day"]);
        assert_eq!(
            result.rows,
            vec![vec![
                Value::Integer(1),
                Value::Boolean(true),
                Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
            ]]
        );
    }

    #[test]
    fn test_execute_many_rolls_back_on_error() {
        let db = Database::open_in_memory().unwrap();
        db.execute("CREATE TABLE t (id INT PRIMARY KEY)", &[]).unwrap();

        let ok = [Value::Integer(1)];
        let dup = [Value::Integer(1)];
        let err = db
            .execute_many("INSERT INTO t VALUES (?)", [&ok[..], &dup[..]])
            .unwrap_err();
        assert!(matches!(err, crate::core::DbError::Sqlite(_)));

        let result = db.query("SELECT count(*) FROM t").unwrap();
        assert_eq!(result.rows, vec![vec![Value::Integer(0)]]);
    }

    #[test]
    fn test_table_info_lists_columns() {
        let db = Database::open_in_memory().unwrap();
        db.execute("CREATE TABLE t (id INT, name TEXT)", &[]).unwrap();
        let info = db.table_info("t").unwrap();
        let names: Vec<&str> = info.rows.iter().filter_map(|r| r[1].as_str()).collect();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn test_close_reports_success() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.close().is_ok());
    }
}
