#![allow(dead_code)]

use std::cell::RefCell;

use daogen::{BindFn, DaoResult, MapRow, RowMapper, SqlExecutor, Value, collect_parameters};

/// One statement as the executor received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub statement: String,
    pub params: Vec<Value>,
}

/// Records statements and answers queries from canned rows.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub executed: RefCell<Vec<Executed>>,
    pub rows: Vec<MapRow>,
    pub generated_key: Value,
}

impl RecordingExecutor {
    pub fn with_rows(rows: Vec<MapRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn with_generated_key(key: impl Into<Value>) -> Self {
        Self {
            generated_key: key.into(),
            ..Self::default()
        }
    }

    pub fn last(&self) -> Executed {
        self.executed.borrow().last().cloned().expect("no statement executed")
    }

    pub fn count(&self) -> usize {
        self.executed.borrow().len()
    }

    fn record(&self, statement: &str, params: Vec<Value>) {
        self.executed.borrow_mut().push(Executed {
            statement: statement.to_string(),
            params,
        });
    }
}

impl SqlExecutor for RecordingExecutor {
    fn execute_update(&self, statement: &str, binder: &BindFn<'_>) -> DaoResult<u64> {
        let params = collect_parameters(binder)?;
        self.record(statement, params);
        Ok(1)
    }

    fn execute_update_returning_generated_key(&self, statement: &str, binder: &BindFn<'_>) -> DaoResult<Value> {
        let params = collect_parameters(binder)?;
        self.record(statement, params);
        Ok(self.generated_key.clone())
    }

    fn query_one<T>(&self, statement: &str, params: &[Value], mapper: &dyn RowMapper<T>) -> DaoResult<Option<T>> {
        self.record(statement, params.to_vec());
        self.rows.first().map(|row| mapper.map_row(row)).transpose()
    }

    fn query_many<T>(&self, statement: &str, params: &[Value], mapper: &dyn RowMapper<T>) -> DaoResult<Vec<T>> {
        self.record(statement, params.to_vec());
        self.rows.iter().map(|row| mapper.map_row(row)).collect()
    }
}
