//! The statement-execution boundary generated code calls into.
//!
//! daogen does not execute statements itself; an application supplies an
//! [`SqlExecutor`] backed by its database driver.

use crate::errors::{DaoError, DaoResult};
use crate::row::RowMapper;
use crate::value::Value;

/// Receives positional statement parameters. Positions start at 1.
pub trait ParameterBinder {
    fn bind(&mut self, position: usize, value: Value) -> DaoResult<()>;
}

impl ParameterBinder for Vec<Value> {
    fn bind(&mut self, position: usize, value: Value) -> DaoResult<()> {
        if position == 0 {
            return Err(DaoError::InvalidParameter { position });
        }
        if self.len() < position {
            self.resize(position, Value::Null);
        }
        self[position - 1] = value;
        Ok(())
    }
}

/// Callback that binds the parameters of one statement.
pub type BindFn<'a> = dyn Fn(&mut dyn ParameterBinder) -> DaoResult<()> + 'a;

/// Executes statements on behalf of generated DAOs.
pub trait SqlExecutor {
    /// Runs a data-modifying statement and returns the affected row count.
    fn execute_update(&self, statement: &str, binder: &BindFn<'_>) -> DaoResult<u64>;

    /// Runs an insert and returns the key the database generated for it.
    fn execute_update_returning_generated_key(&self, statement: &str, binder: &BindFn<'_>) -> DaoResult<Value>;

    /// Runs a query expected to match at most one row.
    fn query_one<T>(&self, statement: &str, params: &[Value], mapper: &dyn RowMapper<T>) -> DaoResult<Option<T>>;

    /// Runs a query and maps every row.
    fn query_many<T>(&self, statement: &str, params: &[Value], mapper: &dyn RowMapper<T>) -> DaoResult<Vec<T>>;
}

impl<S: SqlExecutor> SqlExecutor for &S {
    fn execute_update(&self, statement: &str, binder: &BindFn<'_>) -> DaoResult<u64> {
        (**self).execute_update(statement, binder)
    }

    fn execute_update_returning_generated_key(&self, statement: &str, binder: &BindFn<'_>) -> DaoResult<Value> {
        (**self).execute_update_returning_generated_key(statement, binder)
    }

    fn query_one<T>(&self, statement: &str, params: &[Value], mapper: &dyn RowMapper<T>) -> DaoResult<Option<T>> {
        (**self).query_one(statement, params, mapper)
    }

    fn query_many<T>(&self, statement: &str, params: &[Value], mapper: &dyn RowMapper<T>) -> DaoResult<Vec<T>> {
        (**self).query_many(statement, params, mapper)
    }
}

/// Collects the parameters a binder produces, in position order.
pub fn collect_parameters(binder: &BindFn<'_>) -> DaoResult<Vec<Value>> {
    let mut params = Vec::new();
    binder(&mut params)?;
    Ok(params)
}
