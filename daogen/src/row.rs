//! Result rows and the mappers that turn them into entities.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::errors::{DaoError, DaoResult};
use crate::value::{FromValue, Value};

/// One row of a query result, addressed by column name.
///
/// Only [`Row::get_value`] is required; the typed getters convert through
/// [`FromValue`] and report `None` for SQL NULL.
pub trait Row {
    fn get_value(&self, column: &str) -> DaoResult<Value>;

    fn get_string(&self, column: &str) -> DaoResult<Option<String>> {
        FromValue::from_value(self.get_value(column)?)
    }

    fn get_bool(&self, column: &str) -> DaoResult<Option<bool>> {
        FromValue::from_value(self.get_value(column)?)
    }

    fn get_i16(&self, column: &str) -> DaoResult<Option<i16>> {
        FromValue::from_value(self.get_value(column)?)
    }

    fn get_i32(&self, column: &str) -> DaoResult<Option<i32>> {
        FromValue::from_value(self.get_value(column)?)
    }

    fn get_i64(&self, column: &str) -> DaoResult<Option<i64>> {
        FromValue::from_value(self.get_value(column)?)
    }

    fn get_f32(&self, column: &str) -> DaoResult<Option<f32>> {
        FromValue::from_value(self.get_value(column)?)
    }

    fn get_f64(&self, column: &str) -> DaoResult<Option<f64>> {
        FromValue::from_value(self.get_value(column)?)
    }

    fn get_decimal(&self, column: &str) -> DaoResult<Option<Decimal>> {
        FromValue::from_value(self.get_value(column)?)
    }
}

/// Builds a value of type `T` from a result row.
pub trait RowMapper<T> {
    fn map_row(&self, row: &dyn Row) -> DaoResult<T>;
}

/// A row held as a column-name → value map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapRow {
    values: HashMap<String, Value>,
}

impl MapRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Row for MapRow {
    fn get_value(&self, column: &str) -> DaoResult<Value> {
        self.values
            .get(column)
            .cloned()
            .ok_or_else(|| DaoError::MissingColumn { column: column.to_string() })
    }
}
