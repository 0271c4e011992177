//! Guarded property values.
//!
//! A [`Tracked`] value distinguishes "never assigned" from "assigned NULL",
//! so partially loaded entities fail loudly when an unloaded property is read.

use std::borrow::Cow;

use crate::errors::{DaoError, DaoResult};
use crate::value::{FromValue, ToValue, Value};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tracked<T> {
    #[default]
    Unset,
    Null,
    Set(T),
}

impl<T> Tracked<T> {
    pub fn set(&mut self, value: Option<T>) {
        *self = value.into();
    }

    pub fn set_value(&mut self, value: T) {
        *self = Tracked::Set(value);
    }

    pub fn set_null(&mut self) {
        *self = Tracked::Null;
    }

    /// Forgets any assignment.
    pub fn unset(&mut self) {
        *self = Tracked::Unset;
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Tracked::Unset)
    }

    /// Reads the value, failing if nothing was ever assigned.
    pub fn get(&self, property: impl Into<Cow<'static, str>>) -> DaoResult<Option<&T>> {
        match self {
            Tracked::Unset => Err(DaoError::PropertyNotSet {
                property: property.into(),
            }),
            Tracked::Null => Ok(None),
            Tracked::Set(value) => Ok(Some(value)),
        }
    }

    /// Reads the value, treating an unset property as NULL.
    pub fn get_or_null(&self) -> Option<&T> {
        match self {
            Tracked::Set(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Tracked::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Tracked<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Tracked::Set(value),
            None => Tracked::Null,
        }
    }
}

impl<T: FromValue> FromValue for Tracked<T> {
    fn from_value(value: Value) -> DaoResult<Self> {
        Option::<T>::from_value(value).map(Tracked::from)
    }
}

impl<T: ToValue> ToValue for Tracked<T> {
    fn to_value(&self) -> Value {
        self.get_or_null().to_value()
    }
}
