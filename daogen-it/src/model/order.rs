use daogen::{DaoError, DaoResult, Entity, FromValue, ToValue, Value};

use super::Customer;

/// Stored as its lowercase name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Open,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Shipped => "shipped",
            Self::Cancelled => "cancelled",
        }
    }
}

impl ToValue for OrderStatus {
    fn to_value(&self) -> Value {
        Value::Text(self.as_str().to_string())
    }
}

impl FromValue for OrderStatus {
    fn from_value(value: Value) -> DaoResult<Self> {
        match &value {
            Value::Text(text) if text == "open" => Ok(Self::Open),
            Value::Text(text) if text == "shipped" => Ok(Self::Shipped),
            Value::Text(text) if text == "cancelled" => Ok(Self::Cancelled),
            other => Err(DaoError::type_mismatch("order status", other)),
        }
    }
}

#[derive(Entity, Debug, Default, Clone, PartialEq)]
#[daogen(table = "orders", schema = "shop")]
pub struct Order {
    #[daogen(id)]
    pub id: Option<i64>,
    #[daogen(many_to_one, join_column(name = "customerId"))]
    pub customer: Option<Customer>,
    #[daogen(column)]
    pub status: Option<OrderStatus>,
    #[daogen(column(name = "placedOn"))]
    pub placed_on: Option<String>,
}
