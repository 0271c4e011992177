use std::ops::{Deref, DerefMut};

use daogen::{Decimal, Entity};

use super::AbstractEntity;

#[derive(Entity, Debug, Default, Clone, PartialEq)]
#[daogen(table = "customer", extends = "AbstractEntity")]
pub struct Customer {
    pub base: AbstractEntity,
    #[daogen(column(nullable = false))]
    pub name: Option<String>,
    #[daogen(column(name = "creditLimit", precision = 10, scale = 2))]
    pub credit_limit: Option<Decimal>,
}

impl Customer {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            base: AbstractEntity {
                id: Some(id),
                created_by: None,
            },
            name: Some(name.to_string()),
            credit_limit: None,
        }
    }
}

impl Deref for Customer {
    type Target = AbstractEntity;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for Customer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
