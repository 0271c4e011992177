use daogen::{Decimal, Entity};

use super::{OrderItem, Supplier};

/// Accessed through its accessor methods; the fields stay private.
#[derive(Entity, Debug, Default, Clone, PartialEq)]
#[daogen(table = "article")]
pub struct Article {
    #[daogen(id, generated(strategy = "identity"), column(name = "idArticle"))]
    id: Option<i32>,
    #[daogen(column(length = 20, nullable = false, unique))]
    code: Option<String>,
    #[daogen(column)]
    description: Option<String>,
    #[daogen(column(precision = 10, scale = 2))]
    price: Option<Decimal>,
    #[daogen(column)]
    active: bool,
    #[daogen(many_to_one, join_column(name = "supplierId", referenced_column = "idSuppliers"))]
    supplier: Option<Supplier>,
    #[daogen(one_to_many)]
    order_items: Vec<OrderItem>,
}

impl Article {
    pub fn get_id(&self) -> Option<i32> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<i32>) {
        self.id = id;
    }

    pub fn get_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn set_code(&mut self, code: Option<String>) {
        self.code = code;
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn get_price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn set_price(&mut self, price: Option<Decimal>) {
        self.price = price;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn get_supplier(&self) -> Option<&Supplier> {
        self.supplier.as_ref()
    }

    pub fn set_supplier(&mut self, supplier: Option<Supplier>) {
        self.supplier = supplier;
    }

    pub fn order_items(&self) -> &[OrderItem] {
        &self.order_items
    }
}
