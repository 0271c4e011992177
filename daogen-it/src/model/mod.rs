pub mod abstract_entity;
pub mod article;
pub mod customer;
pub mod order;
pub mod order_item;
pub mod supplier;

pub use abstract_entity::AbstractEntity;
pub use article::Article;
pub use customer::Customer;
pub use order::{Order, OrderStatus};
pub use order_item::{OrderItem, OrderItemId};
pub use supplier::Supplier;
