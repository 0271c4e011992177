//! Auto-generated data-access modules. Do not edit manually.

pub mod article_dao;
pub mod customer_dao;
pub mod order_dao;
pub mod order_item_dao;
pub mod supplier_dao;
