use daogen::{Embeddable, Entity};

#[derive(Embeddable, Debug, Default, Clone, PartialEq)]
pub struct OrderItemId {
    #[daogen(column(name = "orderId"))]
    pub order_id: Option<i64>,
    #[daogen(column)]
    pub article_id: Option<i32>,
}

impl OrderItemId {
    pub fn new(order_id: i64, article_id: i32) -> Self {
        Self {
            order_id: Some(order_id),
            article_id: Some(article_id),
        }
    }
}

#[derive(Entity, Debug, Default, Clone, PartialEq)]
#[daogen(table = "order_item")]
pub struct OrderItem {
    #[daogen(embedded_id, attribute_override(name = "article_id", column(name = "artId")))]
    pub id: Option<OrderItemId>,
    #[daogen(column)]
    pub quantity: i32,
}
