mod common;

use common::RecordingExecutor;
use daogen::{Decimal, EntityType, MapRow, RowMapper, Value, find_property};
use daogen_it::generated::customer_dao::{self, CustomerDao, CustomerRowMapper};
use daogen_it::generated::order_dao::{self, OrderDao, OrderRowMapper};
use daogen_it::generated::order_item_dao::{self, OrderItemDao, OrderItemIdRowMapper, OrderItemRowMapper};
use daogen_it::model::{Customer, Order, OrderItem, OrderItemId, OrderStatus};

#[test]
fn embedded_identifier_is_flattened() {
    assert_eq!(order_item_dao::ID_PROPERTIES, &["id.order_id", "id.article_id"]);
    assert_eq!(order_item_dao::ID_COLUMN_LIST, &["orderId", "artId"]);
    assert_eq!(order_item_dao::DETAIL_PROPERTIES, &["quantity"]);
    assert_eq!(order_item_dao::ID_COLUMNS_QUERY, "orderId = ? AND artId = ?");
    assert_eq!(
        order_item_dao::INSERT_SQL,
        "INSERT INTO order_item (quantity, orderId, artId) VALUES (?, ?, ?)"
    );

    let aggregate = find_property(order_item_dao::PROPERTIES, "id").unwrap();
    assert!(aggregate.embedded && aggregate.id && !aggregate.nested);
    let nested = find_property(order_item_dao::PROPERTIES, "id.article_id").unwrap();
    assert!(nested.nested && nested.embedded && nested.id);
    assert_eq!(nested.parent_property(), Some("id"));
}

#[test]
fn id_mapper_needs_one_identifier_column() {
    let mapper = OrderItemIdRowMapper::new();
    let empty = MapRow::new().with("orderId", Value::Null).with("artId", Value::Null);
    assert_eq!(mapper.map_row(&empty).unwrap(), None);

    let half = MapRow::new().with("orderId", 3).with("artId", Value::Null);
    let item = mapper.map_row(&half).unwrap().unwrap();
    assert_eq!(item.id.as_ref().and_then(|id| id.order_id), Some(3));
    assert_eq!(item.id.as_ref().and_then(|id| id.article_id), None);
}

#[test]
fn row_mapper_rebuilds_the_aggregate() {
    let row = MapRow::new().with("orderId", 3).with("artId", 9).with("quantity", 2);
    let item = OrderItemRowMapper::new().map_row(&row).unwrap();
    assert_eq!(
        item,
        OrderItem {
            id: Some(OrderItemId::new(3, 9)),
            quantity: 2,
        }
    );
}

#[test]
fn nested_paths_read_and_write_through_the_aggregate() {
    let mut item = OrderItem::default();
    assert_eq!(order_item_dao::get_property_value(&item, "id.order_id"), Value::Null);
    assert_eq!(order_item_dao::get_property_value(&item, "id"), Value::Null);
    assert!(!order_item_dao::has_id(&item));

    order_item_dao::set_property_value(&mut item, "id.order_id", Value::Integer(3)).unwrap();
    assert_eq!(item.id.as_ref().and_then(|id| id.order_id), Some(3));
    assert!(order_item_dao::has_id(&item));

    order_item_dao::set_property_value(&mut item, "id.article_id", Value::Integer(9)).unwrap();
    assert_eq!(item.id, Some(OrderItemId::new(3, 9)));

    let composite = order_item_dao::get_property_value(&item, "id");
    assert_eq!(composite.component("article_id"), Some(&Value::Integer(9)));

    order_item_dao::set_property_value(&mut item, "id", Value::Null).unwrap();
    assert_eq!(item.id, None);
    order_item_dao::set_property_value(&mut item, "id", composite).unwrap();
    assert_eq!(item.id, Some(OrderItemId::new(3, 9)));
}

#[test]
fn composite_dao_binds_identifiers_after_details() {
    let executor = RecordingExecutor::default();
    let dao = OrderItemDao::new(&executor);
    let mut item = OrderItem {
        id: Some(OrderItemId::new(3, 9)),
        quantity: 2,
    };

    dao.insert(&mut item).unwrap();
    assert_eq!(
        executor.last().params,
        vec![Value::Integer(2), Value::Integer(3), Value::Integer(9)]
    );

    item.quantity = 5;
    dao.merge(&mut item).unwrap();
    let executed = executor.last();
    assert_eq!(executed.statement, "UPDATE order_item SET quantity = ? WHERE orderId = ? AND artId = ?");
    assert_eq!(executed.params, vec![Value::Integer(5), Value::Integer(3), Value::Integer(9)]);

    assert_eq!(dao.get_by_id(&OrderItemId::new(3, 9)).unwrap(), None);
    assert_eq!(executor.last().params, vec![Value::Integer(3), Value::Integer(9)]);
}

#[test]
fn inherited_properties_follow_the_entity_own() {
    assert_eq!(customer_dao::ID_PROPERTIES, &["id"]);
    assert_eq!(customer_dao::DETAIL_PROPERTIES, &["name", "credit_limit", "created_by"]);
    assert_eq!(
        customer_dao::INSERT_SQL,
        "INSERT INTO customer (name, creditLimit, createdBy) VALUES (?, ?, ?)"
    );
    assert_eq!(<Customer as EntityType>::TABLE_NAME, "customer");
    let created_by = find_property(customer_dao::PROPERTIES, "created_by").unwrap();
    assert_eq!(created_by.length, 64);
}

#[test]
fn inherited_identifier_is_generated() {
    let executor = RecordingExecutor::with_generated_key(Value::Integer(17));
    let dao = CustomerDao::new(&executor);
    let mut customer = Customer {
        name: Some("Ada".into()),
        credit_limit: Some(Decimal::new(50000, 2)),
        ..Customer::default()
    };
    customer.created_by = Some("import".into());

    dao.insert(&mut customer).unwrap();
    assert_eq!(customer.id, Some(17));
    assert_eq!(
        executor.last().params,
        vec![
            Value::Text("Ada".into()),
            Value::Decimal(Decimal::new(50000, 2)),
            Value::Text("import".into()),
        ]
    );
}

#[test]
fn customer_row_round_trip() {
    let mut customer = Customer::new(4, "Grace");
    customer.credit_limit = Some(Decimal::new(125, 1));

    let row = MapRow::new()
        .with("id", 4i64)
        .with("name", "Grace")
        .with("creditLimit", Decimal::new(125, 1))
        .with("createdBy", Value::Null);
    assert_eq!(CustomerRowMapper::new().map_row(&row).unwrap(), customer);
}

#[test]
fn order_reads_opaque_and_reference_columns() {
    assert_eq!(order_dao::TABLE_NAME, "shop.orders");
    assert_eq!(
        order_dao::UPDATE_SQL,
        "UPDATE shop.orders SET customerId = ?, status = ?, placedOn = ? WHERE id = ?"
    );

    let row = MapRow::new()
        .with("id", 8i64)
        .with("customerId", 11i64)
        .with("status", "shipped")
        .with("placedOn", "2024-05-01");
    let order = OrderRowMapper::new().map_row(&row).unwrap();
    assert_eq!(order.id, Some(8));
    assert_eq!(order.customer.as_ref().and_then(|customer| customer.id), Some(11));
    assert_eq!(order.status, Some(OrderStatus::Shipped));
    assert_eq!(order.placed_on.as_deref(), Some("2024-05-01"));
}

#[test]
fn order_without_generation_binds_its_identifier() {
    let executor = RecordingExecutor::default();
    let dao = OrderDao::new(&executor);
    let mut order = Order {
        id: Some(8),
        customer: Some(Customer::new(11, "Grace")),
        status: Some(OrderStatus::Open),
        placed_on: None,
    };

    dao.insert(&mut order).unwrap();
    let executed = executor.last();
    assert_eq!(
        executed.statement,
        "INSERT INTO shop.orders (customerId, status, placedOn, id) VALUES (?, ?, ?, ?)"
    );
    assert_eq!(
        executed.params,
        vec![Value::Integer(11), Value::Text("open".into()), Value::Null, Value::Integer(8)]
    );
}
