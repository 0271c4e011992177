//! Data access for `crate::model::order_item::OrderItem`.
//!
//! Generated by daogen-build. Do not edit manually.
#![allow(unused_imports, unused_mut, clippy::all)]
use ::daogen::{
    DaoError, DaoResult, FromValue, ParameterBinder, PropertyDetail, Reference, Row,
    RowMapper, SqlExecutor, ToValue, Value,
};
pub const TABLE_NAME: &str = "order_item";
/// Every mapped property, in declaration order.
pub const PROPERTIES: &[PropertyDetail] = &[
    PropertyDetail {
        name: "id",
        column_name: "id",
        type_name: "Option<OrderItemId>",
        id: true,
        generation_type: None,
        generator: None,
        embedded: true,
        nested: false,
        unique: true,
        nullable: false,
        insertable: true,
        updatable: false,
        column_definition: "",
        table: "",
        length: 255u32,
        precision: 0u32,
        scale: 0u32,
        referenced_column_name: "",
        kind: ::daogen::PropertyKind::Simple,
    },
    PropertyDetail {
        name: "id.order_id",
        column_name: "orderId",
        type_name: "Option<i64>",
        id: true,
        generation_type: None,
        generator: None,
        embedded: true,
        nested: true,
        unique: false,
        nullable: true,
        insertable: true,
        updatable: true,
        column_definition: "",
        table: "",
        length: 255u32,
        precision: 0u32,
        scale: 0u32,
        referenced_column_name: "",
        kind: ::daogen::PropertyKind::Simple,
    },
    PropertyDetail {
        name: "id.article_id",
        column_name: "artId",
        type_name: "Option<i32>",
        id: true,
        generation_type: None,
        generator: None,
        embedded: true,
        nested: true,
        unique: false,
        nullable: true,
        insertable: true,
        updatable: true,
        column_definition: "",
        table: "",
        length: 255u32,
        precision: 0u32,
        scale: 0u32,
        referenced_column_name: "",
        kind: ::daogen::PropertyKind::Simple,
    },
    PropertyDetail {
        name: "quantity",
        column_name: "quantity",
        type_name: "i32",
        id: false,
        generation_type: None,
        generator: None,
        embedded: false,
        nested: false,
        unique: false,
        nullable: true,
        insertable: true,
        updatable: true,
        column_definition: "",
        table: "",
        length: 255u32,
        precision: 0u32,
        scale: 0u32,
        referenced_column_name: "",
        kind: ::daogen::PropertyKind::Simple,
    },
];
pub const ID_PROPERTIES: &[&str] = &["id.order_id", "id.article_id"];
pub const DETAIL_PROPERTIES: &[&str] = &["quantity"];
pub const ID_COLUMN_LIST: &[&str] = &["orderId", "artId"];
pub const DETAIL_COLUMN_LIST: &[&str] = &["quantity"];
pub const ID_COLUMNS: &str = "orderId, artId";
pub const DETAIL_COLUMNS: &str = "quantity";
/// Identifier columns followed by detail columns.
pub const ALL_COLUMNS: &str = "orderId, artId, quantity";
pub const ID_COLUMNS_QUERY: &str = "orderId = ? AND artId = ?";
pub const ID_PARAMS: &str = "?, ?";
pub const DETAIL_PARAMS: &str = "?";
pub const INSERT_SQL: &str = "INSERT INTO order_item (quantity, orderId, artId) VALUES (?, ?, ?)";
/// Empty when the entity has no detail column.
pub const UPDATE_SQL: &str = "UPDATE order_item SET quantity = ? WHERE orderId = ? AND artId = ?";
pub const SELECT_BY_ID_SQL: &str = "SELECT orderId, artId, quantity FROM order_item WHERE orderId = ? AND artId = ?";
pub const SELECT_ALL_SQL: &str = "SELECT orderId, artId, quantity FROM order_item";
/// Maps a full row onto the entity. Column names may carry a prefix
/// so several entities can be read from one joined row.
#[derive(Debug, Clone)]
pub struct OrderItemRowMapper {
    column_prefix: String,
    id_order_id_col: String,
    id_article_id_col: String,
    quantity_col: String,
}
impl OrderItemRowMapper {
    pub fn new() -> Self {
        Self::with_prefix("")
    }
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let column_prefix = prefix.into();
        Self {
            id_order_id_col: format!("{}{}", column_prefix, "orderId"),
            id_article_id_col: format!("{}{}", column_prefix, "artId"),
            quantity_col: format!("{}{}", column_prefix, "quantity"),
            column_prefix,
        }
    }
    pub fn column_prefix(&self) -> &str {
        &self.column_prefix
    }
}
impl Default for OrderItemRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<crate::model::order_item::OrderItem> for OrderItemRowMapper {
    fn map_row(&self, row: &dyn Row) -> DaoResult<crate::model::order_item::OrderItem> {
        let mut entity = <crate::model::order_item::OrderItem>::default();
        let mut id_aggregate = <crate::model::order_item::OrderItemId>::default();
        id_aggregate.order_id = row.get_i64(&self.id_order_id_col)?;
        id_aggregate.article_id = row.get_i32(&self.id_article_id_col)?;
        entity.quantity = row.get_i32(&self.quantity_col)?.unwrap_or_default();
        entity.id = Some(id_aggregate);
        Ok(entity)
    }
}
/// Maps the identifier columns only; yields `None` when every
/// identifier is NULL.
#[derive(Debug, Clone)]
pub struct OrderItemIdRowMapper {
    id_order_id_col: String,
    id_article_id_col: String,
}
impl OrderItemIdRowMapper {
    pub fn new() -> Self {
        Self::with_columns("orderId", "artId")
    }
    pub fn with_columns(
        id_order_id_col: impl Into<String>,
        id_article_id_col: impl Into<String>,
    ) -> Self {
        Self {
            id_order_id_col: id_order_id_col.into(),
            id_article_id_col: id_article_id_col.into(),
        }
    }
}
impl Default for OrderItemIdRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<Option<crate::model::order_item::OrderItem>> for OrderItemIdRowMapper {
    fn map_row(
        &self,
        row: &dyn Row,
    ) -> DaoResult<Option<crate::model::order_item::OrderItem>> {
        let mut entity = <crate::model::order_item::OrderItem>::default();
        let mut id_aggregate = <crate::model::order_item::OrderItemId>::default();
        id_aggregate.order_id = row.get_i64(&self.id_order_id_col)?;
        id_aggregate.article_id = row.get_i32(&self.id_article_id_col)?;
        entity.id = Some(id_aggregate);
        Ok(if has_id(&entity) { Some(entity) } else { None })
    }
}
/// Reads a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn get_property_value(
    entity: &crate::model::order_item::OrderItem,
    property: &str,
) -> Value {
    match property {
        "id" => {
            match Reference::<
                crate::model::order_item::OrderItemId,
            >::referenced(&entity.id) {
                Some(aggregate) => {
                    Value::Composite(
                        vec![
                            ("order_id".to_string(), ToValue::to_value(& aggregate
                            .order_id)), ("article_id".to_string(), ToValue::to_value(&
                            aggregate.article_id))
                        ],
                    )
                }
                None => Value::Null,
            }
        }
        "id.order_id" => {
            Reference::<crate::model::order_item::OrderItemId>::referenced(&entity.id)
                .map(|aggregate| ToValue::to_value(&aggregate.order_id))
                .unwrap_or(Value::Null)
        }
        "id.article_id" => {
            Reference::<crate::model::order_item::OrderItemId>::referenced(&entity.id)
                .map(|aggregate| ToValue::to_value(&aggregate.article_id))
                .unwrap_or(Value::Null)
        }
        "quantity" => ToValue::to_value(&entity.quantity),
        other => panic!("Property {} unknown.", other),
    }
}
/// Writes a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn set_property_value(
    entity: &mut crate::model::order_item::OrderItem,
    property: &str,
    value: Value,
) -> DaoResult<()> {
    match property {
        "id" => {
            if value.is_null() {
                entity.id = None;
            } else if matches!(value, Value::Composite(_)) {
                let mut aggregate = <crate::model::order_item::OrderItemId>::default();
                aggregate.order_id = FromValue::from_value(
                    value.component("order_id").cloned().unwrap_or_default(),
                )?;
                aggregate.article_id = FromValue::from_value(
                    value.component("article_id").cloned().unwrap_or_default(),
                )?;
                entity.id = Some(aggregate);
            } else {
                return Err(DaoError::type_mismatch("composite", &value));
            }
        }
        "id.order_id" => {
            let mut aggregate: crate::model::order_item::OrderItemId = Reference::<
                crate::model::order_item::OrderItemId,
            >::referenced(&entity.id)
                .cloned()
                .unwrap_or_default();
            aggregate.order_id = FromValue::from_value(value)?;
            entity.id = Some(aggregate);
        }
        "id.article_id" => {
            let mut aggregate: crate::model::order_item::OrderItemId = Reference::<
                crate::model::order_item::OrderItemId,
            >::referenced(&entity.id)
                .cloned()
                .unwrap_or_default();
            aggregate.article_id = FromValue::from_value(value)?;
            entity.id = Some(aggregate);
        }
        "quantity" => {
            entity.quantity = FromValue::from_value(value)?;
        }
        other => panic!("Property {} unknown.", other),
    }
    Ok(())
}
/// Whether any identifier property holds a value.
pub fn has_id(entity: &crate::model::order_item::OrderItem) -> bool {
    ID_PROPERTIES.iter().any(|property| !get_property_value(entity, property).is_null())
}
/// Binds `properties` at consecutive positions starting after `offset`.
pub fn bind_properties(
    entity: &crate::model::order_item::OrderItem,
    properties: &[&str],
    binder: &mut dyn ParameterBinder,
    offset: usize,
) -> DaoResult<()> {
    for (index, property) in properties.iter().enumerate() {
        binder.bind(offset + index + 1, get_property_value(entity, property))?;
    }
    Ok(())
}
/// Statements for `OrderItem` run through an [`SqlExecutor`].
#[derive(Debug, Clone)]
pub struct OrderItemDao<X: SqlExecutor> {
    executor: X,
}
impl<X: SqlExecutor> OrderItemDao<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }
    pub fn executor(&self) -> &X {
        &self.executor
    }
    pub fn insert(
        &self,
        entity: &mut crate::model::order_item::OrderItem,
    ) -> DaoResult<()> {
        let entity: &crate::model::order_item::OrderItem = entity;
        self.executor
            .execute_update(
                INSERT_SQL,
                &|binder: &mut dyn ParameterBinder| {
                    bind_properties(entity, DETAIL_PROPERTIES, binder, 0)?;
                    bind_properties(
                        entity,
                        ID_PROPERTIES,
                        binder,
                        DETAIL_PROPERTIES.len(),
                    )
                },
            )?;
        Ok(())
    }
    /// Writes every detail column. Issues no statement when the
    /// entity has none.
    pub fn update(
        &self,
        entity: &crate::model::order_item::OrderItem,
    ) -> DaoResult<u64> {
        if DETAIL_PROPERTIES.is_empty() {
            return Ok(0);
        }
        self.executor
            .execute_update(
                UPDATE_SQL,
                &|binder: &mut dyn ParameterBinder| {
                    bind_properties(entity, DETAIL_PROPERTIES, binder, 0)?;
                    bind_properties(
                        entity,
                        ID_PROPERTIES,
                        binder,
                        DETAIL_PROPERTIES.len(),
                    )
                },
            )
    }
    /// Updates the entity if it carries an identifier, inserts it otherwise.
    pub fn merge(
        &self,
        entity: &mut crate::model::order_item::OrderItem,
    ) -> DaoResult<()> {
        if has_id(entity) {
            self.update(entity).map(|_| ())
        } else {
            self.insert(entity)
        }
    }
    pub fn get_by_id(
        &self,
        id: &crate::model::order_item::OrderItemId,
    ) -> DaoResult<Option<crate::model::order_item::OrderItem>> {
        let params = vec![
            ToValue::to_value(& id.order_id), ToValue::to_value(& id.article_id)
        ];
        self.executor.query_one(SELECT_BY_ID_SQL, &params, &OrderItemRowMapper::new())
    }
    pub fn find_all(&self) -> DaoResult<Vec<crate::model::order_item::OrderItem>> {
        self.executor.query_many(SELECT_ALL_SQL, &[], &OrderItemRowMapper::new())
    }
}
