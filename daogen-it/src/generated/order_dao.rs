//! Data access for `crate::model::order::Order`.
//!
//! Generated by daogen-build. Do not edit manually.
#![allow(unused_imports, unused_mut, clippy::all)]
use ::daogen::{
    DaoError, DaoResult, FromValue, ParameterBinder, PropertyDetail, Reference, Row,
    RowMapper, SqlExecutor, ToValue, Value,
};
pub const TABLE_NAME: &str = "shop.orders";
/// Every mapped property, in declaration order.
pub const PROPERTIES: &[PropertyDetail] = &[
    PropertyDetail {
        name: "id",
        column_name: "id",
        type_name: "Option<i64>",
        id: true,
        generation_type: None,
        generator: None,
        embedded: false,
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
        name: "customer",
        column_name: "customerId",
        type_name: "Option<Customer>",
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
        kind: ::daogen::PropertyKind::ManyToOne,
    },
    PropertyDetail {
        name: "status",
        column_name: "status",
        type_name: "Option<OrderStatus>",
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
    PropertyDetail {
        name: "placed_on",
        column_name: "placedOn",
        type_name: "Option<String>",
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
pub const ID_PROPERTIES: &[&str] = &["id"];
pub const DETAIL_PROPERTIES: &[&str] = &["customer", "status", "placed_on"];
pub const ID_COLUMN_LIST: &[&str] = &["id"];
pub const DETAIL_COLUMN_LIST: &[&str] = &["customerId", "status", "placedOn"];
pub const ID_COLUMNS: &str = "id";
pub const DETAIL_COLUMNS: &str = "customerId, status, placedOn";
/// Identifier columns followed by detail columns.
pub const ALL_COLUMNS: &str = "id, customerId, status, placedOn";
pub const ID_COLUMNS_QUERY: &str = "id = ?";
pub const ID_PARAMS: &str = "?";
pub const DETAIL_PARAMS: &str = "?, ?, ?";
pub const INSERT_SQL: &str = "INSERT INTO shop.orders (customerId, status, placedOn, id) VALUES (?, ?, ?, ?)";
/// Empty when the entity has no detail column.
pub const UPDATE_SQL: &str = "UPDATE shop.orders SET customerId = ?, status = ?, placedOn = ? WHERE id = ?";
pub const SELECT_BY_ID_SQL: &str = "SELECT id, customerId, status, placedOn FROM shop.orders WHERE id = ?";
pub const SELECT_ALL_SQL: &str = "SELECT id, customerId, status, placedOn FROM shop.orders";
/// Maps a full row onto the entity. Column names may carry a prefix
/// so several entities can be read from one joined row.
#[derive(Debug, Clone)]
pub struct OrderRowMapper {
    column_prefix: String,
    id_col: String,
    customer_col: String,
    status_col: String,
    placed_on_col: String,
}
impl OrderRowMapper {
    pub fn new() -> Self {
        Self::with_prefix("")
    }
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let column_prefix = prefix.into();
        Self {
            id_col: format!("{}{}", column_prefix, "id"),
            customer_col: format!("{}{}", column_prefix, "customerId"),
            status_col: format!("{}{}", column_prefix, "status"),
            placed_on_col: format!("{}{}", column_prefix, "placedOn"),
            column_prefix,
        }
    }
    pub fn column_prefix(&self) -> &str {
        &self.column_prefix
    }
}
impl Default for OrderRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<crate::model::order::Order> for OrderRowMapper {
    fn map_row(&self, row: &dyn Row) -> DaoResult<crate::model::order::Order> {
        let mut entity = <crate::model::order::Order>::default();
        entity.id = row.get_i64(&self.id_col)?;
        entity.customer = crate::generated::customer_dao::CustomerIdRowMapper::with_columns(
                self.customer_col.as_str(),
            )
            .map_row(row)?;
        entity.status = FromValue::from_value(row.get_value(&self.status_col)?)?;
        entity.placed_on = row.get_string(&self.placed_on_col)?;
        Ok(entity)
    }
}
/// Maps the identifier columns only; yields `None` when every
/// identifier is NULL.
#[derive(Debug, Clone)]
pub struct OrderIdRowMapper {
    id_col: String,
}
impl OrderIdRowMapper {
    pub fn new() -> Self {
        Self::with_columns("id")
    }
    pub fn with_columns(id_col: impl Into<String>) -> Self {
        Self { id_col: id_col.into() }
    }
}
impl Default for OrderIdRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<Option<crate::model::order::Order>> for OrderIdRowMapper {
    fn map_row(&self, row: &dyn Row) -> DaoResult<Option<crate::model::order::Order>> {
        let mut entity = <crate::model::order::Order>::default();
        entity.id = row.get_i64(&self.id_col)?;
        Ok(if has_id(&entity) { Some(entity) } else { None })
    }
}
/// Reads a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn get_property_value(entity: &crate::model::order::Order, property: &str) -> Value {
    match property {
        "id" => ToValue::to_value(&entity.id),
        "customer" => {
            Reference::<crate::model::customer::Customer>::referenced(&entity.customer)
                .map(|target| crate::generated::customer_dao::get_property_value(
                    target,
                    "id",
                ))
                .unwrap_or(Value::Null)
        }
        "status" => ToValue::to_value(&entity.status),
        "placed_on" => ToValue::to_value(&entity.placed_on),
        other => panic!("Property {} unknown.", other),
    }
}
/// Writes a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn set_property_value(
    entity: &mut crate::model::order::Order,
    property: &str,
    value: Value,
) -> DaoResult<()> {
    match property {
        "id" => {
            entity.id = FromValue::from_value(value)?;
        }
        "customer" => {
            if value.is_null() {
                entity.customer = None;
            } else {
                let mut target = <crate::model::customer::Customer>::default();
                crate::generated::customer_dao::set_property_value(
                    &mut target,
                    "id",
                    value,
                )?;
                entity.customer = Some(target);
            }
        }
        "status" => {
            entity.status = FromValue::from_value(value)?;
        }
        "placed_on" => {
            entity.placed_on = FromValue::from_value(value)?;
        }
        other => panic!("Property {} unknown.", other),
    }
    Ok(())
}
/// Whether any identifier property holds a value.
pub fn has_id(entity: &crate::model::order::Order) -> bool {
    ID_PROPERTIES.iter().any(|property| !get_property_value(entity, property).is_null())
}
/// Binds `properties` at consecutive positions starting after `offset`.
pub fn bind_properties(
    entity: &crate::model::order::Order,
    properties: &[&str],
    binder: &mut dyn ParameterBinder,
    offset: usize,
) -> DaoResult<()> {
    for (index, property) in properties.iter().enumerate() {
        binder.bind(offset + index + 1, get_property_value(entity, property))?;
    }
    Ok(())
}
/// Statements for `Order` run through an [`SqlExecutor`].
#[derive(Debug, Clone)]
pub struct OrderDao<X: SqlExecutor> {
    executor: X,
}
impl<X: SqlExecutor> OrderDao<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }
    pub fn executor(&self) -> &X {
        &self.executor
    }
    pub fn insert(&self, entity: &mut crate::model::order::Order) -> DaoResult<()> {
        let entity: &crate::model::order::Order = entity;
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
    pub fn update(&self, entity: &crate::model::order::Order) -> DaoResult<u64> {
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
    pub fn merge(&self, entity: &mut crate::model::order::Order) -> DaoResult<()> {
        if has_id(entity) {
            self.update(entity).map(|_| ())
        } else {
            self.insert(entity)
        }
    }
    pub fn get_by_id(
        &self,
        id: impl ToValue,
    ) -> DaoResult<Option<crate::model::order::Order>> {
        let params = vec![id.to_value()];
        self.executor.query_one(SELECT_BY_ID_SQL, &params, &OrderRowMapper::new())
    }
    pub fn find_all(&self) -> DaoResult<Vec<crate::model::order::Order>> {
        self.executor.query_many(SELECT_ALL_SQL, &[], &OrderRowMapper::new())
    }
}
