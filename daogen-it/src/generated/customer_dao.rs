//! Data access for `crate::model::customer::Customer`.
//!
//! Generated by daogen-build. Do not edit manually.
#![allow(unused_imports, unused_mut, clippy::all)]
use ::daogen::{
    DaoError, DaoResult, FromValue, ParameterBinder, PropertyDetail, Reference, Row,
    RowMapper, SqlExecutor, ToValue, Value,
};
pub const TABLE_NAME: &str = "customer";
/// Every mapped property, in declaration order.
pub const PROPERTIES: &[PropertyDetail] = &[
    PropertyDetail {
        name: "name",
        column_name: "name",
        type_name: "Option<String>",
        id: false,
        generation_type: None,
        generator: None,
        embedded: false,
        nested: false,
        unique: false,
        nullable: false,
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
        name: "credit_limit",
        column_name: "creditLimit",
        type_name: "Option<Decimal>",
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
        precision: 10u32,
        scale: 2u32,
        referenced_column_name: "",
        kind: ::daogen::PropertyKind::Simple,
    },
    PropertyDetail {
        name: "id",
        column_name: "id",
        type_name: "Option<i64>",
        id: true,
        generation_type: Some(::daogen::GenerationType::Identity),
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
        name: "created_by",
        column_name: "createdBy",
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
        length: 64u32,
        precision: 0u32,
        scale: 0u32,
        referenced_column_name: "",
        kind: ::daogen::PropertyKind::Simple,
    },
];
pub const ID_PROPERTIES: &[&str] = &["id"];
pub const DETAIL_PROPERTIES: &[&str] = &["name", "credit_limit", "created_by"];
pub const ID_COLUMN_LIST: &[&str] = &["id"];
pub const DETAIL_COLUMN_LIST: &[&str] = &["name", "creditLimit", "createdBy"];
pub const ID_COLUMNS: &str = "id";
pub const DETAIL_COLUMNS: &str = "name, creditLimit, createdBy";
/// Identifier columns followed by detail columns.
pub const ALL_COLUMNS: &str = "id, name, creditLimit, createdBy";
pub const ID_COLUMNS_QUERY: &str = "id = ?";
pub const ID_PARAMS: &str = "?";
pub const DETAIL_PARAMS: &str = "?, ?, ?";
pub const INSERT_SQL: &str = "INSERT INTO customer (name, creditLimit, createdBy) VALUES (?, ?, ?)";
/// Empty when the entity has no detail column.
pub const UPDATE_SQL: &str = "UPDATE customer SET name = ?, creditLimit = ?, createdBy = ? WHERE id = ?";
pub const SELECT_BY_ID_SQL: &str = "SELECT id, name, creditLimit, createdBy FROM customer WHERE id = ?";
pub const SELECT_ALL_SQL: &str = "SELECT id, name, creditLimit, createdBy FROM customer";
/// Maps a full row onto the entity. Column names may carry a prefix
/// so several entities can be read from one joined row.
#[derive(Debug, Clone)]
pub struct CustomerRowMapper {
    column_prefix: String,
    name_col: String,
    credit_limit_col: String,
    id_col: String,
    created_by_col: String,
}
impl CustomerRowMapper {
    pub fn new() -> Self {
        Self::with_prefix("")
    }
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let column_prefix = prefix.into();
        Self {
            name_col: format!("{}{}", column_prefix, "name"),
            credit_limit_col: format!("{}{}", column_prefix, "creditLimit"),
            id_col: format!("{}{}", column_prefix, "id"),
            created_by_col: format!("{}{}", column_prefix, "createdBy"),
            column_prefix,
        }
    }
    pub fn column_prefix(&self) -> &str {
        &self.column_prefix
    }
}
impl Default for CustomerRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<crate::model::customer::Customer> for CustomerRowMapper {
    fn map_row(&self, row: &dyn Row) -> DaoResult<crate::model::customer::Customer> {
        let mut entity = <crate::model::customer::Customer>::default();
        entity.name = row.get_string(&self.name_col)?;
        entity.credit_limit = row.get_decimal(&self.credit_limit_col)?;
        entity.id = row.get_i64(&self.id_col)?;
        entity.created_by = row.get_string(&self.created_by_col)?;
        Ok(entity)
    }
}
/// Maps the identifier columns only; yields `None` when every
/// identifier is NULL.
#[derive(Debug, Clone)]
pub struct CustomerIdRowMapper {
    id_col: String,
}
impl CustomerIdRowMapper {
    pub fn new() -> Self {
        Self::with_columns("id")
    }
    pub fn with_columns(id_col: impl Into<String>) -> Self {
        Self { id_col: id_col.into() }
    }
}
impl Default for CustomerIdRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<Option<crate::model::customer::Customer>> for CustomerIdRowMapper {
    fn map_row(
        &self,
        row: &dyn Row,
    ) -> DaoResult<Option<crate::model::customer::Customer>> {
        let mut entity = <crate::model::customer::Customer>::default();
        entity.id = row.get_i64(&self.id_col)?;
        Ok(if has_id(&entity) { Some(entity) } else { None })
    }
}
/// Reads a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn get_property_value(
    entity: &crate::model::customer::Customer,
    property: &str,
) -> Value {
    match property {
        "name" => ToValue::to_value(&entity.name),
        "credit_limit" => ToValue::to_value(&entity.credit_limit),
        "id" => ToValue::to_value(&entity.id),
        "created_by" => ToValue::to_value(&entity.created_by),
        other => panic!("Property {} unknown.", other),
    }
}
/// Writes a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn set_property_value(
    entity: &mut crate::model::customer::Customer,
    property: &str,
    value: Value,
) -> DaoResult<()> {
    match property {
        "name" => {
            entity.name = FromValue::from_value(value)?;
        }
        "credit_limit" => {
            entity.credit_limit = FromValue::from_value(value)?;
        }
        "id" => {
            entity.id = FromValue::from_value(value)?;
        }
        "created_by" => {
            entity.created_by = FromValue::from_value(value)?;
        }
        other => panic!("Property {} unknown.", other),
    }
    Ok(())
}
/// Whether any identifier property holds a value.
pub fn has_id(entity: &crate::model::customer::Customer) -> bool {
    ID_PROPERTIES.iter().any(|property| !get_property_value(entity, property).is_null())
}
/// Binds `properties` at consecutive positions starting after `offset`.
pub fn bind_properties(
    entity: &crate::model::customer::Customer,
    properties: &[&str],
    binder: &mut dyn ParameterBinder,
    offset: usize,
) -> DaoResult<()> {
    for (index, property) in properties.iter().enumerate() {
        binder.bind(offset + index + 1, get_property_value(entity, property))?;
    }
    Ok(())
}
/// Statements for `Customer` run through an [`SqlExecutor`].
#[derive(Debug, Clone)]
pub struct CustomerDao<X: SqlExecutor> {
    executor: X,
}
impl<X: SqlExecutor> CustomerDao<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }
    pub fn executor(&self) -> &X {
        &self.executor
    }
    /// Inserts the entity and stores the key the database generated
    /// for it.
    pub fn insert(
        &self,
        entity: &mut crate::model::customer::Customer,
    ) -> DaoResult<()> {
        let key = {
            let entity: &crate::model::customer::Customer = entity;
            self.executor
                .execute_update_returning_generated_key(
                    INSERT_SQL,
                    &|binder: &mut dyn ParameterBinder| bind_properties(
                        entity,
                        DETAIL_PROPERTIES,
                        binder,
                        0,
                    ),
                )?
        };
        if key.is_null() {
            return Err(DaoError::MissingGeneratedKey {
                statement: INSERT_SQL.to_string(),
            });
        }
        set_property_value(entity, ID_PROPERTIES[0], key)
    }
    /// Writes every detail column. Issues no statement when the
    /// entity has none.
    pub fn update(&self, entity: &crate::model::customer::Customer) -> DaoResult<u64> {
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
    pub fn merge(&self, entity: &mut crate::model::customer::Customer) -> DaoResult<()> {
        if has_id(entity) {
            self.update(entity).map(|_| ())
        } else {
            self.insert(entity)
        }
    }
    pub fn get_by_id(
        &self,
        id: impl ToValue,
    ) -> DaoResult<Option<crate::model::customer::Customer>> {
        let params = vec![id.to_value()];
        self.executor.query_one(SELECT_BY_ID_SQL, &params, &CustomerRowMapper::new())
    }
    pub fn find_all(&self) -> DaoResult<Vec<crate::model::customer::Customer>> {
        self.executor.query_many(SELECT_ALL_SQL, &[], &CustomerRowMapper::new())
    }
}
