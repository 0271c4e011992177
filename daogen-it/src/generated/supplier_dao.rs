//! Data access for `crate::model::supplier::Supplier`.
//!
//! Generated by daogen-build. Do not edit manually.
#![allow(unused_imports, unused_mut, clippy::all)]
use ::daogen::{
    DaoError, DaoResult, FromValue, ParameterBinder, PropertyDetail, Reference, Row,
    RowMapper, SqlExecutor, ToValue, Value,
};
pub const TABLE_NAME: &str = "suppliers";
/// Every mapped property, in declaration order.
pub const PROPERTIES: &[PropertyDetail] = &[
    PropertyDetail {
        name: "id",
        column_name: "idSuppliers",
        type_name: "Option<i32>",
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
        length: 80u32,
        precision: 0u32,
        scale: 0u32,
        referenced_column_name: "",
        kind: ::daogen::PropertyKind::Simple,
    },
    PropertyDetail {
        name: "contact",
        column_name: "contactEmail",
        type_name: "Tracked<String>",
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
pub const DETAIL_PROPERTIES: &[&str] = &["name", "contact"];
pub const ID_COLUMN_LIST: &[&str] = &["idSuppliers"];
pub const DETAIL_COLUMN_LIST: &[&str] = &["name", "contactEmail"];
pub const ID_COLUMNS: &str = "idSuppliers";
pub const DETAIL_COLUMNS: &str = "name, contactEmail";
/// Identifier columns followed by detail columns.
pub const ALL_COLUMNS: &str = "idSuppliers, name, contactEmail";
pub const ID_COLUMNS_QUERY: &str = "idSuppliers = ?";
pub const ID_PARAMS: &str = "?";
pub const DETAIL_PARAMS: &str = "?, ?";
pub const INSERT_SQL: &str = "INSERT INTO suppliers (name, contactEmail, idSuppliers) VALUES (?, ?, ?)";
/// Empty when the entity has no detail column.
pub const UPDATE_SQL: &str = "UPDATE suppliers SET name = ?, contactEmail = ? WHERE idSuppliers = ?";
pub const SELECT_BY_ID_SQL: &str = "SELECT idSuppliers, name, contactEmail FROM suppliers WHERE idSuppliers = ?";
pub const SELECT_ALL_SQL: &str = "SELECT idSuppliers, name, contactEmail FROM suppliers";
/// Maps a full row onto the entity. Column names may carry a prefix
/// so several entities can be read from one joined row.
#[derive(Debug, Clone)]
pub struct SupplierRowMapper {
    column_prefix: String,
    id_col: String,
    name_col: String,
    contact_col: String,
}
impl SupplierRowMapper {
    pub fn new() -> Self {
        Self::with_prefix("")
    }
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let column_prefix = prefix.into();
        Self {
            id_col: format!("{}{}", column_prefix, "idSuppliers"),
            name_col: format!("{}{}", column_prefix, "name"),
            contact_col: format!("{}{}", column_prefix, "contactEmail"),
            column_prefix,
        }
    }
    pub fn column_prefix(&self) -> &str {
        &self.column_prefix
    }
}
impl Default for SupplierRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<crate::model::supplier::Supplier> for SupplierRowMapper {
    fn map_row(&self, row: &dyn Row) -> DaoResult<crate::model::supplier::Supplier> {
        let mut entity = <crate::model::supplier::Supplier>::default();
        entity.id = row.get_i32(&self.id_col)?;
        entity.name = row.get_string(&self.name_col)?;
        entity.contact = FromValue::from_value(row.get_value(&self.contact_col)?)?;
        Ok(entity)
    }
}
/// Maps the identifier columns only; yields `None` when every
/// identifier is NULL.
#[derive(Debug, Clone)]
pub struct SupplierIdRowMapper {
    id_col: String,
}
impl SupplierIdRowMapper {
    pub fn new() -> Self {
        Self::with_columns("idSuppliers")
    }
    pub fn with_columns(id_col: impl Into<String>) -> Self {
        Self { id_col: id_col.into() }
    }
}
impl Default for SupplierIdRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<Option<crate::model::supplier::Supplier>> for SupplierIdRowMapper {
    fn map_row(
        &self,
        row: &dyn Row,
    ) -> DaoResult<Option<crate::model::supplier::Supplier>> {
        let mut entity = <crate::model::supplier::Supplier>::default();
        entity.id = row.get_i32(&self.id_col)?;
        Ok(if has_id(&entity) { Some(entity) } else { None })
    }
}
/// Reads a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn get_property_value(
    entity: &crate::model::supplier::Supplier,
    property: &str,
) -> Value {
    match property {
        "id" => ToValue::to_value(&entity.id),
        "name" => ToValue::to_value(&entity.name),
        "contact" => ToValue::to_value(&entity.contact),
        other => panic!("Property {} unknown.", other),
    }
}
/// Writes a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn set_property_value(
    entity: &mut crate::model::supplier::Supplier,
    property: &str,
    value: Value,
) -> DaoResult<()> {
    match property {
        "id" => {
            entity.id = FromValue::from_value(value)?;
        }
        "name" => {
            entity.name = FromValue::from_value(value)?;
        }
        "contact" => {
            entity.contact = FromValue::from_value(value)?;
        }
        other => panic!("Property {} unknown.", other),
    }
    Ok(())
}
/// Whether any identifier property holds a value.
pub fn has_id(entity: &crate::model::supplier::Supplier) -> bool {
    ID_PROPERTIES.iter().any(|property| !get_property_value(entity, property).is_null())
}
/// Binds `properties` at consecutive positions starting after `offset`.
pub fn bind_properties(
    entity: &crate::model::supplier::Supplier,
    properties: &[&str],
    binder: &mut dyn ParameterBinder,
    offset: usize,
) -> DaoResult<()> {
    for (index, property) in properties.iter().enumerate() {
        binder.bind(offset + index + 1, get_property_value(entity, property))?;
    }
    Ok(())
}
/// Statements for `Supplier` run through an [`SqlExecutor`].
#[derive(Debug, Clone)]
pub struct SupplierDao<X: SqlExecutor> {
    executor: X,
}
impl<X: SqlExecutor> SupplierDao<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }
    pub fn executor(&self) -> &X {
        &self.executor
    }
    pub fn insert(
        &self,
        entity: &mut crate::model::supplier::Supplier,
    ) -> DaoResult<()> {
        let entity: &crate::model::supplier::Supplier = entity;
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
    pub fn update(&self, entity: &crate::model::supplier::Supplier) -> DaoResult<u64> {
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
    pub fn merge(&self, entity: &mut crate::model::supplier::Supplier) -> DaoResult<()> {
        if has_id(entity) {
            self.update(entity).map(|_| ())
        } else {
            self.insert(entity)
        }
    }
    pub fn get_by_id(
        &self,
        id: impl ToValue,
    ) -> DaoResult<Option<crate::model::supplier::Supplier>> {
        let params = vec![id.to_value()];
        self.executor.query_one(SELECT_BY_ID_SQL, &params, &SupplierRowMapper::new())
    }
    pub fn find_all(&self) -> DaoResult<Vec<crate::model::supplier::Supplier>> {
        self.executor.query_many(SELECT_ALL_SQL, &[], &SupplierRowMapper::new())
    }
}
