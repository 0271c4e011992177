//! Data access for `crate::model::article::Article`.
//!
//! Generated by daogen-build. Do not edit manually.
#![allow(unused_imports, unused_mut, clippy::all)]
use ::daogen::{
    DaoError, DaoResult, FromValue, ParameterBinder, PropertyDetail, Reference, Row,
    RowMapper, SqlExecutor, ToValue, Value,
};
pub const TABLE_NAME: &str = "article";
/// Every mapped property, in declaration order.
pub const PROPERTIES: &[PropertyDetail] = &[
    PropertyDetail {
        name: "id",
        column_name: "idArticle",
        type_name: "Option<i32>",
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
        name: "code",
        column_name: "code",
        type_name: "Option<String>",
        id: false,
        generation_type: None,
        generator: None,
        embedded: false,
        nested: false,
        unique: true,
        nullable: false,
        insertable: true,
        updatable: true,
        column_definition: "",
        table: "",
        length: 20u32,
        precision: 0u32,
        scale: 0u32,
        referenced_column_name: "",
        kind: ::daogen::PropertyKind::Simple,
    },
    PropertyDetail {
        name: "description",
        column_name: "description",
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
    PropertyDetail {
        name: "price",
        column_name: "price",
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
        name: "active",
        column_name: "active",
        type_name: "bool",
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
        name: "supplier",
        column_name: "supplierId",
        type_name: "Option<Supplier>",
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
        referenced_column_name: "idSuppliers",
        kind: ::daogen::PropertyKind::ManyToOne,
    },
    PropertyDetail {
        name: "order_items",
        column_name: "order_items",
        type_name: "Vec<OrderItem>",
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
        kind: ::daogen::PropertyKind::OneToMany,
    },
];
pub const ID_PROPERTIES: &[&str] = &["id"];
pub const DETAIL_PROPERTIES: &[&str] = &[
    "code",
    "description",
    "price",
    "active",
    "supplier",
];
pub const ID_COLUMN_LIST: &[&str] = &["idArticle"];
pub const DETAIL_COLUMN_LIST: &[&str] = &[
    "code",
    "description",
    "price",
    "active",
    "supplierId",
];
pub const ID_COLUMNS: &str = "idArticle";
pub const DETAIL_COLUMNS: &str = "code, description, price, active, supplierId";
/// Identifier columns followed by detail columns.
pub const ALL_COLUMNS: &str = "idArticle, code, description, price, active, supplierId";
pub const ID_COLUMNS_QUERY: &str = "idArticle = ?";
pub const ID_PARAMS: &str = "?";
pub const DETAIL_PARAMS: &str = "?, ?, ?, ?, ?";
pub const INSERT_SQL: &str = "INSERT INTO article (code, description, price, active, supplierId) VALUES (?, ?, ?, ?, ?)";
/// Empty when the entity has no detail column.
pub const UPDATE_SQL: &str = "UPDATE article SET code = ?, description = ?, price = ?, active = ?, supplierId = ? WHERE idArticle = ?";
pub const SELECT_BY_ID_SQL: &str = "SELECT idArticle, code, description, price, active, supplierId FROM article WHERE idArticle = ?";
pub const SELECT_ALL_SQL: &str = "SELECT idArticle, code, description, price, active, supplierId FROM article";
/// Maps a full row onto the entity. Column names may carry a prefix
/// so several entities can be read from one joined row.
#[derive(Debug, Clone)]
pub struct ArticleRowMapper {
    column_prefix: String,
    id_col: String,
    code_col: String,
    description_col: String,
    price_col: String,
    active_col: String,
    supplier_col: String,
}
impl ArticleRowMapper {
    pub fn new() -> Self {
        Self::with_prefix("")
    }
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let column_prefix = prefix.into();
        Self {
            id_col: format!("{}{}", column_prefix, "idArticle"),
            code_col: format!("{}{}", column_prefix, "code"),
            description_col: format!("{}{}", column_prefix, "description"),
            price_col: format!("{}{}", column_prefix, "price"),
            active_col: format!("{}{}", column_prefix, "active"),
            supplier_col: format!("{}{}", column_prefix, "supplierId"),
            column_prefix,
        }
    }
    pub fn column_prefix(&self) -> &str {
        &self.column_prefix
    }
}
impl Default for ArticleRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<crate::model::article::Article> for ArticleRowMapper {
    fn map_row(&self, row: &dyn Row) -> DaoResult<crate::model::article::Article> {
        let mut entity = <crate::model::article::Article>::default();
        entity.set_id(row.get_i32(&self.id_col)?);
        entity.set_code(row.get_string(&self.code_col)?);
        entity.set_description(row.get_string(&self.description_col)?);
        entity.set_price(row.get_decimal(&self.price_col)?);
        entity.set_active(row.get_bool(&self.active_col)?.unwrap_or_default());
        entity
            .set_supplier(
                crate::generated::supplier_dao::SupplierIdRowMapper::with_columns(
                        self.supplier_col.as_str(),
                    )
                    .map_row(row)?,
            );
        Ok(entity)
    }
}
/// Maps the identifier columns only; yields `None` when every
/// identifier is NULL.
#[derive(Debug, Clone)]
pub struct ArticleIdRowMapper {
    id_col: String,
}
impl ArticleIdRowMapper {
    pub fn new() -> Self {
        Self::with_columns("idArticle")
    }
    pub fn with_columns(id_col: impl Into<String>) -> Self {
        Self { id_col: id_col.into() }
    }
}
impl Default for ArticleIdRowMapper {
    fn default() -> Self {
        Self::new()
    }
}
impl RowMapper<Option<crate::model::article::Article>> for ArticleIdRowMapper {
    fn map_row(
        &self,
        row: &dyn Row,
    ) -> DaoResult<Option<crate::model::article::Article>> {
        let mut entity = <crate::model::article::Article>::default();
        entity.set_id(row.get_i32(&self.id_col)?);
        Ok(if has_id(&entity) { Some(entity) } else { None })
    }
}
/// Reads a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn get_property_value(
    entity: &crate::model::article::Article,
    property: &str,
) -> Value {
    match property {
        "id" => ToValue::to_value(&entity.get_id()),
        "code" => ToValue::to_value(&entity.get_code()),
        "description" => ToValue::to_value(&entity.get_description()),
        "price" => ToValue::to_value(&entity.get_price()),
        "active" => ToValue::to_value(&entity.is_active()),
        "supplier" => {
            Reference::<
                crate::model::supplier::Supplier,
            >::referenced(&entity.get_supplier())
                .map(|target| crate::generated::supplier_dao::get_property_value(
                    target,
                    "id",
                ))
                .unwrap_or(Value::Null)
        }
        other => panic!("Property {} unknown.", other),
    }
}
/// Writes a property by path.
///
/// # Panics
///
/// Panics if `property` names no mapped property.
pub fn set_property_value(
    entity: &mut crate::model::article::Article,
    property: &str,
    value: Value,
) -> DaoResult<()> {
    match property {
        "id" => {
            entity.set_id(FromValue::from_value(value)?);
        }
        "code" => {
            entity.set_code(FromValue::from_value(value)?);
        }
        "description" => {
            entity.set_description(FromValue::from_value(value)?);
        }
        "price" => {
            entity.set_price(FromValue::from_value(value)?);
        }
        "active" => {
            entity.set_active(FromValue::from_value(value)?);
        }
        "supplier" => {
            if value.is_null() {
                entity.set_supplier(None);
            } else {
                let mut target = <crate::model::supplier::Supplier>::default();
                crate::generated::supplier_dao::set_property_value(
                    &mut target,
                    "id",
                    value,
                )?;
                entity.set_supplier(Some(target));
            }
        }
        other => panic!("Property {} unknown.", other),
    }
    Ok(())
}
/// Whether any identifier property holds a value.
pub fn has_id(entity: &crate::model::article::Article) -> bool {
    ID_PROPERTIES.iter().any(|property| !get_property_value(entity, property).is_null())
}
/// Binds `properties` at consecutive positions starting after `offset`.
pub fn bind_properties(
    entity: &crate::model::article::Article,
    properties: &[&str],
    binder: &mut dyn ParameterBinder,
    offset: usize,
) -> DaoResult<()> {
    for (index, property) in properties.iter().enumerate() {
        binder.bind(offset + index + 1, get_property_value(entity, property))?;
    }
    Ok(())
}
/// Statements for `Article` run through an [`SqlExecutor`].
#[derive(Debug, Clone)]
pub struct ArticleDao<X: SqlExecutor> {
    executor: X,
}
impl<X: SqlExecutor> ArticleDao<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }
    pub fn executor(&self) -> &X {
        &self.executor
    }
    /// Inserts the entity and stores the key the database generated
    /// for it.
    pub fn insert(&self, entity: &mut crate::model::article::Article) -> DaoResult<()> {
        let key = {
            let entity: &crate::model::article::Article = entity;
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
    pub fn update(&self, entity: &crate::model::article::Article) -> DaoResult<u64> {
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
    pub fn merge(&self, entity: &mut crate::model::article::Article) -> DaoResult<()> {
        if has_id(entity) {
            self.update(entity).map(|_| ())
        } else {
            self.insert(entity)
        }
    }
    pub fn get_by_id(
        &self,
        id: impl ToValue,
    ) -> DaoResult<Option<crate::model::article::Article>> {
        let params = vec![id.to_value()];
        self.executor.query_one(SELECT_BY_ID_SQL, &params, &ArticleRowMapper::new())
    }
    pub fn find_all(&self) -> DaoResult<Vec<crate::model::article::Article>> {
        self.executor.query_many(SELECT_ALL_SQL, &[], &ArticleRowMapper::new())
    }
}
