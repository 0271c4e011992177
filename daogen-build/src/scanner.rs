//! Metadata scanner: turns one type declaration into property records.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::decl::{ColumnDecl, DeclKind, FieldDecl, JoinColumnDecl, MethodDecl, RelationDecl, ReturnKind, TypeDecl};
use crate::error::ConfigError;
use crate::model::{Access, EntityKind, EntityMetadata, Property, PropertyKind, TableBinding, TypeRef};
use crate::resolver::{Lookup, lookup};

/// Embeddable scans already done this round, keyed by qualified name.
///
/// Nested properties are stored with their bare field name as path and
/// re-rooted under each embedding property.
#[derive(Debug, Default)]
pub struct ScanCache {
    embeddables: HashMap<String, Vec<Property>>,
}

impl ScanCache {
    pub fn len(&self) -> usize {
        self.embeddables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddables.is_empty()
    }
}

/// Scans entity and mapped superclass declarations against the full set of
/// declarations of the round.
pub struct Scanner<'a> {
    declarations: &'a [TypeDecl],
    cache: ScanCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessorRole {
    Getter,
    Setter,
}

impl<'a> Scanner<'a> {
    pub fn new(declarations: &'a [TypeDecl]) -> Self {
        Self {
            declarations,
            cache: ScanCache::default(),
        }
    }

    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    /// Scans every entity and mapped superclass, in declaration order.
    pub fn scan_all(&mut self) -> Result<IndexMap<String, EntityMetadata>, ConfigError> {
        let mut entities = IndexMap::new();
        let declarations = self.declarations;
        for decl in declarations.iter().filter(|decl| decl.kind != DeclKind::Embeddable) {
            let entity = self.scan(decl)?;
            entities.insert(entity.qualified_name.clone(), entity);
        }
        Ok(entities)
    }

    pub fn scan(&mut self, decl: &TypeDecl) -> Result<EntityMetadata, ConfigError> {
        let entity_name = decl.qualified_name();
        let kind = match decl.kind {
            DeclKind::MappedSuperclass => EntityKind::MappedSuperclass,
            _ => EntityKind::Entity,
        };

        let mut properties = IndexMap::new();
        for field in decl.fields.iter() {
            if !field.is_persistent() {
                trace!("{}.{} carries no mapping, skipping", decl.name, field.name);
                continue;
            }
            let property = field_property(&entity_name, field)?;

            if field.embedded_id {
                let aggregate = self.embeddable(&entity_name, decl, field, &property.ty)?;
                let mut property = property;
                property.aggregate = Some(aggregate.0);
                let id_path = property.path.clone();
                debug!("Property found {}.{} (embedded identifier {})", decl.name, id_path, property.ty.inner);
                properties.insert(id_path.clone(), property);

                for mut nested in aggregate.1 {
                    let sub_field = nested.path.clone();
                    // The last matching override wins.
                    if let Some(over) = field.attribute_overrides.iter().rev().find(|over| over.name == sub_field) {
                        apply_column(&mut nested, &over.column);
                    }
                    nested.path = format!("{id_path}.{sub_field}");
                    nested.id = true;
                    nested.embedded = true;
                    nested.nested = true;
                    debug!("Property found {}.{} (col:{} id?:true)", decl.name, nested.path, nested.column_name);
                    properties.insert(nested.path.clone(), nested);
                }
            } else {
                debug!(
                    "Property found {}.{} (col:{} id?:{})",
                    decl.name, property.path, property.column_name, property.id
                );
                properties.insert(property.path.clone(), property);
            }
        }

        backfill_accessors(&decl.name, &mut properties, &decl.methods);
        check_generated_ids(&entity_name, &properties)?;
        finalize_access(&entity_name, &mut properties)?;

        Ok(EntityMetadata {
            qualified_name: entity_name,
            simple_name: decl.name.clone(),
            module: decl.module.clone(),
            kind,
            table: TableBinding {
                name: decl.table.clone(),
                schema: decl.schema.clone(),
                catalog: decl.catalog.clone(),
            },
            parent: decl.extends.clone(),
            properties,
        })
    }

    /// Resolves and scans the aggregate type of an embedded identifier,
    /// returning its qualified name and its nested properties.
    fn embeddable(
        &mut self,
        entity_name: &str,
        decl: &TypeDecl,
        field: &FieldDecl,
        ty: &TypeRef,
    ) -> Result<(String, Vec<Property>), ConfigError> {
        let not_embeddable = || ConfigError::NotEmbeddable {
            entity: entity_name.to_string(),
            property: field.name.clone(),
            ty: ty.source.clone(),
        };

        let names = self.declarations.iter().map(|candidate| candidate.qualified_name()).collect::<Vec<_>>();
        let qualified = match lookup(&ty.inner, &decl.module, names.iter().map(String::as_str)) {
            Lookup::Found(qualified) => qualified,
            Lookup::NotFound => return Err(not_embeddable()),
            Lookup::Ambiguous(candidates) => {
                return Err(ConfigError::AmbiguousReference {
                    entity: entity_name.to_string(),
                    name: ty.inner.clone(),
                    candidates,
                });
            }
        };

        if let Some(nested) = self.cache.embeddables.get(&qualified) {
            trace!("Reusing scan of {qualified}");
            return Ok((qualified, nested.clone()));
        }

        let embeddable = self
            .declarations
            .iter()
            .find(|candidate| candidate.qualified_name() == qualified && candidate.kind == DeclKind::Embeddable)
            .ok_or_else(not_embeddable)?;

        let mut nested = IndexMap::new();
        for sub_field in embeddable.fields.iter().filter(|sub_field| sub_field.column.is_some()) {
            let property = field_property(&qualified, sub_field)?;
            nested.insert(property.path.clone(), property);
        }
        backfill_accessors(&embeddable.name, &mut nested, &embeddable.methods);

        let nested: Vec<Property> = nested.into_values().collect();
        self.cache.embeddables.insert(qualified.clone(), nested.clone());
        Ok((qualified, nested))
    }
}

/// Builds the property of a field from its structural markers.
fn field_property(entity_name: &str, field: &FieldDecl) -> Result<Property, ConfigError> {
    let ty = TypeRef::parse(&field.ty).ok_or_else(|| ConfigError::InvalidType {
        entity: entity_name.to_string(),
        property: field.name.clone(),
        ty: field.ty.clone(),
    })?;
    let mut property = Property::new(field.name.clone(), ty);
    property.field_visible = field.visible;

    let not_optional = |property: &Property| ConfigError::NotOptional {
        entity: entity_name.to_string(),
        property: field.name.clone(),
        ty: property.ty.source.clone(),
    };

    if field.id || field.embedded_id {
        // An absent identifier must stay distinguishable from a zero one.
        if !property.ty.optional {
            return Err(not_optional(&property));
        }
        property.id = true;
        property.nullable = false;
        property.unique = true;
        property.insertable = true;
        property.updatable = false;
    }

    if field.embedded_id {
        property.embedded = true;
        if field.generated.is_some() {
            return Err(ConfigError::GeneratedCompositeId {
                entity: entity_name.to_string(),
                property: field.name.clone(),
            });
        }
        return Ok(property);
    }

    match field.relation {
        Some(RelationDecl::ManyToOne) => {
            property.kind = PropertyKind::ManyToOne;
            if !property.ty.optional {
                return Err(not_optional(&property));
            }
            if let Some(join) = &field.join_column {
                apply_join_column(&mut property, join);
            }
        }
        Some(RelationDecl::OneToMany) => property.kind = PropertyKind::OneToMany,
        Some(RelationDecl::ManyToMany) => property.kind = PropertyKind::ManyToMany,
        None => {
            if let Some(column) = &field.column {
                apply_column(&mut property, column);
            }
        }
    }

    if let Some(generated) = &field.generated {
        if !field.id {
            return Err(ConfigError::GeneratedWithoutId {
                entity: entity_name.to_string(),
                property: field.name.clone(),
            });
        }
        property.generation = Some(generated.strategy);
        property.generator = generated.generator.clone();
    }

    Ok(property)
}

fn apply_column(property: &mut Property, column: &ColumnDecl) {
    if let Some(name) = column.name.as_ref().filter(|name| !name.is_empty()) {
        property.column_name = name.clone();
    }
    if let Some(length) = column.length {
        property.length = length;
    }
    if let Some(nullable) = column.nullable {
        property.nullable = nullable;
    }
    if let Some(unique) = column.unique {
        property.unique = unique;
    }
    if let Some(insertable) = column.insertable {
        property.insertable = insertable;
    }
    if let Some(updatable) = column.updatable {
        property.updatable = updatable;
    }
    if let Some(definition) = &column.definition {
        property.column_definition = definition.clone();
    }
    if let Some(table) = &column.table {
        property.table = table.clone();
    }
    if let Some(precision) = column.precision {
        property.precision = precision;
    }
    if let Some(scale) = column.scale {
        property.scale = scale;
    }
}

fn apply_join_column(property: &mut Property, join: &JoinColumnDecl) {
    if let Some(name) = join.name.as_ref().filter(|name| !name.is_empty()) {
        property.column_name = name.clone();
    }
    if let Some(nullable) = join.nullable {
        property.nullable = nullable;
    }
    if let Some(unique) = join.unique {
        property.unique = unique;
    }
    if let Some(insertable) = join.insertable {
        property.insertable = insertable;
    }
    if let Some(updatable) = join.updatable {
        property.updatable = updatable;
    }
    if let Some(definition) = &join.definition {
        property.column_definition = definition.clone();
    }
    if let Some(table) = &join.table {
        property.table = table.clone();
    }
    if let Some(referenced) = &join.referenced_column {
        property.referenced_column_name = referenced.clone();
    }
}

/// Splits an accessor method name into its role and property name.
///
/// `get_x`/`getX` and `is_x`/`isX` read, `set_x`/`setX` write. The first
/// letter of the property name is matched case-insensitively.
fn accessor_target(method: &MethodDecl) -> Option<(AccessorRole, String)> {
    let (role, rest) = if let Some(rest) = method.name.strip_prefix("get") {
        (AccessorRole::Getter, rest)
    } else if let Some(rest) = method.name.strip_prefix("is") {
        (AccessorRole::Getter, rest)
    } else if let Some(rest) = method.name.strip_prefix("set") {
        (AccessorRole::Setter, rest)
    } else {
        return None;
    };

    let shape_matches = match role {
        AccessorRole::Setter => method.params == 1 && method.returns == ReturnKind::Unit,
        AccessorRole::Getter if method.name.starts_with("is") => {
            method.params == 0 && method.returns == ReturnKind::Bool
        }
        AccessorRole::Getter => method.params == 0 && method.returns != ReturnKind::Unit,
    };
    if !shape_matches {
        return None;
    }

    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some((role, first.to_lowercase().chain(chars).collect()))
}

/// Records accessor names on the properties they name.
///
/// Accessors that name no recorded property are ignored.
fn backfill_accessors(type_name: &str, properties: &mut IndexMap<String, Property>, methods: &[MethodDecl]) {
    for method in methods {
        let Some((role, path)) = accessor_target(method) else {
            continue;
        };
        let Some(property) = properties.get_mut(&path) else {
            trace!("{type_name}::{} names no mapped property, ignoring", method.name);
            continue;
        };
        match role {
            AccessorRole::Getter => {
                trace!("Getter found for property {type_name}.{path}: {}", method.name);
                property.getter = Some(Access::Method(method.name.clone()));
            }
            AccessorRole::Setter => {
                trace!("Setter found for property {type_name}.{path}: {}", method.name);
                property.setter = Some(Access::Method(method.name.clone()));
            }
        }
    }
}

pub(crate) fn check_generated_ids(entity_name: &str, properties: &IndexMap<String, Property>) -> Result<(), ConfigError> {
    let generated: Vec<&Property> = properties.values().filter(|property| property.generation.is_some()).collect();
    if generated.len() > 1 {
        return Err(ConfigError::MultipleGeneratedIds {
            entity: entity_name.to_string(),
        });
    }
    if let Some(property) = generated.first()
        && properties.values().filter(|candidate| candidate.is_id_column()).count() > 1
    {
        return Err(ConfigError::GeneratedCompositeId {
            entity: entity_name.to_string(),
            property: property.path.clone(),
        });
    }
    Ok(())
}

/// Falls back to direct field access where no accessor was found.
///
/// Collection relations carry no column and need no access.
fn finalize_access(entity_name: &str, properties: &mut IndexMap<String, Property>) -> Result<(), ConfigError> {
    for property in properties.values_mut() {
        if matches!(property.kind, PropertyKind::OneToMany | PropertyKind::ManyToMany) {
            continue;
        }
        for (slot, accessor) in [(&mut property.getter, "getter"), (&mut property.setter, "setter")] {
            if slot.is_some() {
                continue;
            }
            if !property.field_visible {
                return Err(ConfigError::MissingAccessor {
                    entity: entity_name.to_string(),
                    property: property.path.clone(),
                    accessor,
                });
            }
            *slot = Some(Access::Field(property.field.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{AttributeOverrideDecl, GeneratedDecl};
    use crate::model::GenerationType;

    fn column(name: &str, ty: &str) -> FieldDecl {
        let mut field = FieldDecl::new(name, ty);
        field.column = Some(ColumnDecl::default());
        field.visible = true;
        field
    }

    fn decl(name: &str, kind: DeclKind, fields: Vec<FieldDecl>) -> TypeDecl {
        TypeDecl {
            name: name.into(),
            module: "crate::model".into(),
            kind,
            table: None,
            schema: None,
            catalog: None,
            extends: None,
            fields,
            methods: Vec::new(),
        }
    }

    fn order_item_id() -> TypeDecl {
        let mut id_type = decl(
            "OrderItemId",
            DeclKind::Embeddable,
            vec![column("article_id", "Option<i32>"), column("order_id", "Option<i32>")],
        );
        id_type.fields[0].visible = false;
        id_type.methods = vec![
            MethodDecl::new("get_article_id", 0, ReturnKind::Value),
            MethodDecl::new("set_article_id", 1, ReturnKind::Unit),
        ];
        id_type
    }

    fn order_item(overrides: Vec<AttributeOverrideDecl>) -> TypeDecl {
        let mut id = FieldDecl::new("id", "Option<OrderItemId>");
        id.embedded_id = true;
        id.visible = true;
        id.attribute_overrides = overrides;
        decl("OrderItem", DeclKind::Entity, vec![id, column("quantity", "Option<i32>")])
    }

    fn rename(name: &str, column: &str) -> AttributeOverrideDecl {
        AttributeOverrideDecl {
            name: name.into(),
            column: ColumnDecl {
                name: Some(column.into()),
                ..ColumnDecl::default()
            },
        }
    }

    #[test]
    fn scans_columns_with_defaults() {
        let mut id = column("id", "Option<i32>");
        id.id = true;
        id.generated = Some(GeneratedDecl {
            strategy: GenerationType::Identity,
            generator: Some("article_seq".into()),
        });
        id.column = Some(ColumnDecl {
            name: Some("idArticle".into()),
            ..ColumnDecl::default()
        });
        let mut code = column("code", "Option<String>");
        code.column = Some(ColumnDecl {
            length: Some(20),
            nullable: Some(false),
            ..ColumnDecl::default()
        });
        let declarations = vec![decl("Article", DeclKind::Entity, vec![id, code, FieldDecl::new("scratch", "u8")])];

        let mut scanner = Scanner::new(&declarations);
        let article = scanner.scan(&declarations[0]).unwrap();

        assert_eq!(article.properties.keys().collect::<Vec<_>>(), vec!["id", "code"]);
        let id = &article.properties["id"];
        assert_eq!(id.column_name, "idArticle");
        assert!(id.id && id.unique && !id.nullable && !id.updatable);
        assert_eq!(id.generation, Some(GenerationType::Identity));
        assert_eq!(id.generator.as_deref(), Some("article_seq"));

        let code = &article.properties["code"];
        assert_eq!(code.column_name, "code");
        assert_eq!(code.length, 20);
        assert!(!code.nullable && code.updatable && code.insertable && !code.unique);
        assert_eq!(code.getter, Some(Access::Field("code".into())));
    }

    #[test]
    fn flattens_embedded_identifier_with_override() {
        let declarations = vec![order_item_id(), order_item(vec![rename("order_id", "orderRef"), rename("article_id", "artId")])];
        let mut scanner = Scanner::new(&declarations);
        let item = scanner.scan(&declarations[1]).unwrap();

        assert_eq!(
            item.properties.keys().collect::<Vec<_>>(),
            vec!["id", "id.article_id", "id.order_id", "quantity"]
        );
        let aggregate = &item.properties["id"];
        assert!(aggregate.is_aggregate());
        assert_eq!(aggregate.aggregate.as_deref(), Some("crate::model::OrderItemId"));

        let article_id = &item.properties["id.article_id"];
        assert!(article_id.id && article_id.embedded && article_id.nested);
        assert_eq!(article_id.column_name, "artId");
        assert_eq!(article_id.getter, Some(Access::Method("get_article_id".into())));
        assert_eq!(item.properties["id.order_id"].column_name, "orderRef");
        assert_eq!(item.properties["id.order_id"].getter, Some(Access::Field("order_id".into())));
        assert_eq!(scanner.cache().len(), 1);
    }

    #[test]
    fn later_duplicate_override_wins() {
        let declarations =
            vec![order_item_id(), order_item(vec![rename("article_id", "first"), rename("article_id", "second")])];
        let item = Scanner::new(&declarations).scan(&declarations[1]).unwrap();
        assert_eq!(item.properties["id.article_id"].column_name, "second");
    }

    #[test]
    fn embedded_type_must_be_embeddable() {
        let declarations = vec![decl("OrderItemId", DeclKind::Entity, Vec::new()), order_item(Vec::new())];
        let err = Scanner::new(&declarations).scan(&declarations[1]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotEmbeddable {
                entity: "crate::model::OrderItem".into(),
                property: "id".into(),
                ty: "Option<OrderItemId>".into(),
            }
        );
    }

    #[test]
    fn accessors_backfill_existing_properties_only() {
        let mut price = column("price", "Option<rust_decimal::Decimal>");
        price.visible = false;
        let mut active = column("active", "bool");
        active.visible = false;
        let mut article = decl("Article", DeclKind::Entity, vec![price, active]);
        article.methods = vec![
            MethodDecl::new("getPrice", 0, ReturnKind::Value),
            MethodDecl::new("set_price", 1, ReturnKind::Unit),
            MethodDecl::new("isActive", 0, ReturnKind::Bool),
            MethodDecl::new("setActive", 1, ReturnKind::Unit),
            MethodDecl::new("get_phantom", 0, ReturnKind::Value),
            MethodDecl::new("is_price", 0, ReturnKind::Value),
        ];
        let declarations = vec![article];
        let scanned = Scanner::new(&declarations).scan(&declarations[0]).unwrap();

        assert_eq!(scanned.properties.len(), 2);
        assert_eq!(scanned.properties["price"].getter, Some(Access::Method("getPrice".into())));
        assert_eq!(scanned.properties["price"].setter, Some(Access::Method("set_price".into())));
        assert_eq!(scanned.properties["active"].getter, Some(Access::Method("isActive".into())));
    }

    #[test]
    fn hidden_field_without_accessor_is_fatal() {
        let mut code = column("code", "Option<String>");
        code.visible = false;
        let declarations = vec![decl("Article", DeclKind::Entity, vec![code])];
        let err = Scanner::new(&declarations).scan(&declarations[0]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAccessor { accessor: "getter", .. }));
    }

    #[test]
    fn references_must_be_optional() {
        let mut supplier = FieldDecl::new("supplier", "Supplier");
        supplier.relation = Some(RelationDecl::ManyToOne);
        supplier.visible = true;
        let declarations = vec![decl("Article", DeclKind::Entity, vec![supplier])];
        let err = Scanner::new(&declarations).scan(&declarations[0]).unwrap_err();
        assert!(matches!(err, ConfigError::NotOptional { .. }));
    }

    #[test]
    fn generated_composite_identifier_is_fatal() {
        let mut first = column("first", "Option<i32>");
        first.id = true;
        first.generated = Some(GeneratedDecl::default());
        let mut second = column("second", "Option<i32>");
        second.id = true;
        let declarations = vec![decl("Pair", DeclKind::Entity, vec![first, second])];
        let err = Scanner::new(&declarations).scan(&declarations[0]).unwrap_err();
        assert!(matches!(err, ConfigError::GeneratedCompositeId { .. }));
    }

    #[test]
    fn identifiers_must_be_optional() {
        let mut id = column("id", "i32");
        id.id = true;
        let declarations = vec![decl("Plain", DeclKind::Entity, vec![id, column("name", "Option<String>")])];
        let err = Scanner::new(&declarations).scan(&declarations[0]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotOptional {
                entity: "crate::model::Plain".into(),
                property: "id".into(),
                ty: "i32".into(),
            }
        );
    }

    #[test]
    fn inherited_generated_identifier_beside_an_own_one_is_fatal() {
        let mut own = column("code", "Option<String>");
        own.id = true;
        let mut inherited = Property::new("id", TypeRef::parse("Option<i64>").unwrap());
        inherited.id = true;
        inherited.generation = Some(GenerationType::Identity);

        let declarations = vec![decl("Child", DeclKind::Entity, vec![own])];
        let mut properties = Scanner::new(&declarations).scan(&declarations[0]).unwrap().properties;
        assert!(check_generated_ids("crate::model::Child", &properties).is_ok());
        properties.insert("id".into(), inherited);
        assert_eq!(
            check_generated_ids("crate::model::Child", &properties),
            Err(ConfigError::GeneratedCompositeId {
                entity: "crate::model::Child".into(),
                property: "id".into(),
            })
        );
    }
}
