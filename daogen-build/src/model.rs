//! Typed intermediate model shared by the scanner, merger, resolver and emitter.

use indexmap::IndexMap;
use quote::ToTokens;
use serde::{Deserialize, Serialize};

/// Every scanned entity and mapped superclass of one round, keyed by
/// qualified name, in scan order.
pub type EntityMap = IndexMap<String, EntityMetadata>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Entity,
    MappedSuperclass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Simple,
    ManyToOne,
    ManyToMany,
    OneToMany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationType {
    Auto,
    Identity,
    Sequence,
    Table,
}

/// How a declared type is read from and written to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    /// Converted through `FromValue`/`ToValue`.
    Opaque,
}

/// A declared property type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Normalized source text, e.g. `Option<rust_decimal::Decimal>`.
    pub source: String,
    /// Declared as `Option<T>`.
    pub optional: bool,
    /// `T` for `Option<T>`, the full type otherwise.
    pub inner: String,
    pub kind: ValueKind,
}

impl TypeRef {
    /// Parses a type from source text. Returns `None` if it is not a type.
    pub fn parse(source: &str) -> Option<Self> {
        let ty: syn::Type = syn::parse_str(source).ok()?;
        Some(Self::from_type(&ty))
    }

    pub fn from_type(ty: &syn::Type) -> Self {
        let (optional, inner) = match option_inner(ty) {
            Some(inner) => (true, inner),
            None => (false, ty),
        };
        Self {
            source: normalize(ty),
            optional,
            inner: normalize(inner),
            kind: classify(inner),
        }
    }

    /// Last path segment of the inner type, e.g. `Supplier` for
    /// `Option<crate::model::Supplier>`.
    pub fn inner_simple_name(&self) -> &str {
        let base = self.inner.split('<').next().unwrap_or(&self.inner);
        base.rsplit("::").next().unwrap_or(base)
    }
}

fn normalize(ty: &syn::Type) -> String {
    ty.to_token_stream().to_string().split_whitespace().collect::<Vec<_>>().concat()
}

fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn classify(ty: &syn::Type) -> ValueKind {
    let syn::Type::Path(path) = ty else {
        return ValueKind::Opaque;
    };
    let Some(segment) = path.path.segments.last() else {
        return ValueKind::Opaque;
    };
    if !segment.arguments.is_none() {
        return ValueKind::Opaque;
    }
    match segment.ident.to_string().as_str() {
        "String" => ValueKind::Text,
        "bool" => ValueKind::Bool,
        "i16" => ValueKind::I16,
        "i32" => ValueKind::I32,
        "i64" => ValueKind::I64,
        "f32" => ValueKind::F32,
        "f64" => ValueKind::F64,
        "Decimal" => ValueKind::Decimal,
        _ => ValueKind::Opaque,
    }
}

/// How generated code reaches a property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Accessor method, called as `value.name(..)`.
    Method(String),
    /// Direct access to a visible field.
    Field(String),
}

/// The entity a MANY_TO_ONE property points to, with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub qualified_name: String,
    pub simple_name: String,
    pub id_path: String,
    pub id_column: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Dotted for nested properties, e.g. `id.article_id`.
    pub path: String,
    pub ty: TypeRef,
    pub column_name: String,
    pub kind: PropertyKind,
    pub id: bool,
    pub embedded: bool,
    pub nested: bool,
    pub unique: bool,
    pub nullable: bool,
    pub insertable: bool,
    pub updatable: bool,
    pub generation: Option<GenerationType>,
    pub generator: Option<String>,
    pub column_definition: String,
    pub table: String,
    pub length: u32,
    pub precision: u32,
    pub scale: u32,
    pub referenced_column_name: String,
    /// Qualified name of the embeddable aggregate, for embedded identifiers.
    pub aggregate: Option<String>,
    /// Set by the resolver for MANY_TO_ONE properties whose target is known.
    pub reference: Option<ResolvedReference>,
    pub getter: Option<Access>,
    pub setter: Option<Access>,
    /// Field name, and whether it is reachable from generated code.
    pub field: String,
    pub field_visible: bool,
}

impl Property {
    /// A plain column property with the default column attributes.
    pub fn new(path: impl Into<String>, ty: TypeRef) -> Self {
        let path = path.into();
        let field = path.rsplit('.').next().unwrap_or(&path).to_string();
        Self {
            column_name: field.clone(),
            path,
            ty,
            kind: PropertyKind::Simple,
            id: false,
            embedded: false,
            nested: false,
            unique: false,
            nullable: true,
            insertable: true,
            updatable: true,
            generation: None,
            generator: None,
            column_definition: String::new(),
            table: String::new(),
            length: 255,
            precision: 0,
            scale: 0,
            referenced_column_name: String::new(),
            aggregate: None,
            reference: None,
            getter: None,
            setter: None,
            field,
            field_visible: false,
        }
    }

    /// Last segment of the path.
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Path of the embedded identifier this nested property belongs to.
    pub fn parent_path(&self) -> Option<&str> {
        if !self.nested {
            return None;
        }
        self.path.split_once('.').map(|(parent, _)| parent)
    }

    /// The embedded identifier aggregate itself, which has no column.
    pub fn is_aggregate(&self) -> bool {
        self.embedded && !self.nested
    }

    /// Whether the property maps onto a column of the entity's table.
    pub fn is_column(&self) -> bool {
        !self.is_aggregate() && matches!(self.kind, PropertyKind::Simple | PropertyKind::ManyToOne)
    }

    pub fn is_id_column(&self) -> bool {
        self.id && self.is_column()
    }

    pub fn is_detail_column(&self) -> bool {
        !self.id && self.is_column()
    }
}

/// Table binding of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBinding {
    pub name: Option<String>,
    pub schema: Option<String>,
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetadata {
    pub qualified_name: String,
    pub simple_name: String,
    pub module: String,
    pub kind: EntityKind,
    pub table: TableBinding,
    /// Parent type as declared, resolved by the merger.
    pub parent: Option<String>,
    pub properties: IndexMap<String, Property>,
}

impl EntityMetadata {
    /// Table name prefixed by the catalog, or by the schema when no catalog is set.
    pub fn table_name(&self) -> String {
        let name = self.table.name.clone().unwrap_or_else(|| self.simple_name.clone());
        match (&self.table.catalog, &self.table.schema) {
            (Some(catalog), _) => format!("{catalog}.{name}"),
            (None, Some(schema)) => format!("{schema}.{name}"),
            (None, None) => name,
        }
    }

    pub fn property(&self, path: &str) -> Option<&Property> {
        self.properties.get(path)
    }

    pub fn id_columns(&self) -> impl Iterator<Item = &Property> {
        self.properties.values().filter(|property| property.is_id_column())
    }

    pub fn detail_columns(&self) -> impl Iterator<Item = &Property> {
        self.properties.values().filter(|property| property.is_detail_column())
    }

    /// The embedded identifier aggregate, if the entity has one.
    pub fn embedded_id(&self) -> Option<&Property> {
        self.properties.values().find(|property| property.is_aggregate() && property.id)
    }

    /// The identifier filled in by the database on insert.
    pub fn generated_id(&self) -> Option<&Property> {
        let mut ids = self.id_columns();
        match (ids.next(), ids.next()) {
            (Some(id), None) if id.generation.is_some() => Some(id),
            _ => None,
        }
    }

    /// Nested properties of the embedded aggregate at `parent`.
    pub fn nested_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties.values().filter(move |property| property.parent_path() == Some(parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_declared_types() {
        let text = TypeRef::parse("Option<String>").unwrap();
        assert!(text.optional);
        assert_eq!(text.inner, "String");
        assert_eq!(text.kind, ValueKind::Text);

        let decimal = TypeRef::parse("rust_decimal::Decimal").unwrap();
        assert!(!decimal.optional);
        assert_eq!(decimal.kind, ValueKind::Decimal);

        let supplier = TypeRef::parse("Option< crate::model::Supplier >").unwrap();
        assert_eq!(supplier.source, "Option<crate::model::Supplier>");
        assert_eq!(supplier.inner_simple_name(), "Supplier");
        assert_eq!(supplier.kind, ValueKind::Opaque);

        assert_eq!(TypeRef::parse("Option<u8>").unwrap().kind, ValueKind::Opaque);
        assert!(TypeRef::parse("not a type!").is_none());
    }

    #[test]
    fn table_name_prefers_catalog_over_schema() {
        let mut entity = EntityMetadata {
            qualified_name: "crate::model::Article".into(),
            simple_name: "Article".into(),
            module: "crate::model".into(),
            kind: EntityKind::Entity,
            table: TableBinding::default(),
            parent: None,
            properties: IndexMap::new(),
        };
        assert_eq!(entity.table_name(), "Article");

        entity.table.name = Some("article".into());
        entity.table.schema = Some("shop".into());
        assert_eq!(entity.table_name(), "shop.article");

        entity.table.catalog = Some("main".into());
        assert_eq!(entity.table_name(), "main.article");
    }

    #[test]
    fn column_roles() {
        let ty = TypeRef::parse("Option<i32>").unwrap();
        let mut aggregate = Property::new("id", ty.clone());
        aggregate.id = true;
        aggregate.embedded = true;
        let mut nested = Property::new("id.article_id", ty.clone());
        nested.id = true;
        nested.embedded = true;
        nested.nested = true;
        let mut orders = Property::new("orders", ty);
        orders.kind = PropertyKind::OneToMany;

        assert!(!aggregate.is_column());
        assert!(nested.is_id_column());
        assert_eq!(nested.name(), "article_id");
        assert_eq!(nested.column_name, "article_id");
        assert_eq!(nested.parent_path(), Some("id"));
        assert!(!orders.is_column());
    }
}
