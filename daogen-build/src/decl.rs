//! Explicit declaration schema consumed by the scanner.
//!
//! Declarations come either from Rust sources (see [`crate::source`]) or from
//! TOML files shaped as a `[[types]]` array of [`TypeDecl`].

use serde::{Deserialize, Serialize};

use crate::model::GenerationType;

/// What a declared type was annotated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Entity,
    Embeddable,
    MappedSuperclass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    /// Module the type lives in, e.g. `crate::model`.
    pub module: String,
    pub kind: DeclKind,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub catalog: Option<String>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether generated code in another module of the crate may access the field.
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub id: bool,
    #[serde(default)]
    pub embedded_id: bool,
    #[serde(default)]
    pub generated: Option<GeneratedDecl>,
    #[serde(default)]
    pub relation: Option<RelationDecl>,
    #[serde(default)]
    pub column: Option<ColumnDecl>,
    #[serde(default)]
    pub join_column: Option<JoinColumnDecl>,
    #[serde(default)]
    pub attribute_overrides: Vec<AttributeOverrideDecl>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            visible: false,
            id: false,
            embedded_id: false,
            generated: None,
            relation: None,
            column: None,
            join_column: None,
            attribute_overrides: Vec::new(),
        }
    }

    /// Whether any structural marker makes this field a persistent property.
    pub fn is_persistent(&self) -> bool {
        self.id || self.embedded_id || self.column.is_some() || self.relation.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDecl {
    #[serde(default = "default_strategy")]
    pub strategy: GenerationType,
    #[serde(default)]
    pub generator: Option<String>,
}

fn default_strategy() -> GenerationType {
    GenerationType::Auto
}

impl Default for GeneratedDecl {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            generator: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationDecl {
    ManyToOne,
    OneToMany,
    ManyToMany,
}

/// Column options; `None` keeps the default for the property's role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDecl {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub unique: Option<bool>,
    #[serde(default)]
    pub insertable: Option<bool>,
    #[serde(default)]
    pub updatable: Option<bool>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinColumnDecl {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub unique: Option<bool>,
    #[serde(default)]
    pub insertable: Option<bool>,
    #[serde(default)]
    pub updatable: Option<bool>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub referenced_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOverrideDecl {
    pub name: String,
    #[serde(default)]
    pub column: ColumnDecl,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    #[default]
    Unit,
    Bool,
    Value,
}

/// A callable accessor candidate: a method with a `self` receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    /// Parameter count, receiver excluded.
    #[serde(default)]
    pub params: usize,
    #[serde(default)]
    pub returns: ReturnKind,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, params: usize, returns: ReturnKind) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }
}

/// Top-level layout of a TOML declaration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_declarations() {
        let schema: SchemaFile = toml::from_str(
            r#"
            [[types]]
            name = "Supplier"
            module = "crate::model"
            kind = "entity"
            table = "suppliers"

            [[types.fields]]
            name = "id"
            type = "Option<i32>"
            id = true
            generated = { strategy = "identity" }
            column = { name = "idSuppliers" }

            [[types.fields]]
            name = "phone"
            type = "Option<String>"
            visible = true
            column = { length = 50 }

            [[types.methods]]
            name = "get_id"
            returns = "value"
            "#,
        )
        .unwrap();

        let supplier = &schema.types[0];
        assert_eq!(supplier.qualified_name(), "crate::model::Supplier");
        assert_eq!(supplier.kind, DeclKind::Entity);
        assert_eq!(supplier.fields.len(), 2);
        assert_eq!(
            supplier.fields[0].generated.as_ref().map(|g| g.strategy),
            Some(GenerationType::Identity)
        );
        assert_eq!(supplier.fields[1].column.as_ref().and_then(|c| c.length), Some(50));
        assert!(supplier.fields[1].is_persistent());
        assert_eq!(supplier.methods[0], MethodDecl::new("get_id", 0, ReturnKind::Value));
    }

    #[test]
    fn unmarked_fields_are_transient() {
        assert!(!FieldDecl::new("cache", "Vec<u8>").is_persistent());
    }
}
