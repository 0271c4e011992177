//! Column lists, statements and the property metadata table.

use proc_macro2::TokenStream;
use quote::quote;

use super::EmitContext;
use crate::model::{EntityMetadata, GenerationType, Property, PropertyKind};

/// Ordered column lists of an entity and the statements built from them.
///
/// Identifier columns are the identifier properties that are not an
/// embedded aggregate; detail columns are every other column-backed
/// property. Both keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnSet {
    pub table: String,
    pub id_properties: Vec<String>,
    pub detail_properties: Vec<String>,
    pub id_columns: Vec<String>,
    pub detail_columns: Vec<String>,
    /// The single identifier is assigned by the database.
    pub generated: bool,
}

impl ColumnSet {
    pub fn of(entity: &EntityMetadata) -> Self {
        let ids: Vec<&Property> = entity.id_columns().collect();
        let details: Vec<&Property> = entity.detail_columns().collect();
        Self {
            table: entity.table_name(),
            id_properties: ids.iter().map(|p| p.path.clone()).collect(),
            detail_properties: details.iter().map(|p| p.path.clone()).collect(),
            id_columns: ids.iter().map(|p| p.column_name.clone()).collect(),
            detail_columns: details.iter().map(|p| p.column_name.clone()).collect(),
            generated: entity.generated_id().is_some(),
        }
    }

    pub fn all_columns(&self) -> Vec<String> {
        self.id_columns.iter().chain(&self.detail_columns).cloned().collect()
    }

    pub fn id_query(&self) -> String {
        self.id_columns.iter().map(|column| format!("{column} = ?")).collect::<Vec<_>>().join(" AND ")
    }

    /// Generated keys are left out of the column list; otherwise details
    /// come first and identifiers after them, matching the bound parameters.
    pub fn insert_sql(&self) -> String {
        let columns: Vec<&String> = if self.generated {
            self.detail_columns.iter().collect()
        } else {
            self.detail_columns.iter().chain(&self.id_columns).collect()
        };
        if columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", self.table);
        }
        let names: Vec<&str> = columns.iter().map(|column| column.as_str()).collect();
        format!("INSERT INTO {} ({}) VALUES ({})", self.table, names.join(", "), params(columns.len()))
    }

    /// `None` when there is no detail column to set.
    pub fn update_sql(&self) -> Option<String> {
        if self.detail_columns.is_empty() {
            return None;
        }
        let assignments: Vec<String> = self.detail_columns.iter().map(|column| format!("{column} = ?")).collect();
        Some(format!("UPDATE {} SET {} WHERE {}", self.table, assignments.join(", "), self.id_query()))
    }

    pub fn select_by_id_sql(&self) -> String {
        format!("{} WHERE {}", self.select_all_sql(), self.id_query())
    }

    pub fn select_all_sql(&self) -> String {
        format!("SELECT {} FROM {}", self.all_columns().join(", "), self.table)
    }
}

fn params(count: usize) -> String {
    vec!["?"; count].join(", ")
}

pub(crate) fn emit_constants(cx: &EmitContext) -> TokenStream {
    let set = &cx.columns;
    let table = &set.table;
    let properties = cx.properties().map(property_detail);
    let id_properties = &set.id_properties;
    let detail_properties = &set.detail_properties;
    let id_column_list = &set.id_columns;
    let detail_column_list = &set.detail_columns;
    let id_columns = set.id_columns.join(", ");
    let detail_columns = set.detail_columns.join(", ");
    let all_columns = set.all_columns().join(", ");
    let id_query = set.id_query();
    let id_params = params(set.id_columns.len());
    let detail_params = params(set.detail_columns.len());
    let insert_sql = set.insert_sql();
    let update_sql = set.update_sql().unwrap_or_default();
    let select_by_id_sql = set.select_by_id_sql();
    let select_all_sql = set.select_all_sql();

    quote! {
        pub const TABLE_NAME: &str = #table;

        /// Every mapped property, in declaration order.
        pub const PROPERTIES: &[PropertyDetail] = &[#(#properties),*];

        pub const ID_PROPERTIES: &[&str] = &[#(#id_properties),*];
        pub const DETAIL_PROPERTIES: &[&str] = &[#(#detail_properties),*];
        pub const ID_COLUMN_LIST: &[&str] = &[#(#id_column_list),*];
        pub const DETAIL_COLUMN_LIST: &[&str] = &[#(#detail_column_list),*];
        pub const ID_COLUMNS: &str = #id_columns;
        pub const DETAIL_COLUMNS: &str = #detail_columns;
        /// Identifier columns followed by detail columns.
        pub const ALL_COLUMNS: &str = #all_columns;
        pub const ID_COLUMNS_QUERY: &str = #id_query;
        pub const ID_PARAMS: &str = #id_params;
        pub const DETAIL_PARAMS: &str = #detail_params;

        pub const INSERT_SQL: &str = #insert_sql;
        /// Empty when the entity has no detail column.
        pub const UPDATE_SQL: &str = #update_sql;
        pub const SELECT_BY_ID_SQL: &str = #select_by_id_sql;
        pub const SELECT_ALL_SQL: &str = #select_all_sql;
    }
}

fn property_detail(property: &Property) -> TokenStream {
    let name = &property.path;
    let column_name = &property.column_name;
    let type_name = &property.ty.source;
    let id = property.id;
    let generation_type = match property.generation {
        Some(generation) => {
            let variant = match generation {
                GenerationType::Auto => quote!(Auto),
                GenerationType::Identity => quote!(Identity),
                GenerationType::Sequence => quote!(Sequence),
                GenerationType::Table => quote!(Table),
            };
            quote!(Some(::daogen::GenerationType::#variant))
        }
        None => quote!(None),
    };
    let generator = match &property.generator {
        Some(generator) => quote!(Some(#generator)),
        None => quote!(None),
    };
    let embedded = property.embedded;
    let nested = property.nested;
    let unique = property.unique;
    let nullable = property.nullable;
    let insertable = property.insertable;
    let updatable = property.updatable;
    let column_definition = &property.column_definition;
    let table = &property.table;
    let length = property.length;
    let precision = property.precision;
    let scale = property.scale;
    let referenced_column_name = &property.referenced_column_name;
    let kind = match property.kind {
        PropertyKind::Simple => quote!(Simple),
        PropertyKind::ManyToOne => quote!(ManyToOne),
        PropertyKind::ManyToMany => quote!(ManyToMany),
        PropertyKind::OneToMany => quote!(OneToMany),
    };

    quote! {
        PropertyDetail {
            name: #name,
            column_name: #column_name,
            type_name: #type_name,
            id: #id,
            generation_type: #generation_type,
            generator: #generator,
            embedded: #embedded,
            nested: #nested,
            unique: #unique,
            nullable: #nullable,
            insertable: #insertable,
            updatable: #updatable,
            column_definition: #column_definition,
            table: #table,
            length: #length,
            precision: #precision,
            scale: #scale,
            referenced_column_name: #referenced_column_name,
            kind: ::daogen::PropertyKind::#kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str], details: &[&str], generated: bool) -> ColumnSet {
        ColumnSet {
            table: "article".into(),
            id_properties: ids.iter().map(|s| s.to_string()).collect(),
            detail_properties: details.iter().map(|s| s.to_string()).collect(),
            id_columns: ids.iter().map(|s| s.to_string()).collect(),
            detail_columns: details.iter().map(|s| s.to_string()).collect(),
            generated,
        }
    }

    #[test]
    fn generated_insert_omits_the_identifier() {
        let columns = set(&["idArticle"], &["code", "supplierId"], true);
        assert_eq!(columns.insert_sql(), "INSERT INTO article (code, supplierId) VALUES (?, ?)");
    }

    #[test]
    fn explicit_insert_lists_details_before_identifiers() {
        let columns = set(&["artId", "orderId"], &["quantity"], false);
        assert_eq!(columns.insert_sql(), "INSERT INTO article (quantity, artId, orderId) VALUES (?, ?, ?)");
        assert_eq!(columns.all_columns(), vec!["artId", "orderId", "quantity"]);
        assert_eq!(columns.id_query(), "artId = ? AND orderId = ?");
    }

    #[test]
    fn update_filters_by_identifier() {
        let columns = set(&["idArticle"], &["code", "active"], true);
        assert_eq!(
            columns.update_sql().as_deref(),
            Some("UPDATE article SET code = ?, active = ? WHERE idArticle = ?")
        );
        assert_eq!(
            columns.select_by_id_sql(),
            "SELECT idArticle, code, active FROM article WHERE idArticle = ?"
        );
    }

    #[test]
    fn identifier_only_entities() {
        let columns = set(&["id"], &[], true);
        assert_eq!(columns.insert_sql(), "INSERT INTO article DEFAULT VALUES");
        assert_eq!(columns.update_sql(), None);
        assert_eq!(columns.select_all_sql(), "SELECT id FROM article");
        assert_eq!(params(0), "");
    }
}
