//! Reads declarations from Rust sources annotated with `#[daogen(...)]`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, trace};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Fields, ImplItem, Item, ItemStruct, LitBool, LitInt, LitStr, ReturnType, Type, Visibility};
use walkdir::WalkDir;

use crate::decl::{
    AttributeOverrideDecl, ColumnDecl, DeclKind, FieldDecl, GeneratedDecl, JoinColumnDecl, MethodDecl,
    RelationDecl, ReturnKind, TypeDecl,
};
use crate::model::GenerationType;

/// Scan a directory recursively for Rust files declaring daogen types.
pub fn scan_directory(path: &Path, crate_name: &str) -> Result<Vec<TypeDecl>> {
    let mut types = Vec::new();

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        let file_path = entry.path();
        let relative = file_path.strip_prefix(path).unwrap_or(file_path);
        let skipped = relative.components().any(|c| c.as_os_str() == "generated" || c.as_os_str() == "target");
        if skipped || file_path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        types.extend(scan_file(file_path, path, crate_name)?);
    }

    Ok(types)
}

/// Scan a single Rust file for daogen derives.
pub fn scan_file(file_path: &Path, base_path: &Path, crate_name: &str) -> Result<Vec<TypeDecl>> {
    let content =
        fs::read_to_string(file_path).with_context(|| format!("Failed to read {}", file_path.display()))?;
    let module_path = compute_module_path(file_path, base_path, crate_name);
    let types = parse_source(&content, &module_path).with_context(|| format!("Failed to parse {}", file_path.display()))?;
    for decl in &types {
        debug!("Found {:?} {} in {}", decl.kind, decl.qualified_name(), file_path.display());
    }
    Ok(types)
}

/// Parse declarations from source text belonging to `module_path`.
pub fn parse_source(content: &str, module_path: &str) -> Result<Vec<TypeDecl>> {
    let syntax = syn::parse_file(content)?;

    let mut types = Vec::new();
    for item in &syntax.items {
        if let Item::Struct(item_struct) = item
            && let Some(kind) = daogen_derive(&item_struct.attrs)
        {
            types.push(read_struct(item_struct, kind, module_path)?);
        }
    }

    for item in &syntax.items {
        if let Item::Impl(item_impl) = item
            && item_impl.trait_.is_none()
            && let Some(self_name) = type_name(&item_impl.self_ty)
            && let Some(decl) = types.iter_mut().find(|decl| decl.name == self_name)
        {
            for impl_item in &item_impl.items {
                if let ImplItem::Fn(method) = impl_item
                    && let Some(method) = read_method(&method.vis, &method.sig)
                {
                    trace!("Accessor candidate {}::{}", decl.name, method.name);
                    decl.methods.push(method);
                }
            }
        }
    }

    Ok(types)
}

/// Which daogen derive a struct carries, if any.
fn daogen_derive(attrs: &[Attribute]) -> Option<DeclKind> {
    for attr in attrs {
        if attr.path().is_ident("derive")
            && let Ok(nested) =
                attr.parse_args_with(syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated)
        {
            for path in nested {
                let Some(last) = path.segments.last() else {
                    continue;
                };
                if last.ident == "Entity" {
                    return Some(DeclKind::Entity);
                } else if last.ident == "Embeddable" {
                    return Some(DeclKind::Embeddable);
                } else if last.ident == "MappedSuperclass" {
                    return Some(DeclKind::MappedSuperclass);
                }
            }
        }
    }
    None
}

fn read_struct(item: &ItemStruct, kind: DeclKind, module_path: &str) -> syn::Result<TypeDecl> {
    let mut decl = TypeDecl {
        name: item.ident.to_string(),
        module: module_path.to_string(),
        kind,
        table: None,
        schema: None,
        catalog: None,
        extends: None,
        fields: Vec::new(),
        methods: Vec::new(),
    };

    for attr in &item.attrs {
        if attr.path().is_ident("daogen") {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("table") {
                    &mut decl.table
                } else if meta.path.is_ident("schema") {
                    &mut decl.schema
                } else if meta.path.is_ident("catalog") {
                    &mut decl.catalog
                } else if meta.path.is_ident("extends") {
                    &mut decl.extends
                } else {
                    return Err(meta.error("unknown daogen container attribute"));
                };
                *slot = Some(parse_str(&meta)?);
                Ok(())
            })?;
        }
    }

    if let Fields::Named(named) = &item.fields {
        for field in &named.named {
            let Some(ident) = &field.ident else {
                continue;
            };
            let mut field_decl = FieldDecl::new(ident.unraw().to_string(), field.ty.to_token_stream().to_string());
            field_decl.visible = is_visible(&field.vis);
            for attr in &field.attrs {
                if attr.path().is_ident("daogen") {
                    read_field_attr(attr, &mut field_decl)?;
                }
            }
            decl.fields.push(field_decl);
        }
    }

    Ok(decl)
}

fn read_field_attr(attr: &Attribute, field: &mut FieldDecl) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("id") {
            field.id = true;
        } else if meta.path.is_ident("embedded_id") {
            field.embedded_id = true;
        } else if meta.path.is_ident("generated") {
            let mut generated = GeneratedDecl::default();
            if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|nested| {
                    if nested.path.is_ident("strategy") {
                        generated.strategy = match parse_str(&nested)?.as_str() {
                            "auto" => GenerationType::Auto,
                            "identity" => GenerationType::Identity,
                            "sequence" => GenerationType::Sequence,
                            "table" => GenerationType::Table,
                            other => return Err(nested.error(format!("unknown generation strategy `{other}`"))),
                        };
                    } else if nested.path.is_ident("generator") {
                        generated.generator = Some(parse_str(&nested)?);
                    } else {
                        return Err(nested.error("unknown generated key"));
                    }
                    Ok(())
                })?;
            }
            field.generated = Some(generated);
        } else if meta.path.is_ident("many_to_one") {
            field.relation = Some(RelationDecl::ManyToOne);
        } else if meta.path.is_ident("one_to_many") {
            field.relation = Some(RelationDecl::OneToMany);
        } else if meta.path.is_ident("many_to_many") {
            field.relation = Some(RelationDecl::ManyToMany);
        } else if meta.path.is_ident("column") {
            let mut column = ColumnDecl::default();
            if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|nested| read_column_key(&nested, &mut column))?;
            }
            field.column = Some(column);
        } else if meta.path.is_ident("join_column") {
            let mut join = JoinColumnDecl::default();
            if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|nested| read_join_column_key(&nested, &mut join))?;
            }
            field.join_column = Some(join);
        } else if meta.path.is_ident("attribute_override") {
            let mut name = None;
            let mut column = ColumnDecl::default();
            meta.parse_nested_meta(|nested| {
                if nested.path.is_ident("name") {
                    name = Some(parse_str(&nested)?);
                } else if nested.path.is_ident("column") {
                    nested.parse_nested_meta(|key| read_column_key(&key, &mut column))?;
                } else {
                    return Err(nested.error("unknown attribute_override key"));
                }
                Ok(())
            })?;
            let name = name.ok_or_else(|| meta.error("attribute_override requires a name"))?;
            field.attribute_overrides.push(AttributeOverrideDecl { name, column });
        } else {
            return Err(meta.error("unknown daogen field attribute"));
        }
        Ok(())
    })
}

fn read_column_key(meta: &ParseNestedMeta, column: &mut ColumnDecl) -> syn::Result<()> {
    if meta.path.is_ident("name") {
        column.name = Some(parse_str(meta)?);
    } else if meta.path.is_ident("definition") {
        column.definition = Some(parse_str(meta)?);
    } else if meta.path.is_ident("table") {
        column.table = Some(parse_str(meta)?);
    } else if meta.path.is_ident("length") {
        column.length = Some(parse_u32(meta)?);
    } else if meta.path.is_ident("precision") {
        column.precision = Some(parse_u32(meta)?);
    } else if meta.path.is_ident("scale") {
        column.scale = Some(parse_u32(meta)?);
    } else if meta.path.is_ident("nullable") {
        column.nullable = Some(parse_flag(meta)?);
    } else if meta.path.is_ident("unique") {
        column.unique = Some(parse_flag(meta)?);
    } else if meta.path.is_ident("insertable") {
        column.insertable = Some(parse_flag(meta)?);
    } else if meta.path.is_ident("updatable") {
        column.updatable = Some(parse_flag(meta)?);
    } else {
        return Err(meta.error("unknown column key"));
    }
    Ok(())
}

fn read_join_column_key(meta: &ParseNestedMeta, join: &mut JoinColumnDecl) -> syn::Result<()> {
    if meta.path.is_ident("name") {
        join.name = Some(parse_str(meta)?);
    } else if meta.path.is_ident("definition") {
        join.definition = Some(parse_str(meta)?);
    } else if meta.path.is_ident("table") {
        join.table = Some(parse_str(meta)?);
    } else if meta.path.is_ident("referenced_column") {
        join.referenced_column = Some(parse_str(meta)?);
    } else if meta.path.is_ident("nullable") {
        join.nullable = Some(parse_flag(meta)?);
    } else if meta.path.is_ident("unique") {
        join.unique = Some(parse_flag(meta)?);
    } else if meta.path.is_ident("insertable") {
        join.insertable = Some(parse_flag(meta)?);
    } else if meta.path.is_ident("updatable") {
        join.updatable = Some(parse_flag(meta)?);
    } else {
        return Err(meta.error("unknown join_column key"));
    }
    Ok(())
}

fn parse_str(meta: &ParseNestedMeta) -> syn::Result<String> {
    let value: LitStr = meta.value()?.parse()?;
    Ok(value.value())
}

fn parse_u32(meta: &ParseNestedMeta) -> syn::Result<u32> {
    let value: LitInt = meta.value()?.parse()?;
    value.base10_parse()
}

/// A bare flag reads as `true`.
fn parse_flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(syn::Token![=]) {
        let value: LitBool = meta.value()?.parse()?;
        Ok(value.value)
    } else {
        Ok(true)
    }
}

fn read_method(vis: &Visibility, sig: &syn::Signature) -> Option<MethodDecl> {
    if !is_visible(vis) || sig.receiver().is_none() {
        return None;
    }
    let params = sig.inputs.len() - 1;
    let returns = match &sig.output {
        ReturnType::Default => ReturnKind::Unit,
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Tuple(tuple) if tuple.elems.is_empty() => ReturnKind::Unit,
            Type::Path(path) if path.path.is_ident("bool") => ReturnKind::Bool,
            _ => ReturnKind::Value,
        },
    };
    Some(MethodDecl::new(sig.ident.to_string(), params, returns))
}

/// Generated code lives in another module of the same crate, so `pub` and
/// `pub(crate)` items are reachable from it.
fn is_visible(vis: &Visibility) -> bool {
    match vis {
        Visibility::Public(_) => true,
        Visibility::Restricted(restricted) => restricted.in_token.is_none() && restricted.path.is_ident("crate"),
        Visibility::Inherited => false,
    }
}

fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

/// Compute the module path from a file path.
/// e.g., "src/model/article.rs" -> "crate::model::article"
pub fn compute_module_path(file_path: &Path, base_path: &Path, crate_name: &str) -> String {
    let relative = file_path.strip_prefix(base_path).unwrap_or(file_path);

    let without_extension = relative.with_extension("");
    let mut parts: Vec<&str> = without_extension.components().filter_map(|c| c.as_os_str().to_str()).collect();

    if let Some(last) = parts.last()
        && matches!(*last, "mod" | "lib" | "main")
    {
        parts.pop();
    }

    if parts.is_empty() { crate_name.to_string() } else { format!("{}::{}", crate_name, parts.join("::")) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const ARTICLE: &str = r#"
        use daogen::{Entity, Embeddable};

        #[derive(Debug, Default, Clone, Entity)]
        #[daogen(table = "article", schema = "shop")]
        pub struct Article {
            #[daogen(id, generated(strategy = "identity", generator = "article_seq"), column(name = "idArticle"))]
            id: Option<i32>,
            #[daogen(column(length = 20, nullable = false, unique))]
            pub code: Option<String>,
            #[daogen(many_to_one, join_column(name = "supplierId", nullable = false, referenced_column = "idSuppliers"))]
            supplier: Option<Supplier>,
            scratch: Vec<u8>,
        }

        impl Article {
            pub fn get_id(&self) -> Option<i32> { self.id }
            pub fn set_id(&mut self, id: Option<i32>) { self.id = id; }
            pub(crate) fn is_active(&self) -> bool { true }
            fn get_private(&self) -> i32 { 0 }
            pub fn create() -> Self { Self::default() }
        }

        #[derive(daogen::Embeddable, Default, Clone)]
        pub struct OrderItemId {
            #[daogen(column)]
            pub article_id: Option<i32>,
        }
    "#;

    #[test]
    fn test_compute_module_path() {
        let base = PathBuf::from("src");
        assert_eq!(compute_module_path(&base.join("model/article.rs"), &base, "crate"), "crate::model::article");
        assert_eq!(compute_module_path(&base.join("model/mod.rs"), &base, "crate"), "crate::model");
        assert_eq!(compute_module_path(&base.join("lib.rs"), &base, "shop"), "shop");
    }

    #[test]
    fn reads_container_and_fields() {
        let types = parse_source(ARTICLE, "crate::model").unwrap();
        assert_eq!(types.len(), 2);

        let article = &types[0];
        assert_eq!(article.kind, DeclKind::Entity);
        assert_eq!(article.table.as_deref(), Some("article"));
        assert_eq!(article.schema.as_deref(), Some("shop"));
        assert_eq!(article.fields.len(), 4);

        let id = &article.fields[0];
        assert!(id.id);
        assert!(!id.visible);
        let generated = id.generated.as_ref().unwrap();
        assert_eq!(generated.strategy, GenerationType::Identity);
        assert_eq!(generated.generator.as_deref(), Some("article_seq"));
        assert_eq!(id.column.as_ref().and_then(|c| c.name.as_deref()), Some("idArticle"));

        let code = &article.fields[1];
        assert!(code.visible);
        let column = code.column.as_ref().unwrap();
        assert_eq!(column.length, Some(20));
        assert_eq!(column.nullable, Some(false));
        assert_eq!(column.unique, Some(true));

        let supplier = &article.fields[2];
        assert_eq!(supplier.relation, Some(RelationDecl::ManyToOne));
        let join = supplier.join_column.as_ref().unwrap();
        assert_eq!(join.name.as_deref(), Some("supplierId"));
        assert_eq!(join.referenced_column.as_deref(), Some("idSuppliers"));

        assert!(!article.fields[3].is_persistent());

        let id_type = &types[1];
        assert_eq!(id_type.kind, DeclKind::Embeddable);
        assert!(id_type.fields[0].column.is_some());
    }

    #[test]
    fn reads_visible_receiver_methods_only() {
        let types = parse_source(ARTICLE, "crate::model").unwrap();
        let methods = &types[0].methods;
        assert_eq!(
            methods,
            &vec![
                MethodDecl::new("get_id", 0, ReturnKind::Value),
                MethodDecl::new("set_id", 1, ReturnKind::Unit),
                MethodDecl::new("is_active", 0, ReturnKind::Bool),
            ]
        );
    }

    #[test]
    fn rejects_unknown_attribute_keys() {
        let source = r#"
            #[derive(Entity)]
            struct Broken {
                #[daogen(colum)]
                id: Option<i32>,
            }
        "#;
        assert!(parse_source(source, "crate").is_err());
    }
}
