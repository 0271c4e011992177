//! The `<Entity>Dao` wrapper around an executor.

use anyhow::Result;
use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitContext, path_ident, read_access};
use crate::model::Property;

pub(crate) fn emit_dao(cx: &EmitContext) -> Result<TokenStream> {
    let entity_ty = &cx.entity_ty;
    let dao = &cx.dao;
    let row_mapper = &cx.row_mapper;
    let insert = emit_insert(cx);
    let (id_params, id_values) = id_parameters(cx)?;
    let doc = format!(" Statements for `{}` run through an [`SqlExecutor`].", cx.entity.simple_name);

    Ok(quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        pub struct #dao<X: SqlExecutor> {
            executor: X,
        }

        impl<X: SqlExecutor> #dao<X> {
            pub fn new(executor: X) -> Self {
                Self { executor }
            }

            pub fn executor(&self) -> &X {
                &self.executor
            }

            #insert

            /// Writes every detail column. Issues no statement when the
            /// entity has none.
            pub fn update(&self, entity: &#entity_ty) -> DaoResult<u64> {
                if DETAIL_PROPERTIES.is_empty() {
                    return Ok(0);
                }
                self.executor.execute_update(UPDATE_SQL, &|binder: &mut dyn ParameterBinder| {
                    bind_properties(entity, DETAIL_PROPERTIES, binder, 0)?;
                    bind_properties(entity, ID_PROPERTIES, binder, DETAIL_PROPERTIES.len())
                })
            }

            /// Updates the entity if it carries an identifier, inserts it otherwise.
            pub fn merge(&self, entity: &mut #entity_ty) -> DaoResult<()> {
                if has_id(entity) {
                    self.update(entity).map(|_| ())
                } else {
                    self.insert(entity)
                }
            }

            pub fn get_by_id(&self, #(#id_params),*) -> DaoResult<Option<#entity_ty>> {
                let params = vec![#(#id_values),*];
                self.executor.query_one(SELECT_BY_ID_SQL, &params, &#row_mapper::new())
            }

            pub fn find_all(&self) -> DaoResult<Vec<#entity_ty>> {
                self.executor.query_many(SELECT_ALL_SQL, &[], &#row_mapper::new())
            }
        }
    })
}

fn emit_insert(cx: &EmitContext) -> TokenStream {
    let entity_ty = &cx.entity_ty;
    if cx.columns.generated {
        return quote! {
            /// Inserts the entity and stores the key the database generated
            /// for it.
            pub fn insert(&self, entity: &mut #entity_ty) -> DaoResult<()> {
                let key = {
                    let entity: &#entity_ty = entity;
                    self.executor.execute_update_returning_generated_key(
                        INSERT_SQL,
                        &|binder: &mut dyn ParameterBinder| bind_properties(entity, DETAIL_PROPERTIES, binder, 0),
                    )?
                };
                if key.is_null() {
                    return Err(DaoError::MissingGeneratedKey {
                        statement: INSERT_SQL.to_string(),
                    });
                }
                set_property_value(entity, ID_PROPERTIES[0], key)
            }
        };
    }
    quote! {
        pub fn insert(&self, entity: &mut #entity_ty) -> DaoResult<()> {
            let entity: &#entity_ty = entity;
            self.executor.execute_update(INSERT_SQL, &|binder: &mut dyn ParameterBinder| {
                bind_properties(entity, DETAIL_PROPERTIES, binder, 0)?;
                bind_properties(entity, ID_PROPERTIES, binder, DETAIL_PROPERTIES.len())
            })?;
            Ok(())
        }
    }
}

/// Parameters of `get_by_id` and the values they bind, in identifier
/// column order.
fn id_parameters(cx: &EmitContext) -> Result<(Vec<TokenStream>, Vec<TokenStream>)> {
    let mut params = Vec::new();
    let mut values = Vec::new();
    for property in cx.properties().filter(|p| p.id && !p.nested) {
        let name = path_ident(&property.path);
        if property.is_aggregate() {
            let aggregate_ty = cx.aggregate_ty(property)?;
            params.push(quote!(#name: &#aggregate_ty));
            for nested in cx.entity.nested_of(&property.path) {
                values.push(component_value(cx, nested, quote!(#name))?);
            }
        } else {
            params.push(quote!(#name: impl ToValue));
            values.push(quote!(#name.to_value()));
        }
    }
    Ok((params, values))
}

fn component_value(cx: &EmitContext, nested: &Property, receiver: TokenStream) -> Result<TokenStream> {
    let read = read_access(cx.getter(nested)?, receiver);
    match &nested.reference {
        Some(reference) => {
            let target_ty = cx.target_ty(reference)?;
            let target_module = cx.target_module(reference)?;
            let id_path = &reference.id_path;
            Ok(quote! {
                Reference::<#target_ty>::referenced(&#read)
                    .map(|target| #target_module::get_property_value(target, #id_path))
                    .unwrap_or(Value::Null)
            })
        }
        None => Ok(quote!(ToValue::to_value(&#read))),
    }
}
