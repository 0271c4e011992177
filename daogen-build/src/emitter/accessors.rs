//! Path-based property access: `get_property_value`, `set_property_value`,
//! `has_id` and the parameter binding helper used by the DAO.

use anyhow::Result;
use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitContext, read_access, write_access};
use crate::model::Property;

pub(crate) fn emit_accessors(cx: &EmitContext) -> Result<TokenStream> {
    let entity_ty = &cx.entity_ty;
    let mut get_arms = Vec::new();
    let mut set_arms = Vec::new();

    for property in cx.properties() {
        if !property.is_column() && !property.is_aggregate() {
            continue;
        }
        let path = &property.path;
        let get = get_expr(cx, property)?;
        let set = set_block(cx, property)?;
        get_arms.push(quote!(#path => #get,));
        set_arms.push(quote!(#path => #set));
    }

    Ok(quote! {
        /// Reads a property by path.
        ///
        /// # Panics
        ///
        /// Panics if `property` names no mapped property.
        pub fn get_property_value(entity: &#entity_ty, property: &str) -> Value {
            match property {
                #(#get_arms)*
                other => panic!("Property {} unknown.", other),
            }
        }

        /// Writes a property by path.
        ///
        /// # Panics
        ///
        /// Panics if `property` names no mapped property.
        pub fn set_property_value(entity: &mut #entity_ty, property: &str, value: Value) -> DaoResult<()> {
            match property {
                #(#set_arms)*
                other => panic!("Property {} unknown.", other),
            }
            Ok(())
        }

        /// Whether any identifier property holds a value.
        pub fn has_id(entity: &#entity_ty) -> bool {
            ID_PROPERTIES
                .iter()
                .any(|property| !get_property_value(entity, property).is_null())
        }

        /// Binds `properties` at consecutive positions starting after `offset`.
        pub fn bind_properties(
            entity: &#entity_ty,
            properties: &[&str],
            binder: &mut dyn ParameterBinder,
            offset: usize,
        ) -> DaoResult<()> {
            for (index, property) in properties.iter().enumerate() {
                binder.bind(offset + index + 1, get_property_value(entity, property))?;
            }
            Ok(())
        }
    })
}

fn get_expr(cx: &EmitContext, property: &Property) -> Result<TokenStream> {
    let read = read_access(cx.getter(property)?, quote!(entity));

    if property.is_aggregate() {
        let aggregate_ty = cx.aggregate_ty(property)?;
        let mut components = Vec::new();
        for nested in cx.entity.nested_of(&property.path) {
            let name = nested.name();
            let nested_read = read_access(cx.getter(nested)?, quote!(aggregate));
            components.push(quote!((#name.to_string(), ToValue::to_value(&#nested_read))));
        }
        return Ok(quote! {
            match Reference::<#aggregate_ty>::referenced(&#read) {
                Some(aggregate) => Value::Composite(vec![#(#components),*]),
                None => Value::Null,
            }
        });
    }

    if property.nested {
        let parent = cx.parent_of(property)?;
        let aggregate_ty = cx.aggregate_ty(parent)?;
        let parent_read = read_access(cx.getter(parent)?, quote!(entity));
        let nested_read = read_access(cx.getter(property)?, quote!(aggregate));
        return Ok(quote! {
            Reference::<#aggregate_ty>::referenced(&#parent_read)
                .map(|aggregate| ToValue::to_value(&#nested_read))
                .unwrap_or(Value::Null)
        });
    }

    if let Some(reference) = &property.reference {
        let target_ty = cx.target_ty(reference)?;
        let target_module = cx.target_module(reference)?;
        let id_path = &reference.id_path;
        return Ok(quote! {
            Reference::<#target_ty>::referenced(&#read)
                .map(|target| #target_module::get_property_value(target, #id_path))
                .unwrap_or(Value::Null)
        });
    }

    Ok(quote!(ToValue::to_value(&#read)))
}

fn set_block(cx: &EmitContext, property: &Property) -> Result<TokenStream> {
    let setter = cx.setter(property)?;

    if property.is_aggregate() {
        let aggregate_ty = cx.aggregate_ty(property)?;
        let mut fill = Vec::new();
        for nested in cx.entity.nested_of(&property.path) {
            let name = nested.name();
            fill.push(write_access(
                cx.setter(nested)?,
                quote!(aggregate),
                quote!(FromValue::from_value(value.component(#name).cloned().unwrap_or_default())?),
            ));
        }
        let clear = write_access(setter, quote!(entity), quote!(None));
        let store = write_access(setter, quote!(entity), quote!(Some(aggregate)));
        return Ok(quote! {
            {
                if value.is_null() {
                    #clear
                } else if matches!(value, Value::Composite(_)) {
                    let mut aggregate = <#aggregate_ty>::default();
                    #(#fill)*
                    #store
                } else {
                    return Err(DaoError::type_mismatch("composite", &value));
                }
            }
        });
    }

    if property.nested {
        let parent = cx.parent_of(property)?;
        let aggregate_ty = cx.aggregate_ty(parent)?;
        let parent_read = read_access(cx.getter(parent)?, quote!(entity));
        let assign = write_access(setter, quote!(aggregate), quote!(FromValue::from_value(value)?));
        let store = write_access(cx.setter(parent)?, quote!(entity), quote!(Some(aggregate)));
        return Ok(quote! {
            {
                let mut aggregate: #aggregate_ty = Reference::<#aggregate_ty>::referenced(&#parent_read)
                    .cloned()
                    .unwrap_or_default();
                #assign
                #store
            }
        });
    }

    if let Some(reference) = &property.reference {
        let target_ty = cx.target_ty(reference)?;
        let target_module = cx.target_module(reference)?;
        let id_path = &reference.id_path;
        let clear = write_access(setter, quote!(entity), quote!(None));
        let store = write_access(setter, quote!(entity), quote!(Some(target)));
        return Ok(quote! {
            {
                if value.is_null() {
                    #clear
                } else {
                    let mut target = <#target_ty>::default();
                    #target_module::set_property_value(&mut target, #id_path, value)?;
                    #store
                }
            }
        });
    }

    let assign = write_access(setter, quote!(entity), quote!(FromValue::from_value(value)?));
    Ok(quote!({ #assign }))
}
