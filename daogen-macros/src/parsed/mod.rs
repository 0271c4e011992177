#[allow(unused_imports)]
use super::*;

mod field;

pub(crate) use field::ParsedField;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeclaredKind {
    Entity,
    Embeddable,
    MappedSuperclass,
}

impl DeclaredKind {
    fn derive_name(self) -> &'static str {
        match self {
            DeclaredKind::Entity => "Entity",
            DeclaredKind::Embeddable => "Embeddable",
            DeclaredKind::MappedSuperclass => "MappedSuperclass",
        }
    }
}

pub(crate) struct ParsedType {
    input: DeriveInput,
    kind: DeclaredKind,
    table: Option<String>,
    schema: Option<String>,
    catalog: Option<String>,
}

impl ParsedType {
    pub(crate) fn from_input(input: &DeriveInput, kind: DeclaredKind) -> Result<Self> {
        let mut parsed = Self {
            input: input.clone(),
            kind,
            table: None,
            schema: None,
            catalog: None,
        };

        for attr in &input.attrs {
            if attr.path().is_ident("daogen") {
                parsed.parse_container_attr(attr)?;
            }
        }

        let derive = kind.derive_name();
        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => &named.named,
                _ => return Err(Error::new(input.ident.span(), format!("{derive} requires named fields"))),
            },
            _ => return Err(Error::new(input.ident.span(), format!("{derive} can only be derived for structs"))),
        };

        let mut generated_ids = 0usize;
        let mut ids = 0usize;
        for field in fields {
            let field = ParsedField::from_field(field, kind)?;
            if field.is_id() {
                ids += 1;
            }
            if field.is_generated() {
                generated_ids += 1;
            }
        }
        if generated_ids > 0 && ids > 1 {
            return Err(Error::new(
                input.ident.span(),
                format!("{derive} declares {ids} identifiers; generated identifiers require a single identifier"),
            ));
        }

        Ok(parsed)
    }

    fn parse_container_attr(&mut self, attr: &Attribute) -> Result<()> {
        let kind = self.kind;
        attr.parse_nested_meta(|meta| {
            let allowed = match kind {
                DeclaredKind::Entity => ["table", "schema", "catalog", "extends"].as_slice(),
                DeclaredKind::MappedSuperclass => ["extends"].as_slice(),
                DeclaredKind::Embeddable => [].as_slice(),
            };
            let Some(key) = allowed.iter().find(|key| meta.path.is_ident(key)) else {
                return Err(meta.error(format!(
                    "unknown {} attribute, expected one of: {}",
                    kind.derive_name(),
                    if allowed.is_empty() { "none".to_string() } else { allowed.join(", ") }
                )));
            };
            let value: LitStr = meta.value()?.parse()?;
            if value.value().trim().is_empty() {
                return Err(Error::new(value.span(), format!("`{key}` must not be empty")));
            }
            match *key {
                "table" => self.table = Some(value.value()),
                "schema" => self.schema = Some(value.value()),
                "catalog" => self.catalog = Some(value.value()),
                // Resolved by the generator; only the syntax is checked here.
                _ => {}
            }
            Ok(())
        })
    }

    /// Table name with its catalog prefix, or its schema prefix when no
    /// catalog is given.
    fn table_name(&self) -> String {
        let table = self.table.clone().unwrap_or_else(|| self.input.ident.to_string());
        match (&self.catalog, &self.schema) {
            (Some(catalog), _) => format!("{catalog}.{table}"),
            (None, Some(schema)) => format!("{schema}.{table}"),
            (None, None) => table,
        }
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.input.ident;
        let (impl_generics, ty_generics, where_clause) = self.input.generics.split_for_impl();
        let type_name = name.to_string();
        let kind = match self.kind {
            DeclaredKind::Entity => quote!(::daogen::PersistentKind::Entity),
            DeclaredKind::Embeddable => quote!(::daogen::PersistentKind::Embeddable),
            DeclaredKind::MappedSuperclass => quote!(::daogen::PersistentKind::MappedSuperclass),
        };

        let entity_impl = if self.kind == DeclaredKind::Entity {
            let table_name = self.table_name();
            quote! {
                impl #impl_generics ::daogen::EntityType for #name #ty_generics #where_clause {
                    const TABLE_NAME: &'static str = #table_name;
                }
            }
        } else {
            TokenStream2::new()
        };

        quote! {
            impl #impl_generics ::daogen::Persistent for #name #ty_generics #where_clause {
                const TYPE_NAME: &'static str = #type_name;
                const KIND: ::daogen::PersistentKind = #kind;
            }

            #entity_impl
        }
    }
}
