#[allow(unused_imports)]
use super::super::*;
use super::DeclaredKind;

const COLUMN_KEYS: &str = "name, length, nullable, unique, insertable, updatable, definition, table, precision, scale";
const JOIN_COLUMN_KEYS: &str =
    "name, nullable, unique, insertable, updatable, definition, table, referenced_column";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Relation {
    ManyToOne,
    OneToMany,
    ManyToMany,
}

/// The markers found on one field; only what the derive checks is kept.
#[derive(Default)]
pub(crate) struct ParsedField {
    id: bool,
    embedded_id: bool,
    generated: bool,
    relation: Option<Relation>,
    column: bool,
    join_column: bool,
    overrides: Vec<String>,
}

impl ParsedField {
    pub(crate) fn from_field(field: &Field, kind: DeclaredKind) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "daogen types require named fields"))?;

        let mut parsed = Self::default();
        for attr in &field.attrs {
            if attr.path().is_ident("daogen") {
                parsed.parse_field_attr(attr)?;
            }
        }
        parsed.validate(&ident, &field.ty, kind)?;
        Ok(parsed)
    }

    pub(crate) fn is_id(&self) -> bool {
        self.id || self.embedded_id
    }

    pub(crate) fn is_generated(&self) -> bool {
        self.generated
    }

    fn parse_field_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                if self.id {
                    return Err(meta.error("field already marked as #[daogen(id)]"));
                }
                self.id = true;
            } else if meta.path.is_ident("embedded_id") {
                self.embedded_id = true;
            } else if meta.path.is_ident("generated") {
                self.generated = true;
                if meta.input.peek(syn::token::Paren) {
                    meta.parse_nested_meta(parse_generated_key)?;
                }
            } else if meta.path.is_ident("many_to_one") {
                self.set_relation(&meta, Relation::ManyToOne)?;
            } else if meta.path.is_ident("one_to_many") {
                self.set_relation(&meta, Relation::OneToMany)?;
            } else if meta.path.is_ident("many_to_many") {
                self.set_relation(&meta, Relation::ManyToMany)?;
            } else if meta.path.is_ident("column") {
                self.column = true;
                if meta.input.peek(syn::token::Paren) {
                    meta.parse_nested_meta(parse_column_key)?;
                }
            } else if meta.path.is_ident("join_column") {
                self.join_column = true;
                if meta.input.peek(syn::token::Paren) {
                    meta.parse_nested_meta(parse_join_column_key)?;
                }
            } else if meta.path.is_ident("attribute_override") {
                let mut name = None;
                meta.parse_nested_meta(|nested| {
                    if nested.path.is_ident("name") {
                        let value: LitStr = nested.value()?.parse()?;
                        name = Some(value.value());
                    } else if nested.path.is_ident("column") {
                        nested.parse_nested_meta(parse_column_key)?;
                    } else {
                        return Err(nested.error("unknown attribute_override key, expected name or column"));
                    }
                    Ok(())
                })?;
                let name = name.ok_or_else(|| meta.error("attribute_override requires `name = \"...\"`"))?;
                self.overrides.push(name);
            } else {
                return Err(meta.error(
                    "unknown daogen field attribute, expected id, embedded_id, generated, column, \
                     many_to_one, one_to_many, many_to_many, join_column, or attribute_override",
                ));
            }
            Ok(())
        })
    }

    fn set_relation(&mut self, meta: &ParseNestedMeta, relation: Relation) -> Result<()> {
        if self.relation.is_some() {
            return Err(meta.error("a field can carry only one of many_to_one, one_to_many, many_to_many"));
        }
        self.relation = Some(relation);
        Ok(())
    }

    fn validate(&self, ident: &Ident, ty: &Type, kind: DeclaredKind) -> Result<()> {
        let span = ident.span();
        if kind == DeclaredKind::Embeddable && (self.is_id() || self.relation.is_some() || self.generated) {
            return Err(Error::new(span, "Embeddable fields only accept #[daogen(column(...))]"));
        }
        if self.id && self.embedded_id {
            return Err(Error::new(span, "#[daogen(id)] and #[daogen(embedded_id)] are mutually exclusive"));
        }
        if self.is_id() && self.relation.is_some() {
            return Err(Error::new(span, "an identifier cannot also be a relation"));
        }
        if self.generated && !self.id {
            return Err(Error::new(span, "#[daogen(generated)] requires #[daogen(id)]"));
        }
        if !self.overrides.is_empty() && !self.embedded_id {
            return Err(Error::new(span, "attribute_override requires #[daogen(embedded_id)]"));
        }
        if self.embedded_id && self.column {
            return Err(Error::new(span, "embedded identifiers take columns from attribute_override"));
        }
        if self.join_column && self.relation != Some(Relation::ManyToOne) {
            return Err(Error::new(span, "join_column requires #[daogen(many_to_one)]"));
        }
        if self.column && self.relation.is_some() {
            return Err(Error::new(span, "relations use join_column instead of column"));
        }
        if (self.id || self.embedded_id || self.relation == Some(Relation::ManyToOne)) && option_inner(ty).is_none() {
            return Err(Error::new(
                ty.span(),
                format!("`{ident}` must be declared as Option<T> to represent an absent value"),
            ));
        }
        Ok(())
    }
}

fn parse_generated_key(meta: ParseNestedMeta) -> Result<()> {
    if meta.path.is_ident("strategy") {
        let value: LitStr = meta.value()?.parse()?;
        match value.value().as_str() {
            "auto" | "identity" | "sequence" | "table" => Ok(()),
            other => Err(Error::new(
                value.span(),
                format!("unknown generation strategy `{other}`, expected auto, identity, sequence, or table"),
            )),
        }
    } else if meta.path.is_ident("generator") {
        let _: LitStr = meta.value()?.parse()?;
        Ok(())
    } else {
        Err(meta.error("unknown generated key, expected strategy or generator"))
    }
}

fn parse_column_key(meta: ParseNestedMeta) -> Result<()> {
    parse_column_like(meta, false)
}

fn parse_join_column_key(meta: ParseNestedMeta) -> Result<()> {
    parse_column_like(meta, true)
}

fn parse_column_like(meta: ParseNestedMeta, join: bool) -> Result<()> {
    let string_keys: &[&str] =
        if join { &["name", "definition", "table", "referenced_column"] } else { &["name", "definition", "table"] };
    let int_keys: &[&str] = if join { &[] } else { &["length", "precision", "scale"] };
    let flag_keys = ["nullable", "unique", "insertable", "updatable"];

    if string_keys.iter().any(|key| meta.path.is_ident(key)) {
        let _: LitStr = meta.value()?.parse()?;
    } else if int_keys.iter().any(|key| meta.path.is_ident(key)) {
        let value: LitInt = meta.value()?.parse()?;
        value.base10_parse::<u32>()?;
    } else if flag_keys.iter().any(|key| meta.path.is_ident(key)) {
        // A bare flag means `true`.
        if meta.input.peek(syn::Token![=]) {
            let _: LitBool = meta.value()?.parse()?;
        }
    } else {
        let expected = if join { JOIN_COLUMN_KEYS } else { COLUMN_KEYS };
        return Err(meta.error(format!("unknown column key, expected one of: {expected}")));
    }
    Ok(())
}

/// Inner type of `Option<T>`, matched on the last path segment.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
