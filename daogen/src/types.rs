//! Property metadata emitted into every generated module.

/// How a property relates to other entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Simple,
    ManyToOne,
    ManyToMany,
    OneToMany,
}

/// Policy for database-assigned identifier values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationType {
    Auto,
    Identity,
    Sequence,
    Table,
}

/// Static description of one mapped property of an entity.
///
/// Generated modules expose the full list as `PROPERTIES`, in declaration
/// order. Nested properties of an embedded identifier use dotted names
/// (`id.article_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDetail {
    pub name: &'static str,
    pub column_name: &'static str,
    pub type_name: &'static str,
    pub id: bool,
    pub generation_type: Option<GenerationType>,
    pub generator: Option<&'static str>,
    pub embedded: bool,
    pub nested: bool,
    pub unique: bool,
    pub nullable: bool,
    pub insertable: bool,
    pub updatable: bool,
    pub column_definition: &'static str,
    pub table: &'static str,
    pub length: u32,
    pub precision: u32,
    pub scale: u32,
    pub referenced_column_name: &'static str,
    pub kind: PropertyKind,
}

impl PropertyDetail {
    /// Name of the embedded identifier a nested property belongs to.
    pub fn parent_property(&self) -> Option<&'static str> {
        if !self.nested {
            return None;
        }
        self.name.split_once('.').map(|(parent, _)| parent)
    }

    /// Whether the property contributes an identifier column.
    pub fn is_id_column(&self) -> bool {
        self.id && (!self.embedded || self.nested)
    }
}

/// Finds a property by name in a generated `PROPERTIES` list.
pub fn find_property<'a>(properties: &'a [PropertyDetail], name: &str) -> Option<&'a PropertyDetail> {
    properties.iter().find(|property| property.name == name)
}

/// What a `#[derive]`d persistent type was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistentKind {
    Entity,
    Embeddable,
    MappedSuperclass,
}

/// Implemented by `#[derive(Entity)]`, `#[derive(Embeddable)]` and
/// `#[derive(MappedSuperclass)]`.
pub trait Persistent {
    const TYPE_NAME: &'static str;
    const KIND: PersistentKind;
}

/// Implemented by `#[derive(Entity)]`.
pub trait EntityType: Persistent {
    /// Table the entity maps to, including any catalog or schema prefix.
    const TABLE_NAME: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn detail(name: &'static str, id: bool, embedded: bool, nested: bool) -> PropertyDetail {
        PropertyDetail {
            name,
            column_name: name,
            type_name: "Option<i32>",
            id,
            generation_type: None,
            generator: None,
            embedded,
            nested,
            unique: false,
            nullable: true,
            insertable: true,
            updatable: true,
            column_definition: "",
            table: "",
            length: 255,
            precision: 0,
            scale: 0,
            referenced_column_name: "",
            kind: PropertyKind::Simple,
        }
    }

    #[test]
    fn nested_properties_know_their_parent() {
        let nested = detail("id.article_id", true, true, true);
        assert_eq!(nested.parent_property(), Some("id"));
        assert!(nested.is_id_column());

        let aggregate = detail("id", true, true, false);
        assert_eq!(aggregate.parent_property(), None);
        assert!(!aggregate.is_id_column());
    }

    #[test]
    fn find_property_by_name() {
        let properties = [detail("id", true, false, false), detail("code", false, false, false)];
        assert_eq!(find_property(&properties, "code").map(|p| p.id), Some(false));
        assert!(find_property(&properties, "missing").is_none());
    }
}
