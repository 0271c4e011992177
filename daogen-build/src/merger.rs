//! Single-level inheritance merge.

use log::{debug, trace};

use crate::error::ConfigError;
use crate::model::{EntityMap, Property};
use crate::resolver::{Lookup, lookup};

/// Copies every property of an entity's direct parent that the entity does
/// not declare itself.
///
/// Parents are read as they were before any merge, so a grandparent's
/// properties never reach a grandchild through this pass.
pub fn merge_inheritance(entities: &mut EntityMap) -> Result<(), ConfigError> {
    let mut inherited: Vec<(usize, Vec<Property>)> = Vec::new();

    for (index, entity) in entities.values().enumerate() {
        let Some(parent) = &entity.parent else {
            continue;
        };
        match lookup(parent, &entity.module, entities.keys().map(String::as_str)) {
            Lookup::Found(qualified) => {
                if let Some(parent) = entities.get(&qualified) {
                    inherited.push((index, parent.properties.values().cloned().collect()));
                }
            }
            Lookup::NotFound => trace!("{}: parent `{parent}` is not declared, skipping", entity.simple_name),
            Lookup::Ambiguous(candidates) => {
                return Err(ConfigError::AmbiguousReference {
                    entity: entity.qualified_name.clone(),
                    name: parent.clone(),
                    candidates,
                });
            }
        }
    }

    for (index, properties) in inherited {
        let Some((_, entity)) = entities.get_index_mut(index) else {
            continue;
        };
        for property in properties {
            if entity.properties.contains_key(&property.path) {
                continue;
            }
            debug!("{} inherits {}", entity.simple_name, property.path);
            entity.properties.insert(property.path.clone(), property);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityKind, EntityMetadata, TableBinding, TypeRef};

    fn entity(qualified: &str, kind: EntityKind, parent: Option<&str>, paths: &[(&str, &str)]) -> EntityMetadata {
        let (module, simple) = qualified.rsplit_once("::").unwrap();
        EntityMetadata {
            qualified_name: qualified.into(),
            simple_name: simple.into(),
            module: module.into(),
            kind,
            table: TableBinding::default(),
            parent: parent.map(str::to_string),
            properties: paths
                .iter()
                .map(|(path, column)| {
                    let mut property = Property::new(*path, TypeRef::parse("Option<String>").unwrap());
                    property.column_name = column.to_string();
                    (path.to_string(), property)
                })
                .collect(),
        }
    }

    fn map(entities: Vec<EntityMetadata>) -> EntityMap {
        entities.into_iter().map(|e| (e.qualified_name.clone(), e)).collect()
    }

    fn paths(entities: &EntityMap, name: &str) -> Vec<String> {
        entities[name].properties.keys().cloned().collect()
    }

    #[test]
    fn inherits_absent_properties_only() {
        let mut entities = map(vec![
            entity("crate::m::Base", EntityKind::MappedSuperclass, None, &[("id", "id"), ("name", "base_name")]),
            entity("crate::m::Customer", EntityKind::Entity, Some("Base"), &[("name", "customer_name")]),
        ]);
        merge_inheritance(&mut entities).unwrap();

        assert_eq!(paths(&entities, "crate::m::Customer"), vec!["name", "id"]);
        assert_eq!(entities["crate::m::Customer"].properties["name"].column_name, "customer_name");
    }

    #[test]
    fn merges_a_single_level() {
        let mut entities = map(vec![
            entity("crate::m::Child", EntityKind::Entity, Some("Parent"), &[("c", "c")]),
            entity("crate::m::Parent", EntityKind::MappedSuperclass, Some("Root"), &[("p", "p")]),
            entity("crate::m::Root", EntityKind::MappedSuperclass, None, &[("r", "r")]),
        ]);
        merge_inheritance(&mut entities).unwrap();

        assert_eq!(paths(&entities, "crate::m::Parent"), vec!["p", "r"]);
        assert_eq!(paths(&entities, "crate::m::Child"), vec!["c", "p"]);
    }

    #[test]
    fn unknown_parent_is_ignored() {
        let mut entities = map(vec![entity("crate::m::Lonely", EntityKind::Entity, Some("Missing"), &[("a", "a")])]);
        merge_inheritance(&mut entities).unwrap();
        assert_eq!(paths(&entities, "crate::m::Lonely"), vec!["a"]);
    }
}
