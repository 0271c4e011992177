//! Name lookup and MANY_TO_ONE reference resolution.

use log::{debug, trace};

use crate::error::ConfigError;
use crate::model::{EntityKind, EntityMap, PropertyKind, ResolvedReference};

/// Outcome of looking a declared type name up among qualified names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    Found(String),
    NotFound,
    Ambiguous(Vec<String>),
}

/// Looks `name` up by qualified name, then relative to the declaring
/// module, then by a simple name that only one candidate carries.
pub(crate) fn lookup<'a>(name: &str, declaring_module: &str, candidates: impl IntoIterator<Item = &'a str>) -> Lookup {
    let name = name.split('<').next().unwrap_or(name).trim_start_matches("::");
    let candidates: Vec<&str> = candidates.into_iter().collect();

    if let Some(found) = candidates.iter().find(|candidate| **candidate == name) {
        return Lookup::Found(found.to_string());
    }
    let local = format!("{declaring_module}::{name}");
    if let Some(found) = candidates.iter().find(|candidate| **candidate == local) {
        return Lookup::Found(found.to_string());
    }

    let simple = name.rsplit("::").next().unwrap_or(name);
    let matching: Vec<&str> =
        candidates.into_iter().filter(|candidate| candidate.rsplit("::").next() == Some(simple)).collect();
    match matching.as_slice() {
        [] => Lookup::NotFound,
        [single] => Lookup::Found(single.to_string()),
        many => Lookup::Ambiguous(many.iter().map(|candidate| candidate.to_string()).collect()),
    }
}

/// Links every MANY_TO_ONE property to the entity it points to.
///
/// A target outside the round stays unresolved and is mapped as an opaque
/// value. A target must expose exactly one identifier column.
pub fn resolve_references(entities: &mut EntityMap) -> Result<(), ConfigError> {
    let targets: Vec<&str> = entities
        .values()
        .filter(|entity| entity.kind == EntityKind::Entity)
        .map(|entity| entity.qualified_name.as_str())
        .collect();

    let mut links = Vec::new();
    for (index, entity) in entities.values().enumerate() {
        for property in entity.properties.values().filter(|property| property.kind == PropertyKind::ManyToOne) {
            let qualified = match lookup(&property.ty.inner, &entity.module, targets.iter().copied()) {
                Lookup::Found(qualified) => qualified,
                Lookup::NotFound => {
                    debug!(
                        "{}.{}: `{}` is not a known entity, mapping it as a plain value",
                        entity.simple_name, property.path, property.ty.inner
                    );
                    continue;
                }
                Lookup::Ambiguous(candidates) => {
                    return Err(ConfigError::AmbiguousReference {
                        entity: entity.qualified_name.clone(),
                        name: property.ty.inner.clone(),
                        candidates,
                    });
                }
            };
            let Some(target) = entities.get(&qualified) else {
                continue;
            };

            let mut ids = target.id_columns();
            let id = ids.next().ok_or_else(|| ConfigError::MissingIdentifier {
                entity: entity.qualified_name.clone(),
                property: property.path.clone(),
                target: target.qualified_name.clone(),
            })?;
            if ids.next().is_some() {
                return Err(ConfigError::CompositeReference {
                    entity: entity.qualified_name.clone(),
                    property: property.path.clone(),
                    target: target.qualified_name.clone(),
                });
            }

            trace!("{}.{} references {} via {}", entity.simple_name, property.path, target.simple_name, id.path);
            links.push((
                index,
                property.path.clone(),
                ResolvedReference {
                    qualified_name: target.qualified_name.clone(),
                    simple_name: target.simple_name.clone(),
                    id_path: id.path.clone(),
                    id_column: id.column_name.clone(),
                },
            ));
        }
    }

    for (index, path, reference) in links {
        if let Some((_, entity)) = entities.get_index_mut(index)
            && let Some(property) = entity.properties.get_mut(&path)
        {
            property.reference = Some(reference);
        }
    }
    Ok(())
}
