use thiserror::Error;

/// Fatal configuration problems found while building the model.
///
/// Any of these aborts the generation round before a file is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("type `{name}` is declared more than once")]
    DuplicateType { name: String },

    #[error("entities `{first}` and `{second}` would both generate module `{module}`")]
    DuplicateModule { module: String, first: String, second: String },

    #[error("{entity}.{property}: declared type `{ty}` is not a valid type")]
    InvalidType { entity: String, property: String, ty: String },

    #[error("{entity}.{property}: type `{ty}` is not a declared embeddable")]
    NotEmbeddable { entity: String, property: String, ty: String },

    #[error("{entity}.{property}: `{ty}` must be declared as Option<T>")]
    NotOptional { entity: String, property: String, ty: String },

    #[error("{entity}.{property}: no {accessor} method and the field is not visible")]
    MissingAccessor { entity: String, property: String, accessor: &'static str },

    #[error("{entity}.{property}: a generation strategy requires an identifier")]
    GeneratedWithoutId { entity: String, property: String },

    #[error("{entity}: more than one identifier carries a generation strategy")]
    MultipleGeneratedIds { entity: String },

    #[error("{entity}.{property}: composite identifiers cannot use a generation strategy")]
    GeneratedCompositeId { entity: String, property: String },

    #[error("{entity}.{property}: no identifier property found for type {target}")]
    MissingIdentifier { entity: String, property: String, target: String },

    #[error("{entity}.{property}: referenced type {target} has a composite identifier")]
    CompositeReference { entity: String, property: String, target: String },

    #[error("{entity}: `{name}` is ambiguous, candidates: {}", candidates.join(", "))]
    AmbiguousReference { entity: String, name: String, candidates: Vec<String> },

    #[error("{entity}: no identifier property found for type {entity}")]
    EntityWithoutIdentifier { entity: String },
}
