use daogen::MappedSuperclass;

/// Identifier and audit columns shared by entities that extend it.
#[derive(MappedSuperclass, Debug, Default, Clone, PartialEq)]
pub struct AbstractEntity {
    #[daogen(id, generated(strategy = "identity"))]
    pub id: Option<i64>,
    #[daogen(column(name = "createdBy", length = 64))]
    pub created_by: Option<String>,
}
