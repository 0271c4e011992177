use daogen::{Entity, Tracked};

#[derive(Entity, Debug, Default, Clone, PartialEq)]
#[daogen(table = "suppliers")]
pub struct Supplier {
    #[daogen(id, column(name = "idSuppliers"))]
    pub id: Option<i32>,
    #[daogen(column(length = 80, nullable = false))]
    pub name: Option<String>,
    /// Left unset until loaded or assigned.
    #[daogen(column(name = "contactEmail"))]
    pub contact: Tracked<String>,
}

impl Supplier {
    pub fn with_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}
