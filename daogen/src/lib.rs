//! daogen runtime library.
//!
//! The vocabulary shared by entity declarations and the data-access modules
//! `daogen-build` generates for them: column values and their conversions,
//! rows and row mappers, the statement executor boundary, property metadata
//! and guarded property values.

pub mod errors;
pub mod executor;
pub mod row;
pub mod tracked;
pub mod types;
pub mod value;

pub use daogen_macros::{Embeddable, Entity, MappedSuperclass};
pub use errors::{DaoError, DaoResult};
pub use executor::{BindFn, ParameterBinder, SqlExecutor, collect_parameters};
pub use row::{MapRow, Row, RowMapper};
pub use tracked::Tracked;
pub use types::{
    EntityType, GenerationType, Persistent, PersistentKind, PropertyDetail, PropertyKind, find_property,
};
pub use value::{FromValue, Reference, ToValue, Value};

// Re-exported so entity crates and generated code agree on the decimal type.
pub use rust_decimal;
pub use rust_decimal::Decimal;
