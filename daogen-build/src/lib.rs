//! Build-time generator of data-access code.
//!
//! This crate reads type declarations, either from `#[derive(Entity)]`,
//! `#[derive(Embeddable)]` and `#[derive(MappedSuperclass)]` structs or from
//! TOML declaration files, and writes one data-access module per entity:
//! column constants, SQL statements, row mappers, path-based property
//! accessors and a `<Entity>Dao` running them through a
//! [`SqlExecutor`](https://docs.rs/daogen).
//!
//! A round runs read → scan → merge → resolve → emit. Every unit is rendered
//! before the first file is written, so a failing round leaves the output
//! directory untouched.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     daogen_build::generate_daos()
//!         .scan_path("src/model")
//!         .output_dir("src/generated")
//!         .module_path("crate::generated")
//!         .run()
//!         .expect("Failed to generate data-access modules");
//!
//!     println!("cargo:rerun-if-changed=src/model");
//! }
//! ```

pub mod decl;
pub mod emitter;
mod error;
mod generator;
pub mod merger;
pub mod model;
pub mod resolver;
pub mod scanner;
pub mod source;

pub use error::ConfigError;
pub use generator::DaoGenerator;

/// Create a new generator with default settings.
pub fn generate_daos() -> DaoGenerator {
    DaoGenerator::new()
}
