//! A small shop model exercising the generated data-access layer.

pub mod generated;
pub mod model;
