//! Domain primitives shared by the catalog's database and API crates.

pub mod error;
pub mod types;
