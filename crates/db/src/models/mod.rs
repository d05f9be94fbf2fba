//! Typed row structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! an explicit column list selected by its repository.

pub mod media;
