//! Catalog compilation pipeline.
//!
//! ## Module Structure
//!
//! - `data`: Shared data model (sources, types, contracts, templates, catalogs)
//! - `parsers`: YAML/JSON source readers and the contracts file loader
//! - `flatten`: Source tree to dotted key entries
//! - `schema`: Authoritative parameter list per key
//! - `assemble`: Per-locale entries plus schemas to a unified catalog
//! - `compile`: Driver running the pipeline once per contract

pub mod assemble;
pub mod compile;
pub mod data;
pub mod flatten;
pub mod parsers;
pub mod schema;

pub use data::*;
