//! Core data types shared by every compilation phase.
//!
//! ## Module Structure
//!
//! - `source`: Source document model (SourceNode, ScalarNode, LocaleEntries)
//! - `types`: Parameter types and schemas (ParamType, ParameterSchema)
//! - `contract`: Host-supplied contracts and the declarations read from them
//! - `template`: Template text split into literal and placeholder segments
//! - `catalog`: Assembled catalog (Catalog, CatalogEntry)

pub mod catalog;
pub mod contract;
pub mod source;
pub mod template;
pub mod types;

pub use catalog::{Catalog, CatalogEntry};
pub use contract::{
    Contract, ContractMethod, ContractSet, Declaration, MethodParameter, ParameterRole,
};
pub use source::{FlatEntries, LocaleEntries, ScalarNode, SourceNode};
pub use template::{Segment, Template};
pub use types::{
    ParamType, Parameter, ParameterListError, ParameterSchema, TypeKind, TypeParseError,
};
