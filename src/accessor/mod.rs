//! Accessor generation and the in-process callable table.
//!
//! ## Module Structure
//!
//! - `generate`: Catalog to callable table (branches, fallbacks, forwarding)
//! - `table`: Typed accessors, dynamic lookup, forwarding methods
//! - `value`: Runtime coercion of dynamic arguments

pub mod generate;
pub mod table;
pub mod value;

pub use generate::generate;
pub use table::{
    ContractAccessors, Fallback, ForwardingMethod, LocaleBranch, NoProperties, PropertyLookup,
    TypedAccessor,
};
