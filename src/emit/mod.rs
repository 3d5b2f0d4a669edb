//! Textual backends for the callable table.
//!
//! ## Module Structure
//!
//! - `ident`: Identifier derivation and collision checks
//! - `rust`: Renders the tables as a self-contained Rust module

pub mod ident;
pub mod rust;

use std::collections::BTreeMap;

use crate::{accessor::ContractAccessors, core::ParamType};

pub use rust::RustEmitter;

/// Registry metadata shared by every emitted contract.
pub struct EmitContext<'a> {
    pub manager_name: &'a str,
    pub locales: &'a [String],
    pub default_locale: &'a str,
    pub properties: &'a BTreeMap<String, ParamType>,
}

pub trait Emitter {
    /// Extension of the files this emitter writes, without the dot.
    fn file_extension(&self) -> &'static str;

    fn emit(&self, ctx: &EmitContext<'_>, tables: &[ContractAccessors]) -> String;
}
