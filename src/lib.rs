//! Loccat - localization catalog compiler
//!
//! Loccat reads per-locale YAML/JSON catalogs and a set of declared
//! localization contracts, checks them against each other and compiles them
//! into typed providers. Providers can be queried at runtime through the
//! registry or emitted as Rust source.
//!
//! ## Module Structure
//!
//! - `accessor`: Callable tables generated from compiled catalogs
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, flattening, schema resolution and catalog assembly
//! - `emit`: Source backends for compiled tables
//! - `error`: Build-time and lookup errors
//! - `issues`: Issue type definitions and reporting
//! - `registry`: Runtime provider registry
//! - `utils`: Shared utility functions

pub mod accessor;
pub mod cli;
pub mod config;
pub mod core;
pub mod emit;
pub mod error;
pub mod issues;
pub mod registry;
pub mod utils;
