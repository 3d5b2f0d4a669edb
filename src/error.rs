//! Error taxonomy.
//!
//! `CompileError` aborts a whole compilation run: no partial catalog is ever
//! produced. `LookupError` is raised at runtime, only by the dynamic lookup
//! path and the registry boundary.

use thiserror::Error;

use crate::core::ParameterListError;

/// Fatal build-time errors.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Locales, tags or declarations disagree on a key's parameter list.
    #[error("conflicting parameter lists for '{key}': {}", .definitions.join("; "))]
    SchemaConflict {
        key: String,
        /// Each conflicting definition, prefixed with where it came from.
        definitions: Vec<String>,
    },

    #[error("invalid parameter list for '{key}' in {origin}: {source}")]
    InvalidParameterList {
        key: String,
        origin: String,
        source: ParameterListError,
    },

    #[error("invalid declaration {contract}.{method}: {reason}")]
    InvalidDeclaration {
        contract: String,
        method: String,
        reason: String,
    },

    #[error("contract '{0}' is defined more than once")]
    DuplicateContract(String),

    #[error("keys '{first}' and '{second}' of {contract} both map to accessor '{ident}'")]
    AccessorCollision {
        contract: String,
        ident: String,
        first: String,
        second: String,
    },

    /// Two names would share one identifier in emitted code.
    #[error("{scope}: '{first}' and '{second}' both map to identifier '{ident}'")]
    IdentifierCollision {
        scope: String,
        ident: String,
        first: String,
        second: String,
    },

    #[error("failed to read localization source {path}: {reason}")]
    Source { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CompileError {
    /// Short kebab-case code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::SchemaConflict { .. } => "schema-conflict",
            CompileError::InvalidParameterList { .. } => "invalid-parameter-list",
            CompileError::InvalidDeclaration { .. } => "invalid-declaration",
            CompileError::DuplicateContract(_) => "duplicate-contract",
            CompileError::AccessorCollision { .. } => "accessor-collision",
            CompileError::IdentifierCollision { .. } => "identifier-collision",
            CompileError::Source { .. } => "source",
            CompileError::InvalidConfig(_) => "invalid-config",
        }
    }
}

/// Fatal runtime lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("localization '{key}' not found in {contract}")]
    KeyNotFound { contract: String, key: String },

    #[error("argument '{parameter}' of '{key}' expects {expected}, found {found}")]
    ArgumentTypeError {
        key: String,
        parameter: String,
        expected: String,
        found: String,
    },

    #[error("'{key}' takes {expected} argument(s), got {found}")]
    ArityMismatch {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("no generated provider for contract '{0}'")]
    ProviderNotFound(String),

    #[error("locale '{0}' is not part of the generated locale set; regenerate the catalog")]
    UnsupportedLocale(String),

    #[error("method '{method}' is not declared on {contract}")]
    MethodNotFound { contract: String, method: String },

    #[error("property '{0}' is not declared")]
    PropertyNotDeclared(String),

    #[error("property '{name}' expects {expected}, found {found}")]
    PropertyTypeError {
        name: String,
        expected: String,
        found: String,
    },
}
