//! Readers for localization sources and contract definitions.
//!
//! - `yaml`: YAML source parser (scalar tags carry parameter lists)
//! - `json`: JSON source parser (no tags)
//! - `contracts`: Contract definition file loader

pub mod contracts;
pub mod json;
pub mod yaml;

use std::path::Path;

use crate::core::SourceNode;
use crate::error::CompileError;

/// Source formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Some(SourceFormat::Yaml),
            Some("json") => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Parses a localization source file according to its extension.
pub fn parse_source_file(path: &Path) -> Result<SourceNode, CompileError> {
    match SourceFormat::from_path(path) {
        Some(SourceFormat::Yaml) => yaml::parse_yaml_file(path),
        Some(SourceFormat::Json) => json::parse_json_file(path),
        None => Err(CompileError::Source {
            path: path.display().to_string(),
            reason: "unknown source format (expected .yaml, .yml or .json)".to_string(),
        }),
    }
}
