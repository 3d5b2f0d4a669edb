use std::{fs, path::Path};

use serde_json::Value;

use crate::core::SourceNode;
use crate::error::CompileError;

/// Reads a JSON localization source.
pub fn parse_json_file(path: &Path) -> Result<SourceNode, CompileError> {
    let content = fs::read_to_string(path).map_err(|e| CompileError::Source {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_json_str(&content, &path.display().to_string())
}

/// Parses JSON text into a source tree.
///
/// JSON has no tags, so every scalar is untagged. Arrays are rejected.
pub fn parse_json_str(content: &str, file_path: &str) -> Result<SourceNode, CompileError> {
    if content.trim().is_empty() {
        return Ok(SourceNode::empty());
    }

    let json: Value = serde_json::from_str(content).map_err(|e| CompileError::Source {
        path: file_path.to_string(),
        reason: e.to_string(),
    })?;

    match json {
        Value::Null => Ok(SourceNode::empty()),
        other => convert(&other, "", file_path),
    }
}

fn convert(value: &Value, key_path: &str, file_path: &str) -> Result<SourceNode, CompileError> {
    match value {
        Value::Object(map) => {
            let mut children = Vec::with_capacity(map.len());
            for (key, child) in map {
                let child_path = if key_path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", key_path, key)
                };
                children.push((key.clone(), convert(child, &child_path, file_path)?));
            }
            Ok(SourceNode::Mapping(children))
        }
        Value::String(s) => Ok(SourceNode::scalar(s.clone())),
        Value::Number(n) => Ok(SourceNode::scalar(n.to_string())),
        Value::Bool(b) => Ok(SourceNode::scalar(b.to_string())),
        Value::Null => Ok(SourceNode::scalar("")),
        Value::Array(_) => Err(CompileError::Source {
            path: file_path.to_string(),
            reason: format!("unsupported array at '{}'", key_path),
        }),
    }
}
