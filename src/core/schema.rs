//! Schema resolution.
//!
//! Decides the authoritative parameter list of every key of one contract.
//! A declaration always wins. Undeclared keys take their schema from the
//! inline tags of the locales that define them, and those tags must agree.

use std::collections::BTreeMap;

use crate::{
    core::{Declaration, LocaleEntries, ParameterSchema},
    error::CompileError,
    issues::{Issue, ShadowedTagIssue},
};

/// Resolved schema of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub schema: ParameterSchema,
    /// True when a contract method declares the key.
    pub declared: bool,
}

/// Schemas of every key of one contract, plus the warnings found on the way.
#[derive(Debug, Default)]
pub struct SchemaResolution {
    pub schemas: BTreeMap<String, KeySchema>,
    pub issues: Vec<Issue>,
}

/// A tag found on one locale's leaf.
struct TagDefinition<'a> {
    locale: &'a str,
    file_path: &'a str,
    raw: &'a str,
    schema: ParameterSchema,
}

/// Resolves the schema of every declared key and every key found in
/// `locales`.
///
/// # Errors
///
/// - `SchemaConflict` when two methods declare one key with different
///   parameters, or when the tags of an undeclared key disagree.
/// - `InvalidParameterList` when a tag cannot be parsed.
pub fn resolve_schemas(
    contract: &str,
    declarations: &[Declaration],
    locales: &[LocaleEntries],
) -> Result<SchemaResolution, CompileError> {
    let mut resolution = SchemaResolution::default();

    let mut declared: BTreeMap<&str, &Declaration> = BTreeMap::new();
    for declaration in declarations {
        match declared.get(declaration.key.as_str()) {
            Some(existing) if existing.parameters != declaration.parameters => {
                return Err(CompileError::SchemaConflict {
                    key: declaration.key.clone(),
                    definitions: vec![
                        format!("{}.{}: {}", contract, existing.method, existing.parameters),
                        format!(
                            "{}.{}: {}",
                            contract, declaration.method, declaration.parameters
                        ),
                    ],
                });
            }
            Some(_) => {}
            None => {
                declared.insert(&declaration.key, declaration);
            }
        }
    }

    let mut source_keys: Vec<&str> = locales
        .iter()
        .flat_map(|entries| entries.keys().map(String::as_str))
        .filter(|key| !key.is_empty())
        .collect();
    source_keys.sort_unstable();
    source_keys.dedup();

    for key in source_keys {
        let tags = collect_tags(key, locales)?;

        if let Some(declaration) = declared.get(key) {
            for tag in tags
                .iter()
                .filter(|tag| tag.schema != declaration.parameters)
            {
                resolution.issues.push(Issue::ShadowedTag(ShadowedTagIssue {
                    contract: contract.to_string(),
                    key: key.to_string(),
                    locale: tag.locale.to_string(),
                    file_path: tag.file_path.to_string(),
                    tag: tag.raw.to_string(),
                    declared: declaration.parameters.to_string(),
                }));
            }
            continue;
        }

        let mut distinct: Vec<&ParameterSchema> = Vec::new();
        for tag in &tags {
            if !distinct.contains(&&tag.schema) {
                distinct.push(&tag.schema);
            }
        }

        let schema = match distinct.as_slice() {
            [] => ParameterSchema::default(),
            [single] => (*single).clone(),
            _ => {
                return Err(CompileError::SchemaConflict {
                    key: key.to_string(),
                    definitions: tags
                        .iter()
                        .map(|tag| format!("{}: {}", tag.locale, tag.raw))
                        .collect(),
                });
            }
        };

        resolution.schemas.insert(
            key.to_string(),
            KeySchema {
                schema,
                declared: false,
            },
        );
    }

    for (key, declaration) in declared {
        resolution.schemas.insert(
            key.to_string(),
            KeySchema {
                schema: declaration.parameters.clone(),
                declared: true,
            },
        );
    }

    tracing::debug!(
        contract,
        keys = resolution.schemas.len(),
        "resolved parameter schemas"
    );
    Ok(resolution)
}

fn collect_tags<'a>(
    key: &str,
    locales: &'a [LocaleEntries],
) -> Result<Vec<TagDefinition<'a>>, CompileError> {
    let mut tags = Vec::new();
    for entries in locales {
        let Some(raw) = entries.get(key).and_then(|leaf| leaf.parameter_tag()) else {
            continue;
        };
        let schema =
            ParameterSchema::parse(raw).map_err(|source| CompileError::InvalidParameterList {
                key: key.to_string(),
                origin: entries.locale.clone(),
                source,
            })?;
        tags.push(TagDefinition {
            locale: &entries.locale,
            file_path: &entries.file_path,
            raw,
            schema,
        });
    }
    Ok(tags)
}
