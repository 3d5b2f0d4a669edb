//! Catalog assembly.
//!
//! Merges the flattened entries of every locale with the resolved schemas
//! into one immutable [`Catalog`]. Gaps are reported as warnings; nothing
//! here is fatal.

use std::collections::BTreeMap;

use crate::{
    core::{Catalog, CatalogEntry, LocaleEntries, ParamType, Template, schema::KeySchema},
    issues::{
        Issue, MissingDefaultIssue, MissingTemplateIssue, MissingTranslationIssue,
        UnknownPlaceholderIssue,
    },
};

/// What the assembler needs to know besides the entries themselves.
pub struct AssembleContext<'a> {
    pub contract: &'a str,
    pub file_name: &'a str,
    pub default_locale: &'a str,
    /// Declared property types; their names are valid placeholders.
    pub properties: &'a BTreeMap<String, ParamType>,
}

pub struct Assembly {
    pub catalog: Catalog,
    pub issues: Vec<Issue>,
}

/// Builds the catalog of one contract.
///
/// `locales` holds only the locales whose source was loaded, in configured
/// order. `schemas` must cover every key found in them.
pub fn assemble(
    ctx: &AssembleContext<'_>,
    schemas: &BTreeMap<String, KeySchema>,
    locales: &[LocaleEntries],
) -> Assembly {
    let mut issues = Vec::new();
    let default_entries = locales.iter().find(|e| e.locale == ctx.default_locale);
    let mut entries = Vec::with_capacity(schemas.len());

    for (key, resolved) in schemas {
        let mut templates = BTreeMap::new();
        let mut defined_in: Vec<String> = Vec::new();

        for locale in locales {
            let Some(leaf) = locale.get(key) else {
                if locale.locale != ctx.default_locale {
                    issues.push(Issue::MissingTranslation(MissingTranslationIssue {
                        contract: ctx.contract.to_string(),
                        key: key.clone(),
                        locale: locale.locale.clone(),
                        file_path: locale.file_path.clone(),
                    }));
                }
                continue;
            };

            let template = Template::parse(leaf.text.clone());
            for placeholder in template.placeholders() {
                if resolved.schema.get(placeholder).is_none()
                    && !ctx.properties.contains_key(placeholder)
                {
                    issues.push(Issue::UnknownPlaceholder(UnknownPlaceholderIssue {
                        contract: ctx.contract.to_string(),
                        key: key.clone(),
                        locale: locale.locale.clone(),
                        file_path: locale.file_path.clone(),
                        placeholder: placeholder.to_string(),
                    }));
                }
            }

            defined_in.push(locale.locale.clone());
            templates.insert(locale.locale.clone(), template);
        }

        if defined_in.is_empty() {
            issues.push(Issue::MissingTemplate(MissingTemplateIssue {
                contract: ctx.contract.to_string(),
                file_name: ctx.file_name.to_string(),
                key: key.clone(),
            }));
        } else if let Some(default) = default_entries
            && !default.contains_key(key)
        {
            issues.push(Issue::MissingDefault(MissingDefaultIssue {
                contract: ctx.contract.to_string(),
                file_path: default.file_path.clone(),
                key: key.clone(),
                default_locale: ctx.default_locale.to_string(),
                defined_in,
            }));
        }

        entries.push(CatalogEntry {
            key: key.clone(),
            schema: resolved.schema.clone(),
            templates,
            declared: resolved.declared,
        });
    }

    let catalog = Catalog::new(ctx.contract, ctx.file_name, entries);
    tracing::debug!(
        contract = ctx.contract,
        keys = catalog.len(),
        issues = issues.len(),
        "assembled catalog"
    );
    Assembly { catalog, issues }
}
