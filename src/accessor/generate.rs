use std::collections::HashMap;

use super::table::{ContractAccessors, Fallback, ForwardingMethod, LocaleBranch, TypedAccessor};
use crate::{
    core::{Catalog, CatalogEntry, Declaration},
    emit::ident::{ensure_distinct, method_ident, param_ident},
    error::CompileError,
    utils::accessor_ident,
};

/// Derives the callable table of one contract from its catalog.
///
/// `locales` is the configured locale order; `default_locale` must be one of
/// them.
pub fn generate(
    catalog: &Catalog,
    declarations: &[Declaration],
    locales: &[String],
    default_locale: &str,
) -> Result<ContractAccessors, CompileError> {
    let mut idents: HashMap<String, &str> = HashMap::new();
    let mut accessors = Vec::with_capacity(catalog.len());

    for entry in catalog.entries() {
        let ident = accessor_ident(&entry.key);
        if let Some(first) = idents.insert(ident.clone(), &entry.key) {
            return Err(CompileError::AccessorCollision {
                contract: catalog.contract.clone(),
                ident,
                first: first.to_string(),
                second: entry.key.clone(),
            });
        }

        ensure_distinct(
            || format!("parameters of {} '{}'", catalog.contract, entry.key),
            entry.schema.iter().map(|p| p.name.as_str()),
            param_ident,
        )?;

        accessors.push(TypedAccessor {
            key: entry.key.clone(),
            ident,
            schema: entry.schema.clone(),
            branches: locales
                .iter()
                .filter(|locale| locale.as_str() != default_locale)
                .filter_map(|locale| {
                    entry.template(locale).map(|template| LocaleBranch {
                        locale: locale.clone(),
                        template: template.clone(),
                    })
                })
                .collect(),
            fallback: fallback(entry, locales, default_locale),
        });
    }

    let mut methods: Vec<ForwardingMethod> = Vec::with_capacity(declarations.len());
    for declaration in declarations {
        if methods.iter().any(|m| m.name == declaration.method) {
            return Err(CompileError::InvalidDeclaration {
                contract: catalog.contract.clone(),
                method: declaration.method.clone(),
                reason: "method is declared more than once".to_string(),
            });
        }
        ensure_distinct(
            || format!("parameters of {}.{}", catalog.contract, declaration.method),
            declaration.method_parameters.iter().map(String::as_str),
            param_ident,
        )?;
        methods.push(forwarding(catalog, declaration)?);
    }
    ensure_distinct(
        || format!("methods of {}", catalog.contract),
        methods.iter().map(|m| m.name.as_str()),
        method_ident,
    )?;

    tracing::debug!(
        contract = %catalog.contract,
        accessors = accessors.len(),
        methods = methods.len(),
        "generated accessors"
    );

    Ok(ContractAccessors::new(
        catalog.contract.clone(),
        catalog.file_name.clone(),
        locales.to_vec(),
        default_locale,
        accessors,
        methods,
    ))
}

/// Default locale's template, else the first configured locale with one,
/// else the key itself.
fn fallback(entry: &CatalogEntry, locales: &[String], default_locale: &str) -> Fallback {
    std::iter::once(default_locale)
        .chain(locales.iter().map(String::as_str))
        .find_map(|locale| {
            entry.template(locale).map(|template| Fallback::Template {
                locale: locale.to_string(),
                template: template.clone(),
            })
        })
        .unwrap_or(Fallback::Key)
}

fn forwarding(
    catalog: &Catalog,
    declaration: &Declaration,
) -> Result<ForwardingMethod, CompileError> {
    let invalid = |reason: String| CompileError::InvalidDeclaration {
        contract: catalog.contract.clone(),
        method: declaration.method.clone(),
        reason,
    };

    let entry = catalog
        .get(&declaration.key)
        .ok_or_else(|| invalid(format!("key '{}' is not in the catalog", declaration.key)))?;

    let arguments = entry
        .schema
        .iter()
        .map(|parameter| {
            declaration
                .method_parameters
                .iter()
                .position(|name| *name == parameter.name)
                .ok_or_else(|| invalid(format!("no parameter named '{}'", parameter.name)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForwardingMethod {
        name: declaration.method.clone(),
        key: declaration.key.clone(),
        parameters: declaration.method_parameters.clone(),
        locale_slot: declaration.locale_slot,
        arguments,
    })
}
