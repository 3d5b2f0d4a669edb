//! Identifier derivation for emitted Rust.
//!
//! Compilation checks these mappings for collisions before anything is
//! emitted, so the generated module always has distinct names.

use std::collections::HashMap;

use crate::{
    error::CompileError,
    utils::{accessor_ident, split_humps},
};

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Identifiers that cannot be raw.
const RESERVED: &[&str] = &["self", "super", "crate", "_"];

/// Names taken by the generated accessor signature.
const TAKEN: &[&str] = &["locale", "props"];

/// `en-US` becomes `EnUs`.
pub fn variant_name(locale: &str) -> String {
    let mut name: String = locale
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'L');
    }
    name
}

/// `bot.commands.HelpCommand` becomes `bot_commands_help_command`.
pub fn module_ident(contract: &str) -> String {
    let segments: Vec<String> = contract
        .split('.')
        .map(|segment| split_humps(segment, '_'))
        .collect();
    escape_ident(accessor_ident(&segments.join("_")))
}

pub fn field_ident(name: &str) -> String {
    escape_ident(accessor_ident(&split_humps(name, '_')))
}

pub fn param_ident(name: &str) -> String {
    let ident = accessor_ident(&split_humps(name, '_'));
    if TAKEN.contains(&ident.as_str()) {
        return format!("{}_", ident);
    }
    escape_ident(ident)
}

pub fn method_ident(name: &str) -> String {
    escape_ident(accessor_ident(&split_humps(name, '_')))
}

pub fn escape_ident(ident: String) -> String {
    if RESERVED.contains(&ident.as_str()) {
        format!("{}_", ident)
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{}", ident)
    } else {
        ident
    }
}

/// Fails on the first two names that `ident` maps to the same identifier.
///
/// `scope` names the namespace in the error, e.g. "locales".
pub fn ensure_distinct<'a>(
    scope: impl FnOnce() -> String,
    names: impl IntoIterator<Item = &'a str>,
    ident: impl Fn(&str) -> String,
) -> Result<(), CompileError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in names {
        let derived = ident(name);
        if let Some(first) = seen.insert(derived.clone(), name) {
            return Err(CompileError::IdentifierCollision {
                scope: scope(),
                ident: derived,
                first: first.to_string(),
                second: name.to_string(),
            });
        }
    }
    Ok(())
}
