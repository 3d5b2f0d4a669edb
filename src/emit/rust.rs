//! Rust source backend.
//!
//! The output is a module file (it starts with inner attributes, so it
//! cannot be pulled in with `include!`). It depends on `serde_json` only.

use super::{
    EmitContext, Emitter,
    ident::{escape_ident, field_ident, method_ident, module_ident, param_ident, variant_name},
};
use crate::{
    accessor::{ContractAccessors, Fallback, ForwardingMethod, TypedAccessor},
    core::{ParamType, ParameterSchema, Segment, Template, TypeKind},
};

const SUPPORT: &str = r#"/// Fatal errors of the dynamic lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    KeyNotFound { key: String },
    ArgumentType {
        key: String,
        parameter: String,
        expected: &'static str,
    },
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::KeyNotFound { key } => write!(f, "localization '{}' not found", key),
            LookupError::ArgumentType {
                key,
                parameter,
                expected,
            } => write!(
                f,
                "argument '{}' of '{}' expects {}",
                parameter, key, expected
            ),
        }
    }
}

impl std::error::Error for LookupError {}

pub type Args = serde_json::Map<String, serde_json::Value>;

fn mismatch(key: &str, parameter: &str, expected: &'static str) -> LookupError {
    LookupError::ArgumentType {
        key: key.to_string(),
        parameter: parameter.to_string(),
        expected,
    }
}

fn typed<'a, T>(
    args: &'a Args,
    key: &str,
    parameter: &str,
    expected: &'static str,
    read: fn(&'a serde_json::Value) -> Option<T>,
) -> Result<T, LookupError> {
    args.get(parameter)
        .and_then(read)
        .ok_or_else(|| mismatch(key, parameter, expected))
}

fn nullable<'a, T>(
    args: &'a Args,
    key: &str,
    parameter: &str,
    expected: &'static str,
    read: fn(&'a serde_json::Value) -> Option<T>,
) -> Result<Option<T>, LookupError> {
    match args.get(parameter) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => read(value)
            .map(Some)
            .ok_or_else(|| mismatch(key, parameter, expected)),
    }
}

fn integer(value: &serde_json::Value) -> Option<i64> {
    value.as_i64()
}

fn float(value: &serde_json::Value) -> Option<f64> {
    value.as_f64()
}

fn boolean(value: &serde_json::Value) -> Option<bool> {
    value.as_bool()
}

fn text(value: &serde_json::Value) -> Option<&str> {
    value.as_str()
}

fn any(value: &serde_json::Value) -> Option<&serde_json::Value> {
    (!value.is_null()).then_some(value)
}

fn show_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn show_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

fn show_opt_value(value: Option<&serde_json::Value>) -> String {
    value.map_or_else(|| "null".to_string(), show_value)
}

fn show_property<T: std::fmt::Display>(value: &Option<T>, placeholder: &str) -> String {
    match value {
        Some(v) => v.to_string(),
        None => placeholder.to_string(),
    }
}

fn show_property_value(value: &Option<serde_json::Value>, placeholder: &str) -> String {
    match value {
        Some(v) => show_value(v),
        None => placeholder.to_string(),
    }
}
"#;

/// Renders callable tables as Rust source.
pub struct RustEmitter;

impl Emitter for RustEmitter {
    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn emit(&self, ctx: &EmitContext<'_>, tables: &[ContractAccessors]) -> String {
        let mut out = String::new();
        out.push_str("// @generated by loccat. Do not edit.\n");
        out.push_str("#![allow(dead_code, unused_variables, clippy::all)]\n\n");

        out.push_str(&format!(
            "pub const MANAGER_NAME: &str = {:?};\n\n",
            ctx.manager_name
        ));
        emit_locale(&mut out, ctx);
        emit_properties(&mut out, ctx);
        out.push_str(SUPPORT);

        for table in tables {
            out.push('\n');
            emit_contract(&mut out, ctx, table);
        }
        out
    }
}

fn line(out: &mut String, depth: usize, text: &str) {
    if !text.is_empty() {
        for _ in 0..depth {
            out.push_str("    ");
        }
        out.push_str(text);
    }
    out.push('\n');
}

fn emit_locale(out: &mut String, ctx: &EmitContext<'_>) {
    let variants: Vec<String> = ctx.locales.iter().map(|l| variant_name(l)).collect();

    line(out, 0, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    line(out, 0, "pub enum Locale {");
    for variant in &variants {
        line(out, 1, &format!("{},", variant));
    }
    line(out, 0, "}");
    line(out, 0, "");
    line(out, 0, "impl Locale {");
    let all: Vec<String> = variants.iter().map(|v| format!("Locale::{}", v)).collect();
    line(
        out,
        1,
        &format!("pub const ALL: &'static [Locale] = &[{}];", all.join(", ")),
    );
    line(
        out,
        1,
        &format!(
            "pub const DEFAULT: Locale = Locale::{};",
            variant_name(ctx.default_locale)
        ),
    );
    line(out, 0, "");
    line(out, 1, "pub fn as_str(self) -> &'static str {");
    line(out, 2, "match self {");
    for (locale, variant) in ctx.locales.iter().zip(&variants) {
        line(out, 3, &format!("Locale::{} => {:?},", variant, locale));
    }
    line(out, 2, "}");
    line(out, 1, "}");
    line(out, 0, "");
    line(out, 1, "pub fn from_tag(tag: &str) -> Option<Locale> {");
    line(out, 2, "match tag {");
    for (locale, variant) in ctx.locales.iter().zip(&variants) {
        line(out, 3, &format!("{:?} => Some(Locale::{}),", locale, variant));
    }
    line(out, 3, "_ => None,");
    line(out, 2, "}");
    line(out, 1, "}");
    line(out, 0, "}");
    line(out, 0, "");
}

fn emit_properties(out: &mut String, ctx: &EmitContext<'_>) {
    let names: Vec<String> = ctx.properties.keys().map(|n| format!("{:?}", n)).collect();
    line(
        out,
        0,
        &format!("pub const PROPERTY_NAMES: &[&str] = &[{}];", names.join(", ")),
    );
    line(out, 0, "");
    line(
        out,
        0,
        "/// Declared properties. Unset values leave their placeholder in place.",
    );
    line(out, 0, "#[derive(Debug, Clone, Default)]");
    if ctx.properties.is_empty() {
        line(out, 0, "pub struct Properties {}");
    } else {
        line(out, 0, "pub struct Properties {");
        for (name, ty) in ctx.properties {
            line(
                out,
                1,
                &format!("pub {}: Option<{}>,", field_ident(name), owned_type(ty)),
            );
        }
        line(out, 0, "}");
    }
    line(out, 0, "");
}

fn emit_contract(out: &mut String, ctx: &EmitContext<'_>, table: &ContractAccessors) {
    line(
        out,
        0,
        &format!(
            "/// `{}`, read from `{}`.",
            table.contract, table.file_name
        ),
    );
    line(
        out,
        0,
        &format!("pub mod {} {{", module_ident(&table.contract)),
    );
    line(out, 1, "use super::{Locale, Properties};");

    for accessor in table.accessors() {
        line(out, 0, "");
        emit_accessor(out, ctx, accessor);
    }

    line(out, 0, "");
    emit_render_by_name(out, table);

    let methods: Vec<&ForwardingMethod> = table.methods().collect();
    if !methods.is_empty() {
        line(out, 0, "");
        line(out, 1, "pub mod methods {");
        line(out, 2, "use super::super::{Locale, Properties};");
        for method in methods {
            if let Some(accessor) = table.accessor(&method.key) {
                line(out, 0, "");
                emit_method(out, method, accessor);
            }
        }
        line(out, 1, "}");
    }
    line(out, 0, "}");
}

fn emit_accessor(out: &mut String, ctx: &EmitContext<'_>, accessor: &TypedAccessor) {
    let mut params = vec!["locale: Locale".to_string(), "props: &Properties".to_string()];
    params.extend(
        accessor
            .schema
            .iter()
            .map(|p| format!("{}: {}", param_ident(&p.name), borrowed_type(&p.ty))),
    );

    line(out, 1, &format!("/// `{}`", accessor.key));
    line(
        out,
        1,
        &format!(
            "pub fn {}({}) -> String {{",
            escape_ident(accessor.ident.clone()),
            params.join(", ")
        ),
    );

    let fallback = match &accessor.fallback {
        Fallback::Template { template, .. } => render_expr(ctx, &accessor.schema, template),
        Fallback::Key => format!("String::from({})", raw_literal(&accessor.key)),
    };

    if accessor.branches.is_empty() {
        line(out, 2, &fallback);
    } else {
        line(out, 2, "match locale {");
        for branch in &accessor.branches {
            line(
                out,
                3,
                &format!(
                    "Locale::{} => {},",
                    variant_name(&branch.locale),
                    render_expr(ctx, &accessor.schema, &branch.template)
                ),
            );
        }
        line(out, 3, &format!("_ => {},", fallback));
        line(out, 2, "}");
    }
    line(out, 1, "}");
}

fn emit_render_by_name(out: &mut String, table: &ContractAccessors) {
    line(out, 1, "/// Renders a key by name, reading arguments from a JSON object.");
    line(out, 1, "pub fn render_by_name(");
    line(out, 2, "name: &str,");
    line(out, 2, "locale: Locale,");
    line(out, 2, "props: &Properties,");
    line(out, 2, "args: &super::Args,");
    line(out, 1, ") -> Result<String, super::LookupError> {");
    line(out, 2, "match name {");
    for accessor in table.accessors() {
        let mut call_args = vec!["locale".to_string(), "props".to_string()];
        call_args.extend(accessor.schema.iter().map(|p| {
            format!(
                "super::{}(args, {:?}, {:?}, {:?}, super::{})?",
                if p.ty.nullable { "nullable" } else { "typed" },
                accessor.key,
                p.name,
                p.ty.to_string(),
                reader(&p.ty)
            )
        }));
        line(
            out,
            3,
            &format!(
                "{:?} => Ok({}({})),",
                accessor.key,
                escape_ident(accessor.ident.clone()),
                call_args.join(", ")
            ),
        );
    }
    line(out, 3, "_ => Err(super::LookupError::KeyNotFound {");
    line(out, 4, "key: name.to_string(),");
    line(out, 3, "}),");
    line(out, 2, "}");
    line(out, 1, "}");
}

fn emit_method(out: &mut String, method: &ForwardingMethod, accessor: &TypedAccessor) {
    let mut params = vec!["props: &Properties".to_string()];
    for (position, name) in method.parameters.iter().enumerate() {
        let ty = if position == method.locale_slot {
            "Locale".to_string()
        } else if let Some(parameter) = accessor.schema.get(name)
            && method.arguments.contains(&position)
        {
            borrowed_type(&parameter.ty)
        } else {
            "impl Sized".to_string()
        };
        params.push(format!("{}: {}", param_ident(name), ty));
    }

    let mut call_args = vec![
        param_ident(&method.parameters[method.locale_slot]),
        "props".to_string(),
    ];
    call_args.extend(
        method
            .arguments
            .iter()
            .map(|&position| param_ident(&method.parameters[position])),
    );

    line(out, 2, &format!("/// Forwards to `{}`.", method.key));
    line(
        out,
        2,
        &format!(
            "pub fn {}({}) -> String {{",
            method_ident(&method.name),
            params.join(", ")
        ),
    );
    line(
        out,
        3,
        &format!(
            "super::{}({})",
            escape_ident(accessor.ident.clone()),
            call_args.join(", ")
        ),
    );
    line(out, 2, "}");
}

/// Expression producing the rendered text of one template.
fn render_expr(ctx: &EmitContext<'_>, schema: &ParameterSchema, template: &Template) -> String {
    let mut format_string = String::new();
    let mut plain = String::new();
    let mut args: Vec<String> = Vec::new();

    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => {
                format_string.push_str(&text.replace('{', "{{").replace('}', "}}"));
                plain.push_str(text);
            }
            Segment::Placeholder(name) => {
                if let Some(parameter) = schema.get(name) {
                    format_string.push_str("{}");
                    args.push(display_expr(&param_ident(name), &parameter.ty));
                } else if let Some(ty) = ctx.properties.get(name) {
                    format_string.push_str("{}");
                    let helper = if is_value(ty) {
                        "show_property_value"
                    } else {
                        "show_property"
                    };
                    args.push(format!(
                        "super::{}(&props.{}, {:?})",
                        helper,
                        field_ident(name),
                        format!("{{{}}}", name)
                    ));
                } else {
                    format_string.push_str(&format!("{{{{{}}}}}", name));
                    plain.push_str(&format!("{{{}}}", name));
                }
            }
        }
    }

    if args.is_empty() {
        format!("String::from({})", raw_literal(&plain))
    } else {
        format!("format!({}, {})", raw_literal(&format_string), args.join(", "))
    }
}

fn display_expr(ident: &str, ty: &ParamType) -> String {
    match (ty.nullable, is_value(ty)) {
        (false, false) => ident.to_string(),
        (false, true) => format!("super::show_value({})", ident),
        (true, false) => format!("super::show_opt({})", ident),
        (true, true) => format!("super::show_opt_value({})", ident),
    }
}

fn is_value(ty: &ParamType) -> bool {
    matches!(ty.kind, TypeKind::Any | TypeKind::Named { .. })
}

fn reader(ty: &ParamType) -> &'static str {
    match ty.kind {
        TypeKind::Integer => "integer",
        TypeKind::Float => "float",
        TypeKind::Boolean => "boolean",
        TypeKind::Text => "text",
        TypeKind::Any | TypeKind::Named { .. } => "any",
    }
}

fn borrowed_type(ty: &ParamType) -> String {
    let base = match ty.kind {
        TypeKind::Integer => "i64",
        TypeKind::Float => "f64",
        TypeKind::Boolean => "bool",
        TypeKind::Text => "&str",
        TypeKind::Any | TypeKind::Named { .. } => "&serde_json::Value",
    };
    if ty.nullable {
        format!("Option<{}>", base)
    } else {
        base.to_string()
    }
}

fn owned_type(ty: &ParamType) -> &'static str {
    match ty.kind {
        TypeKind::Integer => "i64",
        TypeKind::Float => "f64",
        TypeKind::Boolean => "bool",
        TypeKind::Text => "String",
        TypeKind::Any | TypeKind::Named { .. } => "serde_json::Value",
    }
}

/// Raw string literal with as many `#` as the text needs.
fn raw_literal(text: &str) -> String {
    let mut hashes = 0;
    while text.contains(&format!("\"{}", "#".repeat(hashes))) {
        hashes += 1;
    }
    let fence = "#".repeat(hashes);
    format!("r{}\"{}\"{}", fence, text, fence)
}
