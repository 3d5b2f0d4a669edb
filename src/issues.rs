//! Issue types produced while compiling catalogs.
//!
//! Warnings never stop a compilation; they are collected here (and logged)
//! so the CLI can report them. Fatal build errors are wrapped as
//! `BuildFailureIssue` only for reporting; the compilation itself has
//! already been aborted when one exists.

use enum_dispatch::enum_dispatch;

use crate::error::CompileError;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingSource,
    MissingDefault,
    MissingTranslation,
    MissingTemplate,
    ShadowedTag,
    UnknownPlaceholder,
    BuildFailure,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingSource => write!(f, "missing-source"),
            Rule::MissingDefault => write!(f, "missing-default"),
            Rule::MissingTranslation => write!(f, "missing-translation"),
            Rule::MissingTemplate => write!(f, "missing-template"),
            Rule::ShadowedTag => write!(f, "shadowed-tag"),
            Rule::UnknownPlaceholder => write!(f, "unknown-placeholder"),
            Rule::BuildFailure => write!(f, "build-failure"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Source file for a (locale, logical file) pair does not exist.
/// The locale contributes no entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSourceIssue {
    pub contract: String,
    pub locale: String,
    pub file_name: String,
    pub path: String,
}

impl MissingSourceIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingSource
    }
}

/// Key has no template in the default locale, so it has no guaranteed
/// fallback content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDefaultIssue {
    pub contract: String,
    /// Source file of the default locale.
    pub file_path: String,
    pub key: String,
    pub default_locale: String,
    /// Locales that do define the key.
    pub defined_in: Vec<String>,
}

impl MissingDefaultIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingDefault
    }
}

/// Key is missing from a non-default locale and falls back at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub contract: String,
    pub key: String,
    pub locale: String,
    pub file_path: String,
}

impl MissingTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

/// Declared key that no locale defines; it renders as the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTemplateIssue {
    pub contract: String,
    pub file_name: String,
    pub key: String,
}

impl MissingTemplateIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingTemplate
    }
}

/// Source tag that disagrees with the key's declaration; the declaration wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedTagIssue {
    pub contract: String,
    pub key: String,
    pub locale: String,
    pub file_path: String,
    pub tag: String,
    pub declared: String,
}

impl ShadowedTagIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ShadowedTag
    }
}

/// Placeholder that is neither a parameter nor a declared property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlaceholderIssue {
    pub contract: String,
    pub key: String,
    pub locale: String,
    pub file_path: String,
    pub placeholder: String,
}

impl UnknownPlaceholderIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownPlaceholder
    }
}

/// A fatal compile error, carried for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFailureIssue {
    pub code: &'static str,
    pub error: String,
}

impl BuildFailureIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::BuildFailure
    }
}

impl From<&CompileError> for BuildFailureIssue {
    fn from(error: &CompileError) -> Self {
        Self {
            code: error.code(),
            error: error.to_string(),
        }
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while compiling catalogs.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingSource(MissingSourceIssue),
    MissingDefault(MissingDefaultIssue),
    MissingTranslation(MissingTranslationIssue),
    MissingTemplate(MissingTemplateIssue),
    ShadowedTag(ShadowedTagIssue),
    UnknownPlaceholder(UnknownPlaceholderIssue),
    BuildFailure(BuildFailureIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A concrete source file.
    File { path: &'a str },
    /// A key inside a source file or logical file.
    Key { file: &'a str, key: &'a str },
    /// No file involved.
    Global,
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the `Issue`
/// enum to the variant.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Code shown in brackets after the severity.
    fn code(&self) -> String {
        self.report_rule().to_string()
    }

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingSourceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        format!("no {} source for '{}'", self.locale, self.file_name)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} gets no entries from {}", self.contract, self.locale))
    }
}

impl Report for MissingDefaultIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Key {
            file: &self.file_path,
            key: &self.key,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "missing in default locale {}, defined in: {}",
            self.default_locale,
            self.defined_in.join(", ")
        ))
    }

    fn hint(&self) -> Option<String> {
        self.defined_in
            .first()
            .map(|locale| format!("other locales fall back to {}", locale))
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Key {
            file: &self.file_path,
            key: &self.key,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("missing in {}", self.locale))
    }
}

impl Report for MissingTemplateIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Key {
            file: &self.file_name,
            key: &self.key,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("declared by {} but defined in no locale", self.contract))
    }
}

impl Report for ShadowedTagIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Key {
            file: &self.file_path,
            key: &self.key,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "tag '{}' in {} ignored, declared as '{}'",
            self.tag, self.locale, self.declared
        ))
    }
}

impl Report for UnknownPlaceholderIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Key {
            file: &self.file_path,
            key: &self.key,
        }
    }

    fn message(&self) -> String {
        format!("{{{}}}", self.placeholder)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "'{}' in {} is not a parameter or property, rendered verbatim",
            self.key, self.locale
        ))
    }
}

impl Report for BuildFailureIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Global
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn code(&self) -> String {
        self.code.to_string()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file(&self) -> Option<&str> {
        match self.location() {
            ReportLocation::File { path } => Some(path),
            ReportLocation::Key { file, .. } => Some(file),
            ReportLocation::Global => None,
        }
    }

    fn sort_key(&self) -> &str {
        match self.location() {
            ReportLocation::Key { key, .. } => key,
            _ => "",
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // Global issues first, then by file, key, rule, message
        match (self.sort_file(), other.sort_file()) {
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (a, b) => a
                .cmp(&b)
                .then_with(|| self.sort_key().cmp(other.sort_key()))
                .then_with(|| self.rule().cmp(&other.rule()))
                .then_with(|| self.message().cmp(&other.message())),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
