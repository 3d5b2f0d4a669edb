//! Compilation driver.
//!
//! Runs the pipeline once per contract:
//!
//! 1. Load and flatten the sources of the contract's logical file, once per
//!    file across contracts.
//! 2. Resolve parameter schemas.
//! 3. Assemble the catalog.
//! 4. Generate the callable table.
//!
//! Any `CompileError` aborts the whole run. Warnings are collected as
//! issues and logged.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::{Path, PathBuf},
};

use crate::{
    accessor::{ContractAccessors, generate},
    config::Config,
    core::{
        Contract, LocaleEntries, ParamType, SourceNode,
        assemble::{AssembleContext, assemble},
        flatten::flatten_locale,
        parsers::{parse_source_file, yaml::parse_yaml_str},
        schema::resolve_schemas,
    },
    emit::{
        EmitContext, Emitter,
        ident::{ensure_distinct, field_ident, module_ident, variant_name},
    },
    error::CompileError,
    issues::{Issue, MissingSourceIssue, Report, Severity},
    registry::CatalogRegistry,
    utils::expand_location,
};

/// A source document found for one (locale, logical file) pair.
pub struct LoadedSource {
    pub path: String,
    pub root: SourceNode,
}

pub enum SourceLookup {
    Found(LoadedSource),
    /// No source exists at `path`.
    Missing { path: String },
}

/// Locates and parses localization sources.
pub trait SourceLoader {
    fn load(&self, locale: &str, file_name: &str) -> Result<SourceLookup, CompileError>;
}

/// Reads sources from disk through a location format.
pub struct FsSourceLoader {
    root: PathBuf,
    location_format: String,
}

impl FsSourceLoader {
    pub fn new(root: impl Into<PathBuf>, location_format: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            location_format: location_format.into(),
        }
    }

    /// Loader for the localization directory of a project rooted at `root`.
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(
            root.join(&config.localization_directory),
            config.location_format.clone(),
        )
    }

    pub fn path_for(&self, locale: &str, file_name: &str) -> PathBuf {
        self.root
            .join(expand_location(&self.location_format, locale, file_name))
    }
}

impl SourceLoader for FsSourceLoader {
    fn load(&self, locale: &str, file_name: &str) -> Result<SourceLookup, CompileError> {
        let path = self.path_for(locale, file_name);
        if !path.is_file() {
            return Ok(SourceLookup::Missing {
                path: path.display().to_string(),
            });
        }
        let root = parse_source_file(&path)?;
        Ok(SourceLookup::Found(LoadedSource {
            path: path.display().to_string(),
            root,
        }))
    }
}

/// Sources held in memory, keyed by (locale, logical file).
#[derive(Default)]
pub struct MemorySourceLoader {
    sources: HashMap<(String, String), SourceNode>,
}

impl MemorySourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locale: &str, file_name: &str, root: SourceNode) {
        self.sources
            .insert((locale.to_string(), file_name.to_string()), root);
    }

    /// Parses `content` as YAML and stores it.
    pub fn insert_yaml(
        &mut self,
        locale: &str,
        file_name: &str,
        content: &str,
    ) -> Result<(), CompileError> {
        let root = parse_yaml_str(content, &Self::path(locale, file_name))?;
        self.insert(locale, file_name, root);
        Ok(())
    }

    fn path(locale: &str, file_name: &str) -> String {
        expand_location("%locale%/%name%.yaml", locale, file_name)
    }
}

impl SourceLoader for MemorySourceLoader {
    fn load(&self, locale: &str, file_name: &str) -> Result<SourceLookup, CompileError> {
        let path = Self::path(locale, file_name);
        Ok(
            match self
                .sources
                .get(&(locale.to_string(), file_name.to_string()))
            {
                Some(root) => SourceLookup::Found(LoadedSource {
                    path,
                    root: root.clone(),
                }),
                None => SourceLookup::Missing { path },
            },
        )
    }
}

/// Registry-level settings shared by every contract of a run.
#[derive(Debug, Clone)]
pub struct CompileSettings {
    pub manager_name: String,
    pub locales: Vec<String>,
    pub default_locale: String,
    pub bot_package: String,
    pub properties: BTreeMap<String, ParamType>,
}

impl CompileSettings {
    pub fn new(locales: Vec<String>, default_locale: impl Into<String>) -> Self {
        Self {
            manager_name: "localization.LocalizationManager".to_string(),
            locales,
            default_locale: default_locale.into(),
            bot_package: String::new(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_bot_package(mut self, bot_package: impl Into<String>) -> Self {
        self.bot_package = bot_package.into();
        self
    }

    pub fn with_manager_name(mut self, manager_name: impl Into<String>) -> Self {
        self.manager_name = manager_name.into();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.properties.insert(name.into(), ty);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, CompileError> {
        config
            .validate()
            .map_err(|e| CompileError::InvalidConfig(format!("{:#}", e)))?;
        let properties = config
            .property_types()
            .map_err(|e| CompileError::InvalidConfig(format!("{:#}", e)))?;

        Ok(Self {
            manager_name: config.manager_name.clone(),
            locales: config.locales.clone(),
            default_locale: config.default_locale().to_string(),
            bot_package: config.bot_package.clone(),
            properties,
        })
    }

    fn validate(&self) -> Result<(), CompileError> {
        if self.locales.is_empty() {
            return Err(CompileError::InvalidConfig(
                "at least one locale is required".to_string(),
            ));
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(CompileError::InvalidConfig(format!(
                "default locale '{}' is not one of: {}",
                self.default_locale,
                self.locales.join(", ")
            )));
        }
        ensure_distinct(
            || "locales".to_string(),
            self.locales.iter().map(String::as_str),
            variant_name,
        )?;
        ensure_distinct(
            || "properties".to_string(),
            self.properties.keys().map(String::as_str),
            field_ident,
        )
    }
}

/// Result of a successful compilation run.
pub struct CompileOutput {
    pub settings: CompileSettings,
    /// One table per contract, in input order.
    pub tables: Vec<ContractAccessors>,
    pub issues: Vec<Issue>,
    /// Number of source files read.
    pub source_files: usize,
}

impl CompileOutput {
    pub fn table(&self, contract: &str) -> Option<&ContractAccessors> {
        self.tables.iter().find(|t| t.contract == contract)
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    pub fn emit(&self, emitter: &dyn Emitter) -> String {
        let ctx = EmitContext {
            manager_name: &self.settings.manager_name,
            locales: &self.settings.locales,
            default_locale: &self.settings.default_locale,
            properties: &self.settings.properties,
        };
        emitter.emit(&ctx, &self.tables)
    }

    pub fn into_registry(self) -> CatalogRegistry {
        CatalogRegistry::new(
            self.settings.manager_name,
            self.settings.locales,
            self.settings.default_locale,
            self.settings.properties,
            self.tables,
        )
    }
}

/// Compiles every contract against the sources `loader` provides.
pub fn compile(
    settings: CompileSettings,
    contracts: &[Contract],
    loader: &dyn SourceLoader,
) -> Result<CompileOutput, CompileError> {
    settings.validate()?;
    ensure_distinct(
        || "contracts".to_string(),
        contracts.iter().map(|c| c.name.as_str()),
        module_ident,
    )
    .or_else(|err| match err {
        // The same name twice is reported as a duplicate contract below.
        CompileError::IdentifierCollision { ref first, ref second, .. } if first == second => {
            Ok(())
        }
        err => Err(err),
    })?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut sources: HashMap<String, Vec<LocaleEntries>> = HashMap::new();
    let mut tables = Vec::with_capacity(contracts.len());
    let mut issues = Vec::new();
    let mut source_files = 0;

    for contract in contracts {
        if !seen.insert(&contract.name) {
            return Err(CompileError::DuplicateContract(contract.name.clone()));
        }

        let file_name = contract.file_name(&settings.bot_package);
        let declarations = contract.declarations()?;

        if !sources.contains_key(&file_name) {
            let mut loaded = Vec::with_capacity(settings.locales.len());
            for locale in &settings.locales {
                match loader.load(locale, &file_name)? {
                    SourceLookup::Found(source) => {
                        source_files += 1;
                        let mut entries = flatten_locale(locale, &source.path, &source.root);
                        if entries.entries.remove("").is_some() {
                            tracing::warn!(path = %source.path, "ignoring scalar document root");
                        }
                        tracing::debug!(path = %source.path, entries = entries.len(), "loaded source");
                        loaded.push(entries);
                    }
                    SourceLookup::Missing { path } => {
                        issues.push(Issue::MissingSource(MissingSourceIssue {
                            contract: contract.name.clone(),
                            locale: locale.clone(),
                            file_name: file_name.clone(),
                            path,
                        }));
                    }
                }
            }
            sources.insert(file_name.clone(), loaded);
        }
        let locales = sources.get(&file_name).map(Vec::as_slice).unwrap_or_default();

        let resolution = resolve_schemas(&contract.name, &declarations, locales)?;
        issues.extend(resolution.issues);

        let assembly = assemble(
            &AssembleContext {
                contract: &contract.name,
                file_name: &file_name,
                default_locale: &settings.default_locale,
                properties: &settings.properties,
            },
            &resolution.schemas,
            locales,
        );
        issues.extend(assembly.issues);

        tables.push(generate(
            &assembly.catalog,
            &declarations,
            &settings.locales,
            &settings.default_locale,
        )?);
        tracing::info!(
            contract = %contract.name,
            file = %file_name,
            keys = assembly.catalog.len(),
            "compiled contract"
        );
    }

    for issue in &issues {
        log_issue(issue);
    }

    Ok(CompileOutput {
        settings,
        tables,
        issues,
        source_files,
    })
}

fn log_issue(issue: &Issue) {
    let details = issue.details().unwrap_or_default();
    match issue.severity() {
        Severity::Error => {
            tracing::error!(code = %issue.code(), details = %details, "{}", issue.message())
        }
        Severity::Warning => {
            tracing::warn!(code = %issue.code(), details = %details, "{}", issue.message())
        }
    }
}
