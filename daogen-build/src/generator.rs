//! Generation round driver.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::decl::{SchemaFile, TypeDecl};
use crate::emitter::{EmitOptions, GeneratedUnit, emit_entity, emit_mod_file, module_name};
use crate::error::ConfigError;
use crate::merger::merge_inheritance;
use crate::model::{EntityKind, EntityMap};
use crate::resolver::resolve_references;
use crate::scanner::{Scanner, check_generated_ids};
use crate::source::scan_directory;

/// Builder for configuring and running one generation round.
pub struct DaoGenerator {
    scan_paths: Vec<PathBuf>,
    schema_files: Vec<PathBuf>,
    output_dir: PathBuf,
    module_path: String,
    crate_name: String,
}

impl Default for DaoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DaoGenerator {
    pub fn new() -> Self {
        Self {
            scan_paths: Vec::new(),
            schema_files: Vec::new(),
            output_dir: PathBuf::from("src/generated"),
            module_path: "crate::generated".to_string(),
            crate_name: "crate".to_string(),
        }
    }

    /// Add a directory to scan for `#[derive(Entity)]` and friends.
    ///
    /// Can be called multiple times. When neither a scan path nor a schema
    /// file is configured, `src/` is scanned.
    pub fn scan_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scan_paths.push(path.into());
        self
    }

    /// Add a TOML declaration file.
    pub fn schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_files.push(path.into());
        self
    }

    /// Directory the generated modules are written to.
    ///
    /// Default: `src/generated`
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    /// Module path the output directory is mounted at.
    ///
    /// Default: `crate::generated`
    pub fn module_path(mut self, path: impl Into<String>) -> Self {
        self.module_path = path.into();
        self
    }

    /// Set the crate name used in computed module paths.
    ///
    /// Default: `crate`
    pub fn crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = name.into();
        self
    }

    /// Run the round and write every changed unit.
    ///
    /// Nothing is written unless every entity was rendered.
    pub fn run(self) -> Result<()> {
        let units = self.generate()?;
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create directory {}", self.output_dir.display()))?;

        for unit in &units {
            let path = self.output_dir.join(unit.file_name());
            if write_if_changed(&path, &unit.source)? {
                info!("daogen-build: Generated {} for {}", path.display(), unit.entity);
            }
        }

        let mod_file = self.output_dir.join("mod.rs");
        if write_if_changed(&mod_file, &emit_mod_file(&units))? {
            info!("daogen-build: Generated {}", mod_file.display());
        }
        Ok(())
    }

    /// Reads, scans, merges, resolves and renders without touching the
    /// output directory.
    pub fn generate(&self) -> Result<Vec<GeneratedUnit>> {
        let declarations = self.read_declarations()?;
        check_duplicate_types(&declarations)?;

        let mut scanner = Scanner::new(&declarations);
        let mut entities: EntityMap = scanner.scan_all().context("Failed to scan declarations")?;
        debug!(
            "daogen-build: Scanned {} types, {} embeddables cached",
            entities.len(),
            scanner.cache().len()
        );
        merge_inheritance(&mut entities).context("Failed to merge inherited properties")?;
        // Inherited identifiers can turn a generated id into a composite one.
        for entity in entities.values() {
            check_generated_ids(&entity.qualified_name, &entity.properties)
                .context("Failed to merge inherited properties")?;
        }
        resolve_references(&mut entities).context("Failed to resolve references")?;
        check_duplicate_modules(&entities)?;

        let options = EmitOptions {
            module_path: self.module_path.clone(),
        };
        let units = entities
            .values()
            .filter(|entity| entity.kind == EntityKind::Entity)
            .map(|entity| {
                emit_entity(entity, &entities, &options)
                    .with_context(|| format!("Failed to emit {}", entity.qualified_name))
            })
            .collect::<Result<Vec<_>>>()?;
        info!("daogen-build: Rendered {} data-access modules", units.len());
        Ok(units)
    }

    fn read_declarations(&self) -> Result<Vec<TypeDecl>> {
        let scan_paths = if self.scan_paths.is_empty() && self.schema_files.is_empty() {
            vec![PathBuf::from("src/")]
        } else {
            self.scan_paths.clone()
        };

        let mut declarations = Vec::new();
        for path in &scan_paths {
            let found =
                scan_directory(path, &self.crate_name).with_context(|| format!("Failed to scan {}", path.display()))?;
            declarations.extend(found);
        }
        for path in &self.schema_files {
            declarations.extend(read_schema_file(path)?);
        }
        Ok(declarations)
    }
}

fn read_schema_file(path: &Path) -> Result<Vec<TypeDecl>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let schema: SchemaFile =
        toml::from_str(&content).with_context(|| format!("Failed to parse declarations in {}", path.display()))?;
    debug!("daogen-build: {} declares {} types", path.display(), schema.types.len());
    Ok(schema.types)
}

fn check_duplicate_types(declarations: &[TypeDecl]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for decl in declarations {
        let name = decl.qualified_name();
        if !seen.insert(name.clone()) {
            return Err(ConfigError::DuplicateType { name });
        }
    }
    Ok(())
}

fn check_duplicate_modules(entities: &EntityMap) -> Result<(), ConfigError> {
    let mut modules: HashMap<String, &str> = HashMap::new();
    for entity in entities.values().filter(|entity| entity.kind == EntityKind::Entity) {
        let module = module_name(&entity.simple_name);
        if let Some(first) = modules.get(&module) {
            return Err(ConfigError::DuplicateModule {
                module,
                first: first.to_string(),
                second: entity.qualified_name.clone(),
            });
        }
        modules.insert(module, &entity.qualified_name);
    }
    Ok(())
}

/// Only write if content has changed (avoids unnecessary recompilation).
fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    let changed = match fs::read_to_string(path) {
        Ok(existing) => existing != content,
        Err(_) => true,
    };
    if changed {
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::DeclKind;

    fn decl(module: &str, name: &str) -> TypeDecl {
        TypeDecl {
            name: name.to_string(),
            module: module.to_string(),
            kind: DeclKind::Entity,
            table: None,
            schema: None,
            catalog: None,
            extends: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[test]
    fn rejects_a_type_declared_twice() {
        let declarations = vec![decl("crate::model", "Article"), decl("crate::model", "Article")];
        assert_eq!(
            check_duplicate_types(&declarations),
            Err(ConfigError::DuplicateType {
                name: "crate::model::Article".into()
            })
        );
        assert!(check_duplicate_types(&[decl("crate::a", "Article"), decl("crate::b", "Article")]).is_ok());
    }

    #[test]
    fn skips_unchanged_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unit.rs");
        assert!(write_if_changed(&path, "a").unwrap());
        assert!(!write_if_changed(&path, "a").unwrap());
        assert!(write_if_changed(&path, "b").unwrap());
    }
}
