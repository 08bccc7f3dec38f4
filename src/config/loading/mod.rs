mod merging;

use std::{
    fs,
    path::{Path, PathBuf},
};

use merging::merge_toml_configs;
use toml::Value;
use tracing::{debug, instrument};

use super::{Config, ConfigError, ConfigPaths};

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined or the
    /// file cannot be loaded (see [`Config::load_from`]).
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_from(&ConfigPaths::main_config()?)
    }

    /// Loads a configuration file together with the board files it imports.
    ///
    /// Paths listed under `imports` are resolved relative to the importing
    /// file, with `.toml` appended when no extension is given. Imports may
    /// import further files. Imported tables are deep-merged beneath the
    /// importing file, which wins on conflicts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read
    /// - The TOML content is invalid
    /// - Any imported file cannot be loaded
    /// - An import chain loops back on itself
    /// - The merged configuration does not match the schema
    #[instrument]
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let canonical = path.canonicalize().map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            details: format!("failed to resolve path: {e}"),
        })?;

        let mut chain = Vec::new();
        let merged = Self::load_value(&canonical, &mut chain)?;

        merged
            .try_into()
            .map_err(|e| ConfigError::ConfigValidation {
                component: "config parsing".to_string(),
                details: format!("{e}"),
            })
    }

    fn load_value(path: &Path, chain: &mut Vec<PathBuf>) -> Result<Value, ConfigError> {
        if chain.iter().any(|p| p == path) {
            let names: Vec<String> = chain
                .iter()
                .chain(std::iter::once(&path.to_path_buf()))
                .map(|p| {
                    p.file_name()
                        .unwrap_or(p.as_os_str())
                        .to_string_lossy()
                        .to_string()
                })
                .collect();

            return Err(ConfigError::ConfigValidation {
                component: "import system".to_string(),
                details: format!("circular import detected: {}", names.join(" -> ")),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::import(e, path))?;
        let value: Value =
            toml::from_str(&content).map_err(|e| ConfigError::toml_parse(e, Some(path)))?;

        chain.push(path.to_path_buf());
        let imports = Self::extract_import_paths(&value)
            .iter()
            .map(|import| {
                let resolved = Self::resolve_import_path(path, import)?;
                debug!(import = %resolved.display(), "Loading imported config");
                let canonical = resolved
                    .canonicalize()
                    .map_err(|e| ConfigError::import(e, &resolved))?;
                Self::load_value(&canonical, chain)
            })
            .collect::<Result<Vec<Value>, ConfigError>>();
        chain.pop();

        Ok(merge_toml_configs(imports?, value))
    }

    fn extract_import_paths(value: &Value) -> Vec<String> {
        match value.get("imports") {
            Some(Value::Array(imports)) => imports
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.strip_prefix('@').unwrap_or(s).to_owned())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn resolve_import_path(base_path: &Path, import_path: &str) -> Result<PathBuf, ConfigError> {
        let parent_dir = base_path.parent().ok_or_else(|| ConfigError::ImportError {
            path: base_path.to_path_buf(),
            details: "invalid base path - no parent directory".to_string(),
        })?;

        let mut import_path_buf = PathBuf::from(import_path);
        if import_path_buf.extension().is_none() {
            import_path_buf.set_extension("toml");
        }

        Ok(parent_dir.join(import_path_buf))
    }
}
