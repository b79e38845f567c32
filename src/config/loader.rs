//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a tariff
//! directory: engine constants plus the rate tables behind the in-memory
//! catalog.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::catalog::{InMemoryRateCatalog, TariffTables};
use crate::error::{EngineError, EngineResult};

use super::types::TariffConfig;

/// Loads and provides access to a tariff directory.
///
/// # Directory Structure
///
/// ```text
/// config/ghc/
/// ├── tariff.yaml          # Engine constants (all optional)
/// └── tables/
///     └── test_contract.yaml  # Contracts, contract years and price rows
/// ```
///
/// Every `*.yaml` file under `tables/` is parsed as [`TariffTables`] and the
/// results are merged.
///
/// # Example
///
/// ```no_run
/// use tariff_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ghc")?;
/// println!("Fuel baseline: {}", loader.tariff().base_fuel_price);
/// # Ok::<(), tariff_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tariff: TariffConfig,
    catalog: InMemoryRateCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `tariff.yaml` or the `tables` directory is missing
    /// - Any file contains invalid YAML
    /// - The peak window is not a valid in-year range
    /// - The tables reference unknown contracts
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tariff_path = path.join("tariff.yaml");
        let tariff = Self::load_yaml::<TariffConfig>(&tariff_path)?;
        tariff
            .peak_period
            .validate()
            .map_err(|e| EngineError::ConfigParseError {
                path: tariff_path.display().to_string(),
                message: e.to_string(),
            })?;
        let tables = Self::load_tables(&path.join("tables"))?;
        let catalog = InMemoryRateCatalog::new(tables)?;

        info!(
            path = %path.display(),
            contracts = catalog.contract_codes().len(),
            "Loaded tariff configuration"
        );

        Ok(Self { tariff, catalog })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and merges all table files from the tables directory.
    fn load_tables(tables_dir: &Path) -> EngineResult<TariffTables> {
        let tables_dir_str = tables_dir.display().to_string();

        if !tables_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: tables_dir_str,
            });
        }

        let entries = fs::read_dir(tables_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tables_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tables_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no table files found)", tables_dir_str),
            });
        }

        // Stable merge order regardless of directory iteration order.
        paths.sort();

        let mut tables = TariffTables::default();
        for path in paths {
            tables.merge(Self::load_yaml::<TariffTables>(&path)?);
        }

        Ok(tables)
    }

    /// Returns the engine constants.
    pub fn tariff(&self) -> &TariffConfig {
        &self.tariff
    }

    /// Returns the loaded rate catalog.
    pub fn catalog(&self) -> &InMemoryRateCatalog {
        &self.catalog
    }

    /// Consumes the loader, returning the constants and the catalog.
    pub fn into_parts(self) -> (TariffConfig, InMemoryRateCatalog) {
        (self.tariff, self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Millicents;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tariff_engine_loader_{}_{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_directory_is_config_not_found() {
        let err = ConfigLoader::load("/definitely/not/here").unwrap_err();
        match err {
            EngineError::ConfigNotFound { path } => assert!(path.ends_with("tariff.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tables_directory_is_config_not_found() {
        let dir = scratch_dir("no_tables");
        fs::write(dir.join("tariff.yaml"), "{}").unwrap();

        let err = ConfigLoader::load(&dir).unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let dir = scratch_dir("bad_yaml");
        fs::write(dir.join("tariff.yaml"), "base_fuel_price: [not, a, number]").unwrap();

        let err = ConfigLoader::load(&dir).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_peak_window_is_parse_error() {
        for peak_period in [
            "{ start: { month: 13, day: 1 }, end: { month: 9, day: 30 } }",
            "{ start: { month: 5, day: 15 }, end: { month: 2, day: 30 } }",
            "{ start: { month: 10, day: 1 }, end: { month: 3, day: 31 } }",
        ] {
            let dir = scratch_dir("bad_peak");
            fs::write(
                dir.join("tariff.yaml"),
                format!("peak_period: {}\n", peak_period),
            )
            .unwrap();
            fs::create_dir_all(dir.join("tables")).unwrap();
            fs::write(dir.join("tables/empty.yaml"), "{}\n").unwrap();

            match ConfigLoader::load(&dir).unwrap_err() {
                EngineError::ConfigParseError { path, message } => {
                    assert!(path.ends_with("tariff.yaml"));
                    assert!(message.starts_with("Invalid peak_period"), "{}", message);
                }
                other => panic!("Expected ConfigParseError, got {:?}", other),
            }
            fs::remove_dir_all(dir).unwrap();
        }
    }

    #[test]
    fn test_loads_and_merges_table_files() {
        let dir = scratch_dir("merge");
        fs::write(dir.join("tariff.yaml"), "base_fuel_price: 260000\n").unwrap();
        fs::create_dir_all(dir.join("tables")).unwrap();
        fs::write(
            dir.join("tables/a_contracts.yaml"),
            r#"
contracts:
  - id: 5a3b5f7e-98a4-4b43-8b0f-2f8d8f1a9c01
    code: TEST
    name: Test Contract
"#,
        )
        .unwrap();
        fs::write(
            dir.join("tables/b_years.yaml"),
            r#"
contract_years:
  - contract_code: TEST
    name: Base Period Year 1
    start_date: 2024-01-01
    end_date: 2024-12-31
    escalation: "1.0197"
    escalation_compounded: "1.04071"
"#,
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.tariff().base_fuel_price, Millicents(260_000));
        assert_eq!(loader.catalog().contract_codes(), vec!["TEST"]);
        fs::remove_dir_all(dir).unwrap();
    }
}
