//! # Settings Module
//!
//! ## Purpose
//! Calculator configuration kept in a JSON file (`chemcalc_config.json` in the working
//! directory by default): where the compound table comes from, whether molar masses may
//! be derived from formulas, logging and how results are printed.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "compound_library": "my_compounds.json",
//!   "derive_molar_mass_from_formula": true,
//!   "log_level": "info",
//!   "log_file": "chemcalc.log",
//!   "precision": 3,
//!   "default_conversion_percent": 100.0
//! }
//! ```
//! Every field is optional; missing fields take their default values. A missing file
//! means the default configuration, a malformed one is reported as an error.
//!
//! ## Usage
//! ```rust
//! use ChemCalc::settings::SettingsManager;
//!
//! let manager = SettingsManager::with_config_file("no_such_config.json").unwrap();
//! assert_eq!(manager.get_config().precision, 3);
//! let library = manager.build_library().unwrap();
//! assert!(library.lookup("H2O").is_some());
//! ```

use crate::Stoichiometry::compound_library::CompoundLibrary;
use crate::Stoichiometry::errors::StoichResult;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, File};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "chemcalc_config.json";

/// Configuration of the calculator.
///
/// # Fields
/// * `compound_library` - path to a JSON compound table, `None` for the built-in table
/// * `derive_molar_mass_from_formula` - compute unknown molar masses from atomic masses
/// * `log_level` - one of `off`, `error`, `warn`, `info`, `debug`, `trace`
/// * `log_file` - optional file receiving a copy of the log
/// * `precision` - digits after the decimal point in printed tables
/// * `default_conversion_percent` - conversion offered by the interactive menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub compound_library: Option<String>,
    pub derive_molar_mass_from_formula: bool,
    pub log_level: String,
    pub log_file: Option<String>,
    pub precision: usize,
    pub default_conversion_percent: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            compound_library: None,
            derive_molar_mass_from_formula: false,
            log_level: "info".to_string(),
            log_file: None,
            precision: 3,
            default_conversion_percent: 100.0,
        }
    }
}

impl CalculatorConfig {
    /// log level parsed from `log_level`
    pub fn level_filter(&self) -> Result<LevelFilter, Box<dyn std::error::Error>> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| format!("Unknown log level: {}", self.log_level).into())
    }

    /// default conversion as a fraction in (0, 1]
    pub fn default_conversion_fraction(&self) -> f64 {
        self.default_conversion_percent / 100.0
    }
}

/// Owns the current configuration and the file it is persisted to.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: CalculatorConfig,
    config_file: String,
}

impl SettingsManager {
    /// Loads `chemcalc_config.json` from the current directory.
    ///
    /// # Returns
    /// * `Ok(SettingsManager)` - with the loaded or default configuration
    /// * `Err(Box<dyn std::error::Error>)` - if the file exists but cannot be read or parsed
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    /// Same as `new` with a custom configuration file path.
    pub fn with_config_file(config_file: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Self::load_config(config_file)?;
        Ok(Self {
            config,
            config_file: config_file.to_string(),
        })
    }

    fn load_config(config_file: &str) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: CalculatorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(CalculatorConfig::default())
        }
    }

    /// Writes the configuration to the config file as pretty JSON.
    /// Does nothing during tests so the real config file is left alone.
    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            self.write_config(&self.config_file)
        }
    }

    /// Writes the configuration to an arbitrary path.
    pub fn write_config<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get_config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Switches to another compound table; the file must exist.
    pub fn set_compound_library(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if Path::new(path).exists() {
            self.config.compound_library = Some(path.to_string());
            self.save_config()?;
            Ok(())
        } else {
            Err(format!("File does not exist: {}", path).into())
        }
    }

    pub fn set_derive_molar_mass_from_formula(
        &mut self,
        derive: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.config.derive_molar_mass_from_formula = derive;
        self.save_config()
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), Box<dyn std::error::Error>> {
        let previous = std::mem::replace(&mut self.config.log_level, level.to_lowercase());
        if let Err(e) = self.config.level_filter() {
            self.config.log_level = previous;
            return Err(e);
        }
        self.save_config()
    }

    pub fn set_precision(&mut self, precision: usize) -> Result<(), Box<dyn std::error::Error>> {
        self.config.precision = precision;
        self.save_config()
    }

    /// # Arguments
    /// * `percent` - conversion in (0, 100]
    pub fn set_default_conversion_percent(
        &mut self,
        percent: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !(percent.is_finite() && percent > 0.0 && percent <= 100.0) {
            return Err(format!("Conversion must be in (0, 100] %, got {}", percent).into());
        }
        self.config.default_conversion_percent = percent;
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.config = CalculatorConfig::default();
        self.save_config()
    }

    /// Compound library described by the configuration: the JSON table if one is set,
    /// otherwise the built-in table.
    pub fn build_library(&self) -> StoichResult<CompoundLibrary> {
        let mut library = match &self.config.compound_library {
            Some(path) => CompoundLibrary::from_json_file(path)?,
            None => CompoundLibrary::builtin(),
        };
        library.set_derive_molar_mass_from_formula(self.config.derive_molar_mass_from_formula);
        Ok(library)
    }
}

/// Initializes terminal logging (and file logging if `log_file` is set) at the configured level.
/// Fails if a logger was already installed.
pub fn init_logging(config: &CalculatorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let level = config.level_filter()?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &config.log_file {
        loggers.push(WriteLogger::new(level, Config::default(), File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let manager = SettingsManager::with_config_file(path.to_str().unwrap()).unwrap();
        assert_eq!(manager.get_config(), &CalculatorConfig::default());
        assert_eq!(manager.get_config().level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(manager.get_config().default_conversion_fraction(), 1.0);
    }

    #[test]
    fn test_partial_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"precision": 5, "log_level": "debug"}"#)
            .unwrap();
        let manager = SettingsManager::with_config_file(file.path().to_str().unwrap()).unwrap();
        let config = manager.get_config();
        assert_eq!(config.precision, 5);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
        assert!(!config.derive_molar_mass_from_formula);
        assert_eq!(config.default_conversion_percent, 100.0);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ precision: ").unwrap();
        assert!(SettingsManager::with_config_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_write_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let mut manager = SettingsManager::with_config_file("definitely_missing.json").unwrap();
        manager.set_precision(6).unwrap();
        manager.set_derive_molar_mass_from_formula(true).unwrap();
        manager.set_default_conversion_percent(80.0).unwrap();
        manager.write_config(&path).unwrap();
        let reloaded = SettingsManager::with_config_file(&path).unwrap();
        assert_eq!(reloaded.get_config(), manager.get_config());
        assert_eq!(reloaded.get_config().default_conversion_fraction(), 0.8);
    }

    #[test]
    fn test_setters_validate() {
        let mut manager = SettingsManager::with_config_file("definitely_missing.json").unwrap();
        assert!(manager.set_log_level("loud").is_err());
        assert_eq!(manager.get_config().log_level, "info");
        manager.set_log_level("WARN").unwrap();
        assert_eq!(manager.get_config().level_filter().unwrap(), LevelFilter::Warn);
        assert!(manager.set_default_conversion_percent(0.0).is_err());
        assert!(manager.set_default_conversion_percent(120.0).is_err());
        assert!(manager.set_compound_library("no_such_table.json").is_err());
        manager.reset_to_defaults().unwrap();
        assert_eq!(manager.get_config(), &CalculatorConfig::default());
    }

    #[test]
    fn test_build_library_from_json() {
        let mut table = NamedTempFile::new().unwrap();
        table
            .write_all(br#"{"brine": {"formula": "NaCl", "molar_mass": 58.44}}"#)
            .unwrap();
        let mut manager = SettingsManager::with_config_file("definitely_missing.json").unwrap();
        manager
            .set_compound_library(table.path().to_str().unwrap())
            .unwrap();
        manager.set_derive_molar_mass_from_formula(true).unwrap();
        let library = manager.build_library().unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.formula_of("brine"), "NaCl");
        // derivation follows the config flag
        assert!(library.molar_mass_of("H2O").is_some());
    }
}
