use super::run::RunConfig;
use super::traits::ConfigSection;
use crate::error::FlameError;
use crate::genome::{Genome, GenomeBuilder, MapParams};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};
use toml::Value;

/// One flame file: the `[run]` section plus the `[genome]` key table. The
/// genome table is kept as raw TOML; dotted keys nest into sub-tables and
/// are flattened back into the flat `xform.{i}.*` namespace on demand.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlameConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub genome: toml::Table,
}

impl FlameConfig {
    pub fn validate(&self) -> Result<(), FlameError> {
        self.run.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<FlameConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(FlameConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FlameError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FlameError::Configuration(format!("Failed to read flame file: {}", e)))?;

        let config: FlameConfig = toml::from_str(&contents)
            .map_err(|e| FlameError::Configuration(format!("Failed to parse flame file: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FlameError> {
        let config = self.config.read().unwrap();
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| FlameError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| FlameError::Configuration(format!("Failed to write flame file: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> FlameConfig {
        self.config.read().unwrap().clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), FlameError>
    where
        F: FnOnce(&mut FlameConfig),
    {
        let mut config = self.config.write().unwrap();
        f(&mut config);
        config.validate()?;
        Ok(())
    }

    /// Flatten the `[genome]` table into the flat parameter namespace.
    pub fn genome_params(&self) -> Result<MapParams, FlameError> {
        let config = self.config.read().unwrap();
        let mut params = MapParams::new();
        flatten_table("", &config.genome, &mut params)?;
        Ok(params)
    }

    /// Build the run's genome from the loaded `[genome]` table.
    pub fn build_genome(&self) -> Result<Genome, FlameError> {
        let params = self.genome_params()?;
        GenomeBuilder::from_params(&params)?.build()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten_table(prefix: &str, table: &toml::Table, out: &mut MapParams) -> Result<(), FlameError> {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match value {
            Value::Table(nested) => flatten_table(&key, nested, out)?,
            Value::Integer(v) => {
                out.set_i64(key, *v);
            }
            Value::Float(v) => {
                out.set_f64(key, *v);
            }
            Value::Boolean(v) => {
                out.set_bool(key, *v);
            }
            other => {
                return Err(FlameError::Configuration(format!(
                    "Genome key '{}' has unsupported type {}",
                    key,
                    other.type_str()
                )))
            }
        }
    }
    Ok(())
}
