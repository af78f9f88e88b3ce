//! YAML-backed configuration repository (`config.yaml`).

use anyhow::{Context, Result};
use log::debug;

use super::connection::FileConnection;
use crate::domain::models::Configuration;
use crate::storage::traits::ConfigStorage;

const CONFIG_FILE: &str = "config.yaml";

#[derive(Clone)]
pub struct ConfigRepository {
    connection: FileConnection,
}

impl ConfigRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }
}

impl ConfigStorage for ConfigRepository {
    fn load_config(&self) -> Result<Option<Configuration>> {
        match self.connection.read_if_exists(CONFIG_FILE)? {
            Some(yaml) => {
                let config: Configuration =
                    serde_yaml::from_str(&yaml).context("malformed config.yaml")?;
                debug!("Loaded configuration with {} penalties", config.penalties.len());
                Ok(Some(config))
            }
            None => Ok(None),
        }
    }

    fn save_config(&self, config: &Configuration) -> Result<()> {
        let yaml = serde_yaml::to_string(config)?;
        self.connection.write_atomic(CONFIG_FILE, &yaml)?;
        debug!("Saved configuration");
        Ok(())
    }
}
