use super::{Config, ConfigError};
use crate::chunker::ChunkSettings;
use std::num::NonZeroUsize;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunk_settings()?;

        if let Some(input) = &self.input
            && !input.is_file()
        {
            return Err(ConfigError::InvalidConfig(format!(
                "Input file does not exist: {}",
                input.display()
            )));
        }

        Ok(())
    }

    /// Chunker settings described by this configuration.
    pub fn chunk_settings(&self) -> Result<ChunkSettings, ConfigError> {
        let max_length = NonZeroUsize::new(self.max_length).ok_or_else(|| {
            ConfigError::InvalidConfig("Max length must be greater than 0".to_string())
        })?;

        if self.sequence_key.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Sequence key cannot be empty".to_string(),
            ));
        }

        Ok(ChunkSettings {
            enabled: self.enabled,
            max_length,
            sequence_key: self.sequence_key.clone(),
        })
    }
}
