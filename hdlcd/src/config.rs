use std::env::var_os;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use hdlcd_driver::lcd::hd44780::driver::MAX_WRITE_LEN;
use log::warn;
use serde::{Serialize, Deserialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "hdlcd.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_write_len must be at least 1")]
    ZeroWriteLen,
    #[error("config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config format: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Bytes taken from each input line, newline included.
    pub max_write_len: usize,
    /// Shown right after the display is attached.
    pub greeting: Option<String>,
}

impl Config {
    /// `$CONFIG_FILE`, or `hdlcd.json` in the working directory.
    pub fn path() -> PathBuf {
        var_os("CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Loads the settings file, if there's a readable one.
    ///
    /// A file that exists but can't be parsed is reported and treated as missing.
    pub fn try_load() -> Option<Self> {
        let path = Self::path();
        if !path.exists() {
            return None;
        }
        Self::load_from(&path)
            .inspect_err(|err| warn!("Ignoring {}: {}", path.display(), err))
            .ok()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_write_len == 0 {
            return Err(ConfigError::ZeroWriteLen);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_write_len: MAX_WRITE_LEN,
            greeting: None,
        }
    }
}
