//! Config loading with an embedded fallback
//!
//! - If CONFIG_FILE is NOT set: use the embedded default only (no filesystem access)
//! - If CONFIG_FILE IS set but the file is missing: seed it with the embedded default
//! - If CONFIG_FILE IS set and the file exists: use it

use std::fs;
use std::io;
use std::path::PathBuf;

/// Default config.yaml compiled into the binary
pub const EMBEDDED_CONFIG: &str = include_str!("../config.yaml");

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Config loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var or --config)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }

    /// Read config as a UTF-8 string
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to the embedded config.
    pub fn read_config_string(&self) -> io::Result<String> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return fs::read_to_string(path);
            }
        }

        tracing::trace!("Loading config from embedded assets");
        Ok(EMBEDDED_CONFIG.to_string())
    }

    /// Write the embedded config to the configured path if nothing is there yet.
    ///
    /// Returns true when a file was written.
    pub fn seed_if_configured(&self) -> io::Result<bool> {
        let Some(ref path) = self.config_file else {
            return Ok(false);
        };
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, EMBEDDED_CONFIG)?;
        tracing::info!(path = %path.display(), "Seeded config file with embedded default");
        Ok(true)
    }

    /// Extract the embedded config to the filesystem (init command)
    ///
    /// Uses the configured path, or ./config.yaml if none is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./config.yaml"));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, EMBEDDED_CONFIG)?;
        report.written.push(path.display().to_string());
        Ok(report)
    }
}
