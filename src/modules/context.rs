//! Shared context handed to every module.

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configuration plus the storage root modules write below.
///
/// Cloning is cheap; all clones share one read-only [`DashboardConfig`].
#[derive(Debug, Clone)]
pub struct ModuleContext {
    config: Arc<DashboardConfig>,
    storage_root: PathBuf,
}

impl ModuleContext {
    /// Creates a context whose storage root is the configured storage directory.
    pub fn new(config: DashboardConfig) -> Self {
        Self::from_shared(Arc::new(config))
    }

    /// Creates a context around an already shared configuration.
    pub fn from_shared(config: Arc<DashboardConfig>) -> Self {
        let storage_root = config.storage_directory.clone();
        Self {
            config,
            storage_root,
        }
    }

    /// Returns the context with a different storage root.
    #[must_use]
    pub fn with_storage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.storage_root = root.into();
        self
    }

    /// The shared configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Handle to the shared configuration.
    pub fn shared_config(&self) -> Arc<DashboardConfig> {
        Arc::clone(&self.config)
    }

    /// Storage root.
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// Storage directory of a module; an empty identifier maps to `module`.
    pub fn storage_dir(&self, identifier: &str) -> PathBuf {
        let name = if identifier.trim().is_empty() {
            "module"
        } else {
            identifier
        };
        self.storage_root.join(name)
    }

    /// Like [`storage_dir`](Self::storage_dir) but creates the directory.
    pub fn ensure_storage_dir(&self, identifier: &str) -> Result<PathBuf> {
        let dir = self.storage_dir(identifier);
        fs::create_dir_all(&dir).map_err(|e| DashboardError::io(&dir, e))?;
        Ok(dir)
    }

    /// Path of a file inside the configured log directory.
    pub fn log_file(&self, filename: &str) -> PathBuf {
        self.config.log_directory.join(filename)
    }

    /// Like [`log_file`](Self::log_file) but creates the log directory.
    pub fn ensure_log_file(&self, filename: &str) -> Result<PathBuf> {
        let dir = &self.config.log_directory;
        fs::create_dir_all(dir).map_err(|e| DashboardError::io(dir, e))?;
        Ok(dir.join(filename))
    }
}

impl Default for ModuleContext {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_dir_defaults_empty_identifier() {
        let context = ModuleContext::new(DashboardConfig::new()).with_storage_root("/srv/data");
        assert_eq!(context.storage_dir("notes"), PathBuf::from("/srv/data/notes"));
        assert_eq!(context.storage_dir(""), PathBuf::from("/srv/data/module"));
    }

    #[test]
    fn test_ensure_dirs_create_paths() {
        let temp_dir = TempDir::new().unwrap();
        let context = ModuleContext::new(DashboardConfig::new().with_data_root(temp_dir.path()));

        let dir = context.ensure_storage_dir("notes").unwrap();
        assert!(dir.is_dir());
        assert!(dir.starts_with(temp_dir.path().join("data")));

        let log = context.ensure_log_file("debug.log").unwrap();
        assert!(log.parent().unwrap().is_dir());
        assert!(!log.exists());
    }

    #[test]
    fn test_clones_share_config() {
        let context = ModuleContext::new(DashboardConfig::new());
        let other = context.clone();
        assert!(Arc::ptr_eq(&context.shared_config(), &other.shared_config()));
    }
}
