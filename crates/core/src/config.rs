//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into
//! services; nothing in the core reads environment variables during request
//! handling. The binaries translate their environment into a [`CoreConfig`]
//! and hand it over.

use crate::error::{ClinicError, ClinicResult};
use crate::store::{FileStore, MemoryStore, RecordStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which record-store backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-lifetime maps; data is gone on shutdown.
    Memory,
    /// JSON documents under a data directory.
    File,
}

impl std::str::FromStr for StoreBackend {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            other => Err(ClinicError::InvalidConfig(format!(
                "unknown store backend: {other} (expected \"memory\" or \"file\")"
            ))),
        }
    }
}

/// Parse the store backend from an optional environment value.
///
/// `None` or an empty/whitespace value selects the in-memory backend.
pub fn store_backend_from_env_value(value: Option<String>) -> ClinicResult<StoreBackend> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<StoreBackend>()).transpose()?;

    Ok(parsed.unwrap_or(StoreBackend::Memory))
}

/// Core configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    store_backend: StoreBackend,
    data_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The file backend requires a data directory; the in-memory backend
    /// ignores one if given.
    pub fn new(store_backend: StoreBackend, data_dir: Option<PathBuf>) -> ClinicResult<Self> {
        if store_backend == StoreBackend::File && data_dir.is_none() {
            return Err(ClinicError::InvalidConfig(
                "file store backend requires a data directory".into(),
            ));
        }

        Ok(Self {
            store_backend,
            data_dir,
        })
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Constructs the configured record store.
    pub fn build_store(&self) -> ClinicResult<Arc<dyn RecordStore>> {
        match self.store_backend {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::File => {
                let dir = self.data_dir.as_ref().ok_or_else(|| {
                    ClinicError::InvalidConfig(
                        "file store backend requires a data directory".into(),
                    )
                })?;
                Ok(Arc::new(FileStore::open(dir)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_defaults_to_memory() {
        assert_eq!(
            store_backend_from_env_value(None).unwrap(),
            StoreBackend::Memory
        );
        assert_eq!(
            store_backend_from_env_value(Some("  ".into())).unwrap(),
            StoreBackend::Memory
        );
    }

    #[test]
    fn env_value_parses_both_backends() {
        assert_eq!(
            store_backend_from_env_value(Some("memory".into())).unwrap(),
            StoreBackend::Memory
        );
        assert_eq!(
            store_backend_from_env_value(Some("file".into())).unwrap(),
            StoreBackend::File
        );
    }

    #[test]
    fn env_value_rejects_unknown_backend() {
        let err = store_backend_from_env_value(Some("postgres".into())).unwrap_err();
        assert!(matches!(err, ClinicError::InvalidConfig(_)));
    }

    #[test]
    fn file_backend_requires_data_dir() {
        let err = CoreConfig::new(StoreBackend::File, None).unwrap_err();
        assert!(matches!(err, ClinicError::InvalidConfig(_)));

        let cfg = CoreConfig::new(StoreBackend::File, Some("/tmp/records".into())).unwrap();
        assert_eq!(cfg.data_dir(), Some(Path::new("/tmp/records")));
    }

    #[test]
    fn memory_backend_builds_without_data_dir() {
        let cfg = CoreConfig::new(StoreBackend::Memory, None).unwrap();
        assert!(cfg.build_store().is_ok());
    }
}
