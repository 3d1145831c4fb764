//! Settings store and its persistence collaborator.

use tracing::{debug, warn};

use crate::core::CompressionSettings;
use crate::utils::{CompressorError, CompressorResult};

/// Durable storage consumed by the [`SettingsStore`].
///
/// The store only sees opaque bytes; where they live (disk, platform
/// preference store) is the collaborator's business.
pub trait SettingsPersistence: Send + Sync {
    /// Returns the persisted bytes, or `None` if nothing was saved yet.
    fn read(&self) -> anyhow::Result<Option<Vec<u8>>>;

    /// Durably replaces the persisted bytes.
    fn write(&self, bytes: &[u8]) -> anyhow::Result<()>;
}

/// Holds the active compression settings across the process lifetime.
///
/// `load` never fails the caller: a missing or corrupt store yields the
/// defaults. `save` validates before touching storage.
pub struct SettingsStore<P: SettingsPersistence> {
    persistence: P,
}

impl<P: SettingsPersistence> SettingsStore<P> {
    pub fn new(persistence: P) -> Self {
        Self { persistence }
    }

    pub fn load(&self) -> CompressionSettings {
        let bytes = match self.persistence.read() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No persisted settings, using defaults");
                return CompressionSettings::default();
            }
            Err(e) => {
                warn!("Failed to read settings store, using defaults: {}", e);
                return CompressionSettings::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Corrupt settings store, using defaults: {}", e);
                CompressionSettings::default()
            }
        }
    }

    /// Validates and persists the settings wholesale.
    ///
    /// The method field is already constrained to the four wire tokens
    /// by its type; garbage tokens can only arrive through the wire,
    /// where `load` catches them.
    pub fn save(&self, settings: &CompressionSettings) -> CompressorResult<()> {
        settings.validate()?;

        let json = serde_json::to_vec_pretty(settings)
            .map_err(|e| CompressorError::Io(e.to_string()))?;
        self.persistence
            .write(&json)
            .map_err(|e| CompressorError::Io(e.to_string()))?;

        debug!(
            "Settings saved: quality {}, method {}",
            settings.quality,
            settings.method.as_str()
        );
        Ok(())
    }
}
