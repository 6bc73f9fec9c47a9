//! Settings persistence.
//!
//! [`SettingsStore`] sits between the games/admin console and a pluggable
//! key→JSON-document backend. Reads never fail: a missing document, a backend
//! failure, or a malformed document all fall back to the documented defaults
//! (with a warning for the latter two). Writes validate first and replace the
//! whole document atomically.
//!
//! All mutation flows through a single writer lock, including the
//! read-modify-write in [`SettingsStore::set_for`], so two admins editing
//! different games concurrently can no longer lose one update.

use anyhow::Result;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use syncnet_types::{
    CrashSettings, DiceSettings, Game, GameSection, GameSettings, MinesSettings, SettingsError,
};
use thiserror::Error as ThisError;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::warn;

/// Document key under which the platform stores game settings.
pub const SETTINGS_KEY: &str = "gameSettings";

/// Failure to persist a settings write.
///
/// Reads never produce this: absent or unreadable documents fall back to
/// defaults. `Backend` is kept distinct from "not found", which is simply the
/// default-value path.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("settings backend error: {0}")]
    Backend(#[source] anyhow::Error),
    #[error("settings backend timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid settings: {0}")]
    Invalid(#[from] SettingsError),
    #[error("settings document could not be encoded: {0}")]
    Document(#[from] serde_json::Error),
}

/// Default deadline for one persistence call.
pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Key→JSON-document backend.
///
/// "Not found" is `Ok(None)`, never an error; errors mean the backend itself
/// failed.
pub trait SettingsBackend {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>>>;
    fn write(&mut self, key: &str, document: String) -> impl Future<Output = Result<()>>;
}

/// In-process backend. The stand-in used when no real persistence tier is
/// wired up, and the default for tests and the simulator.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: HashMap<String, String>,
}

impl SettingsBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.documents.get(key).cloned())
    }

    async fn write(&mut self, key: &str, document: String) -> Result<()> {
        self.documents.insert(key.to_string(), document);
        Ok(())
    }
}

/// Settings service over an injected backend.
///
/// One global configuration, replaced whole on admin update; last writer
/// wins at whole-document granularity.
pub struct SettingsStore<B: SettingsBackend> {
    backend: Mutex<B>,
    persist_timeout: Duration,
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_timeout(backend, DEFAULT_PERSIST_TIMEOUT)
    }

    pub fn with_timeout(backend: B, persist_timeout: Duration) -> Self {
        Self {
            backend: Mutex::new(backend),
            persist_timeout,
        }
    }

    /// Last saved settings, or the documented defaults. Never fails; degraded
    /// reads are logged and fall back.
    pub async fn get(&self) -> GameSettings {
        let mut backend = self.backend.lock().await;
        self.read_current(&mut backend).await
    }

    /// Validate and replace the whole settings document. Returns the saved
    /// value for confirmation.
    pub async fn set(&self, settings: GameSettings) -> Result<GameSettings, StoreError> {
        settings.validate()?;
        let mut backend = self.backend.lock().await;
        self.persist(&mut backend, &settings).await?;
        Ok(settings)
    }

    /// One game's sub-config.
    pub async fn get_for(&self, game: Game) -> GameSection {
        self.get().await.section(game)
    }

    pub async fn get_mines(&self) -> MinesSettings {
        self.get().await.mines
    }

    pub async fn get_dice(&self) -> DiceSettings {
        self.get().await.dice
    }

    pub async fn get_crash(&self) -> CrashSettings {
        self.get().await.crash
    }

    /// Replace one game's sub-config, leaving the others untouched. The
    /// read-modify-write runs inside the writer lock, so concurrent `set_for`
    /// calls on different games cannot lose updates.
    pub async fn set_for(&self, section: GameSection) -> Result<GameSection, StoreError> {
        section.validate()?;
        let mut backend = self.backend.lock().await;
        let mut settings = self.read_current(&mut backend).await;
        settings.replace_section(section);
        self.persist(&mut backend, &settings).await?;
        Ok(section)
    }

    async fn read_current(&self, backend: &mut B) -> GameSettings {
        match timeout(self.persist_timeout, backend.read(SETTINGS_KEY)).await {
            Err(_) => {
                warn!(
                    timeout = ?self.persist_timeout,
                    "settings read timed out; using defaults"
                );
                GameSettings::default()
            }
            Ok(Err(err)) => {
                warn!(error = %err, "settings backend unavailable; using defaults");
                GameSettings::default()
            }
            Ok(Ok(None)) => GameSettings::default(),
            Ok(Ok(Some(document))) => match serde_json::from_str(&document) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(error = %err, "stored settings document is malformed; using defaults");
                    GameSettings::default()
                }
            },
        }
    }

    async fn persist(&self, backend: &mut B, settings: &GameSettings) -> Result<(), StoreError> {
        let document = serde_json::to_string(settings)?;
        match self.try_write(backend, document.clone()).await {
            Ok(()) => Ok(()),
            Err(first) => {
                warn!(error = %first, "settings write failed; retrying once");
                self.try_write(backend, document).await
            }
        }
    }

    async fn try_write(&self, backend: &mut B, document: String) -> Result<(), StoreError> {
        match timeout(self.persist_timeout, backend.write(SETTINGS_KEY, document)).await {
            Err(_) => Err(StoreError::Timeout(self.persist_timeout)),
            Ok(Err(err)) => Err(StoreError::Backend(err)),
            Ok(Ok(())) => Ok(()),
        }
    }
}
