//! Test backends for exercising the store's degraded paths.

use crate::store::{MemoryBackend, SettingsBackend};
use anyhow::{anyhow, Result};

/// Backend whose next `failures` operations fail before it starts behaving
/// like a [`MemoryBackend`].
#[derive(Debug, Default)]
pub struct FlakyBackend {
    inner: MemoryBackend,
    failures: u32,
}

impl FlakyBackend {
    pub fn failing(failures: u32) -> Self {
        Self {
            inner: MemoryBackend::default(),
            failures,
        }
    }
}

impl SettingsBackend for FlakyBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        if self.failures > 0 {
            return Err(anyhow!("injected read failure"));
        }
        self.inner.read(key).await
    }

    async fn write(&mut self, key: &str, document: String) -> Result<()> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(anyhow!("injected write failure"));
        }
        self.inner.write(key, document).await
    }
}

/// Backend that never completes any call; used to exercise timeouts.
#[derive(Debug, Default)]
pub struct StalledBackend;

impl SettingsBackend for StalledBackend {
    async fn read(&self, _key: &str) -> Result<Option<String>> {
        std::future::pending().await
    }

    async fn write(&mut self, _key: &str, _document: String) -> Result<()> {
        std::future::pending().await
    }
}
