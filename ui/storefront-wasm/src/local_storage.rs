//! `window.localStorage` as a [`StatePort`].

use anyhow::Result;
use mp_storage::{StatePort, StorageError};

pub struct LocalStoragePort {
    storage: web_sys::Storage,
}

impl LocalStoragePort {
    /// Fails when the page has no `localStorage` (disabled cookies, some
    /// private browsing modes).
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        let storage = window
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))?;
        Ok(Self { storage })
    }
}

impl StatePort for LocalStoragePort {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .storage
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::WriteRejected {
                key: key.to_owned(),
                reason: format!("{err:?}"),
            })?;
        Ok(())
    }
}
