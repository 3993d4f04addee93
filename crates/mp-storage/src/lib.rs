use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Durable string key-value store the cart state is mirrored to.
///
/// Implementations are driven from a single thread (browser callbacks), so
/// the trait carries no `Send`/`Sync` bound.
pub trait StatePort {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage quota exceeded while writing {key} ({needed} bytes, {limit} allowed)")]
    QuotaExceeded { key: String, needed: usize, limit: usize },
    #[error("write to {key} rejected: {reason}")]
    WriteRejected { key: String, reason: String },
}

impl<P: StatePort + ?Sized> StatePort for &P {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

impl<P: StatePort + ?Sized> StatePort for Rc<P> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

impl<P: StatePort + ?Sized> StatePort for Box<P> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

#[derive(Debug, Default)]
pub struct NoopStatePort;

impl StatePort for NoopStatePort {
    fn load(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStatePort {
    values: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemoryStatePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any write that would push the total stored bytes past `limit`,
    /// the way a browser rejects writes past its storage quota.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            values: RefCell::default(),
            quota_bytes: Some(limit),
        }
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.values
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl StatePort for InMemoryStatePort {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    limit,
                }
                .into());
            }
        }

        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Load and decode a JSON value. `Ok(None)` when the key is absent or holds
/// JSON `null`; an error when the stored text does not decode as `T`.
pub fn load_json<T, P>(port: &P, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    P: StatePort + ?Sized,
{
    let Some(raw) = port.load(key)? else {
        return Ok(None);
    };

    let value = serde_json::from_str::<Option<T>>(&raw)
        .with_context(|| format!("malformed JSON stored under {key}"))?;
    Ok(value)
}

pub fn save_json<T, P>(port: &P, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: StatePort + ?Sized,
{
    let raw = serde_json::to_string(value).with_context(|| format!("failed to encode {key}"))?;
    port.save(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), "state persisted");
    Ok(())
}
