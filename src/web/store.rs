/// `chrome.storage.local` persistence

use super::bridge::{self, getStorage, setStorage};
use crate::account::BlockedAccount;
use crate::i18n::{LANGUAGE_KEY, Language};
use crate::messages::{self, Preferences};
use crate::registry::{BlockStore, StoreError};
use crate::storage::BLOCKED_USERS_KEY;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub async fn load<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StoreError> {
    let value = getStorage(key)
        .await
        .map_err(|e| StoreError::Bridge(format!("{:?}", e)))?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Stored value, or its default when absent or unreadable
pub async fn load_or_default<T: DeserializeOwned + Default>(key: &str) -> T {
    match load(key).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            log::warn!("falling back to defaults for {}: {}", key, e);
            T::default()
        }
    }
}

pub async fn save<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(), StoreError> {
    let js = bridge::to_js(value).map_err(|e| StoreError::Encode(e.to_string()))?;
    setStorage(key, js)
        .await
        .map_err(|e| StoreError::Bridge(format!("{:?}", e)))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeStore;

#[async_trait(?Send)]
impl BlockStore for ChromeStore {
    async fn get_list(&self) -> Result<Vec<BlockedAccount>, StoreError> {
        Ok(load(BLOCKED_USERS_KEY).await?.unwrap_or_default())
    }

    async fn set_list(&self, accounts: &[BlockedAccount]) -> Result<(), StoreError> {
        save(BLOCKED_USERS_KEY, accounts).await
    }
}

#[async_trait(?Send)]
impl Preferences for ChromeStore {
    async fn language(&self) -> Result<Option<Language>, StoreError> {
        load(LANGUAGE_KEY).await
    }

    async fn set_language(&self, language: Language) -> Result<(), StoreError> {
        save(LANGUAGE_KEY, &language).await
    }

    fn ui_language(&self) -> String {
        bridge::getUiLanguage()
    }
}

pub async fn language() -> Language {
    messages::current_language(&ChromeStore).await
}
