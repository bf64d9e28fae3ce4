//! Key/value string storage
//!
//! LocalStorage in the browser, one file per key on native. Score stores
//! sit on top of this so they never touch the platform directly.

use std::collections::HashMap;

use crate::error::StoreError;

/// Minimal string storage used by the local score store
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile storage, used by tests and as a fallback when nothing else is available
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::KeyValueStorage;
    use crate::error::StoreError;

    /// Each key is a file inside `dir`; writes go through a temp file and rename
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        dir: PathBuf,
    }

    impl FileStorage {
        pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
            let dir = dir.into();
            fs::create_dir_all(&dir)?;
            Ok(Self { dir })
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.dir.join(key)
        }
    }

    impl KeyValueStorage for FileStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(s) => Ok(Some(s)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let path = self.path_for(key);
            let tmp = self.path_for(&format!("{key}.tmp"));
            fs::write(&tmp, value)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            match fs::remove_file(self.path_for(key)) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::KeyValueStorage;
    use crate::error::StoreError;

    /// Browser LocalStorage
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> Result<web_sys::Storage, StoreError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| StoreError::Backend("LocalStorage unavailable".into()))
        }
    }

    fn js_err(e: wasm_bindgen::JsValue) -> StoreError {
        StoreError::Backend(format!("{e:?}"))
    }

    impl KeyValueStorage for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Self::storage()?.get_item(key).map_err(js_err)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            Self::storage()?.set_item(key, value).map_err(js_err)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            Self::storage()?.remove_item(key).map_err(js_err)
        }
    }
}
