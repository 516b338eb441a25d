//! Persisted user toggles, read from a small JSON file using the same keys
//! the panel stored: `{"camelCase": true, "namespace": true}`.
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub camel_case: bool,
    pub namespace: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { camel_case: true, namespace: true }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        from_str_with_path(&src).map_err(|message| Error::Settings {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Command line overrides win over the file.
    pub fn with_overrides(mut self, camel_case: Option<bool>, namespace: Option<bool>) -> Self {
        if let Some(x) = camel_case { self.camel_case = x; }
        if let Some(x) = namespace { self.namespace = x; }
        self
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        format!("at JSON path {path} → {}", err.into_inner())
    })
}
