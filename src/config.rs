// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ArbiterError, ArbiterResult};
use crate::util::path;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_FILE_ENV: &str = "ARBITER_CONFIG_FILE";

/// Fallback environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "ARBITER_CONFIG_PATH";

const DEFAULT_CONFIG_PATH: &str = "~/.arbiter/config.json";

/// JSON configuration for the storage layer.
///
/// The effective configuration is an explicit override document merged
/// over a config file located by `ARBITER_CONFIG_FILE`, then
/// `ARBITER_CONFIG_PATH`, then `~/.arbiter/config.json`. Override entries
/// win key-by-key; nested objects are merged recursively.
///
/// Sections are keyed per driver (e.g. `s3`) plus an `http` section for
/// transport options:
///
/// ```json
/// {
///     "s3": { "access": "ACCESS_KEY", "hidden": "SECRET_KEY" },
///     "http": { "timeout": 600, "pool_max_idle_per_host": 8 }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArbiterConfig {
    root: Value,
}

impl ArbiterConfig {
    /// Load the configuration, merging an optional JSON override document
    /// over the located config file.
    ///
    /// # Arguments
    ///
    /// * `overrides` - Optional JSON object taking precedence over the file
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The override document is not valid JSON, or not an object
    /// * The located config file exists but is not valid JSON
    pub fn load(overrides: Option<&str>) -> ArbiterResult<Self> {
        let mut merged: Value = match overrides {
            Some(s) if !s.trim().is_empty() => serde_json::from_str(s)?,
            _ => Value::Object(Map::new()),
        };

        if !merged.is_object() {
            return Err(ArbiterError::Config(
                "Configuration override must be a JSON object".to_string(),
            ));
        }

        let file_path = std::env::var(CONFIG_FILE_ENV)
            .or_else(|_| std::env::var(CONFIG_PATH_ENV))
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        // The config file is optional; a present-but-malformed one is not.
        if let Ok(text) = std::fs::read_to_string(path::expand_tilde(&file_path)) {
            let file: Value = serde_json::from_str(&text)?;
            merge_missing(&mut merged, &file);
        }

        Ok(Self { root: merged })
    }

    /// Build a configuration directly from a JSON value, bypassing the
    /// environment lookup.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Get a per-driver configuration section.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    /// HTTP transport options from the `http` section, with defaults for
    /// anything unspecified.
    pub fn http_options(&self) -> HttpOptions {
        self.section("http")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }
}

/// Connection-pool and timeout settings for the shared HTTP transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    /// Request timeout in seconds (0 leaves the client default).
    pub timeout: u64,
    /// Connect timeout in seconds (0 leaves the client default).
    pub connect_timeout: u64,
    /// Idle connection timeout in seconds.
    pub pool_idle_timeout: u64,
    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: 1200,
            connect_timeout: 30,
            pool_idle_timeout: 15,
            pool_max_idle_per_host: 5,
        }
    }
}

/// Recursively copy entries of `defaults` that are absent from `base`.
/// Existing scalar entries in `base` always win.
fn merge_missing(base: &mut Value, defaults: &Value) {
    let (Value::Object(base_map), Value::Object(default_map)) = (base, defaults) else {
        return;
    };

    for (key, value) in default_map {
        match base_map.get_mut(key) {
            Some(existing) => merge_missing(existing, value),
            None => {
                base_map.insert(key.clone(), value.clone());
            }
        }
    }
}
