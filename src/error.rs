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

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum ArbiterError {
    /// Invalid construction-time input: empty driver scheme, remote temp
    /// endpoint, empty copy source/destination, directory self-copy.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No driver is registered for the path's scheme.
    #[error("No driver for {0}")]
    NoDriver(String),

    /// The requested object is absent. `try_*` APIs convert this variant
    /// (and only this variant) into `None`.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed remote response, e.g. a listing without the expected XML
    /// nodes. Never retried.
    #[error("Unexpected response: {0}")]
    Protocol(String),

    /// Final HTTP status outside 2xx after retry exhaustion.
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// An HTTP-only operation was invoked on a driver without the HTTP
    /// capability.
    #[error("Cannot get driver for {0} as HTTP")]
    NotHttp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for storage operations
pub type ArbiterResult<T> = Result<T, ArbiterError>;
