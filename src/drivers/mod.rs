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

//! Storage backend drivers
//!
//! Each driver binds one path scheme (`file`, `test`, `http`, `https`,
//! `s3`, ...) to a backend and exposes the same primitive operations, so
//! the [`Arbiter`](crate::Arbiter) can dispatch on the scheme alone.
//! Drivers with an HTTP surface additionally expose the [`HttpDerived`]
//! capability for header/query-carrying requests.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::error::{ArbiterError, ArbiterResult};
use crate::http::{Headers, Query};

pub mod fs;
pub mod http;
pub mod s3;

pub use fs::FsDriver;
pub use http::HttpDriver;
pub use s3::S3Driver;
pub use test::TestDriver;

/// Generic interface for storage backends
///
/// This trait provides a unified interface for interacting with different
/// storage backends (local filesystem, in-memory store, HTTP, S3).
/// Paths handed to a driver have already had their scheme prefix
/// stripped.
pub trait Driver: Send + Sync {
    /// The scheme this driver is registered under (e.g. `"s3"`).
    fn scheme(&self) -> &str;

    /// Whether objects live outside the local filesystem. Remote drivers
    /// prefix resolved paths with their scheme and require
    /// materialization for local handles.
    fn is_remote(&self) -> bool {
        true
    }

    /// Read the contents of an object.
    ///
    /// # Arguments
    ///
    /// * `path` - The scheme-relative path of the object
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<u8>)` - The object contents as bytes
    /// * `Err(ArbiterError)` - If the object cannot be read
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The object does not exist (`ArbiterError::NotFound`)
    /// * The backend reports a non-recoverable failure
    fn get(&self, path: &str) -> ArbiterResult<Vec<u8>>;

    /// Write an object, replacing any previous contents.
    fn put(&self, path: &str, data: &[u8]) -> ArbiterResult<()>;

    /// Read an object, mapping "absent" to `None`.
    ///
    /// Only [`ArbiterError::NotFound`] converts to `None`; transport and
    /// protocol failures still propagate.
    fn try_get(&self, path: &str) -> ArbiterResult<Option<Vec<u8>>> {
        match self.get(path) {
            Ok(data) => Ok(Some(data)),
            Err(ArbiterError::NotFound(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Size of an object in bytes, or `None` when absent.
    fn try_get_size(&self, path: &str) -> ArbiterResult<Option<u64>> {
        Ok(self.try_get(path)?.map(|data| data.len() as u64))
    }

    /// Same-scheme copy. Backends with a native copy override this;
    /// the fallback reads then writes.
    fn copy(&self, src: &str, dst: &str) -> ArbiterResult<()> {
        let data = self.get(src)?;
        self.put(dst, &data)
    }

    /// Expand a one-level glob pattern of the form `dir/*`.
    ///
    /// # Arguments
    ///
    /// * `pattern` - Pattern ending in `/*`, scheme-relative
    /// * `recursive` - Also include entries below matched subdirectories
    /// * `verbose` - Emit listing progress
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<String>)` - Fully qualified matches, without duplicates
    /// * `Err(ArbiterError)` - If the pattern is malformed or listing fails
    fn glob(&self, pattern: &str, recursive: bool, verbose: bool) -> ArbiterResult<Vec<String>> {
        let _ = (pattern, recursive, verbose);
        Err(ArbiterError::Config(format!(
            "Cannot glob {} driver",
            self.scheme()
        )))
    }

    /// Resolve a path to the concrete paths it denotes.
    ///
    /// Non-glob paths resolve to themselves (scheme-prefixed for remote
    /// drivers). `dir/*` expands one level; `dir/**` requests recursive
    /// descent from [`Driver::glob`].
    fn resolve(&self, path: &str, verbose: bool) -> ArbiterResult<Vec<String>> {
        if path.ends_with('*') {
            let recursive = path.ends_with("**");
            let pattern = format!("{}*", path.trim_end_matches('*'));
            self.glob(&pattern, recursive, verbose)
        } else {
            Ok(vec![self.prefixed(path)])
        }
    }

    /// Re-qualify a scheme-relative path: remote drivers prepend
    /// `{scheme}://`, local drivers return it unchanged.
    fn prefixed(&self, path: &str) -> String {
        if self.is_remote() {
            format!("{}://{}", self.scheme(), path)
        } else {
            path.to_string()
        }
    }

    /// The driver's HTTP capability, when it has one. Declared here so
    /// capability checks never need runtime type inspection.
    fn as_http(&self) -> Option<&dyn HttpDerived> {
        None
    }
}

/// Extra surface for drivers that speak plain HTTP: the same primitives
/// with caller-supplied headers and query parameters.
pub trait HttpDerived {
    fn get_with(&self, path: &str, headers: &Headers, query: &Query) -> ArbiterResult<Vec<u8>>;

    fn put_with(
        &self,
        path: &str,
        data: &[u8],
        headers: &Headers,
        query: &Query,
    ) -> ArbiterResult<()>;

    fn try_get_with(
        &self,
        path: &str,
        headers: &Headers,
        query: &Query,
    ) -> ArbiterResult<Option<Vec<u8>>> {
        match self.get_with(path, headers, query) {
            Ok(data) => Ok(Some(data)),
            Err(ArbiterError::NotFound(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

impl Debug for dyn Driver {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Driver(scheme={})", self.scheme())
    }
}
