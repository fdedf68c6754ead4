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

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::drivers::Driver;
use crate::error::ArbiterResult;

/// A driver bound to a root path, exposing root-relative operations.
///
/// The root is normalized to end with `/`. The driver is shared with the
/// owning [`Arbiter`](crate::Arbiter); an endpoint never outlives the
/// registry's drivers because it holds its own reference.
#[derive(Clone)]
pub struct Endpoint {
    driver: Arc<dyn Driver>,
    root: String,
}

impl Endpoint {
    pub(crate) fn new(driver: Arc<dyn Driver>, root: &str) -> Self {
        let mut root = root.to_string();
        if !root.is_empty() && !root.ends_with('/') {
            root.push('/');
        }
        Self { driver, root }
    }

    pub fn scheme(&self) -> &str {
        self.driver.scheme()
    }

    pub fn is_remote(&self) -> bool {
        self.driver.is_remote()
    }

    pub fn is_local(&self) -> bool {
        !self.is_remote()
    }

    /// The scheme-relative root, with its trailing `/`.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The root as a caller would write it: scheme-prefixed for remote
    /// drivers, bare for local ones.
    pub fn prefixed_root(&self) -> String {
        self.driver.prefixed(&self.root)
    }

    /// Join a root-relative subpath.
    pub fn full_path(&self, subpath: &str) -> String {
        format!("{}{}", self.root, subpath)
    }

    /// Join and re-qualify a root-relative subpath.
    pub fn prefixed_full_path(&self, subpath: &str) -> String {
        self.driver.prefixed(&self.full_path(subpath))
    }

    pub fn get(&self, subpath: &str) -> ArbiterResult<String> {
        Ok(String::from_utf8(self.get_binary(subpath)?)?)
    }

    pub fn get_binary(&self, subpath: &str) -> ArbiterResult<Vec<u8>> {
        self.driver.get(&self.full_path(subpath))
    }

    pub fn try_get_binary(&self, subpath: &str) -> ArbiterResult<Option<Vec<u8>>> {
        self.driver.try_get(&self.full_path(subpath))
    }

    pub fn try_get_size(&self, subpath: &str) -> ArbiterResult<Option<u64>> {
        self.driver.try_get_size(&self.full_path(subpath))
    }

    pub fn put(&self, subpath: &str, data: &[u8]) -> ArbiterResult<()> {
        self.driver.put(&self.full_path(subpath), data)
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Endpoint({})", self.prefixed_root())
    }
}

/// A guaranteed-local filesystem path for a possibly-remote source.
///
/// When the source was remote, the handle owns the temporary file it was
/// materialized into and deletes it on drop. For an already-local source
/// it merely wraps the path; nothing is created and nothing is deleted.
pub struct LocalHandle {
    path: PathBuf,
    erase: bool,
}

impl LocalHandle {
    pub(crate) fn new(path: impl Into<PathBuf>, erase: bool) -> Self {
        Self {
            path: path.into(),
            erase,
        }
    }

    pub fn local_path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LocalHandle {
    fn drop(&mut self) {
        if self.erase {
            if let Err(error) = std::fs::remove_file(&self.path) {
                warn!(
                    "failed to remove temporary file {}: {}",
                    self.path.display(),
                    error
                );
            }
        }
    }
}

impl std::fmt::Debug for LocalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalHandle")
            .field("path", &self.path)
            .field("erase", &self.erase)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{FsDriver, TestDriver};

    #[test]
    fn test_root_gains_trailing_slash() {
        let endpoint = Endpoint::new(Arc::new(TestDriver::new()), "dir/sub");
        assert_eq!(endpoint.root(), "dir/sub/");

        let endpoint = Endpoint::new(Arc::new(TestDriver::new()), "dir/sub/");
        assert_eq!(endpoint.root(), "dir/sub/");
    }

    #[test]
    fn test_prefixed_root_remote_vs_local() {
        let remote = Endpoint::new(Arc::new(TestDriver::new()), "dir");
        assert_eq!(remote.prefixed_root(), "test://dir/");

        let local = Endpoint::new(Arc::new(FsDriver::new()), "/data");
        assert_eq!(local.prefixed_root(), "/data/");
        assert!(local.is_local());
    }

    #[test]
    fn test_full_path_join() {
        let endpoint = Endpoint::new(Arc::new(TestDriver::new()), "root");
        assert_eq!(endpoint.full_path("a/b"), "root/a/b");
        assert_eq!(endpoint.prefixed_full_path("a/b"), "test://root/a/b");
    }

    #[test]
    fn test_root_relative_operations() {
        let endpoint = Endpoint::new(Arc::new(TestDriver::new()), "root");
        endpoint.put("file.txt", b"value").unwrap();

        assert_eq!(endpoint.get("file.txt").unwrap(), "value");
        assert_eq!(endpoint.try_get_size("file.txt").unwrap(), Some(5));
        assert_eq!(endpoint.try_get_binary("nope").unwrap(), None);
    }

    #[test]
    fn test_owning_handle_removes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scratch.bin");
        std::fs::write(&file, b"temp").unwrap();

        let handle = LocalHandle::new(&file, true);
        assert_eq!(handle.local_path(), file.as_path());
        drop(handle);

        assert!(!file.exists());
    }

    #[test]
    fn test_non_owning_handle_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("keep.bin");
        std::fs::write(&file, b"keep").unwrap();

        let handle = LocalHandle::new(&file, false);
        drop(handle);

        assert!(file.exists());
    }
}
