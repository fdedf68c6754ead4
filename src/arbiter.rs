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

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::config::ArbiterConfig;
use crate::drivers::{Driver, FsDriver, HttpDerived, HttpDriver, S3Driver, TestDriver};
use crate::endpoint::{Endpoint, LocalHandle};
use crate::error::{ArbiterError, ArbiterResult};
use crate::http::{Headers, HttpPool, Query};
use crate::util::path;

/// Top-level facade: owns the scheme-to-driver registry and dispatches
/// every operation to the driver named by the path's scheme prefix.
///
/// The registry is built once at construction and treated as read-only by
/// concurrent callers; registering additional drivers afterwards requires
/// exclusive access.
pub struct Arbiter {
    drivers: HashMap<String, Arc<dyn Driver>>,
    pool: HttpPool,
}

impl Arbiter {
    /// Build an arbiter from the environment-located configuration alone.
    pub fn new() -> ArbiterResult<Self> {
        Self::with_config(None)
    }

    /// Build an arbiter from an explicit JSON override merged over the
    /// environment-located configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The configuration cannot be loaded or parsed
    /// * The HTTP client cannot be constructed
    pub fn with_config(overrides: Option<&str>) -> ArbiterResult<Self> {
        let config = ArbiterConfig::load(overrides)?;
        let pool = HttpPool::new(&config.http_options())?;
        Self::with_parts(&config, pool)
    }

    /// Build an arbiter from an already-loaded configuration and an
    /// externally constructed pool. The standard drivers (`file`, `test`,
    /// `http`, `https`, and any configured S3 profiles) are registered.
    pub fn with_parts(config: &ArbiterConfig, pool: HttpPool) -> ArbiterResult<Self> {
        let mut arbiter = Self {
            drivers: HashMap::new(),
            pool: pool.clone(),
        };

        arbiter.add_driver(Arc::new(FsDriver::new()))?;
        arbiter.add_driver(Arc::new(TestDriver::new()))?;
        arbiter.add_driver(Arc::new(HttpDriver::new("http", pool.clone())))?;
        arbiter.add_driver(Arc::new(HttpDriver::new("https", pool.clone())))?;

        for driver in S3Driver::from_config(config.section("s3"), &pool) {
            arbiter.add_driver(Arc::new(driver))?;
        }

        Ok(arbiter)
    }

    /// Register a driver under its scheme, replacing any previous
    /// registration.
    ///
    /// # Errors
    ///
    /// Returns `ArbiterError::Config` when the driver reports an empty
    /// scheme.
    pub fn add_driver(&mut self, driver: Arc<dyn Driver>) -> ArbiterResult<()> {
        let scheme = driver.scheme().to_string();
        if scheme.is_empty() {
            return Err(ArbiterError::Config(
                "Cannot add driver with empty scheme".to_string(),
            ));
        }
        self.drivers.insert(scheme, driver);
        Ok(())
    }

    /// Whether a driver is registered for the path's scheme.
    pub fn has_driver(&self, path: &str) -> bool {
        self.drivers.contains_key(path::scheme_of(path))
    }

    /// The shared HTTP pool, for wiring up additional drivers.
    pub fn http_pool(&self) -> &HttpPool {
        &self.pool
    }

    fn driver(&self, path: &str) -> ArbiterResult<&Arc<dyn Driver>> {
        self.drivers
            .get(path::scheme_of(path))
            .ok_or_else(|| ArbiterError::NoDriver(path.to_string()))
    }

    fn http_driver(&self, path: &str) -> ArbiterResult<&dyn HttpDerived> {
        self.driver(path)?
            .as_http()
            .ok_or_else(|| ArbiterError::NotHttp(path.to_string()))
    }

    /// Read an object as UTF-8 text.
    pub fn get(&self, path: &str) -> ArbiterResult<String> {
        Ok(String::from_utf8(self.get_binary(path)?)?)
    }

    /// Read an object's raw bytes.
    pub fn get_binary(&self, path: &str) -> ArbiterResult<Vec<u8>> {
        self.driver(path)?.get(path::strip_scheme(path))
    }

    /// Read an object as UTF-8 text, mapping "absent" to `None`.
    pub fn try_get(&self, path: &str) -> ArbiterResult<Option<String>> {
        match self.try_get_binary(path)? {
            Some(data) => Ok(Some(String::from_utf8(data)?)),
            None => Ok(None),
        }
    }

    /// Read an object's raw bytes, mapping "absent" to `None`.
    pub fn try_get_binary(&self, path: &str) -> ArbiterResult<Option<Vec<u8>>> {
        self.driver(path)?.try_get(path::strip_scheme(path))
    }

    /// Write an object.
    pub fn put(&self, path: &str, data: &[u8]) -> ArbiterResult<()> {
        self.driver(path)?.put(path::strip_scheme(path), data)
    }

    /// Size of an object in bytes; `NotFound` when absent.
    pub fn get_size(&self, path: &str) -> ArbiterResult<u64> {
        self.try_get_size(path)?
            .ok_or_else(|| ArbiterError::NotFound(path.to_string()))
    }

    /// Size of an object in bytes, or `None` when absent.
    pub fn try_get_size(&self, path: &str) -> ArbiterResult<Option<u64>> {
        self.driver(path)?.try_get_size(path::strip_scheme(path))
    }

    /// Whether the object exists.
    pub fn exists(&self, path: &str) -> ArbiterResult<bool> {
        Ok(self.try_get_size(path)?.is_some())
    }

    /// Whether the path's driver stores objects outside the local
    /// filesystem.
    pub fn is_remote(&self, path: &str) -> ArbiterResult<bool> {
        Ok(self.driver(path)?.is_remote())
    }

    pub fn is_local(&self, path: &str) -> ArbiterResult<bool> {
        Ok(!self.is_remote(path)?)
    }

    /// Whether the path's driver exposes the HTTP capability.
    pub fn is_http_derived(&self, path: &str) -> bool {
        self.driver(path)
            .map(|driver| driver.as_http().is_some())
            .unwrap_or(false)
    }

    /// HTTP GET with caller-supplied headers and query, as UTF-8 text.
    pub fn get_with(&self, path: &str, headers: &Headers, query: &Query) -> ArbiterResult<String> {
        Ok(String::from_utf8(self.get_binary_with(path, headers, query)?)?)
    }

    /// HTTP GET with caller-supplied headers and query.
    pub fn get_binary_with(
        &self,
        path: &str,
        headers: &Headers,
        query: &Query,
    ) -> ArbiterResult<Vec<u8>> {
        self.http_driver(path)?
            .get_with(path::strip_scheme(path), headers, query)
    }

    /// Non-throwing variant of [`Arbiter::get_with`].
    pub fn try_get_with(
        &self,
        path: &str,
        headers: &Headers,
        query: &Query,
    ) -> ArbiterResult<Option<String>> {
        match self.try_get_binary_with(path, headers, query)? {
            Some(data) => Ok(Some(String::from_utf8(data)?)),
            None => Ok(None),
        }
    }

    /// Non-throwing variant of [`Arbiter::get_binary_with`].
    pub fn try_get_binary_with(
        &self,
        path: &str,
        headers: &Headers,
        query: &Query,
    ) -> ArbiterResult<Option<Vec<u8>>> {
        self.http_driver(path)?
            .try_get_with(path::strip_scheme(path), headers, query)
    }

    /// HTTP PUT with caller-supplied headers and query.
    pub fn put_with(
        &self,
        path: &str,
        data: &[u8],
        headers: &Headers,
        query: &Query,
    ) -> ArbiterResult<()> {
        self.http_driver(path)?
            .put_with(path::strip_scheme(path), data, headers, query)
    }

    /// Resolve a path to the concrete paths it denotes; globs expand via
    /// the owning driver, `**` recursively.
    pub fn resolve(&self, path: &str, verbose: bool) -> ArbiterResult<Vec<String>> {
        self.driver(path)?
            .resolve(path::strip_scheme(path), verbose)
    }

    /// Bind the path's driver to a root, for root-relative operations.
    pub fn endpoint(&self, root: &str) -> ArbiterResult<Endpoint> {
        Ok(Endpoint::new(
            Arc::clone(self.driver(root)?),
            path::strip_scheme(root),
        ))
    }

    /// Copy `src` to `dst`, across drivers if need be.
    ///
    /// A `src` naming a directory (trailing `/`) or glob copies every
    /// resolved entry, mirroring the directory structure below the common
    /// root into `dst`. A single file lands in `dst` directly, or under
    /// its own basename when `dst` is a directory. Local destination
    /// parents are created as needed.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Either path is empty, or a directory is copied onto itself
    ///   (`ArbiterError::Config`)
    /// * Resolution, read, or write fails on the underlying drivers
    pub fn copy(&self, src: &str, dst: &str, verbose: bool) -> ArbiterResult<()> {
        if src.is_empty() {
            return Err(ArbiterError::Config(
                "Cannot copy from empty source".to_string(),
            ));
        }
        if dst.is_empty() {
            return Err(ArbiterError::Config(
                "Cannot copy to empty destination".to_string(),
            ));
        }

        // A directory source is globified up front; its trailing slash is
        // already in place.
        let src_to_resolve = if path::is_directory(src) {
            format!("{}**", src)
        } else {
            src.to_string()
        };

        if !src_to_resolve.ends_with('*') {
            return self.copy_file(src, dst, verbose);
        }

        // All resolved paths share the source root as a common prefix;
        // stripping it yields the subpath to mirror under the destination.
        let src_endpoint = self.endpoint(path::strip_postfixing(src))?;
        let common_prefix = src_endpoint.prefixed_root();

        let dst_endpoint = self.endpoint(dst)?;
        if common_prefix == dst_endpoint.prefixed_root() {
            return Err(ArbiterError::Config(
                "Cannot copy directory to itself".to_string(),
            ));
        }

        let paths = self.resolve(&src_to_resolve, verbose)?;

        for (index, resolved) in paths.iter().enumerate() {
            let subpath = resolved.strip_prefix(&common_prefix).unwrap_or(resolved);

            if verbose {
                info!(
                    "{} / {}: {} -> {}",
                    index + 1,
                    paths.len(),
                    resolved,
                    dst_endpoint.prefixed_full_path(subpath)
                );
            }

            if dst_endpoint.is_local() {
                mkdirp(path::non_basename(&dst_endpoint.full_path(subpath)))?;
            }

            dst_endpoint.put(subpath, &self.get_binary(resolved)?)?;
        }

        Ok(())
    }

    fn copy_file(&self, file: &str, dst: &str, verbose: bool) -> ArbiterResult<()> {
        let dst_endpoint = self.endpoint(dst)?;

        // A directory destination keeps the source file's basename.
        let dst = if path::is_directory(dst) {
            format!("{}{}", dst, path::basename(file))
        } else {
            dst.to_string()
        };

        if verbose {
            info!("{} -> {}", file, dst);
        }

        if dst_endpoint.is_local() {
            mkdirp(path::non_basename(path::strip_scheme(&dst)))?;
        }

        if path::scheme_of(file) == path::scheme_of(&dst) {
            // Same driver domain: defer to its (possibly specialized) copy.
            self.driver(file)?
                .copy(path::strip_scheme(file), path::strip_scheme(&dst))
        } else {
            self.put(&dst, &self.get_binary(file)?)
        }
    }

    /// A guaranteed-local path for `path`, materializing remote objects
    /// into the supplied temporary endpoint.
    ///
    /// Remote sources are fetched and written under a randomized basename
    /// that preserves the original extension; the returned handle owns
    /// that file and deletes it on drop. Local sources are wrapped
    /// directly, tilde-expanded, with no file created or deleted.
    ///
    /// # Errors
    ///
    /// Returns `ArbiterError::Config` when `path` is remote but the
    /// temporary endpoint is not local.
    pub fn local_handle(&self, path: &str, temp: &Endpoint) -> ArbiterResult<LocalHandle> {
        if self.is_remote(path)? {
            if temp.is_remote() {
                return Err(ArbiterError::Config(
                    "Temporary endpoint must be local".to_string(),
                ));
            }

            let extension = path::extension_of(path);
            let basename = if extension.is_empty() {
                format!("{}", rand::random::<u64>())
            } else {
                format!("{}.{}", rand::random::<u64>(), extension)
            };

            temp.put(&basename, &self.get_binary(path)?)?;
            Ok(LocalHandle::new(
                path::expand_tilde(&temp.full_path(&basename)),
                true,
            ))
        } else {
            Ok(LocalHandle::new(
                path::expand_tilde(path::strip_scheme(path)),
                false,
            ))
        }
    }

    /// [`Arbiter::local_handle`] with a path-string temporary root; empty
    /// means the system temp directory.
    pub fn local_handle_in(&self, path: &str, temp_root: &str) -> ArbiterResult<LocalHandle> {
        let root = if temp_root.is_empty() {
            path::temp_path()
        } else {
            temp_root.to_string()
        };
        let temp = self.endpoint(&root)?;
        self.local_handle(path, &temp)
    }
}

fn mkdirp(dir: &str) -> ArbiterResult<()> {
    if !dir.is_empty() {
        std::fs::create_dir_all(path::expand_tilde(dir))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use crate::http::HttpResponse;
    use serde_json::json;

    fn arbiter_with(responses: Vec<HttpResponse>) -> (Arbiter, Arc<MockTransport>) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
            .try_init();

        let (pool, transport) = MockTransport::pool(responses);
        let config = ArbiterConfig::from_value(json!({
            "s3": { "access": "AK", "hidden": "SK" }
        }));
        let arbiter = Arbiter::with_parts(&config, pool).unwrap();
        (arbiter, transport)
    }

    #[test]
    fn test_standard_drivers_registered() {
        let (arbiter, _) = arbiter_with(vec![]);

        for path in ["bare/path", "test://x", "http://host/x", "https://host/x", "s3://b/k"] {
            assert!(arbiter.has_driver(path), "missing driver for {}", path);
        }
        assert!(!arbiter.has_driver("dropbox://x"));
    }

    #[test]
    fn test_unknown_scheme_is_no_driver_error() {
        let (arbiter, _) = arbiter_with(vec![]);
        assert!(matches!(
            arbiter.get_binary("dropbox://file"),
            Err(ArbiterError::NoDriver(_))
        ));
    }

    #[test]
    fn test_round_trip_through_test_scheme() {
        let (arbiter, _) = arbiter_with(vec![]);

        arbiter.put("test://dir/file.txt", b"hello").unwrap();
        assert_eq!(arbiter.get("test://dir/file.txt").unwrap(), "hello");
        assert_eq!(
            arbiter.get_binary("test://dir/file.txt").unwrap(),
            b"hello".to_vec()
        );
        assert_eq!(arbiter.get_size("test://dir/file.txt").unwrap(), 5);
        assert!(arbiter.exists("test://dir/file.txt").unwrap());
    }

    #[test]
    fn test_try_get_absent_is_none() {
        let (arbiter, _) = arbiter_with(vec![]);

        assert_eq!(arbiter.try_get("test://missing").unwrap(), None);
        assert_eq!(arbiter.try_get_size("test://missing").unwrap(), None);
        assert!(!arbiter.exists("test://missing").unwrap());
        assert!(matches!(
            arbiter.get_size("test://missing"),
            Err(ArbiterError::NotFound(_))
        ));
    }

    #[test]
    fn test_remote_and_local_classification() {
        let (arbiter, _) = arbiter_with(vec![]);

        assert!(arbiter.is_local("some/file").unwrap());
        assert!(arbiter.is_remote("s3://b/k").unwrap());
        assert!(arbiter.is_remote("test://x").unwrap());
    }

    #[test]
    fn test_http_capability_gating() {
        let (arbiter, _) = arbiter_with(vec![]);

        assert!(arbiter.is_http_derived("http://host/x"));
        assert!(arbiter.is_http_derived("https://host/x"));
        assert!(!arbiter.is_http_derived("test://x"));
        assert!(!arbiter.is_http_derived("s3://b/k"));

        let result = arbiter.get_binary_with("test://x", &Headers::new(), &Query::new());
        assert!(matches!(result, Err(ArbiterError::NotHttp(_))));
    }

    #[test]
    fn test_get_with_reaches_http_driver() {
        let (arbiter, transport) =
            arbiter_with(vec![HttpResponse::new(200, b"payload".to_vec())]);

        let mut query = Query::new();
        query.insert("page".to_string(), "2".to_string());
        let body = arbiter
            .get_with("http://host/data", &Headers::new(), &query)
            .unwrap();

        assert_eq!(body, "payload");
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].url, "http://host/data");
        assert_eq!(requests[0].query.get("page").unwrap(), "2");
    }

    #[test]
    fn test_resolve_non_glob_and_glob() {
        let (arbiter, _) = arbiter_with(vec![]);
        arbiter.put("test://dir/a", b"1").unwrap();
        arbiter.put("test://dir/b", b"2").unwrap();
        arbiter.put("test://dir/sub/c", b"3").unwrap();

        assert_eq!(
            arbiter.resolve("test://dir/a", false).unwrap(),
            vec!["test://dir/a".to_string()]
        );
        assert_eq!(
            arbiter.resolve("test://dir/*", false).unwrap(),
            vec!["test://dir/a", "test://dir/b"]
        );
        assert_eq!(
            arbiter.resolve("test://dir/**", false).unwrap(),
            vec!["test://dir/a", "test://dir/b", "test://dir/sub/c"]
        );
    }

    #[test]
    fn test_copy_single_file_cross_driver() {
        let (arbiter, _) = arbiter_with(vec![]);
        let dir = tempfile::tempdir().unwrap();

        arbiter.put("test://src/report.csv", b"1,2,3").unwrap();
        let dst_dir = format!("{}/out/", dir.path().to_str().unwrap());
        arbiter.copy("test://src/report.csv", &dst_dir, true).unwrap();

        let copied = std::fs::read(dir.path().join("out/report.csv")).unwrap();
        assert_eq!(copied, b"1,2,3".to_vec());
    }

    #[test]
    fn test_copy_single_file_same_driver() {
        let (arbiter, _) = arbiter_with(vec![]);

        arbiter.put("test://src/a.txt", b"aa").unwrap();
        arbiter.copy("test://src/a.txt", "test://dst/a.txt", false).unwrap();

        assert_eq!(arbiter.get("test://dst/a.txt").unwrap(), "aa");
    }

    #[test]
    fn test_copy_directory_mirrors_structure() {
        let (arbiter, _) = arbiter_with(vec![]);
        let dir = tempfile::tempdir().unwrap();

        arbiter.put("test://data/a.txt", b"a").unwrap();
        arbiter.put("test://data/sub/b.txt", b"b").unwrap();
        let dst = format!("{}/mirror/", dir.path().to_str().unwrap());
        arbiter.copy("test://data/", &dst, true).unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("mirror/a.txt")).unwrap(),
            b"a".to_vec()
        );
        assert_eq!(
            std::fs::read(dir.path().join("mirror/sub/b.txt")).unwrap(),
            b"b".to_vec()
        );
    }

    #[test]
    fn test_copy_glob_to_remote_destination() {
        let (arbiter, _) = arbiter_with(vec![]);

        arbiter.put("test://data/a.txt", b"a").unwrap();
        arbiter.put("test://data/b.txt", b"b").unwrap();
        arbiter.copy("test://data/*", "test://out/", false).unwrap();

        assert_eq!(arbiter.get("test://out/a.txt").unwrap(), "a");
        assert_eq!(arbiter.get("test://out/b.txt").unwrap(), "b");
    }

    #[test]
    fn test_copy_directory_to_itself_rejected_before_io() {
        let (arbiter, transport) = arbiter_with(vec![]);

        let result = arbiter.copy("s3://bucket/dir/", "s3://bucket/dir/", false);
        assert!(matches!(result, Err(ArbiterError::Config(_))));
        // Rejected before any request went out.
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_copy_empty_paths_rejected() {
        let (arbiter, _) = arbiter_with(vec![]);

        assert!(matches!(
            arbiter.copy("", "test://dst/", false),
            Err(ArbiterError::Config(_))
        ));
        assert!(matches!(
            arbiter.copy("test://src/", "", false),
            Err(ArbiterError::Config(_))
        ));
    }

    #[test]
    fn test_local_handle_wraps_local_path() {
        let (arbiter, _) = arbiter_with(vec![]);
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("local.txt");
        std::fs::write(&file, b"here").unwrap();

        let before: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        let handle = arbiter
            .local_handle_in(file.to_str().unwrap(), dir.path().to_str().unwrap())
            .unwrap();

        assert_eq!(handle.local_path(), file.as_path());
        // No temp file was created for an already-local source.
        let after: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(before.len(), after.len());

        drop(handle);
        assert!(file.exists());
    }

    #[test]
    fn test_local_handle_materializes_remote() {
        let (arbiter, _) = arbiter_with(vec![]);
        let dir = tempfile::tempdir().unwrap();

        arbiter.put("test://obj/data.bin", b"remote bytes").unwrap();
        let handle = arbiter
            .local_handle_in("test://obj/data.bin", dir.path().to_str().unwrap())
            .unwrap();

        let temp_path = handle.local_path().to_path_buf();
        assert!(temp_path.starts_with(dir.path()));
        assert_eq!(temp_path.extension().unwrap(), "bin");
        assert_eq!(std::fs::read(&temp_path).unwrap(), b"remote bytes".to_vec());

        drop(handle);
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_local_handle_rejects_remote_temp_endpoint() {
        let (arbiter, _) = arbiter_with(vec![]);

        arbiter.put("test://obj/data", b"x").unwrap();
        let temp = arbiter.endpoint("test://scratch/").unwrap();
        assert!(matches!(
            arbiter.local_handle("test://obj/data", &temp),
            Err(ArbiterError::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_binds_driver_and_root() {
        let (arbiter, _) = arbiter_with(vec![]);

        arbiter.put("test://root/inner/file", b"v").unwrap();
        let endpoint = arbiter.endpoint("test://root").unwrap();

        assert_eq!(endpoint.scheme(), "test");
        assert_eq!(endpoint.get("inner/file").unwrap(), "v");
        assert_eq!(endpoint.prefixed_root(), "test://root/");
    }

    #[test]
    fn test_add_driver_replaces_registration() {
        let (mut arbiter, _) = arbiter_with(vec![]);

        arbiter.put("test://k", b"old").unwrap();
        arbiter.add_driver(Arc::new(TestDriver::new())).unwrap();
        // Fresh in-memory store under the same scheme.
        assert_eq!(arbiter.try_get("test://k").unwrap(), None);
    }

    #[test]
    fn test_add_driver_rejects_empty_scheme() {
        struct Anonymous;
        impl Driver for Anonymous {
            fn scheme(&self) -> &str {
                ""
            }
            fn get(&self, path: &str) -> ArbiterResult<Vec<u8>> {
                Err(ArbiterError::NotFound(path.to_string()))
            }
            fn put(&self, _path: &str, _data: &[u8]) -> ArbiterResult<()> {
                Ok(())
            }
        }

        let (mut arbiter, _) = arbiter_with(vec![]);
        assert!(matches!(
            arbiter.add_driver(Arc::new(Anonymous)),
            Err(ArbiterError::Config(_))
        ));
    }

    #[test]
    fn test_s3_profile_registration_from_config() {
        let (pool, _) = MockTransport::pool(vec![]);
        let config = ArbiterConfig::from_value(json!({
            "s3": [
                { "access": "A1", "hidden": "S1" },
                { "profile": "backup", "access": "A2", "hidden": "S2" }
            ]
        }));
        let arbiter = Arbiter::with_parts(&config, pool).unwrap();

        assert!(arbiter.has_driver("s3://b/k"));
        assert!(arbiter.has_driver("backup@s3://b/k"));
    }
}
