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

//! S3-compatible object storage driver.
//!
//! Paths decompose into `{bucket}/{object}`. Requests are signed
//! ([`sign`]) and executed through the shared pool with exponential
//! backoff for server errors ([`crate::http::retry`]). Bucket listings
//! paginate via `prefix`/`marker` query parameters and XML responses.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;
use tracing::debug;

use super::Driver;
use crate::error::{ArbiterError, ArbiterResult};
use crate::http::{retry, HttpPool, HttpResponse, Query};

pub mod sign;

pub use sign::AwsAuth;

const BASE_URL: &str = ".s3.amazonaws.com/";
const HTTP_ATTEMPTS: usize = 200;
const BAD_RESPONSE: &str = "Unexpected contents in S3 response";

/// Driver for S3-compatible object storage, registered under the `s3`
/// scheme (or `{profile}@s3` for named profiles).
pub struct S3Driver {
    scheme: String,
    auth: AwsAuth,
    pool: HttpPool,
}

impl S3Driver {
    pub fn new(auth: AwsAuth, pool: HttpPool) -> Self {
        Self {
            scheme: "s3".to_string(),
            auth,
            pool,
        }
    }

    /// A driver for a named credential profile, registered under
    /// `{profile}@s3`.
    pub fn with_profile(profile: &str, auth: AwsAuth, pool: HttpPool) -> Self {
        Self {
            scheme: format!("{}@s3", profile),
            auth,
            pool,
        }
    }

    /// Build every driver the `s3` config section describes: either a
    /// single credential object or an array of `{profile, access, hidden}`
    /// entries. Missing credentials yield no drivers rather than an error.
    pub fn from_config(section: Option<&Value>, pool: &HttpPool) -> Vec<Self> {
        let mut drivers = Vec::new();

        match section {
            Some(Value::Array(profiles)) => {
                for entry in profiles {
                    let Some(auth) = AwsAuth::find(Some(entry)) else {
                        continue;
                    };
                    let driver = match entry.get("profile").and_then(Value::as_str) {
                        Some(profile) if profile != "default" => {
                            Self::with_profile(profile, auth, pool.clone())
                        }
                        _ => Self::new(auth, pool.clone()),
                    };
                    drivers.push(driver);
                }
            }
            other => {
                if let Some(auth) = AwsAuth::find(other) {
                    drivers.push(Self::new(auth, pool.clone()));
                }
            }
        }

        drivers
    }

    /// Split a `bucket/object` path; one trailing `/` is ignored and the
    /// object may be empty.
    fn split(path: &str) -> (&str, &str) {
        let trimmed = path.strip_suffix('/').unwrap_or(path);
        match trimmed.find('/') {
            Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
            None => (trimmed, ""),
        }
    }

    fn endpoint_url(bucket: &str, object: &str) -> String {
        format!("http://{}{}{}", bucket, BASE_URL, object)
    }

    fn request_get(&self, bucket: &str, object: &str, query: &Query) -> HttpResponse {
        let headers = sign::get_headers(&self.auth, &format!("{}/{}", bucket, object));
        self.pool
            .get(&Self::endpoint_url(bucket, object), &headers, query)
    }

    fn request_put(&self, path: &str, data: &[u8]) -> HttpResponse {
        let (bucket, object) = Self::split(path);
        let headers = sign::put_headers(&self.auth, path);
        self.pool
            .put(&Self::endpoint_url(bucket, object), &headers, &Query::new(), data)
    }
}

impl Driver for S3Driver {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn get(&self, path: &str) -> ArbiterResult<Vec<u8>> {
        let (bucket, object) = Self::split(path);
        let query = Query::new();
        let response = retry::execute(|| self.request_get(bucket, object, &query), HTTP_ATTEMPTS);

        match response.code() {
            200 => Ok(response.into_data()),
            404 => Err(ArbiterError::NotFound(path.to_string())),
            code => Err(ArbiterError::Transfer(format!(
                "Couldn't fetch {}: {}: {}",
                path,
                code,
                response.snippet()
            ))),
        }
    }

    fn put(&self, path: &str, data: &[u8]) -> ArbiterResult<()> {
        let response = retry::execute(|| self.request_put(path, data), HTTP_ATTEMPTS);

        if response.code() == 200 {
            Ok(())
        } else {
            Err(ArbiterError::Transfer(format!(
                "Couldn't write {}: {}: {}",
                path,
                response.code(),
                response.snippet()
            )))
        }
    }

    fn glob(&self, pattern: &str, recursive: bool, verbose: bool) -> ArbiterResult<Vec<String>> {
        let stripped = pattern.strip_suffix("/*").ok_or_else(|| {
            ArbiterError::Config(format!("Invalid glob path: {}", pattern))
        })?;

        let (bucket, object) = Self::split(stripped);
        let prefix = if object.is_empty() {
            String::new()
        } else {
            format!("{}/", object)
        };

        let mut query = Query::new();
        if !prefix.is_empty() {
            query.insert("prefix".to_string(), prefix.clone());
        }

        let mut results = Vec::new();

        loop {
            if verbose {
                debug!("listing bucket {} with prefix '{}'", bucket, prefix);
            }

            let response =
                retry::execute(|| self.request_get(bucket, "", &query), HTTP_ATTEMPTS);
            if response.code() != 200 {
                return Err(ArbiterError::Transfer(format!(
                    "Couldn't query bucket contents: {}: {}",
                    response.code(),
                    response.snippet()
                )));
            }

            let listing = parse_listing(response.data())?;

            let mut last_key = None;
            for key in listing.keys {
                // The prefix may itself contain slashes; a non-recursive
                // glob keeps only the level directly below it.
                let rest = key.strip_prefix(&prefix).unwrap_or(&key);
                if recursive || !rest.contains('/') {
                    results.push(format!("{}://{}/{}", self.scheme(), bucket, key));
                }
                last_key = Some(key);
            }

            if !listing.truncated {
                break;
            }
            match last_key {
                Some(key) => {
                    query.insert("marker".to_string(), key);
                }
                // A truncated page with no keys would never terminate.
                None => return Err(ArbiterError::Protocol(BAD_RESPONSE.to_string())),
            }
        }

        Ok(results)
    }
}

struct Listing {
    truncated: bool,
    keys: Vec<String>,
}

/// Parse a `ListBucketResult` document. The root node, at least one
/// `Contents`, and a `Key` per `Contents` are required; anything else is
/// an unexpected response.
fn parse_listing(data: &[u8]) -> ArbiterResult<Listing> {
    let text = std::str::from_utf8(data)
        .map_err(|_| ArbiterError::Protocol(BAD_RESPONSE.to_string()))?;

    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut saw_root = false;
    let mut saw_contents = false;
    let mut truncated = false;
    let mut keys = Vec::new();
    let mut current_key: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                if stack.is_empty() && name == "ListBucketResult" {
                    saw_root = true;
                }
                if stack.len() == 1 && saw_root && name == "Contents" {
                    saw_contents = true;
                    current_key = None;
                }
                stack.push(name);
            }
            Ok(Event::Text(element)) => {
                let value = element
                    .unescape()
                    .map_err(|_| ArbiterError::Protocol(BAD_RESPONSE.to_string()))?;
                match stack.as_slice() {
                    [root, field] if root == "ListBucketResult" && field == "IsTruncated" => {
                        truncated = value.to_lowercase() == "true";
                    }
                    [root, contents, key]
                        if root == "ListBucketResult"
                            && contents == "Contents"
                            && key == "Key" =>
                    {
                        current_key = Some(value.into_owned());
                    }
                    _ => {}
                }
            }
            Ok(Event::End(element)) => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                if stack.len() == 2 && name == "Contents" {
                    match current_key.take() {
                        Some(key) => keys.push(key),
                        None => return Err(ArbiterError::Protocol(BAD_RESPONSE.to_string())),
                    }
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return Err(ArbiterError::Protocol(BAD_RESPONSE.to_string())),
        }
    }

    if !saw_root || !saw_contents {
        return Err(ArbiterError::Protocol(BAD_RESPONSE.to_string()));
    }

    Ok(Listing { truncated, keys })
}
