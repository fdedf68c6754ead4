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

//! Blocking HTTP plumbing shared by the remote drivers.
//!
//! Drivers never touch the concrete client: they hold an [`HttpPool`]
//! lease and issue requests through the narrow [`HttpTransport`] trait,
//! which keeps the transport swappable in tests.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::HttpOptions;
use crate::error::{ArbiterError, ArbiterResult};

pub mod retry;

/// Ordered request headers. An empty value emits an explicit empty header,
/// overriding anything the client would add on its own.
pub type Headers = Vec<(String, String)>;

/// URL query parameters. A `BTreeMap` so iteration, and therefore URL
/// construction, is deterministic per call.
pub type Query = BTreeMap<String, String>;

/// A raw HTTP outcome: status code plus response body.
///
/// No interpretation beyond 2xx = success and 5xx = retryable; a code of
/// `0` models a transport-level failure (connection refused, DNS, ...)
/// with the error text as the body.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    code: u16,
    data: Vec<u8>,
}

impl HttpResponse {
    pub fn new(code: u16, data: Vec<u8>) -> Self {
        Self { code, data }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// True for any 5xx status; the only retryable class.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.code)
    }

    /// A short, lossily decoded slice of the body for error messages.
    pub fn snippet(&self) -> String {
        const LIMIT: usize = 256;
        let end = self.data.len().min(LIMIT);
        let mut text = String::from_utf8_lossy(&self.data[..end]).into_owned();
        if self.data.len() > LIMIT {
            text.push_str("...");
        }
        text
    }
}

/// The primitive every remote driver builds on: one blocking request with
/// connection reuse behind it.
pub trait HttpTransport: Send + Sync {
    fn request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        query: &Query,
        body: Option<&[u8]>,
    ) -> HttpResponse;
}

/// A cloneable lease on the shared HTTP connection pool.
///
/// The pool is built once by the [`Arbiter`](crate::Arbiter) and cloned
/// into each driver that needs it; dropping a driver releases its lease
/// while the underlying connections live on for the other holders.
#[derive(Clone)]
pub struct HttpPool {
    transport: Arc<dyn HttpTransport>,
}

impl HttpPool {
    /// Build a pool backed by a real blocking client configured from the
    /// `http` config section.
    pub fn new(options: &HttpOptions) -> ArbiterResult<Self> {
        Ok(Self {
            transport: Arc::new(ReqwestTransport::new(options)?),
        })
    }

    /// Build a pool around an externally supplied transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub fn request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        query: &Query,
        body: Option<&[u8]>,
    ) -> HttpResponse {
        self.transport.request(method, url, headers, query, body)
    }

    pub fn get(&self, url: &str, headers: &Headers, query: &Query) -> HttpResponse {
        self.request("GET", url, headers, query, None)
    }

    pub fn put(&self, url: &str, headers: &Headers, query: &Query, body: &[u8]) -> HttpResponse {
        self.request("PUT", url, headers, query, Some(body))
    }
}

impl std::fmt::Debug for HttpPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HttpPool")
    }
}

/// Default transport: a `reqwest` blocking client with its built-in
/// connection pool.
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    fn new(options: &HttpOptions) -> ArbiterResult<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .pool_idle_timeout(Duration::from_secs(options.pool_idle_timeout))
            .pool_max_idle_per_host(options.pool_max_idle_per_host);

        if options.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(options.timeout));
        }
        if options.connect_timeout > 0 {
            builder = builder.connect_timeout(Duration::from_secs(options.connect_timeout));
        }

        let client = builder
            .build()
            .map_err(|e| ArbiterError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn execute(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        query: &Query,
        body: Option<&[u8]>,
    ) -> ArbiterResult<HttpResponse> {
        let mut target = Url::parse(url)
            .map_err(|e| ArbiterError::Config(format!("Invalid URL {}: {}", url, e)))?;

        if !query.is_empty() {
            let mut pairs = target.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let method = reqwest::Method::from_bytes(method.as_bytes())
            .map_err(|_| ArbiterError::Config(format!("Invalid HTTP method: {}", method)))?;

        let mut request = self.client.request(method, target);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request
            .send()
            .map_err(|e| ArbiterError::Transfer(e.to_string()))?;
        let code = response.status().as_u16();
        let data = response
            .bytes()
            .map_err(|e| ArbiterError::Transfer(e.to_string()))?
            .to_vec();

        Ok(HttpResponse::new(code, data))
    }
}

impl HttpTransport for ReqwestTransport {
    fn request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        query: &Query,
        body: Option<&[u8]>,
    ) -> HttpResponse {
        match self.execute(method, url, headers, query, body) {
            Ok(response) => response,
            // Transport failures surface as code 0: fatal, never retried.
            Err(error) => HttpResponse::new(0, error.to_string().into_bytes()),
        }
    }
}
