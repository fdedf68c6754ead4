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

//! # Arbiter
//!
//! A Rust library for uniform object access across heterogeneous storage
//! backends through a single path-string interface.
//!
//! Paths carry a URI-style scheme prefix (`s3://`, `http://`, `test://`;
//! bare paths mean the local filesystem) and every operation (read,
//! write, copy, existence, glob resolution) dispatches to the driver
//! registered for that scheme.
//!
//! ## Features
//!
//! - **Scheme-dispatched drivers**: local filesystem, in-memory test
//!   store, HTTP/HTTPS, and S3-compatible object storage behind one
//!   interface
//! - **S3 protocol support**: AWS request signing (HMAC-SHA1), paginated
//!   bucket listing, and exponential-backoff retry of server errors
//! - **Glob resolution**: `dir/*` expands one level, `dir/**` recursively
//! - **Cross-driver copy**: single files or whole directory trees, with
//!   structure mirrored below the common root
//! - **Local materialization**: temporary local handles for remote
//!   objects, cleaned up automatically
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arbiter::Arbiter;
//!
//! # fn main() -> arbiter::ArbiterResult<()> {
//! let arbiter = Arbiter::new()?;
//!
//! // Bare paths hit the local filesystem.
//! let notes = arbiter.get("~/notes.txt")?;
//!
//! // Scheme prefixes select other backends.
//! arbiter.put("s3://my-bucket/backup/notes.txt", notes.as_bytes())?;
//! let keys = arbiter.resolve("s3://my-bucket/backup/*", false)?;
//! println!("{} objects", keys.len());
//! # Ok(())
//! # }
//! ```
//!
//! ### Copying Across Backends
//!
//! ```rust,no_run
//! use arbiter::Arbiter;
//!
//! # fn main() -> arbiter::ArbiterResult<()> {
//! let arbiter = Arbiter::new()?;
//!
//! // Mirror a bucket directory into a local one.
//! arbiter.copy("s3://my-bucket/logs/", "./logs/", true)?;
//!
//! // Work with a guaranteed-local file, temporary if need be.
//! let handle = arbiter.local_handle_in("s3://my-bucket/model.bin", "")?;
//! println!("local copy at {}", handle.local_path().display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`Arbiter::with_config`] accepts a JSON override merged over a config
//! file located by `ARBITER_CONFIG_FILE` / `ARBITER_CONFIG_PATH` (default
//! `~/.arbiter/config.json`), carrying per-driver sections such as S3
//! credentials and HTTP pool options.
//!
//! ## Modules
//!
//! - [`arbiter`] - Top-level facade and driver registry
//! - [`drivers`] - Storage backend drivers and the [`Driver`] contract
//! - [`endpoint`] - Rooted endpoints and local handles
//! - [`http`] - Blocking HTTP transport, pool, and retry executor
//! - [`config`] - JSON configuration loading and merging
//! - [`util`] - Path-string helpers

pub mod arbiter;
pub mod config;
pub mod drivers;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod util;

// Re-export commonly used types
pub use crate::arbiter::Arbiter;
pub use config::ArbiterConfig;
pub use drivers::s3::AwsAuth;
pub use drivers::{Driver, HttpDerived};
pub use endpoint::{Endpoint, LocalHandle};
pub use error::{ArbiterError, ArbiterResult};
pub use http::{Headers, HttpPool, HttpResponse, Query};
