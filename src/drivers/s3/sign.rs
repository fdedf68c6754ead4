//! AWS v2-style request signing: canonical string-to-sign, HMAC-SHA1,
//! Base64.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Local;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha1::Sha1;

use crate::http::Headers;

type HmacSha1 = Hmac<Sha1>;

/// An access-key / secret-key credential pair.
///
/// Immutable once constructed. The secret never appears in `Debug` output
/// and is never logged.
#[derive(Clone)]
pub struct AwsAuth {
    access: String,
    hidden: String,
}

impl AwsAuth {
    pub fn new(access: impl Into<String>, hidden: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            hidden: hidden.into(),
        }
    }

    /// Locate a credential pair: explicit config keys (`access`/`hidden`)
    /// first, the conventional environment variables otherwise.
    pub fn find(config: Option<&Value>) -> Option<Self> {
        if let Some(config) = config {
            let access = config.get("access").and_then(Value::as_str);
            let hidden = config.get("hidden").and_then(Value::as_str);
            if let (Some(access), Some(hidden)) = (access, hidden) {
                return Some(Self::new(access, hidden));
            }
        }

        match (
            std::env::var("AWS_ACCESS_KEY_ID"),
            std::env::var("AWS_SECRET_ACCESS_KEY"),
        ) {
            (Ok(access), Ok(hidden)) => Some(Self::new(access, hidden)),
            _ => None,
        }
    }

    pub fn access(&self) -> &str {
        &self.access
    }

    pub(crate) fn hidden(&self) -> &str {
        &self.hidden
    }
}

impl std::fmt::Debug for AwsAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsAuth")
            .field("access", &self.access)
            .field("hidden", &"<redacted>")
            .finish()
    }
}

/// Current wall-clock time as an RFC-1123-style HTTP date.
pub fn http_date() -> String {
    Local::now().format("%a, %d %b %Y %H:%M:%S %z").to_string()
}

/// The canonical string the signature is computed over. The blank second
/// line is the unused Content-MD5 field.
pub fn string_to_sign(verb: &str, resource: &str, http_date: &str, content_type: &str) -> String {
    format!("{}\n\n{}\n{}\n/{}", verb, content_type, http_date, resource)
}

/// HMAC-SHA1 over `to_sign` keyed by the secret, Base64-encoded with the
/// standard alphabet and `=` padding.
pub fn sign(hidden: &str, to_sign: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(hidden.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Headers for a signed GET of `resource` (`{bucket}/{object}`).
pub fn get_headers(auth: &AwsAuth, resource: &str) -> Headers {
    let date = http_date();
    let signature = sign(auth.hidden(), &string_to_sign("GET", resource, &date, ""));
    vec![
        ("Date".to_string(), date),
        (
            "Authorization".to_string(),
            format!("AWS {}:{}", auth.access(), signature),
        ),
    ]
}

/// Headers for a signed PUT of `resource`. The empty `Transfer-Encoding`
/// and `Expect` values override chunked-encoding and 100-continue
/// behavior a client may add on its own.
pub fn put_headers(auth: &AwsAuth, resource: &str) -> Headers {
    let date = http_date();
    let signature = sign(
        auth.hidden(),
        &string_to_sign("PUT", resource, &date, "application/octet-stream"),
    );
    vec![
        (
            "Content-Type".to_string(),
            "application/octet-stream".to_string(),
        ),
        ("Date".to_string(), date),
        (
            "Authorization".to_string(),
            format!("AWS {}:{}", auth.access(), signature),
        ),
        ("Transfer-Encoding".to_string(), String::new()),
        ("Expect".to_string(), String::new()),
    ]
}
