use super::{Driver, HttpDerived};
use crate::error::{ArbiterError, ArbiterResult};
use crate::http::{Headers, HttpPool, Query};

/// Plain HTTP(S) driver. One instance per scheme (`http`, `https`), both
/// sharing the same pool lease.
pub struct HttpDriver {
    scheme: String,
    pool: HttpPool,
}

impl HttpDriver {
    pub fn new(scheme: impl Into<String>, pool: HttpPool) -> Self {
        Self {
            scheme: scheme.into(),
            pool,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}://{}", self.scheme, path)
    }

    fn fetch(&self, path: &str, headers: &Headers, query: &Query) -> ArbiterResult<Vec<u8>> {
        let response = self.pool.get(&self.url(path), headers, query);
        match response.code() {
            _ if response.ok() => Ok(response.into_data()),
            404 => Err(ArbiterError::NotFound(path.to_string())),
            code => Err(ArbiterError::Transfer(format!(
                "Couldn't fetch {}: {}: {}",
                path,
                code,
                response.snippet()
            ))),
        }
    }

    fn store(
        &self,
        path: &str,
        data: &[u8],
        headers: &Headers,
        query: &Query,
    ) -> ArbiterResult<()> {
        let response = self.pool.put(&self.url(path), headers, query, data);
        if response.ok() {
            Ok(())
        } else {
            Err(ArbiterError::Transfer(format!(
                "Couldn't write {}: {}",
                path,
                response.code()
            )))
        }
    }
}

impl Driver for HttpDriver {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn get(&self, path: &str) -> ArbiterResult<Vec<u8>> {
        self.fetch(path, &Headers::new(), &Query::new())
    }

    fn put(&self, path: &str, data: &[u8]) -> ArbiterResult<()> {
        self.store(path, data, &Headers::new(), &Query::new())
    }

    fn as_http(&self) -> Option<&dyn HttpDerived> {
        Some(self)
    }
}

impl HttpDerived for HttpDriver {
    fn get_with(&self, path: &str, headers: &Headers, query: &Query) -> ArbiterResult<Vec<u8>> {
        self.fetch(path, headers, query)
    }

    fn put_with(
        &self,
        path: &str,
        data: &[u8],
        headers: &Headers,
        query: &Query,
    ) -> ArbiterResult<()> {
        self.store(path, data, headers, query)
    }
}
