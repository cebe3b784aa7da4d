use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::fmt::{self, Write};
use std::sync::Arc;

const DNS_PARAM: &str = "dns";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic digest of (method, normalized params, body).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Arc<str>);

impl CacheKey {
    pub fn derive(method: HttpMethod, params: &[(String, String)], body: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(method.as_str().as_bytes());
        hasher.update(b":");
        for (name, value) in params {
            // Length prefixes keep `a=b&c` and `a=b%26c` apart.
            hasher.update((name.len() as u64).to_be_bytes());
            hasher.update(name.as_bytes());
            hasher.update((value.len() as u64).to_be_bytes());
            hasher.update(value.as_bytes());
        }
        hasher.update(b":");
        hasher.update(body);

        let digest = hasher.finalize();
        let mut key = String::with_capacity(4 + digest.len() * 2);
        key.push_str("doh_");
        for byte in digest {
            let _ = write!(key, "{:02x}", byte);
        }
        Self(Arc::from(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A client query as handed over by ingress: already validated, ready to be
/// forwarded verbatim to any upstream.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub method: HttpMethod,
    /// Decoded query-string pairs in arrival order. Only forwarded for GET.
    pub params: Arc<[(String, String)]>,
    pub body: Bytes,
    pub cache_key: CacheKey,
}

impl QueryRequest {
    pub fn new(method: HttpMethod, params: Vec<(String, String)>, body: Bytes) -> Self {
        let cache_key = CacheKey::derive(method, &params, &body);
        Self {
            method,
            params: Arc::from(params),
            body,
            cache_key,
        }
    }

    pub fn get(params: Vec<(String, String)>) -> Self {
        Self::new(HttpMethod::Get, params, Bytes::new())
    }

    pub fn post(body: impl Into<Bytes>) -> Self {
        Self::new(HttpMethod::Post, Vec::new(), body.into())
    }

    /// Raw DNS wire message carried by this request, if one can be recovered.
    pub fn dns_message(&self) -> Option<Bytes> {
        match self.method {
            HttpMethod::Post if !self.body.is_empty() => Some(self.body.clone()),
            HttpMethod::Post => None,
            HttpMethod::Get => {
                let (_, encoded) = self.params.iter().find(|(name, _)| name == DNS_PARAM)?;
                URL_SAFE_NO_PAD
                    .decode(encoded.trim_end_matches('='))
                    .ok()
                    .map(Bytes::from)
            }
        }
    }

    pub fn message_id(&self) -> Option<u16> {
        let message = self.dns_message()?;
        if message.len() < 2 {
            return None;
        }
        Some(u16::from_be_bytes([message[0], message[1]]))
    }
}
