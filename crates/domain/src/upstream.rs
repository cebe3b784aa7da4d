use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A DoH resolver URL such as `https://9.9.9.9/dns-query`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpstreamEndpoint {
    url: Arc<str>,
}

impl UpstreamEndpoint {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Host portion of the URL, used for log fields.
    pub fn host(&self) -> &str {
        let rest = self
            .url
            .split_once("://")
            .map_or(self.url.as_ref(), |(_, rest)| rest);
        rest.split(['/', '?']).next().unwrap_or(rest)
    }
}

impl FromStr for UpstreamEndpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rest = s
            .strip_prefix("https://")
            .or_else(|| s.strip_prefix("http://"))
            .ok_or_else(|| {
                DomainError::InvalidEndpoint(format!(
                    "'{}' must start with https:// or http://",
                    s
                ))
            })?;

        let host = rest.split(['/', '?']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(DomainError::InvalidEndpoint(format!(
                "'{}' has no host",
                s
            )));
        }
        if s.contains('?') {
            return Err(DomainError::InvalidEndpoint(format!(
                "'{}' must not carry a query string",
                s
            )));
        }

        Ok(Self { url: Arc::from(s) })
    }
}

impl fmt::Display for UpstreamEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Immutable set of known upstream resolvers.
///
/// Every request gets its own random permutation; the registry itself never
/// changes order, so concurrent requests share nothing but the list.
#[derive(Debug, Clone)]
pub struct UpstreamRegistry {
    endpoints: Arc<[UpstreamEndpoint]>,
}

impl UpstreamRegistry {
    pub fn new(endpoints: Vec<UpstreamEndpoint>) -> Result<Self, DomainError> {
        if endpoints.is_empty() {
            return Err(DomainError::NoUpstreams);
        }
        Ok(Self {
            endpoints: Arc::from(endpoints),
        })
    }

    pub fn from_urls<S: AsRef<str>>(urls: &[S]) -> Result<Self, DomainError> {
        let endpoints = urls
            .iter()
            .map(|u| u.as_ref().parse::<UpstreamEndpoint>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(endpoints)
    }

    /// Fresh uniformly random ordering, seeded from a request-scoped source.
    pub fn permute(&self) -> Vec<UpstreamEndpoint> {
        self.permute_with(&mut fastrand::Rng::new())
    }

    pub fn permute_with(&self, rng: &mut fastrand::Rng) -> Vec<UpstreamEndpoint> {
        let mut order = self.endpoints.to_vec();
        rng.shuffle(&mut order);
        order
    }

    pub fn endpoints(&self) -> &[UpstreamEndpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
