use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream racing parameters.
///
/// Worst-case latency of a relayed query is bounded by
/// `max_batches * attempt_timeout_ms`: every batch may run until its slowest
/// attempt times out before the next batch starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    #[serde(default = "default_upstreams")]
    pub upstreams: Vec<String>,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_max_batches")]
    pub max_batches: usize,

    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,

    #[serde(default)]
    pub soft_failure_policy: SoftFailurePolicy,
}

impl RelayConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn worst_case_latency(&self) -> Duration {
        u32::try_from(self.max_batches)
            .ok()
            .and_then(|batches| self.attempt_timeout().checked_mul(batches))
            .unwrap_or(Duration::MAX)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstreams: default_upstreams(),
            batch_size: default_batch_size(),
            max_batches: default_max_batches(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
            soft_failure_policy: SoftFailurePolicy::default(),
        }
    }
}

/// What the relay does with a batch that produced only non-authoritative
/// DNS answers.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoftFailurePolicy {
    /// Serve the soft failure immediately.
    #[default]
    Stop,

    /// Keep racing later batches; serve the first soft failure only if none
    /// of them yields an authoritative answer.
    Continue,
}

impl SoftFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Continue => "continue",
        }
    }
}

fn default_upstreams() -> Vec<String> {
    [
        "https://1.0.0.1/dns-query",
        "https://8.8.4.4/dns-query",
        "https://9.9.9.9/dns-query",
        "https://149.112.112.112/dns-query",
        "https://208.67.220.220/dns-query",
        "https://101.101.101.101/dns-query",
        "https://dns.nextdns.io/dns-query",
        "https://doh.opendns.com/dns-query",
        "https://unfiltered.adguard-dns.com/dns-query",
        "https://freedns.controld.com/p0",
        "https://ordns.he.net/dns-query",
        "https://dns.mullvad.net/dns-query",
        "https://odvr.nic.cz/doh",
        "https://doh.libredns.gr/dns-query",
        "https://public.dns.iij.jp/dns-query",
        "https://doh.dns.sb/dns-query",
        "https://resolver.dnsprivacy.org.uk/dns-query",
        "https://jp.tiar.app/dns-query",
        "https://dns.dnsguard.pub/dns-query",
        "https://doh.applied-privacy.net/query",
        "https://dns.bebasid.com/unfiltered",
        "https://doh.cleanbrowsing.org/doh/security-filter/",
        "https://wikimedia-dns.org/dns-query",
        "https://doh.ffmuc.net/dns-query",
        "https://dns.switch.ch/dns-query",
        "https://private.canadianshield.cira.ca/dns-query",
        "https://v.recipes/dns-query",
        "https://sky.rethinkdns.com/dns-query",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_batch_size() -> usize {
    3
}

fn default_max_batches() -> usize {
    4
}

fn default_attempt_timeout_ms() -> u64 {
    4000
}
