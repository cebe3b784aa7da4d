use doh_relay_domain::{DomainError, UpstreamEndpoint, UpstreamRegistry};
use std::collections::HashSet;

fn urls(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("https://resolver-{}.example/dns-query", i))
        .collect()
}

#[test]
fn test_parse_https_endpoint() {
    let endpoint: UpstreamEndpoint = "https://9.9.9.9/dns-query".parse().unwrap();
    assert_eq!(endpoint.url(), "https://9.9.9.9/dns-query");
    assert_eq!(endpoint.host(), "9.9.9.9");
}

#[test]
fn test_parse_endpoint_trims_whitespace() {
    let endpoint: UpstreamEndpoint = "  https://dns.switch.ch/dns-query ".parse().unwrap();
    assert_eq!(endpoint.to_string(), "https://dns.switch.ch/dns-query");
}

#[test]
fn test_parse_plain_http_for_local_resolvers() {
    let endpoint: UpstreamEndpoint = "http://127.0.0.1:8080/dns-query".parse().unwrap();
    assert_eq!(endpoint.host(), "127.0.0.1:8080");
}

#[test]
fn test_reject_non_http_scheme() {
    let err = "udp://8.8.8.8:53".parse::<UpstreamEndpoint>().unwrap_err();
    assert!(matches!(err, DomainError::InvalidEndpoint(_)));
}

#[test]
fn test_reject_missing_host() {
    assert!("https:///dns-query".parse::<UpstreamEndpoint>().is_err());
}

#[test]
fn test_reject_embedded_query_string() {
    assert!("https://dns.google/dns-query?dns=AAAB"
        .parse::<UpstreamEndpoint>()
        .is_err());
}

#[test]
fn test_empty_registry_is_rejected() {
    let err = UpstreamRegistry::new(vec![]).unwrap_err();
    assert_eq!(err, DomainError::NoUpstreams);
}

#[test]
fn test_permute_keeps_every_endpoint_exactly_once() {
    let registry = UpstreamRegistry::from_urls(&urls(28)).unwrap();

    let permuted = registry.permute();

    assert_eq!(permuted.len(), 28);
    let unique: HashSet<_> = permuted.iter().collect();
    assert_eq!(unique.len(), 28);
    for endpoint in registry.endpoints() {
        assert!(unique.contains(endpoint));
    }
}

#[test]
fn test_permute_with_seed_is_reproducible() {
    let registry = UpstreamRegistry::from_urls(&urls(10)).unwrap();

    let a = registry.permute_with(&mut fastrand::Rng::with_seed(7));
    let b = registry.permute_with(&mut fastrand::Rng::with_seed(7));

    assert_eq!(a, b);
}

#[test]
fn test_permute_does_not_mutate_registry_order() {
    let registry = UpstreamRegistry::from_urls(&urls(10)).unwrap();
    let before = registry.endpoints().to_vec();

    for seed in 0..20 {
        let _ = registry.permute_with(&mut fastrand::Rng::with_seed(seed));
    }

    assert_eq!(registry.endpoints(), before.as_slice());
}

#[test]
fn test_permute_produces_varied_orderings() {
    let registry = UpstreamRegistry::from_urls(&urls(10)).unwrap();

    let orderings: HashSet<Vec<UpstreamEndpoint>> = (0..50)
        .map(|seed| registry.permute_with(&mut fastrand::Rng::with_seed(seed)))
        .collect();

    assert!(orderings.len() > 1, "Permutation should vary between seeds");
}

#[test]
fn test_first_position_is_spread_across_endpoints() {
    let registry = UpstreamRegistry::from_urls(&urls(4)).unwrap();
    let mut rng = fastrand::Rng::with_seed(42);

    let firsts: HashSet<UpstreamEndpoint> = (0..200)
        .map(|_| registry.permute_with(&mut rng)[0].clone())
        .collect();

    assert_eq!(firsts.len(), 4, "Every endpoint should lead some permutation");
}
